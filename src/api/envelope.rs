//! The `{error, payload, message}` wrapper every backend endpoint responds with.

use serde::Deserialize;

use crate::error::EarnError;

/// Response envelope. `error: true` is a hard failure regardless of HTTP status.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub payload: Option<T>,
}

impl<T> Envelope<T> {
    /// Unwrap a successful envelope that must carry a payload.
    pub fn into_payload(self) -> Result<T, EarnError> {
        if self.error {
            return Err(EarnError::Rejected {
                message: self.message,
            });
        }
        self.payload
            .ok_or_else(|| EarnError::Malformed("Envelope has no payload".to_string()))
    }

    /// Unwrap a successful envelope whose payload is optional.
    pub fn into_optional_payload(self) -> Result<(Option<T>, Option<String>), EarnError> {
        if self.error {
            return Err(EarnError::Rejected {
                message: self.message,
            });
        }
        Ok((self.payload, self.message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;

    #[test]
    fn test_error_flag_wins() {
        let env: Envelope<Vec<i64>> =
            serde_json::from_str(r#"{"error": true, "payload": [1], "message": "nope"}"#).unwrap();
        let err = env.into_payload().unwrap_err();
        assert!(matches!(err, EarnError::Rejected { message: Some(ref m) } if m == "nope"));
    }

    #[test]
    fn test_missing_payload_is_malformed() {
        let env: Envelope<Vec<i64>> = serde_json::from_str(r#"{"error": false}"#).unwrap();
        assert_eq!(
            env.into_payload().unwrap_err().kind(),
            FailureKind::MalformedResponse
        );
    }

    #[test]
    fn test_null_payload_allowed_when_optional() {
        let env: Envelope<serde_json::Value> =
            serde_json::from_str(r#"{"error": false, "payload": null, "message": "ok"}"#)
                .unwrap();
        let (payload, message) = env.into_optional_payload().unwrap();
        assert!(payload.is_none());
        assert_eq!(message.as_deref(), Some("ok"));
    }
}
