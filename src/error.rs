//! Error taxonomy shared by the API clients and the stores.

use thiserror::Error;

/// Coarse failure classes, as seen by the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No session token was available; nothing was sent.
    MissingSession,
    /// Network failure, non-success status, or a rejected envelope.
    Transport,
    /// Body was not JSON or did not have the expected shape.
    MalformedResponse,
    /// Local logic error, never sent to the backend.
    NotFound,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::MissingSession => "missing_session",
            Self::Transport => "transport",
            Self::MalformedResponse => "malformed_response",
            Self::NotFound => "not_found",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Error)]
pub enum EarnError {
    #[error("Cannot authenticate: no session token available")]
    MissingSession,

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Backend returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Backend rejected the request: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { message: Option<String> },

    #[error("Task {0} not found")]
    TaskNotFound(i64),
}

impl EarnError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::MissingSession => FailureKind::MissingSession,
            Self::Transport(_) | Self::HttpStatus { .. } | Self::Rejected { .. } => {
                FailureKind::Transport
            }
            Self::Malformed(_) => FailureKind::MalformedResponse,
            Self::TaskNotFound(_) => FailureKind::NotFound,
        }
    }

    /// True for failures the view layer should show as "fetch failed".
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self.kind(),
            FailureKind::Transport | FailureKind::MalformedResponse
        )
    }
}

impl From<reqwest::Error> for EarnError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Transport(format!("Request timeout: {}", e))
        } else if e.is_connect() {
            Self::Transport(format!("Connection failed: {}", e))
        } else {
            Self::Transport(format!("Request failed: {}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(EarnError::MissingSession.kind(), FailureKind::MissingSession);
        assert_eq!(
            EarnError::HttpStatus {
                status: 502,
                body: String::new()
            }
            .kind(),
            FailureKind::Transport
        );
        assert_eq!(
            EarnError::Rejected { message: None }.kind(),
            FailureKind::Transport
        );
        assert_eq!(
            EarnError::Malformed("bad".into()).kind(),
            FailureKind::MalformedResponse
        );
        assert_eq!(EarnError::TaskNotFound(7).kind(), FailureKind::NotFound);
    }

    #[test]
    fn test_fetch_failure() {
        assert!(EarnError::Transport("dns".into()).is_fetch_failure());
        assert!(EarnError::Malformed("not json".into()).is_fetch_failure());
        assert!(!EarnError::MissingSession.is_fetch_failure());
        assert!(!EarnError::TaskNotFound(1).is_fetch_failure());
    }

    #[test]
    fn test_rejected_message() {
        let err = EarnError::Rejected {
            message: Some("Task already completed".into()),
        };
        assert_eq!(
            err.to_string(),
            "Backend rejected the request: Task already completed"
        );
    }
}
