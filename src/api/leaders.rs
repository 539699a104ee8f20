//! Leaderboard endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::client::RestClient;
use crate::error::EarnError;

const LEADERS_PATH: &str = "leaders";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLeader {
    pub username: String,
    pub score: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardPayload {
    pub leaders: Vec<RawLeader>,
}

#[async_trait]
pub trait LeadersApi: Send + Sync {
    /// Ranked users, best first.
    async fn fetch_leaderboard(&self) -> Result<Vec<RawLeader>, EarnError>;
}

#[async_trait]
impl LeadersApi for RestClient {
    async fn fetch_leaderboard(&self) -> Result<Vec<RawLeader>, EarnError> {
        let payload = self
            .get_envelope::<LeaderboardPayload>(LEADERS_PATH)
            .await?
            .into_payload()?;
        Ok(payload.leaders)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::session::SessionStore;

    #[tokio::test]
    async fn test_fetch_leaderboard() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/leaders"))
            .and(header("Authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": false,
                "payload": { "leaders": [
                    { "username": "a", "score": 10 },
                    { "username": "b", "score": 5 }
                ]}
            })))
            .mount(&server)
            .await;

        let base = url::Url::parse(&format!("{}/api/", server.uri())).unwrap();
        let client = RestClient::new(base, Arc::new(SessionStore::new(Some("tok".into()))));

        let leaders = client.fetch_leaderboard().await.unwrap();
        assert_eq!(
            leaders,
            vec![
                RawLeader { username: "a".into(), score: 10 },
                RawLeader { username: "b".into(), score: 5 },
            ]
        );
    }

    #[tokio::test]
    async fn test_rejected_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/leaders"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": true,
                "payload": null
            })))
            .mount(&server)
            .await;

        let base = url::Url::parse(&format!("{}/api/", server.uri())).unwrap();
        let client = RestClient::new(base, Arc::new(SessionStore::new(Some("tok".into()))));

        let err = client.fetch_leaderboard().await.unwrap_err();
        assert!(err.is_fetch_failure());
    }
}
