//! REST client shared by the earn and leaders endpoints.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use super::envelope::Envelope;
use crate::config::Config;
use crate::error::EarnError;
use crate::session::SharedSession;

/// Authorized JSON client for the earn backend.
pub struct RestClient {
    client: Client,
    base_url: Url,
    session: SharedSession,
}

impl RestClient {
    /// Create a client rooted at `base_url`. Endpoint paths are joined onto it.
    pub fn new(base_url: Url, session: SharedSession) -> Self {
        Self {
            client: Client::new(),
            base_url,
            session,
        }
    }

    pub fn from_config(config: &Config, session: SharedSession) -> Result<Self, url::ParseError> {
        Ok(Self::new(config.base_url()?, session))
    }

    fn endpoint(&self, path: &str) -> Result<Url, EarnError> {
        self.base_url
            .join(path)
            .map_err(|e| EarnError::Transport(format!("Invalid endpoint {}: {}", path, e)))
    }

    /// Bearer header value, or `MissingSession` before any request is built.
    async fn authorization(&self) -> Result<String, EarnError> {
        match self.session.session_token().await {
            Some(token) => Ok(format!("Bearer {}", token)),
            None => Err(EarnError::MissingSession),
        }
    }

    /// GET `path` and decode the envelope.
    pub(crate) async fn get_envelope<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Envelope<T>, EarnError> {
        let auth = self.authorization().await?;
        let url = self.endpoint(path)?;
        tracing::debug!("GET {}", url);

        let resp = self
            .client
            .get(url)
            .header("Authorization", auth)
            .send()
            .await?;

        Self::read_envelope(path, resp).await
    }

    /// POST `body` as JSON to `path` and decode the envelope.
    pub(crate) async fn post_envelope<B, T>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Envelope<T>, EarnError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let auth = self.authorization().await?;
        let url = self.endpoint(path)?;
        tracing::debug!("POST {}", url);

        let resp = self
            .client
            .post(url)
            .header("Authorization", auth)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        Self::read_envelope(path, resp).await
    }

    async fn read_envelope<T: DeserializeOwned>(
        path: &str,
        resp: reqwest::Response,
    ) -> Result<Envelope<T>, EarnError> {
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(EarnError::HttpStatus {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text)
            .map_err(|e| EarnError::Malformed(format!("{}: {}", path, e)))
    }
}
