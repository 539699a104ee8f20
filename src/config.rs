//! Client configuration.
//!
//! Loaded from a JSON file when one exists; otherwise environment variables are
//! used as defaults:
//! - `EARN_API_BASE_URL` - base URL the REST endpoints hang off
//! - `EARN_SESSION_TOKEN` - bearer token for the current user
//! - `EARN_TICK_INTERVAL_MS` - countdown tick period

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_tick_interval_ms() -> u64 {
    DEFAULT_TICK_INTERVAL_MS
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Session token; may also be supplied later through the session store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
    /// Countdown tick period in milliseconds. Also the amount subtracted per tick.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            session_token: None,
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl Config {
    /// Build a config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("EARN_API_BASE_URL") {
            if !url.is_empty() {
                config.api_base_url = url;
            }
        }
        config.session_token = std::env::var("EARN_SESSION_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());
        if let Some(ms) = std::env::var("EARN_TICK_INTERVAL_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            config.tick_interval_ms = ms;
        }
        config
    }

    /// Load from `path` if it exists, otherwise from the environment.
    pub fn load(path: &Path) -> Result<Self, std::io::Error> {
        if !path.exists() {
            tracing::info!(
                "No config file found at {}, using environment defaults",
                path.display()
            );
            return Ok(Self::from_env());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parsed base URL. A trailing slash is added so relative joins append.
    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        let mut raw = self.api_base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Url::parse(&raw)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "http://localhost:8080/api");
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert!(config.session_token.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("earn.json");
        std::fs::write(
            &path,
            r#"{"api_base_url": "https://drops.example/api", "session_token": "abc"}"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.api_base_url, "https://drops.example/api");
        assert_eq!(config.session_token.as_deref(), Some("abc"));
        assert_eq!(config.tick_interval_ms, 1000);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("earn.json");
        std::fs::write(&path, "not json").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_base_url_joins_segments() {
        let config = Config {
            api_base_url: "https://drops.example/api".into(),
            ..Config::default()
        };
        let base = config.base_url().unwrap();
        assert_eq!(
            base.join("earn/tasks").unwrap().as_str(),
            "https://drops.example/api/earn/tasks"
        );
    }
}
