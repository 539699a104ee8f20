//! # Earn Drops
//!
//! State layer for the "earn" and "leaders" screens of a Telegram web app.
//!
//! This library provides:
//! - REST clients for the task catalog, completion status, task completion and
//!   leaderboard endpoints
//! - Reactive stores the view layer reads and subscribes to
//! - A shared per-second countdown for the selected task
//!
//! ## Data Flow
//!
//! ```text
//!   view ──command──▶ EarnStore / LeadersStore ──▶ RestClient ──▶ backend
//!     ▲                        │
//!     └──── watch channels ◀───┘
//! ```
//!
//! ## Modules
//! - `api`: envelope decoding and the `EarnApi` / `LeadersApi` clients
//! - `earn`: `EarnTask`, reward tiers, and `EarnStore`
//! - `leaders`: `LeaderEntry` and `LeadersStore`
//! - `session`, `bridge`: the two host-provided collaborators

pub mod api;
pub mod bridge;
pub mod config;
pub mod earn;
pub mod error;
pub mod leaders;
mod loading;
pub mod session;

use std::sync::Arc;

pub use bridge::{HostBridge, LoggingBridge};
pub use config::Config;
pub use earn::{CountdownState, EarnStore, EarnTask};
pub use error::{EarnError, FailureKind};
pub use leaders::{LeaderEntry, LeadersStore};
pub use session::{SessionProvider, SessionStore};

/// Both stores wired to one backend client. Pass this (or clones of the stores)
/// to the view layer instead of reaching for globals.
#[derive(Clone)]
pub struct App {
    pub earn: EarnStore,
    pub leaders: LeadersStore,
}

impl App {
    pub fn new(
        config: &Config,
        session: session::SharedSession,
        bridge: bridge::SharedBridge,
    ) -> Result<Self, url::ParseError> {
        let client = Arc::new(api::RestClient::from_config(config, session)?);
        Ok(Self {
            earn: EarnStore::new(client.clone(), bridge, config.tick_interval()),
            leaders: LeadersStore::new(client),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_rejects_bad_base_url() {
        let config = Config {
            api_base_url: "not a url".into(),
            ..Config::default()
        };
        let result = App::new(
            &config,
            Arc::new(SessionStore::new(None)),
            Arc::new(LoggingBridge),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_app_starts_empty() {
        let app = App::new(
            &Config::default(),
            Arc::new(SessionStore::new(Some("tok".into()))),
            Arc::new(LoggingBridge),
        )
        .unwrap();
        assert_eq!(app.earn.task_count(), 0);
        assert_eq!(app.leaders.first_place(), Some(LeaderEntry::placeholder()));
    }
}
