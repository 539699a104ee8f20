//! Session token access.
//!
//! The token itself is owned by whoever embeds this crate (the host app signs the
//! user in). API clients only ask for the current value before each request.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

/// Source of the bearer token attached to every API call.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Current token, or `None` when the user has no session.
    async fn session_token(&self) -> Option<String>;
}

/// In-memory session holder.
#[derive(Debug, Default)]
pub struct SessionStore {
    token: RwLock<Option<String>>,
}

impl SessionStore {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: RwLock::new(token.filter(|t| !t.is_empty())),
        }
    }

    /// Replace the token. Empty strings clear it.
    pub async fn set(&self, token: Option<String>) {
        *self.token.write().await = token.filter(|t| !t.is_empty());
    }

    pub async fn clear(&self) {
        *self.token.write().await = None;
    }
}

#[async_trait]
impl SessionProvider for SessionStore {
    async fn session_token(&self) -> Option<String> {
        self.token.read().await.clone()
    }
}

pub type SharedSession = Arc<dyn SessionProvider>;
