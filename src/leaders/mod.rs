//! Leaderboard screen state.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::api::{LeadersApi, RawLeader};
use crate::error::EarnError;
use crate::loading::Loading;

/// One ranked row. `position` is 1-based, in response order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderEntry {
    pub position: usize,
    pub name: String,
    pub score: i64,
}

impl LeaderEntry {
    /// Shown in first place until the first fetch completes.
    pub fn placeholder() -> Self {
        Self {
            position: 1,
            name: String::new(),
            score: 1,
        }
    }
}

/// Assign positions by response order.
pub fn leaders_to_domain(leaders: Vec<RawLeader>) -> Vec<LeaderEntry> {
    leaders
        .into_iter()
        .enumerate()
        .map(|(i, leader)| LeaderEntry {
            position: i + 1,
            name: leader.username,
            score: leader.score,
        })
        .collect()
}

/// Leaderboard store. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct LeadersStore {
    inner: Arc<LeadersStoreInner>,
}

struct LeadersStoreInner {
    api: Arc<dyn LeadersApi>,
    data: watch::Sender<Arc<Vec<LeaderEntry>>>,
    loading: Loading,
}

impl LeadersStore {
    pub fn new(api: Arc<dyn LeadersApi>) -> Self {
        Self {
            inner: Arc::new(LeadersStoreInner {
                api,
                data: watch::channel(Arc::new(vec![LeaderEntry::placeholder()])).0,
                loading: Loading::new(),
            }),
        }
    }

    /// Fetch the leaderboard and replace the stored list. Failures keep prior state.
    pub async fn request_leaders(&self) -> Result<(), EarnError> {
        let _loading = self.inner.loading.begin();
        match self.inner.api.fetch_leaderboard().await {
            Ok(leaders) => {
                let list = leaders_to_domain(leaders);
                tracing::info!("Loaded {} leaders", list.len());
                self.inner.data.send_replace(Arc::new(list));
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to load leaderboard: {}", e);
                Err(e)
            }
        }
    }

    /// Position 1. `None` only if the backend returned an empty board.
    pub fn first_place(&self) -> Option<LeaderEntry> {
        self.inner.data.borrow().first().cloned()
    }

    /// Everyone from position 2 down.
    pub fn rest(&self) -> Vec<LeaderEntry> {
        self.inner.data.borrow().iter().skip(1).cloned().collect()
    }

    pub fn entries(&self) -> Arc<Vec<LeaderEntry>> {
        self.inner.data.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.loading.is_loading()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<LeaderEntry>>> {
        self.inner.data.subscribe()
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.inner.loading.subscribe()
    }
}
