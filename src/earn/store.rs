//! Reactive state behind the earn screen.
//!
//! State lives in `watch` channels so the view layer can subscribe to changes and
//! every read sees the latest value. The task list is copy-on-write: each update
//! publishes a fresh `Arc<Vec<_>>`, never mutating a published list in place.
//!
//! # Countdown
//! A single background loop ticks every `tick_interval`. While a task is active
//! its `time` drops by the interval (in ms) and the new value is written to the
//! matching list entry. With no active task the tick does nothing. The loop is
//! started by the first `select_task` and stops when the store is dropped.

use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use super::task::{to_domain, EarnTask};
use crate::api::{CompleteTaskRequest, CompletionAck, EarnApi};
use crate::bridge::SharedBridge;
use crate::error::EarnError;
use crate::loading::Loading;

/// Observable state of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    /// No active task.
    Idle,
    /// An active task is being counted down.
    Ticking,
}

/// Earn screen store. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct EarnStore {
    inner: Arc<EarnStoreInner>,
}

struct EarnStoreInner {
    api: Arc<dyn EarnApi>,
    bridge: SharedBridge,
    tick_interval: Duration,
    list: watch::Sender<Arc<Vec<EarnTask>>>,
    active: watch::Sender<Option<EarnTask>>,
    loading: Loading,
    countdown: Mutex<Option<JoinHandle<()>>>,
}

impl EarnStoreInner {
    /// One countdown step. Returns the updated active task, if any.
    fn tick(&self) -> Option<EarnTask> {
        let step = i64::try_from(self.tick_interval.as_millis()).unwrap_or(i64::MAX);
        let mut updated = None;
        self.active.send_if_modified(|active| match active {
            Some(task) => {
                task.time = task.time.saturating_sub(step);
                updated = Some(task.clone());
                true
            }
            None => false,
        });

        let task = updated?;
        self.list.send_if_modified(|list| {
            if !list.iter().any(|t| t.id == task.id) {
                return false;
            }
            *list = Arc::new(
                list.iter()
                    .map(|t| {
                        if t.id == task.id {
                            EarnTask {
                                time: task.time,
                                ..t.clone()
                            }
                        } else {
                            t.clone()
                        }
                    })
                    .collect(),
            );
            true
        });
        Some(task)
    }
}

impl Drop for EarnStoreInner {
    fn drop(&mut self) {
        if let Ok(slot) = self.countdown.get_mut() {
            if let Some(handle) = slot.take() {
                handle.abort();
            }
        }
    }
}

async fn run_countdown(store: Weak<EarnStoreInner>, period: Duration) {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        let Some(inner) = store.upgrade() else {
            break;
        };
        if let Some(task) = inner.tick() {
            tracing::trace!("Countdown for task {}: {}ms", task.id, task.time);
        }
    }
}

/// Shortest countdown period; `tokio::time::interval` rejects a zero period.
const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

impl EarnStore {
    /// Create a store. `tick_interval` is raised to at least 1ms.
    pub fn new(api: Arc<dyn EarnApi>, bridge: SharedBridge, tick_interval: Duration) -> Self {
        Self {
            inner: Arc::new(EarnStoreInner {
                api,
                bridge,
                tick_interval: tick_interval.max(MIN_TICK_INTERVAL),
                list: watch::channel(Arc::new(Vec::new())).0,
                active: watch::channel(None).0,
                loading: Loading::new(),
                countdown: Mutex::new(None),
            }),
        }
    }

    // ==================== Commands ====================

    /// Fetch the catalog and completion status together and replace the list.
    ///
    /// Both calls run to completion before anything is decided. Both must
    /// succeed; otherwise the current list is kept. The loading flag clears
    /// either way.
    pub async fn request_tasks(&self) -> Result<(), EarnError> {
        let _loading = self.inner.loading.begin();

        let (catalog, statuses) = futures::future::join(
            self.inner.api.fetch_catalog(),
            self.inner.api.fetch_completion_status(),
        )
        .await;

        match catalog.and_then(|catalog| statuses.map(|statuses| (catalog, statuses))) {
            Ok((catalog, statuses)) => {
                let list = to_domain(catalog, &statuses);
                tracing::info!("Loaded {} earn tasks", list.len());
                self.inner.list.send_replace(Arc::new(list));
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to load earn tasks, keeping previous list: {}", e);
                Err(e)
            }
        }
    }

    /// Make `task` the active one and make sure the countdown loop is running.
    ///
    /// Must be called from within a tokio runtime for the countdown to start.
    pub fn select_task(&self, task: EarnTask) {
        tracing::debug!("Task {} selected", task.id);
        self.inner.active.send_replace(Some(task));
        self.ensure_countdown();
    }

    /// Clear the active task. The loop keeps running but ticks become no-ops.
    pub fn close_task(&self) {
        self.inner.active.send_replace(None);
    }

    /// Mark task `id` completed locally, report it to the backend, then open `link`.
    ///
    /// The local update is applied before the backend call and is kept even if
    /// the call fails. The link is opened whatever the outcome. An unknown id
    /// fails with `TaskNotFound` and changes nothing.
    pub async fn join_task(&self, id: i64, link: &str) -> Result<CompletionAck, EarnError> {
        let reward = self
            .inner
            .list
            .borrow()
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.amount.clone())
            .ok_or(EarnError::TaskNotFound(id))?;

        self.inner.list.send_modify(|list| {
            *list = Arc::new(
                list.iter()
                    .map(|t| {
                        if t.id == id {
                            EarnTask {
                                completed: true,
                                ..t.clone()
                            }
                        } else {
                            t.clone()
                        }
                    })
                    .collect(),
            );
        });
        self.inner.active.send_if_modified(|active| match active {
            Some(task) if task.id == id && !task.completed => {
                task.completed = true;
                true
            }
            _ => false,
        });

        let result = self
            .inner
            .api
            .complete_task(&CompleteTaskRequest { id, reward })
            .await;
        match &result {
            Ok(_) => tracing::info!("Task {} completion confirmed", id),
            Err(e) => tracing::warn!("Task {} completion not confirmed: {}", id, e),
        }

        self.inner.bridge.open_external_link(link);
        result
    }

    // ==================== Queries ====================

    pub fn tasks(&self) -> Arc<Vec<EarnTask>> {
        self.inner.list.borrow().clone()
    }

    /// Number of tasks, shown as "N COLLABS".
    pub fn task_count(&self) -> usize {
        self.inner.list.borrow().len()
    }

    pub fn active_task(&self) -> Option<EarnTask> {
        self.inner.active.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.loading.is_loading()
    }

    pub fn countdown_state(&self) -> CountdownState {
        if self.inner.active.borrow().is_some() {
            CountdownState::Ticking
        } else {
            CountdownState::Idle
        }
    }

    pub fn subscribe_tasks(&self) -> watch::Receiver<Arc<Vec<EarnTask>>> {
        self.inner.list.subscribe()
    }

    pub fn subscribe_active(&self) -> watch::Receiver<Option<EarnTask>> {
        self.inner.active.subscribe()
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.inner.loading.subscribe()
    }

    fn ensure_countdown(&self) {
        let mut slot = match self.inner.countdown.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if slot.as_ref().is_some_and(|h| !h.is_finished()) {
            return;
        }

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::warn!("No tokio runtime available, countdown not started");
                return;
            }
        };
        let period = self.inner.tick_interval;
        *slot = Some(runtime.spawn(run_countdown(Arc::downgrade(&self.inner), period)));
        tracing::debug!("Countdown started ({:?} period)", period);
    }
}
