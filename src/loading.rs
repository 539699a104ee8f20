//! Pending-request tracking behind the stores' `is_loading` flags.

use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::watch;

/// Loading flag that stays true while at least one request is in flight.
pub(crate) struct Loading {
    flag: watch::Sender<bool>,
    in_flight: AtomicUsize,
}

/// Counts one request as pending until dropped, including when the request
/// future itself is dropped mid-await.
pub(crate) struct LoadingGuard<'a> {
    loading: &'a Loading,
}

impl Loading {
    pub(crate) fn new() -> Self {
        Self {
            flag: watch::channel(false).0,
            in_flight: AtomicUsize::new(0),
        }
    }

    pub(crate) fn begin(&self) -> LoadingGuard<'_> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        self.publish();
        LoadingGuard { loading: self }
    }

    pub(crate) fn is_loading(&self) -> bool {
        *self.flag.borrow()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<bool> {
        self.flag.subscribe()
    }

    fn publish(&self) {
        self.flag.send_if_modified(|loading| {
            let pending = self.in_flight.load(Ordering::SeqCst) > 0;
            let changed = *loading != pending;
            *loading = pending;
            changed
        });
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.loading.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.loading.publish();
    }
}
