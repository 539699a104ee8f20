//! Host bridge: the single capability this crate needs from the embedding app.

use std::sync::Arc;

/// Capabilities provided by the embedding host (the Telegram WebApp in production).
pub trait HostBridge: Send + Sync {
    /// Ask the host to open `url` outside the app. Fire-and-forget.
    fn open_external_link(&self, url: &str);
}

/// Bridge for headless use: records the request in the log and does nothing else.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingBridge;

impl HostBridge for LoggingBridge {
    fn open_external_link(&self, url: &str) {
        tracing::info!("Open external link requested: {}", url);
    }
}

pub type SharedBridge = Arc<dyn HostBridge>;

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::HostBridge;

    /// Bridge that remembers every link it was asked to open.
    #[derive(Debug, Default)]
    pub struct RecordingBridge {
        opened: Mutex<Vec<String>>,
    }

    impl RecordingBridge {
        pub fn opened(&self) -> Vec<String> {
            self.opened.lock().unwrap().clone()
        }
    }

    impl HostBridge for RecordingBridge {
        fn open_external_link(&self, url: &str) {
            self.opened.lock().unwrap().push(url.to_string());
        }
    }
}
