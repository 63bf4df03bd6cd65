use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

pub trait LocationProvider: Send + Sync {
    /// Path of the active view route, e.g. `/roundtrip/3`.
    fn current_path(&self) -> String;
}

pub trait Navigator: LocationProvider {
    fn navigate(&self, path: &str);
}

/// In-memory route holder. Clones share the same route.
#[derive(Clone)]
pub struct Location {
    path: Arc<watch::Sender<String>>,
}

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        let (path, _) = watch::channel(path.into());
        Self {
            path: Arc::new(path),
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new("/")
    }
}

impl LocationProvider for Location {
    fn current_path(&self) -> String {
        self.path.borrow().clone()
    }
}

impl Navigator for Location {
    fn navigate(&self, path: &str) {
        debug!(path, "navigating");
        self.path.send_replace(path.to_string());
    }
}
