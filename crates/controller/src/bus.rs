//! Typed publish/subscribe channel shared by all controllers.

use shared::protocol::AppEvent;
use tokio::sync::broadcast;
use tracing::debug;

const DEFAULT_CAPACITY: usize = 1024;

#[derive(Clone)]
pub struct NotificationBus {
    events: broadcast::Sender<AppEvent>,
}

impl NotificationBus {
    pub fn new(capacity: usize) -> Self {
        let (events, _) = broadcast::channel(capacity.max(1));
        Self { events }
    }

    /// Every subscriber observes events in publish order, starting with the
    /// first event published after it subscribed.
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.events.subscribe()
    }

    /// Returns how many subscribers the event reached. Publishing with no
    /// subscriber is not an error.
    pub fn publish(&self, event: AppEvent) -> usize {
        let kind = event.kind();
        let delivered = self.events.send(event).unwrap_or(0);
        debug!(event = kind, delivered, "published app event");
        delivered
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
