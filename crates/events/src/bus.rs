//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is shared via `Arc<EventBus>` between the submission
//! handler, which publishes, and the job runner, which subscribes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// BlobCreated
// ---------------------------------------------------------------------------

/// A new object was stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobCreated {
    /// Bucket (or store name) holding the object.
    pub bucket: String,

    /// Object key, e.g. `"request/0b7d..."`.
    pub key: String,

    /// When the notification was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl BlobCreated {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
            timestamp: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
pub struct EventBus {
    sender: broadcast::Sender<BlobCreated>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a notification to all current subscribers.
    ///
    /// Returns the number of subscribers that will see it; zero means the
    /// notification was dropped.
    pub fn publish(&self, event: BlobCreated) -> usize {
        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(broadcast::error::SendError(event)) => {
                tracing::warn!(key = %event.key, "No subscribers for blob notification");
                0
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BlobCreated> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        assert_eq!(bus.publish(BlobCreated::new("imports", "request/abc")), 1);

        let received = rx.recv().await.expect("should receive the notification");
        assert_eq!(received.bucket, "imports");
        assert_eq!(received.key, "request/abc");
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(BlobCreated::new("imports", "request/1"));

        assert_eq!(rx1.recv().await.unwrap().key, "request/1");
        assert_eq!(rx2.recv().await.unwrap().key, "request/1");
    }

    #[test]
    fn publish_with_no_subscribers_reports_zero() {
        let bus = EventBus::default();
        assert_eq!(bus.publish(BlobCreated::new("imports", "request/orphan")), 0);
    }
}
