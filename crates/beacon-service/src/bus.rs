//! Process-wide event bus
//!
//! Services publish domain events here after a successful store write;
//! the realtime router subscribes on the other end. A single
//! `tokio::sync::broadcast` channel keeps events in accept order for
//! every subscriber, which is what gives the per-channel delivery
//! ordering guarantee downstream.
//!
//! Publishing is fire-and-forget: an event with no subscribers (or a
//! lagged subscriber) never fails the originating request.

use beacon_core::DomainEvent;
use tokio::sync::broadcast;
use tracing::trace;

/// Cloneable handle to the process-wide event bus
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    /// Create a bus with the given buffer capacity
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish an event, best-effort
    pub fn publish(&self, event: DomainEvent) {
        trace!(event_type = event.event_type(), "Publishing domain event");
        // Err only means there are currently no subscribers
        let _ = self.tx.send(event);
    }

    /// Subscribe to the event stream from this point on
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.tx.subscribe()
    }

    /// Number of live subscribers
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
