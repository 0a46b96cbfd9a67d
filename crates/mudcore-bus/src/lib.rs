//! The broadcast bus: one shared stream of events, observed by everyone.
//!
//! Every session publishes into a single `tokio::sync::broadcast`
//! channel and every session's deliver loop subscribes to it. There is
//! deliberately no per-room channel plumbing — each viewer filters the
//! full stream locally (room populations are small and events arrive at
//! human typing speed), which keeps registration a single `subscribe()`
//! call with the channel's guarantees:
//!
//! - every subscriber observes events in publish order;
//! - `subscribe()` is atomic with respect to concurrent `publish()` —
//!   a new subscriber sees everything published after it, nothing before;
//! - dropping the receiver is deregistration.
//!
//! Events are published as `Arc<Event>` so fan-out clones a pointer, not
//! the payload.

use std::sync::Arc;

use tokio::sync::broadcast;

use mudcore_protocol::Event;

/// Default event buffer per subscriber. A receiver that falls this many
/// events behind starts losing the oldest ones (see [`BusReceiver::recv`]).
pub const DEFAULT_CAPACITY: usize = 1024;

/// Handle to the shared event stream. Cheap to clone; every session
/// holds one for publishing.
#[derive(Debug, Clone)]
pub struct Bus {
    sender: broadcast::Sender<Arc<Event>>,
}

impl Bus {
    /// Creates a bus with [`DEFAULT_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a bus with an explicit per-subscriber buffer capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes an event to every current subscriber.
    ///
    /// Publishing with no subscribers is not an error — the event simply
    /// has no observers (e.g. the last player quitting).
    pub fn publish(&self, event: Event) {
        tracing::trace!(kind = ?event.kind, sender = %event.sender, "publish");
        let _ = self.sender.send(Arc::new(event));
    }

    /// Registers a new subscriber.
    ///
    /// Must be called before the subscribing session starts publishing
    /// its own events, so the session observes its own `Join`.
    pub fn subscribe(&self) -> BusReceiver {
        BusReceiver {
            inner: self.sender.subscribe(),
        }
    }

    /// Number of live subscribers, i.e. connected deliver loops.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

/// One session's view of the event stream, in publish order.
pub struct BusReceiver {
    inner: broadcast::Receiver<Arc<Event>>,
}

impl BusReceiver {
    /// Waits for the next event.
    ///
    /// Returns `None` when the bus itself is gone (every `Bus` handle
    /// dropped), which ends the deliver loop. A receiver that lagged past
    /// its buffer logs a warning and resumes with the oldest retained
    /// event — order is still preserved, a span of events is lost.
    pub async fn recv(&mut self) -> Option<Arc<Event>> {
        loop {
            match self.inner.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "deliver loop lagged, dropping missed events");
                }
            }
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mudcore_protocol::{EventKind, PlayerName, SessionId};

    fn say(text: &str) -> Event {
        Event::say(PlayerName::new("Alice"), SessionId(1), text)
    }

    #[tokio::test]
    async fn test_subscriber_receives_published_event() {
        let bus = Bus::new();
        let mut rx = bus.subscribe();

        bus.publish(say("hello"));

        let ev = rx.recv().await.expect("should receive");
        assert_eq!(ev.kind, EventKind::Say);
        assert_eq!(ev.body, "hello");
    }

    #[tokio::test]
    async fn test_every_subscriber_sees_every_event() {
        let bus = Bus::new();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(say("one"));

        assert_eq!(rx1.recv().await.unwrap().body, "one");
        assert_eq!(rx2.recv().await.unwrap().body, "one");
    }

    #[tokio::test]
    async fn test_events_arrive_in_publish_order() {
        let bus = Bus::new();
        let mut rx = bus.subscribe();

        bus.publish(say("first"));
        bus.publish(say("second"));
        bus.publish(say("third"));

        assert_eq!(rx.recv().await.unwrap().body, "first");
        assert_eq!(rx.recv().await.unwrap().body, "second");
        assert_eq!(rx.recv().await.unwrap().body, "third");
    }

    #[tokio::test]
    async fn test_late_subscriber_misses_earlier_events() {
        let bus = Bus::new();
        let mut early = bus.subscribe();

        bus.publish(say("before"));
        let mut late = bus.subscribe();
        bus.publish(say("after"));

        // The early subscriber sees both, the late one only the second.
        assert_eq!(early.recv().await.unwrap().body, "before");
        assert_eq!(early.recv().await.unwrap().body, "after");
        assert_eq!(late.recv().await.unwrap().body, "after");
    }

    #[tokio::test]
    async fn test_recv_returns_none_when_bus_dropped() {
        let bus = Bus::new();
        let mut rx = bus.subscribe();
        drop(bus);

        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_does_not_panic() {
        let bus = Bus::new();
        bus.publish(say("into the void"));
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_lagged_receiver_recovers_in_order() {
        let bus = Bus::with_capacity(2);
        let mut rx = bus.subscribe();

        for i in 0..5 {
            bus.publish(say(&format!("msg-{i}")));
        }

        // Buffer holds the newest 2; the lag is logged and skipped.
        assert_eq!(rx.recv().await.unwrap().body, "msg-3");
        assert_eq!(rx.recv().await.unwrap().body, "msg-4");
    }
}
