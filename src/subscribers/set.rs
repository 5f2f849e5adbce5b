//! # SubscriberSet: non-blocking fan-out over multiple subscribers
//!
//! [`SubscriberSet`] distributes each [`Event`](crate::events::Event) to multiple
//! subscribers **without awaiting** their processing.
//!
//! ## What it guarantees
//! - `emit(&Event)` returns immediately.
//! - Per-subscriber FIFO (queue order).
//! - Panics inside subscribers are caught and logged (isolation).
//!
//! ## What it does **not** guarantee
//! - No global ordering across different subscribers.
//! - No retries on per-subscriber queue overflow (events are dropped for that
//!   subscriber).
//!
//! ## Diagram
//! ```text
//!    emit(&Event)
//!        │                        (Arc-clone per subscriber)
//!        ├────────────────► [queue S1] ─► worker S1 ─► handle()
//!        ├────────────────► [queue S2] ─► worker S2 ─► handle()
//!        └────────────────► [queue SN] ─► worker SN ─► handle()
//! ```

use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::mpsc;

use crate::events::Event;

use super::Subscriber;

/// Per-subscriber channel with metadata
struct SubscriberChannel {
    name: &'static str,
    sender: mpsc::Sender<Arc<Event>>,
}

/// Composite fan-out with per-subscriber bounded queues and worker tasks.
///
/// Workers run until their queue closes, which happens when the set (and with
/// it every sender) is dropped.
pub struct SubscriberSet {
    channels: Vec<SubscriberChannel>,
}

impl SubscriberSet {
    /// Creates a new set and spawns one worker per subscriber.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscriber>>) -> Self {
        let mut channels = Vec::with_capacity(subs.len());

        for sub in subs {
            let cap = sub.queue_capacity().max(1);
            let name = sub.name();
            let (tx, mut rx) = mpsc::channel::<Arc<Event>>(cap);
            let s = Arc::clone(&sub);

            tokio::spawn(async move {
                while let Some(ev) = rx.recv().await {
                    let fut = s.handle(ev.as_ref());
                    if let Err(panic_err) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                        eprintln!(
                            "[heartwatch] subscriber '{}' panicked: {:?}",
                            s.name(),
                            panic_err
                        );
                    }
                }
            });

            channels.push(SubscriberChannel { name, sender: tx });
        }

        Self { channels }
    }

    /// Fan-out one event to all subscribers (non-blocking).
    ///
    /// If a subscriber's queue is **full** or **closed**, the event is dropped for it
    /// and a warning is logged with the subscriber's name.
    pub fn emit(&self, event: &Event) {
        let ev = Arc::new(event.clone());
        for channel in &self.channels {
            match channel.sender.try_send(Arc::clone(&ev)) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    eprintln!(
                        "[heartwatch] subscriber '{}' dropped event: queue full",
                        channel.name
                    );
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    eprintln!(
                        "[heartwatch] subscriber '{}' dropped event: worker closed",
                        channel.name
                    );
                }
            }
        }
    }

    /// True if there are no subscribers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Number of subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::events::EventKind;

    #[derive(Default)]
    struct Counter(AtomicU64);

    #[async_trait]
    impl Subscriber for Counter {
        async fn handle(&self, _event: &Event) {
            self.0.fetch_add(1, Ordering::Relaxed);
        }

        fn name(&self) -> &'static str {
            "counter"
        }
    }

    struct Panicker;

    #[async_trait]
    impl Subscriber for Panicker {
        async fn handle(&self, _event: &Event) {
            panic!("boom");
        }

        fn name(&self) -> &'static str {
            "panicker"
        }
    }

    #[tokio::test]
    async fn test_emit_reaches_every_subscriber() {
        let counter = Arc::new(Counter::default());
        let set = SubscriberSet::new(vec![counter.clone() as Arc<dyn Subscriber>]);

        set.emit(&Event::now(EventKind::Connected).with_endpoint("ep"));
        set.emit(&Event::now(EventKind::Disconnected).with_endpoint("ep"));

        // Workers drain asynchronously; poll until both deliveries land.
        for _ in 0..100 {
            if counter.0.load(Ordering::Relaxed) == 2 {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("events were not delivered");
    }

    #[tokio::test]
    async fn test_panicking_subscriber_does_not_stop_others() {
        let counter = Arc::new(Counter::default());
        let set = SubscriberSet::new(vec![
            Arc::new(Panicker) as Arc<dyn Subscriber>,
            counter.clone() as Arc<dyn Subscriber>,
        ]);

        set.emit(&Event::now(EventKind::Connected).with_endpoint("ep"));
        set.emit(&Event::now(EventKind::Connected).with_endpoint("ep"));

        for _ in 0..100 {
            if counter.0.load(Ordering::Relaxed) == 2 {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("surviving subscriber missed events");
    }

    #[tokio::test]
    async fn test_len_and_is_empty() {
        let empty = SubscriberSet::new(Vec::new());
        assert!(empty.is_empty());

        let set = SubscriberSet::new(vec![Arc::new(Counter::default()) as Arc<dyn Subscriber>]);
        assert_eq!(set.len(), 1);
        assert!(!set.is_empty());
    }
}
