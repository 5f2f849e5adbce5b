//! # Runtime events emitted by the supervisor and liveness monitors.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Connectivity events**: observed endpoint state changes (connected, disconnected)
//! - **Monitor lifecycle events**: monitor execution flow (started, subscribe failed, stopped)
//! - **Shutdown events**: runtime teardown (requested, stopped in time, grace exceeded)
//!
//! The [`Event`] struct carries additional metadata such as timestamps, the
//! endpoint label, reasons, and idle poll counts.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Use `seq` to restore the exact order when events are delivered out of order.
//!
//! ## Example
//! ```rust
//! use heartwatch::{Event, EventKind};
//!
//! let ev = Event::now(EventKind::Disconnected)
//!     .with_endpoint("hmi-primary")
//!     .with_idle_polls(21);
//!
//! assert_eq!(ev.kind, EventKind::Disconnected);
//! assert_eq!(ev.endpoint.as_deref(), Some("hmi-primary"));
//! assert_eq!(ev.idle_polls, Some(21));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Connectivity events ===
    /// Endpoint produced a heartbeat after being unknown or disconnected.
    ///
    /// Emitted only on the transition into the connected state; steady
    /// heartbeat traffic does not repeat it.
    ///
    /// Sets:
    /// - `endpoint`: endpoint label
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    Connected,

    /// Endpoint exceeded its idle threshold without producing a heartbeat.
    ///
    /// The monitor resets its idle counter when this fires, so an endpoint
    /// that stays silent produces one `Disconnected` per threshold window,
    /// not one per poll.
    ///
    /// Sets:
    /// - `endpoint`: endpoint label
    /// - `idle_polls`: consecutive empty polls observed at the trip point
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    Disconnected,

    // === Monitor lifecycle events ===
    /// Monitor task started for an endpoint.
    ///
    /// Sets:
    /// - `endpoint`: endpoint label
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    MonitorStarted,

    /// Monitor could not open its subscription and will not run.
    ///
    /// Terminal for that monitor; the other monitors are unaffected.
    ///
    /// Sets:
    /// - `endpoint`: endpoint label
    /// - `reason`: transport error message
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    SubscribeFailed,

    /// Monitor has stopped (cooperative shutdown **or** subscribe failure).
    ///
    /// Sets:
    /// - `endpoint`: endpoint label
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    MonitorStopped,

    // === Shutdown events ===
    /// Shutdown requested (OS signal observed or [`Supervisor::shutdown`] called).
    ///
    /// Sets:
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ///
    /// [`Supervisor::shutdown`]: crate::Supervisor::shutdown
    ShutdownRequested,

    /// All monitors stopped within the configured grace period.
    ///
    /// Sets:
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    AllStoppedWithin,

    /// Grace period exceeded; some monitors did not stop in time.
    ///
    /// Sets:
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    GraceExceeded,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Debug, Clone)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,

    /// Consecutive empty polls observed when a disconnection tripped.
    pub idle_polls: Option<u32>,
    /// Human-readable reason (transport errors, etc.).
    pub reason: Option<Arc<str>>,
    /// Label of the endpoint, if applicable.
    pub endpoint: Option<Arc<str>>,
    /// Event classification.
    pub kind: EventKind,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn now(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            kind,
            at: SystemTime::now(),
            idle_polls: None,
            reason: None,
            endpoint: None,
        }
    }

    /// Attaches an endpoint label.
    #[inline]
    pub fn with_endpoint(mut self, endpoint: impl Into<Arc<str>>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches an idle poll count.
    #[inline]
    pub fn with_idle_polls(mut self, n: u32) -> Self {
        self.idle_polls = Some(n);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_strictly_increasing() {
        let a = Event::now(EventKind::Connected);
        let b = Event::now(EventKind::Disconnected);
        let c = Event::now(EventKind::MonitorStopped);
        assert!(a.seq < b.seq);
        assert!(b.seq < c.seq);
    }

    #[test]
    fn test_builders_set_optional_fields() {
        let ev = Event::now(EventKind::SubscribeFailed)
            .with_endpoint("bbb")
            .with_reason("connection refused");
        assert_eq!(ev.endpoint.as_deref(), Some("bbb"));
        assert_eq!(ev.reason.as_deref(), Some("connection refused"));
        assert_eq!(ev.idle_polls, None);
    }
}
