//! # Endpoint status board with sequence-based ordering.
//!
//! Maintains authoritative state of which endpoints are connected and which
//! monitors are still running, using event sequence numbers to handle
//! out-of-order delivery.
//!
//! ## Architecture
//! ```text
//! Monitor ──► Bus ──► subscriber_listener() ──► StatusBoard::apply()
//!                                                      │
//!                                                      ▼
//!                                     HashMap<String, EndpointState>
//!                                       (label → {seq, status, running})
//! ```
//!
//! ## Rules
//! - Only endpoint-carrying events change board state
//! - Read operations (`snapshot`, `status_of`, `running`) are **eventually consistent**
//! - Events with `seq <= last_seq` are **rejected** (stale)

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::core::Status;
use crate::events::{Event, EventKind};
use crate::subscribers::Subscriber;

/// Per-endpoint state for ordering validation.
#[derive(Debug, Clone)]
struct EndpointState {
    /// Last seen sequence number for this endpoint.
    last_seq: Option<u64>,
    /// Current connectivity as reported by the monitor.
    status: Status,
    /// Whether the monitor task is still running.
    running: bool,
}

/// Thread-safe board of endpoint connectivity.
///
/// ### Responsibilities
/// - Answers "what is endpoint X right now" queries
/// - Provides the stuck-monitor list for graceful shutdown
/// - Rejects stale events using sequence numbers
///
/// ### Rules
/// - **Ordering**: events with `seq <= last_seq` are rejected
/// - **Lag**: state trails the bus by whatever sits in the board's queue
pub struct StatusBoard {
    state: RwLock<HashMap<String, EndpointState>>,
}

impl StatusBoard {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(HashMap::new()),
        }
    }

    /// Applies an event if it is newer than the last seen for its endpoint.
    ///
    /// ### Ordering guarantees
    /// Events are applied only if `ev.seq` is newer than `last_seq` for this
    /// endpoint. This prevents out-of-order delivery from corrupting state:
    /// ```text
    /// apply(MonitorStopped, seq=100) → running=false, last_seq=100
    /// apply(Connected,      seq=99)  → rejected (stale)
    /// ```
    ///
    /// ### State transitions
    /// - `MonitorStarted` → running=true
    /// - `Connected` → status=Connected
    /// - `Disconnected` → status=Disconnected
    /// - `MonitorStopped` → running=false
    /// - `SubscribeFailed` → no state change, seq update only
    /// - Events without an endpoint label → ignored
    ///
    /// Returns `true` when the event was applied to connectivity or running
    /// state.
    pub async fn apply(&self, ev: &Event) -> bool {
        let label = match ev.endpoint.as_deref() {
            Some(l) => l,
            None => return false,
        };

        let mut state = self.state.write().await;
        let entry = state.entry(label.to_string()).or_insert(EndpointState {
            last_seq: None,
            status: Status::Unknown,
            running: false,
        });

        if entry.last_seq.is_some_and(|last| ev.seq <= last) {
            return false;
        }
        entry.last_seq = Some(ev.seq);

        match ev.kind {
            EventKind::MonitorStarted => {
                entry.running = true;
                true
            }
            EventKind::Connected => {
                entry.status = Status::Connected;
                true
            }
            EventKind::Disconnected => {
                entry.status = Status::Disconnected;
                true
            }
            EventKind::MonitorStopped => {
                entry.running = false;
                true
            }
            _ => false,
        }
    }

    /// Returns the connectivity of every known endpoint, sorted by label.
    pub async fn snapshot(&self) -> Vec<(String, Status)> {
        let state = self.state.read().await;
        let mut all: Vec<(String, Status)> = state
            .iter()
            .map(|(label, es)| (label.clone(), es.status))
            .collect();
        all.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        all
    }

    /// Returns sorted labels of monitors that have started but not stopped.
    ///
    /// Used by [`Supervisor`](crate::Supervisor) to report stuck monitors
    /// when the shutdown grace period runs out.
    pub async fn running(&self) -> Vec<String> {
        let state = self.state.read().await;
        let mut running: Vec<String> = state
            .iter()
            .filter(|(_, es)| es.running)
            .map(|(label, _)| label.clone())
            .collect();
        running.sort_unstable();
        running
    }

    /// Returns the current status of one endpoint, if the board has seen it.
    pub async fn status_of(&self, label: &str) -> Option<Status> {
        self.state.read().await.get(label).map(|es| es.status)
    }
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Subscriber for StatusBoard {
    async fn handle(&self, event: &Event) {
        self.apply(event).await;
    }

    fn name(&self) -> &'static str {
        "board"
    }
}
