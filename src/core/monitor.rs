//! # Monitor: single-endpoint liveness watcher.
//!
//! Watches one endpoint's heartbeat stream and publishes connectivity
//! changes. Each monitor owns its subscription, its [`LivenessState`] and its
//! poll cadence; monitors share nothing with each other.
//!
//! ## Event flow
//! ```text
//! MonitorStarted ──► [subscribe] ──err──► SubscribeFailed ──► MonitorStopped
//!                        │
//!                        ▼
//!                    poll loop ──► Connected     (beat after Unknown/Disconnected)
//!                        │    ──► Disconnected  (idle threshold tripped)
//!                        ▼
//!                  MonitorStopped  (after cancellation)
//! ```
//!
//! ## Rules
//! - Polls run **sequentially** within one monitor, one per interval
//! - A subscribe failure is **terminal** for this monitor only; no retry
//! - Receive errors count as **silence**, not as monitor failure
//! - Cancellation is honored within **one poll interval**

use std::time::Duration;

use tokio::{select, time};
use tokio_util::sync::CancellationToken;

use crate::{
    core::state::LivenessState,
    endpoint::EndpointDescriptor,
    events::{Bus, Event, EventKind},
    transport::{Recv, TransportRef},
};

/// Watches a single endpoint until cancellation or subscribe failure.
///
/// ### Responsibilities
/// - **Subscription**: opens the endpoint's subscription once, at startup
/// - **Polling**: one non-blocking receive per interval
/// - **State**: feeds observations to [`LivenessState`]
/// - **Event publishing**: reports lifecycle and connectivity to the bus
pub(crate) struct Monitor {
    descriptor: EndpointDescriptor,
    transport: TransportRef,
    bus: Bus,
    poll_interval: Duration,
}

impl Monitor {
    /// Creates a new monitor.
    pub(crate) fn new(
        descriptor: EndpointDescriptor,
        transport: TransportRef,
        bus: Bus,
        poll_interval: Duration,
    ) -> Self {
        Self {
            descriptor,
            transport,
            bus,
            poll_interval,
        }
    }

    /// Runs the monitor until cancellation.
    ///
    /// ### Exit conditions
    /// - `runtime_token` is cancelled (shutdown in progress)
    /// - The subscription could not be opened (terminal for this monitor)
    ///
    /// ### Cancellation semantics
    /// - The token is checked at the top of every poll
    /// - The inter-poll sleep is a cancellable wait, so shutdown never
    ///   waits out a full interval
    /// - After cancellation no further receive is attempted
    ///
    /// `MonitorStopped` is always the last event this monitor publishes,
    /// after its subscription has been dropped.
    pub(crate) async fn run(self, runtime_token: CancellationToken) {
        let label = self.descriptor.label();
        self.bus
            .publish(Event::now(EventKind::MonitorStarted).with_endpoint(label));

        let mut sub = match self.transport.connect(self.descriptor.address()) {
            Ok(sub) => sub,
            Err(e) => {
                self.bus.publish(
                    Event::now(EventKind::SubscribeFailed)
                        .with_endpoint(label)
                        .with_reason(e.to_string()),
                );
                self.bus
                    .publish(Event::now(EventKind::MonitorStopped).with_endpoint(label));
                return;
            }
        };

        let mut state = LivenessState::new(self.descriptor.idle_threshold());

        loop {
            if runtime_token.is_cancelled() {
                break;
            }

            match sub.try_recv() {
                Ok(Recv::Heartbeat) => {
                    if state.observe_beat() {
                        self.bus
                            .publish(Event::now(EventKind::Connected).with_endpoint(label));
                    }
                }
                // A failing receive produces no beats; it accumulates toward
                // the threshold like any silent endpoint.
                Ok(Recv::Idle) | Err(_) => {
                    if let Some(idle_polls) = state.observe_idle() {
                        self.bus.publish(
                            Event::now(EventKind::Disconnected)
                                .with_endpoint(label)
                                .with_idle_polls(idle_polls),
                        );
                    }
                }
            }

            let sleep = time::sleep(self.poll_interval);
            tokio::pin!(sleep);
            select! {
                _ = &mut sleep => {}
                _ = runtime_token.cancelled() => { break; }
            }
        }

        // The subscription closes before the stop is reported.
        drop(sub);
        self.bus
            .publish(Event::now(EventKind::MonitorStopped).with_endpoint(label));
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::error::TransportError;
    use crate::transport::{Subscription, Transport};

    /// Transport that replays a fixed poll script, then cancels the given
    /// token so the monitor winds down without wall-clock waits.
    struct ScriptedTransport {
        script: Mutex<Option<VecDeque<Result<Recv, TransportError>>>>,
        done: CancellationToken,
    }

    impl ScriptedTransport {
        fn new(
            script: Vec<Result<Recv, TransportError>>,
            done: CancellationToken,
        ) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(Some(script.into())),
                done,
            })
        }
    }

    impl Transport for ScriptedTransport {
        fn connect(&self, _address: &str) -> Result<Box<dyn Subscription>, TransportError> {
            let script = self
                .script
                .lock()
                .unwrap()
                .take()
                .expect("one subscription per scripted transport");
            Ok(Box::new(ScriptedSub {
                script,
                done: self.done.clone(),
            }))
        }
    }

    struct ScriptedSub {
        script: VecDeque<Result<Recv, TransportError>>,
        done: CancellationToken,
    }

    impl Subscription for ScriptedSub {
        fn try_recv(&mut self) -> Result<Recv, TransportError> {
            match self.script.pop_front() {
                Some(step) => step,
                None => {
                    self.done.cancel();
                    Ok(Recv::Idle)
                }
            }
        }
    }

    struct RefusingTransport;

    impl Transport for RefusingTransport {
        fn connect(&self, address: &str) -> Result<Box<dyn Subscription>, TransportError> {
            Err(TransportError::Subscribe {
                address: address.to_string(),
                reason: "connection refused".to_string(),
            })
        }
    }

    fn monitor(transport: Arc<dyn Transport>, bus: Bus, threshold: u32) -> Monitor {
        Monitor::new(
            EndpointDescriptor::new("tcp://127.0.0.1:5556", "ep", threshold),
            transport,
            bus,
            Duration::from_millis(100),
        )
    }

    fn drain_kinds(rx: &mut tokio::sync::broadcast::Receiver<Event>) -> Vec<EventKind> {
        let mut kinds = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            kinds.push(ev.kind);
        }
        kinds
    }

    #[tokio::test(start_paused = true)]
    async fn test_connected_fires_on_transition_only() {
        let bus = Bus::new(64);
        let mut rx = bus.subscribe();
        let token = CancellationToken::new();
        let transport = ScriptedTransport::new(
            vec![Ok(Recv::Heartbeat), Ok(Recv::Heartbeat), Ok(Recv::Heartbeat)],
            token.clone(),
        );

        monitor(transport, bus, 5).run(token).await;

        assert_eq!(
            drain_kinds(&mut rx),
            vec![
                EventKind::MonitorStarted,
                EventKind::Connected,
                EventKind::MonitorStopped,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_disconnected_after_threshold_trips() {
        let bus = Bus::new(64);
        let mut rx = bus.subscribe();
        let token = CancellationToken::new();
        let transport = ScriptedTransport::new(
            vec![
                Ok(Recv::Heartbeat),
                Ok(Recv::Idle),
                Ok(Recv::Idle),
                Ok(Recv::Idle),
            ],
            token.clone(),
        );

        monitor(transport, bus, 2).run(token).await;

        let mut events = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            events.push(ev);
        }
        let kinds: Vec<_> = events.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::MonitorStarted,
                EventKind::Connected,
                EventKind::Disconnected,
                EventKind::MonitorStopped,
            ]
        );
        let disconnected = &events[2];
        assert_eq!(disconnected.endpoint.as_deref(), Some("ep"));
        assert_eq!(disconnected.idle_polls, Some(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_recv_errors_count_as_silence() {
        let bus = Bus::new(64);
        let mut rx = bus.subscribe();
        let token = CancellationToken::new();
        let transport = ScriptedTransport::new(
            vec![
                Err(TransportError::Recv {
                    reason: "interrupted".to_string(),
                }),
                Err(TransportError::Recv {
                    reason: "interrupted".to_string(),
                }),
            ],
            token.clone(),
        );

        monitor(transport, bus, 1).run(token).await;

        // Two failed receives exceed a threshold of one; no Connected ever.
        assert_eq!(
            drain_kinds(&mut rx),
            vec![
                EventKind::MonitorStarted,
                EventKind::Disconnected,
                EventKind::MonitorStopped,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribe_failure_is_terminal() {
        let bus = Bus::new(64);
        let mut rx = bus.subscribe();
        let token = CancellationToken::new();

        monitor(Arc::new(RefusingTransport), bus, 5)
            .run(token.clone())
            .await;

        let mut events = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            events.push(ev);
        }
        let kinds: Vec<_> = events.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::MonitorStarted,
                EventKind::SubscribeFailed,
                EventKind::MonitorStopped,
            ]
        );
        assert!(events[1].reason.as_deref().unwrap().contains("refused"));
        // The monitor returned on its own; nobody cancelled the token.
        assert!(!token.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_token_stops_before_first_poll() {
        let bus = Bus::new(64);
        let mut rx = bus.subscribe();
        let token = CancellationToken::new();
        token.cancel();
        let transport = ScriptedTransport::new(vec![Ok(Recv::Heartbeat)], token.clone());

        monitor(transport, bus, 5).run(token).await;

        // No poll ran, so no connectivity events.
        assert_eq!(
            drain_kinds(&mut rx),
            vec![EventKind::MonitorStarted, EventKind::MonitorStopped]
        );
    }
}
