//! # Supervisor: orchestrates monitors, fan-out delivery, and graceful shutdown.
//!
//! The [`Supervisor`] owns the event bus, a [`SubscriberSet`], the shared
//! transport, and global runtime configuration. It validates endpoint
//! descriptors, spawns one monitor per endpoint, and winds everything down
//! cooperatively when shutdown is requested.
//!
//! ## Key responsibilities
//! - validate every [`EndpointDescriptor`] **before** anything starts
//! - subscribe to the [`Bus`] and **fan-out** events via [`SubscriberSet`]
//! - spawn one [`Monitor`] per endpoint with a child cancellation token
//! - perform graceful shutdown with a configurable [`Config::grace`]
//!
//! ## High-level architecture
//! ```text
//! Inputs to run():
//!   Vec<EndpointDescriptor>  ──►  Supervisor::run(endpoints)
//!
//! Preparation:
//!   - validate(): empty/duplicate labels, zero thresholds → RuntimeError (nothing spawned)
//!   - subscriber_listener(): Bus.subscribe() ─► SubscriberSet::emit(&Event)   (fire-and-forget)
//!
//! Spawn monitors:
//!   Endpoint[0]  Endpoint[1]  ...  Endpoint[N-1]
//!       │            │                  │
//!       └──► Monitor::new(descriptor, transport, bus, poll_interval)   (one per endpoint)
//!                  └──► child CancellationToken = token.child_token()
//!                       set.spawn(monitor.run(child))
//!
//! Event flow (as wired here):
//!   Monitor ... ── publish(Event) ──► Bus ──► Supervisor listener ──► SubscriberSet::emit(&Event)
//!                                                                ┌─────────┬─────────┐
//!                                                                ▼         ▼         ▼
//!                                                         [queue S1] [queue S2] ... [board]
//!
//! Shutdown path:
//!   Supervisor::shutdown()            (signal handler, admin task, anyone)
//!             └─► token.cancel()      → propagates to child tokens
//!   drive_shutdown() observes the cancellation:
//!             └─► Bus.publish(ShutdownRequested)
//!             └─► wait_all_with_grace(cfg.grace):
//!                    ├─ Ok (all joined)    → Bus.publish(AllStoppedWithin)
//!                    └─ Timeout exceeded   → Bus.publish(GraceExceeded)
//!                                            (StatusBoard.running() for stuck monitors)
//! ```
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//!
//! use heartwatch::{
//!     Config, EndpointDescriptor, LogWriter, Recv, Subscriber, Subscription, Supervisor,
//!     Transport, TransportError,
//! };
//!
//! struct Silent;
//! struct SilentSub;
//!
//! impl Subscription for SilentSub {
//!     fn try_recv(&mut self) -> Result<Recv, TransportError> {
//!         Ok(Recv::Idle)
//!     }
//! }
//!
//! impl Transport for Silent {
//!     fn connect(&self, _address: &str) -> Result<Box<dyn Subscription>, TransportError> {
//!         Ok(Box::new(SilentSub))
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), heartwatch::RuntimeError> {
//!     let subs: Vec<Arc<dyn Subscriber>> = vec![Arc::new(LogWriter)];
//!     let sup = Supervisor::new(Config::default(), Arc::new(Silent), subs);
//!
//!     // Stop immediately; monitors exit within one poll interval.
//!     sup.shutdown();
//!     sup.run(vec![EndpointDescriptor::new("inproc://demo", "demo", 20)])
//!         .await?;
//!     Ok(())
//! }
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::core::monitor::Monitor;
use crate::endpoint::EndpointDescriptor;
use crate::subscribers::{StatusBoard, Subscriber, SubscriberSet};
use crate::transport::TransportRef;
use crate::{
    config::Config,
    error::RuntimeError,
    events::{Bus, Event, EventKind},
};

/// Coordinates monitors, event delivery (via [`SubscriberSet`]), and graceful shutdown.
///
/// One supervisor drives one `run()`. The shutdown flag is write-once: after
/// [`shutdown`](Supervisor::shutdown) has been called the supervisor can only
/// wind down.
pub struct Supervisor {
    cfg: Config,
    bus: Bus,
    transport: TransportRef,
    subs: Arc<SubscriberSet>,
    board: Arc<StatusBoard>,
    token: CancellationToken,
}

impl Supervisor {
    /// Creates a new supervisor with the given config, transport, and subscribers.
    ///
    /// A [`StatusBoard`] is created internally and appended to the subscriber
    /// set; query it via [`board`](Supervisor::board).
    ///
    /// Must be called from within a Tokio runtime (subscriber workers spawn
    /// here).
    pub fn new(cfg: Config, transport: TransportRef, subscribers: Vec<Arc<dyn Subscriber>>) -> Self {
        let bus = Bus::new(cfg.bus_capacity);
        let board = Arc::new(StatusBoard::new());

        let mut subs = subscribers;
        subs.push(board.clone() as Arc<dyn Subscriber>);

        Self {
            cfg,
            bus,
            transport,
            subs: Arc::new(SubscriberSet::new(subs)),
            board,
            token: CancellationToken::new(),
        }
    }

    /// Runs monitors for the provided endpoints until either:
    /// - every monitor exits on its own (all subscriptions failed), or
    /// - shutdown is requested → graceful wind-down (may end with `GraceExceeded`).
    ///
    /// Validation failures return before any monitor spawns and before any
    /// event is published.
    pub async fn run(&self, endpoints: Vec<EndpointDescriptor>) -> Result<(), RuntimeError> {
        Self::validate(&endpoints)?;
        self.subscriber_listener();

        let mut set = JoinSet::new();
        self.spawn_monitors(&mut set, endpoints);
        self.drive_shutdown(&mut set).await
    }

    /// Requests cooperative shutdown.
    ///
    /// Idempotent; safe to call from signal handlers, admin endpoints, or any
    /// task holding a reference. Monitors observe the request within one poll
    /// interval.
    pub fn shutdown(&self) {
        self.token.cancel();
    }

    /// True once shutdown has been requested.
    pub fn is_shutting_down(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Returns the endpoint status board fed by this supervisor's events.
    pub fn board(&self) -> Arc<StatusBoard> {
        self.board.clone()
    }

    /// Returns the event bus, e.g. to attach an ad-hoc receiver.
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Rejects descriptor sets that cannot possibly run.
    ///
    /// Checks each descriptor individually, then label uniqueness (labels key
    /// the status board and every notification).
    fn validate(endpoints: &[EndpointDescriptor]) -> Result<(), RuntimeError> {
        let mut seen = HashSet::new();
        for ep in endpoints {
            ep.validate()?;
            if !seen.insert(ep.label()) {
                return Err(RuntimeError::InvalidEndpoint {
                    label: ep.label().to_string(),
                    reason: "duplicate label".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Subscribes to the bus and forwards events to the subscriber set (fire-and-forget).
    fn subscriber_listener(&self) {
        let mut rx = self.bus.subscribe();
        let set = Arc::clone(&self.subs);
        tokio::spawn(async move {
            while let Ok(ev) = rx.recv().await {
                set.emit(&ev);
            }
        });
    }

    /// Spawns monitors and adds them to the given join set.
    fn spawn_monitors(&self, set: &mut JoinSet<()>, endpoints: Vec<EndpointDescriptor>) {
        for descriptor in endpoints {
            let monitor = Monitor::new(
                descriptor,
                self.transport.clone(),
                self.bus.clone(),
                self.cfg.poll_interval,
            );
            let child = self.token.child_token();
            set.spawn(monitor.run(child));
        }
    }

    /// Waits until either all monitors finish or shutdown is requested.
    async fn drive_shutdown(&self, set: &mut JoinSet<()>) -> Result<(), RuntimeError> {
        tokio::select! {
            _ = self.token.cancelled() => {
                self.bus.publish(Event::now(EventKind::ShutdownRequested));
                self.wait_all_with_grace(set).await
            }
            _ = async { while set.join_next().await.is_some() {} } => {
                Ok(())
            }
        }
    }

    /// Waits for all monitors to finish within the configured grace period.
    ///
    /// Publishes [`EventKind::AllStoppedWithin`] on success, or
    /// [`EventKind::GraceExceeded`] on timeout and returns
    /// [`RuntimeError::GraceExceeded`] with the list of stuck monitors.
    async fn wait_all_with_grace(&self, set: &mut JoinSet<()>) -> Result<(), RuntimeError> {
        let grace = self.cfg.grace;
        let done = async { while set.join_next().await.is_some() {} };
        let timed = tokio::time::timeout(grace, done).await;

        match timed {
            Ok(_) => {
                self.bus.publish(Event::now(EventKind::AllStoppedWithin));
                Ok(())
            }
            Err(_) => {
                self.bus.publish(Event::now(EventKind::GraceExceeded));
                let stuck = self.board.running().await;
                Err(RuntimeError::GraceExceeded { grace, stuck })
            }
        }
    }
}
