//! # heartwatch
//!
//! **Heartwatch** is a passive liveness watcher for heartbeat-publishing
//! endpoints.
//!
//! It subscribes to each endpoint's pub/sub stream, polls without blocking on
//! a fixed cadence, and reports connectivity changes when heartbeats appear
//! or go missing. The crate is designed as a building block for field
//! monitoring daemons; a reference binary wires it to ZeroMQ.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  ┌────────────────────┐   ┌────────────────────┐   ┌────────────────────┐
//!  │ EndpointDescriptor │   │ EndpointDescriptor │   │ EndpointDescriptor │
//!  │  (addr, label, N)  │   │  (addr, label, N)  │   │  (addr, label, N)  │
//!  └─────────┬──────────┘   └─────────┬──────────┘   └─────────┬──────────┘
//!            ▼                        ▼                        ▼
//! ┌───────────────────────────────────────────────────────────────────────┐
//! │  Supervisor (runtime orchestrator)                                    │
//! │  - validates descriptors before anything starts                       │
//! │  - Bus (broadcast events)                                             │
//! │  - StatusBoard (tracks endpoint state with sequence numbers)          │
//! │  - SubscriberSet (fans out to user subscribers)                       │
//! └─────────┬──────────────────────┬──────────────────────┬───────────────┘
//!           ▼                      ▼                      ▼
//!  ┌────────────────┐     ┌────────────────┐     ┌────────────────┐
//!  │    Monitor     │     │    Monitor     │     │    Monitor     │
//!  │  (poll loop)   │     │  (poll loop)   │     │  (poll loop)   │
//!  └┬───────────────┘     └┬───────────────┘     └┬───────────────┘
//!   │ Publishes            │ Publishes            │ Publishes
//!   │ - MonitorStarted     │ - Connected          │ - SubscribeFailed
//!   │ - Connected          │ - Disconnected       │ - MonitorStopped
//!   │ - ...                │ - ...                │
//!   ▼                      ▼                      ▼
//! ┌───────────────────────────────────────────────────────────────────────┐
//! │                        Bus (broadcast channel)                        │
//! │                     (capacity: Config::bus_capacity)                  │
//! └───────────────────────────────────┬───────────────────────────────────┘
//!                                     ▼
//!                         ┌────────────────────────┐
//!                         │  subscriber_listener   │
//!                         │    (in Supervisor)     │
//!                         └───┬────────────────┬───┘
//!                             ▼                ▼
//!                       StatusBoard      SubscriberSet
//!                     (sequence-based)   (per-sub queues)
//!                                     ┌─────────┼─────────┐
//!                                     ▼         ▼         ▼
//!                                  worker1   worker2   workerN
//!                                     ▼         ▼         ▼
//!                                  sub1      sub2      subN
//!                                  .handle() .handle() .handle()
//! ```
//!
//! ### Lifecycle
//! ```text
//! EndpointDescriptor ──► Supervisor ──► Monitor::run()
//!
//! publish MonitorStarted
//! transport.connect(address)
//!     └─ Err ──► publish SubscribeFailed ──► publish MonitorStopped, exit
//!
//! loop {
//!   ├─► exit if shutdown requested
//!   ├─► try_recv()
//!   │     ├─ Heartbeat ──► counter = 0
//!   │     │                └─ transition? ──► publish Connected
//!   │     └─ Idle / Err ──► counter += 1
//!   │                       └─ counter > threshold ──► counter = 0
//!   │                                                  publish Disconnected
//!   └─► sleep(poll_interval)   (cancellable)
//! }
//!
//! publish MonitorStopped
//! ```
//!
//! ## Features
//! | Area               | Description                                                        | Key types / traits                        |
//! |--------------------|--------------------------------------------------------------------|-------------------------------------------|
//! | **Monitoring**     | One liveness monitor per endpoint, counter-based silence detection.| [`Supervisor`], [`EndpointDescriptor`], [`Status`] |
//! | **Transport**      | Pluggable heartbeat sources; ZeroMQ SUB implementation built in.   | [`Transport`], [`Subscription`], [`ZmqTransport`]  |
//! | **Subscriber API** | Hook into connectivity events (logging, boards, custom sinks).     | [`Subscriber`], [`LogWriter`], [`StatusBoard`]     |
//! | **Errors**         | Typed errors for startup validation and transport failures.        | [`RuntimeError`], [`TransportError`]      |
//! | **Configuration**  | Centralize runtime settings.                                       | [`Config`]                                |
//!
//! ## Optional features
//! - `zeromq` *(default)*: ZeroMQ-backed [`ZmqTransport`] and the reference binary (links libzmq).
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//!
//! use heartwatch::{
//!     Config, EndpointDescriptor, LogWriter, Subscriber, Supervisor, ZmqTransport,
//!     wait_for_shutdown_signal,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), heartwatch::RuntimeError> {
//!     let subs: Vec<Arc<dyn Subscriber>> = vec![Arc::new(LogWriter)];
//!     let sup = Arc::new(Supervisor::new(
//!         Config::default(),
//!         Arc::new(ZmqTransport::new()),
//!         subs,
//!     ));
//!
//!     // Wire OS signals to the shutdown flag.
//!     let signal_sup = sup.clone();
//!     tokio::spawn(async move {
//!         if wait_for_shutdown_signal().await.is_ok() {
//!             signal_sup.shutdown();
//!         }
//!     });
//!
//!     sup.run(vec![
//!         EndpointDescriptor::new("tcp://192.168.1.20:5556", "hmi-primary", 20),
//!         EndpointDescriptor::new("tcp://192.168.1.21:5556", "hmi-secondary", 20),
//!         EndpointDescriptor::new("tcp://192.168.1.30:5556", "bbb", 50),
//!     ])
//!     .await
//! }
//! ```
mod config;
mod core;
mod endpoint;
mod error;
mod events;
mod subscribers;
mod transport;

// ---- Public re-exports ----

pub use crate::config::Config;
pub use crate::core::{Status, Supervisor, wait_for_shutdown_signal};
pub use crate::endpoint::EndpointDescriptor;
pub use crate::error::{RuntimeError, TransportError};
pub use crate::events::{Bus, Event, EventKind};
pub use crate::subscribers::{LogWriter, StatusBoard, Subscriber, SubscriberSet};
pub use crate::transport::{Recv, Subscription, Transport, TransportRef};

// Optional: expose the ZeroMQ transport.
// Enabled by default; disable with `--no-default-features` to avoid libzmq.
#[cfg(feature = "zeromq")]
pub use crate::transport::ZmqTransport;
