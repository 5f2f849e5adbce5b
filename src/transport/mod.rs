//! # Transport abstraction for heartbeat sources.
//!
//! This module defines the seam between the liveness logic and the wire:
//! - [`Transport`] opens subscriptions to endpoint addresses
//! - [`Subscription`] reports whether anything arrived since the last poll
//! - [`Recv`] is the per-poll outcome the monitors consume
//! - [`TransportRef`] a shared reference to a transport (`Arc<dyn Transport>`)
//!
//! Monitors never name a concrete transport. Production wiring hands the
//! supervisor a [`ZmqTransport`](crate::ZmqTransport); tests hand it scripted
//! fakes and drive the same code paths deterministically.
//!
//! ## Rules
//! - **Non-blocking**: [`Subscription::try_recv`] must return immediately.
//!   The poll cadence lives in the monitor, not in the transport.
//! - **Payloads are ignored**: a heartbeat is evidence of life, nothing more.
//!   The transport reports *that* something arrived, never *what*.
//! - **No recovery**: a failed [`Transport::connect`] is terminal for that
//!   monitor. Transports should not retry internally.

use std::sync::Arc;

use crate::error::TransportError;

#[cfg(feature = "zeromq")]
mod zeromq;

#[cfg(feature = "zeromq")]
pub use zeromq::ZmqTransport;

/// Shared reference to a transport (`Arc<dyn Transport>`).
pub type TransportRef = Arc<dyn Transport>;

/// Outcome of a single non-blocking poll on a [`Subscription`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recv {
    /// At least one message arrived since the last poll.
    Heartbeat,
    /// Nothing arrived.
    Idle,
}

/// # Factory for endpoint subscriptions.
///
/// One transport serves every monitor in the process; implementations must be
/// safe to share across tasks. [`connect`](Transport::connect) is called once
/// per monitor, at startup.
///
/// # Example
/// ```
/// use heartwatch::{Recv, Subscription, Transport, TransportError};
///
/// /// Transport whose subscriptions never hear anything.
/// struct Silent;
///
/// struct SilentSub;
///
/// impl Subscription for SilentSub {
///     fn try_recv(&mut self) -> Result<Recv, TransportError> {
///         Ok(Recv::Idle)
///     }
/// }
///
/// impl Transport for Silent {
///     fn connect(&self, _address: &str) -> Result<Box<dyn Subscription>, TransportError> {
///         Ok(Box::new(SilentSub))
///     }
/// }
/// ```
pub trait Transport: Send + Sync + 'static {
    /// Opens a subscription to the given address.
    ///
    /// Errors are terminal for the calling monitor: it reports the failure
    /// and stops, without retrying.
    fn connect(&self, address: &str) -> Result<Box<dyn Subscription>, TransportError>;
}

/// # One endpoint's live subscription.
///
/// Owned by a single monitor task and polled on its cadence. Dropping the
/// subscription releases the underlying resources.
pub trait Subscription: Send {
    /// Polls for a heartbeat without blocking.
    ///
    /// Returns [`Recv::Heartbeat`] if at least one message arrived,
    /// [`Recv::Idle`] if none did. Errors other than "nothing there" are
    /// reported as [`TransportError::Recv`]; the monitor treats them as
    /// silence rather than aborting.
    fn try_recv(&mut self) -> Result<Recv, TransportError>;
}
