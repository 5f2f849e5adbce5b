//! Error types used by the heartwatch runtime and the transport seam.
//!
//! This module defines two error enums:
//!
//! - [`RuntimeError`]: errors raised by the supervising runtime itself.
//! - [`TransportError`]: errors raised by transport subscriptions.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for
//! logging/metrics. An empty poll is *not* part of this taxonomy: it is the
//! normal [`Recv::Idle`](crate::transport::Recv) outcome, handled by the idle
//! counter, never as an error.

use std::time::Duration;
use thiserror::Error;

/// # Errors produced by the heartwatch runtime.
///
/// These represent failures of the supervision layer, not of any single
/// endpoint: a monitor that loses contact with its endpoint keeps that
/// knowledge to itself and reports it through the event bus instead.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// An endpoint descriptor failed validation before any monitor spawned.
    #[error("invalid endpoint {label:?}: {reason}")]
    InvalidEndpoint {
        /// Label of the rejected descriptor (may be empty when that is the problem).
        label: String,
        /// What the validation objected to.
        reason: String,
    },

    /// Shutdown grace period was exceeded; some monitors were still running.
    #[error("shutdown grace {grace:?} exceeded; still running: {stuck:?}")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
        /// Labels of the monitors that did not stop in time.
        stuck: Vec<String>,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use std::time::Duration;
    /// use heartwatch::RuntimeError;
    ///
    /// let err = RuntimeError::GraceExceeded { grace: Duration::from_secs(5), stuck: vec![] };
    /// assert_eq!(err.as_label(), "runtime_grace_exceeded");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::InvalidEndpoint { .. } => "runtime_invalid_endpoint",
            RuntimeError::GraceExceeded { .. } => "runtime_grace_exceeded",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::InvalidEndpoint { label, reason } => {
                format!("endpoint {label:?} rejected: {reason}")
            }
            RuntimeError::GraceExceeded { grace, stuck } => {
                format!("grace exceeded after {grace:?}; still running={stuck:?}")
            }
        }
    }
}

/// # Errors produced by transport subscriptions.
///
/// Raised by [`Transport::connect`](crate::transport::Transport::connect) and
/// [`Subscription::try_recv`](crate::transport::Subscription::try_recv).
/// A subscribe failure is fatal for the affected monitor only; a receive
/// failure after subscribing is counted as silence by the monitor and never
/// escalated.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TransportError {
    /// The subscription could not be established.
    #[error("subscribe to {address} failed: {reason}")]
    Subscribe {
        /// Address the connection was attempted against.
        address: String,
        /// Transport-specific failure description.
        reason: String,
    },

    /// A non-blocking receive failed for a reason other than "no message ready".
    #[error("receive failed: {reason}")]
    Recv {
        /// Transport-specific failure description.
        reason: String,
    },
}

impl TransportError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use heartwatch::TransportError;
    ///
    /// let err = TransportError::Recv { reason: "socket closed".into() };
    /// assert_eq!(err.as_label(), "transport_recv");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TransportError::Subscribe { .. } => "transport_subscribe",
            TransportError::Recv { .. } => "transport_recv",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            TransportError::Subscribe { address, reason } => {
                format!("subscribe failed: address={address} reason={reason}")
            }
            TransportError::Recv { reason } => format!("receive failed: {reason}"),
        }
    }
}
