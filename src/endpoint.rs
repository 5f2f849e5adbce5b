//! # Endpoint descriptors.
//!
//! Defines [`EndpointDescriptor`], the static description of one monitored
//! endpoint: where to subscribe, what to call it, and how much silence to
//! tolerate.
//!
//! Descriptors are built once at startup, validated by the
//! [`Supervisor`](crate::Supervisor) before any monitor spawns, and then moved
//! into their monitor task for its whole lifetime. Nothing mutates a
//! descriptor after construction.

use crate::error::RuntimeError;

/// Static description of one monitored endpoint.
///
/// Bundles together:
/// - `address`: transport-specific connection string (for the ZeroMQ
///   transport, e.g. `tcp://10.0.0.17:5556`)
/// - `label`: human-readable identifier used in every notification
/// - `idle_threshold`: consecutive empty polls tolerated before the endpoint
///   is declared disconnected
///
/// The threshold is per-descriptor rather than global because endpoint
/// classes publish at different rates: at the default 100 ms poll interval a
/// threshold of 20 tolerates about 2 s of silence, a threshold of 50 about
/// 5 s.
///
/// ## Example
/// ```
/// use heartwatch::EndpointDescriptor;
///
/// let ep = EndpointDescriptor::new("tcp://192.168.1.20:5556", "hmi-primary", 20);
/// assert_eq!(ep.label(), "hmi-primary");
/// assert_eq!(ep.idle_threshold(), 20);
/// ```
#[derive(Clone, Debug)]
pub struct EndpointDescriptor {
    address: String,
    label: String,
    idle_threshold: u32,
}

impl EndpointDescriptor {
    /// Creates a new endpoint descriptor.
    ///
    /// Validation is deferred to [`EndpointDescriptor::validate`], which the
    /// supervisor runs before spawning anything, so construction itself never
    /// fails.
    pub fn new(address: impl Into<String>, label: impl Into<String>, idle_threshold: u32) -> Self {
        Self {
            address: address.into(),
            label: label.into(),
            idle_threshold,
        }
    }

    /// Returns the transport connection string.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the human-readable endpoint identifier.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the number of consecutive empty polls tolerated before the
    /// endpoint is declared disconnected.
    pub fn idle_threshold(&self) -> u32 {
        self.idle_threshold
    }

    /// Checks the descriptor for values that cannot possibly work.
    ///
    /// Rejects an empty address, an empty label, and a zero threshold (which
    /// would declare disconnection on the very first empty poll, i.e. almost
    /// always before the subscription has even seen traffic).
    pub fn validate(&self) -> Result<(), RuntimeError> {
        if self.address.is_empty() {
            return Err(self.invalid("address is empty"));
        }
        if self.label.is_empty() {
            return Err(self.invalid("label is empty"));
        }
        if self.idle_threshold == 0 {
            return Err(self.invalid("idle_threshold must be positive"));
        }
        Ok(())
    }

    fn invalid(&self, reason: &str) -> RuntimeError {
        RuntimeError::InvalidEndpoint {
            label: self.label.clone(),
            reason: reason.to_string(),
        }
    }
}
