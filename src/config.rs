//! # Global runtime configuration.
//!
//! Provides [`Config`], the centralized settings for the supervisor runtime.
//!
//! Config is consumed once, at [`Supervisor::new`](crate::Supervisor::new);
//! per-endpoint knobs (the idle threshold) live on the
//! [`EndpointDescriptor`](crate::EndpointDescriptor) instead, because the
//! tolerated silence differs by endpoint class while the poll cadence does
//! not.

use std::time::Duration;

/// Global configuration for the supervisor runtime.
///
/// ## Field semantics
/// - `poll_interval`: fixed delay between receive attempts. This bounds both
///   CPU spent busy-polling and the latency with which a monitor observes the
///   shutdown flag (worst case one interval).
/// - `grace`: maximum wait for monitors to stop after shutdown is requested
///   before they are reported stuck.
/// - `bus_capacity`: event bus ring buffer size (min 1; clamped by the bus).
///   Slow subscribers that lag behind more than `bus_capacity` events skip
///   the oldest ones.
#[derive(Clone, Debug)]
pub struct Config {
    /// Delay between successive non-blocking receive attempts.
    pub poll_interval: Duration,

    /// Maximum time to wait for monitors to exit after shutdown is requested.
    pub grace: Duration,

    /// Capacity of the event bus broadcast channel ring buffer.
    pub bus_capacity: usize,
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `poll_interval = 100ms` (detection latency vs. busy-polling trade-off)
    /// - `grace = 5s` (monitors exit within one poll interval, so this is generous)
    /// - `bus_capacity = 1024`
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
            grace: Duration::from_secs(5),
            bus_capacity: 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.poll_interval, Duration::from_millis(100));
        assert_eq!(cfg.grace, Duration::from_secs(5));
        assert_eq!(cfg.bus_capacity, 1024);
    }
}
