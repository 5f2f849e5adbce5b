//! # Per-endpoint liveness state machine.
//!
//! [`LivenessState`] folds a stream of poll outcomes (heartbeat or silence)
//! into a [`Status`] plus notification decisions. It is pure bookkeeping:
//! no clocks, no I/O. The monitor owns the cadence and feeds it one
//! observation per poll.
//!
//! ## Transitions
//! ```text
//!   Unknown ───beat───► Connected ◄───beat─── Disconnected
//!      │                    │                      ▲
//!      └──────idle>N────────┴────────idle>N────────┘
//! ```
//!
//! ## Rules
//! - **Connected fires on transition only**: steady heartbeats stay silent.
//! - **Disconnected fires once per silent window**: the idle counter resets
//!   when it trips, so an endpoint that stays dark re-notifies every
//!   `threshold + 1` polls instead of every poll.
//! - **Any heartbeat resets the counter**, however close to the threshold
//!   it was.

/// Observed connectivity of one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// No heartbeat seen yet and the threshold has not tripped.
    Unknown,
    /// Last observation was a heartbeat (or silence still under threshold).
    Connected,
    /// Idle threshold tripped; no heartbeat since.
    Disconnected,
}

/// Counter-driven state machine for a single endpoint.
#[derive(Debug)]
pub(crate) struct LivenessState {
    status: Status,
    idle_threshold: u32,
    idle_polls: u32,
}

impl LivenessState {
    /// Creates a fresh state with status [`Status::Unknown`] and an empty
    /// idle counter.
    pub(crate) fn new(idle_threshold: u32) -> Self {
        Self {
            status: Status::Unknown,
            idle_threshold,
            idle_polls: 0,
        }
    }

    /// Records a heartbeat observation.
    ///
    /// Resets the idle counter. Returns `true` when this observation moved
    /// the endpoint into [`Status::Connected`] from some other status, which
    /// is exactly when a `Connected` notification is due.
    pub(crate) fn observe_beat(&mut self) -> bool {
        self.idle_polls = 0;
        if self.status == Status::Connected {
            return false;
        }
        self.status = Status::Connected;
        true
    }

    /// Records a silent poll.
    ///
    /// Returns `Some(count)` when the accumulated silence exceeded the
    /// threshold on this poll; `count` is the number of consecutive empty
    /// polls at the trip point. The counter resets so the next window is
    /// measured from zero.
    pub(crate) fn observe_idle(&mut self) -> Option<u32> {
        self.idle_polls = self.idle_polls.saturating_add(1);
        if self.idle_polls <= self.idle_threshold {
            return None;
        }
        let tripped = self.idle_polls;
        self.idle_polls = 0;
        self.status = Status::Disconnected;
        Some(tripped)
    }

    /// Returns the current status.
    pub(crate) fn status(&self) -> Status {
        self.status
    }

    /// Returns the consecutive empty polls seen since the last heartbeat or
    /// trip.
    #[cfg(test)]
    pub(crate) fn idle_polls(&self) -> u32 {
        self.idle_polls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_beat_connects() {
        let mut state = LivenessState::new(20);
        assert_eq!(state.status(), Status::Unknown);
        assert!(state.observe_beat());
        assert_eq!(state.status(), Status::Connected);
    }

    #[test]
    fn test_steady_beats_notify_once() {
        let mut state = LivenessState::new(20);
        assert!(state.observe_beat());
        assert!(!state.observe_beat());
        assert!(!state.observe_beat());
    }

    #[test]
    fn test_trips_one_poll_past_threshold() {
        let mut state = LivenessState::new(20);
        state.observe_beat();
        // 20 silent polls are still within tolerance.
        for _ in 0..20 {
            assert_eq!(state.observe_idle(), None);
        }
        assert_eq!(state.status(), Status::Connected);
        // The 21st trips, reporting the full window.
        assert_eq!(state.observe_idle(), Some(21));
        assert_eq!(state.status(), Status::Disconnected);
        assert_eq!(state.idle_polls(), 0);
    }

    #[test]
    fn test_silence_from_startup_trips_without_any_beat() {
        let mut state = LivenessState::new(2);
        assert_eq!(state.observe_idle(), None);
        assert_eq!(state.observe_idle(), None);
        assert_eq!(state.observe_idle(), Some(3));
        assert_eq!(state.status(), Status::Disconnected);
    }

    #[test]
    fn test_dark_endpoint_renotifies_each_window() {
        let mut state = LivenessState::new(2);
        assert_eq!(state.observe_idle(), None);
        assert_eq!(state.observe_idle(), None);
        assert_eq!(state.observe_idle(), Some(3));
        // Next window measures from zero again.
        assert_eq!(state.observe_idle(), None);
        assert_eq!(state.observe_idle(), None);
        assert_eq!(state.observe_idle(), Some(3));
    }

    #[test]
    fn test_beat_resets_counter_midway() {
        let mut state = LivenessState::new(3);
        state.observe_beat();
        assert_eq!(state.observe_idle(), None);
        assert_eq!(state.observe_idle(), None);
        assert_eq!(state.idle_polls(), 2);
        assert!(!state.observe_beat());
        assert_eq!(state.idle_polls(), 0);
        // A full window is required again after the beat.
        for _ in 0..3 {
            assert_eq!(state.observe_idle(), None);
        }
        assert_eq!(state.observe_idle(), Some(4));
    }

    #[test]
    fn test_reconnect_notifies_after_trip() {
        let mut state = LivenessState::new(1);
        assert_eq!(state.observe_idle(), None);
        assert_eq!(state.observe_idle(), Some(2));
        assert_eq!(state.status(), Status::Disconnected);
        assert!(state.observe_beat());
        assert_eq!(state.status(), Status::Connected);
    }
}
