//! Runtime core: orchestration and lifecycle.
//!
//! This module contains the embedded implementation of the heartwatch runtime.
//! The public API from this module is [`Supervisor`] (spawns and winds down
//! monitors), [`Status`] (observed endpoint connectivity), and
//! [`wait_for_shutdown_signal`] (OS signal helper for binaries).
//!
//! Internal modules:
//! - [`monitor`]: polls one endpoint and publishes connectivity events;
//! - [`state`]: counter-driven liveness state machine;
//! - [`supervisor`]: validates endpoints, spawns monitors, handles shutdown;
//! - [`shutdown`]: cross-platform shutdown signal handling.

mod monitor;
mod shutdown;
mod state;
mod supervisor;

pub use shutdown::wait_for_shutdown_signal;
pub use state::Status;
pub use supervisor::Supervisor;
