//! # Event subscribers for the heartwatch runtime.
//!
//! This module provides the [`Subscriber`] trait and built-in implementations
//! for handling runtime events broadcast through the [`Bus`](crate::events::Bus).
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   Monitor ── publish(Event) ──► Bus ──► SubscriberSet fan-out
//!                                              │
//!                                              ├──► Subscriber::handle(&Event)
//!                                              │         │
//!                                              │    ┌────┴────┬─────────┐
//!                                              │    ▼         ▼         ▼
//!                                              │  LogWriter  Custom    ...
//!                                              │
//!                                              └──► StatusBoard (internal state tracking)
//! ```
//!
//! ## Subscriber types
//! - **Passive subscribers** - observe and react to events (logging, alerts)
//! - **Stateful subscribers** - maintain internal state based on events (StatusBoard)

mod board;
mod log;
mod set;
mod subscriber;

pub use board::StatusBoard;
pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscriber::Subscriber;
