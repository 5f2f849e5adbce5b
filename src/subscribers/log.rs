//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints events to stdout in a human-readable format.
//! This is primarily useful for development, debugging, and the reference
//! binary's console output.
//!
//! ## Output format
//! ```text
//! [monitor-started] endpoint=hmi-primary
//! [connected] endpoint=hmi-primary
//! [disconnected] endpoint=hmi-primary idle_polls=21
//! [subscribe-failed] endpoint=bbb err="Connection refused"
//! [monitor-stopped] endpoint=bbb
//! [shutdown-requested]
//! [all-stopped-within-grace]
//! [grace-exceeded]
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscriber;

/// Simple stdout logging subscriber.
///
/// Prints human-readable event descriptions to stdout.
///
/// Not intended for machine consumption - implement a custom [`Subscriber`]
/// for structured logging or metrics collection.
pub struct LogWriter;

#[async_trait]
impl Subscriber for LogWriter {
    async fn handle(&self, e: &Event) {
        match e.kind {
            EventKind::MonitorStarted => {
                if let Some(endpoint) = &e.endpoint {
                    println!("[monitor-started] endpoint={endpoint}");
                }
            }
            EventKind::Connected => {
                if let Some(endpoint) = &e.endpoint {
                    println!("[connected] endpoint={endpoint}");
                }
            }
            EventKind::Disconnected => {
                if let (Some(endpoint), Some(idle)) = (&e.endpoint, e.idle_polls) {
                    println!("[disconnected] endpoint={endpoint} idle_polls={idle}");
                }
            }
            EventKind::SubscribeFailed => {
                if let Some(endpoint) = &e.endpoint {
                    let err = e.reason.as_deref().unwrap_or("unknown");
                    println!("[subscribe-failed] endpoint={endpoint} err={err:?}");
                }
            }
            EventKind::MonitorStopped => {
                if let Some(endpoint) = &e.endpoint {
                    println!("[monitor-stopped] endpoint={endpoint}");
                }
            }
            EventKind::ShutdownRequested => {
                println!("[shutdown-requested]");
            }
            EventKind::AllStoppedWithin => {
                println!("[all-stopped-within-grace]");
            }
            EventKind::GraceExceeded => {
                println!("[grace-exceeded]");
            }
        }
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
