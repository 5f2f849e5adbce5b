//! Reference binary: watch two HMI stations and one BBB controller over
//! ZeroMQ.
//!
//! Addresses arrive as bare `HOST:PORT`; the `tcp://` scheme is prepended
//! here. Connectivity changes are printed to stdout by [`LogWriter`].

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use heartwatch::{
    Config, EndpointDescriptor, LogWriter, Subscriber, Supervisor, ZmqTransport,
    wait_for_shutdown_signal,
};

/// Consecutive empty polls tolerated for HMI endpoints (about 2 s at 100 ms).
const HMI_IDLE_THRESHOLD: u32 = 20;
/// Consecutive empty polls tolerated for the BBB endpoint (about 5 s at 100 ms).
const BBB_IDLE_THRESHOLD: u32 = 50;

/// Passive heartbeat watcher for two HMI stations and one BBB controller.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Primary HMI heartbeat publisher.
    #[arg(value_name = "HOST:PORT")]
    hmi_primary: String,

    /// Secondary HMI heartbeat publisher.
    #[arg(value_name = "HOST:PORT")]
    hmi_secondary: String,

    /// BBB controller heartbeat publisher.
    #[arg(value_name = "HOST:PORT")]
    bbb: String,

    /// Poll interval in milliseconds.
    #[arg(long, default_value_t = 100)]
    poll_interval_ms: u64,

    /// How long shutdown waits for monitors to stop, in seconds.
    #[arg(long, default_value_t = 5)]
    grace_secs: u64,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            grace: Duration::from_secs(self.grace_secs),
            ..Config::default()
        }
    }

    fn endpoints(&self) -> Vec<EndpointDescriptor> {
        vec![
            EndpointDescriptor::new(tcp(&self.hmi_primary), "hmi-primary", HMI_IDLE_THRESHOLD),
            EndpointDescriptor::new(tcp(&self.hmi_secondary), "hmi-secondary", HMI_IDLE_THRESHOLD),
            EndpointDescriptor::new(tcp(&self.bbb), "bbb", BBB_IDLE_THRESHOLD),
        ]
    }
}

fn tcp(addr: &str) -> String {
    format!("tcp://{addr}")
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let subs: Vec<Arc<dyn Subscriber>> = vec![Arc::new(LogWriter)];
    let sup = Arc::new(Supervisor::new(
        cli.config(),
        Arc::new(ZmqTransport::new()),
        subs,
    ));

    // Wire OS signals to the shutdown flag; monitors notice within one poll.
    let signal_sup = sup.clone();
    tokio::spawn(async move {
        match wait_for_shutdown_signal().await {
            Ok(()) => signal_sup.shutdown(),
            Err(e) => eprintln!("[heartwatch] signal listener failed: {e}"),
        }
    });

    match sup.run(cli.endpoints()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[heartwatch] {e}");
            ExitCode::FAILURE
        }
    }
}
