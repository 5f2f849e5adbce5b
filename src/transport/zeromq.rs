//! # ZeroMQ-backed transport.
//!
//! [`ZmqTransport`] implements [`Transport`] over ZeroMQ SUB sockets. Each
//! subscription is one `SUB` socket with an empty subscription filter, so
//! every message the publisher sends counts as a heartbeat regardless of
//! topic or payload.
//!
//! ZeroMQ connects lazily: a well-formed address succeeds here even when the
//! peer is down or not yet listening. Liveness is judged from traffic, not
//! from this call. `connect` only fails on addresses ZeroMQ cannot parse or
//! socket exhaustion.

use zmq::{Context, Socket};

use super::{Recv, Subscription, Transport};
use crate::error::TransportError;

/// ZeroMQ transport: one shared context, one SUB socket per subscription.
///
/// The context is thread-safe and cheap to share; sockets are not, so each
/// monitor gets its own via [`Transport::connect`]. Dropping a subscription
/// closes its socket.
pub struct ZmqTransport {
    context: Context,
}

impl ZmqTransport {
    /// Creates a transport with a fresh ZeroMQ context.
    pub fn new() -> Self {
        Self {
            context: Context::new(),
        }
    }
}

impl Default for ZmqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for ZmqTransport {
    fn connect(&self, address: &str) -> Result<Box<dyn Subscription>, TransportError> {
        let socket = self
            .context
            .socket(zmq::SUB)
            .map_err(|e| subscribe_error(address, e))?;
        socket
            .set_subscribe(b"")
            .map_err(|e| subscribe_error(address, e))?;
        socket
            .connect(address)
            .map_err(|e| subscribe_error(address, e))?;
        Ok(Box::new(ZmqSubscription { socket }))
    }
}

fn subscribe_error(address: &str, err: zmq::Error) -> TransportError {
    TransportError::Subscribe {
        address: address.to_string(),
        reason: err.to_string(),
    }
}

struct ZmqSubscription {
    socket: Socket,
}

impl Subscription for ZmqSubscription {
    fn try_recv(&mut self) -> Result<Recv, TransportError> {
        // One message per poll; the payload is dropped unread.
        match self.socket.recv_msg(zmq::DONTWAIT) {
            Ok(_) => Ok(Recv::Heartbeat),
            Err(zmq::Error::EAGAIN) => Ok(Recv::Idle),
            Err(e) => Err(TransportError::Recv {
                reason: e.to_string(),
            }),
        }
    }
}
