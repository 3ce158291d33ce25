//! Blocking TCP transport for the Motion Service streaming protocol.
//!
//! This is the lowest layer of motionsdk. It owns exactly one socket and
//! reports every I/O attempt as one of three outcomes:
//! - bytes transferred
//! - timed out (retryable, the socket stays open)
//! - hard failure (fatal, the caller must close)
//!
//! A zero-byte read is reported separately as a graceful peer shutdown.

pub mod error;
pub mod netstack;
pub mod tcp;
pub mod traits;

pub use error::{Result, TransportError};
pub use netstack::NetStackGuard;
pub use tcp::{TcpTransport, DEFAULT_HOST, SOCKET_BUFFER_SIZE};
pub use traits::{ReceiveChunk, Received, SendChunk, Sent};
