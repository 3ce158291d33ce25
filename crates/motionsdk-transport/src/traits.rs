use std::io::{ErrorKind, Read, Write};

use crate::error::{Result, TransportError};

/// Outcome of a single receive attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Received {
    /// `n > 0` bytes were written into the caller's buffer.
    Data(usize),
    /// The receive timeout elapsed before any byte arrived.
    TimedOut,
    /// The peer shut down its side of the stream (zero-byte read).
    PeerClosed,
}

/// Outcome of a single send attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sent {
    /// `n` bytes were accepted by the stream. Zero means the peer is gone.
    Data(usize),
    /// The send timeout elapsed before any byte was accepted.
    TimedOut,
}

/// One receive attempt against a byte stream.
///
/// Implemented for every [`Read`] so framing code can run against sockets and
/// in-memory streams alike.
pub trait ReceiveChunk {
    fn receive_chunk(&mut self, buf: &mut [u8]) -> Result<Received>;
}

/// One send attempt against a byte stream.
pub trait SendChunk {
    fn send_chunk(&mut self, buf: &[u8]) -> Result<Sent>;
}

impl<T: Read + ?Sized> ReceiveChunk for T {
    fn receive_chunk(&mut self, buf: &mut [u8]) -> Result<Received> {
        loop {
            match self.read(buf) {
                Ok(0) => return Ok(Received::PeerClosed),
                Ok(n) => return Ok(Received::Data(n)),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if is_timeout(&err) => return Ok(Received::TimedOut),
                Err(err) => return Err(TransportError::Io(err)),
            }
        }
    }
}

impl<T: Write + ?Sized> SendChunk for T {
    fn send_chunk(&mut self, buf: &[u8]) -> Result<Sent> {
        loop {
            match self.write(buf) {
                Ok(n) => return Ok(Sent::Data(n)),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if is_timeout(&err) => return Ok(Sent::TimedOut),
                Err(err) => return Err(TransportError::Io(err)),
            }
        }
    }
}

/// Socket timeouts surface as `WouldBlock` on Unix and `TimedOut` on Windows.
fn is_timeout(err: &std::io::Error) -> bool {
    matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut)
}
