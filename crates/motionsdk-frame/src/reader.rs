use bytes::{Bytes, BytesMut};
use motionsdk_transport::{ReceiveChunk, Received};
use tracing::{debug, trace};

use crate::codec::{decode_message, HEADER_SIZE, MAX_MESSAGE_LEN};
use crate::error::{FrameError, Result};

/// Size of a single receive from the underlying stream.
pub const RECEIVE_CHUNK_SIZE: usize = 1024;

const INITIAL_BUFFER_CAPACITY: usize = HEADER_SIZE + MAX_MESSAGE_LEN;

/// Reads complete messages from any chunked byte stream.
///
/// Handles partial reads internally. Bytes received past the end of the
/// current message are kept and consumed first by the next call.
pub struct MessageReader<T> {
    inner: T,
    buf: BytesMut,
    chunk: Box<[u8]>,
}

impl<T: ReceiveChunk> MessageReader<T> {
    /// Create a new message reader.
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            chunk: vec![0u8; RECEIVE_CHUNK_SIZE].into_boxed_slice(),
        }
    }

    /// Read the next complete message (blocking up to the stream timeout).
    ///
    /// Returns [`FrameError::TimedOut`] with any partial bytes still buffered,
    /// [`FrameError::ConnectionClosed`] on a zero-byte read, and
    /// [`FrameError::InvalidLength`] for a header outside `1..=65535`.
    pub fn read_message(&mut self) -> Result<Bytes> {
        loop {
            match decode_message(&mut self.buf) {
                Ok(Some(message)) => {
                    if !self.buf.is_empty() {
                        trace!(spillover = self.buf.len(), "retaining bytes of next message");
                    }
                    return Ok(message);
                }
                Ok(None) => {}
                Err(err) => {
                    self.buf.clear();
                    return Err(err);
                }
            }

            match self.inner.receive_chunk(&mut self.chunk)? {
                Received::Data(n) => self.buf.extend_from_slice(&self.chunk[..n]),
                Received::TimedOut => {
                    debug!(buffered = self.buf.len(), "receive timed out");
                    return Err(FrameError::TimedOut);
                }
                Received::PeerClosed => {
                    debug!(buffered = self.buf.len(), "peer closed stream");
                    return Err(FrameError::ConnectionClosed);
                }
            }
        }
    }

    /// Number of bytes buffered towards the next message.
    pub fn spillover_len(&self) -> usize {
        self.buf.len()
    }

    /// Drop any buffered bytes.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T> std::fmt::Debug for MessageReader<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageReader")
            .field("buffered", &self.buf.len())
            .finish_non_exhaustive()
    }
}
