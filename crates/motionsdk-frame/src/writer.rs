use bytes::BytesMut;
use motionsdk_transport::{SendChunk, Sent};
use tracing::debug;

use crate::codec::{encode_message, HEADER_SIZE, MAX_MESSAGE_LEN};
use crate::error::{FrameError, Result};

/// Writes complete messages to any chunked byte stream.
pub struct MessageWriter<T> {
    inner: T,
    buf: BytesMut,
}

impl<T: SendChunk> MessageWriter<T> {
    /// Create a new message writer.
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(HEADER_SIZE + MAX_MESSAGE_LEN),
        }
    }

    /// Frame and send one message (blocking up to the stream timeout).
    ///
    /// A timeout after part of the message went out leaves the stream
    /// desynchronized, so it is reported as [`FrameError::Incomplete`].
    pub fn write_message(&mut self, payload: &[u8]) -> Result<()> {
        self.buf.clear();
        encode_message(payload, &mut self.buf)?;

        let expected = self.buf.len();
        let mut written = 0usize;
        while written < expected {
            match self.inner.send_chunk(&self.buf[written..])? {
                Sent::Data(0) => return Err(FrameError::ConnectionClosed),
                Sent::Data(n) => written += n,
                Sent::TimedOut if written == 0 => {
                    debug!(expected, "send timed out");
                    return Err(FrameError::TimedOut);
                }
                Sent::TimedOut => return Err(FrameError::Incomplete { written, expected }),
            }
        }

        Ok(())
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T> std::fmt::Debug for MessageWriter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageWriter").finish_non_exhaustive()
    }
}
