use motionsdk_transport::TransportError;

/// Errors that can occur while framing or unframing messages.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// An outgoing message has no payload.
    #[error("communication protocol error, message is empty")]
    EmptyMessage,

    /// An outgoing message exceeds the protocol maximum.
    #[error("communication protocol error, message too long to send ({size} bytes, max {max})")]
    MessageTooLong { size: usize, max: usize },

    /// An incoming header specifies a length outside `1..=65535`.
    #[error("communication protocol error, message header specifies invalid length {length}")]
    InvalidLength { length: u32 },

    /// No complete message arrived before the receive timeout.
    ///
    /// Any partial bytes stay buffered; the call may be retried.
    #[error("timed out waiting for message")]
    TimedOut,

    /// A send stopped part way through a message.
    #[error("communication protocol error, failed to write complete message ({written} of {expected} bytes)")]
    Incomplete { written: usize, expected: usize },

    /// The peer closed the connection.
    #[error("connection closed by remote host")]
    ConnectionClosed,

    /// The underlying transport failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl FrameError {
    /// True if the operation may simply be retried on the same connection.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FrameError::TimedOut)
    }

    /// True if the stream can no longer be trusted and must be closed.
    pub fn is_fatal(&self) -> bool {
        !self.is_timeout()
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;
