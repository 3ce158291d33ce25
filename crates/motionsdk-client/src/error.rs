use motionsdk_frame::FrameError;
use motionsdk_transport::TransportError;

/// Errors reported by [`ProtocolClient`](crate::ProtocolClient) operations.
///
/// Every variant except [`ClientError::Timeout`] and
/// [`ClientError::NotConnected`] closes the connection.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The connection could not be established.
    #[error(transparent)]
    Connection(TransportError),

    /// The peer violated the framing protocol, or a send stopped part way.
    #[error(transparent)]
    Protocol(FrameError),

    /// No complete message within the receive or send timeout.
    #[error("timed out waiting for message")]
    Timeout,

    /// An outgoing message is empty or too long.
    #[error(transparent)]
    Validation(FrameError),

    /// The peer closed the connection.
    #[error("connection closed by remote host")]
    PeerClosed,

    /// A socket operation failed.
    #[error(transparent)]
    Io(TransportError),

    /// The client has no open connection.
    #[error("client is not connected")]
    NotConnected,
}

impl ClientError {
    /// True if the call may be retried on the same connection.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Timeout)
    }

    /// True if this error ends the session.
    pub fn closes_connection(&self) -> bool {
        !matches!(self, ClientError::Timeout | ClientError::NotConnected)
    }
}

impl From<FrameError> for ClientError {
    fn from(err: FrameError) -> Self {
        match err {
            FrameError::TimedOut => ClientError::Timeout,
            FrameError::ConnectionClosed => ClientError::PeerClosed,
            FrameError::EmptyMessage | FrameError::MessageTooLong { .. } => {
                ClientError::Validation(err)
            }
            FrameError::InvalidLength { .. } | FrameError::Incomplete { .. } => {
                ClientError::Protocol(err)
            }
            FrameError::Transport(err) => ClientError::Io(err),
        }
    }
}

impl From<TransportError> for ClientError {
    fn from(err: TransportError) -> Self {
        ClientError::Io(err)
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors from [`send_chunk`](crate::console::send_chunk).
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("failed to write Lua chunk to Console service: {0}")]
    Write(#[source] ClientError),

    #[error("failed to read response from Console service: {0}")]
    Read(#[source] ClientError),

    #[error("failed to read response from Console service: reply is empty")]
    EmptyReply,

    #[error("unknown result code {0} from Console service")]
    UnknownCode(u8),
}
