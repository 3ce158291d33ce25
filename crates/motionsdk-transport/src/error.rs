/// Errors that can occur in transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The host/port pair could not be resolved to a socket address.
    #[error("failed to resolve {host}:{port}: {source}")]
    Resolve {
        host: String,
        port: u16,
        source: std::io::Error,
    },

    /// The remote host actively refused the connection.
    #[error("connection refused by remote host {host}:{port}")]
    ConnectionRefused { host: String, port: u16 },

    /// Failed to connect for any other reason.
    #[error("failed to connect to remote host {host}:{port}: {source}")]
    Connect {
        host: String,
        port: u16,
        source: std::io::Error,
    },

    /// A socket option could not be applied.
    #[error("failed to set socket option {option}: {source}")]
    SocketOption {
        option: &'static str,
        source: std::io::Error,
    },

    /// An I/O error occurred on the transport stream.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TransportError {
    /// True for the "connection refused" category of connect failures.
    pub fn is_refused(&self) -> bool {
        matches!(self, TransportError::ConnectionRefused { .. })
    }
}

pub type Result<T> = std::result::Result<T, TransportError>;
