use std::fmt;
use std::io;

use motionsdk_client::{ClientError, ConsoleError};

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
/// Console chunk is incomplete.
pub const CONTINUE: i32 = 2;
pub const TRANSPORT_ERROR: i32 = 3;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TIMEOUT,
        io::ErrorKind::BrokenPipe => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn client_error(context: &str, err: ClientError) -> CliError {
    let code = match &err {
        ClientError::Timeout => TIMEOUT,
        ClientError::Connection(_) | ClientError::Io(_) => TRANSPORT_ERROR,
        ClientError::Protocol(_) | ClientError::Validation(_) => DATA_INVALID,
        ClientError::PeerClosed | ClientError::NotConnected => FAILURE,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn console_error(err: ConsoleError) -> CliError {
    match err {
        ConsoleError::Write(err) => client_error("failed to write Lua chunk", err),
        ConsoleError::Read(err) => client_error("failed to read console reply", err),
        other => CliError::new(DATA_INVALID, other.to_string()),
    }
}
