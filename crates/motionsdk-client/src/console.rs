//! Lua console overlay for the Motion Service console port.
//!
//! A request is a Lua chunk. The reply's first byte is a [`ResultCode`]; the
//! rest is whatever the chunk printed.

use std::fmt;

use tracing::debug;

use crate::channel::MessageChannel;
use crate::error::ConsoleError;
use crate::timeout::Timeout;

/// Default port of the console service.
pub const CONSOLE_PORT: u16 = 32075;

/// Outcome of running one chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ResultCode {
    /// The chunk ran; the output holds anything it printed.
    Success = 0,
    /// Compile or runtime error; the output holds the error description.
    Failure = 1,
    /// The chunk is incomplete and the service is waiting for the rest.
    Continue = 2,
}

impl TryFrom<u8> for ResultCode {
    type Error = ConsoleError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ResultCode::Success),
            1 => Ok(ResultCode::Failure),
            2 => Ok(ResultCode::Continue),
            other => Err(ConsoleError::UnknownCode(other)),
        }
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResultCode::Success => "success",
            ResultCode::Failure => "failure",
            ResultCode::Continue => "continue",
        })
    }
}

/// Parsed console reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleReply {
    pub code: ResultCode,
    pub output: String,
}

impl ConsoleReply {
    /// Split a raw reply into its result code and printed output.
    pub fn parse(reply: &[u8]) -> Result<Self, ConsoleError> {
        let (&code, output) = reply.split_first().ok_or(ConsoleError::EmptyReply)?;
        Ok(Self {
            code: ResultCode::try_from(code)?,
            output: String::from_utf8_lossy(output).into_owned(),
        })
    }
}

/// Run one Lua chunk on the console service and return its reply.
pub fn send_chunk<C>(channel: &mut C, chunk: &str, timeout: Timeout) -> Result<ConsoleReply, ConsoleError>
where
    C: MessageChannel + ?Sized,
{
    channel
        .write_message(chunk.as_bytes(), timeout)
        .map_err(ConsoleError::Write)?;
    let reply = channel.read_message(timeout).map_err(ConsoleError::Read)?;
    let reply = ConsoleReply::parse(&reply)?;
    debug!(code = %reply.code, len = reply.output.len(), "console reply");
    Ok(reply)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use bytes::Bytes;

    use super::*;
    use crate::error::{ClientError, Result};

    #[derive(Default)]
    struct Canned {
        sent: Vec<Vec<u8>>,
        replies: VecDeque<Result<Bytes>>,
        refuse_writes: bool,
    }

    impl MessageChannel for Canned {
        fn write_message(&mut self, message: &[u8], _timeout: Timeout) -> Result<()> {
            if self.refuse_writes {
                return Err(ClientError::NotConnected);
            }
            self.sent.push(message.to_vec());
            Ok(())
        }

        fn read_message(&mut self, _timeout: Timeout) -> Result<Bytes> {
            self.replies.pop_front().unwrap_or(Err(ClientError::Timeout))
        }
    }

    fn replying(reply: &'static [u8]) -> Canned {
        Canned {
            replies: VecDeque::from([Ok(Bytes::from_static(reply))]),
            ..Canned::default()
        }
    }

    #[test]
    fn success_with_output() {
        let mut channel = replying(b"\0Hello World\n");
        let reply = send_chunk(&mut channel, "print('Hello World')", Timeout::Default).unwrap();
        assert_eq!(reply.code, ResultCode::Success);
        assert_eq!(reply.output, "Hello World\n");
        assert_eq!(channel.sent, vec![b"print('Hello World')".to_vec()]);
    }

    #[test]
    fn failure_and_continue() {
        let reply = send_chunk(&mut replying(b"\x01bad"), "x(", Timeout::Default).unwrap();
        assert_eq!(reply.code, ResultCode::Failure);
        assert_eq!(reply.output, "bad");

        let reply = send_chunk(&mut replying(b"\x02"), "if x then", Timeout::Default).unwrap();
        assert_eq!(reply.code, ResultCode::Continue);
        assert_eq!(reply.output, "");
    }

    #[test]
    fn unknown_code() {
        let err = send_chunk(&mut replying(b"\x03oops"), "x", Timeout::Default).unwrap_err();
        assert!(matches!(err, ConsoleError::UnknownCode(3)));
    }

    #[test]
    fn empty_reply() {
        let err = send_chunk(&mut replying(b""), "x", Timeout::Default).unwrap_err();
        assert!(matches!(err, ConsoleError::EmptyReply));
    }

    #[test]
    fn write_and_read_failures() {
        let mut channel = Canned {
            refuse_writes: true,
            ..Canned::default()
        };
        let err = send_chunk(&mut channel, "x", Timeout::Default).unwrap_err();
        assert!(matches!(err, ConsoleError::Write(ClientError::NotConnected)));

        let err = send_chunk(&mut Canned::default(), "x", Timeout::Default).unwrap_err();
        assert!(matches!(err, ConsoleError::Read(ClientError::Timeout)));
    }

    #[test]
    fn lossy_output() {
        let reply = ConsoleReply::parse(b"\0caf\xe9").unwrap();
        assert_eq!(reply.output, "caf\u{fffd}");
    }
}
