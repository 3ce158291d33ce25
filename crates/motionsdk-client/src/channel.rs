use bytes::Bytes;

use crate::client::ProtocolClient;
use crate::error::Result;
use crate::timeout::Timeout;

/// A request/reply message stream.
///
/// The console overlay is written against this trait so it can run over any
/// connection, not only [`ProtocolClient`].
pub trait MessageChannel {
    /// Send one message.
    fn write_message(&mut self, message: &[u8], timeout: Timeout) -> Result<()>;

    /// Receive the next data message.
    fn read_message(&mut self, timeout: Timeout) -> Result<Bytes>;
}

impl MessageChannel for ProtocolClient {
    fn write_message(&mut self, message: &[u8], timeout: Timeout) -> Result<()> {
        self.write_data(message, timeout)
    }

    fn read_message(&mut self, timeout: Timeout) -> Result<Bytes> {
        self.read_data(timeout)
    }
}
