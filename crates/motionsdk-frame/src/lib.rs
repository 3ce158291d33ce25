//! Length-prefixed message framing for the Motion Service protocol.
//!
//! Every message on the wire, in both directions, is:
//! - a 4-byte big-endian payload length `L`, with `1 <= L <= 65535`
//! - `L` bytes of payload
//!
//! [`MessageReader`] reassembles messages across partial socket reads and
//! keeps bytes that belong to the next message for the following call.

pub mod codec;
pub mod error;
pub mod reader;
pub mod writer;

pub use codec::{decode_message, encode_message, HEADER_SIZE, MAX_MESSAGE_LEN};
pub use error::{FrameError, Result};
pub use reader::{MessageReader, RECEIVE_CHUNK_SIZE};
pub use writer::MessageWriter;
