//! Blocking client for the Motion Service streaming protocol.
//!
//! [`ProtocolClient`] owns one TCP connection to a data service. It reads the
//! service description at connect, intercepts in-stream XML messages and
//! hands binary data messages to the caller. Decode them with
//! `motionsdk-format`.
//!
//! ```no_run
//! use motionsdk_client::{ProtocolClient, Timeout};
//!
//! let mut client = ProtocolClient::connect("", 32079);
//! if client.wait_for_data(Timeout::Default).is_ok() {
//!     while let Ok(message) = client.read_data(Timeout::Default) {
//!         println!("{} bytes", message.len());
//!     }
//! }
//! if let Some(error) = client.error_string() {
//!     eprintln!("{error}");
//! }
//! ```

pub mod channel;
pub mod client;
pub mod config;
pub mod console;
pub mod error;
pub mod timeout;

pub use channel::MessageChannel;
pub use client::{is_xml, ProtocolClient, XML_MAGIC};
pub use config::{ClientConfig, DEFAULT_READ_TIMEOUT, DEFAULT_WAIT_TIMEOUT, DEFAULT_WRITE_TIMEOUT};
pub use console::{send_chunk, ConsoleReply, ResultCode, CONSOLE_PORT};
pub use error::{ClientError, ConsoleError, Result};
pub use timeout::Timeout;
