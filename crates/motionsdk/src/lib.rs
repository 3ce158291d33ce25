//! Client SDK for the Motion Service streaming protocol.
//!
//! The Motion Service publishes live motion capture data over TCP. Each data
//! service streams length-prefixed binary messages holding one frame of
//! samples for every connected device.
//!
//! # Crate Structure
//!
//! - [`transport`]: blocking TCP socket with timeout-aware chunk I/O
//! - [`frame`]: 4-byte big-endian length framing with spillover buffering
//! - [`client`]: connection lifecycle, XML interception and the Lua console
//! - [`format`]: decoders for the Configurable, Preview, Sensor and Raw formats
//!
//! ```no_run
//! use motionsdk::{format, ProtocolClient, Service, Timeout};
//!
//! let mut client = ProtocolClient::connect("", Service::Sensor.default_port());
//! client.wait_for_data(Timeout::Default)?;
//! let message = client.read_data(Timeout::Default)?;
//! for (key, element) in format::sensor(&message) {
//!     println!("{key}: {:?}", element.accelerometer());
//! }
//! # Ok::<(), motionsdk::client::ClientError>(())
//! ```

/// Re-export transport types.
pub mod transport {
    pub use motionsdk_transport::*;
}

/// Re-export framing types.
pub mod frame {
    pub use motionsdk_frame::*;
}

/// Re-export client types.
pub mod client {
    pub use motionsdk_client::*;
}

/// Re-export data format types.
pub mod format {
    pub use motionsdk_format::*;
}

pub use motionsdk_client::{ClientConfig, ProtocolClient, Timeout};
pub use motionsdk_format::Service;
