//! Binary decoders for the Motion Service data formats.
//!
//! A data message is a packed list of per-device elements. Each element is a
//! little-endian `u32` key followed by an array of little-endian samples. The
//! Configurable format prefixes every array with its own `u32` length; the
//! Preview, Sensor and Raw formats use a fixed length per element.
//!
//! Decoding is all-or-nothing: a truncated message, leftover bytes or (for
//! maps) a repeated key yields an empty result.
//!
//! ```
//! use motionsdk_format::{decode_map, SensorElement};
//!
//! let mut message = Vec::new();
//! message.extend_from_slice(&7u32.to_le_bytes());
//! for value in [0.0f32, 0.0, 1.0, 20.0, 0.0, 40.0, 0.5, 0.0, 0.0] {
//!     message.extend_from_slice(&value.to_le_bytes());
//! }
//!
//! let frame = decode_map::<SensorElement>(&message);
//! assert_eq!(frame[&7].accelerometer(), vec![0.0, 0.0, 1.0]);
//! ```

pub mod decode;
pub mod element;
pub mod error;
pub mod name_map;
pub mod quaternion;
pub mod request;
pub mod sample;
pub mod service;

pub use decode::{
    configurable, decode_any, decode_list, decode_map, preview, raw, sensor, to_map,
    try_decode_list, try_to_map,
};
pub use element::{
    AnyElement, ConfigurableElement, Element, ElementFormat, ElementLength, PreviewElement,
    RawElement, SensorElement,
};
pub use error::{DecodeError, RequestError};
pub use name_map::parse_name_map;
pub use quaternion::{quaternion_to_matrix, IDENTITY};
pub use request::ChannelRequest;
pub use sample::Sample;
pub use service::Service;
