use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{FrameError, Result};

/// Message header: big-endian payload length (4 bytes).
pub const HEADER_SIZE: usize = 4;

/// Largest payload a single message may carry.
pub const MAX_MESSAGE_LEN: usize = 65535;

/// Encode one message into the wire format.
///
/// ```text
/// ┌─────────────────┬──────────────────┐
/// │ Length (4B BE)  │ Payload          │
/// │ 1..=65535       │ (Length bytes)   │
/// └─────────────────┴──────────────────┘
/// ```
pub fn encode_message(payload: &[u8], dst: &mut BytesMut) -> Result<()> {
    if payload.is_empty() {
        return Err(FrameError::EmptyMessage);
    }
    if payload.len() > MAX_MESSAGE_LEN {
        return Err(FrameError::MessageTooLong {
            size: payload.len(),
            max: MAX_MESSAGE_LEN,
        });
    }
    dst.reserve(HEADER_SIZE + payload.len());
    dst.put_u32(payload.len() as u32);
    dst.put_slice(payload);
    Ok(())
}

/// Decode one message from the front of `src`.
///
/// Returns `Ok(None)` if `src` doesn't hold a complete message yet. On success
/// the header and payload are consumed and any trailing bytes stay in `src`.
pub fn decode_message(src: &mut BytesMut) -> Result<Option<Bytes>> {
    if src.len() < HEADER_SIZE {
        return Ok(None);
    }

    let length = u32::from_be_bytes([src[0], src[1], src[2], src[3]]);
    if length == 0 || length as usize > MAX_MESSAGE_LEN {
        return Err(FrameError::InvalidLength { length });
    }

    let total = HEADER_SIZE + length as usize;
    if src.len() < total {
        return Ok(None);
    }

    src.advance(HEADER_SIZE);
    Ok(Some(src.split_to(length as usize).freeze()))
}
