use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use bytes::Buf;
use tracing::debug;

use crate::element::{
    AnyElement, ConfigurableElement, Element, ElementFormat, ElementLength, PreviewElement,
    RawElement, SensorElement,
};
use crate::error::DecodeError;
use crate::sample::Sample;
use crate::service::Service;

const KEY_SIZE: usize = 4;
const LENGTH_SIZE: usize = 4;

/// Decode a data message into an ordered list of elements.
///
/// Each element is `[u32 LE key]` followed, for prefixed formats, by
/// `[u32 LE length]`, then `length` little-endian samples. A length of zero is
/// a "no data this frame" marker and produces no element. Any truncation
/// fails the whole message, including elements parsed before it.
pub fn try_decode_list<E: ElementFormat>(message: &[u8]) -> Result<Vec<E>, DecodeError> {
    let mut src = message;
    let mut list = Vec::new();

    while src.has_remaining() {
        let offset = message.len() - src.remaining();
        ensure(src, offset, KEY_SIZE)?;
        let key = src.get_u32_le();

        let length = match E::LENGTH {
            ElementLength::Fixed(length) => length,
            ElementLength::Prefixed => {
                ensure(src, offset + KEY_SIZE, LENGTH_SIZE)?;
                src.get_u32_le() as usize
            }
        };

        if length == 0 {
            continue;
        }

        let needed = length.saturating_mul(<E::Value as Sample>::SIZE);
        ensure(src, message.len() - src.remaining(), needed)?;

        let values = (0..length).map(|_| <E::Value as Sample>::read_le(&mut src)).collect();
        list.push(E::from_element(Element::new(key, values)));
    }

    Ok(list)
}

fn ensure(src: &[u8], offset: usize, needed: usize) -> Result<(), DecodeError> {
    if src.remaining() < needed {
        return Err(DecodeError::Truncated {
            offset,
            needed,
            remaining: src.remaining(),
        });
    }
    Ok(())
}

/// Decode a data message into an ordered list, or an empty list if the
/// message is malformed.
pub fn decode_list<E: ElementFormat>(message: &[u8]) -> Vec<E> {
    try_decode_list(message).unwrap_or_else(|err| {
        debug!(format = E::SERVICE.name(), error = %err, "discarding malformed message");
        Vec::new()
    })
}

/// Key a list of elements. The first repeated key fails the whole list.
pub fn try_to_map<E: ElementFormat>(list: Vec<E>) -> Result<BTreeMap<u32, E>, DecodeError> {
    let mut map = BTreeMap::new();
    for item in list {
        match map.entry(item.element().key()) {
            Entry::Vacant(slot) => {
                slot.insert(item);
            }
            Entry::Occupied(slot) => return Err(DecodeError::DuplicateKey(*slot.key())),
        }
    }
    Ok(map)
}

/// Key a list of elements, or return an empty map on a repeated key.
pub fn to_map<E: ElementFormat>(list: Vec<E>) -> BTreeMap<u32, E> {
    try_to_map(list).unwrap_or_else(|err| {
        debug!(format = E::SERVICE.name(), error = %err, "discarding message");
        BTreeMap::new()
    })
}

/// Decode a data message straight into a keyed map.
pub fn decode_map<E: ElementFormat>(message: &[u8]) -> BTreeMap<u32, E> {
    to_map(decode_list(message))
}

/// Decode a Configurable service message.
pub fn configurable(message: &[u8]) -> BTreeMap<u32, ConfigurableElement> {
    decode_map(message)
}

/// Decode a Preview service message.
pub fn preview(message: &[u8]) -> BTreeMap<u32, PreviewElement> {
    decode_map(message)
}

/// Decode a Sensor service message.
pub fn sensor(message: &[u8]) -> BTreeMap<u32, SensorElement> {
    decode_map(message)
}

/// Decode a Raw service message.
pub fn raw(message: &[u8]) -> BTreeMap<u32, RawElement> {
    decode_map(message)
}

/// Decode a message of a format chosen at runtime, keeping message order.
pub fn decode_any(service: Service, message: &[u8]) -> Vec<AnyElement> {
    fn wrap<E: ElementFormat>(message: &[u8], f: fn(E) -> AnyElement) -> Vec<AnyElement> {
        decode_list::<E>(message).into_iter().map(f).collect()
    }

    match service {
        Service::Configurable => wrap(message, AnyElement::Configurable),
        Service::Preview => wrap(message, AnyElement::Preview),
        Service::Sensor => wrap(message, AnyElement::Sensor),
        Service::Raw => wrap(message, AnyElement::Raw),
    }
}
