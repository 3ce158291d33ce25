/// Reasons a data message was rejected by the decoder.
///
/// The public decode functions turn these into an empty result; the `try_*`
/// variants return them for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The message ended inside a key, length field or sample array.
    #[error("truncated element at byte {offset}: need {needed} bytes, {remaining} remain")]
    Truncated {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    /// Two elements in one message share a key.
    #[error("duplicate element key {0}")]
    DuplicateKey(u32),
}

/// Errors building a Configurable channel request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// Channel names are bare XML element names.
    #[error("invalid channel name {0:?}")]
    InvalidChannelName(String),

    /// A request must select at least one channel.
    #[error("channel request is empty")]
    Empty,
}
