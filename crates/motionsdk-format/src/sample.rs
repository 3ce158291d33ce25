use bytes::Buf;

/// A numeric sample type carried in element arrays.
///
/// Samples are little-endian on the wire; [`Sample::read_le`] converts to the
/// host byte order.
pub trait Sample: Copy + Default + PartialEq + std::fmt::Debug + Send + Sync + 'static {
    /// Encoded size in bytes.
    const SIZE: usize;

    /// Read one little-endian sample from the front of `src`.
    ///
    /// Callers guarantee `src.remaining() >= Self::SIZE`.
    fn read_le<B: Buf>(src: &mut B) -> Self;

    /// Widen to `f64` for display and export.
    fn to_f64(self) -> f64;
}

impl Sample for f32 {
    const SIZE: usize = 4;

    fn read_le<B: Buf>(src: &mut B) -> Self {
        src.get_f32_le()
    }

    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

impl Sample for i16 {
    const SIZE: usize = 2;

    fn read_le<B: Buf>(src: &mut B) -> Self {
        src.get_i16_le()
    }

    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian() {
        let bytes = [0x00, 0x00, 0x80, 0x3F, 0xFE, 0xFF];
        let mut src = &bytes[..];
        assert_eq!(f32::read_le(&mut src), 1.0);
        assert_eq!(i16::read_le(&mut src), -2);
        assert!(src.is_empty());
    }
}
