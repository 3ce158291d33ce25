use std::ops::Deref;

use crate::quaternion::quaternion_to_matrix;
use crate::sample::Sample;
use crate::service::Service;

/// How the decoder learns the array length of one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementLength {
    /// Every element carries exactly this many samples.
    Fixed(usize),
    /// Every element is preceded by its own little-endian `u32` length.
    Prefixed,
}

/// One device record: a key and a read-only array of samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Element<T> {
    key: u32,
    values: Vec<T>,
}

impl<T: Sample> Element<T> {
    /// Create an element from a key and its samples.
    pub fn new(key: u32, values: Vec<T>) -> Self {
        Self { key, values }
    }

    /// Device key, unique within one decoded message.
    pub fn key(&self) -> u32 {
        self.key
    }

    /// The full sample array.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the element carries no samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sample at `index`, if present.
    pub fn get(&self, index: usize) -> Option<T> {
        self.values.get(index).copied()
    }

    /// Copy `length` samples starting at `base`.
    ///
    /// Returns `length` zeros if the range runs past the end of the array.
    pub fn range(&self, base: usize, length: usize) -> Vec<T> {
        match base.checked_add(length) {
            Some(end) if end <= self.values.len() => self.values[base..end].to_vec(),
            _ => vec![T::default(); length],
        }
    }
}

/// Compile-time description of one service format.
pub trait ElementFormat: Sized {
    /// Sample type of the element array.
    type Value: Sample;

    /// Length rule for the element array.
    const LENGTH: ElementLength;

    /// Service this format belongs to.
    const SERVICE: Service;

    /// Wrap a decoded element.
    fn from_element(element: Element<Self::Value>) -> Self;

    /// The wrapped element.
    fn element(&self) -> &Element<Self::Value>;
}

macro_rules! element_format {
    ($(#[$meta:meta])* $name:ident, $value:ty, $length:expr, $service:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name(Element<$value>);

        impl $name {
            /// Create an element from a key and its samples.
            pub fn new(key: u32, values: Vec<$value>) -> Self {
                Self(Element::new(key, values))
            }
        }

        impl Deref for $name {
            type Target = Element<$value>;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl ElementFormat for $name {
            type Value = $value;
            const LENGTH: ElementLength = $length;
            const SERVICE: Service = $service;

            fn from_element(element: Element<$value>) -> Self {
                Self(element)
            }

            fn element(&self) -> &Element<$value> {
                &self.0
            }
        }
    };
}

element_format!(
    /// Configurable service element: the channels selected by the connection's
    /// channel request, in request order. Variable length.
    ConfigurableElement,
    f32,
    ElementLength::Prefixed,
    Service::Configurable
);

element_format!(
    /// Preview service element, 14 samples:
    /// `{Gqw, Gqx, Gqy, Gqz, Lqw, Lqx, Lqy, Lqz, rx, ry, rz, ax, ay, az}`.
    PreviewElement,
    f32,
    ElementLength::Fixed(PreviewElement::LEN),
    Service::Preview
);

element_format!(
    /// Sensor service element, 9 samples of calibrated signals:
    /// `{ax, ay, az, mx, my, mz, gx, gy, gz}`.
    SensorElement,
    f32,
    ElementLength::Fixed(SensorElement::LEN),
    Service::Sensor
);

element_format!(
    /// Raw service element, 9 unprocessed 12-bit samples widened to `i16`:
    /// `{ax, ay, az, mx, my, mz, gx, gy, gz}`.
    RawElement,
    i16,
    ElementLength::Fixed(RawElement::LEN),
    Service::Raw
);

impl PreviewElement {
    /// Two quaternions and two 3-axis channels.
    pub const LEN: usize = 2 * 4 + 2 * 3;

    /// Global (`local == false`) or local unit quaternion `{w, x, y, z}`.
    pub fn quaternion(&self, local: bool) -> Vec<f32> {
        self.range(if local { 4 } else { 0 }, 4)
    }

    /// Euler angles `{x, y, z}` in radians, `x-y-z` rotation order.
    pub fn euler(&self) -> Vec<f32> {
        self.range(8, 3)
    }

    /// Linear acceleration `{x, y, z}` in g.
    pub fn acceleration(&self) -> Vec<f32> {
        self.range(11, 3)
    }

    /// Row-major 4x4 rotation matrix of the global or local quaternion.
    pub fn matrix(&self, local: bool) -> [f32; 16] {
        quaternion_to_matrix(&self.quaternion(local))
    }
}

impl SensorElement {
    /// Three 3-axis channels.
    pub const LEN: usize = 3 * 3;

    /// Accelerometer `{x, y, z}` in g.
    pub fn accelerometer(&self) -> Vec<f32> {
        self.range(0, 3)
    }

    /// Magnetometer `{x, y, z}` in microtesla.
    pub fn magnetometer(&self) -> Vec<f32> {
        self.range(3, 3)
    }

    /// Gyroscope `{x, y, z}` in degrees/second.
    pub fn gyroscope(&self) -> Vec<f32> {
        self.range(6, 3)
    }
}

impl RawElement {
    /// Three 3-axis channels.
    pub const LEN: usize = 3 * 3;

    pub fn accelerometer(&self) -> Vec<i16> {
        self.range(0, 3)
    }

    pub fn magnetometer(&self) -> Vec<i16> {
        self.range(3, 3)
    }

    pub fn gyroscope(&self) -> Vec<i16> {
        self.range(6, 3)
    }
}

/// An element of any service format.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyElement {
    Configurable(ConfigurableElement),
    Preview(PreviewElement),
    Sensor(SensorElement),
    Raw(RawElement),
}

impl AnyElement {
    pub fn key(&self) -> u32 {
        match self {
            AnyElement::Configurable(e) => e.key(),
            AnyElement::Preview(e) => e.key(),
            AnyElement::Sensor(e) => e.key(),
            AnyElement::Raw(e) => e.key(),
        }
    }

    pub fn service(&self) -> Service {
        match self {
            AnyElement::Configurable(_) => Service::Configurable,
            AnyElement::Preview(_) => Service::Preview,
            AnyElement::Sensor(_) => Service::Sensor,
            AnyElement::Raw(_) => Service::Raw,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            AnyElement::Configurable(e) => e.len(),
            AnyElement::Preview(e) => e.len(),
            AnyElement::Sensor(e) => e.len(),
            AnyElement::Raw(e) => e.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All samples widened to `f64`.
    pub fn to_f64_values(&self) -> Vec<f64> {
        fn widen<T: Sample>(values: &[T]) -> Vec<f64> {
            values.iter().map(|v| v.to_f64()).collect()
        }

        match self {
            AnyElement::Configurable(e) => widen(e.values()),
            AnyElement::Preview(e) => widen(e.values()),
            AnyElement::Sensor(e) => widen(e.values()),
            AnyElement::Raw(e) => widen(e.values()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quaternion::IDENTITY;

    fn preview() -> PreviewElement {
        PreviewElement::new(1, (0..14).map(|v| v as f32).collect())
    }

    #[test]
    fn range_within_bounds() {
        let element = Element::new(3, vec![1.0f32, 2.0, 3.0, 4.0]);
        assert_eq!(element.range(1, 2), vec![2.0, 3.0]);
        assert_eq!(element.range(0, 4), vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(element.range(4, 0), Vec::<f32>::new());
    }

    #[test]
    fn range_past_end_is_zero_filled() {
        let element = Element::new(3, vec![1i16, 2, 3]);
        assert_eq!(element.range(2, 2), vec![0, 0]);
        assert_eq!(element.range(7, 5), vec![0; 5]);
        assert_eq!(element.range(usize::MAX, 2), vec![0, 0]);
    }

    #[test]
    fn indexed_access() {
        let element = ConfigurableElement::new(9, vec![0.5, 1.5]);
        assert_eq!(element.key(), 9);
        assert_eq!(element.len(), 2);
        assert_eq!(element.get(1), Some(1.5));
        assert_eq!(element.get(2), None);
        assert_eq!(element.values(), &[0.5, 1.5]);
    }

    #[test]
    fn preview_named_ranges() {
        let element = preview();
        assert_eq!(element.quaternion(false), vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(element.quaternion(true), vec![4.0, 5.0, 6.0, 7.0]);
        assert_eq!(element.euler(), vec![8.0, 9.0, 10.0]);
        assert_eq!(element.acceleration(), vec![11.0, 12.0, 13.0]);
    }

    #[test]
    fn preview_matrix_of_identity_quaternion() {
        let element = PreviewElement::new(
            1,
            vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        );
        assert_eq!(element.matrix(false), IDENTITY);
        assert_eq!(element.matrix(true), IDENTITY);
    }

    #[test]
    fn short_preview_yields_zeros() {
        let element = PreviewElement::new(1, vec![1.0; 6]);
        assert_eq!(element.euler(), vec![0.0; 3]);
        assert_eq!(element.quaternion(true), vec![0.0; 4]);
        assert_eq!(element.matrix(true), IDENTITY);
    }

    #[test]
    fn sensor_and_raw_named_ranges() {
        let sensor = SensorElement::new(2, (0..9).map(|v| v as f32).collect());
        assert_eq!(sensor.accelerometer(), vec![0.0, 1.0, 2.0]);
        assert_eq!(sensor.magnetometer(), vec![3.0, 4.0, 5.0]);
        assert_eq!(sensor.gyroscope(), vec![6.0, 7.0, 8.0]);

        let raw = RawElement::new(2, (0..9).collect());
        assert_eq!(raw.accelerometer(), vec![0, 1, 2]);
        assert_eq!(raw.magnetometer(), vec![3, 4, 5]);
        assert_eq!(raw.gyroscope(), vec![6, 7, 8]);
    }

    #[test]
    fn any_element_dispatch() {
        let any = AnyElement::Raw(RawElement::new(4, vec![-1, 2, 3]));
        assert_eq!(any.key(), 4);
        assert_eq!(any.service(), Service::Raw);
        assert_eq!(any.len(), 3);
        assert_eq!(any.to_f64_values(), vec![-1.0, 2.0, 3.0]);
    }

    #[test]
    fn format_descriptors() {
        assert_eq!(ConfigurableElement::LENGTH, ElementLength::Prefixed);
        assert_eq!(PreviewElement::LENGTH, ElementLength::Fixed(14));
        assert_eq!(SensorElement::LENGTH, ElementLength::Fixed(9));
        assert_eq!(RawElement::LENGTH, ElementLength::Fixed(9));
    }
}
