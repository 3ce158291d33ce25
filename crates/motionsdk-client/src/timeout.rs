use std::time::Duration;

/// Timeout argument for [`ProtocolClient`](crate::ProtocolClient) calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timeout {
    /// Use the per-operation default from [`ClientConfig`](crate::ClientConfig).
    #[default]
    Default,
    /// Block until the operation completes.
    Blocking,
    /// Give up after this long. A zero duration blocks.
    After(Duration),
}

impl Timeout {
    /// Whole seconds.
    pub fn seconds(secs: u64) -> Self {
        Timeout::After(Duration::from_secs(secs))
    }

    /// Socket option value for this timeout; `None` blocks.
    pub fn resolve(self, default: Duration) -> Option<Duration> {
        let duration = match self {
            Timeout::Default => default,
            Timeout::Blocking => return None,
            Timeout::After(duration) => duration,
        };
        (!duration.is_zero()).then_some(duration)
    }
}

/// Integer seconds: negative selects the default, zero blocks.
impl From<i32> for Timeout {
    fn from(secs: i32) -> Self {
        match u64::try_from(secs) {
            Err(_) => Timeout::Default,
            Ok(0) => Timeout::Blocking,
            Ok(secs) => Timeout::seconds(secs),
        }
    }
}

impl From<Duration> for Timeout {
    fn from(duration: Duration) -> Self {
        Timeout::After(duration)
    }
}

impl From<Option<Duration>> for Timeout {
    fn from(duration: Option<Duration>) -> Self {
        duration.map_or(Timeout::Default, Timeout::After)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT: Duration = Duration::from_secs(5);

    #[test]
    fn from_seconds() {
        assert_eq!(Timeout::from(-1), Timeout::Default);
        assert_eq!(Timeout::from(i32::MIN), Timeout::Default);
        assert_eq!(Timeout::from(0), Timeout::Blocking);
        assert_eq!(Timeout::from(3), Timeout::After(Duration::from_secs(3)));
    }

    #[test]
    fn resolves_against_default() {
        assert_eq!(Timeout::Default.resolve(DEFAULT), Some(DEFAULT));
        assert_eq!(Timeout::Blocking.resolve(DEFAULT), None);
        assert_eq!(Timeout::After(Duration::ZERO).resolve(DEFAULT), None);
        assert_eq!(
            Timeout::After(Duration::from_millis(250)).resolve(DEFAULT),
            Some(Duration::from_millis(250))
        );
    }

    #[test]
    fn zero_default_blocks() {
        assert_eq!(Timeout::Default.resolve(Duration::ZERO), None);
    }
}
