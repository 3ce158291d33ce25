use std::time::Duration;

/// Default receive timeout for [`wait_for_data`](crate::ProtocolClient::wait_for_data)
/// and the service description read at connect.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default receive timeout for [`read_data`](crate::ProtocolClient::read_data).
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Default send timeout for [`write_data`](crate::ProtocolClient::write_data).
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(1);

/// Per-connection client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub wait_timeout: Duration,
    pub read_timeout: Duration,
    pub write_timeout: Duration,
    /// Store in-stream XML messages instead of returning them as data.
    pub intercept_xml: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
            write_timeout: DEFAULT_WRITE_TIMEOUT,
            intercept_xml: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.wait_timeout, Duration::from_secs(5));
        assert_eq!(config.read_timeout, Duration::from_secs(1));
        assert_eq!(config.write_timeout, Duration::from_secs(1));
        assert!(config.intercept_xml);
    }

    #[test]
    fn struct_update() {
        let config = ClientConfig {
            intercept_xml: false,
            ..ClientConfig::default()
        };
        assert!(!config.intercept_xml);
        assert_eq!(config.read_timeout, DEFAULT_READ_TIMEOUT);
    }
}
