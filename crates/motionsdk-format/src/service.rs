use std::fmt;
use std::str::FromStr;

/// The Motion Service data streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Configurable,
    Preview,
    Sensor,
    Raw,
}

impl Service {
    pub const ALL: [Service; 4] = [
        Service::Configurable,
        Service::Preview,
        Service::Sensor,
        Service::Raw,
    ];

    /// Human-readable format name.
    pub fn name(self) -> &'static str {
        match self {
            Service::Configurable => "Configurable",
            Service::Preview => "Preview",
            Service::Sensor => "Sensor",
            Service::Raw => "Raw",
        }
    }

    /// Port the Motion Service listens on for this stream by default.
    pub fn default_port(self) -> u16 {
        match self {
            Service::Configurable => 32076,
            Service::Raw => 32077,
            Service::Sensor => 32078,
            Service::Preview => 32079,
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Service {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Service::ALL
            .into_iter()
            .find(|service| service.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown service {s:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("preview".parse::<Service>(), Ok(Service::Preview));
        assert_eq!("RAW".parse::<Service>(), Ok(Service::Raw));
        assert!("console".parse::<Service>().is_err());
    }

    #[test]
    fn default_ports_are_distinct() {
        let mut ports: Vec<u16> = Service::ALL.iter().map(|s| s.default_port()).collect();
        ports.sort_unstable();
        ports.dedup();
        assert_eq!(ports.len(), 4);
    }
}
