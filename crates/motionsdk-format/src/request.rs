use std::str::FromStr;

use crate::error::RequestError;

const XML_DECLARATION: &str = "<?xml version=\"1.0\"?>";

/// Channel selection sent to the Configurable service after connecting.
///
/// ```
/// use motionsdk_format::ChannelRequest;
///
/// let request = ChannelRequest::new()
///     .channel("Lq")?
///     .channel("c")?
///     .inactive(true);
/// assert_eq!(
///     request.to_xml()?,
///     r#"<?xml version="1.0"?><configurable inactive="1"><Lq/><c/></configurable>"#
/// );
/// # Ok::<(), motionsdk_format::RequestError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelRequest {
    channels: Vec<String>,
    inactive: bool,
}

impl ChannelRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a channel, for example `Lq` (local quaternion) or `c`
    /// (positional constraint). Each element carries the selected channels in
    /// request order.
    pub fn channel(mut self, name: &str) -> Result<Self, RequestError> {
        if !is_channel_name(name) {
            return Err(RequestError::InvalidChannelName(name.to_string()));
        }
        self.channels.push(name.to_string());
        Ok(self)
    }

    /// Also stream nodes that are animated but not attached to a sensor.
    pub fn inactive(mut self, inactive: bool) -> Self {
        self.inactive = inactive;
        self
    }

    pub fn channels(&self) -> &[String] {
        &self.channels
    }

    /// Render the request message.
    pub fn to_xml(&self) -> Result<String, RequestError> {
        if self.channels.is_empty() {
            return Err(RequestError::Empty);
        }

        let mut xml = String::from(XML_DECLARATION);
        xml.push_str(if self.inactive {
            "<configurable inactive=\"1\">"
        } else {
            "<configurable>"
        });
        for channel in &self.channels {
            xml.push('<');
            xml.push_str(channel);
            xml.push_str("/>");
        }
        xml.push_str("</configurable>");
        Ok(xml)
    }
}

/// Parse a comma separated channel list such as `Lq,c`.
impl FromStr for ChannelRequest {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let request = s
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .try_fold(ChannelRequest::new(), |request, name| request.channel(name))?;
        if request.channels.is_empty() {
            return Err(RequestError::Empty);
        }
        Ok(request)
    }
}

fn is_channel_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
