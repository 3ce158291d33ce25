use std::time::Duration;

use bytes::Bytes;
use motionsdk_frame::{MessageReader, MessageWriter};
use motionsdk_transport::TcpTransport;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::timeout::Timeout;

/// In-stream XML messages start with these bytes.
pub const XML_MAGIC: &[u8] = b"<?xml";

/// True if `message` is an XML document rather than binary sample data.
pub fn is_xml(message: &[u8]) -> bool {
    message.starts_with(XML_MAGIC)
}

/// Blocking connection to one Motion Service data stream.
///
/// Construction never fails: a client whose connect failed is simply
/// disconnected, with the reason available from [`error_string`]. Any error
/// other than a timeout closes the connection; there is no reconnect on the
/// same instance.
///
/// [`error_string`]: ProtocolClient::error_string
#[derive(Debug)]
pub struct ProtocolClient {
    session: Option<Session>,
    config: ClientConfig,
    xml: String,
    last_error: String,
}

#[derive(Debug)]
struct Session {
    reader: MessageReader<TcpTransport>,
    writer: MessageWriter<TcpTransport>,
    description: String,
    receive_timeout: Option<Duration>,
    send_timeout: Option<Duration>,
}

impl ProtocolClient {
    /// Connect with default timeouts. An empty `host` means the local machine.
    pub fn connect(host: &str, port: u16) -> Self {
        Self::connect_with_config(host, port, ClientConfig::default())
    }

    /// Connect, then read the service description sent by the peer.
    pub fn connect_with_config(host: &str, port: u16, config: ClientConfig) -> Self {
        let mut client = Self {
            session: None,
            config,
            xml: String::new(),
            last_error: String::new(),
        };

        match Session::open(host, port) {
            Ok(session) => {
                info!(host, port, "service session open");
                client.session = Some(session);
                client.read_description();
            }
            Err(err) => {
                let _ = client.fail(err);
            }
        }

        client
    }

    fn read_description(&mut self) {
        let wait = Timeout::Default.resolve(self.config.wait_timeout);
        let Some(session) = self.session.as_mut() else {
            return;
        };

        match session.receive(wait) {
            Ok(message) => {
                session.description = String::from_utf8_lossy(&message).into_owned();
                debug!(description = %session.description, "service description");
            }
            Err(ClientError::Timeout) => {
                debug!("no service description before timeout");
            }
            Err(err) => {
                let _ = self.fail(err);
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    /// Wait for the stream to become active by reading one message.
    ///
    /// An XML message is stored as the latest [`xml_string`]; any other
    /// payload is discarded.
    ///
    /// [`xml_string`]: ProtocolClient::xml_string
    pub fn wait_for_data(&mut self, timeout: Timeout) -> Result<()> {
        let wait = timeout.resolve(self.config.wait_timeout);
        let intercept = self.config.intercept_xml;
        let (session, xml) = self.session_mut()?;
        let result = session.wait(wait, intercept.then_some(xml));
        result.map_err(|err| self.fail(err))
    }

    /// Read the next data message.
    ///
    /// One XML message in front of it is stored as the latest
    /// [`xml_string`] and skipped.
    ///
    /// [`xml_string`]: ProtocolClient::xml_string
    pub fn read_data(&mut self, timeout: Timeout) -> Result<Bytes> {
        let wait = timeout.resolve(self.config.read_timeout);
        let intercept = self.config.intercept_xml;
        let (session, xml) = self.session_mut()?;
        let result = session.read(wait, intercept.then_some(xml));
        result.map_err(|err| self.fail(err))
    }

    /// Send one message. Empty or oversized messages close the connection.
    pub fn write_data(&mut self, message: &[u8], timeout: Timeout) -> Result<()> {
        let wait = timeout.resolve(self.config.write_timeout);
        let (session, _) = self.session_mut()?;
        let result = session.send(message, wait);
        result.map_err(|err| self.fail(err))
    }

    /// Close the connection. Fails if it is already closed.
    pub fn close(&mut self) -> Result<()> {
        match self.session.take() {
            Some(session) => {
                info!(peer = %session.peer_addr(), "closing connection");
                session.shutdown();
                Ok(())
            }
            None => Err(self.fail(ClientError::NotConnected)),
        }
    }

    /// The most recent in-stream XML message. Kept after the connection
    /// closes.
    pub fn xml_string(&self) -> Option<&str> {
        Some(self.xml.as_str()).filter(|xml| !xml.is_empty())
    }

    /// The most recent failure. Kept after the connection closes.
    pub fn error_string(&self) -> Option<&str> {
        Some(self.last_error.as_str()).filter(|error| !error.is_empty())
    }

    /// The first message the service sent after connecting.
    pub fn description(&self) -> Option<&str> {
        self.session
            .as_ref()
            .map(|session| session.description.as_str())
            .filter(|description| !description.is_empty())
    }

    /// Host and port of the open connection.
    pub fn peer(&self) -> Option<(&str, u16)> {
        self.session.as_ref().map(|session| {
            let transport = session.reader.get_ref();
            (transport.host(), transport.port())
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn session_mut(&mut self) -> Result<(&mut Session, &mut String)> {
        match self.session.as_mut() {
            Some(session) => Ok((session, &mut self.xml)),
            None => {
                self.last_error = ClientError::NotConnected.to_string();
                Err(ClientError::NotConnected)
            }
        }
    }

    /// Record `err` and close the session if the stream is no longer usable.
    fn fail(&mut self, err: ClientError) -> ClientError {
        self.last_error = err.to_string();
        if err.is_timeout() {
            debug!(error = %err, "operation timed out");
        } else if err.closes_connection() {
            if let Some(session) = self.session.take() {
                warn!(peer = %session.peer_addr(), error = %err, "closing connection");
                session.shutdown();
            }
        }
        err
    }
}

fn intercept(message: &[u8], slot: &mut String) -> bool {
    if !is_xml(message) {
        return false;
    }
    *slot = String::from_utf8_lossy(message).into_owned();
    debug!(len = message.len(), "intercepted xml message");
    true
}

impl Drop for ProtocolClient {
    fn drop(&mut self) {
        if let Some(session) = self.session.take() {
            session.shutdown();
        }
    }
}

impl Session {
    fn open(host: &str, port: u16) -> Result<Self> {
        let stream = TcpTransport::connect(host, port).map_err(ClientError::Connection)?;
        let reader_stream = stream.try_clone().map_err(ClientError::Connection)?;

        Ok(Self {
            reader: MessageReader::new(reader_stream),
            writer: MessageWriter::new(stream),
            description: String::new(),
            receive_timeout: None,
            send_timeout: None,
        })
    }

    fn receive(&mut self, timeout: Option<Duration>) -> Result<Bytes> {
        if self.receive_timeout != timeout {
            self.reader.get_ref().set_receive_timeout(timeout)?;
            self.receive_timeout = timeout;
        }
        Ok(self.reader.read_message()?)
    }

    fn send(&mut self, message: &[u8], timeout: Option<Duration>) -> Result<()> {
        if self.send_timeout != timeout {
            self.writer.get_ref().set_send_timeout(timeout)?;
            self.send_timeout = timeout;
        }
        Ok(self.writer.write_message(message)?)
    }

    /// Read one message and drop it, storing it in `xml` if it is XML.
    fn wait(&mut self, timeout: Option<Duration>, xml: Option<&mut String>) -> Result<()> {
        let message = self.receive(timeout)?;
        if let Some(xml) = xml {
            intercept(&message, xml);
        }
        Ok(())
    }

    fn read(&mut self, timeout: Option<Duration>, xml: Option<&mut String>) -> Result<Bytes> {
        let message = self.receive(timeout)?;
        if xml.is_some_and(|xml| intercept(&message, xml)) {
            // The service never sends two XML messages back to back.
            return self.receive(timeout);
        }
        Ok(message)
    }

    fn peer_addr(&self) -> std::net::SocketAddr {
        self.reader.get_ref().peer_addr()
    }

    fn shutdown(self) {
        if let Err(err) = self.writer.get_ref().shutdown() {
            debug!(error = %err, "socket shutdown failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::net::TcpListener;
    use std::thread;

    use super::*;

    fn frame(payload: &[u8]) -> Vec<u8> {
        let mut out = (payload.len() as u32).to_be_bytes().to_vec();
        out.extend_from_slice(payload);
        out
    }

    #[test]
    fn xml_magic() {
        assert!(is_xml(b"<?xml version=\"1.0\"?><a/>"));
        assert!(is_xml(b"<?xml"));
        assert!(!is_xml(b"<?xm"));
        assert!(!is_xml(b" <?xml"));
        assert!(!is_xml(b""));
    }

    #[test]
    fn description_is_first_message() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().expect("addr").port();

        let server = thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept");
            stream
                .write_all(&frame(b"<?xml version=\"1.0\"?><service name=\"test\"/>"))
                .expect("write");
            stream
        });

        let client = ProtocolClient::connect("127.0.0.1", port);
        assert!(client.is_connected());
        assert_eq!(
            client.description(),
            Some("<?xml version=\"1.0\"?><service name=\"test\"/>")
        );
        assert_eq!(client.xml_string(), None);
        assert_eq!(client.error_string(), None);
        assert_eq!(client.peer(), Some(("127.0.0.1", port)));
        drop(server.join().expect("server"));
    }

    #[test]
    fn missing_description_keeps_connection() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().expect("addr").port();

        let server = thread::spawn(move || listener.accept().expect("accept").0);

        let config = ClientConfig {
            wait_timeout: Duration::from_millis(100),
            ..ClientConfig::default()
        };
        let client = ProtocolClient::connect_with_config("127.0.0.1", port, config);
        assert!(client.is_connected());
        assert_eq!(client.description(), None);
        drop(server.join().expect("server"));
    }

    #[test]
    fn operations_on_closed_client() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().expect("addr").port();
        drop(listener);

        let mut client = ProtocolClient::connect("127.0.0.1", port);
        assert!(!client.is_connected());
        assert!(client.error_string().is_some());

        assert!(matches!(
            client.read_data(Timeout::Default),
            Err(ClientError::NotConnected)
        ));
        assert!(matches!(
            client.write_data(b"x", Timeout::Default),
            Err(ClientError::NotConnected)
        ));
        assert!(matches!(
            client.wait_for_data(Timeout::Default),
            Err(ClientError::NotConnected)
        ));
        assert!(matches!(client.close(), Err(ClientError::NotConnected)));
        assert_eq!(client.error_string(), Some("client is not connected"));
        assert_eq!(client.peer(), None);
    }
}
