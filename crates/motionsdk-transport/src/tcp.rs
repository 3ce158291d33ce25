use std::io::{ErrorKind, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::{debug, info};

use crate::error::{Result, TransportError};
use crate::netstack::NetStackGuard;

/// Host used when the caller passes an empty host string.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Requested kernel send/receive buffer size, in bytes.
pub const SOCKET_BUFFER_SIZE: usize = 65536;

/// A connected TCP socket to a Motion Service endpoint.
///
/// Implements [`Read`] and [`Write`], and through them the
/// [`ReceiveChunk`](crate::ReceiveChunk) / [`SendChunk`](crate::SendChunk)
/// traits used by the framing layer.
pub struct TcpTransport {
    stream: TcpStream,
    host: String,
    port: u16,
    peer: SocketAddr,
    _net: NetStackGuard,
}

impl TcpTransport {
    /// Resolve `host:port` and connect (blocking).
    ///
    /// Each resolved address is tried in order. A refusal from the last
    /// address tried is reported as [`TransportError::ConnectionRefused`].
    pub fn connect(host: &str, port: u16) -> Result<Self> {
        let host = if host.is_empty() { DEFAULT_HOST } else { host };
        let net = NetStackGuard::acquire();

        let addrs: Vec<SocketAddr> = (host, port)
            .to_socket_addrs()
            .map_err(|source| TransportError::Resolve {
                host: host.to_string(),
                port,
                source,
            })?
            .collect();
        if addrs.is_empty() {
            return Err(TransportError::Resolve {
                host: host.to_string(),
                port,
                source: std::io::Error::new(ErrorKind::NotFound, "no addresses for host"),
            });
        }

        let mut last_err = None;
        for addr in addrs {
            match TcpStream::connect(addr) {
                Ok(stream) => {
                    let peer = stream.peer_addr().unwrap_or(addr);
                    set_buffer_sizes(&stream, SOCKET_BUFFER_SIZE);
                    info!(%peer, "connected to motion service");
                    return Ok(Self {
                        stream,
                        host: host.to_string(),
                        port,
                        peer,
                        _net: net,
                    });
                }
                Err(err) => {
                    debug!(%addr, error = %err, "connect attempt failed");
                    last_err = Some(err);
                }
            }
        }

        match last_err {
            Some(err) if err.kind() == ErrorKind::ConnectionRefused => {
                Err(TransportError::ConnectionRefused {
                    host: host.to_string(),
                    port,
                })
            }
            Some(source) => Err(TransportError::Connect {
                host: host.to_string(),
                port,
                source,
            }),
            None => Err(TransportError::Connect {
                host: host.to_string(),
                port,
                source: std::io::Error::new(ErrorKind::NotConnected, "no connect attempt made"),
            }),
        }
    }

    /// Set the receive timeout. `None` blocks indefinitely.
    pub fn set_receive_timeout(&self, timeout: Option<Duration>) -> Result<()> {
        self.stream
            .set_read_timeout(timeout)
            .map_err(|source| TransportError::SocketOption {
                option: "SO_RCVTIMEO",
                source,
            })
    }

    /// Set the send timeout. `None` blocks indefinitely.
    pub fn set_send_timeout(&self, timeout: Option<Duration>) -> Result<()> {
        self.stream
            .set_write_timeout(timeout)
            .map_err(|source| TransportError::SocketOption {
                option: "SO_SNDTIMEO",
                source,
            })
    }

    /// Duplicate the socket handle. Both handles refer to the same connection.
    pub fn try_clone(&self) -> Result<Self> {
        Ok(Self {
            stream: self.stream.try_clone()?,
            host: self.host.clone(),
            port: self.port,
            peer: self.peer,
            _net: self._net.clone(),
        })
    }

    /// Disable sends and receives in both directions and notify the peer.
    ///
    /// The descriptor itself is released when the last handle is dropped.
    pub fn shutdown(&self) -> Result<()> {
        match self.stream.shutdown(Shutdown::Both) {
            Ok(()) => Ok(()),
            // Peer already went away; nothing left to shut down.
            Err(err) if err.kind() == ErrorKind::NotConnected => Ok(()),
            Err(err) => Err(TransportError::Io(err)),
        }
    }

    /// Host string this transport was asked to connect to.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Port this transport was asked to connect to.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Resolved address of the connected peer.
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }
}

impl Read for TcpTransport {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.stream.read(buf)
    }
}

impl Write for TcpTransport {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.stream.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.stream.flush()
    }
}

impl std::fmt::Debug for TcpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TcpTransport")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("peer", &self.peer)
            .finish()
    }
}

/// Raise `SO_SNDBUF`/`SO_RCVBUF` above the platform default. Best effort.
#[cfg(unix)]
fn set_buffer_sizes(stream: &TcpStream, size: usize) {
    use std::os::fd::AsRawFd;

    let fd = stream.as_raw_fd();
    let value = libc::c_int::try_from(size).unwrap_or(libc::c_int::MAX);
    for (name, option) in [("SO_SNDBUF", libc::SO_SNDBUF), ("SO_RCVBUF", libc::SO_RCVBUF)] {
        // SAFETY: `value` is a live c_int for the duration of the call and `fd`
        // is an open socket descriptor owned by `stream`.
        let rc = unsafe {
            libc::setsockopt(
                fd,
                libc::SOL_SOCKET,
                option,
                (&value as *const libc::c_int).cast::<libc::c_void>(),
                std::mem::size_of::<libc::c_int>() as libc::socklen_t,
            )
        };
        if rc != 0 {
            debug!(
                option = name,
                error = %std::io::Error::last_os_error(),
                "failed to set socket buffer size"
            );
        }
    }
}

#[cfg(not(unix))]
fn set_buffer_sizes(_stream: &TcpStream, _size: usize) {}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use super::*;
    use crate::traits::{ReceiveChunk, Received, SendChunk, Sent};

    fn listener() -> (TcpListener, u16) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        (listener, port)
    }

    #[test]
    fn connect_send_receive() {
        let (listener, port) = listener();
        let server = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 5];
            stream.read_exact(&mut buf).unwrap();
            stream.write_all(&buf).unwrap();
        });

        let mut transport = TcpTransport::connect("127.0.0.1", port).unwrap();
        assert_eq!(transport.port(), port);
        assert_eq!(transport.send_chunk(b"hello").unwrap(), Sent::Data(5));

        let mut buf = [0u8; 16];
        let mut got = Vec::new();
        while got.len() < 5 {
            match transport.receive_chunk(&mut buf).unwrap() {
                Received::Data(n) => got.extend_from_slice(&buf[..n]),
                other => panic!("unexpected outcome {other:?}"),
            }
        }
        assert_eq!(got, b"hello");
        server.join().unwrap();
    }

    #[test]
    fn empty_host_defaults_to_loopback() {
        let (listener, port) = listener();
        let server = std::thread::spawn(move || {
            let _ = listener.accept().unwrap();
        });

        let transport = TcpTransport::connect("", port).unwrap();
        assert_eq!(transport.host(), DEFAULT_HOST);
        assert!(transport.peer_addr().ip().is_loopback());
        server.join().unwrap();
    }

    #[test]
    fn refused_connection_is_categorized() {
        // Bind then drop to obtain a port with nothing listening.
        let (listener, port) = listener();
        drop(listener);

        let err = TcpTransport::connect("127.0.0.1", port).unwrap_err();
        assert!(err.is_refused(), "unexpected error: {err}");
    }

    #[test]
    fn unresolvable_host_is_resolve_error() {
        let err = TcpTransport::connect("0.0.1.x", 12345).unwrap_err();
        assert!(matches!(err, TransportError::Resolve { .. }));
    }

    #[test]
    fn receive_timeout_keeps_connection_open() {
        let (listener, port) = listener();
        let (release_tx, release_rx) = std::sync::mpsc::channel::<()>();
        let server = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            release_rx.recv().unwrap();
            stream.write_all(b"late").unwrap();
        });

        let mut transport = TcpTransport::connect("127.0.0.1", port).unwrap();
        transport
            .set_receive_timeout(Some(Duration::from_millis(50)))
            .unwrap();

        let mut buf = [0u8; 8];
        assert_eq!(transport.receive_chunk(&mut buf).unwrap(), Received::TimedOut);

        release_tx.send(()).unwrap();
        transport.set_receive_timeout(None).unwrap();
        let mut got = Vec::new();
        while got.len() < 4 {
            match transport.receive_chunk(&mut buf).unwrap() {
                Received::Data(n) => got.extend_from_slice(&buf[..n]),
                other => panic!("unexpected outcome {other:?}"),
            }
        }
        assert_eq!(got, b"late");
        server.join().unwrap();
    }

    #[test]
    fn peer_shutdown_is_reported() {
        let (listener, port) = listener();
        let server = std::thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            drop(stream);
        });

        let mut transport = TcpTransport::connect("127.0.0.1", port).unwrap();
        server.join().unwrap();

        let mut buf = [0u8; 8];
        assert_eq!(
            transport.receive_chunk(&mut buf).unwrap(),
            Received::PeerClosed
        );
    }

    #[test]
    fn clone_and_shutdown() {
        let (listener, port) = listener();
        let server = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = Vec::new();
            let _ = stream.read_to_end(&mut buf);
        });

        let transport = TcpTransport::connect("127.0.0.1", port).unwrap();
        let clone = transport.try_clone().unwrap();
        assert_eq!(clone.peer_addr(), transport.peer_addr());
        transport.shutdown().unwrap();
        drop(clone);
        drop(transport);
        server.join().unwrap();
    }
}
