//! Blocking UDP trap transport.

use std::io;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use std::time::Duration;

use super::Transport;
use crate::util::bind_udp_socket;

/// Default write timeout for a trap datagram.
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// UDP transport: one fresh, connected socket per trap.
///
/// ```rust,no_run
/// use snmp_trap_sender::transport::{Transport, UdpTransport};
///
/// let transport = UdpTransport::new();
/// let mut conn = transport.open("127.0.0.1", 162)?;
/// transport.send(&mut conn, b"...")?;
/// transport.close(conn);
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct UdpTransport {
    send_timeout: Option<Duration>,
}

/// A connected UDP socket for one trap.
#[derive(Debug)]
pub struct UdpConnection {
    socket: UdpSocket,
    peer: SocketAddr,
}

impl UdpConnection {
    /// The resolved peer address.
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    /// The local address the socket is bound to.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }
}

impl UdpTransport {
    /// Create a transport with the default send timeout.
    pub fn new() -> Self {
        Self {
            send_timeout: Some(DEFAULT_SEND_TIMEOUT),
        }
    }

    /// Set the write timeout (`None` blocks indefinitely).
    pub fn send_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.send_timeout = timeout;
        self
    }

    fn resolve(host: &str, port: u16) -> io::Result<SocketAddr> {
        (host, port).to_socket_addrs()?.next().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "could not resolve address")
        })
    }
}

impl Default for UdpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UdpTransport {
    type Connection = UdpConnection;

    fn open(&self, host: &str, port: u16) -> io::Result<UdpConnection> {
        let peer = Self::resolve(host, port)?;
        let socket = bind_udp_socket(peer)?;
        socket.set_write_timeout(self.send_timeout)?;
        socket.connect(peer)?;

        tracing::debug!(
            target: "snmp_trap_sender::transport",
            { snmp.target = %peer, snmp.local_addr = ?socket.local_addr().ok() },
            "opened UDP trap socket"
        );

        Ok(UdpConnection { socket, peer })
    }

    fn send(&self, conn: &mut UdpConnection, data: &[u8]) -> io::Result<()> {
        let written = conn.socket.send(data)?;
        if written != data.len() {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("short datagram write: {} of {} bytes", written, data.len()),
            ));
        }

        tracing::trace!(
            target: "snmp_trap_sender::transport",
            { snmp.target = %conn.peer, snmp.bytes = data.len() },
            "sent trap datagram"
        );

        Ok(())
    }

    fn close(&self, conn: UdpConnection) {
        tracing::trace!(
            target: "snmp_trap_sender::transport",
            { snmp.target = %conn.peer },
            "closed UDP trap socket"
        );
        drop(conn);
    }
}
