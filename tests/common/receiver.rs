//! Loopback UDP trap receiver.

use std::net::UdpSocket;
use std::time::Duration;

/// A UDP socket on 127.0.0.1 that collects raw trap datagrams.
pub struct TrapReceiver {
    socket: UdpSocket,
}

impl TrapReceiver {
    pub fn bind() -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0").expect("bind receiver");
        socket
            .set_read_timeout(Some(Duration::from_secs(5)))
            .expect("set read timeout");
        Self { socket }
    }

    pub fn port(&self) -> u16 {
        self.socket.local_addr().expect("local addr").port()
    }

    /// Wait for the next datagram.
    pub fn recv(&self) -> Vec<u8> {
        let mut buf = vec![0u8; 65535];
        let (n, _) = self.socket.recv_from(&mut buf).expect("receive trap");
        buf.truncate(n);
        buf
    }
}
