//! Internal utilities.

use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};

use socket2::{Domain, Protocol, Socket, Type};

/// Create a blocking UDP socket bound to an ephemeral port in the same
/// address family as `peer`.
///
/// For IPv6 peers, sets `IPV6_V6ONLY = false` so the socket can also reach
/// IPv4-mapped addresses.
pub(crate) fn bind_udp_socket(peer: SocketAddr) -> io::Result<UdpSocket> {
    let (domain, local) = if peer.is_ipv6() {
        (
            Domain::IPV6,
            SocketAddr::new(Ipv6Addr::UNSPECIFIED.into(), 0),
        )
    } else {
        (
            Domain::IPV4,
            SocketAddr::new(Ipv4Addr::UNSPECIFIED.into(), 0),
        )
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;

    if peer.is_ipv6() {
        socket.set_only_v6(false)?;
    }

    socket.bind(&local.into())?;

    Ok(socket.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_udp_socket_ipv4() {
        let peer: SocketAddr = "127.0.0.1:162".parse().unwrap();
        let socket = bind_udp_socket(peer).unwrap();
        let local = socket.local_addr().unwrap();
        assert!(local.is_ipv4());
        assert_ne!(local.port(), 0);
    }

    #[test]
    fn test_bind_udp_socket_ipv6_peer() {
        let peer: SocketAddr = "[::1]:162".parse().unwrap();
        // Hosts without IPv6 cannot create the socket at all
        if let Ok(socket) = bind_udp_socket(peer) {
            assert!(socket.local_addr().unwrap().is_ipv6());
        }
    }
}
