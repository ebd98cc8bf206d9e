//! Transport layer abstraction.
//!
//! A trap is one datagram: the sender opens a connection, pushes the encoded
//! message through it, and closes it. All three calls block, and all three
//! happen while the process-wide [`TransportLock`] is held, so
//! implementations do not need to be safe for concurrent use.

mod lock;
mod udp;

#[cfg(any(test, feature = "testing"))]
mod mock;

pub use lock::*;
pub use udp::*;

#[cfg(any(test, feature = "testing"))]
pub use mock::*;

use std::io;

/// Client-side trap transport.
///
/// Errors are plain [`io::Error`]s; the sender attaches the target and turns
/// them into [`Error::TransportOpen`](crate::Error::TransportOpen) or
/// [`Error::TransportSend`](crate::Error::TransportSend).
pub trait Transport {
    /// Open connection, consumed by [`close`](Self::close).
    type Connection;

    /// Open a connection to `host:port`.
    fn open(&self, host: &str, port: u16) -> io::Result<Self::Connection>;

    /// Transmit one encoded message.
    fn send(&self, conn: &mut Self::Connection, data: &[u8]) -> io::Result<()>;

    /// Close the connection. Called whether or not `send` succeeded.
    fn close(&self, conn: Self::Connection);
}

impl<T: Transport + ?Sized> Transport for &T {
    type Connection = T::Connection;

    fn open(&self, host: &str, port: u16) -> io::Result<Self::Connection> {
        (**self).open(host, port)
    }

    fn send(&self, conn: &mut Self::Connection, data: &[u8]) -> io::Result<()> {
        (**self).send(conn, data)
    }

    fn close(&self, conn: Self::Connection) {
        (**self).close(conn)
    }
}
