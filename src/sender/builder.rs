//! Builder for [`TrapSender`].
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use snmp_trap_sender::TrapSender;
//!
//! let sender = TrapSender::builder()
//!     .host("nms.example.net")
//!     .port(10162)
//!     .community("public")
//!     .send_timeout(Some(Duration::from_secs(2)))
//!     .build_udp();
//! assert!(sender.is_enabled());
//! ```

use std::sync::Arc;
use std::time::Duration;

use crate::transport::{Transport, TransportLock, UdpTransport};
use crate::version::Version;

use super::{TrapConfig, TrapSender};

/// Chaining builder for [`TrapSender`].
#[derive(Debug, Default, Clone)]
pub struct TrapSenderBuilder {
    config: TrapConfig,
    lock: Option<Arc<TransportLock>>,
}

impl TrapSenderBuilder {
    /// Start from [`TrapConfig::default()`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn from_config(config: TrapConfig) -> Self {
        Self { config, lock: None }
    }

    /// Set the target host.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = Some(host.into());
        self
    }

    /// Set the target port (default: 162).
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the community string.
    pub fn community(mut self, community: impl Into<String>) -> Self {
        self.config.community = Some(community.into());
        self
    }

    /// Set the protocol version. Anything but SNMPv2c builds a disabled
    /// sender.
    pub fn version(mut self, version: Version) -> Self {
        self.config.version = version;
        self
    }

    /// Set the largest encoded message size accepted.
    pub fn max_message_size(mut self, size: usize) -> Self {
        self.config.max_message_size = size;
        self
    }

    /// Set the UDP write timeout (`None` blocks).
    pub fn send_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.send_timeout = timeout;
        self
    }

    /// Serialize through `lock` instead of the process-wide lock.
    ///
    /// The built sender no longer excludes senders on
    /// [`TransportLock::global()`]. See [`TrapSender::with_lock`].
    pub fn lock(mut self, lock: Arc<TransportLock>) -> Self {
        self.lock = Some(lock);
        self
    }

    /// The configuration built so far.
    pub fn config(&self) -> &TrapConfig {
        &self.config
    }

    /// Build a sender over `transport`.
    pub fn build<T: Transport>(self, transport: T) -> TrapSender<T> {
        let lock = self.lock.unwrap_or_else(TransportLock::global);
        TrapSender::with_lock(self.config, transport, lock)
    }

    /// Build a sender over UDP, honoring the configured send timeout.
    pub fn build_udp(self) -> TrapSender<UdpTransport> {
        let transport = UdpTransport::new().send_timeout(self.config.send_timeout);
        self.build(transport)
    }
}
