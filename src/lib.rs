// Allow large error types - the Error enum carries the rejected OID inline.
#![allow(clippy::result_large_err)]

//! # snmp-trap-sender
//!
//! Blocking SNMPv2c trap sender.
//!
//! ## Features
//!
//! - One [`TrapSender`] per target, accumulating variable bindings for one
//!   trap at a time
//! - Process-wide [`TransportLock`] serializing every sender's transport use
//! - Value text typed with net-snmp letters ([`ValueKind`]) and parsed when
//!   appended, so malformed values fail before send
//! - sysUpTime.0 measured against a process-wide baseline ([`uptime`])
//! - Pluggable [`Transport`], with UDP built in and a recording mock behind
//!   the `testing` feature
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::time::SystemTime;
//! use snmp_trap_sender::{TrapSender, ValueKind, uptime};
//!
//! uptime::init_baseline(SystemTime::now());
//!
//! let mut sender = TrapSender::builder()
//!     .host("192.0.2.10")
//!     .community("public")
//!     .build_udp();
//!
//! sender.set_sys_uptime();
//! sender.set_trap_oid("1.3.6.1.4.1.45156.1.1.1");
//! sender.add_variable_tag(&[1, 3, 6, 1, 4, 1, 45156, 1, 2, 1], "1048576", 'c')?;
//! sender.send()?;
//! # Ok::<(), snmp_trap_sender::Error>(())
//! ```

pub mod ber;
pub mod error;
pub mod message;
pub mod oid;
pub mod prelude;
pub mod sender;
pub mod transport;
pub mod uptime;
pub mod value;
pub mod varbind;
pub mod version;

pub(crate) mod util;

#[cfg(feature = "cli")]
pub mod cli;

// Re-exports for convenience
pub use error::{AppendErrorKind, BindingErrorKind, Error, OidErrorKind, Result};
pub use oid::Oid;
pub use sender::{
    BindingView, Session, StringArena, TrapConfig, TrapMessage, TrapSender, TrapSenderBuilder,
};
pub use transport::{Transport, TransportGuard, TransportLock, UdpTransport};
pub use uptime::Uptime;
pub use value::{Value, ValueKind};
pub use varbind::VarBind;
pub use version::Version;

/// Type alias for a sender delivering over UDP.
pub type UdpTrapSender = TrapSender<UdpTransport>;

/// Testing utilities exposed via the `testing` feature.
#[cfg(feature = "testing")]
pub mod testing {
    pub use crate::transport::{MockConnection, MockEvent, MockTransport};
}
