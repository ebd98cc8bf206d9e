//! Trap sender.
//!
//! A [`TrapSender`] accumulates variable bindings for one trap at a time and
//! delivers them to a fixed target. Construction, drop and [`send`] of every
//! sender in the process are serialized through a shared
//! [`TransportLock`], so independent senders on different threads never
//! interleave their transport calls.
//!
//! # Example
//!
//! ```rust,no_run
//! use snmp_trap_sender::{TrapSender, ValueKind};
//!
//! let mut sender = TrapSender::builder()
//!     .host("192.0.2.10")
//!     .community("public")
//!     .build_udp();
//!
//! sender.set_sys_uptime();
//! sender.set_trap_oid("1.3.6.1.4.1.45156.1.1.1");
//! sender.add_variable(&[1, 3, 6, 1, 4, 1, 45156, 1, 2, 1], "java heap", ValueKind::String)?;
//! sender.send()?;
//! # Ok::<(), snmp_trap_sender::Error>(())
//! ```
//!
//! [`send`]: TrapSender::send

mod arena;
mod builder;
mod pdu;
mod session;

pub use arena::{ArenaKey, StringArena};
pub use builder::TrapSenderBuilder;
pub use pdu::{Binding, BindingView, TrapMessage};
pub use session::Session;

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use crate::error::{BindingErrorKind, Error, Result};
use crate::message::next_request_id;
use crate::oid::{Oid, well_known};
use crate::transport::{DEFAULT_SEND_TIMEOUT, Transport, TransportLock, UdpTransport};
use crate::uptime;
use crate::value::ValueKind;
use crate::version::Version;

/// Default trap destination port.
pub const DEFAULT_TRAP_PORT: u16 = 162;

/// Largest UDP payload over IPv4.
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 65507;

/// Trap sender configuration.
///
/// With the `cli` feature this can be read from JSON; `send_timeout` is then
/// given in milliseconds.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Deserialize))]
#[cfg_attr(feature = "cli", serde(default, deny_unknown_fields))]
pub struct TrapConfig {
    /// Protocol version (default: SNMPv2c, the only one that can send).
    pub version: Version,
    /// Target host name or address. `None` disables the sender.
    pub host: Option<String>,
    /// Community string. `None` sends an empty community.
    pub community: Option<String>,
    /// Target port (default: 162).
    pub port: u16,
    /// Largest encoded message accepted (default: 65507).
    pub max_message_size: usize,
    /// Write timeout used by [`UdpTransport`] (default: 5 seconds).
    #[cfg_attr(feature = "cli", serde(deserialize_with = "millis::deserialize"))]
    pub send_timeout: Option<Duration>,
}

impl Default for TrapConfig {
    fn default() -> Self {
        Self {
            version: Version::V2c,
            host: None,
            community: None,
            port: DEFAULT_TRAP_PORT,
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            send_timeout: Some(DEFAULT_SEND_TIMEOUT),
        }
    }
}

#[cfg(feature = "cli")]
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}

/// Sends SNMPv2c traps to one target.
///
/// A sender built without a usable target is *disabled*: every binding and
/// send call fails with [`Error::Disabled`] until it is dropped.
pub struct TrapSender<T: Transport = UdpTransport> {
    transport: T,
    lock: Arc<TransportLock>,
    session: Option<Session>,
    message: Option<TrapMessage>,
}

impl TrapSender<UdpTransport> {
    /// Create a builder.
    pub fn builder() -> TrapSenderBuilder {
        TrapSenderBuilder::new()
    }

    /// Create a sender that delivers over UDP using `config.send_timeout`.
    pub fn udp(config: TrapConfig) -> Self {
        let transport = UdpTransport::new().send_timeout(config.send_timeout);
        Self::new(config, transport)
    }
}

impl<T: Transport> TrapSender<T> {
    /// Create a sender guarded by the process-wide lock.
    pub fn new(config: TrapConfig, transport: T) -> Self {
        Self::with_lock(config, transport, TransportLock::global())
    }

    /// Create a sender guarded by `lock`.
    ///
    /// Senders only exclude each other when they share a lock. A sender
    /// given its own lock is not serialized against senders on
    /// [`TransportLock::global()`], so this is meant for tests and for
    /// callers that own every sender in the process.
    ///
    /// No network I/O happens here; the target is only resolved on send.
    pub fn with_lock(config: TrapConfig, transport: T, lock: Arc<TransportLock>) -> Self {
        let guard = lock.acquire();
        let state = match Session::from_config(&config) {
            Ok(session) => {
                let message =
                    TrapMessage::new(session.community().len(), config.max_message_size);
                tracing::debug!(
                    target: "snmp_trap_sender::sender",
                    { snmp.target = %session.target(), snmp.version = %session.version() },
                    "trap sender ready"
                );
                Some((session, message))
            }
            Err(err) => {
                tracing::warn!(
                    target: "snmp_trap_sender::sender",
                    { error = %err },
                    "trap sender disabled"
                );
                None
            }
        };
        drop(guard);

        let (session, message) = state.unzip();
        Self {
            transport,
            lock,
            session,
            message,
        }
    }

    /// Whether the sender has a usable target.
    pub fn is_enabled(&self) -> bool {
        self.message.is_some()
    }

    /// The target session, if enabled.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Number of bindings in the pending message.
    pub fn binding_count(&self) -> usize {
        self.message.as_ref().map_or(0, TrapMessage::len)
    }

    /// Number of value strings owned by the pending message.
    pub fn owned_string_count(&self) -> usize {
        self.message.as_ref().map_or(0, |m| m.arena().len())
    }

    /// Pending bindings in send order.
    pub fn bindings(&self) -> impl Iterator<Item = BindingView<'_>> + '_ {
        self.message.iter().flat_map(|m| m.views())
    }

    /// The pending message, if enabled.
    pub fn message(&self) -> Option<&TrapMessage> {
        self.message.as_ref()
    }

    /// The transport traps are delivered through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The lock serializing this sender's transport use.
    pub fn lock(&self) -> &Arc<TransportLock> {
        &self.lock
    }

    /// Append a variable binding.
    ///
    /// `value` is copied; the copy lives until the message is sent or
    /// cleared. On any error the message is unchanged.
    pub fn add_variable(&mut self, oid: &[u32], value: &str, kind: ValueKind) -> Result<()> {
        if oid.is_empty() {
            return Err(reject(Error::binding(BindingErrorKind::EmptyOid)));
        }
        let Some(message) = self.message.as_mut() else {
            return Err(reject(Error::Disabled));
        };

        let text = arena::copy_value(value).map_err(|_| {
            reject(Error::Allocation {
                requested: value.len(),
            })
        })?;

        message.append(Oid::from_slice(oid), kind, text).map_err(|err| {
            tracing::warn!(
                target: "snmp_trap_sender::sender",
                { snmp.oid = ?oid, snmp.kind = %kind, error = %err },
                "could not add variable"
            );
            err
        })?;

        tracing::trace!(
            target: "snmp_trap_sender::sender",
            { snmp.kind = %kind, snmp.varbinds = message.len() },
            "added variable"
        );
        Ok(())
    }

    /// Append a variable binding whose kind is given as a net-snmp type
    /// letter (`i`, `u`, `c`, `C`, `t`, `a`, `o`, `s`, `x`, `d`, `n`).
    pub fn add_variable_tag(&mut self, oid: &[u32], value: &str, tag: char) -> Result<()> {
        if oid.is_empty() {
            return Err(reject(Error::binding(BindingErrorKind::EmptyOid)));
        }
        let Some(kind) = ValueKind::from_tag(tag) else {
            return Err(reject(Error::binding(BindingErrorKind::UnsupportedTag(tag))));
        };
        self.add_variable(oid, value, kind)
    }

    /// Bind sysUpTime.0 to the time elapsed since the uptime baseline.
    ///
    /// Failures are logged, not returned.
    pub fn set_sys_uptime(&mut self) {
        self.set_sys_uptime_at(SystemTime::now());
    }

    /// Bind sysUpTime.0 as measured at `now`.
    pub fn set_sys_uptime_at(&mut self, now: SystemTime) {
        let ticks = uptime::baseline().ticks_at(now);
        if self
            .add_variable(well_known::SYS_UPTIME, &ticks.to_string(), ValueKind::TimeTicks)
            .is_err()
        {
            tracing::warn!(
                target: "snmp_trap_sender::sender",
                { snmp.ticks = ticks },
                "couldn't append sysUpTime"
            );
        }
    }

    /// Bind snmpTrapOID.0 to the dotted OID `trap_oid`.
    ///
    /// Failures are logged, not returned.
    pub fn set_trap_oid(&mut self, trap_oid: &str) {
        if self
            .add_variable(
                well_known::SNMP_TRAP_OID,
                trap_oid,
                ValueKind::ObjectIdentifier,
            )
            .is_err()
        {
            tracing::warn!(
                target: "snmp_trap_sender::sender",
                { snmp.trap_oid = trap_oid },
                "couldn't append trap OID"
            );
        }
    }

    /// Encode and transmit the pending message.
    ///
    /// The message is reset afterwards whatever the outcome; a failed trap
    /// is not retried.
    pub fn send(&mut self) -> Result<()> {
        let (Some(session), Some(message)) = (&self.session, &mut self.message) else {
            return Err(reject(Error::Disabled));
        };

        let result = {
            let _guard = self.lock.acquire();
            transmit(&self.transport, session, message)
        };
        let varbinds = message.len();
        message.reset();

        match &result {
            Ok(()) => tracing::debug!(
                target: "snmp_trap_sender::sender",
                { snmp.target = %session.target(), snmp.varbinds = varbinds },
                "sent trap"
            ),
            Err(err) => tracing::warn!(
                target: "snmp_trap_sender::sender",
                { snmp.target = %session.target(), snmp.varbinds = varbinds, error = %err },
                "trap was not sent"
            ),
        }
        result
    }

    /// Discard every pending binding. No-op when disabled.
    pub fn clear(&mut self) {
        if let Some(message) = self.message.as_mut() {
            message.reset();
        }
    }
}

impl<T: Transport> Drop for TrapSender<T> {
    fn drop(&mut self) {
        let lock = Arc::clone(&self.lock);
        let _guard = lock.acquire();
        self.clear();
        self.message = None;
        if let Some(session) = self.session.take() {
            tracing::debug!(
                target: "snmp_trap_sender::sender",
                { snmp.target = %session.target() },
                "trap sender closed"
            );
        }
    }
}

impl<T: Transport> std::fmt::Debug for TrapSender<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrapSender")
            .field("session", &self.session)
            .field("bindings", &self.binding_count())
            .finish_non_exhaustive()
    }
}

fn reject(err: Error) -> Error {
    tracing::warn!(target: "snmp_trap_sender::sender", { error = %err }, "rejected trap call");
    err
}

/// Open, send, close. Runs with the transport lock held.
fn transmit<T: Transport>(transport: &T, session: &Session, message: &TrapMessage) -> Result<()> {
    let mut conn = transport
        .open(session.host(), session.port())
        .map_err(|source| Error::TransportOpen {
            target: session.target(),
            source,
        })?;

    let data = message.encode(session.version(), session.community(), next_request_id());
    tracing::trace!(
        target: "snmp_trap_sender::sender",
        { snmp.target = %session.target(), snmp.bytes = data.len() },
        "encoded trap"
    );

    let sent = transport.send(&mut conn, &data);
    transport.close(conn);
    sent.map_err(|source| Error::TransportSend {
        target: session.target(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppendErrorKind;
    use crate::transport::{MockEvent, MockTransport};
    use crate::value::Value;
    use std::io;
    use std::time::UNIX_EPOCH;

    fn config() -> TrapConfig {
        TrapConfig {
            host: Some("192.0.2.1".into()),
            community: Some("public".into()),
            ..TrapConfig::default()
        }
    }

    fn sender(mock: &MockTransport) -> TrapSender<MockTransport> {
        TrapSender::with_lock(config(), mock.clone(), Arc::new(TransportLock::new()))
    }

    #[test]
    fn test_enabled_sender() {
        let mock = MockTransport::new();
        let sender = sender(&mock);
        assert!(sender.is_enabled());
        assert_eq!(sender.session().unwrap().target(), "192.0.2.1:162");
        assert_eq!(sender.binding_count(), 0);
        assert!(mock.events().is_empty());
    }

    #[test]
    fn test_disabled_without_host() {
        let mock = MockTransport::new();
        let mut sender = TrapSender::with_lock(
            TrapConfig::default(),
            mock.clone(),
            Arc::new(TransportLock::new()),
        );
        assert!(!sender.is_enabled());
        assert!(sender.session().is_none());
        assert!(matches!(
            sender.add_variable(&[1, 3, 6, 1], "1", ValueKind::Integer),
            Err(Error::Disabled)
        ));
        assert!(matches!(sender.send(), Err(Error::Disabled)));
        sender.clear();
        sender.set_sys_uptime();
        assert_eq!(sender.binding_count(), 0);
        assert!(mock.events().is_empty());
    }

    #[test]
    fn test_disabled_for_v1() {
        let mock = MockTransport::new();
        let sender = TrapSender::with_lock(
            TrapConfig {
                version: Version::V1,
                ..config()
            },
            mock,
            Arc::new(TransportLock::new()),
        );
        assert!(!sender.is_enabled());
    }

    #[test]
    fn test_add_variable_copies_value() {
        let mock = MockTransport::new();
        let mut sender = sender(&mock);
        let value = String::from("hello");
        sender
            .add_variable(&[1, 3, 6, 1, 4, 1, 1], &value, ValueKind::String)
            .unwrap();
        drop(value);

        let view = sender.bindings().next().unwrap();
        assert_eq!(view.text, "hello");
        assert_eq!(sender.owned_string_count(), 1);
    }

    #[test]
    fn test_empty_oid_rejected() {
        let mock = MockTransport::new();
        let mut sender = sender(&mock);
        assert!(matches!(
            sender.add_variable(&[], "1", ValueKind::Integer),
            Err(Error::InvalidBinding {
                kind: BindingErrorKind::EmptyOid
            })
        ));
        assert_eq!(sender.binding_count(), 0);
    }

    #[test]
    fn test_unsupported_tag_rejected() {
        let mock = MockTransport::new();
        let mut sender = sender(&mock);
        for tag in ['_', '[', '`', '1', 'Z', 'q', 'b', 'U', 'I', 'F', 'D'] {
            assert!(matches!(
                sender.add_variable_tag(&[1, 3, 6, 1], "1", tag),
                Err(Error::InvalidBinding {
                    kind: BindingErrorKind::UnsupportedTag(t)
                }) if t == tag
            ));
        }
        assert_eq!(sender.binding_count(), 0);
        assert_eq!(sender.owned_string_count(), 0);
    }

    #[test]
    fn test_tag_letters_map_to_kinds() {
        let mock = MockTransport::new();
        let mut sender = sender(&mock);
        sender.add_variable_tag(&[1, 3, 6, 1, 4, 1, 1], "42", 'i').unwrap();
        sender
            .add_variable_tag(&[1, 3, 6, 1, 4, 1, 2], "10.0.0.1", 'a')
            .unwrap();
        let kinds: Vec<_> = sender.bindings().map(|b| b.kind).collect();
        assert_eq!(kinds, vec![ValueKind::Integer, ValueKind::IpAddress]);
    }

    #[test]
    fn test_append_error_leaves_state() {
        let mock = MockTransport::new();
        let mut sender = sender(&mock);
        let err = sender
            .add_variable(&[1, 3, 6, 1, 4, 1, 1], "not a number", ValueKind::Counter32)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Append {
                kind: AppendErrorKind::InvalidValue { .. },
                ..
            }
        ));
        assert_eq!(sender.binding_count(), 0);
        assert_eq!(sender.owned_string_count(), 0);
    }

    #[test]
    fn test_sys_uptime_binding() {
        let mock = MockTransport::new();
        let mut sender = sender(&mock);
        let base = uptime::baseline();
        let now = UNIX_EPOCH + Duration::from_millis(base.centis() * 10 + 5_000);
        sender.set_sys_uptime_at(now);

        let view = sender.bindings().next().unwrap();
        assert_eq!(view.oid, &well_known::sys_uptime());
        assert_eq!(view.kind, ValueKind::TimeTicks);
        assert_eq!(view.text, "500");
        assert_eq!(view.value, &Value::TimeTicks(500));
    }

    #[test]
    fn test_trap_oid_binding() {
        let mock = MockTransport::new();
        let mut sender = sender(&mock);
        sender.set_trap_oid("1.3.6.1.6.3.1.1.5.3");
        sender.set_trap_oid("not an oid");

        assert_eq!(sender.binding_count(), 1);
        let view = sender.bindings().next().unwrap();
        assert_eq!(view.oid, &well_known::snmp_trap_oid());
        assert_eq!(
            view.value,
            &Value::ObjectIdentifier(Oid::parse("1.3.6.1.6.3.1.1.5.3").unwrap())
        );
    }

    #[test]
    fn test_send_open_send_close() {
        let mock = MockTransport::new();
        let mut sender = sender(&mock);
        sender
            .add_variable(&[1, 3, 6, 1, 4, 1, 1], "7", ValueKind::Integer)
            .unwrap();
        sender.send().unwrap();

        let events = mock.events();
        assert_eq!(events.len(), 3);
        assert!(matches!(&events[0], MockEvent::Open { host, port: 162, .. } if host == "192.0.2.1"));
        assert!(matches!(&events[1], MockEvent::Send { .. }));
        assert!(matches!(&events[2], MockEvent::Close { .. }));
        assert_eq!(sender.binding_count(), 0);
        assert_eq!(sender.owned_string_count(), 0);
    }

    #[test]
    fn test_send_failure_resets_message() {
        let mock = MockTransport::new();
        let mut sender = sender(&mock);
        sender
            .add_variable(&[1, 3, 6, 1, 4, 1, 1], "x", ValueKind::String)
            .unwrap();
        mock.fail_next_send(io::ErrorKind::ConnectionRefused);

        let err = sender.send().unwrap_err();
        assert!(matches!(err, Error::TransportSend { .. }));
        assert_eq!(err.target(), Some("192.0.2.1:162"));
        assert_eq!(sender.owned_string_count(), 0);
        assert!(matches!(mock.events().last(), Some(MockEvent::Close { .. })));
    }

    #[test]
    fn test_open_failure_resets_message() {
        let mock = MockTransport::new();
        let mut sender = sender(&mock);
        sender
            .add_variable(&[1, 3, 6, 1, 4, 1, 1], "x", ValueKind::String)
            .unwrap();
        mock.fail_next_open(io::ErrorKind::NotFound);

        assert!(matches!(sender.send(), Err(Error::TransportOpen { .. })));
        assert_eq!(mock.events().len(), 1);
        assert_eq!(sender.binding_count(), 0);
        assert!(!sender.lock().is_locked());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mock = MockTransport::new();
        let mut sender = sender(&mock);
        sender.clear();
        assert_eq!(sender.binding_count(), 0);
        sender
            .add_variable(&[1, 3, 6, 1, 4, 1, 1], "", ValueKind::Null)
            .unwrap();
        sender.clear();
        sender.clear();
        assert_eq!(sender.binding_count(), 0);
        assert_eq!(sender.owned_string_count(), 0);
    }

    #[test]
    fn test_config_defaults() {
        let config = TrapConfig::default();
        assert_eq!(config.version, Version::V2c);
        assert_eq!(config.port, 162);
        assert_eq!(config.max_message_size, 65507);
        assert_eq!(config.send_timeout, Some(Duration::from_secs(5)));
        assert!(config.host.is_none());
        assert!(config.community.is_none());
    }
}
