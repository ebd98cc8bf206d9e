//! Mock transport for testing.
//!
//! Records every open/send/close in a log that can be shared between several
//! transports, and can be programmed to fail or stall.

use super::Transport;
use bytes::Bytes;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::io;
use std::sync::Arc;
use std::time::Duration;

/// One recorded transport call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MockEvent {
    /// `open(host, port)` was called.
    Open {
        label: String,
        host: String,
        port: u16,
    },
    /// `send` was called with this datagram.
    Send { label: String, data: Bytes },
    /// `close` was called.
    Close { label: String },
}

impl MockEvent {
    /// The label of the transport that recorded the event.
    pub fn label(&self) -> &str {
        match self {
            MockEvent::Open { label, .. }
            | MockEvent::Send { label, .. }
            | MockEvent::Close { label } => label,
        }
    }
}

/// A fault to inject into the next matching call.
#[derive(Clone, Debug)]
enum Fault {
    Open(io::ErrorKind),
    Send(io::ErrorKind),
}

/// Mock transport state shared between clones.
#[derive(Default)]
struct MockTransportInner {
    events: Vec<MockEvent>,
    faults: VecDeque<Fault>,
    send_delay: Option<Duration>,
}

/// Mock transport for testing trap senders.
///
/// ```rust
/// use snmp_trap_sender::transport::{MockEvent, MockTransport, Transport};
///
/// let mock = MockTransport::new();
/// mock.fail_next_send(std::io::ErrorKind::ConnectionRefused);
///
/// let mut conn = mock.open("192.0.2.1", 162).unwrap();
/// assert!(mock.send(&mut conn, b"trap").is_err());
/// mock.close(conn);
///
/// assert_eq!(mock.events().len(), 3);
/// ```
#[derive(Clone)]
pub struct MockTransport {
    label: String,
    inner: Arc<Mutex<MockTransportInner>>,
}

/// Connection handed out by [`MockTransport`].
#[derive(Debug)]
pub struct MockConnection {
    host: String,
    port: u16,
}

impl MockConnection {
    /// The `host:port` this connection was opened to.
    pub fn target(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl MockTransport {
    /// Create a mock with an empty log.
    pub fn new() -> Self {
        Self {
            label: String::from("mock"),
            inner: Arc::new(Mutex::new(MockTransportInner::default())),
        }
    }

    /// A clone that shares this mock's log and faults but tags its events
    /// with `label`.
    pub fn with_label(&self, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            inner: Arc::clone(&self.inner),
        }
    }

    /// Make the next `open` fail with `kind`.
    pub fn fail_next_open(&self, kind: io::ErrorKind) {
        self.inner.lock().faults.push_back(Fault::Open(kind));
    }

    /// Make the next `send` fail with `kind`.
    pub fn fail_next_send(&self, kind: io::ErrorKind) {
        self.inner.lock().faults.push_back(Fault::Send(kind));
    }

    /// Sleep this long inside every `send`.
    pub fn set_send_delay(&self, delay: Duration) {
        self.inner.lock().send_delay = Some(delay);
    }

    /// All events recorded so far, in call order.
    pub fn events(&self) -> Vec<MockEvent> {
        self.inner.lock().events.clone()
    }

    /// Every datagram passed to `send`, in call order.
    pub fn sent(&self) -> Vec<Bytes> {
        self.inner
            .lock()
            .events
            .iter()
            .filter_map(|event| match event {
                MockEvent::Send { data, .. } => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    /// Clear recorded events.
    pub fn clear_events(&self) {
        self.inner.lock().events.clear();
    }

    fn take_fault(inner: &mut MockTransportInner, open: bool) -> Option<io::ErrorKind> {
        let matches = matches!(
            (inner.faults.front(), open),
            (Some(Fault::Open(_)), true) | (Some(Fault::Send(_)), false)
        );
        if !matches {
            return None;
        }
        match inner.faults.pop_front() {
            Some(Fault::Open(kind)) | Some(Fault::Send(kind)) => Some(kind),
            None => None,
        }
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for MockTransport {
    type Connection = MockConnection;

    fn open(&self, host: &str, port: u16) -> io::Result<MockConnection> {
        let mut inner = self.inner.lock();
        inner.events.push(MockEvent::Open {
            label: self.label.clone(),
            host: host.to_string(),
            port,
        });
        if let Some(kind) = Self::take_fault(&mut inner, true) {
            return Err(io::Error::new(kind, "mock open failure"));
        }
        Ok(MockConnection {
            host: host.to_string(),
            port,
        })
    }

    fn send(&self, _conn: &mut MockConnection, data: &[u8]) -> io::Result<()> {
        let (delay, fault) = {
            let mut inner = self.inner.lock();
            inner.events.push(MockEvent::Send {
                label: self.label.clone(),
                data: Bytes::copy_from_slice(data),
            });
            (inner.send_delay, Self::take_fault(&mut inner, false))
        };
        if let Some(delay) = delay {
            std::thread::sleep(delay);
        }
        match fault {
            Some(kind) => Err(io::Error::new(kind, "mock send failure")),
            None => Ok(()),
        }
    }

    fn close(&self, _conn: MockConnection) {
        self.inner.lock().events.push(MockEvent::Close {
            label: self.label.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_calls() {
        let mock = MockTransport::new();
        let mut conn = mock.open("localhost", 162).unwrap();
        assert_eq!(conn.target(), "localhost:162");
        mock.send(&mut conn, b"abc").unwrap();
        mock.close(conn);

        let events = mock.events();
        assert_eq!(
            events,
            vec![
                MockEvent::Open {
                    label: "mock".into(),
                    host: "localhost".into(),
                    port: 162
                },
                MockEvent::Send {
                    label: "mock".into(),
                    data: Bytes::from_static(b"abc")
                },
                MockEvent::Close {
                    label: "mock".into()
                },
            ]
        );
        assert_eq!(mock.sent(), vec![Bytes::from_static(b"abc")]);
    }

    #[test]
    fn test_faults_fire_once_in_order() {
        let mock = MockTransport::new();
        mock.fail_next_open(io::ErrorKind::ConnectionRefused);

        // A queued open fault is not consumed by send
        let err = mock.open("h", 1).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::ConnectionRefused);
        let mut conn = mock.open("h", 1).unwrap();

        mock.fail_next_send(io::ErrorKind::TimedOut);
        assert_eq!(
            mock.send(&mut conn, b"x").unwrap_err().kind(),
            io::ErrorKind::TimedOut
        );
        assert!(mock.send(&mut conn, b"y").is_ok());
    }

    #[test]
    fn test_labels_share_log() {
        let mock = MockTransport::new();
        let a = mock.with_label("a");
        let b = mock.with_label("b");
        let conn = a.open("h", 1).unwrap();
        a.close(conn);
        let conn = b.open("h", 1).unwrap();
        b.close(conn);

        let labels: Vec<_> = mock
            .events()
            .iter()
            .map(|e| e.label().to_string())
            .collect();
        assert_eq!(labels, vec!["a", "a", "b", "b"]);
    }
}
