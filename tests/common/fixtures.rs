//! Common test fixtures and constants.

use std::sync::Arc;

use snmp_trap_sender::testing::{MockEvent, MockTransport};
use snmp_trap_sender::{Oid, TransportLock, TrapConfig, TrapSender, oid};

// =============================================================================
// OIDs
// =============================================================================

pub fn sys_uptime() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 3, 0)
}
pub fn snmp_trap_oid() -> Oid {
    oid!(1, 3, 6, 1, 6, 3, 1, 1, 4, 1, 0)
}

/// Enterprise arc used for test variables: 1.3.6.1.4.1.45156
pub const ENTERPRISE: &[u32] = &[1, 3, 6, 1, 4, 1, 45156];

/// A variable under the test enterprise arc.
pub fn enterprise_var(leaf: u32) -> Vec<u32> {
    let mut arcs = ENTERPRISE.to_vec();
    arcs.extend_from_slice(&[1, leaf, 0]);
    arcs
}

/// linkDown notification: 1.3.6.1.6.3.1.1.5.3
pub const LINK_DOWN: &str = "1.3.6.1.6.3.1.1.5.3";

// =============================================================================
// Sender construction
// =============================================================================

pub fn trap_config(host: &str, port: u16) -> TrapConfig {
    TrapConfig {
        host: Some(host.to_string()),
        community: Some("public".to_string()),
        port,
        ..TrapConfig::default()
    }
}

/// A sender over `mock` with its own lock, so tests don't contend on the
/// process-wide one.
pub fn mock_sender(mock: &MockTransport) -> TrapSender<MockTransport> {
    TrapSender::with_lock(
        trap_config("192.0.2.1", 162),
        mock.clone(),
        Arc::new(TransportLock::new()),
    )
}

// =============================================================================
// Event checks
// =============================================================================

/// Assert that `events` is a sequence of complete open/send/close triples,
/// each from a single label, and return the labels in order.
pub fn assert_unbroken_triples(events: &[MockEvent]) -> Vec<String> {
    assert_eq!(events.len() % 3, 0, "incomplete transport cycle: {:?}", events);
    events
        .chunks_exact(3)
        .map(|chunk| {
            let label = chunk[0].label();
            assert!(
                matches!(
                    chunk,
                    [
                        MockEvent::Open { .. },
                        MockEvent::Send { .. },
                        MockEvent::Close { .. }
                    ]
                ),
                "out-of-order transport calls: {:?}",
                chunk
            );
            assert!(
                chunk.iter().all(|e| e.label() == label),
                "interleaved transport calls: {:?}",
                chunk
            );
            label.to_string()
        })
        .collect()
}
