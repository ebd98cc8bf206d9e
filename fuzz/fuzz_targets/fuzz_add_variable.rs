#![no_main]

use std::sync::Arc;

use libfuzzer_sys::fuzz_target;

use snmp_trap_sender::testing::MockTransport;
use snmp_trap_sender::{TransportLock, TrapConfig, TrapSender};

fuzz_target!(|input: (Vec<u32>, String, char)| {
    let (oid, value, tag) = input;
    let mock = MockTransport::new();
    let config = TrapConfig {
        host: Some("192.0.2.1".into()),
        max_message_size: 1472,
        ..TrapConfig::default()
    };
    let mut sender = TrapSender::with_lock(config, mock.clone(), Arc::new(TransportLock::new()));

    let before = sender.binding_count();
    let added = sender.add_variable_tag(&oid, &value, tag).is_ok();
    assert_eq!(sender.binding_count(), before + usize::from(added));
    assert_eq!(sender.owned_string_count(), sender.binding_count());

    let _ = sender.send();
    assert_eq!(sender.owned_string_count(), 0);
    if let Some(data) = mock.sent().first() {
        assert!(data.len() <= 1472);
    }
});
