//! Trap sender tests over real UDP on the loopback interface.
//!
//! Run with: `cargo test --features testing --test sender_udp`

mod common;

use common::*;
use snmp_trap_sender::{Error, TrapSender, ValueKind};

#[test]
fn test_trap_reaches_receiver() {
    let receiver = TrapReceiver::bind();
    let mut sender = TrapSender::udp(trap_config("127.0.0.1", receiver.port()));

    sender.set_sys_uptime();
    sender.set_trap_oid(LINK_DOWN);
    sender
        .add_variable(&enterprise_var(1), "heap", ValueKind::String)
        .unwrap();
    sender.send().unwrap();

    let data = receiver.recv();
    assert_eq!(data[0], 0x30);
    assert_eq!(data[1] as usize, data.len() - 2);
    assert_eq!(&data[2..13], b"\x02\x01\x01\x04\x06public");
    assert_eq!(data[13], 0xA7);

    #[rustfmt::skip]
    let last_varbind: &[u8] = &[
        0x30, 0x13,
        0x06, 0x0B, 0x2B, 0x06, 0x01, 0x04, 0x01, 0x82, 0xE0, 0x64, 0x01, 0x01, 0x00,
        0x04, 0x04, b'h', b'e', b'a', b'p',
    ];
    assert!(data.ends_with(last_varbind), "unexpected tail: {:02x?}", data);
    assert_eq!(sender.binding_count(), 0);
}

#[test]
fn test_unresolvable_host_fails_open() {
    let mut sender = TrapSender::udp(trap_config("host.invalid.", 162));
    sender.set_trap_oid(LINK_DOWN);

    let err = sender.send().unwrap_err();
    assert!(matches!(err, Error::TransportOpen { .. }));
    assert_eq!(err.target(), Some("host.invalid.:162"));
    assert_eq!(sender.owned_string_count(), 0);
}
