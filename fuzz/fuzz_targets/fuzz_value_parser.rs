#![no_main]

use libfuzzer_sys::fuzz_target;

use snmp_trap_sender::ValueKind;
use snmp_trap_sender::ber::EncodeBuf;
use snmp_trap_sender::oid::Oid;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    let _ = Oid::parse(s).map(|oid| oid.validate_all());

    // Whatever parses must also encode
    for kind in ValueKind::ALL {
        if let Some(value) = kind.parse(s) {
            let mut buf = EncodeBuf::new();
            value.encode(&mut buf);
            assert!(!buf.is_empty());
        }
    }
});
