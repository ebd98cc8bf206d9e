//! Well-known OID name hints.
//!
//! A small hardcoded table of names commonly used in traps. This is NOT MIB
//! support - just friendly names for the handful of OIDs people type.

use crate::Oid;

/// Well-known OID entries.
static WELL_KNOWN_OIDS: &[(&[u32], &str)] = &[
    // SNMPv2-MIB::system
    (&[1, 3, 6, 1, 2, 1, 1, 1, 0], "sysDescr.0"),
    (&[1, 3, 6, 1, 2, 1, 1, 2, 0], "sysObjectID.0"),
    (&[1, 3, 6, 1, 2, 1, 1, 3, 0], "sysUpTime.0"),
    (&[1, 3, 6, 1, 2, 1, 1, 4, 0], "sysContact.0"),
    (&[1, 3, 6, 1, 2, 1, 1, 5, 0], "sysName.0"),
    (&[1, 3, 6, 1, 2, 1, 1, 6, 0], "sysLocation.0"),
    // SNMPv2-MIB::snmpTrap
    (&[1, 3, 6, 1, 6, 3, 1, 1, 4, 1, 0], "snmpTrapOID.0"),
    (&[1, 3, 6, 1, 6, 3, 1, 1, 4, 3, 0], "snmpTrapEnterprise.0"),
    // SNMPv2-MIB::snmpTraps (generic notifications)
    (&[1, 3, 6, 1, 6, 3, 1, 1, 5, 1], "coldStart"),
    (&[1, 3, 6, 1, 6, 3, 1, 1, 5, 2], "warmStart"),
    (&[1, 3, 6, 1, 6, 3, 1, 1, 5, 3], "linkDown"),
    (&[1, 3, 6, 1, 6, 3, 1, 1, 5, 4], "linkUp"),
    (&[1, 3, 6, 1, 6, 3, 1, 1, 5, 5], "authenticationFailure"),
];

/// Look up a friendly name for an OID.
///
/// Returns `None` if the OID is not in the well-known table.
pub fn lookup(oid: &Oid) -> Option<&'static str> {
    let arcs = oid.arcs();
    WELL_KNOWN_OIDS
        .iter()
        .find(|(pattern, _)| *pattern == arcs)
        .map(|(_, name)| *name)
}

/// Parse an OID from string, supporting both dotted notation and well-known
/// names.
///
/// Accepts:
/// - Dotted notation, with or without a leading dot: "1.3.6.1.6.3.1.1.5.1"
/// - Well-known names: "sysUpTime.0", "linkDown"
pub fn parse_oid(s: &str) -> Result<Oid, String> {
    if s.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        let oid = Oid::parse(s).map_err(|e| format!("invalid OID '{}': {}", s, e))?;
        oid.validate_all()
            .map_err(|e| format!("invalid OID '{}': {}", s, e))?;
        return Ok(oid);
    }

    // Names are matched case-insensitively
    WELL_KNOWN_OIDS
        .iter()
        .find(|(_, name)| name.eq_ignore_ascii_case(s))
        .map(|(arcs, _)| Oid::from_slice(arcs))
        .ok_or_else(|| {
            format!(
                "unknown OID name '{}'; use dotted notation (e.g., 1.3.6.1.6.3.1.1.5.1)",
                s
            )
        })
}
