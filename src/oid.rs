//! Object Identifier (OID) type.
//!
//! OIDs are stored as `SmallVec<[u32; 16]>` to avoid heap allocation for common OIDs.

use crate::error::{Error, OidErrorKind, Result};
use smallvec::SmallVec;
use std::fmt;

/// Maximum number of arcs (subidentifiers) allowed in an OID.
///
/// Per RFC 2578 Section 3.5: "there are at most 128 sub-identifiers in a value".
pub const MAX_OID_LEN: usize = 128;

/// Largest second arc under first arc 2 whose combined subidentifier
/// (`80 + arc2`) still fits in 32 bits.
pub const MAX_ARC2_UNDER_2: u32 = u32::MAX - 80;

/// Object Identifier.
///
/// Stored as a sequence of arc values (u32). Uses SmallVec to avoid
/// heap allocation for OIDs with 16 or fewer arcs.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Oid {
    arcs: SmallVec<[u32; 16]>,
}

impl Oid {
    /// Create an empty OID.
    pub fn empty() -> Self {
        Self {
            arcs: SmallVec::new(),
        }
    }

    /// Create an OID from arc values.
    ///
    /// ```
    /// use snmp_trap_sender::oid::Oid;
    ///
    /// let oid = Oid::new([1, 3, 6, 1]);
    /// assert_eq!(oid.len(), 4);
    /// ```
    pub fn new(arcs: impl IntoIterator<Item = u32>) -> Self {
        Self {
            arcs: arcs.into_iter().collect(),
        }
    }

    /// Create an OID from a slice of arcs.
    pub fn from_slice(arcs: &[u32]) -> Self {
        Self {
            arcs: SmallVec::from_slice(arcs),
        }
    }

    /// Parse an OID from dotted string notation (e.g., "1.3.6.1.2.1.1.3.0").
    ///
    /// A single leading dot is accepted (`.1.3.6.1`), as net-snmp tools print
    /// it. Empty arcs elsewhere are rejected. Arc constraints are not checked
    /// here; call [`validate()`](Self::validate) for that.
    ///
    /// ```
    /// use snmp_trap_sender::oid::Oid;
    ///
    /// let oid = Oid::parse(".1.3.6.1.6.3.1.1.5.1").unwrap();
    /// assert_eq!(oid.to_string(), "1.3.6.1.6.3.1.1.5.1");
    ///
    /// assert!(Oid::parse("1..3").is_err());
    /// assert!(Oid::parse("").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let body = s.strip_prefix('.').unwrap_or(s);
        if body.is_empty() {
            return Err(Error::invalid_oid_with_input(OidErrorKind::Empty, s));
        }

        let mut arcs = SmallVec::new();
        for part in body.split('.') {
            let arc: u32 = part
                .parse()
                .map_err(|_| Error::invalid_oid_with_input(OidErrorKind::InvalidArc, s))?;
            arcs.push(arc);
        }

        Ok(Self { arcs })
    }

    /// Get the arc values.
    pub fn arcs(&self) -> &[u32] {
        &self.arcs
    }

    /// Get the number of arcs.
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    /// Check if the OID is empty.
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Validate OID arcs per X.690 Section 8.19.4.
    ///
    /// - arc1 must be 0, 1, or 2
    /// - arc2 must be <= 39 when arc1 is 0 or 1
    /// - arc2 must be <= [`MAX_ARC2_UNDER_2`] when arc1 is 2
    pub fn validate(&self) -> Result<()> {
        self.check_arcs().map_err(Error::invalid_oid)
    }

    /// Validate both arc constraints and the [`MAX_OID_LEN`] limit.
    pub fn validate_all(&self) -> Result<()> {
        self.check_all().map_err(Error::invalid_oid)
    }

    /// Arc and length checks returning the bare kind, for callers that wrap
    /// it in their own error.
    pub(crate) fn check_all(&self) -> std::result::Result<(), OidErrorKind> {
        self.check_arcs()?;
        if self.arcs.len() > MAX_OID_LEN {
            return Err(OidErrorKind::TooManyArcs {
                count: self.arcs.len(),
                max: MAX_OID_LEN,
            });
        }
        Ok(())
    }

    fn check_arcs(&self) -> std::result::Result<(), OidErrorKind> {
        let Some(&arc1) = self.arcs.first() else {
            return Ok(());
        };

        if arc1 > 2 {
            return Err(OidErrorKind::InvalidFirstArc(arc1));
        }

        if let Some(&arc2) = self.arcs.get(1)
            && ((arc1 < 2 && arc2 >= 40) || arc2 > MAX_ARC2_UNDER_2)
        {
            return Err(OidErrorKind::InvalidSecondArc {
                first: arc1,
                second: arc2,
            });
        }

        Ok(())
    }

    /// Encode to BER content octets, in a stack-allocated buffer.
    ///
    /// OID encoding (X.690 Section 8.19):
    /// - First two arcs encoded as (arc1 * 40) + arc2 using base-128
    /// - Remaining arcs encoded as base-128 variable length
    ///
    /// Arcs are not validated; callers validate before encoding.
    pub fn to_ber_smallvec(&self) -> SmallVec<[u8; 64]> {
        let mut bytes = SmallVec::new();

        match self.arcs.len() {
            0 => return bytes,
            1 => encode_subidentifier(&mut bytes, u64::from(self.arcs[0]) * 40),
            _ => {
                // arc2 can exceed 127 when arc1 = 2, so this is base-128 too
                let first = u64::from(self.arcs[0]) * 40 + u64::from(self.arcs[1]);
                encode_subidentifier(&mut bytes, first);
                for &arc in &self.arcs[2..] {
                    encode_subidentifier(&mut bytes, u64::from(arc));
                }
            }
        }

        bytes
    }
}

/// Encode a subidentifier in base-128 variable length.
#[inline]
fn encode_subidentifier(bytes: &mut SmallVec<[u8; 64]>, value: u64) {
    if value == 0 {
        bytes.push(0);
        return;
    }

    let mut count = 0;
    let mut temp = value;
    while temp > 0 {
        count += 1;
        temp >>= 7;
    }

    for i in (0..count).rev() {
        let mut byte = ((value >> (i * 7)) & 0x7F) as u8;
        if i > 0 {
            byte |= 0x80;
        }
        bytes.push(byte);
    }
}

impl fmt::Debug for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Oid({})", self)
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for arc in &self.arcs {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{}", arc)?;
            first = false;
        }
        Ok(())
    }
}

impl std::str::FromStr for Oid {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<&[u32]> for Oid {
    fn from(arcs: &[u32]) -> Self {
        Self::from_slice(arcs)
    }
}

impl<const N: usize> From<[u32; N]> for Oid {
    fn from(arcs: [u32; N]) -> Self {
        Self::new(arcs)
    }
}

/// Macro to create an OID from literal arcs.
///
/// ```
/// use snmp_trap_sender::oid;
///
/// let sys_uptime = oid!(1, 3, 6, 1, 2, 1, 1, 3, 0);
/// assert_eq!(sys_uptime.to_string(), "1.3.6.1.2.1.1.3.0");
/// ```
#[macro_export]
macro_rules! oid {
    ($($arc:expr),* $(,)?) => {
        $crate::oid::Oid::from_slice(&[$($arc),*])
    };
}

/// Well-known OIDs bound by the trap sender.
pub mod well_known {
    use super::Oid;

    /// sysUpTime.0 arcs (SNMPv2-MIB).
    pub const SYS_UPTIME: &[u32] = &[1, 3, 6, 1, 2, 1, 1, 3, 0];

    /// snmpTrapOID.0 arcs (SNMPv2-MIB).
    pub const SNMP_TRAP_OID: &[u32] = &[1, 3, 6, 1, 6, 3, 1, 1, 4, 1, 0];

    /// sysUpTime.0 (1.3.6.1.2.1.1.3.0)
    pub fn sys_uptime() -> Oid {
        Oid::from_slice(SYS_UPTIME)
    }

    /// snmpTrapOID.0 (1.3.6.1.6.3.1.1.4.1.0)
    pub fn snmp_trap_oid() -> Oid {
        Oid::from_slice(SNMP_TRAP_OID)
    }
}
