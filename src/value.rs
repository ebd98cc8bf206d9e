//! SNMP value kinds and typed values.
//!
//! A binding arrives as text plus a [`ValueKind`]. The kind decides how the
//! text is parsed into a [`Value`] and which BER tag the value is sent with.

use crate::ber::{EncodeBuf, tag};
use crate::oid::Oid;
use bytes::Bytes;
use std::net::Ipv4Addr;

/// The SNMP value kinds a trap binding may carry.
///
/// Each kind is identified on the command line and in [`ValueKind::from_tag`]
/// by the type letter net-snmp's `snmptrap` uses.
///
/// net-snmp also accepts `b` (BITS) and the opaque letters `U`, `I`, `F` and
/// `D`. Those have no kind here and [`ValueKind::from_tag`] rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `i`: INTEGER (i32)
    Integer,
    /// `u`: Unsigned32/Gauge32 (u32)
    Unsigned32,
    /// `c`: Counter32
    Counter32,
    /// `C`: Counter64
    Counter64,
    /// `t`: TimeTicks (hundredths of a second)
    TimeTicks,
    /// `a`: IpAddress in dotted-quad form
    IpAddress,
    /// `o`: OBJECT IDENTIFIER in dotted form
    ObjectIdentifier,
    /// `s`: OCTET STRING from UTF-8 text
    String,
    /// `x`: OCTET STRING from hex digits
    HexString,
    /// `d`: OCTET STRING from decimal byte values
    DecimalString,
    /// `n`: NULL (value text is ignored)
    Null,
}

impl ValueKind {
    /// Every supported kind, in tag order.
    pub const ALL: [ValueKind; 11] = [
        ValueKind::Integer,
        ValueKind::Unsigned32,
        ValueKind::Counter32,
        ValueKind::Counter64,
        ValueKind::TimeTicks,
        ValueKind::IpAddress,
        ValueKind::ObjectIdentifier,
        ValueKind::String,
        ValueKind::HexString,
        ValueKind::DecimalString,
        ValueKind::Null,
    ];

    /// Look up a kind by its type letter.
    ///
    /// Returns `None` for anything outside the supported set, which covers
    /// every non-letter (including the punctuation between `'Z'` and `'a'`)
    /// and letters net-snmp defines but this crate does not send.
    ///
    /// ```
    /// use snmp_trap_sender::ValueKind;
    ///
    /// assert_eq!(ValueKind::from_tag('t'), Some(ValueKind::TimeTicks));
    /// assert_eq!(ValueKind::from_tag('_'), None);
    /// assert_eq!(ValueKind::from_tag('b'), None);
    /// ```
    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'i' => Some(Self::Integer),
            'u' => Some(Self::Unsigned32),
            'c' => Some(Self::Counter32),
            'C' => Some(Self::Counter64),
            't' => Some(Self::TimeTicks),
            'a' => Some(Self::IpAddress),
            'o' => Some(Self::ObjectIdentifier),
            's' => Some(Self::String),
            'x' => Some(Self::HexString),
            'd' => Some(Self::DecimalString),
            'n' => Some(Self::Null),
            _ => None,
        }
    }

    /// The type letter for this kind.
    pub const fn tag(self) -> char {
        match self {
            Self::Integer => 'i',
            Self::Unsigned32 => 'u',
            Self::Counter32 => 'c',
            Self::Counter64 => 'C',
            Self::TimeTicks => 't',
            Self::IpAddress => 'a',
            Self::ObjectIdentifier => 'o',
            Self::String => 's',
            Self::HexString => 'x',
            Self::DecimalString => 'd',
            Self::Null => 'n',
        }
    }

    /// Parse `text` as a value of this kind.
    ///
    /// Returns `None` when the text does not fit the kind.
    pub fn parse(self, text: &str) -> Option<Value> {
        let trimmed = text.trim();
        match self {
            Self::Integer => trimmed.parse().ok().map(Value::Integer),
            Self::Unsigned32 => trimmed.parse().ok().map(Value::Gauge32),
            Self::Counter32 => trimmed.parse().ok().map(Value::Counter32),
            Self::Counter64 => trimmed.parse().ok().map(Value::Counter64),
            Self::TimeTicks => trimmed.parse().ok().map(Value::TimeTicks),
            Self::IpAddress => trimmed
                .parse::<Ipv4Addr>()
                .ok()
                .map(|addr| Value::IpAddress(addr.octets())),
            Self::ObjectIdentifier => {
                let oid = Oid::parse(trimmed).ok()?;
                oid.check_all().ok()?;
                Some(Value::ObjectIdentifier(oid))
            }
            Self::String => Some(Value::OctetString(Bytes::copy_from_slice(text.as_bytes()))),
            Self::HexString => parse_hex_string(text).map(|b| Value::OctetString(b.into())),
            Self::DecimalString => parse_decimal_string(text).map(|b| Value::OctetString(b.into())),
            Self::Null => Some(Value::Null),
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Integer => "INTEGER",
            Self::Unsigned32 => "Unsigned32",
            Self::Counter32 => "Counter32",
            Self::Counter64 => "Counter64",
            Self::TimeTicks => "TimeTicks",
            Self::IpAddress => "IpAddress",
            Self::ObjectIdentifier => "OBJECT IDENTIFIER",
            Self::String => "STRING",
            Self::HexString => "Hex-STRING",
            Self::DecimalString => "Decimal-STRING",
            Self::Null => "NULL",
        };
        f.write_str(name)
    }
}

/// Parse hex digits into bytes. Whitespace, colons and dashes separate groups.
fn parse_hex_string(s: &str) -> Option<Vec<u8>> {
    let mut digits = Vec::with_capacity(s.len());
    for c in s.chars() {
        match c {
            c if c.is_ascii_hexdigit() => digits.push(c as u8),
            c if c.is_ascii_whitespace() || c == ':' || c == '-' => {}
            _ => return None,
        }
    }
    if !digits.len().is_multiple_of(2) {
        return None;
    }

    digits
        .chunks(2)
        .map(|pair| {
            let hi = (pair[0] as char).to_digit(16)?;
            let lo = (pair[1] as char).to_digit(16)?;
            Some((hi * 16 + lo) as u8)
        })
        .collect()
}

/// Parse whitespace- or dot-separated decimal byte values.
fn parse_decimal_string(s: &str) -> Option<Vec<u8>> {
    s.split(|c: char| c.is_ascii_whitespace() || c == '.')
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<u8>().ok())
        .collect()
}

/// Typed SNMP value ready for encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// INTEGER (ASN.1 primitive, signed 32-bit)
    Integer(i32),

    /// OCTET STRING (arbitrary bytes)
    OctetString(Bytes),

    /// NULL
    Null,

    /// OBJECT IDENTIFIER
    ObjectIdentifier(Oid),

    /// IpAddress (4 bytes, big-endian)
    IpAddress([u8; 4]),

    /// Counter32 (unsigned 32-bit, wrapping)
    Counter32(u32),

    /// Gauge32 / Unsigned32 (unsigned 32-bit, non-wrapping)
    Gauge32(u32),

    /// TimeTicks (hundredths of seconds since epoch)
    TimeTicks(u32),

    /// Counter64 (unsigned 64-bit, wrapping; SNMPv2c and later)
    Counter64(u64),
}

impl Value {
    /// Encode to BER.
    pub fn encode(&self, buf: &mut EncodeBuf) {
        match self {
            Value::Integer(v) => buf.push_integer(*v),
            Value::OctetString(data) => buf.push_octet_string(data),
            Value::Null => buf.push_null(),
            Value::ObjectIdentifier(oid) => buf.push_oid(oid),
            Value::IpAddress(addr) => buf.push_ip_address(*addr),
            Value::Counter32(v) => buf.push_unsigned32(tag::application::COUNTER32, *v),
            Value::Gauge32(v) => buf.push_unsigned32(tag::application::GAUGE32, *v),
            Value::TimeTicks(v) => buf.push_unsigned32(tag::application::TIMETICKS, *v),
            Value::Counter64(v) => buf.push_integer64(*v),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::OctetString(data) => match std::str::from_utf8(data) {
                Ok(s) => write!(f, "{}", s),
                Err(_) => {
                    write!(f, "0x")?;
                    for byte in data.iter() {
                        write!(f, "{:02x}", byte)?;
                    }
                    Ok(())
                }
            },
            Value::Null => write!(f, "NULL"),
            Value::ObjectIdentifier(oid) => write!(f, "{}", oid),
            Value::IpAddress(addr) => write!(f, "{}", Ipv4Addr::from(*addr)),
            Value::Counter32(v) | Value::Gauge32(v) => write!(f, "{}", v),
            Value::TimeTicks(v) => {
                let secs = v / 100;
                let days = secs / 86400;
                let hours = (secs % 86400) / 3600;
                let mins = (secs % 3600) / 60;
                let s = secs % 60;
                write!(f, "{}d {}h {}m {}s", days, hours, mins, s)
            }
            Value::Counter64(v) => write!(f, "{}", v),
        }
    }
}
