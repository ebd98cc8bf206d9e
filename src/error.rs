//! Error types for snmp-trap-sender.
//!
//! Every failure is reported twice: once as a `tracing::warn!` event at the
//! failure site, and once as an [`Error`] returned to the caller. None of them
//! leave the sender in a state that needs cleanup beyond dropping it.

use crate::oid::Oid;
use crate::value::ValueKind;
use crate::version::Version;

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a binding call was rejected before any allocation happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingErrorKind {
    /// The variable OID has no arcs.
    EmptyOid,
    /// The type tag is not a letter, or not one of the supported kinds.
    UnsupportedTag(char),
}

impl std::fmt::Display for BindingErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyOid => write!(f, "empty OID"),
            Self::UnsupportedTag(c) => write!(f, "unsupported type tag {:?}", c),
        }
    }
}

/// Reasons the trap message refused to take a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendErrorKind {
    /// The value text does not parse as the requested kind.
    InvalidValue { kind: ValueKind },
    /// The variable OID breaks X.690 arc rules or is too long.
    InvalidOid(OidErrorKind),
    /// The encoded message would exceed the configured maximum size.
    MessageTooLarge { size: usize, max: usize },
}

impl std::fmt::Display for AppendErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { kind } => write!(f, "value does not parse as {}", kind),
            Self::InvalidOid(kind) => write!(f, "invalid OID: {}", kind),
            Self::MessageTooLarge { size, max } => {
                write!(f, "message would be {} bytes, maximum is {}", size, max)
            }
        }
    }
}

/// OID validation error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OidErrorKind {
    /// Empty OID string.
    Empty,
    /// Invalid arc value.
    InvalidArc,
    /// First arc must be 0, 1, or 2.
    InvalidFirstArc(u32),
    /// Second arc too large for first arc value.
    InvalidSecondArc { first: u32, second: u32 },
    /// OID has too many arcs (exceeds MAX_OID_LEN).
    TooManyArcs { count: usize, max: usize },
}

impl std::fmt::Display for OidErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty OID"),
            Self::InvalidArc => write!(f, "invalid arc value"),
            Self::InvalidFirstArc(v) => write!(f, "first arc must be 0, 1, or 2, got {}", v),
            Self::InvalidSecondArc { first, second } => {
                write!(f, "second arc {} too large for first arc {}", second, first)
            }
            Self::TooManyArcs { count, max } => {
                write!(f, "OID has {} arcs, exceeds maximum {}", count, max)
            }
        }
    }
}

/// Library error type.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// No target host was configured; the sender is disabled.
    #[error("illegal SNMP target: no host configured")]
    InvalidTarget,

    /// TRAP-V2 PDUs can only be carried by SNMPv2c community messages.
    #[error("{version} cannot carry a TRAP-V2 PDU")]
    UnsupportedVersion { version: Version },

    /// Operation on a sender that was constructed without a valid target.
    #[error("trap sender is disabled")]
    Disabled,

    /// Malformed binding arguments.
    #[error("illegal SNMP trap parameter: {kind}")]
    InvalidBinding { kind: BindingErrorKind },

    /// Invalid OID format.
    #[error("invalid OID: {kind}")]
    InvalidOid {
        kind: OidErrorKind,
        input: Option<Box<str>>,
    },

    /// The owned copy of a value string could not be allocated.
    #[error("could not allocate {requested} bytes for variable string")]
    Allocation { requested: usize },

    /// The trap message rejected a binding.
    #[error("could not append {oid} to variable list: {kind}")]
    Append { oid: Oid, kind: AppendErrorKind },

    /// The transport connection could not be opened.
    #[error("failed to open SNMP trap session to {target}: {source}")]
    TransportOpen {
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// The trap could not be transmitted.
    #[error("send SNMP trap to {target} failed: {source}")]
    TransportSend {
        target: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a binding validation error.
    pub fn binding(kind: BindingErrorKind) -> Self {
        Self::InvalidBinding { kind }
    }

    /// Create an append error for `oid`.
    pub fn append(oid: Oid, kind: AppendErrorKind) -> Self {
        Self::Append { oid, kind }
    }

    /// Create an invalid OID error from a kind (no input string).
    pub fn invalid_oid(kind: OidErrorKind) -> Self {
        Self::InvalidOid { kind, input: None }
    }

    /// Create an invalid OID error with the input string that failed.
    pub fn invalid_oid_with_input(kind: OidErrorKind, input: impl Into<Box<str>>) -> Self {
        Self::InvalidOid {
            kind,
            input: Some(input.into()),
        }
    }

    /// Whether this error came from the transport (open or transmit).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::TransportOpen { .. } | Self::TransportSend { .. })
    }

    /// Get the `host:port` target if this error has one.
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::TransportOpen { target, .. } | Self::TransportSend { target, .. } => {
                Some(target)
            }
            _ => None,
        }
    }
}
