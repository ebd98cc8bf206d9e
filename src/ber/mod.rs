//! BER (Basic Encoding Rules) encoder for SNMP.
//!
//! Only the encoding half of X.690 is needed to emit traps; the encoder
//! follows net-snmp's minimal-length choices so captured datagrams compare
//! byte-for-byte with `snmptrap` output.

mod encode;
mod length;
pub mod tag;

pub use encode::*;
pub use length::*;
