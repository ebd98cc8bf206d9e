//! Community-based SNMP message carrying a TRAP-V2 PDU.
//!
//! Wire layout (RFC 3416 / RFC 1901):
//!
//! ```text
//! SEQUENCE {
//!     version    INTEGER (1 for v2c),
//!     community  OCTET STRING,
//!     [7] IMPLICIT SEQUENCE {      -- SNMPv2-Trap-PDU
//!         request-id    INTEGER,
//!         error-status  INTEGER (0),
//!         error-index   INTEGER (0),
//!         variable-bindings SEQUENCE OF VarBind
//!     }
//! }
//! ```

use std::sync::atomic::{AtomicI32, Ordering};

use bytes::Bytes;

use crate::ber::{EncodeBuf, length_octets, tag};
use crate::varbind::{VarBind, encode_varbind_list};
use crate::version::Version;

/// Largest encoded INTEGER TLV (tag + length + 4 content octets).
const MAX_INTEGER_TLV: usize = 6;

/// Encoded size of `INTEGER 0` (error-status and error-index).
const ZERO_INTEGER_TLV: usize = 3;

/// Allocate a request ID from the process-wide counter.
///
/// Request IDs stay positive and wrap back to zero after `i32::MAX`.
pub fn next_request_id() -> i32 {
    static NEXT_REQUEST_ID: AtomicI32 = AtomicI32::new(1);
    NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed) & i32::MAX
}

/// Encode a complete v2c trap message.
pub fn encode_trap_v2<'a, I>(
    version: Version,
    community: &[u8],
    request_id: i32,
    varbinds: I,
) -> Bytes
where
    I: DoubleEndedIterator<Item = &'a VarBind>,
{
    let mut buf = EncodeBuf::new();

    buf.push_sequence(|buf| {
        buf.push_constructed(tag::pdu::TRAP_V2, |buf| {
            encode_varbind_list(buf, varbinds);
            buf.push_integer(0); // error-index
            buf.push_integer(0); // error-status
            buf.push_integer(request_id);
        });
        buf.push_octet_string(community);
        buf.push_integer(version.as_i32());
    });

    buf.finish()
}

/// Upper bound on the encoded message size, given the community length and
/// the summed encoded size of every varbind.
pub fn trap_v2_size_bound(community_len: usize, varbinds_len: usize) -> usize {
    let list = tlv_len(varbinds_len);
    let pdu = tlv_len(MAX_INTEGER_TLV + 2 * ZERO_INTEGER_TLV + list);
    let header = ZERO_INTEGER_TLV + tlv_len(community_len);
    tlv_len(header + pdu)
}

/// Size of a TLV with `content` octets of content.
fn tlv_len(content: usize) -> usize {
    1 + length_octets(content) + content
}
