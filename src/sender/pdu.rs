//! The variable list of one outgoing trap.

use bytes::Bytes;

use super::arena::{ArenaKey, StringArena};
use crate::error::{AppendErrorKind, Error, Result};
use crate::message::{encode_trap_v2, trap_v2_size_bound};
use crate::oid::Oid;
use crate::value::{Value, ValueKind};
use crate::varbind::VarBind;
use crate::version::Version;

/// One appended variable.
#[derive(Debug, Clone)]
pub struct Binding {
    varbind: VarBind,
    kind: ValueKind,
    text: ArenaKey,
}

impl Binding {
    pub fn varbind(&self) -> &VarBind {
        &self.varbind
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Key of the value text in the message's arena.
    pub fn text_key(&self) -> ArenaKey {
        self.text
    }
}

/// Borrowed view of a binding together with its value text.
#[derive(Debug, Clone, Copy)]
pub struct BindingView<'a> {
    pub oid: &'a Oid,
    pub kind: ValueKind,
    pub value: &'a Value,
    pub text: &'a str,
}

/// Ordered bindings plus the strings they were parsed from.
///
/// Binding `i` owns arena slot `i`; both grow together and are dropped
/// together by [`reset`](Self::reset).
#[derive(Debug)]
pub struct TrapMessage {
    bindings: Vec<Binding>,
    arena: StringArena,
    varbinds_len: usize,
    community_len: usize,
    max_size: usize,
}

impl TrapMessage {
    /// An empty message whose encoding must fit in `max_size` bytes.
    pub fn new(community_len: usize, max_size: usize) -> Self {
        Self {
            bindings: Vec::new(),
            arena: StringArena::new(),
            varbinds_len: 0,
            community_len,
            max_size,
        }
    }

    /// Parse `text` as `kind` and append it under `oid`.
    ///
    /// On error nothing is appended and `text` is dropped.
    pub fn append(&mut self, oid: Oid, kind: ValueKind, text: String) -> Result<()> {
        if let Err(err) = oid.check_all() {
            return Err(Error::append(oid, AppendErrorKind::InvalidOid(err)));
        }
        let Some(value) = kind.parse(&text) else {
            return Err(Error::append(oid, AppendErrorKind::InvalidValue { kind }));
        };

        let varbind = VarBind::new(oid, value);
        let varbinds_len = self.varbinds_len + varbind.encoded_size();
        let size = trap_v2_size_bound(self.community_len, varbinds_len);
        if size > self.max_size {
            return Err(Error::append(
                varbind.oid,
                AppendErrorKind::MessageTooLarge {
                    size,
                    max: self.max_size,
                },
            ));
        }

        let key = self.arena.push(text);
        self.bindings.push(Binding {
            varbind,
            kind,
            text: key,
        });
        self.varbinds_len = varbinds_len;
        debug_assert_eq!(self.arena.len(), self.bindings.len());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn arena(&self) -> &StringArena {
        &self.arena
    }

    /// Iterate bindings with their value text.
    pub fn views(&self) -> impl Iterator<Item = BindingView<'_>> + '_ {
        self.bindings.iter().map(|b| BindingView {
            oid: &b.varbind.oid,
            kind: b.kind,
            value: &b.varbind.value,
            text: self.arena.get(b.text).unwrap_or_default(),
        })
    }

    /// Upper bound on the encoded size of the current message.
    pub fn size_bound(&self) -> usize {
        trap_v2_size_bound(self.community_len, self.varbinds_len)
    }

    /// Encode as a community message carrying a TRAP-V2 PDU.
    pub fn encode(&self, version: Version, community: &[u8], request_id: i32) -> Bytes {
        encode_trap_v2(
            version,
            community,
            request_id,
            self.bindings.iter().map(Binding::varbind),
        )
    }

    /// Drop every binding and owned string, leaving a fresh empty message.
    pub fn reset(&mut self) {
        *self = Self::new(self.community_len, self.max_size);
    }
}
