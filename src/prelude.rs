//! Prelude module for convenient imports.
//!
//! ```rust,no_run
//! use snmp_trap_sender::prelude::*;
//! ```
//!
//! This imports:
//! - The sender: [`TrapSender`], [`TrapConfig`]
//! - Binding types: [`Oid`], [`Value`], [`ValueKind`]
//! - Error handling: [`Error`], [`Result`]
//! - The [`oid!`] macro for OID literals

pub use crate::error::{Error, Result};
pub use crate::oid::Oid;
pub use crate::sender::{TrapConfig, TrapSender};
pub use crate::value::{Value, ValueKind};
pub use crate::version::Version;

#[doc(no_inline)]
pub use crate::oid;
