//! Shared test utilities for snmp-trap-sender integration tests.

// Allow dead code and unused imports since not all test files use all utilities
#![allow(dead_code)]
#![allow(unused_imports)]

mod fixtures;
mod receiver;

pub use fixtures::*;
pub use receiver::TrapReceiver;
