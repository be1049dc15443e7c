//! Shared helpers for the lock test suite.

#![forbid(unsafe_code)]

pub mod oracle;
