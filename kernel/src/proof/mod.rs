//! Proof module: canonical JSON and domain-separated hashing.
//!
//! Depends on nothing in `carrier`. Search traces and harness bundles route
//! every digest through this module.

pub mod canon;
pub mod hash;
pub mod hash_domain;
