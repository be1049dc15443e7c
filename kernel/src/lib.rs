//! Stepwise Kernel: the static graph and per-run state underneath every search.
//!
//! # API Surface
//!
//! - [`carrier::graph::GraphStore`] -- immutable node registry (index, position, adjacency)
//! - [`carrier::context::RunContext`] -- per-run mutable node state (g, h, f, parent)
//! - [`carrier::context::ContextSnapshotV1`] -- reference-free copy of a run context
//! - [`proof::canon::canonical_json_bytes`] -- the single canonical JSON serializer
//! - [`proof::hash::canonical_hash`] -- domain-separated SHA-256
//!
//! # Module Dependency Direction
//!
//! `proof` ← `carrier`
//!
//! One-way only. `proof` depends on nothing internal; `carrier::graph` uses it
//! for fingerprints.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod carrier;
pub mod proof;
