//! Stepwise Harness: world-level orchestration for the search engine.
//!
//! The harness builds a world's graph, runs the engine under a policy, and
//! packages the trace as a self-contained in-memory artifact bundle.
//!
//! The harness does NOT implement search or hashing logic; it delegates to
//! `stepwise_search` and `stepwise_kernel`. Worlds provide domain data only.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bundle;
pub mod config;
pub mod contract;
pub mod runner;
pub mod worlds;
