//! Stepwise Search: A* and BFS over a static graph, recorded as a replayable trace.
//!
//! This crate depends only on `stepwise_kernel` — it does NOT depend on
//! `stepwise_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! stepwise_kernel  ←  stepwise_search  ←  stepwise_harness
//! (graph, context)    (engine, trace)      (worlds, runner, bundle)
//! ```
//!
//! # Key types
//!
//! - [`search::search`] — run one search to completion, returning a [`trace::TraceV1`]
//! - [`trace::StepV1`] — one immutable record: frontier, explored set, path, log, snapshot
//! - [`replay::ReplayCursor`] — step forward/backward through a finished trace
//! - [`policy::SearchPolicyV1`] — strategy and path playback configuration
//! - [`frontier::AstarFrontier`] / [`frontier::FifoFrontier`] — the two open-set shapes

#![forbid(unsafe_code)]

mod astar;
mod bfs;
pub mod error;
pub mod frontier;
pub mod node;
pub mod policy;
pub mod replay;
pub mod search;
pub mod trace;
