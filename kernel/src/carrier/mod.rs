//! Carrier module: positions, costs, the graph store, and per-run context.
//!
//! Only `graph` reaches into `proof`, for its fingerprint.

pub mod context;
pub mod cost;
pub mod graph;
pub mod position;
