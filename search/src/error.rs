//! Typed search errors.
//!
//! `SearchError` covers failures that produce no trace. Running out of
//! frontier without reaching the goal is not an error: it ends the trace
//! with a [`crate::trace::StepKindV1::NoPath`] step.

use stepwise_kernel::carrier::graph::NodeIndex;
use stepwise_kernel::carrier::position::Position;

/// Which search endpoint a lookup was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Goal => f.write_str("goal"),
        }
    }
}

/// Fatal search failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Start or goal position is not in the graph. Raised before any run
    /// state is touched.
    #[error("{endpoint} position {position} not found in graph")]
    NotFound {
        endpoint: Endpoint,
        position: Position,
    },
    /// The parent chain from the goal is longer than the graph, so it must
    /// contain a cycle.
    #[error(
        "parent chain from goal {goal} exceeded node count {node_count} after {walked} links"
    )]
    GraphIntegrity {
        goal: NodeIndex,
        walked: usize,
        node_count: usize,
    },
}
