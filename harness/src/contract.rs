//! World contract: the minimal trait a maze world must implement.
//!
//! Worlds provide domain data only: node positions, adjacency, and the two
//! endpoints. They do not search, hash, or package anything; those are
//! engine and runner concerns.

use stepwise_kernel::carrier::graph::{GraphBuildError, GraphStore};
use stepwise_kernel::carrier::position::Position;

/// A world the runner can search.
pub trait MazeWorldV1 {
    /// Unique world identifier (e.g., `"corridor_maze"`).
    fn world_id(&self) -> &str;

    /// Build the world's graph.
    ///
    /// # Errors
    ///
    /// Returns [`GraphBuildError`] if the world's node data is inconsistent.
    fn build_graph(&self) -> Result<GraphStore, GraphBuildError>;

    /// Start position. Must be a node position of [`Self::build_graph`].
    fn start(&self) -> Position;

    /// Goal position. Must be a node position of [`Self::build_graph`].
    fn goal(&self) -> Position;
}
