//! `LineWorld`: three nodes in an L, `(0, 0) - (1, 0) - (1, 1)`.
//!
//! The smallest world with a non-trivial path. Both strategies return the
//! full three-node path at total cost 2.

use std::collections::BTreeMap;

use stepwise_kernel::carrier::graph::{GraphBuildError, GraphStore};
use stepwise_kernel::carrier::position::Position;

use crate::contract::MazeWorldV1;

pub struct LineWorld;

impl MazeWorldV1 for LineWorld {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "line_world"
    }

    fn build_graph(&self) -> Result<GraphStore, GraphBuildError> {
        let positions = vec![Position::new(0, 0), Position::new(1, 0), Position::new(1, 1)];
        let adjacency = BTreeMap::from([(0, vec![1]), (1, vec![0, 2]), (2, vec![1])]);
        GraphStore::new(positions, &adjacency)
    }

    fn start(&self) -> Position {
        Position::new(0, 0)
    }

    fn goal(&self) -> Position {
        Position::new(1, 1)
    }
}
