//! Shared helpers for stepwise benchmark suites.

use stepwise_harness::config::GridMazeConfigV1;
use stepwise_harness::contract::MazeWorldV1;
use stepwise_harness::worlds::corridor_maze::CorridorMaze;
use stepwise_harness::worlds::grid_maze::GridMaze;
use stepwise_kernel::carrier::graph::GraphStore;
use stepwise_kernel::carrier::position::Position;

/// A built graph with its endpoints, so benchmarks can time `search()` alone.
pub struct SearchSetup {
    pub name: String,
    pub graph: GraphStore,
    pub start: Position,
    pub goal: Position,
}

/// Build the graph for `world` once.
///
/// # Panics
///
/// Panics if the world's graph cannot be built. Benchmark setup failures are fatal.
pub fn prepare_search_setup(world: &dyn MazeWorldV1, name: &str) -> SearchSetup {
    SearchSetup {
        name: name.to_string(),
        graph: world.build_graph().expect("build_graph"),
        start: world.start(),
        goal: world.goal(),
    }
}

/// Open square grid with the given seed, sized `side × side`.
///
/// # Panics
///
/// Panics if generation fails.
#[must_use]
pub fn open_grid(side: usize, seed: u64) -> GridMaze {
    GridMaze::generate(&GridMazeConfigV1 {
        width: side,
        height: side,
        wall_probability: 0.2,
        seed,
    })
    .expect("grid maze generation")
}

/// The fixed benchmark regimes: the corridor maze plus grids of increasing size.
#[must_use]
pub fn regimes() -> Vec<SearchSetup> {
    let mut setups = vec![prepare_search_setup(&CorridorMaze, "corridor_maze")];
    for side in [16, 32] {
        setups.push(prepare_search_setup(&open_grid(side, 3), &format!("grid_{side}")));
    }
    setups
}
