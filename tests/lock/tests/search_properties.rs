//! Search property tests: optimality against an independent Dijkstra,
//! heuristic admissibility, f-consistency, path continuity, and no-path
//! behavior, on the fixed worlds and on generated grid mazes.

use std::collections::BTreeMap;

use proptest::prelude::*;

use lock_tests::oracle::{costs_from, costs_to};
use stepwise_harness::config::GridMazeConfigV1;
use stepwise_harness::contract::MazeWorldV1;
use stepwise_harness::worlds::corridor_maze::CorridorMaze;
use stepwise_harness::worlds::grid_maze::GridMaze;
use stepwise_harness::worlds::line_world::LineWorld;
use stepwise_kernel::carrier::graph::{GraphStore, NodeIndex};
use stepwise_kernel::carrier::position::Position;
use stepwise_search::policy::StrategyV1;
use stepwise_search::search::search;
use stepwise_search::trace::{StepKindV1, TerminationReasonV1, TraceV1};

const STRATEGIES: [StrategyV1; 2] = [StrategyV1::AStar, StrategyV1::Bfs];

fn index_of(graph: &GraphStore, position: Position) -> NodeIndex {
    graph.node_by_position(position).unwrap().index
}

fn path_cost(trace: &TraceV1) -> Option<i64> {
    match trace.metadata().termination_reason {
        TerminationReasonV1::GoalReached { path_cost, .. } => path_cost.value(),
        TerminationReasonV1::FrontierExhausted => None,
    }
}

fn assert_path_continuous(graph: &GraphStore, path: &[Position]) {
    for pair in path.windows(2) {
        let from = index_of(graph, pair[0]);
        let to = index_of(graph, pair[1]);
        assert!(graph.has_edge(from, to), "no edge {} -> {}", pair[0], pair[1]);
    }
}

fn assert_f_consistent(trace: &TraceV1) {
    for (i, step) in trace.steps().iter().enumerate() {
        for (n, state) in step.snapshot.states().iter().enumerate() {
            assert_eq!(
                state.f(),
                state.g().saturating_add(state.h()),
                "step {i} node {n}: f != g + h"
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Fixed worlds
// ---------------------------------------------------------------------------

#[test]
fn manhattan_is_admissible_on_corridor_maze() {
    let graph = CorridorMaze.build_graph().unwrap();
    let goal = index_of(&graph, CorridorMaze.goal());
    let goal_position = CorridorMaze.goal();
    let to_goal = costs_to(&graph, goal);

    let mut reachable = 0;
    for node in graph.nodes() {
        if let Some(true_cost) = to_goal[node.index.get()] {
            reachable += 1;
            let h = node.position.manhattan(goal_position).value().unwrap();
            assert!(h <= true_cost, "{}: h={h} > true cost {true_cost}", node.index);
        }
    }
    assert!(reachable > 1);
}

#[test]
fn astar_cost_matches_dijkstra_on_corridor_maze() {
    let graph = CorridorMaze.build_graph().unwrap();
    let start = index_of(&graph, CorridorMaze.start());
    let goal = index_of(&graph, CorridorMaze.goal());
    let oracle = costs_from(&graph, start)[goal.get()];
    assert_eq!(oracle, Some(1480));

    let trace = search(&graph, StrategyV1::AStar, CorridorMaze.start(), CorridorMaze.goal())
        .unwrap();
    assert_eq!(path_cost(&trace), oracle);
    assert_eq!(trace.metadata().total_expansions, 39);
    assert_eq!(trace.metadata().stale_pops_discarded, 0);
    assert_eq!(trace.len(), 60);
}

#[test]
fn every_snapshot_is_f_consistent() {
    let graph = CorridorMaze.build_graph().unwrap();
    for strategy in STRATEGIES {
        let trace = search(&graph, strategy, CorridorMaze.start(), CorridorMaze.goal()).unwrap();
        assert_f_consistent(&trace);
    }
}

#[test]
fn found_paths_follow_edges() {
    let graph = CorridorMaze.build_graph().unwrap();
    for strategy in STRATEGIES {
        let trace = search(&graph, strategy, CorridorMaze.start(), CorridorMaze.goal()).unwrap();
        let path = trace.final_path().unwrap();
        assert_eq!(path.first(), Some(&CorridorMaze.start()));
        assert_eq!(path.last(), Some(&CorridorMaze.goal()));
        assert_path_continuous(&graph, path);

        // Every partial path shown during unwinding is a prefix of the final one.
        for step in trace.steps() {
            if let (StepKindV1::PathUnwind, Some(prefix)) = (step.kind, &step.path) {
                assert!(path.starts_with(prefix));
            }
        }
    }
}

#[test]
fn line_world_example() {
    let graph = LineWorld.build_graph().unwrap();
    let expected = [Position::new(0, 0), Position::new(1, 0), Position::new(1, 1)];
    for strategy in STRATEGIES {
        let trace = search(&graph, strategy, LineWorld.start(), LineWorld.goal()).unwrap();
        assert_eq!(trace.final_path(), Some(&expected[..]), "{strategy}");
        assert_eq!(path_cost(&trace), Some(2), "{strategy}");
        assert_eq!(trace.last().unwrap().kind, StepKindV1::PathFound);
        assert!(trace
            .last()
            .unwrap()
            .log
            .iter()
            .any(|line| line == "Path length: 3"));
    }
}

#[test]
fn unreachable_goal_ends_in_no_path() {
    let positions = vec![
        Position::new(0, 0),
        Position::new(1, 0),
        Position::new(5, 5),
    ];
    let adjacency = BTreeMap::from([(0, vec![1]), (1, vec![0])]);
    let graph = GraphStore::new(positions, &adjacency).unwrap();

    for strategy in STRATEGIES {
        let trace = search(&graph, strategy, Position::new(0, 0), Position::new(5, 5)).unwrap();
        assert_eq!(trace.last().unwrap().kind, StepKindV1::NoPath, "{strategy}");
        assert!(!trace.is_goal_reached());
        assert_eq!(trace.final_path(), None);
        assert!(trace.steps().iter().all(|s| s.path.is_none()), "{strategy}");
        assert_eq!(
            trace.metadata().termination_reason,
            TerminationReasonV1::FrontierExhausted
        );
        assert_eq!(trace.metadata().total_expansions, 2);
    }
}

#[test]
fn one_way_edge_is_honored() {
    // 0 -> 1 exists, 1 -> 0 does not.
    let positions = vec![Position::new(0, 0), Position::new(0, 1)];
    let adjacency = BTreeMap::from([(0, vec![1])]);
    let graph = GraphStore::new(positions, &adjacency).unwrap();

    for strategy in STRATEGIES {
        let forward = search(&graph, strategy, Position::new(0, 0), Position::new(0, 1)).unwrap();
        assert!(forward.is_goal_reached(), "{strategy}");
        let backward =
            search(&graph, strategy, Position::new(0, 1), Position::new(0, 0)).unwrap();
        assert!(!backward.is_goal_reached(), "{strategy}");
    }
}

// ---------------------------------------------------------------------------
// Generated grid mazes
// ---------------------------------------------------------------------------

fn grid_config() -> impl Strategy<Value = GridMazeConfigV1> {
    (2usize..14, 2usize..14, 0u32..45, any::<u64>()).prop_map(|(width, height, p, seed)| {
        GridMazeConfigV1 {
            width,
            height,
            wall_probability: f64::from(p) / 100.0,
            seed,
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// On unit-cost grids both strategies are optimal, so they agree on
    /// reachability and cost, and the cost matches Dijkstra.
    #[test]
    fn strategies_agree_with_oracle_on_grid_mazes(config in grid_config()) {
        let Ok(maze) = GridMaze::generate(&config) else {
            // Too few open cells for a start and goal.
            return Ok(());
        };
        let graph = maze.build_graph().unwrap();
        let start = index_of(&graph, maze.start());
        let goal = index_of(&graph, maze.goal());
        let oracle = costs_from(&graph, start)[goal.get()];

        let astar = search(&graph, StrategyV1::AStar, maze.start(), maze.goal()).unwrap();
        let bfs = search(&graph, StrategyV1::Bfs, maze.start(), maze.goal()).unwrap();

        prop_assert_eq!(astar.is_goal_reached(), oracle.is_some());
        prop_assert_eq!(bfs.is_goal_reached(), oracle.is_some());
        prop_assert_eq!(path_cost(&astar), oracle);
        prop_assert_eq!(path_cost(&bfs), oracle);

        for trace in [&astar, &bfs] {
            if let Some(path) = trace.final_path() {
                prop_assert_eq!(Some(i64::try_from(path.len()).unwrap() - 1), oracle);
                assert_path_continuous(&graph, path);
            }
            assert_f_consistent(trace);
        }
    }
}
