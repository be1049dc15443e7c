//! Search determinism lock tests: repeated searches on fixed inputs produce
//! byte-identical traces, in one process and across threads.

use std::collections::BTreeMap;

use stepwise_harness::contract::MazeWorldV1;
use stepwise_harness::worlds::corridor_maze::CorridorMaze;
use stepwise_kernel::carrier::graph::GraphStore;
use stepwise_kernel::carrier::position::Position;
use stepwise_search::policy::{PathPlaybackV1, SearchPolicyV1, StrategyV1};
use stepwise_search::search::{search, search_with_policy};
use stepwise_search::trace::StepKindV1;

const STRATEGIES: [StrategyV1; 2] = [StrategyV1::AStar, StrategyV1::Bfs];

fn corridor() -> GraphStore {
    CorridorMaze.build_graph().unwrap()
}

// ---------------------------------------------------------------------------
// In-process
// ---------------------------------------------------------------------------

#[test]
fn search_determinism_inproc_n10() {
    let graph = corridor();
    for strategy in STRATEGIES {
        let first = search(&graph, strategy, CorridorMaze.start(), CorridorMaze.goal()).unwrap();
        let first_bytes = first.to_canonical_json_bytes().unwrap();
        let first_digest = first.digest().unwrap();

        for i in 1..10 {
            let trace =
                search(&graph, strategy, CorridorMaze.start(), CorridorMaze.goal()).unwrap();
            assert_eq!(
                trace.to_canonical_json_bytes().unwrap(),
                first_bytes,
                "{strategy} run {i}: canonical bytes differ"
            );
            assert_eq!(trace.digest().unwrap(), first_digest, "{strategy} run {i}: digest differs");
        }
    }
}

#[test]
fn step_digests_match_across_runs() {
    let graph = corridor();
    let a = search(&graph, StrategyV1::AStar, CorridorMaze.start(), CorridorMaze.goal()).unwrap();
    let b = search(&graph, StrategyV1::AStar, CorridorMaze.start(), CorridorMaze.goal()).unwrap();
    assert_eq!(a.step_digests().unwrap(), b.step_digests().unwrap());
}

#[test]
fn fresh_graph_build_does_not_change_trace() {
    let a = search(&corridor(), StrategyV1::Bfs, CorridorMaze.start(), CorridorMaze.goal())
        .unwrap();
    let b = search(&corridor(), StrategyV1::Bfs, CorridorMaze.start(), CorridorMaze.goal())
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn strategies_produce_distinct_traces() {
    let graph = corridor();
    let a = search(&graph, StrategyV1::AStar, CorridorMaze.start(), CorridorMaze.goal()).unwrap();
    let b = search(&graph, StrategyV1::Bfs, CorridorMaze.start(), CorridorMaze.goal()).unwrap();
    assert_ne!(a.digest().unwrap(), b.digest().unwrap());
    assert_eq!(a.final_path(), b.final_path());
}

#[test]
fn playback_mode_changes_digest_but_not_path() {
    let graph = corridor();
    let terminal_only = SearchPolicyV1 {
        strategy: StrategyV1::AStar,
        path_playback: PathPlaybackV1::TerminalOnly,
    };
    let a = search_with_policy(
        &graph,
        &SearchPolicyV1::default(),
        CorridorMaze.start(),
        CorridorMaze.goal(),
    )
    .unwrap();
    let b = search_with_policy(&graph, &terminal_only, CorridorMaze.start(), CorridorMaze.goal())
        .unwrap();
    assert_ne!(a.digest().unwrap(), b.digest().unwrap());
    assert_eq!(a.final_path(), b.final_path());

    let unwind_steps = a
        .steps()
        .iter()
        .filter(|s| s.kind == StepKindV1::PathUnwind)
        .count();
    assert_eq!(a.len(), b.len() + unwind_steps);
}

// ---------------------------------------------------------------------------
// Shared graph across threads
// ---------------------------------------------------------------------------

#[test]
fn concurrent_searches_on_shared_graph_agree() {
    let graph = corridor();
    let expected: BTreeMap<&str, String> = STRATEGIES
        .iter()
        .map(|&s| {
            let trace = search(&graph, s, CorridorMaze.start(), CorridorMaze.goal()).unwrap();
            (s.as_str(), trace.digest().unwrap().to_string())
        })
        .collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let graph = &graph;
                let strategy = STRATEGIES[i % 2];
                scope.spawn(move || {
                    let trace =
                        search(graph, strategy, CorridorMaze.start(), CorridorMaze.goal()).unwrap();
                    (strategy, trace.digest().unwrap().to_string())
                })
            })
            .collect();
        for handle in handles {
            let (strategy, digest) = handle.join().unwrap();
            assert_eq!(digest, expected[strategy.as_str()], "{strategy} digest differs on thread");
        }
    });
}

// ---------------------------------------------------------------------------
// Hashed surfaces
// ---------------------------------------------------------------------------

#[test]
fn canonical_trace_bytes_have_no_environment_data() {
    let positions = vec![Position::new(0, 0), Position::new(1, 0)];
    let adjacency = BTreeMap::from([(0, vec![1]), (1, vec![0])]);
    let graph = GraphStore::new(positions, &adjacency).unwrap();
    let trace = search(&graph, StrategyV1::AStar, Position::new(0, 0), Position::new(1, 0))
        .unwrap();
    let text = String::from_utf8(trace.to_canonical_json_bytes().unwrap()).unwrap();
    for pattern in ["/home/", "/tmp/", "/Users/", "hostname", "timestamp"] {
        assert!(!text.contains(pattern), "trace bytes contain {pattern}");
    }
    assert!(trace.digest().unwrap().as_str().starts_with("sha256:"));
}
