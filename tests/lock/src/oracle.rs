//! Reference shortest-path costs, computed independently of the engine.
//!
//! Plain Dijkstra over Manhattan edge weights, used to check path optimality
//! and heuristic admissibility.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use stepwise_kernel::carrier::graph::{GraphStore, NodeIndex};

fn edge_cost(graph: &GraphStore, from: NodeIndex, to: NodeIndex) -> i64 {
    match (graph.position(from), graph.position(to)) {
        (Some(a), Some(b)) => a.manhattan(b).value().unwrap_or(i64::MAX),
        _ => i64::MAX,
    }
}

/// Cheapest cost from `start` to every node following edge direction.
/// `None` for unreachable nodes.
#[must_use]
pub fn costs_from(graph: &GraphStore, start: NodeIndex) -> Vec<Option<i64>> {
    let mut dist: Vec<Option<i64>> = vec![None; graph.len()];
    let mut heap = BinaryHeap::new();
    dist[start.get()] = Some(0);
    heap.push(Reverse((0i64, start)));
    while let Some(Reverse((d, u))) = heap.pop() {
        if dist[u.get()].is_some_and(|best| d > best) {
            continue;
        }
        for &v in graph.neighbors(u) {
            let nd = d.saturating_add(edge_cost(graph, u, v));
            if dist[v.get()].map_or(true, |best| nd < best) {
                dist[v.get()] = Some(nd);
                heap.push(Reverse((nd, v)));
            }
        }
    }
    dist
}

/// Cheapest cost from every node to `goal` following edge direction.
#[must_use]
pub fn costs_to(graph: &GraphStore, goal: NodeIndex) -> Vec<Option<i64>> {
    let mut reversed: Vec<Vec<NodeIndex>> = vec![Vec::new(); graph.len()];
    for node in graph.nodes() {
        for &to in &node.neighbors {
            reversed[to.get()].push(node.index);
        }
    }

    let mut dist: Vec<Option<i64>> = vec![None; graph.len()];
    let mut heap = BinaryHeap::new();
    dist[goal.get()] = Some(0);
    heap.push(Reverse((0i64, goal)));
    while let Some(Reverse((d, u))) = heap.pop() {
        if dist[u.get()].is_some_and(|best| d > best) {
            continue;
        }
        for &v in &reversed[u.get()] {
            let nd = d.saturating_add(edge_cost(graph, v, u));
            if dist[v.get()].map_or(true, |best| nd < best) {
                dist[v.get()] = Some(nd);
                heap.push(Reverse((nd, v)));
            }
        }
    }
    dist
}
