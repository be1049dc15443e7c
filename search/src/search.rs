//! Search entry point and the step-recording skeleton shared by both strategies.
//!
//! [`SearchRun`] owns everything one invocation mutates: a fresh
//! [`RunContext`], the explored set, and the growing step list. The strategy
//! loops in `astar` and `bfs` drive it; path unwinding and termination are
//! identical for both and live here.

use std::collections::BTreeSet;

use stepwise_kernel::carrier::context::RunContext;
use stepwise_kernel::carrier::graph::{GraphStore, NodeIndex};
use stepwise_kernel::carrier::position::Position;

use crate::error::{Endpoint, SearchError};
use crate::policy::{PathPlaybackV1, SearchPolicyV1, StrategyV1};
use crate::trace::{StepKindV1, StepV1, TerminationReasonV1, TraceMetadataV1, TraceV1};
use crate::{astar, bfs};

/// Run one search with default path playback.
///
/// # Errors
///
/// See [`search_with_policy`].
pub fn search(
    graph: &GraphStore,
    strategy: StrategyV1,
    start: Position,
    goal: Position,
) -> Result<TraceV1, SearchError> {
    search_with_policy(graph, &SearchPolicyV1::for_strategy(strategy), start, goal)
}

/// Run one search to completion and return its trace.
///
/// Exhausting the frontier is not an error: the trace ends with a
/// [`StepKindV1::NoPath`] step.
///
/// # Errors
///
/// - [`SearchError::NotFound`] if `start` or `goal` is not a node position.
///   Checked before any run state exists.
/// - [`SearchError::GraphIntegrity`] if the goal's parent chain is cyclic.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(strategy = %policy.strategy, start = %start, goal = %goal)
)]
pub fn search_with_policy(
    graph: &GraphStore,
    policy: &SearchPolicyV1,
    start: Position,
    goal: Position,
) -> Result<TraceV1, SearchError> {
    let start_index = lookup(graph, Endpoint::Start, start)?;
    let goal_index = lookup(graph, Endpoint::Goal, goal)?;

    let run = SearchRun::new(graph, *policy, start_index, goal_index);
    match policy.strategy {
        StrategyV1::AStar => astar::run(run),
        StrategyV1::Bfs => bfs::run(run),
    }
}

fn lookup(
    graph: &GraphStore,
    endpoint: Endpoint,
    position: Position,
) -> Result<NodeIndex, SearchError> {
    graph
        .node_by_position(position)
        .map(|node| node.index)
        .ok_or(SearchError::NotFound { endpoint, position })
}

/// Walk parent links from `goal` back to a root and return the path in
/// start-to-goal order.
///
/// # Errors
///
/// Returns [`SearchError::GraphIntegrity`] if the chain is longer than the
/// context, which can only happen if it loops.
pub fn reconstruct_path(
    context: &RunContext,
    goal: NodeIndex,
) -> Result<Vec<NodeIndex>, SearchError> {
    let limit = context.len();
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(parent) = context.state(current).parent() {
        if path.len() >= limit {
            return Err(SearchError::GraphIntegrity {
                goal,
                walked: path.len(),
                node_count: limit,
            });
        }
        path.push(parent);
        current = parent;
    }
    path.reverse();
    Ok(path)
}

/// Mutable state of one search invocation.
pub(crate) struct SearchRun<'g> {
    pub(crate) graph: &'g GraphStore,
    pub(crate) ctx: RunContext,
    pub(crate) start: NodeIndex,
    pub(crate) goal: NodeIndex,
    pub(crate) stale_pops: u64,
    positions: Vec<Position>,
    explored: BTreeSet<Position>,
    policy: SearchPolicyV1,
    steps: Vec<StepV1>,
    expansions: u64,
}

impl<'g> SearchRun<'g> {
    fn new(graph: &'g GraphStore, policy: SearchPolicyV1, start: NodeIndex, goal: NodeIndex) -> Self {
        Self {
            graph,
            ctx: RunContext::new(graph.len()),
            start,
            goal,
            stale_pops: 0,
            positions: graph.nodes().map(|node| node.position).collect(),
            explored: BTreeSet::new(),
            policy,
            steps: Vec::new(),
            expansions: 0,
        }
    }

    pub(crate) fn position(&self, index: NodeIndex) -> Position {
        self.positions[index.get()]
    }

    /// `"Node i at (x, y)"`.
    pub(crate) fn label(&self, index: NodeIndex) -> String {
        format!("Node {index} at {}", self.position(index))
    }

    pub(crate) fn is_explored(&self, index: NodeIndex) -> bool {
        self.explored.contains(&self.position(index))
    }

    /// Move `index` into the explored set.
    pub(crate) fn explore(&mut self, index: NodeIndex) {
        if self.explored.insert(self.position(index)) {
            self.expansions += 1;
        }
    }

    /// Append a step, capturing the explored set and a snapshot of the context.
    pub(crate) fn record(
        &mut self,
        kind: StepKindV1,
        chosen: Option<NodeIndex>,
        frontier: Vec<NodeIndex>,
        path: Option<Vec<Position>>,
        log: Vec<String>,
    ) {
        self.steps.push(StepV1 {
            kind,
            chosen,
            frontier,
            explored: self.explored.clone(),
            path,
            log,
            snapshot: self.ctx.snapshot(),
        });
    }

    pub(crate) fn goal_reached_line(&self) -> String {
        format!("Goal node {} reached! Path reconstruction starts.", self.goal)
    }

    /// Reconstruct the goal's path, emit playback and terminal steps, and
    /// close the trace.
    pub(crate) fn finish_with_path(
        mut self,
        frontier: &[NodeIndex],
        frontier_high_water: u64,
    ) -> Result<TraceV1, SearchError> {
        let indices = reconstruct_path(&self.ctx, self.goal)?;
        let path: Vec<Position> = indices.iter().map(|&i| self.position(i)).collect();
        let n = path.len();

        if self.policy.path_playback == PathPlaybackV1::Stepwise {
            for k in 1..=n {
                let prefix = path[..k].to_vec();
                let line = format!("Path step {k}/{n}: {}", format_positions(&prefix));
                self.record(
                    StepKindV1::PathUnwind,
                    Some(self.goal),
                    frontier.to_vec(),
                    Some(prefix),
                    vec![line],
                );
            }
        }

        let path_cost = self.ctx.state(self.goal).g();
        let mut log = vec![
            "Path found!".to_string(),
            format!("Path length: {n}"),
            format!("Total cost (g): {path_cost}"),
            "Path (from start to goal):".to_string(),
        ];
        log.extend(
            indices
                .iter()
                .zip(&path)
                .map(|(index, position)| format!("Node {index}: {position}")),
        );
        self.record(
            StepKindV1::PathFound,
            Some(self.goal),
            frontier.to_vec(),
            Some(path),
            log,
        );

        tracing::info!(
            strategy = %self.policy.strategy,
            path_len = n,
            path_cost = %path_cost,
            expansions = self.expansions,
            steps = self.steps.len(),
            "goal reached"
        );
        let reason = TerminationReasonV1::GoalReached {
            node: self.goal,
            path_cost,
            path_len: n,
        };
        Ok(self.into_trace(reason, frontier_high_water))
    }

    /// Emit the no-path terminal step and close the trace.
    pub(crate) fn finish_no_path(mut self, frontier_high_water: u64) -> TraceV1 {
        let line = format!(
            "{} complete. Goal not reached. No path found.",
            self.policy.strategy.display_name()
        );
        self.record(StepKindV1::NoPath, None, Vec::new(), None, vec![line]);
        tracing::info!(
            strategy = %self.policy.strategy,
            expansions = self.expansions,
            steps = self.steps.len(),
            "frontier exhausted without reaching goal"
        );
        self.into_trace(TerminationReasonV1::FrontierExhausted, frontier_high_water)
    }

    fn into_trace(self, termination_reason: TerminationReasonV1, frontier_high_water: u64) -> TraceV1 {
        let metadata = TraceMetadataV1 {
            strategy: self.policy.strategy,
            path_playback: self.policy.path_playback,
            start: self.start,
            goal: self.goal,
            node_count: self.graph.len(),
            total_expansions: self.expansions,
            stale_pops_discarded: self.stale_pops,
            frontier_high_water,
            termination_reason,
        };
        TraceV1::new(metadata, self.steps)
    }
}

/// `[(x, y), (x, y)]`.
fn format_positions(positions: &[Position]) -> String {
    let items: Vec<String> = positions.iter().map(ToString::to_string).collect();
    format!("[{}]", items.join(", "))
}
