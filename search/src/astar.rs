//! A* loop: best-first on `f = g + h` with lazy frontier invalidation.

use stepwise_kernel::carrier::context::NodeStateV1;
use stepwise_kernel::carrier::cost::Cost;
use stepwise_kernel::carrier::graph::NodeIndex;

use crate::error::SearchError;
use crate::frontier::AstarFrontier;
use crate::node::FrontierKey;
use crate::search::SearchRun;
use crate::trace::{StepKindV1, TraceV1};

const INITIAL_LOG: &str = "Initial state: Start node added to open set. Nothing explored yet.";

pub(crate) fn run(mut run: SearchRun<'_>) -> Result<TraceV1, SearchError> {
    let graph = run.graph;
    let goal_position = run.position(run.goal);
    let start = run.start;

    let seed = NodeStateV1::new(Cost::ZERO, run.position(start).manhattan(goal_position), None);
    run.ctx.set(start, seed);
    let mut frontier = AstarFrontier::new();
    frontier.push(FrontierKey::of(start, &seed));
    run.record(
        StepKindV1::Initial,
        None,
        vec![start],
        None,
        vec![INITIAL_LOG.to_string()],
    );

    loop {
        let Some(key) = frontier.pop() else {
            break;
        };
        if run.is_explored(key.index) {
            run.stale_pops += 1;
            tracing::trace!(node = %key.index, f = %key.f, "discarded stale frontier entry");
            continue;
        }
        // An unexplored pop is always its node's current entry and the minimum.
        let mut candidates = vec![key];
        candidates.extend(live_keys(&run, &frontier));

        let mut log = Vec::with_capacity(candidates.len() + 2);
        log.push("Open set candidates (before selection):".to_string());
        for candidate in &candidates {
            let state = run.ctx.state(candidate.index);
            log.push(format!(
                "  {}: f={}, g={}, h={}",
                run.label(candidate.index),
                state.f(),
                state.g(),
                state.h()
            ));
        }
        log.push(format!("Chosen node: {} with f={}", run.label(key.index), key.f));

        if key.index == run.goal {
            log.push(run.goal_reached_line());
            let remaining = live_members(&run, &frontier);
            run.record(
                StepKindV1::GoalReached,
                Some(key.index),
                remaining.clone(),
                None,
                log,
            );
            return run.finish_with_path(&remaining, frontier.high_water());
        }

        run.explore(key.index);
        let current = run.ctx.state(key.index);
        let current_position = run.position(key.index);
        let mut relaxed = 0usize;
        for &neighbor in graph.neighbors(key.index) {
            if run.is_explored(neighbor) {
                continue;
            }
            let neighbor_position = run.position(neighbor);
            let tentative = current
                .g()
                .saturating_add(current_position.manhattan(neighbor_position));
            if tentative < run.ctx.state(neighbor).g() {
                let state = NodeStateV1::new(
                    tentative,
                    neighbor_position.manhattan(goal_position),
                    Some(key.index),
                );
                run.ctx.set(neighbor, state);
                frontier.push(FrontierKey::of(neighbor, &state));
                relaxed += 1;
                log.push(format!(
                    "  Relaxed {}: g={}, h={}, f={}",
                    run.label(neighbor),
                    state.g(),
                    state.h(),
                    state.f()
                ));
            }
        }

        let members = live_members(&run, &frontier);
        tracing::debug!(
            node = %key.index,
            f = %key.f,
            relaxed,
            frontier = members.len(),
            "expanded node"
        );
        run.record(StepKindV1::Expansion, Some(key.index), members, None, log);
    }

    Ok(run.finish_no_path(frontier.high_water()))
}

/// Frontier entries that still describe an unexplored node, in pop order.
fn live_keys(run: &SearchRun<'_>, frontier: &AstarFrontier) -> Vec<FrontierKey> {
    frontier
        .sorted_keys()
        .into_iter()
        .filter(|key| !run.is_explored(key.index) && key.is_current(&run.ctx.state(key.index)))
        .collect()
}

fn live_members(run: &SearchRun<'_>, frontier: &AstarFrontier) -> Vec<NodeIndex> {
    live_keys(run, frontier).into_iter().map(|key| key.index).collect()
}
