//! BFS loop: FIFO order, nodes explored at dequeue time.
//!
//! `g` here is the cumulative Manhattan length of the discovery path. It is
//! shown in logs and snapshots but never steers the search.

use stepwise_kernel::carrier::context::NodeStateV1;
use stepwise_kernel::carrier::cost::Cost;

use crate::error::SearchError;
use crate::frontier::FifoFrontier;
use crate::search::SearchRun;
use crate::trace::{StepKindV1, TraceV1};

const INITIAL_LOG: &str = "Initial state: Start node added to queue. Nothing explored yet.";

pub(crate) fn run(mut run: SearchRun<'_>) -> Result<TraceV1, SearchError> {
    let graph = run.graph;
    let start = run.start;

    run.ctx.set(start, NodeStateV1::new(Cost::ZERO, Cost::ZERO, None));
    let mut queue = FifoFrontier::new();
    queue.push(start);
    run.record(
        StepKindV1::Initial,
        None,
        queue.members(),
        None,
        vec![INITIAL_LOG.to_string()],
    );

    while let Some(current) = queue.pop() {
        run.explore(current);

        if current == run.goal {
            let remaining = queue.members();
            let line = run.goal_reached_line();
            run.record(
                StepKindV1::GoalReached,
                Some(current),
                remaining.clone(),
                None,
                vec![line],
            );
            return run.finish_with_path(&remaining, queue.high_water());
        }

        let current_state = run.ctx.state(current);
        let current_position = run.position(current);
        for &neighbor in graph.neighbors(current) {
            if run.is_explored(neighbor) || queue.contains(neighbor) {
                continue;
            }
            let g = current_state
                .g()
                .saturating_add(current_position.manhattan(run.position(neighbor)));
            run.ctx.set(neighbor, NodeStateV1::new(g, Cost::ZERO, Some(current)));
            queue.push(neighbor);
        }

        let members = queue.members();
        let mut log = vec![format!(
            "Processing node {current} at {current_position}. It is now explored."
        )];
        if members.is_empty() {
            log.push("  Queue is now empty.".to_string());
            log.push("  Goal not reached and queue is empty. No path exists.".to_string());
        } else {
            log.push("  Nodes currently in queue (g=cost):".to_string());
            for &member in &members {
                log.push(format!(
                    "    {}: g={}",
                    run.label(member),
                    run.ctx.state(member).g()
                ));
            }
        }
        tracing::debug!(node = %current, queued = members.len(), "dequeued node");
        run.record(StepKindV1::Expansion, Some(current), members, None, log);
    }

    Ok(run.finish_no_path(queue.high_water()))
}
