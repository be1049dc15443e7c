//! `TraceV1`: the append-only step ledger of one search.
//!
//! Every decision the engine makes is recorded as a [`StepV1`] carrying the
//! frontier, the explored set, any path so far, log lines, and a by-value
//! snapshot of every node's run state. Replay reads these records and never
//! touches engine internals.
//!
//! A trace is never empty: it starts with an `Initial` step and ends with
//! either `PathFound` or `NoPath`.

use std::collections::BTreeSet;

use stepwise_kernel::carrier::context::ContextSnapshotV1;
use stepwise_kernel::carrier::cost::Cost;
use stepwise_kernel::carrier::graph::NodeIndex;
use stepwise_kernel::carrier::position::Position;
use stepwise_kernel::proof::canon::{canonical_json_bytes, CanonError};
use stepwise_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

use crate::policy::{PathPlaybackV1, StrategyV1};

/// Domain for whole-trace digests.
pub const DOMAIN_TRACE_DIGEST: HashDomain = HashDomain::TraceDigest;

/// Domain for per-step digests.
pub const DOMAIN_TRACE_STEP: HashDomain = HashDomain::TraceStep;

/// What a step records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKindV1 {
    /// Start seeded into the frontier; nothing chosen yet.
    Initial,
    /// A node was chosen and its neighbors processed.
    Expansion,
    /// The goal was chosen; path playback follows.
    GoalReached,
    /// One more prefix of the path.
    PathUnwind,
    /// Terminal: full path and summary.
    PathFound,
    /// Terminal: frontier exhausted without reaching the goal.
    NoPath,
}

impl StepKindV1 {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Expansion => "expansion",
            Self::GoalReached => "goal_reached",
            Self::PathUnwind => "path_unwind",
            Self::PathFound => "path_found",
            Self::NoPath => "no_path",
        }
    }

    /// Whether a trace may end with this kind.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::PathFound | Self::NoPath)
    }
}

/// One immutable trace record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepV1 {
    pub kind: StepKindV1,
    /// Node chosen at this step; `None` for `Initial` and `NoPath`.
    pub chosen: Option<NodeIndex>,
    /// Live frontier members in pop order (A*) or queue order (BFS).
    pub frontier: Vec<NodeIndex>,
    /// Positions fully expanded so far.
    pub explored: BTreeSet<Position>,
    /// Path prefix during playback; full path at `PathFound`; otherwise `None`.
    pub path: Option<Vec<Position>>,
    pub log: Vec<String>,
    pub snapshot: ContextSnapshotV1,
}

impl StepV1 {
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "chosen": self.chosen.map(NodeIndex::get),
            "explored": self.explored.iter().map(|p| position_to_json(*p)).collect::<Vec<_>>(),
            "frontier": self.frontier.iter().map(|i| i.get()).collect::<Vec<_>>(),
            "kind": self.kind.as_str(),
            "log": self.log,
            "path": self.path.as_ref().map(|path| {
                path.iter().map(|p| position_to_json(*p)).collect::<Vec<_>>()
            }),
            "snapshot": self.snapshot.to_json(),
        })
    }

    /// Domain-separated digest of this step's canonical JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&self.to_json())?;
        Ok(canonical_hash(DOMAIN_TRACE_STEP, &bytes))
    }
}

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReasonV1 {
    /// Goal reached; `path_len` counts positions, `path_cost` is the goal's `g`.
    GoalReached {
        node: NodeIndex,
        path_cost: Cost,
        path_len: usize,
    },
    /// Frontier emptied without reaching the goal.
    FrontierExhausted,
}

/// Aggregate facts about one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceMetadataV1 {
    pub strategy: StrategyV1,
    pub path_playback: PathPlaybackV1,
    pub start: NodeIndex,
    pub goal: NodeIndex,
    pub node_count: usize,
    /// Nodes moved into the explored set.
    pub total_expansions: u64,
    /// A* entries popped for an already-explored node and dropped.
    pub stale_pops_discarded: u64,
    pub frontier_high_water: u64,
    pub termination_reason: TerminationReasonV1,
}

/// The complete, ordered record of one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceV1 {
    metadata: TraceMetadataV1,
    steps: Vec<StepV1>,
}

impl TraceV1 {
    pub(crate) fn new(metadata: TraceMetadataV1, steps: Vec<StepV1>) -> Self {
        debug_assert!(steps.last().is_some_and(|s| s.kind.is_terminal()));
        Self { metadata, steps }
    }

    #[must_use]
    pub fn metadata(&self) -> &TraceMetadataV1 {
        &self.metadata
    }

    #[must_use]
    pub fn steps(&self) -> &[StepV1] {
        &self.steps
    }

    #[must_use]
    pub fn step(&self, index: usize) -> Option<&StepV1> {
        self.steps.get(index)
    }

    /// Number of steps (always at least 2).
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The terminal step.
    #[must_use]
    pub fn last(&self) -> Option<&StepV1> {
        self.steps.last()
    }

    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        matches!(
            self.metadata.termination_reason,
            TerminationReasonV1::GoalReached { .. }
        )
    }

    /// The full path carried by the terminal step, if a path was found.
    #[must_use]
    pub fn final_path(&self) -> Option<&[Position]> {
        self.last()
            .filter(|s| s.kind == StepKindV1::PathFound)
            .and_then(|s| s.path.as_deref())
    }

    /// Serialize the trace to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Domain-separated digest of the canonical trace bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(DOMAIN_TRACE_DIGEST, &bytes))
    }

    /// Per-step digests, in step order.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn step_digests(&self) -> Result<Vec<ContentHash>, CanonError> {
        self.steps.iter().map(StepV1::digest).collect()
    }

    #[must_use]
    fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "metadata": self.metadata.to_json(),
            "steps": self.steps.iter().map(StepV1::to_json).collect::<Vec<_>>(),
        })
    }
}

fn position_to_json(p: Position) -> serde_json::Value {
    serde_json::json!([p.x, p.y])
}

impl TraceMetadataV1 {
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "frontier_high_water": self.frontier_high_water,
            "goal": self.goal.get(),
            "node_count": self.node_count,
            "path_playback": self.path_playback.as_str(),
            "stale_pops_discarded": self.stale_pops_discarded,
            "start": self.start.get(),
            "strategy": self.strategy.as_str(),
            "termination_reason": termination_reason_to_json(&self.termination_reason),
            "total_expansions": self.total_expansions,
        })
    }
}

fn termination_reason_to_json(r: &TerminationReasonV1) -> serde_json::Value {
    match r {
        TerminationReasonV1::GoalReached {
            node,
            path_cost,
            path_len,
        } => serde_json::json!({
            "node": node.get(),
            "path_cost": path_cost.to_json(),
            "path_len": path_len,
            "type": "goal_reached",
        }),
        TerminationReasonV1::FrontierExhausted => {
            serde_json::json!({"type": "frontier_exhausted"})
        }
    }
}
