//! `RunContext`: per-search mutable node state, and its value snapshots.
//!
//! A [`GraphStore`](crate::carrier::graph::GraphStore) never holds run state.
//! Each search allocates a fresh `RunContext` sized to the store, mutates it,
//! and drops it when the trace is complete. Parents are plain
//! [`NodeIndex`] values, valid only within the run that wrote them.
//!
//! [`ContextSnapshotV1`] is an owned copy of every node's state. Restoring
//! a snapshot overwrites the context in place and never shares storage with
//! it.

use crate::carrier::cost::Cost;
use crate::carrier::graph::NodeIndex;

/// Run-scoped state of one node.
///
/// `f` is derived on construction, so `f == g + h` holds for every value of
/// this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeStateV1 {
    g: Cost,
    h: Cost,
    f: Cost,
    parent: Option<NodeIndex>,
}

impl NodeStateV1 {
    /// State of a node the current run has not reached: `g = inf, h = 0, f = inf`.
    pub const UNREACHED: NodeStateV1 = NodeStateV1 {
        g: Cost::INFINITE,
        h: Cost::ZERO,
        f: Cost::INFINITE,
        parent: None,
    };

    #[must_use]
    pub const fn new(g: Cost, h: Cost, parent: Option<NodeIndex>) -> Self {
        Self {
            g,
            h,
            f: g.saturating_add(h),
            parent,
        }
    }

    #[must_use]
    pub const fn g(&self) -> Cost {
        self.g
    }

    #[must_use]
    pub const fn h(&self) -> Cost {
        self.h
    }

    #[must_use]
    pub const fn f(&self) -> Cost {
        self.f
    }

    #[must_use]
    pub const fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "f": self.f.to_json(),
            "g": self.g.to_json(),
            "h": self.h.to_json(),
            "parent": self.parent.map(NodeIndex::get),
        })
    }
}

impl Default for NodeStateV1 {
    fn default() -> Self {
        Self::UNREACHED
    }
}

/// Mutable per-run state for every node of one graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    states: Vec<NodeStateV1>,
}

impl RunContext {
    /// A context for `node_count` nodes, all unreached.
    #[must_use]
    pub fn new(node_count: usize) -> Self {
        Self {
            states: vec![NodeStateV1::UNREACHED; node_count],
        }
    }

    /// Put every node back into the unreached state.
    pub fn reset(&mut self) {
        self.states.fill(NodeStateV1::UNREACHED);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// State of `index`; unreached for an index outside the context.
    #[must_use]
    pub fn state(&self, index: NodeIndex) -> NodeStateV1 {
        self.states
            .get(index.get())
            .copied()
            .unwrap_or(NodeStateV1::UNREACHED)
    }

    /// Overwrite the state of `index`. Indices outside the context are ignored.
    pub fn set(&mut self, index: NodeIndex, state: NodeStateV1) {
        if let Some(slot) = self.states.get_mut(index.get()) {
            *slot = state;
        }
    }

    /// All states in index order.
    #[must_use]
    pub fn states(&self) -> &[NodeStateV1] {
        &self.states
    }

    /// Copy every node's state by value.
    #[must_use]
    pub fn snapshot(&self) -> ContextSnapshotV1 {
        ContextSnapshotV1 {
            states: self.states.clone(),
        }
    }

    /// Overwrite this context, node by node, from `snapshot`.
    ///
    /// The context takes the snapshot's length.
    pub fn restore(&mut self, snapshot: &ContextSnapshotV1) {
        self.states.clone_from(&snapshot.states);
    }
}

/// Reference-free copy of a [`RunContext`] at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContextSnapshotV1 {
    states: Vec<NodeStateV1>,
}

impl ContextSnapshotV1 {
    #[must_use]
    pub fn states(&self) -> &[NodeStateV1] {
        &self.states
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// State of `index` at snapshot time.
    #[must_use]
    pub fn state(&self, index: NodeIndex) -> Option<&NodeStateV1> {
        self.states.get(index.get())
    }

    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.states.iter().map(NodeStateV1::to_json).collect())
    }
}
