//! `GraphStore`: immutable registry of positioned nodes and their adjacency.
//!
//! Nodes are indexed by construction order starting at 0. Adjacency is taken
//! as given: an edge `a -> b` does not imply `b -> a`. Use
//! [`GraphStore::asymmetric_edges`] to inspect one-way edges; the store never
//! repairs them.
//!
//! Positions are unique within a store. The position index is a `BTreeMap`,
//! so lookup by position is `O(log n)` and returns exactly what a linear scan
//! over [`GraphStore::nodes`] would.

use std::collections::BTreeMap;

use crate::carrier::position::Position;
use crate::proof::canon::{canonical_json_bytes, CanonError};
use crate::proof::hash::{canonical_hash, ContentHash, HashDomain};

/// Index of a node within one [`GraphStore`].
///
/// Only meaningful for the store that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIndex(usize);

impl NodeIndex {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An immutable graph node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub index: NodeIndex,
    pub position: Position,
    /// Outgoing neighbors in declaration order.
    pub neighbors: Vec<NodeIndex>,
}

/// Error building a [`GraphStore`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphBuildError {
    /// Two nodes share a position.
    #[error("duplicate position {position}: nodes {first} and {second}")]
    DuplicatePosition {
        position: Position,
        first: usize,
        second: usize,
    },
    /// An adjacency entry is keyed by an index with no node.
    #[error("adjacency entry for unknown node {index} (node count {node_count})")]
    UnknownNode { index: usize, node_count: usize },
    /// An adjacency entry names a neighbor index with no node.
    #[error("node {from} lists unknown neighbor {to} (node count {node_count})")]
    DanglingNeighbor {
        from: usize,
        to: usize,
        node_count: usize,
    },
}

/// Immutable node registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphStore {
    nodes: Vec<GraphNode>,
    by_position: BTreeMap<Position, NodeIndex>,
}

impl GraphStore {
    /// Build a store from an ordered position list and an adjacency map.
    ///
    /// Node `i` gets `positions[i]`. Nodes without an adjacency entry have
    /// no outgoing edges.
    ///
    /// # Errors
    ///
    /// Returns [`GraphBuildError`] if a position repeats or an adjacency
    /// entry refers to an index outside `0..positions.len()`.
    pub fn new(
        positions: Vec<Position>,
        adjacency: &BTreeMap<usize, Vec<usize>>,
    ) -> Result<Self, GraphBuildError> {
        let node_count = positions.len();
        let mut by_position = BTreeMap::new();
        for (i, &position) in positions.iter().enumerate() {
            if let Some(first) = by_position.insert(position, NodeIndex(i)) {
                return Err(GraphBuildError::DuplicatePosition {
                    position,
                    first: first.get(),
                    second: i,
                });
            }
        }

        let mut nodes: Vec<GraphNode> = positions
            .into_iter()
            .enumerate()
            .map(|(i, position)| GraphNode {
                index: NodeIndex(i),
                position,
                neighbors: Vec::new(),
            })
            .collect();

        for (&from, targets) in adjacency {
            let Some(node) = nodes.get_mut(from) else {
                return Err(GraphBuildError::UnknownNode {
                    index: from,
                    node_count,
                });
            };
            for &to in targets {
                if to >= node_count {
                    return Err(GraphBuildError::DanglingNeighbor {
                        from,
                        to,
                        node_count,
                    });
                }
                node.neighbors.push(NodeIndex(to));
            }
        }

        Ok(Self { nodes, by_position })
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node by index.
    #[must_use]
    pub fn node(&self, index: NodeIndex) -> Option<&GraphNode> {
        self.nodes.get(index.0)
    }

    /// Node by position.
    #[must_use]
    pub fn node_by_position(&self, position: Position) -> Option<&GraphNode> {
        self.by_position
            .get(&position)
            .and_then(|&index| self.nodes.get(index.0))
    }

    /// Outgoing neighbors of `index`; empty for an index this store did not issue.
    #[must_use]
    pub fn neighbors(&self, index: NodeIndex) -> &[NodeIndex] {
        self.nodes
            .get(index.0)
            .map_or(&[][..], |n| n.neighbors.as_slice())
    }

    /// Position of `index`, if the node exists.
    #[must_use]
    pub fn position(&self, index: NodeIndex) -> Option<Position> {
        self.nodes.get(index.0).map(|n| n.position)
    }

    /// All nodes in index order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter()
    }

    /// Whether `to` is listed as a neighbor of `from`.
    #[must_use]
    pub fn has_edge(&self, from: NodeIndex, to: NodeIndex) -> bool {
        self.neighbors(from).contains(&to)
    }

    /// Edges `a -> b` with no matching `b -> a`, in `(a, b)` order.
    #[must_use]
    pub fn asymmetric_edges(&self) -> Vec<(NodeIndex, NodeIndex)> {
        let mut out = Vec::new();
        for node in &self.nodes {
            for &to in &node.neighbors {
                if !self.has_edge(to, node.index) {
                    out.push((node.index, to));
                }
            }
        }
        out.sort();
        out.dedup();
        out
    }

    /// Canonical JSON projection: one `{index, neighbors, position}` per node.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let nodes: Vec<serde_json::Value> = self
            .nodes
            .iter()
            .map(|node| {
                serde_json::json!({
                    "index": node.index.get(),
                    "neighbors": node.neighbors.iter().map(|n| n.get()).collect::<Vec<_>>(),
                    "position": [node.position.x, node.position.y],
                })
            })
            .collect();
        serde_json::json!({ "nodes": nodes })
    }

    /// Domain-separated digest of [`Self::to_json`].
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn fingerprint(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&self.to_json())?;
        Ok(canonical_hash(HashDomain::GraphStore, &bytes))
    }
}
