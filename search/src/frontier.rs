//! Open-set structures for the two strategies.
//!
//! [`AstarFrontier`] is a min-heap of [`FrontierKey`]s that tolerates
//! duplicate entries per node; the engine discards stale ones when they are
//! popped. [`FifoFrontier`] is a queue plus a membership set so a node is
//! never queued twice.

use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap, VecDeque};

use stepwise_kernel::carrier::graph::NodeIndex;

use crate::node::FrontierKey;

/// Best-first frontier with lazy invalidation.
///
/// `BinaryHeap` is a max-heap, so entries are wrapped in `Reverse` to pop
/// the lowest key first.
#[derive(Debug, Default)]
pub struct AstarFrontier {
    heap: BinaryHeap<Reverse<FrontierKey>>,
    high_water: u64,
}

impl AstarFrontier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an entry. Older entries for the same node are left in place.
    pub fn push(&mut self, key: FrontierKey) {
        self.heap.push(Reverse(key));
        let size = self.heap.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
    }

    /// Pop the lowest key.
    #[must_use]
    pub fn pop(&mut self) -> Option<FrontierKey> {
        self.heap.pop().map(|Reverse(key)| key)
    }

    /// Every entry, stale ones included, in pop order.
    #[must_use]
    pub fn sorted_keys(&self) -> Vec<FrontierKey> {
        let mut keys: Vec<FrontierKey> = self.heap.iter().map(|Reverse(k)| *k).collect();
        keys.sort();
        keys
    }

    /// Number of entries, stale ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Largest entry count seen.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }
}

/// FIFO frontier with a membership set.
#[derive(Debug, Default)]
pub struct FifoFrontier {
    queue: VecDeque<NodeIndex>,
    queued: BTreeSet<NodeIndex>,
    high_water: u64,
}

impl FifoFrontier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue `index` at the back.
    ///
    /// Returns `false` (and changes nothing) if it is already queued.
    pub fn push(&mut self, index: NodeIndex) -> bool {
        if !self.queued.insert(index) {
            return false;
        }
        self.queue.push_back(index);
        let size = self.queue.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
        true
    }

    /// Dequeue from the front.
    #[must_use]
    pub fn pop(&mut self) -> Option<NodeIndex> {
        let index = self.queue.pop_front()?;
        self.queued.remove(&index);
        Some(index)
    }

    #[must_use]
    pub fn contains(&self, index: NodeIndex) -> bool {
        self.queued.contains(&index)
    }

    /// Queued indices, front first.
    #[must_use]
    pub fn members(&self) -> Vec<NodeIndex> {
        self.queue.iter().copied().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }
}
