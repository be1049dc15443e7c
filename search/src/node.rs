//! Frontier ordering key.

use stepwise_kernel::carrier::context::NodeStateV1;
use stepwise_kernel::carrier::cost::Cost;
use stepwise_kernel::carrier::graph::NodeIndex;

/// The A* frontier ordering key: `(f, h, index)`.
///
/// Lower `f` first, then lower `h` (closer to the goal), then lower index.
/// The order is total, so pops are reproducible across runs and platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrontierKey {
    pub f: Cost,
    pub h: Cost,
    pub index: NodeIndex,
}

impl FrontierKey {
    /// Key for `index` in its current run state.
    #[must_use]
    pub fn of(index: NodeIndex, state: &NodeStateV1) -> Self {
        Self {
            f: state.f(),
            h: state.h(),
            index,
        }
    }

    /// Whether this entry still describes `state`.
    ///
    /// A node's key only ever decreases (relaxation requires a strictly
    /// lower `g`, and `h` is fixed per node), so an older entry has a
    /// larger `f` than the node's current state.
    #[must_use]
    pub fn is_current(&self, state: &NodeStateV1) -> bool {
        self.f == state.f() && self.h == state.h()
    }
}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.f
            .cmp(&other.f)
            .then(self.h.cmp(&other.h))
            .then(self.index.cmp(&other.index))
    }
}
