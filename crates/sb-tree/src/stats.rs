//! Summary statistics of a finished genealogy.

use sb_core::State;

use crate::SeedbankTree;

/// Whole-tree summary.  Branch lengths exclude the root, which has none.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeStats {
    pub leaves:         usize,
    pub internal_nodes: usize,
    /// Height of the root (time to the most recent common ancestor).
    pub tmrca:          f64,
    pub state_changes:  usize,
    pub active_length:  f64,
    pub dormant_length: f64,
}

impl TreeStats {
    pub fn of(tree: &SeedbankTree) -> Self {
        let mut stats = TreeStats {
            leaves:         tree.leaf_count(),
            internal_nodes: tree.internal_count(),
            tmrca:          tree.root_node().map_or(0.0, |r| r.height),
            state_changes:  tree.total_changes(),
            ..TreeStats::default()
        };
        for node in tree.nodes() {
            stats.active_length += tree.time_in_state(node.id, State::Active);
            stats.dormant_length += tree.time_in_state(node.id, State::Dormant);
        }
        stats
    }

    pub fn total_length(&self) -> f64 {
        self.active_length + self.dormant_length
    }

    /// Share of total branch length spent dormant; 0 for a single-leaf tree.
    pub fn dormant_fraction(&self) -> f64 {
        let total = self.total_length();
        if total > 0.0 { self.dormant_length / total } else { 0.0 }
    }
}

impl SeedbankTree {
    pub fn stats(&self) -> TreeStats {
        TreeStats::of(self)
    }
}
