//! Arena index of a lineage node.

use std::fmt;

/// Index of a lineage node in the tree arena.
///
/// Leaves take IDs `0..n_samples` in configuration order; coalescence nodes
/// are numbered consecutively after them, so an ID is also the node's
/// creation rank.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(pub u32);

impl NodeId {
    /// Position in the arena `Vec`.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}
