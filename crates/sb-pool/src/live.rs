//! `LiveSet`: the lineages currently live in one state.
//!
//! Lineages are stored densely in a `Vec` so a uniform pick is a single
//! index draw.  A side index maps each lineage to its slot, which makes
//! removal a `swap_remove`: O(1), at the cost of not preserving order.
//! Order carries no meaning here; picks are always by uniform index.

use sb_core::NodeId;

#[cfg(feature = "fx-hash")]
type SlotIndex = rustc_hash::FxHashMap<NodeId, usize>;
#[cfg(not(feature = "fx-hash"))]
type SlotIndex = std::collections::HashMap<NodeId, usize>;

#[derive(Clone, Debug, Default)]
pub struct LiveSet {
    members: Vec<NodeId>,
    slots:   SlotIndex,
}

impl LiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            members: Vec::with_capacity(capacity),
            slots:   SlotIndex::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Add `lineage`.  Returns `false` (and changes nothing) if already present.
    pub fn insert(&mut self, lineage: NodeId) -> bool {
        if self.slots.contains_key(&lineage) {
            return false;
        }
        self.slots.insert(lineage, self.members.len());
        self.members.push(lineage);
        true
    }

    /// Remove `lineage`.  Returns `false` if it was not present.
    pub fn remove(&mut self, lineage: NodeId) -> bool {
        let Some(slot) = self.slots.remove(&lineage) else {
            return false;
        };
        self.members.swap_remove(slot);
        if let Some(&moved) = self.members.get(slot) {
            self.slots.insert(moved, slot);
        }
        true
    }

    #[inline]
    pub fn contains(&self, lineage: NodeId) -> bool {
        self.slots.contains_key(&lineage)
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<NodeId> {
        self.members.get(index).copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[NodeId] {
        &self.members
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
