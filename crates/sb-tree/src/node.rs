//! One lineage segment of the genealogy.

use sb_core::{NodeId, State};

/// A recorded switch of a live lineage into `state` at (backward) `time`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateChange {
    pub state: State,
    pub time:  f64,
}

/// A node of the genealogy and the branch segment above it.
///
/// The lower end is either a sample (leaf) or a coalescence (internal node
/// with exactly two children).  The upper end is the parent's height, or
/// nothing for the root.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineageNode {
    pub id:       NodeId,
    /// Sample label for leaves, decimal node number for coalescence nodes.
    pub label:    String,
    /// Time before the present at which this node sits.
    pub height:   f64,
    /// State at `height`, before any recorded change.
    pub state:    State,
    /// Strictly increasing in time, all within `(height, parent height]`.
    pub changes:  Vec<StateChange>,
    pub children: Option<(NodeId, NodeId)>,
    pub parent:   Option<NodeId>,
}

impl LineageNode {
    pub(crate) fn new(id: NodeId, label: String, state: State, height: f64) -> Self {
        Self {
            id,
            label,
            height,
            state,
            changes:  Vec::new(),
            children: None,
            parent:   None,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    #[inline]
    pub fn change_count(&self) -> usize {
        self.changes.len()
    }

    /// State at the top of the segment, after the last recorded change.
    pub fn final_state(&self) -> State {
        self.changes.last().map_or(self.state, |c| c.state)
    }

    /// Time of the last recorded change, or the node's own height.
    pub fn last_change_time(&self) -> f64 {
        self.changes.last().map_or(self.height, |c| c.time)
    }

    /// Declared state at `time`: the initial state plus the most recent
    /// change at or before `time`.
    pub fn state_at(&self, time: f64) -> State {
        self.changes
            .iter()
            .take_while(|c| c.time <= time)
            .last()
            .map_or(self.state, |c| c.state)
    }

    /// `(state, start, end)` for each constant-state piece of the segment,
    /// bottom to top.  `top` is the parent's height.
    pub fn segments(&self, top: f64) -> Vec<(State, f64, f64)> {
        let mut out = Vec::with_capacity(self.changes.len() + 1);
        let mut state = self.state;
        let mut start = self.height;
        for change in &self.changes {
            out.push((state, start, change.time));
            state = change.state;
            start = change.time;
        }
        out.push((state, start, top));
        out
    }
}
