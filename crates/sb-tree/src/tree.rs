//! The `SeedbankTree` arena and its mutation API.

use std::ops::Index;

use sb_core::{NodeId, State};

use crate::{LineageNode, StateChange, TreeError, TreeResult};

/// A timed, binary genealogy with a per-lineage state history.
///
/// Built incrementally: leaves via [`add_leaf`](Self::add_leaf), migrations
/// via [`record_change`](Self::record_change) while a lineage is still live,
/// coalescences via [`coalesce`](Self::coalesce), and finally
/// [`set_root`](Self::set_root).  Once a node has a parent it is immutable.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeedbankTree {
    nodes: Vec<LineageNode>,
    root:  Option<NodeId>,
    leaf_count: usize,
}

impl SeedbankTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for `n_samples` leaves (a full tree has `2n - 1` nodes).
    pub fn with_capacity(n_samples: usize) -> Self {
        Self {
            nodes: Vec::with_capacity((2 * n_samples).saturating_sub(1)),
            root:  None,
            leaf_count: 0,
        }
    }

    // ── Construction ──────────────────────────────────────────────────────

    /// Append a leaf sampled in `state` at `height`.
    pub fn add_leaf(&mut self, label: impl Into<String>, state: State, height: f64) -> NodeId {
        let id = self.next_id();
        self.nodes.push(LineageNode::new(id, label.into(), state, height));
        self.leaf_count += 1;
        id
    }

    /// Join two live lineages under a new node at `height` in `state`.
    ///
    /// The new node is labelled with its own number.
    ///
    /// # Errors
    ///
    /// Fails if either child is unknown or already has a parent, if the two
    /// are the same node, or if `height` is not strictly above both children
    /// and all of their recorded changes.
    pub fn coalesce(
        &mut self,
        left:   NodeId,
        right:  NodeId,
        state:  State,
        height: f64,
    ) -> TreeResult<NodeId> {
        if left == right {
            return Err(TreeError::SelfCoalescence(left));
        }
        for child in [left, right] {
            let node = self.get(child).ok_or(TreeError::UnknownNode(child))?;
            if node.parent.is_some() {
                return Err(TreeError::AlreadyCoalesced(child));
            }
            if !(height > node.height) {
                return Err(TreeError::ParentNotAbove {
                    child,
                    child_height:  node.height,
                    parent_height: height,
                });
            }
            if let Some(last) = node.changes.last()
                && last.time > height
            {
                return Err(TreeError::ChangeAboveParent {
                    node:          child,
                    time:          last.time,
                    parent_height: height,
                });
            }
        }

        let id = self.next_id();
        let mut parent = LineageNode::new(id, id.0.to_string(), state, height);
        parent.children = Some((left, right));
        self.nodes.push(parent);
        self.nodes[left.index()].parent = Some(id);
        self.nodes[right.index()].parent = Some(id);
        Ok(id)
    }

    /// Append a switch into `state` at `time` to a live lineage.
    ///
    /// # Errors
    ///
    /// Fails if the node is unknown or already has a parent, if `time` is not
    /// strictly after the node's height and its last change, or if `state`
    /// equals the lineage's current state.
    pub fn record_change(&mut self, node: NodeId, state: State, time: f64) -> TreeResult<()> {
        let n = self.nodes.get_mut(node.index()).ok_or(TreeError::UnknownNode(node))?;
        if n.parent.is_some() {
            return Err(TreeError::AlreadyCoalesced(node));
        }
        let floor = n.last_change_time();
        if !(time > floor) {
            return Err(TreeError::ChangeOutOfOrder { node, time, floor });
        }
        if n.final_state() == state {
            return Err(TreeError::RedundantChange { node, state });
        }
        n.changes.push(StateChange { state, time });
        Ok(())
    }

    /// Declare `node` the root.  It must not have a parent.
    pub fn set_root(&mut self, node: NodeId) -> TreeResult<()> {
        let n = self.get(node).ok_or(TreeError::UnknownNode(node))?;
        if n.parent.is_some() {
            return Err(TreeError::RootHasParent(node));
        }
        self.root = Some(node);
        Ok(())
    }

    /// Replace a node's label (used when reading labelled internal nodes).
    pub fn set_label(&mut self, node: NodeId, label: impl Into<String>) -> TreeResult<()> {
        let n = self.nodes.get_mut(node.index()).ok_or(TreeError::UnknownNode(node))?;
        n.label = label.into();
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&LineageNode> {
        self.nodes.get(id.index())
    }

    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn root_node(&self) -> Option<&LineageNode> {
        self.root.and_then(|r| self.get(r))
    }

    pub fn nodes(&self) -> &[LineageNode] {
        &self.nodes
    }

    /// Total node count (leaves + coalescence nodes).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    pub fn internal_count(&self) -> usize {
        self.nodes.len() - self.leaf_count
    }

    pub fn leaves(&self) -> impl Iterator<Item = &LineageNode> {
        self.nodes.iter().filter(|n| n.is_leaf())
    }

    /// Node IDs with every child before its parent, starting from the root.
    /// Empty if no root has been set.
    pub fn postorder(&self) -> Vec<NodeId> {
        let Some(root) = self.root else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![(root, false)];
        while let Some((id, expanded)) = stack.pop() {
            match (expanded, self.nodes[id.index()].children) {
                (false, Some((l, r))) => {
                    stack.push((id, true));
                    stack.push((r, false));
                    stack.push((l, false));
                }
                _ => out.push(id),
            }
        }
        out
    }

    /// Height of `id`'s parent, or `None` for the root / an unattached node.
    pub fn parent_height(&self, id: NodeId) -> Option<f64> {
        let parent = self.get(id)?.parent?;
        Some(self.nodes[parent.index()].height)
    }

    /// `parent.height - node.height`; 0 for the root.
    pub fn branch_length(&self, id: NodeId) -> f64 {
        match (self.get(id), self.parent_height(id)) {
            (Some(n), Some(top)) => top - n.height,
            _ => 0.0,
        }
    }

    /// Length of `id`'s branch spent in `state`; 0 for the root.
    pub fn time_in_state(&self, id: NodeId, state: State) -> f64 {
        let (Some(n), Some(top)) = (self.get(id), self.parent_height(id)) else {
            return 0.0;
        };
        n.segments(top)
            .into_iter()
            .filter(|(s, _, _)| *s == state)
            .map(|(_, start, end)| end - start)
            .sum()
    }

    /// Fraction of `id`'s branch spent dormant.
    ///
    /// `None` for the root or a zero-length branch.
    pub fn dormant_fraction(&self, id: NodeId) -> Option<f64> {
        let length = self.branch_length(id);
        if length > 0.0 {
            Some(self.time_in_state(id, State::Dormant) / length)
        } else {
            None
        }
    }

    /// Number of recorded state changes across all lineages.
    pub fn total_changes(&self) -> usize {
        self.nodes.iter().map(LineageNode::change_count).sum()
    }

    // ── Validity ──────────────────────────────────────────────────────────

    /// Check every structural, timing and typing invariant of a finished tree.
    ///
    /// # Errors
    ///
    /// The first violated invariant.
    pub fn validate(&self) -> TreeResult<()> {
        let root = self.root.ok_or(TreeError::NoRoot)?;
        let root_node = self.get(root).ok_or(TreeError::UnknownNode(root))?;
        if root_node.parent.is_some() {
            return Err(TreeError::RootHasParent(root));
        }
        if !root_node.changes.is_empty() {
            return Err(TreeError::RootHasChanges(root));
        }

        for node in &self.nodes {
            if node.id != root && node.parent.is_none() {
                return Err(TreeError::Detached(node.id));
            }
            self.check_changes(node)?;

            let Some((l, r)) = node.children else { continue };
            for child in [l, r] {
                let c = self.get(child).ok_or(TreeError::UnknownNode(child))?;
                if c.parent != Some(node.id) {
                    return Err(TreeError::BrokenLink { parent: node.id, child });
                }
                if !(node.height > c.height) {
                    return Err(TreeError::ParentNotAbove {
                        child,
                        child_height:  c.height,
                        parent_height: node.height,
                    });
                }
                if let Some(last) = c.changes.last()
                    && last.time > node.height
                {
                    return Err(TreeError::ChangeAboveParent {
                        node:          child,
                        time:          last.time,
                        parent_height: node.height,
                    });
                }
                if c.final_state() != node.state {
                    return Err(TreeError::StateMismatch {
                        node:         child,
                        child_state:  c.final_state(),
                        parent:       node.id,
                        parent_state: node.state,
                    });
                }
            }
        }
        Ok(())
    }

    fn check_changes(&self, node: &LineageNode) -> TreeResult<()> {
        let mut floor = node.height;
        let mut state = node.state;
        for change in &node.changes {
            if !(change.time > floor) {
                return Err(TreeError::ChangeOutOfOrder { node: node.id, time: change.time, floor });
            }
            if change.state == state {
                return Err(TreeError::RedundantChange { node: node.id, state });
            }
            floor = change.time;
            state = change.state;
        }
        Ok(())
    }

    fn next_id(&self) -> NodeId {
        NodeId(self.nodes.len() as u32)
    }
}

impl Index<NodeId> for SeedbankTree {
    type Output = LineageNode;

    /// # Panics
    /// Panics if `id` is not in the arena.
    #[inline]
    fn index(&self, id: NodeId) -> &LineageNode {
        &self.nodes[id.index()]
    }
}
