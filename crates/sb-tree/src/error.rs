use sb_core::{NodeId, State};
use thiserror::Error;

/// Errors from building, checking, or parsing a [`SeedbankTree`](crate::SeedbankTree).
#[derive(Debug, Error, PartialEq)]
pub enum TreeError {
    #[error("node {0} does not exist")]
    UnknownNode(NodeId),

    #[error("node {0} already has a parent")]
    AlreadyCoalesced(NodeId),

    #[error("node {0} cannot coalesce with itself")]
    SelfCoalescence(NodeId),

    #[error("parent height {parent_height} is not above child {child} at {child_height}")]
    ParentNotAbove {
        child:         NodeId,
        child_height:  f64,
        parent_height: f64,
    },

    #[error("state change on {node} at {time} is not after {floor}")]
    ChangeOutOfOrder { node: NodeId, time: f64, floor: f64 },

    #[error("state change on {node} at {time} lies above parent height {parent_height}")]
    ChangeAboveParent {
        node:          NodeId,
        time:          f64,
        parent_height: f64,
    },

    #[error("state change on {node} to {state} does not change the state")]
    RedundantChange { node: NodeId, state: State },

    #[error("{node} ends in state {child_state} but its parent {parent} is {parent_state}")]
    StateMismatch {
        node:         NodeId,
        child_state:  State,
        parent:       NodeId,
        parent_state: State,
    },

    #[error("tree has no root")]
    NoRoot,

    #[error("root {0} has a parent")]
    RootHasParent(NodeId),

    #[error("root {0} carries state changes")]
    RootHasChanges(NodeId),

    #[error("non-root node {0} has no parent")]
    Detached(NodeId),

    #[error("child {child} of {parent} does not point back to it")]
    BrokenLink { parent: NodeId, child: NodeId },

    #[error("newick parse error at byte {pos}: {msg}")]
    Parse { pos: usize, msg: String },

    #[error("newick node has {0} children; only 0, 1 or 2 are allowed")]
    NotBinary(usize),
}

pub type TreeResult<T> = Result<T, TreeError>;
