use sb_core::{NodeId, State};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PoolError {
    #[error("{lineage} is not live in the {state} set")]
    NotLive { state: State, lineage: NodeId },

    #[error("{0} is already live")]
    AlreadyLive(NodeId),

    #[error("no samples are waiting to activate")]
    NothingPending,

    #[error("activation time {time} for {lineage} is not a finite, non-negative number")]
    InvalidTime { lineage: NodeId, time: f64 },
}

pub type PoolResult<T> = Result<T, PoolError>;
