use sb_core::{ConfigError, State};
use sb_events::EventError;
use sb_pool::PoolError;
use sb_tree::TreeError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("simulation stalled at time {time}: {active} active and {dormant} dormant lineages live, every rate is zero and no sample is pending")]
    Stalled {
        time:    f64,
        active:  usize,
        dormant: usize,
    },

    #[error("simulation ended with {live} live lineages instead of one")]
    IncompleteCoalescence { live: usize },

    #[error("{event} needs {needed} live {state} lineages but only {live} are live")]
    NotEnoughLineages {
        event:  &'static str,
        state:  State,
        needed: usize,
        live:   usize,
    },

    #[error("a null event cannot be applied")]
    NullEventApplied,

    #[error("lineage pool error: {0}")]
    Pool(#[from] PoolError),

    #[error("tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("event sampler error: {0}")]
    Event(#[from] EventError),
}

pub type SimResult<T> = Result<T, SimError>;
