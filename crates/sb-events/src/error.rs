use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EventError {
    #[error("propensities are not finite and non-negative (total {0})")]
    InvalidPropensity(f64),

    #[error("categorical draw {draw} fell through every interval (total {total}); rate bookkeeping is broken")]
    FellThrough { draw: f64, total: f64 },
}

pub type EventResult<T> = Result<T, EventError>;
