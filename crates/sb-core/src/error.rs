//! Configuration error type.
//!
//! These are the user-input errors: a configuration that fails any of them is
//! rejected before a single lineage is created, so no partial output exists.
//! Simulation-time failures live in `sb-sim`'s `SimError`, which wraps this
//! type as one variant.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("configuration must contain at least one sample")]
    NoSamples,

    #[error("sample {index} has an empty label")]
    EmptyLabel { index: usize },

    #[error("sample label {label:?} is used more than once")]
    DuplicateLabel { label: String },

    #[error("sample {label:?} has invalid activation time {time} (must be finite and >= 0)")]
    InvalidActivationTime { label: String, time: f64 },

    #[error("active scale must be finite and > 0, got {0}")]
    InvalidActiveScale(f64),

    #[error("{name} must be finite and >= 0, got {value}")]
    InvalidRate { name: &'static str, value: f64 },
}

/// Shorthand result type for configuration handling.
pub type ConfigResult<T> = Result<T, ConfigError>;
