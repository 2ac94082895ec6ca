//! `sb-core`: foundational types for the seedbank coalescent simulator.
//!
//! This crate is a dependency of every other `sb-*` crate.  It intentionally
//! has no `sb-*` dependencies and minimal external ones (`rand`,
//! `rand_distr` and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`                                              |
//! | [`state`]       | `State` (active / dormant), `StateMap<T>`             |
//! | [`rng`]         | `SimRng`, `replicate_seed`                            |
//! | [`config`]      | `SimConfig`, `Sample`, `MigrationParams`              |
//! | [`error`]       | `ConfigError`, `ConfigResult`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required to read `SimConfig` from JSON.                    |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod state;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{MigrationParams, Sample, SimConfig};
pub use error::{ConfigError, ConfigResult};
pub use ids::NodeId;
pub use rng::{SimRng, replicate_seed};
pub use state::{State, StateMap};
