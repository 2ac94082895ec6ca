//! `sb-events`: what can happen next, how fast, and which one does.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`rates`]   | `RateModel`, `Propensities`                                |
//! | [`event`]   | `Event` (`Coalescence`, `Migration`, `Null`), `EventKind`  |
//! | [`sampler`] | `next_event`, `Draw`                                       |
//! | [`error`]   | `EventError`, `EventResult<T>`                             |
//!
//! # Step model
//!
//! Each driver step computes [`Propensities`] from the live counts, then
//! [`next_event`] draws an exponential waiting time with the total rate and
//! one categorical pick among the three kinds.  The pick scans the
//! cumulative intervals in the fixed order
//!
//! ```text
//! coalescence | dormant -> active | active -> dormant
//! ```
//!
//! which is part of the reproducibility contract: changing it changes every
//! tree produced from a given seed.

pub mod error;
pub mod event;
pub mod rates;
pub mod sampler;


pub use error::{EventError, EventResult};
pub use event::{Event, EventKind};
pub use rates::{Propensities, RateModel};
pub use sampler::{Draw, next_event};
