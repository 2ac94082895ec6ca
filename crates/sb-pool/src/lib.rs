//! `sb-pool`: which lineages are live, and which samples are still waiting.
//!
//! # Crate layout
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`live`]      | `LiveSet` (O(1) insert/remove, index-addressable)     |
//! | [`queue`]     | `ActivationQueue` (samples sorted by activation time) |
//! | [`pool`]      | `LineagePool`, `Activation`                           |
//! | [`error`]     | `PoolError`, `PoolResult<T>`                          |
//!
//! Every lineage is in exactly one place: one of the two live sets, one of
//! the two activation queues, or (once coalesced) nowhere.

pub mod error;
pub mod live;
pub mod pool;
pub mod queue;


pub use error::{PoolError, PoolResult};
pub use live::LiveSet;
pub use pool::{Activation, LineagePool};
pub use queue::ActivationQueue;
