//! `sb-sim`: the seedbank coalescent event loop.
//!
//! # Loop
//!
//! ```text
//! t = 0
//! until exactly one lineage is live and no sample is pending:
//!   ① Rates       propensities from the live counts.
//!   ② Candidate   exponential waiting time + categorical pick (or Null).
//!   ③ Compare     if the next sample activates before the candidate,
//!                 advance to it, make it live, discard the candidate.
//!   ④ Apply       otherwise advance to the candidate and apply it:
//!                   Coalescence → merge a uniform pair of active lineages
//!                   Migration   → switch one uniform lineage's state
//!                   Null        → nothing can ever happen: stalled
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs [`run_replicates`] on Rayon's thread pool.        |
//! | `fx-hash`  | FxHash for the live-set position index.                |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sb_core::{Sample, SimConfig};
//! use sb_sim::{NoopObserver, SimBuilder};
//!
//! let config = SimConfig::new(vec![Sample::active("a", 0.0), Sample::active("b", 0.0)], 1.0);
//! let sim = SimBuilder::new(config).seed(42).build()?;
//! let tree = sim.run(&mut NoopObserver)?;
//! println!("{}", sb_tree::to_newick(&tree)?);
//! ```

pub mod apply;
pub mod builder;
pub mod error;
pub mod observer;
pub mod replicates;
pub mod sim;

#[cfg(test)]
mod tests;

pub use apply::apply_event;
pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{Decision, NoopObserver, SimObserver, StepRecord};
pub use replicates::{Replicate, run_replicates};
pub use sim::Simulator;

use sb_core::SimConfig;
use sb_tree::SeedbankTree;

/// Build and run one simulation with no observer.
pub fn simulate(config: SimConfig, seed: u64) -> SimResult<SeedbankTree> {
    SimBuilder::new(config).seed(seed).build()?.run(&mut NoopObserver)
}
