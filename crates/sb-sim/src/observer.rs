//! Simulation observer trait for step traces and data collection.

use sb_core::{State, StateMap};
use sb_events::{EventKind, Propensities};
use sb_tree::SeedbankTree;

/// What a loop iteration did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    /// A queued sample of this state became live.
    Sample(State),
    /// A stochastic event fired.
    Event(EventKind),
}

impl Decision {
    /// Column value in the step trace.
    pub fn as_str(self) -> &'static str {
        match self {
            Decision::Sample(_) => "sample",
            Decision::Event(kind) => kind.as_str(),
        }
    }
}

/// Everything visited in one loop iteration.
///
/// `live` and `propensities` are the values the candidate was drawn from,
/// i.e. before the step was applied.  `time` is the clock after the step.
/// `candidate_time` and `uniform` describe the drawn candidate even when a
/// sample activation wins and the candidate is discarded; for a Null
/// candidate they are `+inf` and `None`.
#[derive(Clone, Debug, PartialEq)]
pub struct StepRecord {
    pub step:           u64,
    pub live:           StateMap<usize>,
    pub propensities:   Propensities,
    pub time:           f64,
    pub candidate_time: f64,
    pub uniform:        Option<f64>,
    pub decision:       Decision,
}

/// Callbacks invoked by [`Simulator::run`][crate::Simulator::run].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: coalescence counter
///
/// ```rust,ignore
/// struct Coalescences(usize);
///
/// impl SimObserver for Coalescences {
///     fn on_step(&mut self, record: &StepRecord) {
///         if record.decision == Decision::Event(EventKind::Coalescence) {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once before the first step.
    fn on_sim_start(&mut self, _seed: u64, _samples: usize) {}

    /// Called after every loop iteration.
    fn on_step(&mut self, _record: &StepRecord) {}

    /// Called once with the finished, validated tree.
    fn on_sim_end(&mut self, _tree: &SeedbankTree) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
