//! The `Simulator` struct and its event loop.

use log::{debug, trace};
use sb_core::SimRng;
use sb_events::{Event, RateModel, next_event};
use sb_pool::LineagePool;
use sb_tree::SeedbankTree;

use crate::{Decision, SimError, SimObserver, SimResult, StepRecord, apply_event};

/// The main simulation runner.
///
/// Holds the lineage pool, the tree under construction, the clock and the
/// RNG.  Each [`step`](Self::step) either activates the next queued sample
/// or applies one stochastic event; [`run`](Self::run) steps until a single
/// lineage is left and returns the finished tree.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Simulator {
    pub(crate) rates: RateModel,
    pub(crate) pool:  LineagePool,
    pub(crate) tree:  SeedbankTree,
    pub(crate) rng:   SimRng,
    pub(crate) seed:  u64,
    /// Backward time; starts at 0 and never decreases.
    pub(crate) time:  f64,
    pub(crate) steps: u64,
}

impl Simulator {
    // ── Public API ────────────────────────────────────────────────────────

    /// Step until one lineage remains, validate the tree and return it.
    ///
    /// # Errors
    ///
    /// [`SimError::Stalled`] if every rate is zero while several lineages
    /// are live and nothing is pending, or any bookkeeping error from a step.
    pub fn run<O: SimObserver>(mut self, observer: &mut O) -> SimResult<SeedbankTree> {
        debug!(
            "simulation start: seed {}, {} samples, rates {:?}",
            self.seed,
            self.pool.pending_count(),
            self.rates
        );
        observer.on_sim_start(self.seed, self.pool.pending_count());

        while !self.is_finished() {
            self.step(observer)?;
        }
        let tree = self.finish()?;

        debug!(
            "simulation end: {} steps, tmrca {}, {} state changes",
            self.steps,
            self.time,
            tree.total_changes()
        );
        observer.on_sim_end(&tree);
        Ok(tree)
    }

    /// Run one loop iteration and return its record.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<StepRecord> {
        let live = self.pool.live_counts();
        let propensities = self.rates.propensities(&live);
        let draw = next_event(&propensities, self.time, &mut self.rng)?;
        let next_sample = self.pool.pending_activation_time();

        let decision = if next_sample < draw.event.time() {
            let activation = self.pool.activate_next_sample()?;
            self.time = activation.time;
            Decision::Sample(activation.state)
        } else {
            let kind = match draw.event {
                Event::Null => {
                    return Err(SimError::Stalled {
                        time:    self.time,
                        active:  live.active,
                        dormant: live.dormant,
                    });
                }
                event => event.kind().ok_or(SimError::NullEventApplied)?,
            };
            self.time = draw.event.time();
            apply_event(&draw.event, &mut self.pool, &mut self.tree, &mut self.rng)?;
            Decision::Event(kind)
        };

        let record = StepRecord {
            step: self.steps,
            live,
            propensities,
            time: self.time,
            candidate_time: draw.event.time(),
            uniform: draw.uniform,
            decision,
        };
        trace!(
            "step {} t={} active={} dormant={} total_rate={} -> {}",
            record.step,
            record.time,
            record.live.active,
            record.live.dormant,
            propensities.total(),
            decision.as_str()
        );
        self.steps += 1;
        observer.on_step(&record);
        Ok(record)
    }

    /// One lineage live and nothing pending (or, degenerately, nothing at all).
    pub fn is_finished(&self) -> bool {
        self.pool.total_live() <= 1 && !self.pool.has_pending()
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn pool(&self) -> &LineagePool {
        &self.pool
    }

    pub fn tree(&self) -> &SeedbankTree {
        &self.tree
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn finish(&mut self) -> SimResult<SeedbankTree> {
        let root = self.pool.sole_live().ok_or(SimError::IncompleteCoalescence {
            live: self.pool.total_live(),
        })?;
        self.tree.set_root(root)?;
        self.tree.validate()?;
        Ok(std::mem::take(&mut self.tree))
    }
}
