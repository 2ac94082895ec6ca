//! `LineagePool`: live sets and activation queues for both states.

use sb_core::{NodeId, State, StateMap};

use crate::{ActivationQueue, LiveSet, PoolError, PoolResult};

/// A sample moved from its queue into the live set.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Activation {
    pub state:   State,
    pub lineage: NodeId,
    pub time:    f64,
}

#[derive(Clone, Debug, Default)]
pub struct LineagePool {
    live:    StateMap<LiveSet>,
    pending: StateMap<ActivationQueue>,
}

impl LineagePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n_samples: usize) -> Self {
        Self {
            live:    StateMap::from_fn(|_| LiveSet::with_capacity(n_samples)),
            pending: StateMap::default(),
        }
    }

    // ── Activation queues ─────────────────────────────────────────────────

    /// Queue a not-yet-introduced sample to activate in `state` at `time`.
    pub fn queue_sample(&mut self, state: State, lineage: NodeId, time: f64) -> PoolResult<()> {
        if !(time.is_finite() && time >= 0.0) {
            return Err(PoolError::InvalidTime { lineage, time });
        }
        if self.is_live(lineage) {
            return Err(PoolError::AlreadyLive(lineage));
        }
        self.pending[state].push(time, lineage);
        Ok(())
    }

    /// Move the earliest queued sample into its live set.
    ///
    /// Ties between the two queues go to [`State::Active`].
    ///
    /// # Errors
    ///
    /// [`PoolError::NothingPending`] if both queues are empty.
    pub fn activate_next_sample(&mut self) -> PoolResult<Activation> {
        let state = self.next_pending_state().ok_or(PoolError::NothingPending)?;
        let (time, lineage) = self.pending[state].pop().ok_or(PoolError::NothingPending)?;
        self.add_live(state, lineage)?;
        Ok(Activation { state, lineage, time })
    }

    /// Minimum activation time across both queues, or `+inf` if none.
    pub fn pending_activation_time(&self) -> f64 {
        self.pending.active.next_time().min(self.pending.dormant.next_time())
    }

    pub fn has_pending(&self) -> bool {
        self.pending.iter().any(|(_, q)| !q.is_empty())
    }

    pub fn pending_count(&self) -> usize {
        self.pending.active.len() + self.pending.dormant.len()
    }

    pub fn pending(&self, state: State) -> &ActivationQueue {
        &self.pending[state]
    }

    fn next_pending_state(&self) -> Option<State> {
        State::ALL
            .into_iter()
            .filter_map(|s| self.pending[s].peek().map(|(t, _)| (t, s)))
            // `min_by` keeps the first of equal elements, i.e. Active.
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, s)| s)
    }

    // ── Live sets ─────────────────────────────────────────────────────────

    /// Number of live lineages per state.
    pub fn live_counts(&self) -> StateMap<usize> {
        self.live.map(LiveSet::len)
    }

    pub fn live(&self, state: State) -> &LiveSet {
        &self.live[state]
    }

    pub fn total_live(&self) -> usize {
        self.live.active.len() + self.live.dormant.len()
    }

    pub fn is_live(&self, lineage: NodeId) -> bool {
        self.live.iter().any(|(_, set)| set.contains(lineage))
    }

    /// The live lineage at `index` in `state`'s set.
    pub fn live_at(&self, state: State, index: usize) -> Option<NodeId> {
        self.live[state].get(index)
    }

    /// # Errors
    ///
    /// [`PoolError::AlreadyLive`] if `lineage` is live in either state.
    pub fn add_live(&mut self, state: State, lineage: NodeId) -> PoolResult<()> {
        if self.live[state.other()].contains(lineage) || !self.live[state].insert(lineage) {
            return Err(PoolError::AlreadyLive(lineage));
        }
        Ok(())
    }

    /// # Errors
    ///
    /// [`PoolError::NotLive`] if `lineage` is not in `state`'s set.
    pub fn remove_live(&mut self, state: State, lineage: NodeId) -> PoolResult<()> {
        if self.live[state].remove(lineage) {
            Ok(())
        } else {
            Err(PoolError::NotLive { state, lineage })
        }
    }

    /// Move a live lineage from `from` to the other state.
    pub fn switch_state(&mut self, from: State, lineage: NodeId) -> PoolResult<()> {
        self.remove_live(from, lineage)?;
        self.add_live(from.other(), lineage)
    }

    /// The single remaining lineage once nothing else is live or pending.
    pub fn sole_live(&self) -> Option<NodeId> {
        if self.total_live() != 1 || self.has_pending() {
            return None;
        }
        self.live.iter().find_map(|(_, set)| set.get(0))
    }
}
