//! Plain data row types written by output backends.

use sb_sim::{Replicate, StepRecord};
use sb_tree::TreeStats;

/// One loop iteration of the simulator, flattened for `trace.csv`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceRow {
    pub step:                   u64,
    pub active:                 usize,
    pub dormant:                usize,
    pub coalescence_rate:       f64,
    pub active_to_dormant_rate: f64,
    pub dormant_to_active_rate: f64,
    pub total_rate:             f64,
    pub time:                   f64,
    /// Drawn candidate time, `inf` when nothing could fire.
    pub candidate_time:         f64,
    /// Empty only when no candidate was drawn.
    pub uniform:                Option<f64>,
    pub decision:               &'static str,
}

impl From<&StepRecord> for TraceRow {
    fn from(r: &StepRecord) -> Self {
        Self {
            step:                   r.step,
            active:                 r.live.active,
            dormant:                r.live.dormant,
            coalescence_rate:       r.propensities.coalescence,
            active_to_dormant_rate: r.propensities.active_to_dormant,
            dormant_to_active_rate: r.propensities.dormant_to_active,
            total_rate:             r.propensities.total(),
            time:                   r.time,
            candidate_time:         r.candidate_time,
            uniform:                r.uniform,
            decision:               r.decision.as_str(),
        }
    }
}

/// One replicate for `replicates.csv`.  `stats` is `None` if it failed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplicateRow {
    pub replicate: usize,
    pub seed:      u64,
    pub stats:     Option<TreeStats>,
}

impl From<&Replicate> for ReplicateRow {
    fn from(r: &Replicate) -> Self {
        Self {
            replicate: r.index,
            seed:      r.seed,
            stats:     r.result.as_ref().ok().map(|t| t.stats()),
        }
    }
}
