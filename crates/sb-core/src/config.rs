//! Simulation configuration.
//!
//! # JSON shape (with the `serde` feature)
//!
//! ```json
//! {
//!   "samples": [
//!     { "label": "a", "state": "active",  "time": 0.0 },
//!     { "label": "b", "state": "dormant", "time": 0.5 }
//!   ],
//!   "active_scale": 1.0,
//!   "migration": { "seedbank_ratio": { "base_rate": 0.5, "size_ratio": 2.0 } },
//!   "seed": 42
//! }
//! ```
//!
//! `active_scale` may also be spelled `theta`, and a sample's `time` may be
//! spelled `activation_time`.  `seed` is optional.

use std::collections::HashSet;

use crate::{ConfigError, ConfigResult, State};

// ── Sample ────────────────────────────────────────────────────────────────────

/// One sampled lineage: its leaf label, the state it was sampled in and its
/// activation (sampling) time, measured backward from the present.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    pub label: String,
    pub state: State,
    #[cfg_attr(feature = "serde", serde(alias = "activation_time"))]
    pub time:  f64,
}

impl Sample {
    pub fn new(label: impl Into<String>, state: State, time: f64) -> Self {
        Self { label: label.into(), state, time }
    }

    pub fn active(label: impl Into<String>, time: f64) -> Self {
        Self::new(label, State::Active, time)
    }

    pub fn dormant(label: impl Into<String>, time: f64) -> Self {
        Self::new(label, State::Dormant, time)
    }
}

// ── MigrationParams ───────────────────────────────────────────────────────────

/// How per-lineage migration rates between the two states are specified.
///
/// All three forms yield a pair of per-lineage rates; see
/// [`per_lineage_rates`](Self::per_lineage_rates).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MigrationParams {
    /// The same per-lineage rate in both directions.
    Symmetric { rate: f64 },

    /// Seedbank form: active lineages go dormant at `base_rate` (`c`),
    /// dormant lineages wake at `base_rate * size_ratio` (`c * K`).
    SeedbankRatio { base_rate: f64, size_ratio: f64 },

    /// Two independent per-lineage rates.
    Directional { active_to_dormant: f64, dormant_to_active: f64 },
}

impl MigrationParams {
    /// No migration at all.
    pub const NONE: MigrationParams = MigrationParams::Symmetric { rate: 0.0 };

    /// `(active → dormant, dormant → active)` rate per live lineage.
    pub fn per_lineage_rates(&self) -> (f64, f64) {
        match *self {
            MigrationParams::Symmetric { rate } => (rate, rate),
            MigrationParams::SeedbankRatio { base_rate, size_ratio } => {
                (base_rate, base_rate * size_ratio)
            }
            MigrationParams::Directional { active_to_dormant, dormant_to_active } => {
                (active_to_dormant, dormant_to_active)
            }
        }
    }

    /// Named raw parameters, for validation and logging.
    pub fn named_values(&self) -> Vec<(&'static str, f64)> {
        match *self {
            MigrationParams::Symmetric { rate } => vec![("migration rate", rate)],
            MigrationParams::SeedbankRatio { base_rate, size_ratio } => vec![
                ("base rate", base_rate),
                ("size ratio", size_ratio),
            ],
            MigrationParams::Directional { active_to_dormant, dormant_to_active } => vec![
                ("active-to-dormant rate", active_to_dormant),
                ("dormant-to-active rate", dormant_to_active),
            ],
        }
    }
}

impl Default for MigrationParams {
    fn default() -> Self {
        MigrationParams::NONE
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// `sb_sim::SimBuilder`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Sampled lineages, in leaf-ID order.
    pub samples: Vec<Sample>,

    /// Coalescence scale `N` of the active population: `k` active lineages
    /// coalesce at total rate `k (k - 1) / (2 N)`.
    #[cfg_attr(feature = "serde", serde(alias = "theta"))]
    pub active_scale: f64,

    /// Migration between the active and dormant states.
    #[cfg_attr(feature = "serde", serde(default))]
    pub migration: MigrationParams,

    /// Master RNG seed.  `None` means the caller draws one from OS entropy.
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: Option<u64>,
}

impl SimConfig {
    /// A configuration with the given samples, no migration and no seed.
    pub fn new(samples: Vec<Sample>, active_scale: f64) -> Self {
        Self {
            samples,
            active_scale,
            migration: MigrationParams::NONE,
            seed: None,
        }
    }

    pub fn with_migration(mut self, migration: MigrationParams) -> Self {
        self.migration = migration;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[inline]
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Earliest activation time across all samples (`+inf` if there are none).
    pub fn min_activation_time(&self) -> f64 {
        self.samples.iter().map(|s| s.time).fold(f64::INFINITY, f64::min)
    }

    /// Reject structurally inconsistent input before anything is simulated.
    ///
    /// # Errors
    ///
    /// The first [`ConfigError`] found, checking samples first, then the
    /// active scale, then migration parameters.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.samples.is_empty() {
            return Err(ConfigError::NoSamples);
        }

        let mut seen: HashSet<&str> = HashSet::with_capacity(self.samples.len());
        for (index, sample) in self.samples.iter().enumerate() {
            if sample.label.is_empty() {
                return Err(ConfigError::EmptyLabel { index });
            }
            if !seen.insert(sample.label.as_str()) {
                return Err(ConfigError::DuplicateLabel { label: sample.label.clone() });
            }
            if !(sample.time.is_finite() && sample.time >= 0.0) {
                return Err(ConfigError::InvalidActivationTime {
                    label: sample.label.clone(),
                    time:  sample.time,
                });
            }
        }

        if !(self.active_scale.is_finite() && self.active_scale > 0.0) {
            return Err(ConfigError::InvalidActiveScale(self.active_scale));
        }

        for (name, value) in self.migration.named_values() {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidRate { name, value });
            }
        }

        Ok(())
    }
}
