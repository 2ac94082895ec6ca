//! Event propensities as a function of live counts and model parameters.

use sb_core::{MigrationParams, SimConfig, State, StateMap};

/// Instantaneous rate of each event kind for the current live counts.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Propensities {
    /// `k_a (k_a - 1) / (2 N)`.
    pub coalescence:       f64,
    pub active_to_dormant: f64,
    pub dormant_to_active: f64,
}

impl Propensities {
    /// Sum of the three rates, accumulated in sampling order.
    #[inline]
    pub fn total(&self) -> f64 {
        self.coalescence + self.dormant_to_active + self.active_to_dormant
    }

    pub fn is_zero(&self) -> bool {
        self.total() == 0.0
    }

    /// Rate of migration out of `from`.
    pub fn migration_from(&self, from: State) -> f64 {
        match from {
            State::Active  => self.active_to_dormant,
            State::Dormant => self.dormant_to_active,
        }
    }
}

/// The parameters that turn live counts into [`Propensities`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RateModel {
    /// Active population scale `N`.
    pub active_scale: f64,
    pub migration:    MigrationParams,
}

impl RateModel {
    pub fn new(active_scale: f64, migration: MigrationParams) -> Self {
        Self { active_scale, migration }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.active_scale, config.migration)
    }

    /// Propensities for `live` lineages per state.
    ///
    /// Migration rates are per lineage and scale linearly with the count of
    /// the source state.
    pub fn propensities(&self, live: &StateMap<usize>) -> Propensities {
        let k_active = live[State::Active] as f64;
        let k_dormant = live[State::Dormant] as f64;
        let (a_to_d, d_to_a) = self.migration.per_lineage_rates();

        let coalescence = if live[State::Active] < 2 {
            0.0
        } else {
            k_active * (k_active - 1.0) / (2.0 * self.active_scale)
        };
        Propensities {
            coalescence,
            active_to_dormant: a_to_d * k_active,
            dormant_to_active: d_to_a * k_dormant,
        }
    }

    /// Dormant population scale implied by the seedbank form, `N / K`.
    ///
    /// `None` for the other forms, or when `K` is zero.
    pub fn dormant_scale(&self) -> Option<f64> {
        match self.migration {
            MigrationParams::SeedbankRatio { size_ratio, .. } if size_ratio > 0.0 => {
                Some(self.active_scale / size_ratio)
            }
            _ => None,
        }
    }
}
