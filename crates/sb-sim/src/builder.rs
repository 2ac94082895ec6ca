//! Fluent builder for constructing a [`Simulator`].

use log::debug;
use sb_core::{SimConfig, SimRng};
use sb_events::RateModel;
use sb_pool::LineagePool;
use sb_tree::SeedbankTree;

use crate::{SimResult, Simulator};

/// Fluent builder for [`Simulator`].
///
/// The seed is taken from, in order: [`seed`](Self::seed), the config's
/// `seed` field, OS entropy.  Read it back with [`Simulator::seed`].
///
/// # Example
///
/// ```rust,ignore
/// let sim = SimBuilder::new(config).seed(7).build()?;
/// let tree = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config: SimConfig,
    seed:   Option<u64>,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self { config, seed: None }
    }

    /// Override the config's seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the config, create one leaf per sample and queue them all.
    ///
    /// Leaves take IDs `0..n` in sample order; each leaf sits at its sample's
    /// activation time.
    pub fn build(self) -> SimResult<Simulator> {
        self.config.validate()?;

        let n = self.config.sample_count();
        let mut tree = SeedbankTree::with_capacity(n);
        let mut pool = LineagePool::with_capacity(n);
        for sample in &self.config.samples {
            let leaf = tree.add_leaf(sample.label.clone(), sample.state, sample.time);
            pool.queue_sample(sample.state, leaf, sample.time)?;
        }

        let seed = match self.seed.or(self.config.seed) {
            Some(seed) => seed,
            None => {
                let seed = SimRng::entropy_seed();
                debug!("no seed given; drew {seed} from entropy");
                seed
            }
        };

        Ok(Simulator {
            rates: RateModel::from_config(&self.config),
            pool,
            tree,
            rng: SimRng::new(seed),
            seed,
            time: 0.0,
            steps: 0,
        })
    }
}
