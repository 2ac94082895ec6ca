//! Independent replicate batches.

use log::debug;
use sb_core::{SimConfig, replicate_seed};
use sb_tree::SeedbankTree;

use crate::{NoopObserver, SimBuilder, SimResult};

/// One replicate of a batch.
#[derive(Debug)]
pub struct Replicate {
    pub index:  usize,
    pub seed:   u64,
    pub result: SimResult<SeedbankTree>,
}

/// Run `count` replicates of `config`, replicate `i` seeded with
/// [`replicate_seed`]`(base_seed, i)`.
///
/// Results come back in replicate order.  A failing replicate is reported
/// in its own `result` and does not stop the others.  With the `parallel`
/// feature the batch runs on Rayon's thread pool; the output is identical.
pub fn run_replicates(config: &SimConfig, base_seed: u64, count: usize) -> Vec<Replicate> {
    debug!("running {count} replicates from base seed {base_seed}");

    #[cfg(feature = "parallel")]
    let replicates: Vec<Replicate> = {
        use rayon::prelude::*;
        (0..count).into_par_iter().map(|i| run_one(config, base_seed, i)).collect()
    };

    #[cfg(not(feature = "parallel"))]
    let replicates: Vec<Replicate> = (0..count).map(|i| run_one(config, base_seed, i)).collect();

    let failed = replicates.iter().filter(|r| r.result.is_err()).count();
    debug!("replicates done: {} ok, {failed} failed", count - failed);
    replicates
}

fn run_one(config: &SimConfig, base_seed: u64, index: usize) -> Replicate {
    let seed = replicate_seed(base_seed, index as u64);
    let result = SimBuilder::new(config.clone())
        .seed(seed)
        .build()
        .and_then(|sim| sim.run(&mut NoopObserver));
    Replicate { index, seed, result }
}
