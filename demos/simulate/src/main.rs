//! simulate: run the seedbank coalescent from a JSON config.
//!
//! ```text
//! cargo run --release -p simulate -- --config demos/simulate/config.json --out output/run
//! cargo run --release -p simulate -- --config demos/simulate/config.json --replicates 1000 --seed 7
//! ```
//!
//! A single run prints its annotated Newick tree on stdout and writes
//! `tree.newick`, `tree_collapsed.newick`, `replicates.csv` and (with
//! `--trace`) `trace.csv` to the output directory.  A batch writes one tree
//! line and one summary row per replicate.

mod minimal_logger;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{info, warn};
use sb_core::{SimConfig, SimRng};
use sb_output::{CsvTraceWriter, TraceObserver, write_batch};
use sb_sim::{NoopObserver, Replicate, SimBuilder, run_replicates};
use sb_tree::{SeedbankTree, to_newick};

use crate::minimal_logger::MinimalLogger;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(about = "Seedbank coalescent genealogy simulator")]
struct Args {
    /// JSON simulation config
    #[arg(long)]
    config: PathBuf,
    /// Random seed; overrides the config (random if neither is given)
    #[arg(long)]
    seed: Option<u64>,
    /// Number of independent replicates
    #[arg(long, default_value_t = 1)]
    replicates: usize,
    /// Output directory (created if missing)
    #[arg(long, default_value = "output/simulate")]
    out: PathBuf,
    /// Write the per-step trace.csv (single runs only)
    #[arg(long)]
    trace: bool,
    /// -v for debug output, -vv for every step
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

// ── Main ─────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    MinimalLogger::init(args.verbose).context("installing logger")?;

    let config = load_config(&args.config)?;
    let seed = args.seed.or(config.seed).unwrap_or_else(SimRng::entropy_seed);
    info!(
        "{} samples, active scale {}, migration {:?}, seed {seed}",
        config.sample_count(),
        config.active_scale,
        config.migration
    );

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("creating output directory {}", args.out.display()))?;

    let t0 = Instant::now();
    match args.replicates {
        0 => bail!("--replicates must be at least 1"),
        1 => run_single(config, seed, &args)?,
        n => {
            if args.trace {
                warn!("--trace is ignored for batches of {n} replicates");
            }
            run_batch(&config, seed, n, &args.out)?;
        }
    }
    info!("done in {:.2?}; output in {}", t0.elapsed(), args.out.display());
    Ok(())
}

fn load_config(path: &Path) -> Result<SimConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: SimConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

fn run_single(config: SimConfig, seed: u64, args: &Args) -> Result<()> {
    let sim = SimBuilder::new(config).seed(seed).build()?;

    let tree: SeedbankTree = if args.trace {
        let writer = CsvTraceWriter::new(&args.out).context("creating trace.csv")?;
        let mut obs = TraceObserver::new(writer);
        let tree = sim.run(&mut obs)?;
        if let Some(e) = obs.take_error() {
            warn!("trace output incomplete: {e}");
        }
        tree
    } else {
        sim.run(&mut NoopObserver)?
    };

    let stats = tree.stats();
    info!(
        "tmrca {:.6}, {} state changes, dormant fraction {:.4}",
        stats.tmrca,
        stats.state_changes,
        stats.dormant_fraction()
    );
    println!("{}", to_newick(&tree)?);

    let run = [Replicate { index: 0, seed, result: Ok(tree) }];
    write_batch(&args.out, &run).context("writing tree files")?;
    Ok(())
}

fn run_batch(config: &SimConfig, base_seed: u64, count: usize, out: &Path) -> Result<()> {
    let replicates = run_replicates(config, base_seed, count);
    let written = write_batch(out, &replicates).context("writing batch output")?;

    let failed = count - written;
    if failed == count {
        bail!("all {count} replicates failed");
    }
    if failed > 0 {
        warn!("{failed} of {count} replicates failed");
    }

    let tmrcas: Vec<f64> = replicates
        .iter()
        .filter_map(|r| r.result.as_ref().ok())
        .map(|t| t.stats().tmrca)
        .collect();
    let mean = tmrcas.iter().sum::<f64>() / tmrcas.len() as f64;
    info!("{written} trees written, mean tmrca {mean:.6}");
    Ok(())
}
