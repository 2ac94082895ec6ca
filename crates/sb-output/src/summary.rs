//! Replicate summary CSV and whole-batch output.

use std::fs::File;
use std::path::Path;

use csv::Writer;
use log::warn;
use sb_sim::Replicate;

use crate::{OutputResult, ReplicateRow, TreeFiles};

pub const SUMMARY_FILE: &str = "replicates.csv";

pub const SUMMARY_HEADER: [&str; 8] = [
    "replicate",
    "seed",
    "leaves",
    "tmrca",
    "state_changes",
    "active_length",
    "dormant_length",
    "dormant_fraction",
];

pub struct SummaryWriter {
    rows: Writer<File>,
}

impl SummaryWriter {
    /// Create `replicates.csv` in `dir` and write the header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut rows = Writer::from_path(dir.join(SUMMARY_FILE))?;
        rows.write_record(SUMMARY_HEADER)?;
        Ok(Self { rows })
    }

    /// Failed replicates keep their index and seed; the statistics are empty.
    pub fn write_row(&mut self, row: &ReplicateRow) -> OutputResult<()> {
        let mut record = vec![row.replicate.to_string(), row.seed.to_string()];
        match &row.stats {
            Some(s) => record.extend([
                s.leaves.to_string(),
                s.tmrca.to_string(),
                s.state_changes.to_string(),
                s.active_length.to_string(),
                s.dormant_length.to_string(),
                s.dormant_fraction().to_string(),
            ]),
            None => record.extend(std::iter::repeat_n(String::new(), 6)),
        }
        self.rows.write_record(&record)?;
        Ok(())
    }

    pub fn finish(&mut self) -> OutputResult<()> {
        self.rows.flush()?;
        Ok(())
    }
}

/// Write every successful tree to the tree files and every replicate to the
/// summary.  Returns the number of trees written.
pub fn write_batch(dir: &Path, replicates: &[Replicate]) -> OutputResult<usize> {
    let mut trees = TreeFiles::new(dir)?;
    let mut summary = SummaryWriter::new(dir)?;
    for replicate in replicates {
        match &replicate.result {
            Ok(tree) => trees.write_tree(tree)?,
            Err(e) => warn!("replicate {} (seed {}) failed: {e}", replicate.index, replicate.seed),
        }
        summary.write_row(&ReplicateRow::from(replicate))?;
    }
    trees.finish()?;
    summary.finish()?;
    Ok(trees.written())
}
