//! `sb-output`: files written by a simulation run.
//!
//! | Writer            | Files created                                   |
//! |-------------------|-------------------------------------------------|
//! | [`CsvTraceWriter`]| `trace.csv` (one row per loop iteration)        |
//! | [`TreeFiles`]     | `tree.newick`, `tree_collapsed.newick`          |
//! | [`SummaryWriter`] | `replicates.csv` (one row per replicate)        |
//!
//! Step traces go through the [`TraceWriter`] trait and are driven by
//! [`TraceObserver`], which implements `sb_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sb_output::{CsvTraceWriter, TraceObserver, TreeFiles};
//!
//! let mut obs = TraceObserver::new(CsvTraceWriter::new(Path::new("./out"))?);
//! let tree = sim.run(&mut obs)?;
//! obs.take_error().map(|e| eprintln!("trace error: {e}"));
//!
//! let mut trees = TreeFiles::new(Path::new("./out"))?;
//! trees.write_tree(&tree)?;
//! trees.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod summary;
pub mod trees;
pub mod writer;


pub use csv::CsvTraceWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TraceObserver;
pub use row::{ReplicateRow, TraceRow};
pub use summary::{SummaryWriter, write_batch};
pub use trees::TreeFiles;
pub use writer::TraceWriter;
