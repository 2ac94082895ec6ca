//! CSV step-trace backend: `trace.csv` in the output directory.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::TraceWriter;
use crate::{OutputResult, TraceRow};

pub const TRACE_FILE: &str = "trace.csv";

pub const TRACE_HEADER: [&str; 11] = [
    "step",
    "active",
    "dormant",
    "coalescence_rate",
    "active_to_dormant_rate",
    "dormant_to_active_rate",
    "total_rate",
    "time",
    "candidate_time",
    "uniform",
    "decision",
];

pub struct CsvTraceWriter {
    trace:    Writer<File>,
    finished: bool,
}

impl CsvTraceWriter {
    /// Create `trace.csv` in `dir` and write the header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut trace = Writer::from_path(dir.join(TRACE_FILE))?;
        trace.write_record(TRACE_HEADER)?;
        Ok(Self { trace, finished: false })
    }
}

impl TraceWriter for CsvTraceWriter {
    fn write_step(&mut self, row: &TraceRow) -> OutputResult<()> {
        self.trace.write_record(&[
            row.step.to_string(),
            row.active.to_string(),
            row.dormant.to_string(),
            row.coalescence_rate.to_string(),
            row.active_to_dormant_rate.to_string(),
            row.dormant_to_active_rate.to_string(),
            row.total_rate.to_string(),
            row.time.to_string(),
            row.candidate_time.to_string(),
            row.uniform.map(|u| u.to_string()).unwrap_or_default(),
            row.decision.to_owned(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.trace.flush()?;
        Ok(())
    }
}
