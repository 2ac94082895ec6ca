//! `TraceObserver<W>` bridges `SimObserver` to a `TraceWriter`.

use sb_sim::{SimObserver, StepRecord};
use sb_tree::SeedbankTree;

use crate::writer::TraceWriter;
use crate::{OutputError, OutputResult, TraceRow};

/// A [`SimObserver`] that writes one [`TraceRow`] per step to any
/// [`TraceWriter`].
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].  Only the first error is kept and no
/// further rows are written after it.
pub struct TraceObserver<W: TraceWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: TraceWriter> TraceObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result
            && self.last_error.is_none()
        {
            self.last_error = Some(e);
        }
    }
}

impl<W: TraceWriter> SimObserver for TraceObserver<W> {
    fn on_step(&mut self, record: &StepRecord) {
        if self.last_error.is_some() {
            return;
        }
        let result = self.writer.write_step(&TraceRow::from(record));
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _tree: &SeedbankTree) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
