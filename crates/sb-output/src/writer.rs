//! The `TraceWriter` trait implemented by step-trace backends.

use crate::{OutputResult, TraceRow};

/// Sink for per-step trace rows.
///
/// Errors are stored by [`TraceObserver`](crate::TraceObserver) and
/// retrieved with [`take_error`](crate::TraceObserver::take_error).
pub trait TraceWriter {
    fn write_step(&mut self, row: &TraceRow) -> OutputResult<()>;

    /// Flush and close the underlying handle.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
