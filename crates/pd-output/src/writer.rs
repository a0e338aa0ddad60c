//! The `OutputWriter` trait implemented by statistics backends.

use crate::{EventRow, OutputResult, StepSummaryRow};

/// A destination for step summaries and life events.
///
/// Errors are returned to the caller; [`StatisticsCollector`] keeps the
/// first one for [`take_error`].
///
/// [`StatisticsCollector`]: crate::StatisticsCollector
/// [`take_error`]: crate::StatisticsCollector::take_error
pub trait OutputWriter {
    /// Write a batch of life events.
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()>;

    /// Write one step summary row.
    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()>;

    /// Flush all underlying file handles.  Safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
