//! The `OutputWriter` trait implemented by backend writers.

use crate::{CostRow, LevelRow, OutputResult};

/// Sink for per-lamp levels and per-tick cost rows.
///
/// Errors are returned to [`SimOutputObserver`](crate::SimOutputObserver),
/// which keeps the first one for [`take_error`](crate::SimOutputObserver::take_error).
pub trait OutputWriter {
    /// Write the levels of every lamp for one tick.
    fn write_levels(&mut self, rows: &[LevelRow]) -> OutputResult<()>;

    /// Write one cost row.
    fn write_cost(&mut self, row: &CostRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
