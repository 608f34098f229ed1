//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use sl_core::Tick;
use sl_sim::{SimCounters, SimObserver, TickOutput};

use crate::row::{CostRow, LevelRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes every tick's levels and cost row to an
/// [`OutputWriter`].
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:         W,
    /// Skip the per-lamp level file when only costs are wanted.
    write_levels:   bool,
    last_timestamp: Option<i64>,
    last_error:     Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            write_levels:   true,
            last_timestamp: None,
            last_error:     None,
        }
    }

    /// Record only cost rows.
    pub fn costs_only(mut self) -> Self {
        self.write_levels = false;
        self
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, output: &TickOutput, counters: &SimCounters) {
        if self.write_levels {
            let rows = LevelRow::from_output(output);
            if !rows.is_empty() {
                let result = self.writer.write_levels(&rows);
                self.store_err(result);
            }
        }

        let cost = CostRow::from_output(output, self.last_timestamp, counters);
        self.last_timestamp = Some(output.timestamp);
        let result = self.writer.write_cost(&cost);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _ticks: Tick, _counters: &SimCounters) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
