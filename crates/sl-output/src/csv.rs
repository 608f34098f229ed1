//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `lamp_levels.csv`
//! - `tick_costs.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{CostRow, LevelRow, OutputResult};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    levels:   Writer<File>,
    costs:    Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut levels = Writer::from_path(dir.join("lamp_levels.csv"))?;
        levels.write_record(["tick", "timestamp", "lamp_id", "level"])?;

        let mut costs = Writer::from_path(dir.join("tick_costs.csv"))?;
        costs.write_record([
            "tick",
            "timestamp",
            "delta_secs",
            "full",
            "dim",
            "off",
            "messages_sent",
            "messages_received",
        ])?;

        Ok(Self { levels, costs, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_levels(&mut self, rows: &[LevelRow]) -> OutputResult<()> {
        for row in rows {
            self.levels.write_record(&[
                row.tick.to_string(),
                row.timestamp.to_string(),
                row.lamp_id.to_string(),
                format!("{:.1}", row.level),
            ])?;
        }
        Ok(())
    }

    fn write_cost(&mut self, row: &CostRow) -> OutputResult<()> {
        self.costs.write_record(&[
            row.tick.to_string(),
            row.timestamp.to_string(),
            row.delta_secs.to_string(),
            row.full.to_string(),
            row.dim.to_string(),
            row.off.to_string(),
            row.messages_sent.to_string(),
            row.messages_received.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.levels.flush()?;
        self.costs.flush()?;
        Ok(())
    }
}
