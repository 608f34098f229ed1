//! `sl-output`: simulation output writers.
//!
//! | Backend | Files created                         |
//! |---------|---------------------------------------|
//! | CSV     | `lamp_levels.csv`, `tick_costs.csv`   |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `sl_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sl_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut source, &mut obs, &stop)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{CostRow, LevelRow};
pub use writer::OutputWriter;
