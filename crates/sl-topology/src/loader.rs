//! CSV lamp-position loader.
//!
//! # CSV format
//!
//! One row per lamp, in the order lamps should be registered (this order is
//! the engine's evaluation order):
//!
//! ```csv
//! id,lat,lon
//! 11046617406,56.17210,10.18830
//! 11046617407,56.17245,10.18891
//! ```
//!
//! `id` is the map source's node id.  Validation (duplicates, coordinate
//! bounds) happens when the graph is built, not here.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use sl_core::GeoPoint;

use crate::{TopologyError, TopologyResult};

/// One `(id, latitude, longitude)` row from the topology source.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LampRecord {
    pub id:  u64,
    pub lat: f64,
    pub lon: f64,
}

/// Load lamp records from a CSV file.
pub fn load_lamps_csv(path: &Path) -> TopologyResult<Vec<LampRecord>> {
    let file = std::fs::File::open(path).map_err(TopologyError::Io)?;
    load_lamps_reader(file)
}

/// Like [`load_lamps_csv`] but accepts any `Read` source.
pub fn load_lamps_reader<R: Read>(reader: R) -> TopologyResult<Vec<LampRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    csv_reader
        .deserialize::<LampRecord>()
        .map(|row| row.map_err(|e| TopologyError::Parse(e.to_string())))
        .collect()
}

/// Mean position of a set of lamps, or `None` if there are none.
///
/// Used to centre map views and synthetic layouts; a plain coordinate mean is
/// adequate at neighborhood scale.
pub fn centroid(records: &[LampRecord]) -> Option<GeoPoint> {
    if records.is_empty() {
        return None;
    }
    let n = records.len() as f64;
    let (lat, lon) = records
        .iter()
        .fold((0.0, 0.0), |(lat, lon), r| (lat + r.lat, lon + r.lon));
    Some(GeoPoint::new(lat / n, lon / n))
}
