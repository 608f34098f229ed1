//! Topology error type.

use thiserror::Error;

use sl_core::{GeoPoint, LampId};

/// Errors produced while loading lamps or building the neighbor graph.
///
/// All of these are startup-time failures: no simulation can run without a
/// valid graph.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("topology has no lamps")]
    Empty,

    #[error("lamp {0} registered more than once")]
    DuplicateLamp(LampId),

    #[error("lamp {id} has an invalid position {pos}")]
    InvalidPosition { id: LampId, pos: GeoPoint },

    #[error("communication range must be finite and non-negative, got {0} km")]
    InvalidRange(f64),

    #[error("too many lamps for a 32-bit arena index: {0}")]
    TooManyLamps(usize),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type TopologyResult<T> = Result<T, TopologyError>;
