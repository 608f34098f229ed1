//! Decoded transport records.
//!
//! The transport (a pub/sub bus with a binary encoding) lives outside this
//! crate; these are the records on either side of it.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use sl_core::{LampId, LightLevel, Tick};

/// Topic motion reports are published under.
pub const MOTION_TOPIC: &str = "streetlamps";

/// Topic level snapshots are published under.
pub const LEVEL_TOPIC: &str = "light_level";

/// One external tick: a timestamp and the lamps that saw motion.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
    #[serde(default)]
    pub active:    BTreeSet<LampId>,
}

impl TickInput {
    pub fn new(timestamp: i64, active: impl IntoIterator<Item = LampId>) -> Self {
        Self { timestamp, active: active.into_iter().collect() }
    }

    /// A tick with no motion anywhere.
    pub fn quiet(timestamp: i64) -> Self {
        Self { timestamp, active: BTreeSet::new() }
    }
}

/// Level snapshot emitted after a tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TickOutput {
    /// Sequence number of the tick within this run.
    pub tick:      Tick,
    pub timestamp: i64,
    /// Level of every lamp after the tick.
    pub changes:   BTreeMap<LampId, LightLevel>,
}
