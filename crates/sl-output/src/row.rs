//! Plain data row types written by output backends.

use sl_core::LightLevel;
use sl_sim::{SimCounters, TickOutput};

/// One lamp's level after one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelRow {
    pub tick:      u64,
    pub timestamp: i64,
    pub lamp_id:   u64,
    pub level:     f32,
}

/// Energy-cost tally for one tick: how many lamps burn at full, dim, or not
/// at all, and the fan-out traffic so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostRow {
    pub tick:              u64,
    pub timestamp:         i64,
    /// Seconds since the previous tick's timestamp; 0 for the first tick.
    pub delta_secs:        i64,
    pub full:              u32,
    pub dim:               u32,
    pub off:               u32,
    pub messages_sent:     u64,
    pub messages_received: u64,
}

impl LevelRow {
    /// One row per lamp, in ascending `LampId` order.
    pub fn from_output(output: &TickOutput) -> Vec<LevelRow> {
        output
            .changes
            .iter()
            .map(|(id, level)| LevelRow {
                tick:      output.tick.0,
                timestamp: output.timestamp,
                lamp_id:   id.0,
                level:     level.value(),
            })
            .collect()
    }
}

impl CostRow {
    pub fn from_output(output: &TickOutput, previous: Option<i64>, counters: &SimCounters) -> CostRow {
        let mut row = CostRow {
            tick:              output.tick.0,
            timestamp:         output.timestamp,
            delta_secs:        previous.map_or(0, |p| output.timestamp - p),
            full:              0,
            dim:               0,
            off:               0,
            messages_sent:     counters.messages_sent,
            messages_received: counters.messages_received,
        };
        for &level in output.changes.values() {
            if level >= LightLevel::FULL {
                row.full += 1;
            } else if level > LightLevel::OFF {
                row.dim += 1;
            } else {
                row.off += 1;
            }
        }
        row
    }

    /// Lamps below full brightness.
    pub fn reduced(&self) -> u32 {
        self.dim + self.off
    }
}
