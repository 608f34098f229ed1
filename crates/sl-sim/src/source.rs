//! Where ticks come from.
//!
//! The engine pulls decoded [`TickInput`]s through [`TickSource`].  A real
//! deployment wraps its subscriber socket in one; tests and demos use the
//! in-memory and random sources below.

use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use sl_core::LampId;

use crate::{SimResult, TickInput};

/// A blocking supplier of ticks.
pub trait TickSource {
    /// Wait for the next tick.  `Ok(None)` means the stream has ended.
    fn next_tick(&mut self) -> SimResult<Option<TickInput>>;
}

// ── VecTickSource ─────────────────────────────────────────────────────────────

/// Replays a fixed list of ticks.
#[derive(Debug, Default)]
pub struct VecTickSource {
    ticks: VecDeque<TickInput>,
}

impl VecTickSource {
    pub fn new(ticks: impl IntoIterator<Item = TickInput>) -> Self {
        Self { ticks: ticks.into_iter().collect() }
    }

    pub fn remaining(&self) -> usize {
        self.ticks.len()
    }
}

impl TickSource for VecTickSource {
    fn next_tick(&mut self) -> SimResult<Option<TickInput>> {
        Ok(self.ticks.pop_front())
    }
}

// ── RandomMotionSource ────────────────────────────────────────────────────────

/// Synthetic motion: each lamp independently reports motion with a fixed
/// probability per tick.
///
/// Seeded, so the same seed and lamp list always produce the same ticks.
pub struct RandomMotionSource {
    rng:         SmallRng,
    lamps:       Vec<LampId>,
    probability: f64,
    timestamp:   i64,
    step_secs:   i64,
    remaining:   u64,
}

impl RandomMotionSource {
    /// `total_ticks` ticks starting at `start_unix_secs`, `step_secs` apart.
    ///
    /// `probability` is clamped to `[0, 1]`.
    pub fn new(
        seed:            u64,
        lamps:           Vec<LampId>,
        probability:     f64,
        start_unix_secs: i64,
        step_secs:       i64,
        total_ticks:     u64,
    ) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            lamps,
            probability: if probability.is_nan() { 0.0 } else { probability.clamp(0.0, 1.0) },
            timestamp: start_unix_secs,
            step_secs,
            remaining: total_ticks,
        }
    }
}

impl TickSource for RandomMotionSource {
    fn next_tick(&mut self) -> SimResult<Option<TickInput>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;

        let p = self.probability;
        let rng = &mut self.rng;
        let active = self.lamps.iter().copied().filter(|_| rng.gen_bool(p));
        let tick = TickInput::new(self.timestamp, active);

        self.timestamp += self.step_secs;
        Ok(Some(tick))
    }
}
