//! The standard lighting controller.

use chrono::NaiveTime;
use tracing::warn;

use sl_core::{LightLevel, SimConfig, is_time_between};

use crate::{ControlResult, LightPolicy, Observation, RawObservation};

// ── LampState ─────────────────────────────────────────────────────────────────

/// The mutable part of a lamp: its level and remaining bright-hold ticks.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LampState {
    pub level:          LightLevel,
    pub cooldown_ticks: u32,
}

impl LampState {
    /// Fail-safe result: off, no hold.
    pub const DARK: LampState = LampState { level: LightLevel::OFF, cooldown_ticks: 0 };

    pub fn new(level: LightLevel, cooldown_ticks: u32) -> Self {
        Self { level, cooldown_ticks }
    }
}

// ── ControllerConfig ──────────────────────────────────────────────────────────

/// Values the controller needs besides the observation itself.
#[derive(Clone, Debug, PartialEq)]
pub struct ControllerConfig {
    /// Cooldown a fresh trigger starts.
    pub timeout_ticks:        u32,
    /// End (exclusive) of the dimmed early-evening window.
    pub early_evening_cutoff: NaiveTime,
    /// Applied to the observation timestamp before taking its time of day.
    pub utc_offset_minutes:   i32,
}

impl ControllerConfig {
    pub fn from_config(cfg: &SimConfig) -> Self {
        Self {
            timeout_ticks:        cfg.lamp.timeout_ticks,
            early_evening_cutoff: cfg.clock.early_evening_cutoff,
            utc_offset_minutes:   cfg.clock.utc_offset_minutes,
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::from_config(&SimConfig::default())
    }
}

// ── LightController ───────────────────────────────────────────────────────────

/// Night-window / early-evening / motion controller.
#[derive(Clone, Debug, Default)]
pub struct LightController {
    pub config: ControllerConfig,
}

impl LightController {
    pub fn new(config: ControllerConfig) -> Self {
        Self { config }
    }

    /// Validate `raw` and evaluate it.  Returns the validation error instead
    /// of falling back to dark.
    pub fn try_decide(&self, raw: &RawObservation, current: LampState) -> ControlResult<LampState> {
        let obs = raw.validate(self.config.utc_offset_minutes)?;
        Ok(self.evaluate(&obs, current))
    }

    /// The decision proper.  See the crate docs for the rule order.
    pub fn evaluate(&self, obs: &Observation, current: LampState) -> LampState {
        let timeout = self.config.timeout_ticks;

        // Bright hold after a trigger: refresh or count down at a constant level.
        if current.cooldown_ticks > 0 && current.level.is_bright() {
            return if obs.sensor_triggered {
                LampState::new(LightLevel::FULL, timeout)
            } else {
                LampState::new(current.level, current.cooldown_ticks - 1)
            };
        }

        if !is_time_between(obs.local_time, obs.sunset_time, obs.sunrise_time) {
            return LampState::DARK;
        }

        if obs.sensor_triggered {
            return LampState::new(LightLevel::FULL, timeout);
        }

        if self.is_early_evening(obs) {
            LampState::new(LightLevel::DIM, 0)
        } else {
            LampState::DARK
        }
    }

    /// Is the observation inside `[sunset, cutoff)`?
    ///
    /// Always `false` when the cutoff itself lies outside the night window.
    pub fn is_early_evening(&self, obs: &Observation) -> bool {
        let cutoff = self.config.early_evening_cutoff;
        if !is_time_between(cutoff, obs.sunset_time, obs.sunrise_time) {
            return false;
        }
        obs.local_time != cutoff && is_time_between(obs.local_time, obs.sunset_time, cutoff)
    }
}

impl LightPolicy for LightController {
    fn decide(&self, raw: &RawObservation, current: LampState) -> LampState {
        match self.try_decide(raw, current) {
            Ok(next) => next,
            Err(e) => {
                warn!(error = %e, "falling back to dark");
                LampState::DARK
            }
        }
    }
}
