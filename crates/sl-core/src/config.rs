//! Simulation configuration.
//!
//! Loaded from TOML by the application and handed to the engine builder.
//! Every field has a default so an empty file is a valid configuration:
//!
//! ```toml
//! [network]
//! range_km = 0.05
//!
//! [lamp]
//! timeout_ticks = 10
//! recheck_ticks = 10
//! fan_out = "gated"
//!
//! [clock]
//! sunset = "19:30"
//! sunrise = "06:30"
//! early_evening_cutoff = "22:00"
//! utc_offset_minutes = 0
//! ambient_lux = 245.5
//! ```

use std::path::Path;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::clock::hhmm;
use crate::{SlError, SlResult};

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub lamp: LampConfig,
    #[serde(default)]
    pub clock: ClockConfig,
}

/// Radio reach between lamps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Communication range in kilometres.  Two lamps at exactly this distance
    /// are neighbors.
    #[serde(default = "default_range_km")]
    pub range_km: f64,
}

fn default_range_km() -> f64 {
    0.05
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self { range_km: default_range_km() }
    }
}

/// When a lamp's own sensor trigger is announced to its neighbors.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FanOutPolicy {
    /// Announce only if the lamp's cooldown before the trigger was below
    /// `recheck_ticks`.
    #[default]
    Gated,
    /// Announce on every trigger.
    Always,
}

/// Per-lamp timing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LampConfig {
    /// Ticks a triggered lamp holds full brightness.
    #[serde(default = "default_timeout_ticks")]
    pub timeout_ticks: u32,
    /// Fan-out freshness threshold, see [`FanOutPolicy::Gated`].
    #[serde(default = "default_recheck_ticks")]
    pub recheck_ticks: u32,
    #[serde(default)]
    pub fan_out: FanOutPolicy,
}

fn default_timeout_ticks() -> u32 {
    10
}

fn default_recheck_ticks() -> u32 {
    10
}

impl Default for LampConfig {
    fn default() -> Self {
        Self {
            timeout_ticks: default_timeout_ticks(),
            recheck_ticks: default_recheck_ticks(),
            fan_out:       FanOutPolicy::default(),
        }
    }
}

/// Fixed clock-of-day inputs shared by every observation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClockConfig {
    #[serde(default = "default_sunset", with = "hhmm")]
    pub sunset: NaiveTime,
    #[serde(default = "default_sunrise", with = "hhmm")]
    pub sunrise: NaiveTime,
    /// End of the dimmed early-evening window.
    #[serde(default = "default_cutoff", with = "hhmm")]
    pub early_evening_cutoff: NaiveTime,
    /// Offset applied to tick timestamps before taking the time of day.
    #[serde(default)]
    pub utc_offset_minutes: i32,
    /// Reported illuminance.  Validated but not used by the decision.
    #[serde(default = "default_ambient_lux")]
    pub ambient_lux: f64,
}

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN)
}

fn default_sunset() -> NaiveTime {
    hm(19, 30)
}

fn default_sunrise() -> NaiveTime {
    hm(6, 30)
}

fn default_cutoff() -> NaiveTime {
    hm(22, 0)
}

fn default_ambient_lux() -> f64 {
    245.5
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            sunset:               default_sunset(),
            sunrise:              default_sunrise(),
            early_evening_cutoff: default_cutoff(),
            utc_offset_minutes:   0,
            ambient_lux:          default_ambient_lux(),
        }
    }
}

/// Largest accepted `clock.utc_offset_minutes` magnitude (just under 24 h).
const MAX_OFFSET_MINUTES: i32 = 24 * 60 - 1;

impl SimConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> SlResult<Self> {
        let cfg: SimConfig = toml::from_str(s).map_err(|e| SlError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> SlResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> SlResult<()> {
        let range = self.network.range_km;
        if !range.is_finite() || range < 0.0 {
            return Err(SlError::Config(format!(
                "network.range_km must be a finite non-negative number, got {range}"
            )));
        }
        let lux = self.clock.ambient_lux;
        if !lux.is_finite() || lux < 0.0 {
            return Err(SlError::Config(format!(
                "clock.ambient_lux must be a finite non-negative number, got {lux}"
            )));
        }
        if !(-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&self.clock.utc_offset_minutes) {
            return Err(SlError::Config(format!(
                "clock.utc_offset_minutes must be within ±24 h, got {}",
                self.clock.utc_offset_minutes
            )));
        }
        Ok(())
    }
}
