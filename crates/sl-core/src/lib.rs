//! `sl-core`: foundational types for the street-lamp fleet simulator.
//!
//! This crate is a dependency of every other `sl-*` crate.  It has no `sl-*`
//! dependencies of its own.
//!
//! # What lives here
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`ids`]    | `LampId` (external), `LampIdx` (arena index)              |
//! | [`geo`]    | `GeoPoint`, haversine distance in km                      |
//! | [`level`]  | `LightLevel` and its three canonical values               |
//! | [`clock`]  | `Tick`, time-of-day extraction, wrap-aware window checks  |
//! | [`config`] | `SimConfig` and its TOML sections                         |
//! | [`error`]  | `SlError`, `SlResult`                                     |

pub mod clock;
pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod level;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use clock::{Tick, is_time_between, time_of_day};
pub use config::{ClockConfig, FanOutPolicy, LampConfig, NetworkConfig, SimConfig};
pub use error::{SlError, SlResult};
pub use geo::GeoPoint;
pub use ids::{LampId, LampIdx};
pub use level::LightLevel;
