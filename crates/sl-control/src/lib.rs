//! `sl-control`: the per-lamp decision engine.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`observation`] | `RawObservation` (all fields optional) → `Observation`    |
//! | [`controller`]  | `LampState`, `ControllerConfig`, `LightController`        |
//! | [`policy`]      | `LightPolicy` trait                                       |
//! | [`error`]       | `ControlError`, `ControlResult<T>`                        |
//!
//! # Decision order
//!
//! [`LightController::evaluate`] applies, in order: cooldown continuation,
//! the night-window check, the early-evening sub-window, the sensor override,
//! and the default level.  Cooldown comes first so a lamp in a bright hold is
//! not cut off by the day/night test; once the hold has expired, daytime
//! overrides everything.

pub mod controller;
pub mod error;
pub mod observation;
pub mod policy;


pub use controller::{ControllerConfig, LampState, LightController};
pub use error::{ControlError, ControlResult};
pub use observation::{Observation, RawObservation};
pub use policy::LightPolicy;
