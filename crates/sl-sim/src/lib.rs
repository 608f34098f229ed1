//! `sl-sim`: lamp nodes and the propagation tick loop.
//!
//! # Tick loop
//!
//! ```text
//! for each TickInput { timestamp, active } from the source:
//!   for lamp in registration order:
//!     ① build the lamp's observation (sensor = lamp ∈ active)
//!     ② lamp.observe(obs)                → new level / cooldown
//!     ③ if the lamp reports a fan-out:
//!          for each direct neighbor (ascending index):
//!            messages_sent += 1
//!            neighbor.receive_from_neighbor(obs)   // never re-fans out
//!            messages_received += 1
//!   emit TickOutput { timestamp, changes: LampId → level }
//! ```
//!
//! Evaluation is strictly sequential.  A lamp later in the order sees the
//! post-update state of earlier lamps within the same tick; there is no
//! parallel feature because it would change which lamp wins a gated fan-out.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use std::sync::atomic::AtomicBool;
//! use sl_sim::{NoopObserver, Sim, VecTickSource};
//!
//! let graph = NeighborGraph::from_records(&records, config.network.range_km)?;
//! let mut sim = Sim::with_controller(config, graph)?;
//! sim.run(&mut VecTickSource::new(ticks), &mut NoopObserver, &AtomicBool::new(false))?;
//! ```

pub mod builder;
pub mod counters;
pub mod error;
pub mod node;
pub mod observer;
pub mod sim;
pub mod source;
pub mod tick;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use counters::SimCounters;
pub use error::{SimError, SimResult};
pub use node::LampNode;
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
pub use source::{RandomMotionSource, TickSource, VecTickSource};
pub use tick::{LEVEL_TOPIC, MOTION_TOPIC, TickInput, TickOutput};
