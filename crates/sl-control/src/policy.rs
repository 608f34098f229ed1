//! The `LightPolicy` trait: the seam between lamp nodes and the decision
//! engine.

use crate::{LampState, RawObservation};

/// Pluggable lighting decision.
///
/// A policy maps an observation and the lamp's state before evaluation to the
/// state after it.  It must be total: an observation it cannot use yields a
/// safe state rather than an error, because one bad reading must never stop
/// a tick.
///
/// [`LightController`](crate::LightController) is the standard
/// implementation.
pub trait LightPolicy {
    fn decide(&self, obs: &RawObservation, current: LampState) -> LampState;
}
