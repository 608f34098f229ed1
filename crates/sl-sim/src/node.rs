//! A single lamp.

use sl_control::{LampState, LightPolicy, RawObservation};
use sl_core::{FanOutPolicy, GeoPoint, LampId, LampIdx, LightLevel};

/// One lamp: identity, position, and its mutable [`LampState`].
///
/// Neighbors are not stored on the node; they are the node's row in the
/// engine's `NeighborGraph`, looked up by [`idx`](Self::idx).
#[derive(Clone, Debug)]
pub struct LampNode {
    pub id:            LampId,
    pub idx:           LampIdx,
    pub position:      GeoPoint,
    /// Fan-out freshness threshold.
    pub recheck_ticks: u32,
    pub fan_out:       FanOutPolicy,
    state:             LampState,
}

impl LampNode {
    pub fn new(
        id:            LampId,
        idx:           LampIdx,
        position:      GeoPoint,
        recheck_ticks: u32,
        fan_out:       FanOutPolicy,
    ) -> Self {
        Self {
            id,
            idx,
            position,
            recheck_ticks,
            fan_out,
            state: LampState::DARK,
        }
    }

    pub fn with_state(mut self, state: LampState) -> Self {
        self.state = state;
        self
    }

    #[inline]
    pub fn state(&self) -> LampState {
        self.state
    }

    #[inline]
    pub fn level(&self) -> LightLevel {
        self.state.level
    }

    #[inline]
    pub fn cooldown_ticks(&self) -> u32 {
        self.state.cooldown_ticks
    }

    /// Evaluate the lamp's own observation.
    ///
    /// Returns `true` if the trigger should be announced to the neighbors.
    /// Under [`FanOutPolicy::Gated`] that requires the cooldown held *before*
    /// this evaluation to be below `recheck_ticks`, so a lamp that was just
    /// refreshed does not re-announce on every tick.
    pub fn observe<P: LightPolicy>(&mut self, policy: &P, obs: &RawObservation) -> bool {
        let before = self.state.cooldown_ticks;
        self.state = policy.decide(obs, self.state);

        let triggered = obs.sensor_triggered == Some(true);
        match self.fan_out {
            FanOutPolicy::Always => triggered,
            FanOutPolicy::Gated  => triggered && before < self.recheck_ticks,
        }
    }

    /// Evaluate an observation relayed by a neighbor.  Never fans out.
    pub fn receive_from_neighbor<P: LightPolicy>(&mut self, policy: &P, obs: &RawObservation) {
        self.state = policy.decide(obs, self.state);
    }
}
