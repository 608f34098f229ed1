//! Fluent builder for constructing a [`Sim`].

use sl_control::{LampState, LightPolicy};
use sl_core::SimConfig;
use sl_topology::NeighborGraph;

use crate::{LampNode, Sim, SimCounters, SimError, SimResult};

/// Fluent builder for [`Sim<P>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: lamp timing, clock windows, range
/// - [`NeighborGraph`]: the lamps and who hears whom
/// - `P: LightPolicy`: the decision engine (usually
///   [`sl_control::LightController`])
///
/// # Optional inputs (have defaults)
///
/// | Method                | Default                        |
/// |-----------------------|--------------------------------|
/// | `.initial_states(v)`  | Every lamp `LampState::DARK`   |
///
/// # Example
///
/// ```rust,ignore
/// let controller = LightController::new(ControllerConfig::from_config(&config));
/// let mut sim = SimBuilder::new(config, graph, controller).build()?;
/// ```
pub struct SimBuilder<P: LightPolicy> {
    config: SimConfig,
    graph:  NeighborGraph,
    policy: P,
    states: Option<Vec<LampState>>,
}

impl<P: LightPolicy> SimBuilder<P> {
    pub fn new(config: SimConfig, graph: NeighborGraph, policy: P) -> Self {
        Self { config, graph, policy, states: None }
    }

    /// Start lamps in the given states (must be length `lamp_count`, in
    /// registration order).
    pub fn initial_states(mut self, states: Vec<LampState>) -> Self {
        self.states = Some(states);
        self
    }

    /// Validate inputs, create one [`LampNode`] per graph lamp, and return a
    /// ready-to-run [`Sim`] with zeroed counters.
    pub fn build(self) -> SimResult<Sim<P>> {
        self.config.validate()?;

        let lamp_count = self.graph.lamp_count();
        let states = match self.states {
            Some(s) => {
                if s.len() != lamp_count {
                    return Err(SimError::LampCountMismatch {
                        expected: lamp_count,
                        got:      s.len(),
                        what:     "initial states",
                    });
                }
                s
            }
            None => vec![LampState::DARK; lamp_count],
        };

        let lamp_cfg = &self.config.lamp;
        let nodes: Vec<LampNode> = self
            .graph
            .indices()
            .zip(states)
            .map(|(idx, state)| {
                LampNode::new(
                    self.graph.lamp_id(idx),
                    idx,
                    self.graph.position(idx),
                    lamp_cfg.recheck_ticks,
                    lamp_cfg.fan_out,
                )
                .with_state(state)
            })
            .collect();

        Ok(Sim::from_parts(
            self.config,
            self.graph,
            nodes,
            self.policy,
            SimCounters::default(),
        ))
    }
}
