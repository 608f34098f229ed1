//! The `Sim` struct and its tick loop.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, trace, warn};

use sl_control::{ControllerConfig, LampState, LightController, LightPolicy, RawObservation};
use sl_core::{LampId, LightLevel, SimConfig, Tick};
use sl_topology::NeighborGraph;

use crate::{
    LampNode, SimBuilder, SimCounters, SimObserver, SimResult, TickInput, TickOutput, TickSource,
};

/// The propagation engine.
///
/// Owns every [`LampNode`], the static [`NeighborGraph`], one decision
/// policy shared by all lamps, and the run's [`SimCounters`].  Lamps are
/// evaluated in graph registration order; neighbors are notified in ascending
/// index order.
///
/// Create via [`SimBuilder`] or [`Sim::with_controller`].
pub struct Sim<P: LightPolicy> {
    config:   SimConfig,
    graph:    NeighborGraph,
    nodes:    Vec<LampNode>,
    policy:   P,
    counters: SimCounters,
    tick:     Tick,
}

impl Sim<LightController> {
    /// Build a sim driven by the standard [`LightController`].
    pub fn with_controller(config: SimConfig, graph: NeighborGraph) -> SimResult<Self> {
        let controller = LightController::new(ControllerConfig::from_config(&config));
        SimBuilder::new(config, graph, controller).build()
    }
}

impl<P: LightPolicy> Sim<P> {
    pub(crate) fn from_parts(
        config:   SimConfig,
        graph:    NeighborGraph,
        nodes:    Vec<LampNode>,
        policy:   P,
        counters: SimCounters,
    ) -> Self {
        Self { config, graph, nodes, policy, counters, tick: Tick::ZERO }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn graph(&self) -> &NeighborGraph {
        &self.graph
    }

    /// Lamps in evaluation order.
    pub fn nodes(&self) -> &[LampNode] {
        &self.nodes
    }

    pub fn counters(&self) -> SimCounters {
        self.counters
    }

    /// Number of ticks processed so far (also the sequence number of the next).
    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn node(&self, id: LampId) -> Option<&LampNode> {
        self.graph.index_of(id).map(|idx| &self.nodes[idx.index()])
    }

    pub fn level(&self, id: LampId) -> Option<LightLevel> {
        self.node(id).map(LampNode::level)
    }

    pub fn state(&self, id: LampId) -> Option<LampState> {
        self.node(id).map(LampNode::state)
    }

    // ── Run loop ──────────────────────────────────────────────────────────

    /// Pull ticks from `source` until it ends or `stop` is set.
    ///
    /// `stop` is checked between ticks only; a tick that has started always
    /// completes.
    pub fn run<S: TickSource, O: SimObserver>(
        &mut self,
        source:   &mut S,
        observer: &mut O,
        stop:     &AtomicBool,
    ) -> SimResult<()> {
        while !stop.load(Ordering::Relaxed) {
            let Some(input) = source.next_tick()? else {
                break;
            };
            observer.on_tick_start(self.tick);
            let output = self.step(&input);
            observer.on_tick_end(&output, &self.counters);
        }
        observer.on_sim_end(self.tick, &self.counters);
        Ok(())
    }

    /// Process one tick and return its level snapshot.
    pub fn step(&mut self, input: &TickInput) -> TickOutput {
        let n = self.nodes.len();

        // Resolve active ids to arena flags; unknown ids are reported and dropped.
        let mut active = vec![false; n];
        for &id in &input.active {
            match self.graph.index_of(id) {
                Some(idx) => active[idx.index()] = true,
                None => {
                    self.counters.unknown_ids += 1;
                    warn!(lamp = %id, tick = %self.tick, "motion reported for unknown lamp");
                }
            }
        }

        // Explicit field borrows so nodes can be mutated while graph and
        // policy are read.
        let graph    = &self.graph;
        let policy   = &self.policy;
        let nodes    = &mut self.nodes;
        let counters = &mut self.counters;
        let clock    = &self.config.clock;

        let mut fan_outs = 0usize;
        for i in 0..n {
            let obs = RawObservation {
                timestamp:        Some(input.timestamp),
                sunset_time:      Some(clock.sunset),
                sunrise_time:     Some(clock.sunrise),
                ambient_lux:      Some(clock.ambient_lux),
                sensor_triggered: Some(active[i]),
            };

            if !nodes[i].observe(policy, &obs) {
                continue;
            }
            fan_outs += 1;

            let from = nodes[i].idx;
            for &nb in graph.neighbors(from) {
                counters.messages_sent += 1;
                nodes[nb.index()].receive_from_neighbor(policy, &obs);
                counters.messages_received += 1;
                trace!(from = %nodes[i].id, to = %nodes[nb.index()].id, "fan-out");
            }
        }

        let output = TickOutput {
            tick:      self.tick,
            timestamp: input.timestamp,
            changes:   self.nodes.iter().map(|node| (node.id, node.level())).collect(),
        };

        debug!(
            tick = %self.tick,
            timestamp = input.timestamp,
            active = input.active.len(),
            fan_outs,
            sent = self.counters.messages_sent,
            "tick processed"
        );

        self.counters.ticks_processed += 1;
        self.tick = self.tick.next();
        output
    }
}
