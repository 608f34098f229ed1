//! Simulation observer trait for snapshot publication and progress reporting.

use sl_core::Tick;

use crate::{SimCounters, TickOutput};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] around each tick.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  Publishing `TickOutput` to the transport is
/// the job of an observer.
pub trait SimObserver {
    /// Called before a tick is evaluated.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after a tick with its level snapshot and the running counters.
    fn on_tick_end(&mut self, _output: &TickOutput, _counters: &SimCounters) {}

    /// Called once when the source is exhausted or the run is stopped.
    fn on_sim_end(&mut self, _ticks: Tick, _counters: &SimCounters) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
