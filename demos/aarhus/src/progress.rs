//! Observer wrapper: periodic progress logs and a tick budget.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;

use sl_core::Tick;
use sl_sim::{SimCounters, SimObserver, TickOutput};

pub struct ProgressObserver<O: SimObserver> {
    pub inner: O,
    /// Snapshot of the most recent tick.
    pub last:  Option<TickOutput>,
    log_every: u64,
    max_ticks: Option<u64>,
    stop:      Arc<AtomicBool>,
}

impl<O: SimObserver> ProgressObserver<O> {
    pub fn new(inner: O, log_every: u64, max_ticks: Option<u64>, stop: Arc<AtomicBool>) -> Self {
        Self { inner, log_every: log_every.max(1), max_ticks, stop, last: None }
    }
}

impl<O: SimObserver> SimObserver for ProgressObserver<O> {
    fn on_tick_start(&mut self, tick: Tick) {
        self.inner.on_tick_start(tick);
    }

    fn on_tick_end(&mut self, output: &TickOutput, counters: &SimCounters) {
        self.inner.on_tick_end(output, counters);

        let done = output.tick.0 + 1;
        if done.is_multiple_of(self.log_every) {
            let lit = output.changes.values().filter(|l| l.is_bright()).count();
            info!(
                tick = %output.tick,
                timestamp = output.timestamp,
                lit,
                sent = counters.messages_sent,
                "progress"
            );
        }
        if self.max_ticks.is_some_and(|max| done >= max) {
            self.stop.store(true, Ordering::Relaxed);
        }
        self.last = Some(output.clone());
    }

    fn on_sim_end(&mut self, ticks: Tick, counters: &SimCounters) {
        self.inner.on_sim_end(ticks, counters);
    }
}
