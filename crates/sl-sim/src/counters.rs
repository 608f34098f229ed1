//! Per-run diagnostics.

/// Message and tick counters for one simulation run.
///
/// Owned by [`Sim`](crate::Sim) and reset whenever a `Sim` is built.  Exposed
/// read-only through [`Sim::counters`](crate::Sim::counters); nothing in the
/// decision path reads them.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SimCounters {
    /// Fan-out messages sent, one per (triggering lamp, neighbor) pair.
    pub messages_sent:     u64,
    /// Fan-out messages delivered to a neighbor.
    pub messages_received: u64,
    pub ticks_processed:   u64,
    /// Active ids in tick input that matched no lamp.
    pub unknown_ids:       u64,
}
