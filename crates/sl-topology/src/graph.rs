//! Lamp arena and neighbor adjacency.
//!
//! # Data layout
//!
//! Lamps live in an arena indexed by [`LampIdx`], in the order they were
//! registered with the builder.  Adjacency uses **Compressed Sparse Row**
//! format; the neighbors of lamp `i` occupy
//!
//! ```text
//! adj[ adj_start[i] .. adj_start[i+1] ]
//! ```
//!
//! sorted by ascending `LampIdx`, so fan-out order is registration order.
//!
//! # Symmetry
//!
//! The builder computes one *undirected* edge per in-range pair `i < j` and
//! writes it into both rows.  A one-sided link cannot be expressed, and a lamp
//! is never compared with itself.

#[cfg(not(feature = "fx-hash"))]
use std::collections::HashMap;

#[cfg(feature = "fx-hash")]
use rustc_hash::FxHashMap as HashMap;

use tracing::info;

use sl_core::{GeoPoint, LampId, LampIdx};

use crate::{LampRecord, TopologyError, TopologyResult};

// ── NeighborGraph ─────────────────────────────────────────────────────────────

/// Static, symmetric, irreflexive neighbor graph over a fixed set of lamps.
///
/// Read-only after construction.  Build with [`NeighborGraphBuilder`].
#[derive(Debug, Clone)]
pub struct NeighborGraph {
    /// External identity of each lamp.  Indexed by `LampIdx`.
    pub lamp_ids: Vec<LampId>,

    /// Position of each lamp.  Indexed by `LampIdx`.
    pub positions: Vec<GeoPoint>,

    /// CSR row pointer.  Length = `lamp_count + 1`.
    pub adj_start: Vec<u32>,

    /// Concatenated neighbor rows.
    pub adj: Vec<LampIdx>,

    /// Range the graph was built with, in kilometres.
    pub range_km: f64,

    index: HashMap<LampId, LampIdx>,
}

impl NeighborGraph {
    /// Build directly from loader records.
    pub fn from_records(records: &[LampRecord], range_km: f64) -> TopologyResult<Self> {
        let mut b = NeighborGraphBuilder::with_capacity(records.len());
        for r in records {
            b.add_lamp(LampId(r.id), GeoPoint::new(r.lat, r.lon));
        }
        b.build(range_km)
    }

    pub fn lamp_count(&self) -> usize {
        self.lamp_ids.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adj.len() / 2
    }

    /// All arena indices in registration order.
    pub fn indices(&self) -> impl Iterator<Item = LampIdx> + '_ {
        (0..self.lamp_ids.len()).map(|i| LampIdx(i as u32))
    }

    /// Neighbors of `lamp`, ascending.
    #[inline]
    pub fn neighbors(&self, lamp: LampIdx) -> &[LampIdx] {
        let start = self.adj_start[lamp.index()] as usize;
        let end   = self.adj_start[lamp.index() + 1] as usize;
        &self.adj[start..end]
    }

    #[inline]
    pub fn degree(&self, lamp: LampIdx) -> usize {
        self.neighbors(lamp).len()
    }

    pub fn are_neighbors(&self, a: LampIdx, b: LampIdx) -> bool {
        self.neighbors(a).binary_search(&b).is_ok()
    }

    /// Arena index of an external id, or `None` if the id is unknown.
    pub fn index_of(&self, id: LampId) -> Option<LampIdx> {
        self.index.get(&id).copied()
    }

    #[inline]
    pub fn lamp_id(&self, lamp: LampIdx) -> LampId {
        self.lamp_ids[lamp.index()]
    }

    #[inline]
    pub fn position(&self, lamp: LampIdx) -> GeoPoint {
        self.positions[lamp.index()]
    }
}

// ── NeighborGraphBuilder ──────────────────────────────────────────────────────

/// Register lamps, then call [`build`](Self::build) with a range.
///
/// # Example
///
/// ```
/// use sl_core::{GeoPoint, LampId};
/// use sl_topology::NeighborGraphBuilder;
///
/// let mut b = NeighborGraphBuilder::new();
/// let a = b.add_lamp(LampId(1), GeoPoint::new(56.1700, 10.1900));
/// let c = b.add_lamp(LampId(2), GeoPoint::new(56.1703, 10.1900)); // ~33 m north
/// let graph = b.build(0.05).unwrap();
/// assert!(graph.are_neighbors(a, c));
/// assert!(graph.are_neighbors(c, a));
/// ```
pub struct NeighborGraphBuilder {
    ids:       Vec<LampId>,
    positions: Vec<GeoPoint>,
}

impl NeighborGraphBuilder {
    pub fn new() -> Self {
        Self { ids: Vec::new(), positions: Vec::new() }
    }

    pub fn with_capacity(lamps: usize) -> Self {
        Self {
            ids:       Vec::with_capacity(lamps),
            positions: Vec::with_capacity(lamps),
        }
    }

    /// Register a lamp and return its arena index (sequential from 0).
    ///
    /// Validation of ids and positions is deferred to `build`.
    pub fn add_lamp(&mut self, id: LampId, pos: GeoPoint) -> LampIdx {
        let idx = LampIdx(self.ids.len() as u32);
        self.ids.push(id);
        self.positions.push(pos);
        idx
    }

    pub fn lamp_count(&self) -> usize {
        self.ids.len()
    }

    /// Validate the registered lamps and connect every pair within
    /// `range_km` (inclusive).
    ///
    /// Time complexity: O(N²) distance evaluations.
    pub fn build(self, range_km: f64) -> TopologyResult<NeighborGraph> {
        if !range_km.is_finite() || range_km < 0.0 {
            return Err(TopologyError::InvalidRange(range_km));
        }
        let n = self.ids.len();
        if n == 0 {
            return Err(TopologyError::Empty);
        }
        if u32::try_from(n).is_err() {
            return Err(TopologyError::TooManyLamps(n));
        }

        let mut index: HashMap<LampId, LampIdx> = HashMap::default();
        index.reserve(n);
        for (i, (&id, &pos)) in self.ids.iter().zip(&self.positions).enumerate() {
            if !pos.is_valid() {
                return Err(TopologyError::InvalidPosition { id, pos });
            }
            if index.insert(id, LampIdx(i as u32)).is_some() {
                return Err(TopologyError::DuplicateLamp(id));
            }
        }

        // One undirected edge per in-range unordered pair.
        let mut edges: Vec<(u32, u32)> = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                if self.positions[i].distance_km(self.positions[j]) <= range_km {
                    edges.push((i as u32, j as u32));
                }
            }
        }

        // Write each undirected edge into both rows.
        let mut rows: Vec<Vec<LampIdx>> = vec![Vec::new(); n];
        for &(i, j) in &edges {
            rows[i as usize].push(LampIdx(j));
            rows[j as usize].push(LampIdx(i));
        }

        let mut adj_start = Vec::with_capacity(n + 1);
        let mut adj = Vec::with_capacity(edges.len() * 2);
        adj_start.push(0u32);
        for mut row in rows {
            row.sort_unstable();
            adj.extend(row);
            adj_start.push(adj.len() as u32);
        }
        debug_assert_eq!(adj.len(), edges.len() * 2);

        info!(lamps = n, edges = edges.len(), range_km, "built neighbor graph");

        Ok(NeighborGraph {
            lamp_ids: self.ids,
            positions: self.positions,
            adj_start,
            adj,
            range_km,
            index,
        })
    }
}

impl Default for NeighborGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
