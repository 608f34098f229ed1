//! `sl-topology`: who can hear whom.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`graph`]  | `NeighborGraph` (lamp arena + CSR adjacency), builder        |
//! | [`loader`] | `LampRecord`, CSV lamp-position loading, `centroid`          |
//! | [`error`]  | `TopologyError`, `TopologyResult<T>`                         |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `fx-hash` | FxHash for the `LampId` → `LampIdx` index.                 |

pub mod error;
pub mod graph;
pub mod loader;


pub use error::{TopologyError, TopologyResult};
pub use graph::{NeighborGraph, NeighborGraphBuilder};
pub use loader::{LampRecord, centroid, load_lamps_csv, load_lamps_reader};
