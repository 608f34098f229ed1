use thiserror::Error;

use sl_core::SlError;
use sl_topology::TopologyError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] SlError),

    #[error("topology error: {0}")]
    Topology(#[from] TopologyError),

    #[error("{what} length {got} does not match lamp count {expected}")]
    LampCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("tick source I/O error: {0}")]
    Source(#[from] std::io::Error),
}

pub type SimResult<T> = Result<T, SimError>;
