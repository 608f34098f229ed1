//! Strongly typed identifier wrappers.
//!
//! Two kinds of id exist and must not be mixed up:
//!
//! - [`LampId`] is the opaque identity handed out by the map source (a 64-bit
//!   node id).  It appears in tick input and output.
//! - [`LampIdx`] is the dense position of a lamp in the engine's arena, in
//!   registration order.  It is what adjacency lists store.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Generate a typed id wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[derive(Serialize, Deserialize)]
        #[serde(transparent)]
        $vis struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(raw: $inner) -> Self {
                $name(raw)
            }
        }
    };
}

typed_id! {
    /// Identity of a lamp as assigned by the topology source.  Immutable.
    pub struct LampId(u64);
}

typed_id! {
    /// Position of a lamp in the engine arena.  Max ~4.3 billion lamps.
    pub struct LampIdx(u32);
}

impl LampIdx {
    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<usize> for LampIdx {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<LampIdx, Self::Error> {
        u32::try_from(n).map(LampIdx)
    }
}
