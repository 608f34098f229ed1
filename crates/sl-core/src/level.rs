//! Lamp light level.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Output level of a lamp in `[0, 1]`.
///
/// The decision engine only ever produces [`OFF`](Self::OFF),
/// [`DIM`](Self::DIM) and [`FULL`](Self::FULL).
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LightLevel(pub f32);

impl LightLevel {
    pub const OFF:  LightLevel = LightLevel(0.0);
    pub const DIM:  LightLevel = LightLevel(0.5);
    pub const FULL: LightLevel = LightLevel(1.0);

    #[inline]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Above the dim level, i.e. in a post-trigger bright hold.
    #[inline]
    pub fn is_bright(self) -> bool {
        self.0 > Self::DIM.0
    }
}

impl fmt::Display for LightLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}
