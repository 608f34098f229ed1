//! Tick counter and clock-of-day helpers.
//!
//! # Design
//!
//! The engine never looks at a wall clock.  Each external tick carries a Unix
//! timestamp; the decision engine only needs the *time of day* of that
//! timestamp, shifted by a fixed UTC offset:
//!
//!   time_of_day = (unix_secs + utc_offset) mod 86_400
//!
//! Night and early-evening windows are pairs of `NaiveTime`s that may wrap
//! past midnight, checked with [`is_time_between`].

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveTime, Utc};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// Sequence number of a processed external tick, starting at zero.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The tick after `self`.
    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── Time of day ───────────────────────────────────────────────────────────────

/// Local clock-of-day for a Unix timestamp at a fixed UTC offset.
///
/// Returns `None` if the timestamp is outside chrono's representable range or
/// the offset is not within ±24 h.
pub fn time_of_day(unix_secs: i64, utc_offset_minutes: i32) -> Option<NaiveTime> {
    let offset = FixedOffset::east_opt(utc_offset_minutes.checked_mul(60)?)?;
    let utc = DateTime::<Utc>::from_timestamp(unix_secs, 0)?;
    Some(utc.with_timezone(&offset).time())
}

/// Is `target` inside the window `[start, end]`?
///
/// When `end < start` the window wraps past midnight and `target` is inside
/// if it is at or after `start` **or** at or before `end`.  Both bounds are
/// inclusive in either case.
pub fn is_time_between(target: NaiveTime, start: NaiveTime, end: NaiveTime) -> bool {
    if end < start {
        target >= start || target <= end
    } else {
        start <= target && target <= end
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────────

/// (De)serialize a `NaiveTime` as `"HH:MM"` (seconds optional on input).
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn parse(s: &str) -> Option<NaiveTime> {
        let s = s.trim();
        NaiveTime::parse_from_str(s, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
            .ok()
    }

    pub fn serialize<S: Serializer>(t: &NaiveTime, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&t.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(de)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid clock time {raw:?}: expected HH:MM")))
    }
}
