//! Observation schema and its single validation step.

use chrono::NaiveTime;

use sl_core::time_of_day;

use crate::{ControlError, ControlResult};

/// An observation as assembled by the caller, before validation.
///
/// Every primary field is optional here so that an incomplete observation is
/// representable; [`validate`](Self::validate) turns it into an
/// [`Observation`] or a [`ControlError::MalformedObservation`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawObservation {
    /// Seconds since the Unix epoch.
    pub timestamp:        Option<i64>,
    pub sunset_time:      Option<NaiveTime>,
    pub sunrise_time:     Option<NaiveTime>,
    pub ambient_lux:      Option<f64>,
    pub sensor_triggered: Option<bool>,
}

/// A validated observation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Observation {
    pub timestamp:        i64,
    /// Clock-of-day of `timestamp` at the configured UTC offset.
    pub local_time:       NaiveTime,
    pub sunset_time:      NaiveTime,
    pub sunrise_time:     NaiveTime,
    pub ambient_lux:      f64,
    pub sensor_triggered: bool,
}

impl RawObservation {
    /// Check presence and meaning of every primary field.
    pub fn validate(&self, utc_offset_minutes: i32) -> ControlResult<Observation> {
        let timestamp = self.timestamp.ok_or(ControlError::missing("timestamp"))?;
        let sunset_time = self.sunset_time.ok_or(ControlError::missing("sunset_time"))?;
        let sunrise_time = self.sunrise_time.ok_or(ControlError::missing("sunrise_time"))?;
        let ambient_lux = self.ambient_lux.ok_or(ControlError::missing("ambient_lux"))?;
        let sensor_triggered = self
            .sensor_triggered
            .ok_or(ControlError::missing("sensor_triggered"))?;

        if !ambient_lux.is_finite() || ambient_lux < 0.0 {
            return Err(ControlError::MalformedObservation {
                field:   "ambient_lux",
                problem: "is not a finite non-negative number",
            });
        }

        let local_time = time_of_day(timestamp, utc_offset_minutes).ok_or(
            ControlError::MalformedObservation {
                field:   "timestamp",
                problem: "is out of range",
            },
        )?;

        Ok(Observation {
            timestamp,
            local_time,
            sunset_time,
            sunrise_time,
            ambient_lux,
            sensor_triggered,
        })
    }
}
