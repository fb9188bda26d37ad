// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Calendar instants.

use core::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A wall-clock point in time.
///
/// Instants carry no timezone: all arithmetic happens on the civil calendar,
/// so a day is always 24 hours long. Values are totally ordered.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Instant(NaiveDateTime);

impl Instant {
    /// Wraps a chrono date-time.
    pub const fn new(datetime: NaiveDateTime) -> Self {
        Self(datetime)
    }

    /// Builds an instant from civil fields, returning `None` for impossible dates.
    pub fn from_ymd_hms(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)?
            .and_hms_opt(hour, min, sec)
            .map(Self)
    }

    /// Midnight at the start of the given date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        Self::from_ymd_hms(year, month, day, 0, 0, 0)
    }

    /// Interprets `millis` as milliseconds since the Unix epoch.
    pub fn from_unix_millis(millis: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(|dt| Self(dt.naive_utc()))
    }

    /// Like [`Instant::from_unix_millis`], for fractional or untrusted numbers.
    pub fn from_unix_millis_f64(millis: f64) -> Option<Self> {
        if !millis.is_finite() {
            return None;
        }
        let millis = millis.round();
        if millis < i64::MIN as f64 || millis > i64::MAX as f64 {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, reason = "rounded and range checked")]
        let millis = millis as i64;
        Self::from_unix_millis(millis)
    }

    /// Milliseconds since the Unix epoch.
    pub fn unix_millis(self) -> i64 {
        self.0.and_utc().timestamp_millis()
    }

    /// The underlying chrono value.
    pub const fn naive(self) -> NaiveDateTime {
        self.0
    }
}

impl From<NaiveDateTime> for Instant {
    fn from(value: NaiveDateTime) -> Self {
        Self(value)
    }
}

impl From<Instant> for NaiveDateTime {
    fn from(value: Instant) -> Self {
        value.0
    }
}

impl fmt::Debug for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Instant({})", self.0.format("%Y-%m-%dT%H:%M:%S%.3f"))
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S%.3f"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix_millis_round_trip() {
        let t = Instant::from_ymd_hms(1981, 11, 20, 9, 8, 7).unwrap();
        let ms = t.unix_millis();
        assert_eq!(ms, 375_095_287_000);
        assert_eq!(Instant::from_unix_millis(ms), Some(t));
        assert_eq!(Instant::from_unix_millis_f64(ms as f64 + 0.4), Some(t));
    }

    #[test]
    fn rejects_impossible_inputs() {
        assert_eq!(Instant::from_ymd(2015, 2, 30), None);
        assert_eq!(Instant::from_unix_millis_f64(f64::NAN), None);
        assert_eq!(Instant::from_unix_millis_f64(1e300), None);
    }

    #[test]
    fn display_is_iso_with_millis() {
        let t = Instant::from_ymd_hms(2015, 1, 1, 20, 0, 0).unwrap();
        assert_eq!(t.to_string(), "2015-01-01T20:00:00.000");
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"2015-01-01T20:00:00\"");
    }
}
