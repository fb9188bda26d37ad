// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The date capability consumed by time scales.

use core::fmt::Debug;

use chrono::{
    Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Weekday,
};

use crate::error::ParseError;
use crate::instant::Instant;
use crate::parse::{parse_iso, parse_with_pattern};
use crate::pattern::Pattern;
use crate::unit::TimeUnit;

/// Unit-aware date arithmetic, parsing and formatting.
///
/// Scales never touch calendar fields directly; every rounding, offset and
/// difference goes through this trait so the arithmetic can be swapped.
/// Implementations must be pure and safe to share between threads.
pub trait Calendar: Debug + Send + Sync {
    /// Rounds `t` down to the start of its `unit` period.
    fn start_of(&self, t: Instant, unit: TimeUnit) -> Instant;

    /// Rounds `t` down to midnight of the most recent `weekday` (possibly today).
    fn start_of_weekday(&self, t: Instant, weekday: Weekday) -> Instant;

    /// Moves `t` by a whole number of units. `None` on calendar overflow.
    fn add(&self, t: Instant, amount: i64, unit: TimeUnit) -> Option<Instant>;

    /// Moves `t` by a real number of units.
    ///
    /// This is the inverse of [`Calendar::diff`]: `diff(add_fractional(t, x), t)`
    /// equals `x` up to millisecond rounding.
    fn add_fractional(&self, t: Instant, amount: f64, unit: TimeUnit) -> Option<Instant>;

    /// Signed distance `a - b` measured in `unit`, with a fractional part.
    fn diff(&self, a: Instant, b: Instant, unit: TimeUnit) -> f64;

    /// Parses `text`, using `pattern` when given and ISO-8601 layouts otherwise.
    fn parse(&self, text: &str, pattern: Option<&str>) -> Result<Instant, ParseError>;

    /// Renders `t` with a moment-style pattern.
    fn format(&self, t: Instant, pattern: &str) -> String;
}

/// Proleptic Gregorian arithmetic on wall-clock time.
///
/// Days are always 24 hours and weeks start on Sunday unless configured
/// otherwise. Month arithmetic clamps to the end of shorter months, so
/// January 31 plus one month is February 28 (or 29).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NaiveCalendar {
    week_start: Weekday,
}

impl NaiveCalendar {
    /// A calendar whose weeks start on Sunday.
    pub const fn new() -> Self {
        Self {
            week_start: Weekday::Sun,
        }
    }

    /// Sets the first day of the week used by [`TimeUnit::Week`].
    #[must_use]
    pub const fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    /// The first day of the week.
    pub const fn week_start(&self) -> Weekday {
        self.week_start
    }

    fn month_diff(a: NaiveDateTime, b: NaiveDateTime) -> f64 {
        let mut whole =
            i64::from(a.year() - b.year()) * 12 + i64::from(a.month()) - i64::from(b.month());
        // Settle on the last month anchor at or before `a`.
        while add_months(b, whole).is_some_and(|anchor| anchor > a) {
            whole -= 1;
        }
        while add_months(b, whole + 1).is_some_and(|next| next <= a) {
            whole += 1;
        }
        let (Some(anchor), Some(next)) = (add_months(b, whole), add_months(b, whole + 1)) else {
            return whole as f64;
        };
        let span = (next - anchor).num_milliseconds() as f64;
        whole as f64 + (a - anchor).num_milliseconds() as f64 / span
    }
}

impl Default for NaiveCalendar {
    fn default() -> Self {
        Self::new()
    }
}

fn midnight(date: NaiveDate) -> Instant {
    Instant::new(date.and_time(NaiveTime::MIN))
}

fn add_months(dt: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        dt.checked_add_months(magnitude)
    } else {
        dt.checked_sub_months(magnitude)
    }
}

fn shift_millis(dt: NaiveDateTime, millis: f64) -> Option<NaiveDateTime> {
    let millis = millis.round();
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, reason = "rounded and range checked")]
    let millis = millis as i64;
    dt.checked_add_signed(TimeDelta::try_milliseconds(millis)?)
}

fn float_to_i64(v: f64) -> Option<i64> {
    if !v.is_finite() || v.abs() >= i64::MAX as f64 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, reason = "finite and range checked")]
    let v = v as i64;
    Some(v)
}

impl Calendar for NaiveCalendar {
    fn start_of(&self, t: Instant, unit: TimeUnit) -> Instant {
        let dt = t.naive();
        let date = dt.date();
        match unit {
            TimeUnit::Millisecond => dt
                .with_nanosecond(dt.nanosecond() / 1_000_000 * 1_000_000)
                .map_or(t, Instant::new),
            TimeUnit::Second => dt.with_nanosecond(0).map_or(t, Instant::new),
            TimeUnit::Minute => date
                .and_hms_opt(dt.hour(), dt.minute(), 0)
                .map_or(t, Instant::new),
            TimeUnit::Hour => date.and_hms_opt(dt.hour(), 0, 0).map_or(t, Instant::new),
            TimeUnit::Day => midnight(date),
            TimeUnit::Week => self.start_of_weekday(t, self.week_start),
            TimeUnit::Month => midnight(date.with_day(1).unwrap_or(date)),
            TimeUnit::Quarter => {
                NaiveDate::from_ymd_opt(date.year(), date.month0() / 3 * 3 + 1, 1)
                    .map_or(t, midnight)
            }
            TimeUnit::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1).map_or(t, midnight),
        }
    }

    fn start_of_weekday(&self, t: Instant, weekday: Weekday) -> Instant {
        let date = t.naive().date();
        let back =
            (date.weekday().num_days_from_monday() + 7 - weekday.num_days_from_monday()) % 7;
        midnight(
            date.checked_sub_days(Days::new(u64::from(back)))
                .unwrap_or(date),
        )
    }

    fn add(&self, t: Instant, amount: i64, unit: TimeUnit) -> Option<Instant> {
        let dt = t.naive();
        let shifted = match (unit.fixed_millis(), unit.months()) {
            (Some(ms), _) => {
                dt.checked_add_signed(TimeDelta::try_milliseconds(amount.checked_mul(ms)?)?)
            }
            (None, Some(months)) => add_months(dt, amount.checked_mul(i64::from(months))?),
            (None, None) => None,
        };
        shifted.map(Instant::new)
    }

    fn add_fractional(&self, t: Instant, amount: f64, unit: TimeUnit) -> Option<Instant> {
        let dt = t.naive();
        let shifted = match (unit.fixed_millis(), unit.months()) {
            (Some(ms), _) => shift_millis(dt, amount * ms as f64),
            (None, Some(months)) => {
                let months = amount * f64::from(months);
                let whole = months.floor();
                let whole_i = float_to_i64(whole)?;
                let anchor = add_months(dt, whole_i)?;
                let next = add_months(dt, whole_i.checked_add(1)?)?;
                let span = (next - anchor).num_milliseconds() as f64;
                shift_millis(anchor, (months - whole) * span)
            }
            (None, None) => None,
        };
        shifted.map(Instant::new)
    }

    fn diff(&self, a: Instant, b: Instant, unit: TimeUnit) -> f64 {
        let (a, b) = (a.naive(), b.naive());
        match (unit.fixed_millis(), unit.months()) {
            (Some(ms), _) => (a - b).num_milliseconds() as f64 / ms as f64,
            (None, Some(months)) => Self::month_diff(a, b) / f64::from(months),
            (None, None) => 0.0,
        }
    }

    fn parse(&self, text: &str, pattern: Option<&str>) -> Result<Instant, ParseError> {
        match pattern {
            Some(pattern) => parse_with_pattern(text, pattern),
            None => parse_iso(text),
        }
    }

    fn format(&self, t: Instant, pattern: &str) -> String {
        Pattern::compile(pattern).format(t.naive())
    }
}
