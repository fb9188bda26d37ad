// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Calendar arithmetic for time axes.
//!
//! A time axis needs a handful of date operations: round an instant down to a
//! unit boundary, step by whole or fractional units, measure the distance
//! between two instants in a unit, and turn text into instants and back. This
//! crate bundles them behind the [`Calendar`] trait:
//!
//! - [`Instant`] is a wall-clock point in time backed by chrono.
//! - [`TimeUnit`] names the granularities from millisecond to year.
//! - [`NaiveCalendar`] is the Gregorian implementation used by default.
//! - [`Pattern`] renders and parses moment-style patterns like `MMM D, YYYY`.
//!
//! ```
//! use chronaxis_time::{Calendar, NaiveCalendar, TimeUnit};
//!
//! let cal = NaiveCalendar::default();
//! let t = cal.parse("2015-01-01T20:00:00", None).unwrap();
//! let week = cal.start_of(t, TimeUnit::Week);
//! assert_eq!(cal.format(week, "ll"), "Dec 28, 2014");
//! ```

mod calendar;
mod error;
mod instant;
mod parse;
mod pattern;
mod unit;

pub use calendar::{Calendar, NaiveCalendar};
pub use chrono::Weekday;
pub use error::ParseError;
pub use instant::Instant;
pub use parse::{parse_iso, parse_with_pattern};
pub use pattern::{Field, Pattern, Token};
pub use unit::{TimeUnit, UnknownUnit};

/// Maps an ISO weekday number (`1` is Monday, `7` is Sunday) to a [`Weekday`].
pub fn iso_weekday(n: u8) -> Option<Weekday> {
    match n {
        1..=7 => Weekday::try_from(n - 1).ok(),
        _ => None,
    }
}
