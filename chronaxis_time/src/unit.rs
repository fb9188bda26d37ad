// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Calendar units.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// A calendar granularity, ordered from finest to coarsest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    /// One millisecond.
    Millisecond,
    /// One second.
    Second,
    /// One minute.
    Minute,
    /// One hour.
    Hour,
    /// One calendar day.
    Day,
    /// Seven days, starting on the calendar's first weekday.
    Week,
    /// One calendar month.
    Month,
    /// Three calendar months, starting in January, April, July or October.
    Quarter,
    /// One calendar year.
    Year,
}

impl TimeUnit {
    /// Every unit, finest first.
    pub const ALL: [Self; 9] = [
        Self::Millisecond,
        Self::Second,
        Self::Minute,
        Self::Hour,
        Self::Day,
        Self::Week,
        Self::Month,
        Self::Quarter,
        Self::Year,
    ];

    /// Lowercase name, as used in configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Millisecond => "millisecond",
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        }
    }

    /// Length in milliseconds for units with a fixed duration.
    ///
    /// Months, quarters and years vary in length and return `None`.
    pub fn fixed_millis(self) -> Option<i64> {
        match self {
            Self::Millisecond => Some(1),
            Self::Second => Some(1_000),
            Self::Minute => Some(60_000),
            Self::Hour => Some(3_600_000),
            Self::Day => Some(86_400_000),
            Self::Week => Some(604_800_000),
            Self::Month | Self::Quarter | Self::Year => None,
        }
    }

    /// Number of calendar months per unit for month-based units.
    pub fn months(self) -> Option<u32> {
        match self {
            Self::Month => Some(1),
            Self::Quarter => Some(3),
            Self::Year => Some(12),
            _ => None,
        }
    }

    /// Units strictly coarser than `self`, finest first.
    pub fn coarser(self) -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().filter(move |u| *u > self)
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known [`TimeUnit`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown time unit `{0}`")]
pub struct UnknownUnit(pub String);

impl FromStr for TimeUnit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|u| u.as_str() == s)
            .ok_or_else(|| UnknownUnit(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_are_ordered_fine_to_coarse() {
        assert!(TimeUnit::ALL.windows(2).all(|w| w[0] < w[1]));
        let coarser: Vec<_> = TimeUnit::Month.coarser().collect();
        assert_eq!(coarser, [TimeUnit::Quarter, TimeUnit::Year]);
    }

    #[test]
    fn names_round_trip_through_from_str_and_serde() {
        for unit in TimeUnit::ALL {
            assert_eq!(unit.as_str().parse::<TimeUnit>(), Ok(unit));
            let json = serde_json::to_string(&unit).unwrap();
            assert_eq!(json, format!("\"{unit}\""));
        }
        assert_eq!(
            "fortnight".parse::<TimeUnit>(),
            Err(UnknownUnit("fortnight".into()))
        );
    }

    #[test]
    fn fixed_and_month_lengths_are_exclusive() {
        for unit in TimeUnit::ALL {
            assert!(
                unit.fixed_millis().is_some() != unit.months().is_some(),
                "{unit} must have exactly one length kind"
            );
        }
    }
}
