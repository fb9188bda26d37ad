// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick instant generation.

use chronaxis_time::{Calendar, Instant};
use tracing::{debug, trace, warn};

use crate::granularity::{Anchor, Granularity};
use crate::options::{Round, TimeOptions};
use crate::range::ResolvedRange;

/// Upper bound on ticks produced by one build.
pub const MAX_TICKS: usize = 10_000;

/// The first and last instants an axis spans once its granularity is known.
///
/// Explicit bounds are kept as given; computed bounds snap outward to unit
/// boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickSpan {
    /// First tick.
    pub first: Instant,
    /// End of the axis; the last tick when it is kept.
    pub last: Instant,
}

impl TickSpan {
    /// Computes the span of `range` at `granularity`.
    pub fn new(
        range: &ResolvedRange,
        granularity: Granularity,
        options: &TimeOptions,
        calendar: &dyn Calendar,
    ) -> Self {
        let anchor = Anchor::new(granularity.unit, options.week_anchor());
        let mut first = if range.explicit_min {
            range.min
        } else {
            anchor.floor(range.min, calendar)
        };
        match options.round {
            Round::Off => {}
            Round::TickUnit => first = anchor.floor(first, calendar),
            Round::Unit(unit) => {
                first = Anchor::new(unit, options.week_anchor()).floor(first, calendar);
            }
        }
        let last = if range.explicit_max {
            range.max
        } else {
            anchor.ceil(range.max, calendar)
        };
        Self { first, last }
    }
}

/// Builds strictly increasing tick instants for `range`.
///
/// Ticks after the first sit on unit boundaries, `step` units apart. A closing
/// tick at the end of the span is added when the iteration stopped short of it,
/// unless it would start a period past the observed data.
pub fn build(
    range: &ResolvedRange,
    granularity: Granularity,
    options: &TimeOptions,
    calendar: &dyn Calendar,
) -> Vec<Instant> {
    let unit = granularity.unit;
    let anchor = Anchor::new(unit, options.week_anchor());
    let TickSpan { first, last } = TickSpan::new(range, granularity, options, calendar);
    let rounded_start = anchor.floor(first, calendar);
    let size = calendar.diff(last, first, unit);
    let step = i64::from(granularity.step.max(1));

    let mut ticks = vec![first];
    let mut offset = step;
    while offset as f64 <= size + 1e-9 {
        let Some(t) = calendar.add(rounded_start, offset, unit) else {
            break;
        };
        if range.explicit_max && t >= last {
            break;
        }
        ticks.push(t);
        if ticks.len() >= MAX_TICKS {
            warn!(%unit, step, max = MAX_TICKS, "tick generation hit its cap");
            break;
        }
        offset += step;
    }

    if let Some(&tail) = ticks.last()
        && tail < last
        && (calendar.diff(last, tail, unit).trunc() != 0.0 || ticks.len() == 1)
    {
        if range.explicit_max || ticks.len() < 2 || anchor.floor(last, calendar) <= range.data_max {
            ticks.push(last);
        } else {
            debug!(%last, data_max = %range.data_max, "dropping closing tick past the data");
        }
    }

    ticks.dedup_by(|next, prev| *next <= *prev);
    trace!(%unit, step, count = ticks.len(), "built ticks");
    ticks
}

#[cfg(test)]
mod tests {
    use chronaxis_time::{NaiveCalendar, TimeUnit};

    use super::*;

    const CAL: NaiveCalendar = NaiveCalendar::new();

    fn at(y: i32, mo: u32, d: u32, h: u32) -> Instant {
        Instant::from_ymd_hms(y, mo, d, h, 0, 0).unwrap()
    }

    fn range(min: Instant, max: Instant) -> ResolvedRange {
        ResolvedRange {
            min,
            max,
            data_max: max,
            explicit_min: false,
            explicit_max: false,
        }
    }

    fn g(unit: TimeUnit, step: u32) -> Granularity {
        Granularity { unit, step }
    }

    #[test]
    fn computed_bounds_snap_outward() {
        let ticks = build(
            &range(at(2015, 1, 1, 20), at(2015, 1, 10, 12)),
            g(TimeUnit::Week, 1),
            &TimeOptions::default(),
            &CAL,
        );
        assert_eq!(
            ticks,
            [at(2014, 12, 28, 0), at(2015, 1, 4, 0), at(2015, 1, 11, 0)]
        );
    }

    #[test]
    fn explicit_bounds_are_kept_as_given() {
        let r = ResolvedRange {
            explicit_min: true,
            explicit_max: true,
            data_max: at(2015, 1, 3, 0),
            ..range(at(2015, 1, 1, 4), at(2015, 1, 5, 6))
        };
        let ticks = build(&r, g(TimeUnit::Day, 5), &TimeOptions::default(), &CAL);
        assert_eq!(ticks, [at(2015, 1, 1, 4), at(2015, 1, 5, 6)]);

        let ticks = build(&r, g(TimeUnit::Day, 1), &TimeOptions::default(), &CAL);
        assert_eq!(ticks.first(), Some(&at(2015, 1, 1, 4)));
        assert_eq!(ticks.get(1), Some(&at(2015, 1, 2, 0)));
        assert_eq!(ticks.last(), Some(&at(2015, 1, 5, 0)), "a partial final day adds no tick");
        assert_eq!(ticks.len(), 5);
    }

    #[test]
    fn closing_tick_past_the_data_is_dropped() {
        let r = range(at(2015, 7, 15, 0), at(2016, 7, 15, 0));
        let ticks = build(&r, g(TimeUnit::Month, 2), &TimeOptions::default(), &CAL);
        assert_eq!(ticks.first(), Some(&at(2015, 7, 1, 0)));
        assert_eq!(ticks.last(), Some(&at(2016, 7, 1, 0)));
        assert_eq!(ticks.len(), 7);
    }

    #[test]
    fn round_snaps_an_explicit_first_tick() {
        let r = ResolvedRange {
            explicit_min: true,
            ..range(at(2015, 1, 1, 4), at(2015, 1, 3, 0))
        };
        let options = TimeOptions {
            round: Round::TickUnit,
            ..TimeOptions::default()
        };
        let ticks = build(&r, g(TimeUnit::Day, 1), &options, &CAL);
        assert_eq!(ticks, [at(2015, 1, 1, 0), at(2015, 1, 2, 0), at(2015, 1, 3, 0)]);
    }

    #[test]
    fn iso_weekday_moves_week_ticks() {
        let options = TimeOptions {
            iso_weekday: Some(3),
            ..TimeOptions::default()
        };
        let ticks = build(
            &range(at(2015, 1, 1, 0), at(2015, 1, 3, 0)),
            g(TimeUnit::Week, 1),
            &options,
            &CAL,
        );
        assert_eq!(ticks, [at(2014, 12, 31, 0), at(2015, 1, 7, 0)]);
    }

    #[test]
    fn round_to_week_follows_iso_weekday() {
        let options = TimeOptions {
            iso_weekday: Some(3),
            round: Round::Unit(TimeUnit::Week),
            ..TimeOptions::default()
        };
        let r = ResolvedRange {
            explicit_min: true,
            ..range(at(2015, 1, 1, 0), at(2015, 1, 14, 0))
        };
        let ticks = build(&r, g(TimeUnit::Week, 1), &options, &CAL);
        assert_eq!(
            ticks,
            [at(2014, 12, 31, 0), at(2015, 1, 7, 0), at(2015, 1, 14, 0)]
        );
    }

    #[test]
    fn runaway_iteration_is_capped() {
        let ticks = build(
            &range(at(2015, 1, 1, 0), at(2015, 1, 2, 0)),
            g(TimeUnit::Millisecond, 1),
            &TimeOptions::default(),
            &CAL,
        );
        assert!(ticks.len() <= MAX_TICKS + 1, "{}", ticks.len());
        assert!(ticks.windows(2).all(|w| w[0] < w[1]));
    }
}
