// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Unit and step selection.
//!
//! The selector estimates how wide one tick label is, derives how many
//! intervals fit along the axis, then walks the units from finest to coarsest
//! and takes the first unit with an allowed step that fits. A coarser unit that
//! yields the same interval count replaces the finer one, so a ten day range
//! prefers two weeks over two five-day steps. When only one interval fits the
//! finer unit stays, since every coarser unit would tie with it.

use chronaxis_text::{LabelMeasurer, LabelStyle};
use chronaxis_time::{Calendar, Instant, TimeUnit, Weekday};
use tracing::trace;

use crate::label::default_display_format;
use crate::options::ScaleOptions;
use crate::range::ResolvedRange;

/// The unit ticks are spaced in, and how many units lie between ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Granularity {
    /// Tick unit.
    pub unit: TimeUnit,
    /// Units per tick interval; always at least 1.
    pub step: u32,
}

/// Steps the selector may use for `unit`, smallest first.
///
/// Years accept any step and return an empty list.
pub fn allowed_steps(unit: TimeUnit) -> &'static [u32] {
    match unit {
        TimeUnit::Millisecond => &[1, 2, 5, 10, 20, 50, 100, 250, 500],
        TimeUnit::Second | TimeUnit::Minute => &[1, 2, 5, 10, 30],
        TimeUnit::Hour => &[1, 2, 3, 6, 12],
        TimeUnit::Day => &[1, 2, 5],
        TimeUnit::Week => &[1, 2, 3],
        TimeUnit::Month => &[1, 2],
        TimeUnit::Quarter => &[1, 2, 3],
        TimeUnit::Year => &[],
    }
}

/// Unit boundaries as the tick builder sees them.
///
/// Weeks start on the configured ISO weekday when one is set, and on the
/// calendar's own week start otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Anchor {
    unit: TimeUnit,
    week_start: Option<Weekday>,
}

impl Anchor {
    /// Boundaries of `unit`, honouring `week_start` for weeks.
    pub fn new(unit: TimeUnit, week_start: Option<Weekday>) -> Self {
        Self {
            unit,
            week_start: week_start.filter(|_| unit == TimeUnit::Week),
        }
    }

    /// The unit being anchored.
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Start of the period containing `t`.
    pub fn floor(&self, t: Instant, calendar: &dyn Calendar) -> Instant {
        match self.week_start {
            Some(weekday) => calendar.start_of_weekday(t, weekday),
            None => calendar.start_of(t, self.unit),
        }
    }

    /// Smallest period boundary at or after `t`.
    pub fn ceil(&self, t: Instant, calendar: &dyn Calendar) -> Instant {
        let floor = self.floor(t, calendar);
        if floor == t {
            return t;
        }
        calendar.add(floor, 1, self.unit).unwrap_or(t)
    }

    /// Whole periods from the start of `min` to the ceiling of `max`.
    pub fn periods(&self, min: Instant, max: Instant, calendar: &dyn Calendar) -> f64 {
        calendar.diff(self.ceil(max, calendar), self.floor(min, calendar), self.unit)
    }
}

/// Estimated width of one tick label, padding included.
///
/// Measures `sample` with the millisecond pattern, which is the widest default,
/// and with `display_format` when that is set, keeping the wider one.
pub fn label_width(
    sample: Instant,
    options: &ScaleOptions,
    measurer: &dyn LabelMeasurer,
    calendar: &dyn Calendar,
) -> f64 {
    let style = LabelStyle::new(options.ticks.font_size);
    let measure = |pattern: &str| {
        let label = calendar.format(sample, pattern);
        let label = match &options.ticks.callback {
            Some(callback) => callback(&label, 0),
            None => label,
        };
        measurer.width(&label, &style)
    };
    let mut width = measure(default_display_format(TimeUnit::Millisecond));
    if let Some(pattern) = &options.time.display_format {
        width = width.max(measure(pattern));
    }
    (width + options.ticks.padding).max(1.0)
}

fn ceil_to_u32(v: f64) -> u32 {
    let v = v.ceil().clamp(0.0, f64::from(u32::MAX));
    #[allow(clippy::cast_possible_truncation, reason = "clamped to the u32 range")]
    let v = v as u32;
    v
}

/// Chooses the unit and step for a range spread over `length` pixels.
///
/// An explicit unit is taken as is, with `unit_step_size` or 1 as the step.
pub fn select(
    range: &ResolvedRange,
    length: f64,
    options: &ScaleOptions,
    measurer: &dyn LabelMeasurer,
    calendar: &dyn Calendar,
) -> Granularity {
    if let Some(unit) = options.time.unit {
        let step = options.time.unit_step_size.unwrap_or(1).max(1);
        trace!(%unit, step, "using configured unit");
        return Granularity { unit, step };
    }

    let width = label_width(range.min, options, measurer, calendar);
    let max_intervals = ((length / width).floor() - 1.0).max(1.0);
    let week_start = options.time.week_anchor();
    let span_in = |unit: TimeUnit| Anchor::new(unit, week_start).periods(range.min, range.max, calendar);

    let mut found = None;
    for unit in TimeUnit::ALL.into_iter().filter(|u| *u != TimeUnit::Year) {
        let span = span_in(unit);
        if let Some(&step) = allowed_steps(unit)
            .iter()
            .find(|&&step| (span / f64::from(step)).ceil() <= max_intervals)
        {
            found = Some((Granularity { unit, step }, ceil_to_u32(span / f64::from(step))));
            break;
        }
    }

    let (mut granularity, intervals) = found.unwrap_or_else(|| {
        let span = span_in(TimeUnit::Year);
        let step = ceil_to_u32(span / max_intervals).max(1);
        (
            Granularity {
                unit: TimeUnit::Year,
                step,
            },
            ceil_to_u32(span / f64::from(step)),
        )
    });

    // A single interval ties with every coarser unit up to years.
    if intervals > 1 {
        for unit in granularity.unit.coarser() {
            if ceil_to_u32(span_in(unit)) != intervals {
                break;
            }
            granularity = Granularity { unit, step: 1 };
        }
    }

    trace!(
        unit = %granularity.unit,
        step = granularity.step,
        label_width = width,
        max_intervals,
        "selected granularity"
    );
    granularity
}

#[cfg(test)]
mod tests {
    use chronaxis_text::HeuristicTextMeasurer;
    use chronaxis_time::NaiveCalendar;

    use super::*;

    const CAL: NaiveCalendar = NaiveCalendar::new();

    fn range(min: Instant, max: Instant) -> ResolvedRange {
        ResolvedRange {
            min,
            max,
            data_max: max,
            explicit_min: false,
            explicit_max: false,
        }
    }

    fn at(d: u32, h: u32) -> Instant {
        Instant::from_ymd_hms(2015, 1, d, h, 0, 0).unwrap()
    }

    #[test]
    fn anchor_floor_and_ceil() {
        let week = Anchor::new(TimeUnit::Week, None);
        assert_eq!(week.floor(at(1, 20), &CAL), Instant::from_ymd(2014, 12, 28).unwrap());
        assert_eq!(week.ceil(at(10, 12), &CAL), at(11, 0));
        assert_eq!(week.ceil(at(11, 0), &CAL), at(11, 0), "boundaries are their own ceiling");

        let iso = Anchor::new(TimeUnit::Week, chronaxis_time::iso_weekday(3));
        assert_eq!(iso.floor(at(1, 0), &CAL), Instant::from_ymd(2014, 12, 31).unwrap());

        let day = Anchor::new(TimeUnit::Day, chronaxis_time::iso_weekday(3));
        assert_eq!(day.floor(at(1, 20), &CAL), at(1, 0), "weekday only affects weeks");
        assert_eq!(day.periods(at(1, 20), at(10, 12), &CAL), 10.0);
    }

    #[test]
    fn label_width_uses_the_widest_pattern() {
        let measurer = HeuristicTextMeasurer::default();
        let options = ScaleOptions::default();
        // "8:00:00.000 pm" is 14 glyphs at 0.6 em of 12px, plus 10px padding.
        let w = label_width(at(1, 20), &options, &measurer, &CAL);
        assert!((w - 110.8).abs() < 1e-9, "{w}");

        let narrow = options.clone().with_display_format("H");
        assert_eq!(label_width(at(1, 20), &narrow, &measurer, &CAL), w);

        let wide = options.with_display_format("dddd, MMMM Do YYYY, h:mm:ss a");
        assert!(label_width(at(1, 20), &wide, &measurer, &CAL) > w);
    }

    #[test]
    fn ten_days_at_400px_prefers_weeks() {
        let measurer = HeuristicTextMeasurer::default();
        let g = select(
            &range(at(1, 20), at(10, 12)),
            400.0,
            &ScaleOptions::default(),
            &measurer,
            &CAL,
        );
        assert_eq!(g, Granularity { unit: TimeUnit::Week, step: 1 });
    }

    #[test]
    fn wider_axes_pick_finer_units() {
        let measurer = HeuristicTextMeasurer::default();
        let r = range(at(1, 0), at(11, 0));
        let g = select(&r, 800.0, &ScaleOptions::default(), &measurer, &CAL);
        assert_eq!(g, Granularity { unit: TimeUnit::Day, step: 2 });
        let g = select(&r, 4000.0, &ScaleOptions::default(), &measurer, &CAL);
        assert_eq!(g.unit, TimeUnit::Hour);
    }

    #[test]
    fn one_interval_keeps_the_finer_unit() {
        let measurer = HeuristicTextMeasurer::default();
        let g = select(
            &range(at(1, 20), at(10, 12)),
            300.0,
            &ScaleOptions::default(),
            &measurer,
            &CAL,
        );
        assert_eq!(g, Granularity { unit: TimeUnit::Week, step: 2 });
    }

    #[test]
    fn explicit_unit_and_step() {
        let measurer = HeuristicTextMeasurer::default();
        let options = ScaleOptions::default()
            .with_unit(TimeUnit::Month)
            .with_unit_step_size(2);
        let g = select(&range(at(1, 0), at(2, 0)), 10.0, &options, &measurer, &CAL);
        assert_eq!(g, Granularity { unit: TimeUnit::Month, step: 2 });
    }

    #[test]
    fn long_ranges_fall_back_to_year_steps() {
        let measurer = HeuristicTextMeasurer::default();
        let r = range(
            Instant::from_ymd(1900, 6, 1).unwrap(),
            Instant::from_ymd(2015, 6, 1).unwrap(),
        );
        let g = select(&r, 400.0, &ScaleOptions::default(), &measurer, &CAL);
        assert_eq!(g.unit, TimeUnit::Year);
        // 116 years over 2 intervals.
        assert_eq!(g.step, 58);
    }
}
