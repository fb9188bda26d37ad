// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Range collection over labels and point datasets.

use chronaxis_time::{Calendar, Instant, TimeUnit};
use tracing::{debug, warn};

use crate::error::ScaleError;
use crate::granularity::Anchor;
use crate::options::{Round, TimeOptions};
use crate::resolve::resolve;
use crate::value::{TimeData, TimeValue};

/// The span an axis must cover.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedRange {
    /// Lower bound, after explicit overrides and padding.
    pub min: Instant,
    /// Upper bound, after explicit overrides and padding.
    pub max: Instant,
    /// Latest resolved data instant, or `max` when there is no data.
    pub data_max: Instant,
    /// `min` came from the options.
    pub explicit_min: bool,
    /// `max` came from the options.
    pub explicit_max: bool,
}

/// Resolved instants, kept aligned with the indices of the raw data.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolvedInstants {
    labels: Vec<Option<Instant>>,
    datasets: Vec<Option<Vec<Option<Instant>>>>,
}

impl ResolvedInstants {
    /// The instant at `index` of `dataset`.
    ///
    /// Datasets positioned by label read the shared labels.
    pub fn get(&self, dataset: usize, index: usize) -> Option<Instant> {
        match self.datasets.get(dataset) {
            Some(Some(points)) => points.get(index).copied().flatten(),
            _ => self.label(index),
        }
    }

    /// The instant of the label at `index`.
    pub fn label(&self, index: usize) -> Option<Instant> {
        self.labels.get(index).copied().flatten()
    }
}

#[derive(Default)]
struct Extent {
    bounds: Option<(Instant, Instant)>,
}

impl Extent {
    fn include(&mut self, t: Instant) {
        self.bounds = Some(match self.bounds {
            Some((lo, hi)) => (lo.min(t), hi.max(t)),
            None => (t, t),
        });
    }
}

fn resolve_all<'a>(
    raw: impl IntoIterator<Item = &'a TimeValue>,
    options: &TimeOptions,
    calendar: &dyn Calendar,
) -> Vec<Option<Instant>> {
    let round = match options.round {
        Round::Unit(unit) => Some(Anchor::new(unit, options.week_anchor())),
        Round::Off | Round::TickUnit => None,
    };
    raw.into_iter()
        .map(|value| {
            let t = resolve(value, options, calendar)?;
            Some(round.map_or(t, |anchor| anchor.floor(t, calendar)))
        })
        .collect()
}

fn explicit_bound(
    bound: &'static str,
    raw: Option<&TimeValue>,
    options: &TimeOptions,
    calendar: &dyn Calendar,
) -> Option<Instant> {
    let value = raw?;
    let t = resolve(value, options, calendar);
    if t.is_none() {
        warn!(bound, %value, "ignoring unresolvable explicit bound");
    }
    t
}

/// Resolves every label and point, then derives the axis range.
///
/// Labels always count toward the range. Point datasets count only while
/// visible, but their instants are kept for pixel lookups either way.
///
/// Explicit bounds that do not resolve are ignored. A bound that crosses the
/// other side of the range pulls that side onto itself, and the collapsed range
/// is then padded like a single instant.
pub fn collect(
    data: &dyn TimeData,
    options: &TimeOptions,
    calendar: &dyn Calendar,
) -> Result<(ResolvedInstants, ResolvedRange), ScaleError> {
    let mut extent = Extent::default();

    let labels = resolve_all(data.labels(), options, calendar);
    labels.iter().flatten().for_each(|&t| extent.include(t));

    let datasets: Vec<_> = (0..data.dataset_count())
        .map(|dataset| {
            let points = data.points(dataset)?;
            let instants = resolve_all(points.iter().map(|p| &p.x), options, calendar);
            if data.is_dataset_visible(dataset) {
                instants.iter().flatten().for_each(|&t| extent.include(t));
            }
            Some(instants)
        })
        .collect();

    let explicit_min = explicit_bound("min", options.min.as_ref(), options, calendar);
    let explicit_max = explicit_bound("max", options.max.as_ref(), options, calendar);

    let observed = extent.bounds;
    let (Some(mut min), Some(mut max)) = (
        explicit_min.or(observed.map(|(lo, _)| lo)),
        explicit_max.or(observed.map(|(_, hi)| hi)),
    ) else {
        return Err(ScaleError::EmptyRange);
    };
    if min > max {
        warn!(%min, %max, "explicit bound crosses the range; collapsing it");
        if explicit_min.is_none() {
            min = max;
        } else {
            max = min;
        }
    }

    if min == max {
        let pad_unit = options.unit.unwrap_or(TimeUnit::Day);
        let padded = calendar
            .add_fractional(min, -0.5, pad_unit)
            .zip(calendar.add_fractional(max, 0.5, pad_unit));
        if let Some((lo, hi)) = padded {
            debug!(%min, unit = %pad_unit, "padding single-instant range");
            min = lo;
            max = hi;
        }
    }

    let range = ResolvedRange {
        min,
        max,
        data_max: observed.map_or(max, |(_, hi)| hi),
        explicit_min: explicit_min.is_some(),
        explicit_max: explicit_max.is_some(),
    };
    Ok((ResolvedInstants { labels, datasets }, range))
}
