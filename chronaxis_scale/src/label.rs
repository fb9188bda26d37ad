// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick label formatting.

use chronaxis_time::{Calendar, Instant, TimeUnit};

use crate::options::ScaleOptions;

/// A positioned, labelled tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    /// Where the tick sits in time.
    pub instant: Instant,
    /// The rendered label.
    pub label: String,
}

/// The built-in label pattern for `unit`.
pub fn default_display_format(unit: TimeUnit) -> &'static str {
    match unit {
        TimeUnit::Millisecond => "h:mm:ss.SSS a",
        TimeUnit::Second | TimeUnit::Minute => "h:mm:ss a",
        TimeUnit::Hour => "MMM D, hA",
        TimeUnit::Day | TimeUnit::Week => "ll",
        TimeUnit::Month => "MMM YYYY",
        TimeUnit::Quarter => "[Q]Q - YYYY",
        TimeUnit::Year => "YYYY",
    }
}

/// The pattern used for ticks of `unit`.
///
/// `display_format` wins over the per-unit map, which wins over the built-in table.
pub fn display_pattern(options: &ScaleOptions, unit: TimeUnit) -> &str {
    options
        .time
        .display_format
        .as_deref()
        .or_else(|| options.time.display_formats.get(&unit).map(String::as_str))
        .unwrap_or_else(|| default_display_format(unit))
}

/// Formats one tick label, then lets the tick callback rewrite it.
pub fn format_label(
    instant: Instant,
    index: usize,
    unit: TimeUnit,
    options: &ScaleOptions,
    calendar: &dyn Calendar,
) -> String {
    let label = calendar.format(instant, display_pattern(options, unit));
    match &options.ticks.callback {
        Some(callback) => callback(&label, index),
        None => label,
    }
}

/// Labels every tick instant.
pub fn label_ticks(
    instants: &[Instant],
    unit: TimeUnit,
    options: &ScaleOptions,
    calendar: &dyn Calendar,
) -> Vec<Tick> {
    instants
        .iter()
        .enumerate()
        .map(|(index, &instant)| Tick {
            instant,
            label: format_label(instant, index, unit, options, calendar),
        })
        .collect()
}
