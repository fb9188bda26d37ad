// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Instant <-> pixel mapping.

use chronaxis_time::{Calendar, Instant, TimeUnit};

/// Linear map from the tick span onto one axis of the layout box.
///
/// Offsets are measured in fractional tick units, so month-based axes space
/// calendar months evenly rather than by their length in days.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelMapper {
    first: Instant,
    unit: TimeUnit,
    span: f64,
    start: f64,
    length: f64,
    reverse: bool,
}

impl PixelMapper {
    /// Maps `[first, last]` onto `[start, start + length]`.
    pub fn new(
        first: Instant,
        last: Instant,
        unit: TimeUnit,
        start: f64,
        length: f64,
        calendar: &dyn Calendar,
    ) -> Self {
        Self {
            first,
            unit,
            span: calendar.diff(last, first, unit),
            start,
            length,
            reverse: false,
        }
    }

    /// Flips the direction of the mapping.
    #[must_use]
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Pixel position of `t`; instants outside the span extrapolate.
    pub fn to_pixel(&self, t: Instant, calendar: &dyn Calendar) -> f64 {
        let decimal = if self.span == 0.0 {
            0.0
        } else {
            calendar.diff(t, self.first, self.unit) / self.span
        };
        let decimal = if self.reverse { 1.0 - decimal } else { decimal };
        self.start + decimal * self.length
    }

    /// Instant at `pixel`, not snapped to any tick.
    pub fn to_instant(&self, pixel: f64, calendar: &dyn Calendar) -> Option<Instant> {
        if self.length == 0.0 {
            return Some(self.first);
        }
        let decimal = (pixel - self.start) / self.length;
        let decimal = if self.reverse { 1.0 - decimal } else { decimal };
        calendar.add_fractional(self.first, decimal * self.span, self.unit)
    }
}
