// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The time axis scale.

use core::fmt;
use std::sync::Arc;

use chronaxis_text::{HeuristicTextMeasurer, LabelMeasurer};
use chronaxis_time::{Calendar, Instant, NaiveCalendar};
use kurbo::{Point, Rect, Size};
use tracing::debug;

use crate::error::ScaleError;
use crate::granularity::{self, Granularity};
use crate::label::{self, Tick};
use crate::mapper::PixelMapper;
use crate::options::ScaleOptions;
use crate::range::{self, ResolvedInstants, ResolvedRange};
use crate::resolve::resolve;
use crate::ticks::{self, TickSpan};
use crate::value::{TimeData, TimeValue};

/// Shared, read-only chart data.
pub type SharedData = Arc<dyn TimeData + Send + Sync>;

/// Everything computed by [`TimeScale::update`].
#[derive(Clone, Debug)]
struct Layout {
    bounds: Rect,
    instants: ResolvedInstants,
    range: ResolvedRange,
    granularity: Granularity,
    ticks: Vec<Tick>,
    mapper: PixelMapper,
}

/// A time axis over chart data.
///
/// Construction only records inputs. [`TimeScale::update`] resolves the data,
/// chooses a granularity, builds the ticks and lays the axis out in a box of the
/// given size at [`TimeScale::with_origin`]. Queries return `None` until the
/// first successful update.
pub struct TimeScale {
    id: String,
    options: ScaleOptions,
    data: SharedData,
    calendar: Arc<dyn Calendar>,
    measurer: Arc<dyn LabelMeasurer + Send + Sync>,
    origin: Point,
    layout: Option<Layout>,
}

impl fmt::Debug for TimeScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeScale")
            .field("id", &self.id)
            .field("options", &self.options)
            .field("calendar", &self.calendar)
            .field("origin", &self.origin)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

impl TimeScale {
    /// Creates a scale over `data` using the naive calendar and the heuristic measurer.
    pub fn new(id: impl Into<String>, options: ScaleOptions, data: SharedData) -> Self {
        Self {
            id: id.into(),
            options,
            data,
            calendar: Arc::new(NaiveCalendar::new()),
            measurer: Arc::new(HeuristicTextMeasurer::default()),
            origin: Point::ORIGIN,
            layout: None,
        }
    }

    /// Replaces the date capability.
    #[must_use]
    pub fn with_calendar(mut self, calendar: Arc<dyn Calendar>) -> Self {
        self.calendar = calendar;
        self.layout = None;
        self
    }

    /// Replaces the label measurer used by the density heuristic.
    #[must_use]
    pub fn with_measurer(mut self, measurer: Arc<dyn LabelMeasurer + Send + Sync>) -> Self {
        self.measurer = measurer;
        self.layout = None;
        self
    }

    /// Sets the top-left corner of the axis box.
    #[must_use]
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self.layout = None;
        self
    }

    /// Axis identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current options.
    pub fn options(&self) -> &ScaleOptions {
        &self.options
    }

    /// Replaces the options. Takes effect on the next [`TimeScale::update`].
    pub fn set_options(&mut self, options: ScaleOptions) {
        self.options = options;
        self.layout = None;
    }

    /// Replaces the data. Takes effect on the next [`TimeScale::update`].
    pub fn set_data(&mut self, data: SharedData) {
        self.data = data;
        self.layout = None;
    }

    /// Recomputes range, granularity, ticks and mapping for a `width` x `height` box.
    ///
    /// Horizontal axes spread over the width, vertical ones over the height with
    /// the earliest instant at the top. On error the previous layout is cleared.
    pub fn update(&mut self, width: f64, height: f64) -> Result<(), ScaleError> {
        self.layout = None;
        let bounds = Rect::from_origin_size(self.origin, Size::new(width, height));
        let calendar = &*self.calendar;
        let time = &self.options.time;

        let (instants, range) = range::collect(&*self.data, time, calendar)?;

        let (start, length) = if self.options.position.is_horizontal() {
            (bounds.x0, bounds.width())
        } else {
            (bounds.y0, bounds.height())
        };
        let granularity =
            granularity::select(&range, length, &self.options, &*self.measurer, calendar);
        let tick_instants = ticks::build(&range, granularity, time, calendar);
        let ticks = label::label_ticks(&tick_instants, granularity.unit, &self.options, calendar);

        // The axis ends at the span's end even when the closing tick was dropped.
        let span = TickSpan::new(&range, granularity, time, calendar);
        let mapper =
            PixelMapper::new(span.first, span.last, granularity.unit, start, length, calendar)
                .with_reverse(self.options.ticks.reverse);

        debug!(
            id = %self.id,
            unit = %granularity.unit,
            step = granularity.step,
            ticks = ticks.len(),
            "updated time scale"
        );
        self.layout = Some(Layout {
            bounds,
            instants,
            range,
            granularity,
            ticks,
            mapper,
        });
        Ok(())
    }

    /// Labelled ticks from the last update.
    pub fn ticks(&self) -> &[Tick] {
        self.layout
            .as_ref()
            .map(|l| l.ticks.as_slice())
            .unwrap_or_default()
    }

    /// Tick labels from the last update.
    pub fn tick_labels(&self) -> Vec<&str> {
        self.ticks().iter().map(|t| t.label.as_str()).collect()
    }

    /// Tick instants from the last update.
    pub fn tick_instants(&self) -> Vec<Instant> {
        self.ticks().iter().map(|t| t.instant).collect()
    }

    /// Selected granularity.
    pub fn granularity(&self) -> Option<Granularity> {
        self.layout.as_ref().map(|l| l.granularity)
    }

    /// Resolved range.
    pub fn range(&self) -> Option<ResolvedRange> {
        self.layout.as_ref().map(|l| l.range)
    }

    /// The axis box.
    pub fn bounds(&self) -> Option<Rect> {
        self.layout.as_ref().map(|l| l.bounds)
    }

    /// Pixel position of a data value.
    ///
    /// With an `index` and `dataset`, the instant resolved for that data entry
    /// during the update is used. Otherwise, or when that entry did not resolve,
    /// `value` is resolved on the spot.
    pub fn pixel_for_value(
        &self,
        value: &TimeValue,
        index: Option<usize>,
        dataset: Option<usize>,
    ) -> Option<f64> {
        let layout = self.layout.as_ref()?;
        let stored = index
            .zip(dataset)
            .and_then(|(index, dataset)| layout.instants.get(dataset, index));
        let t = match stored {
            Some(t) => t,
            None => resolve(value, &self.options.time, &*self.calendar)?,
        };
        Some(layout.mapper.to_pixel(t, &*self.calendar))
    }

    /// Pixel position of the tick at `index`.
    pub fn pixel_for_tick(&self, index: usize) -> Option<f64> {
        let layout = self.layout.as_ref()?;
        let tick = layout.ticks.get(index)?;
        Some(layout.mapper.to_pixel(tick.instant, &*self.calendar))
    }

    /// Instant at a pixel position, not snapped to a tick.
    pub fn value_for_pixel(&self, pixel: f64) -> Option<Instant> {
        self.layout.as_ref()?.mapper.to_instant(pixel, &*self.calendar)
    }

    /// Display text for the data entry at `index`.
    ///
    /// Point datasets report their own `x`, others the shared label. With a
    /// tooltip format the value is resolved and re-formatted; values that do not
    /// resolve are returned as written.
    pub fn label_for_index(&self, index: usize, dataset: usize) -> Option<String> {
        let raw = match self.data.points(dataset) {
            Some(points) => &points.get(index)?.x,
            None => self.data.labels().get(index)?,
        };
        let Some(pattern) = &self.options.time.tooltip_format else {
            return Some(raw.to_string());
        };
        Some(match resolve(raw, &self.options.time, &*self.calendar) {
            Some(t) => self.calendar.format(t, pattern),
            None => raw.to_string(),
        })
    }
}
