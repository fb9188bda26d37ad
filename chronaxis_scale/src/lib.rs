// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time axis scales for charts.
//!
//! A [`TimeScale`] turns raw chart data (labels, or `{x, y}` points) into an
//! axis:
//! - **Resolution**: raw values become [`Instant`]s through a parser pattern, a
//!   custom parser, Unix milliseconds or ISO-8601 text.
//! - **Granularity**: a unit and step are chosen so tick labels fit the pixel
//!   length, unless the options name a unit.
//! - **Ticks**: instants on unit boundaries, labelled with moment-style patterns.
//! - **Mapping**: instants map linearly onto the axis box and back.
//!
//! All calendar arithmetic goes through [`chronaxis_time::Calendar`], and label
//! widths through [`chronaxis_text::LabelMeasurer`]; both are swappable.
//!
//! ```
//! use std::sync::Arc;
//!
//! use chronaxis_scale::{ChartData, ScaleOptions, TimeScale};
//!
//! let data = ChartData::from_labels(["2015-01-01T20:00:00", "2015-01-10T12:00:00"]);
//! let mut scale = TimeScale::new("x", ScaleOptions::default(), Arc::new(data));
//! scale.update(400.0, 30.0).unwrap();
//! assert_eq!(
//!     scale.tick_labels(),
//!     ["Dec 28, 2014", "Jan 4, 2015", "Jan 11, 2015"]
//! );
//! ```

mod error;
mod granularity;
mod label;
mod mapper;
mod options;
mod range;
mod registry;
mod resolve;
mod ticks;
mod time_scale;
mod value;

pub use chronaxis_time::{Instant, TimeUnit};

pub use error::ScaleError;
pub use granularity::{Anchor, Granularity, allowed_steps, label_width, select};
pub use label::{Tick, default_display_format, display_pattern, format_label, label_ticks};
pub use mapper::PixelMapper;
pub use options::{
    ParseFn, Position, Round, ScaleOptions, TickCallback, TickOptions, TimeOptions, TimeParser,
};
pub use range::{ResolvedInstants, ResolvedRange, collect};
pub use registry::{ScaleConstructor, ScaleRegistry};
pub use resolve::resolve;
pub use ticks::{MAX_TICKS, TickSpan, build};
pub use time_scale::{SharedData, TimeScale};
pub use value::{ChartData, Dataset, DatasetValues, TimeData, TimePoint, TimeValue};
