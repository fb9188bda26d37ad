// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time axis demos for `chronaxis_scale`.
//!
//! Without arguments, lays out a handful of sample axes. With a path, reads a
//! JSON file of the form
//! `{"width": 400, "height": 50, "fontFamily": "Inter", "options": {...}, "data": {"labels": [...]}}`
//! and lays out that axis instead. Either way the ticks are printed and the
//! axes are written to `chronaxis_demo.svg`. Set `RUST_LOG=chronaxis_scale=trace`
//! to watch the granularity search.

mod svg;

use std::error::Error;
use std::sync::Arc;

use chronaxis_scale::{ChartData, Dataset, ScaleRegistry, TimePoint, TimeScale};
use chronaxis_text::FontFamily;
use kurbo::Point;
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AxisFile {
    #[serde(default = "default_width")]
    width: f64,
    #[serde(default = "default_height")]
    height: f64,
    #[serde(default)]
    font_family: Option<String>,
    #[serde(default)]
    options: serde_json::Value,
    data: ChartData,
}

fn default_width() -> f64 {
    400.0
}

fn default_height() -> f64 {
    50.0
}

struct Sample {
    caption: &'static str,
    options: &'static str,
    data: ChartData,
    size: (f64, f64),
}

fn samples() -> Vec<Sample> {
    let days = ChartData::from_labels([
        "2015-01-01T20:00:00",
        "2015-01-02T21:00:00",
        "2015-01-03T22:00:00",
        "2015-01-05T23:00:00",
        "2015-01-07T03:00",
        "2015-01-08T10:00",
        "2015-01-10T12:00",
    ]);
    let points = ChartData::default().with_dataset(Dataset::points(
        [
            ("2015-01-01T12:00", 1.0),
            ("2015-01-03T12:00", 0.0),
            ("2015-01-07T12:00", 77.0),
            ("2015-01-10T12:00", 5.0),
        ]
        .map(|(x, y)| TimePoint::new(x, y)),
    ));
    vec![
        Sample {
            caption: "auto unit, 400px",
            options: "{}",
            data: days.clone(),
            size: (400.0, 50.0),
        },
        Sample {
            caption: "auto unit, 1200px",
            options: "{}",
            data: days.clone(),
            size: (1200.0, 50.0),
        },
        Sample {
            caption: "points, 800px",
            options: "{}",
            data: points,
            size: (800.0, 50.0),
        },
        Sample {
            caption: "unit week, isoWeekday 3",
            options: r#"{"time": {"unit": "week", "isoWeekday": 3}}"#,
            data: days.clone(),
            size: (400.0, 50.0),
        },
        Sample {
            caption: "unit day, step 2, reversed",
            options: r#"{"time": {"unit": "day", "unitStepSize": 2}, "ticks": {"reverse": true}}"#,
            data: days.clone(),
            size: (600.0, 50.0),
        },
        Sample {
            caption: "explicit bounds",
            options: r#"{"time": {"min": "2015-01-01T04:00:00", "max": "2015-01-05T06:00:00"}}"#,
            data: days.clone(),
            size: (400.0, 50.0),
        },
        Sample {
            caption: "single instant",
            options: r#"{"time": {"displayFormats": {"day": "YYYY-MM-DD"}}}"#,
            data: ChartData::from_labels(["2016-05-27"]),
            size: (400.0, 50.0),
        },
        Sample {
            caption: "left axis",
            options: r#"{"position": "left", "time": {"displayFormat": "MMM D"}}"#,
            data: days,
            size: (40.0, 300.0),
        },
    ]
}

fn lay_out(
    registry: &ScaleRegistry,
    caption: &str,
    options: &str,
    data: ChartData,
    (width, height): (f64, f64),
    origin: Point,
) -> Result<TimeScale, Box<dyn Error>> {
    let mut scale = registry
        .build_from_json("time", caption, options, Arc::new(data))?
        .with_origin(origin);
    scale.update(width, height)?;
    if let Some(g) = scale.granularity() {
        info!(caption, unit = %g.unit, step = g.step, "laid out axis");
    }
    println!("{caption}:");
    for (index, tick) in scale.ticks().iter().enumerate() {
        let px = scale.pixel_for_tick(index).unwrap_or(f64::NAN);
        println!("  {px:>8.2}  {:<24} {}", tick.label, tick.instant);
    }
    Ok(scale)
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let registry = ScaleRegistry::with_builtin();

    let svg = if let Some(path) = std::env::args().nth(1) {
        let file: AxisFile = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        let family = file
            .font_family
            .map_or(FontFamily::SansSerif, |name| FontFamily::Named(name.into()));
        let mut svg = svg::SvgAxes::new(family);
        let options = serde_json::to_string(&file.options)?;
        let options = if file.options.is_null() { "{}".to_owned() } else { options };
        let scale = lay_out(
            &registry,
            &path,
            &options,
            file.data,
            (file.width, file.height),
            Point::new(0.0, 0.0),
        )?;
        svg.push_axis(&path, &scale);
        svg
    } else {
        let mut svg = svg::SvgAxes::new(FontFamily::SansSerif);
        let mut y = 0.0;
        for sample in samples() {
            let origin = if sample.size.0 < sample.size.1 {
                Point::new(100.0, y)
            } else {
                Point::new(0.0, y)
            };
            let scale = lay_out(
                &registry,
                sample.caption,
                sample.options,
                sample.data,
                sample.size,
                origin,
            )?;
            svg.push_axis(sample.caption, &scale);
            y += sample.size.1.max(50.0) + 60.0;
        }
        svg
    };

    std::fs::write("chronaxis_demo.svg", svg.to_svg_string())?;
    println!("wrote chronaxis_demo.svg");
    Ok(())
}
