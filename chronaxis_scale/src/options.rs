// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time axis configuration.
//!
//! Options are plain data with builder-style `with_*` setters. They also
//! deserialize from the JSON shape charting front ends already use
//! (`camelCase` keys, `false` meaning "not set"):
//!
//! ```
//! use chronaxis_scale::{Round, ScaleOptions};
//! use chronaxis_time::TimeUnit;
//!
//! let options = ScaleOptions::from_json(
//!     r#"{"time": {"unit": "week", "round": "week", "isoWeekday": false}}"#,
//! )
//! .unwrap();
//! assert_eq!(options.time.unit, Some(TimeUnit::Week));
//! assert_eq!(options.time.round, Round::Unit(TimeUnit::Week));
//! ```

use core::fmt;
use std::sync::Arc;

use chronaxis_time::{Instant, TimeUnit, Weekday};
use hashbrown::HashMap;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::error::ScaleError;
use crate::label::default_display_format;
use crate::value::TimeValue;

/// Turns a raw value into an instant. Returning `None` skips the value.
pub type ParseFn = Arc<dyn Fn(&TimeValue) -> Option<Instant> + Send + Sync>;

/// Rewrites a formatted tick label; receives the label and the tick index.
pub type TickCallback = Arc<dyn Fn(&str, usize) -> String + Send + Sync>;

/// Which edge of the chart the axis sits on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// Horizontal, above the plot.
    Top,
    /// Horizontal, below the plot.
    #[default]
    Bottom,
    /// Vertical, left of the plot.
    Left,
    /// Vertical, right of the plot.
    Right,
}

impl Position {
    /// Top and bottom axes map time onto the width.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// How time values are parsed.
#[derive(Clone)]
pub enum TimeParser {
    /// A moment-style input pattern such as `DD/MM/YYYY HH:mm`.
    Pattern(String),
    /// A user function, trusted as is.
    Custom(ParseFn),
}

impl TimeParser {
    /// Wraps a closure.
    pub fn custom(f: impl Fn(&TimeValue) -> Option<Instant> + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }
}

impl fmt::Debug for TimeParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern(p) => f.debug_tuple("Pattern").field(p).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Rounding applied to data values and the first tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Round {
    /// No rounding (`false`).
    #[default]
    Off,
    /// Snap the first tick to the selected tick unit (`true`).
    TickUnit,
    /// Round every data value down to `unit` and snap the first tick to it.
    Unit(TimeUnit),
}

impl Serialize for Round {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Off => serializer.serialize_bool(false),
            Self::TickUnit => serializer.serialize_bool(true),
            Self::Unit(unit) => unit.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Round {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Flag(bool),
            Unit(TimeUnit),
        }
        Ok(match Option::<Repr>::deserialize(deserializer)? {
            None | Some(Repr::Flag(false)) => Self::Off,
            Some(Repr::Flag(true)) => Self::TickUnit,
            Some(Repr::Unit(unit)) => Self::Unit(unit),
        })
    }
}

/// Accepts `false`, `null` or a value.
fn false_or<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr<T> {
        Flag(bool),
        Value(T),
    }
    match Option::<Repr<T>>::deserialize(deserializer)? {
        None | Some(Repr::Flag(false)) => Ok(None),
        Some(Repr::Flag(true)) => Err(de::Error::custom(
            "expected `false` or a value, found `true`",
        )),
        Some(Repr::Value(v)) => Ok(Some(v)),
    }
}

fn parser_from_json<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<TimeParser>, D::Error> {
    Ok(false_or::<D, String>(deserializer)?.map(TimeParser::Pattern))
}

fn parser_to_json<S: Serializer>(
    parser: &Option<TimeParser>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match parser {
        Some(TimeParser::Pattern(p)) => serializer.serialize_str(p),
        _ => serializer.serialize_bool(false),
    }
}

fn parser_is_unset_or_custom(parser: &Option<TimeParser>) -> bool {
    !matches!(parser, Some(TimeParser::Pattern(_)))
}

/// Tick label options.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TickOptions {
    /// Whether tick labels are drawn.
    pub display: bool,
    /// Label font size, used for the density estimate.
    pub font_size: f64,
    /// Space reserved around each label, in pixels.
    pub padding: f64,
    /// Map the latest instant to the axis start.
    pub reverse: bool,
    /// Rewrites formatted labels.
    #[serde(skip)]
    pub callback: Option<TickCallback>,
}

impl Default for TickOptions {
    fn default() -> Self {
        Self {
            display: true,
            font_size: 12.0,
            padding: 10.0,
            reverse: false,
            callback: None,
        }
    }
}

impl fmt::Debug for TickOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickOptions")
            .field("display", &self.display)
            .field("font_size", &self.font_size)
            .field("padding", &self.padding)
            .field("reverse", &self.reverse)
            .field("callback", &self.callback.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Time-specific options.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimeOptions {
    /// Pattern or function used for every value. Takes precedence over `format`.
    #[serde(
        deserialize_with = "parser_from_json",
        serialize_with = "parser_to_json",
        skip_serializing_if = "parser_is_unset_or_custom"
    )]
    pub parser: Option<TimeParser>,
    /// Input pattern for text values when no parser is set.
    #[serde(deserialize_with = "false_or")]
    pub format: Option<String>,
    /// Tick unit; `None` selects one from the available space.
    #[serde(deserialize_with = "false_or")]
    pub unit: Option<TimeUnit>,
    /// Units per tick when `unit` is set.
    #[serde(deserialize_with = "false_or")]
    pub unit_step_size: Option<u32>,
    /// Rounding rule.
    pub round: Round,
    /// First day of week ticks, `1` (Monday) through `7` (Sunday).
    #[serde(deserialize_with = "false_or")]
    pub iso_weekday: Option<u8>,
    /// Explicit lower bound.
    #[serde(deserialize_with = "false_or")]
    pub min: Option<TimeValue>,
    /// Explicit upper bound.
    #[serde(deserialize_with = "false_or")]
    pub max: Option<TimeValue>,
    /// One pattern for every tick, overriding `display_formats`.
    #[serde(deserialize_with = "false_or")]
    pub display_format: Option<String>,
    /// Tick label pattern per unit.
    pub display_formats: HashMap<TimeUnit, String>,
    /// Pattern applied by [`TimeScale::label_for_index`](crate::TimeScale::label_for_index).
    #[serde(deserialize_with = "false_or")]
    pub tooltip_format: Option<String>,
}

impl Default for TimeOptions {
    fn default() -> Self {
        Self {
            parser: None,
            format: None,
            unit: None,
            unit_step_size: None,
            round: Round::Off,
            iso_weekday: None,
            min: None,
            max: None,
            display_format: None,
            display_formats: TimeUnit::ALL
                .into_iter()
                .map(|unit| (unit, default_display_format(unit).to_owned()))
                .collect(),
            tooltip_format: None,
        }
    }
}

impl TimeOptions {
    /// The configured ISO weekday, if it names a real weekday.
    pub fn week_anchor(&self) -> Option<Weekday> {
        self.iso_weekday.and_then(chronaxis_time::iso_weekday)
    }
}

/// Options for one time axis.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScaleOptions {
    /// Whether the axis is drawn at all.
    pub display: bool,
    /// Which chart edge the axis sits on.
    pub position: Position,
    /// Tick label options.
    pub ticks: TickOptions,
    /// Time options.
    pub time: TimeOptions,
}

impl Default for ScaleOptions {
    fn default() -> Self {
        Self {
            display: true,
            position: Position::Bottom,
            ticks: TickOptions::default(),
            time: TimeOptions::default(),
        }
    }
}

impl ScaleOptions {
    /// Deserializes options; absent keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ScaleError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Applies a JSON patch on top of `self`.
    ///
    /// Objects merge key by key, so `{"time": {"displayFormats": {"day": "YYYY-MM-DD"}}}`
    /// replaces one pattern and keeps the rest. A custom parser and the tick
    /// callback survive unless the patch sets `time.parser`.
    pub fn merge_json(&self, patch: &str) -> Result<Self, ScaleError> {
        let patch: serde_json::Value = serde_json::from_str(patch)?;
        let mut merged = serde_json::to_value(self)?;
        merge_values(&mut merged, &patch);
        let mut out: Self = serde_json::from_value(merged)?;
        if patch.pointer("/time/parser").is_none() {
            out.time.parser = self.time.parser.clone();
        }
        out.ticks.callback = self.ticks.callback.clone();
        Ok(out)
    }

    /// Sets the axis position.
    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Fixes the tick unit.
    #[must_use]
    pub fn with_unit(mut self, unit: TimeUnit) -> Self {
        self.time.unit = Some(unit);
        self
    }

    /// Sets the number of units per tick.
    #[must_use]
    pub fn with_unit_step_size(mut self, step: u32) -> Self {
        self.time.unit_step_size = Some(step);
        self
    }

    /// Sets the rounding rule.
    #[must_use]
    pub fn with_round(mut self, round: Round) -> Self {
        self.time.round = round;
        self
    }

    /// Anchors week ticks on an ISO weekday (`1` is Monday).
    #[must_use]
    pub fn with_iso_weekday(mut self, weekday: u8) -> Self {
        self.time.iso_weekday = Some(weekday);
        self
    }

    /// Sets explicit bounds.
    #[must_use]
    pub fn with_bounds(mut self, min: Option<TimeValue>, max: Option<TimeValue>) -> Self {
        self.time.min = min;
        self.time.max = max;
        self
    }

    /// Sets the parser.
    #[must_use]
    pub fn with_parser(mut self, parser: TimeParser) -> Self {
        self.time.parser = Some(parser);
        self
    }

    /// Sets the input pattern for text values.
    #[must_use]
    pub fn with_input_format(mut self, pattern: impl Into<String>) -> Self {
        self.time.format = Some(pattern.into());
        self
    }

    /// Uses one label pattern for every unit.
    #[must_use]
    pub fn with_display_format(mut self, pattern: impl Into<String>) -> Self {
        self.time.display_format = Some(pattern.into());
        self
    }

    /// Overrides the label pattern of one unit.
    #[must_use]
    pub fn with_display_format_for(mut self, unit: TimeUnit, pattern: impl Into<String>) -> Self {
        self.time.display_formats.insert(unit, pattern.into());
        self
    }

    /// Sets the tooltip pattern.
    #[must_use]
    pub fn with_tooltip_format(mut self, pattern: impl Into<String>) -> Self {
        self.time.tooltip_format = Some(pattern.into());
        self
    }

    /// Maps the latest instant to the axis start.
    #[must_use]
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.ticks.reverse = reverse;
        self
    }

    /// Sets the tick label font size.
    #[must_use]
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.ticks.font_size = font_size;
        self
    }

    /// Installs a label callback.
    #[must_use]
    pub fn with_tick_callback(
        mut self,
        callback: impl Fn(&str, usize) -> String + Send + Sync + 'static,
    ) -> Self {
        self.ticks.callback = Some(Arc::new(callback));
        self
    }
}

fn merge_values(base: &mut serde_json::Value, patch: &serde_json::Value) {
    match (base, patch) {
        (serde_json::Value::Object(base), serde_json::Value::Object(patch)) => {
            for (key, value) in patch {
                match base.get_mut(key) {
                    Some(slot) => merge_values(slot, value),
                    None => {
                        base.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (base, patch) => *base = patch.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_registered_time_scale() {
        let options = ScaleOptions::default();
        assert!(options.display);
        assert_eq!(options.position, Position::Bottom);
        assert_eq!(options.ticks.padding, 10.0);
        assert_eq!(options.ticks.font_size, 12.0);
        assert!(!options.ticks.reverse);
        assert!(options.time.parser.is_none());
        assert_eq!(options.time.unit, None);
        assert_eq!(options.time.round, Round::Off);
        assert_eq!(options.time.iso_weekday, None);
        assert_eq!(options.time.display_formats.len(), 9);
        assert_eq!(options.time.display_formats[&TimeUnit::Hour], "MMM D, hA");
        assert_eq!(options.time.display_formats[&TimeUnit::Quarter], "[Q]Q - YYYY");
    }

    #[test]
    fn false_means_unset() {
        let options = ScaleOptions::from_json(
            r#"{
                "position": "left",
                "time": {
                    "parser": false, "format": false, "unit": false, "round": false,
                    "isoWeekday": false, "displayFormat": false, "min": false
                }
            }"#,
        )
        .unwrap();
        assert_eq!(options.position, Position::Left);
        assert!(options.time.parser.is_none());
        assert_eq!(options.time.unit, None);
        assert_eq!(options.time.round, Round::Off);
        assert_eq!(options.time.min, None);
        // Unspecified maps keep their defaults.
        assert_eq!(options.time.display_formats[&TimeUnit::Day], "ll");
    }

    #[test]
    fn values_and_round_forms() {
        let options = ScaleOptions::from_json(
            r#"{"time": {"unit": "month", "unitStepSize": 2, "round": true,
                         "isoWeekday": 3, "parser": "DD/MM/YYYY",
                         "min": "2015-01-01T04:00:00", "max": 1420070400000}}"#,
        )
        .unwrap();
        assert_eq!(options.time.unit, Some(TimeUnit::Month));
        assert_eq!(options.time.unit_step_size, Some(2));
        assert_eq!(options.time.round, Round::TickUnit);
        assert_eq!(options.time.week_anchor(), Some(Weekday::Wed));
        assert!(matches!(&options.time.parser, Some(TimeParser::Pattern(p)) if p == "DD/MM/YYYY"));
        assert_eq!(options.time.min, Some(TimeValue::from("2015-01-01T04:00:00")));
        assert_eq!(options.time.max, Some(TimeValue::Number(1_420_070_400_000.0)));
        assert!(ScaleOptions::from_json(r#"{"time": {"unit": true}}"#).is_err());
        assert!(ScaleOptions::from_json(r#"{"time": {"unit": "fortnight"}}"#).is_err());
    }

    #[test]
    fn merge_overrides_one_display_format() {
        let base = ScaleOptions::default()
            .with_parser(TimeParser::custom(|_| None))
            .with_tick_callback(|label, _| label.to_uppercase());
        let merged = base
            .merge_json(
                r#"{"time": {"displayFormats": {"day": "YYYY-MM-DD"}}, "ticks": {"reverse": true}}"#,
            )
            .unwrap();
        assert_eq!(merged.time.display_formats[&TimeUnit::Day], "YYYY-MM-DD");
        assert_eq!(merged.time.display_formats[&TimeUnit::Week], "ll");
        assert!(merged.ticks.reverse);
        assert!(matches!(merged.time.parser, Some(TimeParser::Custom(_))));
        assert!(merged.ticks.callback.is_some());

        let cleared = base.merge_json(r#"{"time": {"parser": false}}"#).unwrap();
        assert!(cleared.time.parser.is_none());
    }

    #[test]
    fn builders_compose() {
        let options = ScaleOptions::default()
            .with_unit(TimeUnit::Week)
            .with_iso_weekday(8)
            .with_round(Round::Unit(TimeUnit::Week))
            .with_display_format("YYYY")
            .with_reverse(true);
        assert_eq!(options.time.unit, Some(TimeUnit::Week));
        assert_eq!(options.time.week_anchor(), None, "8 is not an ISO weekday");
        assert_eq!(options.time.display_format.as_deref(), Some("YYYY"));
        assert!(options.ticks.reverse);
    }
}
