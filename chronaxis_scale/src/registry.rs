// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scale types by name.

use core::fmt;

use hashbrown::HashMap;

use crate::error::ScaleError;
use crate::options::ScaleOptions;
use crate::time_scale::{SharedData, TimeScale};

/// Builds a scale from its id, options and data.
pub type ScaleConstructor = fn(String, ScaleOptions, SharedData) -> TimeScale;

#[derive(Clone)]
struct Entry {
    defaults: ScaleOptions,
    constructor: ScaleConstructor,
}

/// Registered scale types, each with its default options.
///
/// ```
/// use std::sync::Arc;
///
/// use chronaxis_scale::{ChartData, ScaleRegistry};
///
/// let registry = ScaleRegistry::with_builtin();
/// let data = ChartData::from_labels(["2015-01-01", "2015-01-05"]);
/// let mut scale = registry
///     .build_from_json("time", "x", r#"{"time": {"unit": "day"}}"#, Arc::new(data))
///     .unwrap();
/// scale.update(400.0, 30.0).unwrap();
/// assert_eq!(scale.tick_labels().first(), Some(&"Jan 1, 2015"));
/// ```
#[derive(Clone, Default)]
pub struct ScaleRegistry {
    entries: HashMap<String, Entry>,
}

impl fmt::Debug for ScaleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("ScaleRegistry")
            .field("keys", &keys)
            .finish_non_exhaustive()
    }
}

impl ScaleRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the `"time"` scale and its defaults.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register("time", ScaleOptions::default(), |id, options, data| {
            TimeScale::new(id, options, data)
        });
        registry
    }

    /// Registers `constructor` under `key`, replacing any previous entry.
    pub fn register(
        &mut self,
        key: impl Into<String>,
        defaults: ScaleOptions,
        constructor: ScaleConstructor,
    ) {
        self.entries.insert(
            key.into(),
            Entry {
                defaults,
                constructor,
            },
        );
    }

    /// Default options of `key`.
    pub fn defaults(&self, key: &str) -> Option<&ScaleOptions> {
        self.entries.get(key).map(|e| &e.defaults)
    }

    /// Builds a `key` scale with explicit options.
    pub fn build(
        &self,
        key: &str,
        id: impl Into<String>,
        options: ScaleOptions,
        data: SharedData,
    ) -> Result<TimeScale, ScaleError> {
        let entry = self.entry(key)?;
        Ok((entry.constructor)(id.into(), options, data))
    }

    /// Builds a `key` scale with `patch` merged over its defaults.
    pub fn build_from_json(
        &self,
        key: &str,
        id: impl Into<String>,
        patch: &str,
        data: SharedData,
    ) -> Result<TimeScale, ScaleError> {
        let entry = self.entry(key)?;
        let options = entry.defaults.merge_json(patch)?;
        Ok((entry.constructor)(id.into(), options, data))
    }

    fn entry(&self, key: &str) -> Result<&Entry, ScaleError> {
        self.entries
            .get(key)
            .ok_or_else(|| ScaleError::UnknownScaleType(key.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chronaxis_time::TimeUnit;

    use super::*;
    use crate::options::Position;
    use crate::value::ChartData;

    #[test]
    fn time_is_registered_with_defaults() {
        let registry = ScaleRegistry::with_builtin();
        let defaults = registry.defaults("time").unwrap();
        assert!(defaults.display);
        assert_eq!(defaults.position, Position::Bottom);
        assert_eq!(defaults.ticks.padding, 10.0);
        assert_eq!(defaults.ticks.font_size, 12.0);
        assert!(!defaults.ticks.reverse);
        assert_eq!(defaults.time.unit, None);
        assert_eq!(
            defaults.time.display_formats.get(&TimeUnit::Quarter).map(String::as_str),
            Some("[Q]Q - YYYY")
        );
        assert!(registry.defaults("linear").is_none());
    }

    #[test]
    fn unknown_keys_are_errors() {
        let registry = ScaleRegistry::with_builtin();
        let data = Arc::new(ChartData::default());
        assert!(matches!(
            registry.build("logarithmic", "y", ScaleOptions::default(), data.clone()),
            Err(ScaleError::UnknownScaleType(key)) if key == "logarithmic"
        ));
        assert!(matches!(
            registry.build_from_json("time", "x", "{not json", data),
            Err(ScaleError::Options(_))
        ));
    }

    #[test]
    fn json_patch_overrides_only_named_fields() {
        let registry = ScaleRegistry::with_builtin();
        let scale = registry
            .build_from_json(
                "time",
                "x",
                r#"{"position": "left", "time": {"displayFormats": {"day": "DD"}}}"#,
                Arc::new(ChartData::default()),
            )
            .unwrap();
        assert_eq!(scale.id(), "x");
        let options = scale.options();
        assert_eq!(options.position, Position::Left);
        assert_eq!(
            options.time.display_formats.get(&TimeUnit::Day).map(String::as_str),
            Some("DD")
        );
        assert_eq!(
            options.time.display_formats.get(&TimeUnit::Month).map(String::as_str),
            Some("MMM YYYY")
        );
    }
}
