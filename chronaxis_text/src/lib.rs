// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label measurement for axis density decisions.
//!
//! A time axis has to decide how many tick labels fit along its length before
//! any text is drawn. That decision only needs a width estimate per label, so
//! the scale engine depends on the small [`LabelMeasurer`] trait instead of a
//! shaping engine.
//!
//! Two measurers ship with the crate:
//! - [`HeuristicTextMeasurer`] assumes an average glyph advance in em units.
//! - [`MonospaceMeasurer`] charges a fixed advance per character.

#![no_std]

extern crate alloc;

use alloc::sync::Arc;

/// Measures single-line tick labels.
///
/// Implementations must be pure: the same text and style always yield the
/// same metrics, since the tick density search may measure a label more than
/// once per update.
pub trait LabelMeasurer {
    /// Measure `text` as one line.
    fn measure(&self, text: &str, style: &LabelStyle) -> LabelMetrics;

    /// Convenience for callers that only care about the horizontal extent.
    fn width(&self, text: &str, style: &LabelStyle) -> f64 {
        self.measure(text, style).advance_width
    }
}

impl<M: LabelMeasurer + ?Sized> LabelMeasurer for &M {
    fn measure(&self, text: &str, style: &LabelStyle) -> LabelMetrics {
        (**self).measure(text, style)
    }
}

impl<M: LabelMeasurer + ?Sized> LabelMeasurer for Arc<M> {
    fn measure(&self, text: &str, style: &LabelStyle) -> LabelMetrics {
        (**self).measure(text, style)
    }
}

/// Style inputs for tick label measurement.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelStyle {
    /// Font size in axis pixels.
    pub font_size: f64,
    /// The preferred font family.
    pub font_family: FontFamily,
}

impl LabelStyle {
    /// Creates a sans-serif style at `font_size`.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            font_family: FontFamily::SansSerif,
        }
    }

    /// Replaces the font family.
    #[must_use]
    pub fn with_family(mut self, font_family: FontFamily) -> Self {
        self.font_family = font_family;
        self
    }
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self::new(12.0)
    }
}

/// Font family selection.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// CSS `sans-serif`.
    SansSerif,
    /// CSS `monospace`.
    Monospace,
    /// A named family such as `"Helvetica Neue"`.
    Named(Arc<str>),
}

impl FontFamily {
    /// Returns the family string for CSS-style font declarations.
    #[must_use]
    pub fn as_css_family(&self) -> &str {
        match self {
            Self::SansSerif => "sans-serif",
            Self::Monospace => "monospace",
            Self::Named(name) => name,
        }
    }
}

/// Measured extent of one label.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelMetrics {
    /// Horizontal advance of the whole line.
    pub advance_width: f64,
    /// Line height.
    pub height: f64,
}

/// Estimates widths from an average glyph advance expressed in em.
///
/// The default advance is 0.6em, which is close to the mean for common
/// sans-serif faces at label sizes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeuristicTextMeasurer {
    /// Average glyph advance as a fraction of the font size.
    pub em_advance: f64,
}

impl HeuristicTextMeasurer {
    /// Creates a measurer with a custom average advance.
    #[must_use]
    pub fn with_em_advance(em_advance: f64) -> Self {
        Self { em_advance }
    }
}

impl Default for HeuristicTextMeasurer {
    fn default() -> Self {
        Self { em_advance: 0.6 }
    }
}

impl LabelMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, style: &LabelStyle) -> LabelMetrics {
        LabelMetrics {
            advance_width: self.em_advance * style.font_size * text.chars().count() as f64,
            height: style.font_size,
        }
    }
}

/// Charges a fixed pixel advance per character, ignoring the font size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMeasurer {
    /// Pixels per character.
    pub advance: f64,
}

impl MonospaceMeasurer {
    /// Creates a measurer with `advance` pixels per character.
    #[must_use]
    pub fn new(advance: f64) -> Self {
        Self { advance }
    }
}

impl LabelMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, style: &LabelStyle) -> LabelMetrics {
        LabelMetrics {
            advance_width: self.advance * text.chars().count() as f64,
            height: style.font_size,
        }
    }
}
