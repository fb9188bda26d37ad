// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Errors surfaced by scale construction and [`TimeScale::update`](crate::TimeScale::update).
///
/// Individual unparseable labels and bounds are not errors: they are skipped
/// while the range is collected. Only configurations that leave the axis
/// without any instant reach the caller.
#[derive(Debug, thiserror::Error)]
pub enum ScaleError {
    /// No label or point resolved to an instant and no explicit bounds were configured.
    #[error("no time values could be resolved and no explicit `min`/`max` is set")]
    EmptyRange,
    /// No scale is registered under the requested key.
    #[error("no scale type is registered as `{0}`")]
    UnknownScaleType(String),
    /// Options JSON failed to deserialize.
    #[error("invalid scale options")]
    Options(#[from] serde_json::Error),
}
