// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::pattern::Field;

/// Errors returned when turning text into an [`Instant`](crate::Instant).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// No built-in ISO-8601 layout accepted the input.
    #[error("`{input}` is not a recognized ISO-8601 date or date-time")]
    UnrecognizedLayout {
        /// The rejected text.
        input: String,
    },
    /// The input does not follow the requested pattern.
    #[error("`{input}` does not match pattern `{pattern}`")]
    PatternMismatch {
        /// The rejected text.
        input: String,
        /// The pattern it was parsed against.
        pattern: String,
        /// chrono's reason.
        #[source]
        source: chrono::format::ParseError,
    },
    /// The pattern contains a field that can only be formatted.
    #[error("pattern `{pattern}` uses {field:?}, which cannot be parsed")]
    UnsupportedField {
        /// The offending pattern.
        pattern: String,
        /// The first field without a parser.
        field: Field,
    },
    /// A numeric timestamp is not finite or lies outside the calendar range.
    #[error("`{input}` is not a representable Unix timestamp")]
    InvalidTimestamp {
        /// The rejected text.
        input: String,
    },
}
