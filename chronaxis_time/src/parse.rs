// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text to [`Instant`] conversion.

use chrono::format::{self, Parsed, StrftimeItems};
use chrono::{DateTime, NaiveDateTime, NaiveTime};

use crate::error::ParseError;
use crate::instant::Instant;
use crate::pattern::{Field, Pattern};

// Tried in order after RFC 3339. `%.f` also accepts a missing fraction.
const ISO_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d",
    "%Y-%m",
    "%Y%m%d",
];

/// Parses the common ISO-8601 shapes: `2015-01-10`, `2015-01-10T12:00`,
/// `2015-01-01T20:00:00.123`, `2015-01-01 20:00:00` and RFC 3339 with an
/// offset. Offsets are applied, yielding UTC wall-clock time.
pub fn parse_iso(text: &str) -> Result<Instant, ParseError> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(Instant::new(dt.naive_utc()));
    }
    ISO_LAYOUTS
        .iter()
        .find_map(|layout| parse_layout(text, layout).ok())
        .map(Instant::new)
        .ok_or_else(|| ParseError::UnrecognizedLayout {
            input: text.to_owned(),
        })
}

/// Parses `text` with a moment-style `pattern` such as `DD/MM/YYYY HH:mm`.
///
/// Fields missing from the pattern start at their unit boundary: a pattern
/// without a day parses to the first of the month, one without an hour to
/// midnight. A pattern that is only `X` or `x` reads a Unix timestamp in
/// seconds or milliseconds.
pub fn parse_with_pattern(text: &str, pattern: &str) -> Result<Instant, ParseError> {
    let text = text.trim();
    let compiled = Pattern::compile(pattern);
    let scale = match compiled.single_field() {
        Some(Field::UnixSeconds) => Some(1_000.0),
        Some(Field::UnixMillis) => Some(1.0),
        _ => None,
    };
    if let Some(scale) = scale {
        return text
            .parse::<f64>()
            .ok()
            .and_then(|v| Instant::from_unix_millis_f64(v * scale))
            .ok_or_else(|| ParseError::InvalidTimestamp {
                input: text.to_owned(),
            });
    }
    let layout = compiled
        .to_strftime()
        .map_err(|field| ParseError::UnsupportedField {
            pattern: pattern.to_owned(),
            field,
        })?;
    parse_layout(text, &layout)
        .map(Instant::new)
        .map_err(|source| ParseError::PatternMismatch {
            input: text.to_owned(),
            pattern: pattern.to_owned(),
            source,
        })
}

fn parse_layout(text: &str, layout: &str) -> Result<NaiveDateTime, format::ParseError> {
    let mut parsed = Parsed::new();
    format::parse(&mut parsed, text, StrftimeItems::new(layout))?;
    // Setters fail without effect when the layout already provided the field.
    let _ = parsed.set_month(1);
    let _ = parsed.set_day(1);
    let _ = parsed.set_minute(0);
    let date = parsed.to_naive_date()?;
    let time = parsed.to_naive_time().unwrap_or(NaiveTime::MIN);
    Ok(date.and_time(time))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd_hms(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Instant {
        Instant::from_ymd_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn iso_layouts() {
        assert_eq!(parse_iso("2015-01-01T20:00:00").unwrap(), ymd_hms(2015, 1, 1, 20, 0, 0));
        assert_eq!(parse_iso("2015-01-10T12:00").unwrap(), ymd_hms(2015, 1, 10, 12, 0, 0));
        assert_eq!(parse_iso("2016-05-27").unwrap(), ymd_hms(2016, 5, 27, 0, 0, 0));
        assert_eq!(parse_iso(" 2015-01-02 03:04:05 ").unwrap(), ymd_hms(2015, 1, 2, 3, 4, 5));
        assert_eq!(parse_iso("2015-07").unwrap(), ymd_hms(2015, 7, 1, 0, 0, 0));
        assert_eq!(parse_iso("20150304").unwrap(), ymd_hms(2015, 3, 4, 0, 0, 0));
    }

    #[test]
    fn iso_fraction_and_offset() {
        let t = parse_iso("2015-01-01T20:00:00.250").unwrap();
        assert_eq!(t.unix_millis() % 1000, 250);
        assert_eq!(
            parse_iso("2015-01-01T20:00:00+02:00").unwrap(),
            ymd_hms(2015, 1, 1, 18, 0, 0)
        );
    }

    #[test]
    fn iso_rejects_garbage() {
        assert!(matches!(
            parse_iso("not a date"),
            Err(ParseError::UnrecognizedLayout { .. })
        ));
        assert!(parse_iso("2015-13-01").is_err());
    }

    #[test]
    fn pattern_parsing() {
        assert_eq!(
            parse_with_pattern("27/05/2016 14:30", "DD/MM/YYYY HH:mm").unwrap(),
            ymd_hms(2016, 5, 27, 14, 30, 0)
        );
        assert_eq!(
            parse_with_pattern("Jan 4, 2015", "MMM D, YYYY").unwrap(),
            ymd_hms(2015, 1, 4, 0, 0, 0)
        );
        assert_eq!(
            parse_with_pattern("3 2015 8 PM", "M YYYY h A").unwrap(),
            ymd_hms(2015, 3, 1, 20, 0, 0)
        );
    }

    #[test]
    fn unix_patterns() {
        assert_eq!(
            parse_with_pattern("375095287", "X").unwrap(),
            ymd_hms(1981, 11, 20, 9, 8, 7)
        );
        assert_eq!(
            parse_with_pattern("375095287000", "x").unwrap(),
            ymd_hms(1981, 11, 20, 9, 8, 7)
        );
        assert!(matches!(
            parse_with_pattern("soon", "X"),
            Err(ParseError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn pattern_errors() {
        assert!(matches!(
            parse_with_pattern("Q1 2015", "[Q]Q YYYY"),
            Err(ParseError::UnsupportedField { field: Field::Quarter, .. })
        ));
        let err = parse_with_pattern("2015/01/01", "DD-MM-YYYY").unwrap_err();
        assert!(matches!(err, ParseError::PatternMismatch { .. }));
        assert!(err.to_string().contains("DD-MM-YYYY"));
    }
}
