// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw value to instant resolution.

use chronaxis_time::{Calendar, Instant};
use tracing::debug;

use crate::options::{TimeOptions, TimeParser};
use crate::value::TimeValue;

/// Resolves one raw value, returning `None` when it cannot be understood.
///
/// The order is:
/// 1. a parser pattern parses the value's text (numbers included),
/// 2. a custom parser is trusted as is,
/// 3. numbers are Unix milliseconds and instants pass through,
/// 4. text is parsed with `format` when set, else as ISO-8601.
pub fn resolve(raw: &TimeValue, options: &TimeOptions, calendar: &dyn Calendar) -> Option<Instant> {
    let resolved = match (&options.parser, raw) {
        (Some(TimeParser::Pattern(pattern)), _) => {
            calendar.parse(&raw.to_string(), Some(pattern)).ok()
        }
        (Some(TimeParser::Custom(parse)), _) => parse(raw),
        (None, TimeValue::Number(ms)) => Instant::from_unix_millis_f64(*ms),
        (None, TimeValue::Instant(t)) => Some(*t),
        (None, TimeValue::Text(text)) => calendar.parse(text, options.format.as_deref()).ok(),
    };
    if resolved.is_none() {
        debug!(value = %raw, "skipping unresolvable time value");
    }
    resolved
}

#[cfg(test)]
mod tests {
    use chronaxis_time::NaiveCalendar;

    use super::*;

    const CAL: NaiveCalendar = NaiveCalendar::new();

    #[test]
    fn iso_text_numbers_and_instants() {
        let options = TimeOptions::default();
        let expected = Instant::from_ymd_hms(2015, 1, 1, 20, 0, 0);
        assert_eq!(resolve(&"2015-01-01T20:00:00".into(), &options, &CAL), expected);
        let ms = expected.unwrap().unix_millis() as f64;
        assert_eq!(resolve(&ms.into(), &options, &CAL), expected);
        assert_eq!(resolve(&expected.unwrap().into(), &options, &CAL), expected);
        assert_eq!(resolve(&"yesterday-ish".into(), &options, &CAL), None);
        assert_eq!(resolve(&f64::NAN.into(), &options, &CAL), None);
    }

    #[test]
    fn input_format_applies_to_text_only() {
        let options = TimeOptions {
            format: Some("DD/MM/YYYY HH:mm".into()),
            ..TimeOptions::default()
        };
        assert_eq!(
            resolve(&"01/01/2015 12:00".into(), &options, &CAL),
            Instant::from_ymd_hms(2015, 1, 1, 12, 0, 0)
        );
        assert_eq!(resolve(&"2015-01-01".into(), &options, &CAL), None);
        assert_eq!(
            resolve(&0.0.into(), &options, &CAL),
            Instant::from_ymd(1970, 1, 1)
        );
    }

    #[test]
    fn parser_pattern_sees_numbers_as_text() {
        let options = TimeOptions {
            parser: Some(TimeParser::Pattern("X".into())),
            ..TimeOptions::default()
        };
        assert_eq!(
            resolve(&375_068_900.0.into(), &options, &CAL),
            Instant::from_unix_millis(375_068_900_000)
        );
    }

    #[test]
    fn custom_parser_is_trusted() {
        let options = TimeOptions {
            parser: Some(TimeParser::custom(|raw| match raw {
                TimeValue::Number(secs) => Instant::from_unix_millis_f64(secs * 1000.0),
                _ => None,
            })),
            format: Some("this pattern is ignored".into()),
            ..TimeOptions::default()
        };
        assert_eq!(
            resolve(&375_068_900.0.into(), &options, &CAL),
            Instant::from_unix_millis(375_068_900_000)
        );
        assert_eq!(resolve(&"2015-01-01".into(), &options, &CAL), None);
    }
}
