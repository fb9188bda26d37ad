// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Moment-style display patterns.
//!
//! Axis configuration describes labels with patterns such as `MMM D, hA` or
//! `[Q]Q - YYYY`. A [`Pattern`] is the tokenized form of such a string. It can
//! render an instant directly, and it can be lowered to a chrono `strftime`
//! layout for parsing when every field has a chrono equivalent.
//!
//! Supported fields:
//!
//! | token | output |
//! |-------|--------|
//! | `YYYY` `YY` | year, two-digit year |
//! | `Q` | quarter `1..=4` |
//! | `M` `MM` `MMM` `MMMM` | month number, padded, short name, long name |
//! | `D` `DD` `Do` | day of month, padded, ordinal (`1st`) |
//! | `d` `dd` `ddd` `dddd` | weekday number (Sunday is 0), min, short, long name |
//! | `H` `HH` `h` `hh` | 24h hour, padded, 12h hour, padded |
//! | `m` `mm` `s` `ss` | minute and second, plain and padded |
//! | `S`..`SSSSSSSSS` | fractional second digits |
//! | `a` `A` | `am`/`pm`, `AM`/`PM` |
//! | `W` `WW` | ISO week number |
//! | `X` `x` | Unix seconds, Unix milliseconds |
//!
//! The English long-date shorthands `LT LTS L l LL ll LLL lll LLLL llll`
//! expand to their field sequences. Text inside `[...]` and any character
//! after `\` is copied literally.

use core::fmt::Write as _;

use chrono::{Datelike, NaiveDateTime, Timelike};

/// A single formattable field of a [`Pattern`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    /// `YYYY`
    Year,
    /// `YY`
    YearShort,
    /// `Q`
    Quarter,
    /// `M`
    Month,
    /// `MM`
    MonthPadded,
    /// `MMM`
    MonthShort,
    /// `MMMM`
    MonthLong,
    /// `D`
    Day,
    /// `DD`
    DayPadded,
    /// `Do`
    DayOrdinal,
    /// `d`
    WeekdayNumber,
    /// `dd`
    WeekdayMin,
    /// `ddd`
    WeekdayShort,
    /// `dddd`
    WeekdayLong,
    /// `H`
    Hour,
    /// `HH`
    HourPadded,
    /// `h`
    Hour12,
    /// `hh`
    Hour12Padded,
    /// `m`
    Minute,
    /// `mm`
    MinutePadded,
    /// `s`
    Second,
    /// `ss`
    SecondPadded,
    /// `S` repeated; the payload is the digit count (`1..=9`).
    Fraction(u8),
    /// `a`
    MeridiemLower,
    /// `A`
    MeridiemUpper,
    /// `W`
    IsoWeek,
    /// `WW`
    IsoWeekPadded,
    /// `X`
    UnixSeconds,
    /// `x`
    UnixMillis,
}

/// One element of a compiled [`Pattern`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// Text copied to the output unchanged.
    Literal(String),
    /// A date or time field.
    Field(Field),
}

const MONTHS_LONG: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// Indexed by days from Sunday.
const WEEKDAYS_LONG: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];
const WEEKDAYS_SHORT: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const WEEKDAYS_MIN: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

// Longest names first so prefixes never shadow a longer token.
const LOCALIZED: &[(&str, &str)] = &[
    ("LLLL", "dddd, MMMM D, YYYY h:mm A"),
    ("llll", "ddd, MMM D, YYYY h:mm A"),
    ("LTS", "h:mm:ss A"),
    ("LLL", "MMMM D, YYYY h:mm A"),
    ("lll", "MMM D, YYYY h:mm A"),
    ("LL", "MMMM D, YYYY"),
    ("ll", "MMM D, YYYY"),
    ("LT", "h:mm A"),
    ("L", "MM/DD/YYYY"),
    ("l", "M/D/YYYY"),
];

const FIELDS: &[(&str, Field)] = &[
    ("YYYY", Field::Year),
    ("MMMM", Field::MonthLong),
    ("dddd", Field::WeekdayLong),
    ("MMM", Field::MonthShort),
    ("ddd", Field::WeekdayShort),
    ("YY", Field::YearShort),
    ("MM", Field::MonthPadded),
    ("Do", Field::DayOrdinal),
    ("DD", Field::DayPadded),
    ("dd", Field::WeekdayMin),
    ("HH", Field::HourPadded),
    ("hh", Field::Hour12Padded),
    ("mm", Field::MinutePadded),
    ("ss", Field::SecondPadded),
    ("WW", Field::IsoWeekPadded),
    ("Q", Field::Quarter),
    ("M", Field::Month),
    ("D", Field::Day),
    ("d", Field::WeekdayNumber),
    ("H", Field::Hour),
    ("h", Field::Hour12),
    ("m", Field::Minute),
    ("s", Field::Second),
    ("a", Field::MeridiemLower),
    ("A", Field::MeridiemUpper),
    ("W", Field::IsoWeek),
    ("X", Field::UnixSeconds),
    ("x", Field::UnixMillis),
];

/// A tokenized display pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    tokens: Vec<Token>,
}

impl Pattern {
    /// Tokenizes `src`. Every input is accepted; unknown characters are literals.
    pub fn compile(src: &str) -> Self {
        let mut tokens = Vec::new();
        tokenize(src, &mut tokens);
        Self { tokens }
    }

    /// The compiled tokens.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Returns the field if the pattern is exactly one field and nothing else.
    pub fn single_field(&self) -> Option<Field> {
        match self.tokens.as_slice() {
            [Token::Field(field)] => Some(*field),
            _ => None,
        }
    }

    /// Renders `t`.
    pub fn format(&self, t: NaiveDateTime) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Field(field) => write_field(&mut out, *field, t),
            }
        }
        out
    }

    /// Lowers the pattern to a chrono `strftime` layout for parsing.
    ///
    /// Returns the first field chrono cannot parse as the error.
    pub fn to_strftime(&self) -> Result<String, Field> {
        let mut layout = String::new();
        for token in &self.tokens {
            match token {
                Token::Literal(text) => {
                    for c in text.chars() {
                        if c == '%' {
                            layout.push_str("%%");
                        } else {
                            layout.push(c);
                        }
                    }
                }
                Token::Field(field) => layout.push_str(strftime_field(*field).ok_or(*field)?),
            }
        }
        Ok(layout)
    }
}

fn tokenize(src: &str, out: &mut Vec<Token>) {
    let mut rest = src;
    while let Some(c) = rest.chars().next() {
        if c == '[' && let Some(end) = rest.find(']') {
            push_literal(out, &rest[1..end]);
            rest = &rest[end + 1..];
            continue;
        }
        if c == '\\' && let Some(escaped) = rest[1..].chars().next() {
            let len = escaped.len_utf8();
            push_literal(out, &rest[1..1 + len]);
            rest = &rest[1 + len..];
            continue;
        }
        if let Some((name, expansion)) = LOCALIZED.iter().find(|(name, _)| rest.starts_with(name)) {
            tokenize(expansion, out);
            rest = &rest[name.len()..];
            continue;
        }
        if c == 'S' {
            let run = rest.bytes().take_while(|b| *b == b'S').count().min(9);
            out.push(Token::Field(Field::Fraction(u8::try_from(run).unwrap_or(9))));
            rest = &rest[run..];
            continue;
        }
        if let Some((name, field)) = FIELDS.iter().find(|(name, _)| rest.starts_with(name)) {
            out.push(Token::Field(*field));
            rest = &rest[name.len()..];
            continue;
        }
        let len = c.len_utf8();
        push_literal(out, &rest[..len]);
        rest = &rest[len..];
    }
}

fn push_literal(out: &mut Vec<Token>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Token::Literal(prev)) = out.last_mut() {
        prev.push_str(text);
    } else {
        out.push(Token::Literal(text.to_owned()));
    }
}

fn ordinal_suffix(n: u32) -> &'static str {
    if (11..=13).contains(&(n % 100)) {
        return "th";
    }
    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

fn write_field(out: &mut String, field: Field, t: NaiveDateTime) {
    let month0 = t.month0() as usize;
    let weekday = t.weekday().num_days_from_sunday() as usize;
    let hour12 = match t.hour() % 12 {
        0 => 12,
        h => h,
    };
    // Writing into a `String` cannot fail.
    let _ = match field {
        Field::Year => write!(out, "{:04}", t.year()),
        Field::YearShort => write!(out, "{:02}", t.year().rem_euclid(100)),
        Field::Quarter => write!(out, "{}", t.month0() / 3 + 1),
        Field::Month => write!(out, "{}", t.month()),
        Field::MonthPadded => write!(out, "{:02}", t.month()),
        Field::MonthShort => write!(out, "{}", MONTHS_SHORT[month0]),
        Field::MonthLong => write!(out, "{}", MONTHS_LONG[month0]),
        Field::Day => write!(out, "{}", t.day()),
        Field::DayPadded => write!(out, "{:02}", t.day()),
        Field::DayOrdinal => write!(out, "{}{}", t.day(), ordinal_suffix(t.day())),
        Field::WeekdayNumber => write!(out, "{weekday}"),
        Field::WeekdayMin => write!(out, "{}", WEEKDAYS_MIN[weekday]),
        Field::WeekdayShort => write!(out, "{}", WEEKDAYS_SHORT[weekday]),
        Field::WeekdayLong => write!(out, "{}", WEEKDAYS_LONG[weekday]),
        Field::Hour => write!(out, "{}", t.hour()),
        Field::HourPadded => write!(out, "{:02}", t.hour()),
        Field::Hour12 => write!(out, "{hour12}"),
        Field::Hour12Padded => write!(out, "{hour12:02}"),
        Field::Minute => write!(out, "{}", t.minute()),
        Field::MinutePadded => write!(out, "{:02}", t.minute()),
        Field::Second => write!(out, "{}", t.second()),
        Field::SecondPadded => write!(out, "{:02}", t.second()),
        Field::Fraction(digits) => {
            // Leap seconds are folded into the nanosecond field past 1e9.
            let nanos = format!("{:09}", t.nanosecond() % 1_000_000_000);
            write!(out, "{}", &nanos[..usize::from(digits.clamp(1, 9))])
        }
        Field::MeridiemLower => write!(out, "{}", if t.hour() < 12 { "am" } else { "pm" }),
        Field::MeridiemUpper => write!(out, "{}", if t.hour() < 12 { "AM" } else { "PM" }),
        Field::IsoWeek => write!(out, "{}", t.iso_week().week()),
        Field::IsoWeekPadded => write!(out, "{:02}", t.iso_week().week()),
        Field::UnixSeconds => write!(out, "{}", t.and_utc().timestamp()),
        Field::UnixMillis => write!(out, "{}", t.and_utc().timestamp_millis()),
    };
}

fn strftime_field(field: Field) -> Option<&'static str> {
    Some(match field {
        Field::Year => "%Y",
        Field::YearShort => "%y",
        Field::Month | Field::MonthPadded => "%m",
        Field::MonthShort => "%b",
        Field::MonthLong => "%B",
        Field::Day | Field::DayPadded => "%d",
        Field::WeekdayNumber => "%w",
        Field::WeekdayShort => "%a",
        Field::WeekdayLong => "%A",
        Field::Hour | Field::HourPadded => "%H",
        Field::Hour12 | Field::Hour12Padded => "%I",
        Field::Minute | Field::MinutePadded => "%M",
        Field::Second | Field::SecondPadded => "%S",
        Field::Fraction(3) => "%3f",
        Field::Fraction(6) => "%6f",
        Field::Fraction(9) => "%9f",
        Field::MeridiemLower | Field::MeridiemUpper => "%p",
        Field::IsoWeek | Field::IsoWeekPadded => "%V",
        Field::Quarter
        | Field::DayOrdinal
        | Field::WeekdayMin
        | Field::Fraction(_)
        | Field::UnixSeconds
        | Field::UnixMillis => return None,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, ms: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_milli_opt(h, mi, s, ms)
            .unwrap()
    }

    fn fmt(pattern: &str, t: NaiveDateTime) -> String {
        Pattern::compile(pattern).format(t)
    }

    #[test]
    fn default_axis_formats() {
        let t = at(2015, 1, 1, 20, 0, 0, 0);
        assert_eq!(fmt("h:mm:ss.SSS a", t), "8:00:00.000 pm");
        assert_eq!(fmt("h:mm:ss a", t), "8:00:00 pm");
        assert_eq!(fmt("MMM D, hA", t), "Jan 1, 8PM");
        assert_eq!(fmt("ll", t), "Jan 1, 2015");
        assert_eq!(fmt("MMM YYYY", t), "Jan 2015");
        assert_eq!(fmt("[Q]Q - YYYY", t), "Q1 - 2015");
        assert_eq!(fmt("YYYY", t), "2015");
    }

    #[test]
    fn midnight_and_noon_use_twelve() {
        assert_eq!(fmt("h A", at(2015, 1, 1, 0, 0, 0, 0)), "12 AM");
        assert_eq!(fmt("hh a", at(2015, 1, 1, 12, 5, 0, 0)), "12 pm");
        assert_eq!(fmt("HH:mm", at(2015, 1, 1, 7, 5, 0, 0)), "07:05");
    }

    #[test]
    fn ordinals_weekdays_and_long_dates() {
        let t = at(2015, 1, 1, 20, 0, 0, 0);
        assert_eq!(fmt("LLLL", t), "Thursday, January 1, 2015 8:00 PM");
        assert_eq!(fmt("llll", t), "Thu, Jan 1, 2015 8:00 PM");
        assert_eq!(fmt("L", t), "01/01/2015");
        assert_eq!(fmt("dd d", t), "Th 4");
        for (day, expected) in [(1, "1st"), (2, "2nd"), (3, "3rd"), (11, "11th"), (22, "22nd")] {
            assert_eq!(fmt("Do", at(2015, 3, day, 0, 0, 0, 0)), expected);
        }
    }

    #[test]
    fn escapes_and_fraction_widths() {
        let t = at(2016, 5, 27, 1, 2, 3, 456);
        assert_eq!(fmt("[YYYY] YYYY", t), "YYYY 2016");
        assert_eq!(fmt("\\Q Q", t), "Q 2");
        assert_eq!(fmt("S SS SSSSSS", t), "4 45 456000");
        assert_eq!(fmt("x", t), t.and_utc().timestamp_millis().to_string());
    }

    #[test]
    fn adjacent_literals_merge() {
        let p = Pattern::compile("[at] , YYYY");
        assert_eq!(
            p.tokens(),
            &[Token::Literal("at , ".into()), Token::Field(Field::Year)]
        );
        assert_eq!(Pattern::compile("X").single_field(), Some(Field::UnixSeconds));
    }

    #[test]
    fn strftime_lowering() {
        let p = Pattern::compile("DD/MM/YYYY HH:mm:ss.SSS A");
        assert_eq!(p.to_strftime().unwrap(), "%d/%m/%Y %H:%M:%S.%3f %p");
        assert_eq!(Pattern::compile("100% YYYY").to_strftime().unwrap(), "100%% %Y");
        assert_eq!(Pattern::compile("[Q]Q").to_strftime(), Err(Field::Quarter));
    }
}
