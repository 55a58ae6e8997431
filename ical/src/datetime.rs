// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! DATE and DATE-TIME values, RFC 5545 Section 3.3.4 and 3.3.5.
//!
//! Three encodings are accepted: a date (`19970714`), a UTC date-time
//! (`19970714T173000Z`) and a floating date-time (`19970714T133000`). Floating
//! values have no zone of their own and are read as UTC.

use std::fmt;

use chumsky::Parser;
use chumsky::extra::ParserExtra;
use chumsky::prelude::*;
use jiff::Timestamp;
use jiff::civil;
use jiff::tz::TimeZone;

const UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Outcome of reading a DTSTART/DTEND value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateValue {
    /// `YYYYMMDD'T'HHMMSS'Z'`
    Utc(Timestamp),

    /// `YYYYMMDD'T'HHMMSS`
    Floating(civil::DateTime),

    /// `YYYYMMDD`
    Date(civil::Date),

    /// Anything else.
    Malformed,
}

impl DateValue {
    /// Classify and parse a raw property value.
    ///
    /// Surrounding whitespace is ignored. A value of exactly eight characters
    /// is a date, one ending in `Z` a UTC date-time, anything else a floating
    /// date-time; a value that does not parse as its class is
    /// [`DateValue::Malformed`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let clean = raw.trim();
        let parsed = if clean.chars().count() == 8 {
            value_date::<'_, &str, extra::Default>()
                .parse(clean)
                .into_result()
                .ok()
                .and_then(ValueDate::civil)
                .map(DateValue::Date)
        } else if clean.ends_with('Z') {
            value_date_time::<'_, &str, extra::Default>()
                .then_ignore(just('Z'))
                .parse(clean)
                .into_result()
                .ok()
                .and_then(ValueDateTime::civil)
                .and_then(utc_timestamp)
                .map(DateValue::Utc)
        } else {
            value_date_time::<'_, &str, extra::Default>()
                .parse(clean)
                .into_result()
                .ok()
                .and_then(ValueDateTime::civil)
                .map(DateValue::Floating)
        };
        parsed.unwrap_or(DateValue::Malformed)
    }

    /// The absolute instant, `None` if malformed.
    ///
    /// Dates resolve to midnight UTC, floating date-times to the same wall
    /// clock in UTC.
    #[must_use]
    pub fn timestamp(self) -> Option<Timestamp> {
        match self {
            DateValue::Utc(ts) => Some(ts),
            DateValue::Floating(dt) => utc_timestamp(dt),
            DateValue::Date(date) => utc_timestamp(date.to_datetime(civil::Time::midnight())),
            DateValue::Malformed => None,
        }
    }

    /// The absolute instant, or `fallback()` if there is none.
    pub fn resolve(self, fallback: impl FnOnce() -> Timestamp) -> Timestamp {
        self.timestamp().unwrap_or_else(fallback)
    }

    /// Whether the value could not be parsed.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, DateValue::Malformed)
    }
}

/// Display an instant as a UTC DATE-TIME, `YYYYMMDD'T'HHMMSS'Z'`.
///
/// Sub-second precision is truncated.
#[must_use]
pub fn format_utc(ts: Timestamp) -> impl fmt::Display {
    ts.strftime(UTC_FORMAT)
}

fn utc_timestamp(dt: civil::DateTime) -> Option<Timestamp> {
    dt.to_zoned(TimeZone::UTC).ok().map(|zoned| zoned.timestamp())
}

/// Date fields as written, before calendar validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ValueDate {
    year: i16,
    month: i8,
    day: i8,
}

impl ValueDate {
    /// Validate against the calendar.
    ///
    /// A day past the end of the month resolves to the last day of the month,
    /// so `20230231` is 2023-02-28. Year zero does not exist.
    fn civil(self) -> Option<civil::Date> {
        if self.year == 0 {
            return None;
        }
        let first = civil::Date::new(self.year, self.month, 1).ok()?;
        let day = self.day.min(first.days_in_month());
        civil::Date::new(self.year, self.month, day).ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ValueDateTime {
    date: ValueDate,
    hour: i8,
    minute: i8,
    second: i8,
}

impl ValueDateTime {
    /// `T240000` is midnight at the end of the day, i.e. the next day's start.
    fn civil(self) -> Option<civil::DateTime> {
        if self.hour == 24 {
            if self.minute != 0 || self.second != 0 {
                return None;
            }
            let next = self.date.civil()?.tomorrow().ok()?;
            return Some(next.to_datetime(civil::Time::midnight()));
        }
        let time = civil::Time::new(self.hour, self.minute, self.second, 0).ok()?;
        Some(self.date.civil()?.to_datetime(time))
    }
}

/// ```txt
/// date-value         = date-fullyear date-month date-mday
/// date-fullyear      = 4DIGIT
/// date-month         = 2DIGIT        ;01-12
/// date-mday          = 2DIGIT        ;01-31
/// ```
fn value_date<'src, I, E>() -> impl Parser<'src, I, ValueDate, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    let year = i16_0_9()
        .then(i16_0_9())
        .then(i16_0_9())
        .then(i16_0_9())
        .map(|(((a, b), c), d)| 1000 * a + 100 * b + 10 * c + d);

    let month = choice((
        just('0').ignore_then(i8_1_9()),
        just('1').ignore_then(i8_0_2()).map(|b| 10 + b),
    ));

    let day = choice((
        just('0').ignore_then(i8_1_9()),
        i8_1_2().then(i8_0_9()).map(|(a, b)| 10 * a + b),
        just('3').ignore_then(i8_0_1()).map(|b| 30 + b),
    ));

    year.then(month)
        .then(day)
        .map(|((year, month), day)| ValueDate { year, month, day })
}

/// ```txt
/// date-time    = date "T" time
/// time         = time-hour time-minute time-second
/// time-hour    = 2DIGIT        ;00-23, or 24 followed by 0000
/// time-minute  = 2DIGIT        ;00-59
/// time-second  = 2DIGIT        ;00-59
/// ```
///
/// The trailing `Z` is left to the caller. Leap seconds are not accepted.
fn value_date_time<'src, I, E>() -> impl Parser<'src, I, ValueDateTime, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    let hour = choice((
        i8_0_1().then(i8_0_9()).map(|(a, b)| 10 * a + b),
        just('2').ignore_then(i8_0_4()).map(|b| 20 + b),
    ));
    let minute = i8_0_5().then(i8_0_9()).map(|(a, b)| 10 * a + b);
    let second = i8_0_5().then(i8_0_9()).map(|(a, b)| 10 * a + b);

    value_date()
        .then_ignore(just('T'))
        .then(hour)
        .then(minute)
        .then(second)
        .map(|(((date, hour), minute), second)| ValueDateTime {
            date,
            hour,
            minute,
            second,
        })
}

macro_rules! define_digit_select {
    ($fname:ident : $ty:ty => { $($ch:literal),+ $(,)? }) => {
        #[allow(trivial_numeric_casts, clippy::cast_lossless, clippy::char_lit_as_u8, clippy::cast_possible_wrap)]
        const fn $fname<'src, I, E>() -> impl Parser<'src, I, $ty, E> + Copy
        where
            I: Input<'src, Token = char, Span = SimpleSpan>,
            E: ParserExtra<'src, I>,
        {
            select! {
                $(
                    $ch => (($ch as u8 - b'0') as $ty),
                )+
            }
        }
    };
}

define_digit_select!(i8_0_1 : i8 => { '0', '1' });
define_digit_select!(i8_0_2 : i8 => { '0', '1', '2' });
define_digit_select!(i8_0_3 : i8 => { '0', '1', '2', '3' });
define_digit_select!(i8_0_4 : i8 => { '0', '1', '2', '3', '4' });
define_digit_select!(i8_0_5 : i8 => { '0', '1', '2', '3', '4', '5' });
define_digit_select!(i8_0_9 : i8 => { '0', '1', '2', '3', '4', '5', '6', '7', '8', '9' });
define_digit_select!(i8_1_2 : i8 => { '1', '2' });
define_digit_select!(i8_1_9 : i8 => { '1', '2', '3', '4', '5', '6', '7', '8', '9' });
define_digit_select!(i16_0_9 : i16 => { '0', '1', '2', '3', '4', '5', '6', '7', '8', '9' });

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    #[test]
    fn parses_date() {
        #[rustfmt::skip]
        let success_cases = [
            ("19970714", civil::date(1997, 7, 14)),
            ("20240101", civil::date(2024, 1, 1)),
            ("20000229", civil::date(2000, 2, 29)), // leap year
            (" 20240101\t", civil::date(2024, 1, 1)),
        ];
        for (src, expected) in success_cases {
            assert_eq!(DateValue::parse(src), DateValue::Date(expected), "Failed for {src}");
        }
    }

    #[test]
    fn clamps_day_past_end_of_month() {
        assert_eq!(
            DateValue::parse("20230231"),
            DateValue::Date(civil::date(2023, 2, 28))
        );
        assert_eq!(
            DateValue::parse("20240431"),
            DateValue::Date(civil::date(2024, 4, 30))
        );
    }

    #[test]
    fn parses_utc_date_time() {
        assert_eq!(
            DateValue::parse("19980119T070000Z"),
            DateValue::Utc(ts("1998-01-19T07:00:00Z"))
        );
        assert_eq!(
            DateValue::parse("20240101T100000Z"),
            DateValue::Utc(ts("2024-01-01T10:00:00Z"))
        );
    }

    #[test]
    fn parses_floating_date_time() {
        assert_eq!(
            DateValue::parse("19970714T133000"),
            DateValue::Floating(civil::date(1997, 7, 14).at(13, 30, 0, 0))
        );
    }

    #[test]
    fn rejects_malformed_values() {
        let fail_cases = [
            "",
            "not-a-date",
            "20241301",             // invalid month
            "20240001",             // invalid month
            "20240100",             // invalid day
            "abcd1234",             // invalid characters
            "2024011",              // too short, read as date-time
            "19970714T250000",      // invalid hour
            "19970714T240100",      // hour 24 with minutes
            "19970714T240001Z",     // hour 24 with seconds
            "00000101",             // year zero
            "00000101T100000Z",     // year zero
            "19970714T126000Z",     // invalid minute
            "19970630T235960Z",     // leap second
            "19970714 133000",      // missing 'T'
            "19980119T230000-0800", // offset instead of Z
            "20240101T100000ZZ",
            "20240101T1000Z",
        ];
        for src in fail_cases {
            assert!(DateValue::parse(src).is_malformed(), "Parse {src} should fail");
        }
    }

    #[test]
    fn hour_24_is_next_midnight() {
        assert_eq!(
            DateValue::parse("20240101T240000Z"),
            DateValue::Utc(ts("2024-01-02T00:00:00Z"))
        );
        assert_eq!(
            DateValue::parse("20231231T240000"),
            DateValue::Floating(civil::date(2024, 1, 1).at(0, 0, 0, 0))
        );
        // clamped day first, then rolled over
        assert_eq!(
            DateValue::parse("20230231T240000Z"),
            DateValue::Utc(ts("2023-03-01T00:00:00Z"))
        );
    }

    #[test]
    fn accepts_year_one() {
        assert_eq!(DateValue::parse("00010101"), DateValue::Date(civil::date(1, 1, 1)));
    }

    #[test]
    fn resolves_to_utc_instants() {
        let expected = ts("2024-01-01T10:00:00Z");
        assert_eq!(DateValue::parse("20240101T100000Z").timestamp(), Some(expected));
        assert_eq!(DateValue::parse("20240101T100000").timestamp(), Some(expected));
        assert_eq!(
            DateValue::parse("20240101").timestamp(),
            Some(ts("2024-01-01T00:00:00Z"))
        );
        assert_eq!(DateValue::Malformed.timestamp(), None);
    }

    #[test]
    fn malformed_resolves_to_fallback() {
        let fallback = ts("2030-05-05T05:05:05Z");
        assert_eq!(DateValue::parse("garbage").resolve(|| fallback), fallback);
        assert_eq!(
            DateValue::parse("20240101").resolve(|| fallback),
            ts("2024-01-01T00:00:00Z")
        );
    }

    #[test]
    fn formats_utc() {
        assert_eq!(
            format_utc(ts("2024-01-01T10:00:00Z")).to_string(),
            "20240101T100000Z"
        );
        // milliseconds are truncated
        assert_eq!(
            format_utc(Timestamp::from_millisecond(1_704_103_200_999).unwrap()).to_string(),
            "20240101T100000Z"
        );
        assert_eq!(
            format_utc(Timestamp::UNIX_EPOCH).to_string(),
            "19700101T000000Z"
        );
    }

    #[test]
    fn formats_instants_before_epoch() {
        let before = Timestamp::from_millisecond(-1).unwrap();
        assert_eq!(format_utc(before).to_string(), "19691231T235959Z");
    }

    #[test]
    fn format_then_parse_is_identity_on_seconds() {
        let instant = ts("2025-07-06T23:59:59Z");
        let text = format_utc(instant).to_string();
        assert_eq!(DateValue::parse(&text), DateValue::Utc(instant));
    }
}
