//! Value type parsers for iCalendar (RFC 5545 §3.3).

use chrono::{NaiveDate, NaiveTime, TimeDelta};

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::ical::core::{Moment, Zone};

/// Parses an ASCII-digit field, rejecting signs and whitespace that
/// `str::parse` would otherwise accept.
fn digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Parses a DATE value (RFC 5545 §3.3.4).
///
/// Format: YYYYMMDD (e.g., "19970714")
///
/// ## Errors
/// Returns an error if the string is not a valid calendar date.
pub fn parse_date(s: &str, line: usize, col: usize) -> ParseResult<NaiveDate> {
    let invalid = || ParseError::bad_value(ParseErrorKind::InvalidDate, s, line, col);

    if s.len() != 8 {
        return Err(invalid());
    }
    let year = s.get(0..4).and_then(digits).ok_or_else(invalid)?;
    let month = s.get(4..6).and_then(digits).ok_or_else(invalid)?;
    let day = s.get(6..8).and_then(digits).ok_or_else(invalid)?;

    i32::try_from(year)
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, month, day))
        .ok_or_else(invalid)
}

/// Parses a TIME value without its UTC marker (RFC 5545 §3.3.12).
fn parse_time(s: &str, line: usize, col: usize) -> ParseResult<NaiveTime> {
    let invalid = || ParseError::bad_value(ParseErrorKind::InvalidTime, s, line, col);

    if s.len() != 6 {
        return Err(invalid());
    }
    let hour = s.get(0..2).and_then(digits).ok_or_else(invalid)?;
    let minute = s.get(2..4).and_then(digits).ok_or_else(invalid)?;
    // A leap second (60) is clamped to 59.
    let second = s.get(4..6).and_then(digits).ok_or_else(invalid)?.min(59);

    NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(invalid)
}

/// Parses a DATE-TIME value (RFC 5545 §3.3.5).
///
/// Format: YYYYMMDD"T"HHMMSS[Z]. A trailing `Z` yields a UTC moment,
/// otherwise `tzid` (from the property's TZID parameter) names the zone,
/// otherwise the moment is floating.
///
/// ## Errors
/// Returns an error if the string is not a valid date-time.
pub fn parse_datetime(s: &str, tzid: Option<&str>, line: usize, col: usize) -> ParseResult<Moment> {
    let (date_str, time_str) = s.split_once(['T', 't']).ok_or_else(|| ParseError::bad_value(ParseErrorKind::InvalidDateTime, s, line, col))?;

    let (time_str, zone) = match time_str.strip_suffix(['Z', 'z']) {
        Some(stripped) => (stripped, Zone::Utc),
        None => (
            time_str,
            tzid.map_or(Zone::Floating, |tz| Zone::Named(tz.to_string())),
        ),
    };

    let date = parse_date(date_str, line, col)?;
    let time = parse_time(time_str, line, col + date_str.len() + 1)?;

    Ok(Moment::DateTime {
        value: date.and_time(time),
        zone,
    })
}

/// Parses a DURATION value (RFC 5545 §3.3.6).
///
/// Format: `[+/-]P(nW | [nD][T[nH][nM][nS]])`
///
/// ## Errors
/// Returns an error on a missing `P`, a unit without a number, a time unit
/// outside the `T` section, or an empty duration.
pub fn parse_duration(s: &str, line: usize, col: usize) -> ParseResult<TimeDelta> {
    let invalid = || ParseError::bad_value(ParseErrorKind::InvalidDuration, s, line, col);

    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let body = rest.strip_prefix(['P', 'p']).ok_or_else(invalid)?;

    let mut seconds: i64 = 0;
    let mut number: Option<i64> = None;
    let mut in_time = false;
    let mut saw_component = false;

    for c in body.chars() {
        if let Some(d) = c.to_digit(10) {
            let acc = number.unwrap_or(0);
            number = Some(
                acc.checked_mul(10)
                    .and_then(|n| n.checked_add(i64::from(d)))
                    .ok_or_else(invalid)?,
            );
            continue;
        }

        let unit = match (c.to_ascii_uppercase(), in_time) {
            ('T', false) if number.is_none() => {
                in_time = true;
                continue;
            }
            ('W', false) => 7 * 86_400,
            ('D', false) => 86_400,
            ('H', true) => 3_600,
            ('M', true) => 60,
            ('S', true) => 1,
            _ => return Err(invalid()),
        };
        let value = number.take().ok_or_else(invalid)?;
        seconds = value
            .checked_mul(unit)
            .and_then(|v| seconds.checked_add(v))
            .ok_or_else(invalid)?;
        saw_component = true;
    }

    if number.is_some() || !saw_component {
        return Err(invalid());
    }

    let delta = TimeDelta::try_seconds(seconds).ok_or_else(invalid)?;
    Ok(if negative { -delta } else { delta })
}

/// Unescapes a TEXT value (RFC 5545 §3.3.11).
///
/// Handles `\n`/`\N`, `\,`, `\;` and `\\`; unknown escapes are preserved.
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => result.push('\n'),
            Some(',') => result.push(','),
            Some(';') => result.push(';'),
            Some('\\') | None => result.push('\\'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
        }
    }

    result
}
