//! Extraction of event records from a parsed calendar.

use chrono::{Days, NaiveTime, TimeDelta};

use super::core::{Component, ICalendar, Moment, Property, names};
use super::parse::{ParseError, ParseErrorKind, parse};
use crate::error::RfcResult;

/// Recurrence data attached to an event.
///
/// Only present when the event carries at least one `RRULE`; exclusion rules
/// and dates on their own do not make an event recurring.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecurrenceSpec {
    /// `RRULE` values, verbatim.
    pub rules: Vec<String>,
    /// `EXRULE` values, verbatim.
    pub exclusion_rules: Vec<String>,
    /// `RDATE` moments.
    pub extra_dates: Vec<Moment>,
    /// `EXDATE` moments.
    pub excluded_dates: Vec<Moment>,
}

/// One VEVENT as decoded from a source.
///
/// `end` follows the source convention: exclusive for all-day events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub uid: Option<String>,
    pub start: Moment,
    pub end: Moment,
    pub recurrence: Option<RecurrenceSpec>,
    /// Empty when the event has no SUMMARY.
    pub summary: String,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl EventRecord {
    /// Creates a non-recurring event with no location or description.
    #[must_use]
    pub fn new(summary: impl Into<String>, start: Moment, end: Moment) -> Self {
        Self {
            uid: None,
            start,
            end,
            recurrence: None,
            summary: summary.into(),
            location: None,
            description: None,
        }
    }

    /// Wall-clock length of the event (`end - start`).
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end.naive() - self.start.naive()
    }

    #[must_use]
    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }
}

/// Decodes every VEVENT in a calendar document, in document order.
///
/// VEVENTs nested below other components are included.
///
/// ## Errors
/// Returns an error if the document fails to parse or any VEVENT lacks a
/// DTSTART. A single bad event fails the whole document.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn decode_events(input: &str) -> RfcResult<Vec<EventRecord>> {
    let calendar = parse(input)?;
    let records = events_from_calendar(&calendar)?;
    tracing::debug!(count = records.len(), "Decoded events");
    Ok(records)
}

/// Builds event records from an already parsed calendar.
///
/// ## Errors
/// Returns `MissingRequiredProperty` if a VEVENT has no DTSTART.
pub fn events_from_calendar(calendar: &ICalendar) -> RfcResult<Vec<EventRecord>> {
    calendar
        .events()
        .into_iter()
        .map(|component| event_from_component(component).map_err(Into::into))
        .collect()
}

fn event_from_component(component: &Component) -> Result<EventRecord, ParseError> {
    let start = component
        .get_property(names::DTSTART)
        .and_then(Property::as_moment)
        .cloned()
        .ok_or_else(|| {
            ParseError::at_line(ParseErrorKind::MissingRequiredProperty, component.line)
                .with_context(format!(
                    "VEVENT {} has no DTSTART",
                    component.uid().unwrap_or("(no UID)")
                ))
        })?;

    let end = match_start_kind(component, &start, resolve_end(component, &start));
    let end = if end.naive() < start.naive() {
        tracing::warn!(uid = ?component.uid(), start = %start, end = %end, "Event ends before it starts; using start as end");
        start.clone()
    } else {
        end
    };

    Ok(EventRecord {
        uid: component.uid().map(str::to_string),
        recurrence: recurrence_of(component),
        summary: component.summary().unwrap_or_default().to_string(),
        location: component.text(names::LOCATION).map(str::to_string),
        description: component.text(names::DESCRIPTION).map(str::to_string),
        start,
        end,
    })
}

/// DTEND, else DTSTART + DURATION, else one day for all-day starts and the
/// start itself for timed ones.
fn resolve_end(component: &Component, start: &Moment) -> Moment {
    if let Some(end) = component
        .get_property(names::DTEND)
        .and_then(Property::as_moment)
    {
        return end.clone();
    }

    if let Some(duration) = component
        .get_property(names::DURATION)
        .and_then(|p| p.value.as_duration())
    {
        if let Some(end) = start.naive().checked_add_signed(duration) {
            return start.with_naive(end);
        }
        tracing::warn!(start = %start, "DURATION overflows; ignoring it");
    }

    match start {
        Moment::Date(date) => date
            .checked_add_days(Days::new(1))
            .map_or_else(|| start.clone(), Moment::Date),
        Moment::DateTime { .. } => start.clone(),
    }
}

/// Converts an end of the other value type to the start's type.
///
/// A timed end on an all-day event becomes the exclusive date after the day it
/// falls in, or that day itself when it is exactly midnight. A date end on a
/// timed event becomes midnight of that date in the start's zone.
fn match_start_kind(component: &Component, start: &Moment, end: Moment) -> Moment {
    if start.is_all_day() == end.is_all_day() {
        return end;
    }

    let aligned = match start {
        Moment::Date(_) => {
            let day = end.date();
            let exclusive = if end.time() == Some(NaiveTime::MIN) {
                Some(day)
            } else {
                day.checked_add_days(Days::new(1))
            };
            Moment::Date(exclusive.unwrap_or(day))
        }
        Moment::DateTime { .. } => start.with_naive(end.naive()),
    };
    tracing::warn!(
        uid = ?component.uid(),
        start = %start,
        end = %end,
        aligned = %aligned,
        "End value type differs from DTSTART; converting end"
    );
    aligned
}

fn recurrence_of(component: &Component) -> Option<RecurrenceSpec> {
    let rules: Vec<String> = recur_values(component, names::RRULE);
    if rules.is_empty() {
        return None;
    }

    Some(RecurrenceSpec {
        rules,
        exclusion_rules: recur_values(component, names::EXRULE),
        extra_dates: moment_values(component, names::RDATE),
        excluded_dates: moment_values(component, names::EXDATE),
    })
}

fn recur_values(component: &Component, name: &str) -> Vec<String> {
    component
        .get_properties(name)
        .filter_map(|p| p.value.as_recur())
        .map(str::to_string)
        .collect()
}

fn moment_values(component: &Component, name: &str) -> Vec<Moment> {
    component
        .get_properties(name)
        .flat_map(|p| p.value.moments())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;
    use crate::error::RfcError;
    use crate::rfc::ical::core::Zone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, min, 0).expect("valid time")
    }

    fn calendar(body: &str) -> String {
        format!("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n{body}END:VCALENDAR\r\n")
    }

    #[test_log::test]
    fn decodes_timed_event() {
        let input = calendar(
            "BEGIN:VEVENT\r\nUID:a\r\nDTSTART:20180101T090000Z\r\nDTEND:20180101T091500Z\r\n\
SUMMARY:Standup\r\nLOCATION:Room 1\r\nDESCRIPTION:Daily\\nsync\r\nEND:VEVENT\r\n",
        );
        let events = decode_events(&input).expect("decodes");
        assert_eq!(events.len(), 1);

        let event = &events[0];
        assert_eq!(event.uid.as_deref(), Some("a"));
        assert_eq!(event.summary, "Standup");
        assert_eq!(event.location.as_deref(), Some("Room 1"));
        assert_eq!(event.description.as_deref(), Some("Daily\nsync"));
        assert_eq!(event.duration(), TimeDelta::minutes(15));
        assert!(!event.is_recurring());
        assert_eq!(
            event.start,
            Moment::DateTime {
                value: at(2018, 1, 1, 9, 0),
                zone: Zone::Utc
            }
        );
    }

    #[test]
    fn all_day_without_end_lasts_one_day() {
        let input = calendar("BEGIN:VEVENT\r\nDTSTART;VALUE=DATE:20180310\r\nEND:VEVENT\r\n");
        let events = decode_events(&input).expect("decodes");
        assert_eq!(events[0].end, Moment::Date(date(2018, 3, 11)));
        assert_eq!(events[0].summary, "");
    }

    #[test]
    fn timed_without_end_is_instant() {
        let input = calendar("BEGIN:VEVENT\r\nDTSTART:20180310T100000\r\nEND:VEVENT\r\n");
        let events = decode_events(&input).expect("decodes");
        assert_eq!(events[0].end, events[0].start);
    }

    #[test]
    fn duration_extends_start() {
        let input = calendar(
            "BEGIN:VEVENT\r\nDTSTART;TZID=Europe/Oslo:20180310T230000\r\nDURATION:PT2H\r\nEND:VEVENT\r\n",
        );
        let events = decode_events(&input).expect("decodes");
        assert_eq!(
            events[0].end,
            Moment::DateTime {
                value: at(2018, 3, 11, 1, 0),
                zone: Zone::Named("Europe/Oslo".to_string())
            }
        );
    }

    #[test]
    fn recurrence_collects_rules_and_dates() {
        let input = calendar(
            "BEGIN:VEVENT\r\nDTSTART:20180101T090000\r\nDTEND:20180101T091500\r\n\
RRULE:FREQ=DAILY;COUNT=5\r\nEXRULE:FREQ=WEEKLY;BYDAY=SA,SU\r\n\
EXDATE:20180102T090000\r\nEXDATE:20180103T090000,20180104T090000\r\n\
RDATE:20180110T090000\r\nEND:VEVENT\r\n",
        );
        let events = decode_events(&input).expect("decodes");
        let recurrence = events[0].recurrence.as_ref().expect("recurring");

        assert_eq!(recurrence.rules, vec!["FREQ=DAILY;COUNT=5".to_string()]);
        assert_eq!(
            recurrence.exclusion_rules,
            vec!["FREQ=WEEKLY;BYDAY=SA,SU".to_string()]
        );
        assert_eq!(recurrence.excluded_dates.len(), 3);
        assert_eq!(
            recurrence.extra_dates,
            vec![Moment::floating(at(2018, 1, 10, 9, 0))]
        );
    }

    #[test]
    fn exception_only_event_is_not_recurring() {
        let input = calendar(
            "BEGIN:VEVENT\r\nDTSTART:20180101T090000\r\nEXDATE:20180102T090000\r\nEND:VEVENT\r\n",
        );
        let events = decode_events(&input).expect("decodes");
        assert!(events[0].recurrence.is_none());
    }

    #[test]
    fn missing_dtstart_is_an_error() {
        let input = calendar("BEGIN:VEVENT\r\nUID:broken\r\nSUMMARY:x\r\nEND:VEVENT\r\n");
        let err = decode_events(&input).expect_err("no DTSTART");
        let RfcError::ParseError(parse_err) = err;
        assert_eq!(parse_err.kind, ParseErrorKind::MissingRequiredProperty);
        assert_eq!(parse_err.line, 3);
        assert!(parse_err.to_string().contains("broken"));
    }

    #[test]
    fn end_before_start_is_clamped() {
        let input = calendar(
            "BEGIN:VEVENT\r\nDTSTART:20180102T090000\r\nDTEND:20180101T090000\r\nEND:VEVENT\r\n",
        );
        let events = decode_events(&input).expect("decodes");
        assert_eq!(events[0].duration(), TimeDelta::zero());
    }

    #[test_log::test]
    fn timed_end_on_all_day_event_becomes_a_date() {
        let input = calendar(
            "BEGIN:VEVENT\r\nDTSTART;VALUE=DATE:20180310\r\nDTEND:20180311T120000\r\nEND:VEVENT\r\n\
BEGIN:VEVENT\r\nDTSTART;VALUE=DATE:20180310\r\nDTEND:20180312T000000\r\nEND:VEVENT\r\n",
        );
        let events = decode_events(&input).expect("decodes");
        assert_eq!(events[0].end, Moment::Date(date(2018, 3, 12)));
        assert_eq!(events[1].end, Moment::Date(date(2018, 3, 12)));
    }

    #[test_log::test]
    fn date_end_on_timed_event_becomes_midnight() {
        let input = calendar(
            "BEGIN:VEVENT\r\nDTSTART;TZID=Europe/Oslo:20180310T090000\r\n\
DTEND;VALUE=DATE:20180311\r\nEND:VEVENT\r\n",
        );
        let events = decode_events(&input).expect("decodes");
        assert_eq!(
            events[0].end,
            Moment::DateTime {
                value: at(2018, 3, 11, 0, 0),
                zone: Zone::Named("Europe/Oslo".to_string())
            }
        );
        assert_eq!(events[0].duration(), TimeDelta::hours(15));
    }

    #[test]
    fn events_keep_document_order() {
        let input = calendar(
            "BEGIN:VEVENT\r\nSUMMARY:one\r\nDTSTART;VALUE=DATE:20180102\r\nEND:VEVENT\r\n\
BEGIN:VEVENT\r\nSUMMARY:two\r\nDTSTART;VALUE=DATE:20180101\r\nEND:VEVENT\r\n",
        );
        let summaries: Vec<_> = decode_events(&input)
            .expect("decodes")
            .into_iter()
            .map(|e| e.summary)
            .collect();
        assert_eq!(summaries, vec!["one", "two"]);
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(decode_events("BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\n").is_err());
    }
}
