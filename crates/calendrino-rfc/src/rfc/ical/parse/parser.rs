//! iCalendar document parser (RFC 5545).
//!
//! Parses complete iCalendar documents into a component tree.

use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::lexer::{parse_content_line, split_lines};
use super::values::{parse_date, parse_datetime, parse_duration, unescape_text};
use crate::rfc::ical::core::{Component, ComponentKind, ContentLine, ICalendar, Moment, Property, Value, names};

type Lines = std::vec::IntoIter<(usize, ContentLine)>;

/// Parses an iCalendar document from a string.
///
/// ## Errors
///
/// Returns an error if the input is not a well-formed VCALENDAR: a malformed
/// content line, unbalanced BEGIN/END, or an undecodable date, date-time or
/// duration value.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse(input: &str) -> ParseResult<ICalendar> {
    tracing::debug!("Parsing iCalendar document");

    let content_lines = split_lines(input)
        .into_iter()
        .map(|(line_num, line)| parse_content_line(&line, line_num).map(|cl| (line_num, cl)))
        .collect::<ParseResult<Vec<_>>>()?;

    tracing::trace!(count = content_lines.len(), "Parsed content lines");

    let mut lines = content_lines.into_iter();
    let Some((line_num, first)) = lines.next() else {
        tracing::warn!("Empty iCalendar input");
        return Err(ParseError::at_line(ParseErrorKind::MissingBegin, 1));
    };

    if first.name != "BEGIN" || ComponentKind::parse(&first.raw_value) != ComponentKind::Calendar {
        return Err(ParseError::at_line(ParseErrorKind::MissingBegin, line_num)
            .with_context("expected BEGIN:VCALENDAR"));
    }

    let root = parse_component(&mut lines, line_num, &first.raw_value)?;

    let trailing = lines.len();
    if trailing > 0 {
        tracing::warn!(count = trailing, "Ignoring content after END:VCALENDAR");
    }

    tracing::debug!(
        children = root.children.len(),
        "iCalendar document parsed successfully"
    );

    Ok(ICalendar { root })
}

/// Parses the body of a component whose BEGIN line has been consumed, up to
/// and including its matching END line.
fn parse_component(lines: &mut Lines, begin_line: usize, name: &str) -> ParseResult<Component> {
    let mut component = Component::named(name);
    component.line = begin_line;
    let mut last_line = begin_line;

    loop {
        let Some((line_num, content_line)) = lines.next() else {
            return Err(ParseError::at_line(ParseErrorKind::MissingEnd, last_line)
                .with_context(format!("expected END:{}", component.name)));
        };
        last_line = line_num;

        match content_line.name.as_str() {
            "BEGIN" => {
                let child = parse_component(lines, line_num, &content_line.raw_value)?;
                component.add_child(child);
            }
            "END" => {
                if !content_line.raw_value.eq_ignore_ascii_case(&component.name) {
                    return Err(
                        ParseError::at_line(ParseErrorKind::MismatchedComponent, line_num)
                            .with_context(format!(
                                "expected END:{}, got END:{}",
                                component.name, content_line.raw_value
                            )),
                    );
                }
                return Ok(component);
            }
            _ => {
                // Timezone definitions are never read; their DTSTART lines
                // carry no TZID and stay as text.
                let property = if component.kind == ComponentKind::Event {
                    parse_property(content_line, line_num)?
                } else {
                    text_property(content_line)
                };
                component.add_property(property);
            }
        }
    }
}

/// Parses a property, typing the values event extraction relies on.
fn parse_property(cl: ContentLine, line_num: usize) -> ParseResult<Property> {
    let value = match cl.name.as_str() {
        names::DTSTART | names::DTEND | "RECURRENCE-ID" => {
            Value::Moment(parse_moment(&cl.raw_value, &cl, line_num)?)
        }
        names::EXDATE | names::RDATE if is_period(&cl) => Value::Unknown(cl.raw_value.clone()),
        names::EXDATE | names::RDATE => Value::MomentList(
            cl.raw_value
                .split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(|part| parse_moment(part, &cl, line_num))
                .collect::<ParseResult<_>>()?,
        ),
        names::DURATION => Value::Duration(parse_duration(&cl.raw_value, line_num, 1)?),
        names::RRULE | names::EXRULE => Value::Recur(cl.raw_value.clone()),
        _ => return Ok(text_property(cl)),
    };

    Ok(Property {
        name: cl.name,
        params: cl.params,
        value,
    })
}

fn text_property(cl: ContentLine) -> Property {
    Property {
        value: Value::Text(unescape_text(&cl.raw_value)),
        name: cl.name,
        params: cl.params,
    }
}

fn is_period(cl: &ContentLine) -> bool {
    cl.value_type()
        .is_some_and(|v| v.eq_ignore_ascii_case("PERIOD"))
        || cl.raw_value.contains('/')
}

/// Decodes one DATE or DATE-TIME, honoring `VALUE=DATE` and falling back to
/// the value's shape when the parameter is absent.
fn parse_moment(raw: &str, cl: &ContentLine, line_num: usize) -> ParseResult<Moment> {
    let declared_date = cl
        .value_type()
        .is_some_and(|v| v.eq_ignore_ascii_case("DATE"));

    if declared_date || (raw.len() == 8 && !raw.contains(['T', 't'])) {
        parse_date(raw, line_num, 1).map(Moment::Date)
    } else {
        parse_datetime(raw, cl.tzid(), line_num, 1)
    }
}
