//! Content line lexer for iCalendar (RFC 5545 §3.1).
//!
//! Handles line unfolding and tokenization of content lines.

use std::iter::Peekable;
use std::str::CharIndices;

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::ical::core::{ContentLine, Parameter};

type Cursor<'a> = Peekable<CharIndices<'a>>;

/// Splits input into unfolded content lines, tagged with their 1-based
/// starting line number.
///
/// Accepts CRLF and bare LF. A line starting with SPACE or HTAB continues
/// the previous one; the line break and that single whitespace character are
/// removed. Blank lines are dropped.
#[must_use]
pub fn split_lines(input: &str) -> Vec<(usize, String)> {
    let mut lines: Vec<(usize, String)> = Vec::new();

    for (index, raw) in input.lines().enumerate() {
        let line = raw.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }

        let continuation = line.strip_prefix([' ', '\t']);
        match (continuation, lines.last_mut()) {
            (Some(rest), Some((_, prev))) => prev.push_str(rest),
            (Some(rest), None) => lines.push((index + 1, rest.to_string())),
            (None, _) => lines.push((index + 1, line.to_string())),
        }
    }

    lines
}

/// Parses a single unfolded content line.
///
/// Format: `name *(";" param) ":" value`
///
/// ## Errors
/// Returns an error if the name is empty or malformed, a parameter is
/// malformed, a quoted parameter value is unterminated, or the value colon is
/// missing.
pub fn parse_content_line(line: &str, line_num: usize) -> ParseResult<ContentLine> {
    let mut cursor = line.char_indices().peekable();
    let name_end = scan_name(&mut cursor, line, line_num, ParseErrorKind::InvalidPropertyName)?;

    if name_end == 0 {
        return Err(ParseError::new(
            ParseErrorKind::MissingPropertyName,
            line_num,
            1,
        ));
    }
    let name = &line[..name_end];

    let mut params = Vec::new();
    let value_start = loop {
        match cursor.next() {
            Some((i, ':')) => break i + 1,
            Some((_, ';')) => params.push(parse_parameter(&mut cursor, line, line_num)?),
            _ => {
                return Err(ParseError::new(
                    ParseErrorKind::MissingColon,
                    line_num,
                    line.len(),
                ));
            }
        }
    };

    Ok(ContentLine::with_params(name, params, &line[value_start..]))
}

/// Advances over `[A-Za-z0-9-]*` and returns the byte offset where the run
/// ends. Stops at `;`, `:` or `=` without consuming it.
fn scan_name(
    cursor: &mut Cursor<'_>,
    line: &str,
    line_num: usize,
    invalid: ParseErrorKind,
) -> ParseResult<usize> {
    while let Some(&(i, c)) = cursor.peek() {
        if matches!(c, ';' | ':' | '=') {
            return Ok(i);
        }
        if !c.is_ascii_alphanumeric() && c != '-' {
            return Err(ParseError::new(invalid, line_num, i + 1));
        }
        cursor.next();
    }
    Ok(line.len())
}

/// Parses `name=value[,value]` after a `;`, leaving the cursor on the
/// following `;` or `:`.
fn parse_parameter(cursor: &mut Cursor<'_>, line: &str, line_num: usize) -> ParseResult<Parameter> {
    let start = cursor.peek().map_or(line.len(), |&(i, _)| i);
    let name_end = scan_name(cursor, line, line_num, ParseErrorKind::InvalidParameter)?;

    if name_end == start || cursor.next().map(|(_, c)| c) != Some('=') {
        return Err(ParseError::new(
            ParseErrorKind::InvalidParameter,
            line_num,
            start + 1,
        ));
    }

    let mut values = Vec::new();
    loop {
        values.push(parse_param_value(cursor, line, line_num)?);
        match cursor.peek() {
            Some(&(_, ',')) => {
                cursor.next();
            }
            Some(&(_, ';' | ':')) => break,
            Some(&(i, c)) => {
                return Err(
                    ParseError::new(ParseErrorKind::InvalidParameter, line_num, i + 1)
                        .with_context(format!("unexpected character '{c}'")),
                );
            }
            None => {
                return Err(ParseError::new(
                    ParseErrorKind::MissingColon,
                    line_num,
                    line.len(),
                ));
            }
        }
    }

    Ok(Parameter::with_values(&line[start..name_end], values))
}

/// Parses one parameter value, quoted or bare.
///
/// Quoted values may contain `,;:` and decode RFC 6868 caret escapes
/// (`^^`, `^n`, `^'`).
fn parse_param_value(cursor: &mut Cursor<'_>, line: &str, line_num: usize) -> ParseResult<String> {
    let start = cursor.peek().map_or(line.len(), |&(i, _)| i);

    if cursor.peek().map(|&(_, c)| c) != Some('"') {
        let mut end = start;
        while let Some(&(i, c)) = cursor.peek() {
            if matches!(c, ',' | ';' | ':') {
                break;
            }
            end = i + c.len_utf8();
            cursor.next();
        }
        return Ok(line[start..end].to_string());
    }

    cursor.next();
    let mut value = String::new();
    while let Some((_, c)) = cursor.next() {
        match c {
            '"' => return Ok(value),
            '^' => match cursor.peek().map(|&(_, next)| next) {
                Some('^') => {
                    cursor.next();
                    value.push('^');
                }
                Some('n') => {
                    cursor.next();
                    value.push('\n');
                }
                Some('\'') => {
                    cursor.next();
                    value.push('"');
                }
                _ => value.push('^'),
            },
            _ => value.push(c),
        }
    }

    Err(ParseError::new(
        ParseErrorKind::UnclosedQuote,
        line_num,
        start + 1,
    ))
}
