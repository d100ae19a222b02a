//! Decoder errors with the source position they were raised at.

use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

/// A decoding failure at a 1-based line and column of the unfolded input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at line {line}, column {column}{}", context_suffix(.context.as_deref()))]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub line: usize,
    pub column: usize,
    /// Offending text or the expected token.
    pub context: Option<String>,
}

fn context_suffix(context: Option<&str>) -> String {
    context.map(|ctx| format!(": {ctx}")).unwrap_or_default()
}

impl ParseError {
    #[must_use]
    pub fn new(kind: ParseErrorKind, line: usize, column: usize) -> Self {
        Self {
            kind,
            line,
            column,
            context: None,
        }
    }

    /// A component-level failure, reported against the whole line.
    #[must_use]
    pub fn at_line(kind: ParseErrorKind, line: usize) -> Self {
        Self::new(kind, line, 1)
    }

    /// A property value that does not decode; `raw` is kept as context.
    #[must_use]
    pub fn bad_value(kind: ParseErrorKind, raw: &str, line: usize, column: usize) -> Self {
        Self::new(kind, line, column).with_context(raw)
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// What went wrong, grouped by the decoding stage that notices it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    // Content lines
    #[error("content line has no property name")]
    MissingPropertyName,
    #[error("property name contains a character outside A-Z, 0-9 and '-'")]
    InvalidPropertyName,
    #[error("content line has no ':' before its value")]
    MissingColon,
    #[error("malformed property parameter")]
    InvalidParameter,
    #[error("quoted parameter value is never closed")]
    UnclosedQuote,

    // Property values
    #[error("DATE value is not YYYYMMDD")]
    InvalidDate,
    #[error("time of day is not HHMMSS")]
    InvalidTime,
    #[error("DATE-TIME value is not YYYYMMDDTHHMMSS[Z]")]
    InvalidDateTime,
    #[error("DURATION value is malformed")]
    InvalidDuration,

    // Component structure
    #[error("document does not open with BEGIN:VCALENDAR")]
    MissingBegin,
    #[error("component is never closed")]
    MissingEnd,
    #[error("END does not match the open component")]
    MismatchedComponent,

    // Event extraction
    #[error("event has no DTSTART")]
    MissingRequiredProperty,
}

impl ParseErrorKind {
    /// Whether the error concerns a property value rather than the shape of
    /// the document.
    #[must_use]
    pub const fn is_value_error(self) -> bool {
        matches!(
            self,
            Self::InvalidDate | Self::InvalidTime | Self::InvalidDateTime | Self::InvalidDuration
        )
    }
}
