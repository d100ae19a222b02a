//! iCalendar parsing primitives (RFC 5545).
//!
//! - Lexer: content line splitting, unfolding and tokenization
//! - Values: DATE, DATE-TIME, DURATION and TEXT decoding
//! - Parser: full document parsing into a component tree

mod error;
mod lexer;
mod parser;
mod values;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use lexer::{parse_content_line, split_lines};
pub use parser::parse;
pub use values::{parse_date, parse_datetime, parse_duration, unescape_text};
