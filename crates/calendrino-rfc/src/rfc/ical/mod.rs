//! iCalendar RFC 5545 decoding.
//!
//! - `core`: Type definitions for iCalendar structures
//! - `parse`: Parsers for iCalendar content
//! - `event`: Extraction of [`event::EventRecord`]s from a parsed document
//!
//! ## Example
//!
//! ```rust
//! use calendrino_rfc::rfc::ical::event::decode_events;
//!
//! let input = "BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nDTSTART;VALUE=DATE:20180310\r\n\
//!              SUMMARY:Conference\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";
//! let events = decode_events(input).unwrap();
//! assert_eq!(events[0].summary, "Conference");
//! ```

pub mod core;
pub mod event;
pub mod parse;
