//! Calendar excerpt engine.
//!
//! Events flow through four stages:
//! - [`expand`]: one record becomes the occurrences relevant to a window
//! - [`aggregate`]: occurrences are filed under every day they touch
//! - [`merge`]: per-source data is unioned in source order
//! - [`bucket`]: the day-indexed data model shared by the stages

pub mod aggregate;
pub mod bucket;
pub mod expand;
pub mod merge;
pub mod occurrence;
pub mod recurrence;

pub use aggregate::{bucket_occurrences, build_source_data};
pub use bucket::{CalendarData, DayBucket, DayItem, MonthData, TimeSpan, YearData};
pub use expand::Expansion;
pub use merge::merge;
pub use occurrence::Occurrence;
pub use recurrence::{Frequency, Limit, RecurrenceRule};
