//! DATE and DATE-TIME values as calendar moments (RFC 5545 §3.3.4, §3.3.5).

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Zone attached to a DATE-TIME.
///
/// Zones are carried through untouched; nothing in the pipeline converts
/// between them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Zone {
    /// Floating time - same wall-clock time in any timezone.
    ///
    /// Example: `19980118T230000`
    Floating,

    /// UTC time, indicated by the 'Z' suffix.
    ///
    /// Example: `19980119T070000Z`
    Utc,

    /// Local time with a TZID reference.
    ///
    /// Example: `TZID=America/New_York:19980119T020000`
    Named(String),
}

/// A point on the calendar: either a whole day or a wall-clock time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Moment {
    /// All-day value with no time-of-day component.
    Date(NaiveDate),
    /// Timed value with its zone.
    DateTime { value: NaiveDateTime, zone: Zone },
}

impl Moment {
    /// Creates a floating DATE-TIME moment.
    #[must_use]
    pub fn floating(value: NaiveDateTime) -> Self {
        Self::DateTime {
            value,
            zone: Zone::Floating,
        }
    }

    /// Returns the calendar date of this moment.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Date(date) => *date,
            Self::DateTime { value, .. } => value.date(),
        }
    }

    /// Returns the time of day, or `None` for all-day moments.
    #[must_use]
    pub fn time(&self) -> Option<NaiveTime> {
        match self {
            Self::Date(_) => None,
            Self::DateTime { value, .. } => Some(value.time()),
        }
    }

    /// Returns the wall-clock value, placing dates at midnight.
    #[must_use]
    pub fn naive(&self) -> NaiveDateTime {
        match self {
            Self::Date(date) => date.and_time(NaiveTime::MIN),
            Self::DateTime { value, .. } => *value,
        }
    }

    #[must_use]
    pub fn is_all_day(&self) -> bool {
        matches!(self, Self::Date(_))
    }

    /// Returns the attached zone for timed moments.
    #[must_use]
    pub fn zone(&self) -> Option<&Zone> {
        match self {
            Self::Date(_) => None,
            Self::DateTime { zone, .. } => Some(zone),
        }
    }

    /// Builds a moment of the same shape (and zone) at another wall-clock value.
    ///
    /// All-day moments keep only the date of `value`.
    #[must_use]
    pub fn with_naive(&self, value: NaiveDateTime) -> Self {
        match self {
            Self::Date(_) => Self::Date(value.date()),
            Self::DateTime { zone, .. } => Self::DateTime {
                value,
                zone: zone.clone(),
            },
        }
    }
}

impl fmt::Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format("%Y%m%d")),
            Self::DateTime { value, zone } => {
                write!(f, "{}", value.format("%Y%m%dT%H%M%S"))?;
                if *zone == Zone::Utc {
                    write!(f, "Z")?;
                }
                Ok(())
            }
        }
    }
}
