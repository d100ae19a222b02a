//! Typed property values (RFC 5545 §3.3).

use chrono::TimeDelta;

use super::Moment;

/// Parsed value of a property.
///
/// Only the value types the event extractor consumes are typed; everything
/// else is kept as unescaped text or as the raw string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// DATE or DATE-TIME value.
    Moment(Moment),
    /// Comma-separated DATE or DATE-TIME values (EXDATE, RDATE).
    MomentList(Vec<Moment>),
    /// DURATION value.
    Duration(TimeDelta),
    /// RECUR value, kept verbatim for the recurrence engine.
    Recur(String),
    /// TEXT value (unescaped).
    Text(String),
    /// Unknown or unparsed value.
    Unknown(String),
}

impl Value {
    /// Returns this value as text, if it is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns this value as a single moment.
    #[must_use]
    pub fn as_moment(&self) -> Option<&Moment> {
        match self {
            Self::Moment(m) => Some(m),
            _ => None,
        }
    }

    /// Returns every moment held by this value (one for single values).
    #[must_use]
    pub fn moments(&self) -> &[Moment] {
        match self {
            Self::Moment(m) => std::slice::from_ref(m),
            Self::MomentList(list) => list,
            _ => &[],
        }
    }

    /// Returns this value as a duration, if it is a duration value.
    #[must_use]
    pub fn as_duration(&self) -> Option<TimeDelta> {
        match self {
            Self::Duration(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns the verbatim recurrence rule, if it is a recur value.
    #[must_use]
    pub fn as_recur(&self) -> Option<&str> {
        match self {
            Self::Recur(r) => Some(r),
            _ => None,
        }
    }
}
