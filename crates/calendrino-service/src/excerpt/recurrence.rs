//! Recurrence rules and their timezone-naive evaluation.

use std::fmt;
use std::str::FromStr;

use calendrino_rfc::rfc::ical::core::{Moment, Zone};
use calendrino_rfc::rfc::ical::event::RecurrenceSpec;
use calendrino_rfc::rfc::ical::parse::{parse_date, parse_datetime};
use chrono::{DateTime, NaiveDateTime, NaiveTime, TimeZone};
use rrule::{RRule, RRuleSet, Tz, Unvalidated, Validated};

use crate::error::{ServiceError, ServiceResult};

/// `FREQ` values of a recurrence rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Secondly => "SECONDLY",
            Self::Minutely => "MINUTELY",
            Self::Hourly => "HOURLY",
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }
}

impl FromStr for Frequency {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SECONDLY" => Ok(Self::Secondly),
            "MINUTELY" => Ok(Self::Minutely),
            "HOURLY" => Ok(Self::Hourly),
            "DAILY" => Ok(Self::Daily),
            "WEEKLY" => Ok(Self::Weekly),
            "MONTHLY" => Ok(Self::Monthly),
            "YEARLY" => Ok(Self::Yearly),
            other => Err(ServiceError::RecurrenceError(format!(
                "unknown frequency '{other}'"
            ))),
        }
    }
}

/// How a rule is bounded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Limit {
    Count(u32),
    /// Inclusive last moment; a date means the end of that day.
    Until(Moment),
}

/// One RRULE or EXRULE value.
///
/// `FREQ`, `INTERVAL`, `COUNT` and `UNTIL` are typed; every other part
/// (`BYDAY`, `BYMONTH`, `WKST`, ...) is kept verbatim and left to the
/// evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    pub interval: u32,
    pub limit: Option<Limit>,
    pub parts: Vec<(String, String)>,
}

impl FromStr for RecurrenceRule {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |msg: String| ServiceError::RecurrenceError(format!("{msg} in '{s}'"));

        let mut frequency = None;
        let mut interval = 1;
        let mut limit = None;
        let mut parts = Vec::new();

        let body = s.strip_prefix("RRULE:").unwrap_or(s);
        for part in body.split(';').filter(|p| !p.trim().is_empty()) {
            let (key, value) = part
                .split_once('=')
                .ok_or_else(|| invalid(format!("part '{part}' has no '='")))?;
            let key = key.trim().to_ascii_uppercase();
            let value = value.trim();

            match key.as_str() {
                "FREQ" => frequency = Some(value.parse::<Frequency>()?),
                "INTERVAL" => {
                    interval = value
                        .parse::<u32>()
                        .ok()
                        .filter(|n| *n > 0)
                        .ok_or_else(|| invalid(format!("bad INTERVAL '{value}'")))?;
                }
                "COUNT" | "UNTIL" if limit.is_some() => {
                    return Err(invalid("COUNT and UNTIL are mutually exclusive".to_string()));
                }
                "COUNT" => {
                    let count = value
                        .parse::<u32>()
                        .map_err(|e| invalid(format!("bad COUNT '{value}': {e}")))?;
                    limit = Some(Limit::Count(count));
                }
                "UNTIL" => limit = Some(Limit::Until(parse_until(value).map_err(invalid)?)),
                _ => parts.push((key, value.to_string())),
            }
        }

        Ok(Self {
            frequency: frequency.ok_or_else(|| invalid("missing FREQ".to_string()))?,
            interval,
            limit,
            parts,
        })
    }
}

fn parse_until(value: &str) -> Result<Moment, String> {
    let parsed = if value.len() == 8 {
        parse_date(value, 1, 1).map(Moment::Date)
    } else {
        parse_datetime(value, None, 1, 1)
    };
    parsed.map_err(|e| format!("bad UNTIL '{value}': {}", e.kind))
}

impl RecurrenceRule {
    /// Renders the rule with `UNTIL` projected to naive UTC, matching the
    /// projected anchor the rule is evaluated against.
    #[must_use]
    pub fn to_naive_utc_text(&self) -> String {
        let mut text = format!("FREQ={}", self.frequency.as_str());
        if self.interval != 1 {
            text.push_str(&format!(";INTERVAL={}", self.interval));
        }
        match &self.limit {
            Some(Limit::Count(count)) => text.push_str(&format!(";COUNT={count}")),
            Some(Limit::Until(until)) => {
                let until = match until {
                    Moment::Date(date) => date.and_time(last_second()),
                    Moment::DateTime { value, .. } => *value,
                };
                text.push_str(&format!(";UNTIL={}Z", until.format("%Y%m%dT%H%M%S")));
            }
            None => {}
        }
        for (key, value) in &self.parts {
            text.push_str(&format!(";{key}={value}"));
        }
        text
    }

    /// Validates the rule against an already projected anchor.
    ///
    /// ## Errors
    /// Returns `RecurrenceError` if the evaluator rejects the rule.
    pub fn validate(&self, anchor: DateTime<Tz>) -> ServiceResult<RRule<Validated>> {
        self.to_naive_utc_text()
            .parse::<RRule<Unvalidated>>()
            .map_err(|e| ServiceError::RecurrenceError(e.to_string()))?
            .validate(anchor)
            .map_err(|e| ServiceError::RecurrenceError(e.to_string()))
    }
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_naive_utc_text())
    }
}

fn last_second() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)
}

/// Strips the zone from a moment and reads its wall clock as UTC.
///
/// Dates land on midnight.
#[must_use]
pub fn project(moment: &Moment) -> DateTime<Tz> {
    Tz::UTC.from_utc_datetime(&moment.naive())
}

/// Reattaches the shape and zone of `template` to a projected instance.
#[must_use]
pub fn reattach(template: &Moment, instance: &DateTime<Tz>) -> Moment {
    template.with_naive(wall_clock(instance))
}

/// Builds the rule set anchored at `start`, evaluated in naive UTC.
///
/// ## Errors
/// Returns `RecurrenceError` if any RRULE or EXRULE is malformed or rejected.
pub fn build_rule_set(start: &Moment, spec: &RecurrenceSpec) -> ServiceResult<RRuleSet> {
    let anchor = project(start);
    let mut set = RRuleSet::new(anchor);

    for text in &spec.rules {
        set = set.rrule(text.parse::<RecurrenceRule>()?.validate(anchor)?);
    }
    for text in &spec.exclusion_rules {
        set = set.exrule(text.parse::<RecurrenceRule>()?.validate(anchor)?);
    }

    if !spec.extra_dates.is_empty() {
        set = set.set_rdates(spec.extra_dates.iter().map(project).collect());
    }
    if !spec.excluded_dates.is_empty() {
        set = set.set_exdates(spec.excluded_dates.iter().map(project).collect());
    }

    if zone_mismatch(start, spec.extra_dates.iter().chain(&spec.excluded_dates)) {
        tracing::debug!(start = %start, "Recurrence dates carry a different zone than DTSTART; compared by wall clock");
    }

    Ok(set)
}

fn zone_mismatch<'a>(start: &Moment, others: impl Iterator<Item = &'a Moment>) -> bool {
    let zone: Option<&Zone> = start.zone();
    others
        .filter(|m| !m.is_all_day())
        .any(|m| m.zone() != zone)
}

/// Naive wall-clock value of a projected instance.
#[must_use]
pub fn wall_clock(instance: &DateTime<Tz>) -> NaiveDateTime {
    instance.naive_utc()
}
