//! Concrete instances of events.

use calendrino_rfc::rfc::ical::core::Moment;
use calendrino_rfc::rfc::ical::event::EventRecord;
use chrono::{Days, NaiveDate, NaiveTime};

/// One concrete start/end pair of an [`EventRecord`].
///
/// All-day occurrences hold an inclusive end date: the source's exclusive
/// end minus one day, never earlier than the start date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence<'a> {
    pub record: &'a EventRecord,
    start: Moment,
    end: Moment,
}

impl<'a> Occurrence<'a> {
    /// Creates an occurrence from a start and a source-convention end.
    #[must_use]
    pub fn new(record: &'a EventRecord, start: Moment, end: Moment) -> Self {
        let end = match end {
            Moment::Date(exclusive) => {
                let inclusive = exclusive
                    .checked_sub_days(Days::new(1))
                    .unwrap_or(exclusive);
                Moment::Date(inclusive.max(start.date()))
            }
            timed @ Moment::DateTime { .. } => timed,
        };
        Self { record, start, end }
    }

    /// The record's own start and end.
    #[must_use]
    pub fn of_record(record: &'a EventRecord) -> Self {
        Self::new(record, record.start.clone(), record.end.clone())
    }

    #[must_use]
    pub fn start(&self) -> &Moment {
        &self.start
    }

    /// End moment; inclusive for all-day occurrences.
    #[must_use]
    pub fn end(&self) -> &Moment {
        &self.end
    }

    #[must_use]
    pub fn first_day(&self) -> NaiveDate {
        self.start.date()
    }

    #[must_use]
    pub fn last_day(&self) -> NaiveDate {
        self.end.date()
    }

    /// An occurrence is all-day when its end has no time of day.
    #[must_use]
    pub fn is_all_day(&self) -> bool {
        self.end.is_all_day()
    }

    /// Start and end time of day, when both ends are timed.
    #[must_use]
    pub fn times(&self) -> Option<(NaiveTime, NaiveTime)> {
        self.start.time().zip(self.end.time())
    }

    /// Every date from the first through the last day, inclusive.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<'a> {
        let last = self.last_day();
        self.first_day()
            .iter_days()
            .take_while(move |day| *day <= last)
    }
}
