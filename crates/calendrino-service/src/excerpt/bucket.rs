//! Day-indexed calendar data.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveTime};

/// Start and end time of day of a timed item.
///
/// Both are the occurrence's own times, whichever day the item is filed
/// under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeSpan {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// What one occurrence contributes to one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayItem {
    pub summary: String,
    pub location: Option<String>,
    pub description: Option<String>,
    /// Styling tag of the source that produced the item.
    pub class: String,
    /// The occurrence started on an earlier day.
    pub continues_from_previous: bool,
    /// The occurrence ends on a later day.
    pub continues_to_next: bool,
    /// `None` for all-day items.
    pub times: Option<TimeSpan>,
}

/// The all-day and timed items of a single day.
///
/// All-day items keep insertion order. Timed items are stored unsorted; use
/// [`DayBucket::sorted_timed`] for display order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DayBucket {
    pub all_day: Vec<DayItem>,
    pub timed: Vec<DayItem>,
}

impl DayBucket {
    /// Files an item under the list matching its kind.
    pub fn push(&mut self, item: DayItem) {
        if item.times.is_some() {
            self.timed.push(item);
        } else {
            self.all_day.push(item);
        }
    }

    /// Timed items by start time; ties keep insertion order.
    #[must_use]
    pub fn sorted_timed(&self) -> Vec<&DayItem> {
        let mut items: Vec<&DayItem> = self.timed.iter().collect();
        items.sort_by_key(|item| item.times.map(|t| t.start));
        items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.all_day.is_empty() && self.timed.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.all_day.len() + self.timed.len()
    }

    /// Appends another bucket's items after this one's, list by list.
    pub fn append(&mut self, other: DayBucket) {
        self.all_day.extend(other.all_day);
        self.timed.extend(other.timed);
    }
}

/// Days of one month, keyed by day of month.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MonthData {
    pub days: BTreeMap<u32, DayBucket>,
}

impl MonthData {
    #[must_use]
    pub fn day(&self, day: u32) -> Option<&DayBucket> {
        self.days.get(&day)
    }
}

/// Months of one year, keyed by month number (1-12).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct YearData {
    pub months: BTreeMap<u32, MonthData>,
}

/// Sparse year → month → day → [`DayBucket`] map.
///
/// Absent keys mean no items that day.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CalendarData {
    pub years: BTreeMap<i32, YearData>,
}

impl CalendarData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the bucket for `date`, creating the year, month and day on
    /// first use.
    pub fn day_mut(&mut self, date: NaiveDate) -> &mut DayBucket {
        self.years
            .entry(date.year())
            .or_default()
            .months
            .entry(date.month())
            .or_default()
            .days
            .entry(date.day())
            .or_default()
    }

    #[must_use]
    pub fn day(&self, date: NaiveDate) -> Option<&DayBucket> {
        self.month(date.year(), date.month())?.day(date.day())
    }

    #[must_use]
    pub fn month(&self, year: i32, month: u32) -> Option<&MonthData> {
        self.years.get(&year)?.months.get(&month)
    }

    /// Iterates every stored day in date order.
    pub fn days(&self) -> impl Iterator<Item = (NaiveDate, &DayBucket)> {
        self.years.iter().flat_map(|(&year, year_data)| {
            year_data.months.iter().flat_map(move |(&month, month_data)| {
                month_data.days.iter().filter_map(move |(&day, bucket)| {
                    NaiveDate::from_ymd_opt(year, month, day).map(|date| (date, bucket))
                })
            })
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Total number of items across all days.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.days().map(|(_, bucket)| bucket.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn timed(summary: &str, hour: u32) -> DayItem {
        let start = NaiveTime::from_hms_opt(hour, 0, 0).expect("valid time");
        DayItem {
            summary: summary.to_string(),
            location: None,
            description: None,
            class: "work".to_string(),
            continues_from_previous: false,
            continues_to_next: false,
            times: Some(TimeSpan { start, end: start }),
        }
    }

    #[test]
    fn day_mut_creates_on_demand_and_is_idempotent() {
        let mut data = CalendarData::new();
        assert!(data.day(date(2018, 6, 1)).is_none());

        data.day_mut(date(2018, 6, 1)).push(timed("a", 9));
        data.day_mut(date(2018, 6, 1)).push(timed("b", 10));

        assert_eq!(data.years.len(), 1);
        assert_eq!(data.day(date(2018, 6, 1)).map(DayBucket::len), Some(2));
        assert!(data.month(2018, 7).is_none());
    }

    #[test]
    fn push_splits_by_kind() {
        let mut bucket = DayBucket::default();
        let mut all_day = timed("all day", 0);
        all_day.times = None;
        bucket.push(all_day);
        bucket.push(timed("timed", 8));
        assert_eq!(bucket.all_day.len(), 1);
        assert_eq!(bucket.timed.len(), 1);
    }

    #[test]
    fn sorted_timed_is_stable() {
        let mut bucket = DayBucket::default();
        for (summary, hour) in [("nine", 9), ("two", 14), ("eight", 8), ("nine again", 9)] {
            bucket.push(timed(summary, hour));
        }
        let order: Vec<_> = bucket
            .sorted_timed()
            .iter()
            .map(|item| item.summary.as_str())
            .collect();
        assert_eq!(order, vec!["eight", "nine", "nine again", "two"]);
    }

    #[test]
    fn days_iterate_in_date_order() {
        let mut data = CalendarData::new();
        data.day_mut(date(2019, 1, 1)).push(timed("c", 9));
        data.day_mut(date(2018, 12, 31)).push(timed("b", 9));
        data.day_mut(date(2018, 2, 1)).push(timed("a", 9));

        let dates: Vec<_> = data.days().map(|(d, _)| d).collect();
        assert_eq!(dates, vec![date(2018, 2, 1), date(2018, 12, 31), date(2019, 1, 1)]);
        assert_eq!(data.item_count(), 3);
    }
}
