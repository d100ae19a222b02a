//! Merging of per-source calendar data.

use super::bucket::CalendarData;

impl CalendarData {
    /// Appends every day of `other` after this data's items for that day.
    ///
    /// Items are never deduplicated.
    pub fn absorb(&mut self, other: CalendarData) {
        for (year, year_data) in other.years {
            let own_year = self.years.entry(year).or_default();
            for (month, month_data) in year_data.months {
                let own_month = own_year.months.entry(month).or_default();
                for (day, bucket) in month_data.days {
                    own_month.days.entry(day).or_default().append(bucket);
                }
            }
        }
    }
}

impl Extend<CalendarData> for CalendarData {
    fn extend<I: IntoIterator<Item = CalendarData>>(&mut self, iter: I) {
        for data in iter {
            self.absorb(data);
        }
    }
}

impl FromIterator<CalendarData> for CalendarData {
    fn from_iter<I: IntoIterator<Item = CalendarData>>(iter: I) -> Self {
        let mut merged = CalendarData::new();
        merged.extend(iter);
        merged
    }
}

/// Deep-unions per-source data in source order.
///
/// For each day, the merged all-day list is the concatenation of every
/// source's all-day list in input order; likewise for timed items.
#[must_use]
pub fn merge(sources: impl IntoIterator<Item = CalendarData>) -> CalendarData {
    sources.into_iter().collect()
}
