//! Inclusive date window rendered around "today".

use chrono::{Datelike, Days, NaiveDate};

use crate::error::{CoreError, CoreResult};

/// Where a single date falls relative to a [`DateWindow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowPosition {
    /// Strictly before the window's start date.
    Before,
    /// Between start and end, both inclusive.
    Within,
    /// Strictly after the window's end date.
    After,
}

/// Closed range of calendar dates.
///
/// Both `start` and `end` are inclusive and `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    /// Creates a window from two inclusive bounds.
    ///
    /// ## Errors
    /// Returns `InvalidInput` if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> CoreResult<Self> {
        if start > end {
            return Err(CoreError::InvalidInput(format!(
                "window start {start} is after window end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Creates the window `[today - look_behind, today + look_ahead]`.
    ///
    /// ## Errors
    /// Returns `InvalidInput` if either bound falls outside the supported date range.
    pub fn around(today: NaiveDate, look_behind_days: u32, look_ahead_days: u32) -> CoreResult<Self> {
        let start = today
            .checked_sub_days(Days::new(u64::from(look_behind_days)))
            .ok_or_else(|| CoreError::InvalidInput("window start out of range".to_string()))?;
        let end = today
            .checked_add_days(Days::new(u64::from(look_ahead_days)))
            .ok_or_else(|| CoreError::InvalidInput("window end out of range".to_string()))?;
        Self::new(start, end)
    }

    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Classifies a date against the window bounds.
    #[must_use]
    pub fn position(&self, date: NaiveDate) -> WindowPosition {
        if date < self.start {
            WindowPosition::Before
        } else if date > self.end {
            WindowPosition::After
        } else {
            WindowPosition::Within
        }
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.position(date) == WindowPosition::Within
    }

    /// Returns whether the inclusive span `[first, last]` touches the window.
    ///
    /// A span overlaps unless it ends before the window starts or starts
    /// after the window ends.
    #[must_use]
    pub fn overlaps(&self, first: NaiveDate, last: NaiveDate) -> bool {
        let ends_too_early = self.position(last) == WindowPosition::Before;
        let starts_too_late = self.position(first) == WindowPosition::After;
        !ends_too_early && !starts_too_late
    }

    /// Returns every `(year, month)` the window touches, in chronological order.
    #[must_use]
    pub fn months(&self) -> Vec<(i32, u32)> {
        let mut months = Vec::new();
        let (mut year, mut month) = (self.start.year(), self.start.month());
        let last = (self.end.year(), self.end.month());

        while (year, month) <= last {
            months.push((year, month));
            if month == 12 {
                year += 1;
                month = 1;
            } else {
                month += 1;
            }
        }

        months
    }
}

impl std::fmt::Display for DateWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}
