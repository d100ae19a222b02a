//! HTML rendering of merged calendar data.
//!
//! [`format_day`] renders a single day cell, a [`MonthGrid`] lays the cells
//! out, and [`render_months`] walks every month of a [`DateWindow`].
//! [`PageTemplate`] wraps the result into the final document.

pub mod escape;
pub mod format;
pub mod month;
pub mod template;

use calendrino_core::constants::TODAY_ANCHOR;
use calendrino_core::window::DateWindow;
use chrono::NaiveDate;

pub use format::{ALL_DAY_SEPARATOR, format_day};
pub use month::{HtmlMonthGrid, MonthGrid};
pub use template::PageTemplate;

use crate::excerpt::CalendarData;

/// ## Summary
/// Renders every month the window touches, in chronological order.
///
/// Each day cell holds [`format_day`] of that day's bucket. The cell for
/// `today` is prefixed with the today anchor even when the day is empty.
#[tracing::instrument(skip(data, window, grid), fields(window = %window))]
pub fn render_months(data: &CalendarData, window: &DateWindow, today: NaiveDate, grid: &dyn MonthGrid) -> String {
    let months = window.months();
    tracing::debug!(months = months.len(), "Rendering months");

    months
        .into_iter()
        .map(|(year, month)| {
            let month_data = data.month(year, month);
            grid.format_month(year, month, &mut |day| {
                let mut fragment = String::new();
                if NaiveDate::from_ymd_opt(year, month, day) == Some(today) {
                    fragment.push_str(TODAY_ANCHOR);
                }
                fragment.push_str(&format_day(month_data.and_then(|m| m.day(day))));
                fragment
            })
        })
        .collect()
}

/// Renders the months of `window` into `template`.
#[must_use]
pub fn render_document(
    template: &PageTemplate,
    data: &CalendarData,
    window: &DateWindow,
    today: NaiveDate,
    grid: &dyn MonthGrid,
    render_date: &str,
) -> String {
    template.render(&render_months(data, window, today, grid), render_date)
}
