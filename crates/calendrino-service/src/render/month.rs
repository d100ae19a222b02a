//! Month grid layout.

use chrono::{Datelike, Month, NaiveDate, Weekday};

/// Lays out one month as a grid of day cells.
///
/// Implementations call `day_content` once per day of the month, in day
/// order, and place the returned fragment in that day's cell.
pub trait MonthGrid {
    fn format_month(&self, year: i32, month: u32, day_content: &mut dyn FnMut(u32) -> String) -> String;
}

/// HTML table grid, one row per week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HtmlMonthGrid {
    pub first_weekday: Weekday,
}

impl Default for HtmlMonthGrid {
    fn default() -> Self {
        Self {
            first_weekday: Weekday::Mon,
        }
    }
}

impl HtmlMonthGrid {
    #[must_use]
    pub const fn new(first_weekday: Weekday) -> Self {
        Self { first_weekday }
    }

    /// Weekdays in column order.
    fn columns(&self) -> impl Iterator<Item = Weekday> {
        std::iter::successors(Some(self.first_weekday), |wd| Some(wd.succ())).take(7)
    }

    /// Number of padding cells before the first day of the month.
    fn leading_padding(&self, first: NaiveDate) -> u32 {
        let weekday = first.weekday().num_days_from_monday();
        let column_zero = self.first_weekday.num_days_from_monday();
        (weekday + 7 - column_zero) % 7
    }
}

impl MonthGrid for HtmlMonthGrid {
    fn format_month(&self, year: i32, month: u32, day_content: &mut dyn FnMut(u32) -> String) -> String {
        let first = NaiveDate::from_ymd_opt(year, month, 1);
        let name = u8::try_from(month).ok().and_then(|m| Month::try_from(m).ok());
        let (Some(first), Some(name)) = (first, name) else {
            tracing::warn!(year, month, "Not a calendar month; nothing to lay out");
            return String::new();
        };

        let mut out = String::from("<table class=\"month\">\n");
        out.push_str(&format!(
            "<tr><th colspan=\"7\" class=\"month\">{} {year}</th></tr>\n",
            name.name()
        ));

        out.push_str("<tr>");
        for weekday in self.columns() {
            let label = weekday.to_string();
            out.push_str(&format!(
                "<th class=\"{}\">{label}</th>",
                label.to_lowercase()
            ));
        }
        out.push_str("</tr>\n");

        let mut column = self.leading_padding(first);
        out.push_str("<tr>");
        push_padding(&mut out, column);

        for date in first.iter_days().take_while(|date| date.month() == month) {
            if column == 7 {
                out.push_str("</tr>\n<tr>");
                column = 0;
            }
            let day = date.day();
            out.push_str(&format!(
                "<td class=\"{}\"><div class=\"daynum\">{day}</div>{}</td>",
                date.weekday().to_string().to_lowercase(),
                day_content(day)
            ));
            column += 1;
        }

        push_padding(&mut out, 7 - column);
        out.push_str("</tr>\n</table>\n");
        out
    }
}

fn push_padding(out: &mut String, cells: u32) {
    for _ in 0..cells {
        out.push_str("<td class=\"noday\">&nbsp;</td>");
    }
}
