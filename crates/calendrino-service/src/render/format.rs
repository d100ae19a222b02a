//! Markup for the contents of one day cell.

use chrono::NaiveTime;

use super::escape::{escape_attribute, escape_text};
use crate::excerpt::bucket::{DayBucket, DayItem};

/// Marker between the all-day and timed groups.
pub const ALL_DAY_SEPARATOR: &str = "<div class='alldayseparator'></div>";

const GLYPH_BOTH: &str = "&#8596;";
const GLYPH_ENDS_HERE: &str = "&#8677;";
const GLYPH_STARTS_HERE: &str = "&#8676;";
const ELLIPSIS: &str = "...";
const DASH: &str = "&mdash;";

/// ## Summary
/// Renders one day's items.
///
/// All-day items come first in bucket order, then the separator, then timed
/// items by start time. A day without a bucket renders as nothing.
#[must_use]
pub fn format_day(bucket: Option<&DayBucket>) -> String {
    let Some(bucket) = bucket else {
        return String::new();
    };

    let mut out = String::new();
    for item in &bucket.all_day {
        out.push_str(&format!(
            "<div class='calitem allday {}'{}>{}{}</div>",
            item.class,
            tooltip(item),
            edge_glyph(item),
            escape_text(&item.summary)
        ));
    }

    out.push_str(ALL_DAY_SEPARATOR);

    for item in bucket.sorted_timed() {
        out.push_str(&format!(
            "<div class='calitem timed {}'{}><div class='caltime'>{}</div>{}</div>",
            item.class,
            tooltip(item),
            time_label(item),
            escape_text(&item.summary)
        ));
    }

    out
}

/// ` title='...'` built from location and description, or nothing when both
/// are empty.
fn tooltip(item: &DayItem) -> String {
    let parts: Vec<&str> = [item.location.as_deref(), item.description.as_deref()]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect();

    if parts.is_empty() {
        String::new()
    } else {
        format!(" title='{}'", escape_attribute(&parts.join("\n\n")))
    }
}

fn edge_glyph(item: &DayItem) -> &'static str {
    match (item.continues_from_previous, item.continues_to_next) {
        (true, true) => GLYPH_BOTH,
        (true, false) => GLYPH_ENDS_HERE,
        (false, true) => GLYPH_STARTS_HERE,
        (false, false) => "",
    }
}

fn time_label(item: &DayItem) -> String {
    let (start, end) = item
        .times
        .map_or((NaiveTime::MIN, NaiveTime::MIN), |t| (t.start, t.end));
    let hm = |t: NaiveTime| t.format("%H:%M").to_string();

    match (item.continues_from_previous, item.continues_to_next) {
        (true, true) => ELLIPSIS.to_string(),
        (true, false) => format!("{ELLIPSIS}{DASH}{}", hm(end)),
        (false, true) => format!("{}{DASH}{ELLIPSIS}", hm(start)),
        (false, false) => format!("{}{DASH}{}", hm(start), hm(end)),
    }
}
