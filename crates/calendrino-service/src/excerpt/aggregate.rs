//! Window filtering and day bucketing of occurrences.

use calendrino_core::window::DateWindow;
use calendrino_rfc::rfc::ical::event::EventRecord;

use super::bucket::{CalendarData, DayItem, TimeSpan};
use super::expand::Expansion;
use super::occurrence::Occurrence;

/// Files each occurrence that overlaps `window` under every day it touches.
///
/// Touched days outside the window are stored too; only the renderer
/// decides which days are shown.
pub fn bucket_occurrences<'a>(
    data: &mut CalendarData,
    occurrences: impl IntoIterator<Item = Occurrence<'a>>,
    class: &str,
    window: &DateWindow,
) {
    for occurrence in occurrences {
        let (first, last) = (occurrence.first_day(), occurrence.last_day());
        if !window.overlaps(first, last) {
            tracing::trace!(summary = %occurrence.record.summary, %first, %last, "Outside window");
            continue;
        }

        let times = occurrence
            .times()
            .map(|(start, end)| TimeSpan { start, end });
        let record = occurrence.record;

        for day in occurrence.days() {
            data.day_mut(day).push(DayItem {
                summary: record.summary.clone(),
                location: record.location.clone(),
                description: record.description.clone(),
                class: class.to_string(),
                continues_from_previous: day != first,
                continues_to_next: day != last,
                times,
            });
        }
    }
}

/// Builds the day-indexed data for one source.
///
/// An event whose recurrence cannot be evaluated is logged and skipped; the
/// rest of the source is still bucketed.
#[tracing::instrument(skip(records), fields(records = records.len()))]
pub fn build_source_data(records: &[EventRecord], class: &str, window: DateWindow) -> CalendarData {
    let mut data = CalendarData::new();
    let mut skipped = 0_usize;

    for record in records {
        match Expansion::new(record, window) {
            Ok(expansion) => bucket_occurrences(&mut data, expansion.occurrences(), class, &window),
            Err(e) => {
                skipped += 1;
                tracing::warn!(
                    uid = ?record.uid,
                    summary = %record.summary,
                    error = %e,
                    "Skipping event with unusable recurrence"
                );
            }
        }
    }

    tracing::debug!(items = data.item_count(), skipped, "Bucketed source");
    data
}
