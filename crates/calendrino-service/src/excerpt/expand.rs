//! Window-aware recurrence expansion.

use calendrino_core::window::DateWindow;
use calendrino_rfc::rfc::ical::event::EventRecord;
use rrule::{RRuleSet, Tz};

use super::occurrence::Occurrence;
use super::recurrence::{build_rule_set, reattach, wall_clock};
use crate::error::ServiceResult;

/// The occurrences of one event that matter for a window.
///
/// Holds the evaluated rule set (if any); [`Expansion::occurrences`] can be
/// called repeatedly and restarts from the first instance each time.
#[derive(Debug)]
pub struct Expansion<'a> {
    record: &'a EventRecord,
    window: DateWindow,
    rule_set: Option<RRuleSet>,
}

impl<'a> Expansion<'a> {
    /// Prepares the expansion of `record` against `window`.
    ///
    /// Events without an RRULE expand to themselves.
    ///
    /// ## Errors
    /// Returns `RecurrenceError` if the event's rules cannot be evaluated.
    pub fn new(record: &'a EventRecord, window: DateWindow) -> ServiceResult<Self> {
        let rule_set = record
            .recurrence
            .as_ref()
            .map(|spec| build_rule_set(&record.start, spec))
            .transpose()?;

        Ok(Self {
            record,
            window,
            rule_set,
        })
    }

    #[must_use]
    pub fn is_recurring(&self) -> bool {
        self.rule_set.is_some()
    }

    /// Lazily yields occurrences in start order.
    ///
    /// A non-recurring record yields itself once, wherever it lies.
    /// Recurring instances starting before the window are skipped, even when
    /// they run into it, and generation stops at the first instance starting
    /// after the window.
    pub fn occurrences(&self) -> impl Iterator<Item = Occurrence<'a>> + '_ {
        let single = self
            .rule_set
            .is_none()
            .then(|| Occurrence::of_record(self.record));

        let window = self.window;
        let recurring = self
            .rule_set
            .iter()
            .flatten()
            .filter_map(|instance| self.instance(&instance))
            .skip_while(move |occurrence| occurrence.first_day() < window.start())
            .take_while(move |occurrence| occurrence.first_day() <= window.end());

        single.into_iter().chain(recurring)
    }

    fn instance(&self, instance: &chrono::DateTime<Tz>) -> Option<Occurrence<'a>> {
        let start = reattach(&self.record.start, instance);
        let end_value = wall_clock(instance).checked_add_signed(self.record.duration());
        let Some(end_value) = end_value else {
            tracing::warn!(uid = ?self.record.uid, start = %start, "Occurrence end out of range; skipping");
            return None;
        };
        let end = self.record.end.with_naive(end_value);
        tracing::trace!(start = %start, end = %end, "Generated occurrence");
        Some(Occurrence::new(self.record, start, end))
    }
}
