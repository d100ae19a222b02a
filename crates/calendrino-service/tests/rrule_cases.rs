//! Recurring events decoded from iCalendar text and expanded against a window.

mod rrule_cases_data;

use rrule_cases_data::{assert_case, rrule_cases};

#[test_log::test]
fn rrule_cases_expand() {
    for case in rrule_cases() {
        assert_case(&case);
    }
}
