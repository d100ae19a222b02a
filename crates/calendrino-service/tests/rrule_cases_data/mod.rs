use calendrino_core::window::DateWindow;
use calendrino_rfc::rfc::ical::event::decode_events;
use calendrino_service::excerpt::Expansion;
use chrono::NaiveDate;

/// One recurring VEVENT expanded against a window.
pub struct RRuleCase {
    pub name: &'static str,
    /// VEVENT body lines, without BEGIN/END.
    pub event: &'static str,
    pub window: (&'static str, &'static str),
    /// Occurrence starts as iCalendar text.
    pub expected: Option<&'static [&'static str]>,
    pub expected_len: Option<usize>,
}

#[expect(clippy::too_many_lines)]
pub fn rrule_cases() -> Vec<RRuleCase> {
    vec![
        RRuleCase {
            name: "daily_basic",
            event: "DTSTART:20120201T093000Z\nDTEND:20120201T103000Z\nRRULE:FREQ=DAILY;COUNT=3",
            window: ("2012-02-01", "2012-02-29"),
            expected: Some(&["20120201T093000Z", "20120202T093000Z", "20120203T093000Z"]),
            expected_len: None,
        },
        RRuleCase {
            name: "weekly_byday",
            event: "DTSTART:19970902T090000\nRRULE:FREQ=WEEKLY;COUNT=4;BYDAY=TU,TH",
            window: ("1997-09-01", "1997-09-30"),
            expected: Some(&[
                "19970902T090000",
                "19970904T090000",
                "19970909T090000",
                "19970911T090000",
            ]),
            expected_len: None,
        },
        RRuleCase {
            name: "monthly_bymonthday",
            event: "DTSTART:20120101T090000\nRRULE:FREQ=MONTHLY;COUNT=3;BYMONTHDAY=1",
            window: ("2012-01-01", "2012-12-31"),
            expected: Some(&["20120101T090000", "20120201T090000", "20120301T090000"]),
            expected_len: None,
        },
        RRuleCase {
            name: "yearly_all_day_exdate",
            event: "DTSTART;VALUE=DATE:20150601\nDTEND;VALUE=DATE:20150602\nRRULE:FREQ=YEARLY\nEXDATE;VALUE=DATE:20170601",
            window: ("2015-01-01", "2019-12-31"),
            expected: Some(&["20150601", "20160601", "20180601", "20190601"]),
            expected_len: None,
        },
        RRuleCase {
            name: "hourly_clipped_to_window",
            event: "DTSTART:20120101T220000\nRRULE:FREQ=HOURLY;COUNT=5",
            window: ("2012-01-02", "2012-01-02"),
            expected: Some(&["20120102T000000", "20120102T010000", "20120102T020000"]),
            expected_len: None,
        },
        RRuleCase {
            name: "interval_daily",
            event: "DTSTART;VALUE=DATE:20120101\nRRULE:FREQ=DAILY;INTERVAL=10;COUNT=4",
            window: ("2012-01-05", "2012-12-31"),
            expected: Some(&["20120111", "20120121", "20120131"]),
            expected_len: None,
        },
        RRuleCase {
            name: "rdate_exdate",
            event: "DTSTART:20120201T093000Z\nRRULE:FREQ=DAILY;COUNT=3\nRDATE:20120210T093000Z\nEXDATE:20120202T093000Z",
            window: ("2012-02-01", "2012-02-29"),
            expected: Some(&["20120201T093000Z", "20120203T093000Z", "20120210T093000Z"]),
            expected_len: None,
        },
        RRuleCase {
            name: "exdate_list_on_one_line",
            event: "DTSTART:20120201T093000\nRRULE:FREQ=DAILY;COUNT=5\nEXDATE:20120202T093000,20120204T093000",
            window: ("2012-02-01", "2012-02-29"),
            expected: Some(&["20120201T093000", "20120203T093000", "20120205T093000"]),
            expected_len: None,
        },
        RRuleCase {
            name: "exrule",
            event: "DTSTART:20120201T093000\nRRULE:FREQ=DAILY;COUNT=6\nEXRULE:FREQ=DAILY;INTERVAL=2",
            window: ("2012-02-01", "2012-02-29"),
            expected: Some(&["20120202T093000", "20120204T093000", "20120206T093000"]),
            expected_len: None,
        },
        RRuleCase {
            name: "until_date_only_includes_last_day",
            event: "DTSTART:20120201T093000\nRRULE:FREQ=DAILY;UNTIL=20120203",
            window: ("2012-02-01", "2012-02-29"),
            expected: Some(&["20120201T093000", "20120202T093000", "20120203T093000"]),
            expected_len: None,
        },
        RRuleCase {
            name: "dst_keeps_wall_clock",
            event: "DTSTART;TZID=America/New_York:20210313T090000\nRRULE:FREQ=DAILY;COUNT=3",
            window: ("2021-03-01", "2021-03-31"),
            expected: Some(&["20210313T090000", "20210314T090000", "20210315T090000"]),
            expected_len: None,
        },
        RRuleCase {
            name: "zoned_exdate",
            event: "DTSTART;TZID=Europe/Berlin:20210326T080000\nRRULE:FREQ=DAILY;COUNT=3\nEXDATE;TZID=Europe/Berlin:20210328T080000",
            window: ("2021-03-01", "2021-03-31"),
            expected: Some(&["20210326T080000", "20210327T080000"]),
            expected_len: None,
        },
        RRuleCase {
            name: "rfc_every_day_in_jan",
            event: "DTSTART:19980101T090000\nRRULE:FREQ=YEARLY;UNTIL=20000131T140000Z;BYMONTH=1;BYDAY=SU,MO,TU,WE,TH,FR,SA",
            window: ("1998-01-01", "2000-12-31"),
            expected: None,
            expected_len: Some(93),
        },
        RRuleCase {
            name: "unbounded_stops_at_window_end",
            event: "DTSTART:20000103T120000\nRRULE:FREQ=WEEKLY",
            window: ("2018-01-01", "2018-12-31"),
            expected: None,
            expected_len: Some(53),
        },
    ]
}

pub fn assert_case(case: &RRuleCase) {
    let text = format!(
        "BEGIN:VCALENDAR\nVERSION:2.0\nBEGIN:VEVENT\nUID:{}\nSUMMARY:{}\n{}\nEND:VEVENT\nEND:VCALENDAR\n",
        case.name, case.name, case.event
    );
    let records =
        decode_events(&text).unwrap_or_else(|err| panic!("Failed to decode {}: {err}", case.name));
    assert_eq!(records.len(), 1, "Case {} should decode one event", case.name);

    let window = DateWindow::new(parse_date(case.window.0), parse_date(case.window.1))
        .unwrap_or_else(|err| panic!("Bad window for {}: {err}", case.name));
    let expansion = Expansion::new(&records[0], window)
        .unwrap_or_else(|err| panic!("Failed to expand {}: {err}", case.name));
    assert!(expansion.is_recurring(), "Case {} should recur", case.name);

    let starts: Vec<String> = expansion
        .occurrences()
        .map(|occurrence| occurrence.start().to_string())
        .collect();

    if let Some(expected) = case.expected {
        assert_eq!(starts, expected, "Case {} did not match", case.name);
    }

    if let Some(expected_len) = case.expected_len {
        assert_eq!(
            starts.len(),
            expected_len,
            "Case {} expected {} occurrences",
            case.name,
            expected_len
        );
    }
}

fn parse_date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .unwrap_or_else(|err| panic!("Failed to parse date {value}: {err}"))
}
