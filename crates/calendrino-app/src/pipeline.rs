//! Per-source pipeline and document assembly.

use std::path::Path;

use calendrino_core::config::{Settings, SourceConfig};
use calendrino_core::window::DateWindow;
use calendrino_rfc::rfc::ical::event::decode_events;
use calendrino_service::excerpt::{CalendarData, build_source_data, merge};
use calendrino_service::render::{HtmlMonthGrid, PageTemplate, render_document};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use tokio::io::AsyncWriteExt;

use crate::error::AppResult;
use crate::fetch::Fetcher;

/// Page used when `render.template_path` is not set.
pub const DEFAULT_TEMPLATE: &str = include_str!("../assets/template.html");

/// The calendar date of `now` in `zone`.
#[must_use]
pub fn today_in(zone: Tz, now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&zone).date_naive()
}

/// ## Summary
/// Decodes one source and files its events by day.
///
/// ## Errors
/// Returns the decode error; nothing is bucketed for a source that fails to
/// decode.
pub fn decode_source(text: &str, class: &str, window: DateWindow) -> AppResult<CalendarData> {
    let records = decode_events(text)?;
    Ok(build_source_data(&records, class, window))
}

/// Runs every fetched source through decode and bucketing, then merges them
/// in source order.
///
/// A source that failed to fetch or decode is logged and contributes nothing.
pub fn collect_sources(
    sources: &[SourceConfig],
    fetched: Vec<AppResult<String>>,
    window: DateWindow,
) -> CalendarData {
    let per_source = sources.iter().zip(fetched).enumerate().filter_map(|(index, (source, text))| {
        let class = source.class_name(index);
        let result = text.and_then(|text| decode_source(&text, &class, window));
        match result {
            Ok(data) => {
                tracing::info!(source = %source.location, class = %class, items = data.item_count(), "Source ready");
                Some(data)
            }
            Err(e) => {
                tracing::error!(source = %source.location, class = %class, error = %e, "Skipping source");
                None
            }
        }
    });

    merge(per_source)
}

/// ## Summary
/// Reads the page template from `path`, or uses the built-in one.
///
/// ## Errors
/// Returns `IoError` if the file cannot be read and `TemplateError` if it
/// lacks a single calendar marker.
pub async fn load_template(path: Option<&Path>) -> AppResult<PageTemplate> {
    let template = match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Loading page template");
            PageTemplate::parse(&tokio::fs::read_to_string(path).await?)?
        }
        None => PageTemplate::parse(DEFAULT_TEMPLATE)?,
    };
    Ok(template)
}

/// ## Summary
/// Produces the complete calendar page for the moment `now`.
///
/// ## Errors
/// Returns an error for invalid render settings, an unusable template or an
/// HTTP client that cannot be built. Failing sources are not errors.
#[tracing::instrument(skip_all, fields(sources = settings.sources.len()))]
pub async fn render_page(settings: &Settings, now: DateTime<Utc>) -> AppResult<String> {
    let zone = settings.render.timezone()?;
    let grid = HtmlMonthGrid::new(settings.render.first_weekday()?);
    let template = load_template(settings.render.template_path.as_deref()).await?;

    let today = today_in(zone, now);
    let window = DateWindow::around(today, settings.render.look_behind_days, settings.render.look_ahead_days)?;
    tracing::info!(%today, %window, "Rendering excerpt");

    let fetcher = Fetcher::new(&settings.http)?;
    let fetched = fetcher.fetch_all(&settings.sources).await;
    let data = collect_sources(&settings.sources, fetched, window);

    let render_date = now.with_timezone(&zone).format("%Y-%m-%d %H:%M:%S %Z").to_string();
    Ok(render_document(&template, &data, &window, today, &grid, &render_date))
}

/// ## Summary
/// Writes the page to `path`, or to stdout when no path is configured.
///
/// ## Errors
/// Returns `IoError` if writing fails.
pub async fn write_output(path: Option<&Path>, html: &str) -> AppResult<()> {
    match path {
        Some(path) => {
            tokio::fs::write(path, html).await?;
            tracing::info!(path = %path.display(), bytes = html.len(), "Wrote calendar page");
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(html.as_bytes()).await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::error::AppError;

    const HOME: &str = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nBEGIN:VEVENT\r\nSUMMARY:Picnic\r\nDTSTART;VALUE=DATE:20180601\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";
    const WORK: &str = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nBEGIN:VEVENT\r\nSUMMARY:Offsite\r\nDTSTART;VALUE=DATE:20180601\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn source(location: &str, class: Option<&str>) -> SourceConfig {
        SourceConfig {
            location: location.to_string(),
            class: class.map(str::to_string),
        }
    }

    #[test]
    fn today_follows_configured_zone() {
        let now = Utc.with_ymd_and_hms(2018, 1, 1, 23, 30, 0).single().expect("valid instant");
        assert_eq!(today_in(chrono_tz::UTC, now), date(2018, 1, 1));
        assert_eq!(today_in(chrono_tz::Europe::Berlin, now), date(2018, 1, 2));
        assert_eq!(today_in(chrono_tz::America::New_York, now), date(2018, 1, 1));
    }

    #[test_log::test]
    fn failing_sources_are_skipped() {
        let window = DateWindow::new(date(2018, 6, 1), date(2018, 6, 7)).expect("valid window");
        let sources = vec![
            source("home.ics", Some("Home")),
            source("broken.ics", None),
            source("offline.ics", None),
            source("work.ics", None),
        ];
        let fetched = vec![
            Ok(HOME.to_string()),
            Ok("BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\n".to_string()),
            Err(AppError::FetchError("offline".to_string())),
            Ok(WORK.to_string()),
        ];

        let data = collect_sources(&sources, fetched, window);
        let classes: Vec<_> = data
            .day(date(2018, 6, 1))
            .expect("bucket")
            .all_day
            .iter()
            .map(|item| item.class.as_str())
            .collect();
        assert_eq!(classes, vec!["home", "src3"]);
    }

    #[test]
    fn decode_failure_is_reported() {
        let window = DateWindow::new(date(2018, 6, 1), date(2018, 6, 7)).expect("valid window");
        let result = decode_source("BEGIN:VEVENT\r\nEND:VEVENT\r\n", "src0", window);
        assert!(matches!(result, Err(AppError::RfcError(_))));
    }

    #[tokio::test]
    async fn default_template_has_calendar_marker() {
        let template = load_template(None).await.expect("built-in template parses");
        let html = template.render("<table/>", "now");
        assert!(html.contains("<table/>"));
        assert!(!html.contains("{{renderdate}}"));
    }
}
