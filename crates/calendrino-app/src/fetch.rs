//! Retrieval of calendar source text.

use std::time::Duration;

use calendrino_core::config::{HttpConfig, SourceConfig};

use crate::error::{AppError, AppResult};

pub const USER_AGENT: &str = const_str::concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Where a source's text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation<'a> {
    Remote(&'a str),
    File(&'a str),
}

impl<'a> SourceLocation<'a> {
    #[must_use]
    pub fn classify(location: &'a str) -> Self {
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Remote(location)
        } else {
            Self::File(location.strip_prefix("file://").unwrap_or(location))
        }
    }
}

/// Reads calendar text from URLs and local files.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    /// ## Summary
    /// Creates a fetcher whose requests time out after `http.timeout_secs`.
    ///
    /// ## Errors
    /// Returns `FetchError` if the HTTP client cannot be built.
    pub fn new(http: &HttpConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(http.timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    /// ## Summary
    /// Fetches the text of one source.
    ///
    /// ## Errors
    /// Returns `FetchError` for failed or non-success HTTP responses and
    /// `IoError` for unreadable files.
    #[tracing::instrument(skip(self))]
    pub async fn fetch(&self, location: &str) -> AppResult<String> {
        match SourceLocation::classify(location) {
            SourceLocation::Remote(url) => {
                let response = self.client.get(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(AppError::FetchError(format!("{url} answered {status}")));
                }
                let text = response.text().await?;
                tracing::debug!(bytes = text.len(), "Fetched remote source");
                Ok(text)
            }
            SourceLocation::File(path) => {
                let text = tokio::fs::read_to_string(path).await?;
                tracing::debug!(bytes = text.len(), "Read local source");
                Ok(text)
            }
        }
    }

    /// Fetches every source concurrently, keeping source order.
    pub async fn fetch_all(&self, sources: &[SourceConfig]) -> Vec<AppResult<String>> {
        futures::future::join_all(sources.iter().map(|source| self.fetch(&source.location))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_locations() {
        assert_eq!(
            SourceLocation::classify("https://example.com/a.ics"),
            SourceLocation::Remote("https://example.com/a.ics")
        );
        assert_eq!(
            SourceLocation::classify("HTTP://example.com/a.ics"),
            SourceLocation::Remote("HTTP://example.com/a.ics")
        );
        assert_eq!(
            SourceLocation::classify("file:///tmp/a.ics"),
            SourceLocation::File("/tmp/a.ics")
        );
        assert_eq!(SourceLocation::classify("cal/home.ics"), SourceLocation::File("cal/home.ics"));
    }

    #[test]
    fn user_agent_names_the_package() {
        assert!(USER_AGENT.starts_with("calendrino-app/"));
    }

    #[test_log::test(tokio::test)]
    async fn fetch_all_keeps_order_and_reports_failures() {
        let dir = std::env::temp_dir().join(format!("calendrino-fetch-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.expect("temp dir");
        let present = dir.join("present.ics");
        tokio::fs::write(&present, "BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n")
            .await
            .expect("write fixture");

        let sources = vec![
            SourceConfig {
                location: dir.join("missing.ics").to_string_lossy().into_owned(),
                class: None,
            },
            SourceConfig {
                location: present.to_string_lossy().into_owned(),
                class: None,
            },
        ];

        let fetcher = Fetcher::new(&HttpConfig { timeout_secs: 5 }).expect("client builds");
        let results = fetcher.fetch_all(&sources).await;

        assert!(matches!(results[0], Err(AppError::IoError(_))));
        assert_eq!(
            results[1].as_deref().expect("fixture read"),
            "BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n"
        );

        tokio::fs::remove_dir_all(&dir).await.expect("cleanup");
    }
}
