//! Page template with a single calendar injection point.

use calendrino_core::constants::{CALENDAR_MARKER, RENDER_DATE_MARKER};

use crate::error::{ServiceError, ServiceResult};

/// A page split around its `{{calendar}}` marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTemplate {
    head: String,
    tail: String,
}

impl PageTemplate {
    /// ## Summary
    /// Splits template text at its calendar marker.
    ///
    /// ## Errors
    /// Returns `TemplateError` unless the marker occurs exactly once.
    pub fn parse(text: &str) -> ServiceResult<Self> {
        let count = text.matches(CALENDAR_MARKER).count();
        if count != 1 {
            return Err(ServiceError::TemplateError(format!(
                "expected exactly one {CALENDAR_MARKER} marker, found {count}"
            )));
        }

        let (head, tail) = text
            .split_once(CALENDAR_MARKER)
            .ok_or_else(|| ServiceError::TemplateError(format!("missing {CALENDAR_MARKER} marker")))?;

        Ok(Self {
            head: head.to_string(),
            tail: tail.to_string(),
        })
    }

    /// Substitutes the render date on both sides and injects the calendar.
    #[must_use]
    pub fn render(&self, calendar_html: &str, render_date: &str) -> String {
        let head = self.head.replace(RENDER_DATE_MARKER, render_date);
        let tail = self.tail.replace(RENDER_DATE_MARKER, render_date);

        let mut out = String::with_capacity(head.len() + calendar_html.len() + tail.len());
        out.push_str(&head);
        out.push_str(calendar_html);
        out.push_str(&tail);
        out
    }
}

impl std::str::FromStr for PageTemplate {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
