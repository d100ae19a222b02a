//! Class-name generation for calendar sources.
//!
//! ## Summary
//! Turns a human-readable source name into a token that is safe to drop into
//! an HTML `class` attribute. Tokens are lowercase, alphanumeric with hyphens.

/// Generate a class-safe slug from a source name.
///
/// Converts to lowercase, replaces spaces and special characters with hyphens,
/// collapses multiple hyphens, and trims edge hyphens.
///
/// Examples:
/// - "Work Calendar" -> "work-calendar"
/// - "Bob's Shifts" -> "bob-s-shifts"
/// - "2024 Holidays" -> "cal-2024-holidays"
#[must_use]
pub fn generate_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    // CSS class names may not start with a digit
    if slug.starts_with(|c: char| c.is_ascii_digit()) {
        slug.insert_str(0, "cal-");
    }
    slug
}
