//! HTML escaping for item text.

/// ## Summary
/// Escapes text for use as element content.
///
/// Escapes: `&`, `<`, `>`
#[must_use]
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// ## Summary
/// Escapes text for use inside a quoted attribute value.
///
/// Escapes: `&`, `<`, `>`, `"`, `'`
#[must_use]
pub fn escape_attribute(s: &str) -> String {
    escape_text(s)
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_escapes_markup_only() {
        assert_eq!(escape_text("Tom & Jerry's <show>"), "Tom &amp; Jerry's &lt;show&gt;");
        assert_eq!(escape_text("plain"), "plain");
    }

    #[test]
    fn attribute_escapes_quotes() {
        assert_eq!(
            escape_attribute("it's \"Room <1>\" & more"),
            "it&#x27;s &quot;Room &lt;1&gt;&quot; &amp; more"
        );
    }

    #[test]
    fn ampersand_is_escaped_once() {
        assert_eq!(escape_attribute("&quot;"), "&amp;quot;");
    }
}
