//! iCalendar component types (RFC 5545 §3.4-3.6).

use super::{Property, names};

/// The component kinds the decoder tells apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// VCALENDAR, the document root.
    Calendar,
    /// VEVENT, whose properties are decoded into typed values.
    Event,
    /// Any other component (VTIMEZONE, VALARM, VTODO, X-components). Kept in
    /// the tree with text-valued properties.
    Other,
}

impl ComponentKind {
    /// Parses a component kind from a string (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("VCALENDAR") {
            Self::Calendar
        } else if s.eq_ignore_ascii_case("VEVENT") {
            Self::Event
        } else {
            Self::Other
        }
    }
}

/// An iCalendar component.
///
/// Components hold properties and nested sub-components; a VCALENDAR holds
/// VEVENTs, which may in turn hold VALARMs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub kind: ComponentKind,
    /// Name as written in `BEGIN:` (uppercased), kept for X-components.
    pub name: String,
    /// Line of the `BEGIN:` line (1-based), or 0 when built in code.
    pub line: usize,
    /// Properties in order of appearance.
    pub properties: Vec<Property>,
    /// Nested sub-components in order of appearance.
    pub children: Vec<Component>,
}

impl Component {
    /// Creates an empty component from its `BEGIN:` name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into().to_ascii_uppercase();
        Self {
            kind: ComponentKind::parse(&name),
            name,
            line: 0,
            properties: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn add_property(&mut self, prop: Property) {
        self.properties.push(prop);
    }

    pub fn add_child(&mut self, child: Component) {
        self.children.push(child);
    }

    /// Returns the first property with the given name.
    #[must_use]
    pub fn get_property(&self, name: &str) -> Option<&Property> {
        self.properties
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Returns all properties with the given name, in document order.
    pub fn get_properties<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Property> {
        self.properties
            .iter()
            .filter(move |p| p.name.eq_ignore_ascii_case(name))
    }

    /// Returns the text value of the first property with the given name.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get_property(name)?.as_text()
    }

    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.text(names::UID)
    }

    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.text(names::SUMMARY)
    }

    /// Collects every component of `kind` at or below this one, depth first
    /// in document order.
    #[must_use]
    pub fn descendants_of_kind(&self, kind: ComponentKind) -> Vec<&Component> {
        let mut found = Vec::new();
        self.collect_of_kind(kind, &mut found);
        found
    }

    fn collect_of_kind<'a>(&'a self, kind: ComponentKind, found: &mut Vec<&'a Component>) {
        if self.kind == kind {
            found.push(self);
        }
        for child in &self.children {
            child.collect_of_kind(kind, found);
        }
    }
}

/// Top-level iCalendar object wrapping the root VCALENDAR.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ICalendar {
    pub root: Component,
}

impl ICalendar {
    /// Returns all VEVENT components anywhere in the document.
    #[must_use]
    pub fn events(&self) -> Vec<&Component> {
        self.root.descendants_of_kind(ComponentKind::Event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::ical::parse::parse;

    fn calendar(body: &str) -> ICalendar {
        let text = format!("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n{body}END:VCALENDAR\r\n");
        parse(&text).expect("valid calendar")
    }

    #[test]
    fn component_kind_parse() {
        assert_eq!(ComponentKind::parse("vcalendar"), ComponentKind::Calendar);
        assert_eq!(ComponentKind::parse("VEVENT"), ComponentKind::Event);
        assert_eq!(ComponentKind::parse("VTODO"), ComponentKind::Other);
        assert_eq!(ComponentKind::parse("X-CUSTOM"), ComponentKind::Other);
    }

    #[test]
    fn component_properties() {
        let ical = calendar(
            "BEGIN:VEVENT\r\nUID:test-uid-123\r\nSUMMARY:Test Event\r\n\
             RRULE:FREQ=DAILY\r\nRRULE:FREQ=WEEKLY\r\nEND:VEVENT\r\n",
        );
        let event = ical.events()[0];

        assert_eq!(event.kind, ComponentKind::Event);
        assert_eq!(event.uid(), Some("test-uid-123"));
        assert_eq!(event.summary(), Some("Test Event"));
        assert_eq!(event.get_properties("rrule").count(), 2);
        assert_eq!(event.text("LOCATION"), None);
    }

    #[test]
    fn events_found_at_any_depth() {
        let ical = calendar(
            "BEGIN:VEVENT\r\nUID:first\r\nEND:VEVENT\r\n\
             BEGIN:X-WRAPPER\r\nBEGIN:VEVENT\r\nUID:nested\r\nEND:VEVENT\r\nEND:X-WRAPPER\r\n\
             BEGIN:VTODO\r\nUID:task\r\nEND:VTODO\r\n",
        );

        assert_eq!(ical.root.kind, ComponentKind::Calendar);
        let uids: Vec<_> = ical.events().iter().filter_map(|e| e.uid()).collect();
        assert_eq!(uids, vec!["first", "nested"]);
    }
}
