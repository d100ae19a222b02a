/// Template markers shared across crates
pub const CALENDAR_MARKER_NAME: &str = "calendar";
pub const CALENDAR_MARKER: &str = const_str::concat!("{{", CALENDAR_MARKER_NAME, "}}");

pub const RENDER_DATE_MARKER_NAME: &str = "renderdate";
pub const RENDER_DATE_MARKER: &str = const_str::concat!("{{", RENDER_DATE_MARKER_NAME, "}}");

/// Anchor emitted once, in the cell for today
pub const TODAY_ANCHOR: &str = "<a name='today' id='today'></a>";

