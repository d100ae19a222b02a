//! iCalendar core models (RFC 5545).
//!
//! These types hold just enough of a document to drive event extraction:
//! the component tree, properties with their parameters, and typed values
//! for the date, duration and recurrence properties the renderer consumes.

mod component;
mod moment;
mod parameter;
mod property;
mod value;

pub use component::{Component, ComponentKind, ICalendar};
pub use moment::{Moment, Zone};
pub use parameter::Parameter;
pub use property::{ContentLine, Property, names};
pub use value::Value;
