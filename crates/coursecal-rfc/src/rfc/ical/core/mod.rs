//! iCalendar core models (RFC 5545).
//!
//! Only the subset needed to publish event calendars is modelled:
//! calendars, events and alarms carrying text, date-time and duration
//! values. Properties keep insertion order so serialization is
//! deterministic.

mod component;
mod datetime;
mod duration;
mod parameter;
mod property;
mod value;

pub use component::{Component, ComponentKind, ICalendar};
pub use datetime::{DateTime, DateTimeForm};
pub use duration::Duration;
pub use parameter::Parameter;
pub use property::{Property, names};
pub use value::Value;
