//! iCalendar modelling, serialization and timezone resolution for coursecal.

pub mod error;
pub mod rfc;
