//! iCalendar (RFC 5545) support.
//!
//! - `core`: component, property and value model
//! - `build`: escaping, folding and serialization
//! - `tz`: timezone identifier resolution

pub mod build;
pub mod core;
pub mod tz;
