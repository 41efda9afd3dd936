//! The conversion pipeline from schedule tables to calendar text.
//!
//! `fill` rebuilds merged cells, `builder` turns rows into events using
//! `time_span`, `date` and `timezone`, `render` writes the iCalendar text and
//! `convert` ties the steps together for one table.

pub mod builder;
pub mod convert;
pub mod date;
pub mod event;
pub mod fill;
pub mod render;
pub mod table;
pub mod time_span;
pub mod timezone;
