pub mod batch;
pub mod error;
pub mod output;
pub mod schedule;
pub mod source;
