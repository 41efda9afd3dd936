//! Locating and reading schedule spreadsheets.

pub mod discover;
pub mod excel;

use std::path::Path;

use crate::error::ServiceResult;
use crate::schedule::table::Table;

/// Reads one input file into a [`Table`] whose first row became the header.
pub trait TableReader {
    /// ## Errors
    /// Returns an error if the file cannot be opened or parsed.
    fn read_table(&self, path: &Path) -> ServiceResult<Table>;
}
