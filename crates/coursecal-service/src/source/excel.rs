//! Spreadsheet reading through `calamine`.

use std::collections::HashMap;
use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use chrono::{NaiveDate, NaiveDateTime};
use coursecal_core::config::InputConfig;

use super::TableReader;
use crate::error::{ServiceError, ServiceResult};
use crate::schedule::table::{CellValue, ScheduleRow, Table};

/// Reads `.xlsx`, `.xls`, `.xlsm` and `.ods` workbooks.
#[derive(Debug, Clone, Default)]
pub struct ExcelReader {
    sheet: Option<String>,
}

impl ExcelReader {
    /// Reads `sheet`, or the first worksheet when `None`.
    #[must_use]
    pub const fn new(sheet: Option<String>) -> Self {
        Self { sheet }
    }

    #[must_use]
    pub fn from_config(config: &InputConfig) -> Self {
        Self::new(config.sheet.clone())
    }
}

impl TableReader for ExcelReader {
    fn read_table(&self, path: &Path) -> ServiceResult<Table> {
        let spreadsheet_error = |source: calamine::Error| ServiceError::Spreadsheet {
            path: path.to_path_buf(),
            source,
        };

        let mut workbook = open_workbook_auto(path).map_err(spreadsheet_error)?;

        let range = match &self.sheet {
            Some(name) => workbook.worksheet_range(name),
            None => workbook
                .worksheet_range_at(0)
                .ok_or_else(|| ServiceError::EmptyWorkbook(path.to_path_buf()))?,
        }
        .map_err(spreadsheet_error)?;

        let table = table_from_range(&range);
        tracing::debug!(
            path = %path.display(),
            columns = table.columns.len(),
            rows = table.len(),
            "Read worksheet"
        );
        Ok(table)
    }
}

/// ## Summary
/// Converts a worksheet range into a [`Table`] using its first row as the header.
///
/// Header names are trimmed. Blank headers become `Unnamed: {index}` and
/// repeated names get a `.{n}` suffix so every column stays addressable.
#[must_use]
pub fn table_from_range(range: &Range<Data>) -> Table {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Table::default();
    };

    let mut table = Table::new(header_names(header));

    for cells in rows {
        let row: ScheduleRow = table
            .columns
            .iter()
            .zip(cells)
            .map(|(column, data)| (column.clone(), cell_value(data)))
            .filter(|(_, value)| !value.is_blank())
            .collect();
        table.push_row(row);
    }

    table
}

fn header_names(header: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    header
        .iter()
        .enumerate()
        .map(|(index, data)| {
            let name = data.to_string().trim().to_string();
            let name = if name.is_empty() {
                format!("Unnamed: {index}")
            } else {
                name
            };

            let count = seen.entry(name.clone()).or_insert(0);
            let unique = if *count == 0 {
                name
            } else {
                format!("{name}.{count}")
            };
            *count += 1;
            unique
        })
        .collect()
}

/// ## Summary
/// Maps one `calamine` cell onto a [`CellValue`].
///
/// Formula errors read as empty, like a blank cell.
#[must_use]
pub fn cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map_or_else(|| CellValue::Number(dt.as_f64()), CellValue::DateTime),
        Data::DateTimeIso(s) => parse_iso_datetime(s)
            .map_or_else(|| CellValue::Text(s.clone()), CellValue::DateTime),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
