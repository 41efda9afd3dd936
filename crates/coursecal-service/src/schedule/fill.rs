//! Reconstruction of values hidden by vertically merged cells.
//!
//! A merged range keeps its value in the first row only; the rows below read
//! back as blank. Filling copies the value down again. Rows whose anchor
//! cell is not a date (legends, headers, notes) are dropped first.

use std::collections::HashMap;

use chrono::NaiveDate;
use coursecal_core::config::{FillMode, ScheduleConfig};

use super::date::resolve_date;
use super::table::{CellValue, ScheduleRow, Table};

/// Parameters of a fill pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillOptions {
    pub anchor_column: String,
    /// Pattern for textual anchor dates; ISO `%Y-%m-%d` when `None`.
    pub date_format: Option<String>,
    pub mode: FillMode,
}

impl FillOptions {
    #[must_use]
    pub fn new(anchor_column: impl Into<String>) -> Self {
        Self {
            anchor_column: anchor_column.into(),
            date_format: None,
            mode: FillMode::Grouped,
        }
    }

    #[must_use]
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = Some(format.into());
        self
    }

    #[must_use]
    pub const fn with_mode(mut self, mode: FillMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn from_config(config: &ScheduleConfig) -> Self {
        Self::new(config.anchor_column.clone())
            .with_date_format(config.date_format.clone())
            .with_mode(config.fill_mode)
    }
}

/// ## Summary
/// Returns a copy of `table` holding only rows with a valid anchor date, with
/// blank cells in every other column filled from the rows above.
///
/// In [`FillMode::Grouped`] a value is only carried within its merge group,
/// the run of consecutive rows sharing one anchor date. A blank with no
/// earlier value in its group stays blank. [`FillMode::Plain`] carries values
/// down the whole column.
///
/// A table without the anchor column yields no rows.
#[must_use]
pub fn fill_merged_cells(table: &Table, options: &FillOptions) -> Table {
    let mut filled = Table::new(table.columns.clone());

    if !table.has_column(&options.anchor_column) {
        tracing::warn!(
            anchor = %options.anchor_column,
            "Anchor column missing, no rows retained"
        );
        return filled;
    }

    let fill_columns: Vec<&String> = table
        .columns
        .iter()
        .filter(|c| **c != options.anchor_column)
        .collect();

    let mut carried: HashMap<&str, CellValue> = HashMap::new();
    let mut current_group: Option<NaiveDate> = None;
    let mut dropped = 0_usize;

    for row in &table.rows {
        let Some(anchor) = resolve_date(
            row.get(&options.anchor_column),
            options.date_format.as_deref(),
        ) else {
            dropped += 1;
            continue;
        };

        let group = anchor.date();
        if options.mode == FillMode::Grouped && current_group != Some(group) {
            carried.clear();
        }
        current_group = Some(group);

        filled.push_row(fill_row(row, &fill_columns, &mut carried));
    }

    tracing::debug!(
        retained = filled.len(),
        dropped,
        mode = ?options.mode,
        "Filled merged cells"
    );

    filled
}

fn fill_row<'a>(
    row: &ScheduleRow,
    columns: &[&'a String],
    carried: &mut HashMap<&'a str, CellValue>,
) -> ScheduleRow {
    let mut out = row.clone();
    for column in columns {
        let cell = row.get(column);
        if cell.is_blank() {
            if let Some(value) = carried.get(column.as_str()) {
                out.set(column.as_str(), value.clone());
            }
        } else {
            carried.insert(column.as_str(), cell.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORMAT: &str = "%d/%m/%Y";

    fn table(rows: &[&[(&str, &str)]]) -> Table {
        let mut t = Table::new(vec!["Date".into(), "Title".into(), "Type".into()]);
        for cells in rows {
            t.push_row(cells.iter().copied().collect());
        }
        t
    }

    fn options(mode: FillMode) -> FillOptions {
        FillOptions::new("Date")
            .with_date_format(FORMAT)
            .with_mode(mode)
    }

    #[test_log::test]
    fn grouped_fill_stays_inside_group() {
        let t = table(&[
            &[("Date", "15/01/2024"), ("Title", "A"), ("Type", "Lecture")],
            &[("Date", "15/01/2024"), ("Title", "B")],
            &[("Date", "16/01/2024"), ("Title", "C")],
            &[("Date", "16/01/2024"), ("Title", "D"), ("Type", "Workshop")],
            &[("Date", "16/01/2024"), ("Title", "E")],
        ]);

        let filled = fill_merged_cells(&t, &options(FillMode::Grouped));
        let types: Vec<Option<&str>> = filled.rows.iter().map(|r| r.text("Type")).collect();

        assert_eq!(
            types,
            vec![
                Some("Lecture"),
                Some("Lecture"),
                None,
                Some("Workshop"),
                Some("Workshop")
            ]
        );
    }

    #[test]
    fn plain_fill_crosses_groups() {
        let t = table(&[
            &[("Date", "15/01/2024"), ("Title", "A"), ("Type", "Lecture")],
            &[("Date", "16/01/2024"), ("Title", "C")],
        ]);

        let filled = fill_merged_cells(&t, &options(FillMode::Plain));
        assert_eq!(filled.rows[1].text("Type"), Some("Lecture"));
    }

    #[test]
    fn invalid_anchor_rows_are_dropped() {
        let t = table(&[
            &[("Date", "Module 1"), ("Title", "Legend"), ("Type", "Lecture")],
            &[("Date", "32/13/2024"), ("Title", "Bad")],
            &[("Date", "15/01/2024"), ("Title", "Good")],
            &[("Title", "No date")],
        ]);

        let filled = fill_merged_cells(&t, &options(FillMode::Grouped));
        assert_eq!(filled.len(), 1);
        assert_eq!(filled.rows[0].text("Title"), Some("Good"));
        // The dropped legend row must not leak its value
        assert_eq!(filled.rows[0].text("Type"), None);
    }

    #[test]
    fn next_value_ends_the_run() {
        let t = table(&[
            &[("Date", "15/01/2024"), ("Title", "A"), ("Type", "Lecture")],
            &[("Date", "15/01/2024"), ("Title", "B"), ("Type", "Workshop")],
            &[("Date", "15/01/2024"), ("Title", "C")],
        ]);

        let filled = fill_merged_cells(&t, &options(FillMode::Grouped));
        assert_eq!(filled.rows[2].text("Type"), Some("Workshop"));
    }

    #[test]
    fn native_anchor_dates_are_accepted() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid datetime");
        let mut t = Table::new(vec!["Date".into(), "Title".into()]);
        let mut row = ScheduleRow::new();
        row.set("Date", date);
        row.set("Title", "Native");
        t.push_row(row);

        let filled = fill_merged_cells(&t, &options(FillMode::Grouped));
        assert_eq!(filled.len(), 1);
    }

    #[test]
    fn missing_anchor_column_yields_empty_table() {
        let t = table(&[&[("Title", "A")]]);
        let filled = fill_merged_cells(&t, &FillOptions::new("When"));
        assert!(filled.is_empty());
        assert_eq!(filled.columns, t.columns);
    }
}
