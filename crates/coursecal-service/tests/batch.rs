//! End-to-end batch runs over scratch directories.
//!
//! Spreadsheet contents come from an in-memory reader keyed by file name, so
//! the tests exercise discovery, conversion and output without workbooks.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use coursecal_core::config::Settings;
use coursecal_core::types::Language;
use coursecal_service::batch::run_batch;
use coursecal_service::error::{ServiceError, ServiceResult};
use coursecal_service::schedule::table::{ScheduleRow, Table};
use coursecal_service::source::TableReader;
use coursecal_service::source::excel::ExcelReader;

struct MemoryReader {
    tables: HashMap<String, Table>,
}

impl TableReader for MemoryReader {
    fn read_table(&self, path: &Path) -> ServiceResult<Table> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        self.tables.get(name).cloned().ok_or_else(|| ServiceError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, "unreadable"),
        })
    }
}

fn schedule_table() -> Table {
    let mut table = Table::new(
        ["Date", "Chinese date\n(7-10pm)", "Title", "Type", "Module", "Time", "Golden Tutor"]
            .map(String::from)
            .to_vec(),
    );

    let mut row: ScheduleRow = [
        ("Date", "15/01/2024"),
        ("Title", "Lecture 1"),
        ("Type", "Lecture"),
        ("Time", "09:00 - 11:00 BST"),
    ]
    .into_iter()
    .collect();
    row.set("Module", 1_i64);
    row.set(
        "Chinese date\n(7-10pm)",
        NaiveDate::from_ymd_opt(2024, 1, 18)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid datetime"),
    );
    table.push_row(row);
    table
}

fn settings_in(root: &Path) -> Settings {
    let mut settings = Settings::default();
    settings.input.directory = root.join("source");
    settings.output.directory = root.join("ics");
    settings
}

fn touch(dir: &Path, name: &str) -> PathBuf {
    std::fs::create_dir_all(dir).expect("create dir");
    let path = dir.join(name);
    std::fs::write(&path, b"").expect("write file");
    path
}

fn output_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("read output dir")
        .filter_map(|e| e.ok()?.file_name().into_string().ok())
        .collect();
    names.sort();
    names
}

#[test_log::test]
fn converts_each_file_into_both_variants() {
    let root = tempfile::tempdir().expect("tempdir");
    let settings = settings_in(root.path());
    touch(&settings.input.directory, "cohort.xlsx");
    touch(&settings.input.directory, "~$cohort.xlsx");

    let reader = MemoryReader {
        tables: HashMap::from([("cohort.xlsx".to_string(), schedule_table())]),
    };

    let report = run_batch(&settings, &reader).expect("batch runs");

    assert!(report.is_success());
    assert!(!report.source_missing);
    assert_eq!(report.processed.len(), 1);
    assert_eq!(report.processed[0].event_count, 2);
    assert_eq!(
        output_names(&settings.output.directory),
        vec!["cohort_chinese.ics", "cohort_english.ics"]
    );

    let english = std::fs::read_to_string(settings.output.directory.join("cohort_english.ics"))
        .expect("read english calendar");
    assert!(english.starts_with("BEGIN:VCALENDAR\nVERSION:2.0\n"));
    assert!(english.contains("DTSTART;TZID=Asia/Shanghai:20240115T170000\n"));
    assert!(english.contains("DESCRIPTION:Module1\\; Lecture\n"));
    assert!(english.ends_with("END:VCALENDAR\n"));

    let chinese = std::fs::read_to_string(settings.output.directory.join("cohort_chinese.ics"))
        .expect("read chinese calendar");
    assert!(chinese.contains("DTSTART;TZID=Asia/Shanghai:20240118T190000\n"));
    assert!(chinese.contains("LOCATION:Golden\n"));
}

#[test]
fn missing_source_directory_is_reported() {
    let root = tempfile::tempdir().expect("tempdir");
    let settings = settings_in(root.path());
    let reader = MemoryReader {
        tables: HashMap::new(),
    };

    let report = run_batch(&settings, &reader).expect("batch runs");

    assert!(report.source_missing);
    assert!(report.is_success());
    assert!(!settings.output.directory.exists());
}

#[test_log::test]
fn unreadable_file_does_not_stop_the_run() {
    let root = tempfile::tempdir().expect("tempdir");
    let mut settings = settings_in(root.path());
    settings.language = Language::English;
    settings.output.basename = Some("cqf".into());
    touch(&settings.input.directory, "a_broken.xlsx");
    touch(&settings.input.directory, "b_good.xlsx");

    let reader = MemoryReader {
        tables: HashMap::from([("b_good.xlsx".to_string(), schedule_table())]),
    };

    let report = run_batch(&settings, &reader).expect("batch runs");

    assert!(!report.is_success());
    let broken = settings.input.directory.join("a_broken.xlsx");
    let failed: Vec<_> = report.failures.iter().map(|f| &f.input).collect();
    assert_eq!(failed, vec![&broken]);
    assert_eq!(report.processed.len(), 1);
    assert_eq!(
        output_names(&settings.output.directory),
        vec!["cqf_b_good_english.ics"]
    );
}

#[test]
fn corrupt_workbook_is_isolated_with_the_excel_reader() {
    let root = tempfile::tempdir().expect("tempdir");
    let settings = settings_in(root.path());
    let path = touch(&settings.input.directory, "corrupt.xlsx");
    std::fs::write(&path, b"this is not a zip archive").expect("write file");

    let report = run_batch(&settings, &ExcelReader::default()).expect("batch runs");

    assert_eq!(report.failures.len(), 1);
    assert!(matches!(
        report.failures[0].error,
        ServiceError::Spreadsheet { .. }
    ));
    assert!(output_names(&settings.output.directory).is_empty());
}

#[test]
fn unwritable_output_is_fatal() {
    let root = tempfile::tempdir().expect("tempdir");
    let mut settings = settings_in(root.path());
    touch(&settings.input.directory, "cohort.xlsx");
    let blocker = touch(root.path(), "blocker");
    settings.output.directory = blocker.join("ics");

    let reader = MemoryReader {
        tables: HashMap::from([("cohort.xlsx".to_string(), schedule_table())]),
    };

    let err = run_batch(&settings, &reader).expect_err("output cannot be created");
    assert!(matches!(err, ServiceError::Output { .. }));
}
