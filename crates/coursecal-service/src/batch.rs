//! Whole-directory conversion runs.

use std::path::PathBuf;

use coursecal_core::config::Settings;

use crate::error::{ServiceError, ServiceResult};
use crate::output::{ensure_output_dir, output_base, write_calendars};
use crate::schedule::convert::ScheduleConverter;
use crate::source::TableReader;
use crate::source::discover::{Discovery, find_spreadsheets};

/// An input file converted successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedFile {
    pub input: PathBuf,
    pub outputs: Vec<PathBuf>,
    pub event_count: usize,
}

/// An input file skipped because it could not be read or converted.
#[derive(Debug)]
pub struct FileFailure {
    pub input: PathBuf,
    pub error: ServiceError,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// The source directory did not exist; nothing was attempted.
    pub source_missing: bool,
    pub processed: Vec<ProcessedFile>,
    pub failures: Vec<FileFailure>,
}

impl BatchReport {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// ## Summary
/// Converts every spreadsheet in `settings.input.directory`.
///
/// Files are processed one at a time in sorted order. A file that cannot be
/// read or converted is recorded in the report and produces no output; the
/// remaining files are still processed. A missing source directory is
/// reported, not treated as an error.
///
/// ## Errors
/// Returns an error if the target timezone is invalid, the source directory
/// cannot be listed, or any output cannot be written.
pub fn run_batch(settings: &Settings, reader: &dyn TableReader) -> ServiceResult<BatchReport> {
    let mut report = BatchReport::default();

    let files = match find_spreadsheets(&settings.input.directory, &settings.input.extensions)? {
        Discovery::Missing(directory) => {
            tracing::warn!(directory = %directory.display(), "Source directory not found, nothing to convert");
            report.source_missing = true;
            return Ok(report);
        }
        Discovery::Found(files) => files,
    };

    if files.is_empty() {
        tracing::info!(
            directory = %settings.input.directory.display(),
            "No spreadsheets found"
        );
        return Ok(report);
    }

    let mut converter = ScheduleConverter::new(settings)?;
    ensure_output_dir(&settings.output.directory)?;
    let multiple_inputs = files.len() > 1;

    for input in files {
        tracing::info!(input = %input.display(), language = %settings.language, "Converting schedule");

        let calendars = match reader
            .read_table(&input)
            .and_then(|table| converter.convert(&table, settings.language))
        {
            Ok(calendars) => calendars,
            Err(error) => {
                tracing::error!(input = %input.display(), %error, "Skipping file");
                report.failures.push(FileFailure { input, error });
                continue;
            }
        };

        let base = output_base(settings.output.basename.as_deref(), &input, multiple_inputs);
        let outputs = write_calendars(&settings.output.directory, &base, &calendars)?;

        report.processed.push(ProcessedFile {
            input,
            outputs,
            event_count: calendars.iter().map(|c| c.event_count).sum(),
        });
    }

    tracing::info!(
        processed = report.processed.len(),
        failed = report.failures.len(),
        "Batch finished"
    );
    Ok(report)
}
