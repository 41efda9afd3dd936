//! Naming and writing of `.ics` files.

use std::path::{Path, PathBuf};

use coursecal_core::constants::{ICS_EXTENSION, PARTIAL_FILE_SUFFIX};

use crate::error::{ServiceError, ServiceResult};
use crate::schedule::convert::RenderedCalendar;

/// ## Summary
/// Creates the output directory and its parents if absent.
///
/// ## Errors
/// Returns `ServiceError::Output` if the directory cannot be created.
pub fn ensure_output_dir(directory: &Path) -> ServiceResult<()> {
    std::fs::create_dir_all(directory).map_err(|source| ServiceError::Output {
        path: directory.to_path_buf(),
        source,
    })
}

/// ## Summary
/// Returns the file name prefix for calendars built from `input`.
///
/// A configured `basename` replaces the input stem, except when several
/// inputs are processed in one run; the stem is then kept after the basename
/// so outputs do not overwrite each other.
#[must_use]
pub fn output_base(basename: Option<&str>, input: &Path, multiple_inputs: bool) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    match basename.map(str::trim).filter(|b| !b.is_empty()) {
        Some(basename) if multiple_inputs => format!("{basename}_{stem}"),
        Some(basename) => basename.to_string(),
        None => stem,
    }
}

#[must_use]
pub fn output_file_name(base: &str, suffix: &str) -> String {
    format!("{base}_{suffix}.{ICS_EXTENSION}")
}

/// ## Summary
/// Writes every calendar of one input to `directory`, all or nothing.
///
/// Each calendar is first written to a `.ics.part` sibling. Only when every
/// temporary file is complete are they renamed into place. On failure the
/// temporary files and any already renamed outputs of this call are removed.
///
/// ## Errors
/// Returns `ServiceError::Output` naming the path that could not be written.
pub fn write_calendars(
    directory: &Path,
    base: &str,
    calendars: &[RenderedCalendar],
) -> ServiceResult<Vec<PathBuf>> {
    let targets: Vec<(PathBuf, PathBuf)> = calendars
        .iter()
        .map(|calendar| {
            let stem = format!("{base}_{}", calendar.file_suffix);
            (
                directory.join(format!("{stem}{PARTIAL_FILE_SUFFIX}")),
                directory.join(output_file_name(base, &calendar.file_suffix)),
            )
        })
        .collect();

    for (calendar, (partial, _)) in calendars.iter().zip(&targets) {
        if let Err(source) = std::fs::write(partial, &calendar.contents) {
            remove_all(targets.iter().map(|(p, _)| p));
            return Err(ServiceError::Output {
                path: partial.clone(),
                source,
            });
        }
    }

    for (index, (partial, target)) in targets.iter().enumerate() {
        if let Err(source) = std::fs::rename(partial, target) {
            remove_all(targets.iter().map(|(p, _)| p));
            remove_all(targets[..index].iter().map(|(_, t)| t));
            return Err(ServiceError::Output {
                path: target.clone(),
                source,
            });
        }
        tracing::info!(path = %target.display(), "Wrote calendar");
    }

    Ok(targets.into_iter().map(|(_, target)| target).collect())
}

fn remove_all<'a>(paths: impl Iterator<Item = &'a PathBuf>) {
    for path in paths {
        if path.exists()
            && let Err(error) = std::fs::remove_file(path)
        {
            tracing::warn!(path = %path.display(), %error, "Failed to clean up output");
        }
    }
}
