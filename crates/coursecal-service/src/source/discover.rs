use std::path::{Path, PathBuf};

use coursecal_core::constants::LOCK_FILE_PREFIX;

use crate::error::{ServiceError, ServiceResult};

/// Outcome of scanning the input directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discovery {
    /// The directory does not exist.
    Missing(PathBuf),
    /// Matching files in lexicographic order, possibly none.
    Found(Vec<PathBuf>),
}

/// ## Summary
/// Lists spreadsheets directly inside `directory`.
///
/// A file matches when its extension is one of `extensions` (compared
/// case-insensitively) and its name does not start with the `~$` lock-file
/// prefix. Subdirectories are not searched.
///
/// ## Errors
/// Returns an error if the directory exists but cannot be listed.
pub fn find_spreadsheets(directory: &Path, extensions: &[String]) -> ServiceResult<Discovery> {
    if !directory.is_dir() {
        tracing::debug!(directory = %directory.display(), "Source directory missing");
        return Ok(Discovery::Missing(directory.to_path_buf()));
    }

    let io_error = |source: std::io::Error| ServiceError::Io {
        path: directory.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(directory).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_file() && is_spreadsheet(&path, extensions) {
            files.push(path);
        }
    }
    files.sort();

    tracing::debug!(directory = %directory.display(), count = files.len(), "Discovered spreadsheets");
    Ok(Discovery::Found(files))
}

fn is_spreadsheet(path: &Path, extensions: &[String]) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if name.starts_with(LOCK_FILE_PREFIX) {
        return false;
    }

    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}
