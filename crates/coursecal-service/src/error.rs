use std::path::PathBuf;

use thiserror::Error;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    RfcError(#[from] coursecal_rfc::error::RfcError),

    #[error(transparent)]
    CoreError(#[from] coursecal_core::error::CoreError),

    #[error(transparent)]
    Timezone(#[from] coursecal_rfc::rfc::ical::tz::TimezoneResolutionError),

    #[error("Failed to read spreadsheet {}: {source}", .path.display())]
    Spreadsheet {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("Spreadsheet {} has no worksheets", .0.display())]
    EmptyWorkbook(PathBuf),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
