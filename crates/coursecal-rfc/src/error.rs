use thiserror::Error;

use crate::rfc::ical::tz::TimezoneResolutionError;

/// RFC modelling and timezone errors
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Timezone(#[from] TimezoneResolutionError),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
