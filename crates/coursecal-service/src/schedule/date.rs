//! Date validation and the per-row date normalization step.

use chrono::NaiveDate;
use coursecal_core::config::DateKind;

use super::table::CellValue;

/// Pattern used when no explicit date format is configured.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// A row's date after normalization, tagged with where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedDate {
    /// Text cell parsed with the configured pattern.
    Text(NaiveDate),
    /// Native spreadsheet date value.
    Native(NaiveDate),
}

impl ResolvedDate {
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        match self {
            Self::Text(date) | Self::Native(date) => date,
        }
    }
}

/// ## Summary
/// Coerces `value` to text and parses it exactly under `format`.
///
/// Surrounding whitespace is ignored. Native date cells coerce to
/// `YYYY-MM-DD HH:MM:SS` and therefore only validate against a pattern of
/// that shape.
#[must_use]
pub fn validate_date(value: &CellValue, format: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.to_string().trim(), format).ok()
}

/// Returns whether [`validate_date`] accepts `value` under `format`.
#[must_use]
pub fn is_valid_date(value: &CellValue, format: &str) -> bool {
    validate_date(value, format).is_some()
}

/// ## Summary
/// Normalizes a date cell once, accepting native dates and text dates.
///
/// Text goes through [`validate_date`] with `format`, or
/// [`ISO_DATE_FORMAT`] when `None`. Every date gate of the pipeline ends up
/// here.
#[must_use]
pub fn resolve_date(value: &CellValue, format: Option<&str>) -> Option<ResolvedDate> {
    match value {
        CellValue::DateTime(dt) => Some(ResolvedDate::Native(dt.date())),
        CellValue::Text(_) => {
            validate_date(value, format.unwrap_or(ISO_DATE_FORMAT)).map(ResolvedDate::Text)
        }
        CellValue::Empty
        | CellValue::Integer(_)
        | CellValue::Number(_)
        | CellValue::Bool(_) => None,
    }
}

/// ## Summary
/// Resolves a date cell under a variant's [`DateKind`] policy.
#[must_use]
pub fn resolve_date_for(value: &CellValue, kind: DateKind, format: &str) -> Option<ResolvedDate> {
    match kind {
        DateKind::Any => resolve_date(value, Some(format)),
        DateKind::NativeOnly => value
            .as_datetime()
            .map(|dt| ResolvedDate::Native(dt.date())),
    }
}
