//! Extraction of `HH:MM - HH:MM ZONE` session ranges from free text.

use std::sync::LazyLock;

use chrono::NaiveTime;
use regex::Regex;

#[expect(clippy::expect_used, reason = "Pattern is a compile-time constant")]
static TIME_SPAN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{2}:\d{2})\s*-\s*(\d{2}:\d{2})\s*([A-Z]+)").expect("valid time span regex")
});

/// A time range as matched in the cell text, before validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSpanText<'a> {
    pub start: &'a str,
    pub end: &'a str,
    pub zone: &'a str,
}

/// A validated session range in one zone.
///
/// `start < end` is not checked; odd input passes through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSpan {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub zone: String,
}

impl TimeSpan {
    /// Parses both ends as `HH:MM`, rejecting impossible times such as `25:00`.
    #[must_use]
    pub fn parse(text: &TimeSpanText<'_>) -> Option<Self> {
        Self::try_from(*text).ok()
    }
}

impl TryFrom<TimeSpanText<'_>> for TimeSpan {
    type Error = chrono::ParseError;

    fn try_from(text: TimeSpanText<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            start: NaiveTime::parse_from_str(text.start, "%H:%M")?,
            end: NaiveTime::parse_from_str(text.end, "%H:%M")?,
            zone: text.zone.to_string(),
        })
    }
}

/// ## Summary
/// Returns every `HH:MM - HH:MM ZONE` match in `text`, left to right.
///
/// Separators between ranges (commas, newlines, prose) are ignored. A cell
/// without matches yields an empty vector.
#[must_use]
pub fn extract_time_spans(text: &str) -> Vec<TimeSpanText<'_>> {
    TIME_SPAN_PATTERN
        .captures_iter(text)
        .filter_map(|caps| {
            Some(TimeSpanText {
                start: caps.get(1)?.as_str(),
                end: caps.get(2)?.as_str(),
                zone: caps.get(3)?.as_str(),
            })
        })
        .collect()
}

/// ## Summary
/// Extracts and validates all ranges in `text`, dropping invalid times.
#[must_use]
pub fn parse_time_spans(text: &str) -> Vec<TimeSpan> {
    extract_time_spans(text)
        .iter()
        .filter_map(|raw| {
            let span = TimeSpan::parse(raw);
            if span.is_none() {
                tracing::debug!(start = raw.start, end = raw.end, "Skipping invalid time range");
            }
            span
        })
        .collect()
}
