//! Turning filled schedule rows into calendar events.

use chrono::{NaiveDate, NaiveDateTime};
use coursecal_core::config::{
    ColumnNames, DescriptionField, ScheduleConfig, TimeSource, VariantConfig,
};
use coursecal_rfc::rfc::ical::tz::TimezoneResolutionError;
use uuid::Uuid;

use super::date::resolve_date_for;
use super::event::{CalendarEvent, EventTime};
use super::table::ScheduleRow;
use super::time_span::{TimeSpan, parse_time_spans};
use super::timezone::TimezoneConverter;

const DESCRIPTION_SEPARATOR: &str = "; ";
const MISSING_MODULE: &str = "N/A";

/// Builds the events of one variant, one row at a time.
#[derive(Debug)]
pub struct EventBuilder<'a> {
    variant: &'a VariantConfig,
    columns: &'a ColumnNames,
    date_format: &'a str,
    converter: &'a mut TimezoneConverter,
}

impl<'a> EventBuilder<'a> {
    #[must_use]
    pub fn new(
        variant: &'a VariantConfig,
        schedule: &'a ScheduleConfig,
        converter: &'a mut TimezoneConverter,
    ) -> Self {
        Self {
            variant,
            columns: &schedule.columns,
            date_format: schedule.date_format.as_str(),
            converter,
        }
    }

    /// ## Summary
    /// Returns the events described by `row`, one per session window.
    ///
    /// Rows without a title or a date acceptable to the variant produce no
    /// events. A time range whose zone cannot be resolved or whose local time
    /// does not exist is skipped; the other ranges of the row still produce
    /// events.
    pub fn build(&mut self, row: &ScheduleRow) -> Vec<CalendarEvent> {
        let Some(title) = cell_text(row, &self.columns.title) else {
            tracing::trace!("Skipping row without title");
            return Vec::new();
        };

        let Some(date) = resolve_date_for(
            row.get(&self.variant.date_column),
            self.variant.date_kind,
            self.date_format,
        ) else {
            tracing::trace!(
                title = %title,
                column = %self.variant.date_column,
                "Skipping row without date"
            );
            return Vec::new();
        };

        let windows = self.session_windows(row, date.date());
        if windows.is_empty() {
            tracing::trace!(title = %title, "Row has no usable session time");
            return Vec::new();
        }

        let summary = self.summary(row, &title);
        let description = self.description(row, &title);

        windows
            .into_iter()
            .map(|(start, end)| CalendarEvent {
                uid: Uuid::new_v4().to_string(),
                start,
                end,
                summary: summary.clone(),
                description: description.clone(),
                location: self.variant.location.clone(),
                reminder_minutes: self.variant.reminder_minutes,
            })
            .collect()
    }

    fn session_windows(&mut self, row: &ScheduleRow, date: NaiveDate) -> Vec<(EventTime, EventTime)> {
        let variant = self.variant;
        match &variant.time {
            TimeSource::Fixed {
                start,
                end,
                timezone,
            } => vec![(
                EventTime::zoned(date.and_time(*start), timezone.clone()),
                EventTime::zoned(date.and_time(*end), timezone.clone()),
            )],
            TimeSource::Column { column } => {
                let text = row.get(column).to_string();
                parse_time_spans(&text)
                    .iter()
                    .filter_map(|span| self.span_window(span, date))
                    .collect()
            }
        }
    }

    fn span_window(&mut self, span: &TimeSpan, date: NaiveDate) -> Option<(EventTime, EventTime)> {
        let start = date.and_time(span.start);
        let end = date.and_time(span.end);

        let window = if self.variant.normalize_timezone {
            self.converted(start, end, &span.zone)
        } else {
            self.converter.resolve(&span.zone).map(|tz| {
                (
                    EventTime::zoned(start, tz.name()),
                    EventTime::zoned(end, tz.name()),
                )
            })
        };

        window
            .inspect_err(|error| {
                tracing::warn!(
                    zone = %span.zone,
                    %date,
                    %error,
                    "Skipping time range"
                );
            })
            .ok()
    }

    fn converted(
        &mut self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        zone: &str,
    ) -> Result<(EventTime, EventTime), TimezoneResolutionError> {
        let target = self.converter.target().name();
        let start = self.converter.to_target(start, zone)?;
        let end = self.converter.to_target(end, zone)?;
        Ok((
            EventTime::zoned(start, target),
            EventTime::zoned(end, target),
        ))
    }

    fn summary(&self, row: &ScheduleRow, title: &str) -> String {
        match cell_text(row, &self.columns.kind) {
            Some(kind) => format!("{kind} - {title}"),
            None => title.to_string(),
        }
    }

    fn description(&self, row: &ScheduleRow, title: &str) -> String {
        self.variant
            .description
            .iter()
            .filter_map(|field| match field {
                DescriptionField::Module => Some(format!(
                    "Module{}",
                    row.get(&self.columns.module)
                        .as_integer()
                        .map_or_else(|| MISSING_MODULE.to_string(), |n| n.to_string())
                )),
                DescriptionField::Type => cell_text(row, &self.columns.kind),
                DescriptionField::Tutor => cell_text(row, &self.columns.tutor),
                DescriptionField::Title => Some(title.to_string()),
            })
            .collect::<Vec<_>>()
            .join(DESCRIPTION_SEPARATOR)
    }
}

/// Returns the trimmed display text of a non-blank cell of any kind.
fn cell_text(row: &ScheduleRow, column: &str) -> Option<String> {
    let cell = row.get(column);
    (!cell.is_blank()).then(|| cell.to_string().trim().to_string())
}
