//! Conversion of one schedule table into rendered calendars.

use coursecal_core::config::{Settings, TimeSource, VariantConfig};
use coursecal_core::types::{Language, VariantKind};

use super::builder::EventBuilder;
use super::event::CalendarDocument;
use super::fill::{FillOptions, fill_merged_cells};
use super::render::{CalendarRenderer, RenderOptions};
use super::table::Table;
use super::timezone::TimezoneConverter;
use crate::error::ServiceResult;

/// The text of one variant's calendar, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCalendar {
    pub kind: VariantKind,
    pub file_suffix: String,
    pub event_count: usize,
    pub contents: String,
}

/// Runs fill, event building and rendering for whole tables.
#[derive(Debug)]
pub struct ScheduleConverter<'a> {
    settings: &'a Settings,
    timezones: TimezoneConverter,
    renderer: CalendarRenderer,
}

impl<'a> ScheduleConverter<'a> {
    /// ## Summary
    /// Prepares a converter for `settings`.
    ///
    /// ## Errors
    /// Returns an error if the target timezone cannot be resolved.
    pub fn new(settings: &'a Settings) -> ServiceResult<Self> {
        Ok(Self {
            settings,
            timezones: TimezoneConverter::from_config(&settings.schedule)?,
            renderer: CalendarRenderer::new(RenderOptions::from(&settings.render)),
        })
    }

    /// ## Summary
    /// Builds the calendar documents selected by `language` from a raw table.
    ///
    /// The table is filled once and shared by all variants. A variant whose
    /// columns are missing yields an empty document.
    #[must_use]
    pub fn documents(&mut self, table: &Table, language: Language) -> Vec<(VariantKind, CalendarDocument)> {
        let filled = fill_merged_cells(table, &FillOptions::from_config(&self.settings.schedule));

        language
            .variants()
            .iter()
            .map(|&kind| {
                let variant = self.settings.variant(kind);
                warn_missing_columns(kind, variant, &filled);

                let mut document =
                    CalendarDocument::new(&variant.name, &self.settings.schedule.product_id);
                let mut builder =
                    EventBuilder::new(variant, &self.settings.schedule, &mut self.timezones);
                for row in &filled.rows {
                    document.extend(builder.build(row));
                }

                tracing::debug!(variant = %kind, events = document.len(), "Built calendar");
                (kind, document)
            })
            .collect()
    }

    /// ## Summary
    /// Converts `table` into one rendered calendar per selected variant.
    ///
    /// ## Errors
    /// Returns an error if a calendar fails UID validation while rendering.
    pub fn convert(&mut self, table: &Table, language: Language) -> ServiceResult<Vec<RenderedCalendar>> {
        self.documents(table, language)
            .into_iter()
            .map(|(kind, document)| -> ServiceResult<RenderedCalendar> {
                Ok(RenderedCalendar {
                    kind,
                    file_suffix: self.settings.variant(kind).file_suffix.clone(),
                    event_count: document.len(),
                    contents: self.renderer.render(&document)?,
                })
            })
            .collect()
    }
}

fn warn_missing_columns(kind: VariantKind, variant: &VariantConfig, table: &Table) {
    let time_column = match &variant.time {
        TimeSource::Column { column } => Some(column.as_str()),
        TimeSource::Fixed { .. } => None,
    };

    for column in std::iter::once(variant.date_column.as_str()).chain(time_column) {
        if !table.has_column(column) {
            tracing::warn!(variant = %kind, column = %column, "Column missing, variant will be empty");
        }
    }
}
