//! Rendering calendar documents to iCalendar text.

use coursecal_core::config::RenderConfig;
use coursecal_rfc::error::RfcResult;
use coursecal_rfc::rfc::ical::build::{SerializeOptions, serialize_with};
use coursecal_rfc::rfc::ical::core::{
    Component, DateTime, Duration, ICalendar, Property, names,
};

use super::event::{CalendarDocument, CalendarEvent};

/// Line terminator of rendered files.
pub const LINE_ENDING: &str = "\n";

const REMINDER_DESCRIPTION: &str = "Reminder";

/// Optional parts of the rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub include_uid: bool,
    pub include_calendar_name: bool,
    pub fold_lines: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_uid: true,
            include_calendar_name: true,
            fold_lines: true,
        }
    }
}

impl From<&RenderConfig> for RenderOptions {
    fn from(config: &RenderConfig) -> Self {
        Self {
            include_uid: config.include_uid,
            include_calendar_name: config.include_calendar_name,
            fold_lines: config.fold_lines,
        }
    }
}

/// Turns [`CalendarDocument`]s into iCalendar text.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarRenderer {
    options: RenderOptions,
}

impl CalendarRenderer {
    #[must_use]
    pub const fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// ## Summary
    /// Builds the component tree for `document`, events in document order.
    #[must_use]
    pub fn to_icalendar(&self, document: &CalendarDocument) -> ICalendar {
        let mut ical = ICalendar::new(&document.version, &document.product_id);
        if self.options.include_calendar_name {
            ical.set_name(&document.name);
        }

        for event in &document.events {
            ical.add_event(self.event_component(event));
        }

        ical
    }

    /// ## Summary
    /// Renders `document` as `\n`-terminated iCalendar text.
    ///
    /// The output depends only on the document and options; rendering twice
    /// yields identical text.
    ///
    /// ## Errors
    /// Returns an error if two events share a UID.
    pub fn render(&self, document: &CalendarDocument) -> RfcResult<String> {
        let ical = self.to_icalendar(document);
        ical.ensure_unique_uids()?;

        Ok(serialize_with(
            &ical,
            &SerializeOptions {
                line_ending: LINE_ENDING,
                fold: self.options.fold_lines,
            },
        ))
    }

    fn event_component(&self, event: &CalendarEvent) -> Component {
        let mut vevent = Component::event();

        if self.options.include_uid {
            vevent.add_property(Property::text(names::UID, &event.uid));
        }
        vevent.add_property(Property::datetime(
            names::DTSTART,
            DateTime::from(&event.start),
        ));
        vevent.add_property(Property::datetime(names::DTEND, DateTime::from(&event.end)));
        vevent.add_property(Property::text(names::SUMMARY, &event.summary));
        vevent.add_property(Property::text(names::DESCRIPTION, &event.description));
        if let Some(location) = &event.location {
            vevent.add_property(Property::text(names::LOCATION, location));
        }

        if let Some(minutes) = event.reminder_minutes {
            let mut alarm = Component::alarm();
            alarm.add_property(Property::duration(
                names::TRIGGER,
                Duration::minutes_before(minutes),
            ));
            alarm.add_property(Property::text(names::ACTION, names::ACTION_DISPLAY));
            alarm.add_property(Property::text(names::DESCRIPTION, REMINDER_DESCRIPTION));
            vevent.add_child(alarm);
        }

        vevent
    }
}
