//! Calendar events produced from schedule rows.

use chrono::NaiveDateTime;
use coursecal_core::constants::ICALENDAR_VERSION;
use coursecal_rfc::rfc::ical::core::DateTime;

/// A wall-clock instant with an optional zone.
///
/// Without a `tzid` the time is floating and renders without a `TZID`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTime {
    pub local: NaiveDateTime,
    pub tzid: Option<String>,
}

impl EventTime {
    #[must_use]
    pub fn zoned(local: NaiveDateTime, tzid: impl Into<String>) -> Self {
        Self {
            local,
            tzid: Some(tzid.into()),
        }
    }

    #[must_use]
    pub const fn floating(local: NaiveDateTime) -> Self {
        Self { local, tzid: None }
    }
}

impl From<&EventTime> for DateTime {
    fn from(time: &EventTime) -> Self {
        match &time.tzid {
            Some(tzid) => Self::zoned(time.local, tzid.clone()),
            None => Self::floating(time.local),
        }
    }
}

/// One scheduled session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub uid: String,
    pub start: EventTime,
    pub end: EventTime,
    pub summary: String,
    pub description: String,
    pub location: Option<String>,
    pub reminder_minutes: Option<u32>,
}

/// The events of one output variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDocument {
    pub name: String,
    pub product_id: String,
    pub version: String,
    pub events: Vec<CalendarEvent>,
}

impl CalendarDocument {
    #[must_use]
    pub fn new(name: impl Into<String>, product_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            product_id: product_id.into(),
            version: ICALENDAR_VERSION.to_string(),
            events: Vec::new(),
        }
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = CalendarEvent>) {
        self.events.extend(events);
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
