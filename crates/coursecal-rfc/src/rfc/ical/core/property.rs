//! iCalendar property types (RFC 5545 §3.1, §3.8).

use super::{Parameter, Value};

/// A typed iCalendar property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Property name (normalized to uppercase).
    pub name: String,
    /// Parameters in order of insertion.
    pub params: Vec<Parameter>,
    pub value: Value,
}

impl Property {
    /// Creates a property with a text value.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            params: Vec::new(),
            value: Value::Text(value.into()),
        }
    }

    /// Creates a property with a datetime value.
    ///
    /// Zoned values carry their zone as a `TZID` parameter.
    #[must_use]
    pub fn datetime(name: impl Into<String>, dt: super::DateTime) -> Self {
        let params = dt.tzid().map(Parameter::tzid).into_iter().collect();
        Self {
            name: name.into().to_ascii_uppercase(),
            params,
            value: Value::DateTime(dt),
        }
    }

    /// Creates a property with a duration value.
    #[must_use]
    pub fn duration(name: impl Into<String>, d: super::Duration) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            params: Vec::new(),
            value: Value::Duration(d),
        }
    }

    /// Returns the value as text if it is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        self.value.as_text()
    }
}

/// Property and value names used when publishing calendars.
pub mod names {
    // Calendar properties
    pub const PRODID: &str = "PRODID";
    pub const VERSION: &str = "VERSION";
    pub const CALNAME: &str = "X-WR-CALNAME";

    // Event properties
    pub const UID: &str = "UID";
    pub const DTSTART: &str = "DTSTART";
    pub const DTEND: &str = "DTEND";
    pub const SUMMARY: &str = "SUMMARY";
    pub const DESCRIPTION: &str = "DESCRIPTION";
    pub const LOCATION: &str = "LOCATION";

    // Alarm properties
    pub const TRIGGER: &str = "TRIGGER";
    pub const ACTION: &str = "ACTION";
    pub const ACTION_DISPLAY: &str = "DISPLAY";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::ical::core::DateTime;
    use chrono::NaiveDate;

    #[test]
    fn property_text() {
        let prop = Property::text("summary", "Lecture - Derivatives");
        assert_eq!(prop.name, "SUMMARY");
        assert_eq!(prop.as_text(), Some("Lecture - Derivatives"));
    }

    #[test]
    fn zoned_datetime_adds_tzid() {
        let local = NaiveDate::from_ymd_opt(2024, 1, 15)
            .and_then(|d| d.and_hms_opt(9, 0, 0))
            .expect("valid datetime");
        let prop = Property::datetime(names::DTSTART, DateTime::zoned(local, "Europe/London"));

        assert_eq!(prop.params, vec![Parameter::tzid("Europe/London")]);
        assert!(matches!(&prop.value, Value::DateTime(dt) if dt.local == local));
    }

    #[test]
    fn floating_datetime_has_no_params() {
        let local = NaiveDate::from_ymd_opt(2024, 1, 15)
            .and_then(|d| d.and_hms_opt(9, 0, 0))
            .expect("valid datetime");
        let prop = Property::datetime(names::DTEND, DateTime::floating(local));
        assert!(prop.params.is_empty());
    }
}
