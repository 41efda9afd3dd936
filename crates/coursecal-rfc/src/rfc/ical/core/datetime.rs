//! DATE-TIME values (RFC 5545 §3.3.5).

use chrono::NaiveDateTime;

/// How a date-time is anchored in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateTimeForm {
    /// Local time with no zone (form #1).
    Floating,
    /// Local time qualified by a `TZID` parameter (form #3).
    Zoned { tzid: String },
}

/// A DATE-TIME value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTime {
    pub local: NaiveDateTime,
    pub form: DateTimeForm,
}

impl DateTime {
    #[must_use]
    pub const fn floating(local: NaiveDateTime) -> Self {
        Self {
            local,
            form: DateTimeForm::Floating,
        }
    }

    #[must_use]
    pub fn zoned(local: NaiveDateTime, tzid: impl Into<String>) -> Self {
        Self {
            local,
            form: DateTimeForm::Zoned { tzid: tzid.into() },
        }
    }

    /// Returns the TZID for zoned values.
    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        match &self.form {
            DateTimeForm::Zoned { tzid } => Some(tzid),
            DateTimeForm::Floating => None,
        }
    }
}

impl std::fmt::Display for DateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.local.format("%Y%m%dT%H%M%S"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn local() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .and_then(|d| d.and_hms_opt(19, 0, 0))
            .expect("valid datetime")
    }

    #[test]
    fn floating_format() {
        let dt = DateTime::floating(local());
        assert_eq!(dt.to_string(), "20240115T190000");
        assert_eq!(dt.tzid(), None);
    }

    #[test]
    fn zoned_keeps_tzid_out_of_value() {
        let dt = DateTime::zoned(local(), "Asia/Shanghai");
        assert_eq!(dt.to_string(), "20240115T190000");
        assert_eq!(dt.tzid(), Some("Asia/Shanghai"));
    }
}
