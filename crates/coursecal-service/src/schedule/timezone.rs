//! Conversion of session times into the reference timezone.

use chrono::NaiveDateTime;
use chrono_tz::Tz;
use coursecal_core::config::ScheduleConfig;
use coursecal_rfc::rfc::ical::tz::{TimeZoneResolver, TimezoneResolutionError, localize};

use crate::error::ServiceResult;

/// Converts local wall-clock times to a fixed target zone.
#[derive(Debug, Clone)]
pub struct TimezoneConverter {
    resolver: TimeZoneResolver,
    target: Tz,
}

impl TimezoneConverter {
    /// ## Summary
    /// Creates a converter targeting `target`, resolved through `resolver`.
    ///
    /// ## Errors
    /// Returns an error if the target zone cannot be resolved.
    pub fn new(mut resolver: TimeZoneResolver, target: &str) -> ServiceResult<Self> {
        let target = resolver.resolve(target)?;
        Ok(Self { resolver, target })
    }

    /// ## Summary
    /// Builds a converter from the schedule section of the settings.
    ///
    /// ## Errors
    /// Returns an error if `schedule.target_timezone` cannot be resolved.
    pub fn from_config(config: &ScheduleConfig) -> ServiceResult<Self> {
        let resolver = TimeZoneResolver::with_aliases(
            config
                .timezone_aliases
                .iter()
                .map(|(abbr, zone)| (abbr.as_str(), zone.clone())),
        );
        Self::new(resolver, &config.target_timezone)
    }

    #[must_use]
    pub const fn target(&self) -> Tz {
        self.target
    }

    /// ## Summary
    /// Resolves an identifier or abbreviation such as `BST`.
    ///
    /// ## Errors
    /// Returns an error for unknown or ambiguous identifiers.
    pub fn resolve(&mut self, zone: &str) -> Result<Tz, TimezoneResolutionError> {
        self.resolver.resolve(zone)
    }

    /// ## Summary
    /// Returns the target-zone wall-clock time for `local` observed in `zone`.
    ///
    /// The zone's offset is taken from the rules in force on that date, so a
    /// `BST` label on a winter date uses London winter time.
    ///
    /// ## Errors
    /// Returns an error if `zone` cannot be resolved or `local` falls in a DST gap.
    pub fn to_target(
        &mut self,
        local: NaiveDateTime,
        zone: &str,
    ) -> Result<NaiveDateTime, TimezoneResolutionError> {
        let source = self.resolve(zone)?;
        Self::convert(local, source, self.target)
    }

    /// ## Summary
    /// Converts a wall-clock time between two zones.
    ///
    /// ## Errors
    /// Returns an error if `local` falls in a DST gap of `from`.
    pub fn convert(
        local: NaiveDateTime,
        from: Tz,
        to: Tz,
    ) -> Result<NaiveDateTime, TimezoneResolutionError> {
        Ok(localize(local, from)?.with_timezone(&to).naive_local())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, 0))
            .expect("valid datetime")
    }

    fn shanghai() -> TimezoneConverter {
        TimezoneConverter::new(TimeZoneResolver::new(), "Asia/Shanghai").expect("valid target")
    }

    #[test]
    fn bst_label_in_winter_uses_gmt_offset() {
        let mut converter = shanghai();
        let converted = converter
            .to_target(at(2024, 1, 15, 9, 0), "BST")
            .expect("converts");
        assert_eq!(converted, at(2024, 1, 15, 17, 0));
    }

    #[test]
    fn bst_label_in_summer_uses_daylight_offset() {
        let mut converter = shanghai();
        let converted = converter
            .to_target(at(2024, 7, 15, 9, 0), "BST")
            .expect("converts");
        assert_eq!(converted, at(2024, 7, 15, 16, 0));
    }

    #[test]
    fn conversion_can_cross_midnight() {
        let mut converter = shanghai();
        let converted = converter
            .to_target(at(2024, 1, 15, 20, 0), "GMT")
            .expect("converts");
        assert_eq!(converted, at(2024, 1, 16, 4, 0));
    }

    #[test]
    fn round_trip_reproduces_wall_clock() {
        let mut converter = shanghai();
        let london = converter.resolve("BST").expect("resolves");

        for local in [
            at(2024, 1, 15, 9, 0),
            at(2024, 6, 3, 18, 30),
            at(2024, 10, 27, 12, 15),
        ] {
            let there = converter.to_target(local, "BST").expect("converts");
            let back =
                TimezoneConverter::convert(there, converter.target(), london).expect("converts");
            assert_eq!(back, local);
        }
    }

    #[test]
    fn unknown_zone_is_an_error() {
        let mut converter = shanghai();
        assert!(matches!(
            converter.to_target(at(2024, 1, 15, 9, 0), "QQQ"),
            Err(TimezoneResolutionError::UnknownTimezone(_))
        ));
    }

    #[test]
    fn unknown_target_is_rejected() {
        assert!(TimezoneConverter::new(TimeZoneResolver::new(), "Mars/Olympus").is_err());
    }

    #[test]
    fn configured_aliases_apply() {
        let mut config = coursecal_core::config::Settings::default().schedule;
        config
            .timezone_aliases
            .insert("IST".into(), "Asia/Kolkata".into());
        let mut converter = TimezoneConverter::from_config(&config).expect("valid config");

        let converted = converter
            .to_target(at(2024, 1, 15, 9, 30), "IST")
            .expect("converts");
        assert_eq!(converted, at(2024, 1, 15, 12, 0));
    }
}
