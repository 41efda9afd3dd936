//! Resolution of timezone identifiers and abbreviations to IANA zones.
//!
//! Uses ICU4X for Windows timezone ID to IANA mapping and timezone canonicalization.

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use icu::time::zone::WindowsParser;
use icu::time::zone::iana::IanaParserExtended;
use std::collections::HashMap;
use std::str::FromStr;

/// Error resolving a timezone or placing a local time in it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimezoneResolutionError {
    /// Unknown or invalid timezone identifier.
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    /// Abbreviation shared by several unrelated zones (e.g. `IST`).
    #[error("Ambiguous timezone abbreviation: {0}")]
    AmbiguousTimezone(String),

    /// Non-existent time during DST gap.
    #[error("Non-existent time (DST gap): {0}")]
    NonExistentTime(String),
}

/// Abbreviations that are not IANA identifiers but name one zone in practice.
///
/// The IANA zone carries the DST rules, so `BST` on a January date resolves
/// to London winter time.
pub const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("BST", "Europe/London"),
    ("CEST", "Europe/Berlin"),
    ("EDT", "America/New_York"),
    ("PDT", "America/Los_Angeles"),
    ("HKT", "Asia/Hong_Kong"),
    ("SGT", "Asia/Singapore"),
];

/// Abbreviations refused unless an explicit alias picks one meaning.
pub const AMBIGUOUS_ABBREVIATIONS: &[&str] = &["IST", "CST", "AST", "ADT", "SST"];

/// Resolver for timezone identifiers.
///
/// Lookup order: alias table, IANA name, ICU canonicalization of Windows
/// names and IANA aliases. Successful resolutions are cached.
#[derive(Debug, Clone)]
pub struct TimeZoneResolver {
    /// Cache of resolved IANA timezones by identifier as given.
    cache: HashMap<String, Tz>,
    /// Uppercased abbreviation → IANA identifier.
    aliases: HashMap<String, String>,
}

impl TimeZoneResolver {
    /// Creates a resolver with the built-in alias table.
    #[must_use]
    pub fn new() -> Self {
        Self::with_aliases(std::iter::empty::<(String, String)>())
    }

    /// Creates a resolver with the built-in aliases plus `extra`.
    ///
    /// Entries in `extra` take precedence over built-in ones.
    #[must_use]
    pub fn with_aliases<I, K, V>(extra: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut resolver = Self {
            cache: HashMap::new(),
            aliases: HashMap::new(),
        };
        for (abbreviation, zone) in DEFAULT_ALIASES {
            resolver.add_alias(abbreviation, *zone);
        }
        for (abbreviation, zone) in extra {
            resolver.add_alias(abbreviation.as_ref(), zone);
        }
        resolver
    }

    /// ## Summary
    /// Registers an abbreviation, replacing any earlier mapping.
    pub fn add_alias(&mut self, abbreviation: &str, zone: impl Into<String>) {
        self.cache.clear();
        self.aliases
            .insert(abbreviation.trim().to_ascii_uppercase(), zone.into());
    }

    /// ## Summary
    /// Resolves a timezone identifier or abbreviation to a `chrono_tz::Tz`.
    ///
    /// ## Errors
    ///
    /// Returns `TimezoneResolutionError::AmbiguousTimezone` for abbreviations
    /// listed in [`AMBIGUOUS_ABBREVIATIONS`] without an alias, and
    /// `TimezoneResolutionError::UnknownTimezone` if nothing matches.
    ///
    /// ## Side Effects
    ///
    /// Caches successful resolutions to avoid repeated parsing.
    pub fn resolve(&mut self, tzid: &str) -> Result<Tz, TimezoneResolutionError> {
        let tzid = tzid.trim();
        if let Some(tz) = self.cache.get(tzid) {
            return Ok(*tz);
        }

        let upper = tzid.to_ascii_uppercase();
        let candidate = if let Some(alias) = self.aliases.get(&upper) {
            alias.clone()
        } else if AMBIGUOUS_ABBREVIATIONS.contains(&upper.as_str()) {
            return Err(TimezoneResolutionError::AmbiguousTimezone(tzid.to_string()));
        } else {
            tzid.to_string()
        };

        let tz = Tz::from_str(&candidate)
            .or_else(|_e| Tz::from_str(&normalize_tzid(&candidate)))
            .map_err(|_e| TimezoneResolutionError::UnknownTimezone(tzid.to_string()))?;

        tracing::trace!(tzid, resolved = %tz.name(), "Resolved timezone");
        self.cache.insert(tzid.to_string(), tz);

        Ok(tz)
    }
}

impl Default for TimeZoneResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalizes Windows and aliased timezone identifiers to canonical IANA names.
///
/// Uses ICU4X for Windows timezone ID mapping and IANA canonicalization.
fn normalize_tzid(tzid: &str) -> String {
    // Strip common prefixes
    let stripped = tzid
        .strip_prefix("/mozilla.org/")
        .or_else(|| tzid.strip_prefix("/softwarestudio.org/"))
        .unwrap_or(tzid);

    // Try Windows timezone mapping first using ICU
    let windows_parser = WindowsParser::new();
    if let Some(tz) = windows_parser.parse(stripped, None) {
        let iana_parser = IanaParserExtended::new();
        for entry in iana_parser.iter() {
            if entry.time_zone == tz {
                return entry.canonical.to_string();
            }
        }
    }

    // Try IANA parser for canonicalization (handles aliases like Europe/Kiev -> Europe/Kyiv)
    let iana_parser = IanaParserExtended::new();
    let parsed = iana_parser.parse(stripped);
    if parsed.time_zone != icu::time::TimeZone::UNKNOWN {
        return parsed.canonical.to_string();
    }

    stripped.to_string()
}

/// ## Summary
/// Places a wall-clock time in `tz` using the rules in force on that date.
///
/// A time repeated by a DST fold resolves to its first occurrence.
///
/// ## Errors
///
/// Returns `TimezoneResolutionError::NonExistentTime` for times skipped by a
/// DST gap.
pub fn localize(local: NaiveDateTime, tz: Tz) -> Result<DateTime<Tz>, TimezoneResolutionError> {
    match tz.from_local_datetime(&local) {
        LocalResult::None => Err(TimezoneResolutionError::NonExistentTime(format!(
            "{local} in timezone {}",
            tz.name()
        ))),
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earliest, _latest) => Ok(earliest),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, 0))
            .expect("valid datetime")
    }

    #[test_log::test]
    fn test_resolve_standard_timezone() {
        let mut resolver = TimeZoneResolver::new();
        let tz = resolver.resolve("America/New_York").expect("should resolve");
        assert_eq!(tz, Tz::America__New_York);
    }

    #[test]
    fn test_bst_alias_resolves_to_london() {
        let mut resolver = TimeZoneResolver::new();
        assert_eq!(resolver.resolve("BST"), Ok(Tz::Europe__London));
        assert_eq!(resolver.resolve("bst"), Ok(Tz::Europe__London));
    }

    #[test]
    fn test_plain_abbreviations_known_to_tzdata() {
        let mut resolver = TimeZoneResolver::new();
        assert_eq!(resolver.resolve("GMT"), Ok(Tz::GMT));
        assert_eq!(resolver.resolve("CET"), Ok(Tz::CET));
        assert_eq!(resolver.resolve("UTC"), Ok(Tz::UTC));
    }

    #[test_log::test]
    fn test_unknown_timezone() {
        let mut resolver = TimeZoneResolver::new();
        assert_eq!(
            resolver.resolve("XYZ"),
            Err(TimezoneResolutionError::UnknownTimezone("XYZ".into()))
        );
    }

    #[test]
    fn test_ambiguous_abbreviation_needs_alias() {
        let mut resolver = TimeZoneResolver::new();
        assert_eq!(
            resolver.resolve("IST"),
            Err(TimezoneResolutionError::AmbiguousTimezone("IST".into()))
        );

        resolver.add_alias("ist", "Asia/Kolkata");
        assert_eq!(resolver.resolve("IST"), Ok(Tz::Asia__Kolkata));
    }

    #[test]
    fn test_extra_aliases_override_defaults() {
        let mut resolver = TimeZoneResolver::with_aliases([("BST", "Asia/Dhaka")]);
        assert_eq!(resolver.resolve("BST"), Ok(Tz::Asia__Dhaka));
    }

    #[test]
    fn test_normalize_windows_timezone() {
        assert_eq!(normalize_tzid("GMT Standard Time"), "Europe/London");
        assert_eq!(normalize_tzid("China Standard Time"), "Asia/Shanghai");
    }

    #[test]
    fn test_normalize_iana_alias() {
        assert_eq!(normalize_tzid("US/Eastern"), "America/New_York");
        assert_eq!(
            normalize_tzid("/mozilla.org/Europe/London"),
            "Europe/London"
        );
    }

    #[test]
    fn test_resolve_windows_name() {
        let mut resolver = TimeZoneResolver::new();
        assert_eq!(resolver.resolve("GMT Standard Time"), Ok(Tz::Europe__London));
    }

    #[test]
    fn test_localize_follows_date_rules() {
        // London is UTC+0 in January and UTC+1 in July
        let winter = localize(at(2024, 1, 15, 9, 0), Tz::Europe__London).expect("valid");
        assert_eq!(winter.with_timezone(&Utc).naive_utc(), at(2024, 1, 15, 9, 0));

        let summer = localize(at(2024, 7, 15, 9, 0), Tz::Europe__London).expect("valid");
        assert_eq!(summer.with_timezone(&Utc).naive_utc(), at(2024, 7, 15, 8, 0));
    }

    #[test]
    fn test_localize_dst_gap() {
        // Clocks jump from 01:00 to 02:00 on 2024-03-31 in London
        let result = localize(at(2024, 3, 31, 1, 30), Tz::Europe__London);
        assert!(matches!(
            result,
            Err(TimezoneResolutionError::NonExistentTime(_))
        ));
    }

    #[test]
    fn test_localize_dst_fold_takes_first_occurrence() {
        // 01:30 happens twice on 2024-10-27 in London; the first is BST (UTC+1)
        let dt = localize(at(2024, 10, 27, 1, 30), Tz::Europe__London).expect("valid");
        assert_eq!(dt.with_timezone(&Utc).naive_utc(), at(2024, 10, 27, 0, 30));
    }

    #[test]
    fn test_timezone_caching() {
        let mut resolver = TimeZoneResolver::new();
        resolver.resolve("Asia/Shanghai").expect("should resolve");
        assert!(resolver.cache.contains_key("Asia/Shanghai"));
        resolver
            .resolve("Asia/Shanghai")
            .expect("should resolve from cache");
    }
}
