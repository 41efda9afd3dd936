/// Calendar product identity shared across crates
pub const PRODUCT_NAME: &str = "CQF Schedule Calendar";
pub const PRODUCT_ID: &str = const_str::concat!("-//", PRODUCT_NAME, "//EN");
pub const ICALENDAR_VERSION: &str = "2.0";

/// Excel writes `~$<name>` lock files next to open workbooks
pub const LOCK_FILE_PREFIX: &str = "~$";

pub const ICS_EXTENSION: &str = "ics";
pub const PARTIAL_FILE_SUFFIX: &str = const_str::concat!(".", ICS_EXTENSION, ".part");

pub const CONFIG_FILE_NAME: &str = "coursecal.toml";
pub const ENV_PREFIX: &str = "COURSECAL";

/// Column names used by the course spreadsheets
pub mod columns {
    pub const TITLE: &str = "Title";
    pub const TYPE: &str = "Type";
    pub const MODULE: &str = "Module";
    pub const TIME: &str = "Time";
    pub const DATE: &str = "Date";
    pub const CHINESE_DATE: &str = "Chinese date\n(7-10pm)";
    pub const GOLDEN_TUTOR: &str = "Golden Tutor";
}
