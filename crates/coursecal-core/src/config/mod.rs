use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::NaiveTime;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{CONFIG_FILE_NAME, ENV_PREFIX, PRODUCT_ID, columns};
use crate::error::{CoreError, CoreResult};
use crate::types::{Language, VariantKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub language: Language,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub schedule: ScheduleConfig,
    pub english: VariantConfig,
    pub chinese: VariantConfig,
    pub render: RenderConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    pub directory: PathBuf,
    /// Lowercase extensions without the leading dot.
    pub extensions: Vec<String>,
    /// Worksheet to read; the first sheet when unset.
    pub sheet: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub basename: Option<String>,
}

/// How blank cells left behind by merged ranges are reconstructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillMode {
    /// Forward-fill within runs of rows sharing one anchor value.
    #[default]
    Grouped,
    /// Forward-fill down the whole column.
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnNames {
    pub title: String,
    pub kind: String,
    pub module: String,
    pub tutor: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub anchor_column: String,
    /// chrono `strftime` pattern for textual dates.
    pub date_format: String,
    pub fill_mode: FillMode,
    /// IANA zone every converted English session is expressed in.
    pub target_timezone: String,
    /// Extra abbreviation → IANA identifier entries, merged over the built-in table.
    #[serde(default)]
    pub timezone_aliases: BTreeMap<String, String>,
    pub product_id: String,
    pub columns: ColumnNames,
}

/// Which date cells a variant accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateKind {
    /// Native spreadsheet dates, or text matching the configured date format.
    Any,
    /// Native spreadsheet dates only.
    NativeOnly,
}

/// Where a variant takes its session times from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimeSource {
    /// Free-text `HH:MM - HH:MM ZONE` ranges, possibly several per cell.
    Column { column: String },
    /// The same session window on every date.
    Fixed {
        start: NaiveTime,
        end: NaiveTime,
        timezone: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptionField {
    Module,
    Type,
    Tutor,
    Title,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantConfig {
    /// Calendar display name (`X-WR-CALNAME`).
    pub name: String,
    pub file_suffix: String,
    pub date_column: String,
    pub date_kind: DateKind,
    pub time: TimeSource,
    /// Convert parsed spans into `schedule.target_timezone`.
    pub normalize_timezone: bool,
    pub description: Vec<DescriptionField>,
    pub location: Option<String>,
    pub reminder_minutes: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub include_uid: bool,
    pub include_calendar_name: bool,
    pub fold_lines: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: Language::Both,
            input: InputConfig {
                directory: PathBuf::from("source"),
                extensions: vec!["xlsx".into(), "xls".into(), "xlsm".into(), "ods".into()],
                sheet: None,
            },
            output: OutputConfig {
                directory: PathBuf::from("ics"),
                basename: None,
            },
            schedule: ScheduleConfig {
                anchor_column: columns::DATE.into(),
                date_format: "%d/%m/%Y".into(),
                fill_mode: FillMode::Grouped,
                target_timezone: "Asia/Shanghai".into(),
                timezone_aliases: BTreeMap::new(),
                product_id: PRODUCT_ID.into(),
                columns: ColumnNames {
                    title: columns::TITLE.into(),
                    kind: columns::TYPE.into(),
                    module: columns::MODULE.into(),
                    tutor: columns::GOLDEN_TUTOR.into(),
                },
            },
            english: VariantConfig {
                name: "CQF English Schedule".into(),
                file_suffix: VariantKind::English.as_str().into(),
                date_column: columns::DATE.into(),
                date_kind: DateKind::Any,
                time: TimeSource::Column {
                    column: columns::TIME.into(),
                },
                normalize_timezone: true,
                description: vec![DescriptionField::Module, DescriptionField::Type],
                location: Some("Live Broadcast".into()),
                reminder_minutes: Some(60),
            },
            chinese: VariantConfig {
                name: "CQF Chinese Schedule".into(),
                file_suffix: VariantKind::Chinese.as_str().into(),
                date_column: columns::CHINESE_DATE.into(),
                date_kind: DateKind::NativeOnly,
                time: TimeSource::Fixed {
                    start: NaiveTime::from_hms_opt(19, 0, 0).unwrap_or_default(),
                    end: NaiveTime::from_hms_opt(22, 0, 0).unwrap_or_default(),
                    timezone: "Asia/Shanghai".into(),
                },
                normalize_timezone: false,
                description: vec![
                    DescriptionField::Module,
                    DescriptionField::Type,
                    DescriptionField::Tutor,
                ],
                location: Some("Golden".into()),
                reminder_minutes: Some(60),
            },
            render: RenderConfig {
                include_uid: true,
                include_calendar_name: true,
                fold_lines: true,
            },
            logging: LoggingConfig {
                level: "info".into(),
            },
        }
    }
}

impl Settings {
    /// ## Summary
    /// Loads settings from built-in defaults, an optional TOML file and
    /// `COURSECAL__*` environment variables, in increasing precedence.
    ///
    /// When `config_file` is given it must exist; otherwise `coursecal.toml`
    /// in the working directory is used if present.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let file = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(CONFIG_FILE_NAME).required(false),
        };

        let settings = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Self>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Returns the configuration of one output variant.
    #[must_use]
    pub const fn variant(&self, kind: VariantKind) -> &VariantConfig {
        match kind {
            VariantKind::English => &self.english,
            VariantKind::Chinese => &self.chinese,
        }
    }

    /// ## Summary
    /// Checks cross-field constraints serde cannot express.
    ///
    /// ## Errors
    /// Returns `CoreError::ValidationError` naming the first offending key.
    pub fn validate(&self) -> CoreResult<()> {
        if self.schedule.anchor_column.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "schedule.anchor_column must not be empty".into(),
            ));
        }
        if self.schedule.target_timezone.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "schedule.target_timezone must not be empty".into(),
            ));
        }
        if self.input.extensions.is_empty() {
            return Err(CoreError::ValidationError(
                "input.extensions must list at least one extension".into(),
            ));
        }

        for kind in [VariantKind::English, VariantKind::Chinese] {
            let variant = self.variant(kind);
            if variant.date_column.trim().is_empty() {
                return Err(CoreError::ValidationError(format!(
                    "{kind}.date_column must not be empty"
                )));
            }
            if variant.file_suffix.trim().is_empty() {
                return Err(CoreError::ValidationError(format!(
                    "{kind}.file_suffix must not be empty"
                )));
            }
            if variant.reminder_minutes == Some(0) {
                return Err(CoreError::ValidationError(format!(
                    "{kind}.reminder_minutes must be positive when set"
                )));
            }
        }

        if self.english.file_suffix == self.chinese.file_suffix {
            return Err(CoreError::ValidationError(
                "english.file_suffix and chinese.file_suffix must differ".into(),
            ));
        }

        Ok(())
    }
}

/// ## Summary
/// Loads configuration from `.env`, the config file and environment variables.
///
/// ## Errors
/// Returns an error if loading, deserializing or validating the configuration fails.
pub fn load_config(config_file: Option<&Path>) -> Result<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load(config_file)?;
    tracing::debug!(language = %settings.language, "Configuration loaded");
    Ok(settings)
}
