use std::path::PathBuf;

use clap::Parser;
use coursecal_core::config::Settings;
use coursecal_core::types::Language;

#[derive(Debug, Parser)]
#[command(name = "coursecal")]
#[command(about = "Convert course schedule spreadsheets into iCalendar files", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Calendars to generate: english, chinese or both
    #[arg(short, long)]
    pub language: Option<Language>,

    /// Directory scanned for schedule spreadsheets
    #[arg(long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Directory the .ics files are written to
    #[arg(long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Configuration file (defaults to ./coursecal.toml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Applies command-line overrides, which take precedence over every other source.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(language) = self.language {
            settings.language = language;
        }
        if let Some(source) = &self.source {
            settings.input.directory.clone_from(source);
        }
        if let Some(output) = &self.output {
            settings.output.directory.clone_from(output);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_leave_settings_untouched() {
        let cli = Cli::try_parse_from(["coursecal"]).expect("parses");
        let mut settings = Settings::default();
        cli.apply(&mut settings);

        assert_eq!(settings.language, Language::Both);
        assert_eq!(settings.input.directory, PathBuf::from("source"));
    }

    #[test]
    fn flags_override_settings() {
        let cli = Cli::try_parse_from([
            "coursecal",
            "-l",
            "chinese",
            "--source",
            "in",
            "--output",
            "out",
        ])
        .expect("parses");
        let mut settings = Settings::default();
        cli.apply(&mut settings);

        assert_eq!(settings.language, Language::Chinese);
        assert_eq!(settings.input.directory, PathBuf::from("in"));
        assert_eq!(settings.output.directory, PathBuf::from("out"));
    }

    #[test]
    fn unknown_language_is_rejected() {
        assert!(Cli::try_parse_from(["coursecal", "--language", "french"]).is_err());
    }
}
