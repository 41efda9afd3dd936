use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Which calendar variants a run should emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    English,
    Chinese,
    #[default]
    Both,
}

impl Language {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Chinese => "chinese",
            Self::Both => "both",
        }
    }

    /// ## Summary
    /// Returns the variants selected by this language option, English first.
    #[must_use]
    pub const fn variants(self) -> &'static [VariantKind] {
        match self {
            Self::English => &[VariantKind::English],
            Self::Chinese => &[VariantKind::Chinese],
            Self::Both => &[VariantKind::English, VariantKind::Chinese],
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Language {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" => Ok(Self::English),
            "chinese" => Ok(Self::Chinese),
            "both" => Ok(Self::Both),
            other => Err(CoreError::InvalidInput(format!(
                "unknown language `{other}`, expected one of: english, chinese, both"
            ))),
        }
    }
}

/// One of the two output calendars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantKind {
    English,
    Chinese,
}

impl VariantKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Chinese => "chinese",
        }
    }
}

impl std::fmt::Display for VariantKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_parses_case_insensitively() {
        assert_eq!("English".parse::<Language>().ok(), Some(Language::English));
        assert_eq!(" both ".parse::<Language>().ok(), Some(Language::Both));
        assert!("klingon".parse::<Language>().is_err());
    }

    #[test]
    fn both_emits_english_then_chinese() {
        assert_eq!(
            Language::Both.variants(),
            &[VariantKind::English, VariantKind::Chinese]
        );
        assert_eq!(Language::Chinese.variants(), &[VariantKind::Chinese]);
    }
}
