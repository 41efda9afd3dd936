//! Typed property values.

use super::{DateTime, Duration};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// TEXT, stored unescaped.
    Text(String),
    DateTime(DateTime),
    Duration(Duration),
}

impl Value {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::DateTime(dt) => write!(f, "{dt}"),
            Self::Duration(d) => write!(f, "{d}"),
        }
    }
}
