//! Cell values as seen by sort-key parsers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single table cell, either still display text or already a number.
///
/// Upstream formatters may hand over values that were parsed earlier in the
/// pipeline. Keeping the two cases apart means a parsed number is never run
/// through the string stripper a second time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    /// Display text of the cell, exactly as rendered.
    Raw(String),
    /// A value that has already been converted to a number.
    Parsed(f64),
}

impl CellValue {
    pub fn raw(text: impl Into<String>) -> Self {
        Self::Raw(text.into())
    }

    /// Display text for raw cells, `None` for parsed ones.
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Self::Raw(s) => Some(s),
            Self::Parsed(_) => None,
        }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, Self::Parsed(_))
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Raw(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Raw(s)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        Self::Parsed(v)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw(s) => write!(f, "{s}"),
            Self::Parsed(v) => write!(f, "{v}"),
        }
    }
}
