//! Table configuration, stored as TOML.
//!
//! ```toml
//! per_page = 25
//!
//! [numeric]
//! policy = "strict"
//! currency_symbols = ["$", "£", "€"]
//!
//! [[sort_list]]
//! column = "Amount"
//! direction = "descending"
//!
//! [columns.Amount]
//! formatter = "dollars"
//! decimal_places = 0
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::format::{FormatOptions, MAX_DECIMAL_PLACES};
use crate::numeric::{NumericClassifier, NumericPolicy, DEFAULT_CURRENCY_SYMBOLS};
use crate::parser::ParserSet;

pub const DEFAULT_PER_PAGE: usize = 20;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// One entry of the initial sort order handed to the table sorter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: String,
    #[serde(default)]
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumericConfig {
    pub policy: NumericPolicy,
    pub currency_symbols: Vec<char>,
}

impl Default for NumericConfig {
    fn default() -> Self {
        Self {
            policy: NumericPolicy::Strict,
            currency_symbols: DEFAULT_CURRENCY_SYMBOLS.to_vec(),
        }
    }
}

/// Per-column overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnOptions {
    /// Parser id to use instead of detection.
    pub parser: Option<String>,
    /// Display formatter name.
    pub formatter: Option<String>,
    pub decimal_places: Option<usize>,
    pub multiply: Option<bool>,
    /// Column whose value is the URL for the `link` formatter.
    pub url_column: Option<String>,
}

impl ColumnOptions {
    pub fn format_options(&self, url: Option<&str>) -> FormatOptions {
        FormatOptions {
            decimal_places: self.decimal_places,
            multiply: self.multiply,
            url: url.map(str::to_string),
        }
    }
}

/// Everything needed to initialize one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Rows per page for the pager.
    pub per_page: usize,
    pub numeric: NumericConfig,
    /// Initial sort order, passed through to the sorter.
    pub sort_list: Vec<SortSpec>,
    pub columns: BTreeMap<String, ColumnOptions>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            numeric: NumericConfig::default(),
            sort_list: Vec::new(),
            columns: BTreeMap::new(),
        }
    }
}

impl TableConfig {
    /// Load and validate a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loading table config");
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.per_page == 0 {
            return Err(ConfigError::Invalid("per_page must be at least 1".into()));
        }
        if self.numeric.currency_symbols.is_empty() {
            return Err(ConfigError::Invalid(
                "numeric.currency_symbols must not be empty".into(),
            ));
        }
        if let Some(c) = self
            .numeric
            .currency_symbols
            .iter()
            .find(|&&c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-' | '+'))
        {
            return Err(ConfigError::Invalid(format!(
                "{c:?} cannot be a currency symbol"
            )));
        }
        for (name, column) in &self.columns {
            if column.decimal_places.is_some_and(|d| d > MAX_DECIMAL_PLACES) {
                return Err(ConfigError::Invalid(format!(
                    "columns.{name}.decimal_places must be at most {MAX_DECIMAL_PLACES}"
                )));
            }
        }
        Ok(())
    }

    pub fn classifier(&self) -> NumericClassifier {
        NumericClassifier::new(
            self.numeric.policy,
            self.numeric.currency_symbols.iter().copied(),
        )
    }

    /// The parser set this table is initialized with.
    pub fn parser_set(&self) -> ParserSet {
        ParserSet::with_classifier(self.classifier())
    }

    pub fn column(&self, name: &str) -> Option<&ColumnOptions> {
        self.columns.get(name)
    }
}
