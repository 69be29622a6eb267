//! Sort-key parsers handed to the table sorter at initialization.
//!
//! A [`ParserSet`] is an explicit configuration value: it is built once per
//! table and passed to whatever orders the rows. Nothing here is registered
//! globally.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;
use crate::numeric::{NumericClassifier, NumericPolicy};

/// Kind of value a parser produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Numeric,
    Text,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric => write!(f, "numeric"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// Value the external sorter compares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SortKey {
    Numeric(f64),
    Text(String),
}

impl SortKey {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Numeric(v) => Some(*v),
            Self::Text(_) => None,
        }
    }
}

/// Column the parser is being asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnContext<'a> {
    pub index: usize,
    pub header: &'a str,
}

impl<'a> ColumnContext<'a> {
    pub fn new(index: usize, header: &'a str) -> Self {
        Self { index, header }
    }
}

/// A named parser: decides eligibility for a cell and produces its sort key.
pub trait CellParser: Send + Sync {
    /// Identifier used to select the parser from configuration.
    fn id(&self) -> &str;

    /// Whether this parser can handle `token`.
    fn is(&self, token: &str, ctx: &ColumnContext<'_>) -> bool;

    /// Sort key for a cell this parser accepted.
    fn format(&self, value: &CellValue) -> SortKey;

    fn value_type(&self) -> ValueType;
}

/// Parser for currency- and comma-decorated numbers.
#[derive(Debug, Clone, Default)]
pub struct NumericParser {
    classifier: NumericClassifier,
}

impl NumericParser {
    pub const ID: &'static str = "newNumbers";

    pub fn new(classifier: NumericClassifier) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &NumericClassifier {
        &self.classifier
    }
}

impl CellParser for NumericParser {
    fn id(&self) -> &str {
        Self::ID
    }

    fn is(&self, token: &str, _ctx: &ColumnContext<'_>) -> bool {
        self.classifier.classify(token)
    }

    fn format(&self, value: &CellValue) -> SortKey {
        match self.classifier.to_number(value) {
            Ok(v) => SortKey::Numeric(v),
            Err(err) => {
                // Cells in a numeric column are not all guaranteed to classify;
                // those sort as text instead of as zero.
                tracing::warn!(%err, "numeric parser given a non-numeric cell");
                TextParser.format(value)
            }
        }
    }

    fn value_type(&self) -> ValueType {
        ValueType::Numeric
    }
}

/// Fallback parser: case-insensitive text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextParser;

impl TextParser {
    pub const ID: &'static str = "text";
}

impl CellParser for TextParser {
    fn id(&self) -> &str {
        Self::ID
    }

    fn is(&self, _token: &str, _ctx: &ColumnContext<'_>) -> bool {
        true
    }

    fn format(&self, value: &CellValue) -> SortKey {
        match value {
            CellValue::Raw(s) => SortKey::Text(s.trim().to_lowercase()),
            CellValue::Parsed(v) => SortKey::Numeric(*v),
        }
    }

    fn value_type(&self) -> ValueType {
        ValueType::Text
    }
}

/// Ordered collection of parsers consulted during detection.
#[derive(Clone)]
pub struct ParserSet {
    parsers: Vec<Arc<dyn CellParser>>,
    fallback: Arc<dyn CellParser>,
}

impl Default for ParserSet {
    fn default() -> Self {
        Self::with_classifier(NumericClassifier::default())
    }
}

impl fmt::Debug for ParserSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserSet")
            .field("parsers", &self.ids())
            .field("fallback", &self.fallback.id())
            .finish()
    }
}

impl ParserSet {
    /// Numeric parser followed by the text parser.
    pub fn new(policy: NumericPolicy, currency_symbols: impl IntoIterator<Item = char>) -> Self {
        Self::with_classifier(NumericClassifier::new(policy, currency_symbols))
    }

    pub fn with_classifier(classifier: NumericClassifier) -> Self {
        let mut set = Self::empty();
        set.register(NumericParser::new(classifier));
        set.register(TextParser);
        set
    }

    /// No registered parsers; detection always yields the text fallback.
    pub fn empty() -> Self {
        Self {
            parsers: Vec::new(),
            fallback: Arc::new(TextParser),
        }
    }

    /// Adds a parser. A parser with the same id is replaced in place.
    pub fn register<P: CellParser + 'static>(&mut self, parser: P) -> &mut Self {
        let parser: Arc<dyn CellParser> = Arc::new(parser);
        match self.parsers.iter_mut().find(|p| p.id() == parser.id()) {
            Some(slot) => *slot = parser,
            None => self.parsers.push(parser),
        }
        self
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn CellParser>> {
        self.parsers.iter().find(|p| p.id() == id).cloned()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.parsers.iter().map(|p| p.id()).collect()
    }

    pub fn fallback(&self) -> Arc<dyn CellParser> {
        Arc::clone(&self.fallback)
    }

    /// Picks the parser for a column from its first non-blank cell.
    ///
    /// The first registered parser whose `is` accepts that cell wins. Columns
    /// with no non-blank cell get the fallback.
    pub fn detect<S: AsRef<str>>(&self, ctx: &ColumnContext<'_>, cells: &[S]) -> Arc<dyn CellParser> {
        let Some(sample) = cells.iter().map(AsRef::as_ref).find(|c| !c.trim().is_empty()) else {
            tracing::debug!(column = ctx.header, "no non-blank cells, using fallback parser");
            return self.fallback();
        };

        let chosen = self
            .parsers
            .iter()
            .find(|p| p.is(sample, ctx))
            .cloned()
            .unwrap_or_else(|| self.fallback());
        tracing::debug!(column = ctx.header, sample, parser = chosen.id(), "detected parser");
        chosen
    }

    /// One sort key per cell, using `parser`.
    pub fn sort_keys<S: AsRef<str>>(parser: &dyn CellParser, cells: &[S]) -> Vec<SortKey> {
        cells
            .iter()
            .map(|c| parser.format(&CellValue::raw(c.as_ref())))
            .collect()
    }
}
