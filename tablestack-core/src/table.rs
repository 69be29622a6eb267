//! CSV-backed table: headers, rows, per-column parser detection and rendering.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::cell::CellValue;
use crate::config::TableConfig;
use crate::format::Formatter;
use crate::numeric::NumericClassifier;
use crate::parser::{CellParser, ColumnContext, ParserSet, SortKey, ValueType};

#[derive(Debug, Error)]
pub enum TableError {
    #[error("open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("{0} isn't a column in this table")]
    UnknownColumn(String),

    #[error("column {column} contains non-numeric value {value:?} at row {row}")]
    NonNumeric {
        column: String,
        row: usize,
        value: String,
    },
}

/// Parser chosen for one column.
#[derive(Clone)]
pub struct ColumnParser {
    pub index: usize,
    pub header: String,
    pub parser: Arc<dyn CellParser>,
}

impl ColumnParser {
    pub fn id(&self) -> &str {
        self.parser.id()
    }

    pub fn value_type(&self) -> ValueType {
        self.parser.value_type()
    }
}

impl fmt::Debug for ColumnParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnParser")
            .field("index", &self.index)
            .field("header", &self.header)
            .field("parser", &self.parser.id())
            .finish()
    }
}

/// A table read from CSV. The first record is the header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Reads CSV; every row must have as many fields as the header.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, TableError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);
        let headers = rdr.headers()?.iter().map(str::to_string).collect();
        let rows = rdr
            .records()
            .map(|record| record.map(|r| r.iter().map(str::to_string).collect::<Vec<String>>()))
            .collect::<Result<Vec<Vec<String>>, csv::Error>>()?;
        Ok(Self { headers, rows })
    }

    pub fn from_path(path: &Path) -> Result<Self, TableError> {
        let file = std::fs::File::open(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(io::BufReader::new(file))?;
        tracing::debug!(
            path = %path.display(),
            columns = table.headers.len(),
            rows = table.rows.len(),
            "loaded table"
        );
        Ok(table)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Result<usize, TableError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| TableError::UnknownColumn(name.to_string()))
    }

    pub fn values(&self, name: &str) -> Result<Vec<&str>, TableError> {
        let index = self.column_index(name)?;
        Ok(self.column_at(index))
    }

    fn column_at(&self, index: usize) -> Vec<&str> {
        self.rows.iter().map(|row| row[index].as_str()).collect()
    }

    /// Sum of a column. Every cell must be numeric under `classifier`.
    pub fn total(&self, name: &str, classifier: &NumericClassifier) -> Result<f64, TableError> {
        let index = self.column_index(name)?;
        self.rows.iter().enumerate().try_fold(0.0, |sum, (row, cells)| {
            let value = &cells[index];
            classifier
                .parse_token(value)
                .map(|v| sum + v)
                .ok_or_else(|| TableError::NonNumeric {
                    column: name.to_string(),
                    row,
                    value: value.clone(),
                })
        })
    }

    /// Chooses a parser for every column.
    ///
    /// A `columns.<name>.parser` override in `config` wins when `set` knows
    /// the id; otherwise the parser is detected from the column's cells.
    pub fn detect_parsers(&self, set: &ParserSet, config: &TableConfig) -> Vec<ColumnParser> {
        self.headers
            .iter()
            .enumerate()
            .map(|(index, header)| {
                let ctx = ColumnContext::new(index, header);
                let configured = config
                    .column(header)
                    .and_then(|opts| opts.parser.as_deref())
                    .and_then(|id| {
                        let found = set.get(id);
                        if found.is_none() {
                            tracing::warn!(column = %header, parser = id, "unknown parser, detecting instead");
                        }
                        found
                    });
                let parser = configured.unwrap_or_else(|| set.detect(&ctx, self.column_at(index).as_slice()));
                ColumnParser {
                    index,
                    header: header.clone(),
                    parser,
                }
            })
            .collect()
    }

    /// Sort keys for one column, in row order.
    pub fn sort_keys(&self, column: &ColumnParser) -> Vec<SortKey> {
        self.rows
            .iter()
            .map(|row| column.parser.format(&CellValue::raw(row[column.index].as_str())))
            .collect()
    }

    /// Display rows with each column's configured formatter applied.
    ///
    /// Columns without a formatter, or with one `formatter` doesn't know,
    /// pass through unchanged.
    pub fn render(&self, formatter: &Formatter, config: &TableConfig) -> Result<Vec<Vec<String>>, TableError> {
        let mut plans = Vec::with_capacity(self.headers.len());
        for header in &self.headers {
            let plan = match config.column(header) {
                Some(opts) => match opts.formatter.as_deref() {
                    Some(name) if formatter.contains(name) => {
                        let url_index = opts
                            .url_column
                            .as_deref()
                            .map(|c| self.column_index(c))
                            .transpose()?;
                        Some((name, opts, url_index))
                    }
                    Some(name) => {
                        tracing::warn!(column = %header, formatter = name, "unknown formatter, rendering raw values");
                        None
                    }
                    None => None,
                },
                None => None,
            };
            plans.push(plan);
        }

        let rendered: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&plans)
                    .map(|(cell, plan)| match plan {
                        Some((name, opts, url_index)) => {
                            let url = url_index.map(|i| row[i].as_str());
                            formatter
                                .apply(cell, name, &opts.format_options(url))
                                .unwrap_or_else(|_| cell.clone())
                        }
                        None => cell.clone(),
                    })
                    .collect::<Vec<String>>()
            })
            .collect();
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{NumericParser, TextParser};

    const CSV: &str = "\
Author,Best Book,Number of Pages,Advance
Samuel Beckett,Malone Muert,120,\"$1,200\"
James Joyce,Ulysses,644,$950
Nicholson Baker,Mezzanine,150,\"$12,000.50\"
";

    fn table() -> Table {
        Table::from_reader(CSV.as_bytes()).unwrap()
    }

    #[test]
    fn reads_headers_and_rows() {
        let t = table();
        assert_eq!(t.headers(), ["Author", "Best Book", "Number of Pages", "Advance"]);
        assert_eq!(t.len(), 3);
        assert!(!t.is_empty());
        assert_eq!(t.values("Best Book").unwrap(), vec!["Malone Muert", "Ulysses", "Mezzanine"]);
    }

    #[test]
    fn unknown_column() {
        let err = table().values("Style").unwrap_err();
        assert_eq!(err.to_string(), "Style isn't a column in this table");
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = Table::from_reader("a,b\n1,2\n3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, TableError::Csv(_)));
    }

    #[test]
    fn totals() {
        let t = table();
        let c = NumericClassifier::strict();
        assert_eq!(t.total("Number of Pages", &c).unwrap(), 914.0);
        assert_eq!(t.total("Advance", &c).unwrap(), 14_150.5);
        match t.total("Author", &c).unwrap_err() {
            TableError::NonNumeric { column, row, value } => {
                assert_eq!(column, "Author");
                assert_eq!(row, 0);
                assert_eq!(value, "Samuel Beckett");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn blank_cell_breaks_total() {
        let t = Table::from_reader("Item,Amount\npens,5\npaper,\nink,7\n".as_bytes()).unwrap();
        match t.total("Amount", &NumericClassifier::strict()).unwrap_err() {
            TableError::NonNumeric { column, row, value } => {
                assert_eq!(column, "Amount");
                assert_eq!(row, 1);
                assert_eq!(value, "");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn detects_parsers_per_column() {
        let t = table();
        let cfg = TableConfig::default();
        let parsers = t.detect_parsers(&cfg.parser_set(), &cfg);
        let ids: Vec<&str> = parsers.iter().map(ColumnParser::id).collect();
        assert_eq!(ids, vec!["text", "text", "newNumbers", "newNumbers"]);
        assert_eq!(parsers[3].value_type(), ValueType::Numeric);
    }

    #[test]
    fn configured_parser_overrides_detection() {
        let t = table();
        let cfg = TableConfig::from_toml(
            "[columns.\"Number of Pages\"]\nparser = \"text\"\n[columns.Advance]\nparser = \"nope\"",
        )
        .unwrap();
        let parsers = t.detect_parsers(&cfg.parser_set(), &cfg);
        assert_eq!(parsers[2].id(), TextParser::ID);
        assert_eq!(parsers[3].id(), NumericParser::ID);
    }

    #[test]
    fn sort_keys_follow_parser() {
        let t = table();
        let cfg = TableConfig::default();
        let parsers = t.detect_parsers(&cfg.parser_set(), &cfg);
        assert_eq!(
            t.sort_keys(&parsers[3]),
            vec![SortKey::Numeric(1200.0), SortKey::Numeric(950.0), SortKey::Numeric(12_000.5)]
        );
        assert_eq!(t.sort_keys(&parsers[1])[0], SortKey::Text("malone muert".into()));
    }

    #[test]
    fn render_applies_formatters() {
        let t = Table::from_reader("Name,Pages,Url\nUlysses,644,https://x.test/u\n".as_bytes()).unwrap();
        let cfg = TableConfig::from_toml(
            "[columns.Name]\nformatter = \"link\"\nurl_column = \"Url\"\n[columns.Pages]\nformatter = \"dollars\"\ndecimal_places = 0\n",
        )
        .unwrap();
        let rows = t.render(&Formatter::new(), &cfg).unwrap();
        assert_eq!(
            rows[0],
            vec![
                r#"<a target="_blank" href="https://x.test/u" title="Ulysses">Ulysses</a>"#.to_string(),
                "$644".to_string(),
                "https://x.test/u".to_string(),
            ]
        );
    }

    #[test]
    fn render_unknown_formatter_passes_through() {
        let t = table();
        let cfg = TableConfig::from_toml("[columns.Author]\nformatter = \"sparkle\"").unwrap();
        let rows = t.render(&Formatter::new(), &cfg).unwrap();
        assert_eq!(rows[0][0], "Samuel Beckett");
    }

    #[test]
    fn render_unknown_url_column_errors() {
        let t = table();
        let cfg = TableConfig::from_toml("[columns.Author]\nformatter = \"link\"\nurl_column = \"Site\"").unwrap();
        assert!(matches!(t.render(&Formatter::new(), &cfg), Err(TableError::UnknownColumn(_))));
    }
}
