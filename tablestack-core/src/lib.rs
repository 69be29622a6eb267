//! TableStack Core: cell classification, sort-key parsers, display formatters.
//!
//! This crate supplies the pieces a client-side table sorter is initialized
//! with:
//! - Numeric-token classifier/parser for currency and comma-grouped cells
//! - Tagged cell values, so already-parsed numbers are never re-parsed
//! - Parser descriptors and the explicit parser set passed at table init
//! - Display formatters whose output the classifier reads back
//! - CSV table loading and TOML table configuration
//!
//! Ordering, paging and filtering are the sorter's job and are not here.

pub mod cell;
pub mod config;
pub mod format;
pub mod numeric;
pub mod parser;
pub mod table;

pub use cell::CellValue;
pub use config::{ColumnOptions, ConfigError, SortDirection, SortSpec, TableConfig};
pub use format::{FormatError, FormatOptions, Formatter};
pub use numeric::{classify, to_number, NumericClassifier, NumericError, NumericPolicy};
pub use parser::{CellParser, ColumnContext, NumericParser, ParserSet, SortKey, TextParser, ValueType};
pub use table::{ColumnParser, Table, TableError};
