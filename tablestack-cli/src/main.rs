//! TableStack CLI — classify, format, inspect and render commands.
//!
//! Commands:
//! - `classify` — report whether each token sorts as a number, and its value
//! - `format` — run values through a named display formatter
//! - `inspect` — detect the parser for every column of a CSV file
//! - `render` — print a CSV file with configured column formatters applied
//!
//! Logging goes to stderr; set `TABLESTACK_LOG` (e.g. `debug`) or pass `-v`.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tablestack_core::{
    CellValue, FormatOptions, Formatter, NumericClassifier, NumericPolicy, Table, TableConfig,
    ValueType,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tablestack",
    about = "TableStack CLI — numeric cell classification and table formatting"
)]
struct Cli {
    /// Enable debug logging (overrides TABLESTACK_LOG).
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify tokens as numeric or text and print their sort values.
    Classify {
        /// Cell tokens (e.g. '$2,500' '£10.5' N/A).
        #[arg(required = true)]
        tokens: Vec<String>,

        /// Classification policy: strict or pattern. Defaults to the config's policy.
        #[arg(long)]
        policy: Option<NumericPolicy>,

        /// Path to a TOML table config.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Format values with a named formatter.
    Format {
        /// Formatter name (dollars, intcomma, percentage, ap_state, ...).
        #[arg(long = "with")]
        formatter: String,

        /// Values to format.
        #[arg(required = true)]
        values: Vec<String>,

        /// Decimal places for numeric formatters.
        #[arg(long)]
        decimal_places: Option<usize>,

        /// Treat percentages as already multiplied by 100.
        #[arg(long, default_value_t = false)]
        no_multiply: bool,

        /// URL for the link formatter.
        #[arg(long)]
        url: Option<String>,
    },
    /// Detect the parser for each column of a CSV file.
    Inspect {
        /// CSV file with a header row.
        file: PathBuf,

        /// Path to a TOML table config.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Emit the summary as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print a CSV file with configured formatters applied, tab-separated.
    Render {
        /// CSV file with a header row.
        file: PathBuf,

        /// Path to a TOML table config.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Per-column result of `inspect`.
#[derive(Debug, Serialize)]
struct ColumnSummary {
    column: String,
    parser: String,
    value_type: ValueType,
    non_blank: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    total: Option<f64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Classify {
            tokens,
            policy,
            config,
        } => run_classify(&tokens, policy, config.as_deref()),
        Commands::Format {
            formatter,
            values,
            decimal_places,
            no_multiply,
            url,
        } => {
            let opts = FormatOptions {
                decimal_places,
                multiply: no_multiply.then_some(false),
                url,
            };
            run_format(&formatter, &values, &opts)
        }
        Commands::Inspect { file, config, json } => run_inspect(&file, config.as_deref(), json),
        Commands::Render { file, config } => run_render(&file, config.as_deref()),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("TABLESTACK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<TableConfig> {
    match path {
        Some(path) => TableConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(TableConfig::default()),
    }
}

fn run_classify(tokens: &[String], policy: Option<NumericPolicy>, config: Option<&Path>) -> Result<()> {
    let mut config = load_config(config)?;
    if let Some(policy) = policy {
        config.numeric.policy = policy;
    }
    let classifier = config.classifier();

    for token in tokens {
        println!("{}", classify_line(&classifier, token));
    }
    Ok(())
}

fn classify_line(classifier: &NumericClassifier, token: &str) -> String {
    if !classifier.classify(token) {
        return format!("{token}\ttext\t-");
    }
    match classifier.to_number(&CellValue::raw(token)) {
        Ok(value) => format!("{token}\tnumeric\t{value}"),
        // Pattern policy can accept a shape with no digits in it.
        Err(_) => format!("{token}\tnumeric\t-"),
    }
}

fn run_format(name: &str, values: &[String], opts: &FormatOptions) -> Result<()> {
    let formatter = Formatter::new();
    if !formatter.contains(name) {
        let known: Vec<&str> = formatter.names().collect();
        bail!("unknown formatter {name:?}; available: {}", known.join(", "));
    }
    for value in values {
        println!("{}", formatter.apply(value, name, opts)?);
    }
    Ok(())
}

fn summarize(table: &Table, config: &TableConfig) -> Vec<ColumnSummary> {
    let classifier = config.classifier();
    table
        .detect_parsers(&config.parser_set(), config)
        .into_iter()
        .map(|column| {
            let non_blank = table
                .rows()
                .iter()
                .filter(|row| !row[column.index].trim().is_empty())
                .count();
            let total = match column.value_type() {
                ValueType::Numeric => match table.total(&column.header, &classifier) {
                    Ok(total) => Some(total),
                    Err(err) => {
                        tracing::debug!(%err, "no total for column");
                        None
                    }
                },
                ValueType::Text => None,
            };
            ColumnSummary {
                parser: column.id().to_string(),
                value_type: column.value_type(),
                column: column.header,
                non_blank,
                total,
            }
        })
        .collect()
}

fn run_inspect(file: &Path, config: Option<&Path>, json: bool) -> Result<()> {
    let config = load_config(config)?;
    let table = Table::from_path(file).with_context(|| format!("reading {}", file.display()))?;
    let summary = summarize(&table, &config);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{} rows, {} columns", table.len(), table.headers().len());
    for col in &summary {
        let total = col
            .total
            .map(|t| format!("\ttotal={t}"))
            .unwrap_or_default();
        println!(
            "{}\t{}\t{}\tnon_blank={}{}",
            col.column, col.parser, col.value_type, col.non_blank, total
        );
    }
    Ok(())
}

fn run_render(file: &Path, config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let table = Table::from_path(file).with_context(|| format!("reading {}", file.display()))?;
    let rows = table.render(&Formatter::new(), &config)?;

    println!("{}", table.headers().join("\t"));
    for row in rows {
        println!("{}", row.join("\t"));
    }
    Ok(())
}
