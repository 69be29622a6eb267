//! End-to-end: CSV + TOML config on disk through detection, totals and rendering.

use std::fs;

use tablestack_core::{
    ConfigError, Formatter, NumericPolicy, SortDirection, SortKey, Table, TableConfig, TableError,
    ValueType,
};

const BUDGET_CSV: &str = "\
Agency,State,Budget,Change,Site
Parks Dept,California,\"$1,250,000\",0.042,https://parks.example
Water Board,ny,\"$980,500.25\",-0.013,https://water.example
Transit,Texas,\"€2,000,000\",0.1,https://transit.example
";

const BUDGET_TOML: &str = r#"
per_page = 50

[[sort_list]]
column = "Budget"
direction = "descending"

[columns.Agency]
formatter = "link"
url_column = "Site"

[columns.State]
formatter = "ap_state"

[columns.Change]
formatter = "percent_change"
"#;

fn write_fixture() -> (tempfile::TempDir, Table, TableConfig) {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("budget.csv");
    let toml_path = dir.path().join("budget.toml");
    fs::write(&csv_path, BUDGET_CSV).unwrap();
    fs::write(&toml_path, BUDGET_TOML).unwrap();

    let table = Table::from_path(&csv_path).unwrap();
    let config = TableConfig::from_file(&toml_path).unwrap();
    (dir, table, config)
}

#[test]
fn config_is_loaded_from_disk() {
    let (_dir, _table, config) = write_fixture();
    assert_eq!(config.per_page, 50);
    assert_eq!(config.numeric.policy, NumericPolicy::Strict);
    assert_eq!(config.sort_list[0].column, "Budget");
    assert_eq!(config.sort_list[0].direction, SortDirection::Descending);
}

#[test]
fn detection_and_sort_keys() {
    let (_dir, table, config) = write_fixture();
    let parsers = table.detect_parsers(&config.parser_set(), &config);
    let types: Vec<ValueType> = parsers.iter().map(|p| p.value_type()).collect();
    assert_eq!(
        types,
        vec![ValueType::Text, ValueType::Text, ValueType::Numeric, ValueType::Numeric, ValueType::Text]
    );

    let keys = table.sort_keys(&parsers[2]);
    assert_eq!(
        keys,
        vec![
            SortKey::Numeric(1_250_000.0),
            SortKey::Numeric(980_500.25),
            SortKey::Numeric(2_000_000.0),
        ]
    );
}

#[test]
fn totals_over_decorated_cells() {
    let (_dir, table, config) = write_fixture();
    let total = table.total("Budget", &config.classifier()).unwrap();
    assert_eq!(total, 4_230_500.25);
    assert!(matches!(
        table.total("State", &config.classifier()),
        Err(TableError::NonNumeric { .. })
    ));
}

#[test]
fn rendered_output() {
    let (_dir, table, config) = write_fixture();
    let rows = table.render(&Formatter::new(), &config).unwrap();
    assert_eq!(
        rows[0][0],
        r#"<a target="_blank" href="https://parks.example" title="Parks Dept">Parks Dept</a>"#
    );
    assert_eq!(rows[0][1], "Calif.");
    assert_eq!(rows[1][1], "N.Y.");
    assert_eq!(rows[0][3], "+4.2%");
    assert_eq!(rows[1][3], "-1.3%");
    // Untouched columns pass through.
    assert_eq!(rows[2][2], "€2,000,000");
}

#[test]
fn missing_table_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Table::from_path(&dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, TableError::Io { .. }));
}

#[test]
fn invalid_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "per_page = \"many\"").unwrap();
    assert!(matches!(TableConfig::from_file(&path), Err(ConfigError::Parse(_))));
}
