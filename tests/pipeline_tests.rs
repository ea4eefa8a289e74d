//! Loader → normalizer → filter → aggregate tests against CSV fixtures on disk.

use funding_dashboard::data::{
    read_csv_table, DataLoader, DataNormalizer, DataProcessor, AMOUNT_COLUMN,
    AMOUNT_SOURCE_COLUMN, DATE_COLUMN, DATE_SOURCE_COLUMN, MONTH_COLUMN, YEAR_COLUMN,
};
use polars::prelude::*;
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_csv(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn strings(df: &DataFrame, column: &str) -> Vec<Option<String>> {
    df.column(column)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect()
}

fn floats(df: &DataFrame, column: &str) -> Vec<Option<f64>> {
    df.column(column).unwrap().f64().unwrap().into_iter().collect()
}

fn ints(df: &DataFrame, column: &str) -> Vec<Option<i32>> {
    df.column(column).unwrap().i32().unwrap().into_iter().collect()
}

const FUNDING_CSV: &str = "\
 Sr No , Date dd/mm/yyyy ,Startup Name,Industry Vertical, Amount in USD \n\
1,04/07/2015,Alpha,Fintech,\"12,00,000\"\n\
2,31/13/2015,Beta,E-Commerce,\"$5,000 (approx)\"\n\
3,15/01/2014,Alpha,Fintech,N/A\n\
,,,,\n\
4,20/07/2015,Gamma,Fintech,0\n";

// ═══════════════════════════════════════════════════════════════════════════
// LOADER
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_load_missing_file_is_absent() {
    let dir = TempDir::new().unwrap();
    let mut loader = DataLoader::new();
    let result = loader.load(dir.path().join("missing.csv")).unwrap();
    assert!(result.is_none());
}

#[test]
fn test_load_directory_is_absent() {
    let dir = TempDir::new().unwrap();
    let mut loader = DataLoader::new();
    assert!(loader.load(dir.path()).unwrap().is_none());
}

#[test]
fn test_load_trims_column_names() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "funding.csv", FUNDING_CSV);
    let df = DataLoader::new().load(&path).unwrap().unwrap();

    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "Sr No",
            DATE_SOURCE_COLUMN,
            "Startup Name",
            "Industry Vertical",
            AMOUNT_SOURCE_COLUMN
        ]
    );
    assert!(names.iter().all(|n| n.trim() == n));
}

#[test]
fn test_load_drops_blank_rows_and_keeps_order() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "funding.csv", FUNDING_CSV);
    let df = DataLoader::new().load(&path).unwrap().unwrap();

    assert_eq!(df.height(), 4);
    assert_eq!(
        strings(&df, "Sr No"),
        vec![
            Some("1".to_string()),
            Some("2".to_string()),
            Some("3".to_string()),
            Some("4".to_string())
        ]
    );
}

#[test]
fn test_load_is_memoized() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "funding.csv", FUNDING_CSV);
    let mut loader = DataLoader::new();

    let first = loader.load(&path).unwrap().unwrap();
    assert!(loader.is_cached(&path));

    // The cached table wins even if the file changes underneath.
    fs::write(&path, "Startup Name\nOther\n").unwrap();
    let second = loader.load(&path).unwrap().unwrap();

    assert!(first.equals_missing(&second));
    assert_eq!(loader.cached_len(), 1);
}

#[test]
fn test_load_missing_file_is_not_cached() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("later.csv");
    let mut loader = DataLoader::new();

    assert!(loader.load(&path).unwrap().is_none());
    fs::write(&path, "Startup Name\nAlpha\n").unwrap();
    let df = loader.load(&path).unwrap().unwrap();
    assert_eq!(df.height(), 1);
}

#[test]
fn test_load_tolerates_ragged_rows() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "ragged.csv", "a,b,c\n1,2,3,4,5\n6\n7,,9\n");
    let df = read_csv_table(&path).unwrap();

    assert_eq!(df.width(), 3);
    assert_eq!(df.height(), 3);
    assert_eq!(
        strings(&df, "c"),
        vec![Some("3".to_string()), None, Some("9".to_string())]
    );
    assert_eq!(strings(&df, "b"), vec![Some("2".to_string()), None, None]);
}

#[test]
fn test_load_ignores_byte_order_mark() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "bom.csv",
        "\u{feff}Date dd/mm/yyyy,Startup Name,Industry Vertical,Amount in USD\n\
         04/07/2015,Alpha,Fintech,\"1,000\"\n",
    );
    let df = DataLoader::new().load(&path).unwrap().unwrap();

    let first = df.get_column_names()[0].to_string();
    assert_eq!(first, DATE_SOURCE_COLUMN);

    let normalized = DataNormalizer::normalize(&df).unwrap();
    assert_eq!(ints(&normalized, YEAR_COLUMN), vec![Some(2015)]);
    assert_eq!(floats(&normalized, AMOUNT_COLUMN), vec![Some(1000.0)]);
}

#[test]
fn test_load_header_only_file() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "empty.csv", "Startup Name,Amount in USD\n");
    let df = read_csv_table(&path).unwrap();
    assert_eq!(df.height(), 0);
    assert_eq!(df.width(), 2);
}

#[test]
fn test_load_empty_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "nothing.csv", "");
    assert!(read_csv_table(&path).is_err());
}

#[test]
fn test_load_whitespace_cells_are_kept() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "spaces.csv", "a,b\n , \n");
    let df = read_csv_table(&path).unwrap();
    assert_eq!(df.height(), 1);
    assert_eq!(strings(&df, "a"), vec![Some(" ".to_string())]);
}

// ═══════════════════════════════════════════════════════════════════════════
// NORMALIZER
// ═══════════════════════════════════════════════════════════════════════════

fn normalized_fixture() -> DataFrame {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "funding.csv", FUNDING_CSV);
    let raw = DataLoader::new().load(&path).unwrap().unwrap();
    DataNormalizer::normalize(&raw).unwrap()
}

#[test]
fn test_normalize_derives_dates() {
    let df = normalized_fixture();

    assert_eq!(
        ints(&df, YEAR_COLUMN),
        vec![Some(2015), None, Some(2014), Some(2015)]
    );
    assert_eq!(
        strings(&df, MONTH_COLUMN),
        vec![
            Some("July".to_string()),
            None,
            Some("January".to_string()),
            Some("July".to_string())
        ]
    );
    assert_eq!(df.column(DATE_COLUMN).unwrap().dtype(), &DataType::Date);
    assert_eq!(df.column(DATE_COLUMN).unwrap().null_count(), 1);
}

#[test]
fn test_normalize_derives_amounts() {
    let df = normalized_fixture();
    assert_eq!(
        floats(&df, AMOUNT_COLUMN),
        vec![Some(1_200_000.0), Some(5000.0), None, Some(0.0)]
    );
}

#[test]
fn test_normalize_only_adds_columns() {
    let raw = df!(
        "Startup Name" => &["Alpha"],
        DATE_SOURCE_COLUMN => &["04/07/2015"],
        AMOUNT_SOURCE_COLUMN => &["1,000"]
    )
    .unwrap();
    let df = DataNormalizer::normalize(&raw).unwrap();

    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "Startup Name",
            DATE_SOURCE_COLUMN,
            AMOUNT_SOURCE_COLUMN,
            DATE_COLUMN,
            YEAR_COLUMN,
            MONTH_COLUMN,
            AMOUNT_COLUMN
        ]
    );
    assert_eq!(strings(&df, AMOUNT_SOURCE_COLUMN), vec![Some("1,000".to_string())]);
}

#[test]
fn test_normalize_is_idempotent() {
    let once = normalized_fixture();
    let twice = DataNormalizer::normalize(&once).unwrap();
    assert!(once.equals_missing(&twice));
}

#[test]
fn test_normalize_without_source_columns_is_noop() {
    let raw = df!("Startup Name" => &["Alpha", "Beta"]).unwrap();
    let df = DataNormalizer::normalize(&raw).unwrap();
    assert!(df.equals_missing(&raw));
}

// ═══════════════════════════════════════════════════════════════════════════
// FILTER & AGGREGATE
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_filter_by_year_keeps_matching_rows_in_order() {
    let df = df!(
        "Startup Name" => &["A", "B", "C"],
        YEAR_COLUMN => &[2014, 2015, 2015]
    )
    .unwrap();
    let filtered = DataProcessor::filter_by_year(&df, &BTreeSet::from([2015])).unwrap();

    assert_eq!(
        strings(&filtered, "Startup Name"),
        vec![Some("B".to_string()), Some("C".to_string())]
    );
}

#[test]
fn test_filter_excludes_rows_without_year() {
    let df = normalized_fixture();
    let filtered = DataProcessor::filter_by_year(&df, &BTreeSet::from([2014, 2015])).unwrap();
    assert_eq!(filtered.height(), 3);
}

#[test]
fn test_filter_without_year_column_errors() {
    let df = df!("Startup Name" => &["A"]).unwrap();
    assert!(DataProcessor::filter_by_year(&df, &BTreeSet::from([2015])).is_err());
    assert_eq!(
        DataProcessor::filter_by_year(&df, &BTreeSet::new())
            .unwrap()
            .height(),
        1
    );
}

#[test]
fn test_aggregate_by_startup() {
    let df = df!(
        "Startup Name" => &["A", "B", "A"],
        AMOUNT_COLUMN => &[100.0, 50.0, 30.0]
    )
    .unwrap();
    let groups = DataProcessor::aggregate_by(&df, "Startup Name", AMOUNT_COLUMN).unwrap();
    assert_eq!(
        groups,
        vec![("A".to_string(), 130.0), ("B".to_string(), 50.0)]
    );
}

#[test]
fn test_aggregate_excludes_absent_but_keeps_zero() {
    let df = normalized_fixture();
    let groups = DataProcessor::aggregate_by(&df, "Startup Name", AMOUNT_COLUMN).unwrap();
    assert_eq!(
        groups,
        vec![
            ("Alpha".to_string(), 1_200_000.0),
            ("Beta".to_string(), 5000.0),
            ("Gamma".to_string(), 0.0)
        ]
    );
}

#[test]
fn test_monthly_totals_are_chronological() {
    let df = normalized_fixture();
    let monthly = DataProcessor::monthly_totals(&df, AMOUNT_COLUMN).unwrap();
    // 2014-01 only has an unparseable amount, Beta has no date.
    assert_eq!(monthly, vec![("2015-07".to_string(), 1_200_000.0)]);
}

#[test]
fn test_available_years() {
    let df = normalized_fixture();
    assert_eq!(DataProcessor::available_years(&df), vec![2014, 2015]);
}
