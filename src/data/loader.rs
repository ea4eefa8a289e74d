//! CSV Data Loader Module
//! Reads the funding CSV into a Polars DataFrame and memoizes it per file path.

use log::{debug, info, warn};
use polars::prelude::*;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read CSV: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Failed to access file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to build table: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("CSV file has no header row")]
    MissingHeader,
}

/// Loads CSV files into DataFrames, caching each table by its path.
///
/// The cache is never invalidated: the source file is treated as immutable
/// for the lifetime of the loader. Missing files are not cached, so a file
/// that appears later is picked up on the next call.
#[derive(Default)]
pub struct DataLoader {
    cache: HashMap<PathBuf, DataFrame>,
}

impl DataLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a CSV file, returning `None` when no file exists at `path`.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<Option<DataFrame>, LoaderError> {
        let path = path.as_ref();
        if !path.is_file() {
            warn!("File not found at: {}", path.display());
            return Ok(None);
        }

        let key = cache_key(path);
        if let Some(df) = self.cache.get(&key) {
            debug!("Using cached table for {}", key.display());
            return Ok(Some(df.clone()));
        }

        let df = read_csv_table(path)?;
        info!(
            "Loaded {} rows, {} columns from {}",
            df.height(),
            df.width(),
            path.display()
        );
        self.cache.insert(key, df.clone());
        Ok(Some(df))
    }

    /// Whether a table for `path` is already memoized.
    pub fn is_cached(&self, path: impl AsRef<Path>) -> bool {
        self.cache.contains_key(&cache_key(path.as_ref()))
    }

    /// Number of memoized tables.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

fn cache_key(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Read a CSV file into a DataFrame of nullable string columns, bypassing the cache.
///
/// Header names are trimmed, empty cells become null, cells past the header
/// width are ignored and rows with every cell empty are dropped.
pub fn read_csv_table(path: &Path) -> Result<DataFrame, LoaderError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let raw_headers = reader.headers()?.clone();
    if raw_headers.is_empty() {
        return Err(LoaderError::MissingHeader);
    }
    let headers = column_names(raw_headers.iter());
    let width = headers.len();

    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); width];
    let mut dropped = 0usize;

    for result in reader.records() {
        let record = result?;
        let row: Vec<Option<String>> = (0..width)
            .map(|i| match record.get(i) {
                Some(value) if !value.is_empty() => Some(value.to_string()),
                _ => None,
            })
            .collect();

        if row.iter().all(Option::is_none) {
            dropped += 1;
            continue;
        }
        for (column, value) in cells.iter_mut().zip(row) {
            column.push(value);
        }
    }

    if dropped > 0 {
        debug!("Dropped {} empty rows from {}", dropped, path.display());
    }

    let columns: Vec<Column> = headers
        .into_iter()
        .zip(cells)
        .map(|(name, values)| Column::new(name.into(), values))
        .collect();

    Ok(DataFrame::new(columns)?)
}

/// Trim header names and make them unique.
fn column_names<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut names = Vec::new();

    for (idx, header) in raw.enumerate() {
        let trimmed = header.trim_start_matches('\u{feff}').trim();
        let base = if trimmed.is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            trimmed.to_string()
        };

        let mut name = base.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{}.{}", base, suffix);
            suffix += 1;
        }
        seen.insert(name.clone());
        names.push(name);
    }

    names
}
