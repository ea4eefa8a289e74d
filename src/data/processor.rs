//! Data Processor Module
//! Year filtering and group-sum aggregation over a normalized table.

use super::normalizer::{date_from_epoch_days, has_column, DATE_COLUMN, YEAR_COLUMN};
use chrono::Datelike;
use polars::prelude::*;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Column '{0}' not found")]
    MissingColumn(String),
}

/// Filtering and aggregation over normalized tables.
pub struct DataProcessor;

impl DataProcessor {
    /// Distinct years present in the table, ascending.
    pub fn available_years(df: &DataFrame) -> Vec<i32> {
        let Ok(column) = df.column(YEAR_COLUMN) else {
            return Vec::new();
        };
        let Ok(years) = column.cast(&DataType::Int32) else {
            return Vec::new();
        };

        years
            .i32()
            .map(|ca| {
                ca.into_iter()
                    .flatten()
                    .collect::<BTreeSet<i32>>()
                    .into_iter()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Keep rows whose year is in `selected`, in their original order.
    ///
    /// An empty selection applies no filter. Rows without a year never match
    /// a non-empty selection.
    pub fn filter_by_year(
        df: &DataFrame,
        selected: &BTreeSet<i32>,
    ) -> Result<DataFrame, ProcessorError> {
        if selected.is_empty() {
            return Ok(df.clone());
        }

        let years = Self::require(df, YEAR_COLUMN)?.cast(&DataType::Int32)?;
        let mask: BooleanChunked = years
            .i32()?
            .into_iter()
            .map(|year| year.is_some_and(|y| selected.contains(&y)))
            .collect();

        Ok(df.filter(&mask)?)
    }

    /// Sum `value_column` per distinct `key_column`, largest sum first.
    ///
    /// Rows with a missing key or value are left out of every group; ties are
    /// ordered by key.
    pub fn aggregate_by(
        df: &DataFrame,
        key_column: &str,
        value_column: &str,
    ) -> Result<Vec<(String, f64)>, ProcessorError> {
        let keys = Self::require(df, key_column)?.cast(&DataType::String)?;
        let values = Self::require(df, value_column)?.cast(&DataType::Float64)?;

        let mut sums: HashMap<String, f64> = HashMap::new();
        for (key, value) in keys.str()?.into_iter().zip(values.f64()?.into_iter()) {
            if let (Some(key), Some(value)) = (key, value) {
                *sums.entry(key.to_string()).or_insert(0.0) += value;
            }
        }

        let mut groups: Vec<(String, f64)> = sums.into_iter().collect();
        groups.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        Ok(groups)
    }

    /// Sum `value_column` per calendar month of `Date`, keyed `YYYY-MM`, oldest first.
    pub fn monthly_totals(
        df: &DataFrame,
        value_column: &str,
    ) -> Result<Vec<(String, f64)>, ProcessorError> {
        let days = Self::require(df, DATE_COLUMN)?.cast(&DataType::Int32)?;
        let values = Self::require(df, value_column)?.cast(&DataType::Float64)?;

        let mut sums: BTreeMap<(i32, u32), f64> = BTreeMap::new();
        for (day, value) in days.i32()?.into_iter().zip(values.f64()?.into_iter()) {
            let (Some(date), Some(value)) = (day.and_then(date_from_epoch_days), value) else {
                continue;
            };
            *sums.entry((date.year(), date.month())).or_insert(0.0) += value;
        }

        Ok(sums
            .into_iter()
            .map(|((year, month), total)| (format!("{:04}-{:02}", year, month), total))
            .collect())
    }

    /// First `n` groups of an aggregation.
    pub fn top_n(mut groups: Vec<(String, f64)>, n: usize) -> Vec<(String, f64)> {
        groups.truncate(n);
        groups
    }

    fn require<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, ProcessorError> {
        if !has_column(df, name) {
            return Err(ProcessorError::MissingColumn(name.to_string()));
        }
        Ok(df.column(name)?)
    }
}
