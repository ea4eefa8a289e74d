//! Dashboard Summary Module
//! Everything the dashboard draws for one year selection.

use super::normalizer::{has_column, AMOUNT_COLUMN, DATE_COLUMN};
use super::processor::{DataProcessor, ProcessorError};
use polars::prelude::*;
use serde::Serialize;
use std::collections::BTreeSet;

pub const STARTUP_COLUMN: &str = "Startup Name";
pub const INDUSTRY_COLUMN: &str = "Industry Vertical";
pub const DEFAULT_TOP_N: usize = 10;

/// Filtered and aggregated view of a normalized funding table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FundingSummary {
    pub total_rows: usize,
    pub filtered_rows: usize,
    pub available_years: Vec<i32>,
    pub selected_years: Vec<i32>,
    /// Maximum number of groups in each top chart.
    pub top: usize,
    pub total_amount: f64,
    /// `None` when the table has no `Date` column.
    pub monthly: Option<Vec<(String, f64)>>,
    /// `None` when the table has no `Startup Name` column.
    pub top_startups: Option<Vec<(String, f64)>>,
    /// `None` when the table has no `Industry Vertical` column.
    pub top_industries: Option<Vec<(String, f64)>>,
}

impl FundingSummary {
    /// Filter `df` to `selected_years` and compute every chart series.
    pub fn compute(
        df: &DataFrame,
        selected_years: &BTreeSet<i32>,
        top: usize,
    ) -> Result<Self, ProcessorError> {
        let available_years = DataProcessor::available_years(df);
        let filtered = DataProcessor::filter_by_year(df, selected_years)?;
        let has_amount = has_column(&filtered, AMOUNT_COLUMN);

        let total_amount = if has_amount {
            filtered
                .column(AMOUNT_COLUMN)?
                .cast(&DataType::Float64)?
                .f64()?
                .into_iter()
                .flatten()
                .sum::<f64>()
        } else {
            0.0
        };

        let monthly = if has_amount && has_column(&filtered, DATE_COLUMN) {
            Some(DataProcessor::monthly_totals(&filtered, AMOUNT_COLUMN)?)
        } else {
            None
        };

        let top_by = |key: &str| -> Result<Option<Vec<(String, f64)>>, ProcessorError> {
            if !has_amount || !has_column(&filtered, key) {
                return Ok(None);
            }
            let groups = DataProcessor::aggregate_by(&filtered, key, AMOUNT_COLUMN)?;
            Ok(Some(DataProcessor::top_n(groups, top)))
        };

        Ok(Self {
            total_rows: df.height(),
            filtered_rows: filtered.height(),
            available_years,
            selected_years: selected_years.iter().copied().collect(),
            top,
            total_amount,
            monthly,
            top_startups: top_by(STARTUP_COLUMN)?,
            top_industries: top_by(INDUSTRY_COLUMN)?,
        })
    }

    /// True when the year selection matched no rows.
    pub fn is_empty(&self) -> bool {
        self.filtered_rows == 0
    }
}
