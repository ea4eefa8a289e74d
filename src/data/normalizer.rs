//! Data Normalizer Module
//! Derives typed date and amount columns from the raw funding strings.

use chrono::{Datelike, Month, NaiveDate};
use log::debug;
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;
use thiserror::Error;

/// Raw date column, formatted `dd/mm/yyyy`.
pub const DATE_SOURCE_COLUMN: &str = "Date dd/mm/yyyy";
/// Raw amount column, e.g. `"12,00,000"` or `"$5,000 (approx)"`.
pub const AMOUNT_SOURCE_COLUMN: &str = "Amount in USD";

pub const DATE_COLUMN: &str = "Date";
pub const YEAR_COLUMN: &str = "Year";
pub const MONTH_COLUMN: &str = "Month";
pub const AMOUNT_COLUMN: &str = "AmountUSD";

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").unwrap());

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Adds derived columns to a loaded table.
pub struct DataNormalizer;

impl DataNormalizer {
    /// Derive `Date`/`Year`/`Month` and `AmountUSD` where their source columns exist.
    ///
    /// Only adds columns: existing columns keep their values and order, and a
    /// previously derived column is replaced in place, so running this twice
    /// yields the same table.
    pub fn normalize(df: &DataFrame) -> Result<DataFrame, NormalizeError> {
        let mut out = df.clone();

        if has_column(df, DATE_SOURCE_COLUMN) {
            Self::derive_dates(&mut out)?;
        }
        if has_column(df, AMOUNT_SOURCE_COLUMN) {
            Self::derive_amounts(&mut out)?;
        }

        Ok(out)
    }

    fn derive_dates(df: &mut DataFrame) -> Result<(), NormalizeError> {
        let raw = df.column(DATE_SOURCE_COLUMN)?.cast(&DataType::String)?;
        let raw = raw.str()?;

        let mut days: Vec<Option<i32>> = Vec::with_capacity(raw.len());
        let mut years: Vec<Option<i32>> = Vec::with_capacity(raw.len());
        let mut months: Vec<Option<&'static str>> = Vec::with_capacity(raw.len());
        let mut unparsed = 0usize;

        for cell in raw.into_iter() {
            match cell.and_then(parse_funding_date) {
                Some(date) => {
                    days.push(Some(days_since_epoch(date)));
                    years.push(Some(date.year()));
                    months.push(month_name(date.month()));
                }
                None => {
                    unparsed += 1;
                    days.push(None);
                    years.push(None);
                    months.push(None);
                }
            }
        }

        if unparsed > 0 {
            debug!("{} rows have no parseable '{}'", unparsed, DATE_SOURCE_COLUMN);
        }

        let dates = Column::new(DATE_COLUMN.into(), days).cast(&DataType::Date)?;
        df.with_column(dates)?;
        df.with_column(Column::new(YEAR_COLUMN.into(), years))?;
        df.with_column(Column::new(MONTH_COLUMN.into(), months))?;
        Ok(())
    }

    fn derive_amounts(df: &mut DataFrame) -> Result<(), NormalizeError> {
        let raw = df.column(AMOUNT_SOURCE_COLUMN)?.cast(&DataType::String)?;
        let raw = raw.str()?;

        let amounts: Vec<Option<f64>> = raw
            .into_iter()
            .map(|cell| cell.and_then(extract_amount))
            .collect();

        let missing = amounts.iter().filter(|a| a.is_none()).count();
        if missing > 0 {
            debug!("{} rows have no parseable '{}'", missing, AMOUNT_SOURCE_COLUMN);
        }

        df.with_column(Column::new(AMOUNT_COLUMN.into(), amounts))?;
        Ok(())
    }
}

pub(crate) fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_index(name).is_some()
}

/// Parse a `dd/mm/yyyy` date strictly: 1-2 digit day and month, 4 digit year.
pub fn parse_funding_date(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.split('/');
    let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let digits = |s: &str, min: usize, max: usize| {
        (min..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
    };
    if !digits(day, 1, 2) || !digits(month, 1, 2) || !digits(year, 4, 4) {
        return None;
    }

    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

/// Strip thousands separators and parse the first run of digits.
pub fn extract_amount(raw: &str) -> Option<f64> {
    let cleaned = raw.replace(',', "");
    DIGIT_RUN
        .find(&cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Full English month name for a 1-based month number.
pub fn month_name(month: u32) -> Option<&'static str> {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
}

pub(crate) fn days_since_epoch(date: NaiveDate) -> i32 {
    (date - NaiveDate::default()).num_days() as i32
}

pub(crate) fn date_from_epoch_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::default().checked_add_signed(chrono::Duration::days(days as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_day_month_year() {
        let date = parse_funding_date("04/07/2015").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2015, 7, 4).unwrap());
        assert_eq!(month_name(date.month()), Some("July"));
    }

    #[test]
    fn rejects_malformed_dates() {
        assert_eq!(parse_funding_date("31/13/2015"), None);
        assert_eq!(parse_funding_date("30/02/2016"), None);
        assert_eq!(parse_funding_date("05/072018"), None);
        assert_eq!(parse_funding_date("01/07/015"), None);
        assert_eq!(parse_funding_date("12/05.2015"), None);
        assert_eq!(parse_funding_date("2015/07/04"), None);
        assert_eq!(parse_funding_date(""), None);
        assert_eq!(parse_funding_date(" 04/07/2015"), None);
        assert_eq!(parse_funding_date("04/07/2015 "), None);
    }

    #[test]
    fn accepts_unpadded_day_and_month() {
        assert_eq!(
            parse_funding_date("4/7/2015"),
            NaiveDate::from_ymd_opt(2015, 7, 4)
        );
    }

    #[test]
    fn extracts_amounts() {
        assert_eq!(extract_amount("12,00,000"), Some(1_200_000.0));
        assert_eq!(extract_amount("$5,000 (approx)"), Some(5000.0));
        assert_eq!(extract_amount("1,500.75"), Some(1500.0));
        assert_eq!(extract_amount("0"), Some(0.0));
        assert_eq!(extract_amount("N/A"), None);
        assert_eq!(extract_amount("undisclosed"), None);
    }

    #[test]
    fn epoch_days_roundtrip() {
        let date = NaiveDate::from_ymd_opt(2015, 7, 4).unwrap();
        assert_eq!(date_from_epoch_days(days_since_epoch(date)), Some(date));
        assert_eq!(days_since_epoch(NaiveDate::from_ymd_opt(1970, 1, 2).unwrap()), 1);
    }

    #[test]
    fn month_name_out_of_range() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(13), None);
    }
}
