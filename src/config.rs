//! Command-line and environment configuration.

use crate::data::DEFAULT_TOP_N;
use clap::Parser;
use std::collections::BTreeSet;
use std::path::PathBuf;

pub const DEFAULT_DATA_PATH: &str = "Startup_Funding.csv";

#[derive(Parser, Debug, Clone)]
#[command(name = "funding-dashboard")]
#[command(about = "Startup investment analysis dashboard")]
#[command(long_about = "Startup investment analysis dashboard.

Loads a startup funding CSV (columns 'Date dd/mm/yyyy', 'Amount in USD',
'Startup Name', 'Industry Vertical'), cleans dates and amounts, and charts
funding over time plus the top funded startups and industries.

EXAMPLES:
  funding-dashboard                                  # open the dashboard window
  funding-dashboard -d data/Startup_Funding.csv
  funding-dashboard --export charts/ --year 2016,2017")]
#[command(version)]
pub struct Args {
    /// Path to the funding CSV
    #[arg(short, long, env = "FUNDING_CSV", default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Write charts and summary.json to this directory instead of opening the window
    #[arg(short, long, value_name = "DIR")]
    pub export: Option<PathBuf>,

    /// Restrict the export to these years (repeatable or comma-separated; default: all)
    #[arg(short, long = "year", value_delimiter = ',')]
    pub years: Vec<i32>,

    /// Number of startups and industries in the top charts
    #[arg(short, long, default_value_t = DEFAULT_TOP_N)]
    pub top: usize,
}

impl Args {
    pub fn selected_years(&self) -> BTreeSet<i32> {
        self.years.iter().copied().collect()
    }
}
