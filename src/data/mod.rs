//! Data module - CSV loading, normalization and aggregation

mod loader;
mod normalizer;
mod processor;
mod summary;

pub use loader::{read_csv_table, DataLoader, LoaderError};
pub use normalizer::{
    extract_amount, month_name, parse_funding_date, DataNormalizer, NormalizeError,
    AMOUNT_COLUMN, AMOUNT_SOURCE_COLUMN, DATE_COLUMN, DATE_SOURCE_COLUMN, MONTH_COLUMN,
    YEAR_COLUMN,
};
pub use processor::{DataProcessor, ProcessorError};
pub use summary::{FundingSummary, DEFAULT_TOP_N, INDUSTRY_COLUMN, STARTUP_COLUMN};
