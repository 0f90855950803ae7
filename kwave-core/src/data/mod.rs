//! Data ingestion, monthly resampling and synthetic series

pub mod ingest;
pub mod resample;
pub mod synthetic;

pub use ingest::{load_csv, read_prices, write_csv, CsvOptions, DataError};
pub use resample::{month_end, month_end_last};
pub use synthetic::SyntheticParams;
