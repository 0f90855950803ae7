//! CSV ingestion of price histories.
//!
//! Expects a header row with a `date` column and a price column. The price
//! column defaults to `close`, then `adj_close` / `adj close`, then `price`
//! (all matched case-insensitively). Rows with an empty or `NaN` price are
//! dropped. Dates may be `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` or `YYYY-MM`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;

use super::resample::month_end_last;
use crate::domain::{PricePoint, PriceSeries};
use crate::error::KwaveError;

const PRICE_FALLBACKS: [&str; 4] = ["close", "adj_close", "adj close", "price"];

#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column: {0}")]
    MissingColumn(String),

    #[error("row {row}: cannot parse date '{value}'")]
    ParseDate { row: usize, value: String },

    #[error("row {row}: cannot parse price '{value}'")]
    ParsePrice { row: usize, value: String },

    #[error("duplicate date {0}")]
    DuplicateDate(NaiveDate),

    #[error("no price rows found")]
    Empty,

    #[error(transparent)]
    Invalid(#[from] KwaveError),
}

/// How to read a price file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CsvOptions {
    /// Explicit price column; `None` tries the usual names.
    pub price_column: Option<String>,
    /// Reduce to the last observation of each calendar month.
    pub resample_monthly: bool,
}

/// Read `(date, price)` rows, sorted by date.
pub fn read_prices<R: Read>(reader: R, opts: &CsvOptions) -> Result<Vec<PricePoint>, DataError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
    };

    let date_idx = find("date").ok_or_else(|| DataError::MissingColumn("date".into()))?;
    let price_idx = match &opts.price_column {
        Some(name) => find(name).ok_or_else(|| DataError::MissingColumn(name.clone()))?,
        None => PRICE_FALLBACKS
            .iter()
            .find_map(|name| find(name))
            .ok_or_else(|| DataError::MissingColumn(PRICE_FALLBACKS.join(" | ")))?,
    };

    let mut points = Vec::new();
    let mut dropped = 0usize;
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        // Header is row 1.
        let row = i + 2;
        let raw_date = record.get(date_idx).unwrap_or_default();
        let raw_price = record.get(price_idx).unwrap_or_default();

        if is_missing(raw_price) {
            dropped += 1;
            continue;
        }
        let date = parse_date(raw_date).ok_or_else(|| DataError::ParseDate {
            row,
            value: raw_date.to_string(),
        })?;
        let price: f64 = raw_price.parse().map_err(|_| DataError::ParsePrice {
            row,
            value: raw_price.to_string(),
        })?;
        points.push(PricePoint::new(date, price));
    }

    if dropped > 0 {
        log::debug!("dropped {dropped} rows with missing prices");
    }

    points.sort_by_key(|p| p.date);
    if let Some(w) = points.windows(2).find(|w| w[0].date == w[1].date) {
        return Err(DataError::DuplicateDate(w[0].date));
    }
    Ok(points)
}

/// Load a CSV file into a validated series.
pub fn load_csv(path: &Path, opts: &CsvOptions) -> Result<PriceSeries, DataError> {
    let file = std::fs::File::open(path)?;
    let points = read_prices(file, opts)?;
    if points.is_empty() {
        return Err(DataError::Empty);
    }
    let points = if opts.resample_monthly {
        month_end_last(&points)
    } else {
        points
    };
    log::info!("loaded {} monthly points from {}", points.len(), path.display());
    Ok(PriceSeries::new(points)?)
}

/// Write a series as `date,close` CSV.
pub fn write_csv<W: Write>(writer: W, series: &PriceSeries) -> Result<(), DataError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["date", "close"])?;
    for p in series.points() {
        wtr.write_record([p.date.to_string(), format!("{:.6}", p.price)])?;
    }
    wtr.flush()?;
    Ok(())
}

fn is_missing(raw: &str) -> bool {
    raw.is_empty() || raw.eq_ignore_ascii_case("nan") || raw.eq_ignore_ascii_case("null")
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let head = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(head, "%Y-%m-%d")
        .ok()
        .or_else(|| NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d").ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(text: &str, opts: &CsvOptions) -> Result<Vec<PricePoint>, DataError> {
        read_prices(text.as_bytes(), opts)
    }

    #[test]
    fn reads_close_column_by_default() {
        let pts = read(
            "Date,Open,Close\n2020-01-31,1,100.5\n2020-02-29,1,101.25\n",
            &CsvOptions::default(),
        )
        .unwrap();
        assert_eq!(pts.len(), 2);
        assert_eq!(pts[0].date, NaiveDate::from_ymd_opt(2020, 1, 31).unwrap());
        assert_eq!(pts[1].price, 101.25);
    }

    #[test]
    fn falls_back_to_price_column() {
        let pts = read("date,price\n2020-01,5\n2020-02,6\n", &CsvOptions::default()).unwrap();
        assert_eq!(pts[0].date, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(pts[1].price, 6.0);
    }

    #[test]
    fn explicit_column_wins() {
        let opts = CsvOptions {
            price_column: Some("adj".into()),
            ..Default::default()
        };
        let pts = read("date,close,adj\n2020-01-01,10,9\n", &opts).unwrap();
        assert_eq!(pts[0].price, 9.0);
    }

    #[test]
    fn missing_date_column_is_reported() {
        let err = read("when,close\n2020-01-01,1\n", &CsvOptions::default()).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(ref c) if c == "date"));
    }

    #[test]
    fn missing_prices_are_dropped() {
        let pts = read(
            "date,close\n2020-01-01,1\n2020-02-01,\n2020-03-01,NaN\n2020-04-01,4\n",
            &CsvOptions::default(),
        )
        .unwrap();
        assert_eq!(pts.len(), 2);
    }

    #[test]
    fn rows_are_sorted_and_duplicates_rejected() {
        let pts = read(
            "date,close\n2020-03-01,3\n2020-01-01,1\n2020-02-01,2\n",
            &CsvOptions::default(),
        )
        .unwrap();
        let prices: Vec<f64> = pts.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![1.0, 2.0, 3.0]);

        let err = read(
            "date,close\n2020-01-01,1\n2020-01-01,2\n",
            &CsvOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DataError::DuplicateDate(_)));
    }

    #[test]
    fn bad_values_report_row() {
        let err = read("date,close\n2020-01-01,abc\n", &CsvOptions::default()).unwrap_err();
        assert!(matches!(err, DataError::ParsePrice { row: 2, .. }));
        let err = read("date,close\nyesterday,1\n", &CsvOptions::default()).unwrap_err();
        assert!(matches!(err, DataError::ParseDate { row: 2, .. }));
    }

    #[test]
    fn timestamp_dates_are_truncated() {
        let pts = read(
            "date,close\n2020-01-31 00:00:00,1\n",
            &CsvOptions::default(),
        )
        .unwrap();
        assert_eq!(pts[0].date, NaiveDate::from_ymd_opt(2020, 1, 31).unwrap());
    }

    #[test]
    fn write_then_read_preserves_points() {
        let series = PriceSeries::from_prices(
            NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            &[100.0, 101.5, 99.25],
        )
        .unwrap();
        let mut buf = Vec::new();
        write_csv(&mut buf, &series).unwrap();
        let back = read_prices(buf.as_slice(), &CsvOptions::default()).unwrap();
        assert_eq!(back, series.points());
    }
}
