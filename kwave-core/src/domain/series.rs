//! The monthly price series input handed to the extractor.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{KwaveError, Result};

/// One monthly observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }

    /// True for a finite, strictly positive price.
    pub fn is_sane(&self) -> bool {
        self.price.is_finite() && self.price > 0.0
    }
}

/// Chronologically ordered monthly prices.
///
/// Dates are strictly increasing and every price is finite and positive.
/// Missing months are tolerated; spacing is not checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PricePoint>", into = "Vec<PricePoint>")]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl TryFrom<Vec<PricePoint>> for PriceSeries {
    type Error = KwaveError;

    fn try_from(points: Vec<PricePoint>) -> Result<Self> {
        Self::new(points)
    }
}

impl From<PriceSeries> for Vec<PricePoint> {
    fn from(series: PriceSeries) -> Self {
        series.points
    }
}

impl PriceSeries {
    /// Validate and wrap a list of points.
    pub fn new(points: Vec<PricePoint>) -> Result<Self> {
        if let Some((i, p)) = points.iter().enumerate().find(|(_, p)| !p.is_sane()) {
            return Err(KwaveError::InvalidInput(format!(
                "price at index {i} ({}) must be finite and > 0, got {}",
                p.date, p.price
            )));
        }
        if let Some(w) = points.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(KwaveError::InvalidInput(format!(
                "dates must be strictly increasing ({} followed by {})",
                w[0].date, w[1].date
            )));
        }
        Ok(Self { points })
    }

    /// Build a series from bare prices, assigning consecutive month-start dates
    /// beginning at `start`.
    pub fn from_prices(start: NaiveDate, prices: &[f64]) -> Result<Self> {
        let points = prices
            .iter()
            .enumerate()
            .map(|(i, &price)| {
                let date = start
                    .checked_add_months(chrono::Months::new(i as u32))
                    .ok_or_else(|| {
                        KwaveError::InvalidInput(format!("date overflow at month offset {i}"))
                    })?;
                Ok(PricePoint::new(date, price))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// BLAKE3 over dates and price bits, stable across runs.
    pub fn dataset_hash(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for p in &self.points {
            hasher.update(p.date.to_string().as_bytes());
            hasher.update(&p.price.to_le_bytes());
        }
        hasher.finalize().to_hex().to_string()
    }
}
