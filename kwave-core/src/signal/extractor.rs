//! Trend extractor: log-price → long-cycle component.
//!
//! Tries a zero-phase Butterworth band-pass over the configured period band.
//! Any band-pass failure, including a series shorter than the filter's
//! settling length, switches to the moving-average path:
//! `cycle = log_price − trailing_mean(log_price)`.
//!
//! Only invalid input is an error. Falling back is a normal outcome and is
//! reported through `Extraction::method`.

use serde::{Deserialize, Serialize};

use crate::domain::{CycleMethod, PriceSeries};
use crate::error::{KwaveError, Result};
use crate::filters::{bandpass, filtfilt, trailing_mean, FilterError, SosFilter, MAX_ORDER};

const MONTHS_PER_YEAR: f64 = 12.0;

/// Band-pass and fallback parameters.
///
/// `low_years` is the longest period kept (the low-frequency edge) and
/// `high_years` the shortest (the high-frequency edge).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    pub low_years: f64,
    pub high_years: f64,
    pub order: usize,
    pub fallback_window_years: f64,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            low_years: 60.0,
            high_years: 40.0,
            order: 2,
            fallback_window_years: 50.0,
        }
    }
}

impl ExtractorConfig {
    /// Low edge of the pass band in cycles per month.
    pub fn low_frequency(&self) -> f64 {
        1.0 / (self.low_years * MONTHS_PER_YEAR)
    }

    /// High edge of the pass band in cycles per month.
    pub fn high_frequency(&self) -> f64 {
        1.0 / (self.high_years * MONTHS_PER_YEAR)
    }

    /// Fallback moving-average window in months (at least 1).
    pub fn fallback_window(&self) -> usize {
        let months = (self.fallback_window_years * MONTHS_PER_YEAR).round();
        if months.is_finite() && months >= 1.0 {
            months as usize
        } else {
            1
        }
    }

    /// Design the band-pass filter for these parameters.
    pub fn design(&self) -> std::result::Result<SosFilter, FilterError> {
        bandpass(self.order, self.low_frequency(), self.high_frequency())
    }

    /// Minimum series length (exclusive) the band-pass path accepts.
    ///
    /// The larger of the forward-backward padding (`3 × taps`) and half of the
    /// shortest in-band period. The padding term is what the filter itself
    /// needs; the half-period term is a policy floor on top of it, so a
    /// series must hold at least half of one in-band cycle before the
    /// band-pass result is trusted.
    pub fn settling_length(&self, filter: &SosFilter) -> usize {
        let half_period = (self.high_years * MONTHS_PER_YEAR / 2.0).ceil();
        let half_period = if half_period.is_finite() && half_period > 0.0 {
            half_period as usize
        } else {
            0
        };
        filter.pad_len().max(half_period)
    }

    /// Reject values that would make every extraction meaningless.
    pub fn validate(&self) -> Result<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.low_years) || !positive(self.high_years) {
            return Err(KwaveError::InvalidInput(format!(
                "band periods must be positive, got low_years={} high_years={}",
                self.low_years, self.high_years
            )));
        }
        if self.order == 0 || self.order > MAX_ORDER {
            return Err(KwaveError::InvalidInput(format!(
                "order must be in 1..={MAX_ORDER}, got {}",
                self.order
            )));
        }
        if !positive(self.fallback_window_years) {
            return Err(KwaveError::InvalidInput(format!(
                "fallback_window_years must be positive, got {}",
                self.fallback_window_years
            )));
        }
        Ok(())
    }
}

/// Extracted long-cycle signal and the path that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    /// Same length and alignment as the input.
    pub cycle: Vec<f64>,
    pub method: CycleMethod,
}

/// Natural log of every price. Fails on fewer than two points or any
/// non-positive / non-finite price.
pub fn log_prices(prices: &[f64]) -> Result<Vec<f64>> {
    if prices.len() < 2 {
        return Err(KwaveError::InvalidInput(format!(
            "need at least 2 prices, got {}",
            prices.len()
        )));
    }
    prices
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            if p.is_finite() && p > 0.0 {
                Ok(p.ln())
            } else {
                Err(KwaveError::InvalidInput(format!(
                    "price at index {i} must be finite and > 0, got {p}"
                )))
            }
        })
        .collect()
}

/// Extract the long-cycle component of `prices`.
pub fn extract_cycle(prices: &[f64], config: &ExtractorConfig) -> Result<Extraction> {
    let log_price = log_prices(prices)?;

    match band_pass(&log_price, config) {
        Ok(cycle) => Ok(Extraction {
            cycle,
            method: CycleMethod::BandPass,
        }),
        Err(reason) => {
            log::debug!("band-pass unavailable ({reason}); using moving-average fallback");
            Ok(Extraction {
                cycle: fallback(&log_price, config.fallback_window()),
                method: CycleMethod::Fallback,
            })
        }
    }
}

/// Convenience wrapper over a validated series.
pub fn extract_series(series: &PriceSeries, config: &ExtractorConfig) -> Result<Extraction> {
    extract_cycle(&series.prices(), config)
}

fn band_pass(
    log_price: &[f64],
    config: &ExtractorConfig,
) -> std::result::Result<Vec<f64>, FilterError> {
    let filter = config.design()?;
    let required = config.settling_length(&filter);
    if log_price.len() <= required {
        return Err(FilterError::SeriesTooShort {
            len: log_price.len(),
            required: required + 1,
        });
    }
    filtfilt(&filter, log_price)
}

fn fallback(log_price: &[f64], window: usize) -> Vec<f64> {
    let ma = trailing_mean(log_price, window);
    log_price.iter().zip(&ma).map(|(x, m)| x - m).collect()
}
