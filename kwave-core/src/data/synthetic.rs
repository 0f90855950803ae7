//! Synthetic long-cycle price series for demos and tests.
//!
//! `price[i] = base × exp(drift·i + amplitude·sin(2π(i + phase_offset)/period) + noise_i)`
//! where `noise_i` is uniform in `[-noise, noise]` from a seeded RNG.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::domain::PriceSeries;
use crate::error::{KwaveError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticParams {
    pub months: usize,
    pub start: NaiveDate,
    pub base_price: f64,
    /// Log-price drift per month.
    pub drift: f64,
    /// Log-price amplitude of the cycle.
    pub amplitude: f64,
    pub period_months: f64,
    /// Shift of the cycle in months.
    pub phase_offset: f64,
    /// Half-width of uniform log-price noise; 0 disables noise.
    pub noise: f64,
    pub seed: u64,
}

impl Default for SyntheticParams {
    fn default() -> Self {
        Self {
            months: 600,
            start: NaiveDate::from_ymd_opt(1965, 1, 1).unwrap_or_default(),
            base_price: 100.0,
            drift: 0.001,
            amplitude: 0.05,
            period_months: 600.0,
            phase_offset: 0.0,
            noise: 0.0,
            seed: 42,
        }
    }
}

impl SyntheticParams {
    /// Raw prices without dates.
    pub fn prices(&self) -> Result<Vec<f64>> {
        if !(self.base_price.is_finite() && self.base_price > 0.0) {
            return Err(KwaveError::InvalidInput(format!(
                "base_price must be > 0, got {}",
                self.base_price
            )));
        }
        if !(self.period_months.is_finite() && self.period_months > 0.0) {
            return Err(KwaveError::InvalidInput(format!(
                "period_months must be > 0, got {}",
                self.period_months
            )));
        }
        if !(self.noise.is_finite() && self.noise >= 0.0) {
            return Err(KwaveError::InvalidInput(format!(
                "noise must be >= 0, got {}",
                self.noise
            )));
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        Ok((0..self.months)
            .map(|i| {
                let t = i as f64;
                let cycle = (2.0 * PI * (t + self.phase_offset) / self.period_months).sin();
                let noise = if self.noise > 0.0 {
                    rng.gen_range(-self.noise..=self.noise)
                } else {
                    0.0
                };
                self.base_price * (self.drift * t + self.amplitude * cycle + noise).exp()
            })
            .collect())
    }

    /// Dated monthly series starting at `start`.
    pub fn generate(&self) -> Result<PriceSeries> {
        PriceSeries::from_prices(self.start, &self.prices()?)
    }
}
