//! Numeric filters used by the trend extractor.
//!
//! - `butterworth` designs the band-pass as second-order sections
//! - `zero_phase` runs the cascade forward and backward
//! - `rolling` provides the moving-average fallback
//!
//! Every band-pass failure is reported as a `FilterError`. Callers outside
//! this crate never see one: the extractor turns it into a fallback.

mod complex;

pub mod butterworth;
pub mod rolling;
pub mod zero_phase;

pub use butterworth::{bandpass, Biquad, SosFilter, MAX_ORDER};
pub use rolling::trailing_mean;
pub use zero_phase::filtfilt;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    #[error("filter order must be in 1..={max}, got {0}", max = MAX_ORDER)]
    InvalidOrder(usize),

    #[error("invalid pass band [{low}, {high}] cycles/sample (need 0 < low < high < 0.5)")]
    InvalidBand { low: f64, high: f64 },

    #[error("series of {len} points is too short; band-pass needs at least {required}")]
    SeriesTooShort { len: usize, required: usize },

    #[error("non-finite {0}")]
    NonFinite(&'static str),

    #[error("filter poles outside the unit circle")]
    Unstable,

    #[error("filter output diverged (peak {peak_out:e} against input peak {peak_in:e})")]
    Diverged { peak_in: f64, peak_out: f64 },

    #[error("singular system while computing initial conditions")]
    Singular,
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
