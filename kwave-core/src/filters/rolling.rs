//! Trailing moving average with a shrinking warm-up window.
//!
//! Unlike the fixed-lookback SMA, the first `window - 1` points average over
//! whatever history exists (minimum one observation), so every position has a
//! value.

/// Trailing mean of `values` over `window` points, expanding at the start.
///
/// A window of 0 is treated as 1.
pub fn trailing_mean(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    let mut result = Vec::with_capacity(values.len());
    let mut sum = 0.0;

    for (i, &v) in values.iter().enumerate() {
        sum += v;
        if i >= window {
            sum -= values[i - window];
        }
        let count = (i + 1).min(window);
        result.push(sum / count as f64);
    }

    result
}
