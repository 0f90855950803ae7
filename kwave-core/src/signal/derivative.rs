//! Discrete derivatives with unit spacing.

/// First derivative: centred differences inside, one-sided at both ends.
///
/// Returns all-NaN for fewer than two points. NaN inputs propagate to the
/// neighbouring outputs.
pub fn gradient(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    if n < 2 {
        return vec![f64::NAN; n];
    }

    let mut out = Vec::with_capacity(n);
    out.push(values[1] - values[0]);
    for i in 1..n - 1 {
        out.push((values[i + 1] - values[i - 1]) / 2.0);
    }
    out.push(values[n - 1] - values[n - 2]);
    out
}

/// Slope and curvature series of `cycle`.
pub fn slope_and_curve(cycle: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let slope = gradient(cycle);
    let curve = gradient(&slope);
    (slope, curve)
}
