//! Forward-backward (zero-phase) filtering through a cascade of biquads.
//!
//! The input is padded at both ends with an odd-symmetric reflection of
//! `pad_len` samples, filtered forward from steady-state initial conditions,
//! reversed, filtered again, reversed back and trimmed to the original length.

use super::butterworth::{Biquad, SosFilter};
use super::FilterError;

/// Output peaks beyond this multiple of the input peak mean the run diverged.
const DIVERGENCE_RATIO: f64 = 1e3;

/// Direct-form II transposed biquad with initial state `zi`.
pub fn lfilter(section: &Biquad, x: &[f64], mut zi: [f64; 2]) -> Vec<f64> {
    let a0 = section.a[0];
    let b = section.b.map(|c| c / a0);
    let a = section.a.map(|c| c / a0);

    x.iter()
        .map(|&xv| {
            let yv = b[0] * xv + zi[0];
            zi[0] = b[1] * xv + zi[1] - a[1] * yv;
            zi[1] = b[2] * xv - a[2] * yv;
            yv
        })
        .collect()
}

/// Run `x` through every section in turn, section `i` starting from `zi[i]`.
pub fn sosfilt(filter: &SosFilter, x: &[f64], zi: &[[f64; 2]]) -> Vec<f64> {
    filter
        .sections
        .iter()
        .zip(zi)
        .fold(x.to_vec(), |y, (section, &z)| lfilter(section, &y, z))
}

/// Initial state that makes one section's output start in steady state for
/// a unit step input.
pub fn steady_state(section: &Biquad) -> Result<[f64; 2], FilterError> {
    let a0 = section.a[0];
    let b = section.b.map(|c| c / a0);
    let a = section.a.map(|c| c / a0);

    // (I - Cᵀ) zi = b[1..] - a[1..] * b[0], C the companion matrix of `a`.
    let lhs = vec![vec![1.0 + a[1], -1.0], vec![a[2], 1.0]];
    let rhs = vec![b[1] - a[1] * b[0], b[2] - a[2] * b[0]];
    let zi = solve(lhs, rhs)?;
    Ok([zi[0], zi[1]])
}

/// Steady-state initial conditions for the whole cascade: each section's
/// state is scaled by the DC gain of the sections before it. Scale by the
/// first sample before use.
pub fn cascade_steady_state(filter: &SosFilter) -> Result<Vec<[f64; 2]>, FilterError> {
    let mut scale = 1.0;
    filter
        .sections
        .iter()
        .map(|section| {
            let zi = steady_state(section)?.map(|z| z * scale);
            scale *= section.dc_gain();
            Ok(zi)
        })
        .collect()
}

/// Zero-phase filtering. Requires `x.len() > filter.pad_len()`.
pub fn filtfilt(filter: &SosFilter, x: &[f64]) -> Result<Vec<f64>, FilterError> {
    let pad = filter.pad_len();
    let n = x.len();
    if n <= pad {
        return Err(FilterError::SeriesTooShort {
            len: n,
            required: pad + 1,
        });
    }

    let ext = odd_extend(x, pad);
    let zi = cascade_steady_state(filter)?;
    let scaled = |v: f64| -> Vec<[f64; 2]> { zi.iter().map(|z| z.map(|c| c * v)).collect() };

    let mut y = sosfilt(filter, &ext, &scaled(ext[0]));
    y.reverse();
    let mut y = sosfilt(filter, &y, &scaled(y[0]));
    y.reverse();

    let out = y[pad..pad + n].to_vec();
    if out.iter().any(|v| !v.is_finite()) {
        return Err(FilterError::NonFinite("filter output"));
    }
    let peak_in = peak(&ext);
    let peak_out = peak(&out);
    if peak_out > DIVERGENCE_RATIO * peak_in {
        return Err(FilterError::Diverged { peak_in, peak_out });
    }
    Ok(out)
}

fn peak(values: &[f64]) -> f64 {
    values.iter().fold(0.0_f64, |m, v| m.max(v.abs()))
}

/// Reflect `pad` samples about each endpoint: `2·x[0] − x[pad..1]` on the
/// left, `2·x[n−1] − x[n−2..n−pad−1]` on the right.
fn odd_extend(x: &[f64], pad: usize) -> Vec<f64> {
    let n = x.len();
    let first = x[0];
    let last = x[n - 1];
    let mut ext = Vec::with_capacity(n + 2 * pad);
    ext.extend((1..=pad).rev().map(|i| 2.0 * first - x[i]));
    ext.extend_from_slice(x);
    ext.extend((0..pad).map(|i| 2.0 * last - x[n - 2 - i]));
    ext
}

/// Gaussian elimination with partial pivoting.
fn solve(mut m: Vec<Vec<f64>>, mut v: Vec<f64>) -> Result<Vec<f64>, FilterError> {
    let n = v.len();
    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| m[i][col].abs().total_cmp(&m[j][col].abs()))
            .unwrap_or(col);
        if m[pivot][col].abs() < f64::EPSILON {
            return Err(FilterError::Singular);
        }
        m.swap(col, pivot);
        v.swap(col, pivot);
        for row in col + 1..n {
            let f = m[row][col] / m[col][col];
            if f == 0.0 {
                continue;
            }
            for k in col..n {
                m[row][k] -= f * m[col][k];
            }
            v[row] -= f * v[col];
        }
    }

    let mut out = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| m[row][k] * out[k]).sum();
        out[row] = (v[row] - tail) / m[row][row];
    }
    Ok(out)
}
