//! Digital Butterworth band-pass design.
//!
//! Analog low-pass prototype → low-pass to band-pass transform → bilinear
//! transform, with the band edges pre-warped so the -3 dB points land exactly
//! on the requested digital frequencies. Frequencies are in cycles per sample.
//!
//! The filter is kept as a cascade of second-order sections. Multiplying the
//! sections out into one direct-form polynomial is badly conditioned at
//! long-cycle cutoffs and turns unstable from order 4 on.

use super::complex::Complex;
use super::FilterError;
use std::f64::consts::PI;

/// Largest prototype order `bandpass` accepts.
pub const MAX_ORDER: usize = 16;

/// `(b0 + b1·z⁻¹ + b2·z⁻²) / (1 + a1·z⁻¹ + a2·z⁻²)`, with `a[0] == 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Biquad {
    pub b: [f64; 3],
    pub a: [f64; 3],
}

impl Biquad {
    /// Both poles of the realized denominator lie strictly inside the unit
    /// circle (the stability triangle).
    pub fn is_stable(&self) -> bool {
        let (a1, a2) = (self.a[1] / self.a[0], self.a[2] / self.a[0]);
        a2.abs() < 1.0 && a1.abs() < 1.0 + a2
    }

    /// Gain at DC, `Σb / Σa`.
    pub fn dc_gain(&self) -> f64 {
        self.b.iter().sum::<f64>() / self.a.iter().sum::<f64>()
    }

    #[cfg(test)]
    fn response(&self, freq: f64) -> Complex {
        let eval = |coeffs: &[f64; 3]| {
            coeffs
                .iter()
                .enumerate()
                .fold(Complex::ZERO, |acc, (k, &c)| {
                    acc + Complex::cis(-2.0 * PI * freq * k as f64).scale(c)
                })
        };
        eval(&self.b) / eval(&self.a)
    }
}

/// Cascade of second-order sections, applied in order.
#[derive(Debug, Clone, PartialEq)]
pub struct SosFilter {
    pub sections: Vec<Biquad>,
}

impl SosFilter {
    /// Coefficient count of the equivalent single transfer function.
    pub fn taps(&self) -> usize {
        2 * self.sections.len() + 1
    }

    /// Edge padding used by forward-backward filtering.
    pub fn pad_len(&self) -> usize {
        3 * self.taps()
    }

    /// Magnitude response at `freq` cycles per sample.
    #[cfg(test)]
    pub(crate) fn gain_at(&self, freq: f64) -> f64 {
        self.sections
            .iter()
            .fold(Complex::ONE, |acc, s| acc * s.response(freq))
            .norm()
    }
}

/// Design an `order`-th order Butterworth band-pass between `low` and `high`
/// (cycles per sample, `0 < low < high < 0.5`).
///
/// The result has `order` sections, each with one zero at DC and one at
/// Nyquist. The overall gain sits in the first section.
pub fn bandpass(order: usize, low: f64, high: f64) -> Result<SosFilter, FilterError> {
    if order == 0 || order > MAX_ORDER {
        return Err(FilterError::InvalidOrder(order));
    }
    if !(low.is_finite() && high.is_finite() && 0.0 < low && low < high && high < 0.5) {
        return Err(FilterError::InvalidBand { low, high });
    }

    // Sampling rate of 2 puts Nyquist at 1; edges are normalised to Nyquist.
    let fs = 2.0;
    let warp = |f: f64| 2.0 * fs * (PI * (2.0 * f) / fs).tan();
    let wl = warp(low);
    let wh = warp(high);
    let bw = wh - wl;
    let w0 = (wl * wh).sqrt();

    let fs2 = Complex::real(2.0 * fs);
    let bilinear = |s: Complex| (fs2 + s) / (fs2 - s);

    // Prototype poles sit on the left half of the unit circle in conjugate
    // pairs, plus -1 for odd orders. Each upper-half pole and its mirror yield
    // two band-pass conjugate pairs; the real pole yields one pair.
    let n = order as f64;
    let mut analog_poles = Vec::with_capacity(2 * order);
    let mut pairs = Vec::with_capacity(order);
    for k in 0..order {
        let m = 2.0 * k as f64 - n + 1.0;
        if m > 0.0 {
            continue;
        }
        let p = (-Complex::cis(PI * m / (2.0 * n))).scale(bw / 2.0);
        let disc = (p * p - Complex::real(w0 * w0)).sqrt();
        let (q1, q2) = (p + disc, p - disc);
        if m < 0.0 {
            pairs.push((q1, q1.conj()));
            pairs.push((q2, q2.conj()));
            analog_poles.extend([q1, q1.conj(), q2, q2.conj()]);
        } else {
            pairs.push((q1, q2));
            analog_poles.extend([q1, q2]);
        }
    }

    // `order` analog zeros at s = 0; the rest map to z = -1.
    let num = (0..order).fold(Complex::ONE, |acc, _| acc * fs2);
    let den = analog_poles.iter().fold(Complex::ONE, |acc, &p| acc * (fs2 - p));
    let gain = bw.powi(order as i32) * (num / den).re;

    let mut sections = Vec::with_capacity(order);
    for (p1, p2) in pairs {
        let (z1, z2) = (bilinear(p1), bilinear(p2));
        if !(z1.is_finite() && z2.is_finite() && z1.norm() < 1.0 && z2.norm() < 1.0) {
            return Err(FilterError::Unstable);
        }
        sections.push(Biquad {
            b: [1.0, 0.0, -1.0],
            a: [1.0, -(z1 + z2).re, (z1 * z2).re],
        });
    }
    if let Some(first) = sections.first_mut() {
        first.b = first.b.map(|c| c * gain);
    }

    let finite = sections
        .iter()
        .all(|s| s.b.iter().chain(s.a.iter()).all(|c| c.is_finite()));
    if !finite || gain == 0.0 {
        return Err(FilterError::NonFinite("filter coefficients"));
    }
    if !sections.iter().all(Biquad::is_stable) {
        return Err(FilterError::Unstable);
    }

    Ok(SosFilter { sections })
}
