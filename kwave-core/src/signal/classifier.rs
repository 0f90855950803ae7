//! Phase classification from the slope and curvature of a cycle signal.
//!
//! | slope | curve | phase  |
//! |-------|-------|--------|
//! | > 0   | > 0   | Spring |
//! | > 0   | <= 0  | Summer |
//! | < 0   | < 0   | Autumn |
//! | anything else | | Winter |
//!
//! Winter is the catch-all, so a flat slope or a falling cycle that is
//! decelerating both read as Winter.

use serde::{Deserialize, Serialize};

use super::derivative::slope_and_curve;
use crate::domain::Phase;
use crate::error::{KwaveError, Result};

/// Phase plus the two drivers it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseReading {
    pub phase: Phase,
    pub slope: f64,
    pub curve: f64,
}

/// Apply the decision table to a (slope, curve) pair.
pub fn phase_for(slope: f64, curve: f64) -> Phase {
    if slope > 0.0 && curve > 0.0 {
        Phase::Spring
    } else if slope > 0.0 && curve <= 0.0 {
        Phase::Summer
    } else if slope < 0.0 && curve < 0.0 {
        Phase::Autumn
    } else {
        Phase::Winter
    }
}

/// Classify the most recent point of `cycle`.
pub fn classify(cycle: &[f64]) -> Result<PhaseReading> {
    match cycle.len() {
        0 => Err(KwaveError::InsufficientHistory(
            "cycle signal is empty".into(),
        )),
        n => classify_at(cycle, n - 1),
    }
}

/// Classify `cycle` at `index`.
pub fn classify_at(cycle: &[f64], index: usize) -> Result<PhaseReading> {
    if cycle.len() < 2 {
        return Err(KwaveError::InsufficientHistory(format!(
            "need at least 2 cycle points for a slope, got {}",
            cycle.len()
        )));
    }
    if index >= cycle.len() {
        return Err(KwaveError::InvalidInput(format!(
            "index {index} out of range for cycle of length {}",
            cycle.len()
        )));
    }
    let (slope, curve) = slope_and_curve(cycle);
    reading(slope[index], curve[index], index)
}

/// Classify every point of `cycle`. Points without finite drivers are `None`.
pub fn classify_all(cycle: &[f64]) -> Vec<Option<PhaseReading>> {
    if cycle.len() < 2 {
        return vec![None; cycle.len()];
    }
    let (slope, curve) = slope_and_curve(cycle);
    slope
        .iter()
        .zip(&curve)
        .enumerate()
        .map(|(i, (&s, &c))| reading(s, c, i).ok())
        .collect()
}

fn reading(slope: f64, curve: f64, index: usize) -> Result<PhaseReading> {
    if !slope.is_finite() || !curve.is_finite() {
        return Err(KwaveError::InsufficientHistory(format!(
            "no finite slope/curvature at index {index} (slope={slope}, curve={curve})"
        )));
    }
    Ok(PhaseReading {
        phase: phase_for(slope, curve),
        slope,
        curve,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_nine_sign_pairs() {
        let cases = [
            (1.0, 1.0, Phase::Spring),
            (1.0, 0.0, Phase::Summer),
            (1.0, -1.0, Phase::Summer),
            (-1.0, -1.0, Phase::Autumn),
            (-1.0, 0.0, Phase::Winter),
            (-1.0, 1.0, Phase::Winter),
            (0.0, -1.0, Phase::Winter),
            (0.0, 0.0, Phase::Winter),
            (0.0, 1.0, Phase::Winter),
        ];
        for (s, c, expected) in cases {
            assert_eq!(phase_for(s, c), expected, "slope={s} curve={c}");
        }
    }

    #[test]
    fn accelerating_rise_is_spring() {
        // Convex increasing: 0 1 4 9 16 25
        let r = classify(&[0.0, 1.0, 4.0, 9.0, 16.0, 25.0]).unwrap();
        assert_eq!(r.phase, Phase::Spring);
        assert!(r.slope > 0.0);
    }

    #[test]
    fn decelerating_rise_is_summer() {
        let r = classify(&[0.0, 5.0, 8.0, 9.0]).unwrap();
        // slope 5 4 2 1 ; curve -1 -1.5 -1.5 -1
        assert_eq!(r.phase, Phase::Summer);
    }

    #[test]
    fn accelerating_fall_is_autumn() {
        let r = classify(&[0.0, -1.0, -4.0, -9.0]).unwrap();
        assert_eq!(r.phase, Phase::Autumn);
    }

    #[test]
    fn decelerating_fall_is_winter() {
        let r = classify(&[0.0, -5.0, -8.0, -9.0]).unwrap();
        assert_eq!(r.phase, Phase::Winter);
    }

    #[test]
    fn two_points_is_enough() {
        // slope 1 1, curve 0 0 -> Summer
        let r = classify(&[0.0, 1.0]).unwrap();
        assert_eq!(r.phase, Phase::Summer);
        assert_eq!(r.curve, 0.0);
    }

    #[test]
    fn too_short_is_insufficient_history() {
        assert!(matches!(
            classify(&[]),
            Err(KwaveError::InsufficientHistory(_))
        ));
        assert!(matches!(
            classify(&[1.0]),
            Err(KwaveError::InsufficientHistory(_))
        ));
    }

    #[test]
    fn nan_tail_is_insufficient_history() {
        let err = classify(&[1.0, 2.0, 3.0, f64::NAN]).unwrap_err();
        assert!(matches!(err, KwaveError::InsufficientHistory(_)));
    }

    #[test]
    fn classify_at_reads_interior_point() {
        // Rise then fall: 0 4 6 6 4 0
        let cycle = [0.0, 4.0, 6.0, 6.0, 4.0, 0.0];
        assert_eq!(classify_at(&cycle, 1).unwrap().phase, Phase::Summer);
        assert_eq!(classify_at(&cycle, 4).unwrap().phase, Phase::Autumn);
        assert!(matches!(
            classify_at(&cycle, 6),
            Err(KwaveError::InvalidInput(_))
        ));
    }

    #[test]
    fn classify_all_matches_pointwise() {
        let cycle = [0.0, 1.0, 4.0, 9.0, 7.0, 2.0];
        let all = classify_all(&cycle);
        assert_eq!(all.len(), cycle.len());
        for (i, r) in all.iter().enumerate() {
            assert_eq!(r.unwrap(), classify_at(&cycle, i).unwrap());
        }
    }
}
