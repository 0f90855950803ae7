//! Blending the phase score into an external resonance score.

use serde::{Deserialize, Serialize};

use crate::domain::Phase;
use crate::error::{KwaveError, Result};

/// Weight given to the phase score when none is configured.
pub const DEFAULT_WEIGHT: f64 = 0.25;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResonanceConfig {
    /// Share of the blended score taken from the phase score, in [0, 1].
    pub weight: f64,
}

impl Default for ResonanceConfig {
    fn default() -> Self {
        Self {
            weight: DEFAULT_WEIGHT,
        }
    }
}

/// Score of a phase; see `Phase::score`.
pub fn score(phase: Phase) -> f64 {
    phase.score()
}

/// `base × (1 − weight) + phase_score × weight`.
pub fn blend(base_score: f64, phase_score: f64, weight: f64) -> Result<f64> {
    check_weight(weight)?;
    Ok(base_score * (1.0 - weight) + phase_score * weight)
}

pub fn check_weight(weight: f64) -> Result<()> {
    if (0.0..=1.0).contains(&weight) {
        Ok(())
    } else {
        Err(KwaveError::InvalidInput(format!(
            "blend weight must be in [0, 1], got {weight}"
        )))
    }
}
