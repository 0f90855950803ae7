//! Market phase labels and extraction-method tags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the long cycle currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Rising and accelerating.
    Spring,
    /// Rising and decelerating.
    Summer,
    /// Falling and accelerating.
    Autumn,
    /// Everything else: falling and decelerating, or flat.
    Winter,
}

impl Phase {
    pub const ALL: [Phase; 4] = [Phase::Spring, Phase::Summer, Phase::Autumn, Phase::Winter];

    /// Fixed score used for blending with an external resonance score.
    pub fn score(self) -> f64 {
        match self {
            Phase::Spring => 1.0,
            Phase::Summer => 0.5,
            Phase::Autumn => -0.5,
            Phase::Winter => -1.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Spring => "Spring",
            Phase::Summer => "Summer",
            Phase::Autumn => "Autumn",
            Phase::Winter => "Winter",
        }
    }

    /// Parse a label, case-insensitively.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(label.trim()))
    }

    /// One-line headline for the dashboard.
    pub fn headline(self) -> &'static str {
        match self {
            Phase::Spring => "K-wave Spring: long-term up cycle is beginning",
            Phase::Summer => "K-wave Summer: long-term up cycle is maturing",
            Phase::Autumn => "K-wave Autumn: long-term down cycle is under way",
            Phase::Winter => "K-wave Winter: long cycle is bottoming or flat",
        }
    }

    pub fn guidance(self) -> &'static str {
        match self {
            Phase::Spring => "Favour accumulation; long-horizon exposure is rewarded.",
            Phase::Summer => "Hold exposure but tighten risk; momentum is fading.",
            Phase::Autumn => "Reduce exposure; the long cycle is falling faster.",
            Phase::Winter => "Stay defensive and wait for the cycle to turn up.",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Map a phase label to its score. Unknown labels score 0.0.
pub fn score_label(label: &str) -> f64 {
    Phase::from_label(label).map_or(0.0, Phase::score)
}

/// Which code path produced a cycle signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CycleMethod {
    #[serde(rename = "band-pass")]
    BandPass,
    #[serde(rename = "fallback")]
    Fallback,
}

impl CycleMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            CycleMethod::BandPass => "band-pass",
            CycleMethod::Fallback => "fallback",
        }
    }
}

impl fmt::Display for CycleMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_table_is_exact() {
        assert_eq!(Phase::Spring.score(), 1.0);
        assert_eq!(Phase::Summer.score(), 0.5);
        assert_eq!(Phase::Autumn.score(), -0.5);
        assert_eq!(Phase::Winter.score(), -1.0);
    }

    #[test]
    fn scores_stay_in_unit_range() {
        for p in Phase::ALL {
            assert!((-1.0..=1.0).contains(&p.score()));
        }
    }

    #[test]
    fn unknown_label_scores_zero() {
        assert_eq!(score_label("Monsoon"), 0.0);
        assert_eq!(score_label(""), 0.0);
        assert_eq!(score_label("summer"), 0.5);
    }

    #[test]
    fn label_roundtrip() {
        for p in Phase::ALL {
            assert_eq!(Phase::from_label(p.label()), Some(p));
            assert_eq!(p.to_string(), p.label());
        }
    }

    #[test]
    fn method_serializes_as_tag() {
        assert_eq!(
            serde_json::to_string(&CycleMethod::BandPass).unwrap(),
            "\"band-pass\""
        );
        assert_eq!(
            serde_json::to_string(&CycleMethod::Fallback).unwrap(),
            "\"fallback\""
        );
        assert_eq!(CycleMethod::Fallback.to_string(), "fallback");
    }
}
