//! Cycle extraction, phase classification, scoring and blending.

pub mod classifier;
pub mod derivative;
pub mod extractor;
pub mod resonance;

pub use classifier::{classify, classify_all, classify_at, phase_for, PhaseReading};
pub use derivative::{gradient, slope_and_curve};
pub use extractor::{extract_cycle, extract_series, log_prices, ExtractorConfig, Extraction};
pub use resonance::{blend, score, ResonanceConfig, DEFAULT_WEIGHT};
