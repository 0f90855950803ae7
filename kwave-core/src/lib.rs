//! K-Wave Core: long-cycle extraction, phase classification and scoring.
//!
//! This crate contains the whole analysis pipeline:
//! - Domain types (monthly price series, phases, extraction method tags)
//! - Butterworth band-pass design and zero-phase filtering
//! - Trend extractor with a moving-average fallback
//! - Slope/curvature phase classifier, phase scorer, resonance blender
//! - CSV ingestion, month-end resampling and synthetic series
//! - TOML configuration and the serializable analysis report
//!
//! Every operation is a pure function of its inputs.

pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod filters;
pub mod report;
pub mod signal;

pub use config::{AnalysisConfig, ConfigError, ReportConfig};
pub use domain::{CycleMethod, Phase, PricePoint, PriceSeries};
pub use error::{KwaveError, Result};
pub use report::{analyze, AnalysisReport, PhasePoint};
pub use signal::{
    blend, classify, classify_at, extract_cycle, score, ExtractorConfig, Extraction,
    PhaseReading, ResonanceConfig,
};
