//! End-to-end analysis of one price series.
//!
//! series → cycle (band-pass or fallback) → latest phase → score → optional
//! blend, plus the recent phase history and a textual recommendation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::domain::{CycleMethod, Phase, PriceSeries};
use crate::error::{KwaveError, Result};
use crate::signal::{blend, classify, classify_all, extract_series};

/// Phase of a single historical point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhasePoint {
    pub date: NaiveDate,
    pub phase: Phase,
}

/// Everything the presentation layer needs for one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub source: String,
    pub months: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub dataset_hash: String,
    pub method: CycleMethod,
    pub phase: Phase,
    pub slope: f64,
    pub curve: f64,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blended_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    pub recommendation: String,
    pub history: Vec<PhasePoint>,
    /// Full cycle signal, aligned with the input.
    #[serde(skip)]
    pub cycle: Vec<f64>,
}

impl AnalysisReport {
    /// Multi-line human summary.
    pub fn summary(&self) -> String {
        let mut out = format!(
            "{source}: {months} months ({first} to {last})\n  method: {method}\n  phase:  {phase} (slope {slope:+.6e}, curve {curve:+.6e})\n  score:  {score:+.2}",
            source = self.source,
            months = self.months,
            first = self.first_date,
            last = self.last_date,
            method = self.method,
            phase = self.phase,
            slope = self.slope,
            curve = self.curve,
            score = self.score,
        );
        if let (Some(b), Some(w)) = (self.blended_score, self.weight) {
            out.push_str(&format!("\n  blended: {b:+.4} (weight {w:.2})"));
        }
        out.push_str(&format!("\n  {}", self.recommendation));
        out
    }
}

/// Run the full pipeline on `series`.
///
/// `base_score` is an external resonance score; when present it is blended
/// with the phase score using `config.resonance.weight`.
pub fn analyze(
    source: &str,
    series: &PriceSeries,
    config: &AnalysisConfig,
    base_score: Option<f64>,
) -> Result<AnalysisReport> {
    let min = config.report.min_months.max(2);
    if series.len() < min {
        return Err(KwaveError::InsufficientHistory(format!(
            "{source}: {} monthly points, need at least {min}",
            series.len()
        )));
    }
    let (Some(first_date), Some(last_date)) = (series.first_date(), series.last_date()) else {
        return Err(KwaveError::InvalidInput(format!("{source}: empty series")));
    };

    let extraction = extract_series(series, &config.extractor)?;
    let reading = classify(&extraction.cycle)?;
    let score = reading.phase.score();

    let blended_score = base_score
        .map(|b| blend(b, score, config.resonance.weight))
        .transpose()?;
    let weight = blended_score.map(|_| config.resonance.weight);

    let dates = series.dates();
    let keep = config.report.history_months.min(dates.len());
    let history = classify_all(&extraction.cycle)
        .into_iter()
        .zip(dates)
        .skip(series.len() - keep)
        .filter_map(|(r, date)| r.map(|r| PhasePoint { date, phase: r.phase }))
        .collect();

    let recommendation = format!("{} {}", reading.phase.headline(), reading.phase.guidance());

    Ok(AnalysisReport {
        source: source.to_string(),
        months: series.len(),
        first_date,
        last_date,
        dataset_hash: series.dataset_hash(),
        method: extraction.method,
        phase: reading.phase,
        slope: reading.slope,
        curve: reading.curve,
        score,
        blended_score,
        weight,
        recommendation,
        history,
        cycle: extraction.cycle,
    })
}
