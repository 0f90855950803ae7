//! Property tests for extractor and classifier invariants.
//!
//! Uses proptest to verify:
//! 1. Alignment: the cycle always has the input's length, for every filter order
//! 2. Short series: every length at or below the settling length falls back
//! 3. Totality: every (slope, curve) pair maps to exactly one phase
//! 4. Blending: zero and full weight select one side exactly

use kwave_core::filters::MAX_ORDER;
use kwave_core::signal::{blend, extract_cycle, phase_for, ExtractorConfig};
use kwave_core::{CycleMethod, Phase};
use proptest::prelude::*;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_price() -> impl Strategy<Value = f64> {
    (1.0..10_000.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_prices(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(arb_price(), 2..max_len)
}

fn arb_sign() -> impl Strategy<Value = f64> {
    prop_oneof![
        (1e-12..1.0_f64).prop_map(|v| -v),
        Just(0.0),
        1e-12..1.0_f64,
    ]
}

// ── 1. Alignment ─────────────────────────────────────────────────────

proptest! {
    #[test]
    fn cycle_length_matches_input(prices in arb_prices(400)) {
        let ex = extract_cycle(&prices, &ExtractorConfig::default()).unwrap();
        prop_assert_eq!(ex.cycle.len(), prices.len());
        prop_assert!(ex.cycle.iter().all(|v| v.is_finite()));
    }
}

proptest! {
    #[test]
    fn any_supported_order_gives_finite_aligned_cycle(
        prices in arb_prices(600),
        order in 1..=MAX_ORDER,
    ) {
        let config = ExtractorConfig { order, ..Default::default() };
        let ex = extract_cycle(&prices, &config).unwrap();
        prop_assert_eq!(ex.cycle.len(), prices.len());
        prop_assert!(ex.cycle.iter().all(|v| v.is_finite()));
        // Odd-extended log prices stay under 2·ln(10_000) ≈ 18.4; a band-pass
        // result past a thousandfold of that is divergence and must fall back.
        prop_assert!(ex.cycle.iter().all(|v| v.abs() < 2e4));
    }
}

// ── 2. Short series ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn short_series_always_fall_back(prices in arb_prices(241)) {
        let ex = extract_cycle(&prices, &ExtractorConfig::default()).unwrap();
        prop_assert_eq!(ex.method, CycleMethod::Fallback);
    }

    #[test]
    fn fallback_first_point_is_zero(prices in arb_prices(50)) {
        // The expanding mean of one observation is the observation itself.
        let ex = extract_cycle(&prices, &ExtractorConfig::default()).unwrap();
        prop_assert!(ex.cycle[0].abs() < 1e-12);
    }
}

// ── 3. Totality ──────────────────────────────────────────────────────

proptest! {
    #[test]
    fn classifier_is_total(slope in arb_sign(), curve in arb_sign()) {
        let phase = phase_for(slope, curve);
        let expected = if slope > 0.0 && curve > 0.0 {
            Phase::Spring
        } else if slope > 0.0 {
            Phase::Summer
        } else if slope < 0.0 && curve < 0.0 {
            Phase::Autumn
        } else {
            Phase::Winter
        };
        prop_assert_eq!(phase, expected);
    }
}

// ── 4. Blending ──────────────────────────────────────────────────────

proptest! {
    #[test]
    fn blend_weight_extremes(base in -10.0..10.0_f64, phase in -1.0..1.0_f64) {
        prop_assert_eq!(blend(base, phase, 0.0).unwrap(), base);
        prop_assert_eq!(blend(base, phase, 1.0).unwrap(), phase);
    }

    #[test]
    fn blend_stays_between_inputs(
        base in -1.0..1.0_f64,
        phase in -1.0..1.0_f64,
        weight in 0.0..=1.0_f64,
    ) {
        let b = blend(base, phase, weight).unwrap();
        let lo = base.min(phase) - 1e-12;
        let hi = base.max(phase) + 1e-12;
        prop_assert!(b >= lo && b <= hi);
    }
}
