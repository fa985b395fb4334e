//! Range estimation from raw unit-price samples
//!
//! Picks a statistical recipe by sample count, then clamps the spread so a
//! thin or noisy sample set cannot produce an absurdly wide band.

use landed_core::{ConfidenceTier, MoneyRange, RangeMethod, RangeResult, PRICE_FLOOR};
use serde::{Deserialize, Serialize};

/// Which dataset a sample array came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleSource {
    /// Prices from our own import/transaction records
    InternalRecords,
    /// Prices quoted directly by suppliers
    SupplierQuotes,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum RecipeKind {
    /// Band between two quantiles
    Quantiles(f64, f64),
    /// Full observed span
    MinMax,
    /// `median * (1 ± width)`, fixed by construction
    MedianBand(f64),
}

#[derive(Debug, Clone, Copy)]
struct Recipe {
    min_samples: usize,
    kind: RecipeKind,
    method: RangeMethod,
    confidence: ConfidenceTier,
    clamp_ratio: f64,
}

/// Internal records, ordered by descending sample threshold
const INTERNAL_RECIPES: &[Recipe] = &[
    Recipe {
        min_samples: 30,
        kind: RecipeKind::Quantiles(0.20, 0.80),
        method: RangeMethod::P20P80,
        confidence: ConfidenceTier::High,
        clamp_ratio: 3.0,
    },
    Recipe {
        min_samples: 10,
        kind: RecipeKind::Quantiles(0.25, 0.75),
        method: RangeMethod::P25P75,
        confidence: ConfidenceTier::Medium,
        clamp_ratio: 3.0,
    },
    Recipe {
        min_samples: 3,
        kind: RecipeKind::MinMax,
        method: RangeMethod::MinMaxClamp2,
        confidence: ConfidenceTier::Low,
        clamp_ratio: 2.0,
    },
    Recipe {
        min_samples: 1,
        kind: RecipeKind::MedianBand(0.35),
        method: RangeMethod::MedianPm35,
        confidence: ConfidenceTier::Low,
        clamp_ratio: 2.0,
    },
];

/// Supplier quotes are more authoritative, so bands are tighter
const SUPPLIER_RECIPES: &[Recipe] = &[
    Recipe {
        min_samples: 10,
        kind: RecipeKind::Quantiles(0.20, 0.80),
        method: RangeMethod::QuoteP20P80,
        confidence: ConfidenceTier::High,
        clamp_ratio: 2.5,
    },
    Recipe {
        min_samples: 3,
        kind: RecipeKind::MinMax,
        method: RangeMethod::QuoteMinMaxClamp2,
        confidence: ConfidenceTier::Medium,
        clamp_ratio: 2.0,
    },
    Recipe {
        min_samples: 1,
        kind: RecipeKind::MedianBand(0.30),
        method: RangeMethod::QuoteMedianPm30,
        confidence: ConfidenceTier::Medium,
        clamp_ratio: 1.8,
    },
];

impl SampleSource {
    fn recipes(&self) -> &'static [Recipe] {
        match self {
            SampleSource::InternalRecords => INTERNAL_RECIPES,
            SampleSource::SupplierQuotes => SUPPLIER_RECIPES,
        }
    }
}

/// Where the FOB range finally came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FobSource {
    SupplierQuotes,
    InternalRecords,
    CategoryDefault,
}

/// FOB range chosen by the source-priority chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FobRangeResult {
    pub result: RangeResult,
    pub source: FobSource,
    /// Number of samples actually used, 0 for the category default
    pub similar_records_count: usize,
}

/// Drop non-finite and non-positive values, floor the rest, sort ascending
pub fn normalize_samples(samples: &[f64]) -> Vec<f64> {
    let mut valid: Vec<f64> = samples
        .iter()
        .copied()
        .filter(|v| v.is_finite() && *v > 0.0)
        .map(|v| v.max(PRICE_FLOOR))
        .collect();
    valid.sort_by(|a, b| a.total_cmp(b));
    valid
}

/// Linear-interpolated quantile of an ascending slice
pub fn quantile(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let pos = p.clamp(0.0, 1.0) * (n - 1) as f64;
            let lo = pos.floor() as usize;
            let hi = pos.ceil() as usize;
            let frac = pos - lo as f64;
            sorted[lo] + (sorted[hi] - sorted[lo]) * frac
        }
    }
}

/// Range estimator with a fallback range for empty sample sets
#[derive(Debug, Clone)]
pub struct RangeEstimator {
    default_range: MoneyRange,
}

impl Default for RangeEstimator {
    fn default() -> Self {
        Self::new(MoneyRange::new(0.35, 0.75))
    }
}

impl RangeEstimator {
    pub fn new(default_range: MoneyRange) -> Self {
        Self { default_range }
    }

    pub fn default_range(&self) -> &MoneyRange {
        &self.default_range
    }

    /// Estimate a range from raw samples of one source
    pub fn estimate(&self, samples: &[f64], source: SampleSource) -> RangeResult {
        let sorted = normalize_samples(samples);
        let n = sorted.len();

        let recipe = match source.recipes().iter().find(|r| n >= r.min_samples) {
            Some(recipe) => recipe,
            None => return self.category_default(),
        };

        let (range, clamp_ratio) = match recipe.kind {
            RecipeKind::Quantiles(lo, hi) => {
                let raw = MoneyRange::new(quantile(&sorted, lo), quantile(&sorted, hi));
                (raw.clamp_ratio(recipe.clamp_ratio), recipe.clamp_ratio)
            }
            RecipeKind::MinMax => {
                let raw = MoneyRange::new(sorted[0], sorted[n - 1]);
                (raw.clamp_ratio(recipe.clamp_ratio), recipe.clamp_ratio)
            }
            RecipeKind::MedianBand(width) => {
                let median = quantile(&sorted, 0.5);
                let low = (median * (1.0 - width)).max(PRICE_FLOOR);
                let band = MoneyRange::new(low, median * (1.0 + width));
                (band, (1.0 + width) / (1.0 - width))
            }
        };

        tracing::debug!(
            source = ?source,
            samples = n,
            method = %recipe.method,
            min = range.min,
            max = range.max,
            "range estimated"
        );

        RangeResult {
            range: range.with_currency(
                self.default_range.currency.clone(),
                self.default_range.unit.clone(),
            ),
            method: recipe.method,
            confidence_tier: recipe.confidence,
            sample_count: n,
            clamp_ratio,
        }
    }

    /// The low-confidence range used when no samples exist
    pub fn category_default(&self) -> RangeResult {
        RangeResult {
            range: self.default_range.clone(),
            method: RangeMethod::CategoryDefault,
            confidence_tier: ConfidenceTier::Low,
            sample_count: 0,
            clamp_ratio: self.default_range.ratio(),
        }
    }

    /// Supplier quotes first, then internal records, then the category default
    pub fn build_fob_range_result(
        &self,
        supplier_quotes: Option<&[f64]>,
        internal_records: Option<&[f64]>,
    ) -> FobRangeResult {
        let chain = [
            (supplier_quotes, SampleSource::SupplierQuotes, FobSource::SupplierQuotes),
            (internal_records, SampleSource::InternalRecords, FobSource::InternalRecords),
        ];

        for (samples, kind, source) in chain {
            let Some(samples) = samples else { continue };
            let result = self.estimate(samples, kind);
            if result.sample_count == 0 {
                continue;
            }
            tracing::debug!(source = ?source, count = result.sample_count, "fob source selected");
            return FobRangeResult {
                similar_records_count: result.sample_count,
                result,
                source,
            };
        }

        tracing::debug!("no usable samples, falling back to category default");
        FobRangeResult {
            result: self.category_default(),
            source: FobSource::CategoryDefault,
            similar_records_count: 0,
        }
    }
}

/// Convenience wrapper using the default fallback range
pub fn estimate_range(samples: &[f64], source: SampleSource) -> RangeResult {
    RangeEstimator::default().estimate(samples, source)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    /// Evenly spaced samples across `[lo, hi]`
    fn spread(n: usize, lo: f64, hi: f64) -> Vec<f64> {
        if n == 1 {
            return vec![(lo + hi) / 2.0];
        }
        (0..n)
            .map(|i| lo + (hi - lo) * i as f64 / (n - 1) as f64)
            .collect()
    }

    #[test]
    fn test_zero_samples_uses_category_default() {
        let result = estimate_range(&[], SampleSource::InternalRecords);
        assert_eq!(result.method, RangeMethod::CategoryDefault);
        assert_eq!(result.confidence_tier, ConfidenceTier::Low);
        assert_eq!(result.sample_count, 0);
        assert!(approx(result.range.min, 0.35));
        assert!(approx(result.range.max, 0.75));
    }

    #[test]
    fn test_single_internal_sample() {
        let result = estimate_range(&[1.00], SampleSource::InternalRecords);
        assert_eq!(result.confidence_tier, ConfidenceTier::Low);
        assert_eq!(result.method, RangeMethod::MedianPm35);
        assert!(approx(result.range.min, 0.65));
        assert!(approx(result.range.max, 1.35));
        assert!(result.within_declared_ratio());
    }

    #[test]
    fn test_single_supplier_quote() {
        let result = estimate_range(&[2.00], SampleSource::SupplierQuotes);
        assert_eq!(result.confidence_tier, ConfidenceTier::Medium);
        assert!(approx(result.range.min, 1.40));
        assert!(approx(result.range.max, 2.60));
    }

    #[test]
    fn test_two_samples_use_median_band() {
        let result = estimate_range(&[1.0, 3.0], SampleSource::InternalRecords);
        assert_eq!(result.method, RangeMethod::MedianPm35);
        assert!(approx(result.range.mid(), 2.0));
    }

    #[test]
    fn test_thirty_five_uniform_samples() {
        let samples = spread(35, 0.5, 1.5);
        let result = estimate_range(&samples, SampleSource::InternalRecords);
        assert_eq!(result.method, RangeMethod::P20P80);
        assert_eq!(result.confidence_tier, ConfidenceTier::High);
        assert!(approx(result.range.min, 0.7));
        assert!(approx(result.range.max, 1.3));
        assert!(result.range.ratio() <= 3.0);
    }

    #[test]
    fn test_minmax_is_clamped() {
        let result = estimate_range(&[0.1, 5.0, 10.0], SampleSource::InternalRecords);
        assert_eq!(result.method, RangeMethod::MinMaxClamp2);
        assert!(approx(result.range.ratio(), 2.0));
        assert!(approx(result.range.mid(), 5.05));
    }

    #[test]
    fn test_invalid_samples_are_discarded() {
        let samples = [f64::NAN, -1.0, 0.0, f64::INFINITY, 0.001, 2.0];
        let sorted = normalize_samples(&samples);
        assert_eq!(sorted, vec![0.01, 2.0]);

        let result = estimate_range(&[f64::NAN, -3.0, 0.0], SampleSource::SupplierQuotes);
        assert_eq!(result.method, RangeMethod::CategoryDefault);
    }

    #[test]
    fn test_internal_confidence_never_decreases_with_more_samples() {
        let mut previous = ConfidenceTier::Low;
        let expected = [
            (0, ConfidenceTier::Low),
            (1, ConfidenceTier::Low),
            (3, ConfidenceTier::Low),
            (10, ConfidenceTier::Medium),
            (30, ConfidenceTier::High),
        ];
        for (n, tier) in expected {
            let result = estimate_range(&spread(n, 0.8, 1.6), SampleSource::InternalRecords);
            assert_eq!(result.confidence_tier, tier, "n = {}", n);
            assert!(result.confidence_tier >= previous);
            previous = result.confidence_tier;
        }
    }

    #[test]
    fn test_declared_ratio_holds_for_skewed_sets() {
        let shapes: [&dyn Fn(usize) -> f64; 3] = [
            &|i: usize| 0.05 + i as f64 * i as f64,
            &|i: usize| if i % 2 == 0 { 0.02 } else { 40.0 },
            &|i: usize| 1.0 + (i % 7) as f64 * 0.3,
        ];
        for shape in shapes {
            for n in [1usize, 2, 3, 7, 10, 29, 30, 64] {
                let samples: Vec<f64> = (0..n).map(shape).collect();
                for source in [SampleSource::InternalRecords, SampleSource::SupplierQuotes] {
                    let result = estimate_range(&samples, source);
                    assert!(result.range.min <= result.range.max);
                    assert!(result.range.min >= PRICE_FLOOR);
                    assert!(result.within_declared_ratio(), "{:?} n={}", source, n);
                }
            }
        }
    }

    #[test]
    fn test_estimation_is_deterministic() {
        let samples = [0.9, 1.4, 0.7, 1.1, 2.3, 0.95, 1.05, 1.2, 0.88, 1.6, 1.01];
        let a = estimate_range(&samples, SampleSource::InternalRecords);
        let b = estimate_range(&samples, SampleSource::InternalRecords);
        assert_eq!(a, b);
    }

    #[test]
    fn test_fob_chain_prefers_supplier_quotes() {
        let estimator = RangeEstimator::default();
        let quotes = [1.0, 1.1, 1.2];
        let records = spread(40, 0.5, 1.5);
        let fob = estimator.build_fob_range_result(Some(&quotes[..]), Some(records.as_slice()));
        assert_eq!(fob.source, FobSource::SupplierQuotes);
        assert_eq!(fob.similar_records_count, 3);
        assert_eq!(fob.result.method, RangeMethod::QuoteMinMaxClamp2);
    }

    #[test]
    fn test_fob_chain_skips_empty_quotes() {
        let estimator = RangeEstimator::default();
        let records = spread(12, 0.5, 1.5);
        let fob = estimator.build_fob_range_result(Some(&[0.0, -1.0][..]), Some(records.as_slice()));
        assert_eq!(fob.source, FobSource::InternalRecords);
        assert_eq!(fob.similar_records_count, 12);
        assert_eq!(fob.result.confidence_tier, ConfidenceTier::Medium);
    }

    #[test]
    fn test_fob_chain_falls_back_to_default() {
        let estimator = RangeEstimator::default();
        let fob = estimator.build_fob_range_result(None, Some(&[] as &[f64]));
        assert_eq!(fob.source, FobSource::CategoryDefault);
        assert_eq!(fob.similar_records_count, 0);
        assert_eq!(fob.result.method, RangeMethod::CategoryDefault);
    }
}
