//! Data Model: MoneyRange, RangeResult, PercentileTriple
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest price any computed range may carry.
pub const PRICE_FLOOR: f64 = 0.01;

pub const DEFAULT_CURRENCY: &str = "USD";
pub const DEFAULT_UNIT: &str = "unit";

/// A per-unit money band. `min <= max` always holds for values built through
/// [`MoneyRange::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoneyRange {
    pub min: f64,
    pub max: f64,
    pub currency: String,
    pub unit: String,
}

impl MoneyRange {
    /// Create a USD per-unit range, swapping the bounds if they arrive inverted
    pub fn new(min: f64, max: f64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            min,
            max,
            currency: DEFAULT_CURRENCY.to_string(),
            unit: DEFAULT_UNIT.to_string(),
        }
    }

    /// Set currency and unit labels
    pub fn with_currency(mut self, currency: impl Into<String>, unit: impl Into<String>) -> Self {
        self.currency = currency.into();
        self.unit = unit.into();
        self
    }

    pub fn mid(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn spread(&self) -> f64 {
        self.max - self.min
    }

    /// `max / min`, infinite when the lower bound is not positive
    pub fn ratio(&self) -> f64 {
        if self.min <= 0.0 {
            f64::INFINITY
        } else {
            self.max / self.min
        }
    }

    /// Recenter on the midpoint so that `max / min == max_ratio`.
    ///
    /// Ranges already within the ratio come back unchanged. The new lower bound
    /// is re-floored at [`PRICE_FLOOR`].
    pub fn clamp_ratio(&self, max_ratio: f64) -> MoneyRange {
        if self.min > 0.0 && self.ratio() <= max_ratio {
            return self.clone();
        }

        let mid = self.mid();
        let half = mid * (max_ratio - 1.0) / (max_ratio + 1.0);
        let min = (mid - half).max(PRICE_FLOOR);
        let max = (mid + half).max(min);

        MoneyRange {
            min,
            max,
            currency: self.currency.clone(),
            unit: self.unit.clone(),
        }
    }
}

impl fmt::Display for MoneyRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.2}-{:.2} {}/{}", self.min, self.max, self.currency, self.unit)
    }
}

/// Confidence attached to an estimated range
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    #[default]
    Low = 0,
    Medium = 1,
    High = 2,
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfidenceTier::Low => write!(f, "low"),
            ConfidenceTier::Medium => write!(f, "medium"),
            ConfidenceTier::High => write!(f, "high"),
        }
    }
}

/// The exact statistical recipe that produced a range.
///
/// The serialized names are stable; downstream reports key on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangeMethod {
    #[serde(rename = "p20p80")]
    P20P80,
    #[serde(rename = "p25p75")]
    P25P75,
    #[serde(rename = "minmax_clamp2")]
    MinMaxClamp2,
    #[serde(rename = "median_pm35")]
    MedianPm35,
    #[serde(rename = "quote_p20p80")]
    QuoteP20P80,
    #[serde(rename = "quote_minmax_clamp2")]
    QuoteMinMaxClamp2,
    #[serde(rename = "quote_median_pm30")]
    QuoteMedianPm30,
    #[serde(rename = "category_default")]
    CategoryDefault,
}

impl RangeMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeMethod::P20P80 => "p20p80",
            RangeMethod::P25P75 => "p25p75",
            RangeMethod::MinMaxClamp2 => "minmax_clamp2",
            RangeMethod::MedianPm35 => "median_pm35",
            RangeMethod::QuoteP20P80 => "quote_p20p80",
            RangeMethod::QuoteMinMaxClamp2 => "quote_minmax_clamp2",
            RangeMethod::QuoteMedianPm30 => "quote_median_pm30",
            RangeMethod::CategoryDefault => "category_default",
        }
    }
}

impl fmt::Display for RangeMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of the range estimator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeResult {
    pub range: MoneyRange,
    pub method: RangeMethod,
    pub confidence_tier: ConfidenceTier,
    pub sample_count: usize,
    /// Largest `max / min` the producing recipe allows
    pub clamp_ratio: f64,
}

impl RangeResult {
    /// True when the range honors its declared clamp ratio
    pub fn within_declared_ratio(&self) -> bool {
        self.range.ratio() <= self.clamp_ratio * (1.0 + 1e-9)
    }
}

/// p10/p50/p90 view of a per-unit amount
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PercentileTriple {
    pub p10: f64,
    pub p50: f64,
    pub p90: f64,
}

impl PercentileTriple {
    pub fn new(p10: f64, p50: f64, p90: f64) -> Self {
        Self { p10, p50, p90 }
    }

    /// Same value at every percentile
    pub fn flat(value: f64) -> Self {
        Self::new(value, value, value)
    }

    pub fn is_ordered(&self) -> bool {
        self.p10 <= self.p50 && self.p50 <= self.p90
    }

    /// Sort the three values so `p10 <= p50 <= p90`
    pub fn ordered(&self) -> Self {
        let mut values = [self.p10, self.p50, self.p90];
        values.sort_by(|a, b| a.total_cmp(b));
        Self::new(values[0], values[1], values[2])
    }

    /// Multiply every percentile by a scalar
    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.p10 * factor, self.p50 * factor, self.p90 * factor)
    }

    /// Raise every percentile to at least `floor`
    pub fn floor_at(&self, floor: f64) -> Self {
        Self::new(self.p10.max(floor), self.p50.max(floor), self.p90.max(floor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_new_orders_bounds() {
        let range = MoneyRange::new(2.0, 1.0);
        assert_eq!(range.min, 1.0);
        assert_eq!(range.max, 2.0);
        assert_eq!(range.currency, "USD");
    }

    #[test]
    fn test_clamp_ratio_unchanged_within_limit() {
        let range = MoneyRange::new(1.0, 2.5);
        assert_eq!(range.clamp_ratio(3.0), range);
    }

    #[test]
    fn test_clamp_ratio_recenters_on_midpoint() {
        let range = MoneyRange::new(0.5, 5.5);
        let clamped = range.clamp_ratio(2.0);

        assert!((clamped.mid() - range.mid()).abs() < 1e-9);
        assert!((clamped.ratio() - 2.0).abs() < 1e-9);
        assert!((clamped.min - 2.0).abs() < 1e-9);
        assert!((clamped.max - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_clamp_ratio_refloors_min() {
        let range = MoneyRange::new(0.0, 0.02);
        let clamped = range.clamp_ratio(3.0);
        assert!(clamped.min >= PRICE_FLOOR);
        assert!(clamped.max >= clamped.min);
        assert!(clamped.ratio() <= 3.0 + 1e-9);
    }

    #[test]
    fn test_confidence_ordering() {
        assert!(ConfidenceTier::Low < ConfidenceTier::Medium);
        assert!(ConfidenceTier::Medium < ConfidenceTier::High);
    }

    #[test]
    fn test_method_serialization_is_stable() {
        let json = serde_json::to_string(&RangeMethod::MinMaxClamp2).unwrap();
        assert_eq!(json, "\"minmax_clamp2\"");
        let parsed: RangeMethod = serde_json::from_str("\"category_default\"").unwrap();
        assert_eq!(parsed, RangeMethod::CategoryDefault);
        assert_eq!(RangeMethod::P20P80.to_string(), "p20p80");
    }

    #[test]
    fn test_triple_ordering() {
        let inverted = PercentileTriple::new(3.0, 1.0, 2.0);
        assert!(!inverted.is_ordered());
        let fixed = inverted.ordered();
        assert_eq!(fixed, PercentileTriple::new(1.0, 2.0, 3.0));
        assert!(fixed.is_ordered());
    }
}
