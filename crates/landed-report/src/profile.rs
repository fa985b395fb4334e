//! Estimation profile
//!
//! Non-statistical assumptions used when a report does not carry its own:
//! the fallback FOB band, duty, freight and fee triples, order quantity and
//! the weight to cost against when nothing better is known.

use landed_core::{LandedError, MoneyRange, PercentileTriple, Result, DEFAULT_CURRENCY, DEFAULT_UNIT};
use landed_estimate::RangeEstimator;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimationProfile {
    /// Profile name, e.g. "standard@1.0"
    pub name: String,

    pub currency: String,
    pub unit: String,

    // === FOB ===
    /// Range used when no samples exist
    pub default_fob_min: f64,
    pub default_fob_max: f64,

    // === Duty, freight, fees ===
    /// Duty as a fraction of unit price, used when the report has none
    pub duty_rate: PercentileTriple,
    /// Freight cost per kilogram of unit weight
    pub shipping_per_kg: PercentileTriple,
    pub min_shipping_per_unit: f64,
    pub fees_per_unit: PercentileTriple,

    // === Order ===
    pub default_quantity: u32,
    /// Weight to cost against when none can be resolved; `None` leaves the
    /// report without a landed cost
    pub fallback_weight_grams: Option<f64>,
}

impl EstimationProfile {
    pub fn standard() -> Self {
        Self {
            name: "standard@1.0".to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            unit: DEFAULT_UNIT.to_string(),
            default_fob_min: 0.35,
            default_fob_max: 0.75,
            duty_rate: PercentileTriple::new(0.0, 0.05, 0.12),
            shipping_per_kg: PercentileTriple::new(1.20, 2.00, 3.50),
            min_shipping_per_unit: 0.02,
            fees_per_unit: PercentileTriple::new(0.02, 0.04, 0.08),
            default_quantity: 500,
            fallback_weight_grams: Some(100.0),
        }
    }

    /// Load profile from YAML. Missing keys keep their standard values.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let profile: Self = serde_yaml::from_str(yaml)?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let profile = Self::from_yaml(&content)?;
        tracing::info!(name = %profile.name, path = %path.as_ref().display(), "estimation profile loaded");
        Ok(profile)
    }

    pub fn validate(&self) -> Result<()> {
        if self.currency.trim().is_empty() {
            return Err(LandedError::Config("currency must not be empty".to_string()));
        }
        if !(self.default_fob_min.is_finite() && self.default_fob_min > 0.0) {
            return Err(LandedError::Config(format!(
                "default_fob_min must be positive, got {}",
                self.default_fob_min
            )));
        }
        if !(self.default_fob_max.is_finite() && self.default_fob_max >= self.default_fob_min) {
            return Err(LandedError::Config(format!(
                "default_fob_max {} is below default_fob_min {}",
                self.default_fob_max, self.default_fob_min
            )));
        }
        for (name, triple) in [
            ("duty_rate", &self.duty_rate),
            ("shipping_per_kg", &self.shipping_per_kg),
            ("fees_per_unit", &self.fees_per_unit),
        ] {
            let values = [triple.p10, triple.p50, triple.p90];
            if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
                return Err(LandedError::Config(format!("{} must be finite and non-negative", name)));
            }
        }
        if let Some(grams) = self.fallback_weight_grams {
            if !(grams.is_finite() && grams > 0.0) {
                return Err(LandedError::Config(format!(
                    "fallback_weight_grams must be positive, got {}",
                    grams
                )));
            }
        }
        Ok(())
    }

    pub fn default_fob_range(&self) -> MoneyRange {
        MoneyRange::new(self.default_fob_min, self.default_fob_max)
            .with_currency(self.currency.clone(), self.unit.clone())
    }

    pub fn range_estimator(&self) -> RangeEstimator {
        RangeEstimator::new(self.default_fob_range())
    }
}

impl Default for EstimationProfile {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_profile() {
        let profile = EstimationProfile::default();
        assert!(profile.validate().is_ok());
        let range = profile.default_fob_range();
        assert_eq!((range.min, range.max), (0.35, 0.75));
        assert_eq!(range.currency, "USD");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
name: eu-grocery@1.0
currency: EUR
duty_rate: { p10: 0.0, p50: 0.08, p90: 0.15 }
fallback_weight_grams: ~
"#;
        let profile = EstimationProfile::from_yaml(yaml).unwrap();
        assert_eq!(profile.name, "eu-grocery@1.0");
        assert_eq!(profile.currency, "EUR");
        assert_eq!(profile.duty_rate.p50, 0.08);
        assert_eq!(profile.default_fob_min, 0.35);
        assert_eq!(profile.fallback_weight_grams, None);
        assert_eq!(profile.range_estimator().default_range().currency, "EUR");
    }

    #[test]
    fn test_invalid_yaml_is_profile_error() {
        let err = EstimationProfile::from_yaml("default_fob_min: [oops").unwrap_err();
        assert!(err.to_string().starts_with("PROFILE/"));
    }

    #[test]
    fn test_inverted_fob_rejected() {
        let err = EstimationProfile::from_yaml("default_fob_min: 2.0\ndefault_fob_max: 1.0").unwrap_err();
        assert!(err.to_string().starts_with("CONFIG/"));
    }

    #[test]
    fn test_negative_triple_rejected() {
        let yaml = "fees_per_unit: { p10: -0.1, p50: 0.0, p90: 0.1 }";
        assert!(EstimationProfile::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = EstimationProfile::from_file("/nonexistent/profile.yaml").unwrap_err();
        assert!(err.to_string().starts_with("IO/"));
    }
}
