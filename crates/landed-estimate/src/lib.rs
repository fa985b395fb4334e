//! Landed Estimate: ranges, landed cost and margin scenarios
//!
//! Pure numeric core of a sourcing report. Every function here is total:
//! malformed samples are filtered, empty inputs fall back to documented
//! defaults, and nothing returns an error.
//!
//! # Example
//!
//! ```
//! use landed_estimate::{estimate_range, tighten, SampleSource};
//! use landed_core::{ConfidenceTier, RangeMethod};
//!
//! let samples: Vec<f64> = (0..35).map(|i| 0.5 + i as f64 / 34.0).collect();
//! let result = estimate_range(&samples, SampleSource::InternalRecords);
//!
//! assert_eq!(result.method, RangeMethod::P20P80);
//! assert_eq!(result.confidence_tier, ConfidenceTier::High);
//!
//! let committed = tighten(&result.range, result.sample_count);
//! assert!(committed.as_range().spread() <= result.range.spread());
//! ```

pub mod cost;
pub mod margin;
pub mod range;
pub mod tighten;

pub use cost::{
    assemble_landed_cost, shipping_from_weight, CostInputs, LandedCostBreakdown, LandedCostView,
    UnitPrice,
};
pub use margin::{
    calculate_margin_scenarios, classify_category_type, CategoryType, MarginAdvisory,
    MarginAnalysis, MarginMessage, MarginMultipliers, MarginScenario, CATEGORY_TYPES,
};
pub use range::{
    estimate_range, normalize_samples, quantile, FobRangeResult, FobSource, RangeEstimator,
    SampleSource,
};
pub use tighten::{tighten, CommittedRange};
