//! Credibility tiers for landed cost estimates
//!
//! ```
//! use landed_core::ReportSnapshot;
//! use landed_quality::{compute_report_quality, QualityTier};
//!
//! let mut report = ReportSnapshot::default();
//! report.evidence.has_import_evidence = true;
//!
//! // no weight or case pack yet
//! let quality = compute_report_quality(&report);
//! assert_eq!(quality.base_tier, QualityTier::TradeBacked);
//! assert_eq!(quality.tier, QualityTier::Preliminary);
//! ```

pub mod resolver;
pub mod rules;
pub mod tier;

pub use resolver::{compute_report_quality, ReportQuality, TierResolver};
pub use rules::{default_downgrade_rules, DowngradeRule, RuleCheck, TierInputs};
pub use tier::{base_tier, QualityTier};
