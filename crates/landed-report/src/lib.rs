//! Landed Report: one call from snapshot to tiered landed cost
//!
//! # Example
//!
//! ```
//! use landed_core::ReportSnapshot;
//! use landed_report::{evaluate_report, EstimationProfile};
//!
//! let report: ReportSnapshot = serde_json::from_str(r#"{
//!     "category": "Chocolate Candy",
//!     "samples": { "internalRecords": [0.80, 0.90, 1.00, 1.10] },
//!     "weight": { "userInputGrams": 40 },
//!     "casePack": { "userInput": 240 }
//! }"#).unwrap();
//!
//! let evaluation = evaluate_report(&report, &EstimationProfile::default());
//! assert!(evaluation.landed_cost.is_some());
//! assert!(evaluation.missing_critical_fields.is_empty());
//! ```

pub mod pipeline;
pub mod profile;

pub use pipeline::{evaluate_report, fingerprint, ReportEvaluation, ReportEvaluator};
pub use profile::EstimationProfile;
