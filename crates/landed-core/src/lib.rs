//! Landed Core: data model, report snapshot and category tables
//!
//! Shared vocabulary for the estimation crates. Everything here is plain data
//! plus a few pure helpers; no I/O and no global mutable state.

pub mod category;
pub mod data_model;
pub mod draft;
pub mod error;
pub mod snapshot;

pub use category::{normalize_category, KeywordEntry, KeywordMatch, KeywordTable};
pub use data_model::{
    ConfidenceTier, MoneyRange, PercentileTriple, RangeMethod, RangeResult, DEFAULT_CURRENCY,
    DEFAULT_UNIT, PRICE_FLOOR,
};
pub use draft::{DraftFieldValue, DraftInference, DraftOverrides, DraftSource, LabelDraft, LabelDraftOverrides};
pub use error::{LandedError, Result};
pub use snapshot::{
    BarcodeSignal, CasePackSignals, EvidenceLevel, EvidenceSignals, LabelSignals, OcrStatus,
    PriceSamples, ReportSnapshot, UploadSignals, VerificationStatus, WeightSignals,
};

/// Engine version reported alongside every evaluation
pub const LANDED_VERSION: &str = "1.0.0";
