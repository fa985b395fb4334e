//! Evidence tiers and base tier assignment

use landed_core::{EvidenceLevel, EvidenceSignals};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Credibility of a landed cost estimate, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    #[default]
    Preliminary,
    Benchmark,
    TradeBacked,
    Verified,
}

impl QualityTier {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            QualityTier::Preliminary => "Preliminary estimate",
            QualityTier::Benchmark => "Benchmark estimate",
            QualityTier::TradeBacked => "Trade-backed estimate",
            QualityTier::Verified => "Verified quote",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityTier::Preliminary => "preliminary",
            QualityTier::Benchmark => "benchmark",
            QualityTier::TradeBacked => "trade_backed",
            QualityTier::Verified => "verified",
        }
    }

    pub fn all() -> [QualityTier; 4] {
        [
            QualityTier::Preliminary,
            QualityTier::Benchmark,
            QualityTier::TradeBacked,
            QualityTier::Verified,
        ]
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tier implied by evidence alone, with its reason.
///
/// First match wins: verified quote, import records, similar imports,
/// category benchmarks.
pub fn base_tier(evidence: &EvidenceSignals) -> (QualityTier, &'static str) {
    if evidence.verification_status.is_some_and(|s| s.is_verified()) {
        return (QualityTier::Verified, "verified supplier quote");
    }
    if evidence.evidence_level == Some(EvidenceLevel::ExactImport) || evidence.has_import_evidence {
        return (QualityTier::TradeBacked, "actual import records");
    }
    if evidence.evidence_level == Some(EvidenceLevel::SimilarImport) || evidence.has_internal_similar_records {
        return (QualityTier::Benchmark, "similar product imports");
    }
    (QualityTier::Preliminary, "category benchmarks")
}
