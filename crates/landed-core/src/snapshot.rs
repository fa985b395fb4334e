//! Report snapshot: the full set of raw signals for one report.
//!
//! Every computation in the chain takes a snapshot by reference and derives
//! fresh outputs from it. Nothing here is ever patched in place by the core.

use crate::data_model::PercentileTriple;
use crate::draft::DraftOverrides;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportSnapshot {
    pub category: Option<String>,
    pub generic_category: Option<String>,
    /// Share of food content by weight, 0-100
    pub food_percentage: Option<f64>,
    /// Planned order quantity in units
    pub quantity: Option<u32>,
    pub uploads: UploadSignals,
    pub barcode: BarcodeSignal,
    pub label: LabelSignals,
    pub weight: WeightSignals,
    pub case_pack: CasePackSignals,
    pub evidence: EvidenceSignals,
    pub samples: PriceSamples,
    /// Duty rate as a fraction of unit price
    pub duty_rate: Option<PercentileTriple>,
    pub draft_overrides: Option<DraftOverrides>,
}

/// Which images the user provided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UploadSignals {
    pub product_photo: bool,
    pub barcode_photo: bool,
    pub label_photo: bool,
}

impl UploadSignals {
    /// Any image a barcode could have been decoded from
    pub fn barcode_source(&self) -> bool {
        self.product_photo || self.barcode_photo
    }

    /// Any image a label could have been read from
    pub fn label_source(&self) -> bool {
        self.product_photo || self.label_photo
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BarcodeSignal {
    /// Decoded GTIN/EAN, if any
    pub decoded: Option<String>,
}

impl BarcodeSignal {
    pub fn value(&self) -> Option<&str> {
        self.decoded.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }
}

/// Outcome of the label OCR pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OcrStatus {
    #[default]
    NotAttempted,
    Success,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelSignals {
    pub ocr_status: OcrStatus,
    pub ocr_failure_reason: Option<String>,
    pub ingredients: Option<String>,
    pub material: Option<String>,
    pub net_weight_text: Option<String>,
    /// Country of origin printed on the label
    pub origin: Option<String>,
    /// Country of origin guessed by vision when not printed
    pub inferred_origin: Option<String>,
    /// The user finished the manual label form
    pub manual_entry_complete: bool,
}

impl LabelSignals {
    /// Any label text came back from extraction
    pub fn has_extracted_text(&self) -> bool {
        [&self.ingredients, &self.material, &self.net_weight_text, &self.origin]
            .iter()
            .any(|field| field.as_deref().is_some_and(|v| !v.trim().is_empty()))
    }

    pub fn ocr_failed(&self) -> bool {
        self.ocr_status == OcrStatus::Failed
    }
}

/// Unit weight signals, all in grams
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeightSignals {
    /// Value parsed by OCR; may be stale when OCR failed
    pub ocr_grams: Option<f64>,
    /// Value guessed by vision or analysis
    pub inferred_grams: Option<f64>,
    pub manual_grams: Option<f64>,
    pub user_input_grams: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CasePackSignals {
    pub user_input: Option<u32>,
    pub manual: Option<u32>,
    pub inferred: Option<u32>,
}

/// Supplier verification workflow state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    NotRequested,
    Requested,
    InProgress,
    Quoted,
    Done,
    #[serde(other)]
    Unknown,
}

impl VerificationStatus {
    /// A supplier has actually priced this product
    pub fn is_verified(&self) -> bool {
        matches!(self, VerificationStatus::Quoted | VerificationStatus::Done)
    }
}

/// Strength of the import evidence behind an estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceLevel {
    ExactImport,
    SimilarImport,
    CategoryOnly,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EvidenceSignals {
    pub verification_status: Option<VerificationStatus>,
    pub evidence_level: Option<EvidenceLevel>,
    pub has_import_evidence: bool,
    pub has_internal_similar_records: bool,
}

/// Raw observed unit prices
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PriceSamples {
    pub supplier_quotes: Option<Vec<f64>>,
    pub internal_records: Option<Vec<f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_parses_sparse_json() {
        let snapshot: ReportSnapshot = serde_json::from_str(
            r#"{
                "category": "Confectionery",
                "uploads": {"productPhoto": true},
                "label": {"ocrStatus": "failed"},
                "weight": {"ocrGrams": 25.0},
                "evidence": {"verificationStatus": "quoted", "evidenceLevel": "exact_import"}
            }"#,
        )
        .unwrap();

        assert!(snapshot.uploads.product_photo);
        assert!(snapshot.label.ocr_failed());
        assert_eq!(snapshot.weight.ocr_grams, Some(25.0));
        assert_eq!(snapshot.evidence.verification_status, Some(VerificationStatus::Quoted));
        assert_eq!(snapshot.evidence.evidence_level, Some(EvidenceLevel::ExactImport));
        assert!(snapshot.samples.supplier_quotes.is_none());
    }

    #[test]
    fn test_unknown_enum_values_fall_back() {
        let evidence: EvidenceSignals = serde_json::from_str(
            r#"{"verificationStatus": "archived", "evidenceLevel": "rumour"}"#,
        )
        .unwrap();
        assert_eq!(evidence.verification_status, Some(VerificationStatus::Unknown));
        assert_eq!(evidence.evidence_level, Some(EvidenceLevel::Unknown));
    }

    #[test]
    fn test_barcode_value_ignores_blank() {
        let barcode = BarcodeSignal { decoded: Some("   ".to_string()) };
        assert!(barcode.value().is_none());
        let barcode = BarcodeSignal { decoded: Some(" 4006381333931 ".to_string()) };
        assert_eq!(barcode.value(), Some("4006381333931"));
    }

    #[test]
    fn test_label_extracted_text() {
        let mut label = LabelSignals::default();
        assert!(!label.has_extracted_text());
        label.ingredients = Some("sugar, cocoa".to_string());
        assert!(label.has_extracted_text());
    }
}
