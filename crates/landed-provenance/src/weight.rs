//! Effective unit weight for costing

use landed_core::{DraftInference, DraftSource, OcrStatus, ReportSnapshot};
use serde::{Deserialize, Serialize};

/// Which precedence tier produced the effective weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum WeightProvenance {
    Confirmed,
    Inferred,
    CategoryDefault,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveWeight {
    pub grams: Option<f64>,
    pub provenance: WeightProvenance,
}

impl EffectiveWeight {
    fn of(grams: f64, provenance: WeightProvenance) -> Self {
        Self { grams: Some(grams), provenance }
    }

    fn unknown() -> Self {
        Self { grams: None, provenance: WeightProvenance::Unknown }
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Resolve the weight downstream costing should use.
///
/// Tiers are tried in order: confirmed (user, manual, a user-entered draft),
/// inferred (OCR success, vision analysis, a model-inferred draft), category
/// default, unknown.
pub fn resolve_effective_weight(report: &ReportSnapshot, draft: &DraftInference) -> EffectiveWeight {
    let signals = &report.weight;
    let drafted = positive(draft.weight_draft.value);
    let draft_source = draft.weight_draft.source;

    let confirmed = positive(signals.user_input_grams)
        .or_else(|| positive(signals.manual_grams))
        .or_else(|| drafted.filter(|_| draft_source == DraftSource::UserInput));
    if let Some(grams) = confirmed {
        return EffectiveWeight::of(grams, WeightProvenance::Confirmed);
    }

    let ocr = positive(signals.ocr_grams).filter(|_| report.label.ocr_status == OcrStatus::Success);
    let inferred = ocr
        .or_else(|| positive(signals.inferred_grams))
        .or_else(|| drafted.filter(|_| draft_source.is_inferred()));
    if let Some(grams) = inferred {
        return EffectiveWeight::of(grams, WeightProvenance::Inferred);
    }

    match drafted.filter(|_| draft_source == DraftSource::Default) {
        Some(grams) => EffectiveWeight::of(grams, WeightProvenance::CategoryDefault),
        None => EffectiveWeight::unknown(),
    }
}
