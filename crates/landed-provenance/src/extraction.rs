//! Per-field extraction status for display
//!
//! Each field is classified on its own: a verified value first, then an
//! unreadable photo, then an inferred value, and `not_provided` last.

use crate::field_status::FieldSource;
use crate::input_status::{compute_input_status, InputStatusStructure};
use landed_core::{DraftInference, DraftSource, OcrStatus, ReportSnapshot};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStatus {
    Verified,
    Inferred,
    /// Barcode photo present, nothing decoded
    CouldNotRead,
    /// Label photo present, nothing extracted
    NotReadable,
    NotProvided,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionStatuses {
    pub barcode: ExtractionStatus,
    pub label_text: ExtractionStatus,
    pub weight: ExtractionStatus,
    pub origin: ExtractionStatus,
    pub snapshot: InputStatusStructure,
}

fn classify(verified: bool, unreadable: Option<ExtractionStatus>, inferred: bool) -> ExtractionStatus {
    if verified {
        ExtractionStatus::Verified
    } else if let Some(status) = unreadable {
        status
    } else if inferred {
        ExtractionStatus::Inferred
    } else {
        ExtractionStatus::NotProvided
    }
}

fn non_blank(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

fn barcode_status(report: &ReportSnapshot, draft: &DraftInference) -> ExtractionStatus {
    classify(
        report.barcode.value().is_some(),
        report
            .uploads
            .barcode_source()
            .then_some(ExtractionStatus::CouldNotRead),
        non_blank(draft.barcode_draft.value.as_deref()),
    )
}

fn label_text_status(report: &ReportSnapshot) -> ExtractionStatus {
    let label = &report.label;
    let extracted = label.ocr_status == OcrStatus::Success && label.has_extracted_text();
    let unreadable = (report.uploads.label_source() || label.ocr_failed()).then_some(ExtractionStatus::NotReadable);
    classify(extracted || label.manual_entry_complete, unreadable, false)
}

fn weight_status(snapshot: &InputStatusStructure, draft: &DraftInference) -> ExtractionStatus {
    let unit_weight = &snapshot.unit_weight;
    let verified = unit_weight.is_confirmed()
        || (unit_weight.source == FieldSource::Ocr && !unit_weight.is_failed());
    let unreadable = unit_weight.is_failed().then_some(ExtractionStatus::NotReadable);
    let inferred = unit_weight.value.is_some() || draft.weight_draft.has_value();
    classify(verified, unreadable, inferred)
}

fn origin_status(report: &ReportSnapshot, draft: &DraftInference) -> ExtractionStatus {
    let label = &report.label;
    let printed = non_blank(label.origin.as_deref()) && !label.ocr_failed();
    let from_user = draft.label_draft.origin.source == DraftSource::UserInput
        && non_blank(draft.label_draft.origin.value.as_deref());
    let unreadable = (label.ocr_failed()
        || (report.uploads.label_source() && label.ocr_status == OcrStatus::Success))
        .then_some(ExtractionStatus::NotReadable);
    let inferred =
        non_blank(label.inferred_origin.as_deref()) || non_blank(draft.label_draft.origin.value.as_deref());
    classify(printed || from_user, unreadable, inferred)
}

/// Classify barcode, label text, weight and origin, alongside the status snapshot
pub fn get_extraction_statuses(report: &ReportSnapshot, draft: &DraftInference) -> ExtractionStatuses {
    let snapshot = compute_input_status(report);
    ExtractionStatuses {
        barcode: barcode_status(report, draft),
        label_text: label_text_status(report),
        weight: weight_status(&snapshot, draft),
        origin: origin_status(report, draft),
        snapshot,
    }
}
