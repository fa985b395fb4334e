//! Input status snapshot
//!
//! Derives one [`FieldStatus`] per critical input from the raw report signals.
//! Every status is built by walking the lifecycle from `missing`, so a status
//! can only exist if the transitions leading to it are legal.

use crate::field_status::{FieldSource, FieldStatus, FieldTransition, FieldValue, InputField};
use landed_core::{ReportSnapshot, Result};
use serde::{Deserialize, Serialize};

/// Provenance of the five inputs that gate the quality tier
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputStatusStructure {
    pub product_photo: FieldStatus,
    pub barcode: FieldStatus,
    pub label: FieldStatus,
    pub unit_weight: FieldStatus,
    pub case_pack: FieldStatus,
}

impl InputStatusStructure {
    pub fn get(&self, field: InputField) -> &FieldStatus {
        match field {
            InputField::ProductPhoto => &self.product_photo,
            InputField::Barcode => &self.barcode,
            InputField::Label => &self.label,
            InputField::UnitWeight => &self.unit_weight,
            InputField::CasePack => &self.case_pack,
        }
    }

    /// Critical inputs still in state `missing`, in checklist order
    pub fn missing_critical_fields(&self) -> Vec<InputField> {
        [InputField::UnitWeight, InputField::CasePack]
            .into_iter()
            .filter(|field| self.get(*field).is_missing())
            .collect()
    }

    /// Apply one transition to one field, returning a new structure
    pub fn submit(&self, field: InputField, transition: FieldTransition) -> Result<InputStatusStructure> {
        let updated = self.get(field).apply(field, transition)?;
        let mut next = self.clone();
        match field {
            InputField::ProductPhoto => next.product_photo = updated,
            InputField::Barcode => next.barcode = updated,
            InputField::Label => next.label = updated,
            InputField::UnitWeight => next.unit_weight = updated,
            InputField::CasePack => next.case_pack = updated,
        }
        Ok(next)
    }
}

/// Run a fixed sequence of transitions from `missing`.
///
/// The sequences used below are legal by construction; a rejected step is
/// logged and the last good status kept.
fn walk(field: InputField, steps: Vec<FieldTransition>) -> FieldStatus {
    steps.into_iter().fold(FieldStatus::missing(), |status, step| {
        match status.apply(field, step) {
            Ok(next) => next,
            Err(err) => {
                tracing::warn!(%field, error = %err, "input status transition rejected");
                status
            }
        }
    })
}

fn upload(value: Option<FieldValue>, source: FieldSource) -> FieldTransition {
    FieldTransition::Upload { value, source }
}

fn confirm(value: Option<FieldValue>, source: FieldSource) -> FieldTransition {
    FieldTransition::Confirm { value, source }
}

fn fail(reason: Option<&str>) -> FieldTransition {
    FieldTransition::Fail {
        reason: reason.unwrap_or("label OCR failed").to_string(),
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

fn product_photo_status(report: &ReportSnapshot) -> FieldStatus {
    if !report.uploads.product_photo {
        return FieldStatus::missing();
    }
    let photo = Some(FieldValue::Flag(true));
    walk(
        InputField::ProductPhoto,
        vec![
            upload(photo.clone(), FieldSource::UserInput),
            confirm(photo, FieldSource::UserInput),
        ],
    )
}

fn barcode_status(report: &ReportSnapshot) -> FieldStatus {
    if !report.uploads.barcode_source() {
        return FieldStatus::missing();
    }
    let mut steps = vec![upload(None, FieldSource::UserInput)];
    if let Some(code) = report.barcode.value() {
        steps.push(confirm(Some(FieldValue::Text(code.to_string())), FieldSource::Ocr));
    }
    walk(InputField::Barcode, steps)
}

fn label_status(report: &ReportSnapshot) -> FieldStatus {
    let label = &report.label;
    let mut steps = Vec::new();
    if label.ocr_failed() {
        steps.push(fail(label.ocr_failure_reason.as_deref()));
    } else if report.uploads.label_source() {
        steps.push(upload(None, FieldSource::Ocr));
    }
    if label.manual_entry_complete {
        steps.push(confirm(None, FieldSource::Manual));
    }
    walk(InputField::Label, steps)
}

/// Unit weight state.
///
/// A failed OCR pass always yields `failed`, even if a stale numeric value
/// survived it. Only a manual or user-supplied value can confirm the field.
pub fn get_unit_weight_state(report: &ReportSnapshot) -> FieldStatus {
    let weight = &report.weight;
    let ocr_failed = report.label.ocr_failed();

    let mut steps = Vec::new();
    if ocr_failed {
        steps.push(fail(report.label.ocr_failure_reason.as_deref()));
    }

    let human = positive(weight.user_input_grams)
        .map(|grams| (grams, FieldSource::UserInput))
        .or_else(|| positive(weight.manual_grams).map(|grams| (grams, FieldSource::Manual)));

    if let Some((grams, source)) = human {
        steps.push(confirm(Some(FieldValue::Number(grams)), source));
    } else if !ocr_failed {
        let ocr = positive(weight.ocr_grams)
            .filter(|_| report.label.ocr_status == landed_core::OcrStatus::Success);
        if let Some(grams) = ocr {
            steps.push(upload(Some(FieldValue::Number(grams)), FieldSource::Ocr));
        } else if let Some(grams) = positive(weight.inferred_grams) {
            steps.push(upload(Some(FieldValue::Number(grams)), FieldSource::None));
        }
    }

    let status = walk(InputField::UnitWeight, steps);
    if ocr_failed && weight.ocr_grams.is_some() && !status.is_confirmed() {
        tracing::debug!("stale OCR weight ignored after failed label read");
    }
    status
}

fn case_pack_status(report: &ReportSnapshot) -> FieldStatus {
    let pack = &report.case_pack;
    let as_value = |n: u32| Some(FieldValue::Number(f64::from(n)));

    let human = pack
        .user_input
        .filter(|n| *n > 0)
        .map(|n| (n, FieldSource::UserInput))
        .or_else(|| pack.manual.filter(|n| *n > 0).map(|n| (n, FieldSource::Manual)));

    let steps = match (human, pack.inferred.filter(|n| *n > 0)) {
        (Some((n, source)), _) => vec![confirm(as_value(n), source)],
        (None, Some(n)) => vec![upload(as_value(n), FieldSource::None)],
        (None, None) => Vec::new(),
    };
    walk(InputField::CasePack, steps)
}

/// Derive the provenance of every critical input from a report snapshot
pub fn compute_input_status(report: &ReportSnapshot) -> InputStatusStructure {
    let status = InputStatusStructure {
        product_photo: product_photo_status(report),
        barcode: barcode_status(report),
        label: label_status(report),
        unit_weight: get_unit_weight_state(report),
        case_pack: case_pack_status(report),
    };
    tracing::debug!(
        unit_weight = %status.unit_weight.state,
        case_pack = %status.case_pack.state,
        label = %status.label.state,
        "input status computed"
    );
    status
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_status::FieldState;
    use landed_core::OcrStatus;

    fn failed_ocr_report() -> ReportSnapshot {
        let mut report = ReportSnapshot::default();
        report.uploads.label_photo = true;
        report.label.ocr_status = OcrStatus::Failed;
        report.label.ocr_failure_reason = Some("glare".to_string());
        report.weight.ocr_grams = Some(250.0);
        report
    }

    #[test]
    fn test_stale_ocr_weight_is_failed() {
        let status = get_unit_weight_state(&failed_ocr_report());
        assert_eq!(status.state, FieldState::Failed);
        assert_eq!(status.failure_reason.as_deref(), Some("glare"));
        assert!(status.value.is_none());
    }

    #[test]
    fn test_manual_weight_confirms_after_failure() {
        let mut report = failed_ocr_report();
        report.weight.manual_grams = Some(250.0);
        let status = get_unit_weight_state(&report);
        assert_eq!(status.state, FieldState::Confirmed);
        assert_eq!(status.source, FieldSource::Manual);

        report.weight.user_input_grams = Some(240.0);
        let status = get_unit_weight_state(&report);
        assert_eq!(status.source, FieldSource::UserInput);
        assert_eq!(status.value, Some(FieldValue::Number(240.0)));
    }

    #[test]
    fn test_weight_confirmed_only_by_humans() {
        let mut report = ReportSnapshot::default();
        report.label.ocr_status = OcrStatus::Success;
        report.weight.ocr_grams = Some(100.0);
        report.weight.inferred_grams = Some(90.0);
        let status = get_unit_weight_state(&report);
        assert_eq!(status.state, FieldState::Uploaded);
        assert_eq!(status.source, FieldSource::Ocr);

        report.label.ocr_status = OcrStatus::NotAttempted;
        let status = get_unit_weight_state(&report);
        assert_eq!(status.state, FieldState::Uploaded);
        assert_eq!(status.source, FieldSource::None);

        report.weight.inferred_grams = None;
        assert!(get_unit_weight_state(&report).is_missing());
    }

    #[test]
    fn test_barcode_states() {
        let mut report = ReportSnapshot::default();
        assert!(compute_input_status(&report).barcode.is_missing());

        report.uploads.barcode_photo = true;
        assert_eq!(compute_input_status(&report).barcode.state, FieldState::Uploaded);

        report.barcode.decoded = Some("4901234567894".to_string());
        let barcode = compute_input_status(&report).barcode;
        assert!(barcode.is_confirmed());
        assert_eq!(barcode.value, Some(FieldValue::Text("4901234567894".to_string())));

        report.uploads.barcode_photo = false;
        assert!(compute_input_status(&report).barcode.is_missing());
    }

    #[test]
    fn test_label_states() {
        let mut report = ReportSnapshot::default();
        assert!(compute_input_status(&report).label.is_missing());

        report.uploads.label_photo = true;
        assert_eq!(compute_input_status(&report).label.state, FieldState::Uploaded);

        report.label.ocr_status = OcrStatus::Failed;
        assert!(compute_input_status(&report).label.is_failed());

        report.label.manual_entry_complete = true;
        let label = compute_input_status(&report).label;
        assert!(label.is_confirmed());
        assert_eq!(label.source, FieldSource::Manual);
    }

    #[test]
    fn test_product_photo_confirmed_iff_uploaded() {
        let mut report = ReportSnapshot::default();
        assert!(compute_input_status(&report).product_photo.is_missing());
        report.uploads.product_photo = true;
        assert!(compute_input_status(&report).product_photo.is_confirmed());
    }

    #[test]
    fn test_case_pack_defaults_never_confirm() {
        let mut report = ReportSnapshot::default();
        report.case_pack.inferred = Some(24);
        let status = compute_input_status(&report);
        assert_eq!(status.case_pack.state, FieldState::Uploaded);

        report.case_pack.manual = Some(0);
        assert!(!compute_input_status(&report).case_pack.is_confirmed());

        report.case_pack.user_input = Some(48);
        let status = compute_input_status(&report);
        assert!(status.case_pack.is_confirmed());
        assert_eq!(status.case_pack.source, FieldSource::UserInput);
    }

    #[test]
    fn test_missing_critical_fields() {
        let report = ReportSnapshot::default();
        let status = compute_input_status(&report);
        assert_eq!(
            status.missing_critical_fields(),
            vec![InputField::UnitWeight, InputField::CasePack]
        );

        let mut report = ReportSnapshot::default();
        report.case_pack.user_input = Some(12);
        assert_eq!(
            compute_input_status(&report).missing_critical_fields(),
            vec![InputField::UnitWeight]
        );
    }

    #[test]
    fn test_submit_enforces_lifecycle() {
        let status = compute_input_status(&failed_ocr_report());
        let ocr_retry = FieldTransition::Confirm {
            value: Some(FieldValue::Number(250.0)),
            source: FieldSource::Ocr,
        };
        assert!(status.submit(InputField::UnitWeight, ocr_retry).is_err());

        let manual = FieldTransition::Confirm {
            value: Some(FieldValue::Number(250.0)),
            source: FieldSource::Manual,
        };
        let next = status.submit(InputField::UnitWeight, manual).unwrap();
        assert!(next.unit_weight.is_confirmed());
        assert!(status.unit_weight.is_failed());
    }
}
