//! Hard downgrade rules
//!
//! An ordered table of `(predicate, forced tier, reason)` rows. Rows are
//! evaluated top-down and can only lower the tier.

use crate::tier::QualityTier;
use landed_core::EvidenceSignals;
use landed_provenance::{FieldState, InputStatusStructure};
use serde::{Deserialize, Serialize};

/// Everything a downgrade predicate may look at
#[derive(Debug, Clone, Copy)]
pub struct TierInputs<'a> {
    pub evidence: &'a EvidenceSignals,
    pub input_status: &'a InputStatusStructure,
    pub manual_label_complete: bool,
    pub has_landed_cost: bool,
}

/// One row of the downgrade table
#[derive(Clone)]
pub struct DowngradeRule {
    pub id: &'static str,
    pub forced_tier: QualityTier,
    pub reason: &'static str,
    pub applies: fn(&TierInputs<'_>) -> bool,
}

impl DowngradeRule {
    pub fn new(
        id: &'static str,
        forced_tier: QualityTier,
        reason: &'static str,
        applies: fn(&TierInputs<'_>) -> bool,
    ) -> Self {
        Self { id, forced_tier, reason, applies }
    }

    pub fn fires(&self, inputs: &TierInputs<'_>) -> bool {
        (self.applies)(inputs)
    }
}

impl std::fmt::Debug for DowngradeRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DowngradeRule")
            .field("id", &self.id)
            .field("forced_tier", &self.forced_tier)
            .field("reason", &self.reason)
            .finish_non_exhaustive()
    }
}

/// Outcome of evaluating one rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleCheck {
    pub id: String,
    pub fired: bool,
}

fn missing_critical_inputs(inputs: &TierInputs<'_>) -> bool {
    let status = inputs.input_status;
    status.unit_weight.state == FieldState::Missing || status.case_pack.state == FieldState::Missing
}

fn label_ocr_failed(inputs: &TierInputs<'_>) -> bool {
    inputs.input_status.label.state == FieldState::Failed && !inputs.manual_label_complete
}

fn no_landed_cost(inputs: &TierInputs<'_>) -> bool {
    !inputs.has_landed_cost
}

/// The standard downgrade table, in evaluation order
pub fn default_downgrade_rules() -> Vec<DowngradeRule> {
    vec![
        DowngradeRule::new(
            "missing_critical_inputs",
            QualityTier::Preliminary,
            "missing critical inputs (weight or case pack)",
            missing_critical_inputs,
        ),
        DowngradeRule::new(
            "label_ocr_failed",
            QualityTier::Preliminary,
            "label OCR failed and manual entry incomplete",
            label_ocr_failed,
        ),
        DowngradeRule::new(
            "no_landed_cost",
            QualityTier::Preliminary,
            "no landed cost estimate",
            no_landed_cost,
        ),
    ]
}
