//! Full-chain report evaluation
//!
//! ```text
//! draft defaults -> input status -> FOB range -> committed band
//!                -> effective weight -> landed cost -> margin -> quality tier
//! ```
//!
//! Every call recomputes the whole chain from the snapshot it is given.
//! Nothing is cached between calls and no step is patched in place.

use crate::profile::EstimationProfile;
use landed_core::{DraftInference, ReportSnapshot, Result};
use landed_estimate::{
    assemble_landed_cost, calculate_margin_scenarios, shipping_from_weight, tighten, CommittedRange,
    CostInputs, FobRangeResult, LandedCostBreakdown, MarginAnalysis, UnitPrice,
};
use landed_provenance::{
    get_extraction_statuses, resolve_draft, resolve_effective_weight, EffectiveWeight, ExtractionStatuses,
    InputField, InputStatusStructure,
};
use landed_quality::{ReportQuality, TierInputs, TierResolver};
use serde::Serialize;

/// Everything derived from one report snapshot
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEvaluation {
    /// blake3 digest of the canonical snapshot JSON
    pub fingerprint: String,
    pub profile: String,
    pub draft: DraftInference,
    pub input_status: InputStatusStructure,
    pub missing_critical_fields: Vec<InputField>,
    pub extraction: ExtractionStatuses,
    pub fob: FobRangeResult,
    /// Display only; costing always uses `fob`
    pub committed_range: CommittedRange,
    pub effective_weight: EffectiveWeight,
    pub unit_price: UnitPrice,
    pub landed_cost: Option<LandedCostBreakdown>,
    pub margin: Option<MarginAnalysis>,
    pub quality: ReportQuality,
}

/// Stable fingerprint of a snapshot
pub fn fingerprint(report: &ReportSnapshot) -> Result<String> {
    let canonical = serde_json::to_vec(report)?;
    Ok(format!("blake3:{}", blake3::hash(&canonical)))
}

/// Runs the chain against one profile
pub struct ReportEvaluator {
    profile: EstimationProfile,
    resolver: TierResolver,
}

impl ReportEvaluator {
    pub fn new(profile: EstimationProfile) -> Self {
        Self {
            profile,
            resolver: TierResolver::default(),
        }
    }

    pub fn profile(&self) -> &EstimationProfile {
        &self.profile
    }

    pub fn evaluate(&self, report: &ReportSnapshot) -> ReportEvaluation {
        let profile = &self.profile;
        let fingerprint = fingerprint(report).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "snapshot not serializable, hashing debug form");
            format!("blake3:{}", blake3::hash(format!("{:?}", report).as_bytes()))
        });

        let draft = resolve_draft(report.category.as_deref(), report.draft_overrides.as_ref());
        let extraction = get_extraction_statuses(report, &draft);
        let input_status = extraction.snapshot.clone();
        let missing_critical_fields = input_status.missing_critical_fields();

        let fob = profile.range_estimator().build_fob_range_result(
            report.samples.supplier_quotes.as_deref(),
            report.samples.internal_records.as_deref(),
        );
        let committed_range = tighten(&fob.result.range, fob.similar_records_count);
        let unit_price = UnitPrice::from_range(&fob.result.range);

        let effective_weight = resolve_effective_weight(report, &draft);
        let costing_weight = effective_weight.grams.or(profile.fallback_weight_grams);

        let landed_cost = costing_weight.map(|grams| {
            assemble_landed_cost(&CostInputs {
                unit_price,
                duty_rate: report.duty_rate.unwrap_or(profile.duty_rate),
                shipping_per_unit: shipping_from_weight(
                    grams,
                    profile.shipping_per_kg,
                    profile.min_shipping_per_unit,
                ),
                fees_per_unit: profile.fees_per_unit,
            })
        });

        let margin = landed_cost.as_ref().map(|cost| {
            calculate_margin_scenarios(
                cost.standard.total_landed_cost,
                report.category.as_deref(),
                report.generic_category.as_deref(),
                report.quantity.unwrap_or(profile.default_quantity),
                report.food_percentage,
            )
        });

        let quality = self.resolver.resolve(&TierInputs {
            evidence: &report.evidence,
            input_status: &input_status,
            manual_label_complete: report.label.manual_entry_complete,
            has_landed_cost: landed_cost.is_some(),
        });

        tracing::debug!(
            fingerprint = %fingerprint,
            fob_source = ?fob.source,
            tier = %quality.tier,
            "report evaluated"
        );

        ReportEvaluation {
            fingerprint,
            profile: profile.name.clone(),
            draft,
            input_status,
            missing_critical_fields,
            extraction,
            fob,
            committed_range,
            effective_weight,
            unit_price,
            landed_cost,
            margin,
            quality,
        }
    }
}

impl Default for ReportEvaluator {
    fn default() -> Self {
        Self::new(EstimationProfile::default())
    }
}

/// Evaluate one report against a profile
pub fn evaluate_report(report: &ReportSnapshot, profile: &EstimationProfile) -> ReportEvaluation {
    ReportEvaluator::new(profile.clone()).evaluate(report)
}
