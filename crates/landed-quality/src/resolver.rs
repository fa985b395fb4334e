//! Evidence tier resolution
//!
//! Pure function of evidence signals and input status. Base tier first, then
//! the downgrade table; the reason always names the rule that decided.

use crate::rules::{default_downgrade_rules, DowngradeRule, RuleCheck, TierInputs};
use crate::tier::{base_tier, QualityTier};
use landed_core::ReportSnapshot;
use landed_provenance::compute_input_status;
use serde::{Deserialize, Serialize};

/// Resolved quality of a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuality {
    pub tier: QualityTier,
    pub label: String,
    pub reason: String,
    /// Tier implied by evidence before any downgrade
    pub base_tier: QualityTier,
    /// Every downgrade rule evaluated, in order
    pub rules: Vec<RuleCheck>,
}

impl ReportQuality {
    pub fn was_downgraded(&self) -> bool {
        self.tier < self.base_tier
    }
}

/// Applies the downgrade table to a base tier
pub struct TierResolver {
    rules: Vec<DowngradeRule>,
}

impl Default for TierResolver {
    fn default() -> Self {
        Self::new(default_downgrade_rules())
    }
}

impl TierResolver {
    pub fn new(rules: Vec<DowngradeRule>) -> Self {
        Self { rules }
    }

    /// Append a rule after the existing ones
    pub fn with_rule(mut self, rule: DowngradeRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn resolve(&self, inputs: &TierInputs<'_>) -> ReportQuality {
        let (base, base_reason) = base_tier(inputs.evidence);
        let mut tier = base;
        let mut reason = base_reason;
        let mut decided = false;
        let mut checks = Vec::with_capacity(self.rules.len());

        for rule in &self.rules {
            let fired = rule.fires(inputs);
            checks.push(RuleCheck { id: rule.id.to_string(), fired });
            if !fired || rule.forced_tier > tier {
                continue;
            }
            // the first firing rule owns the reason unless a later one lowers further
            if !decided || rule.forced_tier < tier {
                tracing::debug!(rule = rule.id, from = %tier, to = %rule.forced_tier, "downgrade rule applied");
                tier = rule.forced_tier;
                reason = rule.reason;
                decided = true;
            }
        }

        ReportQuality {
            tier,
            label: tier.label().to_string(),
            reason: reason.to_string(),
            base_tier: base,
            rules: checks,
        }
    }
}

/// Resolve the quality of a report whose landed cost was assembled
pub fn compute_report_quality(report: &ReportSnapshot) -> ReportQuality {
    let input_status = compute_input_status(report);
    TierResolver::default().resolve(&TierInputs {
        evidence: &report.evidence,
        input_status: &input_status,
        manual_label_complete: report.label.manual_entry_complete,
        has_landed_cost: true,
    })
}
