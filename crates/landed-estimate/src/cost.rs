//! Landed cost assembly
//!
//! Combines a unit price with duty, shipping and fee triples into p10/p50/p90
//! per-unit costs. The p90 column compounds the conservative unit price with
//! the p90 duty rate, so it reads as a genuine worst realistic case.

use landed_core::{MoneyRange, PercentileTriple};
use serde::{Deserialize, Serialize};

/// Standard and conservative unit (FOB) prices
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitPrice {
    pub standard: f64,
    pub conservative: f64,
}

impl UnitPrice {
    pub fn new(standard: f64, conservative: f64) -> Self {
        Self { standard, conservative }
    }

    /// Midpoint as standard, upper bound as conservative
    pub fn from_range(range: &MoneyRange) -> Self {
        Self::new(range.mid(), range.max)
    }
}

/// Everything the assembler needs, all per unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostInputs {
    pub unit_price: UnitPrice,
    /// Fraction of unit price, e.g. 0.08 for 8%
    pub duty_rate: PercentileTriple,
    pub shipping_per_unit: PercentileTriple,
    pub fees_per_unit: PercentileTriple,
}

/// One scalar column of the breakdown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandedCostView {
    pub unit_price: f64,
    pub shipping_per_unit: f64,
    pub duty_per_unit: f64,
    pub fee_per_unit: f64,
    pub total_landed_cost: f64,
}

/// Assembled landed cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandedCostBreakdown {
    pub shipping_per_unit: PercentileTriple,
    pub duty_per_unit: PercentileTriple,
    pub fee_per_unit: PercentileTriple,
    pub total_landed_cost: PercentileTriple,
    /// p50-anchored view
    pub standard: LandedCostView,
    /// p90-anchored view
    pub conservative: LandedCostView,
    /// Triples that arrived inverted and were re-ordered
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reordered: Vec<String>,
}

fn ensure_ordered(name: &str, triple: PercentileTriple, reordered: &mut Vec<String>) -> PercentileTriple {
    if triple.is_ordered() {
        return triple;
    }
    tracing::warn!(
        triple = name,
        p10 = triple.p10,
        p50 = triple.p50,
        p90 = triple.p90,
        "inverted percentiles re-ordered"
    );
    reordered.push(name.to_string());
    triple.ordered()
}

/// Assemble per-unit landed cost percentiles
pub fn assemble_landed_cost(inputs: &CostInputs) -> LandedCostBreakdown {
    let price = inputs.unit_price;
    let duty = inputs.duty_rate;
    let shipping = inputs.shipping_per_unit;
    let fees = inputs.fees_per_unit;

    let duty_per_unit = PercentileTriple::new(
        price.standard * duty.p10,
        price.standard * duty.p50,
        price.conservative * duty.p90,
    );

    let total = PercentileTriple::new(
        price.standard + shipping.p10 + duty_per_unit.p10 + fees.p10,
        price.standard + shipping.p50 + duty_per_unit.p50 + fees.p50,
        price.conservative + shipping.p90 + duty_per_unit.p90 + fees.p90,
    );

    let mut reordered = Vec::new();
    let shipping = ensure_ordered("shippingPerUnit", shipping, &mut reordered);
    let duty_per_unit = ensure_ordered("dutyPerUnit", duty_per_unit, &mut reordered);
    let fees = ensure_ordered("feePerUnit", fees, &mut reordered);
    let total = ensure_ordered("totalLandedCost", total, &mut reordered);

    let standard = LandedCostView {
        unit_price: price.standard,
        shipping_per_unit: shipping.p50,
        duty_per_unit: duty_per_unit.p50,
        fee_per_unit: fees.p50,
        total_landed_cost: total.p50,
    };
    let conservative = LandedCostView {
        unit_price: price.conservative,
        shipping_per_unit: shipping.p90,
        duty_per_unit: duty_per_unit.p90,
        fee_per_unit: fees.p90,
        total_landed_cost: total.p90,
    };

    LandedCostBreakdown {
        shipping_per_unit: shipping,
        duty_per_unit,
        fee_per_unit: fees,
        total_landed_cost: total,
        standard,
        conservative,
        reordered,
    }
}

/// Per-unit shipping from unit weight and a per-kilogram rate triple
pub fn shipping_from_weight(weight_grams: f64, rate_per_kg: PercentileTriple, min_per_unit: f64) -> PercentileTriple {
    let kg = (weight_grams / 1000.0).max(0.0);
    rate_per_kg.scale(kg).floor_at(min_per_unit)
}
