//! Margin scenarios against an assumed domestic wholesale price.

use landed_core::{KeywordEntry, KeywordTable};
use serde::{Deserialize, Serialize};

/// Broad pricing family of a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Grocery,
    Specialty,
    #[default]
    General,
}

/// Domestic wholesale markup multiples over landed cost
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarginMultipliers {
    pub worst: f64,
    pub base: f64,
    pub best: f64,
}

impl CategoryType {
    pub fn multipliers(&self) -> MarginMultipliers {
        match self {
            CategoryType::Grocery => MarginMultipliers { worst: 1.01, base: 1.02, best: 1.03 },
            CategoryType::Specialty => MarginMultipliers { worst: 1.20, base: 1.30, best: 1.40 },
            CategoryType::General => MarginMultipliers { worst: 1.30, base: 1.50, best: 1.80 },
        }
    }
}

const CATEGORY_TYPE_ENTRIES: &[KeywordEntry<CategoryType>] = &[
    KeywordEntry {
        family: CategoryType::Grocery,
        keywords: &[
            "grocery", "food", "snack", "candy", "confectionery", "chocolate", "sweet",
            "beverage", "drink", "juice", "tea", "coffee", "sauce", "condiment", "noodle",
            "pasta", "rice", "spice", "seasoning", "biscuit", "cookie", "cracker", "cereal",
            "dairy", "frozen food", "canned",
        ],
    },
    KeywordEntry {
        family: CategoryType::Specialty,
        keywords: &[
            "specialty", "gourmet", "organic", "artisan", "premium", "luxury", "cosmetic",
            "beauty", "skincare", "skin care", "fragrance", "perfume", "supplement",
            "vitamin", "jewelry", "jewellery", "pet",
        ],
    },
    KeywordEntry {
        family: CategoryType::General,
        keywords: &[
            "general merchandise", "household", "kitchen", "toy", "apparel", "clothing",
            "electronics", "accessory", "accessories", "tool", "stationery", "home",
        ],
    },
];

/// Keyword table driving [`classify_category_type`]
pub const CATEGORY_TYPES: KeywordTable<CategoryType> = KeywordTable::new(CATEGORY_TYPE_ENTRIES);

/// Classify by food share first, then by keywords, defaulting to general
pub fn classify_category_type(
    category: Option<&str>,
    generic_category: Option<&str>,
    food_percentage: Option<f64>,
) -> CategoryType {
    if food_percentage.is_some_and(|pct| pct > 50.0) {
        return CategoryType::Grocery;
    }
    CATEGORY_TYPES
        .classify_all(&[category, generic_category])
        .map(|m| m.family)
        .unwrap_or_default()
}

/// Savings in dollars per unit under three markup assumptions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarginScenario {
    pub worst: f64,
    pub base: f64,
    pub best: f64,
}

/// Presentational advice attached to a margin analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarginAdvisory {
    BulkVolume,
    SmallBatch,
    GroceryThinMargin,
    SpecialtyPremium,
}

impl MarginAdvisory {
    pub fn message(&self) -> &'static str {
        match self {
            MarginAdvisory::BulkVolume => {
                "Large order volume: per-unit freight and fees should come in below the estimate."
            }
            MarginAdvisory::SmallBatch => {
                "Small order: fixed fees are spread over few units and may erase the savings."
            }
            MarginAdvisory::GroceryThinMargin => {
                "Grocery wholesale runs on thin markups; savings depend on tight freight control."
            }
            MarginAdvisory::SpecialtyPremium => {
                "Specialty goods carry higher domestic markups, leaving more room for savings."
            }
        }
    }

    /// Quantity bucket, if the order size is notable
    pub fn for_quantity(quantity: u32) -> Option<Self> {
        if quantity >= 1000 {
            Some(MarginAdvisory::BulkVolume)
        } else if quantity < 100 {
            Some(MarginAdvisory::SmallBatch)
        } else {
            None
        }
    }

    pub fn for_category_type(category_type: CategoryType) -> Option<Self> {
        match category_type {
            CategoryType::Grocery => Some(MarginAdvisory::GroceryThinMargin),
            CategoryType::Specialty => Some(MarginAdvisory::SpecialtyPremium),
            CategoryType::General => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarginMessage {
    pub code: MarginAdvisory,
    pub text: &'static str,
}

impl From<MarginAdvisory> for MarginMessage {
    fn from(code: MarginAdvisory) -> Self {
        Self { code, text: code.message() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginAnalysis {
    pub domestic_price: f64,
    pub scenarios: MarginScenario,
    pub category_type: CategoryType,
    pub messages: Vec<MarginMessage>,
}

/// Derive a comparable domestic price and savings scenarios for one landed cost
pub fn calculate_margin_scenarios(
    landed_cost: f64,
    category: Option<&str>,
    generic_category: Option<&str>,
    quantity: u32,
    food_percentage: Option<f64>,
) -> MarginAnalysis {
    let category_type = classify_category_type(category, generic_category, food_percentage);
    let m = category_type.multipliers();

    let domestic_price = landed_cost * m.base;
    let scenarios = MarginScenario {
        worst: domestic_price - landed_cost * m.worst,
        base: domestic_price - landed_cost,
        best: domestic_price - landed_cost * m.best,
    };

    let messages = [
        MarginAdvisory::for_quantity(quantity),
        MarginAdvisory::for_category_type(category_type),
    ]
    .into_iter()
    .flatten()
    .map(MarginMessage::from)
    .collect();

    tracing::debug!(?category_type, landed_cost, domestic_price, "margin scenarios computed");

    MarginAnalysis {
        domestic_price,
        scenarios,
        category_type,
        messages,
    }
}
