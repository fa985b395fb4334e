//! Category-driven draft defaults and override merging

use landed_core::{
    DraftFieldValue, DraftInference, DraftOverrides, DraftSource, KeywordEntry, KeywordTable, LabelDraft,
};
use serde::{Deserialize, Serialize};

/// Confidence attached to a category-default unit weight
pub const DEFAULT_WEIGHT_CONFIDENCE: u8 = 20;
/// Confidence attached to category-default case packs
pub const DEFAULT_CASE_PACK_CONFIDENCE: u8 = 15;

/// Product families with known packaging conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductFamily {
    Confectionery,
    Beverages,
    Snacks,
    Sauces,
    Noodles,
    PersonalCare,
    Household,
}

impl ProductFamily {
    /// Typical unit weight in grams
    pub fn unit_weight_grams(&self) -> f64 {
        match self {
            ProductFamily::Confectionery => 25.0,
            ProductFamily::Beverages => 250.0,
            ProductFamily::Snacks => 60.0,
            ProductFamily::Sauces => 300.0,
            ProductFamily::Noodles => 100.0,
            ProductFamily::PersonalCare => 150.0,
            ProductFamily::Household => 500.0,
        }
    }

    /// Common units per case, smallest first
    pub fn case_packs(&self) -> &'static [u32] {
        match self {
            ProductFamily::Confectionery => &[120, 240, 480],
            ProductFamily::Beverages => &[24, 30, 48],
            ProductFamily::Snacks => &[48, 96, 144],
            ProductFamily::Sauces => &[12, 24],
            ProductFamily::Noodles => &[24, 30, 40],
            ProductFamily::PersonalCare => &[24, 48, 72],
            ProductFamily::Household => &[12, 24],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductFamily::Confectionery => "confectionery",
            ProductFamily::Beverages => "beverages",
            ProductFamily::Snacks => "snacks",
            ProductFamily::Sauces => "sauces",
            ProductFamily::Noodles => "noodles",
            ProductFamily::PersonalCare => "personal care",
            ProductFamily::Household => "household",
        }
    }
}

const PRODUCT_FAMILY_ENTRIES: &[KeywordEntry<ProductFamily>] = &[
    KeywordEntry {
        family: ProductFamily::Confectionery,
        keywords: &[
            "candy", "candies", "confectionery", "chocolate", "gum", "lollipop", "gummy",
            "gummies", "sweets", "marshmallow", "toffee", "mint",
        ],
    },
    KeywordEntry {
        family: ProductFamily::Beverages,
        keywords: &[
            "beverage", "drink", "juice", "soda", "tea", "coffee", "water", "milk tea",
            "energy drink", "soft drink",
        ],
    },
    KeywordEntry {
        family: ProductFamily::Snacks,
        keywords: &[
            "snack", "chip", "crisp", "cracker", "biscuit", "cookie", "popcorn", "pretzel",
            "rice cracker",
        ],
    },
    KeywordEntry {
        family: ProductFamily::Sauces,
        keywords: &[
            "sauce", "condiment", "ketchup", "dressing", "paste", "seasoning", "soy sauce",
            "vinegar",
        ],
    },
    KeywordEntry {
        family: ProductFamily::Noodles,
        keywords: &["noodle", "ramen", "udon", "soba", "pasta", "vermicelli", "instant noodle"],
    },
    KeywordEntry {
        family: ProductFamily::PersonalCare,
        keywords: &[
            "cosmetic", "skincare", "skin care", "shampoo", "soap", "lotion", "toothpaste",
            "personal care",
        ],
    },
    KeywordEntry {
        family: ProductFamily::Household,
        keywords: &["household", "cleaning", "detergent", "cleaner", "dish"],
    },
];

/// Keyword table for draft defaults
pub const PRODUCT_FAMILIES: KeywordTable<ProductFamily> = KeywordTable::new(PRODUCT_FAMILY_ENTRIES);

/// Build the default draft for a category.
///
/// Weight and case pack come from the product family table at low confidence.
/// Everything else, and both of those when nothing matches, is an empty
/// `DEFAULT` envelope.
pub fn create_default_draft_inference(category: Option<&str>) -> DraftInference {
    let mut draft = DraftInference::default();

    let Some(family) = category.and_then(|c| PRODUCT_FAMILIES.classify(c)).map(|m| m.family) else {
        return draft;
    };

    let snippet = format!("category default for {}", family.as_str());
    draft.weight_draft = DraftFieldValue::new(
        family.unit_weight_grams(),
        DEFAULT_WEIGHT_CONFIDENCE,
        DraftSource::Default,
    )
    .with_snippet(snippet.clone());
    draft.case_pack_draft = DraftFieldValue::new(
        family.case_packs().to_vec(),
        DEFAULT_CASE_PACK_CONFIDENCE,
        DraftSource::Default,
    )
    .with_snippet(snippet);

    tracing::debug!(?family, "draft defaults resolved");
    draft
}

/// Merge overrides into defaults.
///
/// `labelDraft` merges field by field. Every other group is replaced whole
/// whenever an override for it is present.
pub fn merge_draft_inference(defaults: &DraftInference, overrides: &DraftOverrides) -> DraftInference {
    let label_draft = match &overrides.label_draft {
        Some(label) => {
            let base = &defaults.label_draft;
            LabelDraft {
                origin: label.origin.clone().unwrap_or_else(|| base.origin.clone()),
                weight: label.weight.clone().unwrap_or_else(|| base.weight.clone()),
                allergens: label.allergens.clone().unwrap_or_else(|| base.allergens.clone()),
                brand: label.brand.clone().unwrap_or_else(|| base.brand.clone()),
                name: label.name.clone().unwrap_or_else(|| base.name.clone()),
            }
        }
        None => defaults.label_draft.clone(),
    };

    DraftInference {
        label_draft,
        barcode_draft: overrides
            .barcode_draft
            .clone()
            .unwrap_or_else(|| defaults.barcode_draft.clone()),
        weight_draft: overrides
            .weight_draft
            .clone()
            .unwrap_or_else(|| defaults.weight_draft.clone()),
        case_pack_draft: overrides
            .case_pack_draft
            .clone()
            .unwrap_or_else(|| defaults.case_pack_draft.clone()),
        customs_category_draft: overrides
            .customs_category_draft
            .clone()
            .unwrap_or_else(|| defaults.customs_category_draft.clone()),
        hs_candidates_draft: overrides
            .hs_candidates_draft
            .clone()
            .unwrap_or_else(|| defaults.hs_candidates_draft.clone()),
    }
}

/// Defaults for the snapshot's category with its overrides applied
pub fn resolve_draft(category: Option<&str>, overrides: Option<&DraftOverrides>) -> DraftInference {
    let defaults = create_default_draft_inference(category);
    match overrides {
        Some(overrides) => merge_draft_inference(&defaults, overrides),
        None => defaults,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use landed_core::LabelDraftOverrides;

    #[test]
    fn test_confectionery_defaults() {
        let draft = create_default_draft_inference(Some("Chocolate Candy"));
        assert_eq!(draft.weight_draft.value, Some(25.0));
        assert_eq!(draft.weight_draft.confidence, 20);
        assert_eq!(draft.weight_draft.source, DraftSource::Default);
        assert_eq!(draft.case_pack_draft.value, Some(vec![120, 240, 480]));
        assert_eq!(draft.case_pack_draft.confidence, 15);
        assert!(draft.weight_draft.evidence_snippet.contains("confectionery"));
    }

    #[test]
    fn test_beverage_defaults() {
        let draft = create_default_draft_inference(Some("Soft Drinks"));
        assert_eq!(draft.weight_draft.value, Some(250.0));
        assert_eq!(draft.case_pack_draft.value, Some(vec![24, 30, 48]));
    }

    #[test]
    fn test_other_fields_are_empty() {
        let draft = create_default_draft_inference(Some("candy"));
        assert!(!draft.barcode_draft.has_value());
        assert_eq!(draft.barcode_draft.confidence, 0);
        assert!(!draft.label_draft.origin.has_value());
        assert!(!draft.customs_category_draft.has_value());
        assert!(!draft.hs_candidates_draft.has_value());
    }

    #[test]
    fn test_unknown_category_has_no_defaults() {
        for category in [
            None,
            Some(""),
            Some("industrial valves"),
            Some("Pastel crayons"),
            Some("Waterproof jacket"),
            Some("Teaspoon set"),
            Some("Dishwasher tablets"),
        ] {
            let draft = create_default_draft_inference(category);
            assert!(!draft.weight_draft.has_value());
            assert!(!draft.case_pack_draft.has_value());
        }
    }

    #[test]
    fn test_label_merges_per_field() {
        let defaults = {
            let mut d = create_default_draft_inference(Some("candy"));
            d.label_draft.brand = DraftFieldValue::new("Acme".to_string(), 40, DraftSource::Vision);
            d
        };
        let overrides = DraftOverrides {
            label_draft: Some(LabelDraftOverrides {
                origin: Some(DraftFieldValue::new("Japan".to_string(), 90, DraftSource::UserInput)),
                ..Default::default()
            }),
            ..Default::default()
        };

        let merged = merge_draft_inference(&defaults, &overrides);
        assert_eq!(merged.label_draft.origin.value.as_deref(), Some("Japan"));
        assert_eq!(merged.label_draft.brand.value.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_other_groups_replace_whole() {
        let defaults = create_default_draft_inference(Some("candy"));
        let overrides = DraftOverrides {
            weight_draft: Some(DraftFieldValue {
                value: None,
                confidence: 70,
                evidence_snippet: String::new(),
                source: DraftSource::Vision,
            }),
            ..Default::default()
        };

        let merged = merge_draft_inference(&defaults, &overrides);
        // the default 25 g does not survive a group override, even a null one
        assert_eq!(merged.weight_draft.value, None);
        assert_eq!(merged.weight_draft.source, DraftSource::Vision);
        assert_eq!(merged.case_pack_draft, defaults.case_pack_draft);
    }

    #[test]
    fn test_resolve_without_overrides() {
        let draft = resolve_draft(Some("ramen"), None);
        assert_eq!(draft.weight_draft.value, Some(100.0));
    }
}
