//! Draft inference envelopes
//!
//! Every inferred or defaulted field travels in a [`DraftFieldValue`] so its
//! confidence and origin stay attached to the value.

use serde::{Deserialize, Serialize};

/// Where a draft value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DraftSource {
    #[default]
    Default,
    Vision,
    Gemini,
    Database,
    UserInput,
}

impl DraftSource {
    /// Sources produced by a model looking at the product
    pub fn is_inferred(&self) -> bool {
        matches!(self, DraftSource::Vision | DraftSource::Gemini | DraftSource::Database)
    }
}

/// Uniform envelope for any inferred or defaulted field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftFieldValue<T> {
    pub value: Option<T>,
    /// 0-100
    pub confidence: u8,
    #[serde(default)]
    pub evidence_snippet: String,
    #[serde(default)]
    pub source: DraftSource,
}

impl<T> DraftFieldValue<T> {
    /// Null value, zero confidence, DEFAULT source
    pub fn empty() -> Self {
        Self {
            value: None,
            confidence: 0,
            evidence_snippet: String::new(),
            source: DraftSource::Default,
        }
    }

    pub fn new(value: T, confidence: u8, source: DraftSource) -> Self {
        Self {
            value: Some(value),
            confidence: confidence.min(100),
            evidence_snippet: String::new(),
            source,
        }
    }

    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.evidence_snippet = snippet.into();
        self
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }
}

impl<T> Default for DraftFieldValue<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Label fields read (or guessed) from the packaging
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelDraft {
    pub origin: DraftFieldValue<String>,
    pub weight: DraftFieldValue<String>,
    pub allergens: DraftFieldValue<Vec<String>>,
    pub brand: DraftFieldValue<String>,
    pub name: DraftFieldValue<String>,
}

/// All draft groups for one report
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftInference {
    pub label_draft: LabelDraft,
    pub barcode_draft: DraftFieldValue<String>,
    /// Unit weight in grams
    pub weight_draft: DraftFieldValue<f64>,
    /// Candidate units per case
    pub case_pack_draft: DraftFieldValue<Vec<u32>>,
    pub customs_category_draft: DraftFieldValue<String>,
    pub hs_candidates_draft: DraftFieldValue<Vec<String>>,
}

/// Per-field label overrides
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelDraftOverrides {
    pub origin: Option<DraftFieldValue<String>>,
    pub weight: Option<DraftFieldValue<String>>,
    pub allergens: Option<DraftFieldValue<Vec<String>>>,
    pub brand: Option<DraftFieldValue<String>>,
    pub name: Option<DraftFieldValue<String>>,
}

/// Partial draft coming from extraction, layered over the defaults
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftOverrides {
    pub label_draft: Option<LabelDraftOverrides>,
    pub barcode_draft: Option<DraftFieldValue<String>>,
    pub weight_draft: Option<DraftFieldValue<f64>>,
    pub case_pack_draft: Option<DraftFieldValue<Vec<u32>>>,
    pub customs_category_draft: Option<DraftFieldValue<String>>,
    pub hs_candidates_draft: Option<DraftFieldValue<Vec<String>>>,
}
