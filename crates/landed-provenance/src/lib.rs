//! Input provenance for landed cost reports
//!
//! Tracks where each critical input came from, classifies what extraction
//! managed to read, supplies category-driven draft defaults and resolves the
//! unit weight used for costing.

pub mod draft;
pub mod extraction;
pub mod field_status;
pub mod input_status;
pub mod weight;

pub use draft::{
    create_default_draft_inference, merge_draft_inference, resolve_draft, ProductFamily,
    DEFAULT_CASE_PACK_CONFIDENCE, DEFAULT_WEIGHT_CONFIDENCE, PRODUCT_FAMILIES,
};
pub use extraction::{get_extraction_statuses, ExtractionStatus, ExtractionStatuses};
pub use field_status::{FieldSource, FieldState, FieldStatus, FieldTransition, FieldValue, InputField};
pub use input_status::{compute_input_status, get_unit_weight_state, InputStatusStructure};
pub use weight::{resolve_effective_weight, EffectiveWeight, WeightProvenance};
