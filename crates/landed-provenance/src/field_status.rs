//! Per-field provenance state machine
//!
//! ```text
//! missing ──► uploaded ──► confirmed
//!    │            │            ▲
//!    └────► failed ───────────-┘  (manual / user_input only)
//! ```

use landed_core::{LandedError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of one input field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldState {
    #[default]
    Missing,
    Uploaded,
    Failed,
    Confirmed,
}

impl fmt::Display for FieldState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FieldState::Missing => write!(f, "missing"),
            FieldState::Uploaded => write!(f, "uploaded"),
            FieldState::Failed => write!(f, "failed"),
            FieldState::Confirmed => write!(f, "confirmed"),
        }
    }
}

/// Who supplied the current value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FieldSource {
    #[default]
    None,
    UserInput,
    Ocr,
    Manual,
}

impl FieldSource {
    /// Sources allowed to confirm a field that previously failed
    pub fn is_human(&self) -> bool {
        matches!(self, FieldSource::UserInput | FieldSource::Manual)
    }
}

impl fmt::Display for FieldSource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FieldSource::None => write!(f, "none"),
            FieldSource::UserInput => write!(f, "user_input"),
            FieldSource::Ocr => write!(f, "ocr"),
            FieldSource::Manual => write!(f, "manual"),
        }
    }
}

/// Value carried by a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

/// The named fields of an input status snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputField {
    ProductPhoto,
    Barcode,
    Label,
    UnitWeight,
    CasePack,
}

impl InputField {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputField::ProductPhoto => "productPhoto",
            InputField::Barcode => "barcode",
            InputField::Label => "label",
            InputField::UnitWeight => "unitWeight",
            InputField::CasePack => "casePack",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A requested state change
#[derive(Debug, Clone, PartialEq)]
pub enum FieldTransition {
    Upload {
        value: Option<FieldValue>,
        source: FieldSource,
    },
    Fail {
        reason: String,
    },
    Confirm {
        value: Option<FieldValue>,
        source: FieldSource,
    },
}

impl FieldTransition {
    fn target(&self) -> FieldState {
        match self {
            FieldTransition::Upload { .. } => FieldState::Uploaded,
            FieldTransition::Fail { .. } => FieldState::Failed,
            FieldTransition::Confirm { .. } => FieldState::Confirmed,
        }
    }
}

/// Provenance of a single input field
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldStatus {
    pub state: FieldState,
    pub source: FieldSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

impl FieldStatus {
    pub fn missing() -> Self {
        Self::default()
    }

    pub fn is_missing(&self) -> bool {
        self.state == FieldState::Missing
    }

    pub fn is_confirmed(&self) -> bool {
        self.state == FieldState::Confirmed
    }

    pub fn is_failed(&self) -> bool {
        self.state == FieldState::Failed
    }

    /// Apply a transition, returning the new status.
    ///
    /// The current status is never modified. A field that failed can only be
    /// confirmed by a human source; OCR alone cannot resurrect it.
    pub fn apply(&self, field: InputField, transition: FieldTransition) -> Result<FieldStatus> {
        let to = transition.target();
        let reject = |reason: &str| LandedError::Transition {
            field: field.to_string(),
            from: self.state.to_string(),
            to: to.to_string(),
            reason: reason.to_string(),
        };

        match (self.state, transition) {
            (FieldState::Missing | FieldState::Uploaded, FieldTransition::Upload { value, source }) => {
                Ok(FieldStatus { state: FieldState::Uploaded, source, value, failure_reason: None })
            }
            (FieldState::Missing | FieldState::Uploaded, FieldTransition::Fail { reason }) => {
                Ok(FieldStatus {
                    state: FieldState::Failed,
                    source: self.source,
                    value: None,
                    failure_reason: Some(reason),
                })
            }
            (FieldState::Failed, FieldTransition::Confirm { source, .. }) if !source.is_human() => {
                Err(reject("only manual entry or user input can confirm a failed field"))
            }
            (_, FieldTransition::Confirm { source: FieldSource::None, .. }) => {
                Err(reject("a confirmed field needs a source"))
            }
            (_, FieldTransition::Confirm { value, source }) => {
                Ok(FieldStatus { state: FieldState::Confirmed, source, value, failure_reason: None })
            }
            (FieldState::Failed, FieldTransition::Fail { reason }) => Ok(FieldStatus {
                failure_reason: Some(reason),
                ..self.clone()
            }),
            (FieldState::Failed, FieldTransition::Upload { .. }) => {
                Err(reject("a failed field must be re-entered, not re-uploaded"))
            }
            (FieldState::Confirmed, _) => Err(reject("confirmed fields only accept a new confirmation")),
        }
    }
}
