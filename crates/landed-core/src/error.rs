//! Unified Error Model
//!
//! The estimation functions are total and never return these. Errors only
//! surface while loading configuration or when a caller asks for an explicit
//! field transition the lifecycle forbids.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LandedError {
    #[error("CONFIG/{0}")]
    Config(String),

    #[error("PROFILE/{0}")]
    Profile(#[from] serde_yaml::Error),

    #[error("IO/{0}")]
    Io(#[from] std::io::Error),

    #[error("SERIALIZE/{0}")]
    Serialize(#[from] serde_json::Error),

    #[error("TRANSITION/{field}: {from} -> {to} ({reason})")]
    Transition {
        field: String,
        from: String,
        to: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, LandedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_display() {
        let err = LandedError::Transition {
            field: "unitWeight".to_string(),
            from: "failed".to_string(),
            to: "confirmed".to_string(),
            reason: "ocr cannot confirm a failed field".to_string(),
        };
        let text = err.to_string();
        assert!(text.starts_with("TRANSITION/unitWeight"));
        assert!(text.contains("failed -> confirmed"));
    }

    #[test]
    fn test_yaml_error_converts() {
        let parsed: std::result::Result<Vec<u32>, _> = serde_yaml::from_str("{not: [a list");
        let err: LandedError = parsed.unwrap_err().into();
        assert!(err.to_string().starts_with("PROFILE/"));
    }
}
