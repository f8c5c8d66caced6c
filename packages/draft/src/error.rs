use crate::dimensions::Dimension;
use thiserror::Error;

pub type DraftResult<T> = Result<T, DraftError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DraftError {
    #[error("Malformed draft input: {reason}")]
    MalformedInput { reason: String },

    #[error("{dimension} {value} is out of range (expected 1..={max})")]
    OutOfRange {
        dimension: Dimension,
        value: u32,
        max: u32,
    },

    #[error("Failed to serialize draft: {0}")]
    SerializationFailure(String),
}

impl DraftError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            reason: reason.into(),
        }
    }

    pub fn out_of_range(dimension: Dimension, value: u32, max: u32) -> Self {
        Self::OutOfRange {
            dimension,
            value,
            max,
        }
    }

    /// Malformed input scoped to a named section
    pub fn malformed_section(section: &str, reason: impl std::fmt::Display) -> Self {
        Self::MalformedInput {
            reason: format!("section '{}': {}", section, reason),
        }
    }
}

impl From<serde_json::Error> for DraftError {
    fn from(e: serde_json::Error) -> Self {
        DraftError::malformed(e.to_string())
    }
}
