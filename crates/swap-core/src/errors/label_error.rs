//! Labeled-domain errors.

use super::error_code::{self, SwapErrorCode};

/// A value fell outside one of the closed vocabularies of the data model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LabelError {
    #[error("unrecognised classification result: {value}")]
    InvalidLabel { value: String },

    #[error("unrecognised ground truth: {value}")]
    InvalidTruth { value: String },

    #[error("unrecognised subject category: {value}")]
    InvalidCategory { value: String },

    #[error("unrecognised subject kind: {value}")]
    InvalidKind { value: String },
}

impl SwapErrorCode for LabelError {
    fn error_code(&self) -> &'static str {
        error_code::INVALID_LABEL
    }
}
