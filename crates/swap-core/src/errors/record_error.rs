//! Errors raised while normalizing an incoming classification record.

use super::error_code::{self, SwapErrorCode};
use super::LabelError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("{0}")]
    Label(#[from] LabelError),

    #[error("invalid timestamp {value}: {message}")]
    InvalidTimestamp { value: String, message: String },

    #[error("subject {subject_id} is a {kind} but was filed under {category}")]
    KindCategoryMismatch {
        subject_id: String,
        kind: String,
        category: String,
    },

    #[error("subject {subject_id} is a {kind} but its truth was given as {truth}")]
    TruthMismatch {
        subject_id: String,
        kind: String,
        truth: String,
    },
}

impl SwapErrorCode for RecordError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Label(e) => e.error_code(),
            _ => error_code::INVALID_RECORD,
        }
    }
}
