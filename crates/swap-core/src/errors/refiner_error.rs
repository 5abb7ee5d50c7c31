//! Offline (EM) refinement errors.

use super::error_code::{self, SwapErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum RefinerError {
    #[error("offline ledger is empty: no classifications were recorded this batch")]
    EmptyLedger,

    #[error("invalid iteration bounds: min {n_min} exceeds max {n_max}")]
    InvalidBounds { n_min: usize, n_max: usize },
}

impl SwapErrorCode for RefinerError {
    fn error_code(&self) -> &'static str {
        error_code::REFINER_ERROR
    }
}
