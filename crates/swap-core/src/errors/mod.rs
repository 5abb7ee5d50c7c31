//! Error handling for SWAP.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod label_error;
pub mod record_error;
pub mod refiner_error;

pub use config_error::ConfigError;
pub use error_code::SwapErrorCode;
pub use label_error::LabelError;
pub use record_error::RecordError;
pub use refiner_error::RefinerError;

/// Top-level error aggregating every subsystem error via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum SwapError {
    #[error("label error: {0}")]
    Label(#[from] LabelError),

    #[error("record error: {0}")]
    Record(#[from] RecordError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("offline refinement error: {0}")]
    Refiner(#[from] RefinerError),
}

impl SwapErrorCode for SwapError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Label(e) => e.error_code(),
            Self::Record(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Refiner(e) => e.error_code(),
        }
    }
}

/// Convenience alias used across the workspace.
pub type SwapResult<T> = Result<T, SwapError>;
