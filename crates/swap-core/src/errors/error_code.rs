//! SwapErrorCode trait for structured error reporting.

/// Every error enum implements this to provide a stable, machine-readable
/// code string alongside its human-readable message.
pub trait SwapErrorCode {
    /// Returns the error code string (e.g., "INVALID_LABEL").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const INVALID_LABEL: &str = "INVALID_LABEL";
pub const INVALID_RECORD: &str = "INVALID_RECORD";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const REFINER_ERROR: &str = "REFINER_ERROR";
