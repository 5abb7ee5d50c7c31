//! # swap-core
//!
//! Foundation crate for the SWAP label aggregation engine.
//! Defines types, traits, errors, config, tracing, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod traits;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::SwapConfig;
pub use errors::{SwapError, SwapResult};
pub use traits::ReliabilitySource;
pub use types::{
    Annotation, Category, Classification, ClassificationRecord, HistoryEntry, SubjectKind,
    SubjectState, SubjectStatus, Truth, Verdict,
};
