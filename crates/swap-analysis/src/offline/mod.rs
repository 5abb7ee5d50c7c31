//! Offline refinement: an Expectation-Maximization pass over every verdict
//! seen in a batch, jointly re-estimating labeler reliabilities and subject
//! probabilities.

pub mod apply;
pub mod em;
pub mod ledger;

pub use apply::{apply_refinement, OfflineSummary};
pub use em::{AgentEstimate, EmOutcome, EmRefiner, EmState, IterationRecord};
pub use ledger::{AnchorRole, OfflineLedger};
