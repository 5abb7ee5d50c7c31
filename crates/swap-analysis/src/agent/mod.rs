//! Agents: one per labeler, carrying a confusion matrix (PL, PD) learned
//! from the labeler's history.

pub mod sampling;
pub mod types;

pub use types::{Agent, Observation};
