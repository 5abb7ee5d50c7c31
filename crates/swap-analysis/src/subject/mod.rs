//! Subjects: one per item, carrying the posterior probability of a lens.

pub mod decision;
pub mod types;
pub mod update;

pub use types::Subject;
pub use update::{Description, Incorporation};
