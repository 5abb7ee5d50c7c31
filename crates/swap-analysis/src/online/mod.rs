//! The online stage: one classification at a time, in timestamp order.

pub mod engine;
pub mod policy;
pub mod report;

pub use engine::{BatchWindow, OnlineEngine};
pub use policy::{may_learn, LearningPolicy, SupervisionMode};
pub use report::BatchReport;
