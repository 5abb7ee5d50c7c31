//! # swap-analysis
//!
//! Online Bayesian aggregation of crowd-sourced binary labels: agent reliability → subject update → decision policy.
//! Optional offline EM pass that jointly re-estimates every reliability and probability.

pub mod agent;
pub mod information;
pub mod offline;
pub mod online;
pub mod registry;
pub mod reporting;
pub mod simulation;
pub mod subject;

pub use agent::{Agent, Observation};
pub use offline::{AnchorRole, EmOutcome, EmRefiner, OfflineLedger, OfflineSummary};
pub use online::{BatchReport, BatchWindow, LearningPolicy, OnlineEngine, SupervisionMode};
pub use registry::{Bureau, Census, Collection};
pub use subject::{Description, Incorporation, Subject};
