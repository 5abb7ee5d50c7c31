//! Append-only audit records kept by agents and subjects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::label::Verdict;

/// One classification as seen from the labeler's side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub subject_id: String,
    pub said: Verdict,
    /// Information (bits) this verdict carried about the subject.
    pub information: f64,
    /// Agent skill immediately after the observation.
    pub skill: f64,
    pub at: Option<DateTime<Utc>>,
}

/// One classification as seen from the subject's side. Marker positions
/// are carried for external collaborators and never interpreted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub agent: String,
    pub said: Verdict,
    pub pl: f64,
    pub pd: f64,
    pub at_x: Vec<f64>,
    pub at_y: Vec<f64>,
}
