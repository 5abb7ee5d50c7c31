use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use swap_core::config::{DecisionConfig, SubjectConfig};
use swap_core::{
    Annotation, Category, Classification, SubjectKind, SubjectState, SubjectStatus, Truth,
};

/// Probability model for one subject.
///
/// The probability is carried as `max(R, 1)` parallel realizations, each
/// updated with independently sampled agent reliabilities, so that the
/// spread across realizations reflects uncertainty in the agents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub zoo_id: Option<String>,
    pub category: Category,
    pub kind: SubjectKind,
    pub flavor: String,
    pub truth: Truth,
    pub location: Option<String>,

    /// Configured realization count R. 0 means one deterministic channel.
    pub realizations: usize,
    pub pmin: f64,
    pub probability: Vec<f64>,
    pub mean_probability: f64,
    pub median_probability: f64,
    /// Every probability vector this subject has had, oldest first.
    pub trajectory: Vec<Vec<f64>>,
    #[serde(default)]
    pub online_mean_probability: Option<f64>,
    #[serde(default)]
    pub online_median_probability: Option<f64>,

    pub exposure: u64,
    pub state: SubjectState,
    pub status: SubjectStatus,
    pub retirement_time: Option<DateTime<Utc>>,
    pub retirement_age: Option<u64>,

    pub detection_threshold: f64,
    pub rejection_threshold: f64,

    pub annotations: Vec<Annotation>,
}

impl Subject {
    /// A fresh subject at the prior. Category and truth follow from `kind`.
    pub fn new(
        id: impl Into<String>,
        kind: SubjectKind,
        subject: &SubjectConfig,
        decision: &DecisionConfig,
    ) -> Self {
        let width = subject.width();
        let probability = vec![subject.prior; width];
        Self {
            id: id.into(),
            zoo_id: None,
            category: kind.category(),
            kind,
            flavor: String::new(),
            truth: kind.truth(),
            location: None,
            realizations: subject.realizations,
            pmin: subject.pmin,
            mean_probability: subject.prior,
            median_probability: subject.prior,
            trajectory: vec![probability.clone()],
            probability,
            online_mean_probability: None,
            online_median_probability: None,
            exposure: 0,
            state: SubjectState::Active,
            status: SubjectStatus::Undecided,
            retirement_time: None,
            retirement_age: None,
            detection_threshold: decision.detection_threshold,
            rejection_threshold: decision.rejection_threshold,
            annotations: Vec::new(),
        }
    }

    /// A fresh subject described by the first classification that names it.
    pub fn from_classification(
        c: &Classification,
        subject: &SubjectConfig,
        decision: &DecisionConfig,
    ) -> Self {
        let mut s = Self::new(c.subject_id.clone(), c.kind, subject, decision);
        s.zoo_id = c.zoo_id.clone();
        s.flavor = c.flavor.clone();
        s.location = c.location.clone();
        s
    }

    pub fn is_anchor(&self) -> bool {
        self.kind.is_anchor()
    }

    pub fn is_active(&self) -> bool {
        self.state == SubjectState::Active
    }

    /// Number of probability vectors in the trajectory, including the prior.
    pub fn trajectory_len(&self) -> usize {
        self.trajectory.len()
    }
}
