use serde::{Deserialize, Serialize};

use swap_core::{SubjectKind, SubjectState, SubjectStatus};

use crate::registry::Collection;
use crate::subject::Subject;

/// Named subsets of the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// Test subjects that have been retired.
    RetiredSubject,
    /// Test subjects currently above the detection threshold.
    Candidate,
    /// Sims that were detected.
    TruePositive,
    /// Duds that were detected.
    FalsePositive,
    /// Sims that were rejected.
    FalseNegative,
}

impl Selection {
    pub const ALL: [Selection; 5] = [
        Self::RetiredSubject,
        Self::Candidate,
        Self::TruePositive,
        Self::FalsePositive,
        Self::FalseNegative,
    ];

    pub fn matches(&self, s: &Subject) -> bool {
        match self {
            Self::RetiredSubject => s.kind == SubjectKind::Test && s.state == SubjectState::Inactive,
            Self::Candidate => s.kind == SubjectKind::Test && s.status == SubjectStatus::Detected,
            Self::TruePositive => s.kind == SubjectKind::Sim && s.status == SubjectStatus::Detected,
            Self::FalsePositive => s.kind == SubjectKind::Dud && s.status == SubjectStatus::Detected,
            Self::FalseNegative => s.kind == SubjectKind::Sim && s.status == SubjectStatus::Rejected,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::RetiredSubject => "retired_subject",
            Self::Candidate => "candidate",
            Self::TruePositive => "true_positive",
            Self::FalsePositive => "false_positive",
            Self::FalseNegative => "false_negative",
        }
    }
}

/// Ids of every subject in `selection`, sorted.
pub fn select(collection: &Collection, selection: Selection) -> Vec<String> {
    let mut ids: Vec<String> = collection
        .iter()
        .filter(|(_, s)| selection.matches(s))
        .map(|(id, _)| id.clone())
        .collect();
    ids.sort();
    ids
}
