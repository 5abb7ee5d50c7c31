//! The normalized classification record handed over by ingestion, and its
//! typed form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::label::{Truth, Verdict};
use super::subject_kind::{Category, SubjectKind};
use crate::errors::RecordError;

/// A classification as delivered by the ingestion collaborator. All
/// vocabulary fields are still strings; see [`ClassificationRecord::normalize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    pub timestamp: DateTime<Utc>,
    /// Labeler identity (user id, or IP address for anonymous users).
    pub labeler: String,
    /// Subject id. Tutorial and junk records arrive without one.
    pub subject_id: Option<String>,
    /// Secondary (Zooniverse) id of the subject.
    #[serde(default)]
    pub zoo_id: Option<String>,
    pub category: String,
    pub kind: String,
    #[serde(default)]
    pub flavor: String,
    /// Stated label: `LENS` or `NOT`.
    pub result: String,
    /// Ground truth: `LENS`, `NOT` or `UNKNOWN`.
    pub truth: String,
    #[serde(default)]
    pub location: Option<String>,
    pub stage: String,
    #[serde(default)]
    pub at_x: Vec<f64>,
    #[serde(default)]
    pub at_y: Vec<f64>,
}

/// A classification with every vocabulary field parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub timestamp: DateTime<Utc>,
    pub labeler: String,
    pub subject_id: String,
    pub zoo_id: Option<String>,
    pub category: Category,
    pub kind: SubjectKind,
    pub flavor: String,
    pub said: Verdict,
    pub truth: Truth,
    pub location: Option<String>,
    pub stage: String,
    pub at_x: Vec<f64>,
    pub at_y: Vec<f64>,
}

impl ClassificationRecord {
    /// Parse the record into a [`Classification`].
    ///
    /// Returns `Ok(None)` when there is nothing to digest (no subject
    /// linkage). Vocabulary violations are errors.
    pub fn normalize(&self) -> Result<Option<Classification>, RecordError> {
        let Some(subject_id) = self.subject_id.as_ref().filter(|id| !id.is_empty()) else {
            return Ok(None);
        };

        let category: Category = self.category.parse()?;
        let kind: SubjectKind = self.kind.parse()?;
        let said: Verdict = self.result.parse()?;
        let truth: Truth = self.truth.parse()?;

        if kind.category() != category {
            return Err(RecordError::KindCategoryMismatch {
                subject_id: subject_id.clone(),
                kind: kind.to_string(),
                category: category.to_string(),
            });
        }
        if kind.truth() != truth {
            return Err(RecordError::TruthMismatch {
                subject_id: subject_id.clone(),
                kind: kind.to_string(),
                truth: truth.to_string(),
            });
        }

        Ok(Some(Classification {
            timestamp: self.timestamp,
            labeler: self.labeler.clone(),
            subject_id: subject_id.clone(),
            zoo_id: self.zoo_id.clone(),
            category,
            kind,
            flavor: self.flavor.clone(),
            said,
            truth,
            location: self.location.clone(),
            stage: self.stage.clone(),
            at_x: self.at_x.clone(),
            at_y: self.at_y.clone(),
        }))
    }
}
