use serde::{Deserialize, Serialize};

use swap_core::{SubjectKind, SubjectState, SubjectStatus};

use crate::registry::Collection;
use crate::subject::Subject;

/// One row of a subject catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub zoo_id: Option<String>,
    pub kind: SubjectKind,
    pub flavor: String,
    pub mean_probability: f64,
    pub median_probability: f64,
    pub exposure: u64,
    pub status: SubjectStatus,
    pub state: SubjectState,
    pub location: Option<String>,
}

impl From<&Subject> for CatalogEntry {
    fn from(s: &Subject) -> Self {
        Self {
            id: s.id.clone(),
            zoo_id: s.zoo_id.clone(),
            kind: s.kind,
            flavor: s.flavor.clone(),
            mean_probability: s.mean_probability,
            median_probability: s.median_probability,
            exposure: s.exposure,
            status: s.status,
            state: s.state,
            location: s.location.clone(),
        }
    }
}

/// Subjects of one kind that have not been ruled out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub kind: SubjectKind,
    /// Sorted by mean probability, highest first.
    pub entries: Vec<CatalogEntry>,
    /// Number of subjects of this kind, selected or not.
    pub total: usize,
}

impl Catalog {
    /// Every subject of `kind` with mean probability above its rejection
    /// threshold.
    pub fn build(collection: &Collection, kind: SubjectKind) -> Self {
        let mut total = 0;
        let mut entries = Vec::new();
        for (_, s) in collection.iter().filter(|(_, s)| s.kind == kind) {
            total += 1;
            if s.mean_probability > s.rejection_threshold {
                entries.push(CatalogEntry::from(s));
            }
        }
        entries.sort_by(|a, b| {
            b.mean_probability
                .total_cmp(&a.mean_probability)
                .then_with(|| a.id.cmp(&b.id))
        });
        Self {
            kind,
            entries,
            total,
        }
    }

    pub fn selected(&self) -> usize {
        self.entries.len()
    }
}
