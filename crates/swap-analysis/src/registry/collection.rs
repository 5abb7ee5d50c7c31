use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use swap_core::constants::MAX_SHORTLIST;
use swap_core::types::collections::FxHashMap;
use swap_core::{Classification, SubjectKind, SubjectState, SubjectStatus, SwapConfig};

use crate::subject::Subject;

/// All subjects, keyed by subject id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Collection {
    members: FxHashMap<String, Subject>,
}

/// Head counts over the collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Census {
    pub total: usize,
    pub sims: usize,
    pub duds: usize,
    pub tests: usize,
    pub retired: usize,
    pub detected: usize,
    pub rejected: usize,
    pub undecided: usize,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the subject named by `c`, creating it at the prior if this is
    /// its first classification.
    pub fn get_or_create(&mut self, c: &Classification, config: &SwapConfig) -> &mut Subject {
        if !self.members.contains_key(&c.subject_id) {
            tracing::debug!(subject = %c.subject_id, kind = %c.kind, "new subject");
        }
        self.members
            .entry(c.subject_id.clone())
            .or_insert_with(|| Subject::from_classification(c, &config.subject, &config.decision))
    }

    pub fn insert(&mut self, subject: Subject) -> Option<Subject> {
        self.members.insert(subject.id.clone(), subject)
    }

    pub fn get(&self, id: &str) -> Option<&Subject> {
        self.members.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Subject> {
        self.members.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.members.contains_key(id)
    }

    /// Subject ids, sorted.
    pub fn list(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.members.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn remove(&mut self, id: &str) -> Option<Subject> {
        self.members.remove(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Subject)> {
        self.members.iter()
    }

    /// Mean probabilities of every subject of `kind`, sorted by subject id.
    pub fn probabilities(&self, kind: SubjectKind) -> Vec<(String, f64)> {
        let mut out: Vec<(String, f64)> = self
            .members
            .values()
            .filter(|s| s.kind == kind)
            .map(|s| (s.id.clone(), s.mean_probability))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    pub fn census(&self) -> Census {
        let mut census = Census {
            total: self.members.len(),
            ..Default::default()
        };
        for s in self.members.values() {
            match s.kind {
                SubjectKind::Sim => census.sims += 1,
                SubjectKind::Dud => census.duds += 1,
                SubjectKind::Test => census.tests += 1,
            }
            if s.state == SubjectState::Inactive {
                census.retired += 1;
            }
            match s.status {
                SubjectStatus::Detected => census.detected += 1,
                SubjectStatus::Rejected => census.rejected += 1,
                SubjectStatus::Undecided => census.undecided += 1,
            }
        }
        census
    }

    /// Up to `n` random ids of subjects of `kind` with `status`, sorted.
    /// Never more than [`MAX_SHORTLIST`].
    pub fn shortlist<R: Rng + ?Sized>(
        &self,
        n: usize,
        kind: SubjectKind,
        status: SubjectStatus,
        rng: &mut R,
    ) -> Vec<String> {
        let mut pool: Vec<&String> = self
            .members
            .values()
            .filter(|s| s.kind == kind && s.status == status)
            .map(|s| &s.id)
            .collect();
        pool.sort();

        let take = n.min(MAX_SHORTLIST);
        let mut picked: Vec<String> = pool.choose_multiple(rng, take).map(|id| (*id).clone()).collect();
        picked.sort();
        picked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use swap_core::{Category, Truth, Verdict};

    fn classification(id: &str, kind: SubjectKind) -> Classification {
        Classification {
            timestamp: Utc::now(),
            labeler: "alice".to_string(),
            subject_id: id.to_string(),
            zoo_id: Some(format!("{id}z")),
            category: kind.category(),
            kind,
            flavor: String::new(),
            said: Verdict::Lens,
            truth: kind.truth(),
            location: Some(format!("http://images/{id}.png")),
            stage: "1".to_string(),
            at_x: vec![],
            at_y: vec![],
        }
    }

    #[test]
    fn test_get_or_create_copies_descriptive_fields() {
        let mut collection = Collection::new();
        let config = SwapConfig::default();
        let s = collection.get_or_create(&classification("ASW1", SubjectKind::Sim), &config);
        assert_eq!(s.category, Category::Training);
        assert_eq!(s.truth, Truth::Lens);
        assert_eq!(s.zoo_id.as_deref(), Some("ASW1z"));
        assert_eq!(s.mean_probability, config.subject.prior);

        collection.get_or_create(&classification("ASW1", SubjectKind::Sim), &config);
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_census_and_probabilities() {
        let mut collection = Collection::new();
        let config = SwapConfig::default();
        for (id, kind) in [
            ("a", SubjectKind::Sim),
            ("b", SubjectKind::Dud),
            ("c", SubjectKind::Test),
            ("d", SubjectKind::Test),
        ] {
            collection.get_or_create(&classification(id, kind), &config);
        }
        let census = collection.census();
        assert_eq!((census.total, census.sims, census.duds, census.tests), (4, 1, 1, 2));
        assert_eq!(census.undecided, 4);

        let tests = collection.probabilities(SubjectKind::Test);
        assert_eq!(tests.len(), 2);
        assert_eq!(tests[0].0, "c");
    }

    #[test]
    fn test_shortlist_is_filtered_sorted_and_seeded() {
        let mut collection = Collection::new();
        let config = SwapConfig::default();
        for i in 0..20 {
            collection.get_or_create(&classification(&format!("T{i:02}"), SubjectKind::Test), &config);
        }
        collection.get_or_create(&classification("S00", SubjectKind::Sim), &config);

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let picked = collection.shortlist(5, SubjectKind::Test, SubjectStatus::Undecided, &mut rng);
        assert_eq!(picked.len(), 5);
        assert!(picked.windows(2).all(|w| w[0] < w[1]));
        assert!(picked.iter().all(|id| id.starts_with('T')));

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let again = collection.shortlist(5, SubjectKind::Test, SubjectStatus::Undecided, &mut rng);
        assert_eq!(picked, again);

        let none = collection.shortlist(5, SubjectKind::Test, SubjectStatus::Detected, &mut rng);
        assert!(none.is_empty());
    }
}
