use serde::{Deserialize, Serialize};

use swap_core::config::OfflineConfig;
use swap_core::types::collections::FxHashMap;
use swap_core::{Category, Classification, Verdict};

use crate::online::SupervisionMode;

/// How the EM pass treats a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorRole {
    /// Truth is given and used exactly.
    Known(Verdict),
    /// Probability is estimated.
    Estimated,
    /// Takes no part in the M-step or the prior.
    Excluded,
}

/// Everything the EM pass needs, collected while the online batch runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfflineLedger {
    pub initial_prior: f64,
    pub initial_pl: f64,
    pub initial_pd: f64,
    /// agent -> subject -> latest verdict.
    pub verdicts: FxHashMap<String, FxHashMap<String, Verdict>>,
    pub roles: FxHashMap<String, AnchorRole>,
}

impl OfflineLedger {
    pub fn new(config: &OfflineConfig) -> Self {
        Self {
            initial_prior: config.initial_prior,
            initial_pl: config.initial_pl,
            initial_pd: config.initial_pd,
            verdicts: FxHashMap::default(),
            roles: FxHashMap::default(),
        }
    }

    /// Record one classification. Training subjects are known anchors when
    /// the mode learns from training; test subjects are estimated when it
    /// learns from test. Everything else is excluded.
    pub fn record(&mut self, c: &Classification, mode: SupervisionMode) {
        let role = match c.category {
            Category::Training => match (mode.uses_training(), c.truth.as_verdict()) {
                (true, Some(truth)) => AnchorRole::Known(truth),
                _ => AnchorRole::Excluded,
            },
            Category::Test => {
                if mode.uses_test() {
                    AnchorRole::Estimated
                } else {
                    AnchorRole::Excluded
                }
            }
        };
        self.roles.insert(c.subject_id.clone(), role);
        self.verdicts
            .entry(c.labeler.clone())
            .or_default()
            .insert(c.subject_id.clone(), c.said);
    }

    pub fn role(&self, subject_id: &str) -> Option<AnchorRole> {
        self.roles.get(subject_id).copied()
    }

    pub fn agent_count(&self) -> usize {
        self.verdicts.len()
    }

    pub fn subject_count(&self) -> usize {
        self.roles.len()
    }

    pub fn verdict_count(&self) -> usize {
        self.verdicts.values().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use swap_core::SubjectKind;

    fn classification(labeler: &str, id: &str, kind: SubjectKind, said: Verdict) -> Classification {
        Classification {
            timestamp: Utc::now(),
            labeler: labeler.to_string(),
            subject_id: id.to_string(),
            zoo_id: None,
            category: kind.category(),
            kind,
            flavor: String::new(),
            said,
            truth: kind.truth(),
            location: None,
            stage: "1".to_string(),
            at_x: vec![],
            at_y: vec![],
        }
    }

    #[test]
    fn test_roles_follow_supervision_mode() {
        let sim = classification("a", "s1", SubjectKind::Sim, Verdict::Lens);
        let dud = classification("a", "d1", SubjectKind::Dud, Verdict::Not);
        let test = classification("a", "t1", SubjectKind::Test, Verdict::Lens);

        let mut ledger = OfflineLedger::new(&OfflineConfig::default());
        for c in [&sim, &dud, &test] {
            ledger.record(c, SupervisionMode::Supervised);
        }
        assert_eq!(ledger.role("s1"), Some(AnchorRole::Known(Verdict::Lens)));
        assert_eq!(ledger.role("d1"), Some(AnchorRole::Known(Verdict::Not)));
        assert_eq!(ledger.role("t1"), Some(AnchorRole::Excluded));

        let mut ledger = OfflineLedger::new(&OfflineConfig::default());
        for c in [&sim, &test] {
            ledger.record(c, SupervisionMode::Unsupervised);
        }
        assert_eq!(ledger.role("s1"), Some(AnchorRole::Excluded));
        assert_eq!(ledger.role("t1"), Some(AnchorRole::Estimated));

        let mut ledger = OfflineLedger::new(&OfflineConfig::default());
        for c in [&sim, &test] {
            ledger.record(c, SupervisionMode::Both);
        }
        assert_eq!(ledger.role("s1"), Some(AnchorRole::Known(Verdict::Lens)));
        assert_eq!(ledger.role("t1"), Some(AnchorRole::Estimated));
    }

    #[test]
    fn test_latest_verdict_wins() {
        let mut ledger = OfflineLedger::new(&OfflineConfig::default());
        ledger.record(&classification("a", "t1", SubjectKind::Test, Verdict::Lens), SupervisionMode::Both);
        ledger.record(&classification("a", "t1", SubjectKind::Test, Verdict::Not), SupervisionMode::Both);
        ledger.record(&classification("b", "t1", SubjectKind::Test, Verdict::Lens), SupervisionMode::Both);
        assert_eq!(ledger.agent_count(), 2);
        assert_eq!(ledger.subject_count(), 1);
        assert_eq!(ledger.verdict_count(), 2);
        assert_eq!(ledger.verdicts["a"]["t1"], Verdict::Not);
    }
}
