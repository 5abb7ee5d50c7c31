use serde::{Deserialize, Serialize};

use super::defaults;

/// Controls whether and from what agents learn.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    /// Global switch. When off, confusion matrices stay fixed.
    pub agents_willing_to_learn: bool,
    /// Learn from training subjects only.
    pub supervised: bool,
    /// Learn from both training and test subjects. Takes precedence over
    /// `supervised`.
    pub supervised_and_unsupervised: bool,
    /// Burn-in: a labeler's verdicts do not move subjects until their
    /// training count exceeds this.
    pub ignore_first: u64,
    /// Drop verdicts on subjects that are already decided or retired.
    pub hasty: bool,
}

impl LearningConfig {
    /// Burn-in window actually applied. Only meaningful while learning.
    pub fn effective_ignore_window(&self) -> u64 {
        if self.agents_willing_to_learn {
            self.ignore_first
        } else {
            0
        }
    }
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            agents_willing_to_learn: defaults::DEFAULT_AGENTS_WILLING_TO_LEARN,
            supervised: defaults::DEFAULT_SUPERVISED,
            supervised_and_unsupervised: defaults::DEFAULT_SUPERVISED_AND_UNSUPERVISED,
            ignore_first: defaults::DEFAULT_IGNORE_FIRST,
            hasty: defaults::DEFAULT_HASTY,
        }
    }
}
