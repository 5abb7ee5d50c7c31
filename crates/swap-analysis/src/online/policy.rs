//! Learning eligibility: whether a verdict may move its labeler's
//! confusion matrix.

use serde::{Deserialize, Serialize};

use swap_core::config::LearningConfig;
use swap_core::Category;

/// Which subjects agents learn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupervisionMode {
    /// Training subjects only.
    Supervised,
    /// Test subjects only.
    Unsupervised,
    /// Both.
    Both,
}

impl SupervisionMode {
    /// `supervised_and_unsupervised` wins over `supervised`.
    pub fn from_flags(use_training: bool, use_both: bool) -> Self {
        if use_both {
            Self::Both
        } else if use_training {
            Self::Supervised
        } else {
            Self::Unsupervised
        }
    }

    pub fn uses_training(&self) -> bool {
        matches!(self, Self::Supervised | Self::Both)
    }

    pub fn uses_test(&self) -> bool {
        matches!(self, Self::Unsupervised | Self::Both)
    }
}

/// Resolved learning policy for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningPolicy {
    pub enabled: bool,
    pub mode: SupervisionMode,
    pub ignore_window: u64,
    pub hasty: bool,
}

impl LearningPolicy {
    pub fn from_config(config: &LearningConfig) -> Self {
        Self {
            enabled: config.agents_willing_to_learn,
            mode: SupervisionMode::from_flags(
                config.supervised,
                config.supervised_and_unsupervised,
            ),
            ignore_window: config.effective_ignore_window(),
            hasty: config.hasty,
        }
    }

    /// Whether a verdict on a subject of `category` may be learned from.
    pub fn may_learn(&self, category: Category) -> bool {
        may_learn(
            category,
            self.enabled,
            self.mode.uses_training(),
            self.mode == SupervisionMode::Both,
        )
    }
}

/// The learning decision table.
///
/// | use_both | use_training | training | test |
/// |----------|--------------|----------|------|
/// | true     | any          | learn    | learn|
/// | false    | true         | learn    | -    |
/// | false    | false        | -        | learn|
///
/// Nothing is learned when `enabled` is false.
pub fn may_learn(category: Category, enabled: bool, use_training: bool, use_both: bool) -> bool {
    match (enabled, use_both, use_training, category) {
        (false, _, _, _) => false,
        (true, true, _, _) => true,
        (true, false, true, Category::Training) => true,
        (true, false, true, Category::Test) => false,
        (true, false, false, Category::Training) => false,
        (true, false, false, Category::Test) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_table_exhaustive() {
        let cases = [
            // (category, enabled, use_training, use_both, expected)
            (Category::Training, false, false, false, false),
            (Category::Training, false, false, true, false),
            (Category::Training, false, true, false, false),
            (Category::Training, false, true, true, false),
            (Category::Training, true, false, false, false),
            (Category::Training, true, false, true, true),
            (Category::Training, true, true, false, true),
            (Category::Training, true, true, true, true),
            (Category::Test, false, false, false, false),
            (Category::Test, false, false, true, false),
            (Category::Test, false, true, false, false),
            (Category::Test, false, true, true, false),
            (Category::Test, true, false, false, true),
            (Category::Test, true, false, true, true),
            (Category::Test, true, true, false, false),
            (Category::Test, true, true, true, true),
        ];
        for (category, enabled, use_training, use_both, expected) in cases {
            assert_eq!(
                may_learn(category, enabled, use_training, use_both),
                expected,
                "{category:?} enabled={enabled} training={use_training} both={use_both}"
            );
        }
    }

    #[test]
    fn test_both_takes_precedence() {
        assert_eq!(SupervisionMode::from_flags(true, true), SupervisionMode::Both);
        assert_eq!(SupervisionMode::from_flags(false, true), SupervisionMode::Both);
        assert_eq!(SupervisionMode::from_flags(true, false), SupervisionMode::Supervised);
        assert_eq!(SupervisionMode::from_flags(false, false), SupervisionMode::Unsupervised);
    }

    #[test]
    fn test_policy_from_default_config() {
        let policy = LearningPolicy::from_config(&LearningConfig::default());
        assert!(policy.may_learn(Category::Training));
        assert!(!policy.may_learn(Category::Test));
    }

    #[test]
    fn test_burn_in_window_only_applies_while_learning() {
        let config = LearningConfig {
            agents_willing_to_learn: false,
            ignore_first: 10,
            ..Default::default()
        };
        assert_eq!(LearningPolicy::from_config(&config).ignore_window, 0);
    }
}
