//! Subject categories and kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::label::Truth;
use crate::errors::LabelError;

/// Which stream a subject was served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Training subjects: sims and duds, truth known.
    Training,
    /// Survey subjects, truth unknown.
    Test,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Training => "training",
            Self::Test => "test",
        }
    }
}

impl FromStr for Category {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "training" => Ok(Self::Training),
            "test" => Ok(Self::Test),
            other => Err(LabelError::InvalidCategory {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three mutually exclusive flavors of subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectKind {
    /// Training subject containing a simulated lens (known positive).
    Sim,
    /// Training subject known not to contain any lens (known negative).
    Dud,
    /// Survey subject; could be either.
    Test,
}

impl SubjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sim => "sim",
            Self::Dud => "dud",
            Self::Test => "test",
        }
    }

    /// Ground truth implied by the kind.
    pub fn truth(&self) -> Truth {
        match self {
            Self::Sim => Truth::Lens,
            Self::Dud => Truth::Not,
            Self::Test => Truth::Unknown,
        }
    }

    /// Anchors have known truth and are never retired.
    pub fn is_anchor(&self) -> bool {
        !matches!(self, Self::Test)
    }

    /// The category a subject of this kind belongs to.
    pub fn category(&self) -> Category {
        if self.is_anchor() {
            Category::Training
        } else {
            Category::Test
        }
    }
}

impl FromStr for SubjectKind {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sim" => Ok(Self::Sim),
            "dud" => Ok(Self::Dud),
            "test" => Ok(Self::Test),
            other => Err(LabelError::InvalidKind {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_truth_and_category() {
        assert_eq!(SubjectKind::Sim.truth(), Truth::Lens);
        assert_eq!(SubjectKind::Dud.truth(), Truth::Not);
        assert_eq!(SubjectKind::Test.truth(), Truth::Unknown);
        assert_eq!(SubjectKind::Dud.category(), Category::Training);
        assert_eq!(SubjectKind::Test.category(), Category::Test);
    }

    #[test]
    fn test_only_test_subjects_are_retirable() {
        assert!(SubjectKind::Sim.is_anchor());
        assert!(SubjectKind::Dud.is_anchor());
        assert!(!SubjectKind::Test.is_anchor());
    }

    #[test]
    fn test_invalid_kind() {
        assert_eq!(
            "lensing cluster".parse::<SubjectKind>(),
            Err(LabelError::InvalidKind {
                value: "lensing cluster".to_string()
            })
        );
    }
}
