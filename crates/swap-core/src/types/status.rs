//! Subject lifecycle: state (active/inactive) and decision status.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether a subject is still being classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectState {
    Active,
    /// Retired. Terminal.
    Inactive,
}

impl SubjectState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for SubjectState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decision derived from the mean probability and the two thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectStatus {
    Undecided,
    /// P > detection threshold.
    Detected,
    /// P < rejection threshold.
    Rejected,
}

impl SubjectStatus {
    /// Classify a probability against the two thresholds.
    pub fn from_probability(p: f64, rejection: f64, detection: f64) -> Self {
        if p < rejection {
            Self::Rejected
        } else if p > detection {
            Self::Detected
        } else {
            Self::Undecided
        }
    }

    pub fn is_decided(&self) -> bool {
        !matches!(self, Self::Undecided)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Undecided => "undecided",
            Self::Detected => "detected",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for SubjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_probability() {
        assert_eq!(
            SubjectStatus::from_probability(0.05, 0.1, 0.99),
            SubjectStatus::Rejected
        );
        assert_eq!(
            SubjectStatus::from_probability(0.995, 0.1, 0.99),
            SubjectStatus::Detected
        );
        assert_eq!(
            SubjectStatus::from_probability(0.5, 0.1, 0.99),
            SubjectStatus::Undecided
        );
    }

    #[test]
    fn test_thresholds_are_strict() {
        assert_eq!(
            SubjectStatus::from_probability(0.1, 0.1, 0.99),
            SubjectStatus::Undecided
        );
        assert_eq!(
            SubjectStatus::from_probability(0.99, 0.1, 0.99),
            SubjectStatus::Undecided
        );
    }
}
