//! The two-valued verdict vocabulary and the three-valued truth vocabulary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::LabelError;

/// What a labeler said about a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    /// "There is a lens in this image."
    Lens,
    /// "There is no lens in this image."
    Not,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lens => "LENS",
            Self::Not => "NOT",
        }
    }

    pub fn is_lens(&self) -> bool {
        matches!(self, Self::Lens)
    }
}

impl FromStr for Verdict {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LENS" => Ok(Self::Lens),
            "NOT" => Ok(Self::Not),
            other => Err(LabelError::InvalidLabel {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a subject actually is, when known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Truth {
    Lens,
    Not,
    Unknown,
}

impl Truth {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lens => "LENS",
            Self::Not => "NOT",
            Self::Unknown => "UNKNOWN",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// The known truth as a verdict, if any.
    pub fn as_verdict(&self) -> Option<Verdict> {
        match self {
            Self::Lens => Some(Verdict::Lens),
            Self::Not => Some(Verdict::Not),
            Self::Unknown => None,
        }
    }
}

impl FromStr for Truth {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LENS" => Ok(Self::Lens),
            "NOT" => Ok(Self::Not),
            "UNKNOWN" => Ok(Self::Unknown),
            other => Err(LabelError::InvalidTruth {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Truth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_parse() {
        assert_eq!("LENS".parse::<Verdict>().unwrap(), Verdict::Lens);
        assert_eq!("NOT".parse::<Verdict>().unwrap(), Verdict::Not);
    }

    #[test]
    fn test_verdict_rejects_unknown_and_lowercase() {
        assert!(matches!(
            "UNKNOWN".parse::<Verdict>(),
            Err(LabelError::InvalidLabel { .. })
        ));
        assert!("lens".parse::<Verdict>().is_err());
    }

    #[test]
    fn test_truth_as_verdict() {
        assert_eq!(Truth::Lens.as_verdict(), Some(Verdict::Lens));
        assert_eq!(Truth::Unknown.as_verdict(), None);
        assert!(!Truth::Unknown.is_known());
    }
}
