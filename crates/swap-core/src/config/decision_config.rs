use serde::{Deserialize, Serialize};

use super::defaults;

/// Probability thresholds that drive subject status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionConfig {
    /// Mean probability above which a subject is detected.
    pub detection_threshold: f64,
    /// Mean probability below which a subject is rejected (and retired).
    pub rejection_threshold: f64,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            detection_threshold: defaults::DEFAULT_DETECTION_THRESHOLD,
            rejection_threshold: defaults::DEFAULT_REJECTION_THRESHOLD,
        }
    }
}
