use serde::{Deserialize, Serialize};

use super::defaults;
use crate::types::timestamp::{THE_BEGINNING, THE_END_OF_TIME};

/// Which slice of the classification stream a run consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Processing stage; records tagged with another stage are skipped.
    pub stage: String,
    /// `%Y-%m-%d_%H:%M:%S` or `the_beginning`.
    pub start: String,
    /// `%Y-%m-%d_%H:%M:%S` or `the_end_of_time`.
    pub end: String,
    /// Maximum number of classifications per batch.
    pub max_per_batch: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            stage: defaults::DEFAULT_STAGE.to_string(),
            start: THE_BEGINNING.to_string(),
            end: THE_END_OF_TIME.to_string(),
            max_per_batch: defaults::DEFAULT_MAX_PER_BATCH,
        }
    }
}
