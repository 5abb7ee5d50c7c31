use serde::{Deserialize, Serialize};

use super::defaults;

/// Seed for the explicit random source threaded through sampling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomConfig {
    pub seed: u64,
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            seed: defaults::DEFAULT_SEED,
        }
    }
}
