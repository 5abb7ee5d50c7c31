use serde::{Deserialize, Serialize};

use super::defaults;

/// Subject model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectConfig {
    /// Initial probability of every realization.
    pub prior: f64,
    /// Numeric floor for probabilities.
    pub pmin: f64,
    /// Number of stochastic realizations per subject. 0 disables sampling.
    pub realizations: usize,
}

impl SubjectConfig {
    /// Width of the probability vector: never less than one channel.
    pub fn width(&self) -> usize {
        self.realizations.max(1)
    }
}

impl Default for SubjectConfig {
    fn default() -> Self {
        Self {
            prior: defaults::DEFAULT_PRIOR,
            pmin: defaults::DEFAULT_PMIN,
            realizations: defaults::DEFAULT_REALIZATIONS,
        }
    }
}
