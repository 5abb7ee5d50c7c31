use serde::{Deserialize, Serialize};

use super::defaults;

/// Offline EM refinement configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OfflineConfig {
    pub enabled: bool,
    /// Starting prior for the EM pass.
    pub initial_prior: f64,
    /// Starting PL for every agent in the EM pass.
    pub initial_pl: f64,
    /// Starting PD for every agent in the EM pass.
    pub initial_pd: f64,
    /// Minimum number of EM iterations.
    pub n_min: usize,
    /// Hard ceiling on EM iterations.
    pub n_max: usize,
    /// Mean absolute posterior change below which EM has converged.
    pub epsilon_min: f64,
}

impl Default for OfflineConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::DEFAULT_OFFLINE_ENABLED,
            initial_prior: defaults::DEFAULT_PRIOR,
            initial_pl: defaults::DEFAULT_INITIAL_PL,
            initial_pd: defaults::DEFAULT_INITIAL_PD,
            n_min: defaults::DEFAULT_OFFLINE_N_MIN,
            n_max: defaults::DEFAULT_OFFLINE_N_MAX,
            epsilon_min: defaults::DEFAULT_OFFLINE_EPSILON_MIN,
        }
    }
}
