use serde::{Deserialize, Serialize};

use super::defaults;

/// Agent (labeler reliability) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Initial P("LENS" | LENS).
    pub initial_pl: f64,
    /// Initial P("NOT" | NOT).
    pub initial_pd: f64,
    /// Pseudo-count behind each initial estimate.
    pub initial_effective_count: f64,
    /// PL and PD never leave [floor, 1 - floor].
    pub reliability_floor: f64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            initial_pl: defaults::DEFAULT_INITIAL_PL,
            initial_pd: defaults::DEFAULT_INITIAL_PD,
            initial_effective_count: defaults::DEFAULT_INITIAL_EFFECTIVE_COUNT,
            reliability_floor: defaults::DEFAULT_RELIABILITY_FLOOR,
        }
    }
}
