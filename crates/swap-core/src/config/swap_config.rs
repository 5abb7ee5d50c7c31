//! Top-level SWAP configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    AgentConfig, BatchConfig, DecisionConfig, LearningConfig, OfflineConfig, RandomConfig,
    SubjectConfig,
};
use crate::errors::ConfigError;
use crate::types::timestamp::{parse_lower_bound, parse_upper_bound};

/// Name of the per-run config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "swap.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Environment variables (`SWAP_*`)
/// 3. Run config (`swap.toml` in `root`)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SwapConfig {
    pub decision: DecisionConfig,
    pub subject: SubjectConfig,
    pub agent: AgentConfig,
    pub learning: LearningConfig,
    pub batch: BatchConfig,
    pub offline: OfflineConfig,
    pub random: RandomConfig,
}

/// Caller-supplied overrides (highest priority).
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub start: Option<String>,
    pub end: Option<String>,
    pub stage: Option<String>,
    pub seed: Option<u64>,
    pub offline: Option<bool>,
}

impl SwapConfig {
    /// Load configuration with layered resolution.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_FILE_NAME);
        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            ::tracing::debug!(path = %path.display(), "no run config found, using defaults");
            Self::default()
        };

        Self::apply_env_overrides(&mut config);

        if let Some(o) = overrides {
            Self::apply_overrides(&mut config, o);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Read a TOML file. Missing keys take their compiled defaults;
    /// unknown keys are ignored.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &SwapConfig) -> Result<(), ConfigError> {
        let d = &config.decision;
        check_open_unit("decision.detection_threshold", d.detection_threshold)?;
        check_open_unit("decision.rejection_threshold", d.rejection_threshold)?;
        if d.rejection_threshold >= d.detection_threshold {
            return Err(ConfigError::ValidationFailed {
                field: "decision.rejection_threshold".to_string(),
                message: "must be below decision.detection_threshold".to_string(),
            });
        }

        let s = &config.subject;
        if !(s.pmin > 0.0 && s.pmin < 0.5) {
            return Err(ConfigError::ValidationFailed {
                field: "subject.pmin".to_string(),
                message: "must be in (0, 0.5)".to_string(),
            });
        }
        if !(s.prior >= s.pmin && s.prior <= 1.0 - s.pmin) {
            return Err(ConfigError::ValidationFailed {
                field: "subject.prior".to_string(),
                message: "must be within [pmin, 1 - pmin]".to_string(),
            });
        }

        let a = &config.agent;
        if !(a.reliability_floor > 0.0 && a.reliability_floor < 0.5) {
            return Err(ConfigError::ValidationFailed {
                field: "agent.reliability_floor".to_string(),
                message: "must be in (0, 0.5)".to_string(),
            });
        }
        check_open_unit("agent.initial_pl", a.initial_pl)?;
        check_open_unit("agent.initial_pd", a.initial_pd)?;
        if !(a.initial_effective_count > 0.0) {
            return Err(ConfigError::ValidationFailed {
                field: "agent.initial_effective_count".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        if config.batch.max_per_batch == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "batch.max_per_batch".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        parse_lower_bound(&config.batch.start).map_err(|e| ConfigError::InvalidValue {
            field: "batch.start".to_string(),
            message: e.to_string(),
        })?;
        parse_upper_bound(&config.batch.end).map_err(|e| ConfigError::InvalidValue {
            field: "batch.end".to_string(),
            message: e.to_string(),
        })?;

        let o = &config.offline;
        check_open_unit("offline.initial_prior", o.initial_prior)?;
        check_open_unit("offline.initial_pl", o.initial_pl)?;
        check_open_unit("offline.initial_pd", o.initial_pd)?;
        if o.n_max == 0 || o.n_min > o.n_max {
            return Err(ConfigError::ValidationFailed {
                field: "offline.n_min".to_string(),
                message: "must satisfy n_min <= n_max and n_max > 0".to_string(),
            });
        }
        if !(o.epsilon_min > 0.0) {
            return Err(ConfigError::ValidationFailed {
                field: "offline.epsilon_min".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Apply environment variable overrides.
    /// Pattern: `SWAP_DETECTION_THRESHOLD`, `SWAP_REALIZATIONS`, etc.
    fn apply_env_overrides(config: &mut SwapConfig) {
        if let Some(v) = env_parse::<f64>("SWAP_DETECTION_THRESHOLD") {
            config.decision.detection_threshold = v;
        }
        if let Some(v) = env_parse::<f64>("SWAP_REJECTION_THRESHOLD") {
            config.decision.rejection_threshold = v;
        }
        if let Some(v) = env_parse::<f64>("SWAP_PRIOR") {
            config.subject.prior = v;
        }
        if let Some(v) = env_parse::<usize>("SWAP_REALIZATIONS") {
            config.subject.realizations = v;
        }
        if let Some(v) = env_parse::<bool>("SWAP_HASTY") {
            config.learning.hasty = v;
        }
        if let Some(v) = env_parse::<u64>("SWAP_MAX_PER_BATCH") {
            config.batch.max_per_batch = v;
        }
        if let Ok(v) = std::env::var("SWAP_STAGE") {
            config.batch.stage = v;
        }
        if let Some(v) = env_parse::<bool>("SWAP_OFFLINE_ENABLED") {
            config.offline.enabled = v;
        }
        if let Some(v) = env_parse::<u64>("SWAP_SEED") {
            config.random.seed = v;
        }
    }

    /// Apply explicit overrides (highest priority).
    fn apply_overrides(config: &mut SwapConfig, o: &ConfigOverrides) {
        if let Some(ref v) = o.start {
            config.batch.start = v.clone();
        }
        if let Some(ref v) = o.end {
            config.batch.end = v.clone();
        }
        if let Some(ref v) = o.stage {
            config.batch.stage = v.clone();
        }
        if let Some(v) = o.seed {
            config.random.seed = v;
        }
        if let Some(v) = o.offline {
            config.offline.enabled = v;
        }
    }

    /// Serialize the config back to TOML, e.g. to write the next run's config.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn check_open_unit(field: &str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: "must be in (0, 1)".to_string(),
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}
