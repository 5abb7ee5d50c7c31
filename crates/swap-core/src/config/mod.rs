//! Configuration system for SWAP.
//! TOML-based, layered resolution: overrides > env > file > defaults.

pub mod agent_config;
pub mod batch_config;
pub mod decision_config;
pub mod defaults;
pub mod learning_config;
pub mod offline_config;
pub mod random_config;
pub mod subject_config;
pub mod swap_config;

pub use agent_config::AgentConfig;
pub use batch_config::BatchConfig;
pub use decision_config::DecisionConfig;
pub use learning_config::LearningConfig;
pub use offline_config::OfflineConfig;
pub use random_config::RandomConfig;
pub use subject_config::SubjectConfig;
pub use swap_config::{ConfigOverrides, SwapConfig};
