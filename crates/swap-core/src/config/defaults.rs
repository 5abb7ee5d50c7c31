//! Compiled defaults for every configuration field.

// Decision
pub const DEFAULT_DETECTION_THRESHOLD: f64 = 0.95;
pub const DEFAULT_REJECTION_THRESHOLD: f64 = 1e-7;

// Subject
/// Every subject starts with this probability of being a LENS.
pub const DEFAULT_PRIOR: f64 = 2e-4;
/// Probability floor; keeps subjects away from absorbing 0/1 states.
pub const DEFAULT_PMIN: f64 = 1e-10;
/// 0 means a single deterministic channel.
pub const DEFAULT_REALIZATIONS: usize = 0;

// Agent
pub const DEFAULT_INITIAL_PL: f64 = 0.5;
pub const DEFAULT_INITIAL_PD: f64 = 0.5;
/// Pseudo-count of evidence behind the initial PL and PD.
pub const DEFAULT_INITIAL_EFFECTIVE_COUNT: f64 = 2.0;
/// PL and PD are kept within [floor, 1 - floor].
pub const DEFAULT_RELIABILITY_FLOOR: f64 = 0.01;

// Learning
pub const DEFAULT_AGENTS_WILLING_TO_LEARN: bool = true;
pub const DEFAULT_SUPERVISED: bool = true;
pub const DEFAULT_SUPERVISED_AND_UNSUPERVISED: bool = false;
pub const DEFAULT_IGNORE_FIRST: u64 = 0;
pub const DEFAULT_HASTY: bool = false;

// Batch
pub const DEFAULT_STAGE: &str = "1";
pub const DEFAULT_MAX_PER_BATCH: u64 = 5_000_000;

// Offline
pub const DEFAULT_OFFLINE_ENABLED: bool = false;
pub const DEFAULT_OFFLINE_N_MIN: usize = 10;
pub const DEFAULT_OFFLINE_N_MAX: usize = 100;
pub const DEFAULT_OFFLINE_EPSILON_MIN: f64 = 1e-6;

// Random
pub const DEFAULT_SEED: u64 = 42;
