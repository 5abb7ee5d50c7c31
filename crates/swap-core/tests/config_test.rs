//! Tests for the SWAP configuration system.

use std::sync::Mutex;

use swap_core::config::swap_config::CONFIG_FILE_NAME;
use swap_core::config::{ConfigOverrides, SwapConfig};
use swap_core::errors::ConfigError;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all SWAP_ env vars to prevent cross-test contamination.
fn clear_swap_env_vars() {
    for key in [
        "SWAP_DETECTION_THRESHOLD",
        "SWAP_REJECTION_THRESHOLD",
        "SWAP_PRIOR",
        "SWAP_REALIZATIONS",
        "SWAP_HASTY",
        "SWAP_MAX_PER_BATCH",
        "SWAP_STAGE",
        "SWAP_OFFLINE_ENABLED",
        "SWAP_SEED",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn test_defaults_without_run_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_swap_env_vars();

    let dir = tempdir();
    let config = SwapConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.subject.prior, 2e-4);
    assert_eq!(config.subject.pmin, 1e-10);
    assert_eq!(config.subject.realizations, 0);
    assert_eq!(config.subject.width(), 1);
    assert_eq!(config.decision.detection_threshold, 0.95);
    assert_eq!(config.decision.rejection_threshold, 1e-7);
    assert_eq!(config.agent.initial_pl, 0.5);
    assert_eq!(config.batch.max_per_batch, 5_000_000);
    assert_eq!(config.batch.start, "the_beginning");
    assert_eq!(config.offline.n_min, 10);
    assert_eq!(config.offline.n_max, 100);
    assert!(!config.offline.enabled);
    assert!(config.learning.supervised);
}

#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_swap_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        r#"
[subject]
prior = 0.001
realizations = 20

[batch]
stage = "2"
start = "2013-05-01_00:00:00"

[random]
seed = 7
"#,
    )
    .unwrap();

    std::env::set_var("SWAP_REALIZATIONS", "50");
    std::env::set_var("SWAP_SEED", "9");

    let overrides = ConfigOverrides {
        seed: Some(11),
        offline: Some(true),
        ..Default::default()
    };
    let config = SwapConfig::load(dir.path(), Some(&overrides)).unwrap();

    // file
    assert_eq!(config.subject.prior, 0.001);
    assert_eq!(config.batch.stage, "2");
    assert_eq!(config.batch.start, "2013-05-01_00:00:00");
    // env over file
    assert_eq!(config.subject.realizations, 50);
    // overrides over env
    assert_eq!(config.random.seed, 11);
    assert!(config.offline.enabled);
    // untouched defaults
    assert_eq!(config.subject.pmin, 1e-10);

    clear_swap_env_vars();
}

#[test]
fn test_invalid_env_value_is_ignored() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_swap_env_vars();

    std::env::set_var("SWAP_REALIZATIONS", "many");
    let dir = tempdir();
    let config = SwapConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.subject.realizations, 0);

    clear_swap_env_vars();
}

#[test]
fn test_validation_rejects_crossed_thresholds() {
    let config = SwapConfig::from_toml(
        r#"
[decision]
detection_threshold = 0.1
rejection_threshold = 0.5
"#,
    )
    .unwrap();
    let err = SwapConfig::validate(&config).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { ref field, .. } if field == "decision.rejection_threshold"));
}

#[test]
fn test_validation_rejects_bad_values() {
    let mut config = SwapConfig::default();
    config.subject.pmin = 0.0;
    assert!(SwapConfig::validate(&config).is_err());

    let mut config = SwapConfig::default();
    config.offline.n_min = 200;
    assert!(SwapConfig::validate(&config).is_err());

    let mut config = SwapConfig::default();
    config.batch.max_per_batch = 0;
    assert!(SwapConfig::validate(&config).is_err());

    let mut config = SwapConfig::default();
    config.batch.end = "tomorrow".to_string();
    assert!(matches!(
        SwapConfig::validate(&config),
        Err(ConfigError::InvalidValue { .. })
    ));
}

#[test]
fn test_malformed_toml_is_a_parse_error() {
    let err = SwapConfig::from_toml("[subject\nprior = ").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_unknown_keys_are_ignored() {
    let config = SwapConfig::from_toml(
        r#"
survey = "CFHTLS"

[subject]
prior = 0.01
colour = "blue"
"#,
    )
    .unwrap();
    assert_eq!(config.subject.prior, 0.01);
}

#[test]
fn test_to_toml_round_trip() {
    let mut config = SwapConfig::default();
    config.batch.start = "2014-01-01_00:00:00".to_string();
    config.learning.hasty = true;
    let text = config.to_toml().unwrap();
    let back = SwapConfig::from_toml(&text).unwrap();
    assert_eq!(back.batch.start, "2014-01-01_00:00:00");
    assert!(back.learning.hasty);
    assert!(SwapConfig::validate(&back).is_ok());
}
