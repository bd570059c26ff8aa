//! Configuration loading tests.

use footstep_interpolator::error::ConfigError;
use footstep_interpolator::{load_config, parse_config, validate_config, Error, InterpolatorConfig};

const WALKING_CONFIG: &str = r#"
switch_ratio = 0.3
terminal_half_switch_time = 0.4
step_height = 0.04
swing_apex_ratio = 0.4

[pause]
max_step_time = 2.5
nominal_step_time = 0.8

[zmp]
left_stance = [0.01, -0.005]
right_stance = [0.01, 0.005]

[com]
nominal_height = 0.6
stance_delta = 0.02
"#;

/// Test loading a configuration file from disk.
#[test]
fn test_load_config_from_file() {
    let path = std::env::temp_dir().join(format!(
        "footstep-interpolator-{}-walking.toml",
        std::process::id()
    ));
    std::fs::write(&path, WALKING_CONFIG).expect("Should write temp config");

    let config = load_config(&path);
    std::fs::remove_file(&path).ok();
    let config = config.expect("Should load config");

    assert_eq!(config.switch_ratio, 0.3);
    assert_eq!(config.terminal_half_switch_time, 0.4);
    assert_eq!(config.swing_apex_ratio, 0.4);
    let pause = config.pause.expect("Pause conditions present");
    assert_eq!(pause.nominal_step_time, 0.8);
    assert_eq!(config.zmp.left_stance, [0.01, -0.005]);
    assert_eq!(config.zmp.left_switch, [0.0, 0.0]);
    assert!((config.com.stance_height() - 0.62).abs() < 1e-12);
}

/// Test a missing file reports an I/O error.
#[test]
fn test_missing_file() {
    let result = load_config("/nonexistent/footstep-interpolator/walking.toml");
    assert!(matches!(result, Err(Error::Config(ConfigError::IoError(_)))));
}

/// Test omitted keys fall back to defaults.
#[test]
fn test_partial_config_uses_defaults() {
    let config = parse_config("step_height = 0.05").expect("Should parse");
    assert_eq!(config.step_height, 0.05);
    assert_eq!(config.switch_ratio, InterpolatorConfig::default().switch_ratio);
    assert!(config.pause.is_none());
}

/// Test pause conditions with max below nominal are rejected.
#[test]
fn test_invalid_pause_conditions() {
    let toml_str = r#"
[pause]
max_step_time = 0.5
nominal_step_time = 1.0
"#;
    let result = parse_config(toml_str);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidPauseConditions { .. }))
    ));
}

/// Test a non-positive CoM height is rejected.
#[test]
fn test_invalid_com_height() {
    let result = parse_config("[com]\nnominal_height = 0.0");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidComHeight(_)))
    ));
}

/// Test setters reject invalid values and keep the previous one.
#[test]
fn test_setters_keep_previous_value_on_error() {
    let mut config = InterpolatorConfig::default();
    assert!(config.set_switch_ratio(1.0).is_err());
    assert!(config.set_swing_apex_ratio(0.0).is_err());
    assert!(config.set_pause_conditions(1.0, 2.0).is_err());
    assert!(config.set_com_height_settings(-0.5, 0.0).is_err());
    assert_eq!(config, InterpolatorConfig::default());
    assert!(validate_config(&config).is_ok());
}
