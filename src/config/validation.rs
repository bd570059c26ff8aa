//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::InterpolatorConfig;

/// Validate an interpolator configuration.
///
/// Checks:
/// - Switch and apex ratios lie in (0, 1)
/// - Heights and times are finite and non-negative
/// - Pause conditions satisfy max >= nominal > 0
/// - ZMP offsets are finite
/// - CoM height is positive
pub fn validate_config(config: &InterpolatorConfig) -> Result<()> {
    // Switch ratio must leave room for a swing
    if !(config.switch_ratio > 0.0 && config.switch_ratio < 1.0) {
        return Err(Error::Config(ConfigError::InvalidSwitchRatio(config.switch_ratio)));
    }

    if !(config.terminal_half_switch_time.is_finite() && config.terminal_half_switch_time >= 0.0) {
        return Err(Error::Config(ConfigError::InvalidTerminalHalfSwitchTime(
            config.terminal_half_switch_time,
        )));
    }

    if !(config.step_height.is_finite() && config.step_height >= 0.0) {
        return Err(Error::Config(ConfigError::InvalidStepHeight(config.step_height)));
    }

    if !(config.swing_apex_ratio > 0.0 && config.swing_apex_ratio < 1.0) {
        return Err(Error::Config(ConfigError::InvalidApexRatio(config.swing_apex_ratio)));
    }

    if let Some(ref pause) = config.pause {
        if !pause.is_valid() {
            return Err(Error::Config(ConfigError::InvalidPauseConditions {
                max_step_time: pause.max_step_time,
                nominal_step_time: pause.nominal_step_time,
            }));
        }
    }

    if !config.zmp.is_finite() {
        return Err(Error::Config(ConfigError::InvalidZmpOffset));
    }

    if !(config.com.nominal_height.is_finite() && config.com.nominal_height > 0.0) {
        return Err(Error::Config(ConfigError::InvalidComHeight(config.com.nominal_height)));
    }

    if !config.com.stance_delta.is_finite() {
        return Err(Error::Config(ConfigError::InvalidComHeightDelta(config.com.stance_delta)));
    }

    Ok(())
}

/// Validate a sampling period.
pub fn validate_sampling_time(dt: f64) -> Result<()> {
    if !(dt.is_finite() && dt > 0.0) {
        return Err(Error::Config(ConfigError::InvalidSamplingTime(dt)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PauseConditions;

    #[test]
    fn test_invalid_pause_in_literal_config() {
        let config = InterpolatorConfig {
            pause: Some(PauseConditions::new(1.0, 2.0)), // Invalid!
            ..InterpolatorConfig::default()
        };

        let result = validate_config(&config);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidPauseConditions { .. }))
        ));
    }

    #[test]
    fn test_invalid_switch_ratio_in_literal_config() {
        let config = InterpolatorConfig {
            switch_ratio: 1.0,
            ..InterpolatorConfig::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidSwitchRatio(_)))
        ));
    }

    #[test]
    fn test_sampling_time() {
        assert!(validate_sampling_time(0.01).is_ok());
        assert!(validate_sampling_time(0.0).is_err());
        assert!(validate_sampling_time(f64::NAN).is_err());
    }
}
