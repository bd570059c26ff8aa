//! Interpolator configuration - root configuration structure.

use nalgebra::Vector2;
use serde::Deserialize;

use crate::error::{ConfigError, Error, Result};

use super::pause::PauseConditions;
use super::references::{ComHeightSettings, ZmpOffsets};

/// Root configuration structure from TOML.
///
/// Fields are public so a configuration can be written literally; the
/// setters validate one parameter at a time and leave the configuration
/// untouched when they fail.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InterpolatorConfig {
    /// Fraction of every inter-impact interval spent switching weight, in (0, 1).
    pub switch_ratio: f64,

    /// Duration of the final re-centering switch; 0 disables it.
    pub terminal_half_switch_time: f64,

    /// Swing apex height in meters.
    pub step_height: f64,

    /// Fraction of the swing at which the apex is reached, in (0, 1).
    pub swing_apex_ratio: f64,

    /// Optional slow-down conditions for long steps.
    pub pause: Option<PauseConditions>,

    /// Local ZMP offsets.
    pub zmp: ZmpOffsets,

    /// CoM height profile.
    pub com: ComHeightSettings,
}

impl Default for InterpolatorConfig {
    fn default() -> Self {
        Self {
            switch_ratio: 0.2,
            terminal_half_switch_time: 0.0,
            step_height: 0.02,
            swing_apex_ratio: 0.5,
            pause: None,
            zmp: ZmpOffsets::default(),
            com: ComHeightSettings::default(),
        }
    }
}

fn in_open_unit_interval(value: f64) -> bool {
    value > 0.0 && value < 1.0
}

impl InterpolatorConfig {
    /// Set the fraction of each step interval spent switching.
    pub fn set_switch_ratio(&mut self, ratio: f64) -> Result<()> {
        if !in_open_unit_interval(ratio) {
            return Err(Error::Config(ConfigError::InvalidSwitchRatio(ratio)));
        }
        self.switch_ratio = ratio;
        Ok(())
    }

    /// Set the terminal half switch time; 0 keeps the weight where the last
    /// step leaves it.
    pub fn set_terminal_half_switch_time(&mut self, time: f64) -> Result<()> {
        if !(time.is_finite() && time >= 0.0) {
            return Err(Error::Config(ConfigError::InvalidTerminalHalfSwitchTime(time)));
        }
        self.terminal_half_switch_time = time;
        Ok(())
    }

    /// Set the swing apex height.
    pub fn set_step_height(&mut self, height: f64) -> Result<()> {
        if !(height.is_finite() && height >= 0.0) {
            return Err(Error::Config(ConfigError::InvalidStepHeight(height)));
        }
        self.step_height = height;
        Ok(())
    }

    /// Set the fraction of the swing at which the apex is reached.
    pub fn set_swing_apex_ratio(&mut self, ratio: f64) -> Result<()> {
        if !in_open_unit_interval(ratio) {
            return Err(Error::Config(ConfigError::InvalidApexRatio(ratio)));
        }
        self.swing_apex_ratio = ratio;
        Ok(())
    }

    /// Enable pausing for intervals longer than `max_step_time`.
    pub fn set_pause_conditions(
        &mut self,
        max_step_time: f64,
        nominal_step_time: f64,
    ) -> Result<()> {
        let pause = PauseConditions::new(max_step_time, nominal_step_time);
        if !pause.is_valid() {
            return Err(Error::Config(ConfigError::InvalidPauseConditions {
                max_step_time,
                nominal_step_time,
            }));
        }
        self.pause = Some(pause);
        Ok(())
    }

    /// Disable pausing.
    pub fn clear_pause_conditions(&mut self) {
        self.pause = None;
    }

    /// Set the stance ZMP offsets, each in its own foot frame.
    pub fn set_stance_zmp_delta(&mut self, left: Vector2<f64>, right: Vector2<f64>) -> Result<()> {
        let mut zmp = self.zmp;
        zmp.left_stance = [left.x, left.y];
        zmp.right_stance = [right.x, right.y];
        if !zmp.is_finite() {
            return Err(Error::Config(ConfigError::InvalidZmpOffset));
        }
        self.zmp = zmp;
        Ok(())
    }

    /// Set the ZMP offsets at the start of a switch onto each foot.
    pub fn set_initial_switch_zmp_delta(
        &mut self,
        left: Vector2<f64>,
        right: Vector2<f64>,
    ) -> Result<()> {
        let mut zmp = self.zmp;
        zmp.left_switch = [left.x, left.y];
        zmp.right_switch = [right.x, right.y];
        if !zmp.is_finite() {
            return Err(Error::Config(ConfigError::InvalidZmpOffset));
        }
        self.zmp = zmp;
        Ok(())
    }

    /// Set the nominal CoM height and the delta added in double support.
    pub fn set_com_height_settings(&mut self, height: f64, stance_delta: f64) -> Result<()> {
        if !(height.is_finite() && height > 0.0) {
            return Err(Error::Config(ConfigError::InvalidComHeight(height)));
        }
        if !stance_delta.is_finite() {
            return Err(Error::Config(ConfigError::InvalidComHeightDelta(stance_delta)));
        }
        self.com = ComHeightSettings {
            nominal_height: height,
            stance_delta,
        };
        Ok(())
    }
}
