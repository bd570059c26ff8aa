//! ZMP offsets and CoM height settings.

use nalgebra::Vector2;
use serde::Deserialize;

use crate::footstep::Foot;

/// Local ZMP offsets in each foot frame, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ZmpOffsets {
    /// ZMP held under the left foot while it supports the robot.
    pub left_stance: [f64; 2],

    /// ZMP held under the right foot while it supports the robot.
    pub right_stance: [f64; 2],

    /// ZMP under the left foot when weight starts flowing onto it.
    #[serde(rename = "left_switch_init")]
    pub left_switch: [f64; 2],

    /// ZMP under the right foot when weight starts flowing onto it.
    #[serde(rename = "right_switch_init")]
    pub right_switch: [f64; 2],
}

impl ZmpOffsets {
    /// Stance offset of a foot.
    pub fn stance(&self, foot: Foot) -> Vector2<f64> {
        match foot {
            Foot::Left => Vector2::from(self.left_stance),
            Foot::Right => Vector2::from(self.right_stance),
        }
    }

    /// Initial-switch offset of a foot.
    pub fn switch_init(&self, foot: Foot) -> Vector2<f64> {
        match foot {
            Foot::Left => Vector2::from(self.left_switch),
            Foot::Right => Vector2::from(self.right_switch),
        }
    }

    /// Check that every offset is finite.
    pub fn is_finite(&self) -> bool {
        [self.left_stance, self.right_stance, self.left_switch, self.right_switch]
            .iter()
            .flatten()
            .all(|v| v.is_finite())
    }
}

/// CoM height profile settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ComHeightSettings {
    /// Nominal CoM height in meters, reached in the middle of each swing.
    pub nominal_height: f64,

    /// Height added in the middle of each double support, in meters.
    pub stance_delta: f64,
}

impl Default for ComHeightSettings {
    fn default() -> Self {
        Self {
            nominal_height: 0.5,
            stance_delta: 0.0,
        }
    }
}

impl ComHeightSettings {
    /// Height held in double support.
    #[inline]
    pub fn stance_height(&self) -> f64 {
        self.nominal_height + self.stance_delta
    }
}
