//! Foot pose interpolation.

use alloc::vec::Vec;

use nalgebra::{Isometry3, Rotation2, Vector3};

use crate::config::InterpolatorConfig;
use crate::error::{ConfigError, Error, Result};
use crate::footstep::{Foot, Step};
use crate::spline::{Boundary, CubicSpline};

use super::phases::{PhaseTimeline, WindowKind};

/// Trajectory of one foot between lift-off and touch-down.
///
/// Planar position and yaw follow cubic splines with zero velocity and
/// acceleration at both ends. Height rises to the step height at the apex
/// time and falls back to the ground, with zero vertical velocity at
/// lift-off, apex and touch-down.
#[derive(Debug, Clone, PartialEq)]
pub struct SwingTrajectory {
    x: CubicSpline,
    y: CubicSpline,
    yaw: CubicSpline,
    rise: CubicSpline,
    fall: CubicSpline,
    apex_time: f64,
}

impl SwingTrajectory {
    /// Plan the swing from `lift_off` to `touch_down` over
    /// `[start_time, touch_down.impact_time]`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `step_height` is negative or
    /// `apex_ratio` is outside (0, 1), and a feasibility error if the swing
    /// has no duration.
    pub fn new(
        lift_off: &Step,
        touch_down: &Step,
        start_time: f64,
        step_height: f64,
        apex_ratio: f64,
    ) -> Result<Self> {
        if !(step_height.is_finite() && step_height >= 0.0) {
            return Err(Error::Config(ConfigError::InvalidStepHeight(step_height)));
        }
        if !(apex_ratio > 0.0 && apex_ratio < 1.0) {
            return Err(Error::Config(ConfigError::InvalidApexRatio(apex_ratio)));
        }

        let end_time = touch_down.impact_time;
        let times = [start_time, end_time];
        let planar = |from: f64, to: f64| {
            CubicSpline::new(&times, &[from, to], Boundary::STILL, Boundary::STILL)
        };

        // Unwrapped so the foot turns the short way
        let turn = Rotation2::new(lift_off.angle)
            .rotation_to(&Rotation2::new(touch_down.angle))
            .angle();

        let apex_time = start_time + apex_ratio * (end_time - start_time);
        Ok(Self {
            x: planar(lift_off.position.x, touch_down.position.x)?,
            y: planar(lift_off.position.y, touch_down.position.y)?,
            yaw: planar(lift_off.angle, lift_off.angle + turn)?,
            rise: CubicSpline::blend(start_time, 0.0, apex_time, step_height)?,
            fall: CubicSpline::blend(apex_time, step_height, end_time, 0.0)?,
            apex_time,
        })
    }

    /// Lift-off time.
    #[inline]
    pub fn start_time(&self) -> f64 {
        self.x.start_time()
    }

    /// Touch-down time.
    #[inline]
    pub fn end_time(&self) -> f64 {
        self.x.end_time()
    }

    /// Time of the highest point.
    #[inline]
    pub fn apex_time(&self) -> f64 {
        self.apex_time
    }

    /// Height above the ground at `time`.
    pub fn height_at(&self, time: f64) -> f64 {
        if time <= self.apex_time {
            self.rise.position(time)
        } else {
            self.fall.position(time)
        }
    }

    /// Foot pose at `time`.
    pub fn pose_at(&self, time: f64) -> Isometry3<f64> {
        Isometry3::new(
            Vector3::new(self.x.position(time), self.y.position(time), self.height_at(time)),
            Vector3::z() * self.yaw.position(time),
        )
    }
}

/// Pose of `foot` at every sample of the timeline.
pub(crate) fn foot_poses(
    timeline: &PhaseTimeline,
    foot: Foot,
    config: &InterpolatorConfig,
) -> Result<Vec<Isometry3<f64>>> {
    let grid = timeline.grid();
    let mut poses = Vec::with_capacity(timeline.len());
    let mut grounded = timeline.present_step(foot).pose();

    for window in timeline.windows() {
        match window.kind {
            WindowKind::Swing {
                foot: swinging,
                lift_off,
                touch_down,
            } if swinging == foot => {
                let swing = SwingTrajectory::new(
                    &lift_off,
                    &touch_down,
                    window.start_time,
                    config.step_height,
                    config.swing_apex_ratio,
                )?;
                poses.extend((window.start..window.end).map(|i| swing.pose_at(grid.time(i))));
                grounded = touch_down.pose();
            }
            _ => poses.extend((window.start..window.end).map(|_| grounded)),
        }
    }
    poses.push(grounded);

    Ok(poses)
}
