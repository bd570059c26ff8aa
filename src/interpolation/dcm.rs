//! Divergent Component of Motion references.
//!
//! During every swing the DCM diverges from the virtual repellent point
//! (VRP) under the support foot:
//!
//! ```text
//! xi(t) = r + exp(omega * (t - t_end)) * (xi(t_end) - r),   dxi/dt = omega * (xi - r)
//! ```
//!
//! Segment end values are obtained backwards from the final rest point
//! between the feet. Double supports are cubic Hermite blends between the
//! neighbouring analytic values, the first one starting from the supplied
//! boundary state.

use alloc::vec::Vec;

use nalgebra::Vector2;

use crate::config::InterpolatorConfig;
use crate::error::Result;
use crate::footstep::{Foot, Step};
use crate::spline::{Boundary, CubicSpline};

use super::output::DcmReferences;
use super::phases::{PhaseTimeline, WindowKind};

/// Gravity acceleration used for the DCM time constant, in m/s^2.
pub const GRAVITY: f64 = 9.81;

/// Shortest double support blended with a spline; shorter ones use the
/// analytic solution.
const MIN_BLEND_TIME: f64 = 1e-9;

/// Planar DCM position and velocity at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DcmInitialState {
    /// DCM position in the world frame.
    pub position: Vector2<f64>,
    /// DCM velocity in the world frame.
    pub velocity: Vector2<f64>,
}

impl DcmInitialState {
    /// Create a new state.
    pub fn new(position: Vector2<f64>, velocity: Vector2<f64>) -> Self {
        Self { position, velocity }
    }

    /// Still DCM at `position`.
    pub fn at_rest(position: Vector2<f64>) -> Self {
        Self::new(position, Vector2::zeros())
    }
}

/// VRP of a foot standing on `step`.
fn vrp(step: &Step, foot: Foot, config: &InterpolatorConfig) -> Vector2<f64> {
    step.to_world(&config.zmp.stance(foot))
}

/// Midpoint of the VRPs of two feet.
fn midpoint(left: &Step, right: &Step, config: &InterpolatorConfig) -> Vector2<f64> {
    (vrp(left, Foot::Left, config) + vrp(right, Foot::Right, config)) * 0.5
}

/// DCM at rest between the present feet of a timeline.
pub(crate) fn resting_state(
    left: &Step,
    right: &Step,
    config: &InterpolatorConfig,
) -> DcmInitialState {
    DcmInitialState::at_rest(midpoint(left, right, config))
}

/// Exponential DCM segment around one VRP.
#[derive(Debug, Clone, Copy)]
struct Divergence {
    omega: f64,
    vrp: Vector2<f64>,
    end_time: f64,
    end_value: Vector2<f64>,
}

impl Divergence {
    fn at(&self, time: f64) -> DcmInitialState {
        let position =
            self.vrp + (self.end_value - self.vrp) * libm::exp(self.omega * (time - self.end_time));
        DcmInitialState::new(position, (position - self.vrp) * self.omega)
    }
}

/// Per-axis Hermite blend between two DCM states.
#[derive(Debug, Clone)]
struct Blend {
    x: CubicSpline,
    y: CubicSpline,
}

impl Blend {
    fn new(
        start_time: f64,
        from: DcmInitialState,
        end_time: f64,
        to: DcmInitialState,
    ) -> Result<Self> {
        let axis = |i: usize| {
            CubicSpline::new(
                &[start_time, end_time],
                &[from.position[i], to.position[i]],
                Boundary::velocity(from.velocity[i]),
                Boundary::velocity(to.velocity[i]),
            )
        };
        Ok(Self {
            x: axis(0)?,
            y: axis(1)?,
        })
    }

    fn at(&self, time: f64) -> DcmInitialState {
        let x = self.x.evaluate(time);
        let y = self.y.evaluate(time);
        DcmInitialState::new(
            Vector2::new(x.position, y.position),
            Vector2::new(x.velocity, y.velocity),
        )
    }
}

/// DCM position and velocity at every sample, with boundary states at the
/// merge points.
pub(crate) fn dcm_references(
    timeline: &PhaseTimeline,
    config: &InterpolatorConfig,
    seed: &DcmInitialState,
) -> Result<DcmReferences> {
    let omega = libm::sqrt(GRAVITY / config.com.nominal_height);
    let blocks = timeline.double_support();

    // VRP under the support foot of every swing
    let mut feet = [
        *timeline.present_step(Foot::Left),
        *timeline.present_step(Foot::Right),
    ];
    let mut vrps = Vec::with_capacity(blocks.len() - 1);
    for window in timeline.windows() {
        if let WindowKind::Swing {
            foot, touch_down, ..
        } = window.kind
        {
            let support = foot.other();
            vrps.push(vrp(&feet[usize::from(!support.is_left())], support, config));
            feet[usize::from(!foot.is_left())] = touch_down;
        }
    }
    let rest = midpoint(&feet[0], &feet[1], config);

    // The VRP switches in the middle of the double support after each swing
    let switch_times: Vec<f64> = blocks[1..].iter().map(|&(a, b)| 0.5 * (a + b)).collect();
    let mut segments = Vec::with_capacity(vrps.len());
    let mut end_value = rest;
    for (k, vrp) in vrps.iter().enumerate().rev() {
        let segment = Divergence {
            omega,
            vrp: *vrp,
            end_time: switch_times[k],
            end_value,
        };
        if k > 0 {
            end_value = segment.at(switch_times[k - 1]).position;
        }
        segments.push(segment);
    }
    segments.reverse();

    let last = segments.len() - 1;
    let mut blends = Vec::with_capacity(blocks.len());
    for (k, &(start, end)) in blocks.iter().enumerate() {
        let from = if k == 0 { *seed } else { segments[k - 1].at(start) };
        let to = if k <= last {
            segments[k].at(end)
        } else {
            DcmInitialState::at_rest(rest)
        };
        let blend = if end - start > MIN_BLEND_TIME {
            Some(Blend::new(start, from, end, to)?)
        } else {
            None
        };
        blends.push(blend);
    }

    let grid = timeline.grid();
    let sample_block = |block: usize, time: f64| match &blends[block] {
        Some(blend) => blend.at(time),
        None => segments[block.saturating_sub(1).min(last)].at(time),
    };

    let mut position = Vec::with_capacity(timeline.len());
    let mut velocity = Vec::with_capacity(timeline.len());
    let mut swings = 0;
    for window in timeline.windows() {
        for i in window.start..window.end {
            let time = grid.time(i);
            let state = if window.is_swing() {
                segments[swings].at(time)
            } else {
                sample_block(swings, time)
            };
            position.push(state.position);
            velocity.push(state.velocity);
        }
        if window.is_swing() {
            swings += 1;
        }
    }
    let final_state = sample_block(swings, timeline.time_at(timeline.len() - 1));
    position.push(final_state.position);
    velocity.push(final_state.velocity);

    let last_sample = position.len() - 1;
    let initial_states = timeline
        .merge_points()
        .iter()
        .map(|&m| {
            let i = m.min(last_sample);
            DcmInitialState::new(position[i], velocity[i])
        })
        .collect();

    Ok(DcmReferences {
        position,
        velocity,
        initial_states,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footstep::FootstepSequence;

    fn timeline(config: &InterpolatorConfig) -> PhaseTimeline {
        let left = FootstepSequence::from_steps(
            Foot::Left,
            [Step::new(0.0, 0.1, 0.0, 0.0), Step::new(0.2, 0.1, 0.0, 2.0)],
        )
        .unwrap();
        let right = FootstepSequence::from_steps(
            Foot::Right,
            [Step::new(0.0, -0.1, 0.0, 0.0), Step::new(0.1, -0.1, 0.0, 1.0)],
        )
        .unwrap();
        PhaseTimeline::new(&left, &right, 0.0, 0.01, config).unwrap()
    }

    #[test]
    fn test_starts_at_seed_and_ends_at_rest() {
        let config = InterpolatorConfig::default();
        let timeline = timeline(&config);
        let seed = resting_state(
            timeline.present_step(Foot::Left),
            timeline.present_step(Foot::Right),
            &config,
        );
        let references = dcm_references(&timeline, &config, &seed).unwrap();

        assert_eq!(references.position.len(), timeline.len());
        assert!((references.position[0] - Vector2::new(0.0, 0.0)).norm() < 1e-12);
        let last = references.position.len() - 1;
        assert!((references.position[last] - Vector2::new(0.15, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_velocity_diverges_from_vrp_in_swing() {
        let config = InterpolatorConfig::default();
        let timeline = timeline(&config);
        let seed = DcmInitialState::at_rest(Vector2::zeros());
        let references = dcm_references(&timeline, &config, &seed).unwrap();

        let omega = libm::sqrt(GRAVITY / config.com.nominal_height);
        // Right foot swings, left foot (0, 0.1) supports
        let vrp = Vector2::new(0.0, 0.1);
        let expected = (references.position[50] - vrp) * omega;
        assert!((references.velocity[50] - expected).norm() < 1e-12);
    }

    #[test]
    fn test_continuous_across_windows() {
        let config = InterpolatorConfig::default();
        let timeline = timeline(&config);
        let seed = DcmInitialState::at_rest(Vector2::zeros());
        let references = dcm_references(&timeline, &config, &seed).unwrap();

        let dt = timeline.dt();
        for pair in references.position.windows(2) {
            // Speeds stay below 3 m/s for this plan
            assert!((pair[1] - pair[0]).norm() < 3.0 * dt);
        }
        for i in [50, 110, 150] {
            let fd = (references.position[i + 1] - references.position[i - 1]) / (2.0 * dt);
            assert!((fd - references.velocity[i]).norm() < 0.02);
        }
    }
}
