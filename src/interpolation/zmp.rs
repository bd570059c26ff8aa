//! Weight distribution and ZMP references.
//!
//! The weight borne by the left foot is shaped once; the right foot's weight
//! is its mirror `1 - w`. Local ZMP offsets are computed by one routine
//! parametrized by the foot, so both sides share the same shaping.

use alloc::vec::Vec;

use nalgebra::{Isometry3, Point3, Vector2};

use crate::config::ZmpOffsets;
use crate::error::Result;
use crate::footstep::Foot;
use crate::spline::{Boundary, CubicSpline};

use super::output::WeightReferences;
use super::phases::{PhaseTimeline, WindowKind};

/// Value, velocity and acceleration of a scalar reference at one instant.
///
/// Used as the boundary condition of the weight-in-left trajectory when
/// splicing a new plan onto a running one.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InitialState {
    /// Value.
    pub position: f64,
    /// First time derivative.
    pub velocity: f64,
    /// Second time derivative.
    pub acceleration: f64,
}

impl InitialState {
    /// Create a new state.
    pub fn new(position: f64, velocity: f64, acceleration: f64) -> Self {
        Self {
            position,
            velocity,
            acceleration,
        }
    }

    /// Still state at `position`.
    pub fn at_rest(position: f64) -> Self {
        Self::new(position, 0.0, 0.0)
    }

    /// Weight shared equally by both feet, at rest.
    pub fn centered() -> Self {
        Self::at_rest(0.5)
    }
}

/// Boundary condition of weight/ZMP mode.
///
/// Pairs the weight in the left foot with the local ZMP of both feet at the
/// same sample, so that a new trajectory starts where the executed one was.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightBoundary {
    /// Weight in the left foot.
    pub weight: InitialState,
    /// Local ZMP of the (left, right) feet, each in its own frame.
    ///
    /// Without it, the foot receiving weight first starts halfway between
    /// its initial switch offset and its stance offset, and the other foot
    /// starts at its stance offset.
    pub local_zmp: Option<[Vector2<f64>; 2]>,
}

impl WeightBoundary {
    /// Boundary on the weight only.
    pub fn new(weight: InitialState) -> Self {
        Self {
            weight,
            local_zmp: None,
        }
    }

    /// Boundary on the weight and on both local ZMPs.
    pub fn with_local_zmp(weight: InitialState, left: Vector2<f64>, right: Vector2<f64>) -> Self {
        Self {
            weight,
            local_zmp: Some([left, right]),
        }
    }

    /// Local ZMP of one foot, if carried.
    pub fn zmp(&self, foot: Foot) -> Option<Vector2<f64>> {
        self.local_zmp.map(|zmp| zmp[usize::from(!foot.is_left())])
    }
}

impl From<InitialState> for WeightBoundary {
    fn from(weight: InitialState) -> Self {
        Self::new(weight)
    }
}

/// Weight in the left foot, with derivatives, at every sample.
pub(crate) fn weight_states(
    timeline: &PhaseTimeline,
    seed: &InitialState,
) -> Result<Vec<InitialState>> {
    let grid = timeline.grid();
    let mut states = Vec::with_capacity(timeline.len());
    let mut current = seed.position;
    let mut seeded = false;

    for window in timeline.windows() {
        match window.kind {
            WindowKind::Transfer { target, .. } => {
                let spline = if seeded {
                    CubicSpline::blend(window.start_time, current, window.end_time, target)?
                } else {
                    CubicSpline::new(
                        &[window.start_time, window.end_time],
                        &[seed.position, target],
                        Boundary::full(seed.velocity, seed.acceleration),
                        Boundary::REST,
                    )?
                };
                states.extend((window.start..window.end).map(|i| {
                    let sample = spline.evaluate(grid.time(i));
                    InitialState::new(sample.position, sample.velocity, sample.acceleration)
                }));
                current = target;
                seeded = true;
            }
            WindowKind::Hold | WindowKind::Swing { .. } => {
                states.extend((window.start..window.end).map(|_| InitialState::at_rest(current)));
            }
        }
    }
    states.push(InitialState::at_rest(current));

    Ok(states)
}

/// Complement of a weight fraction at every sample.
pub(crate) fn mirror(weights: &[f64]) -> Vec<f64> {
    weights.iter().map(|w| 1.0 - w).collect()
}

/// Zero-velocity cubic from 0 to 1.
#[inline]
fn smoothstep(s: f64) -> f64 {
    s * s * (3.0 - 2.0 * s)
}

/// Local ZMP of `foot` where a generation starts without a carried value.
fn resting_zmp(timeline: &PhaseTimeline, foot: Foot, offsets: &ZmpOffsets) -> Vector2<f64> {
    let stance = offsets.stance(foot);
    match timeline.windows().first().map(|w| w.kind) {
        Some(WindowKind::Transfer { receiver, .. }) if receiver == foot => {
            let switch_init = offsets.switch_init(foot);
            switch_init + (stance - switch_init) * smoothstep(0.5)
        }
        _ => stance,
    }
}

/// Local ZMP of `foot`, in its own frame, at every sample.
///
/// The first switch moves from `seed` to the stance offset. A foot that
/// receives weight right after landing blends from its initial switch offset
/// to its stance offset; an airborne foot keeps the last value.
pub(crate) fn local_zmp(
    timeline: &PhaseTimeline,
    foot: Foot,
    offsets: &ZmpOffsets,
    seed: Option<Vector2<f64>>,
) -> Vec<Vector2<f64>> {
    let grid = timeline.grid();
    let stance = offsets.stance(foot);
    let switch_init = offsets.switch_init(foot);
    let blend = |from: Vector2<f64>, s: f64| from + (stance - from) * smoothstep(s);
    let start = seed.unwrap_or_else(|| resting_zmp(timeline, foot, offsets));
    let mut zmp = Vec::with_capacity(timeline.len());
    let mut last = start;

    for (k, window) in timeline.windows().iter().enumerate() {
        for i in window.start..window.end {
            let progress = window.progress(grid.time(i));
            last = match window.kind {
                WindowKind::Transfer { .. } if k == 0 => blend(start, progress),
                WindowKind::Transfer {
                    receiver,
                    from_heel: true,
                    ..
                } if receiver == foot => blend(switch_init, progress),
                WindowKind::Swing { foot: swinging, .. } if swinging == foot => last,
                _ => stance,
            };
            zmp.push(last);
        }
    }
    zmp.push(stance);

    zmp
}

/// Weighted sum of both local ZMPs expressed in the world frame.
pub(crate) fn global_zmp(
    left_poses: &[Isometry3<f64>],
    right_poses: &[Isometry3<f64>],
    weight_in_left: &[f64],
    left_zmp: &[Vector2<f64>],
    right_zmp: &[Vector2<f64>],
) -> Vec<Vector2<f64>> {
    let world = |pose: &Isometry3<f64>, local: &Vector2<f64>| {
        let p = pose.transform_point(&Point3::new(local.x, local.y, 0.0));
        Vector2::new(p.x, p.y)
    };
    left_poses
        .iter()
        .zip(right_poses)
        .zip(weight_in_left)
        .zip(left_zmp.iter().zip(right_zmp))
        .map(|(((left, right), w), (zl, zr))| world(left, zl) * *w + world(right, zr) * (1.0 - w))
        .collect()
}

/// Weight and ZMP references with boundary states at every merge point.
pub(crate) fn weight_references(
    timeline: &PhaseTimeline,
    left_poses: &[Isometry3<f64>],
    right_poses: &[Isometry3<f64>],
    offsets: &ZmpOffsets,
    seed: &WeightBoundary,
) -> Result<WeightReferences> {
    let states = weight_states(timeline, &seed.weight)?;
    let weight_in_left: Vec<f64> = states.iter().map(|s| s.position).collect();
    let weight_in_right = mirror(&weight_in_left);
    let left_zmp = local_zmp(timeline, Foot::Left, offsets, seed.zmp(Foot::Left));
    let right_zmp = local_zmp(timeline, Foot::Right, offsets, seed.zmp(Foot::Right));
    let global_zmp = global_zmp(left_poses, right_poses, &weight_in_left, &left_zmp, &right_zmp);

    let last = states.len() - 1;
    let initial_states = timeline
        .merge_points()
        .iter()
        .map(|&m| {
            let m = m.min(last);
            WeightBoundary::with_local_zmp(states[m], left_zmp[m], right_zmp[m])
        })
        .collect();

    Ok(WeightReferences {
        weight_in_left,
        weight_in_right,
        left_zmp,
        right_zmp,
        global_zmp,
        initial_states,
    })
}
