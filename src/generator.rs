//! Replanning coordinator.
//!
//! Owns the committed footsteps of both feet and the last generated
//! trajectory. A fresh generation starts from caller-supplied footsteps; a
//! replanning call trims the committed footsteps to the present ones,
//! applies measured corrections, asks the planner for the rest of the
//! horizon and interpolates again from a boundary condition taken at a merge
//! point of the running trajectory.
//!
//! Every call works on copies and commits only after a successful
//! interpolation, so a failed call leaves the coordinator untouched.

use nalgebra::{Isometry3, Vector2};

use crate::config::InterpolatorConfig;
use crate::error::{Error, Result, SequencingError};
use crate::footstep::{FixedPlan, Foot, FootstepPlanner, FootstepSequence, Step};
use crate::interpolation::{
    BoundaryCondition, FeetInterpolator, GeneratedTrajectory, GenerationMode,
};

/// Measured planar pose of a grounded foot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasuredPose {
    /// Planar position in the world frame.
    pub position: Vector2<f64>,
    /// Yaw in radians.
    pub angle: f64,
}

impl MeasuredPose {
    /// Create a new measured pose.
    pub fn new(x: f64, y: f64, angle: f64) -> Self {
        Self {
            position: Vector2::new(x, y),
            angle,
        }
    }

    /// Planar projection of a 3D foot pose.
    pub fn from_isometry(pose: &Isometry3<f64>) -> Self {
        let (_, _, yaw) = pose.rotation.euler_angles();
        Self {
            position: pose.translation.vector.xy(),
            angle: yaw,
        }
    }

    fn is_finite(&self) -> bool {
        self.position.x.is_finite() && self.position.y.is_finite() && self.angle.is_finite()
    }
}

/// Measurements replacing the present steps at a replanning call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeasuredFeet {
    /// Correct the present left step with a measured pose.
    Left(MeasuredPose),
    /// Correct the present right step with a measured pose.
    Right(MeasuredPose),
    /// Correct both present steps with measured poses.
    Both {
        /// Measured left pose.
        left: MeasuredPose,
        /// Measured right pose.
        right: MeasuredPose,
    },
    /// Replace both present steps with raw measured steps.
    Steps {
        /// Measured left step.
        left: Step,
        /// Measured right step.
        right: Step,
    },
}

/// Lifecycle of a [`TrajectoryGenerator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeneratorState {
    /// No trajectory generated yet.
    Fresh,
    /// A trajectory starting at `last_init_time` is running.
    Replanning {
        /// Start time of the last successful generation.
        last_init_time: f64,
    },
}

/// Footstep-to-trajectory coordinator with continuity across replanning.
///
/// # Example
///
/// ```rust,ignore
/// use footstep_interpolator::{FixedPlan, GenerationMode, TrajectoryGenerator};
///
/// let mut generator = TrajectoryGenerator::new(config, FixedPlan::new())?;
/// let trajectory =
///     generator.generate_at_rest(left, right, 0.0, 0.01, 5.0, GenerationMode::Weight)?;
/// let merge = trajectory.merge_points[0];
///
/// let next = generator.regenerate_from_merge_point(merge, 10.0, None)?;
/// ```
#[derive(Debug, Clone)]
pub struct TrajectoryGenerator<P = FixedPlan> {
    interpolator: FeetInterpolator,
    planner: P,
    left: FootstepSequence,
    right: FootstepSequence,
    state: GeneratorState,
    last: Option<GeneratedTrajectory>,
}

fn check_horizon(init_time: f64, end_time: f64) -> Result<()> {
    if !(end_time >= init_time) {
        return Err(Error::Sequencing(SequencingError::EndBeforeInit {
            init_time,
            end_time,
        }));
    }
    Ok(())
}

/// Replace the single present step of `sequence`.
fn replace_present(sequence: &mut FootstepSequence, step: Step) -> Result<()> {
    sequence.remove_last_step();
    sequence.add_step(step)
}

fn correct_present(sequence: &mut FootstepSequence, measured: &MeasuredPose) -> Result<()> {
    let foot = sequence.foot();
    if !measured.is_finite() {
        return Err(Error::Sequencing(SequencingError::InvalidMeasuredStep(foot)));
    }
    let present = *sequence
        .last_step()
        .ok_or(Error::Sequencing(SequencingError::EmptySequence(foot)))?;
    replace_present(sequence, present.corrected(measured.position, measured.angle))
}

fn measured_present(sequence: &mut FootstepSequence, step: Step, init_time: f64) -> Result<()> {
    if !(step.is_finite() && step.impact_time <= init_time) {
        return Err(Error::Sequencing(SequencingError::InvalidMeasuredStep(
            sequence.foot(),
        )));
    }
    replace_present(sequence, step)
}

impl<P: FootstepPlanner> TrajectoryGenerator<P> {
    /// Create a coordinator from a configuration and a footstep planner.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: InterpolatorConfig, planner: P) -> Result<Self> {
        Ok(Self {
            interpolator: FeetInterpolator::new(config)?,
            planner,
            left: FootstepSequence::new(Foot::Left),
            right: FootstepSequence::new(Foot::Right),
            state: GeneratorState::Fresh,
            last: None,
        })
    }

    /// Get the interpolator configuration.
    pub fn config(&self) -> &InterpolatorConfig {
        self.interpolator.config()
    }

    /// Get the interpolator configuration for modification through its
    /// validating setters.
    pub fn config_mut(&mut self) -> &mut InterpolatorConfig {
        self.interpolator.config_mut()
    }

    /// Get the footstep planner.
    pub fn planner(&self) -> &P {
        &self.planner
    }

    /// Get the footstep planner mutably.
    pub fn planner_mut(&mut self) -> &mut P {
        &mut self.planner
    }

    /// Committed left footsteps.
    pub fn left_steps(&self) -> &FootstepSequence {
        &self.left
    }

    /// Committed right footsteps.
    pub fn right_steps(&self) -> &FootstepSequence {
        &self.right
    }

    /// Current lifecycle state.
    pub fn state(&self) -> GeneratorState {
        self.state
    }

    /// Last successfully generated trajectory.
    pub fn last_trajectory(&self) -> Option<&GeneratedTrajectory> {
        self.last.as_ref()
    }

    /// Generate from caller-supplied footsteps, discarding any previous plan.
    ///
    /// The first step of each sequence is the foot's present placement; the
    /// planner may append steps up to `end_time`.
    ///
    /// # Errors
    ///
    /// Returns an error if the horizon is inverted, the planner fails, or
    /// the footsteps cannot be interpolated.
    pub fn generate(
        &mut self,
        left: FootstepSequence,
        right: FootstepSequence,
        init_time: f64,
        dt: f64,
        end_time: f64,
        boundary: BoundaryCondition,
    ) -> Result<&GeneratedTrajectory> {
        self.plan_and_commit(left, right, init_time, dt, end_time, Some(boundary), boundary.mode())
            .inspect_err(|e| log::warn!("Fresh generation at {} rejected: {}", init_time, e))
    }

    /// Generate from caller-supplied footsteps, starting at rest.
    ///
    /// # Errors
    ///
    /// Same as [`generate`](Self::generate).
    pub fn generate_at_rest(
        &mut self,
        left: FootstepSequence,
        right: FootstepSequence,
        init_time: f64,
        dt: f64,
        end_time: f64,
        mode: GenerationMode,
    ) -> Result<&GeneratedTrajectory> {
        self.plan_and_commit(left, right, init_time, dt, end_time, None, mode)
            .inspect_err(|e| log::warn!("Fresh generation at {} rejected: {}", init_time, e))
    }

    /// Generate with the planner filling both sequences from scratch,
    /// starting at rest.
    ///
    /// # Errors
    ///
    /// Same as [`generate`](Self::generate).
    pub fn generate_from_scratch(
        &mut self,
        init_time: f64,
        dt: f64,
        end_time: f64,
        mode: GenerationMode,
    ) -> Result<&GeneratedTrajectory> {
        let left = FootstepSequence::new(Foot::Left);
        let right = FootstepSequence::new(Foot::Right);
        self.plan_and_commit(left, right, init_time, dt, end_time, None, mode)
            .inspect_err(|e| log::warn!("Generation from scratch at {} rejected: {}", init_time, e))
    }

    /// Replan from `init_time`, seeding the new trajectory with `boundary`.
    ///
    /// Committed steps landed after `init_time` are discarded, `measured`
    /// corrects the present steps, and the planner extends the plan up to
    /// `end_time`.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the coordinator untouched, if no fresh
    /// generation happened yet, `init_time` precedes the previous start time
    /// or the present step of a foot, a measurement is invalid, the planner
    /// fails, or the new plan cannot be interpolated.
    pub fn regenerate(
        &mut self,
        init_time: f64,
        dt: f64,
        end_time: f64,
        boundary: BoundaryCondition,
        measured: Option<MeasuredFeet>,
    ) -> Result<&GeneratedTrajectory> {
        let (left, right) = match self.replan(init_time, end_time, measured) {
            Ok(sequences) => sequences,
            Err(e) => {
                log::warn!("Replanning at {} rejected: {}", init_time, e);
                return Err(e);
            }
        };
        self.plan_and_commit(left, right, init_time, dt, end_time, Some(boundary), boundary.mode())
            .inspect_err(|e| log::warn!("Replanning at {} rejected: {}", init_time, e))
    }

    /// Replan from a merge point of the last trajectory, seeded with the
    /// boundary condition it reports there and keeping its sampling period.
    ///
    /// # Errors
    ///
    /// Same as [`regenerate`](Self::regenerate), and an error if
    /// `merge_point` is not a merge point inside the last trajectory.
    pub fn regenerate_from_merge_point(
        &mut self,
        merge_point: usize,
        end_time: f64,
        measured: Option<MeasuredFeet>,
    ) -> Result<&GeneratedTrajectory> {
        let last = self
            .last
            .as_ref()
            .ok_or(Error::Sequencing(SequencingError::NotInitialized))?;
        let boundary = last
            .merge_points
            .iter()
            .position(|&m| m == merge_point && m < last.len())
            .and_then(|index| last.boundary_at_merge_point(index))
            .ok_or(Error::Sequencing(SequencingError::NotAMergePoint(merge_point)))?;
        let init_time = last.time_at(merge_point);
        let dt = last.dt;
        self.regenerate(init_time, dt, end_time, boundary, measured)
    }

    /// Trimmed and corrected copies of the committed footsteps.
    fn replan(
        &self,
        init_time: f64,
        end_time: f64,
        measured: Option<MeasuredFeet>,
    ) -> Result<(FootstepSequence, FootstepSequence)> {
        let GeneratorState::Replanning { last_init_time } = self.state else {
            return Err(Error::Sequencing(SequencingError::NotInitialized));
        };
        if !(init_time >= last_init_time) {
            return Err(Error::Sequencing(SequencingError::NonMonotonicStart {
                previous: last_init_time,
                requested: init_time,
            }));
        }
        check_horizon(init_time, end_time)?;

        let mut left = self.left.clone();
        let mut right = self.right.clone();
        left.keep_only_present_step(init_time)?;
        right.keep_only_present_step(init_time)?;

        match measured {
            None => {}
            Some(MeasuredFeet::Left(pose)) => correct_present(&mut left, &pose)?,
            Some(MeasuredFeet::Right(pose)) => correct_present(&mut right, &pose)?,
            Some(MeasuredFeet::Both {
                left: left_pose,
                right: right_pose,
            }) => {
                correct_present(&mut left, &left_pose)?;
                correct_present(&mut right, &right_pose)?;
            }
            Some(MeasuredFeet::Steps {
                left: left_step,
                right: right_step,
            }) => {
                measured_present(&mut left, left_step, init_time)?;
                measured_present(&mut right, right_step, init_time)?;
            }
        }

        Ok((left, right))
    }

    /// Extend, interpolate and commit.
    #[allow(clippy::too_many_arguments)]
    fn plan_and_commit(
        &mut self,
        mut left: FootstepSequence,
        mut right: FootstepSequence,
        init_time: f64,
        dt: f64,
        end_time: f64,
        boundary: Option<BoundaryCondition>,
        mode: GenerationMode,
    ) -> Result<&GeneratedTrajectory> {
        check_horizon(init_time, end_time)?;
        self.planner.extend(&mut left, &mut right, init_time, end_time)?;

        let boundary = match boundary {
            Some(boundary) => boundary,
            None => self.interpolator.resting_boundary(mode, &left, &right)?,
        };
        let trajectory = self
            .interpolator
            .interpolate(&left, &right, init_time, dt, &boundary)?;

        log::debug!(
            "Generated {} samples from {} ({} left, {} right steps, {} merge points)",
            trajectory.len(),
            init_time,
            left.len(),
            right.len(),
            trajectory.merge_points.len()
        );

        self.left = left;
        self.right = right;
        self.state = GeneratorState::Replanning {
            last_init_time: init_time,
        };
        Ok(self.last.insert(trajectory))
    }
}
