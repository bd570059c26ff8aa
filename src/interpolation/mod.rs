//! Footstep interpolation.
//!
//! Converts two footstep sequences into dense references:
//! - `phases`: per-sample support phases, phase shifts and merge points
//! - `feet`: swing and stance foot poses
//! - `zmp`: weight distribution and ZMP
//! - `com`: CoM height
//! - `dcm`: DCM references, the alternative to weight/ZMP

mod com;
mod dcm;
mod feet;
mod output;
mod phases;
mod zmp;

pub use dcm::{DcmInitialState, GRAVITY};
pub use feet::SwingTrajectory;
pub use output::{
    BoundaryCondition, DcmReferences, GeneratedTrajectory, GenerationMode, References,
    WeightReferences,
};
pub use phases::{PhaseTimeline, StepPhase, MAX_SAMPLES};
pub use zmp::{InitialState, WeightBoundary};

use crate::config::{validate_config, validate_sampling_time, InterpolatorConfig};
use crate::error::{Error, Result, SequencingError};
use crate::footstep::{Foot, FootstepSequence};

/// Stateless converter from footsteps to dense references.
///
/// Every call recomputes the whole timeline; nothing is carried over between
/// calls except through the supplied boundary condition.
///
/// # Example
///
/// ```rust,ignore
/// use footstep_interpolator::{BoundaryCondition, FeetInterpolator, InitialState};
///
/// let interpolator = FeetInterpolator::new(config)?;
/// let trajectory = interpolator.interpolate(
///     &left,
///     &right,
///     0.0,
///     0.01,
///     &BoundaryCondition::Weight(InitialState::centered().into()),
/// )?;
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeetInterpolator {
    config: InterpolatorConfig,
}

impl FeetInterpolator {
    /// Create an interpolator from a validated configuration.
    pub fn new(config: InterpolatorConfig) -> Result<Self> {
        validate_config(&config)?;
        Ok(Self { config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &InterpolatorConfig {
        &self.config
    }

    /// Get the configuration for modification through its validating setters.
    pub fn config_mut(&mut self) -> &mut InterpolatorConfig {
        &mut self.config
    }

    /// Boundary condition of a robot standing still on the present steps.
    ///
    /// Weight mode starts with the weight centred and no carried local ZMP;
    /// DCM mode starts with the DCM between the stance ZMPs of both feet.
    ///
    /// # Errors
    ///
    /// Returns a sequencing error if a sequence is empty.
    pub fn resting_boundary(
        &self,
        mode: GenerationMode,
        left: &FootstepSequence,
        right: &FootstepSequence,
    ) -> Result<BoundaryCondition> {
        match mode {
            GenerationMode::Weight => {
                Ok(BoundaryCondition::Weight(InitialState::centered().into()))
            }
            GenerationMode::Dcm => {
                let present = |sequence: &FootstepSequence, foot: Foot| {
                    sequence
                        .first_step()
                        .copied()
                        .ok_or(Error::Sequencing(SequencingError::EmptySequence(foot)))
                };
                let left = present(left, Foot::Left)?;
                let right = present(right, Foot::Right)?;
                Ok(BoundaryCondition::Dcm(dcm::resting_state(&left, &right, &self.config)))
            }
        }
    }

    /// Interpolate `left` and `right` on a grid of period `dt` starting at
    /// `init_time`.
    ///
    /// The first step of each sequence is the foot's present placement. The
    /// variant of `boundary` selects weight/ZMP or DCM references.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or `dt` is invalid, the
    /// footsteps cannot be ordered around `init_time`, or the timing leaves a
    /// switch or swing without samples. No partial output is produced.
    pub fn interpolate(
        &self,
        left: &FootstepSequence,
        right: &FootstepSequence,
        init_time: f64,
        dt: f64,
        boundary: &BoundaryCondition,
    ) -> Result<GeneratedTrajectory> {
        validate_config(&self.config)?;
        validate_sampling_time(dt)?;

        let timeline = PhaseTimeline::new(left, right, init_time, dt, &self.config)?;
        let left_foot = feet::foot_poses(&timeline, Foot::Left, &self.config)?;
        let right_foot = feet::foot_poses(&timeline, Foot::Right, &self.config)?;
        let com = com::com_height(&timeline, &self.config.com)?;

        let references = match boundary {
            BoundaryCondition::Weight(seed) => References::Weight(zmp::weight_references(
                &timeline,
                &left_foot,
                &right_foot,
                &self.config.zmp,
                seed,
            )?),
            BoundaryCondition::Dcm(seed) => {
                References::Dcm(dcm::dcm_references(&timeline, &self.config, seed)?)
            }
        };

        Ok(GeneratedTrajectory {
            init_time,
            dt,
            left_contact: timeline.contacts(Foot::Left),
            right_contact: timeline.contacts(Foot::Right),
            left_phases: timeline.left_phases().to_vec(),
            right_phases: timeline.right_phases().to_vec(),
            phase_shifts: timeline.phase_shifts().to_vec(),
            merge_points: timeline.merge_points().to_vec(),
            left_fixed: timeline.left_fixed().to_vec(),
            left_foot,
            right_foot,
            com_height: com.height,
            com_height_acceleration: com.acceleration,
            references,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::footstep::Step;

    fn plan() -> (FootstepSequence, FootstepSequence) {
        (
            FootstepSequence::from_steps(Foot::Left, [Step::new(0.0, 0.1, 0.0, 0.0)]).unwrap(),
            FootstepSequence::from_steps(
                Foot::Right,
                [Step::new(0.0, -0.1, 0.0, 0.0), Step::new(0.1, -0.1, 0.0, 1.0)],
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_every_output_shares_the_grid() {
        let (left, right) = plan();
        let interpolator = FeetInterpolator::default();
        let boundary = BoundaryCondition::Weight(InitialState::centered().into());
        let trajectory = interpolator
            .interpolate(&left, &right, 0.0, 0.01, &boundary)
            .unwrap();

        let len = trajectory.len();
        assert_eq!(len, 101);
        assert_eq!(trajectory.left_foot.len(), len);
        assert_eq!(trajectory.right_contact.len(), len);
        assert_eq!(trajectory.com_height_acceleration.len(), len);
        let weight = trajectory.weight().unwrap();
        assert_eq!(weight.global_zmp.len(), len);
        assert_eq!(weight.initial_states.len(), trajectory.merge_points.len());
    }

    #[test]
    fn test_dcm_mode_has_no_weights() {
        let (left, right) = plan();
        let interpolator = FeetInterpolator::default();
        let boundary = interpolator
            .resting_boundary(GenerationMode::Dcm, &left, &right)
            .unwrap();
        let trajectory = interpolator.interpolate(&left, &right, 0.0, 0.01, &boundary).unwrap();

        assert_eq!(trajectory.mode(), GenerationMode::Dcm);
        assert!(trajectory.weight().is_none());
        assert_eq!(trajectory.dcm().unwrap().position.len(), trajectory.len());
    }

    #[test]
    fn test_invalid_inputs_are_rejected() {
        let (left, right) = plan();
        let mut interpolator = FeetInterpolator::default();
        let boundary = BoundaryCondition::Weight(InitialState::centered().into());
        assert!(matches!(
            interpolator.interpolate(&left, &right, 0.0, 0.0, &boundary),
            Err(Error::Config(ConfigError::InvalidSamplingTime(_)))
        ));

        interpolator.config_mut().switch_ratio = 1.5;
        assert!(matches!(
            interpolator.interpolate(&left, &right, 0.0, 0.01, &boundary),
            Err(Error::Config(ConfigError::InvalidSwitchRatio(_)))
        ));
    }
}
