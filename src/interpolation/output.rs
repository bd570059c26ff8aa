//! Dense trajectories produced by one interpolation call.

use alloc::vec::Vec;

use nalgebra::{Isometry3, Vector2};

use super::dcm::DcmInitialState;
use super::phases::StepPhase;
use super::zmp::WeightBoundary;

/// Boundary condition seeding the first sample of a generation.
///
/// The variant selects the generation mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryCondition {
    /// Weight/ZMP mode, seeded with the weight in the left foot and,
    /// optionally, the local ZMP of both feet.
    Weight(WeightBoundary),
    /// DCM mode, seeded with the planar DCM.
    Dcm(DcmInitialState),
}

impl BoundaryCondition {
    /// Generation mode selected by this boundary condition.
    pub fn mode(&self) -> GenerationMode {
        match self {
            BoundaryCondition::Weight(_) => GenerationMode::Weight,
            BoundaryCondition::Dcm(_) => GenerationMode::Dcm,
        }
    }
}

/// Which references a generation produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GenerationMode {
    /// Weight distribution and ZMP.
    #[default]
    Weight,
    /// Divergent Component of Motion.
    Dcm,
}

/// Weight and ZMP references.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightReferences {
    /// Fraction of the weight on the left foot.
    pub weight_in_left: Vec<f64>,
    /// Fraction of the weight on the right foot, `1 - weight_in_left`.
    pub weight_in_right: Vec<f64>,
    /// Local ZMP in the left foot frame.
    pub left_zmp: Vec<Vector2<f64>>,
    /// Local ZMP in the right foot frame.
    pub right_zmp: Vec<Vector2<f64>>,
    /// Weighted ZMP in the world frame.
    pub global_zmp: Vec<Vector2<f64>>,
    /// Weight and local ZMP state at every merge point.
    pub initial_states: Vec<WeightBoundary>,
}

/// DCM references.
#[derive(Debug, Clone, PartialEq)]
pub struct DcmReferences {
    /// DCM position in the world frame.
    pub position: Vec<Vector2<f64>>,
    /// DCM velocity in the world frame.
    pub velocity: Vec<Vector2<f64>>,
    /// DCM state at every merge point.
    pub initial_states: Vec<DcmInitialState>,
}

/// References of the selected generation mode.
#[derive(Debug, Clone, PartialEq)]
pub enum References {
    /// Weight/ZMP mode output.
    Weight(WeightReferences),
    /// DCM mode output.
    Dcm(DcmReferences),
}

/// Every dense reference of one generation, sharing one sample grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedTrajectory {
    /// Time of the first sample.
    pub init_time: f64,
    /// Sampling period.
    pub dt: f64,
    /// Phase of the left foot.
    pub left_phases: Vec<StepPhase>,
    /// Phase of the right foot.
    pub right_phases: Vec<StepPhase>,
    /// Exclusive end of every phase segment, ending with the sample count.
    pub phase_shifts: Vec<usize>,
    /// Samples where the next generation may start, ending with the sample count.
    pub merge_points: Vec<usize>,
    /// Left foot pose.
    pub left_foot: Vec<Isometry3<f64>>,
    /// Right foot pose.
    pub right_foot: Vec<Isometry3<f64>>,
    /// Left foot contact.
    pub left_contact: Vec<bool>,
    /// Right foot contact.
    pub right_contact: Vec<bool>,
    /// Whether the left foot is the fixed foot.
    pub left_fixed: Vec<bool>,
    /// CoM height.
    pub com_height: Vec<f64>,
    /// CoM height second derivative.
    pub com_height_acceleration: Vec<f64>,
    /// Weight/ZMP or DCM references.
    pub references: References,
}

impl GeneratedTrajectory {
    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.left_phases.len()
    }

    /// Check if there are no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.left_phases.is_empty()
    }

    /// Time of sample `index`.
    #[inline]
    pub fn time_at(&self, index: usize) -> f64 {
        self.init_time + index as f64 * self.dt
    }

    /// Time of the last sample.
    pub fn end_time(&self) -> f64 {
        self.time_at(self.len().saturating_sub(1))
    }

    /// Generation mode of the references.
    pub fn mode(&self) -> GenerationMode {
        match self.references {
            References::Weight(_) => GenerationMode::Weight,
            References::Dcm(_) => GenerationMode::Dcm,
        }
    }

    /// Weight/ZMP references, if generated in weight mode.
    pub fn weight(&self) -> Option<&WeightReferences> {
        match &self.references {
            References::Weight(weight) => Some(weight),
            References::Dcm(_) => None,
        }
    }

    /// DCM references, if generated in DCM mode.
    pub fn dcm(&self) -> Option<&DcmReferences> {
        match &self.references {
            References::Dcm(dcm) => Some(dcm),
            References::Weight(_) => None,
        }
    }

    /// Boundary condition at `merge_points()[index]`.
    pub fn boundary_at_merge_point(&self, index: usize) -> Option<BoundaryCondition> {
        match &self.references {
            References::Weight(weight) => weight
                .initial_states
                .get(index)
                .copied()
                .map(BoundaryCondition::Weight),
            References::Dcm(dcm) => dcm
                .initial_states
                .get(index)
                .copied()
                .map(BoundaryCondition::Dcm),
        }
    }

    /// First merge point strictly after `index` that lies inside the
    /// trajectory, with its boundary condition.
    pub fn next_merge_point(&self, index: usize) -> Option<(usize, BoundaryCondition)> {
        let position = self
            .merge_points
            .iter()
            .position(|&m| m > index && m < self.len())?;
        Some((self.merge_points[position], self.boundary_at_merge_point(position)?))
    }
}
