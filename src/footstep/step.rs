//! Single foot placements.

use core::fmt;

use nalgebra::{Isometry3, Point3, Rotation2, Vector2, Vector3};

/// Which foot a step, phase or offset belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Foot {
    /// Left foot.
    Left,
    /// Right foot.
    Right,
}

impl Foot {
    /// The opposite foot.
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Foot::Left => Foot::Right,
            Foot::Right => Foot::Left,
        }
    }

    /// Check if this is the left foot.
    #[inline]
    pub fn is_left(self) -> bool {
        self == Foot::Left
    }

    /// Weight-in-left value when all weight rests on this foot.
    #[inline]
    pub(crate) fn full_weight_in_left(self) -> f64 {
        match self {
            Foot::Left => 1.0,
            Foot::Right => 0.0,
        }
    }
}

impl fmt::Display for Foot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Foot::Left => write!(f, "left"),
            Foot::Right => write!(f, "right"),
        }
    }
}

/// A planned foot placement on flat ground.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// Planar position of the foot frame origin.
    pub position: Vector2<f64>,
    /// Yaw of the foot frame in radians.
    pub angle: f64,
    /// Touch-down time in seconds.
    pub impact_time: f64,
}

impl Step {
    /// Create a new step.
    pub fn new(x: f64, y: f64, angle: f64, impact_time: f64) -> Self {
        Self {
            position: Vector2::new(x, y),
            angle,
            impact_time,
        }
    }

    /// Check that every field is finite.
    pub fn is_finite(&self) -> bool {
        self.position.x.is_finite()
            && self.position.y.is_finite()
            && self.angle.is_finite()
            && self.impact_time.is_finite()
    }

    /// Foot pose on the ground.
    pub fn pose(&self) -> Isometry3<f64> {
        Isometry3::new(
            Vector3::new(self.position.x, self.position.y, 0.0),
            Vector3::z() * self.angle,
        )
    }

    /// Express a point given in the foot frame in the world frame.
    pub fn to_world(&self, local: &Vector2<f64>) -> Vector2<f64> {
        let p = self.pose().transform_point(&Point3::new(local.x, local.y, 0.0));
        Vector2::new(p.x, p.y)
    }

    /// Replace this step's pose with a measured one, keeping its impact time.
    ///
    /// The yaw is the committed yaw rotated by the measured-minus-committed
    /// rotation, so the result stays on the committed branch of the angle.
    pub fn corrected(&self, measured_position: Vector2<f64>, measured_angle: f64) -> Self {
        let committed = Rotation2::new(self.angle);
        let measured = Rotation2::new(measured_angle);
        Self {
            position: measured_position,
            angle: self.angle + (committed.inverse() * measured).angle(),
            impact_time: self.impact_time,
        }
    }
}
