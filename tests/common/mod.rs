//! Shared fixtures for integration tests.

#![allow(dead_code)]

use footstep_interpolator::error::PlannerError;
use footstep_interpolator::{Foot, FootstepPlanner, FootstepSequence, Result, Step};

/// Half the lateral distance between the feet.
pub const HALF_WIDTH: f64 = 0.1;

/// Planner walking straight ahead at a fixed cadence.
///
/// The foot that landed first steps next (right on ties), one step every
/// `step_time` seconds, each foot landing `step_length` ahead of the other.
#[derive(Debug, Clone)]
pub struct CadencePlanner {
    pub step_time: f64,
    pub step_length: f64,
    pub fail: bool,
}

impl CadencePlanner {
    pub fn new(step_time: f64, step_length: f64) -> Self {
        Self {
            step_time,
            step_length,
            fail: false,
        }
    }
}

impl FootstepPlanner for CadencePlanner {
    fn extend(
        &mut self,
        left: &mut FootstepSequence,
        right: &mut FootstepSequence,
        init_time: f64,
        end_time: f64,
    ) -> Result<()> {
        if self.fail {
            let msg = heapless::String::try_from("cadence planner disabled").unwrap_or_default();
            return Err(PlannerError::Failed(msg).into());
        }
        if left.is_empty() {
            left.add_step(Step::new(0.0, HALF_WIDTH, 0.0, init_time))?;
        }
        if right.is_empty() {
            right.add_step(Step::new(0.0, -HALF_WIDTH, 0.0, init_time))?;
        }

        loop {
            let l = *left.last_step().expect("left sequence is filled");
            let r = *right.last_step().expect("right sequence is filled");
            let mut impact = l.impact_time.max(r.impact_time) + self.step_time;
            if impact <= init_time {
                impact = init_time + self.step_time;
            }
            if impact > end_time {
                return Ok(());
            }
            if l.impact_time < r.impact_time {
                let x = r.position.x + self.step_length;
                left.add_step(Step::new(x, HALF_WIDTH, 0.0, impact))?;
            } else {
                let x = l.position.x + self.step_length;
                right.add_step(Step::new(x, -HALF_WIDTH, 0.0, impact))?;
            }
        }
    }
}

/// Both feet standing side by side since `time`.
pub fn standing(time: f64) -> (FootstepSequence, FootstepSequence) {
    (
        FootstepSequence::from_steps(Foot::Left, [Step::new(0.0, HALF_WIDTH, 0.0, time)])
            .expect("valid left step"),
        FootstepSequence::from_steps(Foot::Right, [Step::new(0.0, -HALF_WIDTH, 0.0, time)])
            .expect("valid right step"),
    )
}

/// Standing feet, then one right step landing at 1.0 s.
pub fn single_right_step() -> (FootstepSequence, FootstepSequence) {
    let (left, mut right) = standing(0.0);
    right
        .add_step(Step::new(0.1, -HALF_WIDTH, 0.0, 1.0))
        .expect("valid right step");
    (left, right)
}

/// Central finite-difference derivative at sample `i`.
pub fn derivative(values: &[f64], i: usize, dt: f64) -> f64 {
    (values[i + 1] - values[i - 1]) / (2.0 * dt)
}
