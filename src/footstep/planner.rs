//! Seam to the external footstep planner.

use alloc::vec::Vec;

use crate::error::Result;

use super::sequence::FootstepSequence;
use super::step::{Foot, Step};

/// Producer of footsteps beyond the present ones.
///
/// Given the committed sequences (whose last steps are the feet's present
/// placements), an implementation appends chronologically ordered steps up
/// to `end_time`. Implementations must be deterministic: identical inputs
/// give identical steps.
pub trait FootstepPlanner {
    /// Extend both sequences over `[init_time, end_time]`.
    ///
    /// # Errors
    ///
    /// Returns an error if no plan can be produced; the sequences may then be
    /// in any state and are discarded by the caller.
    fn extend(
        &mut self,
        left: &mut FootstepSequence,
        right: &mut FootstepSequence,
        init_time: f64,
        end_time: f64,
    ) -> Result<()>;
}

/// Planner replaying a preset list of steps per foot.
///
/// `extend` appends the preset steps landing after both the start time and
/// the sequence's last step, up to the end of the horizon. An empty plan
/// adds nothing, so the caller supplies the whole plan.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FixedPlan {
    left: Vec<Step>,
    right: Vec<Step>,
}

impl FixedPlan {
    /// Create an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replay the steps of two sequences.
    pub fn from_sequences(left: &FootstepSequence, right: &FootstepSequence) -> Self {
        Self {
            left: left.steps().to_vec(),
            right: right.steps().to_vec(),
        }
    }

    /// Add a preset step.
    pub fn push(&mut self, foot: Foot, step: Step) {
        match foot {
            Foot::Left => self.left.push(step),
            Foot::Right => self.right.push(step),
        }
    }

    fn replay(
        preset: &[Step],
        sequence: &mut FootstepSequence,
        init_time: f64,
        end_time: f64,
    ) -> Result<()> {
        // An empty sequence takes the whole preset, present step included
        let after = sequence.last_step().map(|last| last.impact_time.max(init_time));
        for step in preset
            .iter()
            .filter(|s| after.map_or(true, |a| s.impact_time > a) && s.impact_time <= end_time)
        {
            sequence.add_step(*step)?;
        }
        Ok(())
    }
}

impl FootstepPlanner for FixedPlan {
    fn extend(
        &mut self,
        left: &mut FootstepSequence,
        right: &mut FootstepSequence,
        init_time: f64,
        end_time: f64,
    ) -> Result<()> {
        Self::replay(&self.left, left, init_time, end_time)?;
        Self::replay(&self.right, right, init_time, end_time)
    }
}

impl<P: FootstepPlanner + ?Sized> FootstepPlanner for &mut P {
    fn extend(
        &mut self,
        left: &mut FootstepSequence,
        right: &mut FootstepSequence,
        init_time: f64,
        end_time: f64,
    ) -> Result<()> {
        (**self).extend(left, right, init_time, end_time)
    }
}
