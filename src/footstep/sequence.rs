//! Ordered footstep sequence of a single foot.

use alloc::vec::Vec;

use crate::error::{Error, Result, SequencingError};

use super::step::{Foot, Step};

/// Chronologically ordered steps of one foot.
///
/// The first step is the foot's present placement; impact times are strictly
/// increasing. Steps are immutable once committed.
#[derive(Debug, Clone, PartialEq)]
pub struct FootstepSequence {
    foot: Foot,
    steps: Vec<Step>,
}

impl FootstepSequence {
    /// Create an empty sequence for a foot.
    pub fn new(foot: Foot) -> Self {
        Self {
            foot,
            steps: Vec::new(),
        }
    }

    /// Create a sequence from steps.
    ///
    /// # Errors
    ///
    /// Returns an error if the steps are not strictly ordered by impact time
    /// or carry non-finite values.
    pub fn from_steps<I: IntoIterator<Item = Step>>(foot: Foot, steps: I) -> Result<Self> {
        let mut sequence = Self::new(foot);
        for step in steps {
            sequence.add_step(step)?;
        }
        Ok(sequence)
    }

    /// The foot owning this sequence.
    #[inline]
    pub fn foot(&self) -> Foot {
        self.foot
    }

    /// Append a step.
    ///
    /// # Errors
    ///
    /// Returns an error if the step does not land strictly after the last one.
    pub fn add_step(&mut self, step: Step) -> Result<()> {
        if !step.is_finite() {
            return Err(Error::Sequencing(SequencingError::NonFiniteStep(self.foot)));
        }
        if let Some(last) = self.steps.last() {
            if step.impact_time <= last.impact_time {
                return Err(Error::Sequencing(SequencingError::UnorderedSteps {
                    foot: self.foot,
                    previous: last.impact_time,
                    next: step.impact_time,
                }));
            }
        }
        self.steps.push(step);
        Ok(())
    }

    /// Get the first step.
    pub fn first_step(&self) -> Option<&Step> {
        self.steps.first()
    }

    /// Get the last step.
    pub fn last_step(&self) -> Option<&Step> {
        self.steps.last()
    }

    /// Remove all steps except the last one.
    ///
    /// Returns `false` if the sequence is empty.
    pub fn drop_past_steps(&mut self) -> bool {
        match self.steps.pop() {
            Some(last) => {
                self.steps.clear();
                self.steps.push(last);
                true
            }
            None => false,
        }
    }

    /// Keep only the last step landed at or before `time`.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the sequence untouched, if no step has
    /// landed by `time`.
    pub fn keep_only_present_step(&mut self, time: f64) -> Result<()> {
        let landed = self.steps.partition_point(|s| s.impact_time <= time);
        if landed == 0 {
            return Err(Error::Sequencing(SequencingError::NoPresentStep {
                foot: self.foot,
                time,
            }));
        }
        let present = self.steps[landed - 1];
        self.steps.clear();
        self.steps.push(present);
        Ok(())
    }

    /// Remove all steps.
    pub fn clear(&mut self) {
        self.steps.clear();
    }

    /// Remove and return the last step.
    pub fn remove_last_step(&mut self) -> Option<Step> {
        self.steps.pop()
    }

    /// Number of steps.
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if the sequence is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// All steps, ordered by impact time.
    #[inline]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence() -> FootstepSequence {
        FootstepSequence::from_steps(
            Foot::Left,
            [
                Step::new(0.0, 0.1, 0.0, 0.0),
                Step::new(0.1, 0.1, 0.0, 1.0),
                Step::new(0.2, 0.1, 0.0, 2.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_unordered_step() {
        let mut seq = sequence();
        let result = seq.add_step(Step::new(0.3, 0.1, 0.0, 2.0));
        assert!(matches!(
            result,
            Err(Error::Sequencing(SequencingError::UnorderedSteps { .. }))
        ));
        assert_eq!(seq.len(), 3);
    }

    #[test]
    fn test_rejects_non_finite_step() {
        let mut seq = FootstepSequence::new(Foot::Right);
        let result = seq.add_step(Step::new(f64::NAN, 0.0, 0.0, 0.0));
        assert!(matches!(
            result,
            Err(Error::Sequencing(SequencingError::NonFiniteStep(Foot::Right)))
        ));
    }

    #[test]
    fn test_keep_only_present_step() {
        let mut seq = sequence();
        seq.keep_only_present_step(1.5).unwrap();
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.last_step().unwrap().impact_time, 1.0);

        // Impact exactly at the requested time counts as landed.
        let mut seq = sequence();
        seq.keep_only_present_step(2.0).unwrap();
        assert_eq!(seq.last_step().unwrap().impact_time, 2.0);
    }

    #[test]
    fn test_keep_only_present_step_fails_untouched() {
        let mut seq = sequence();
        let result = seq.keep_only_present_step(-0.5);
        assert!(matches!(
            result,
            Err(Error::Sequencing(SequencingError::NoPresentStep { foot: Foot::Left, .. }))
        ));
        assert_eq!(seq, sequence());
    }

    #[test]
    fn test_drop_past_steps() {
        let mut seq = sequence();
        assert!(seq.drop_past_steps());
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.first_step().unwrap().impact_time, 2.0);

        let mut empty = FootstepSequence::new(Foot::Left);
        assert!(!empty.drop_past_steps());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut seq = sequence();
        assert_eq!(seq.remove_last_step().unwrap().impact_time, 2.0);
        assert_eq!(seq.len(), 2);
        seq.clear();
        assert!(seq.is_empty());
    }
}
