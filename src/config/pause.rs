//! Pause (slow-down) conditions and the timings derived from them.

use serde::Deserialize;

/// Step durations beyond which a step is executed at nominal pace.
///
/// When an inter-impact interval exceeds `max_step_time`, the step is
/// performed with nominal switch and swing durations and the remaining time
/// is spent standing with the weight centred between the feet.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PauseConditions {
    /// Longest interval executed without pausing, in seconds.
    pub max_step_time: f64,

    /// Interval used to size switch and swing when pausing, in seconds.
    pub nominal_step_time: f64,
}

impl PauseConditions {
    /// Create new pause conditions.
    pub fn new(max_step_time: f64, nominal_step_time: f64) -> Self {
        Self {
            max_step_time,
            nominal_step_time,
        }
    }

    /// Check if the conditions are valid (max >= nominal > 0).
    pub fn is_valid(&self) -> bool {
        self.nominal_step_time.is_finite()
            && self.max_step_time.is_finite()
            && self.nominal_step_time > 0.0
            && self.max_step_time >= self.nominal_step_time
    }

    /// Check if an interval is long enough to trigger a pause.
    #[inline]
    pub fn triggers(&self, step_time: f64) -> bool {
        step_time > self.max_step_time
    }

    /// Switch and swing durations of a paused step for a switch ratio.
    pub fn timings(&self, switch_ratio: f64) -> PauseTimings {
        PauseTimings {
            nominal_switch_time: switch_ratio * self.nominal_step_time,
            nominal_swing_time: (1.0 - switch_ratio) * self.nominal_step_time,
        }
    }
}

/// Switch and swing durations derived from [`PauseConditions`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PauseTimings {
    /// Switch duration used when pausing.
    pub nominal_switch_time: f64,
    /// Swing duration used when pausing.
    pub nominal_swing_time: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity() {
        assert!(PauseConditions::new(2.0, 1.0).is_valid());
        assert!(PauseConditions::new(1.0, 1.0).is_valid());
        assert!(!PauseConditions::new(0.5, 1.0).is_valid());
        assert!(!PauseConditions::new(1.0, 0.0).is_valid());
        assert!(!PauseConditions::new(f64::INFINITY, 1.0).is_valid());
    }

    #[test]
    fn test_timings() {
        let timings = PauseConditions::new(3.0, 1.0).timings(0.2);
        assert!((timings.nominal_switch_time - 0.2).abs() < 1e-12);
        assert!((timings.nominal_swing_time - 0.8).abs() < 1e-12);
        // Independent of the pause threshold
        assert_eq!(timings, PauseConditions::new(5.0, 1.0).timings(0.2));
    }

    #[test]
    fn test_triggers() {
        let pause = PauseConditions::new(2.0, 1.0);
        assert!(!pause.triggers(2.0));
        assert!(pause.triggers(2.5));
    }
}
