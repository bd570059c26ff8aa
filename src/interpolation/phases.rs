//! Phase timeline.
//!
//! Merges the impacts of both feet into one ordered list of events and
//! splits every inter-impact interval into weight switches, optional pause
//! holds and a swing. The resulting windows are quantized onto the sample
//! grid and labelled per foot.

use alloc::vec::Vec;

use crate::config::InterpolatorConfig;
use crate::error::{Error, FeasibilityError, Result, SequencingError};
use crate::footstep::{Foot, FootstepSequence, Step};

/// Largest number of samples a timeline may hold.
pub const MAX_SAMPLES: usize = 1 << 20;

/// Support state of one foot at one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepPhase {
    /// Grounded, weight not moving towards or away from this foot.
    Stance,
    /// Grounded, receiving weight.
    SwitchIn,
    /// Grounded, giving weight away.
    SwitchOut,
    /// Airborne.
    Swing,
}

impl StepPhase {
    /// Check if the foot touches the ground.
    #[inline]
    pub fn in_contact(self) -> bool {
        self != StepPhase::Swing
    }
}

/// Uniform sample grid starting at the initial time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SampleGrid {
    pub init_time: f64,
    pub dt: f64,
}

impl SampleGrid {
    /// Index of the sample closest to `time`.
    pub fn index(&self, time: f64) -> usize {
        let index = libm::round((time - self.init_time) / self.dt);
        if index > 0.0 {
            index as usize
        } else {
            0
        }
    }

    /// Time of sample `index`.
    #[inline]
    pub fn time(&self, index: usize) -> f64 {
        self.init_time + index as f64 * self.dt
    }
}

/// What happens inside a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum WindowKind {
    /// Weight moves towards `target` (weight in left), `receiver` is the
    /// foot the weight moves to.
    Transfer {
        receiver: Foot,
        target: f64,
        /// The receiver has just landed and moves its local ZMP from its
        /// initial switch offset to its stance offset.
        from_heel: bool,
    },
    /// Both feet stand still with the weight centred.
    Hold,
    /// `foot` travels from `lift_off` to `touch_down`.
    Swing {
        foot: Foot,
        lift_off: Step,
        touch_down: Step,
    },
}

/// A labelled stretch of the timeline covering samples `start..end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Window {
    pub kind: WindowKind,
    pub start_time: f64,
    pub end_time: f64,
    pub start: usize,
    pub end: usize,
    /// Foot that supports the body during or after this window.
    pub support: Foot,
    /// Whether the middle of this window is a merge point.
    pub merge: bool,
}

impl Window {
    fn new(kind: WindowKind, start_time: f64, end_time: f64, support: Foot, merge: bool) -> Self {
        Self {
            kind,
            start_time,
            end_time,
            start: 0,
            end: 0,
            support,
            merge,
        }
    }

    /// Phases of the (left, right) feet.
    fn phases(&self) -> (StepPhase, StepPhase) {
        let labelled = |foot: Foot, active: StepPhase| {
            if foot.is_left() {
                (active, StepPhase::Stance)
            } else {
                (StepPhase::Stance, active)
            }
        };
        match self.kind {
            WindowKind::Transfer { receiver, .. } if receiver.is_left() => {
                (StepPhase::SwitchIn, StepPhase::SwitchOut)
            }
            WindowKind::Transfer { .. } => (StepPhase::SwitchOut, StepPhase::SwitchIn),
            WindowKind::Hold => (StepPhase::Stance, StepPhase::Stance),
            WindowKind::Swing { foot, .. } => labelled(foot, StepPhase::Swing),
        }
    }

    #[inline]
    pub fn is_swing(&self) -> bool {
        matches!(self.kind, WindowKind::Swing { .. })
    }

    /// Normalized position of `time` inside the window, clamped to [0, 1].
    pub fn progress(&self, time: f64) -> f64 {
        ((time - self.start_time) / (self.end_time - self.start_time)).clamp(0.0, 1.0)
    }
}

/// Present placements and future impacts of both feet in time order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct OrderedSteps {
    /// Present steps of the (left, right) feet.
    pub present: [Step; 2],
    /// Future steps of both feet, sorted by impact time.
    pub events: Vec<(Foot, Step)>,
}

fn checked_steps(sequence: &FootstepSequence, foot: Foot) -> Result<&[Step]> {
    let steps = sequence.steps();
    if steps.is_empty() {
        return Err(Error::Sequencing(SequencingError::EmptySequence(foot)));
    }
    if !steps.iter().all(Step::is_finite) {
        return Err(Error::Sequencing(SequencingError::NonFiniteStep(foot)));
    }
    if let Some(pair) = steps
        .windows(2)
        .find(|pair| pair[1].impact_time <= pair[0].impact_time)
    {
        return Err(Error::Sequencing(SequencingError::UnorderedSteps {
            foot,
            previous: pair[0].impact_time,
            next: pair[1].impact_time,
        }));
    }
    Ok(steps)
}

/// Merge the future impacts of both feet into one ordered list.
///
/// The first step of each sequence is the foot's present placement and must
/// have landed by `init_time`; every other step must land after it.
pub(crate) fn order_steps(
    left: &FootstepSequence,
    right: &FootstepSequence,
    init_time: f64,
) -> Result<OrderedSteps> {
    let left_steps = checked_steps(left, Foot::Left)?;
    let right_steps = checked_steps(right, Foot::Right)?;

    let grounded_at = left_steps[0].impact_time.max(right_steps[0].impact_time);
    if !(init_time >= grounded_at) {
        return Err(Error::Sequencing(SequencingError::InitTimeBeforeGrounding {
            init_time,
            grounded_at,
        }));
    }

    for (foot, steps) in [(Foot::Left, left_steps), (Foot::Right, right_steps)] {
        if let Some(step) = steps[1..].iter().find(|s| s.impact_time <= init_time) {
            return Err(Error::Sequencing(SequencingError::StepBeforeInitTime {
                foot,
                impact_time: step.impact_time,
            }));
        }
    }

    let mut events = Vec::with_capacity(left_steps.len() + right_steps.len() - 2);
    let mut lefts = left_steps[1..].iter().peekable();
    let mut rights = right_steps[1..].iter().peekable();
    loop {
        let next = match (lefts.peek().copied(), rights.peek().copied()) {
            (Some(l), Some(r)) if l.impact_time < r.impact_time => (Foot::Left, lefts.next()),
            (Some(l), Some(r)) if r.impact_time < l.impact_time => (Foot::Right, rights.next()),
            (Some(l), Some(_)) => {
                return Err(Error::Sequencing(SequencingError::SimultaneousImpacts(
                    l.impact_time,
                )))
            }
            (Some(_), None) => (Foot::Left, lefts.next()),
            (None, Some(_)) => (Foot::Right, rights.next()),
            (None, None) => break,
        };
        if let (foot, Some(step)) = next {
            events.push((foot, *step));
        }
    }

    if events.is_empty() {
        return Err(Error::Sequencing(SequencingError::NothingToInterpolate));
    }

    Ok(OrderedSteps {
        present: [left_steps[0], right_steps[0]],
        events,
    })
}

/// Split the interval before every impact into windows, in continuous time.
fn plan_windows(
    ordered: &OrderedSteps,
    init_time: f64,
    config: &InterpolatorConfig,
) -> Vec<Window> {
    let mut windows = Vec::with_capacity(3 * ordered.events.len() + 1);
    let mut current = ordered.present;
    let mut previous_time = init_time;
    let mut last_landed: Option<Foot> = None;

    for (k, (foot, step)) in ordered.events.iter().enumerate() {
        let first = k == 0;
        let receiver = foot.other();
        let target = receiver.full_weight_in_left();
        let interval = step.impact_time - previous_time;
        let from_heel = last_landed == Some(receiver);

        let swing_start = match config.pause.filter(|pause| pause.triggers(interval)) {
            Some(pause) => {
                let timings = pause.timings(config.switch_ratio);
                let half_switch = 0.5 * timings.nominal_switch_time;
                let swing_start = step.impact_time - timings.nominal_swing_time;
                let hold_start = previous_time + half_switch;
                let hold_end = swing_start - half_switch;
                windows.push(Window::new(
                    WindowKind::Transfer {
                        receiver,
                        target: 0.5,
                        from_heel,
                    },
                    previous_time,
                    hold_start,
                    receiver,
                    false,
                ));
                windows.push(Window::new(WindowKind::Hold, hold_start, hold_end, receiver, true));
                windows.push(Window::new(
                    WindowKind::Transfer {
                        receiver,
                        target,
                        from_heel: false,
                    },
                    hold_end,
                    swing_start,
                    receiver,
                    false,
                ));
                swing_start
            }
            None => {
                let switch = if first {
                    0.5 * config.switch_ratio * interval
                } else {
                    config.switch_ratio * interval
                };
                windows.push(Window::new(
                    WindowKind::Transfer {
                        receiver,
                        target,
                        from_heel,
                    },
                    previous_time,
                    previous_time + switch,
                    receiver,
                    !first,
                ));
                previous_time + switch
            }
        };

        let slot = usize::from(!foot.is_left());
        windows.push(Window::new(
            WindowKind::Swing {
                foot: *foot,
                lift_off: current[slot],
                touch_down: *step,
            },
            swing_start,
            step.impact_time,
            receiver,
            false,
        ));
        current[slot] = *step;
        last_landed = Some(*foot);
        previous_time = step.impact_time;
    }

    if config.terminal_half_switch_time > 0.0 {
        if let Some(landed) = last_landed {
            windows.push(Window::new(
                WindowKind::Transfer {
                    receiver: landed,
                    target: 0.5,
                    from_heel: true,
                },
                previous_time,
                previous_time + config.terminal_half_switch_time,
                landed.other(),
                false,
            ));
        }
    }

    windows
}

/// Per-sample phases of both feet with their phase shifts and merge points.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseTimeline {
    grid: SampleGrid,
    end_time: f64,
    present: [Step; 2],
    last: [Step; 2],
    windows: Vec<Window>,
    left_phases: Vec<StepPhase>,
    right_phases: Vec<StepPhase>,
    phase_shifts: Vec<usize>,
    merge_points: Vec<usize>,
    left_fixed: Vec<bool>,
}

impl PhaseTimeline {
    /// Build the timeline of two footstep sequences sampled every `dt`
    /// seconds from `init_time`.
    ///
    /// # Errors
    ///
    /// Returns a sequencing error if the footsteps cannot be ordered around
    /// `init_time`, and a feasibility error if a switch or swing would not
    /// hold a single sample or the horizon would exceed [`MAX_SAMPLES`].
    pub fn new(
        left: &FootstepSequence,
        right: &FootstepSequence,
        init_time: f64,
        dt: f64,
        config: &InterpolatorConfig,
    ) -> Result<Self> {
        let ordered = order_steps(left, right, init_time)?;
        let grid = SampleGrid { init_time, dt };
        let mut windows = plan_windows(&ordered, init_time, config);

        let end_time = windows.last().map_or(init_time, |w| w.end_time);
        let horizon = end_time - init_time;
        if !(horizon / dt < MAX_SAMPLES as f64) {
            return Err(Error::Infeasible(FeasibilityError::TooManySamples { horizon, dt }));
        }

        for window in &mut windows {
            window.start = grid.index(window.start_time);
            window.end = grid.index(window.end_time);
            if window.end > window.start {
                continue;
            }
            let duration = window.end_time - window.start_time;
            match window.kind {
                WindowKind::Transfer { .. } => {
                    return Err(Error::Infeasible(FeasibilityError::SwitchTooShort {
                        start_time: window.start_time,
                        duration,
                    }))
                }
                WindowKind::Swing { touch_down, .. } => {
                    return Err(Error::Infeasible(FeasibilityError::SwingTooShort {
                        impact_time: touch_down.impact_time,
                        duration,
                    }))
                }
                WindowKind::Hold => {}
            }
        }

        let len = grid.index(end_time) + 1;

        let mut left_phases = Vec::with_capacity(len);
        let mut right_phases = Vec::with_capacity(len);
        let mut left_fixed = Vec::with_capacity(len);
        let mut phase_shifts = Vec::with_capacity(windows.len() + 1);
        let mut merge_points = Vec::new();

        for window in &windows {
            let (left_phase, right_phase) = window.phases();
            for _ in window.start..window.end {
                left_phases.push(left_phase);
                right_phases.push(right_phase);
                left_fixed.push(window.support.is_left());
            }
            if window.end > window.start {
                phase_shifts.push(window.end);
                if window.merge {
                    let middle = grid.index(0.5 * (window.start_time + window.end_time));
                    merge_points.push(middle.clamp(window.start, window.end - 1));
                }
            }
        }

        // Both feet rest on the last sample
        let last_support = windows.last().map_or(true, |w| w.support.is_left());
        left_phases.push(StepPhase::Stance);
        right_phases.push(StepPhase::Stance);
        left_fixed.push(last_support);
        phase_shifts.push(len);
        merge_points.push(len);

        let mut last = ordered.present;
        for (foot, step) in &ordered.events {
            last[usize::from(!foot.is_left())] = *step;
        }

        Ok(Self {
            grid,
            end_time,
            present: ordered.present,
            last,
            windows,
            left_phases,
            right_phases,
            phase_shifts,
            merge_points,
            left_fixed,
        })
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.left_phases.len()
    }

    /// A timeline always holds at least the final resting sample.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.left_phases.is_empty()
    }

    /// Time of the first sample.
    #[inline]
    pub fn init_time(&self) -> f64 {
        self.grid.init_time
    }

    /// Sampling period.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.grid.dt
    }

    /// Time of sample `index`.
    #[inline]
    pub fn time_at(&self, index: usize) -> f64 {
        self.grid.time(index)
    }

    /// Last impact time plus the terminal switch.
    #[inline]
    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    /// Phases of the left foot.
    pub fn left_phases(&self) -> &[StepPhase] {
        &self.left_phases
    }

    /// Phases of the right foot.
    pub fn right_phases(&self) -> &[StepPhase] {
        &self.right_phases
    }

    /// Phases of one foot.
    pub fn phases(&self, foot: Foot) -> &[StepPhase] {
        match foot {
            Foot::Left => &self.left_phases,
            Foot::Right => &self.right_phases,
        }
    }

    /// Exclusive end of every phase segment, ending with `len()`.
    pub fn phase_shifts(&self) -> &[usize] {
        &self.phase_shifts
    }

    /// Samples where a new trajectory may be spliced in, ending with `len()`.
    pub fn merge_points(&self) -> &[usize] {
        &self.merge_points
    }

    /// Whether the left foot is the fixed (support) foot at every sample.
    pub fn left_fixed(&self) -> &[bool] {
        &self.left_fixed
    }

    /// Contact flags of one foot.
    pub fn contacts(&self, foot: Foot) -> Vec<bool> {
        self.phases(foot).iter().map(|p| p.in_contact()).collect()
    }

    /// Present placement of a foot at the initial time.
    pub fn present_step(&self, foot: Foot) -> &Step {
        &self.present[usize::from(!foot.is_left())]
    }

    /// Last planned placement of a foot.
    pub fn last_step(&self, foot: Foot) -> &Step {
        &self.last[usize::from(!foot.is_left())]
    }

    pub(crate) fn grid(&self) -> SampleGrid {
        self.grid
    }

    pub(crate) fn windows(&self) -> &[Window] {
        &self.windows
    }

    /// Double-support stretches, in continuous time: before the first swing,
    /// between consecutive swings and after the last one.
    pub(crate) fn double_support(&self) -> Vec<(f64, f64)> {
        let mut blocks = Vec::new();
        let mut block_start = self.grid.init_time;
        for window in self.windows.iter().filter(|w| w.is_swing()) {
            blocks.push((block_start, window.start_time));
            block_start = window.end_time;
        }
        blocks.push((block_start, self.end_time.max(block_start)));
        blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn sequences(left: &[Step], right: &[Step]) -> (FootstepSequence, FootstepSequence) {
        (
            FootstepSequence::from_steps(Foot::Left, left.iter().copied()).unwrap(),
            FootstepSequence::from_steps(Foot::Right, right.iter().copied()).unwrap(),
        )
    }

    fn single_right_step() -> (FootstepSequence, FootstepSequence) {
        sequences(
            &[Step::new(0.0, 0.1, 0.0, 0.0)],
            &[Step::new(0.0, -0.1, 0.0, 0.0), Step::new(0.1, -0.1, 0.0, 1.0)],
        )
    }

    #[test]
    fn test_single_step_layout() {
        let (left, right) = single_right_step();
        let config = InterpolatorConfig::default();
        let timeline = PhaseTimeline::new(&left, &right, 0.0, 0.01, &config).unwrap();

        assert_eq!(timeline.len(), 101);
        // Half switch of 0.1 s, then a 0.9 s swing
        assert_eq!(timeline.right_phases()[0], StepPhase::SwitchOut);
        assert_eq!(timeline.left_phases()[0], StepPhase::SwitchIn);
        assert_eq!(timeline.right_phases()[9], StepPhase::SwitchOut);
        assert_eq!(timeline.right_phases()[10], StepPhase::Swing);
        assert_eq!(timeline.left_phases()[50], StepPhase::Stance);
        assert_eq!(timeline.right_phases()[99], StepPhase::Swing);
        assert_eq!(timeline.right_phases()[100], StepPhase::Stance);
        assert_eq!(timeline.phase_shifts(), &[10, 100, 101]);
        assert_eq!(timeline.merge_points(), &[101]);
        assert!(timeline.left_fixed().iter().all(|&fixed| fixed));
    }

    #[test]
    fn test_alternating_steps_merge_points() {
        let (left, right) = sequences(
            &[Step::new(0.0, 0.1, 0.0, 0.0), Step::new(0.2, 0.1, 0.0, 2.0)],
            &[Step::new(0.0, -0.1, 0.0, 0.0), Step::new(0.1, -0.1, 0.0, 1.0)],
        );
        let config = InterpolatorConfig::default();
        let timeline = PhaseTimeline::new(&left, &right, 0.0, 0.01, &config).unwrap();

        assert_eq!(timeline.len(), 201);
        // Full switch from 1.0 to 1.2, merge point in its middle
        assert_eq!(timeline.merge_points(), &[110, 201]);
        assert_eq!(timeline.right_phases()[105], StepPhase::SwitchIn);
        assert_eq!(timeline.left_phases()[105], StepPhase::SwitchOut);
        assert_eq!(timeline.left_phases()[150], StepPhase::Swing);
        assert!(timeline.left_fixed()[50]);
        assert!(!timeline.left_fixed()[105]);
        assert!(!timeline.left_fixed()[150]);
    }

    #[test]
    fn test_terminal_switch_extends_timeline() {
        let (left, right) = single_right_step();
        let mut config = InterpolatorConfig::default();
        config.set_terminal_half_switch_time(0.3).unwrap();
        let timeline = PhaseTimeline::new(&left, &right, 0.0, 0.01, &config).unwrap();

        assert_eq!(timeline.len(), 131);
        assert_eq!(timeline.right_phases()[110], StepPhase::SwitchIn);
        assert_eq!(timeline.left_phases()[110], StepPhase::SwitchOut);
        assert_eq!(timeline.phase_shifts(), &[10, 100, 130, 131]);
    }

    #[test]
    fn test_pause_inserts_hold() {
        let (left, right) = sequences(
            &[Step::new(0.0, 0.1, 0.0, 0.0), Step::new(0.2, 0.1, 0.0, 5.0)],
            &[Step::new(0.0, -0.1, 0.0, 0.0), Step::new(0.1, -0.1, 0.0, 1.0)],
        );
        let mut config = InterpolatorConfig::default();
        config.set_pause_conditions(2.0, 1.0).unwrap();
        let timeline = PhaseTimeline::new(&left, &right, 0.0, 0.01, &config).unwrap();

        // 1.0..1.1 centre, hold until 4.1, 4.1..4.2 switch, swing 4.2..5.0
        assert_eq!(timeline.left_phases()[300], StepPhase::Stance);
        assert_eq!(timeline.right_phases()[300], StepPhase::Stance);
        assert_eq!(timeline.left_phases()[415], StepPhase::SwitchOut);
        assert_eq!(timeline.left_phases()[450], StepPhase::Swing);
        assert_eq!(timeline.merge_points(), &[260, 501]);
    }

    #[test]
    fn test_rejects_simultaneous_impacts() {
        let (left, right) = sequences(
            &[Step::new(0.0, 0.1, 0.0, 0.0), Step::new(0.1, 0.1, 0.0, 1.0)],
            &[Step::new(0.0, -0.1, 0.0, 0.0), Step::new(0.1, -0.1, 0.0, 1.0)],
        );
        let result = PhaseTimeline::new(&left, &right, 0.0, 0.01, &InterpolatorConfig::default());
        assert!(matches!(
            result,
            Err(Error::Sequencing(SequencingError::SimultaneousImpacts(_)))
        ));
    }

    #[test]
    fn test_rejects_init_before_grounding() {
        let (left, right) = sequences(
            &[Step::new(0.0, 0.1, 0.0, 0.5)],
            &[Step::new(0.0, -0.1, 0.0, 0.0), Step::new(0.1, -0.1, 0.0, 1.0)],
        );
        let result = PhaseTimeline::new(&left, &right, 0.2, 0.01, &InterpolatorConfig::default());
        assert!(matches!(
            result,
            Err(Error::Sequencing(SequencingError::InitTimeBeforeGrounding { .. }))
        ));
    }

    #[test]
    fn test_rejects_past_future_steps_and_empty_plans() {
        let (left, right) = single_right_step();
        let result = PhaseTimeline::new(&left, &right, 1.0, 0.01, &InterpolatorConfig::default());
        assert!(matches!(
            result,
            Err(Error::Sequencing(SequencingError::StepBeforeInitTime { .. }))
        ));

        let (left, right) = sequences(
            &[Step::new(0.0, 0.1, 0.0, 0.0)],
            &[Step::new(0.0, -0.1, 0.0, 0.0)],
        );
        let result = PhaseTimeline::new(&left, &right, 0.0, 0.01, &InterpolatorConfig::default());
        assert_eq!(
            result.unwrap_err(),
            Error::Sequencing(SequencingError::NothingToInterpolate)
        );

        let empty = FootstepSequence::new(Foot::Left);
        let result = PhaseTimeline::new(&empty, &right, 0.0, 0.01, &InterpolatorConfig::default());
        assert_eq!(
            result.unwrap_err(),
            Error::Sequencing(SequencingError::EmptySequence(Foot::Left))
        );
    }

    #[test]
    fn test_rejects_swing_without_samples() {
        let (left, right) = sequences(
            &[Step::new(0.0, 0.1, 0.0, 0.0)],
            &[Step::new(0.0, -0.1, 0.0, 0.0), Step::new(0.1, -0.1, 0.0, 0.05)],
        );
        let result = PhaseTimeline::new(&left, &right, 0.0, 0.1, &InterpolatorConfig::default());
        assert!(matches!(result, Err(Error::Infeasible(_))));
    }

    #[test]
    fn test_rejects_oversampled_horizon() {
        let (left, right) = single_right_step();
        let config = InterpolatorConfig::default();
        let result = PhaseTimeline::new(&left, &right, 0.0, 1e-15, &config);
        assert_eq!(
            result.unwrap_err(),
            Error::Infeasible(FeasibilityError::TooManySamples {
                horizon: 1.0,
                dt: 1e-15
            })
        );

        // Just under the bound still builds
        let dt = 1.0 / (MAX_SAMPLES - 16) as f64;
        let timeline = PhaseTimeline::new(&left, &right, 0.0, dt, &config).unwrap();
        assert!(timeline.len() <= MAX_SAMPLES);
    }

    #[test]
    fn test_double_support_blocks() {
        let (left, right) = single_right_step();
        let timeline =
            PhaseTimeline::new(&left, &right, 0.0, 0.01, &InterpolatorConfig::default()).unwrap();
        let blocks = timeline.double_support();
        assert_eq!(blocks.len(), 2);
        assert!((blocks[0].1 - 0.1).abs() < 1e-12);
        assert_eq!(blocks[1], (1.0, 1.0));
        assert!(!timeline.contacts(Foot::Right)[50]);
        assert_eq!(timeline.contacts(Foot::Left), vec![true; 101]);
    }
}
