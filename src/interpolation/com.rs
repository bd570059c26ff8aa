//! CoM height profile.

use alloc::vec::Vec;

use crate::config::ComHeightSettings;
use crate::error::Result;
use crate::spline::CubicSpline;

use super::phases::PhaseTimeline;

/// CoM height and its second derivative at every sample.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ComHeightProfile {
    pub height: Vec<f64>,
    pub acceleration: Vec<f64>,
}

/// Plan the CoM height: `nominal + delta` in the middle of every double
/// support, `nominal` in the middle of every swing, joined by rest-to-rest
/// cubics.
pub(crate) fn com_height(
    timeline: &PhaseTimeline,
    settings: &ComHeightSettings,
) -> Result<ComHeightProfile> {
    let stance = settings.stance_height();
    let blocks = timeline.double_support();

    let mut keys: Vec<(f64, f64)> = Vec::with_capacity(2 * blocks.len() + 1);
    keys.push((timeline.init_time(), stance));
    let swings = timeline.windows().iter().filter(|w| w.is_swing());
    for (k, swing) in swings.enumerate() {
        keys.push((0.5 * (swing.start_time + swing.end_time), settings.nominal_height));
        if let Some(&(start, end)) = blocks.get(k + 1).filter(|_| k + 2 < blocks.len()) {
            keys.push((0.5 * (start + end), stance));
        }
    }
    keys.push((timeline.end_time(), stance));

    let segments = keys
        .windows(2)
        .map(|pair| CubicSpline::blend(pair[0].0, pair[0].1, pair[1].0, pair[1].1))
        .collect::<Result<Vec<_>>>()?;
    let key_times: Vec<f64> = keys.iter().map(|k| k.0).collect();

    let mut height = Vec::with_capacity(timeline.len());
    let mut acceleration = Vec::with_capacity(timeline.len());
    for i in 0..timeline.len() {
        let t = timeline.time_at(i);
        let segment = key_times
            .partition_point(|&key| key <= t)
            .saturating_sub(1)
            .min(segments.len() - 1);
        let sample = segments[segment].evaluate(t);
        height.push(sample.position);
        acceleration.push(sample.acceleration);
    }

    Ok(ComHeightProfile {
        height,
        acceleration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InterpolatorConfig;
    use crate::footstep::{Foot, FootstepSequence, Step};

    fn timeline() -> PhaseTimeline {
        let left = FootstepSequence::from_steps(
            Foot::Left,
            [Step::new(0.0, 0.1, 0.0, 0.0), Step::new(0.2, 0.1, 0.0, 2.0)],
        )
        .unwrap();
        let right = FootstepSequence::from_steps(
            Foot::Right,
            [Step::new(0.0, -0.1, 0.0, 0.0), Step::new(0.1, -0.1, 0.0, 1.0)],
        )
        .unwrap();
        PhaseTimeline::new(&left, &right, 0.0, 0.01, &InterpolatorConfig::default()).unwrap()
    }

    #[test]
    fn test_height_dips_during_swings() {
        let settings = ComHeightSettings {
            nominal_height: 0.5,
            stance_delta: 0.02,
        };
        let profile = com_height(&timeline(), &settings).unwrap();

        assert!((profile.height[0] - 0.52).abs() < 1e-12);
        // Middle of the right swing (0.1..1.0)
        assert!((profile.height[55] - 0.5).abs() < 1e-9);
        // Middle of the double support (1.0..1.2)
        assert!((profile.height[110] - 0.52).abs() < 1e-9);
        // Middle of the left swing (1.2..2.0)
        assert!((profile.height[160] - 0.5).abs() < 1e-9);
        assert!((profile.height[200] - 0.52).abs() < 1e-12);
        assert!(profile.height.iter().all(|h| (0.5 - 1e-12..=0.52 + 1e-12).contains(h)));
    }

    #[test]
    fn test_flat_profile_without_delta() {
        let profile = com_height(&timeline(), &ComHeightSettings::default()).unwrap();
        assert!(profile.height.iter().all(|&h| (h - 0.5).abs() < 1e-12));
        assert!(profile.acceleration.iter().all(|&a| a == 0.0));
    }

    #[test]
    fn test_acceleration_matches_finite_differences() {
        let settings = ComHeightSettings {
            nominal_height: 0.5,
            stance_delta: 0.02,
        };
        let timeline = timeline();
        let profile = com_height(&timeline, &settings).unwrap();
        let dt = timeline.dt();
        for i in [30, 80, 130, 180] {
            let fd = (profile.height[i + 1] - 2.0 * profile.height[i] + profile.height[i - 1])
                / (dt * dt);
            assert!((fd - profile.acceleration[i]).abs() < 1e-3);
        }
    }
}
