//! Scalar cubic splines.
//!
//! Piecewise cubic Hermite curves with C2 continuity at interior knots,
//! clamped velocities at both ends and optional end accelerations. An
//! acceleration condition is met by inserting one free knot next to that end,
//! so the curve stays cubic everywhere.

use alloc::vec;
use alloc::vec::Vec;

use nalgebra::{DMatrix, DVector};

use crate::error::{Error, FeasibilityError, Result};

/// Boundary condition at one end of a spline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    /// First derivative at the end.
    pub velocity: f64,
    /// Second derivative at the end; free when `None`.
    pub acceleration: Option<f64>,
}

impl Boundary {
    /// Zero velocity, free acceleration.
    pub const REST: Self = Self {
        velocity: 0.0,
        acceleration: None,
    };

    /// Zero velocity and zero acceleration.
    pub const STILL: Self = Self {
        velocity: 0.0,
        acceleration: Some(0.0),
    };

    /// Given velocity, free acceleration.
    #[inline]
    pub const fn velocity(velocity: f64) -> Self {
        Self {
            velocity,
            acceleration: None,
        }
    }

    /// Given velocity and acceleration.
    #[inline]
    pub const fn full(velocity: f64, acceleration: f64) -> Self {
        Self {
            velocity,
            acceleration: Some(acceleration),
        }
    }

    fn is_finite(&self) -> bool {
        self.velocity.is_finite() && self.acceleration.map_or(true, f64::is_finite)
    }
}

/// Position and derivatives of a spline at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SplineSample {
    /// Value.
    pub position: f64,
    /// First derivative.
    pub velocity: f64,
    /// Second derivative.
    pub acceleration: f64,
}

/// Piecewise cubic spline over strictly increasing knot times.
#[derive(Debug, Clone, PartialEq)]
pub struct CubicSpline {
    times: Vec<f64>,
    values: Vec<f64>,
    slopes: Vec<f64>,
}

#[derive(Clone, Copy)]
enum Var {
    Value(usize),
    Slope(usize),
}

/// Linear system in the unknown interior slopes and free knot values.
struct SlopeSystem<'a> {
    times: &'a [f64],
    values: &'a [Option<f64>],
    value_unknown: &'a [Option<usize>],
    first_velocity: f64,
    last_velocity: f64,
    a: DMatrix<f64>,
    b: DVector<f64>,
}

impl SlopeSystem<'_> {
    fn add(&mut self, row: usize, var: Var, coef: f64) {
        let last = self.times.len() - 1;
        match var {
            Var::Value(k) => match (self.values[k], self.value_unknown[k]) {
                (Some(y), _) => self.b[row] -= coef * y,
                (None, Some(col)) => self.a[(row, col)] += coef,
                (None, None) => unreachable!("free knot without unknown"),
            },
            Var::Slope(0) => self.b[row] -= coef * self.first_velocity,
            Var::Slope(k) if k == last => self.b[row] -= coef * self.last_velocity,
            Var::Slope(k) => self.a[(row, k - 1)] += coef,
        }
    }

    /// Add `sign` times the acceleration at one end of segment `seg`.
    fn add_acceleration(&mut self, row: usize, seg: usize, at_end: bool, sign: f64) {
        let h = self.times[seg + 1] - self.times[seg];
        let (dy, m0, m1) = if at_end {
            (-6.0 / (h * h), 2.0 / h, 4.0 / h)
        } else {
            (6.0 / (h * h), -4.0 / h, -2.0 / h)
        };
        self.add(row, Var::Value(seg + 1), sign * dy);
        self.add(row, Var::Value(seg), -sign * dy);
        self.add(row, Var::Slope(seg), sign * m0);
        self.add(row, Var::Slope(seg + 1), sign * m1);
    }
}

impl CubicSpline {
    /// Build a spline through `(times[i], values[i])`.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two knots are given, times are not
    /// strictly increasing, any input is not finite, or the boundary
    /// conditions make the system singular.
    pub fn new(times: &[f64], values: &[f64], first: Boundary, last: Boundary) -> Result<Self> {
        let degenerate = Error::Infeasible(FeasibilityError::DegenerateSpline);
        if times.len() < 2 || times.len() != values.len() {
            return Err(degenerate);
        }
        if !times.iter().chain(values).all(|v| v.is_finite())
            || !times.windows(2).all(|w| w[1] > w[0])
            || !first.is_finite()
            || !last.is_finite()
        {
            return Err(degenerate);
        }

        let mut knot_times = times.to_vec();
        let mut knot_values: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
        let n = times.len();
        let split = if n == 2 && first.acceleration.is_some() && last.acceleration.is_some() {
            3.0
        } else {
            2.0
        };
        if last.acceleration.is_some() {
            let h = times[n - 1] - times[n - 2];
            knot_times.insert(n - 1, times[n - 1] - h / split);
            knot_values.insert(n - 1, None);
        }
        if first.acceleration.is_some() {
            let h = times[1] - times[0];
            knot_times.insert(1, times[0] + h / split);
            knot_values.insert(1, None);
        }

        let n = knot_times.len();
        let mut unknowns = n - 2;
        let mut value_unknown = vec![None; n];
        for (k, value) in knot_values.iter().enumerate() {
            if value.is_none() {
                value_unknown[k] = Some(unknowns);
                unknowns += 1;
            }
        }

        let mut system = SlopeSystem {
            times: &knot_times,
            values: &knot_values,
            value_unknown: &value_unknown,
            first_velocity: first.velocity,
            last_velocity: last.velocity,
            a: DMatrix::zeros(unknowns, unknowns),
            b: DVector::zeros(unknowns),
        };

        // C2 continuity at interior knots
        for k in 1..n - 1 {
            system.add_acceleration(k - 1, k - 1, true, 1.0);
            system.add_acceleration(k - 1, k, false, -1.0);
        }
        let mut row = n - 2;
        if let Some(acceleration) = first.acceleration {
            system.add_acceleration(row, 0, false, 1.0);
            system.b[row] += acceleration;
            row += 1;
        }
        if let Some(acceleration) = last.acceleration {
            system.add_acceleration(row, n - 2, true, 1.0);
            system.b[row] += acceleration;
        }

        let solution = if unknowns > 0 {
            let SlopeSystem { a, b, .. } = system;
            a.lu()
                .solve(&b)
                .ok_or(Error::Infeasible(FeasibilityError::SingularSpline))?
        } else {
            DVector::zeros(0)
        };
        if !solution.iter().all(|v| v.is_finite()) {
            return Err(Error::Infeasible(FeasibilityError::SingularSpline));
        }

        let values = knot_values
            .iter()
            .zip(&value_unknown)
            .map(|(value, unknown)| match (value, unknown) {
                (Some(y), _) => *y,
                (None, Some(col)) => solution[*col],
                (None, None) => unreachable!("free knot without unknown"),
            })
            .collect();
        let mut slopes = vec![0.0; n];
        slopes[0] = first.velocity;
        slopes[n - 1] = last.velocity;
        for k in 1..n - 1 {
            slopes[k] = solution[k - 1];
        }

        Ok(Self {
            times: knot_times,
            values,
            slopes,
        })
    }

    /// Rest-to-rest cubic from `(t0, y0)` to `(t1, y1)`.
    ///
    /// # Errors
    ///
    /// Returns an error if `t1 <= t0` or any input is not finite.
    pub fn blend(t0: f64, y0: f64, t1: f64, y1: f64) -> Result<Self> {
        Self::new(&[t0, t1], &[y0, y1], Boundary::REST, Boundary::REST)
    }

    /// Start time.
    #[inline]
    pub fn start_time(&self) -> f64 {
        self.times[0]
    }

    /// End time.
    #[inline]
    pub fn end_time(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    /// Evaluate value and derivatives; times outside the knots are clamped.
    pub fn evaluate(&self, t: f64) -> SplineSample {
        let last = self.times.len() - 1;
        let t = t.clamp(self.times[0], self.times[last]);
        let seg = self
            .times
            .partition_point(|&knot| knot <= t)
            .saturating_sub(1)
            .min(last - 1);
        let h = self.times[seg + 1] - self.times[seg];
        hermite(
            self.values[seg],
            self.values[seg + 1],
            self.slopes[seg],
            self.slopes[seg + 1],
            h,
            (t - self.times[seg]) / h,
        )
    }

    /// Evaluate the value only.
    #[inline]
    pub fn position(&self, t: f64) -> f64 {
        self.evaluate(t).position
    }
}

/// Cubic Hermite segment of length `h` with end slopes `v0`, `v1`,
/// evaluated at normalized time `s`.
fn hermite(y0: f64, y1: f64, v0: f64, v1: f64, h: f64, s: f64) -> SplineSample {
    let s2 = s * s;
    let s3 = s2 * s;
    let position = (2.0 * s3 - 3.0 * s2 + 1.0) * y0
        + (s3 - 2.0 * s2 + s) * h * v0
        + (-2.0 * s3 + 3.0 * s2) * y1
        + (s3 - s2) * h * v1;
    let velocity = (6.0 * s2 - 6.0 * s) * (y0 - y1) / h
        + (3.0 * s2 - 4.0 * s + 1.0) * v0
        + (3.0 * s2 - 2.0 * s) * v1;
    let acceleration = (12.0 * s - 6.0) * (y0 - y1) / (h * h)
        + ((6.0 * s - 4.0) * v0 + (6.0 * s - 2.0) * v1) / h;
    SplineSample {
        position,
        velocity,
        acceleration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_blend_is_symmetric() {
        let spline = CubicSpline::blend(0.0, 0.0, 2.0, 1.0).unwrap();
        let mid = spline.evaluate(1.0);
        assert!((mid.position - 0.5).abs() < EPS);
        assert!((mid.velocity - 0.75).abs() < EPS);
        assert!(mid.acceleration.abs() < EPS);
        assert!(spline.evaluate(0.0).velocity.abs() < EPS);
        assert!(spline.evaluate(2.0).velocity.abs() < EPS);
    }

    #[test]
    fn test_clamps_outside_knots() {
        let spline = CubicSpline::blend(1.0, 2.0, 2.0, 3.0).unwrap();
        assert_eq!(spline.position(0.0), 2.0);
        assert_eq!(spline.position(5.0), 3.0);
    }

    #[test]
    fn test_initial_acceleration_is_honored() {
        let spline = CubicSpline::new(
            &[0.0, 0.5],
            &[0.5, 1.0],
            Boundary::full(2.0, -3.0),
            Boundary::REST,
        )
        .unwrap();
        let start = spline.evaluate(0.0);
        assert!((start.position - 0.5).abs() < EPS);
        assert!((start.velocity - 2.0).abs() < EPS);
        assert!((start.acceleration + 3.0).abs() < 1e-6);
        let end = spline.evaluate(0.5);
        assert!((end.position - 1.0).abs() < EPS);
        assert!(end.velocity.abs() < EPS);
    }

    #[test]
    fn test_still_ends() {
        let spline = CubicSpline::new(&[0.0, 1.0], &[0.0, 2.0], Boundary::STILL, Boundary::STILL)
            .unwrap();
        for t in [0.0, 1.0] {
            let sample = spline.evaluate(t);
            assert!(sample.velocity.abs() < EPS);
            assert!(sample.acceleration.abs() < 1e-6);
        }
        assert!((spline.position(0.5) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_interior_knots_are_c2() {
        let spline = CubicSpline::new(
            &[0.0, 0.4, 1.0, 1.3],
            &[0.0, 1.0, -0.5, 0.2],
            Boundary::velocity(0.3),
            Boundary::REST,
        )
        .unwrap();
        for knot in [0.4, 1.0] {
            let before = spline.evaluate(knot - 1e-7);
            let after = spline.evaluate(knot + 1e-7);
            assert!((before.position - after.position).abs() < 1e-5);
            assert!((before.velocity - after.velocity).abs() < 1e-4);
            assert!((before.acceleration - after.acceleration).abs() < 1e-3);
        }
        assert!((spline.position(0.4) - 1.0).abs() < EPS);
        assert!((spline.evaluate(0.0).velocity - 0.3).abs() < EPS);
    }

    #[test]
    fn test_rejects_degenerate_knots() {
        let result = CubicSpline::new(&[0.0, 0.0], &[0.0, 1.0], Boundary::REST, Boundary::REST);
        assert!(matches!(
            result,
            Err(Error::Infeasible(FeasibilityError::DegenerateSpline))
        ));
        assert!(CubicSpline::new(&[0.0], &[0.0], Boundary::REST, Boundary::REST).is_err());
        assert!(CubicSpline::blend(0.0, f64::NAN, 1.0, 0.0).is_err());
    }
}
