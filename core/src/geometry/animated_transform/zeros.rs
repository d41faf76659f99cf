//! Motion derivative zero finding

use super::super::{Float, Interval};
use super::MotionCoefficients;

/// Bisection depth used when searching [0, 1] for motion derivative zeros.
pub const ZERO_SEARCH_DEPTH: usize = 8;

/// Number of Newton-Raphson iterations used to refine a zero.
pub const NEWTON_ITERATIONS: usize = 4;

/// Refined zeros lying this far outside their sub-interval are still
/// accepted.
pub const ZERO_SLACK: Float = 1e-3;

/// Evaluates the motion derivative over an interval of time values.
///
/// * `coeffs` - Coefficients `c1..c5`.
/// * `theta`  - Angle θ between the keyframe rotations.
/// * `t`      - Interval of normalized time values inside [0, 1].
fn eval_interval(coeffs: &MotionCoefficients, theta: Float, t: Interval) -> Interval {
    let [c1, c2, c3, c4, c5] = coeffs.c.map(Interval::from);
    let angle = Interval::from(2.0 * theta) * t;
    c1 + (c2 + c3 * t) * angle.cos() + (c4 + c5 * t) * angle.sin()
}

/// Find the values of any zero crossings of the motion derivative
///
/// `f(t) = c1 + (c2 + c3 t) cos(2θt) + (c4 + c5 t) sin(2θt)`
///
/// over the given interval and append them to `zeros`. Sub-intervals where
/// the conservative interval bound of `f` cannot change sign are pruned.
/// Others are bisected until `depth` reaches zero and then refined with
/// Newton's method.
///
/// * `coeffs` - Coefficients `c1..c5`.
/// * `theta`  - Angle θ between the keyframe rotations.
/// * `t`      - Interval of normalized time values inside [0, 1].
/// * `depth`  - Remaining bisection depth.
/// * `zeros`  - Receives the zeros found.
pub fn find_motion_derivative_zeros(
    coeffs: &MotionCoefficients,
    theta: Float,
    t: Interval,
    depth: usize,
    zeros: &mut Vec<Float>,
) {
    // Evaluate motion derivative in interval form, return if no zeros
    let range = eval_interval(coeffs, theta, t);
    if range.has_fixed_sign() || range.is_degenerate() {
        return;
    }

    if depth > 0 {
        // Split t and check both resulting intervals
        let (lower, upper) = t.bisect();
        find_motion_derivative_zeros(coeffs, theta, lower, depth - 1, zeros);
        find_motion_derivative_zeros(coeffs, theta, upper, depth - 1, zeros);
    } else if let Some(t_newton) = newton_refine(coeffs, theta, t) {
        zeros.push(t_newton);
    }
}

/// Refines a zero with Newton's method starting from the interval midpoint.
/// Returns `None` if the refined value lands outside the interval widened by
/// `ZERO_SLACK`.
///
/// * `coeffs` - Coefficients `c1..c5`.
/// * `theta`  - Angle θ between the keyframe rotations.
/// * `t`      - Interval of normalized time values inside [0, 1].
fn newton_refine(coeffs: &MotionCoefficients, theta: Float, t: Interval) -> Option<Float> {
    let mut t_newton = t.midpoint();
    for _ in 0..NEWTON_ITERATIONS {
        let f_newton = coeffs.eval_function(theta, t_newton);
        let f_prime_newton = coeffs.eval_slope(theta, t_newton);
        if f_newton == 0.0 || f_prime_newton == 0.0 {
            break;
        }
        t_newton -= f_newton / f_prime_newton;
    }

    if t.contains_with_slack(t_newton, ZERO_SLACK) {
        Some(t_newton)
    } else {
        None
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pbrt::PI;
    use float_cmp::*;

    fn zeros_of(c: [Float; 5], theta: Float) -> Vec<Float> {
        let mut zeros = Vec::new();
        find_motion_derivative_zeros(
            &MotionCoefficients { c },
            theta,
            Interval::new(0.0, 1.0),
            ZERO_SEARCH_DEPTH,
            &mut zeros,
        );
        zeros
    }

    #[test]
    fn finds_zero_of_cosine() {
        // f(t) = cos(2θt) with 2θ = π vanishes at t = 0.5.
        let zeros = zeros_of([0.0, 1.0, 0.0, 0.0, 0.0], PI * 0.5);
        assert!(!zeros.is_empty());
        for z in zeros {
            assert!(approx_eq!(Float, z, 0.5, epsilon = 1e-3), "zero at {}", z);
        }
    }

    #[test]
    fn finds_zero_of_linear_term() {
        // f(t) = -0.3 + t with θ = 0.
        let zeros = zeros_of([-0.3, 0.0, 0.0, 0.0, 0.0], 0.0);
        assert!(zeros.is_empty());
        let zeros = zeros_of([-0.3, 0.0, 1.0, 0.0, 0.0], 0.0);
        assert!(!zeros.is_empty());
        for z in zeros {
            assert!(approx_eq!(Float, z, 0.3, epsilon = 1e-3), "zero at {}", z);
        }
    }

    #[test]
    fn prunes_functions_without_sign_change() {
        assert!(zeros_of([2.0, 1.0, 0.0, 0.5, 0.0], 1.0).is_empty());
        assert!(zeros_of([-2.0, 1.0, 0.0, 0.5, 0.0], 1.0).is_empty());
    }

    #[test]
    fn constant_zero_is_degenerate() {
        assert!(zeros_of([0.0; 5], 1.0).is_empty());
    }

    #[test]
    fn finds_multiple_zeros() {
        // f(t) = sin(2θt) with 2θ = 2π vanishes at 0, 0.5 and 1.
        let zeros = zeros_of([0.0, 0.0, 0.0, 1.0, 0.0], PI);
        assert!(zeros.iter().any(|z| approx_eq!(Float, *z, 0.5, epsilon = 1e-3)));
        let c = MotionCoefficients {
            c: [0.0, 0.0, 0.0, 1.0, 0.0],
        };
        for z in zeros {
            assert!(c.eval_function(PI, z).abs() < 1e-3, "f({}) != 0", z);
        }
    }

    #[test]
    fn accepted_zeros_stay_near_interval() {
        let zeros = zeros_of([0.1, -0.4, 0.9, 0.3, -0.7], 1.2);
        for z in zeros {
            assert!(z >= -ZERO_SLACK && z < 1.0 + ZERO_SLACK);
        }
    }

    #[test]
    fn newton_stops_on_flat_slope() {
        // f(t) = 1 has f' = 0 everywhere, so the midpoint is kept.
        let c = MotionCoefficients {
            c: [1.0, 0.0, 0.0, 0.0, 0.0],
        };
        assert_eq!(newton_refine(&c, 0.0, Interval::new(0.25, 0.5)), Some(0.375));
    }

    #[test]
    fn newton_stops_on_exact_zero() {
        // f(t) = -0.375 + t vanishes exactly at the midpoint.
        let c = MotionCoefficients {
            c: [-0.375, 0.0, 1.0, 0.0, 0.0],
        };
        assert_eq!(newton_refine(&c, 0.0, Interval::new(0.25, 0.5)), Some(0.375));
    }

    #[test]
    fn newton_rejects_zero_outside_interval() {
        // f(t) = -0.9 + t; Newton jumps from 0.125 straight to 0.9.
        let c = MotionCoefficients {
            c: [-0.9, 0.0, 1.0, 0.0, 0.0],
        };
        assert_eq!(newton_refine(&c, 0.0, Interval::new(0.0, 0.25)), None);

        // Within the slack the same root is accepted.
        let z = newton_refine(&c, 0.0, Interval::new(0.75, 0.8995));
        assert!(approx_eq!(Float, z.unwrap_or(-1.0), 0.9, epsilon = 1e-5));
    }

    #[test]
    fn newton_uses_fixed_iteration_count() {
        // f(t) = 0.2 + cos(3t) needs several steps from the midpoint.
        let c = MotionCoefficients {
            c: [0.2, 1.0, 0.0, 0.0, 0.0],
        };
        let theta = 1.5;
        let t = Interval::new(0.5, 0.625);

        let mut expected = t.midpoint();
        for _ in 0..NEWTON_ITERATIONS {
            let f = c.eval_function(theta, expected);
            let f_prime = c.eval_slope(theta, expected);
            if f == 0.0 || f_prime == 0.0 {
                break;
            }
            expected -= f / f_prime;
        }

        let z = newton_refine(&c, theta, t);
        assert_eq!(z, Some(expected));
        assert!(c.eval_function(theta, expected).abs() < 1e-5);
    }
}
