//! Motion derivative terms

use super::super::{
    rotation_bilinear, Axis, DecomposedTransform, Dot, Float, Matrix3x3, Point3f, Vector3f,
    IDENTITY_MATRIX3,
};

/// DerivativeTerm encapsulates the coefficients `ki` to bound the motion of a
/// point `p`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DerivativeTerm {
    pub kc: Float,
    pub kx: Float,
    pub ky: Float,
    pub kz: Float,
}

impl DerivativeTerm {
    /// Returns a new derivative term with given coefficients `ki`.
    pub fn new(kc: Float, kx: Float, ky: Float, kz: Float) -> Self {
        Self { kc, kx, ky, kz }
    }

    /// Return the coefficient `ci` to bound the motion of a point `p`.
    ///
    /// * `p` - The point.
    pub fn eval(&self, p: &Point3f) -> Float {
        self.kc + self.kx * p.x + self.ky * p.y + self.kz * p.z
    }
}

/// The five coefficients `c1..c5` of the derivative of one coordinate of a
/// moving point:
///
/// `f(t) = c1 + (c2 + c3 t) cos(2θt) + (c4 + c5 t) sin(2θt)`
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MotionCoefficients {
    pub c: [Float; 5],
}

impl MotionCoefficients {
    /// Evaluates `f(t)`.
    ///
    /// * `theta` - Angle θ between the keyframe rotations.
    /// * `t`     - Normalized time in [0, 1].
    pub fn eval_function(&self, theta: Float, t: Float) -> Float {
        let [c1, c2, c3, c4, c5] = self.c;
        let (sin, cos) = (2.0 * theta * t).sin_cos();
        c1 + (c2 + c3 * t) * cos + (c4 + c5 * t) * sin
    }

    /// Evaluates `f'(t)`.
    ///
    /// * `theta` - Angle θ between the keyframe rotations.
    /// * `t`     - Normalized time in [0, 1].
    pub fn eval_slope(&self, theta: Float, t: Float) -> Float {
        let [_, c2, c3, c4, c5] = self.c;
        let (sin, cos) = (2.0 * theta * t).sin_cos();
        (c3 + 2.0 * theta * (c4 + c5 * t)) * cos + (c5 - 2.0 * theta * (c2 + c3 * t)) * sin
    }
}

/// The 15 derivative terms (five per axis) describing how the time
/// derivative of a transformed point depends on the point.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MotionDerivative {
    terms: [[DerivativeTerm; 5]; 3],
}

impl MotionDerivative {
    /// Builds the derivative terms for motion between two decomposed
    /// keyframes. The rotation of `end` must already be sign-normalized
    /// against the rotation of `start`.
    ///
    /// Along the slerp path `q(t) = q0 cos(θt) + q⊥ sin(θt)` the rotation is
    /// `R(t) = A + B cos(2θt) + C sin(2θt)` where
    ///
    /// * `A = I + (K(q0, q0) + K(q⊥, q⊥)) / 2`
    /// * `B = (K(q0, q0) - K(q⊥, q⊥)) / 2`
    /// * `C = K(q0, q⊥)`
    ///
    /// for the rotation form `K` of `rotation_bilinear`. Differentiating
    /// `T(t) + R(t) S(t) p` with linear `T` and `S` gives the coefficients.
    ///
    /// * `start` - Decomposition of the start transformation.
    /// * `end`   - Decomposition of the end transformation.
    /// * `theta` - Angle θ between the keyframe rotations.
    pub fn new(start: &DecomposedTransform, end: &DecomposedTransform, theta: Float) -> Self {
        let q0 = start.rotation;
        let qperp = q0.orthogonal_towards(&end.rotation, q0.dot(&end.rotation));

        let k00 = rotation_bilinear(&q0, &q0);
        let kpp = rotation_bilinear(&qperp, &qperp);
        let a = IDENTITY_MATRIX3 + (k00 + kpp) * 0.5;
        let b = (k00 - kpp) * 0.5;
        let c = rotation_bilinear(&q0, &qperp);

        let s0 = start.scale;
        let ds = end.scale - start.scale;
        let dt = end.translation - start.translation;
        let two_theta = 2.0 * theta;

        let linear: [Matrix3x3; 5] = [
            a * ds,
            b * ds + c * s0 * two_theta,
            c * ds * two_theta,
            c * ds - b * s0 * two_theta,
            b * ds * -two_theta,
        ];
        let constant: [Vector3f; 5] = [
            dt,
            Vector3f::zero(),
            Vector3f::zero(),
            Vector3f::zero(),
            Vector3f::zero(),
        ];

        let mut terms = [[DerivativeTerm::default(); 5]; 3];
        for (axis, row) in terms.iter_mut().enumerate() {
            for (k, term) in row.iter_mut().enumerate() {
                let l = &linear[k].m[axis];
                *term = DerivativeTerm::new(constant[k][axis], l[0], l[1], l[2]);
            }
        }

        Self { terms }
    }

    /// Returns the derivative terms for an axis.
    ///
    /// * `axis` - The axis.
    pub fn terms(&self, axis: Axis) -> &[DerivativeTerm; 5] {
        &self.terms[usize::from(axis)]
    }

    /// Evaluates the five coefficients for a point along an axis.
    ///
    /// * `axis` - The axis.
    /// * `p`    - The point.
    pub fn coefficients(&self, axis: Axis, p: &Point3f) -> MotionCoefficients {
        let terms = self.terms(axis);
        MotionCoefficients {
            c: [
                terms[0].eval(p),
                terms[1].eval(p),
                terms[2].eval(p),
                terms[3].eval(p),
                terms[4].eval(p),
            ],
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::*;
    use crate::pbrt::abs;
    use float_cmp::*;

    #[test]
    fn derivative_term_is_affine_in_point() {
        let t = DerivativeTerm::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(t.eval(&Point3f::new(1.0, 1.0, 1.0)), 10.0);
        assert_eq!(t.eval(&Point3f::zero()), 1.0);
    }

    #[test]
    fn slope_matches_finite_difference() {
        let c = MotionCoefficients {
            c: [0.5, -1.0, 2.0, 0.25, -3.0],
        };
        let theta = 0.7;
        let h = 1e-3;
        for i in 1..10 {
            let t = i as Float / 10.0;
            let fd = (c.eval_function(theta, t + h) - c.eval_function(theta, t - h)) / (2.0 * h);
            assert!(approx_eq!(
                Float,
                c.eval_slope(theta, t),
                fd,
                epsilon = 1e-2
            ));
        }
    }

    // Compares f(t) with a central difference of the interpolated point.
    fn check_against_interpolation(start: Transform, end: Transform, p: Point3f) {
        let at = AnimatedTransform::new(start, 0.0, end, 1.0);
        assert!(at.has_rotation());
        let theta = at.rotation_angle();
        let h = 1e-2;
        for i in 1..10 {
            let t = i as Float / 10.0;
            let p0 = at.transform_point(t - h, &p);
            let p1 = at.transform_point(t + h, &p);
            for axis in Axis::ALL {
                let c = at.motion_coefficients(axis, &p);
                let fd = (p1[axis] - p0[axis]) / (2.0 * h);
                let exact = c.eval_function(theta, t);
                let tolerance = 2e-2 * (1.0 + abs(exact));
                assert!(
                    abs(fd - exact) <= tolerance,
                    "axis {:?} t {}: finite difference {} vs {}",
                    axis,
                    t,
                    fd,
                    exact
                );
            }
        }
    }

    #[test]
    fn coefficients_match_rotation_about_z() {
        check_against_interpolation(
            Transform::default(),
            Transform::rotate_z(90.0),
            Point3f::new(1.5, 0.0, 0.0),
        );
    }

    #[test]
    fn coefficients_match_general_motion() {
        check_against_interpolation(
            Transform::translate(&Vector3f::new(1.0, -2.0, 0.5))
                * Transform::rotate(20.0, &Vector3f::new(1.0, 1.0, 0.0))
                * Transform::scale(1.0, 2.0, 0.5),
            Transform::translate(&Vector3f::new(-3.0, 1.0, 2.0))
                * Transform::rotate(130.0, &Vector3f::new(0.0, 1.0, 1.0))
                * Transform::scale(2.0, 1.0, 1.5),
            Point3f::new(0.5, -1.0, 2.0),
        );
    }

    #[test]
    fn coefficients_match_flipped_rotation() {
        check_against_interpolation(
            Transform::rotate_x(10.0),
            Transform::rotate_x(300.0) * Transform::scale(1.5, 1.5, 1.5),
            Point3f::new(0.0, 1.0, -1.0),
        );
    }
}
