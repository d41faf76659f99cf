//! Quaternions

use super::{clamp, Dot, Float, Matrix3x3, Transform, Vector3f, IDENTITY_MATRIX3};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Cosine of the angle between two quaternions above which they are treated
/// as parallel.
pub const PARALLEL_COS_THETA: Float = 0.9995;

/// A quaternion
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Quaternion {
    /// The `x`, `y`, `z` components represented as a vector.
    pub v: Vector3f,

    /// The real component `w`.
    pub w: Float,
}

impl Quaternion {
    /// Create a new quaternion.
    ///
    /// * `v` - The `x`, `y`, `z` components represented as a vector.
    /// * `w` - The real component `w`.
    pub fn new(v: Vector3f, w: Float) -> Self {
        Self { v, w }
    }

    /// Normalizes the quaternion by dividing each component by its length.
    pub fn normalize(&self) -> Self {
        *self / self.length()
    }

    /// Returns the square of the length of the quaternion which is the
    /// inner product with itself.
    pub fn length_squared(&self) -> Float {
        self.dot(self)
    }

    /// Returns the length of the quaternion which is square root of the inner
    /// product with itself.
    pub fn length(&self) -> Float {
        self.length_squared().sqrt()
    }

    /// Returns `q` or `-q`, whichever lies in the same hemisphere as this
    /// quaternion. Both represent the same rotation but interpolating towards
    /// the returned one follows the shorter arc.
    ///
    /// * `q` - The other quaternion.
    pub fn shortest_path_to(&self, q: &Self) -> Self {
        if self.dot(q) < 0.0 {
            -*q
        } else {
            *q
        }
    }

    /// Returns the angle in radians of the rotation taking this unit
    /// quaternion to another unit quaternion.
    ///
    /// * `q` - The other quaternion.
    pub fn angle_between(&self, q: &Self) -> Float {
        2.0 * clamp(self.abs_dot(q), 0.0, 1.0).acos()
    }

    /// Interpolate between this and another quaternion using spherical linear
    /// interpolation. The endpoints `t = 0` and `t = 1` are returned exactly.
    ///
    /// * `t` - The interpolation parameter.
    /// * `q` - The other quaternion.
    pub fn slerp(&self, t: Float, q: &Self) -> Self {
        if t == 0.0 {
            return *self;
        }
        if t == 1.0 {
            return *q;
        }

        let cos_theta = self.dot(q);
        if cos_theta > PARALLEL_COS_THETA {
            // Quaternions are nearly parallel. Use linear interpolation to
            // avoid numerical instability.
            ((1.0 - t) * *self + t * *q).normalize()
        } else {
            let theta = clamp(cos_theta, -1.0, 1.0).acos();
            let thetap = theta * t;
            let qperp = self.orthogonal_towards(q, cos_theta);
            *self * thetap.cos() + qperp * thetap.sin()
        }
    }

    /// Returns the unit quaternion orthogonal to this one in the plane spanned
    /// by this quaternion and `q`, pointing towards `q`.
    ///
    /// * `q`         - The other quaternion.
    /// * `cos_theta` - The dot product of this quaternion with `q`.
    pub fn orthogonal_towards(&self, q: &Self, cos_theta: Float) -> Self {
        (*q - *self * cos_theta).normalize()
    }

    /// Returns the rotation matrix for this unit quaternion. It is
    /// `I + rotation_bilinear(q, q)`.
    pub fn rotation_matrix(&self) -> Matrix3x3 {
        IDENTITY_MATRIX3 + rotation_bilinear(self, self)
    }
}

/// Returns the symmetric bilinear form `K(a, b)` that generates rotation
/// matrices from unit quaternions: `R(q) = I + K(q, q)`.
///
/// Because it is bilinear, the rotation along a slerp path
/// `q(t) = a cos(φ) + b sin(φ)` with orthonormal `a`, `b` expands into
/// `I + K(a, a) cos²(φ) + 2 K(a, b) sin(φ) cos(φ) + K(b, b) sin²(φ)`.
///
/// * `a` - First quaternion.
/// * `b` - Second quaternion.
pub fn rotation_bilinear(a: &Quaternion, b: &Quaternion) -> Matrix3x3 {
    let (ax, ay, az, aw) = (a.v.x, a.v.y, a.v.z, a.w);
    let (bx, by, bz, bw) = (b.v.x, b.v.y, b.v.z, b.w);

    let xx = ax * bx;
    let yy = ay * by;
    let zz = az * bz;
    let xy = ax * by + ay * bx;
    let xz = ax * bz + az * bx;
    let yz = ay * bz + az * by;
    let wx = aw * bx + ax * bw;
    let wy = aw * by + ay * bw;
    let wz = aw * bz + az * bw;

    Matrix3x3::new([
        [-2.0 * (yy + zz), xy - wz, xz + wy],
        [xy + wz, -2.0 * (xx + zz), yz - wx],
        [xz - wy, yz + wx, -2.0 * (xx + yy)],
    ])
}

impl Default for Quaternion {
    /// Returns the identity rotation [0, 0, 0, 1].
    fn default() -> Self {
        Self {
            v: Vector3f::zero(),
            w: 1.0,
        }
    }
}

impl fmt::Display for Quaternion {
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}, {}]", self.v.x, self.v.y, self.v.z, self.w)
    }
}

impl From<&Matrix3x3> for Quaternion {
    /// Returns a quaternion representing a rotation matrix.
    ///
    /// * `m` - The orthonormal rotation matrix.
    fn from(m: &Matrix3x3) -> Self {
        let m = &m.m;
        let trace = m[0][0] + m[1][1] + m[2][2];
        if trace > 0.0 {
            // Compute w from matrix trace, then xyz
            // 4w^2 = m[0][0] + m[1][1] + m[2][2] + m[3][3] (but m[3][3] == 1)
            let s = (trace + 1.0).sqrt();
            let w = s / 2.0;
            let s = 0.5 / s;

            let v = Vector3f::new(
                (m[2][1] - m[1][2]) * s,
                (m[0][2] - m[2][0]) * s,
                (m[1][0] - m[0][1]) * s,
            );
            Self::new(v, w)
        } else {
            // Compute largest of x, y, or z, then remaining components
            const NEXT: [usize; 3] = [1, 2, 0];
            let mut i = 0;
            if m[1][1] > m[0][0] {
                i = 1;
            }
            if m[2][2] > m[i][i] {
                i = 2;
            }
            let j = NEXT[i];
            let k = NEXT[j];

            let mut s = ((m[i][i] - (m[j][j] + m[k][k])) + 1.0).sqrt();
            let mut q = [0.0; 3];
            q[i] = s * 0.5;
            if s != 0.0 {
                s = 0.5 / s;
            }
            let w = (m[k][j] - m[j][k]) * s;
            q[j] = (m[j][i] + m[i][j]) * s;
            q[k] = (m[k][i] + m[i][k]) * s;

            Self::new(Vector3f::new(q[0], q[1], q[2]), w)
        }
    }
}

impl From<Quaternion> for Transform {
    /// Returns a rotation transform from a unit quaternion.
    ///
    /// * `q` - The quaternion.
    fn from(q: Quaternion) -> Transform {
        let r = q.rotation_matrix();
        Transform::from_linear(&r, &r.transpose())
    }
}

impl Add<Quaternion> for Quaternion {
    type Output = Self;

    /// Adds the components of the given quaternion.
    ///
    /// * `other` - The quaternion to add.
    fn add(self, other: Self) -> Self::Output {
        Self::new(self.v + other.v, self.w + other.w)
    }
}

impl Sub<Quaternion> for Quaternion {
    type Output = Self;

    /// Subtracts the components of the given quaternion.
    ///
    /// * `other` - The quaternion to subtract.
    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.v - other.v, self.w - other.w)
    }
}

impl Mul<Float> for Quaternion {
    type Output = Self;

    /// Scales the components of the given quaternion.
    ///
    /// * `f` - The scaling factor.
    fn mul(self, f: Float) -> Self::Output {
        Self::new(f * self.v, f * self.w)
    }
}

impl Mul<Quaternion> for Float {
    type Output = Quaternion;

    /// Scales the components of the given quaternion.
    ///
    /// * `q` - The quaternion to scale.
    fn mul(self, q: Quaternion) -> Self::Output {
        Quaternion::new(self * q.v, self * q.w)
    }
}

impl Div<Float> for Quaternion {
    type Output = Self;

    /// Scales the components of the given quaternion by 1/f.
    ///
    /// * `f` - The scaling factor.
    fn div(self, f: Float) -> Self::Output {
        Self::new(self.v / f, self.w / f)
    }
}

impl Neg for Quaternion {
    type Output = Self;

    /// Scales the components by -1.
    fn neg(self) -> Self::Output {
        Self::new(-self.v, -self.w)
    }
}

impl Dot<Quaternion> for Quaternion {
    type Output = Float;

    /// Returns the inner product with another quaternion.
    ///
    /// * `other` - The other quaternion.
    fn dot(&self, other: &Quaternion) -> Float {
        self.v.dot(&other.v) + self.w * other.w
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Transform;
    use float_cmp::*;
    use proptest::prelude::*;

    fn axis_angle(axis: &Vector3f, degrees: Float) -> Quaternion {
        let half = degrees.to_radians() * 0.5;
        Quaternion::new(axis.normalize() * half.sin(), half.cos())
    }

    fn assert_matrix_eq(a: &Matrix3x3, b: &Matrix3x3, epsilon: Float) {
        for i in 0..3 {
            for j in 0..3 {
                assert!(
                    approx_eq!(Float, a.m[i][j], b.m[i][j], epsilon = epsilon),
                    "m[{}][{}]: {} != {}",
                    i,
                    j,
                    a.m[i][j],
                    b.m[i][j]
                );
            }
        }
    }

    #[test]
    fn identity_gives_identity_matrix() {
        assert_eq!(Quaternion::default().rotation_matrix(), IDENTITY_MATRIX3);
    }

    #[test]
    fn rotation_matrix_matches_rotate_z() {
        let q = axis_angle(&Vector3f::new(0.0, 0.0, 1.0), 90.0);
        let r = Transform::rotate_z(90.0).m.linear_part();
        assert_matrix_eq(&q.rotation_matrix(), &r, 1e-6);
    }

    #[test]
    fn rotation_matrix_matches_rotate_about_axis() {
        let axis = Vector3f::new(1.0, -2.0, 0.5);
        let q = axis_angle(&axis, 37.0);
        let r = Transform::rotate(37.0, &axis).m.linear_part();
        assert_matrix_eq(&q.rotation_matrix(), &r, 1e-5);
    }

    #[test]
    fn matrix_conversion_round_trips() {
        for (axis, degrees) in [
            (Vector3f::new(0.0, 0.0, 1.0), 30.0),
            (Vector3f::new(1.0, 0.0, 0.0), 179.0),
            (Vector3f::new(0.0, 1.0, 0.0), 200.0),
            (Vector3f::new(1.0, 1.0, 1.0), 270.0),
        ] {
            let q = axis_angle(&axis, degrees);
            let q2 = Quaternion::from(&q.rotation_matrix());
            // q and -q are the same rotation.
            assert!(q.abs_dot(&q2) > 0.9999, "{} vs {}", q, q2);
        }
    }

    #[test]
    fn shortest_path_flips_opposite_hemisphere() {
        let q0 = Quaternion::default();
        let q1 = Quaternion::new(Vector3f::new(0.0, 0.0, 0.6), -0.8);
        let q1s = q0.shortest_path_to(&q1);
        assert_eq!(q1s, -q1);
        assert!(q0.dot(&q1s) >= 0.0);
        assert_eq!(q0.shortest_path_to(&q1s), q1s);
    }

    #[test]
    fn slerp_endpoints_are_exact() {
        let q0 = axis_angle(&Vector3f::new(0.0, 1.0, 0.0), 10.0);
        let q1 = axis_angle(&Vector3f::new(1.0, 0.0, 1.0), 120.0);
        assert_eq!(q0.slerp(0.0, &q1), q0);
        assert_eq!(q0.slerp(1.0, &q1), q1);
    }

    #[test]
    fn slerp_nearly_parallel_stays_unit() {
        let q0 = axis_angle(&Vector3f::new(0.0, 1.0, 0.0), 10.0);
        let q1 = axis_angle(&Vector3f::new(0.0, 1.0, 0.0), 10.5);
        let q = q0.slerp(0.5, &q1);
        assert!(approx_eq!(Float, q.length(), 1.0, epsilon = 1e-6));
        assert!(approx_eq!(
            Float,
            q0.angle_between(&q),
            (0.25 as Float).to_radians(),
            epsilon = 1e-3
        ));
    }

    #[test]
    fn slerp_has_constant_angular_velocity() {
        let axis = Vector3f::new(0.0, 0.0, 1.0);
        let q0 = Quaternion::default();
        let q1 = axis_angle(&axis, 90.0);
        let q = q0.slerp(0.25, &q1);
        assert!(q.abs_dot(&axis_angle(&axis, 22.5)) > 0.99999);
    }

    prop_compose! {
        fn unit_quaternion()(
            x in -1.0..1.0 as Float, y in -1.0..1.0 as Float,
            z in -1.0..1.0 as Float, w in -1.0..1.0 as Float,
        ) -> Quaternion {
            let q = Quaternion::new(Vector3f::new(x, y, z), w);
            if q.length() < 1e-3 { Quaternion::default() } else { q.normalize() }
        }
    }

    proptest! {
        #[test]
        fn rotation_matrix_is_orthonormal(q in unit_quaternion()) {
            let r = q.rotation_matrix();
            let rrt = r * r.transpose();
            for i in 0..3 {
                for j in 0..3 {
                    prop_assert!(approx_eq!(
                        Float, rrt.m[i][j], IDENTITY_MATRIX3.m[i][j], epsilon = 1e-4
                    ));
                }
            }
            prop_assert!(approx_eq!(Float, r.determinant(), 1.0, epsilon = 1e-4));
        }

        #[test]
        fn bilinear_form_is_symmetric(a in unit_quaternion(), b in unit_quaternion()) {
            let kab = rotation_bilinear(&a, &b);
            let kba = rotation_bilinear(&b, &a);
            for i in 0..3 {
                for j in 0..3 {
                    prop_assert!(approx_eq!(Float, kab.m[i][j], kba.m[i][j], epsilon = 1e-6));
                }
            }
        }

        #[test]
        fn slerp_never_steps_past_shortest_angle(
            q0 in unit_quaternion(), q1 in unit_quaternion(), t in 0.0..1.0 as Float,
        ) {
            let q1 = q0.shortest_path_to(&q1);
            let total = q0.angle_between(&q1);
            let q = q0.slerp(t, &q1);
            prop_assert!(q0.angle_between(&q) <= total + 1e-3);
            prop_assert!(q.angle_between(&q1) <= total + 1e-3);
            prop_assert!(approx_eq!(Float, q.length(), 1.0, epsilon = 1e-4));
        }
    }
}
