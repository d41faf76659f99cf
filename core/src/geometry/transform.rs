//! Transformations

use super::{
    abs, gamma, matrix4x4, Bounds3, Bounds3f, Dot, Float, Matrix3x3, Matrix4x4, Point3f, Ray,
    RayDifferential, Union, Vector3f, IDENTITY_MATRIX, NAN_MATRIX,
};
use std::ops::Mul;

/// A transformation for mapping from points to points and vectors to vectors.
#[derive(Copy, Clone, Debug, Default)]
pub struct Transform {
    /// The transformation matrix.
    pub m: Matrix4x4,

    /// The inverse transformation matrix. Filled with NaN when `m` is
    /// singular.
    pub m_inv: Matrix4x4,
}

// Returns true if x is outside the (0.999, 1.001) range.
//
// * `x` - The value to check
fn not_one(x: Float) -> bool {
    x < 0.999 || x > 1.001
}

impl Transform {
    /// Create a transformation representing a translation.
    ///
    /// * `delta` -  Translation.
    #[rustfmt::skip]
    pub fn translate(delta: &Vector3f) -> Self {
        Self {
            m: matrix4x4(
                1.0, 0.0, 0.0, delta.x,
                0.0, 1.0, 0.0, delta.y,
                0.0, 0.0, 1.0, delta.z,
                0.0, 0.0, 0.0, 1.0,
            ),
            m_inv: matrix4x4(
                1.0, 0.0, 0.0, -delta.x,
                0.0, 1.0, 0.0, -delta.y,
                0.0, 0.0, 1.0, -delta.z,
                0.0, 0.0, 0.0,  1.0,
            ),
        }
    }

    /// Create a transformation representing a scale. A zero factor produces
    /// a singular transform whose inverse is NaN.
    ///
    /// * `x` -  Scaling factor in x-axis.
    /// * `y` -  Scaling factor in y-axis.
    /// * `z` -  Scaling factor in z-axis.
    #[rustfmt::skip]
    pub fn scale(x: Float, y: Float, z: Float) -> Self {
        let m = matrix4x4(
            x,   0.0, 0.0, 0.0,
            0.0, y,   0.0, 0.0,
            0.0, 0.0, z,   0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        if x == 0.0 || y == 0.0 || z == 0.0 {
            return Self { m, m_inv: NAN_MATRIX };
        }
        Self {
            m,
            m_inv: matrix4x4(
                1.0 / x, 0.0,     0.0,     0.0,
                0.0,     1.0 / y, 0.0,     0.0,
                0.0,     0.0,     1.0 / z, 0.0,
                0.0,     0.0,     0.0,     1.0,
            ),
        }
    }

    /// Create a transformation representing rotation about the x-axis.
    ///
    /// * `theta` -  Angle in degrees.
    #[rustfmt::skip]
    pub fn rotate_x(theta: Float) -> Self {
        let (sin_theta, cos_theta) = theta.to_radians().sin_cos();
        let m = matrix4x4(
            1.0, 0.0,        0.0,       0.0,
            0.0, cos_theta, -sin_theta, 0.0,
            0.0, sin_theta,  cos_theta, 0.0,
            0.0, 0.0,        0.0,       1.0,
        );
        Self { m, m_inv: m.transpose() }
    }

    /// Create a transformation representing rotation about the y-axis.
    ///
    /// * `theta` -  Angle in degrees.
    #[rustfmt::skip]
    pub fn rotate_y(theta: Float) -> Self {
        let (sin_theta, cos_theta) = theta.to_radians().sin_cos();
        let m = matrix4x4(
             cos_theta, 0.0, sin_theta, 0.0,
             0.0,       1.0, 0.0,       0.0,
            -sin_theta, 0.0, cos_theta, 0.0,
             0.0,       0.0, 0.0,       1.0,
        );
        Self { m, m_inv: m.transpose() }
    }

    /// Create a transformation representing rotation about the z-axis.
    ///
    /// * `theta` -  Angle in degrees.
    #[rustfmt::skip]
    pub fn rotate_z(theta: Float) -> Self {
        let (sin_theta, cos_theta) = theta.to_radians().sin_cos();
        let m = matrix4x4(
            cos_theta, -sin_theta, 0.0, 0.0,
            sin_theta,  cos_theta, 0.0, 0.0,
            0.0,        0.0,       1.0, 0.0,
            0.0,        0.0,       0.0, 1.0,
        );
        Self { m, m_inv: m.transpose() }
    }

    /// Create a transformation representing rotation about an arbitrary axis.
    ///
    /// * `theta` - Angle in degrees.
    /// * `axis`  - Rotation axis. Need not be normalized.
    pub fn rotate(theta: Float, axis: &Vector3f) -> Self {
        let a = axis.normalize();
        let (sin_theta, cos_theta) = theta.to_radians().sin_cos();
        let mut m = IDENTITY_MATRIX;

        // Compute rotation of first basis vector
        m.m[0][0] = a.x * a.x + (1.0 - a.x * a.x) * cos_theta;
        m.m[0][1] = a.x * a.y * (1.0 - cos_theta) - a.z * sin_theta;
        m.m[0][2] = a.x * a.z * (1.0 - cos_theta) + a.y * sin_theta;

        // Compute rotations of second and third basis vectors
        m.m[1][0] = a.x * a.y * (1.0 - cos_theta) + a.z * sin_theta;
        m.m[1][1] = a.y * a.y + (1.0 - a.y * a.y) * cos_theta;
        m.m[1][2] = a.y * a.z * (1.0 - cos_theta) - a.x * sin_theta;

        m.m[2][0] = a.x * a.z * (1.0 - cos_theta) - a.y * sin_theta;
        m.m[2][1] = a.y * a.z * (1.0 - cos_theta) + a.x * sin_theta;
        m.m[2][2] = a.z * a.z + (1.0 - a.z * a.z) * cos_theta;

        Self {
            m,
            m_inv: m.transpose(),
        }
    }

    /// Create a transformation from a linear map and its known inverse.
    ///
    /// * `l`     - The linear part.
    /// * `l_inv` - The inverse of `l`.
    pub fn from_linear(l: &Matrix3x3, l_inv: &Matrix3x3) -> Self {
        let zero = Vector3f::zero();
        Self {
            m: Matrix4x4::from_linear_and_translation(l, &zero),
            m_inv: Matrix4x4::from_linear_and_translation(l_inv, &zero),
        }
    }

    /// Create a transformation from a 4x4 matrix, failing if the matrix has
    /// no inverse.
    ///
    /// * `m` - A matrix representing a transformation.
    pub fn try_from_matrix(m: Matrix4x4) -> Result<Self, String> {
        m.inverse()
            .map(|m_inv| Self { m, m_inv })
            .ok_or_else(|| format!("matrix {:?} is not invertible", m.m))
    }

    /// Returns the inverse transformation.
    pub fn inverse(&self) -> Self {
        Self {
            m: self.m_inv,
            m_inv: self.m,
        }
    }

    /// Returns true if the inverse is defined.
    pub fn is_invertible(&self) -> bool {
        !self.m_inv.m[0][0].is_nan()
    }

    /// Returns true if matrix is identity matrix.
    pub fn is_identity(&self) -> bool {
        self.m == IDENTITY_MATRIX
    }

    /// Checks if transformation has a scaling term by transforming the
    /// coordinate axes and checking that their transformed length is close
    /// to 1.0.
    pub fn has_scale(&self) -> bool {
        let la2 = self
            .transform_vector(&Vector3f::new(1.0, 0.0, 0.0))
            .length_squared();
        let lb2 = self
            .transform_vector(&Vector3f::new(0.0, 1.0, 0.0))
            .length_squared();
        let lc2 = self
            .transform_vector(&Vector3f::new(0.0, 0.0, 1.0))
            .length_squared();

        not_one(la2) || not_one(lb2) || not_one(lc2)
    }

    /// Returns `true` if the transformation changes the handedness of the
    /// coordinate system.
    pub fn swaps_handedness(&self) -> bool {
        self.m.linear_part().determinant() < 0.0
    }

    /// Applies transformation to a given point.
    ///
    /// * `p` - The point.
    pub fn transform_point(&self, p: &Point3f) -> Point3f {
        let m = &self.m.m;
        let xp = m[0][0] * p.x + m[0][1] * p.y + m[0][2] * p.z + m[0][3];
        let yp = m[1][0] * p.x + m[1][1] * p.y + m[1][2] * p.z + m[1][3];
        let zp = m[2][0] * p.x + m[2][1] * p.y + m[2][2] * p.z + m[2][3];
        let wp = m[3][0] * p.x + m[3][1] * p.y + m[3][2] * p.z + m[3][3];

        debug_assert!(wp != 0.0, "Transformation<Point3f>: wp is zero");

        if wp == 1.0 {
            Point3f::new(xp, yp, zp)
        } else {
            Point3f::new(xp, yp, zp) / wp
        }
    }

    /// Returns the transformed point and absolute error due to applying the
    /// transformation to a point.
    ///
    /// * `p` - The point.
    pub fn transform_point_with_error(&self, p: &Point3f) -> (Point3f, Vector3f) {
        let m = &self.m.m;

        let x_abs_sum = abs(m[0][0] * p.x) + abs(m[0][1] * p.y) + abs(m[0][2] * p.z) + abs(m[0][3]);
        let y_abs_sum = abs(m[1][0] * p.x) + abs(m[1][1] * p.y) + abs(m[1][2] * p.z) + abs(m[1][3]);
        let z_abs_sum = abs(m[2][0] * p.x) + abs(m[2][1] * p.y) + abs(m[2][2] * p.z) + abs(m[2][3]);

        (
            self.transform_point(p),
            gamma(3) * Vector3f::new(x_abs_sum, y_abs_sum, z_abs_sum),
        )
    }

    /// Applies transformation to a given vector.
    ///
    /// * `v` - The vector.
    pub fn transform_vector(&self, v: &Vector3f) -> Vector3f {
        let m = &self.m.m;
        Vector3f::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
        )
    }

    /// Applies transformation to a given ray. The origin is offset to the
    /// edge of its rounding error bounds and `t_max` shortened to match.
    ///
    /// * `r` - The ray.
    pub fn transform_ray(&self, r: &Ray) -> Ray {
        let (mut o, o_error) = self.transform_point_with_error(&r.o);
        let d = self.transform_vector(&r.d);

        // Offset ray origin to edge of error bounds and compute t_max.
        let length_squared = d.length_squared();
        let mut t_max = r.t_max;
        if length_squared > 0.0 {
            let dt = d.abs().dot(&o_error) / length_squared;
            o += d * dt;
            t_max -= dt;
        }

        Ray {
            o,
            d,
            t_max,
            time: r.time,
            differentials: r
                .differentials
                .map(|rd| self.transform_ray_differential(&rd)),
        }
    }

    /// Applies transformation to the auxilliary rays of a ray differential.
    ///
    /// * `rd` - The ray differential.
    pub fn transform_ray_differential(&self, rd: &RayDifferential) -> RayDifferential {
        RayDifferential::new(
            self.transform_point(&rd.rx_origin),
            self.transform_point(&rd.ry_origin),
            self.transform_vector(&rd.rx_direction),
            self.transform_vector(&rd.ry_direction),
        )
    }

    /// Applies transformation to a given bounding box by transforming its
    /// eight corners.
    ///
    /// * `b` - The bounding box.
    pub fn transform_bounds(&self, b: &Bounds3f) -> Bounds3f {
        b.corners()
            .skip(1)
            .fold(Bounds3::from(self.transform_point(&b.p_min)), |acc, c| {
                acc.union(&self.transform_point(&c))
            })
    }
}

impl From<Matrix4x4> for Transform {
    /// Create a transformation from a 4x4 matrix. When the matrix is singular
    /// its inverse is undefined and `m_inv` is filled with NaN.
    ///
    /// * `m` - A matrix representing a transformation.
    fn from(m: Matrix4x4) -> Self {
        Self {
            m,
            m_inv: m.inverse().unwrap_or(NAN_MATRIX),
        }
    }
}

impl From<Matrix3x3> for Transform {
    /// Create a transformation from a linear map. When the map is singular
    /// `m_inv` is filled with NaN.
    ///
    /// * `l` - The linear map.
    fn from(l: Matrix3x3) -> Self {
        let zero = Vector3f::zero();
        Self {
            m: Matrix4x4::from_linear_and_translation(&l, &zero),
            m_inv: l
                .inverse()
                .map(|l_inv| Matrix4x4::from_linear_and_translation(&l_inv, &zero))
                .unwrap_or(NAN_MATRIX),
        }
    }
}

impl PartialEq for Transform {
    /// Two transforms are equal when their forward matrices are equal. The
    /// inverse is derived data and may be NaN.
    fn eq(&self, other: &Self) -> bool {
        self.m == other.m
    }
}

impl Mul<Transform> for Transform {
    type Output = Self;

    /// Composes this transformation with another one. The resulting transform
    /// applies `rhs` first and then `self`.
    ///
    /// * `rhs` - The transformation to compose.
    fn mul(self, rhs: Self) -> Self {
        Self {
            m: self.m * rhs.m,
            m_inv: rhs.m_inv * self.m_inv,
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
