//! 3x3 Matrix

use super::{abs, lerp, max, Float, Vector3f};
use std::fmt;
use std::ops::{Add, Index, Mul, Sub};

/// Determinants at or below this magnitude are treated as singular.
pub const SINGULAR_DETERMINANT: Float = 1e-12;

/// A 3x3 matrix containing Float values. Used for the linear (rotation, scale
/// and shear) part of affine transformations.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Matrix3x3 {
    /// Stores a 2-D array of Float in row-major order.
    pub m: [[Float; 3]; 3],
}

/// Identity matrix.
pub const IDENTITY_MATRIX3: Matrix3x3 = Matrix3x3 {
    m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
};

impl Matrix3x3 {
    /// Create a 3x3 matrix from rows.
    ///
    /// * `m` - The rows.
    pub fn new(m: [[Float; 3]; 3]) -> Self {
        Self { m }
    }

    /// Create a diagonal matrix.
    ///
    /// * `d` - The diagonal entries.
    pub fn diagonal(d: &Vector3f) -> Self {
        Self::new([[d.x, 0.0, 0.0], [0.0, d.y, 0.0], [0.0, 0.0, d.z]])
    }

    /// Returns the transpose of the matrix.
    pub fn transpose(&self) -> Self {
        let m = &self.m;
        Self::new([
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ])
    }

    /// Returns the determinant.
    pub fn determinant(&self) -> Float {
        let m = &self.m;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Returns the inverse of the matrix computed from its adjugate, or `None`
    /// if the matrix is singular.
    ///
    /// The singularity test is relative to the scale of the entries so that
    /// uniformly tiny but well conditioned matrices are still invertible.
    pub fn inverse(&self) -> Option<Self> {
        let m = &self.m;
        let det = self.determinant();
        let scale = self.max_abs();
        if !det.is_finite() || scale == 0.0 || abs(det) <= SINGULAR_DETERMINANT * scale * scale * scale
        {
            return None;
        }

        let inv_det = 1.0 / det;
        let cofactor = |r0: usize, r1: usize, c0: usize, c1: usize| {
            m[r0][c0] * m[r1][c1] - m[r0][c1] * m[r1][c0]
        };

        // The inverse is the transposed cofactor matrix scaled by 1/det.
        Some(Self::new([
            [
                cofactor(1, 2, 1, 2) * inv_det,
                -cofactor(0, 2, 1, 2) * inv_det,
                cofactor(0, 1, 1, 2) * inv_det,
            ],
            [
                -cofactor(1, 2, 0, 2) * inv_det,
                cofactor(0, 2, 0, 2) * inv_det,
                -cofactor(0, 1, 0, 2) * inv_det,
            ],
            [
                cofactor(1, 2, 0, 1) * inv_det,
                -cofactor(0, 2, 0, 1) * inv_det,
                cofactor(0, 1, 0, 1) * inv_det,
            ],
        ]))
    }

    /// Returns the largest absolute value of the entries.
    pub fn max_abs(&self) -> Float {
        self.m
            .iter()
            .flatten()
            .fold(0.0, |acc: Float, &v| max(acc, abs(v)))
    }

    /// Returns the largest, over all rows, of the L1 norm of the row of
    /// differences with another matrix.
    ///
    /// * `other` - The other matrix.
    pub fn l1_row_distance(&self, other: &Self) -> Float {
        (0..3).fold(0.0, |norm: Float, i| {
            let n: Float = (0..3).map(|j| abs(self.m[i][j] - other.m[i][j])).sum();
            max(norm, n)
        })
    }

    /// Interpolate each element between two matrices.
    ///
    /// * `t`  - Interpolation parameter.
    /// * `m0` - Matrix at t=0.
    /// * `m1` - Matrix at t=1.
    pub fn lerp(t: Float, m0: &Self, m1: &Self) -> Self {
        let mut m = [[0.0; 3]; 3];
        for (i, row) in m.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                *v = lerp(t, m0.m[i][j], m1.m[i][j]);
            }
        }
        Self::new(m)
    }

    /// Returns `true` if the matrix has any NaN or infinite entries.
    pub fn has_non_finite(&self) -> bool {
        self.m.iter().flatten().any(|v| !v.is_finite())
    }
}

impl Default for Matrix3x3 {
    /// Returns the default as identity matrix.
    fn default() -> Self {
        IDENTITY_MATRIX3
    }
}

impl Mul for Matrix3x3 {
    type Output = Self;

    /// Post-multiply the given matrix.
    ///
    /// * `other` - The other matrix
    fn mul(self, other: Self) -> Self::Output {
        let mut m = [[0.0; 3]; 3];
        for (i, row) in m.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                *v = self.m[i][0] * other.m[0][j]
                    + self.m[i][1] * other.m[1][j]
                    + self.m[i][2] * other.m[2][j];
            }
        }
        Self::new(m)
    }
}

impl Mul<Float> for Matrix3x3 {
    type Output = Self;

    /// Scale every element.
    ///
    /// * `f` - The scaling factor.
    fn mul(self, f: Float) -> Self::Output {
        let mut m = self.m;
        m.iter_mut().flatten().for_each(|v| *v *= f);
        Self::new(m)
    }
}

impl Add for Matrix3x3 {
    type Output = Self;

    /// Element-wise addition.
    ///
    /// * `other` - The other matrix
    fn add(self, other: Self) -> Self::Output {
        let mut m = self.m;
        for (i, row) in m.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                *v += other.m[i][j];
            }
        }
        Self::new(m)
    }
}

impl Sub for Matrix3x3 {
    type Output = Self;

    /// Element-wise subtraction.
    ///
    /// * `other` - The other matrix
    fn sub(self, other: Self) -> Self::Output {
        let mut m = self.m;
        for (i, row) in m.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                *v -= other.m[i][j];
            }
        }
        Self::new(m)
    }
}

impl Index<usize> for Matrix3x3 {
    type Output = [Float; 3];

    /// Index the matrix row. The column can be further indexed from the
    /// returned result.
    ///
    /// * `row` - Row
    fn index(&self, row: usize) -> &Self::Output {
        &self.m[row]
    }
}

impl fmt::Display for Matrix3x3 {
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<String> = self
            .m
            .iter()
            .map(|row| {
                let cols: Vec<String> = row.iter().map(|v| format!("{v}")).collect();
                format!("[{}]", cols.join(", "))
            })
            .collect();
        write!(f, "[{}]", rows.join(", "))
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    #[test]
    fn inverse_of_identity_is_identity() {
        assert_eq!(IDENTITY_MATRIX3.inverse(), Some(IDENTITY_MATRIX3));
    }

    #[test]
    fn inverse_is_none_when_singular() {
        let zero = Matrix3x3::new([[0.0; 3]; 3]);
        assert!(zero.inverse().is_none());

        let rank2 = Matrix3x3::new([[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [0.0, 1.0, 1.0]]);
        assert!(rank2.inverse().is_none());

        let nan = Matrix3x3::new([[Float::NAN, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        assert!(nan.inverse().is_none());
    }

    #[test]
    fn tiny_well_conditioned_matrix_is_invertible() {
        let tiny = IDENTITY_MATRIX3 * 1e-5;
        let inv = tiny.inverse().unwrap();
        assert!(approx_eq!(Float, inv.m[1][1], 1e5, epsilon = 1.0));
    }

    #[test]
    fn l1_row_distance_takes_largest_row() {
        let a = IDENTITY_MATRIX3;
        let b = Matrix3x3::new([[1.0, 0.5, 0.0], [0.0, 1.0, 0.0], [0.25, 0.25, 0.0]]);
        assert_eq!(a.l1_row_distance(&b), 1.5);
    }

    proptest! {
        #[test]
        fn inverse_returns_matrix_when_non_singular(
            a in 0.1..10.0 as Float, b in -5.0..5.0 as Float, c in 0.1..10.0 as Float,
            d in -5.0..5.0 as Float, e in 0.1..10.0 as Float,
        ) {
            // Upper triangular with non-zero diagonal is always invertible.
            let mat = Matrix3x3::new([[a, b, d], [0.0, c, b], [0.0, 0.0, e]]);
            let inv = mat.inverse().unwrap();
            let prod = mat * inv;
            for i in 0..3 {
                for j in 0..3 {
                    prop_assert!(approx_eq!(
                        Float,
                        prod.m[i][j],
                        IDENTITY_MATRIX3.m[i][j],
                        epsilon = 0.001
                    ));
                }
            }
        }

        #[test]
        fn determinant_of_product_is_product_of_determinants(
            a in -2.0..2.0 as Float, b in -2.0..2.0 as Float, c in -2.0..2.0 as Float,
        ) {
            let m1 = Matrix3x3::new([[a, 1.0, 0.0], [0.0, b, 1.0], [1.0, 0.0, c]]);
            let m2 = Matrix3x3::new([[1.0, a, 0.0], [b, 1.0, 0.0], [0.0, c, 1.0]]);
            let lhs = (m1 * m2).determinant();
            let rhs = m1.determinant() * m2.determinant();
            prop_assert!(approx_eq!(Float, lhs, rhs, epsilon = 0.01));
        }
    }
}
