//! 4x4 Matrix

use super::{abs, Float, Matrix3x3, Vector3f};
use std::fmt;
use std::ops::{Index, Mul};

/// A 4x4 matrix containing Float values.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Matrix4x4 {
    /// Stores a 2-D array of Float
    pub m: [[Float; 4]; 4],
}

/// Zero matrix.
pub const ZERO_MATRIX: Matrix4x4 = Matrix4x4 { m: [[0.0; 4]; 4] };

/// Identity matrix.
pub const IDENTITY_MATRIX: Matrix4x4 = Matrix4x4 {
    m: [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ],
};

/// Matrix used as the inverse of a singular matrix.
pub const NAN_MATRIX: Matrix4x4 = Matrix4x4 {
    m: [[Float::NAN; 4]; 4],
};

/// Create a 4x4 matrix using the following order of the parameters:
///
/// * `t00`, `t01`, `t02`, `t03` - Row 1
/// * `t10`, `t11`, `t12`, `t13` - Row 2
/// * `t20`, `t21`, `t22`, `t23` - Row 3
/// * `t30`, `t31`, `t32`, `t33` - Row 4
#[rustfmt::skip]
#[allow(clippy::too_many_arguments)]
pub fn matrix4x4(
    t00: Float, t01: Float, t02: Float, t03: Float,
    t10: Float, t11: Float, t12: Float, t13: Float,
    t20: Float, t21: Float, t22: Float, t23: Float,
    t30: Float, t31: Float, t32: Float, t33: Float,
) -> Matrix4x4 {
    Matrix4x4 {
        m: [
            [t00, t01, t02, t03],
            [t10, t11, t12, t13],
            [t20, t21, t22, t23],
            [t30, t31, t32, t33],
        ],
    }
}

impl Matrix4x4 {
    /// Create an affine matrix from a linear part and a translation.
    ///
    /// * `l` - The linear part.
    /// * `t` - The translation.
    #[rustfmt::skip]
    pub fn from_linear_and_translation(l: &Matrix3x3, t: &Vector3f) -> Self {
        let m = &l.m;
        matrix4x4(
            m[0][0], m[0][1], m[0][2], t.x,
            m[1][0], m[1][1], m[1][2], t.y,
            m[2][0], m[2][1], m[2][2], t.z,
            0.0,     0.0,     0.0,     1.0,
        )
    }

    /// Returns the upper-left 3x3 linear part of the matrix.
    pub fn linear_part(&self) -> Matrix3x3 {
        let m = &self.m;
        Matrix3x3::new([
            [m[0][0], m[0][1], m[0][2]],
            [m[1][0], m[1][1], m[1][2]],
            [m[2][0], m[2][1], m[2][2]],
        ])
    }

    /// Returns the translation column of the matrix.
    pub fn translation(&self) -> Vector3f {
        Vector3f::new(self.m[0][3], self.m[1][3], self.m[2][3])
    }

    /// Returns the transpose of the matrix.
    #[rustfmt::skip]
    pub fn transpose(&self) -> Matrix4x4 {
        matrix4x4(
            self.m[0][0], self.m[1][0], self.m[2][0], self.m[3][0],
            self.m[0][1], self.m[1][1], self.m[2][1], self.m[3][1],
            self.m[0][2], self.m[1][2], self.m[2][2], self.m[3][2],
            self.m[0][3], self.m[1][3], self.m[2][3], self.m[3][3],
        )
    }

    /// Returns the inverse of the matrix using numerically stable Gauss-Jordan
    /// elimination, or `None` when the matrix is singular.
    pub fn inverse(&self) -> Option<Matrix4x4> {
        let mut indxc = [0; 4];
        let mut indxr = [0; 4];
        let mut ipiv = [0; 4];
        let mut minv = self.m;

        for i in 0..4 {
            let mut irow = 0;
            let mut icol = 0;
            let mut big: Float = 0.0;

            // Choose pivot
            for j in 0..4 {
                if ipiv[j] == 1 {
                    continue;
                }
                for k in 0..4 {
                    if ipiv[k] == 0 {
                        let abs_minv = abs(minv[j][k]);
                        if abs_minv >= big {
                            big = abs_minv;
                            irow = j;
                            icol = k;
                        }
                    } else if ipiv[k] > 1 {
                        return None;
                    }
                }
            }
            ipiv[icol] += 1;

            // Swap rows `irow` and `icol` for pivot
            if irow != icol {
                minv.swap(irow, icol);
            }

            indxr[i] = irow;
            indxc[i] = icol;
            if minv[icol][icol] == 0.0 || !minv[icol][icol].is_finite() {
                return None;
            }

            // Set m[icol][icol] to one by scaling row `icol` appropriately
            let pivinv = 1.0 / minv[icol][icol];
            minv[icol][icol] = 1.0;
            for v in minv[icol].iter_mut() {
                *v *= pivinv;
            }

            // Subtract this row from others to zero out their columns
            for j in 0..4 {
                if j != icol {
                    let save = minv[j][icol];
                    minv[j][icol] = 0.0;
                    for k in 0..4 {
                        minv[j][k] -= minv[icol][k] * save;
                    }
                }
            }
        }

        // Swap columns to reflect permutation
        for j in (0..4).rev() {
            if indxr[j] != indxc[j] {
                for row in minv.iter_mut() {
                    row.swap(indxr[j], indxc[j]);
                }
            }
        }

        Some(Matrix4x4 { m: minv })
    }
}

impl Default for Matrix4x4 {
    /// Returns the default as identity matrix.
    fn default() -> Self {
        IDENTITY_MATRIX
    }
}

impl Mul<Matrix4x4> for Matrix4x4 {
    type Output = Matrix4x4;

    /// Post-multiply the given matrix.
    ///
    /// * `other` - The other matrix
    fn mul(self, other: Matrix4x4) -> Self::Output {
        let mut m = ZERO_MATRIX;

        for i in 0..4 {
            for j in 0..4 {
                m.m[i][j] = self.m[i][0] * other.m[0][j]
                    + self.m[i][1] * other.m[1][j]
                    + self.m[i][2] * other.m[2][j]
                    + self.m[i][3] * other.m[3][j];
            }
        }

        m
    }
}

impl Index<usize> for Matrix4x4 {
    type Output = [Float; 4];

    /// Index the matrix row. The column can be further indexed from the
    /// returned result.
    ///
    /// * `row` - Row
    fn index(&self, row: usize) -> &Self::Output {
        &self.m[row]
    }
}

impl fmt::Display for Matrix4x4 {
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
    fn inverse_is_none_when_matrix_is_zero() {
        assert!(ZERO_MATRIX.inverse().is_none());
    }

    #[test]
    fn inverse_returns_identity_when_matrix_is_identity() {
        assert_eq!(IDENTITY_MATRIX.inverse(), Some(IDENTITY_MATRIX));
    }

    #[test]
    fn linear_part_and_translation_round_trip() {
        let m = matrix4x4(
            1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 0.0, 0.0, 0.0, 1.0,
        );
        let rebuilt = Matrix4x4::from_linear_and_translation(&m.linear_part(), &m.translation());
        assert_eq!(rebuilt, m);
    }

    proptest! {
        #[test]
        fn inverse_is_none_when_matrix_is_singular(
            a in 0.0..10.0 as Float, b in 0.0..10.0 as Float, c in 0.0..10.0 as Float,
        ) {
            let m = Matrix4x4 {
                m: [
                    [1.0, 0.0, 0.0, 0.0],
                    [0.0, 1.0, 0.0, 0.0],
                    [0.0, 0.0, 1.0, 0.0],
                    [  a,   b,   c, 0.0],
                ],
            };
            prop_assert!(m.inverse().is_none());
        }

        #[test]
        fn inverse_returns_matrix_when_matrix_is_non_singular(
            a in 0.001..10.0 as Float, b in 0.001..10.0 as Float,
            c in 0.001..10.0 as Float, d in 0.001..10.0 as Float,
        ) {
            let mat = Matrix4x4 {
                m: [
                    [  a, 0.0, 0.0, 0.0],
                    [0.0,   b, 0.0, 0.0],
                    [0.0, 0.0,   c, 0.0],
                    [0.0, 0.0, 0.0,   d],
                ],
            };
            let inv = mat.inverse().unwrap();

            for prod in [mat * inv, inv * mat] {
                for i in 0..4 {
                    for j in 0..4 {
                        prop_assert!(approx_eq!(
                            Float,
                            prod.m[i][j],
                            IDENTITY_MATRIX.m[i][j],
                            epsilon = 0.0001
                        ));
                    }
                }
            }
        }
    }
}
