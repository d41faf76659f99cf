//! Polar decomposition of affine transformations

use super::super::{Float, Matrix3x3, Matrix4x4, Quaternion, Vector3f, IDENTITY_MATRIX3};

/// Polar decomposition stops once successive rotation estimates differ by
/// less than this amount.
pub const DECOMPOSE_THRESHOLD: Float = 1e-4;

/// Maximum number of polar decomposition iterations.
pub const DECOMPOSE_MAX_ITERATIONS: usize = 100;

/// The translation, rotation and scale components of an affine
/// transformation such that `M = T R S`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DecomposedTransform {
    /// Translation component `T`.
    pub translation: Vector3f,

    /// Rotation component `R` as a unit quaternion.
    pub rotation: Quaternion,

    /// Residual scale and shear component `S`.
    pub scale: Matrix3x3,

    /// Indicates if the polar decomposition met its threshold.
    pub converged: bool,

    /// Number of polar decomposition iterations performed.
    pub iterations: usize,
}

impl Default for DecomposedTransform {
    /// Returns the decomposition of the identity transformation.
    fn default() -> Self {
        Self {
            translation: Vector3f::zero(),
            rotation: Quaternion::default(),
            scale: IDENTITY_MATRIX3,
            converged: true,
            iterations: 0,
        }
    }
}

impl DecomposedTransform {
    /// Decomposes a transformation matrix into its translation, rotation and
    /// scaling components.
    ///
    /// The rotation is found by iterative polar decomposition of the linear
    /// part. If the iteration limit is reached the last estimate is used. A
    /// singular linear part yields an identity rotation with the whole linear
    /// part as scale.
    ///
    /// * `m` - The affine matrix to decompose.
    pub fn decompose(m: &Matrix4x4) -> Self {
        // Extract translation T from transformation matrix
        let translation = m.translation();

        // Linear part M' without translation
        let linear = m.linear_part();

        let mut r = linear;
        let mut iterations = 0;
        let mut converged = false;
        while iterations < DECOMPOSE_MAX_ITERATIONS {
            // Compute the next matrix R_next in series
            let r_it = match r.transpose().inverse() {
                Some(r_it) => r_it,
                None => return Self::singular(translation, linear),
            };
            let r_next = (r + r_it) * 0.5;

            // Compute norm of difference between R and R_next
            let norm = r.l1_row_distance(&r_next);
            r = r_next;
            iterations += 1;

            if norm < DECOMPOSE_THRESHOLD {
                converged = true;
                break;
            }
        }

        if r.has_non_finite() {
            return Self::singular(translation, linear);
        }

        if !converged {
            warn!(
                "Polar decomposition did not converge after {} iterations",
                iterations
            );
        } else {
            debug!("Polar decomposition converged after {} iterations", iterations);
        }

        // An orthogonal factor with negative determinant is a reflection that
        // no quaternion represents. Move the sign into the scale instead.
        if r.determinant() < 0.0 {
            warn!("Decomposing a transformation with reflection");
            r = r * -1.0;
        }

        let rotation = Quaternion::from(&r).normalize();

        // Compute scale S using rotation and original matrix. The rotation
        // matrix of a unit quaternion is orthonormal so its inverse is its
        // transpose.
        let scale = rotation.rotation_matrix().transpose() * linear;

        Self {
            translation,
            rotation,
            scale,
            converged,
            iterations,
        }
    }

    /// Returns the decomposition used when the linear part has no inverse.
    ///
    /// * `translation` - Translation component.
    /// * `linear`      - Linear part of the matrix.
    fn singular(translation: Vector3f, linear: Matrix3x3) -> Self {
        warn!("Decomposing a singular transformation; using identity rotation");
        Self {
            translation,
            rotation: Quaternion::default(),
            scale: linear,
            converged: false,
            iterations: 0,
        }
    }

    /// Returns the matrix `T R S`.
    pub fn compose(&self) -> Matrix4x4 {
        let linear = self.rotation.rotation_matrix() * self.scale;
        Matrix4x4::from_linear_and_translation(&linear, &self.translation)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
