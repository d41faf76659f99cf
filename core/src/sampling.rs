//! Sampling

use crate::geometry::{Point2f, Vector3f};
use crate::pbrt::{max, TWO_PI};

/// Uniformly sample a direction from a sphere.
///
/// * `u` - The random sample point.
pub fn uniform_sample_sphere(u: &Point2f) -> Vector3f {
    let z = 1.0 - 2.0 * u.x;
    let r = max(0.0, 1.0 - z * z).sqrt();
    let phi = TWO_PI * u.y;
    Vector3f::new(r * phi.cos(), r * phi.sin(), z)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pbrt::Float;
    use float_cmp::*;
    use proptest::prelude::*;

    #[test]
    fn poles() {
        assert_eq!(
            uniform_sample_sphere(&Point2f::new(0.0, 0.0)),
            Vector3f::new(0.0, 0.0, 1.0)
        );
        assert_eq!(uniform_sample_sphere(&Point2f::new(1.0, 0.5)).z, -1.0);
    }

    proptest! {
        #[test]
        fn samples_are_unit_vectors(u0 in 0.0..1.0 as Float, u1 in 0.0..1.0 as Float) {
            let v = uniform_sample_sphere(&Point2f::new(u0, u1));
            prop_assert!(approx_eq!(Float, v.length(), 1.0, epsilon = 1e-5));
        }
    }
}
