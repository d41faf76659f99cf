//! Rays

use super::{Float, Point3f, Vector3f, INFINITY};
use std::fmt;

/// A Ray
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    /// Origin.
    pub o: Point3f,

    /// Direction.
    pub d: Vector3f,

    /// Maximum extent of the ray.
    pub t_max: Float,

    /// Time value.
    pub time: Float,

    /// Auxilliary rays offset by one sample in x and y direction.
    pub differentials: Option<RayDifferential>,
}

impl Ray {
    /// Returns a ray with no differentials.
    ///
    /// * `o`      - Origin.
    /// * `d`      - Direction.
    /// * `t_max`  - Maximum extent of the ray.
    /// * `time`   - Time value.
    pub fn new(o: Point3f, d: Vector3f, t_max: Float, time: Float) -> Self {
        Self {
            o,
            d,
            t_max,
            time,
            differentials: None,
        }
    }

    /// Returns a ray with differential.
    ///
    /// * `o`             - Origin.
    /// * `d`             - Direction.
    /// * `t_max`         - Maximum extent of the ray.
    /// * `time`          - Time value.
    /// * `differentials` - Auxilliary rays offset by one sample in x and y direction.
    pub fn new_with_differentials(
        o: Point3f,
        d: Vector3f,
        t_max: Float,
        time: Float,
        differentials: RayDifferential,
    ) -> Self {
        Self {
            o,
            d,
            t_max,
            time,
            differentials: Some(differentials),
        }
    }

    /// Returns true if either coordinate is NaN.
    pub fn has_nans(&self) -> bool {
        self.o.has_nans() || self.d.has_nans() || self.t_max.is_nan()
    }

    /// Get position along the ray at given parameter.
    ///
    /// * `t` - Parameter to evaluate.
    pub fn at(&self, t: Float) -> Point3f {
        self.o + self.d * t
    }
}

impl Default for Ray {
    /// Returns a ray at the origin pointing nowhere with infinite extent.
    fn default() -> Self {
        Self::new(Point3f::zero(), Vector3f::zero(), INFINITY, 0.0)
    }
}

impl fmt::Display for Ray {
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[o={}, d={}, t_max={}, time={}]",
            self.o, self.d, self.t_max, self.time
        )
    }
}

/// RayDifferential stores the auxilliary rays used for texture antialiasing.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RayDifferential {
    /// Auxilliary ray offset in x-direction origin.
    pub rx_origin: Point3f,

    /// Auxilliary ray offset in y-direction origin.
    pub ry_origin: Point3f,

    /// Auxilliary ray offset in x-direction direction.
    pub rx_direction: Vector3f,

    /// Auxilliary ray offset in y-direction direction.
    pub ry_direction: Vector3f,
}

impl RayDifferential {
    /// Create a new ray differential.
    ///
    /// * `rx_origin`    - Auxilliary ray offset in x-direction origin.
    /// * `ry_origin`    - Auxilliary ray offset in y-direction origin.
    /// * `rx_direction` - Auxilliary ray offset in x-direction direction.
    /// * `ry_direction` - Auxilliary ray offset in y-direction direction.
    pub fn new(
        rx_origin: Point3f,
        ry_origin: Point3f,
        rx_direction: Vector3f,
        ry_direction: Vector3f,
    ) -> Self {
        Self {
            rx_origin,
            ry_origin,
            rx_direction,
            ry_direction,
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
