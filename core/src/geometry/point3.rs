//! 3-D Points

use super::{max, min, Axis, Float, Vector3};
use num_traits::{Num, Zero};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, Sub};

/// A 3-D point containing numeric values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point3<T> {
    /// X-coordinate.
    pub x: T,

    /// Y-coordinate.
    pub y: T,

    /// Z-coordinate.
    pub z: T,
}

/// 3-D point containing `Float` values.
pub type Point3f = Point3<Float>;

impl<T: Num> Point3<T> {
    /// Creates a new 3-D point.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    /// * `z` - Z-coordinate.
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// Creates a new 3-D zero point.
    pub fn zero() -> Self
    where
        T: Zero,
    {
        Self::new(T::zero(), T::zero(), T::zero())
    }

    /// Returns true if either coordinate is NaN.
    pub fn has_nans(&self) -> bool
    where
        T: num_traits::Float,
    {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    /// Returns the distance to another point.
    ///
    /// * `other` - The other point.
    pub fn distance(&self, other: &Self) -> T
    where
        T: num_traits::Float,
    {
        (*self - *other).length()
    }

    /// Returns the component-wise minimum with another point.
    ///
    /// * `other` - The other point.
    pub fn min(&self, other: &Self) -> Self
    where
        T: PartialOrd + Copy,
    {
        Self::new(
            min(self.x, other.x),
            min(self.y, other.y),
            min(self.z, other.z),
        )
    }

    /// Returns the component-wise maximum with another point.
    ///
    /// * `other` - The other point.
    pub fn max(&self, other: &Self) -> Self
    where
        T: PartialOrd + Copy,
    {
        Self::new(
            max(self.x, other.x),
            max(self.y, other.y),
            max(self.z, other.z),
        )
    }
}

impl<T: Num> Add<Vector3<T>> for Point3<T> {
    type Output = Point3<T>;

    /// Offsets the point by the given vector.
    ///
    /// * `v` - The vector to add.
    fn add(self, v: Vector3<T>) -> Self::Output {
        Point3::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}

impl<T: Num + Copy> AddAssign<Vector3<T>> for Point3<T> {
    /// Performs the `+=` operation.
    ///
    /// * `v` - The vector to add.
    fn add_assign(&mut self, v: Vector3<T>) {
        *self = Point3::new(self.x + v.x, self.y + v.y, self.z + v.z);
    }
}

impl<T: Num> Add for Point3<T> {
    type Output = Point3<T>;

    /// Adds the given point and returns the result. This only makes sense
    /// for weighted sums of points.
    ///
    /// * `other` - The point to add.
    fn add(self, other: Self) -> Self::Output {
        Point3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl<T: Num> Sub for Point3<T> {
    type Output = Vector3<T>;

    /// Subtracts a point from another point to get the vector between them.
    ///
    /// * `other` - The point to subtract.
    fn sub(self, other: Self) -> Self::Output {
        Vector3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl<T: Num> Sub<Vector3<T>> for Point3<T> {
    type Output = Point3<T>;

    /// Offsets the point by the negated vector.
    ///
    /// * `v` - The vector to subtract.
    fn sub(self, v: Vector3<T>) -> Self::Output {
        Point3::new(self.x - v.x, self.y - v.y, self.z - v.z)
    }
}

impl Mul<Point3<Float>> for Float {
    type Output = Point3<Float>;

    /// Scale the point. This only makes sense for weighted sums of points.
    ///
    /// * `p` - The point.
    fn mul(self, p: Point3<Float>) -> Self::Output {
        Point3::new(self * p.x, self * p.y, self * p.z)
    }
}

impl<T: Num + Copy> Div<T> for Point3<T> {
    type Output = Self;

    /// Scale the point by 1/f.
    ///
    /// * `f` - The scaling factor.
    fn div(self, f: T) -> Self::Output {
        debug_assert!(!f.is_zero());
        Self::new(self.x / f, self.y / f, self.z / f)
    }
}

impl<T> Index<Axis> for Point3<T> {
    type Output = T;

    /// Index the point by an axis to get the immutable coordinate axis value.
    ///
    /// * `axis` - A 3-D coordinate axis.
    fn index(&self, axis: Axis) -> &Self::Output {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}

impl<T> Index<usize> for Point3<T> {
    type Output = T;

    /// Index the point by an axis to get the immutable coordinate axis value.
    ///
    /// * `axis` - A 3-D coordinate axis.
    fn index(&self, axis: usize) -> &Self::Output {
        match axis {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Invalid axis for std::Index on Point3<T>"),
        }
    }
}

impl<T> IndexMut<usize> for Point3<T> {
    /// Index the point by an axis to get a mutable coordinate axis value.
    ///
    /// * `axis` - A 3-D coordinate axis.
    fn index_mut(&mut self, axis: usize) -> &mut Self::Output {
        match axis {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Invalid axis for std::IndexMut on Point3<T>"),
        }
    }
}

impl<T> From<Vector3<T>> for Point3<T> {
    /// Convert a 3-D vector to a 3-D point.
    ///
    /// * `v` - 3-D vector.
    fn from(v: Vector3<T>) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Point3<T> {
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pbrt::lerp;
    use proptest::prelude::*;

    #[test]
    fn sub_gives_vector_between_points() {
        let p1 = Point3f::new(1.0, 2.0, 3.0);
        let p2 = Point3f::new(4.0, 6.0, 3.0);
        assert_eq!(p2 - p1, Vector3::new(3.0, 4.0, 0.0));
        assert_eq!(p1.distance(&p2), 5.0);
    }

    #[test]
    fn min_max_are_component_wise() {
        let p1 = Point3f::new(1.0, 5.0, -3.0);
        let p2 = Point3f::new(4.0, -6.0, 3.0);
        assert_eq!(p1.min(&p2), Point3f::new(1.0, -6.0, -3.0));
        assert_eq!(p1.max(&p2), Point3f::new(4.0, 5.0, 3.0));
    }

    prop_point3!(
        point3_float,
        Float,
        -100.0..100.0 as Float,
        -100.0..100.0 as Float,
        -100.0..100.0 as Float
    );

    proptest! {
        #[test]
        fn lerp_endpoints_are_exact(p0 in point3_float(), p1 in point3_float()) {
            prop_assert_eq!(lerp(0.0, p0, p1), p0);
            prop_assert_eq!(lerp(1.0, p0, p1), p1);
        }

        #[test]
        fn offset_by_vector_round_trips(p in point3_float(), q in point3_float()) {
            let v = q - p;
            let r = p + v;
            prop_assert!((r - q).length() < 1e-3);
        }
    }
}
