//! 3-D Axis Aligned Bounding Boxes.

use super::{Float, Point3, Union, Vector3};
use num_traits::bounds::Bounded;
use num_traits::Num;
use std::fmt;
use std::ops::Index;

/// 3-D Axis Aligned Bounding Box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds3<T> {
    /// Minimum bounds.
    pub p_min: Point3<T>,

    /// Maximum bounds.
    pub p_max: Point3<T>,
}

/// 3-D bounding box containing `Float` points.
pub type Bounds3f = Bounds3<Float>;

impl<T: Num + PartialOrd + Copy> Bounds3<T> {
    /// Creates a new 3-D bounding box from 2 points. The minimum and maximum
    /// bounds are used for each coordinate axis.
    ///
    /// * `p1` - First point.
    /// * `p2` - Second point.
    pub fn new(p1: Point3<T>, p2: Point3<T>) -> Self {
        Self {
            p_min: p1.min(&p2),
            p_max: p1.max(&p2),
        }
    }

    /// Returns a 3-D bounding box where minimum and maximum bounds are maximum
    /// and minimum values respectively of the type's limits. This is so we can
    /// easily grow the bounding box from nothing iteratively.
    pub fn empty() -> Self
    where
        T: Bounded,
    {
        // Don't call new() because it'll create the largest bounding box
        // by flipping p_min and p_max.
        Self {
            p_min: Point3::new(T::max_value(), T::max_value(), T::max_value()),
            p_max: Point3::new(T::min_value(), T::min_value(), T::min_value()),
        }
    }

    /// Returns true if the bounds describes an empty box where any of the
    /// components of p_max are less than p_min.
    pub fn is_empty(&self) -> bool {
        self.p_max.x < self.p_min.x || self.p_max.y < self.p_min.y || self.p_max.z < self.p_min.z
    }

    /// Returns the vector along the box diagonal from the minimum point to
    /// the maximum point.
    pub fn diagonal(&self) -> Vector3<T> {
        self.p_max - self.p_min
    }

    /// Returns true if a point is inside the bounding box.
    ///
    /// * `p` - The point.
    pub fn contains(&self, p: &Point3<T>) -> bool {
        (p.x >= self.p_min.x && p.x <= self.p_max.x)
            && (p.y >= self.p_min.y && p.y <= self.p_max.y)
            && (p.z >= self.p_min.z && p.z <= self.p_max.z)
    }

    /// Returns true if another bounding box lies entirely inside this one.
    ///
    /// * `other` - The other bounding box.
    pub fn contains_bounds(&self, other: &Self) -> bool {
        self.contains(&other.p_min) && self.contains(&other.p_max)
    }

    /// Pad the bounding box by a constant amount in all dimensions.
    ///
    /// * `delta` - Padding amount.
    pub fn expand(&self, delta: T) -> Self {
        // Don't call new() to prevent flipping p_min and p_max when the input
        // is an empty box.
        let d = Vector3::new(delta, delta, delta);
        Self {
            p_min: self.p_min - d,
            p_max: self.p_max + d,
        }
    }

    /// Returns the coordinates of one of the eight corners.
    ///
    /// * `corner` - Corner index in [0, 7]; bit 0 selects x, bit 1 selects
    ///              y and bit 2 selects z from `p_max`.
    pub fn corner(&self, corner: u8) -> Point3<T> {
        debug_assert!(corner < 8);
        Point3::new(
            self[corner & 1].x,
            self[(corner >> 1) & 1].y,
            self[(corner >> 2) & 1].z,
        )
    }

    /// Returns an iterator over the eight corners of the box.
    pub fn corners(&self) -> impl Iterator<Item = Point3<T>> + '_ {
        (0..8u8).map(move |c| self.corner(c))
    }
}

impl<T> Index<u8> for Bounds3<T> {
    type Output = Point3<T>;

    /// Index the minimum and maximum bounds.
    ///
    /// * `i` - 0 for minimum and 1 for maximum.
    fn index(&self, i: u8) -> &Self::Output {
        match i {
            0 => &self.p_min,
            1 => &self.p_max,
            _ => panic!("Invalid index for std::Index on Bounds3<T>"),
        }
    }
}

impl<T: Num + PartialOrd + Copy> From<Point3<T>> for Bounds3<T> {
    /// Use a 3-D point as minimum and maximum 3-D bounds.
    ///
    /// * `p` - 3-D point.
    fn from(p: Point3<T>) -> Self {
        Self { p_min: p, p_max: p }
    }
}

impl<T: Num + PartialOrd + Copy> Union<Point3<T>> for Bounds3<T> {
    /// Return a bounding box containing the itself and a point.
    ///
    /// * `other` - The point.
    fn union(&self, other: &Point3<T>) -> Self {
        Self {
            p_min: self.p_min.min(other),
            p_max: self.p_max.max(other),
        }
    }
}

impl<T: Num + PartialOrd + Copy> Union<Bounds3<T>> for Bounds3<T> {
    /// Return a bounding box containing both bounding boxes.
    ///
    /// * `other` - The other bounding box.
    fn union(&self, other: &Bounds3<T>) -> Self {
        Self {
            p_min: self.p_min.min(&other.p_min),
            p_max: self.p_max.max(&other.p_max),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Bounds3<T> {
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} - {}]", self.p_min, self.p_max)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_is_identity_for_union() {
        let b = Bounds3f::new(Point3::new(-1.0, 2.0, 0.0), Point3::new(1.0, 3.0, 5.0));
        assert!(Bounds3f::empty().is_empty());
        assert_eq!(Bounds3f::empty().union(&b), b);
    }

    #[test]
    fn new_sorts_coordinates() {
        let b = Bounds3f::new(Point3::new(1.0, -2.0, 3.0), Point3::new(-1.0, 2.0, -3.0));
        assert_eq!(b.p_min, Point3::new(-1.0, -2.0, -3.0));
        assert_eq!(b.p_max, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn corners_enumerate_all_combinations() {
        let b = Bounds3f::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 2.0, 3.0));
        assert_eq!(b.corner(0), b.p_min);
        assert_eq!(b.corner(7), b.p_max);
        assert_eq!(b.corner(1), Point3::new(1.0, 0.0, 0.0));
        assert_eq!(b.corner(2), Point3::new(0.0, 2.0, 0.0));
        assert_eq!(b.corner(4), Point3::new(0.0, 0.0, 3.0));
        assert_eq!(b.corners().count(), 8);
        assert!(b.corners().all(|c| b.contains(&c)));
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
        fn union_contains_both(p1 in point3_float(), p2 in point3_float(), p3 in point3_float()) {
            let b = Bounds3f::new(p1, p2).union(&p3);
            prop_assert!(b.contains(&p1));
            prop_assert!(b.contains(&p2));
            prop_assert!(b.contains(&p3));
            prop_assert!(b.contains_bounds(&Bounds3f::new(p1, p2)));
        }
    }
}
