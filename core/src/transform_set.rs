//! Transform Set

use crate::geometry::{AnimatedTransform, Transform, Vector3f};
use crate::pbrt::Float;
use std::ops::{Index, IndexMut};

/// Number of transformations to store.
pub const MAX_TRANSFORMS: usize = 2;

/// Transformation for starting time.
pub const START_TRANSFORM_BITS: usize = 1 << 0;

/// Transformation for ending time.
pub const END_TRANSFORM_BITS: usize = 1 << 1;

/// Transformation for both starting and ending time.
pub const ALL_TRANSFORM_BITS: usize = (1 << MAX_TRANSFORMS) - 1;

/// Stores the keyframe transformations at the start and end times. Operations
/// only affect the slots selected by the active transform bits.
#[derive(Clone, Debug)]
pub struct TransformSet {
    /// The transformations.
    t: [Transform; MAX_TRANSFORMS],

    /// Bit mask of the slots modified by operations.
    active_transform_bits: usize,
}

impl Default for TransformSet {
    /// Returns identity transformations with all slots active.
    fn default() -> Self {
        Self {
            t: [Transform::default(); MAX_TRANSFORMS],
            active_transform_bits: ALL_TRANSFORM_BITS,
        }
    }
}

impl TransformSet {
    /// Returns a new `TransformSet` containing the inverse transformations.
    pub fn inverse(&self) -> Self {
        Self {
            t: [self.t[0].inverse(), self.t[1].inverse()],
            active_transform_bits: self.active_transform_bits,
        }
    }

    /// Returns `true` if 2 successive transformations are not the same
    /// indicating that this is storing animated transforms.
    pub fn is_animated(&self) -> bool {
        self.t.windows(2).any(|w| w[0] != w[1])
    }

    /// Select the slots affected by subsequent operations.
    ///
    /// * `bits` - Bit mask of `START_TRANSFORM_BITS` and `END_TRANSFORM_BITS`.
    pub fn set_active(&mut self, bits: usize) {
        self.active_transform_bits = bits & ALL_TRANSFORM_BITS;
    }

    /// Returns the bit mask of the active slots.
    pub fn active(&self) -> usize {
        self.active_transform_bits
    }

    /// Reset active transforms to identity.
    pub fn identity(&mut self) {
        self.for_each_active(|t| *t = Transform::default());
    }

    /// Post-multiply the active transforms by a transformation.
    ///
    /// * `transform` - The transformation to concatenate.
    pub fn concat(&mut self, transform: &Transform) {
        self.for_each_active(|t| *t = *t * *transform);
    }

    /// Apply a translation to the active transforms.
    ///
    /// * `delta` - Translation.
    pub fn translate(&mut self, delta: &Vector3f) {
        self.concat(&Transform::translate(delta));
    }

    /// Apply a scale to the active transforms.
    ///
    /// * `sx` - Scale factor in x-direction.
    /// * `sy` - Scale factor in y-direction.
    /// * `sz` - Scale factor in z-direction.
    pub fn scale(&mut self, sx: Float, sy: Float, sz: Float) {
        self.concat(&Transform::scale(sx, sy, sz));
    }

    /// Apply a rotation about a vector to the active transforms.
    ///
    /// * `angle` - Angle of rotation in degrees.
    /// * `axis`  - Rotation axis.
    pub fn rotate(&mut self, angle: Float, axis: &Vector3f) {
        self.concat(&Transform::rotate(angle, axis));
    }

    /// Reset all transforms to identity and activate all slots.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns the animated transformation between the stored keyframes.
    ///
    /// * `start_time` - Time of the start keyframe.
    /// * `end_time`   - Time of the end keyframe.
    pub fn animated(&self, start_time: Float, end_time: Float) -> AnimatedTransform {
        AnimatedTransform::new(self.t[0], start_time, self.t[1], end_time)
    }

    fn for_each_active<F: FnMut(&mut Transform)>(&mut self, mut f: F) {
        let bits = self.active_transform_bits;
        for (i, t) in self.t.iter_mut().enumerate() {
            if bits & (1 << i) > 0 {
                f(t);
            }
        }
    }
}

impl Index<usize> for TransformSet {
    type Output = Transform;

    /// Return the `Transform` at the given index.
    ///
    /// * `index` - The index.
    fn index(&self, index: usize) -> &Self::Output {
        &self.t[index]
    }
}

impl IndexMut<usize> for TransformSet {
    /// Return mutable `Transform` at the given index.
    ///
    /// * `index` - The index.
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.t[index]
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point3f;

    #[test]
    fn default_is_not_animated() {
        let ts = TransformSet::default();
        assert!(!ts.is_animated());
        assert_eq!(ts.active(), ALL_TRANSFORM_BITS);
        assert!(ts[0].is_identity() && ts[1].is_identity());
    }

    #[test]
    fn operations_only_touch_active_slots() {
        let mut ts = TransformSet::default();
        ts.translate(&Vector3f::new(1.0, 0.0, 0.0));
        assert!(!ts.is_animated());

        ts.set_active(END_TRANSFORM_BITS);
        ts.scale(2.0, 2.0, 2.0);
        assert!(ts.is_animated());
        assert!(!ts[0].has_scale());
        assert!(ts[1].has_scale());

        ts.set_active(START_TRANSFORM_BITS);
        ts.identity();
        assert!(ts[0].is_identity());
        assert!(!ts[1].is_identity());

        ts.reset();
        assert!(!ts.is_animated());
    }

    #[test]
    fn builds_animated_transform() {
        let mut ts = TransformSet::default();
        ts.set_active(END_TRANSFORM_BITS);
        ts.translate(&Vector3f::new(0.0, 4.0, 0.0));
        ts.rotate(90.0, &Vector3f::new(0.0, 0.0, 1.0));
        let at = ts.animated(0.0, 2.0);
        assert!(at.is_animated());
        assert!(at.has_rotation());
        assert_eq!(at.end_time(), 2.0);
        assert_eq!(
            at.transform_point(0.0, &Point3f::new(1.0, 0.0, 0.0)),
            Point3f::new(1.0, 0.0, 0.0)
        );
    }

    #[test]
    fn inverse_inverts_each_slot() {
        let mut ts = TransformSet::default();
        ts.set_active(END_TRANSFORM_BITS);
        ts.translate(&Vector3f::new(3.0, 0.0, 0.0));
        let inv = ts.inverse();
        let p = Point3f::new(1.0, 2.0, 3.0);
        assert_eq!(inv[1].transform_point(&ts[1].transform_point(&p)), p);
        assert_eq!(inv[0].transform_point(&p), p);
    }
}
