//! Animated Transformations

mod decompose;
mod derivative;
mod zeros;

// Re-export
pub use decompose::*;
pub use derivative::*;
pub use zeros::*;

use super::{
    clamp, lerp, Axis, Bounds3, Bounds3f, Dot, Float, Interval, Matrix3x3, Point3f, Ray,
    RayDifferential, Transform, Union, Vector3f, PARALLEL_COS_THETA,
};

/// AnimatedTransform implements keyframe transformation interpolation.
///
/// It is immutable after construction and may be shared between threads.
#[derive(Clone, Debug)]
pub struct AnimatedTransform {
    /// Transform representing starting point in animation.
    start_transform: Transform,

    /// Transform representing ending point in animation.
    end_transform: Transform,

    /// Start time.
    start_time: Float,

    /// End time.
    end_time: Float,

    /// Indicates if `start_transform` != `end_transform`.
    actually_animated: bool,

    /// Decomposed start and end transformations. The end rotation is
    /// sign-normalized against the start rotation. Only computed when
    /// animated.
    decomposed: [DecomposedTransform; 2],

    /// Indicates the animated transformation has rotation.
    has_rotation: bool,

    /// Angle θ between the keyframe rotation quaternions.
    theta: Float,

    /// Stores derivative information to bound the motion of a point. Only
    /// computed when `has_rotation` is true.
    derivative: MotionDerivative,
}

impl AnimatedTransform {
    /// Create an animated transformation.
    ///
    /// * `start_transform` - Transform representing starting point in animation.
    /// * `start_time`      - Start time.
    /// * `end_transform`   - Transform representing ending point in animation.
    /// * `end_time`        - End time.
    pub fn new(
        start_transform: Transform,
        start_time: Float,
        end_transform: Transform,
        end_time: Float,
    ) -> Self {
        if start_time > end_time {
            warn!(
                "Animated transform start time {} is after end time {}",
                start_time, end_time
            );
        }

        let actually_animated = start_transform != end_transform;
        let mut decomposed = [DecomposedTransform::default(); 2];
        let mut has_rotation = false;
        let mut theta = 0.0;
        let mut derivative = MotionDerivative::default();

        if actually_animated {
            if start_transform.swaps_handedness() != end_transform.swaps_handedness() {
                warn!("Animated transform keyframes differ in handedness");
            }

            decomposed = [
                DecomposedTransform::decompose(&start_transform.m),
                DecomposedTransform::decompose(&end_transform.m),
            ];

            // Flip R[1] if needed to select shortest path
            decomposed[1].rotation = decomposed[0]
                .rotation
                .shortest_path_to(&decomposed[1].rotation);

            let cos_theta = decomposed[0].rotation.dot(&decomposed[1].rotation);
            has_rotation = cos_theta < PARALLEL_COS_THETA;

            // Compute terms of motion derivative function
            if has_rotation {
                theta = clamp(cos_theta, -1.0, 1.0).acos();
                derivative = MotionDerivative::new(&decomposed[0], &decomposed[1], theta);
                debug!("Animated transform rotates by θ = {} radians", 2.0 * theta);
            } else {
                debug!("Animated transform has no rotation");
            }
        }

        Self {
            start_transform,
            end_transform,
            start_time,
            end_time,
            actually_animated,
            decomposed,
            has_rotation,
            theta,
            derivative,
        }
    }

    /// Returns the transformation at the start time.
    pub fn start_transform(&self) -> &Transform {
        &self.start_transform
    }

    /// Returns the transformation at the end time.
    pub fn end_transform(&self) -> &Transform {
        &self.end_transform
    }

    /// Returns the start time.
    pub fn start_time(&self) -> Float {
        self.start_time
    }

    /// Returns the end time.
    pub fn end_time(&self) -> Float {
        self.end_time
    }

    /// Returns `true` if the start and end transformations differ.
    pub fn is_animated(&self) -> bool {
        self.actually_animated
    }

    /// Returns `true` if the keyframe rotations differ.
    pub fn has_rotation(&self) -> bool {
        self.has_rotation
    }

    /// Returns the angle θ between the keyframe rotation quaternions. This is
    /// half the angle of the rotation between the keyframes.
    pub fn rotation_angle(&self) -> Float {
        self.theta
    }

    /// Returns the decomposed start and end transformations if animated.
    pub fn decomposed(&self) -> Option<&[DecomposedTransform; 2]> {
        if self.actually_animated {
            Some(&self.decomposed)
        } else {
            None
        }
    }

    /// Returns `true` if either keyframe transformation has a scaling term.
    pub fn has_scale(&self) -> bool {
        self.start_transform.has_scale() || self.end_transform.has_scale()
    }

    /// Returns the interpolated transformation matrix at the given time.
    /// Times outside the animation range return the start or end
    /// transformation exactly.
    ///
    /// * `time` - Time.
    pub fn interpolate(&self, time: Float) -> Transform {
        // Handle boundary conditions for matrix interpolation.
        if !self.actually_animated || time <= self.start_time {
            return self.start_transform;
        }
        if time >= self.end_time {
            return self.end_transform;
        }

        // Map time to range [0, 1].
        let dt = (time - self.start_time) / (self.end_time - self.start_time);
        let [d0, d1] = &self.decomposed;

        let trans: Vector3f = lerp(dt, d0.translation, d1.translation);
        let rotate = d0.rotation.slerp(dt, &d1.rotation);
        let scale = Matrix3x3::lerp(dt, &d0.scale, &d1.scale);

        // Compute interpolated matrix as product of interpolated components
        Transform::translate(&trans) * Transform::from(rotate) * Transform::from(scale)
    }

    /// Applies animated transformation to a given point.
    ///
    /// * `time` - The time.
    /// * `p`    - The point.
    pub fn transform_point(&self, time: Float, p: &Point3f) -> Point3f {
        self.interpolate(time).transform_point(p)
    }

    /// Applies animated transformation to a given vector.
    ///
    /// * `time` - The time.
    /// * `v`    - The vector.
    pub fn transform_vector(&self, time: Float, v: &Vector3f) -> Vector3f {
        self.interpolate(time).transform_vector(v)
    }

    /// Applies animated transformation to a given ray at the ray's time.
    ///
    /// * `r` - The ray.
    pub fn transform_ray(&self, r: &Ray) -> Ray {
        self.interpolate(r.time).transform_ray(r)
    }

    /// Applies animated transformation to the auxilliary rays of a ray
    /// differential.
    ///
    /// * `time` - The time.
    /// * `rd`   - The ray differential.
    pub fn transform_ray_differential(&self, time: Float, rd: &RayDifferential) -> RayDifferential {
        self.interpolate(time).transform_ray_differential(rd)
    }

    /// Evaluates the motion derivative coefficients of a point along an
    /// axis. They are all zero unless the transformation rotates.
    ///
    /// * `axis` - The axis.
    /// * `p`    - The point.
    pub fn motion_coefficients(&self, axis: Axis, p: &Point3f) -> MotionCoefficients {
        self.derivative.coefficients(axis, p)
    }

    /// Compute a bounding box that encompasses all of its motion over the
    /// animation time period.
    ///
    /// * `b` - The bounding box.
    pub fn motion_bounds(&self, b: &Bounds3f) -> Bounds3f {
        if !self.actually_animated {
            return self.start_transform.transform_bounds(b);
        }

        let endpoints = self
            .start_transform
            .transform_bounds(b)
            .union(&self.end_transform.transform_bounds(b));
        if !self.has_rotation {
            return endpoints;
        }

        b.corners().fold(endpoints, |bounds, corner| {
            bounds.union(&self.bound_point_motion(&corner))
        })
    }

    /// Use the derivative terms, based on the keyframe matrices to compute
    /// a robust bound of the motion of point `p`.
    ///
    /// * `p` - The point.
    pub fn bound_point_motion(&self, p: &Point3f) -> Bounds3f {
        if !self.actually_animated {
            return Bounds3::from(self.start_transform.transform_point(p));
        }

        let mut bounds = Bounds3::new(
            self.start_transform.transform_point(p),
            self.end_transform.transform_point(p),
        );
        if !self.has_rotation {
            return bounds;
        }

        let mut zeros = Vec::with_capacity(ZERO_SEARCH_DEPTH);
        for axis in Axis::ALL {
            // Find any motion derivative zeros for the component.
            zeros.clear();
            find_motion_derivative_zeros(
                &self.motion_coefficients(axis, p),
                self.theta,
                Interval::new(0.0, 1.0),
                ZERO_SEARCH_DEPTH,
                &mut zeros,
            );
            debug!("Found {} motion derivative zeros along {:?}", zeros.len(), axis);

            // Expand bounding box for any motion derivative zeros found
            bounds = zeros.iter().fold(bounds, |b, &t| {
                let pz = self.transform_point(lerp(t, self.start_time, self.end_time), p);
                b.union(&pz)
            });
        }

        bounds
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
