//! Common

use num_traits::Num;
use std::ops::{Add, Mul, Neg};

/// Use 32-bit precision for floating point numbers.
#[cfg(not(feature = "float-as-double"))]
pub type Float = f32;

/// Use 64-bit precision for floating point numbers.
#[cfg(feature = "float-as-double")]
pub type Float = f64;

/// Default signed integer to 32-bit.
pub type Int = i32;

/// Infinty (∞)
pub const INFINITY: Float = Float::INFINITY;

/// PI (π)
#[cfg(not(feature = "float-as-double"))]
pub const PI: Float = std::f32::consts::PI;

/// PI (π)
#[cfg(feature = "float-as-double")]
pub const PI: Float = std::f64::consts::PI;

/// PI/2 (π/2)
pub const PI_OVER_TWO: Float = PI * 0.5;

/// 3*PI/2 (3π/2)
pub const THREE_PI_OVER_TWO: Float = PI * 1.5;

/// 2*PI (2π)
pub const TWO_PI: Float = PI * 2.0;

/// Machine Epsilon
pub const MACHINE_EPSILON: Float = Float::EPSILON * 0.5;

/// Returns the absolute value of a number.
///
/// * `n` - The number.
#[inline(always)]
pub fn abs<T>(n: T) -> T
where
    T: Num + Neg<Output = T> + PartialOrd + Copy,
{
    if n < T::zero() {
        -n
    } else {
        n
    }
}

/// Returns the minimum of 2 numbers.
///
/// * `a` - First number.
/// * `b` - Second number.
#[inline(always)]
pub fn min<T>(a: T, b: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if a < b {
        a
    } else {
        b
    }
}

/// Returns the maximum of 2 numbers.
///
/// * `a` - First number.
/// * `b` - Second number.
#[inline(always)]
pub fn max<T>(a: T, b: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if a > b {
        a
    } else {
        b
    }
}

/// Clamps a value x to [low, high].
///
/// * `x`    - The number to clamp.
/// * `low`  - Minimum value.
/// * `high` - Maximum value.
#[inline(always)]
pub fn clamp<T>(x: T, low: T, high: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if x < low {
        low
    } else if x > high {
        high
    } else {
        x
    }
}

/// Returns the error bound for adding n terms.
///
/// * `n` - Number of terms
#[inline(always)]
pub fn gamma(n: Int) -> Float {
    (n as Float * MACHINE_EPSILON) / (1.0 - n as Float * MACHINE_EPSILON)
}

/// Linearly interpolate between two points for parameters in [0, 1] and
/// extrapolate for parameters outside that interval.
///
/// * `t` - Parameter.
/// * `p0` - Point at t=0.
/// * `p1` - Point at t=1.
#[inline(always)]
pub fn lerp<P>(t: Float, p0: P, p1: P) -> P
where
    Float: Mul<P, Output = P>,
    P: Add<P, Output = P>,
{
    (1.0 - t) * p0 + t * p1
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
