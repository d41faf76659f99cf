//! Interval of real numbers

use super::{max, min, Float, PI, PI_OVER_TWO, THREE_PI_OVER_TWO};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Upper end of the argument range accepted by `Interval::sin` and
/// `Interval::cos`.
const MAX_TRIG_ARGUMENT: Float = 2.0001 * PI;

/// Interval of real numbers used to give conservative bounds for functions.
/// Always satisfies `low <= high`.
#[derive(Copy, Clone, Default, PartialEq)]
pub struct Interval {
    /// Low value.
    pub low: Float,

    /// High value.
    pub high: Float,
}

impl Interval {
    /// Create an interval with given bounds. The interval will sort the input.
    ///
    /// * `v0` - A real number.
    /// * `v1` - A real number.
    pub fn new(v0: Float, v1: Float) -> Self {
        Self {
            low: min(v0, v1),
            high: max(v0, v1),
        }
    }

    /// Returns the midpoint.
    pub fn midpoint(&self) -> Float {
        (self.low + self.high) * 0.5
    }

    /// Returns the width `high - low`.
    pub fn width(&self) -> Float {
        self.high - self.low
    }

    /// Returns true if the interval is a single value.
    pub fn is_degenerate(&self) -> bool {
        self.low == self.high
    }

    /// Returns true if every value in the interval has the same strict sign.
    pub fn has_fixed_sign(&self) -> bool {
        self.low > 0.0 || self.high < 0.0
    }

    /// Returns true if `v` lies inside `[low - slack, high + slack)`.
    ///
    /// * `v`     - The value to test.
    /// * `slack` - Amount by which the interval is widened.
    pub fn contains_with_slack(&self, v: Float, slack: Float) -> bool {
        v >= self.low - slack && v < self.high + slack
    }

    /// Splits the interval at its midpoint.
    pub fn bisect(&self) -> (Self, Self) {
        let mid = self.midpoint();
        (Self::new(self.low, mid), Self::new(mid, self.high))
    }

    /// Return the interval used for sine function. The caller must ensure this
    /// interval lies inside [0, 2π].
    pub fn sin(&self) -> Interval {
        debug_assert!(
            self.low >= 0.0,
            "interval low < 0 not allowed for sine function"
        );
        debug_assert!(
            self.high <= MAX_TRIG_ARGUMENT,
            "interval high > 2π not allowed for sine function"
        );

        let mut sin_low = min(self.low.sin(), self.high.sin());
        let mut sin_high = max(self.low.sin(), self.high.sin());

        if self.low < PI_OVER_TWO && self.high > PI_OVER_TWO {
            sin_high = 1.0;
        }
        if self.low < THREE_PI_OVER_TWO && self.high > THREE_PI_OVER_TWO {
            sin_low = -1.0;
        }

        Interval::new(sin_low, sin_high)
    }

    /// Return the interval used for cosine function. The caller must ensure
    /// this interval lies inside [0, 2π].
    pub fn cos(&self) -> Interval {
        debug_assert!(
            self.low >= 0.0,
            "interval low < 0 not allowed for cosine function"
        );
        debug_assert!(
            self.high <= MAX_TRIG_ARGUMENT,
            "interval high > 2π not allowed for cosine function"
        );

        let mut cos_low = min(self.low.cos(), self.high.cos());
        let cos_high = max(self.low.cos(), self.high.cos());

        if self.low < PI && self.high > PI {
            cos_low = -1.0;
        }

        Interval::new(cos_low, cos_high)
    }
}

impl From<Float> for Interval {
    /// Create an interval on single point.
    ///
    /// * `v` - A real number.
    fn from(v: Float) -> Self {
        Self { low: v, high: v }
    }
}

impl Add for Interval {
    type Output = Self;

    /// Returns the conservative bounds for addition.
    ///
    /// * `i` -  The interval to add.
    fn add(self, i: Self) -> Self::Output {
        Interval::new(self.low + i.low, self.high + i.high)
    }
}

impl Sub for Interval {
    type Output = Self;

    /// Returns the conservative bounds for subtraction.
    ///
    /// * `i` -  The interval to subtract.
    fn sub(self, i: Self) -> Self::Output {
        Interval::new(self.low - i.high, self.high - i.low)
    }
}

impl Mul for Interval {
    type Output = Self;

    /// Returns the conservative bounds for multiplication.
    ///
    /// * `i` -  The interval to multiply.
    fn mul(self, i: Self) -> Self::Output {
        let ll = self.low * i.low;
        let hl = self.high * i.low;
        let lh = self.low * i.high;
        let hh = self.high * i.high;
        Self::new(min(min(ll, hl), min(lh, hh)), max(max(ll, hl), max(lh, hh)))
    }
}

impl fmt::Debug for Interval {
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interval")
            .field("low", &self.low)
            .field("high", &self.high)
            .finish()
    }
}

impl fmt::Display for Interval {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
