//! Axis

use std::ops::Add;

/// Axis enumeration
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Axis {
    #[default]
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis {
    /// The three coordinate axes in order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

impl From<Axis> for usize {
    fn from(axis: Axis) -> usize {
        axis as usize
    }
}

impl Add<usize> for Axis {
    type Output = Axis;
    fn add(self, i: usize) -> Self::Output {
        Axis::ALL[(self as usize + i) % 3]
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
