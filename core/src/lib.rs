//! Core
//!
//! `Float` is `f32` unless the `float-as-double` feature is enabled, which
//! switches every time value, interval bound and derivative term to `f64`.

#[macro_use]
extern crate hexf;
#[macro_use]
extern crate log;

// Re-export.
pub mod geometry;
pub mod pbrt;
pub mod rng;
#[cfg(test)]
pub mod sampling;
pub mod transform_set;
