//! Command line options

use clap::Parser;
use motion_core::geometry::{Bounds3f, Point3f};
use motion_core::pbrt::Float;

lazy_static! {
    /// The global application options.
    pub static ref OPTIONS: Options = Options::parse();
}

/// Builds an animated transformation from two keyframes and reports its
/// decomposition, interpolated transformations and motion bounds.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Options {
    /// Start keyframe transformation.
    #[arg(
        long = "start",
        value_name = "OPS",
        default_value = "identity",
        help = "Start keyframe as ';' separated operations: 'translate x y z', \
                'scale x y z', 'rotate degrees ax ay az' or 'identity'."
    )]
    pub start: String,

    /// End keyframe transformation.
    #[arg(
        long = "end",
        value_name = "OPS",
        default_value = "identity",
        help = "End keyframe using the same operations as --start."
    )]
    pub end: String,

    /// Time of the start keyframe.
    #[arg(
        long = "start-time",
        value_name = "TIME",
        default_value_t = 0.0,
        allow_negative_numbers = true,
        help = "Time of the start keyframe."
    )]
    pub start_time: Float,

    /// Time of the end keyframe.
    #[arg(
        long = "end-time",
        value_name = "TIME",
        default_value_t = 1.0,
        allow_negative_numbers = true,
        help = "Time of the end keyframe."
    )]
    pub end_time: Float,

    /// Object space bounds x0 y0 z0 x1 y1 z1.
    #[arg(
        long = "bounds",
        value_name = "FLOAT",
        num_args = 6,
        allow_negative_numbers = true,
        help = "Object space box (x0 y0 z0 x1 y1 z1). Defaults to the unit cube at the origin."
    )]
    pub bounds: Vec<Float>,

    /// Times at which to print the interpolated transformation.
    #[arg(
        long = "time",
        value_name = "TIME",
        allow_negative_numbers = true,
        help = "Print the interpolated transformation at the given time. May be repeated."
    )]
    pub times: Vec<Float>,

    /// Number of sampled times used to verify the motion bounds.
    #[arg(
        long = "verify",
        value_name = "NUM",
        default_value_t = 0,
        help = "Check that the box stays inside the motion bounds at NUM sampled times."
    )]
    pub verify_samples: usize,

    /// Number of threads to use for verification.
    #[arg(
        long = "nthreads",
        short = 't',
        value_name = "NUM",
        default_value_t = 1,
        help = "Use specified number of threads for verification."
    )]
    n_threads: usize,
}

impl Options {
    /// Returns the number of threads to use.
    pub fn threads(&self) -> usize {
        let max_threads = num_cpus::get();
        match self.n_threads {
            0 => {
                warn!("Invalid nthreads");
                1
            }
            n if n > max_threads => {
                warn!("Num threads > max logical CPUs {}", max_threads);
                max_threads
            }
            n => n,
        }
    }

    /// Returns the object space bounds.
    pub fn object_bounds(&self) -> Result<Bounds3f, String> {
        match self.bounds.as_slice() {
            [] => Ok(Bounds3f::new(
                Point3f::new(-0.5, -0.5, -0.5),
                Point3f::new(0.5, 0.5, 0.5),
            )),
            [x0, y0, z0, x1, y1, z1] => Ok(Bounds3f::new(
                Point3f::new(*x0, *y0, *z0),
                Point3f::new(*x1, *y1, *z1),
            )),
            b => Err(format!("--bounds expects 6 values, got {}", b.len())),
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_options() {
        let options = Options::try_parse_from([
            "motion-bounds",
            "--start",
            "identity",
            "--end",
            "rotate 90 0 0 1",
            "--start-time",
            "-1",
            "--end-time",
            "2",
            "--bounds",
            "-1",
            "0",
            "0",
            "1",
            "1",
            "1",
            "--time",
            "0.5",
            "--time",
            "1.5",
            "--verify",
            "100",
            "-t",
            "2",
        ])
        .unwrap();
        assert_eq!(options.end, "rotate 90 0 0 1");
        assert_eq!(options.start_time, -1.0);
        assert_eq!(options.times, vec![0.5, 1.5]);
        assert_eq!(options.verify_samples, 100);
        let b = options.object_bounds().unwrap();
        assert_eq!(b.p_min, Point3f::new(-1.0, 0.0, 0.0));
        assert_eq!(b.p_max, Point3f::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn defaults_to_unit_cube() {
        let options = Options::try_parse_from(["motion-bounds"]).unwrap();
        assert_eq!(options.start, "identity");
        assert_eq!(options.end_time, 1.0);
        assert_eq!(
            options.object_bounds().unwrap().diagonal().x,
            1.0 as Float
        );
        assert_eq!(options.threads(), 1);
    }

    #[test]
    fn threads_are_clamped_to_logical_cpus() {
        let max_threads = num_cpus::get();
        let too_many = (max_threads + 1).to_string();
        let options =
            Options::try_parse_from(["motion-bounds", "--nthreads", too_many.as_str()]).unwrap();
        assert_eq!(options.threads(), max_threads);

        let options = Options::try_parse_from(["motion-bounds", "-t", "0"]).unwrap();
        assert_eq!(options.threads(), 1);
    }

    #[test]
    fn rejects_wrong_bounds_count() {
        assert!(Options::try_parse_from(["motion-bounds", "--bounds", "1", "2"]).is_err());
    }
}
