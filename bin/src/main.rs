#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

mod keyframes;
mod options;
mod verify;

use keyframes::*;
use motion_core::geometry::DecomposedTransform;
use motion_core::transform_set::*;
use options::*;
use verify::*;

fn main() {
    // Initialize `env_logger`.
    env_logger::init();

    if let Err(e) = run() {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let options = &*OPTIONS;

    // Build the keyframes.
    let mut ts = TransformSet::default();
    ts.set_active(START_TRANSFORM_BITS);
    apply_ops(&mut ts, &options.start).map_err(|e| format!("--start: {e}"))?;
    ts.set_active(END_TRANSFORM_BITS);
    apply_ops(&mut ts, &options.end).map_err(|e| format!("--end: {e}"))?;
    ts.set_active(ALL_TRANSFORM_BITS);

    let b = options.object_bounds()?;
    info!("Building animated transform");
    let at = ts.animated(options.start_time, options.end_time);

    println!("start transform: {}", at.start_transform().m);
    println!("end transform:   {}", at.end_transform().m);
    println!("animated: {}", at.is_animated());
    if let Some(decomposed) = at.decomposed() {
        print_decomposition("start", &decomposed[0]);
        print_decomposition("end", &decomposed[1]);
        println!(
            "rotation: {} (angle {} rad), scale: {}",
            at.has_rotation(),
            at.rotation_angle(),
            at.has_scale()
        );
    }

    for &time in options.times.iter() {
        println!("transform at {time}: {}", at.interpolate(time).m);
    }

    let bounds = at.motion_bounds(&b);
    println!("object bounds: {b}");
    println!("motion bounds: {bounds}");

    if options.verify_samples > 0 {
        let n_threads = options.threads();
        info!(
            "Verifying {} samples using {n_threads} threads",
            options.verify_samples
        );
        let report = verify(&at, &b, options.verify_samples, n_threads);
        if report.violations > 0 {
            return Err(format!(
                "{} of {} samples left the motion bounds (worst {} at time {})",
                report.violations, report.samples, report.worst_excess, report.worst_time
            ));
        }
        println!("verified: {} samples", report.samples);
    }

    Ok(())
}

/// Print one keyframe decomposition.
///
/// * `name` - Keyframe name.
/// * `d`    - The decomposition.
fn print_decomposition(name: &str, d: &DecomposedTransform) {
    if !d.converged {
        warn!(
            "Decomposition of {name} keyframe did not converge after {} iterations",
            d.iterations
        );
    }
    println!("{name} translation: {}", d.translation);
    println!("{name} rotation:    {}", d.rotation);
    println!("{name} scale:       {}", d.scale);
}
