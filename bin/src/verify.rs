//! Motion bounds verification

use motion_core::geometry::{AnimatedTransform, Bounds3f};
use motion_core::pbrt::{lerp, max, Axis, Float};
use motion_core::rng::RNG;
use std::thread;

/// Number of sampled times processed by a worker per message.
const CHUNK_SIZE: usize = 256;

/// Result of checking sampled times against the motion bounds.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct VerifyReport {
    /// Number of sampled times.
    pub samples: usize,

    /// Number of sampled times where the box left the motion bounds.
    pub violations: usize,

    /// Largest distance by which the box left the motion bounds.
    pub worst_excess: Float,

    /// Time of the worst violation.
    pub worst_time: Float,
}

impl VerifyReport {
    /// Merges the results of another report into this one.
    ///
    /// * `other` - The other report.
    fn merge(&mut self, other: &VerifyReport) {
        self.samples += other.samples;
        self.violations += other.violations;
        if other.worst_excess > self.worst_excess {
            self.worst_excess = other.worst_excess;
            self.worst_time = other.worst_time;
        }
    }
}

/// Returns the distance by which `inner` extends outside `outer` after
/// shrinking `inner` by `1e-4` of its diagonal.
///
/// * `inner` - The box to test.
/// * `outer` - The enclosing box.
fn excess(inner: &Bounds3f, outer: &Bounds3f) -> Float {
    let slack = inner.diagonal() * 1e-4;
    let p_min = inner.p_min + slack;
    let p_max = inner.p_max - slack;
    Axis::ALL.iter().fold(0.0, |e, &axis| {
        max(
            e,
            max(outer.p_min[axis] - p_min[axis], p_max[axis] - outer.p_max[axis]),
        )
    })
}

/// Check a chunk of stratified, jittered sample times.
///
/// * `at`      - The animated transformation.
/// * `b`       - Object space bounds.
/// * `bounds`  - Motion bounds of `b`.
/// * `chunk`   - Chunk index.
/// * `samples` - Total number of samples.
fn verify_chunk(
    at: &AnimatedTransform,
    b: &Bounds3f,
    bounds: &Bounds3f,
    chunk: usize,
    samples: usize,
) -> VerifyReport {
    let mut rng = RNG::new(chunk as u64);
    let mut report = VerifyReport::default();
    let first = chunk * CHUNK_SIZE;
    for i in first..samples.min(first + CHUNK_SIZE) {
        let u = (i as Float + rng.uniform_float()) / samples as Float;
        let time = lerp(u, at.start_time(), at.end_time());
        let e = excess(&at.interpolate(time).transform_bounds(b), bounds);
        report.samples += 1;
        if e > 0.0 {
            report.violations += 1;
            if e > report.worst_excess {
                report.worst_excess = e;
                report.worst_time = time;
            }
        }
    }
    report
}

/// Samples times over the animation and checks that the transformed box
/// stays inside its motion bounds. The work is split across worker threads.
///
/// * `at`        - The animated transformation.
/// * `b`         - Object space bounds.
/// * `samples`   - Number of sampled times.
/// * `n_threads` - Number of worker threads.
pub fn verify(
    at: &AnimatedTransform,
    b: &Bounds3f,
    samples: usize,
    n_threads: usize,
) -> VerifyReport {
    let bounds = at.motion_bounds(b);
    let chunk_count = (samples + CHUNK_SIZE - 1) / CHUNK_SIZE;
    let mut report = VerifyReport::default();

    thread::scope(|scope| {
        let (tx_collector, rx_collector) = crossbeam_channel::bounded::<VerifyReport>(n_threads);
        let (tx_worker, rx_worker) = crossbeam_channel::bounded::<usize>(n_threads);
        let report = &mut report;
        let bounds = &bounds;

        // Spawn collector thread.
        scope.spawn(move || {
            for chunk_report in rx_collector.iter() {
                report.merge(&chunk_report);
            }
        });

        // Spawn worker threads.
        for _ in 0..n_threads {
            let rx_worker = rx_worker.clone();
            let tx_collector = tx_collector.clone();
            scope.spawn(move || {
                for chunk in rx_worker.iter() {
                    let chunk_report = verify_chunk(at, b, bounds, chunk, samples);
                    if tx_collector.send(chunk_report).is_err() {
                        error!("Verification collector stopped early");
                        break;
                    }
                }
            });
        }
        drop(rx_worker); // Drop extra since we've cloned one for each worker.
        drop(tx_collector);

        // Send work.
        for chunk in 0..chunk_count {
            if tx_worker.send(chunk).is_err() {
                error!("Verification workers stopped early");
                break;
            }
        }
    });

    info!(
        "Verified {} samples with {} violations",
        report.samples, report.violations
    );
    report
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
