//! Feeds a synthetic head motion into a [`HeadTracker`] and prints the predicted head
//! views, followed by the lens distortion of the default viewer.

use cardboard_orientation::types::{AccelerometerReading, GyroscopeReading};
use cardboard_orientation::{Distortion, DistortionError, HeadTracker, SystemClock};
use std::f64::consts::PI;

/// Gyroscope and accelerometer sampling interval.
const SAMPLE_INTERVAL_NS: i64 = 5_000_000;

/// Samples per simulated second.
const SAMPLES_PER_SECOND: i64 = 1_000_000_000 / SAMPLE_INTERVAL_NS;

fn main() -> Result<(), DistortionError> {
    let tracker = HeadTracker::<f64, _>::new(SystemClock::new());
    tracker.start_tracking();

    // The device lies flat, then turns its head left and right at up to 1 rad/s.
    for i in 0..3 * SAMPLES_PER_SECOND {
        let timestamp = i * SAMPLE_INTERVAL_NS;
        let t = timestamp as f64 * 1e-9;
        let yaw_rate = (2.0 * PI * 0.5 * t).sin();

        tracker.on_accelerometer(&AccelerometerReading::new(0.0, 0.0, 9.81), timestamp);
        tracker.on_gyroscope(&GyroscopeReading::new(0.0, 0.0, yaw_rate), timestamp);

        if i % (SAMPLES_PER_SECOND / 2) == 0 {
            let view = tracker.last_head_view();
            println!("t = {t:.2} s, yaw rate = {yaw_rate:+.3} rad/s");
            for row in 0..4 {
                println!(
                    "  [{:+.4} {:+.4} {:+.4} {:+.4}]",
                    view[row],
                    view[4 + row],
                    view[8 + row],
                    view[12 + row]
                );
            }
        }
    }

    tracker.stop_tracking();

    let distortion = Distortion::<f64>::default();
    println!("Lens distortion {distortion}");
    for i in 0..=10 {
        let radius = f64::from(i) / 10.0;
        let distorted = distortion.distort(radius);
        let undistorted = distortion.distort_inverse(distorted)?;
        println!("  r = {radius:.2} -> {distorted:.4} -> {undistorted:.4}");
    }

    Ok(())
}
