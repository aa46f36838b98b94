use crate::scalar::Real;

/// Smoothing factor of the moving average over accelerometer norm changes.
const ACCEL_NORM_SMOOTHING: f64 = 0.5;

/// Norm change rate, in m/s², at which the accelerometer is trusted least.
const MAX_ACCEL_NORM_CHANGE: f64 = 0.15;

/// Standard deviation of the accelerometer noise at rest.
const MIN_ACCEL_NOISE_SIGMA: f64 = 0.75;

/// Standard deviation of the accelerometer noise during strong linear motion.
const MAX_ACCEL_NOISE_SIGMA: f64 = 7.0;

/// Low-pass coefficient applied to the previously filtered gyroscope timestep.
const TIMESTEP_FILTER_COEFF: f64 = 0.95;

/// Number of timesteps required before the filtered timestep is trusted.
const MIN_TIMESTEP_SAMPLES: usize = 10;

/// Adapts the accelerometer measurement noise to the amount of linear motion.
///
/// A gravity-only reading has a constant norm. Fast changes of the norm indicate
/// that the device is being accelerated, in which case the reading says less about
/// the direction of "down" and the filter should trust it less.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AccelerometerNoiseModel<T> {
    previous_norm: T,
    smoothed_norm_change: T,
}

impl<T> AccelerometerNoiseModel<T>
where
    T: Real,
{
    /// Initializes a new [`AccelerometerNoiseModel`] that has not seen any sample.
    pub fn new() -> Self {
        Self {
            previous_norm: T::zero(),
            smoothed_norm_change: T::zero(),
        }
    }

    /// Feeds the norm of the latest accelerometer reading and returns the
    /// resulting isotropic noise variance, in (m/s²)².
    ///
    /// The returned value always lies in `[0.75², 7.0²]`.
    pub fn update(&mut self, norm: T) -> T {
        let change = (norm - self.previous_norm).abs();
        self.previous_norm = norm;

        let smoothing = T::literal(ACCEL_NORM_SMOOTHING);
        self.smoothed_norm_change =
            smoothing * change + (T::one() - smoothing) * self.smoothed_norm_change;

        let sigma = self.sigma();
        sigma * sigma
    }

    /// Returns the noise standard deviation for the current smoothed norm change.
    pub fn sigma(&self) -> T {
        let min_sigma = T::literal(MIN_ACCEL_NOISE_SIGMA);
        let max_sigma = T::literal(MAX_ACCEL_NOISE_SIGMA);
        let ratio = self.smoothed_norm_change / T::literal(MAX_ACCEL_NORM_CHANGE);

        // NaN inputs fall through to the upper bound.
        let sigma = min_sigma + ratio * (max_sigma - min_sigma);
        if sigma.is_nan() {
            return max_sigma;
        }
        sigma.max(min_sigma).min(max_sigma)
    }

    /// Returns the smoothed absolute change of the accelerometer norm.
    pub fn smoothed_norm_change(&self) -> T {
        self.smoothed_norm_change
    }
}

impl<T> Default for AccelerometerNoiseModel<T>
where
    T: Real,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Low-pass filter over the gyroscope sampling interval.
///
/// Used as a stand-in for implausibly long intervals, e.g. after the sensor stalled.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TimestepFilter<T> {
    filtered: T,
    samples: usize,
}

impl<T> TimestepFilter<T>
where
    T: Real,
{
    /// Initializes a new, empty [`TimestepFilter`].
    pub fn new() -> Self {
        Self {
            filtered: T::zero(),
            samples: 0,
        }
    }

    /// Feeds a plausible timestep, in seconds.
    pub fn update(&mut self, timestep: T) {
        if self.samples == 0 {
            self.filtered = timestep;
        } else {
            let coeff = T::literal(TIMESTEP_FILTER_COEFF);
            self.filtered = coeff * self.filtered + (T::one() - coeff) * timestep;
        }
        self.samples = self.samples.saturating_add(1);
    }

    /// Determines whether enough timesteps were seen for the filtered value to be meaningful.
    pub fn is_valid(&self) -> bool {
        self.samples >= MIN_TIMESTEP_SAMPLES
    }

    /// Returns the filtered timestep if it is valid, otherwise `fallback`.
    pub fn timestep_or(&self, fallback: T) -> T {
        if self.is_valid() {
            self.filtered
        } else {
            fallback
        }
    }

    /// Returns the number of timesteps fed so far.
    pub fn samples(&self) -> usize {
        self.samples
    }
}

impl<T> Default for TimestepFilter<T>
where
    T: Real,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_noise_at_rest_is_minimal() {
        let mut model = AccelerometerNoiseModel::<f64>::new();
        let mut variance = model.update(9.81);
        for _ in 0..50 {
            variance = model.update(9.81);
        }
        assert_relative_eq!(variance, 0.75 * 0.75, epsilon = 1e-9);
    }

    #[test]
    fn test_noise_first_sample_saturates() {
        // The first sample jumps from a zero norm, which reads as violent motion.
        let mut model = AccelerometerNoiseModel::<f64>::new();
        assert_eq!(model.update(9.81), 49.0);
        assert_relative_eq!(model.smoothed_norm_change(), 4.905);
    }

    #[test]
    fn test_noise_interpolates_linearly() {
        let mut model = AccelerometerNoiseModel::<f64>::new();
        model.update(1.0);
        model.update(1.0);
        model.update(1.0);
        model.update(1.0);
        model.update(1.0);
        model.update(1.0);
        model.update(1.0);
        model.update(1.0);
        let before = model.smoothed_norm_change();

        let variance = model.update(1.1);
        let smoothed = 0.5 * 0.1 + 0.5 * before;
        let sigma = 0.75 + smoothed / 0.15 * (7.0 - 0.75);
        assert_relative_eq!(variance, sigma * sigma, epsilon = 1e-12);
    }

    #[test]
    fn test_noise_is_bounded() {
        let mut model = AccelerometerNoiseModel::<f64>::new();
        for norm in [0.0, 1e9, -1e9, 9.81, 9.9, 0.1, f64::MAX, 9.81, f64::NAN, 1.0] {
            let variance = model.update(norm);
            assert!(variance >= 0.75 * 0.75 && variance <= 49.0, "{variance}");
        }
    }

    #[test]
    fn test_timestep_filter() {
        let mut filter = TimestepFilter::<f64>::new();
        assert!(!filter.is_valid());
        assert_eq!(filter.timestep_or(0.01), 0.01);

        filter.update(0.02);
        for _ in 0..8 {
            filter.update(0.02);
        }
        assert_eq!(filter.samples(), 9);
        assert!(!filter.is_valid());

        filter.update(0.02);
        assert!(filter.is_valid());
        assert_relative_eq!(filter.timestep_or(0.01), 0.02, epsilon = 1e-12);
    }

    #[test]
    fn test_timestep_filter_smoothing() {
        let mut filter = TimestepFilter::<f64>::new();
        filter.update(0.01);
        filter.update(0.03);
        assert_relative_eq!(filter.filtered, 0.95 * 0.01 + 0.05 * 0.03);
    }
}
