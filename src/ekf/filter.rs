use crate::ekf::noise::{AccelerometerNoiseModel, TimestepFilter};
use crate::ekf::observation::{GravityObservation, ObservationModel};
use crate::scalar::Real;
use crate::so3;
use crate::types::{AccelerometerReading, GyroscopeReading, Matrix3, Vector3};
use log::{debug, trace};

/// Initial variance of the orientation error, in rad².
const INITIAL_COVARIANCE: f64 = 25.0;

/// Process noise variance, scaled by the squared timestep.
const PROCESS_NOISE: f64 = 1.0;

/// Gyroscope measurement noise variance. Not used by any update.
const GYROSCOPE_NOISE: f64 = 0.0625;

/// Accelerometer measurement noise variance before the first adaptive update.
const INITIAL_ACCELEROMETER_NOISE: f64 = 0.5625;

/// The accelerometer reading of a device at rest, lying flat.
const GRAVITY: f64 = 9.81;

/// Gyroscope timesteps above this many seconds are considered outliers.
const MAX_GYRO_TIMESTEP: f64 = 0.04;

/// Timestep used for outliers while the timestep filter is still warming up.
const FALLBACK_GYRO_TIMESTEP: f64 = 0.01;

/// The state of an [`OrientationEkf`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TrackingState {
    /// No accelerometer sample has been processed yet; the orientation is meaningless.
    Uninitialized,
    /// The orientation was aligned to gravity and is being tracked.
    Tracking,
}

/// An Extended Kalman Filter tracking the sensor-from-world rotation on SO(3).
///
/// The state is a rotation matrix; its uncertainty is a 3×3 covariance in the tangent
/// space at the current estimate. Gyroscope samples drive the prediction step, accelerometer
/// samples correct the estimate towards the measured gravity direction.
///
/// The world frame is east-north-up: "down" as read by an accelerometer at rest is
/// `(0, 0, 9.81)` and north is `(0, 1, 0)`.
///
/// All mutating operations take `&mut self`; wrap the filter in a lock to share it
/// between a sensor thread and a render thread.
#[derive(Debug, Clone)]
pub struct OrientationEkf<T> {
    /// The rotation from the world frame into the sensor frame.
    sensor_from_world: Matrix3<T>,
    /// The orientation error covariance, in rad².
    covariance: Matrix3<T>,
    process_noise: Matrix3<T>,
    gyroscope_noise: Matrix3<T>,
    accelerometer_noise: Matrix3<T>,
    down: Vector3<T>,
    north: Vector3<T>,
    last_gyro: Vector3<T>,
    last_gyro_timestamp: Option<i64>,
    gravity_aligned: bool,
    north_aligned: bool,
    accelerometer_noise_model: AccelerometerNoiseModel<T>,
    timestep_filter: TimestepFilter<T>,
}

impl<T> OrientationEkf<T>
where
    T: Real,
{
    /// Initializes a new, uninitialized filter.
    pub fn new() -> Self {
        Self {
            sensor_from_world: Matrix3::identity(),
            covariance: Matrix3::from_diagonal(T::literal(INITIAL_COVARIANCE)),
            process_noise: Matrix3::from_diagonal(T::literal(PROCESS_NOISE)),
            gyroscope_noise: Matrix3::from_diagonal(T::literal(GYROSCOPE_NOISE)),
            accelerometer_noise: Matrix3::from_diagonal(T::literal(INITIAL_ACCELEROMETER_NOISE)),
            down: Vector3::new(T::zero(), T::zero(), T::literal(GRAVITY)),
            north: Vector3::new(T::zero(), T::one(), T::zero()),
            last_gyro: Vector3::zero(),
            last_gyro_timestamp: None,
            gravity_aligned: false,
            north_aligned: false,
            accelerometer_noise_model: AccelerometerNoiseModel::new(),
            timestep_filter: TimestepFilter::new(),
        }
    }

    /// Returns the filter to the state it had after construction.
    pub fn reset(&mut self) {
        *self = Self::new();
        debug!("Orientation filter reset");
    }

    /// Gets the tracking state.
    pub fn state(&self) -> TrackingState {
        if self.gravity_aligned {
            TrackingState::Tracking
        } else {
            TrackingState::Uninitialized
        }
    }

    /// Determines whether the orientation was aligned to gravity.
    pub fn is_gravity_aligned(&self) -> bool {
        self.gravity_aligned
    }

    /// Determines whether the orientation was aligned to north.
    ///
    /// There is no heading observation yet, so this is always `false`.
    pub fn is_north_aligned(&self) -> bool {
        self.north_aligned
    }

    /// Gets the current estimate of the sensor-from-world rotation.
    pub fn orientation(&self) -> &Matrix3<T> {
        &self.sensor_from_world
    }

    /// Gets the orientation error covariance, in rad².
    pub fn covariance(&self) -> &Matrix3<T> {
        &self.covariance
    }

    /// Gets the current accelerometer measurement noise covariance.
    pub fn accelerometer_noise(&self) -> &Matrix3<T> {
        &self.accelerometer_noise
    }

    /// Gets the gyroscope measurement noise covariance.
    pub fn gyroscope_noise(&self) -> &Matrix3<T> {
        &self.gyroscope_noise
    }

    /// Gets the most recent (bias-free) angular rate, in rad/s.
    pub fn last_gyro(&self) -> &Vector3<T> {
        &self.last_gyro
    }

    /// Gets the world-frame accelerometer reading of a device at rest.
    pub fn down_reference(&self) -> &Vector3<T> {
        &self.down
    }

    /// Gets the world-frame north direction.
    pub fn north_reference(&self) -> &Vector3<T> {
        &self.north
    }

    /// Performs the prediction step for a gyroscope sample.
    ///
    /// The first sample only seeds the timestamp. Gaps longer than 40 ms are replaced by the
    /// typical sampling interval, and non-increasing timestamps skip the integration.
    ///
    /// ## Arguments
    /// * `reading` - The angular rate, in rad/s.
    /// * `timestamp_ns` - The monotonic sample timestamp, in nanoseconds.
    pub fn process_gyroscope(&mut self, reading: &GyroscopeReading<T>, timestamp_ns: i64) {
        let omega = Vector3::from(reading);

        if let Some(last_timestamp) = self.last_gyro_timestamp {
            let mut dt = T::nanos_to_seconds(timestamp_ns.saturating_sub(last_timestamp));
            if dt > T::literal(MAX_GYRO_TIMESTEP) {
                let substitute = self
                    .timestep_filter
                    .timestep_or(T::literal(FALLBACK_GYRO_TIMESTEP));
                trace!("Replacing gyroscope timestep of {dt:?} s by {substitute:?} s");
                dt = substitute;
            } else if dt > T::zero() {
                self.timestep_filter.update(dt);
            }

            if dt > T::zero() {
                let motion = so3::exp(&(omega * -dt));
                self.sensor_from_world = motion * self.sensor_from_world;
                self.covariance =
                    motion.conjugate(&self.covariance) + self.process_noise.scale(dt * dt);
                self.panic_if_nan();
            }
        }

        self.last_gyro = omega;
        self.last_gyro_timestamp = Some(timestamp_ns);
    }

    /// Performs the correction step for an accelerometer sample.
    ///
    /// The first sample after a reset aligns the orientation to the measured gravity
    /// direction directly; every later sample runs an EKF correction whose measurement
    /// noise adapts to the amount of linear motion.
    ///
    /// ## Arguments
    /// * `reading` - The acceleration, in m/s².
    /// * `_timestamp_ns` - The sample timestamp, in nanoseconds. Every sample is processed.
    pub fn process_accelerometer(
        &mut self,
        reading: &AccelerometerReading<T>,
        _timestamp_ns: i64,
    ) {
        let measurement = Vector3::from(reading);

        let variance = self.accelerometer_noise_model.update(measurement.norm());
        self.accelerometer_noise = Matrix3::from_diagonal(variance);

        if !self.gravity_aligned {
            self.sensor_from_world = so3::align_two_vectors(&self.down, &measurement);
            self.gravity_aligned = true;
            debug!("Aligned orientation to gravity reading {measurement:?}");
            return;
        }

        let observation = GravityObservation::new(self.down, measurement, variance);
        self.correct(&observation);
    }

    /// Corrects the estimate with an arbitrary observation.
    ///
    /// The observation Jacobian is computed by finite differences, perturbing the estimate
    /// about each axis in turn.
    ///
    /// ## Panics
    /// Panics if the innovation covariance is singular, i.e. the observation noise is degenerate.
    pub fn correct<M>(&mut self, observation: &M)
    where
        M: ObservationModel<T>,
    {
        let innovation = observation.innovation(&self.sensor_from_world);

        let step = T::jacobian_step();
        let mut jacobian = Matrix3::zero();
        for dof in 0..3 {
            let perturbed = so3::exp(&Vector3::along_axis(dof, step)) * self.sensor_from_world;
            let column = (innovation - observation.innovation(&perturbed)) * step.recip();
            jacobian.set_column(dof, &column);
        }

        let jacobian_t = jacobian.transpose();
        let innovation_covariance =
            jacobian * self.covariance * jacobian_t + observation.noise_covariance();
        let Some(innovation_covariance_inv) = innovation_covariance.try_inverse() else {
            panic!("Singular innovation covariance {innovation_covariance:?}");
        };

        let gain = self.covariance * jacobian_t * innovation_covariance_inv;
        let correction = gain * innovation;
        self.covariance = (Matrix3::identity() - gain * jacobian) * self.covariance;

        let motion = so3::exp(&correction);
        self.sensor_from_world = motion * self.sensor_from_world;
        self.covariance = motion.conjugate(&self.covariance);
        self.panic_if_nan();
    }

    /// Extrapolates the orientation using the last gyroscope sample and returns it as a
    /// column-major 4×4 OpenGL matrix.
    ///
    /// ## Arguments
    /// * `seconds_after_last_gyro` - The time to extrapolate past the last gyroscope sample.
    pub fn predicted_gl_matrix(&self, seconds_after_last_gyro: T) -> [T; 16] {
        let motion = so3::exp(&(self.last_gyro * -seconds_after_last_gyro));
        (motion * self.sensor_from_world).to_gl_matrix()
    }

    #[allow(unused)]
    fn panic_if_nan(&self) {
        #[cfg(debug_assertions)]
        if self.sensor_from_world.has_nan() || self.covariance.has_nan() {
            panic!("NaN detected in orientation estimate")
        }
    }
}

impl<T> Default for OrientationEkf<T>
where
    T: Real,
{
    fn default() -> Self {
        Self::new()
    }
}
