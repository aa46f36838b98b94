use crate::scalar::Real;
use crate::so3;
use crate::types::{Matrix3, Vector3};

/// A measurement that can correct the orientation estimate.
///
/// Implementations describe the residual between what a sensor actually measured and what
/// it would have measured if the device had a given orientation. The filter linearizes the
/// residual numerically, so only the forward evaluation is required.
pub trait ObservationModel<T> {
    /// Evaluates the innovation, a rotation vector in the sensor frame, for the given
    /// sensor-from-world orientation. The innovation is zero if the orientation fully
    /// explains the measurement.
    fn innovation(&self, sensor_from_world: &Matrix3<T>) -> Vector3<T>;

    /// Returns the measurement noise covariance, in the units of the innovation squared.
    fn noise_covariance(&self) -> Matrix3<T>;
}

/// An accelerometer reading interpreted as a measurement of the gravity direction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GravityObservation<T> {
    /// The world-frame reference of the reading at rest.
    reference: Vector3<T>,
    /// The sensor-frame reading.
    measurement: Vector3<T>,
    /// Isotropic noise variance.
    variance: T,
}

impl<T> GravityObservation<T> {
    /// Initializes a new [`GravityObservation`].
    ///
    /// ## Arguments
    /// * `reference` - The reading an accelerometer at rest produces in the world frame.
    /// * `measurement` - The accelerometer reading in the sensor frame.
    /// * `variance` - The isotropic measurement noise variance.
    pub const fn new(reference: Vector3<T>, measurement: Vector3<T>, variance: T) -> Self {
        Self {
            reference,
            measurement,
            variance,
        }
    }
}

impl<T> ObservationModel<T> for GravityObservation<T>
where
    T: Real,
{
    fn innovation(&self, sensor_from_world: &Matrix3<T>) -> Vector3<T> {
        let predicted = *sensor_from_world * self.reference;
        so3::log(&so3::align_two_vectors(&predicted, &self.measurement))
    }

    fn noise_covariance(&self) -> Matrix3<T> {
        Matrix3::from_diagonal(self.variance)
    }
}
