//! Plain-data types shared by the filter and its callers.

mod accelerometer_reading;
mod gyroscope_bias;
mod gyroscope_reading;
mod matrix3;
mod vector3;

pub use crate::types::accelerometer_reading::AccelerometerReading;
pub use crate::types::gyroscope_bias::GyroscopeBias;
pub use crate::types::gyroscope_reading::GyroscopeReading;
pub use crate::types::matrix3::Matrix3;
pub use crate::types::vector3::Vector3;
