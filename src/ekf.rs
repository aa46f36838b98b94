//! Orientation tracking with an Extended Kalman Filter on SO(3).
//!
//! The filter state is a rotation matrix rather than a vector, so predictions and
//! corrections are applied by left-composing small rotations obtained from the
//! exponential map, and the covariance lives in the tangent space of the estimate.

mod filter;
mod noise;
mod observation;

pub use crate::ekf::filter::{OrientationEkf, TrackingState};
pub use crate::ekf::noise::{AccelerometerNoiseModel, TimestepFilter};
pub use crate::ekf::observation::{GravityObservation, ObservationModel};
