use core::fmt::Debug;
use num_traits::Float;

/// The floating-point scalar the filter and the distortion model are generic over.
///
/// Implemented for [`f32`] and [`f64`]. The transcendental functions come from
/// [`num_traits::Float`], which requires either the `std` or the `libm` feature.
pub trait Real: Float + Debug + Send + Sync + 'static {
    /// Converts a compile-time constant into this type.
    fn literal(value: f64) -> Self;

    /// Converts a (signed) nanosecond duration into seconds.
    fn nanos_to_seconds(nanos: i64) -> Self;

    /// The rotation angle, in radians, used for finite-difference Jacobians.
    fn jacobian_step() -> Self;
}

impl Real for f32 {
    #[inline(always)]
    fn literal(value: f64) -> Self {
        value as f32
    }

    #[inline(always)]
    fn nanos_to_seconds(nanos: i64) -> Self {
        nanos as f32 * 1.0e-9
    }

    #[inline(always)]
    fn jacobian_step() -> Self {
        1.0e-3
    }
}

impl Real for f64 {
    #[inline(always)]
    fn literal(value: f64) -> Self {
        value
    }

    #[inline(always)]
    fn nanos_to_seconds(nanos: i64) -> Self {
        nanos as f64 * 1.0e-9
    }

    #[inline(always)]
    fn jacobian_step() -> Self {
        1.0e-7
    }
}
