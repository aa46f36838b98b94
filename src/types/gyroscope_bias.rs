use crate::impl_vector_traits;
use uniform_array_derive::UniformArray;

/// A constant gyroscope offset, subtracted from every reading before it reaches the filter.
#[derive(UniformArray)]
#[cfg_attr(test, ensure_uniform_type::ensure_uniform_type)]
#[repr(C)]
pub struct GyroscopeBias<T> {
    /// The angular rate offset around the x-axis, in radians per second.
    pub omega_x: T,
    /// The angular rate offset around the y-axis, in radians per second.
    pub omega_y: T,
    /// The angular rate offset around the z-axis, in radians per second.
    pub omega_z: T,
}

impl<T> GyroscopeBias<T> {
    /// Initializes a new [`GyroscopeBias`] instance.
    #[inline(always)]
    pub const fn new(omega_x: T, omega_y: T, omega_z: T) -> Self {
        Self {
            omega_x,
            omega_y,
            omega_z,
        }
    }
}

impl<T> From<[T; 3]> for GyroscopeBias<T> {
    fn from(value: [T; 3]) -> Self {
        let [omega_x, omega_y, omega_z] = value;
        Self::new(omega_x, omega_y, omega_z)
    }
}

impl_vector_traits!(GyroscopeBias, omega_x, omega_y, omega_z, vector);
