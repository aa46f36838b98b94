use crate::impl_vector_traits;
use crate::types::GyroscopeBias;
use core::ops::Sub;
use uniform_array_derive::UniformArray;

/// A gyroscope sample in the sensor frame (x east, y north, z up when the device lies flat).
#[derive(UniformArray)]
#[cfg_attr(test, ensure_uniform_type::ensure_uniform_type)]
#[repr(C)]
pub struct GyroscopeReading<T> {
    /// The angular rate around the x-axis, in radians per second.
    pub omega_x: T,
    /// The angular rate around the y-axis, in radians per second.
    pub omega_y: T,
    /// The angular rate around the z-axis, in radians per second.
    pub omega_z: T,
}

impl<T> GyroscopeReading<T> {
    /// Initializes a new [`GyroscopeReading`] instance.
    #[inline(always)]
    pub const fn new(omega_x: T, omega_y: T, omega_z: T) -> Self {
        Self {
            omega_x,
            omega_y,
            omega_z,
        }
    }

    /// Constructs a new [`GyroscopeReading`] instance from a reading in north-east-down axes.
    ///
    /// The axes are relabeled into the filter's east-north-up convention.
    #[cfg(feature = "coordinate-frame")]
    #[cfg_attr(docsrs, doc(cfg(feature = "coordinate-frame")))]
    pub fn north_east_down<C>(coordinate: C) -> Self
    where
        C: Into<coordinate_frame::NorthEastDown<T>>,
        T: Clone + core::ops::Neg<Output = T>,
    {
        let coordinate = coordinate.into();
        Self {
            omega_x: coordinate.y(),
            omega_y: coordinate.x(),
            omega_z: -coordinate.z(),
        }
    }
}

/// Removes a constant bias from the reading.
impl<T> Sub<GyroscopeBias<T>> for GyroscopeReading<T>
where
    T: Sub<T, Output = T>,
{
    type Output = GyroscopeReading<T>;

    #[inline]
    fn sub(self, rhs: GyroscopeBias<T>) -> Self::Output {
        Self {
            omega_x: self.omega_x - rhs.omega_x,
            omega_y: self.omega_y - rhs.omega_y,
            omega_z: self.omega_z - rhs.omega_z,
        }
    }
}

#[cfg(feature = "coordinate-frame")]
#[cfg_attr(docsrs, doc(cfg(feature = "coordinate-frame")))]
impl<T, C> From<C> for GyroscopeReading<T>
where
    C: coordinate_frame::CoordinateFrame<Type = T>,
    T: Copy + core::ops::Neg<Output = T> + coordinate_frame::SaturatingNeg<Output = T>,
{
    fn from(value: C) -> Self {
        Self::north_east_down(value.to_ned())
    }
}

impl_vector_traits!(GyroscopeReading, omega_x, omega_y, omega_z, vector);
