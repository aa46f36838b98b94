use crate::impl_vector_traits;
use uniform_array_derive::UniformArray;

/// An accelerometer sample in the sensor frame.
///
/// At rest the reading points away from the earth, i.e. it is the reaction to gravity.
#[derive(UniformArray)]
#[cfg_attr(test, ensure_uniform_type::ensure_uniform_type)]
#[repr(C)]
pub struct AccelerometerReading<T> {
    /// The acceleration along the x-axis, in meters per second squared.
    pub x: T,
    /// The acceleration along the y-axis, in meters per second squared.
    pub y: T,
    /// The acceleration along the z-axis, in meters per second squared.
    pub z: T,
}

impl<T> AccelerometerReading<T> {
    /// Initializes a new [`AccelerometerReading`] instance.
    #[inline(always)]
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// Constructs a new [`AccelerometerReading`] instance from a reading in north-east-down axes.
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
            x: coordinate.y(),
            y: coordinate.x(),
            z: -coordinate.z(),
        }
    }
}

#[cfg(feature = "coordinate-frame")]
#[cfg_attr(docsrs, doc(cfg(feature = "coordinate-frame")))]
impl<T, C> From<C> for AccelerometerReading<T>
where
    C: coordinate_frame::CoordinateFrame<Type = T>,
    T: Copy + core::ops::Neg<Output = T> + coordinate_frame::SaturatingNeg<Output = T>,
{
    fn from(value: C) -> Self {
        Self::north_east_down(value.to_ned())
    }
}

impl_vector_traits!(AccelerometerReading, x, y, z, vector);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    #[cfg(feature = "coordinate-frame")]
    fn test_north_east_down_points_up() {
        // A device lying flat measures the reaction to gravity along "up", i.e. negative down.
        let ned = coordinate_frame::NorthEastDown::new(0.0, 0.0, -9.81);
        let reading = AccelerometerReading::<f64>::north_east_down(ned);
        assert_eq!(reading, AccelerometerReading::new(0.0, 0.0, 9.81));
    }
}
