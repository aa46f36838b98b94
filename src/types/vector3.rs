use crate::impl_vector_traits;
use crate::scalar::Real;
use core::ops::{Add, AddAssign, Mul, Neg, Sub};
use uniform_array_derive::UniformArray;

/// A three-dimensional vector.
#[derive(UniformArray)]
#[cfg_attr(test, ensure_uniform_type::ensure_uniform_type)]
#[repr(C)]
pub struct Vector3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T> Vector3<T> {
    /// Initializes a new [`Vector3`] instance.
    #[inline(always)]
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }
}

impl<T> Vector3<T>
where
    T: Real,
{
    /// Returns the zero vector.
    #[inline(always)]
    pub fn zero() -> Self {
        Self::new(T::zero(), T::zero(), T::zero())
    }

    /// Returns the unit vector along the axis with the given index, scaled by `value`.
    ///
    /// ## Panics
    /// Panics if `axis` is not in `0..3`.
    pub fn along_axis(axis: usize, value: T) -> Self {
        match axis {
            0 => Self::new(value, T::zero(), T::zero()),
            1 => Self::new(T::zero(), value, T::zero()),
            2 => Self::new(T::zero(), T::zero(), value),
            _ => panic!("Index out of bounds"),
        }
    }

    /// Calculates the inner product, also known as dot product.
    #[inline(always)]
    pub fn dot(&self, rhs: &Vector3<T>) -> T {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    /// Calculates the squared vector length.
    #[inline(always)]
    pub fn norm_sq(&self) -> T {
        self.dot(self)
    }

    /// Calculates the vector length, i.e. its Euclidean norm.
    #[inline(always)]
    #[doc(alias = "length")]
    pub fn norm(&self) -> T {
        self.norm_sq().sqrt()
    }

    /// Returns a normalized version of the vector.
    ///
    /// The zero vector is returned unchanged.
    pub fn normalized(&self) -> Self {
        let norm = self.norm();
        if norm == T::zero() {
            return *self;
        }
        *self * norm.recip()
    }

    /// Calculates the 3D vector cross product.
    pub fn cross(&self, rhs: &Vector3<T>) -> Vector3<T> {
        Self {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }

    /// Returns the index of the component with the largest absolute value.
    ///
    /// Ties resolve towards the later axis.
    pub fn largest_abs_component(&self) -> usize {
        let x = self.x.abs();
        let y = self.y.abs();
        let z = self.z.abs();
        if x > y && x > z {
            0
        } else if y > z {
            1
        } else {
            2
        }
    }

    /// Returns a unit vector orthogonal to this one.
    ///
    /// The result is the cross product with the basis axis preceding the dominant
    /// component, which keeps it well away from degenerate for any non-zero input.
    pub fn orthogonal(&self) -> Self {
        let axis = match self.largest_abs_component() {
            0 => 2,
            k => k - 1,
        };
        self.cross(&Self::along_axis(axis, T::one())).normalized()
    }
}

impl<T> Add<Vector3<T>> for Vector3<T>
where
    T: Add<T, Output = T>,
{
    type Output = Vector3<T>;

    #[inline]
    fn add(self, rhs: Vector3<T>) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl<T> AddAssign<Vector3<T>> for Vector3<T>
where
    T: AddAssign<T>,
{
    #[inline]
    fn add_assign(&mut self, rhs: Vector3<T>) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl<T> Sub<Vector3<T>> for Vector3<T>
where
    T: Sub<T, Output = T>,
{
    type Output = Vector3<T>;

    #[inline]
    fn sub(self, rhs: Vector3<T>) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

/// Implements the unary negation.
impl<T> Neg for Vector3<T>
where
    T: Neg<Output = T>,
{
    type Output = Vector3<T>;

    #[inline]
    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

/// Implements the vector dot product.
impl<T> Mul<Vector3<T>> for Vector3<T>
where
    T: Mul<T, Output = T> + Add<T, Output = T>,
{
    type Output = T;

    /// Calculates the inner product, also known as dot product.
    #[inline]
    fn mul(self, rhs: Vector3<T>) -> Self::Output {
        (self.x * rhs.x) + (self.y * rhs.y) + (self.z * rhs.z)
    }
}

impl<T> From<Vector3<T>> for (T, T, T) {
    fn from(value: Vector3<T>) -> Self {
        (value.x, value.y, value.z)
    }
}

impl<T> From<[T; 3]> for Vector3<T> {
    fn from(value: [T; 3]) -> Self {
        let [x, y, z] = value;
        Self { x, y, z }
    }
}

impl_vector_traits!(Vector3, x, y, z);

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_length() {
        let vec = Vector3::<f32>::new(1.0, 2.0, 3.0);
        assert_eq!(vec.norm_sq(), 14.0);
        assert_eq!(vec.norm(), 14.0_f32.sqrt());
    }

    #[test]
    fn test_dot_matches_mul() {
        let a = Vector3::<f64>::new(1.0, -2.0, 0.5);
        let b = Vector3::<f64>::new(4.0, 1.0, -2.0);
        assert_eq!(a.dot(&b), 1.0);
        assert_eq!(a * b, a.dot(&b));
    }

    #[test]
    fn test_cross_is_right_handed() {
        let x = Vector3::<f64>::new(1.0, 0.0, 0.0);
        let y = Vector3::<f64>::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(&y), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(y.cross(&x), Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_normalized_zero_stays_zero() {
        let zero = Vector3::<f64>::zero();
        assert_eq!(zero.normalized(), zero);

        let v = Vector3::<f64>::new(3.0, 0.0, 4.0).normalized();
        assert_relative_eq!(v.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(v.x, 0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_largest_abs_component() {
        assert_eq!(Vector3::<f64>::new(-5.0, 1.0, 2.0).largest_abs_component(), 0);
        assert_eq!(Vector3::<f64>::new(0.0, -3.0, 2.0).largest_abs_component(), 1);
        assert_eq!(Vector3::<f64>::new(1.0, 1.0, 1.0).largest_abs_component(), 2);
    }

    #[test]
    fn test_orthogonal() {
        for v in [
            Vector3::<f64>::new(0.0, 0.0, 9.81),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(-0.3, 2.0, 0.1),
        ] {
            let o = v.orthogonal();
            assert_relative_eq!(o.norm(), 1.0, epsilon = 1e-12);
            assert_relative_eq!(o.dot(&v), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_along_axis() {
        assert_eq!(Vector3::<f64>::along_axis(1, 2.0), Vector3::new(0.0, 2.0, 0.0));
    }
}
