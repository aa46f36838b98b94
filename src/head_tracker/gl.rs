//! 4×4 transforms in the column-major layout used by OpenGL.

use crate::scalar::Real;

/// A 4×4 matrix; element `(row, col)` is stored at `4 * col + row`.
pub type GlMatrix<T> = [T; 16];

pub fn identity<T>() -> GlMatrix<T>
where
    T: Real,
{
    let mut m = [T::zero(); 16];
    m[0] = T::one();
    m[5] = T::one();
    m[10] = T::one();
    m[15] = T::one();
    m
}

/// Calculates `lhs · rhs`.
pub fn multiply<T>(lhs: &GlMatrix<T>, rhs: &GlMatrix<T>) -> GlMatrix<T>
where
    T: Real,
{
    let mut result = [T::zero(); 16];
    for col in 0..4 {
        for row in 0..4 {
            result[4 * col + row] = (0..4).fold(T::zero(), |acc, k| {
                acc + lhs[4 * k + row] * rhs[4 * col + k]
            });
        }
    }
    result
}

/// Builds the rotation about the x, y and z axes by the given angles, in degrees.
pub fn rotate_euler<T>(x: T, y: T, z: T) -> GlMatrix<T>
where
    T: Real,
{
    let (sx, cx) = x.to_radians().sin_cos();
    let (sy, cy) = y.to_radians().sin_cos();
    let (sz, cz) = z.to_radians().sin_cos();
    let cxsy = cx * sy;
    let sxsy = sx * sy;

    let mut m = [T::zero(); 16];
    m[0] = cy * cz;
    m[1] = -cy * sz;
    m[2] = sy;
    m[4] = cxsy * cz + cx * sz;
    m[5] = -cxsy * sz + cx * cz;
    m[6] = -sx * cy;
    m[8] = -sxsy * cz + sx * sz;
    m[9] = sxsy * sz + sx * cz;
    m[10] = cx * cy;
    m[15] = T::one();
    m
}

/// Post-multiplies `m` with a translation by `(x, y, z)`.
pub fn translate<T>(m: &mut GlMatrix<T>, x: T, y: T, z: T)
where
    T: Real,
{
    for i in 0..4 {
        m[12 + i] = m[12 + i] + m[i] * x + m[4 + i] * y + m[8 + i] * z;
    }
}
