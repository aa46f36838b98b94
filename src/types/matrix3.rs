use crate::scalar::Real;
use crate::types::Vector3;
use core::fmt::{Debug, Formatter};
use core::ops::{Add, Index, IndexMut, Mul, Sub};

/// A 3×3 matrix stored in row-major order.
#[derive(Copy, Clone, PartialEq)]
pub struct Matrix3<T> {
    rows: [[T; 3]; 3],
}

impl<T> Matrix3<T> {
    /// Initializes a new [`Matrix3`] from its rows.
    #[inline(always)]
    pub const fn from_rows(rows: [[T; 3]; 3]) -> Self {
        Self { rows }
    }

    /// Returns the rows of the matrix.
    #[inline(always)]
    pub const fn rows(&self) -> &[[T; 3]; 3] {
        &self.rows
    }
}

impl<T> Matrix3<T>
where
    T: Real,
{
    /// Returns the all-zero matrix.
    pub fn zero() -> Self {
        Self::from_rows([[T::zero(); 3]; 3])
    }

    /// Returns the identity matrix.
    pub fn identity() -> Self {
        Self::from_diagonal(T::one())
    }

    /// Returns a matrix with `value` on the diagonal and zeros elsewhere.
    pub fn from_diagonal(value: T) -> Self {
        let mut matrix = Self::zero();
        matrix.set_diagonal(value);
        matrix
    }

    /// Builds a matrix whose columns are the given vectors.
    pub fn from_columns(c0: &Vector3<T>, c1: &Vector3<T>, c2: &Vector3<T>) -> Self {
        Self::from_rows([[c0.x, c1.x, c2.x], [c0.y, c1.y, c2.y], [c0.z, c1.z, c2.z]])
    }

    /// Gets the value at the specified row and column.
    #[inline(always)]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.rows[row][col]
    }

    /// Sets the value at the specified row and column.
    #[inline(always)]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.rows[row][col] = value;
    }

    /// Sets all diagonal elements to `value`, leaving the rest untouched.
    pub fn set_diagonal(&mut self, value: T) {
        self.rows[0][0] = value;
        self.rows[1][1] = value;
        self.rows[2][2] = value;
    }

    /// Returns the column with the given index.
    pub fn column(&self, col: usize) -> Vector3<T> {
        Vector3::new(self.rows[0][col], self.rows[1][col], self.rows[2][col])
    }

    /// Replaces the column with the given index.
    pub fn set_column(&mut self, col: usize, value: &Vector3<T>) {
        self.rows[0][col] = value.x;
        self.rows[1][col] = value.y;
        self.rows[2][col] = value.z;
    }

    /// Returns the row with the given index.
    pub fn row(&self, row: usize) -> Vector3<T> {
        Vector3::from(self.rows[row])
    }

    /// Returns the transposed matrix.
    pub fn transpose(&self) -> Self {
        let m = &self.rows;
        Self::from_rows([
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ])
    }

    /// Multiplies every element by `factor`.
    pub fn scale(&self, factor: T) -> Self {
        let mut result = *self;
        result.rows.iter_mut().flatten().for_each(|v| *v = *v * factor);
        result
    }

    /// Returns the sum of the diagonal elements.
    pub fn trace(&self) -> T {
        self.rows[0][0] + self.rows[1][1] + self.rows[2][2]
    }

    /// Calculates the determinant.
    pub fn determinant(&self) -> T {
        let m = &self.rows;
        m[0][0] * (m[1][1] * m[2][2] - m[2][1] * m[1][2])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Calculates the exact inverse using the adjugate.
    ///
    /// Returns [`None`] if the determinant is exactly zero.
    pub fn try_inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det == T::zero() {
            return None;
        }

        let inv = det.recip();
        let m = &self.rows;
        Some(Self::from_rows([
            [
                (m[1][1] * m[2][2] - m[2][1] * m[1][2]) * inv,
                -(m[0][1] * m[2][2] - m[0][2] * m[2][1]) * inv,
                (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv,
            ],
            [
                -(m[1][0] * m[2][2] - m[1][2] * m[2][0]) * inv,
                (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv,
                -(m[0][0] * m[1][2] - m[1][0] * m[0][2]) * inv,
            ],
            [
                (m[1][0] * m[2][1] - m[2][0] * m[1][1]) * inv,
                -(m[0][0] * m[2][1] - m[2][0] * m[0][1]) * inv,
                (m[0][0] * m[1][1] - m[1][0] * m[0][1]) * inv,
            ],
        ]))
    }

    /// Calculates `self · other · selfᵀ`, i.e. the similarity transform of `other`.
    pub fn conjugate(&self, other: &Matrix3<T>) -> Self {
        *self * *other * self.transpose()
    }

    /// Returns the largest absolute element-wise difference to `other`.
    pub fn max_abs_diff(&self, other: &Matrix3<T>) -> T {
        self.rows
            .iter()
            .flatten()
            .zip(other.rows.iter().flatten())
            .fold(T::zero(), |acc, (a, b)| acc.max((*a - *b).abs()))
    }

    /// Determines whether any element is NaN.
    pub fn has_nan(&self) -> bool {
        self.rows.iter().flatten().any(|v| v.is_nan())
    }

    /// Embeds the matrix into a 4×4 homogeneous transform without translation,
    /// laid out in column-major order as expected by OpenGL.
    pub fn to_gl_matrix(&self) -> [T; 16] {
        let mut out = [T::zero(); 16];
        for (r, row) in self.rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                out[4 * c + r] = *value;
            }
        }
        out[15] = T::one();
        out
    }
}

impl<T> Index<(usize, usize)> for Matrix3<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.rows[row][col]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix3<T> {
    #[inline(always)]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.rows[row][col]
    }
}

impl<T> Add<Matrix3<T>> for Matrix3<T>
where
    T: Real,
{
    type Output = Matrix3<T>;

    fn add(mut self, rhs: Matrix3<T>) -> Self::Output {
        self.rows
            .iter_mut()
            .flatten()
            .zip(rhs.rows.iter().flatten())
            .for_each(|(a, b)| *a = *a + *b);
        self
    }
}

impl<T> Sub<Matrix3<T>> for Matrix3<T>
where
    T: Real,
{
    type Output = Matrix3<T>;

    fn sub(mut self, rhs: Matrix3<T>) -> Self::Output {
        self.rows
            .iter_mut()
            .flatten()
            .zip(rhs.rows.iter().flatten())
            .for_each(|(a, b)| *a = *a - *b);
        self
    }
}

impl<T> Mul<Matrix3<T>> for Matrix3<T>
where
    T: Real,
{
    type Output = Matrix3<T>;

    fn mul(self, rhs: Matrix3<T>) -> Self::Output {
        let mut result = Self::zero();
        for r in 0..3 {
            for c in 0..3 {
                result.rows[r][c] = self.rows[r][0] * rhs.rows[0][c]
                    + self.rows[r][1] * rhs.rows[1][c]
                    + self.rows[r][2] * rhs.rows[2][c];
            }
        }
        result
    }
}

impl<T> Mul<Vector3<T>> for Matrix3<T>
where
    T: Real,
{
    type Output = Vector3<T>;

    fn mul(self, rhs: Vector3<T>) -> Self::Output {
        Vector3::new(
            self.row(0).dot(&rhs),
            self.row(1).dot(&rhs),
            self.row(2).dot(&rhs),
        )
    }
}

impl<T> Debug for Matrix3<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Matrix3").field(&self.rows).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> Matrix3<f64> {
        Matrix3::from_rows([[2.0, -1.0, 0.0], [-1.0, 2.0, -1.0], [0.0, -1.0, 2.0]])
    }

    #[test]
    fn test_identity_and_diagonal() {
        let m = Matrix3::<f64>::from_diagonal(25.0);
        assert_eq!(m.trace(), 75.0);
        assert_eq!(m.get(0, 1), 0.0);
        assert_eq!(Matrix3::<f64>::identity().determinant(), 1.0);
    }

    #[test]
    fn test_transpose() {
        let m = Matrix3::<f64>::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        let t = m.transpose();
        assert_eq!(t[(0, 1)], 4.0);
        assert_eq!(t[(2, 0)], 3.0);
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn test_columns() {
        let mut m = Matrix3::<f64>::zero();
        m.set_column(1, &Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(m.column(1), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(m.row(2), Vector3::new(0.0, 3.0, 0.0));
    }

    #[test]
    fn test_inverse() {
        let m = sample();
        assert_relative_eq!(m.determinant(), 4.0, epsilon = 1e-12);

        let inv = m.try_inverse().expect("matrix is invertible");
        let product = m * inv;
        assert!(product.max_abs_diff(&Matrix3::identity()) < 1e-12);
    }

    #[test]
    fn test_singular_inverse() {
        let m = Matrix3::<f64>::from_rows([[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [0.0, 1.0, 0.0]]);
        assert!(m.try_inverse().is_none());
    }

    #[test]
    fn test_matrix_vector_product() {
        let v = sample() * Vector3::new(1.0, 1.0, 1.0);
        assert_eq!(v, Vector3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn test_gl_matrix_is_column_major() {
        let m = Matrix3::<f64>::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        let gl = m.to_gl_matrix();
        assert_eq!(
            gl,
            [
                1.0, 4.0, 7.0, 0.0, //
                2.0, 5.0, 8.0, 0.0, //
                3.0, 6.0, 9.0, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ]
        );
    }

    #[test]
    fn test_add_sub_scale() {
        let m = sample();
        assert_eq!((m + m) - m, m);
        assert_eq!(m.scale(2.0), m + m);
    }
}
