//! Exponential and logarithmic maps of the rotation group SO(3).
//!
//! Rotation vectors ("mu") encode an axis scaled by an angle in radians. All
//! rotation matrices produced here are orthonormal with a determinant of one.

use crate::scalar::Real;
use crate::types::{Matrix3, Vector3};

/// Converts a rotation vector into a rotation matrix (Rodrigues' formula).
///
/// Very small angles use truncated series expansions of `sin θ / θ` and
/// `(1 - cos θ) / θ²` to avoid cancellation.
pub fn exp<T>(mu: &Vector3<T>) -> Matrix3<T>
where
    T: Real,
{
    let theta_sq = mu.norm_sq();
    let one = T::one();
    let sixth = T::literal(1.0 / 6.0);

    let (k_a, k_b) = if theta_sq < T::literal(1e-8) {
        (one - sixth * theta_sq, T::literal(0.5))
    } else if theta_sq < T::literal(1e-6) {
        (
            one - theta_sq * sixth * (one - sixth * theta_sq),
            T::literal(0.5) - T::literal(1.0 / 24.0) * theta_sq,
        )
    } else {
        let theta = theta_sq.sqrt();
        let inv_theta = theta.recip();
        (
            theta.sin() * inv_theta,
            (one - theta.cos()) * (inv_theta * inv_theta),
        )
    };

    rodrigues(mu, k_a, k_b)
}

/// Converts a rotation matrix into its rotation vector.
///
/// The returned angle lies in `[0, π]`.
pub fn log<T>(rotation: &Matrix3<T>) -> Vector3<T>
where
    T: Real,
{
    let half = T::literal(0.5);
    let frac_1_sqrt_2 = T::literal(core::f64::consts::FRAC_1_SQRT_2);
    let r = rotation;

    let cos_angle = (r.trace() - T::one()) * half;
    let skew = Vector3::new(
        (r[(2, 1)] - r[(1, 2)]) * half,
        (r[(0, 2)] - r[(2, 0)]) * half,
        (r[(1, 0)] - r[(0, 1)]) * half,
    );
    let sin_angle_abs = skew.norm();

    if cos_angle > frac_1_sqrt_2 {
        if sin_angle_abs > T::zero() {
            skew * (sin_angle_abs.asin() / sin_angle_abs)
        } else {
            skew
        }
    } else if cos_angle > -frac_1_sqrt_2 {
        let angle = cos_angle.acos();
        skew * (angle / sin_angle_abs)
    } else {
        // Close to π the skew part vanishes; recover the axis from the symmetric part.
        let angle = T::literal(core::f64::consts::PI) - sin_angle_abs.asin();
        let d0 = r[(0, 0)] - cos_angle;
        let d1 = r[(1, 1)] - cos_angle;
        let d2 = r[(2, 2)] - cos_angle;

        let mut axis = if d0 * d0 > d1 * d1 && d0 * d0 > d2 * d2 {
            Vector3::new(
                d0,
                (r[(1, 0)] + r[(0, 1)]) * half,
                (r[(0, 2)] + r[(2, 0)]) * half,
            )
        } else if d1 * d1 > d2 * d2 {
            Vector3::new(
                (r[(1, 0)] + r[(0, 1)]) * half,
                d1,
                (r[(2, 1)] + r[(1, 2)]) * half,
            )
        } else {
            Vector3::new(
                (r[(0, 2)] + r[(2, 0)]) * half,
                (r[(2, 1)] + r[(1, 2)]) * half,
                d2,
            )
        };

        if axis.dot(&skew) < T::zero() {
            axis = -axis;
        }

        axis.normalized() * angle
    }
}

/// Returns the shortest-arc rotation that turns the direction of `a` into the direction of `b`.
///
/// Parallel inputs yield the identity; anti-parallel inputs yield a half-turn about
/// an axis orthogonal to `a`.
pub fn align_two_vectors<T>(a: &Vector3<T>, b: &Vector3<T>) -> Matrix3<T>
where
    T: Real,
{
    let n = a.cross(b);
    if n.norm() == T::zero() {
        return if a.dot(b) >= T::zero() {
            Matrix3::identity()
        } else {
            rotation_pi_about_axis(&a.orthogonal())
        };
    }

    let n = n.normalized();
    let a = a.normalized();
    let b = b.normalized();

    let frame_a = Matrix3::from_columns(&a, &n, &n.cross(&a));
    let frame_b = Matrix3::from_columns(&b, &n, &n.cross(&b));
    frame_b * frame_a.transpose()
}

fn rotation_pi_about_axis<T>(axis: &Vector3<T>) -> Matrix3<T>
where
    T: Real,
{
    let pi = T::literal(core::f64::consts::PI);
    let mu = *axis * (pi / axis.norm());

    // sin(π)/π vanishes and (1 - cos(π))/π² = 2/π².
    let k_b = T::literal(2.0 / (core::f64::consts::PI * core::f64::consts::PI));
    rodrigues(&mu, T::zero(), k_b)
}

fn rodrigues<T>(w: &Vector3<T>, k_a: T, k_b: T) -> Matrix3<T>
where
    T: Real,
{
    let one = T::one();
    let wx2 = w.x * w.x;
    let wy2 = w.y * w.y;
    let wz2 = w.z * w.z;

    let mut result = Matrix3::zero();
    result.set(0, 0, one - k_b * (wy2 + wz2));
    result.set(1, 1, one - k_b * (wx2 + wz2));
    result.set(2, 2, one - k_b * (wx2 + wy2));

    let a = k_a * w.z;
    let b = k_b * (w.x * w.y);
    result.set(0, 1, b - a);
    result.set(1, 0, b + a);

    let a = k_a * w.y;
    let b = k_b * (w.x * w.z);
    result.set(0, 2, b + a);
    result.set(2, 0, b - a);

    let a = k_a * w.x;
    let b = k_b * (w.y * w.z);
    result.set(1, 2, b - a);
    result.set(2, 1, b + a);

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_orthonormal(r: &Matrix3<f64>) {
        let rtr = r.transpose() * *r;
        assert!(rtr.max_abs_diff(&Matrix3::identity()) < 1e-10, "{r:?}");
        assert_relative_eq!(r.determinant(), 1.0, epsilon = 1e-10);
    }

    fn assert_vec_eq(a: &Vector3<f64>, b: &Vector3<f64>, epsilon: f64) {
        assert!((*a - *b).norm() < epsilon, "{a:?} != {b:?}");
    }

    #[test]
    fn test_exp_zero_is_identity() {
        assert_eq!(exp(&Vector3::<f64>::zero()), Matrix3::identity());
    }

    #[test]
    fn test_exp_quarter_turn_about_z() {
        let r = exp(&Vector3::new(0.0, 0.0, core::f64::consts::FRAC_PI_2));
        assert_orthonormal(&r);
        let x = r * Vector3::new(1.0, 0.0, 0.0);
        assert_vec_eq(&x, &Vector3::new(0.0, 1.0, 0.0), 1e-12);
    }

    #[test]
    fn test_exp_small_angle_branches_are_orthonormal() {
        for mu in [
            Vector3::new(1e-5, 0.0, 0.0),
            Vector3::new(3e-4, -2e-4, 5e-4),
            Vector3::new(0.0, 0.0, 9e-4),
        ] {
            let r = exp(&mu);
            assert_orthonormal(&r);
            assert_vec_eq(&log(&r), &mu, 1e-12);
        }
    }

    #[test]
    fn test_log_inverts_exp() {
        for mu in [
            Vector3::new(0.1, 0.2, -0.3),
            Vector3::new(1.2, 0.0, 0.4),
            Vector3::new(-2.0, 1.0, 0.5),
            Vector3::new(0.0, 3.0, 0.0),
            Vector3::new(1.7, -1.7, 1.0),
        ] {
            let r = exp(&mu);
            assert_orthonormal(&r);
            assert_vec_eq(&log(&r), &mu, 1e-9);
        }
    }

    #[test]
    fn test_log_of_half_turn() {
        let mu = Vector3::new(0.0, core::f64::consts::PI, 0.0);
        let recovered = log(&exp(&mu));
        assert_relative_eq!(recovered.norm(), core::f64::consts::PI, epsilon = 1e-6);
        assert_relative_eq!(recovered.y.abs(), core::f64::consts::PI, epsilon = 1e-6);
    }

    #[test]
    fn test_align_two_vectors() {
        let a = Vector3::new(0.0, 0.0, 9.81);
        let b = Vector3::new(1.0, 2.0, 3.0);
        let r = align_two_vectors(&a, &b);
        assert_orthonormal(&r);
        assert_vec_eq(&(r * a.normalized()), &b.normalized(), 1e-12);
    }

    #[test]
    fn test_align_parallel_is_identity() {
        let a = Vector3::new(0.0, 0.0, 9.81);
        let r = align_two_vectors(&a, &Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(r, Matrix3::identity());
    }

    #[test]
    fn test_align_anti_parallel() {
        let a = Vector3::new(0.0, 0.0, 9.81);
        let b = Vector3::new(0.0, 0.0, -2.0);
        let r = align_two_vectors(&a, &b);
        assert_orthonormal(&r);
        assert_vec_eq(&(r * a.normalized()), &b.normalized(), 1e-12);
    }
}
