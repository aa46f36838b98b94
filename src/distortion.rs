use crate::scalar::Real;
use alloc::vec::Vec;
use core::fmt::{Display, Formatter};
use log::warn;
use thiserror::Error;

/// The coefficients of the first-generation Cardboard lenses.
const DEFAULT_COEFFICIENTS: [f64; 2] = [0.441, 0.156];

/// Iterates of the inverse closer than this are considered converged.
const INVERSE_TOLERANCE: f64 = 1.0e-4;

/// The number of secant steps after which the inverse gives up.
const MAX_INVERSE_ITERATIONS: usize = 100;

/// Errors of the [`Distortion`] model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistortionError {
    #[error("Inverse distortion of radius {radius} did not converge after {iterations} iterations")]
    DidNotConverge { radius: f64, iterations: usize },
}

/// A radial lens distortion model.
///
/// A point at distance `r` from the optical axis is moved to `r · (1 + k₁r² + k₂r⁴ + …)`.
/// An empty coefficient list describes a distortion-free lens.
#[derive(Debug, Clone, PartialEq)]
pub struct Distortion<T> {
    coefficients: Vec<T>,
}

impl<T> Distortion<T>
where
    T: Real,
{
    /// Initializes a new [`Distortion`] from a copy of the given coefficients.
    pub fn from_coefficients(coefficients: &[T]) -> Self {
        Self {
            coefficients: coefficients.to_vec(),
        }
    }

    /// Replaces the coefficients with a copy of the given ones.
    pub fn set_coefficients(&mut self, coefficients: &[T]) {
        self.coefficients = coefficients.to_vec();
    }

    /// Gets the coefficients, in order of increasing power.
    pub fn coefficients(&self) -> &[T] {
        &self.coefficients
    }

    /// Calculates the factor `distort(radius) / radius`.
    pub fn distortion_factor(&self, radius: T) -> T {
        let radius_sq = radius * radius;
        let mut factor = T::one();
        let mut power = T::one();
        for k in &self.coefficients {
            power = power * radius_sq;
            factor = factor + *k * power;
        }
        factor
    }

    /// Distorts a radius.
    pub fn distort(&self, radius: T) -> T {
        radius * self.distortion_factor(radius)
    }

    /// Finds the undistorted radius that [`distort`](Self::distort) maps onto `radius`.
    ///
    /// Uses the secant method seeded with `radius / 0.9` and `radius · 0.9`.
    ///
    /// ## Errors
    /// Returns [`DistortionError::DidNotConverge`] if the iteration does not settle within
    /// 100 steps, or if `radius` or an iterate is not finite.
    pub fn distort_inverse(&self, radius: T) -> Result<T, DistortionError> {
        if !radius.is_finite() {
            return Err(self.did_not_converge(radius, 0));
        }

        let seed_scale = T::literal(0.9);
        let tolerance = T::literal(INVERSE_TOLERANCE);

        let mut r0 = radius / seed_scale;
        let mut r = radius * seed_scale;
        let mut dr0 = radius - self.distort(r0);

        let mut iterations = 0;
        while (r - r0).abs() > tolerance {
            if iterations == MAX_INVERSE_ITERATIONS {
                return Err(self.did_not_converge(radius, iterations));
            }

            let dr = radius - self.distort(r);
            let next = r - dr * ((r - r0) / (dr - dr0));
            if !next.is_finite() {
                return Err(self.did_not_converge(radius, iterations));
            }

            r0 = r;
            r = next;
            dr0 = dr;
            iterations += 1;
        }

        Ok(r)
    }

    fn did_not_converge(&self, radius: T, iterations: usize) -> DistortionError {
        let radius = radius.to_f64().unwrap_or(f64::NAN);
        warn!(
            "Inverse distortion of radius {radius} with coefficients {:?} did not converge",
            self.coefficients
        );
        DistortionError::DidNotConverge { radius, iterations }
    }
}

impl<T> Default for Distortion<T>
where
    T: Real,
{
    fn default() -> Self {
        Self {
            coefficients: DEFAULT_COEFFICIENTS.iter().map(|k| T::literal(*k)).collect(),
        }
    }
}

impl<T> Display for Distortion<T>
where
    T: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str("{\n  coefficients: [")?;
        for (i, k) in self.coefficients.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}")?;
        }
        f.write_str("],\n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_coefficients() {
        let distortion = Distortion::<f32>::default();
        assert_eq!(distortion.coefficients(), &[0.441, 0.156]);
    }

    #[test]
    fn test_distortion_factor() {
        let distortion = Distortion::<f64>::default();
        assert_eq!(distortion.distortion_factor(0.0), 1.0);
        assert_relative_eq!(distortion.distortion_factor(1.0), 1.597, epsilon = 1e-12);
        assert_relative_eq!(
            distortion.distortion_factor(0.5),
            1.0 + 0.441 * 0.25 + 0.156 * 0.0625,
            epsilon = 1e-12
        );
        assert_relative_eq!(distortion.distort(0.5), 0.5 * (1.0 + 0.11025 + 0.00975));
    }

    #[test]
    fn test_empty_coefficients_do_not_distort() {
        let distortion = Distortion::<f64>::from_coefficients(&[]);
        for r in [0.0, 0.3, 1.0, 2.5] {
            assert_eq!(distortion.distortion_factor(r), 1.0);
            assert_eq!(distortion.distort(r), r);
            assert_relative_eq!(distortion.distort_inverse(r).unwrap(), r, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_inverse_round_trip() {
        let distortion = Distortion::<f64>::default();
        for i in 0..=100 {
            let r = f64::from(i) / 100.0;
            let inverse = distortion.distort_inverse(distortion.distort(r)).unwrap();
            assert!((inverse - r).abs() < 1e-3, "{r} -> {inverse}");
        }
    }

    #[test]
    fn test_inverse_round_trip_f32() {
        let distortion = Distortion::<f32>::default();
        for i in 0..=20 {
            let r = i as f32 / 20.0;
            let inverse = distortion.distort_inverse(distortion.distort(r)).unwrap();
            assert!((inverse - r).abs() < 1e-3, "{r} -> {inverse}");
        }
    }

    #[test]
    fn test_inverse_of_zero() {
        assert_eq!(Distortion::<f64>::default().distort_inverse(0.0), Ok(0.0));
    }

    #[test]
    fn test_inverse_reports_divergence() {
        let distortion = Distortion::from_coefficients(&[f64::NAN]);
        let result = distortion.distort_inverse(0.5);
        assert!(matches!(
            result,
            Err(DistortionError::DidNotConverge { radius, .. }) if radius == 0.5
        ));
    }

    #[test]
    fn test_inverse_rejects_non_finite_radius() {
        let distortion = Distortion::<f64>::default();
        for radius in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                distortion.distort_inverse(radius),
                Err(DistortionError::DidNotConverge { iterations: 0, .. })
            ));
        }
    }

    #[test]
    fn test_coefficients_are_copied() {
        let mut coefficients = [0.1, 0.2];
        let mut distortion = Distortion::<f64>::from_coefficients(&coefficients);
        coefficients[0] = 5.0;
        assert_eq!(distortion.coefficients(), &[0.1, 0.2]);

        let copy = distortion.clone();
        distortion.set_coefficients(&coefficients);
        assert_eq!(copy.coefficients(), &[0.1, 0.2]);
        assert_eq!(distortion.coefficients(), &[5.0, 0.2]);
    }

    #[test]
    fn test_equality() {
        let a = Distortion::<f64>::from_coefficients(&[0.441, 0.156]);
        assert_eq!(a, Distortion::default());
        assert_ne!(a, Distortion::from_coefficients(&[0.441]));
        assert_ne!(a, Distortion::from_coefficients(&[0.441, 0.156, 0.0]));
    }

    #[test]
    fn test_display() {
        let distortion = Distortion::<f32>::from_coefficients(&[0.25, -0.5]);
        assert_eq!(
            distortion.to_string(),
            "{\n  coefficients: [0.25, -0.5],\n}"
        );
        assert_eq!(
            Distortion::<f32>::from_coefficients(&[]).to_string(),
            "{\n  coefficients: [],\n}"
        );
    }

    #[test]
    fn test_error_message() {
        let error = DistortionError::DidNotConverge {
            radius: 2.0,
            iterations: 100,
        };
        assert_eq!(
            error.to_string(),
            "Inverse distortion of radius 2 did not converge after 100 iterations"
        );
    }
}
