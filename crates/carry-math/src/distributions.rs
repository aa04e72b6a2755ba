//! Standard normal distribution.
//!
//! Uses the complementary error function from `statrs`, which stays accurate
//! deep in the tails where `1 - Φ(x)` would cancel.

use statrs::function::erf::{erfc, erfc_inv};
use std::f64::consts::{FRAC_1_SQRT_2, SQRT_2};

const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Standard normal cumulative distribution Φ(x).
#[must_use]
pub fn normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x * FRAC_1_SQRT_2)
}

/// Standard normal density φ(x).
#[must_use]
pub fn normal_pdf(x: f64) -> f64 {
    INV_SQRT_2PI * (-0.5 * x * x).exp()
}

/// Inverse of the standard normal cumulative distribution.
///
/// Returns `-inf`/`+inf` at 0 and 1.
#[must_use]
pub fn normal_inverse_cdf(p: f64) -> f64 {
    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }
    -SQRT_2 * erfc_inv(2.0 * p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cdf_values() {
        assert_relative_eq!(normal_cdf(0.0), 0.5, epsilon = 1e-15);
        assert_relative_eq!(normal_cdf(1.96), 0.975_002_104_851_780, max_relative = 1e-11);
        assert_relative_eq!(normal_cdf(-1.96), 1.0 - 0.975_002_104_851_780, max_relative = 1e-9);
        assert!(normal_cdf(-40.0) >= 0.0);
        assert_eq!(normal_cdf(40.0), 1.0);
    }

    #[test]
    fn test_pdf_is_cdf_derivative() {
        let h = 1e-6;
        for x in [-2.0, -0.3, 0.0, 0.8, 3.0] {
            let fd = (normal_cdf(x + h) - normal_cdf(x - h)) / (2.0 * h);
            assert_relative_eq!(normal_pdf(x), fd, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_inverse_round_trip() {
        for p in [1e-6, 0.01, 0.3, 0.5, 0.9, 0.999] {
            assert_relative_eq!(normal_cdf(normal_inverse_cdf(p)), p, max_relative = 1e-10);
        }
        assert_eq!(normal_inverse_cdf(0.0), f64::NEG_INFINITY);
    }
}
