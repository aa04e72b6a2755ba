//! Brent's root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Brent's root-finding algorithm.
///
/// Requires `f(a) * f(b) <= 0`. Converges when the bracket half-width falls
/// below the tolerance (plus a relative machine-precision term) or the
/// residual is exactly zero.
///
/// # Example
///
/// ```rust
/// use carry_math::solvers::{brent, SolverConfig};
///
/// let f = |x: f64| x * x * x - x - 2.0;
/// let result = brent(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((f(result.root)).abs() < 1e-9);
/// ```
#[allow(clippy::many_single_char_names)]
pub fn brent<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut a = a;
    let mut b = b;
    let mut fa = f(a);
    let mut fb = f(b);

    if fa * fb > 0.0 || !fa.is_finite() || !fb.is_finite() {
        return Err(MathError::InvalidBracket { a, b, fa, fb });
    }

    let mut c = b;
    let mut fc = fb;
    let mut d = b - a;
    let mut e = d;

    for iteration in 0..config.max_iterations {
        if (fb > 0.0 && fc > 0.0) || (fb < 0.0 && fc < 0.0) {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * config.tolerance;
        let xm = 0.5 * (c - b);
        if xm.abs() <= tol || fb == 0.0 {
            log::trace!("brent converged to {b} after {iteration} iterations");
            return Ok(SolverResult {
                root: b,
                iterations: iteration,
                residual: fb,
            });
        }

        if e.abs() >= tol && fa.abs() > fb.abs() {
            let s = fb / fa;
            let (mut p, mut q) = if a == c {
                (2.0 * xm * s, 1.0 - s)
            } else {
                let q = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * xm * q * (q - r) - (b - a) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };
            if p > 0.0 {
                q = -q;
            }
            p = p.abs();
            let min1 = 3.0 * xm * q - (tol * q).abs();
            let min2 = (e * q).abs();
            if 2.0 * p < min1.min(min2) {
                // Interpolation accepted
                e = d;
                d = p / q;
            } else {
                d = xm;
                e = d;
            }
        } else {
            d = xm;
            e = d;
        }

        a = b;
        fa = fb;
        if d.abs() > tol {
            b += d;
        } else {
            b += tol.copysign(xm);
        }
        fb = f(b);
    }

    Err(MathError::convergence_failed(config.max_iterations, fb.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;
        let result = brent(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_cubic() {
        let f = |x: f64| x * x * x - x - 2.0;
        let result = brent(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
        assert_relative_eq!(result.root, 1.521_379_706_804_568, epsilon = 1e-10);
    }

    #[test]
    fn test_sin() {
        let f = |x: f64| x.sin();
        let result = brent(f, 3.0, 4.0, &SolverConfig::default()).unwrap();
        assert_relative_eq!(result.root, std::f64::consts::PI, epsilon = 1e-10);
    }

    #[test]
    fn test_invalid_bracket() {
        let f = |x: f64| x * x - 2.0;
        assert!(brent(f, 2.0, 3.0, &SolverConfig::default()).is_err());
    }

    #[test]
    fn test_iteration_cap_is_an_error() {
        let f = |x: f64| x.powi(3) - 1e-3;
        let config = SolverConfig::new(1e-15, 2);
        let err = brent(f, -10.0, 10.0, &config).unwrap_err();
        assert!(matches!(err, MathError::ConvergenceFailed { iterations: 2, .. }));
    }

    #[test]
    fn test_converges_quickly() {
        let f = |x: f64| x * x - 2.0;
        let result = brent(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
        assert!(result.iterations < 20);
    }
}
