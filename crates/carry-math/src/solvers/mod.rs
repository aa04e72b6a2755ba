//! Root-finding algorithms.
//!
//! - [`brent`]: bracketing solver combining bisection, secant and inverse
//!   quadratic interpolation
//! - [`find_bracket`]: geometric expansion of an initial interval until the
//!   function changes sign
//!
//! Every solver takes a [`SolverConfig`] whose `max_iterations` is a hard cap:
//! running out of iterations is reported as
//! [`MathError::ConvergenceFailed`](crate::error::MathError::ConvergenceFailed),
//! never as a partially converged root.
//!
//! # Example
//!
//! ```rust
//! use carry_math::solvers::{brent, find_bracket, SolverConfig};
//!
//! let f = |x: f64| x.exp() - 2.0;
//! let config = SolverConfig::default();
//! let (a, b) = find_bracket(f, -0.01, 0.01, &config).unwrap();
//! let result = brent(f, a, b, &config).unwrap();
//! assert!((result.root - 2.0_f64.ln()).abs() < 1e-10);
//! ```

mod brent;

pub use brent::brent;

use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

const BRACKET_EXPANSION: f64 = 1.6;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Tolerance on the root location.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a root-finding operation.
#[derive(Debug, Clone, Copy)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Function value at the root.
    pub residual: f64,
}

/// Expands `[a, b]` geometrically until `f` changes sign.
///
/// The side with the smaller absolute value is moved, up to
/// `config.max_iterations` times.
pub fn find_bracket<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    if a == b {
        return Err(MathError::invalid_input("bracket must have distinct ends"));
    }
    let (mut a, mut b) = if a < b { (a, b) } else { (b, a) };
    let mut fa = f(a);
    let mut fb = f(b);

    for _ in 0..config.max_iterations {
        if !fa.is_finite() || !fb.is_finite() {
            return Err(MathError::InvalidBracket { a, b, fa, fb });
        }
        if fa * fb <= 0.0 {
            return Ok((a, b));
        }
        if fa.abs() < fb.abs() {
            a += BRACKET_EXPANSION * (a - b);
            fa = f(a);
        } else {
            b += BRACKET_EXPANSION * (b - a);
            fb = f(b);
        }
    }

    Err(MathError::InvalidBracket { a, b, fa, fb })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_bracket_expands_right() {
        let f = |x: f64| x - 0.35;
        let (a, b) = find_bracket(f, -0.01, 0.01, &SolverConfig::default()).unwrap();
        assert!(a < 0.35 && b > 0.35);
    }

    #[test]
    fn test_find_bracket_expands_left() {
        let f = |x: f64| x + 0.2;
        let (a, b) = find_bracket(f, -0.01, 0.01, &SolverConfig::default()).unwrap();
        assert!(a < -0.2 && b > -0.2);
    }

    #[test]
    fn test_find_bracket_gives_up() {
        let f = |x: f64| x * x + 1.0;
        let config = SolverConfig::default().with_max_iterations(10);
        assert!(matches!(
            find_bracket(f, -0.01, 0.01, &config),
            Err(MathError::InvalidBracket { .. })
        ));
    }
}
