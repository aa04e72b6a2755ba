use carry_math::interpolation::{Interpolator, LinearInterpolator};
use serde::{Deserialize, Serialize};

use crate::error::{OptionsError, OptionsResult};
use crate::formulas::SabrParameters;

/// SABR parameters by expiry, linearly interpolated with flat extrapolation.
///
/// # Example
///
/// ```rust
/// use carry_options::formulas::SabrParameters;
/// use carry_options::volatility::SabrSurface;
///
/// let surface = SabrSurface::new(
///     vec![0.25, 1.0],
///     vec![
///         SabrParameters::new(0.04, 0.5, -0.2, 0.4).unwrap(),
///         SabrParameters::new(0.06, 0.5, -0.3, 0.5).unwrap(),
///     ],
/// )
/// .unwrap();
/// let mid = surface.parameters(0.625).unwrap();
/// assert!((mid.alpha - 0.05).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SabrSurface {
    alpha: LinearInterpolator,
    beta: LinearInterpolator,
    rho: LinearInterpolator,
    nu: LinearInterpolator,
}

impl SabrSurface {
    /// Surface through `parameters[i]` at `expiries[i]`.
    pub fn new(expiries: Vec<f64>, parameters: Vec<SabrParameters>) -> OptionsResult<Self> {
        if expiries.len() != parameters.len() {
            return Err(OptionsError::invalid_option(format!(
                "SABR surface has {} expiries and {} parameter sets",
                expiries.len(),
                parameters.len()
            )));
        }
        let column = |f: fn(&SabrParameters) -> f64| -> OptionsResult<LinearInterpolator> {
            Ok(LinearInterpolator::new(expiries.clone(), parameters.iter().map(f).collect())?)
        };
        Ok(Self {
            alpha: column(|p| p.alpha)?,
            beta: column(|p| p.beta)?,
            rho: column(|p| p.rho)?,
            nu: column(|p| p.nu)?,
        })
    }

    /// The same parameters at every expiry.
    pub fn constant(parameters: SabrParameters) -> OptionsResult<Self> {
        Self::new(vec![0.0], vec![parameters])
    }

    /// Expiry nodes.
    #[must_use]
    pub fn expiries(&self) -> &[f64] {
        self.alpha.xs()
    }

    /// Interpolated parameters at `expiry`.
    pub fn parameters(&self, expiry: f64) -> OptionsResult<SabrParameters> {
        SabrParameters::new(
            self.alpha.interpolate(expiry)?,
            self.beta.interpolate(expiry)?,
            self.rho.interpolate(expiry)?,
            self.nu.interpolate(expiry)?,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_outside_nodes() {
        let p0 = SabrParameters::new(0.04, 0.5, -0.2, 0.4).unwrap();
        let p1 = SabrParameters::new(0.06, 0.5, -0.3, 0.5).unwrap();
        let surface = SabrSurface::new(vec![0.25, 1.0], vec![p0, p1]).unwrap();
        assert_eq!(surface.parameters(0.0).unwrap(), p0);
        assert_eq!(surface.parameters(3.0).unwrap(), p1);
    }

    #[test]
    fn test_mismatched_lengths() {
        let p = SabrParameters::new(0.04, 0.5, -0.2, 0.4).unwrap();
        assert!(SabrSurface::new(vec![0.25, 1.0], vec![p]).is_err());
        assert!(SabrSurface::new(vec![], vec![]).is_err());
    }

    #[test]
    fn test_constant() {
        let p = SabrParameters::new(0.04, 0.5, -0.2, 0.4).unwrap();
        let surface = SabrSurface::constant(p).unwrap();
        assert_eq!(surface.parameters(7.0).unwrap(), p);
    }
}
