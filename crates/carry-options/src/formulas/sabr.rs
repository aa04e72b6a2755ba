//! Hagan et al. (2002) SABR implied Black volatility.

use carry_math::dual::Dual;
use serde::{Deserialize, Serialize};

use crate::error::{OptionsError, OptionsResult};

/// Strikes and forwards below this level are floored before the expansion.
pub const SABR_STRIKE_FLOOR: f64 = 1e-6;

/// Below this `|z|` the ratio `z / x(z)` uses its Taylor expansion.
const SMALL_Z: f64 = 1e-6;

/// SABR parameters for one expiry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SabrParameters {
    /// Initial volatility level.
    pub alpha: f64,
    /// CEV exponent in `[0, 1]`.
    pub beta: f64,
    /// Forward/volatility correlation in `(-1, 1)`.
    pub rho: f64,
    /// Volatility of volatility.
    pub nu: f64,
}

impl SabrParameters {
    /// Validated parameters.
    pub fn new(alpha: f64, beta: f64, rho: f64, nu: f64) -> OptionsResult<Self> {
        if !(alpha > 0.0) || !alpha.is_finite() {
            return Err(OptionsError::invalid_option(format!("SABR alpha must be positive, got {alpha}")));
        }
        if !(0.0..=1.0).contains(&beta) {
            return Err(OptionsError::invalid_option(format!("SABR beta must lie in [0, 1], got {beta}")));
        }
        if !(rho > -1.0 && rho < 1.0) {
            return Err(OptionsError::invalid_option(format!("SABR rho must lie in (-1, 1), got {rho}")));
        }
        if !(nu >= 0.0) || !nu.is_finite() {
            return Err(OptionsError::invalid_option(format!("SABR nu must be non-negative, got {nu}")));
        }
        Ok(Self { alpha, beta, rho, nu })
    }
}

/// Implied Black volatility and its first derivatives.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SabrVolatility {
    /// Implied Black volatility.
    pub volatility: f64,
    /// `∂σ/∂forward`.
    pub forward_derivative: f64,
    /// `∂σ/∂alpha`.
    pub alpha_derivative: f64,
    /// `∂σ/∂rho`.
    pub rho_derivative: f64,
    /// `∂σ/∂nu`.
    pub nu_derivative: f64,
}

/// Implied Black volatility for a strike.
#[must_use]
pub fn hagan_volatility(parameters: &SabrParameters, forward: f64, strike: f64, expiry: f64) -> f64 {
    hagan_volatility_adjoint(parameters, forward, strike, expiry).volatility
}

/// Implied Black volatility with derivatives in forward, alpha, rho and nu.
///
/// # Example
///
/// ```rust
/// use carry_options::formulas::{hagan_volatility_adjoint, SabrParameters};
///
/// let p = SabrParameters::new(0.05, 0.5, -0.25, 0.5).unwrap();
/// let v = hagan_volatility_adjoint(&p, 0.03, 0.03, 2.0);
/// assert!(v.volatility > 0.0);
/// assert!(v.alpha_derivative > 0.0);
/// ```
#[must_use]
pub fn hagan_volatility_adjoint(parameters: &SabrParameters, forward: f64, strike: f64, expiry: f64) -> SabrVolatility {
    let strike = floored("strike", strike);
    let forward = floored("forward", forward);
    let beta = parameters.beta;
    let omb = 1.0 - beta;

    let f = Dual::<4>::variable(forward, 0);
    let alpha = Dual::<4>::variable(parameters.alpha, 1);
    let rho = Dual::<4>::variable(parameters.rho, 2);
    let nu = Dual::<4>::variable(parameters.nu, 3);

    let fk = f * strike;
    let fk_half = fk.powf(omb / 2.0);
    let log_fk = (f / strike).ln();
    let log2 = log_fk * log_fk;
    let denominator = fk_half * (log2 * (omb * omb / 24.0) + log2 * log2 * (omb.powi(4) / 1920.0) + 1.0);

    let z = nu / alpha * fk_half * log_fk;
    let z_over_x = if z.value.abs() < SMALL_Z {
        -(rho * z) * 0.5 + (rho * rho * (-3.0) + 2.0) * z * z / 12.0 + 1.0
    } else {
        let x = (((z * z - rho * z * 2.0 + 1.0).sqrt() + z - rho) / (-rho + 1.0)).ln();
        z / x
    };

    let correction = alpha * alpha * (omb * omb / 24.0) / fk.powf(omb)
        + rho * nu * alpha * (beta / 4.0) / fk_half
        + (rho * rho * (-3.0) + 2.0) * nu * nu / 24.0;
    let vol = alpha / denominator * z_over_x * (correction * expiry.max(0.0) + 1.0);

    SabrVolatility {
        volatility: vol.value,
        forward_derivative: vol.gradient[0],
        alpha_derivative: vol.gradient[1],
        rho_derivative: vol.gradient[2],
        nu_derivative: vol.gradient[3],
    }
}

fn floored(what: &str, value: f64) -> f64 {
    if value < SABR_STRIKE_FLOOR {
        log::warn!("SABR {what} {value} floored at {SABR_STRIKE_FLOOR}");
        SABR_STRIKE_FLOOR
    } else {
        value
    }
}
