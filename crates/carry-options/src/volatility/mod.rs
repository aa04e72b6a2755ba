//! Volatility models for options on futures.
//!
//! [`VolatilityModel`] is a closed set: every pricing call matches on it, so
//! adding a model means handling it in each place the compiler points to.

mod sabr_surface;
mod sensitivity;

pub use sabr_surface::SabrSurface;
pub use sensitivity::VolatilitySensitivity;

use carry_futures::hull_white::HullWhiteParameters;
use carry_math::interpolation::GridSurface;
use serde::{Deserialize, Serialize};

use crate::error::{OptionsError, OptionsResult};
use crate::formulas::{hagan_volatility_adjoint, SabrVolatility};

/// Volatility description used to price an option.
///
/// Surfaces are indexed by `(expiry, coordinate)` where the coordinate is the
/// strike or a moneyness, as named by the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VolatilityModel {
    /// One lognormal volatility for every expiry and strike.
    BlackFlat {
        /// Black volatility.
        volatility: f64,
    },
    /// Lognormal volatility by expiry and strike.
    BlackExpiryStrike(GridSurface),
    /// Lognormal volatility by expiry and `ln(K/F)`.
    BlackExpiryLogMoneyness(GridSurface),
    /// One normal volatility for every expiry and strike.
    NormalFlat {
        /// Bachelier volatility.
        volatility: f64,
    },
    /// Normal volatility by expiry and strike.
    NormalExpiryStrike(GridSurface),
    /// Normal volatility by expiry and simple moneyness.
    NormalExpirySimpleMoneyness {
        /// Volatility surface.
        surface: GridSurface,
        /// Moneyness `K − F` in price terms when true, `F − K` (rate terms) otherwise.
        on_price: bool,
    },
    /// SABR smile by expiry.
    Sabr(SabrSurface),
    /// One-factor Hull-White model.
    HullWhite(HullWhiteParameters),
}

/// Volatility read from a model at one option, with its forward slope.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SmilePoint {
    pub volatility: f64,
    /// `∂σ/∂forward`.
    pub forward_slope: f64,
    pub coordinate: f64,
    pub sabr: Option<SabrVolatility>,
}

impl SmilePoint {
    fn flat(volatility: f64, coordinate: f64) -> Self {
        Self {
            volatility,
            forward_slope: 0.0,
            coordinate,
            sabr: None,
        }
    }
}

impl VolatilityModel {
    /// Short name used in messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::BlackFlat { .. } => "BlackFlat",
            Self::BlackExpiryStrike(_) => "BlackExpiryStrike",
            Self::BlackExpiryLogMoneyness(_) => "BlackExpiryLogMoneyness",
            Self::NormalFlat { .. } => "NormalFlat",
            Self::NormalExpiryStrike(_) => "NormalExpiryStrike",
            Self::NormalExpirySimpleMoneyness { .. } => "NormalExpirySimpleMoneyness",
            Self::Sabr(_) => "Sabr",
            Self::HullWhite(_) => "HullWhite",
        }
    }

    /// True for the models quoted as lognormal (Black) volatilities.
    #[must_use]
    pub fn is_lognormal(&self) -> bool {
        matches!(
            self,
            Self::BlackFlat { .. } | Self::BlackExpiryStrike(_) | Self::BlackExpiryLogMoneyness(_) | Self::Sabr(_)
        )
    }

    /// True for the models quoted as normal (Bachelier) volatilities.
    #[must_use]
    pub fn is_normal(&self) -> bool {
        matches!(
            self,
            Self::NormalFlat { .. } | Self::NormalExpiryStrike(_) | Self::NormalExpirySimpleMoneyness { .. }
        )
    }

    /// Volatility applied to an option of `strike` on `forward` expiring at `expiry`.
    ///
    /// Hull-White has no volatility quote of this form.
    pub fn volatility(&self, expiry: f64, strike: f64, forward: f64) -> OptionsResult<f64> {
        Ok(self.smile(expiry, strike, forward)?.volatility)
    }

    /// `∂σ/∂forward` at fixed strike.
    pub fn volatility_forward_derivative(&self, expiry: f64, strike: f64, forward: f64) -> OptionsResult<f64> {
        Ok(self.smile(expiry, strike, forward)?.forward_slope)
    }

    pub(crate) fn smile(&self, expiry: f64, strike: f64, forward: f64) -> OptionsResult<SmilePoint> {
        match self {
            Self::BlackFlat { volatility } | Self::NormalFlat { volatility } => {
                Ok(SmilePoint::flat(*volatility, strike))
            }
            Self::BlackExpiryStrike(surface) | Self::NormalExpiryStrike(surface) => {
                Ok(SmilePoint::flat(surface.value(expiry, strike)?, strike))
            }
            Self::BlackExpiryLogMoneyness(surface) => {
                if !(strike > 0.0 && forward > 0.0) {
                    return Err(OptionsError::invalid_option(format!(
                        "log-moneyness needs a positive strike and forward, got {strike} and {forward}"
                    )));
                }
                let moneyness = (strike / forward).ln();
                let (_, slope) = surface.gradient(expiry, moneyness)?;
                Ok(SmilePoint {
                    volatility: surface.value(expiry, moneyness)?,
                    forward_slope: -slope / forward,
                    coordinate: moneyness,
                    sabr: None,
                })
            }
            Self::NormalExpirySimpleMoneyness { surface, on_price } => {
                let (moneyness, sign) = if *on_price {
                    (strike - forward, -1.0)
                } else {
                    (forward - strike, 1.0)
                };
                let (_, slope) = surface.gradient(expiry, moneyness)?;
                Ok(SmilePoint {
                    volatility: surface.value(expiry, moneyness)?,
                    forward_slope: sign * slope,
                    coordinate: moneyness,
                    sabr: None,
                })
            }
            Self::Sabr(surface) => {
                let parameters = surface.parameters(expiry)?;
                let sabr = hagan_volatility_adjoint(&parameters, forward, strike, expiry);
                Ok(SmilePoint {
                    volatility: sabr.volatility,
                    forward_slope: sabr.forward_derivative,
                    coordinate: strike,
                    sabr: Some(sabr),
                })
            }
            Self::HullWhite(_) => Err(OptionsError::unsupported_model(self.name(), "volatility quote")),
        }
    }
}
