//! Closed-form option formulas on a forward.
//!
//! All prices are undiscounted. Greeks are with respect to the forward
//! (delta, gamma), the volatility (vega) and the time to expiry (theta, as
//! `−∂price/∂T`).

mod black;
mod normal;
mod sabr;

pub use black::{black_greeks, black_price};
pub use normal::{normal_greeks, normal_price};
pub use sabr::{hagan_volatility, hagan_volatility_adjoint, SabrParameters, SabrVolatility, SABR_STRIKE_FLOOR};

use serde::{Deserialize, Serialize};

/// Price and first-order Greeks of an option.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OptionGreeks {
    /// Option value.
    pub price: f64,
    /// `∂price/∂forward`.
    pub delta: f64,
    /// `∂²price/∂forward²`.
    pub gamma: f64,
    /// `∂price/∂volatility`.
    pub vega: f64,
    /// `−∂price/∂expiry`.
    pub theta: f64,
}

impl OptionGreeks {
    /// Every field multiplied by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            price: self.price * factor,
            delta: self.delta * factor,
            gamma: self.gamma * factor,
            vega: self.vega * factor,
            theta: self.theta * factor,
        }
    }

    pub(crate) fn intrinsic(forward: f64, strike: f64, is_call: bool) -> Self {
        let (price, delta) = if is_call {
            ((forward - strike).max(0.0), if forward > strike { 1.0 } else { 0.0 })
        } else {
            ((strike - forward).max(0.0), if forward < strike { -1.0 } else { 0.0 })
        };
        Self {
            price,
            delta,
            ..Self::default()
        }
    }
}
