use carry_math::distributions::{normal_cdf, normal_pdf};

use super::OptionGreeks;

/// Bachelier price of an option on a normally distributed forward.
#[must_use]
pub fn normal_price(forward: f64, strike: f64, expiry: f64, volatility: f64, is_call: bool) -> f64 {
    normal_greeks(forward, strike, expiry, volatility, is_call).price
}

/// Bachelier price with delta, gamma, vega and theta.
#[must_use]
pub fn normal_greeks(forward: f64, strike: f64, expiry: f64, volatility: f64, is_call: bool) -> OptionGreeks {
    let sqrt_t = expiry.max(0.0).sqrt();
    let std_dev = volatility * sqrt_t;
    if !(std_dev > 0.0) {
        return OptionGreeks::intrinsic(forward, strike, is_call);
    }
    let d = (forward - strike) / std_dev;
    let pdf = normal_pdf(d);
    let (price, delta) = if is_call {
        ((forward - strike) * normal_cdf(d) + std_dev * pdf, normal_cdf(d))
    } else {
        ((strike - forward) * normal_cdf(-d) + std_dev * pdf, -normal_cdf(-d))
    };
    OptionGreeks {
        price,
        delta,
        gamma: pdf / std_dev,
        vega: sqrt_t * pdf,
        theta: -volatility * pdf / (2.0 * sqrt_t),
    }
}
