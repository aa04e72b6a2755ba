use carry_math::distributions::{normal_cdf, normal_pdf};

use super::OptionGreeks;

/// Black (1976) price of an option on a lognormal forward.
///
/// # Example
///
/// ```rust
/// use carry_options::formulas::black_price;
///
/// let call = black_price(1.0, 1.0, 1.0, 0.2, true);
/// assert!((call - 0.0796557).abs() < 1e-7);
/// ```
#[must_use]
pub fn black_price(forward: f64, strike: f64, expiry: f64, volatility: f64, is_call: bool) -> f64 {
    black_greeks(forward, strike, expiry, volatility, is_call).price
}

/// Black price with delta, gamma, vega and theta.
///
/// A non-positive strike makes the call certain to be exercised; a
/// non-positive forward makes the put certain to be exercised. Zero time or
/// volatility returns the intrinsic value.
#[must_use]
pub fn black_greeks(forward: f64, strike: f64, expiry: f64, volatility: f64, is_call: bool) -> OptionGreeks {
    if strike <= 0.0 || forward <= 0.0 {
        return OptionGreeks::intrinsic(forward, strike, is_call);
    }
    let sqrt_t = expiry.max(0.0).sqrt();
    let std_dev = volatility * sqrt_t;
    if !(std_dev > 0.0) {
        return OptionGreeks::intrinsic(forward, strike, is_call);
    }
    let d1 = ((forward / strike).ln() + 0.5 * std_dev * std_dev) / std_dev;
    let d2 = d1 - std_dev;
    let pdf_d1 = normal_pdf(d1);
    let (price, delta) = if is_call {
        (forward * normal_cdf(d1) - strike * normal_cdf(d2), normal_cdf(d1))
    } else {
        (strike * normal_cdf(-d2) - forward * normal_cdf(-d1), -normal_cdf(-d1))
    };
    OptionGreeks {
        price,
        delta,
        gamma: pdf_d1 / (forward * std_dev),
        vega: forward * pdf_d1 * sqrt_t,
        theta: -forward * pdf_d1 * volatility / (2.0 * sqrt_t),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parity() {
        let (f, k, t, v) = (1.12, 1.16, 0.3, 0.05);
        let call = black_price(f, k, t, v, true);
        let put = black_price(f, k, t, v, false);
        assert_relative_eq!(call - put, f - k, epsilon = 1e-14);
    }

    #[test]
    fn test_greeks_match_finite_differences() {
        let (f, k, t, v) = (0.98, 1.0, 0.75, 0.25);
        let h = 1e-6;
        for is_call in [true, false] {
            let g = black_greeks(f, k, t, v, is_call);
            let p = |f: f64, t: f64, v: f64| black_price(f, k, t, v, is_call);
            assert!((g.delta - (p(f + h, t, v) - p(f - h, t, v)) / (2.0 * h)).abs() < 1e-8);
            assert!((g.vega - (p(f, t, v + h) - p(f, t, v - h)) / (2.0 * h)).abs() < 1e-8);
            assert!((g.theta + (p(f, t + h, v) - p(f, t - h, v)) / (2.0 * h)).abs() < 1e-8);
            let hg = 1e-4;
            let fd_gamma = (p(f + hg, t, v) - 2.0 * p(f, t, v) + p(f - hg, t, v)) / (hg * hg);
            assert!((g.gamma - fd_gamma).abs() < 1e-5);
        }
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(black_price(1.1, 1.0, 0.0, 0.2, true), 1.1 - 1.0);
        assert_eq!(black_price(1.1, 1.0, 1.0, 0.0, false), 0.0);
        assert_relative_eq!(black_price(1.1, -0.5, 1.0, 0.2, true), 1.6, epsilon = 1e-15);
        assert_eq!(black_greeks(1.1, 1.0, 0.0, 0.2, true).delta, 1.0);
        let deep = black_price(1.0, 100.0, 1.0, 0.1, true);
        assert!((0.0..1e-12).contains(&deep));
        assert!(!black_price(1e-12, 1e12, 30.0, 3.0, true).is_nan());
    }
}
