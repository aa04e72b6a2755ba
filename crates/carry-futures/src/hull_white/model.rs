use super::HullWhiteParameters;

/// Closed-form Hull-White quantities with their volatility adjoints.
///
/// Stateless; every method takes the parameters explicitly.
#[derive(Debug, Clone, Copy, Default)]
pub struct HullWhiteModel;

/// Index of the first volatility time at or after `t`, starting from 1.
fn period_at_or_after(times: &[f64], t: f64) -> usize {
    let mut index = 1;
    while index < times.len() - 1 && t > times[index] {
        index += 1;
    }
    index
}

/// Index of the first volatility time strictly after `t`.
fn period_after(times: &[f64], t: f64) -> usize {
    times.partition_point(|&x| x <= t).min(times.len() - 1)
}

struct AlphaGrid {
    factor2: f64,
    // (volatility index, e^{2a s_{k+1}} − e^{2a s_k})
    terms: Vec<(usize, f64)>,
    last_index: usize,
}

impl HullWhiteModel {
    /// Creates the model.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn convexity_terms(params: &HullWhiteParameters, t0: f64, t2: f64) -> Vec<(usize, f64)> {
        let a = params.mean_reversion();
        let times = params.volatility_time();
        let index_t0 = period_at_or_after(times, t0);
        let mut s: Vec<f64> = times[..index_t0].to_vec();
        s.push(t0);
        (0..index_t0)
            .map(|k| {
                let term = ((a * s[k + 1]).exp() - (a * s[k]).exp())
                    * (2.0 - (-a * (t2 - s[k + 1])).exp() - (-a * (t2 - s[k])).exp());
                (k, term)
            })
            .collect()
    }

    /// Futures convexity factor γ for a futures fixing at `t0` on the period `t1..t2`.
    ///
    /// The futures rate is `γ·F − (1 − γ)/δ` in price terms.
    #[must_use]
    pub fn futures_convexity_factor(&self, params: &HullWhiteParameters, t0: f64, t1: f64, t2: f64) -> f64 {
        self.futures_convexity_factor_adjoint(params, t0, t1, t2).0
    }

    /// γ and `∂γ/∂σ_k` for every volatility.
    #[must_use]
    pub fn futures_convexity_factor_adjoint(
        &self,
        params: &HullWhiteParameters,
        t0: f64,
        t1: f64,
        t2: f64,
    ) -> (f64, Vec<f64>) {
        let a = params.mean_reversion();
        let sigma = params.volatility();
        let factor1 = (-a * t1).exp() - (-a * t2).exp();
        let numerator = 2.0 * a * a * a;
        let terms = Self::convexity_terms(params, t0, t2);
        let factor2: f64 = terms.iter().map(|&(k, term)| sigma[k] * sigma[k] * term).sum();
        let factor = (factor1 / numerator * factor2).exp();

        let factor2_bar = factor1 / numerator * factor;
        let mut derivatives = vec![0.0; sigma.len()];
        for (k, term) in terms {
            derivatives[k] = 2.0 * sigma[k] * term * factor2_bar;
        }
        (factor, derivatives)
    }

    fn alpha_grid(params: &HullWhiteParameters, start_expiry: f64, end_expiry: f64) -> AlphaGrid {
        let a = params.mean_reversion();
        let times = params.volatility_time();
        let sigma = params.volatility();
        let index_start = period_after(times, start_expiry).max(1);
        let index_end = period_after(times, end_expiry).max(index_start);

        let mut s = Vec::with_capacity(index_end - index_start + 2);
        s.push(start_expiry);
        s.extend_from_slice(&times[index_start..index_end]);
        s.push(end_expiry);

        let exp2as: Vec<f64> = s.iter().map(|&x| (2.0 * a * x).exp()).collect();
        let terms: Vec<(usize, f64)> = (0..s.len() - 1)
            .map(|k| (k + index_start - 1, exp2as[k + 1] - exp2as[k]))
            .collect();
        let factor2 = terms.iter().map(|&(i, d)| sigma[i] * sigma[i] * d).sum();
        AlphaGrid {
            factor2,
            terms,
            last_index: index_end - 1,
        }
    }

    /// Standard deviation α of the log zero-coupon bond `P(·, bond_maturity)/P(·, numeraire_time)`
    /// accumulated between `start_expiry` and `end_expiry`.
    #[must_use]
    pub fn alpha(
        &self,
        params: &HullWhiteParameters,
        start_expiry: f64,
        end_expiry: f64,
        numeraire_time: f64,
        bond_maturity: f64,
    ) -> f64 {
        let a = params.mean_reversion();
        let factor1 = (-a * numeraire_time).exp() - (-a * bond_maturity).exp();
        let numerator = 2.0 * a * a * a;
        let grid = Self::alpha_grid(params, start_expiry, end_expiry);
        factor1 * (grid.factor2 / numerator).sqrt()
    }

    /// α and `∂α/∂σ_k` for every volatility.
    #[must_use]
    pub fn alpha_adjoint(
        &self,
        params: &HullWhiteParameters,
        start_expiry: f64,
        end_expiry: f64,
        numeraire_time: f64,
        bond_maturity: f64,
    ) -> (f64, Vec<f64>) {
        let a = params.mean_reversion();
        let sigma = params.volatility();
        let factor1 = (-a * numeraire_time).exp() - (-a * bond_maturity).exp();
        let numerator = 2.0 * a * a * a;
        let grid = Self::alpha_grid(params, start_expiry, end_expiry);
        let sqrt_factor2_num = (grid.factor2 / numerator).sqrt();
        let alpha = factor1 * sqrt_factor2_num;

        let mut derivatives = vec![0.0; sigma.len()];
        if sqrt_factor2_num > 0.0 {
            let factor2_bar = factor1 / sqrt_factor2_num / 2.0 / numerator;
            for (i, d) in grid.terms {
                derivatives[i] += 2.0 * sigma[i] * d * factor2_bar;
            }
        }
        (alpha, derivatives)
    }

    /// `∂α/∂end_expiry`, used for time decay.
    #[must_use]
    pub fn alpha_end_expiry_derivative(
        &self,
        params: &HullWhiteParameters,
        start_expiry: f64,
        end_expiry: f64,
        numeraire_time: f64,
        bond_maturity: f64,
    ) -> f64 {
        let a = params.mean_reversion();
        let factor1 = (-a * numeraire_time).exp() - (-a * bond_maturity).exp();
        let numerator = 2.0 * a * a * a;
        let grid = Self::alpha_grid(params, start_expiry, end_expiry);
        let sqrt_factor2_num = (grid.factor2 / numerator).sqrt();
        if sqrt_factor2_num <= 0.0 {
            return 0.0;
        }
        let sigma_end = params.volatility()[grid.last_index];
        let factor2_dot = sigma_end * sigma_end * 2.0 * a * (2.0 * a * end_expiry).exp();
        factor1 / (2.0 * sqrt_factor2_num) * factor2_dot / numerator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params() -> HullWhiteParameters {
        HullWhiteParameters::new(0.01, vec![0.01, 0.011, 0.012, 0.013, 0.014], vec![0.5, 1.0, 2.0, 5.0]).unwrap()
    }

    #[test]
    fn test_constant_volatility_convexity_closed_form() {
        let a = 0.05;
        let sigma = 0.01;
        let p = HullWhiteParameters::constant(a, sigma).unwrap();
        let (t0, t1, t2) = (1.2, 1.25, 1.5);
        let factor1 = (-a * t1).exp() - (-a * t2).exp();
        let factor2 = sigma * sigma
            * ((a * t0).exp() - 1.0)
            * (2.0 - (-a * (t2 - t0)).exp() - (-a * t2).exp());
        let expected = (factor1 * factor2 / (2.0 * a * a * a)).exp();
        assert_relative_eq!(HullWhiteModel.futures_convexity_factor(&p, t0, t1, t2), expected, epsilon = 1e-15);
        assert!(expected > 1.0);
    }

    #[test]
    fn test_convexity_adjoint_matches_bumps() {
        let p = params();
        let (gamma, derivatives) = HullWhiteModel.futures_convexity_factor_adjoint(&p, 1.5, 1.6, 1.85);
        let h = 1e-7;
        for (k, d) in derivatives.iter().enumerate() {
            let up = HullWhiteModel.futures_convexity_factor(&p.with_volatility_shift(k, h).unwrap(), 1.5, 1.6, 1.85);
            let down = HullWhiteModel.futures_convexity_factor(&p.with_volatility_shift(k, -h).unwrap(), 1.5, 1.6, 1.85);
            assert_relative_eq!(*d, (up - down) / (2.0 * h), epsilon = 1e-8);
        }
        assert_eq!(derivatives[3], 0.0);
        assert!(gamma > 1.0);
    }

    #[test]
    fn test_alpha_adjoint_matches_bumps() {
        let p = params();
        let (alpha, derivatives) = HullWhiteModel.alpha_adjoint(&p, 0.0, 3.0, 3.1, 8.0);
        assert_relative_eq!(alpha, HullWhiteModel.alpha(&p, 0.0, 3.0, 3.1, 8.0), epsilon = 1e-15);
        let h = 1e-7;
        for (k, d) in derivatives.iter().enumerate() {
            let up = HullWhiteModel.alpha(&p.with_volatility_shift(k, h).unwrap(), 0.0, 3.0, 3.1, 8.0);
            let down = HullWhiteModel.alpha(&p.with_volatility_shift(k, -h).unwrap(), 0.0, 3.0, 3.1, 8.0);
            assert_relative_eq!(*d, (up - down) / (2.0 * h), epsilon = 1e-8);
        }
        assert_eq!(derivatives[4], 0.0);
    }

    #[test]
    fn test_alpha_time_derivative_matches_bump() {
        let p = params();
        let h = 1e-6;
        for theta in [0.3, 1.7, 6.0] {
            let up = HullWhiteModel.alpha(&p, 0.0, theta + h, 6.5, 7.0);
            let down = HullWhiteModel.alpha(&p, 0.0, theta - h, 6.5, 7.0);
            let analytic = HullWhiteModel.alpha_end_expiry_derivative(&p, 0.0, theta, 6.5, 7.0);
            assert_relative_eq!(analytic, (up - down) / (2.0 * h), epsilon = 1e-8);
        }
    }

    #[test]
    fn test_alpha_over_empty_interval_is_zero() {
        let p = params();
        assert_eq!(HullWhiteModel.alpha(&p, 0.0, 0.0, 1.0, 2.0), 0.0);
        let (_, d) = HullWhiteModel.alpha_adjoint(&p, 0.0, 0.0, 1.0, 2.0);
        assert!(d.iter().all(|x| *x == 0.0));
    }
}
