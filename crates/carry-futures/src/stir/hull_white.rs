use carry_curves::sensitivity::MultipleCurrencyCurveSensitivity;

use super::discounting::InterestRateFutureDiscountingMethod;
use super::security::{InterestRateFutureSecurity, InterestRateFutureTransaction};
use crate::error::FuturesResult;
use crate::hull_white::{HullWhiteModel, HullWhiteProvider};

/// STIR futures priced with the Hull-White futures convexity adjustment.
///
/// With the convexity factor γ the futures price is
/// `1 − γ·F + (1 − γ)/δ`, which reduces to the discounting price when γ = 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct InterestRateFutureHullWhiteMethod {
    model: HullWhiteModel,
    forward: InterestRateFutureDiscountingMethod,
}

impl InterestRateFutureHullWhiteMethod {
    /// Creates the method.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Convexity factor γ of the contract.
    #[must_use]
    pub fn convexity_factor(&self, security: &InterestRateFutureSecurity, provider: &HullWhiteProvider) -> f64 {
        self.model.futures_convexity_factor(
            provider.parameters(),
            security.last_trading_time(),
            security.fixing_start_time(),
            security.fixing_end_time(),
        )
    }

    /// Futures price with convexity.
    pub fn price_from_curves(
        &self,
        security: &InterestRateFutureSecurity,
        provider: &HullWhiteProvider,
    ) -> FuturesResult<f64> {
        let forward = self.forward.par_rate(security, provider.multicurve())?;
        let gamma = self.convexity_factor(security, provider);
        let delta = security.fixing_accrual();
        let price = 1.0 - gamma * forward + (1.0 - gamma) / delta;
        log::trace!("{}: forward {forward}, convexity factor {gamma}, price {price}", security.name());
        Ok(price)
    }

    /// Futures rate `1 − price`.
    pub fn par_rate(&self, security: &InterestRateFutureSecurity, provider: &HullWhiteProvider) -> FuturesResult<f64> {
        Ok(1.0 - self.price_from_curves(security, provider)?)
    }

    /// Difference between the convexity-adjusted price and `1 − F`.
    pub fn convexity_adjustment(
        &self,
        security: &InterestRateFutureSecurity,
        provider: &HullWhiteProvider,
    ) -> FuturesResult<f64> {
        let forward = self.forward.par_rate(security, provider.multicurve())?;
        Ok(self.price_from_curves(security, provider)? - (1.0 - forward))
    }

    /// Point sensitivities of the futures price.
    pub fn price_curve_sensitivity(
        &self,
        security: &InterestRateFutureSecurity,
        provider: &HullWhiteProvider,
    ) -> FuturesResult<MultipleCurrencyCurveSensitivity> {
        let gamma = self.convexity_factor(security, provider);
        Ok(self
            .forward
            .par_rate_curve_sensitivity(security, provider.multicurve())?
            .multiplied_by(-gamma))
    }

    /// `∂price/∂σ_k` for each Hull-White volatility.
    pub fn price_hull_white_sensitivity(
        &self,
        security: &InterestRateFutureSecurity,
        provider: &HullWhiteProvider,
    ) -> FuturesResult<Vec<f64>> {
        let forward = self.forward.par_rate(security, provider.multicurve())?;
        let (_, gamma_bar) = self.model.futures_convexity_factor_adjoint(
            provider.parameters(),
            security.last_trading_time(),
            security.fixing_start_time(),
            security.fixing_end_time(),
        );
        let price_bar = -forward - 1.0 / security.fixing_accrual();
        Ok(gamma_bar.into_iter().map(|g| price_bar * g).collect())
    }

    /// Margin value at the convexity-adjusted price.
    pub fn present_value(
        &self,
        transaction: &InterestRateFutureTransaction,
        provider: &HullWhiteProvider,
    ) -> FuturesResult<f64> {
        let price = self.price_from_curves(transaction.underlying(), provider)?;
        Ok(transaction.present_value_from_price(price))
    }

    /// Point sensitivities of the margin value.
    pub fn present_value_curve_sensitivity(
        &self,
        transaction: &InterestRateFutureTransaction,
        provider: &HullWhiteProvider,
    ) -> FuturesResult<MultipleCurrencyCurveSensitivity> {
        Ok(self
            .price_curve_sensitivity(transaction.underlying(), provider)?
            .multiplied_by(transaction.price_scale()))
    }

    /// Sensitivities of the margin value to each Hull-White volatility.
    pub fn present_value_hull_white_sensitivity(
        &self,
        transaction: &InterestRateFutureTransaction,
        provider: &HullWhiteProvider,
    ) -> FuturesResult<Vec<f64>> {
        let scale = transaction.price_scale();
        Ok(self
            .price_hull_white_sensitivity(transaction.underlying(), provider)?
            .into_iter()
            .map(|s| s * scale)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hull_white::HullWhiteParameters;
    use approx::assert_relative_eq;
    use carry_core::types::Currency;
    use carry_curves::curves::InterpolatedCurve;
    use carry_curves::provider::MulticurveProvider;
    use std::sync::Arc;

    const INDEX: &str = "EUR EURIBOR 3M";

    fn provider(params: HullWhiteParameters) -> HullWhiteProvider {
        let fwd = InterpolatedCurve::new("EUR FWD3", vec![0.25, 1.0, 2.0, 5.0], vec![0.015, 0.017, 0.02, 0.025]).unwrap();
        HullWhiteProvider::from_multicurve(MulticurveProvider::new().with_forward_curve(INDEX, Arc::new(fwd)), params)
    }

    fn params() -> HullWhiteParameters {
        HullWhiteParameters::new(0.01, vec![0.01, 0.011, 0.012, 0.013, 0.014], vec![0.5, 1.0, 2.0, 5.0]).unwrap()
    }

    fn security() -> InterestRateFutureSecurity {
        InterestRateFutureSecurity::new("ERZ2", Currency::EUR, INDEX, 1.45, 1.4555, 1.7083, 0.2528, 1_000_000.0, 0.25)
            .unwrap()
    }

    #[test]
    fn test_price_below_discounting_price() {
        let p = provider(params());
        let sec = security();
        let method = InterestRateFutureHullWhiteMethod::new();
        let hw = method.price_from_curves(&sec, &p).unwrap();
        let plain = InterestRateFutureDiscountingMethod.price_from_curves(&sec, p.multicurve()).unwrap();
        assert!(hw < plain);
        assert_relative_eq!(method.convexity_adjustment(&sec, &p).unwrap(), hw - plain, epsilon = 1e-15);
        assert_relative_eq!(method.par_rate(&sec, &p).unwrap(), 1.0 - hw, epsilon = 1e-15);
    }

    #[test]
    fn test_explicit_formula() {
        let p = provider(params());
        let sec = security();
        let method = InterestRateFutureHullWhiteMethod::new();
        let f = InterestRateFutureDiscountingMethod.par_rate(&sec, p.multicurve()).unwrap();
        let gamma = HullWhiteModel.futures_convexity_factor(p.parameters(), 1.45, 1.4555, 1.7083);
        let expected = 1.0 - gamma * f + (1.0 - gamma) / 0.2528;
        assert_relative_eq!(method.price_from_curves(&sec, &p).unwrap(), expected, epsilon = 1e-15);
    }

    #[test]
    fn test_hull_white_sensitivity_matches_bumps() {
        let base = params();
        let sec = security();
        let method = InterestRateFutureHullWhiteMethod::new();
        let analytic = method.price_hull_white_sensitivity(&sec, &provider(base.clone())).unwrap();
        let shift = 1e-6;
        for (k, a) in analytic.iter().enumerate() {
            let up = method.price_from_curves(&sec, &provider(base.with_volatility_shift(k, shift).unwrap())).unwrap();
            let down = method.price_from_curves(&sec, &provider(base.with_volatility_shift(k, -shift).unwrap())).unwrap();
            assert!((a - (up - down) / (2.0 * shift)).abs() < 1e-8, "bucket {k}");
        }
        // t0 = 1.45 lies in the third volatility period.
        assert_eq!(analytic[3], 0.0);
        assert_eq!(analytic[4], 0.0);
    }

    #[test]
    fn test_curve_sensitivity_scaled_by_gamma() {
        let p = provider(params());
        let sec = security();
        let method = InterestRateFutureHullWhiteMethod::new();
        let gamma = method.convexity_factor(&sec, &p);
        let hw = method.price_curve_sensitivity(&sec, &p).unwrap();
        let plain = InterestRateFutureDiscountingMethod.price_curve_sensitivity(&sec, p.multicurve()).unwrap();
        let diff = hw.sensitivity(Currency::EUR).max_difference(&plain.multiplied_by(gamma).sensitivity(Currency::EUR));
        assert!(diff < 1e-14);
    }
}
