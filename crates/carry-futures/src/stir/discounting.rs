use carry_curves::provider::MulticurveProvider;
use carry_curves::sensitivity::{CurveSensitivity, MultipleCurrencyCurveSensitivity};

use super::security::{InterestRateFutureSecurity, InterestRateFutureTransaction};
use crate::error::FuturesResult;

/// STIR futures priced without convexity: `price = 1 − F`.
#[derive(Debug, Clone, Copy, Default)]
pub struct InterestRateFutureDiscountingMethod;

impl InterestRateFutureDiscountingMethod {
    /// Creates the method.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Forward rate of the fixing period on the index curve.
    pub fn par_rate(&self, security: &InterestRateFutureSecurity, multicurve: &MulticurveProvider) -> FuturesResult<f64> {
        let curve = multicurve.forward_curve(security.index())?;
        Ok(curve.simply_compounded_forward_rate(
            security.fixing_start_time(),
            security.fixing_end_time(),
            security.fixing_accrual(),
        )?)
    }

    /// Futures price `1 − F`.
    pub fn price_from_curves(
        &self,
        security: &InterestRateFutureSecurity,
        multicurve: &MulticurveProvider,
    ) -> FuturesResult<f64> {
        Ok(1.0 - self.par_rate(security, multicurve)?)
    }

    /// Point sensitivities of the forward rate to the index curve.
    pub fn par_rate_curve_sensitivity(
        &self,
        security: &InterestRateFutureSecurity,
        multicurve: &MulticurveProvider,
    ) -> FuturesResult<MultipleCurrencyCurveSensitivity> {
        let curve = multicurve.forward_curve(security.index())?;
        let t1 = security.fixing_start_time();
        let t2 = security.fixing_end_time();
        let ratio = curve.discount_factor(t1)? / curve.discount_factor(t2)? / security.fixing_accrual();
        let sensitivity = CurveSensitivity::of_points(curve.name(), vec![(t1, -t1 * ratio), (t2, t2 * ratio)]);
        Ok(MultipleCurrencyCurveSensitivity::of(security.currency(), sensitivity))
    }

    /// Point sensitivities of the futures price.
    pub fn price_curve_sensitivity(
        &self,
        security: &InterestRateFutureSecurity,
        multicurve: &MulticurveProvider,
    ) -> FuturesResult<MultipleCurrencyCurveSensitivity> {
        Ok(self.par_rate_curve_sensitivity(security, multicurve)?.multiplied_by(-1.0))
    }

    /// Margin value at a given futures price.
    #[must_use]
    pub fn present_value_from_price(&self, transaction: &InterestRateFutureTransaction, price: f64) -> f64 {
        transaction.present_value_from_price(price)
    }

    /// Margin value at the curve price.
    pub fn present_value(
        &self,
        transaction: &InterestRateFutureTransaction,
        multicurve: &MulticurveProvider,
    ) -> FuturesResult<f64> {
        let price = self.price_from_curves(transaction.underlying(), multicurve)?;
        Ok(transaction.present_value_from_price(price))
    }

    /// Point sensitivities of the margin value.
    pub fn present_value_curve_sensitivity(
        &self,
        transaction: &InterestRateFutureTransaction,
        multicurve: &MulticurveProvider,
    ) -> FuturesResult<MultipleCurrencyCurveSensitivity> {
        Ok(self
            .price_curve_sensitivity(transaction.underlying(), multicurve)?
            .multiplied_by(transaction.price_scale()))
    }
}
