use carry_bonds::discounting::BondDiscountingMethod;
use carry_curves::provider::IssuerProvider;
use carry_curves::sensitivity::MultipleCurrencyCurveSensitivity;
use carry_math::solvers::SolverConfig;

use super::security::{BondFuturesSecurity, BondFuturesTransaction};
use crate::error::{FuturesError, FuturesResult};

/// Bond futures priced as the cheapest forward clean price over conversion factor.
///
/// The delivery option is ignored: the cheapest to deliver is read off the
/// forward curves.
#[derive(Debug, Clone, Copy, Default)]
pub struct BondFuturesDiscountingMethod {
    bond: BondDiscountingMethod,
}

/// Index of the smallest value; the first one wins ties.
pub(crate) fn argmin(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate().skip(1) {
        if *v < values[best] {
            best = i;
        }
    }
    best
}

impl BondFuturesDiscountingMethod {
    /// Creates the method with the solver used by bond yield computations.
    #[must_use]
    pub fn new(config: SolverConfig) -> Self {
        Self {
            bond: BondDiscountingMethod::new(config),
        }
    }

    /// Forward dirty prices of the delivery basket, per unit notional.
    pub fn forward_dirty_prices(&self, futures: &BondFuturesSecurity, curves: &IssuerProvider) -> FuturesResult<Vec<f64>> {
        futures
            .delivery_basket()
            .iter()
            .map(|bond| Ok(self.bond.dirty_price_from_curves(bond, curves)?))
            .collect()
    }

    /// Forward clean prices of the delivery basket, per unit notional.
    pub fn forward_clean_prices(&self, futures: &BondFuturesSecurity, curves: &IssuerProvider) -> FuturesResult<Vec<f64>> {
        futures
            .delivery_basket()
            .iter()
            .map(|bond| Ok(self.bond.clean_price_from_curves(bond, curves)?))
            .collect()
    }

    fn adjusted_prices(&self, futures: &BondFuturesSecurity, curves: &IssuerProvider) -> FuturesResult<Vec<f64>> {
        let clean = self.forward_clean_prices(futures, curves)?;
        Ok(clean
            .iter()
            .zip(futures.conversion_factors())
            .map(|(p, cf)| p / cf)
            .collect())
    }

    /// Basket index of the cheapest to deliver bond.
    pub fn cheapest_to_deliver(&self, futures: &BondFuturesSecurity, curves: &IssuerProvider) -> FuturesResult<usize> {
        let adjusted = self.adjusted_prices(futures, curves)?;
        let ctd = argmin(&adjusted);
        log::debug!(
            "{}: cheapest to deliver {} at adjusted price {}",
            futures.name(),
            futures.delivery_basket()[ctd].id(),
            adjusted[ctd]
        );
        Ok(ctd)
    }

    /// Futures price `min_i(forward clean_i / CF_i)`.
    pub fn price_from_curves(&self, futures: &BondFuturesSecurity, curves: &IssuerProvider) -> FuturesResult<f64> {
        let adjusted = self.adjusted_prices(futures, curves)?;
        Ok(adjusted[argmin(&adjusted)])
    }

    /// Point sensitivities of the futures price.
    pub fn price_curve_sensitivity(
        &self,
        futures: &BondFuturesSecurity,
        curves: &IssuerProvider,
    ) -> FuturesResult<MultipleCurrencyCurveSensitivity> {
        let ctd = self.cheapest_to_deliver(futures, curves)?;
        let bond = &futures.delivery_basket()[ctd];
        Ok(self
            .bond
            .dirty_price_curve_sensitivity(bond, curves)?
            .multiplied_by(1.0 / futures.conversion_factors()[ctd]))
    }

    /// Net basis of each deliverable bond at a futures price.
    pub fn net_basis_all_bonds(
        &self,
        futures: &BondFuturesSecurity,
        curves: &IssuerProvider,
        futures_price: f64,
    ) -> FuturesResult<Vec<f64>> {
        let dirty = self.forward_dirty_prices(futures, curves)?;
        Ok(futures
            .delivery_basket()
            .iter()
            .zip(futures.conversion_factors())
            .zip(dirty)
            .map(|((bond, cf), d)| d - (futures_price * cf + bond.accrued_interest() / bond.notional()))
            .collect())
    }

    /// Smallest net basis over the basket.
    pub fn net_basis_cheapest(
        &self,
        futures: &BondFuturesSecurity,
        curves: &IssuerProvider,
        futures_price: f64,
    ) -> FuturesResult<f64> {
        let basis = self.net_basis_all_bonds(futures, curves, futures_price)?;
        Ok(basis[argmin(&basis)])
    }

    /// Futures price implied by a net basis on the curve cheapest to deliver.
    pub fn price_from_net_basis(
        &self,
        futures: &BondFuturesSecurity,
        curves: &IssuerProvider,
        net_basis: f64,
    ) -> FuturesResult<f64> {
        let ctd = self.cheapest_to_deliver(futures, curves)?;
        let bond = &futures.delivery_basket()[ctd];
        let dirty = self.bond.dirty_price_from_curves(bond, curves)?;
        Ok((dirty - bond.accrued_interest() / bond.notional() - net_basis) / futures.conversion_factors()[ctd])
    }

    /// Gross basis `p_i − F·CF_i` of each bond from spot clean prices.
    pub fn gross_basis_all_bonds(
        &self,
        futures: &BondFuturesSecurity,
        clean_prices: &[f64],
        futures_price: f64,
    ) -> FuturesResult<Vec<f64>> {
        let factors = futures.conversion_factors();
        if clean_prices.len() != factors.len() {
            return Err(FuturesError::LengthMismatch {
                expected: factors.len(),
                actual: clean_prices.len(),
            });
        }
        Ok(clean_prices
            .iter()
            .zip(factors)
            .map(|(p, cf)| p - futures_price * cf)
            .collect())
    }

    /// Gross basis with spot clean prices read from the curves.
    pub fn gross_basis_from_curves(
        &self,
        futures: &BondFuturesSecurity,
        curves: &IssuerProvider,
        futures_price: f64,
    ) -> FuturesResult<Vec<f64>> {
        let clean = futures
            .spot_basket()
            .iter()
            .map(|bond| Ok(self.bond.clean_price_from_curves(bond, curves)?))
            .collect::<FuturesResult<Vec<_>>>()?;
        self.gross_basis_all_bonds(futures, &clean, futures_price)
    }

    /// Margin value at a given futures price.
    #[must_use]
    pub fn present_value_from_price(&self, transaction: &BondFuturesTransaction, price: f64) -> f64 {
        transaction.present_value_from_price(price)
    }

    /// Margin value at the curve price.
    pub fn present_value(&self, transaction: &BondFuturesTransaction, curves: &IssuerProvider) -> FuturesResult<f64> {
        let price = self.price_from_curves(transaction.underlying(), curves)?;
        Ok(transaction.present_value_from_price(price))
    }

    /// Margin value at the price implied by a net basis.
    pub fn present_value_from_net_basis(
        &self,
        transaction: &BondFuturesTransaction,
        curves: &IssuerProvider,
        net_basis: f64,
    ) -> FuturesResult<f64> {
        let price = self.price_from_net_basis(transaction.underlying(), curves, net_basis)?;
        Ok(transaction.present_value_from_price(price))
    }

    /// Point sensitivities of the margin value.
    pub fn present_value_curve_sensitivity(
        &self,
        transaction: &BondFuturesTransaction,
        curves: &IssuerProvider,
    ) -> FuturesResult<MultipleCurrencyCurveSensitivity> {
        Ok(self
            .price_curve_sensitivity(transaction.underlying(), curves)?
            .multiplied_by(transaction.price_scale()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmin_first_wins_ties() {
        assert_eq!(argmin(&[1.2, 1.1, 1.1, 1.3]), 1);
        assert_eq!(argmin(&[1.0]), 0);
    }
}
