//! Fixed coupon bond securities: cash flows in model time.

use serde::{Deserialize, Serialize};

use carry_core::types::Currency;
use carry_curves::provider::IssuerKey;

use crate::definition::YieldConvention;
use crate::error::{BondError, BondResult};

/// A fixed coupon in model time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedCoupon {
    /// Payment time.
    pub payment_time: f64,
    /// Accrual factor.
    pub accrual_factor: f64,
    /// Coupon rate (zero for a detached coupon).
    pub rate: f64,
    /// Notional.
    pub notional: f64,
    /// Paid amount.
    pub amount: f64,
}

/// A single fixed payment in model time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedPayment {
    /// Payment time.
    pub time: f64,
    /// Paid amount.
    pub amount: f64,
}

/// A fixed coupon bond as seen from a valuation date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondFixedSecurity {
    id: String,
    issuer: IssuerKey,
    coupons: Vec<FixedCoupon>,
    nominal: FixedPayment,
    settlement_time: f64,
    accrued_interest: f64,
    accrual_factor_to_next_coupon: f64,
    coupons_per_year: u32,
    yield_convention: YieldConvention,
}

impl BondFixedSecurity {
    /// Creates a security, checking that payment times are strictly increasing
    /// and that the nominal is repaid with the last coupon or after it.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        issuer: IssuerKey,
        coupons: Vec<FixedCoupon>,
        nominal: FixedPayment,
        settlement_time: f64,
        accrued_interest: f64,
        accrual_factor_to_next_coupon: f64,
        coupons_per_year: u32,
        yield_convention: YieldConvention,
    ) -> BondResult<Self> {
        if coupons.is_empty() {
            return Err(BondError::invalid_definition("bond security needs at least one coupon"));
        }
        if coupons_per_year == 0 {
            return Err(BondError::invalid_definition("coupons per year must be positive"));
        }
        if coupons.windows(2).any(|w| w[1].payment_time <= w[0].payment_time) {
            return Err(BondError::invalid_definition("coupon times must be strictly increasing"));
        }
        if let Some(last) = coupons.last() {
            if nominal.time < last.payment_time {
                return Err(BondError::invalid_definition("nominal is repaid before the last coupon"));
            }
        }
        if !(nominal.amount.is_finite() && nominal.amount > 0.0) {
            return Err(BondError::invalid_definition("nominal must be positive"));
        }
        Ok(Self {
            id: id.into(),
            issuer,
            coupons,
            nominal,
            settlement_time,
            accrued_interest,
            accrual_factor_to_next_coupon,
            coupons_per_year,
            yield_convention,
        })
    }

    /// Bond identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Issuer curve key.
    #[must_use]
    pub fn issuer(&self) -> &IssuerKey {
        &self.issuer
    }

    /// Currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.issuer.currency
    }

    /// Remaining coupons.
    #[must_use]
    pub fn coupons(&self) -> &[FixedCoupon] {
        &self.coupons
    }

    /// Nominal repayment.
    #[must_use]
    pub fn nominal(&self) -> FixedPayment {
        self.nominal
    }

    /// Notional of the first remaining coupon.
    #[must_use]
    pub fn notional(&self) -> f64 {
        self.coupons[0].notional
    }

    /// Settlement time.
    #[must_use]
    pub fn settlement_time(&self) -> f64 {
        self.settlement_time
    }

    /// Accrued interest at settlement, scaled by the notional.
    #[must_use]
    pub fn accrued_interest(&self) -> f64 {
        self.accrued_interest
    }

    /// Fraction of the current coupon period left after settlement.
    #[must_use]
    pub fn accrual_factor_to_next_coupon(&self) -> f64 {
        self.accrual_factor_to_next_coupon
    }

    /// Coupon frequency.
    #[must_use]
    pub fn coupons_per_year(&self) -> u32 {
        self.coupons_per_year
    }

    /// Yield convention.
    #[must_use]
    pub fn yield_convention(&self) -> YieldConvention {
        self.yield_convention
    }

    /// All payments, coupons then nominal, as `(time, amount)`.
    pub fn cash_flows(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.coupons
            .iter()
            .map(|c| (c.payment_time, c.amount))
            .chain(std::iter::once((self.nominal.time, self.nominal.amount)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coupon(t: f64) -> FixedCoupon {
        FixedCoupon {
            payment_time: t,
            accrual_factor: 0.5,
            rate: 0.04,
            notional: 1.0,
            amount: 0.02,
        }
    }

    #[test]
    fn test_rejects_unordered_times() {
        let result = BondFixedSecurity::new(
            "X",
            IssuerKey::new("UST", Currency::USD),
            vec![coupon(1.0), coupon(0.5)],
            FixedPayment { time: 1.0, amount: 1.0 },
            0.0,
            0.0,
            1.0,
            2,
            YieldConvention::UsStreet,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_cash_flows_include_nominal() {
        let bond = BondFixedSecurity::new(
            "X",
            IssuerKey::new("UST", Currency::USD),
            vec![coupon(0.5), coupon(1.0)],
            FixedPayment { time: 1.0, amount: 1.0 },
            0.0,
            0.0,
            1.0,
            2,
            YieldConvention::UsStreet,
        )
        .unwrap();
        let flows: Vec<_> = bond.cash_flows().collect();
        assert_eq!(flows, vec![(0.5, 0.02), (1.0, 0.02), (1.0, 1.0)]);
        assert_eq!(bond.currency(), Currency::USD);
    }
}
