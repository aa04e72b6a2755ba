use serde::{Deserialize, Serialize};

use carry_bonds::conversion_factor::{conversion_factor, ConversionFactorConvention};
use carry_bonds::definition::BondFixedDefinition;
use carry_core::time::time_between;
use carry_core::types::Date;

use super::security::{BondFuturesSecurity, BondFuturesTransaction};
use crate::error::{FuturesError, FuturesResult};
use crate::reference_price::ReferencePrice;

/// Key dates of a bond futures contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryDates {
    /// Last trading date.
    pub trading_last: Date,
    /// First notice date.
    pub notice_first: Date,
    /// Last notice date.
    pub notice_last: Date,
    /// First delivery date.
    pub delivery_first: Date,
    /// Last delivery date.
    pub delivery_last: Date,
}

impl DeliveryDates {
    fn validate(&self) -> FuturesResult<()> {
        let ordered = self.notice_first <= self.notice_last
            && self.delivery_first <= self.delivery_last
            && self.notice_first <= self.delivery_first
            && self.notice_last <= self.delivery_last;
        if ordered {
            Ok(())
        } else {
            Err(FuturesError::invalid_contract(format!(
                "notice {}..{} and delivery {}..{} are not ordered",
                self.notice_first, self.notice_last, self.delivery_first, self.delivery_last
            )))
        }
    }
}

/// Contract terms of a bond future with its delivery basket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondFuturesSecurityDefinition {
    name: String,
    dates: DeliveryDates,
    notional: f64,
    basket: Vec<BondFixedDefinition>,
    conversion_factors: Vec<f64>,
}

pub(crate) fn check_basket(name: &str, basket_len: usize, conversion_factors: &[f64]) -> FuturesResult<()> {
    if basket_len == 0 {
        return Err(FuturesError::EmptyBasket {
            contract: name.to_string(),
        });
    }
    if conversion_factors.len() != basket_len {
        return Err(FuturesError::LengthMismatch {
            expected: basket_len,
            actual: conversion_factors.len(),
        });
    }
    if let Some((index, &value)) = conversion_factors
        .iter()
        .enumerate()
        .find(|(_, cf)| !(cf.is_finite() && **cf > 0.0))
    {
        return Err(FuturesError::InvalidConversionFactor { index, value });
    }
    Ok(())
}

impl BondFuturesSecurityDefinition {
    /// Creates a contract from its basket and published conversion factors.
    pub fn new(
        name: impl Into<String>,
        dates: DeliveryDates,
        notional: f64,
        basket: Vec<BondFixedDefinition>,
        conversion_factors: Vec<f64>,
    ) -> FuturesResult<Self> {
        let name = name.into();
        check_basket(&name, basket.len(), &conversion_factors)?;
        dates.validate()?;
        if !(notional.is_finite() && notional > 0.0) {
            return Err(FuturesError::invalid_parameter("notional", format!("must be positive, got {notional}")));
        }
        Ok(Self {
            name,
            dates,
            notional,
            basket,
            conversion_factors,
        })
    }

    /// Creates a contract computing each conversion factor at the first delivery date.
    pub fn with_computed_conversion_factors(
        name: impl Into<String>,
        dates: DeliveryDates,
        notional: f64,
        basket: Vec<BondFixedDefinition>,
        notional_coupon: f64,
        convention: ConversionFactorConvention,
    ) -> FuturesResult<Self> {
        let factors = basket
            .iter()
            .map(|bond| conversion_factor(bond, dates.delivery_first, notional_coupon, convention))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(name, dates, notional, basket, factors)
    }

    /// Contract name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Key dates.
    #[must_use]
    pub fn dates(&self) -> &DeliveryDates {
        &self.dates
    }

    /// Contract notional.
    #[must_use]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Deliverable bonds.
    #[must_use]
    pub fn basket(&self) -> &[BondFixedDefinition] {
        &self.basket
    }

    /// Conversion factors, aligned with the basket.
    #[must_use]
    pub fn conversion_factors(&self) -> &[f64] {
        &self.conversion_factors
    }

    /// Security seen from `valuation`.
    ///
    /// The delivery basket settles on the last delivery date; the spot basket
    /// settles at each bond's spot lag.
    pub fn to_security(&self, valuation: Date) -> FuturesResult<BondFuturesSecurity> {
        if valuation > self.dates.trading_last {
            return Err(FuturesError::invalid_contract(format!(
                "{} stopped trading on {}",
                self.name, self.dates.trading_last
            )));
        }
        let delivery_basket = self
            .basket
            .iter()
            .map(|bond| bond.to_security_with_settlement(valuation, self.dates.delivery_last))
            .collect::<Result<Vec<_>, _>>()?;
        let spot_basket = self
            .basket
            .iter()
            .map(|bond| bond.to_security(valuation))
            .collect::<Result<Vec<_>, _>>()?;
        let t = |d: Date| time_between(valuation, d);
        BondFuturesSecurity::new(
            self.name.clone(),
            [
                t(self.dates.trading_last),
                t(self.dates.notice_first),
                t(self.dates.notice_last),
                t(self.dates.delivery_first),
                t(self.dates.delivery_last),
            ],
            self.notional,
            delivery_basket,
            spot_basket,
            self.conversion_factors.clone(),
        )
    }
}

/// A position in a bond future.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondFuturesTransactionDefinition {
    underlying: BondFuturesSecurityDefinition,
    quantity: f64,
    trade_date: Date,
    trade_price: f64,
}

impl BondFuturesTransactionDefinition {
    /// Creates a position of `quantity` contracts traded at `trade_price`.
    #[must_use]
    pub fn new(underlying: BondFuturesSecurityDefinition, quantity: f64, trade_date: Date, trade_price: f64) -> Self {
        Self {
            underlying,
            quantity,
            trade_date,
            trade_price,
        }
    }

    /// Underlying contract.
    #[must_use]
    pub fn underlying(&self) -> &BondFuturesSecurityDefinition {
        &self.underlying
    }

    /// Transaction seen from `valuation`, margined against `last_margin_price`
    /// unless traded that day.
    pub fn to_transaction(&self, valuation: Date, last_margin_price: f64) -> FuturesResult<BondFuturesTransaction> {
        let reference = ReferencePrice::select(self.trade_date, valuation, self.trade_price, last_margin_price);
        Ok(BondFuturesTransaction::new(
            self.underlying.to_security(valuation)?,
            self.quantity,
            reference,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carry_core::types::{Currency, Frequency};

    fn note(maturity: Date, coupon: f64) -> BondFixedDefinition {
        BondFixedDefinition::new(
            format!("T {coupon}"),
            Currency::USD,
            "US GOVT",
            maturity.add_years(-7).unwrap(),
            maturity,
            coupon,
            Frequency::SemiAnnual,
        )
        .unwrap()
        .with_settlement_days(1)
    }

    fn dates() -> DeliveryDates {
        DeliveryDates {
            trading_last: Date::from_ymd(2011, 9, 30).unwrap(),
            notice_first: Date::from_ymd(2011, 8, 31).unwrap(),
            notice_last: Date::from_ymd(2011, 10, 4).unwrap(),
            delivery_first: Date::from_ymd(2011, 9, 1).unwrap(),
            delivery_last: Date::from_ymd(2011, 10, 5).unwrap(),
        }
    }

    fn basket() -> Vec<BondFixedDefinition> {
        vec![
            note(Date::from_ymd(2016, 1, 31).unwrap(), 0.02),
            note(Date::from_ymd(2016, 2, 29).unwrap(), 0.02125),
        ]
    }

    #[test]
    fn test_rejects_empty_basket() {
        let err = BondFuturesSecurityDefinition::new("FVU1", dates(), 100_000.0, vec![], vec![]).unwrap_err();
        assert!(matches!(err, FuturesError::EmptyBasket { .. }));
    }

    #[test]
    fn test_rejects_bad_conversion_factor() {
        let err = BondFuturesSecurityDefinition::new("FVU1", dates(), 100_000.0, basket(), vec![0.83, 0.0]).unwrap_err();
        assert_eq!(err, FuturesError::InvalidConversionFactor { index: 1, value: 0.0 });
        let err = BondFuturesSecurityDefinition::new("FVU1", dates(), 100_000.0, basket(), vec![0.83]).unwrap_err();
        assert!(matches!(err, FuturesError::LengthMismatch { expected: 2, actual: 1 }));
    }

    #[test]
    fn test_computed_factors() {
        let def = BondFuturesSecurityDefinition::with_computed_conversion_factors(
            "FVU1",
            dates(),
            100_000.0,
            basket(),
            0.06,
            ConversionFactorConvention::Cbot,
        )
        .unwrap();
        assert!(def.conversion_factors().iter().all(|cf| *cf > 0.8 && *cf < 0.9));
    }

    #[test]
    fn test_to_security_baskets() {
        let def = BondFuturesSecurityDefinition::new("FVU1", dates(), 100_000.0, basket(), vec![0.8317, 0.8325]).unwrap();
        let valuation = Date::from_ymd(2011, 6, 20).unwrap();
        let sec = def.to_security(valuation).unwrap();
        assert_eq!(sec.delivery_basket().len(), 2);
        assert!((sec.delivery_basket()[0].settlement_time() - sec.delivery_last_time()).abs() < 1e-15);
        assert!(sec.spot_basket()[0].settlement_time() < sec.delivery_last_time());
        assert!(def.to_security(Date::from_ymd(2011, 10, 3).unwrap()).is_err());
    }
}
