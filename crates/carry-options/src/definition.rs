//! Date-based option terms, converted to securities at a valuation date.

use carry_core::time::time_between;
use carry_core::types::{Currency, Date};
use carry_futures::bond::BondFuturesSecurityDefinition;
use carry_futures::reference_price::ReferencePrice;
use carry_futures::stir::InterestRateFutureSecurityDefinition;
use serde::{Deserialize, Serialize};

use crate::error::{OptionsError, OptionsResult};
use crate::security::{
    FuturesOptionMarginTransaction, FuturesOptionPremiumTransaction, FuturesOptionSecurity, FuturesUnderlying,
    OptionStyle, Payment,
};

/// Underlying future, in dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FuturesUnderlyingDefinition {
    /// Bond future.
    Bond(BondFuturesSecurityDefinition),
    /// STIR future.
    Stir(InterestRateFutureSecurityDefinition),
}

impl FuturesUnderlyingDefinition {
    /// Contract name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Bond(f) => f.name(),
            Self::Stir(f) => f.name(),
        }
    }

    /// Last trading date.
    #[must_use]
    pub fn last_trading_date(&self) -> Date {
        match self {
            Self::Bond(f) => f.dates().trading_last,
            Self::Stir(f) => f.last_trading_date(),
        }
    }

    /// Security seen from `valuation`.
    pub fn to_security(&self, valuation: Date) -> OptionsResult<FuturesUnderlying> {
        Ok(match self {
            Self::Bond(f) => FuturesUnderlying::Bond(f.to_security(valuation)?),
            Self::Stir(f) => FuturesUnderlying::Stir(f.to_security(valuation)?),
        })
    }
}

/// Option terms in dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuturesOptionSecurityDefinition {
    underlying: FuturesUnderlyingDefinition,
    expiration_date: Date,
    strike: f64,
    is_call: bool,
    style: OptionStyle,
}

impl FuturesOptionSecurityDefinition {
    /// Creates an option expiring on or before the underlying's last trading date.
    pub fn new(
        underlying: FuturesUnderlyingDefinition,
        expiration_date: Date,
        strike: f64,
        is_call: bool,
        style: OptionStyle,
    ) -> OptionsResult<Self> {
        if expiration_date > underlying.last_trading_date() {
            return Err(OptionsError::invalid_option(format!(
                "option expiring {expiration_date} outlives {} (last trading {})",
                underlying.name(),
                underlying.last_trading_date()
            )));
        }
        Ok(Self {
            underlying,
            expiration_date,
            strike,
            is_call,
            style,
        })
    }

    /// Underlying future.
    #[must_use]
    pub fn underlying(&self) -> &FuturesUnderlyingDefinition {
        &self.underlying
    }

    /// Expiration date.
    #[must_use]
    pub fn expiration_date(&self) -> Date {
        self.expiration_date
    }

    /// Premium style.
    #[must_use]
    pub fn style(&self) -> OptionStyle {
        self.style
    }

    /// Security seen from `valuation`. Fails once the option has expired.
    pub fn to_security(&self, valuation: Date) -> OptionsResult<FuturesOptionSecurity> {
        if valuation > self.expiration_date {
            return Err(OptionsError::invalid_option(format!(
                "option on {} expired on {}",
                self.underlying.name(),
                self.expiration_date
            )));
        }
        FuturesOptionSecurity::new(
            self.underlying.to_security(valuation)?,
            time_between(valuation, self.expiration_date),
            self.strike,
            self.is_call,
            self.style,
        )
    }
}

/// A margined option position, in dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuturesOptionMarginTransactionDefinition {
    underlying: FuturesOptionSecurityDefinition,
    quantity: f64,
    trade_date: Date,
    trade_price: f64,
}

impl FuturesOptionMarginTransactionDefinition {
    /// Creates a position of `quantity` options traded at `trade_price`.
    #[must_use]
    pub fn new(underlying: FuturesOptionSecurityDefinition, quantity: f64, trade_date: Date, trade_price: f64) -> Self {
        Self {
            underlying,
            quantity,
            trade_date,
            trade_price,
        }
    }

    /// Option traded.
    #[must_use]
    pub fn underlying(&self) -> &FuturesOptionSecurityDefinition {
        &self.underlying
    }

    /// Transaction seen from `valuation`, margined against `last_margin_price`
    /// unless traded that day.
    pub fn to_transaction(&self, valuation: Date, last_margin_price: f64) -> OptionsResult<FuturesOptionMarginTransaction> {
        let reference = ReferencePrice::select(self.trade_date, valuation, self.trade_price, last_margin_price);
        FuturesOptionMarginTransaction::new(self.underlying.to_security(valuation)?, self.quantity, reference)
    }
}

/// A premium-style option position, in dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuturesOptionPremiumTransactionDefinition {
    underlying: FuturesOptionSecurityDefinition,
    quantity: f64,
    premium_currency: Currency,
    premium_date: Date,
    premium_amount: f64,
}

impl FuturesOptionPremiumTransactionDefinition {
    /// Creates a position with its premium payment.
    #[must_use]
    pub fn new(
        underlying: FuturesOptionSecurityDefinition,
        quantity: f64,
        premium_currency: Currency,
        premium_date: Date,
        premium_amount: f64,
    ) -> Self {
        Self {
            underlying,
            quantity,
            premium_currency,
            premium_date,
            premium_amount,
        }
    }

    /// Option traded.
    #[must_use]
    pub fn underlying(&self) -> &FuturesOptionSecurityDefinition {
        &self.underlying
    }

    /// Transaction seen from `valuation`. A premium paid before `valuation`
    /// carries a negative time.
    pub fn to_transaction(&self, valuation: Date) -> OptionsResult<FuturesOptionPremiumTransaction> {
        let premium = Payment::new(
            self.premium_currency,
            time_between(valuation, self.premium_date),
            self.premium_amount,
        );
        FuturesOptionPremiumTransaction::new(self.underlying.to_security(valuation)?, self.quantity, premium)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn euribor() -> FuturesUnderlyingDefinition {
        FuturesUnderlyingDefinition::Stir(
            InterestRateFutureSecurityDefinition::new(
                "ERM2",
                Currency::EUR,
                "EUR EURIBOR 3M",
                Date::from_ymd(2012, 6, 18).unwrap(),
                3,
                1_000_000.0,
                0.25,
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_expiry_after_last_trading_rejected() {
        let late = Date::from_ymd(2012, 6, 19).unwrap();
        assert!(FuturesOptionSecurityDefinition::new(euribor(), late, 0.99, true, OptionStyle::Margined).is_err());
    }

    #[test]
    fn test_expired_option_rejected() {
        let expiry = Date::from_ymd(2012, 6, 18).unwrap();
        let definition = FuturesOptionSecurityDefinition::new(euribor(), expiry, 0.99, true, OptionStyle::Margined).unwrap();
        assert!(definition.to_security(Date::from_ymd(2012, 6, 19).unwrap()).is_err());
        let security = definition.to_security(Date::from_ymd(2012, 1, 18).unwrap()).unwrap();
        assert!(security.expiration_time() > 0.0);
        assert!((security.unit_amount() - 250_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_trade_date_selects_reference_price() {
        let expiry = Date::from_ymd(2012, 6, 18).unwrap();
        let option = FuturesOptionSecurityDefinition::new(euribor(), expiry, 0.99, true, OptionStyle::Margined).unwrap();
        let trade_date = Date::from_ymd(2012, 1, 18).unwrap();
        let definition = FuturesOptionMarginTransactionDefinition::new(option, 10.0, trade_date, 0.0050);
        let same_day = definition.to_transaction(trade_date, 0.0045).unwrap();
        assert_eq!(same_day.reference_price(), ReferencePrice::Trade(0.0050));
        let later = definition.to_transaction(trade_date.add_days(1), 0.0045).unwrap();
        assert_eq!(later.reference_price(), ReferencePrice::LastMargin(0.0045));
    }

    #[test]
    fn test_style_must_match_transaction() {
        let expiry = Date::from_ymd(2012, 6, 18).unwrap();
        let option = FuturesOptionSecurityDefinition::new(euribor(), expiry, 0.99, true, OptionStyle::Margined).unwrap();
        let definition = FuturesOptionPremiumTransactionDefinition::new(
            option,
            1.0,
            Currency::EUR,
            Date::from_ymd(2012, 1, 20).unwrap(),
            -1000.0,
        );
        assert!(definition.to_transaction(Date::from_ymd(2012, 1, 18).unwrap()).is_err());
    }
}
