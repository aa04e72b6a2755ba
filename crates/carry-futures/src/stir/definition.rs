use serde::{Deserialize, Serialize};

use carry_core::calendars::{BusinessDayConvention, Calendar, WeekendCalendar};
use carry_core::daycounts::{Act360, DayCount};
use carry_core::time::time_between;
use carry_core::types::{Currency, Date};

use super::security::{InterestRateFutureSecurity, InterestRateFutureTransaction};
use crate::error::{FuturesError, FuturesResult};
use crate::reference_price::ReferencePrice;

const SPOT_LAG: i32 = 2;

/// Contract terms of a STIR future, in dates.
///
/// The fixing period starts two business days after the last trading date
/// and runs for the index tenor, modified following, on an ACT/360 basis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestRateFutureSecurityDefinition {
    name: String,
    currency: Currency,
    index: String,
    last_trading_date: Date,
    fixing_start: Date,
    fixing_end: Date,
    fixing_accrual: f64,
    notional: f64,
    payment_accrual: f64,
}

impl InterestRateFutureSecurityDefinition {
    /// Creates a contract from its last trading date and index tenor in months.
    pub fn new(
        name: impl Into<String>,
        currency: Currency,
        index: impl Into<String>,
        last_trading_date: Date,
        tenor_months: u32,
        notional: f64,
        payment_accrual: f64,
    ) -> FuturesResult<Self> {
        if tenor_months == 0 {
            return Err(FuturesError::invalid_contract("index tenor must be at least one month"));
        }
        if !(notional.is_finite() && notional > 0.0) {
            return Err(FuturesError::invalid_parameter("notional", format!("must be positive, got {notional}")));
        }
        if !(payment_accrual.is_finite() && payment_accrual > 0.0) {
            return Err(FuturesError::invalid_parameter(
                "payment_accrual",
                format!("must be positive, got {payment_accrual}"),
            ));
        }
        let fixing_start = WeekendCalendar.add_business_days(last_trading_date, SPOT_LAG);
        let fixing_end = WeekendCalendar.adjust(
            fixing_start.add_months(tenor_months as i32)?,
            BusinessDayConvention::ModifiedFollowing,
        );
        Ok(Self {
            name: name.into(),
            currency,
            index: index.into(),
            last_trading_date,
            fixing_start,
            fixing_end,
            fixing_accrual: Act360.year_fraction(fixing_start, fixing_end),
            notional,
            payment_accrual,
        })
    }

    /// Contract name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Last trading date.
    #[must_use]
    pub fn last_trading_date(&self) -> Date {
        self.last_trading_date
    }

    /// Start of the underlying deposit.
    #[must_use]
    pub fn fixing_start(&self) -> Date {
        self.fixing_start
    }

    /// End of the underlying deposit.
    #[must_use]
    pub fn fixing_end(&self) -> Date {
        self.fixing_end
    }

    /// ACT/360 accrual of the underlying deposit.
    #[must_use]
    pub fn fixing_accrual(&self) -> f64 {
        self.fixing_accrual
    }

    /// Security seen from `valuation`.
    pub fn to_security(&self, valuation: Date) -> FuturesResult<InterestRateFutureSecurity> {
        if valuation > self.last_trading_date {
            return Err(FuturesError::invalid_contract(format!(
                "{} stopped trading on {}",
                self.name, self.last_trading_date
            )));
        }
        InterestRateFutureSecurity::new(
            self.name.clone(),
            self.currency,
            self.index.clone(),
            time_between(valuation, self.last_trading_date),
            time_between(valuation, self.fixing_start),
            time_between(valuation, self.fixing_end),
            self.fixing_accrual,
            self.notional,
            self.payment_accrual,
        )
    }
}

/// A position in a STIR future.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestRateFutureTransactionDefinition {
    underlying: InterestRateFutureSecurityDefinition,
    quantity: f64,
    trade_date: Date,
    trade_price: f64,
}

impl InterestRateFutureTransactionDefinition {
    /// Creates a position of `quantity` contracts traded at `trade_price`.
    #[must_use]
    pub fn new(underlying: InterestRateFutureSecurityDefinition, quantity: f64, trade_date: Date, trade_price: f64) -> Self {
        Self {
            underlying,
            quantity,
            trade_date,
            trade_price,
        }
    }

    /// Underlying contract.
    #[must_use]
    pub fn underlying(&self) -> &InterestRateFutureSecurityDefinition {
        &self.underlying
    }

    /// Transaction seen from `valuation`, margined against `last_margin_price`
    /// unless traded that day.
    pub fn to_transaction(&self, valuation: Date, last_margin_price: f64) -> FuturesResult<InterestRateFutureTransaction> {
        let reference = ReferencePrice::select(self.trade_date, valuation, self.trade_price, last_margin_price);
        Ok(InterestRateFutureTransaction::new(
            self.underlying.to_security(valuation)?,
            self.quantity,
            reference,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eurodollar() -> InterestRateFutureSecurityDefinition {
        InterestRateFutureSecurityDefinition::new(
            "EDU2",
            Currency::USD,
            "USD LIBOR 3M",
            Date::from_ymd(2012, 9, 17).unwrap(),
            3,
            1_000_000.0,
            0.25,
        )
        .unwrap()
    }

    #[test]
    fn test_fixing_period() {
        let def = eurodollar();
        assert_eq!(def.fixing_start(), Date::from_ymd(2012, 9, 19).unwrap());
        assert_eq!(def.fixing_end(), Date::from_ymd(2012, 12, 19).unwrap());
        assert!((def.fixing_accrual() - 91.0 / 360.0).abs() < 1e-15);
    }

    #[test]
    fn test_to_security_times() {
        let valuation = Date::from_ymd(2011, 5, 12).unwrap();
        let sec = eurodollar().to_security(valuation).unwrap();
        assert!(sec.last_trading_time() < sec.fixing_start_time());
        assert!(sec.fixing_start_time() < sec.fixing_end_time());
        assert_eq!(sec.payment_accrual(), 0.25);
    }

    #[test]
    fn test_expired_contract_rejected() {
        let valuation = Date::from_ymd(2012, 9, 18).unwrap();
        assert!(matches!(
            eurodollar().to_security(valuation),
            Err(FuturesError::InvalidContract { .. })
        ));
    }

    #[test]
    fn test_transaction_reference_price() {
        let trade_date = Date::from_ymd(2011, 5, 12).unwrap();
        let def = InterestRateFutureTransactionDefinition::new(eurodollar(), 1.0, trade_date, 0.99);
        let same_day = def.to_transaction(trade_date, 0.985).unwrap();
        assert_eq!(same_day.reference_price(), ReferencePrice::Trade(0.99));
        let later = def.to_transaction(trade_date.add_days(1), 0.985).unwrap();
        assert_eq!(later.reference_price(), ReferencePrice::LastMargin(0.985));
    }

    #[test]
    fn test_invalid_terms() {
        let d = Date::from_ymd(2012, 9, 17).unwrap();
        assert!(InterestRateFutureSecurityDefinition::new("X", Currency::USD, "L", d, 0, 1.0, 0.25).is_err());
        assert!(InterestRateFutureSecurityDefinition::new("X", Currency::USD, "L", d, 3, -1.0, 0.25).is_err());
    }
}
