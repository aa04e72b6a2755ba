use serde::{Deserialize, Serialize};

use carry_core::types::Currency;

use crate::error::{FuturesError, FuturesResult};
use crate::reference_price::ReferencePrice;

/// A STIR future in model time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestRateFutureSecurity {
    name: String,
    currency: Currency,
    index: String,
    last_trading_time: f64,
    fixing_start_time: f64,
    fixing_end_time: f64,
    fixing_accrual: f64,
    notional: f64,
    payment_accrual: f64,
}

impl InterestRateFutureSecurity {
    /// Creates a security from model times.
    ///
    /// Requires `t0 ≤ t1 < t2` and positive accruals.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        currency: Currency,
        index: impl Into<String>,
        last_trading_time: f64,
        fixing_start_time: f64,
        fixing_end_time: f64,
        fixing_accrual: f64,
        notional: f64,
        payment_accrual: f64,
    ) -> FuturesResult<Self> {
        if !(last_trading_time <= fixing_start_time && fixing_start_time < fixing_end_time) {
            return Err(FuturesError::invalid_contract(format!(
                "times must satisfy t0 <= t1 < t2, got {last_trading_time}, {fixing_start_time}, {fixing_end_time}"
            )));
        }
        if !(fixing_accrual > 0.0 && payment_accrual > 0.0) {
            return Err(FuturesError::invalid_contract("accrual factors must be positive"));
        }
        Ok(Self {
            name: name.into(),
            currency,
            index: index.into(),
            last_trading_time,
            fixing_start_time,
            fixing_end_time,
            fixing_accrual,
            notional,
            payment_accrual,
        })
    }

    /// Contract name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Settlement currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Forward curve key of the underlying index.
    #[must_use]
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Last trading time t0.
    #[must_use]
    pub fn last_trading_time(&self) -> f64 {
        self.last_trading_time
    }

    /// Fixing period start t1.
    #[must_use]
    pub fn fixing_start_time(&self) -> f64 {
        self.fixing_start_time
    }

    /// Fixing period end t2.
    #[must_use]
    pub fn fixing_end_time(&self) -> f64 {
        self.fixing_end_time
    }

    /// Accrual δ of the fixing period.
    #[must_use]
    pub fn fixing_accrual(&self) -> f64 {
        self.fixing_accrual
    }

    /// Contract notional.
    #[must_use]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Accrual used to convert a price move into cash (0.25 for 3M contracts).
    #[must_use]
    pub fn payment_accrual(&self) -> f64 {
        self.payment_accrual
    }
}

/// A margined position in a STIR future.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestRateFutureTransaction {
    underlying: InterestRateFutureSecurity,
    quantity: f64,
    reference_price: ReferencePrice,
}

impl InterestRateFutureTransaction {
    /// Creates a position. Quantity is signed (negative for short).
    #[must_use]
    pub fn new(underlying: InterestRateFutureSecurity, quantity: f64, reference_price: ReferencePrice) -> Self {
        Self {
            underlying,
            quantity,
            reference_price,
        }
    }

    /// Underlying security.
    #[must_use]
    pub fn underlying(&self) -> &InterestRateFutureSecurity {
        &self.underlying
    }

    /// Signed number of contracts.
    #[must_use]
    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Margin reference.
    #[must_use]
    pub fn reference_price(&self) -> ReferencePrice {
        self.reference_price
    }

    /// Cash value of one unit of futures price.
    #[must_use]
    pub fn price_scale(&self) -> f64 {
        self.underlying.notional * self.underlying.payment_accrual * self.quantity
    }

    /// Margin value at a futures price.
    #[must_use]
    pub fn present_value_from_price(&self, price: f64) -> f64 {
        (price - self.reference_price.value()) * self.price_scale()
    }
}
