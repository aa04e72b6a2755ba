use serde::{Deserialize, Serialize};

use carry_bonds::security::BondFixedSecurity;
use carry_core::types::Currency;

use super::definition::check_basket;
use crate::error::{FuturesError, FuturesResult};
use crate::reference_price::ReferencePrice;

/// A bond future in model time.
///
/// Each deliverable bond appears twice: settled on the last delivery date,
/// which drives forward prices, and settled spot, which drives gross basis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondFuturesSecurity {
    name: String,
    trading_last_time: f64,
    notice_first_time: f64,
    notice_last_time: f64,
    delivery_first_time: f64,
    delivery_last_time: f64,
    notional: f64,
    delivery_basket: Vec<BondFixedSecurity>,
    spot_basket: Vec<BondFixedSecurity>,
    conversion_factors: Vec<f64>,
}

impl BondFuturesSecurity {
    /// Creates a security.
    ///
    /// `times` holds trading last, notice first, notice last, delivery first
    /// and delivery last, in that order.
    pub fn new(
        name: impl Into<String>,
        times: [f64; 5],
        notional: f64,
        delivery_basket: Vec<BondFixedSecurity>,
        spot_basket: Vec<BondFixedSecurity>,
        conversion_factors: Vec<f64>,
    ) -> FuturesResult<Self> {
        let name = name.into();
        check_basket(&name, delivery_basket.len(), &conversion_factors)?;
        if spot_basket.len() != delivery_basket.len() {
            return Err(FuturesError::LengthMismatch {
                expected: delivery_basket.len(),
                actual: spot_basket.len(),
            });
        }
        let currency = delivery_basket[0].currency();
        if delivery_basket.iter().any(|b| b.currency() != currency) {
            return Err(FuturesError::invalid_contract(format!(
                "{name}: deliverable bonds must share one currency"
            )));
        }
        let [trading_last_time, notice_first_time, notice_last_time, delivery_first_time, delivery_last_time] = times;
        Ok(Self {
            name,
            trading_last_time,
            notice_first_time,
            notice_last_time,
            delivery_first_time,
            delivery_last_time,
            notional,
            delivery_basket,
            spot_basket,
            conversion_factors,
        })
    }

    /// Contract name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Currency of the deliverable bonds.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.delivery_basket[0].currency()
    }

    /// Last trading time.
    #[must_use]
    pub fn trading_last_time(&self) -> f64 {
        self.trading_last_time
    }

    /// First notice time.
    #[must_use]
    pub fn notice_first_time(&self) -> f64 {
        self.notice_first_time
    }

    /// Last notice time.
    #[must_use]
    pub fn notice_last_time(&self) -> f64 {
        self.notice_last_time
    }

    /// First delivery time.
    #[must_use]
    pub fn delivery_first_time(&self) -> f64 {
        self.delivery_first_time
    }

    /// Last delivery time.
    #[must_use]
    pub fn delivery_last_time(&self) -> f64 {
        self.delivery_last_time
    }

    /// Contract notional.
    #[must_use]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Basket settled on the last delivery date.
    #[must_use]
    pub fn delivery_basket(&self) -> &[BondFixedSecurity] {
        &self.delivery_basket
    }

    /// Basket settled spot.
    #[must_use]
    pub fn spot_basket(&self) -> &[BondFixedSecurity] {
        &self.spot_basket
    }

    /// Conversion factors, aligned with the baskets.
    #[must_use]
    pub fn conversion_factors(&self) -> &[f64] {
        &self.conversion_factors
    }
}

/// A margined position in a bond future.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondFuturesTransaction {
    underlying: BondFuturesSecurity,
    quantity: f64,
    reference_price: ReferencePrice,
}

impl BondFuturesTransaction {
    /// Creates a position. Quantity is signed (negative for short).
    #[must_use]
    pub fn new(underlying: BondFuturesSecurity, quantity: f64, reference_price: ReferencePrice) -> Self {
        Self {
            underlying,
            quantity,
            reference_price,
        }
    }

    /// Underlying security.
    #[must_use]
    pub fn underlying(&self) -> &BondFuturesSecurity {
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
        self.underlying.notional * self.quantity
    }

    /// Margin value at a futures price.
    #[must_use]
    pub fn present_value_from_price(&self, price: f64) -> f64 {
        (price - self.reference_price.value()) * self.price_scale()
    }
}
