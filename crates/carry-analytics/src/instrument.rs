//! The instruments the calculators value.

use carry_bonds::security::BondFixedSecurity;
use carry_core::types::Currency;
use carry_futures::bond::BondFuturesTransaction;
use carry_futures::stir::InterestRateFutureTransaction;
use carry_options::security::{FuturesOptionMarginTransaction, FuturesOptionPremiumTransaction};
use serde::{Deserialize, Serialize};

/// Every instrument the engine values, as converted at a valuation date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Instrument {
    /// Fixed-coupon bond.
    Bond(BondFixedSecurity),
    /// Margined bond futures position.
    BondFutures(BondFuturesTransaction),
    /// Margined STIR futures position.
    InterestRateFuture(InterestRateFutureTransaction),
    /// Margined option on futures.
    FuturesOptionMargin(FuturesOptionMarginTransaction),
    /// Premium-style option on futures with its premium.
    FuturesOptionPremium(FuturesOptionPremiumTransaction),
}

impl Instrument {
    /// Identifier used in errors and logs.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Instrument::Bond(bond) => bond.id().to_string(),
            Instrument::BondFutures(transaction) => transaction.underlying().name().to_string(),
            Instrument::InterestRateFuture(transaction) => transaction.underlying().name().to_string(),
            Instrument::FuturesOptionMargin(transaction) => transaction.security().description(),
            Instrument::FuturesOptionPremium(transaction) => transaction.security().description(),
        }
    }

    /// Currency the present value is expressed in.
    #[must_use]
    pub fn currency(&self) -> Currency {
        match self {
            Instrument::Bond(bond) => bond.currency(),
            Instrument::BondFutures(transaction) => transaction.underlying().currency(),
            Instrument::InterestRateFuture(transaction) => transaction.underlying().currency(),
            Instrument::FuturesOptionMargin(transaction) => transaction.security().currency(),
            Instrument::FuturesOptionPremium(transaction) => transaction.security().currency(),
        }
    }
}

impl From<BondFixedSecurity> for Instrument {
    fn from(bond: BondFixedSecurity) -> Self {
        Instrument::Bond(bond)
    }
}

impl From<BondFuturesTransaction> for Instrument {
    fn from(transaction: BondFuturesTransaction) -> Self {
        Instrument::BondFutures(transaction)
    }
}

impl From<InterestRateFutureTransaction> for Instrument {
    fn from(transaction: InterestRateFutureTransaction) -> Self {
        Instrument::InterestRateFuture(transaction)
    }
}

impl From<FuturesOptionMarginTransaction> for Instrument {
    fn from(transaction: FuturesOptionMarginTransaction) -> Self {
        Instrument::FuturesOptionMargin(transaction)
    }
}

impl From<FuturesOptionPremiumTransaction> for Instrument {
    fn from(transaction: FuturesOptionPremiumTransaction) -> Self {
        Instrument::FuturesOptionPremium(transaction)
    }
}
