//! Options on futures and positions in them, as seen from a valuation date.

use carry_core::types::Currency;
use carry_futures::bond::BondFuturesSecurity;
use carry_futures::reference_price::ReferencePrice;
use carry_futures::stir::InterestRateFutureSecurity;
use serde::{Deserialize, Serialize};

use crate::error::{OptionsError, OptionsResult};

const EXPIRY_TOLERANCE: f64 = 1e-12;

/// The futures contract an option is written on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FuturesUnderlying {
    /// Bond future.
    Bond(BondFuturesSecurity),
    /// STIR future.
    Stir(InterestRateFutureSecurity),
}

impl FuturesUnderlying {
    /// Contract name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Bond(f) => f.name(),
            Self::Stir(f) => f.name(),
        }
    }

    /// Settlement currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        match self {
            Self::Bond(f) => f.currency(),
            Self::Stir(f) => f.currency(),
        }
    }

    /// Last trading time of the future.
    #[must_use]
    pub fn last_trading_time(&self) -> f64 {
        match self {
            Self::Bond(f) => f.trading_last_time(),
            Self::Stir(f) => f.last_trading_time(),
        }
    }

    /// Contract notional.
    #[must_use]
    pub fn notional(&self) -> f64 {
        match self {
            Self::Bond(f) => f.notional(),
            Self::Stir(f) => f.notional(),
        }
    }

    /// Factor applied to price moves on top of the notional: the payment
    /// accrual for STIR contracts, 1 for bond futures.
    #[must_use]
    pub fn accrual_factor(&self) -> f64 {
        match self {
            Self::Bond(_) => 1.0,
            Self::Stir(f) => f.payment_accrual(),
        }
    }
}

/// How the option premium changes hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionStyle {
    /// Daily margin on the option price; no premium cash flow.
    Margined,
    /// Premium paid up front.
    Premium,
}

/// European option on a futures contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuturesOptionSecurity {
    underlying: FuturesUnderlying,
    expiration_time: f64,
    strike: f64,
    is_call: bool,
    style: OptionStyle,
}

impl FuturesOptionSecurity {
    /// Creates an option expiring no later than the future stops trading.
    pub fn new(
        underlying: FuturesUnderlying,
        expiration_time: f64,
        strike: f64,
        is_call: bool,
        style: OptionStyle,
    ) -> OptionsResult<Self> {
        if !(expiration_time.is_finite() && expiration_time >= 0.0) {
            return Err(OptionsError::invalid_option(format!(
                "expiration time must be non-negative, got {expiration_time}"
            )));
        }
        if expiration_time > underlying.last_trading_time() + EXPIRY_TOLERANCE {
            return Err(OptionsError::invalid_option(format!(
                "option expires at {expiration_time} after {} stops trading at {}",
                underlying.name(),
                underlying.last_trading_time()
            )));
        }
        if !strike.is_finite() {
            return Err(OptionsError::invalid_option("strike must be finite"));
        }
        Ok(Self {
            underlying,
            expiration_time,
            strike,
            is_call,
            style,
        })
    }

    /// Underlying future.
    #[must_use]
    pub fn underlying(&self) -> &FuturesUnderlying {
        &self.underlying
    }

    /// Expiration time.
    #[must_use]
    pub fn expiration_time(&self) -> f64 {
        self.expiration_time
    }

    /// Strike in futures price terms.
    #[must_use]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// True for a call on the futures price.
    #[must_use]
    pub fn is_call(&self) -> bool {
        self.is_call
    }

    /// Premium style.
    #[must_use]
    pub fn style(&self) -> OptionStyle {
        self.style
    }

    /// Settlement currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.underlying.currency()
    }

    /// Identifier used in messages.
    #[must_use]
    pub fn description(&self) -> String {
        format!(
            "{} {} {}",
            self.underlying.name(),
            if self.is_call { "call" } else { "put" },
            self.strike
        )
    }

    /// The same terms with the call flag set to `is_call`.
    #[must_use]
    pub fn with_call_flag(&self, is_call: bool) -> Self {
        Self {
            is_call,
            ..self.clone()
        }
    }

    /// Value of one unit of price for one option.
    #[must_use]
    pub fn unit_amount(&self) -> f64 {
        self.underlying.notional() * self.underlying.accrual_factor()
    }
}

/// A single cash payment at a time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Payment currency.
    pub currency: Currency,
    /// Payment time; negative once paid.
    pub time: f64,
    /// Signed amount, negative when paid by the holder.
    pub amount: f64,
}

impl Payment {
    /// Creates a payment.
    #[must_use]
    pub fn new(currency: Currency, time: f64, amount: f64) -> Self {
        Self { currency, time, amount }
    }

    /// True when the payment is still to come.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.time >= 0.0
    }
}

/// A position in a margined option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuturesOptionMarginTransaction {
    security: FuturesOptionSecurity,
    quantity: f64,
    reference_price: ReferencePrice,
}

impl FuturesOptionMarginTransaction {
    /// Creates a position of `quantity` margined options.
    pub fn new(security: FuturesOptionSecurity, quantity: f64, reference_price: ReferencePrice) -> OptionsResult<Self> {
        if security.style() != OptionStyle::Margined {
            return Err(OptionsError::invalid_option(format!(
                "{} is not a margined option",
                security.description()
            )));
        }
        Ok(Self {
            security,
            quantity,
            reference_price,
        })
    }

    /// Option traded.
    #[must_use]
    pub fn security(&self) -> &FuturesOptionSecurity {
        &self.security
    }

    /// Signed number of options.
    #[must_use]
    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Price the margin is measured from.
    #[must_use]
    pub fn reference_price(&self) -> ReferencePrice {
        self.reference_price
    }

    /// Value of one unit of option price for the whole position.
    #[must_use]
    pub fn price_scale(&self) -> f64 {
        self.quantity * self.security.unit_amount()
    }

    /// Margin value at an option price.
    #[must_use]
    pub fn present_value_from_price(&self, price: f64) -> f64 {
        (price - self.reference_price.value()) * self.price_scale()
    }
}

/// A position in a premium-style option with its premium payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuturesOptionPremiumTransaction {
    security: FuturesOptionSecurity,
    quantity: f64,
    premium: Payment,
}

impl FuturesOptionPremiumTransaction {
    /// Creates a position of `quantity` premium-style options.
    pub fn new(security: FuturesOptionSecurity, quantity: f64, premium: Payment) -> OptionsResult<Self> {
        if security.style() != OptionStyle::Premium {
            return Err(OptionsError::invalid_option(format!(
                "{} is not a premium-style option",
                security.description()
            )));
        }
        if premium.currency != security.currency() {
            return Err(OptionsError::invalid_option(format!(
                "premium paid in {} for an option settled in {}",
                premium.currency,
                security.currency()
            )));
        }
        Ok(Self {
            security,
            quantity,
            premium,
        })
    }

    /// Option traded.
    #[must_use]
    pub fn security(&self) -> &FuturesOptionSecurity {
        &self.security
    }

    /// Signed number of options.
    #[must_use]
    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Premium payment.
    #[must_use]
    pub fn premium(&self) -> &Payment {
        &self.premium
    }

    /// Value of one unit of option price for the whole position.
    #[must_use]
    pub fn price_scale(&self) -> f64 {
        self.quantity * self.security.unit_amount()
    }
}

/// A position in options, margined or premium-style.
pub trait OptionPosition {
    /// Option held.
    fn option(&self) -> &FuturesOptionSecurity;

    /// Value of one unit of option price for the whole position.
    fn position_scale(&self) -> f64;
}

impl OptionPosition for FuturesOptionMarginTransaction {
    fn option(&self) -> &FuturesOptionSecurity {
        &self.security
    }

    fn position_scale(&self) -> f64 {
        self.price_scale()
    }
}

impl OptionPosition for FuturesOptionPremiumTransaction {
    fn option(&self) -> &FuturesOptionSecurity {
        &self.security
    }

    fn position_scale(&self) -> f64 {
        self.price_scale()
    }
}
