//! Reference price of a futures position on the valuation date.

use serde::{Deserialize, Serialize};

use carry_core::types::Date;

/// Price the daily margin is computed against.
///
/// A position traded on the valuation date margins against its trade price;
/// older positions margin against the previous settlement price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ReferencePrice {
    /// Trade price of a position opened on the valuation date.
    Trade(f64),
    /// Last margin (settlement) price.
    LastMargin(f64),
}

impl ReferencePrice {
    /// Picks the reference for a trade done on `trade_date`, seen on `valuation`.
    #[must_use]
    pub fn select(trade_date: Date, valuation: Date, trade_price: f64, last_margin_price: f64) -> Self {
        if trade_date == valuation {
            Self::Trade(trade_price)
        } else {
            Self::LastMargin(last_margin_price)
        }
    }

    /// The price.
    #[must_use]
    pub fn value(&self) -> f64 {
        match self {
            Self::Trade(p) | Self::LastMargin(p) => *p,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select() {
        let today = Date::from_ymd(2011, 6, 20).unwrap();
        let yesterday = Date::from_ymd(2011, 6, 17).unwrap();
        assert_eq!(ReferencePrice::select(today, today, 0.99, 0.98), ReferencePrice::Trade(0.99));
        assert_eq!(ReferencePrice::select(yesterday, today, 0.99, 0.98), ReferencePrice::LastMargin(0.98));
        assert_eq!(ReferencePrice::LastMargin(0.98).value(), 0.98);
    }
}
