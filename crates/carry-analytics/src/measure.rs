//! Measures the calculators produce.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A quantity computed for an [`Instrument`](crate::instrument::Instrument).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    /// Present value in the instrument currency.
    PresentValue,
    /// Point sensitivities of the present value to zero rates.
    CurveSensitivity,
    /// Quoted price: clean price for bonds, futures price, option price.
    MarketQuote,
    /// Rate implied by the curves: bond yield or futures rate.
    ParRate,
    /// Futures price minus its no-convexity counterpart.
    ConvexityAdjustment,
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Measure::PresentValue => "present value",
            Measure::CurveSensitivity => "curve sensitivity",
            Measure::MarketQuote => "market quote",
            Measure::ParRate => "par rate",
            Measure::ConvexityAdjustment => "convexity adjustment",
        };
        write!(f, "{name}")
    }
}
