//! Curve sensitivities.
//!
//! Pricing methods return point sensitivities against continuously
//! compounded zero rates ([`CurveSensitivity`]). These are chained through
//! the curves' parameter derivatives to node risk ([`ParameterSensitivity`])
//! and optionally through calibration Jacobians to market-quote risk.

mod market_quote;
mod parameter;
mod point;

pub use market_quote::{market_quote_sensitivity, CurveBuildingBlock};
pub use parameter::{parameter_sensitivity, ParameterSensitivity};
pub use point::{CurveSensitivity, MultipleCurrencyCurveSensitivity};
