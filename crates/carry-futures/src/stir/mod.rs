//! Short-term interest rate futures.
//!
//! A STIR future on a deposit index quotes `1 − rate`. Positions are margined
//! daily so the value is linear in the futures price.

mod definition;
mod discounting;
mod hull_white;
mod security;

pub use definition::{InterestRateFutureSecurityDefinition, InterestRateFutureTransactionDefinition};
pub use discounting::InterestRateFutureDiscountingMethod;
pub use hull_white::InterestRateFutureHullWhiteMethod;
pub use security::{InterestRateFutureSecurity, InterestRateFutureTransaction};
