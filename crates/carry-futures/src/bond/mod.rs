//! Bond futures.
//!
//! A bond future delivers any bond of its basket; the short picks the
//! cheapest to deliver. The futures price is the minimum over the basket of
//! forward clean price divided by conversion factor, optionally with the
//! Hull-White value of the delivery switch option.

mod definition;
mod discounting;
mod hull_white;
mod security;

pub use definition::{BondFuturesSecurityDefinition, BondFuturesTransactionDefinition, DeliveryDates};
pub use discounting::BondFuturesDiscountingMethod;
pub use hull_white::{BondFuturesHullWhiteMethod, DEFAULT_NUMBER_OF_POINTS, MAX_NUMBER_OF_POINTS, MIN_NUMBER_OF_POINTS};
pub use security::{BondFuturesSecurity, BondFuturesTransaction};
