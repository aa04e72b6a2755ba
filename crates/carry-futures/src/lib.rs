//! # Carry Futures
//!
//! Interest rate futures for the Carry library.
//!
//! - **Bond futures**: delivery basket, conversion factors, cheapest to
//!   deliver, net and gross basis, Hull-White delivery option
//! - **STIR futures**: forward-rate price, Hull-White convexity adjustment
//! - **Hull-White**: one-factor model with piecewise constant volatility and
//!   adjoint volatility sensitivities
//!
//! ## Example
//!
//! ```rust
//! use carry_futures::prelude::*;
//!
//! let params = HullWhiteParameters::constant(0.05, 0.01).unwrap();
//! let gamma = HullWhiteModel.futures_convexity_factor(&params, 1.0, 1.0, 1.25);
//! assert!(gamma > 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]

pub mod bond;
pub mod error;
pub mod hull_white;
pub mod reference_price;
pub mod stir;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bond::{
        BondFuturesDiscountingMethod, BondFuturesHullWhiteMethod, BondFuturesSecurity,
        BondFuturesSecurityDefinition, BondFuturesTransaction, BondFuturesTransactionDefinition, DeliveryDates,
    };
    pub use crate::error::{FuturesError, FuturesResult};
    pub use crate::hull_white::{HullWhiteModel, HullWhiteParameters, HullWhiteProvider};
    pub use crate::reference_price::ReferencePrice;
    pub use crate::stir::{
        InterestRateFutureDiscountingMethod, InterestRateFutureHullWhiteMethod, InterestRateFutureSecurity,
        InterestRateFutureSecurityDefinition, InterestRateFutureTransaction, InterestRateFutureTransactionDefinition,
    };
}

pub use error::{FuturesError, FuturesResult};
