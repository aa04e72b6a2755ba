//! # Carry Bonds
//!
//! Fixed coupon bonds for the Carry library.
//!
//! - **Definitions**: contractual terms, coupon schedule, accrued interest with
//!   ex-coupon periods
//! - **Securities**: cash flows in model time at a valuation date
//! - **Discounting**: prices from curves, yields, durations, convexity, z-spread
//! - **Conversion factors**: Liffe, Euronext and CBOT delivery factors
//!
//! ## Example
//!
//! ```rust
//! use carry_bonds::prelude::*;
//! use carry_core::types::{Currency, Date, Frequency};
//!
//! let gilt = BondFixedDefinition::new(
//!     "UKT 5 09/07/14",
//!     Currency::GBP,
//!     "UK GOVT",
//!     Date::from_ymd(2004, 3, 7).unwrap(),
//!     Date::from_ymd(2014, 9, 7).unwrap(),
//!     0.05,
//!     Frequency::SemiAnnual,
//! )
//! .unwrap();
//! let cf = conversion_factor(&gilt, Date::from_ymd(2011, 12, 1).unwrap(), 0.03, ConversionFactorConvention::Liffe).unwrap();
//! assert!((cf - 1.0526713).abs() < 1e-12);
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

pub mod conversion_factor;
pub mod definition;
pub mod discounting;
pub mod error;
pub mod security;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::conversion_factor::{conversion_factor, ConversionFactorConvention};
    pub use crate::definition::{BondFixedDefinition, CouponPeriod, YieldConvention};
    pub use crate::discounting::BondDiscountingMethod;
    pub use crate::error::{BondError, BondResult};
    pub use crate::security::{BondFixedSecurity, FixedCoupon, FixedPayment};
}

pub use error::{BondError, BondResult};
