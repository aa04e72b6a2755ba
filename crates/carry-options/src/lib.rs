//! # Carry Options
//!
//! European options on bond and STIR futures.
//!
//! - **Formulas**: Black, Bachelier and the Hagan SABR volatility with exact
//!   first derivatives
//! - **Volatility models**: flat, expiry/strike and expiry/moneyness surfaces,
//!   SABR by expiry, Hull-White
//! - **Securities**: margined and premium-style options with date-based
//!   definitions
//! - **Pricing**: one [`FuturesOptionMethod`](method::FuturesOptionMethod) for
//!   every model, with Greeks, curve and volatility sensitivities
//!
//! ## Example
//!
//! ```rust
//! use carry_options::formulas::{black_greeks, normal_price};
//!
//! let g = black_greeks(1.12, 1.16, 0.3, 0.05, true);
//! assert!(g.delta > 0.0 && g.delta < 0.5);
//! assert!(normal_price(0.99, 0.99, 0.5, 0.0, true) == 0.0);
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
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::too_many_arguments)]

pub mod definition;
pub mod error;
pub mod formulas;
pub mod method;
pub mod provider;
pub mod security;
pub mod volatility;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::definition::{
        FuturesOptionMarginTransactionDefinition, FuturesOptionPremiumTransactionDefinition,
        FuturesOptionSecurityDefinition, FuturesUnderlyingDefinition,
    };
    pub use crate::error::{OptionsError, OptionsResult};
    pub use crate::formulas::{OptionGreeks, SabrParameters};
    pub use crate::method::FuturesOptionMethod;
    pub use crate::provider::OptionProvider;
    pub use crate::security::{
        FuturesOptionMarginTransaction, FuturesOptionPremiumTransaction, FuturesOptionSecurity, FuturesUnderlying,
        OptionPosition, OptionStyle, Payment,
    };
    pub use crate::volatility::{SabrSurface, VolatilityModel, VolatilitySensitivity};
}

pub use error::{OptionsError, OptionsResult};
