//! # Carry Curves
//!
//! Yield curves and the curve data supplied to pricing calls.
//!
//! - **Curves**: interpolated zero-rate, periodic-yield and constant curves,
//!   spread-decorated curves over a shared base
//! - **Providers**: [`MulticurveProvider`](provider::MulticurveProvider) with
//!   discounting and forward curves, [`IssuerProvider`](provider::IssuerProvider)
//!   adding issuer credit curves
//! - **Sensitivities**: point sensitivities against zero rates, node
//!   (parameter) sensitivities and market-quote sensitivities
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use carry_core::Currency;
//! use carry_curves::prelude::*;
//!
//! let curve = Arc::new(InterpolatedCurve::new("USD-DSC", vec![1.0, 10.0], vec![0.02, 0.03]).unwrap());
//! let provider = MulticurveProvider::new().with_discount_curve(Currency::USD, curve);
//! let df = provider.discount_factor(Currency::USD, 1.0).unwrap();
//! assert!((df - (-0.02_f64).exp()).abs() < 1e-15);
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

pub mod curves;
pub mod error;
pub mod provider;
pub mod sensitivity;
pub mod traits;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::curves::{ConstantCurve, InterpolatedCurve, PeriodicCurve, Spread, SpreadCompounding, SpreadCurve};
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::provider::{CurveLookup, IssuerKey, IssuerProvider, MulticurveProvider};
    pub use crate::sensitivity::{
        market_quote_sensitivity, parameter_sensitivity, CurveBuildingBlock, CurveSensitivity,
        MultipleCurrencyCurveSensitivity, ParameterSensitivity,
    };
    pub use crate::traits::YieldCurve;
}

pub use error::{CurveError, CurveResult};
pub use traits::YieldCurve;
