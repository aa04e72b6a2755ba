//! # Carry Analytics
//!
//! Instrument-level analytics over the Carry pricing methods.
//!
//! - **Instruments**: a single [`Instrument`](instrument::Instrument) enum for
//!   bonds, bond and STIR futures and options on futures
//! - **Market data**: curves with optional Hull-White parameters and
//!   volatility model
//! - **Calculators**: present value, curve sensitivity, market quote, par
//!   rate, convexity adjustment, parameter and market-quote sensitivities,
//!   PV01
//!
//! ## Features
//!
//! - `parallel`: batch pricing on rayon's thread pool
//!
//! ## Example
//!
//! ```rust
//! use carry_analytics::prelude::*;
//!
//! assert_eq!(Measure::ParRate.to_string(), "par rate");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod calculator;
pub mod error;
pub mod instrument;
pub mod market;
pub mod measure;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calculator::InstrumentCalculator;
    pub use crate::error::{AnalyticsError, AnalyticsResult};
    pub use crate::instrument::Instrument;
    pub use crate::market::MarketData;
    pub use crate::measure::Measure;
}

pub use error::{AnalyticsError, AnalyticsResult};
