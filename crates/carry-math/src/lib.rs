//! # Carry Math
//!
//! Numerical building blocks for the Carry library:
//!
//! - **Solvers**: Brent root finding and bracket expansion with hard iteration caps
//! - **Interpolation**: linear 1D interpolation with node weights, bilinear surfaces
//! - **Distributions**: standard normal cdf, pdf and inverse
//! - **Dual numbers**: forward-mode differentiation of closed-form formulas

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
#![allow(clippy::unreadable_literal)]
#![allow(clippy::cast_precision_loss)]

pub mod distributions;
pub mod dual;
pub mod error;
pub mod interpolation;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::distributions::{normal_cdf, normal_inverse_cdf, normal_pdf};
    pub use crate::dual::Dual;
    pub use crate::error::{MathError, MathResult};
    pub use crate::interpolation::{Extrapolation, GridSurface, Interpolator, LinearInterpolator};
    pub use crate::solvers::{brent, find_bracket, SolverConfig, SolverResult};
}

pub use error::{MathError, MathResult};
