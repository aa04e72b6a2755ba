//! Hull-White one-factor model with piecewise constant volatility.
//!
//! The short rate follows `dr = (θ(t) − a·r)dt + σ(t)dW` with constant mean
//! reversion `a` and volatility `σ` constant between change times. The
//! quantities here are the building blocks of futures convexity and of
//! bond-futures delivery option pricing.

mod model;
mod parameters;
mod provider;

pub use model::HullWhiteModel;
pub use parameters::{HullWhiteParameters, VOLATILITY_TIME_HORIZON};
pub use provider::HullWhiteProvider;
