//! Curve implementations.
//!
//! - [`InterpolatedCurve`]: linearly interpolated continuously compounded zero rates
//! - [`PeriodicCurve`]: linearly interpolated periodically compounded yields
//! - [`ConstantCurve`]: a single flat continuously compounded rate
//! - [`SpreadCurve`]: a base curve decorated with a parallel, periodic or curve spread

mod constant;
mod interpolated;
mod periodic;
mod spread;

pub use constant::ConstantCurve;
pub use interpolated::InterpolatedCurve;
pub use periodic::PeriodicCurve;
pub use spread::{Spread, SpreadCompounding, SpreadCurve};

use carry_math::interpolation::{Extrapolation, LinearInterpolator};

use crate::error::{CurveError, CurveResult};

pub(crate) fn node_interpolator(
    name: &str,
    times: Vec<f64>,
    values: Vec<f64>,
) -> CurveResult<LinearInterpolator> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(CurveError::invalid_curve(name, "node values must be finite"));
    }
    let interpolator = LinearInterpolator::new(times, values)
        .map_err(|e| CurveError::invalid_curve(name, e.to_string()))?
        .with_extrapolation(Extrapolation::Flat, Extrapolation::Linear);
    Ok(interpolator)
}

pub(crate) fn check_index(name: &str, index: usize, count: usize) -> CurveResult<()> {
    if index >= count {
        return Err(CurveError::ParameterOutOfRange {
            name: name.to_string(),
            index,
            count,
        });
    }
    Ok(())
}
