//! Interpolation on one and two dimensional grids.
//!
//! - [`LinearInterpolator`]: piecewise linear with configurable extrapolation
//!   on each side and node weights for sensitivity chaining
//! - [`GridSurface`]: bilinear interpolation on an `x × y` grid with flat
//!   extrapolation on both axes

mod linear;
mod surface;

pub use linear::LinearInterpolator;
pub use surface::GridSurface;

use serde::{Deserialize, Serialize};

use crate::error::MathResult;

/// Behaviour outside the node range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Extrapolation {
    /// Keep the boundary value.
    #[default]
    Flat,
    /// Extend the boundary segment.
    Linear,
}

/// Trait for one dimensional interpolation methods.
pub trait Interpolator: Send + Sync {
    /// Returns the interpolated value at x.
    fn interpolate(&self, x: f64) -> MathResult<f64>;

    /// Returns the first derivative at x.
    fn derivative(&self, x: f64) -> MathResult<f64>;

    /// Sensitivity of the value at x to each node value.
    fn node_sensitivity(&self, x: f64) -> MathResult<Vec<f64>>;

    /// Returns the minimum x value in the data.
    fn min_x(&self) -> f64;

    /// Returns the maximum x value in the data.
    fn max_x(&self) -> f64;

    /// Checks if x is within the interpolation range.
    fn in_range(&self, x: f64) -> bool {
        x >= self.min_x() && x <= self.max_x()
    }
}

pub(crate) fn check_strictly_increasing(xs: &[f64], axis: &str) -> MathResult<()> {
    if xs.windows(2).any(|w| w[1] <= w[0]) || xs.iter().any(|x| !x.is_finite()) {
        return Err(crate::error::MathError::invalid_input(format!(
            "{axis} values must be finite and strictly increasing"
        )));
    }
    Ok(())
}

/// Index `i` such that `xs[i] <= x < xs[i + 1]`, clamped to a valid segment.
pub(crate) fn find_segment(xs: &[f64], x: f64) -> usize {
    let n = xs.len();
    if n < 2 {
        return 0;
    }
    let upper = xs.partition_point(|probe| *probe <= x);
    upper.saturating_sub(1).min(n - 2)
}
