//! Bilinear interpolation on a rectangular grid.

use serde::{Deserialize, Serialize};

use super::{check_strictly_increasing, find_segment};
use crate::error::{MathError, MathResult};

/// A surface `z = S(x, y)` interpolated bilinearly on a grid.
///
/// Queries outside the grid are clamped to the boundary on each axis (flat
/// extrapolation), so the gradient along a clamped axis is zero.
///
/// # Example
///
/// ```rust
/// use carry_math::interpolation::GridSurface;
///
/// let surface = GridSurface::from_rows(
///     vec![0.25, 0.5],
///     vec![-0.1, 0.0, 0.1],
///     vec![vec![0.30, 0.25, 0.28], vec![0.32, 0.27, 0.30]],
/// )
/// .unwrap();
/// assert!((surface.value(0.25, 0.0).unwrap() - 0.25).abs() < 1e-15);
/// // flat outside the grid
/// assert!((surface.value(2.0, 1.0).unwrap() - 0.30).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSurface {
    xs: Vec<f64>,
    ys: Vec<f64>,
    // row-major: values[i * ys.len() + j] = S(xs[i], ys[j])
    values: Vec<f64>,
}

struct AxisPosition {
    lower: usize,
    upper: usize,
    weight: f64,
    slope_scale: f64,
}

impl GridSurface {
    /// Creates a surface from row-major values (`xs.len()` rows of `ys.len()`).
    pub fn new(xs: Vec<f64>, ys: Vec<f64>, values: Vec<f64>) -> MathResult<Self> {
        if xs.is_empty() || ys.is_empty() {
            return Err(MathError::insufficient_data(1, 0));
        }
        check_strictly_increasing(&xs, "x")?;
        check_strictly_increasing(&ys, "y")?;
        if values.len() != xs.len() * ys.len() {
            return Err(MathError::dimension_mismatch(xs.len() * ys.len(), values.len()));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(MathError::invalid_input("surface values must be finite"));
        }
        Ok(Self { xs, ys, values })
    }

    /// Creates a surface from one row of `y` values per `x` node.
    pub fn from_rows(xs: Vec<f64>, ys: Vec<f64>, rows: Vec<Vec<f64>>) -> MathResult<Self> {
        if rows.len() != xs.len() {
            return Err(MathError::dimension_mismatch(xs.len(), rows.len()));
        }
        if let Some(bad) = rows.iter().find(|r| r.len() != ys.len()) {
            return Err(MathError::dimension_mismatch(ys.len(), bad.len()));
        }
        Self::new(xs, ys, rows.into_iter().flatten().collect())
    }

    /// Creates a flat surface with a single node.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self {
            xs: vec![0.0],
            ys: vec![0.0],
            values: vec![value],
        }
    }

    /// X nodes.
    #[must_use]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Y nodes.
    #[must_use]
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    fn node(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.ys.len() + j]
    }

    fn position(nodes: &[f64], v: f64) -> AxisPosition {
        let n = nodes.len();
        if n == 1 || v <= nodes[0] {
            return AxisPosition {
                lower: 0,
                upper: 0,
                weight: 0.0,
                slope_scale: 0.0,
            };
        }
        if v >= nodes[n - 1] {
            return AxisPosition {
                lower: n - 1,
                upper: n - 1,
                weight: 0.0,
                slope_scale: 0.0,
            };
        }
        let i = find_segment(nodes, v);
        let width = nodes[i + 1] - nodes[i];
        AxisPosition {
            lower: i,
            upper: i + 1,
            weight: (v - nodes[i]) / width,
            slope_scale: 1.0 / width,
        }
    }

    fn check(x: f64, y: f64) -> MathResult<()> {
        if x.is_nan() || y.is_nan() {
            return Err(MathError::invalid_input("surface query point is NaN"));
        }
        Ok(())
    }

    /// Value at `(x, y)`.
    pub fn value(&self, x: f64, y: f64) -> MathResult<f64> {
        Self::check(x, y)?;
        let px = Self::position(&self.xs, x);
        let py = Self::position(&self.ys, y);
        let z00 = self.node(px.lower, py.lower);
        let z01 = self.node(px.lower, py.upper);
        let z10 = self.node(px.upper, py.lower);
        let z11 = self.node(px.upper, py.upper);
        let lower = z00 + py.weight * (z01 - z00);
        let upper = z10 + py.weight * (z11 - z10);
        Ok(lower + px.weight * (upper - lower))
    }

    /// Gradient `(∂S/∂x, ∂S/∂y)` at `(x, y)`.
    pub fn gradient(&self, x: f64, y: f64) -> MathResult<(f64, f64)> {
        Self::check(x, y)?;
        let px = Self::position(&self.xs, x);
        let py = Self::position(&self.ys, y);
        let z00 = self.node(px.lower, py.lower);
        let z01 = self.node(px.lower, py.upper);
        let z10 = self.node(px.upper, py.lower);
        let z11 = self.node(px.upper, py.upper);
        let lower = z00 + py.weight * (z01 - z00);
        let upper = z10 + py.weight * (z11 - z10);
        let dx = (upper - lower) * px.slope_scale;
        let dy = ((z01 - z00) + px.weight * ((z11 - z10) - (z01 - z00))) * py.slope_scale;
        Ok((dx, dy))
    }
}
