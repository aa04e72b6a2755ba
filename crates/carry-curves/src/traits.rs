//! The [`YieldCurve`] abstraction shared by all pricing code.
//!
//! A curve is described by the continuously compounded zero rate `r(t)` and
//! the sensitivity of that rate to the curve's own parameters. Point
//! sensitivities are expressed against `r(t)`, so chaining them through
//! [`YieldCurve::interest_rate_parameter_sensitivity`] gives node risk.

use std::fmt;
use std::sync::Arc;

use crate::error::CurveResult;

/// A discounting or forward-projection curve.
pub trait YieldCurve: Send + Sync + fmt::Debug {
    /// Curve name, the key of its sensitivities.
    fn name(&self) -> &str;

    /// Continuously compounded zero rate at time `t`.
    fn interest_rate(&self, t: f64) -> CurveResult<f64>;

    /// Discount factor `exp(-r(t)·t)`.
    fn discount_factor(&self, t: f64) -> CurveResult<f64> {
        Ok((-self.interest_rate(t)? * t).exp())
    }

    /// Number of curve parameters (nodes).
    fn number_of_parameters(&self) -> usize;

    /// `∂r(t)/∂p_i` for every parameter.
    fn interest_rate_parameter_sensitivity(&self, t: f64) -> CurveResult<Vec<f64>>;

    /// A copy of the curve with parameter `index` shifted by `shift`.
    fn with_parameter_shift(&self, index: usize, shift: f64) -> CurveResult<Arc<dyn YieldCurve>>;

    /// Simply compounded forward rate between `t1` and `t2` with accrual factor `accrual`.
    fn simply_compounded_forward_rate(&self, t1: f64, t2: f64, accrual: f64) -> CurveResult<f64> {
        let df1 = self.discount_factor(t1)?;
        let df2 = self.discount_factor(t2)?;
        Ok((df1 / df2 - 1.0) / accrual)
    }
}
