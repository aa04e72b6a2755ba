use std::sync::Arc;

use carry_math::interpolation::{Interpolator, LinearInterpolator};

use super::{check_index, node_interpolator};
use crate::error::CurveResult;
use crate::traits::YieldCurve;

/// Curve of continuously compounded zero rates at nodes.
///
/// Linear between nodes, flat before the first node and linear after the last.
///
/// # Example
///
/// ```rust
/// use carry_curves::curves::InterpolatedCurve;
/// use carry_curves::traits::YieldCurve;
///
/// let curve = InterpolatedCurve::new("USD-DSC", vec![1.0, 5.0], vec![0.01, 0.02]).unwrap();
/// let df = curve.discount_factor(3.0).unwrap();
/// assert!((df - (-0.015_f64 * 3.0).exp()).abs() < 1e-15);
/// ```
#[derive(Debug, Clone)]
pub struct InterpolatedCurve {
    name: String,
    rates: LinearInterpolator,
}

impl InterpolatedCurve {
    /// Creates a curve from node times and zero rates.
    pub fn new(name: impl Into<String>, times: Vec<f64>, rates: Vec<f64>) -> CurveResult<Self> {
        let name = name.into();
        let rates = node_interpolator(&name, times, rates)?;
        Ok(Self { name, rates })
    }

    /// Node times.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        self.rates.xs()
    }

    /// Node zero rates.
    #[must_use]
    pub fn rates(&self) -> &[f64] {
        self.rates.ys()
    }
}

impl YieldCurve for InterpolatedCurve {
    fn name(&self) -> &str {
        &self.name
    }

    fn interest_rate(&self, t: f64) -> CurveResult<f64> {
        Ok(self.rates.interpolate(t)?)
    }

    fn number_of_parameters(&self) -> usize {
        self.rates.len()
    }

    fn interest_rate_parameter_sensitivity(&self, t: f64) -> CurveResult<Vec<f64>> {
        Ok(self.rates.node_sensitivity(t)?)
    }

    fn with_parameter_shift(&self, index: usize, shift: f64) -> CurveResult<Arc<dyn YieldCurve>> {
        check_index(&self.name, index, self.rates.len())?;
        let mut rates = self.rates.ys().to_vec();
        rates[index] += shift;
        Ok(Arc::new(Self::new(
            self.name.clone(),
            self.rates.xs().to_vec(),
            rates,
        )?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn curve() -> InterpolatedCurve {
        InterpolatedCurve::new("EUR-DSC", vec![0.5, 1.0, 2.0, 5.0, 10.0], vec![0.005, 0.007, 0.01, 0.015, 0.02])
            .unwrap()
    }

    #[test]
    fn test_discount_factor_at_nodes() {
        let c = curve();
        assert_relative_eq!(c.discount_factor(2.0).unwrap(), (-0.02_f64).exp(), epsilon = 1e-15);
        assert_relative_eq!(c.discount_factor(0.0).unwrap(), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_parameter_sensitivity_matches_bump() {
        let c = curve();
        let h = 1e-7;
        for t in [0.25, 1.5, 7.0, 12.0] {
            let sens = c.interest_rate_parameter_sensitivity(t).unwrap();
            for (i, s) in sens.iter().enumerate() {
                let bumped = c.with_parameter_shift(i, h).unwrap();
                let fd = (bumped.interest_rate(t).unwrap() - c.interest_rate(t).unwrap()) / h;
                assert_relative_eq!(*s, fd, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_shift_out_of_range() {
        assert!(curve().with_parameter_shift(5, 1e-4).is_err());
    }

    #[test]
    fn test_forward_rate() {
        let c = curve();
        let fwd = c.simply_compounded_forward_rate(1.0, 2.0, 1.0).unwrap();
        let expected = (-0.007_f64).exp() / (-0.02_f64).exp() - 1.0;
        assert_relative_eq!(fwd, expected, epsilon = 1e-15);
    }
}
