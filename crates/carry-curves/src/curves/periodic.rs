use std::sync::Arc;

use carry_math::interpolation::{Interpolator, LinearInterpolator};

use super::{check_index, node_interpolator};
use crate::error::{CurveError, CurveResult};
use crate::traits::YieldCurve;

/// Curve of periodically compounded yields at nodes.
///
/// The discount factor is `(1 + y(t)/m)^(-m·t)` where `y` is interpolated
/// linearly on the yields (flat left, linear right) and `m` is the number of
/// compounding periods per year.
#[derive(Debug, Clone)]
pub struct PeriodicCurve {
    name: String,
    yields: LinearInterpolator,
    periods_per_year: u32,
}

impl PeriodicCurve {
    /// Creates a curve from node times and yields compounded `periods_per_year` times a year.
    pub fn new(
        name: impl Into<String>,
        times: Vec<f64>,
        yields: Vec<f64>,
        periods_per_year: u32,
    ) -> CurveResult<Self> {
        let name = name.into();
        if periods_per_year == 0 {
            return Err(CurveError::invalid_curve(&name, "compounding periods must be positive"));
        }
        let yields = node_interpolator(&name, times, yields)?;
        Ok(Self {
            name,
            yields,
            periods_per_year,
        })
    }

    /// Annually compounded curve.
    pub fn annual(name: impl Into<String>, times: Vec<f64>, yields: Vec<f64>) -> CurveResult<Self> {
        Self::new(name, times, yields, 1)
    }

    /// Periodic yield at time `t`.
    pub fn periodic_yield(&self, t: f64) -> CurveResult<f64> {
        Ok(self.yields.interpolate(t)?)
    }
}

impl YieldCurve for PeriodicCurve {
    fn name(&self) -> &str {
        &self.name
    }

    fn interest_rate(&self, t: f64) -> CurveResult<f64> {
        let m = f64::from(self.periods_per_year);
        Ok(m * (1.0 + self.periodic_yield(t)? / m).ln())
    }

    fn number_of_parameters(&self) -> usize {
        self.yields.len()
    }

    fn interest_rate_parameter_sensitivity(&self, t: f64) -> CurveResult<Vec<f64>> {
        let m = f64::from(self.periods_per_year);
        let factor = 1.0 / (1.0 + self.periodic_yield(t)? / m);
        Ok(self
            .yields
            .node_sensitivity(t)?
            .into_iter()
            .map(|w| w * factor)
            .collect())
    }

    fn with_parameter_shift(&self, index: usize, shift: f64) -> CurveResult<Arc<dyn YieldCurve>> {
        check_index(&self.name, index, self.yields.len())?;
        let mut yields = self.yields.ys().to_vec();
        yields[index] += shift;
        Ok(Arc::new(Self::new(
            self.name.clone(),
            self.yields.xs().to_vec(),
            yields,
            self.periods_per_year,
        )?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_annual_discount_factor() {
        let c = PeriodicCurve::annual("GBP-GILT", vec![1.0, 5.0], vec![0.02, 0.03]).unwrap();
        assert_relative_eq!(c.discount_factor(5.0).unwrap(), 1.03_f64.powf(-5.0), epsilon = 1e-14);
        assert_relative_eq!(c.discount_factor(0.5).unwrap(), 1.02_f64.powf(-0.5), epsilon = 1e-14);
    }

    #[test]
    fn test_parameter_sensitivity_matches_bump() {
        let c = PeriodicCurve::new("X", vec![1.0, 2.0, 5.0], vec![0.02, 0.025, 0.03], 2).unwrap();
        let h = 1e-7;
        let t = 3.2;
        let sens = c.interest_rate_parameter_sensitivity(t).unwrap();
        for (i, s) in sens.iter().enumerate() {
            let fd = (c.with_parameter_shift(i, h).unwrap().interest_rate(t).unwrap()
                - c.interest_rate(t).unwrap())
                / h;
            assert_relative_eq!(*s, fd, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_rejects_zero_periods() {
        assert!(PeriodicCurve::new("X", vec![1.0], vec![0.02], 0).is_err());
    }
}
