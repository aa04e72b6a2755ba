use std::sync::Arc;

use super::check_index;
use crate::error::CurveResult;
use crate::traits::YieldCurve;

/// A flat continuously compounded curve with one parameter.
#[derive(Debug, Clone)]
pub struct ConstantCurve {
    name: String,
    rate: f64,
}

impl ConstantCurve {
    /// Creates a flat curve.
    #[must_use]
    pub fn new(name: impl Into<String>, rate: f64) -> Self {
        Self {
            name: name.into(),
            rate,
        }
    }
}

impl YieldCurve for ConstantCurve {
    fn name(&self) -> &str {
        &self.name
    }

    fn interest_rate(&self, _t: f64) -> CurveResult<f64> {
        Ok(self.rate)
    }

    fn number_of_parameters(&self) -> usize {
        1
    }

    fn interest_rate_parameter_sensitivity(&self, _t: f64) -> CurveResult<Vec<f64>> {
        Ok(vec![1.0])
    }

    fn with_parameter_shift(&self, index: usize, shift: f64) -> CurveResult<Arc<dyn YieldCurve>> {
        check_index(&self.name, index, 1)?;
        Ok(Arc::new(Self::new(self.name.clone(), self.rate + shift)))
    }
}
