use std::collections::BTreeMap;

use nalgebra::DMatrix;

use super::ParameterSensitivity;
use crate::error::{CurveError, CurveResult};

/// Calibration Jacobians `∂p/∂q` per curve, produced by curve construction.
///
/// Rows are curve parameters and columns the calibrating market quotes.
#[derive(Debug, Clone, Default)]
pub struct CurveBuildingBlock {
    jacobians: BTreeMap<String, DMatrix<f64>>,
}

impl CurveBuildingBlock {
    /// Empty block.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the Jacobian of curve `name`.
    #[must_use]
    pub fn with_jacobian(mut self, name: impl Into<String>, jacobian: DMatrix<f64>) -> Self {
        self.jacobians.insert(name.into(), jacobian);
        self
    }

    /// Jacobian of curve `name`.
    pub fn jacobian(&self, name: &str) -> CurveResult<&DMatrix<f64>> {
        self.jacobians
            .get(name)
            .ok_or_else(|| CurveError::curve_not_found(format!("jacobian {name}")))
    }
}

/// Market-quote sensitivity `Jᵀ·s` for every curve entry.
pub fn market_quote_sensitivity(
    parameter: &ParameterSensitivity,
    block: &CurveBuildingBlock,
) -> CurveResult<ParameterSensitivity> {
    let mut result = ParameterSensitivity::new();
    for ((name, currency), vector) in parameter.iter() {
        let jacobian = block.jacobian(name)?;
        if jacobian.nrows() != vector.len() {
            return Err(CurveError::DimensionMismatch {
                name: name.clone(),
                expected: jacobian.nrows(),
                actual: vector.len(),
            });
        }
        result.add(name, *currency, jacobian.transpose() * vector)?;
    }
    Ok(result)
}
