use carry_curves::provider::{CurveLookup, IssuerProvider, MulticurveProvider};
use carry_curves::{CurveResult, YieldCurve};
use std::sync::Arc;

use super::HullWhiteParameters;

/// Curves plus Hull-White parameters.
#[derive(Debug, Clone)]
pub struct HullWhiteProvider {
    curves: IssuerProvider,
    parameters: HullWhiteParameters,
}

impl HullWhiteProvider {
    /// Combines issuer curves and model parameters.
    #[must_use]
    pub fn new(curves: IssuerProvider, parameters: HullWhiteParameters) -> Self {
        Self { curves, parameters }
    }

    /// Combines multicurve data without issuer curves and model parameters.
    #[must_use]
    pub fn from_multicurve(multicurve: MulticurveProvider, parameters: HullWhiteParameters) -> Self {
        Self::new(IssuerProvider::new(multicurve), parameters)
    }

    /// Issuer and multicurve data.
    #[must_use]
    pub fn curves(&self) -> &IssuerProvider {
        &self.curves
    }

    /// Multicurve data.
    #[must_use]
    pub fn multicurve(&self) -> &MulticurveProvider {
        self.curves.multicurve()
    }

    /// Model parameters.
    #[must_use]
    pub fn parameters(&self) -> &HullWhiteParameters {
        &self.parameters
    }

    /// Same curves with other parameters.
    #[must_use]
    pub fn with_parameters(&self, parameters: HullWhiteParameters) -> Self {
        Self::new(self.curves.clone(), parameters)
    }
}

impl CurveLookup for HullWhiteProvider {
    fn curve_by_name(&self, name: &str) -> CurveResult<Arc<dyn YieldCurve>> {
        self.curves.curve_by_name(name)
    }
}
