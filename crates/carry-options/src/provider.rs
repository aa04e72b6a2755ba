use carry_curves::provider::{CurveLookup, IssuerProvider, MulticurveProvider};
use carry_curves::{CurveResult, YieldCurve};
use carry_futures::hull_white::HullWhiteProvider;
use std::sync::Arc;

use crate::error::{OptionsError, OptionsResult};
use crate::volatility::VolatilityModel;

/// Curves plus the volatility model used to price options.
///
/// The model is optional so a curve-only provider can be built once and
/// shared; pricing an option without one fails with
/// [`OptionsError::MissingVolatility`].
#[derive(Debug, Clone)]
pub struct OptionProvider {
    curves: IssuerProvider,
    volatility: Option<VolatilityModel>,
}

impl OptionProvider {
    /// Curves and a volatility model.
    #[must_use]
    pub fn new(curves: IssuerProvider, volatility: VolatilityModel) -> Self {
        Self {
            curves,
            volatility: Some(volatility),
        }
    }

    /// Curves without a volatility model.
    #[must_use]
    pub fn without_volatility(curves: IssuerProvider) -> Self {
        Self {
            curves,
            volatility: None,
        }
    }

    /// Multicurve data without issuer curves, plus a volatility model.
    #[must_use]
    pub fn from_multicurve(multicurve: MulticurveProvider, volatility: VolatilityModel) -> Self {
        Self::new(IssuerProvider::new(multicurve), volatility)
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

    /// The volatility model, if any.
    #[must_use]
    pub fn volatility(&self) -> Option<&VolatilityModel> {
        self.volatility.as_ref()
    }

    /// The volatility model needed to price `instrument`.
    pub fn volatility_model(&self, instrument: &str) -> OptionsResult<&VolatilityModel> {
        self.volatility.as_ref().ok_or_else(|| OptionsError::MissingVolatility {
            instrument: instrument.to_string(),
        })
    }

    /// Same curves with another volatility model.
    #[must_use]
    pub fn with_volatility(&self, volatility: VolatilityModel) -> Self {
        Self::new(self.curves.clone(), volatility)
    }

    /// Same model over other curves.
    #[must_use]
    pub fn with_curves(&self, curves: IssuerProvider) -> Self {
        Self {
            curves,
            volatility: self.volatility.clone(),
        }
    }

    /// A Hull-White view of the provider when the model is Hull-White.
    pub(crate) fn hull_white(&self) -> Option<HullWhiteProvider> {
        match &self.volatility {
            Some(VolatilityModel::HullWhite(parameters)) => {
                Some(HullWhiteProvider::new(self.curves.clone(), parameters.clone()))
            }
            _ => None,
        }
    }
}

impl CurveLookup for OptionProvider {
    fn curve_by_name(&self, name: &str) -> CurveResult<Arc<dyn YieldCurve>> {
        self.curves.curve_by_name(name)
    }
}
