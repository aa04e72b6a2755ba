//! Market data handed to the calculators.

use carry_curves::provider::{CurveLookup, IssuerProvider, MulticurveProvider};
use carry_curves::traits::YieldCurve;
use carry_curves::CurveResult;
use carry_futures::hull_white::{HullWhiteParameters, HullWhiteProvider};
use carry_options::provider::OptionProvider;
use carry_options::volatility::VolatilityModel;
use std::sync::Arc;

/// Curves plus the optional models priced on top of them.
///
/// With Hull-White parameters, futures are valued with the Hull-White
/// convexity adjustment and delivery option; without, by discounting.
/// Options use the volatility model.
#[derive(Debug, Clone)]
pub struct MarketData {
    options: OptionProvider,
    hull_white: Option<HullWhiteProvider>,
}

impl MarketData {
    /// Curves only.
    #[must_use]
    pub fn new(curves: IssuerProvider) -> Self {
        Self {
            options: OptionProvider::without_volatility(curves),
            hull_white: None,
        }
    }

    /// Curves without issuer curves.
    #[must_use]
    pub fn from_multicurve(multicurve: MulticurveProvider) -> Self {
        Self::new(IssuerProvider::new(multicurve))
    }

    /// Adds Hull-White parameters for futures valuation.
    #[must_use]
    pub fn with_hull_white(mut self, parameters: HullWhiteParameters) -> Self {
        self.hull_white = Some(HullWhiteProvider::new(self.curves().clone(), parameters));
        self
    }

    /// Adds a volatility model for options.
    #[must_use]
    pub fn with_volatility(mut self, volatility: VolatilityModel) -> Self {
        self.options = self.options.with_volatility(volatility);
        self
    }

    /// Same models over other curves.
    #[must_use]
    pub fn with_curves(&self, curves: IssuerProvider) -> Self {
        Self {
            hull_white: self
                .hull_white
                .as_ref()
                .map(|provider| HullWhiteProvider::new(curves.clone(), provider.parameters().clone())),
            options: self.options.with_curves(curves),
        }
    }

    /// Same market with one curve node shifted.
    pub fn with_bumped_curve(&self, name: &str, index: usize, shift: f64) -> CurveResult<Self> {
        Ok(self.with_curves(self.curves().with_bumped_curve(name, index, shift)?))
    }

    /// Issuer and multi-curve data.
    #[must_use]
    pub fn curves(&self) -> &IssuerProvider {
        self.options.curves()
    }

    /// Discounting and forward curves.
    #[must_use]
    pub fn multicurve(&self) -> &MulticurveProvider {
        self.options.multicurve()
    }

    /// Curves with the volatility model.
    #[must_use]
    pub fn option_provider(&self) -> &OptionProvider {
        &self.options
    }

    /// Curves with Hull-White parameters, when set.
    #[must_use]
    pub fn hull_white(&self) -> Option<&HullWhiteProvider> {
        self.hull_white.as_ref()
    }
}

impl CurveLookup for MarketData {
    fn curve_by_name(&self, name: &str) -> CurveResult<Arc<dyn YieldCurve>> {
        self.curves().curve_by_name(name)
    }
}
