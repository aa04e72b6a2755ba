use std::sync::Arc;

use crate::error::{CurveError, CurveResult};
use crate::traits::YieldCurve;

/// Spread applied on top of a base curve.
#[derive(Debug, Clone)]
pub enum Spread {
    /// Parallel shift of the continuously compounded zero rate.
    Continuous(f64),
    /// Shift of the periodically compounded yield.
    Periodic {
        /// Spread on the periodic yield.
        spread: f64,
        /// Compounding periods per year.
        periods_per_year: u32,
    },
    /// Time-dependent continuously compounded spread given by another curve.
    Curve(Arc<dyn YieldCurve>),
}

/// How a scalar spread is compounded onto a base curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpreadCompounding {
    /// Added to the continuously compounded zero rate.
    #[default]
    Continuous,
    /// Added to the yield compounded `periods_per_year` times a year.
    Periodic {
        /// Compounding periods per year.
        periods_per_year: u32,
    },
}

impl SpreadCompounding {
    /// Annual compounding, the usual issuer-spread quote for government bonds.
    pub const ANNUAL: Self = Self::Periodic { periods_per_year: 1 };

    /// The [`Spread`] of size `value` under this compounding.
    #[must_use]
    pub fn spread(self, value: f64) -> Spread {
        match self {
            Self::Continuous => Spread::Continuous(value),
            Self::Periodic { periods_per_year } => Spread::Periodic {
                spread: value,
                periods_per_year,
            },
        }
    }
}

/// A base curve decorated with a [`Spread`].
///
/// The decorated curve keeps the base curve's name and parameters: point
/// sensitivities taken against it chain through to the base nodes. The base
/// curve is shared, never copied or mutated.
#[derive(Debug, Clone)]
pub struct SpreadCurve {
    base: Arc<dyn YieldCurve>,
    spread: Spread,
}

impl SpreadCurve {
    /// Decorates `base` with `spread`.
    pub fn new(base: Arc<dyn YieldCurve>, spread: Spread) -> CurveResult<Self> {
        if let Spread::Periodic {
            periods_per_year: 0,
            ..
        } = spread
        {
            return Err(CurveError::invalid_curve(
                base.name(),
                "periodic spread needs a positive compounding frequency",
            ));
        }
        Ok(Self { base, spread })
    }

    /// Decorates `base` with a parallel continuously compounded spread.
    #[must_use]
    pub fn continuous(base: Arc<dyn YieldCurve>, spread: f64) -> Self {
        Self {
            base,
            spread: Spread::Continuous(spread),
        }
    }

    /// The undecorated curve.
    #[must_use]
    pub fn base(&self) -> &Arc<dyn YieldCurve> {
        &self.base
    }

    /// The applied spread.
    #[must_use]
    pub fn spread(&self) -> &Spread {
        &self.spread
    }

    /// `∂r(t)/∂r_base(t)`.
    fn chain_factor(&self, t: f64) -> CurveResult<f64> {
        match &self.spread {
            Spread::Continuous(_) | Spread::Curve(_) => Ok(1.0),
            Spread::Periodic {
                spread,
                periods_per_year,
            } => {
                let m = f64::from(*periods_per_year);
                let growth = (self.base.interest_rate(t)? / m).exp();
                let base_yield = m * (growth - 1.0);
                Ok(growth / (1.0 + (base_yield + spread) / m))
            }
        }
    }
}

impl YieldCurve for SpreadCurve {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn interest_rate(&self, t: f64) -> CurveResult<f64> {
        let base_rate = self.base.interest_rate(t)?;
        match &self.spread {
            Spread::Continuous(s) => Ok(base_rate + s),
            Spread::Periodic {
                spread,
                periods_per_year,
            } => {
                let m = f64::from(*periods_per_year);
                let base_yield = m * ((base_rate / m).exp() - 1.0);
                Ok(m * (1.0 + (base_yield + spread) / m).ln())
            }
            Spread::Curve(curve) => Ok(base_rate + curve.interest_rate(t)?),
        }
    }

    fn number_of_parameters(&self) -> usize {
        self.base.number_of_parameters()
    }

    fn interest_rate_parameter_sensitivity(&self, t: f64) -> CurveResult<Vec<f64>> {
        let factor = self.chain_factor(t)?;
        Ok(self
            .base
            .interest_rate_parameter_sensitivity(t)?
            .into_iter()
            .map(|s| s * factor)
            .collect())
    }

    fn with_parameter_shift(&self, index: usize, shift: f64) -> CurveResult<Arc<dyn YieldCurve>> {
        Ok(Arc::new(Self {
            base: self.base.with_parameter_shift(index, shift)?,
            spread: self.spread.clone(),
        }))
    }
}
