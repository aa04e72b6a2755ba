//! Present value, sensitivities and quotes for any [`Instrument`].

use carry_bonds::discounting::BondDiscountingMethod;
use carry_core::types::Currency;
use carry_curves::sensitivity::{
    market_quote_sensitivity, parameter_sensitivity, CurveBuildingBlock, MultipleCurrencyCurveSensitivity,
    ParameterSensitivity,
};
use carry_futures::bond::{BondFuturesDiscountingMethod, BondFuturesHullWhiteMethod};
use carry_futures::stir::{InterestRateFutureDiscountingMethod, InterestRateFutureHullWhiteMethod};
use carry_math::solvers::SolverConfig;
use carry_options::method::FuturesOptionMethod;
use std::collections::BTreeMap;

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::instrument::Instrument;
use crate::market::MarketData;
use crate::measure::Measure;

const HULL_WHITE: &str = "Hull-White parameters";

/// One entry point for every measure on every instrument.
///
/// Futures are valued under Hull-White when the market data carries
/// parameters, otherwise by discounting.
///
/// | Instrument | market quote | par rate | convexity adjustment |
/// |------------|--------------|----------|----------------------|
/// | bond | clean price | yield | - |
/// | bond futures | futures price | - | - |
/// | STIR futures | futures price | futures rate | Hull-White only |
/// | option | option price | - | - |
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use carry_analytics::prelude::*;
/// use carry_core::types::Currency;
/// use carry_curves::prelude::*;
/// use carry_futures::prelude::*;
///
/// let curve = Arc::new(InterpolatedCurve::new("EUR-FWD3", vec![0.5, 2.0], vec![0.01, 0.012]).unwrap());
/// let market = MarketData::from_multicurve(
///     MulticurveProvider::new()
///         .with_discount_curve(Currency::EUR, curve.clone())
///         .with_forward_curve("EUR EURIBOR 3M", curve),
/// );
/// let futures = InterestRateFutureSecurity::new(
///     "ERM2", Currency::EUR, "EUR EURIBOR 3M", 0.5, 0.505, 0.755, 0.25, 1_000_000.0, 0.25,
/// )
/// .unwrap();
/// let instrument = Instrument::from(InterestRateFutureTransaction::new(futures, 1.0, ReferencePrice::Trade(0.99)));
///
/// let calculator = InstrumentCalculator::new();
/// let quote = calculator.market_quote(&instrument, &market).unwrap();
/// let rate = calculator.par_rate(&instrument, &market).unwrap();
/// assert!((quote + rate - 1.0).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct InstrumentCalculator {
    bond: BondDiscountingMethod,
    bond_futures: BondFuturesDiscountingMethod,
    bond_futures_hull_white: BondFuturesHullWhiteMethod,
    stir_futures: InterestRateFutureDiscountingMethod,
    stir_hull_white: InterestRateFutureHullWhiteMethod,
    options: FuturesOptionMethod,
}

impl InstrumentCalculator {
    /// Creates a calculator with default solver and quadrature settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `config` for every yield, z-spread and delivery-boundary solve.
    #[must_use]
    pub fn with_solver_config(mut self, config: SolverConfig) -> Self {
        self.bond = BondDiscountingMethod::new(config);
        self.bond_futures = BondFuturesDiscountingMethod::new(config);
        self.bond_futures_hull_white = self.bond_futures_hull_white.with_solver_config(config);
        self.options = FuturesOptionMethod::with_solver_config(config);
        self
    }

    /// Uses `method` for the bond-futures delivery option.
    #[must_use]
    pub fn with_bond_futures_hull_white(mut self, method: BondFuturesHullWhiteMethod) -> Self {
        self.bond_futures_hull_white = method;
        self
    }

    /// Present value in the instrument currency.
    pub fn present_value(&self, instrument: &Instrument, market: &MarketData) -> AnalyticsResult<f64> {
        let pv = match instrument {
            Instrument::Bond(bond) => self.bond.present_value(bond, market.curves())?,
            Instrument::BondFutures(transaction) => match market.hull_white() {
                Some(hw) => self.bond_futures_hull_white.present_value(transaction, hw)?,
                None => self.bond_futures.present_value(transaction, market.curves())?,
            },
            Instrument::InterestRateFuture(transaction) => match market.hull_white() {
                Some(hw) => self.stir_hull_white.present_value(transaction, hw)?,
                None => self.stir_futures.present_value(transaction, market.multicurve())?,
            },
            Instrument::FuturesOptionMargin(transaction) => {
                self.options.margin_present_value(transaction, market.option_provider())?
            }
            Instrument::FuturesOptionPremium(transaction) => {
                self.options.premium_present_value(transaction, market.option_provider())?
            }
        };
        log::trace!("{}: present value {pv}", instrument.name());
        Ok(pv)
    }

    /// Point sensitivities of the present value.
    pub fn present_value_curve_sensitivity(
        &self,
        instrument: &Instrument,
        market: &MarketData,
    ) -> AnalyticsResult<MultipleCurrencyCurveSensitivity> {
        Ok(match instrument {
            Instrument::Bond(bond) => self.bond.present_value_curve_sensitivity(bond, market.curves())?,
            Instrument::BondFutures(transaction) => match market.hull_white() {
                Some(hw) => self.bond_futures_hull_white.present_value_curve_sensitivity(transaction, hw)?,
                None => self.bond_futures.present_value_curve_sensitivity(transaction, market.curves())?,
            },
            Instrument::InterestRateFuture(transaction) => match market.hull_white() {
                Some(hw) => self.stir_hull_white.present_value_curve_sensitivity(transaction, hw)?,
                None => self
                    .stir_futures
                    .present_value_curve_sensitivity(transaction, market.multicurve())?,
            },
            Instrument::FuturesOptionMargin(transaction) => self
                .options
                .margin_present_value_curve_sensitivity(transaction, market.option_provider())?,
            Instrument::FuturesOptionPremium(transaction) => self
                .options
                .premium_present_value_curve_sensitivity(transaction, market.option_provider())?,
        })
    }

    /// Quoted price implied by the market data.
    pub fn market_quote(&self, instrument: &Instrument, market: &MarketData) -> AnalyticsResult<f64> {
        Ok(match instrument {
            Instrument::Bond(bond) => self.bond.clean_price_from_curves(bond, market.curves())?,
            Instrument::BondFutures(transaction) => match market.hull_white() {
                Some(hw) => self.bond_futures_hull_white.price_from_curves(transaction.underlying(), hw)?,
                None => self.bond_futures.price_from_curves(transaction.underlying(), market.curves())?,
            },
            Instrument::InterestRateFuture(transaction) => match market.hull_white() {
                Some(hw) => self.stir_hull_white.price_from_curves(transaction.underlying(), hw)?,
                None => self
                    .stir_futures
                    .price_from_curves(transaction.underlying(), market.multicurve())?,
            },
            Instrument::FuturesOptionMargin(transaction) => {
                self.options.price(transaction.security(), market.option_provider())?
            }
            Instrument::FuturesOptionPremium(transaction) => {
                self.options.price(transaction.security(), market.option_provider())?
            }
        })
    }

    /// Yield of a bond from the curves, or the rate `1 − price` of a STIR future.
    pub fn par_rate(&self, instrument: &Instrument, market: &MarketData) -> AnalyticsResult<f64> {
        match instrument {
            Instrument::Bond(bond) => Ok(self.bond.yield_from_curves(bond, market.curves())?),
            Instrument::InterestRateFuture(transaction) => Ok(match market.hull_white() {
                Some(hw) => self.stir_hull_white.par_rate(transaction.underlying(), hw)?,
                None => self.stir_futures.par_rate(transaction.underlying(), market.multicurve())?,
            }),
            _ => Err(AnalyticsError::unsupported(Measure::ParRate, instrument.name())),
        }
    }

    /// Hull-White futures price minus `1 − forward` for a STIR future.
    pub fn convexity_adjustment(&self, instrument: &Instrument, market: &MarketData) -> AnalyticsResult<f64> {
        let Instrument::InterestRateFuture(transaction) = instrument else {
            return Err(AnalyticsError::unsupported(Measure::ConvexityAdjustment, instrument.name()));
        };
        let hw = market
            .hull_white()
            .ok_or_else(|| AnalyticsError::missing_model(Measure::ConvexityAdjustment, HULL_WHITE, instrument.name()))?;
        Ok(self.stir_hull_white.convexity_adjustment(transaction.underlying(), hw)?)
    }

    /// Present-value sensitivities to the curve parameters.
    pub fn parameter_sensitivity(
        &self,
        instrument: &Instrument,
        market: &MarketData,
    ) -> AnalyticsResult<ParameterSensitivity> {
        let points = self.present_value_curve_sensitivity(instrument, market)?;
        Ok(parameter_sensitivity(&points.cleaned(), market)?)
    }

    /// Present-value sensitivities to the quotes the curves were built from.
    pub fn market_quote_sensitivity(
        &self,
        instrument: &Instrument,
        market: &MarketData,
        block: &CurveBuildingBlock,
    ) -> AnalyticsResult<ParameterSensitivity> {
        let parameters = self.parameter_sensitivity(instrument, market)?;
        Ok(market_quote_sensitivity(&parameters, block)?)
    }

    /// Value change per currency for a parallel move of all curve parameters
    /// by `basis_point`.
    pub fn pv01(
        &self,
        instrument: &Instrument,
        market: &MarketData,
        basis_point: f64,
    ) -> AnalyticsResult<BTreeMap<Currency, f64>> {
        Ok(self
            .parameter_sensitivity(instrument, market)?
            .multiplied_by(basis_point)
            .total_by_currency())
    }

    /// Present values of a batch, one result per instrument.
    pub fn present_values(&self, instruments: &[Instrument], market: &MarketData) -> Vec<AnalyticsResult<f64>> {
        log::debug!("pricing {} instruments", instruments.len());
        instruments.iter().map(|i| self.present_value(i, market)).collect()
    }

    /// [`present_values`](Self::present_values) over rayon's thread pool.
    #[cfg(feature = "parallel")]
    pub fn present_values_parallel(
        &self,
        instruments: &[Instrument],
        market: &MarketData,
    ) -> Vec<AnalyticsResult<f64>> {
        use rayon::prelude::*;
        log::debug!("pricing {} instruments in parallel", instruments.len());
        instruments.par_iter().map(|i| self.present_value(i, market)).collect()
    }
}
