//! Pricing of options on futures under every [`VolatilityModel`].

use carry_curves::sensitivity::{CurveSensitivity, MultipleCurrencyCurveSensitivity};
use carry_futures::bond::BondFuturesDiscountingMethod;
use carry_futures::hull_white::{HullWhiteModel, HullWhiteParameters, HullWhiteProvider};
use carry_futures::stir::{InterestRateFutureDiscountingMethod, InterestRateFutureHullWhiteMethod, InterestRateFutureSecurity};
use carry_math::solvers::SolverConfig;

use crate::error::{OptionsError, OptionsResult};
use crate::formulas::{black_greeks, normal_greeks, OptionGreeks};
use crate::provider::OptionProvider;
use crate::security::{
    FuturesOptionMarginTransaction, FuturesOptionPremiumTransaction, FuturesOptionSecurity, FuturesUnderlying,
    OptionPosition, OptionStyle,
};
use crate::volatility::{VolatilityModel, VolatilitySensitivity};

/// Undiscounted valuation of one option, Greeks in futures-price terms.
struct Evaluation {
    futures_price: f64,
    greeks: OptionGreeks,
    volatility: f64,
    volatility_sensitivity: VolatilitySensitivity,
}

/// Options on bond and STIR futures.
///
/// The model comes from the provider:
/// - Black, Normal and SABR take the discounting futures price as forward;
///   lognormal models price STIR options in rate space, a call on the price
///   being a put on `1 − F`;
/// - Hull-White (STIR only) prices on the convexity-adjusted futures price
///   with the bond-ratio volatility `α(0, θ, t1, t2)`.
///
/// Premium-style options are discounted from expiry on the currency curve.
/// `delta` includes the smile slope `vega·∂σ/∂F`; `gamma` and `theta` are at
/// fixed volatility.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use carry_core::types::Currency;
/// use carry_curves::prelude::*;
/// use carry_futures::prelude::*;
/// use carry_options::prelude::*;
///
/// let curve = Arc::new(InterpolatedCurve::new("EUR-DSC", vec![0.5, 5.0], vec![0.01, 0.015]).unwrap());
/// let multicurve = MulticurveProvider::new()
///     .with_discount_curve(Currency::EUR, curve.clone())
///     .with_forward_curve("EUR EURIBOR 3M", curve);
/// let futures = InterestRateFutureSecurity::new(
///     "ERM2", Currency::EUR, "EUR EURIBOR 3M", 0.5, 0.505, 0.755, 0.25, 1_000_000.0, 0.25,
/// )
/// .unwrap();
/// let call = FuturesOptionSecurity::new(
///     FuturesUnderlying::Stir(futures), 0.5, 0.99, true, OptionStyle::Margined,
/// )
/// .unwrap();
/// let provider = OptionProvider::from_multicurve(multicurve, VolatilityModel::NormalFlat { volatility: 0.006 });
/// let method = FuturesOptionMethod::new();
/// let price = method.price(&call, &provider).unwrap();
/// let put = method.price(&call.with_call_flag(false), &provider).unwrap();
/// let f = method.underlying_futures_price(&call, &provider).unwrap();
/// assert!((price - put - (f - 0.99)).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FuturesOptionMethod {
    bond_futures: BondFuturesDiscountingMethod,
    stir_futures: InterestRateFutureDiscountingMethod,
    stir_hull_white: InterestRateFutureHullWhiteMethod,
    model: HullWhiteModel,
}

impl FuturesOptionMethod {
    /// Creates the method with default solver settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the method with the solver used by bond valuation.
    #[must_use]
    pub fn with_solver_config(config: SolverConfig) -> Self {
        Self {
            bond_futures: BondFuturesDiscountingMethod::new(config),
            ..Self::default()
        }
    }

    /// Futures price the option is written on: the discounting price, or the
    /// convexity-adjusted price under Hull-White.
    pub fn underlying_futures_price(
        &self,
        security: &FuturesOptionSecurity,
        provider: &OptionProvider,
    ) -> OptionsResult<f64> {
        let model = provider.volatility_model(&security.description())?;
        match (model, security.underlying()) {
            (VolatilityModel::HullWhite(parameters), FuturesUnderlying::Stir(futures)) => {
                Ok(self.stir_hull_white.price_from_curves(futures, &hull_white(provider, parameters))?)
            }
            (VolatilityModel::HullWhite(_), FuturesUnderlying::Bond(futures)) => {
                Err(OptionsError::unsupported_model(model.name(), futures.name()))
            }
            (_, underlying) => self.discounting_futures_price(underlying, provider),
        }
    }

    /// Point sensitivities of the underlying futures price.
    pub fn underlying_curve_sensitivity(
        &self,
        security: &FuturesOptionSecurity,
        provider: &OptionProvider,
    ) -> OptionsResult<MultipleCurrencyCurveSensitivity> {
        let model = provider.volatility_model(&security.description())?;
        match (model, security.underlying()) {
            (VolatilityModel::HullWhite(parameters), FuturesUnderlying::Stir(futures)) => Ok(self
                .stir_hull_white
                .price_curve_sensitivity(futures, &hull_white(provider, parameters))?),
            (VolatilityModel::HullWhite(_), FuturesUnderlying::Bond(futures)) => {
                Err(OptionsError::unsupported_model(model.name(), futures.name()))
            }
            (_, FuturesUnderlying::Bond(futures)) => {
                Ok(self.bond_futures.price_curve_sensitivity(futures, provider.curves())?)
            }
            (_, FuturesUnderlying::Stir(futures)) => {
                Ok(self.stir_futures.price_curve_sensitivity(futures, provider.multicurve())?)
            }
        }
    }

    /// Option price per unit of notional.
    pub fn price(&self, security: &FuturesOptionSecurity, provider: &OptionProvider) -> OptionsResult<f64> {
        Ok(self.greeks(security, provider)?.price)
    }

    /// Option price at a given futures price.
    pub fn price_from_futures_price(
        &self,
        security: &FuturesOptionSecurity,
        provider: &OptionProvider,
        futures_price: f64,
    ) -> OptionsResult<f64> {
        let evaluation = self.evaluate(security, provider, Some(futures_price))?;
        Ok(evaluation.greeks.price * self.discount_factor(security, provider)?)
    }

    /// Price with delta, gamma, vega and theta.
    pub fn greeks(&self, security: &FuturesOptionSecurity, provider: &OptionProvider) -> OptionsResult<OptionGreeks> {
        let evaluation = self.evaluate(security, provider, None)?;
        Ok(evaluation.greeks.scaled(self.discount_factor(security, provider)?))
    }

    /// `∂price/∂futures price`, smile slope included.
    pub fn delta(&self, security: &FuturesOptionSecurity, provider: &OptionProvider) -> OptionsResult<f64> {
        Ok(self.greeks(security, provider)?.delta)
    }

    /// `∂²price/∂futures price²` at fixed volatility.
    pub fn gamma(&self, security: &FuturesOptionSecurity, provider: &OptionProvider) -> OptionsResult<f64> {
        Ok(self.greeks(security, provider)?.gamma)
    }

    /// `∂price/∂σ`; under Hull-White, with respect to the bond-ratio volatility α.
    pub fn vega(&self, security: &FuturesOptionSecurity, provider: &OptionProvider) -> OptionsResult<f64> {
        Ok(self.greeks(security, provider)?.vega)
    }

    /// `−∂price/∂expiry` at fixed volatility.
    ///
    /// Premium-style prices carry the discount factor to expiry, which theta
    /// holds fixed: it is the decay of the undiscounted price scaled by
    /// `df(expiry)`, not the full derivative of the discounted price.
    pub fn theta(&self, security: &FuturesOptionSecurity, provider: &OptionProvider) -> OptionsResult<f64> {
        Ok(self.greeks(security, provider)?.theta)
    }

    /// Volatility the model applies to the option. Under Hull-White this is
    /// `α/√θ`, a lognormal volatility on the bond ratio.
    pub fn implied_volatility(
        &self,
        security: &FuturesOptionSecurity,
        provider: &OptionProvider,
    ) -> OptionsResult<f64> {
        Ok(self.evaluate(security, provider, None)?.volatility)
    }

    /// Point sensitivities of the option price.
    pub fn price_curve_sensitivity(
        &self,
        security: &FuturesOptionSecurity,
        provider: &OptionProvider,
    ) -> OptionsResult<MultipleCurrencyCurveSensitivity> {
        let evaluation = self.evaluate(security, provider, None)?;
        let discount = self.discount_factor(security, provider)?;
        let underlying = self
            .underlying_curve_sensitivity(security, provider)?
            .multiplied_by(discount * evaluation.greeks.delta);
        if security.style() == OptionStyle::Margined {
            return Ok(underlying);
        }
        let t = security.expiration_time();
        let curve = provider.multicurve().discount_curve(security.currency())?;
        let discounting = CurveSensitivity::of_point(curve.name(), t, -t * discount * evaluation.greeks.price);
        Ok(underlying.plus(&MultipleCurrencyCurveSensitivity::of(security.currency(), discounting)))
    }

    /// Sensitivity of the option price to the volatility model.
    pub fn price_volatility_sensitivity(
        &self,
        security: &FuturesOptionSecurity,
        provider: &OptionProvider,
    ) -> OptionsResult<VolatilitySensitivity> {
        let evaluation = self.evaluate(security, provider, None)?;
        let discount = self.discount_factor(security, provider)?;
        Ok(evaluation.volatility_sensitivity.multiplied_by(discount))
    }

    /// Margin value of a position.
    pub fn margin_present_value(
        &self,
        transaction: &FuturesOptionMarginTransaction,
        provider: &OptionProvider,
    ) -> OptionsResult<f64> {
        let price = self.price(transaction.security(), provider)?;
        Ok(transaction.present_value_from_price(price))
    }

    /// Point sensitivities of the margin value.
    pub fn margin_present_value_curve_sensitivity(
        &self,
        transaction: &FuturesOptionMarginTransaction,
        provider: &OptionProvider,
    ) -> OptionsResult<MultipleCurrencyCurveSensitivity> {
        Ok(self
            .price_curve_sensitivity(transaction.security(), provider)?
            .multiplied_by(transaction.price_scale()))
    }

    /// Value of a premium-style position including its pending premium.
    pub fn premium_present_value(
        &self,
        transaction: &FuturesOptionPremiumTransaction,
        provider: &OptionProvider,
    ) -> OptionsResult<f64> {
        let option = self.price(transaction.security(), provider)? * transaction.price_scale();
        let premium = transaction.premium();
        if !premium.is_pending() {
            return Ok(option);
        }
        let df = provider.multicurve().discount_factor(premium.currency, premium.time)?;
        Ok(option + premium.amount * df)
    }

    /// Point sensitivities of a premium-style position, premium included.
    pub fn premium_present_value_curve_sensitivity(
        &self,
        transaction: &FuturesOptionPremiumTransaction,
        provider: &OptionProvider,
    ) -> OptionsResult<MultipleCurrencyCurveSensitivity> {
        let option = self
            .price_curve_sensitivity(transaction.security(), provider)?
            .multiplied_by(transaction.price_scale());
        let premium = transaction.premium();
        if !premium.is_pending() {
            return Ok(option);
        }
        let curve = provider.multicurve().discount_curve(premium.currency)?;
        let df = curve.discount_factor(premium.time)?;
        let payment = CurveSensitivity::of_point(curve.name(), premium.time, -premium.time * premium.amount * df);
        Ok(option.plus(&MultipleCurrencyCurveSensitivity::of(premium.currency, payment)))
    }

    /// Sensitivity of a position's value to the volatility model.
    pub fn present_value_volatility_sensitivity(
        &self,
        position: &impl OptionPosition,
        provider: &OptionProvider,
    ) -> OptionsResult<VolatilitySensitivity> {
        Ok(self
            .price_volatility_sensitivity(position.option(), provider)?
            .multiplied_by(position.position_scale()))
    }

    /// Greeks of a position: the option Greeks times quantity, notional and accrual.
    pub fn position_greeks(
        &self,
        position: &impl OptionPosition,
        provider: &OptionProvider,
    ) -> OptionsResult<OptionGreeks> {
        Ok(self
            .greeks(position.option(), provider)?
            .scaled(position.position_scale()))
    }

    fn discounting_futures_price(&self, underlying: &FuturesUnderlying, provider: &OptionProvider) -> OptionsResult<f64> {
        Ok(match underlying {
            FuturesUnderlying::Bond(futures) => self.bond_futures.price_from_curves(futures, provider.curves())?,
            FuturesUnderlying::Stir(futures) => self.stir_futures.price_from_curves(futures, provider.multicurve())?,
        })
    }

    fn discount_factor(&self, security: &FuturesOptionSecurity, provider: &OptionProvider) -> OptionsResult<f64> {
        match security.style() {
            OptionStyle::Margined => Ok(1.0),
            OptionStyle::Premium => Ok(provider
                .multicurve()
                .discount_factor(security.currency(), security.expiration_time())?),
        }
    }

    fn evaluate(
        &self,
        security: &FuturesOptionSecurity,
        provider: &OptionProvider,
        futures_price: Option<f64>,
    ) -> OptionsResult<Evaluation> {
        let model = provider.volatility_model(&security.description())?;
        let evaluation = match (model, security.underlying()) {
            (VolatilityModel::HullWhite(parameters), FuturesUnderlying::Stir(futures)) => {
                self.evaluate_hull_white(security, futures, provider, parameters, futures_price)?
            }
            (VolatilityModel::HullWhite(_), FuturesUnderlying::Bond(futures)) => {
                return Err(OptionsError::unsupported_model(model.name(), futures.name()));
            }
            (_, underlying) => {
                let forward = match futures_price {
                    Some(price) => price,
                    None => self.discounting_futures_price(underlying, provider)?,
                };
                evaluate_smile(security, model, forward)?
            }
        };
        log::trace!(
            "{}: model {}, futures price {}, volatility {}, price {}",
            security.description(),
            model.name(),
            evaluation.futures_price,
            evaluation.volatility,
            evaluation.greeks.price
        );
        Ok(evaluation)
    }

    fn evaluate_hull_white(
        &self,
        security: &FuturesOptionSecurity,
        futures: &InterestRateFutureSecurity,
        provider: &OptionProvider,
        parameters: &HullWhiteParameters,
        futures_price: Option<f64>,
    ) -> OptionsResult<Evaluation> {
        let expiry = security.expiration_time();
        let (t1, t2) = (futures.fixing_start_time(), futures.fixing_end_time());
        let accrual = futures.fixing_accrual();
        let (futures_price, futures_bar) = match futures_price {
            Some(price) => (price, vec![0.0; parameters.len()]),
            None => {
                let hw = hull_white(provider, parameters);
                (
                    self.stir_hull_white.price_from_curves(futures, &hw)?,
                    self.stir_hull_white.price_hull_white_sensitivity(futures, &hw)?,
                )
            }
        };
        // bond ratio P(θ, t1)/P(θ, t2) under the t2 forward measure
        let ratio = 1.0 + accrual * (1.0 - futures_price);
        let strike = 1.0 + accrual * (1.0 - security.strike());
        let (alpha, alpha_bar) = self.model.alpha_adjoint(parameters, 0.0, expiry, t1, t2);
        let black = black_greeks(ratio, strike, 1.0, alpha, !security.is_call());

        let vega = black.vega / accrual;
        let delta = -black.delta;
        let greeks = OptionGreeks {
            price: black.price / accrual,
            delta,
            gamma: accrual * black.gamma,
            vega,
            theta: -vega * self.model.alpha_end_expiry_derivative(parameters, 0.0, expiry, t1, t2),
        };
        let buckets = alpha_bar
            .iter()
            .zip(&futures_bar)
            .map(|(a, f)| vega * a + delta * f)
            .collect();
        Ok(Evaluation {
            futures_price,
            greeks,
            volatility: if expiry > 0.0 { alpha / expiry.sqrt() } else { 0.0 },
            volatility_sensitivity: VolatilitySensitivity::HullWhite(buckets),
        })
    }
}

fn hull_white(provider: &OptionProvider, parameters: &HullWhiteParameters) -> HullWhiteProvider {
    HullWhiteProvider::new(provider.curves().clone(), parameters.clone())
}

fn evaluate_smile(
    security: &FuturesOptionSecurity,
    model: &VolatilityModel,
    futures_price: f64,
) -> OptionsResult<Evaluation> {
    let expiry = security.expiration_time();
    let strike = security.strike();
    let rate_space = model.is_lognormal() && matches!(security.underlying(), FuturesUnderlying::Stir(_));

    let (smile, greeks) = if rate_space {
        // call on price is a put on rate
        let (forward, strike) = (1.0 - futures_price, 1.0 - strike);
        let smile = model.smile(expiry, strike, forward)?;
        let g = black_greeks(forward, strike, expiry, smile.volatility, !security.is_call());
        let greeks = OptionGreeks {
            delta: -(g.delta + g.vega * smile.forward_slope),
            ..g
        };
        (smile, greeks)
    } else {
        let smile = model.smile(expiry, strike, futures_price)?;
        let g = if model.is_lognormal() {
            black_greeks(futures_price, strike, expiry, smile.volatility, security.is_call())
        } else {
            normal_greeks(futures_price, strike, expiry, smile.volatility, security.is_call())
        };
        let greeks = OptionGreeks {
            delta: g.delta + g.vega * smile.forward_slope,
            ..g
        };
        (smile, greeks)
    };

    let volatility_sensitivity = match smile.sabr {
        Some(sabr) => VolatilitySensitivity::Sabr {
            expiry,
            alpha: greeks.vega * sabr.alpha_derivative,
            rho: greeks.vega * sabr.rho_derivative,
            nu: greeks.vega * sabr.nu_derivative,
        },
        None => VolatilitySensitivity::Surface {
            expiry,
            coordinate: smile.coordinate,
            vega: greeks.vega,
        },
    };
    Ok(Evaluation {
        futures_price,
        greeks,
        volatility: smile.volatility,
        volatility_sensitivity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use carry_core::types::Currency;
    use carry_curves::curves::InterpolatedCurve;
    use carry_curves::provider::MulticurveProvider;
    use carry_futures::reference_price::ReferencePrice;
    use crate::security::Payment;
    use std::sync::Arc;

    const INDEX: &str = "EUR EURIBOR 3M";

    fn multicurve() -> MulticurveProvider {
        let dsc = Arc::new(InterpolatedCurve::new("EUR-DSC", vec![0.25, 1.0, 2.0], vec![0.008, 0.010, 0.013]).unwrap());
        let fwd = Arc::new(InterpolatedCurve::new("EUR-FWD3", vec![0.25, 1.0, 2.0], vec![0.011, 0.013, 0.016]).unwrap());
        MulticurveProvider::new()
            .with_discount_curve(Currency::EUR, dsc)
            .with_forward_curve(INDEX, fwd)
    }

    fn option(style: OptionStyle) -> FuturesOptionSecurity {
        let futures =
            InterestRateFutureSecurity::new("ERH3", Currency::EUR, INDEX, 0.9, 0.91, 1.16, 0.25, 1_000_000.0, 0.25).unwrap();
        FuturesOptionSecurity::new(FuturesUnderlying::Stir(futures), 0.85, 0.9875, true, style).unwrap()
    }

    fn models() -> Vec<VolatilityModel> {
        vec![
            VolatilityModel::BlackFlat { volatility: 0.35 },
            VolatilityModel::NormalFlat { volatility: 0.0055 },
            VolatilityModel::HullWhite(HullWhiteParameters::new(0.01, vec![0.008, 0.01, 0.012], vec![0.5, 1.0]).unwrap()),
        ]
    }

    #[test]
    fn test_missing_volatility() {
        let provider = OptionProvider::without_volatility(carry_curves::provider::IssuerProvider::new(multicurve()));
        let err = FuturesOptionMethod::new().price(&option(OptionStyle::Margined), &provider).unwrap_err();
        assert!(matches!(err, OptionsError::MissingVolatility { .. }));
    }

    #[test]
    fn test_parity_and_delta_identity() {
        let method = FuturesOptionMethod::new();
        for model in models() {
            let provider = OptionProvider::from_multicurve(multicurve(), model);
            for style in [OptionStyle::Margined, OptionStyle::Premium] {
                let call = option(style);
                let put = call.with_call_flag(false);
                let f = method.underlying_futures_price(&call, &provider).unwrap();
                let df = if style == OptionStyle::Premium {
                    provider.multicurve().discount_factor(Currency::EUR, call.expiration_time()).unwrap()
                } else {
                    1.0
                };
                let c = method.greeks(&call, &provider).unwrap();
                let p = method.greeks(&put, &provider).unwrap();
                assert!((c.price - p.price - df * (f - call.strike())).abs() < 1e-12);
                assert!((c.delta - p.delta - df).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_delta_matches_futures_price_bump() {
        let method = FuturesOptionMethod::new();
        let h = 1e-6;
        for model in models() {
            let provider = OptionProvider::from_multicurve(multicurve(), model);
            let call = option(OptionStyle::Margined);
            let f = method.underlying_futures_price(&call, &provider).unwrap();
            let up = method.price_from_futures_price(&call, &provider, f + h).unwrap();
            let down = method.price_from_futures_price(&call, &provider, f - h).unwrap();
            let delta = method.delta(&call, &provider).unwrap();
            assert!((delta - (up - down) / (2.0 * h)).abs() < 1e-7);
        }
    }

    #[test]
    fn test_hull_white_implied_volatility() {
        let parameters = HullWhiteParameters::new(0.01, vec![0.008, 0.01, 0.012], vec![0.5, 1.0]).unwrap();
        let provider = OptionProvider::from_multicurve(multicurve(), VolatilityModel::HullWhite(parameters.clone()));
        let call = option(OptionStyle::Margined);
        let iv = FuturesOptionMethod::new().implied_volatility(&call, &provider).unwrap();
        let alpha = HullWhiteModel.alpha(&parameters, 0.0, 0.85, 0.91, 1.16);
        assert!((iv - alpha / 0.85_f64.sqrt()).abs() < 1e-15);
    }

    #[test]
    fn test_margin_and_premium_present_values() {
        let method = FuturesOptionMethod::new();
        let provider = OptionProvider::from_multicurve(multicurve(), VolatilityModel::NormalFlat { volatility: 0.0055 });
        let margined = FuturesOptionMarginTransaction::new(option(OptionStyle::Margined), 5.0, ReferencePrice::LastMargin(0.002))
            .unwrap();
        let price = method.price(margined.security(), &provider).unwrap();
        let pv = method.margin_present_value(&margined, &provider).unwrap();
        assert!((pv - (price - 0.002) * 5.0 * 250_000.0).abs() < 1e-8);

        let paid = FuturesOptionPremiumTransaction::new(option(OptionStyle::Premium), 5.0, Payment::new(Currency::EUR, -0.01, -500.0))
            .unwrap();
        let pending = FuturesOptionPremiumTransaction::new(option(OptionStyle::Premium), 5.0, Payment::new(Currency::EUR, 0.01, -500.0))
            .unwrap();
        let premium_price = method.price(paid.security(), &provider).unwrap();
        let pv_paid = method.premium_present_value(&paid, &provider).unwrap();
        assert!((pv_paid - premium_price * 5.0 * 250_000.0).abs() < 1e-8);
        let df = provider.multicurve().discount_factor(Currency::EUR, 0.01).unwrap();
        let pv_pending = method.premium_present_value(&pending, &provider).unwrap();
        assert!((pv_pending - pv_paid + 500.0 * df).abs() < 1e-8);
    }
}
