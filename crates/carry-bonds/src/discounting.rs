//! Discounting valuation of fixed coupon bonds.
//!
//! Curve-based prices discount every cash flow on the issuer curve and
//! express the value at settlement with the currency discounting curve.
//! Yield-based prices follow the bond's [`YieldConvention`].

use std::cell::RefCell;
use std::sync::Arc;

use log::debug;

use carry_curves::curves::{SpreadCompounding, SpreadCurve};
use carry_curves::provider::{IssuerProvider, MulticurveProvider};
use carry_curves::sensitivity::{CurveSensitivity, MultipleCurrencyCurveSensitivity};
use carry_curves::YieldCurve;
use carry_math::solvers::{brent, find_bracket, SolverConfig};

use crate::definition::YieldConvention;
use crate::error::{BondError, BondResult};
use crate::security::BondFixedSecurity;

const YIELD_BRACKET: (f64, f64) = (0.0, 0.20);
const Z_SPREAD_BRACKET: (f64, f64) = (-0.01, 0.01);

/// Discounting method for [`BondFixedSecurity`].
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use carry_bonds::prelude::*;
/// use carry_core::types::{Currency, Date, Frequency};
/// use carry_curves::prelude::*;
///
/// let bond = BondFixedDefinition::new(
///     "T 4 2016",
///     Currency::USD,
///     "US GOVT",
///     Date::from_ymd(2011, 2, 15).unwrap(),
///     Date::from_ymd(2016, 2, 15).unwrap(),
///     0.04,
///     Frequency::SemiAnnual,
/// )
/// .unwrap();
/// let security = bond.to_security(Date::from_ymd(2011, 6, 1).unwrap()).unwrap();
/// let method = BondDiscountingMethod::default();
/// let clean = method.clean_price_from_yield(&security, 0.04).unwrap();
/// let back = method.yield_from_clean_price(&security, clean).unwrap();
/// assert!((back - 0.04).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BondDiscountingMethod {
    config: SolverConfig,
}

impl BondDiscountingMethod {
    /// Creates a method with the given solver settings.
    #[must_use]
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Solver settings used for yields and z-spreads.
    #[must_use]
    pub fn solver_config(&self) -> &SolverConfig {
        &self.config
    }

    /// Present value of all remaining cash flows on the issuer curve.
    pub fn present_value(&self, bond: &BondFixedSecurity, curves: &IssuerProvider) -> BondResult<f64> {
        let curve = curves.issuer_curve(bond.issuer())?;
        Self::present_value_on_curve(bond, curve.as_ref())
    }

    fn present_value_on_curve(bond: &BondFixedSecurity, curve: &dyn YieldCurve) -> BondResult<f64> {
        let mut pv = 0.0;
        for (t, amount) in bond.cash_flows() {
            pv += amount * curve.discount_factor(t)?;
        }
        Ok(pv)
    }

    fn spread_issuer_curve(
        bond: &BondFixedSecurity,
        curves: &IssuerProvider,
        z_spread: f64,
        compounding: SpreadCompounding,
    ) -> BondResult<SpreadCurve> {
        let base = Arc::clone(curves.issuer_curve(bond.issuer())?);
        Ok(SpreadCurve::new(base, compounding.spread(z_spread))?)
    }

    /// Present value paid at settlement for a clean price.
    pub fn present_value_from_clean_price(
        &self,
        bond: &BondFixedSecurity,
        multicurve: &MulticurveProvider,
        clean_price: f64,
    ) -> BondResult<f64> {
        let df = multicurve.discount_factor(bond.currency(), bond.settlement_time())?;
        Ok((clean_price * bond.notional() + bond.accrued_interest()) * df)
    }

    /// Present value with the issuer curve shifted by a z-spread compounded
    /// as `compounding`.
    pub fn present_value_from_z_spread(
        &self,
        bond: &BondFixedSecurity,
        curves: &IssuerProvider,
        z_spread: f64,
        compounding: SpreadCompounding,
    ) -> BondResult<f64> {
        let shifted = curves.with_issuer_spread(bond.issuer(), compounding.spread(z_spread))?;
        self.present_value(bond, &shifted)
    }

    /// `∂PV/∂z` at the given z-spread.
    pub fn present_value_z_spread_sensitivity(
        &self,
        bond: &BondFixedSecurity,
        curves: &IssuerProvider,
        z_spread: f64,
        compounding: SpreadCompounding,
    ) -> BondResult<f64> {
        let curve = Self::spread_issuer_curve(bond, curves, z_spread, compounding)?;
        let mut sensitivity = 0.0;
        for (t, amount) in bond.cash_flows() {
            let df = curve.discount_factor(t)?;
            // d(df)/dz is -t·df continuously, -t·df/(1 + y/m) for a periodic yield y
            let per_period = match compounding {
                SpreadCompounding::Continuous => 1.0,
                SpreadCompounding::Periodic { periods_per_year } => {
                    (curve.interest_rate(t)? / f64::from(periods_per_year)).exp()
                }
            };
            sensitivity -= t * amount * df / per_period;
        }
        Ok(sensitivity)
    }

    /// Point sensitivities of the present value to the issuer curve.
    pub fn present_value_curve_sensitivity(
        &self,
        bond: &BondFixedSecurity,
        curves: &IssuerProvider,
    ) -> BondResult<MultipleCurrencyCurveSensitivity> {
        let curve = curves.issuer_curve(bond.issuer())?;
        let mut points = Vec::with_capacity(bond.coupons().len() + 1);
        for (t, amount) in bond.cash_flows() {
            points.push((t, -t * amount * curve.discount_factor(t)?));
        }
        Ok(MultipleCurrencyCurveSensitivity::of(
            bond.currency(),
            CurveSensitivity::of_points(curve.name(), points),
        ))
    }

    /// Dirty price per unit notional at settlement.
    pub fn dirty_price_from_curves(&self, bond: &BondFixedSecurity, curves: &IssuerProvider) -> BondResult<f64> {
        let pv = self.present_value(bond, curves)?;
        let df = curves
            .multicurve()
            .discount_factor(bond.currency(), bond.settlement_time())?;
        Ok(pv / df / bond.notional())
    }

    /// Point sensitivities of [`Self::dirty_price_from_curves`].
    pub fn dirty_price_curve_sensitivity(
        &self,
        bond: &BondFixedSecurity,
        curves: &IssuerProvider,
    ) -> BondResult<MultipleCurrencyCurveSensitivity> {
        let currency = bond.currency();
        let notional = bond.notional();
        let settlement = bond.settlement_time();
        let discount = curves.multicurve().discount_curve(currency)?;
        let df = discount.discount_factor(settlement)?;
        let pv = self.present_value(bond, curves)?;

        let settlement_point = MultipleCurrencyCurveSensitivity::of(
            currency,
            CurveSensitivity::of_point(discount.name(), settlement, settlement * pv / (df * notional)),
        );
        Ok(self
            .present_value_curve_sensitivity(bond, curves)?
            .multiplied_by(1.0 / (df * notional))
            .plus(&settlement_point))
    }

    /// Dirty price for a clean price.
    #[must_use]
    pub fn dirty_price_from_clean_price(&self, bond: &BondFixedSecurity, clean_price: f64) -> f64 {
        clean_price + bond.accrued_interest() / bond.notional()
    }

    /// Clean price for a dirty price.
    #[must_use]
    pub fn clean_price_from_dirty_price(&self, bond: &BondFixedSecurity, dirty_price: f64) -> f64 {
        dirty_price - bond.accrued_interest() / bond.notional()
    }

    /// Clean price per unit notional from curves.
    pub fn clean_price_from_curves(&self, bond: &BondFixedSecurity, curves: &IssuerProvider) -> BondResult<f64> {
        let dirty = self.dirty_price_from_curves(bond, curves)?;
        Ok(self.clean_price_from_dirty_price(bond, dirty))
    }

    fn simple_last_period(bond: &BondFixedSecurity) -> bool {
        bond.yield_convention() == YieldConvention::UsStreet && bond.coupons().len() == 1
    }

    /// Dirty price per unit notional for a yield.
    pub fn dirty_price_from_yield(&self, bond: &BondFixedSecurity, yield_: f64) -> BondResult<f64> {
        let m = f64::from(bond.coupons_per_year());
        let nominal = bond.nominal().amount;
        let af = bond.accrual_factor_to_next_coupon();
        if Self::simple_last_period(bond) {
            return Ok((nominal + bond.coupons()[0].amount) / (1.0 + af * yield_ / m) / nominal);
        }
        let factor = 1.0 + yield_ / m;
        if factor <= 0.0 {
            return Err(BondError::invalid_definition(format!("yield {yield_} gives a non-positive discount base")));
        }
        let n = bond.coupons().len();
        let mut pv_at_first_coupon = 0.0;
        for (i, coupon) in bond.coupons().iter().enumerate() {
            pv_at_first_coupon += coupon.amount / factor.powi(i as i32);
        }
        pv_at_first_coupon += nominal / factor.powi(n as i32 - 1);
        Ok(pv_at_first_coupon * factor.powf(-af) / nominal)
    }

    /// Clean price per unit notional for a yield.
    pub fn clean_price_from_yield(&self, bond: &BondFixedSecurity, yield_: f64) -> BondResult<f64> {
        let dirty = self.dirty_price_from_yield(bond, yield_)?;
        Ok(self.clean_price_from_dirty_price(bond, dirty))
    }

    /// Yield for a dirty price.
    pub fn yield_from_dirty_price(&self, bond: &BondFixedSecurity, dirty_price: f64) -> BondResult<f64> {
        let residual = |y: f64| {
            self.dirty_price_from_yield(bond, y)
                .map_or(f64::NAN, |p| p - dirty_price)
        };
        let tolerance = self.config.tolerance;
        let max_iterations = self.config.max_iterations;
        let (a, b) = find_bracket(residual, YIELD_BRACKET.0, YIELD_BRACKET.1, &self.config)
            .map_err(|e| BondError::from_solver(bond.id(), tolerance, max_iterations, e))?;
        let result = brent(residual, a, b, &self.config)
            .map_err(|e| BondError::from_solver(bond.id(), tolerance, max_iterations, e))?;
        debug!(
            "yield for {} at dirty price {dirty_price}: {} ({} iterations)",
            bond.id(),
            result.root,
            result.iterations
        );
        Ok(result.root)
    }

    /// Yield for a clean price.
    pub fn yield_from_clean_price(&self, bond: &BondFixedSecurity, clean_price: f64) -> BondResult<f64> {
        self.yield_from_dirty_price(bond, self.dirty_price_from_clean_price(bond, clean_price))
    }

    /// Yield implied by the curves.
    pub fn yield_from_curves(&self, bond: &BondFixedSecurity, curves: &IssuerProvider) -> BondResult<f64> {
        let dirty = self.dirty_price_from_curves(bond, curves)?;
        self.yield_from_dirty_price(bond, dirty)
    }

    /// Modified duration for a yield.
    pub fn modified_duration_from_yield(&self, bond: &BondFixedSecurity, yield_: f64) -> BondResult<f64> {
        let m = f64::from(bond.coupons_per_year());
        let af = bond.accrual_factor_to_next_coupon();
        if Self::simple_last_period(bond) {
            return Ok(af / m / (1.0 + af * yield_ / m));
        }
        let nominal = bond.nominal().amount;
        let factor = 1.0 + yield_ / m;
        let n = bond.coupons().len();
        let mut md_at_first_coupon = 0.0;
        let mut pv_at_first_coupon = 0.0;
        for (i, coupon) in bond.coupons().iter().enumerate() {
            let i = i as f64;
            md_at_first_coupon += coupon.amount / factor.powf(i + 1.0) * (i + af) / m;
            pv_at_first_coupon += coupon.amount / factor.powf(i);
        }
        let n = n as f64;
        md_at_first_coupon += nominal / factor.powf(n) * (n - 1.0 + af) / m;
        pv_at_first_coupon += nominal / factor.powf(n - 1.0);
        Ok(md_at_first_coupon / pv_at_first_coupon)
    }

    /// Macaulay duration for a yield.
    pub fn macaulay_duration_from_yield(&self, bond: &BondFixedSecurity, yield_: f64) -> BondResult<f64> {
        let m = f64::from(bond.coupons_per_year());
        if Self::simple_last_period(bond) {
            return Ok(bond.accrual_factor_to_next_coupon() / m);
        }
        Ok(self.modified_duration_from_yield(bond, yield_)? * (1.0 + yield_ / m))
    }

    /// Convexity for a yield.
    pub fn convexity_from_yield(&self, bond: &BondFixedSecurity, yield_: f64) -> BondResult<f64> {
        let m = f64::from(bond.coupons_per_year());
        let af = bond.accrual_factor_to_next_coupon();
        if Self::simple_last_period(bond) {
            let time_to_pay = af / m;
            let disc = 1.0 + af * yield_ / m;
            return Ok(2.0 * time_to_pay * time_to_pay / (disc * disc));
        }
        let nominal = bond.nominal().amount;
        let factor = 1.0 + yield_ / m;
        let mut cv_at_first_coupon = 0.0;
        let mut pv_at_first_coupon = 0.0;
        for (i, coupon) in bond.coupons().iter().enumerate() {
            let i = i as f64;
            cv_at_first_coupon += coupon.amount / factor.powf(i + 2.0) * (i + af) * (i + af + 1.0) / (m * m);
            pv_at_first_coupon += coupon.amount / factor.powf(i);
        }
        let n = bond.coupons().len() as f64;
        cv_at_first_coupon += nominal / factor.powf(n + 1.0) * (n - 1.0 + af) * (n + af) / (m * m);
        pv_at_first_coupon += nominal / factor.powf(n - 1.0);
        Ok(cv_at_first_coupon / pv_at_first_coupon)
    }

    /// Modified duration at the curve-implied yield.
    pub fn modified_duration_from_curves(&self, bond: &BondFixedSecurity, curves: &IssuerProvider) -> BondResult<f64> {
        let y = self.yield_from_curves(bond, curves)?;
        self.modified_duration_from_yield(bond, y)
    }

    /// Modified duration at the yield of a clean price.
    pub fn modified_duration_from_clean_price(&self, bond: &BondFixedSecurity, clean_price: f64) -> BondResult<f64> {
        let y = self.yield_from_clean_price(bond, clean_price)?;
        self.modified_duration_from_yield(bond, y)
    }

    /// Macaulay duration at the curve-implied yield.
    pub fn macaulay_duration_from_curves(&self, bond: &BondFixedSecurity, curves: &IssuerProvider) -> BondResult<f64> {
        let y = self.yield_from_curves(bond, curves)?;
        self.macaulay_duration_from_yield(bond, y)
    }

    /// Macaulay duration at the yield of a clean price.
    pub fn macaulay_duration_from_clean_price(&self, bond: &BondFixedSecurity, clean_price: f64) -> BondResult<f64> {
        let y = self.yield_from_clean_price(bond, clean_price)?;
        self.macaulay_duration_from_yield(bond, y)
    }

    /// Convexity at the curve-implied yield.
    pub fn convexity_from_curves(&self, bond: &BondFixedSecurity, curves: &IssuerProvider) -> BondResult<f64> {
        let y = self.yield_from_curves(bond, curves)?;
        self.convexity_from_yield(bond, y)
    }

    /// Convexity at the yield of a clean price.
    pub fn convexity_from_clean_price(&self, bond: &BondFixedSecurity, clean_price: f64) -> BondResult<f64> {
        let y = self.yield_from_clean_price(bond, clean_price)?;
        self.convexity_from_yield(bond, y)
    }

    /// Z-spread, compounded as `compounding`, reproducing a present value.
    ///
    /// A curve failure met while solving is returned as is rather than as a
    /// solver failure.
    pub fn z_spread_from_curves_and_pv(
        &self,
        bond: &BondFixedSecurity,
        curves: &IssuerProvider,
        present_value: f64,
        compounding: SpreadCompounding,
    ) -> BondResult<f64> {
        let failure: RefCell<Option<BondError>> = RefCell::new(None);
        let residual = |z: f64| {
            let pv = Self::spread_issuer_curve(bond, curves, z, compounding)
                .and_then(|curve| Self::present_value_on_curve(bond, &curve));
            match pv {
                Ok(pv) => pv - present_value,
                Err(e) => {
                    let mut first = failure.borrow_mut();
                    if first.is_none() {
                        *first = Some(e);
                    }
                    f64::NAN
                }
            }
        };
        let tolerance = self.config.tolerance;
        let max_iterations = self.config.max_iterations;
        let solved = find_bracket(&residual, Z_SPREAD_BRACKET.0, Z_SPREAD_BRACKET.1, &self.config)
            .and_then(|(a, b)| brent(&residual, a, b, &self.config));
        if let Some(e) = failure.borrow_mut().take() {
            return Err(e);
        }
        let result = solved.map_err(|e| BondError::from_solver(bond.id(), tolerance, max_iterations, e))?;
        debug!(
            "z-spread for {} at pv {present_value}: {} ({} iterations, {compounding:?})",
            bond.id(),
            result.root,
            result.iterations
        );
        Ok(result.root)
    }

    /// Z-spread reproducing the settlement value of a clean price.
    pub fn z_spread_from_curves_and_clean_price(
        &self,
        bond: &BondFixedSecurity,
        curves: &IssuerProvider,
        clean_price: f64,
        compounding: SpreadCompounding,
    ) -> BondResult<f64> {
        let pv = self.present_value_from_clean_price(bond, curves.multicurve(), clean_price)?;
        self.z_spread_from_curves_and_pv(bond, curves, pv, compounding)
    }
}
