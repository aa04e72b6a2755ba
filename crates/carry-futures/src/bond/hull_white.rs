//! Delivery option of bond futures under Hull-White.
//!
//! At the last notice date each deliverable bond, scaled by its conversion
//! factor, is a sum of lognormal zero-coupon prices driven by one standard
//! normal variable `x`. The futures price is the expectation of the smallest
//! of them. The CTD is tabulated on a grid of `x` values, the switch points
//! between neighbouring CTDs are located exactly, and each region between
//! switches is integrated in closed form.

use carry_curves::sensitivity::{CurveSensitivity, MultipleCurrencyCurveSensitivity};
use carry_math::distributions::{normal_cdf, normal_inverse_cdf};
use carry_math::solvers::{brent, SolverConfig};

use super::discounting::argmin;
use super::security::{BondFuturesSecurity, BondFuturesTransaction};
use crate::error::{FuturesError, FuturesResult};
use crate::hull_white::{HullWhiteModel, HullWhiteProvider};

/// Default number of grid points used to tabulate the CTD.
pub const DEFAULT_NUMBER_OF_POINTS: usize = 81;
/// Smallest accepted number of grid points.
pub const MIN_NUMBER_OF_POINTS: usize = 41;
/// Largest accepted number of grid points.
pub const MAX_NUMBER_OF_POINTS: usize = 501;

/// Bond futures priced with the Hull-White delivery option.
#[derive(Debug, Clone, Copy)]
pub struct BondFuturesHullWhiteMethod {
    number_of_points: usize,
    solver: SolverConfig,
    model: HullWhiteModel,
}

impl Default for BondFuturesHullWhiteMethod {
    fn default() -> Self {
        Self {
            number_of_points: DEFAULT_NUMBER_OF_POINTS,
            solver: SolverConfig::default(),
            model: HullWhiteModel,
        }
    }
}

/// One cash flow of a deliverable bond, already divided by its conversion factor.
struct AdjustedFlow {
    time: f64,
    amount: f64,
    alpha: f64,
}

struct AdjustedBond {
    flows: Vec<AdjustedFlow>,
    accrued: f64,
}

impl AdjustedBond {
    fn value(&self, x: f64) -> f64 {
        self.flows
            .iter()
            .map(|f| f.amount * (-f.alpha * x - 0.5 * f.alpha * f.alpha).exp())
            .sum::<f64>()
            - self.accrued
    }
}

/// Region `lower..upper` of the normal driver on which `bond` is cheapest.
struct Region {
    bond: usize,
    lower: f64,
    upper: f64,
}

impl BondFuturesHullWhiteMethod {
    /// Creates the method with `number_of_points` grid points.
    pub fn new(number_of_points: usize) -> FuturesResult<Self> {
        if !(MIN_NUMBER_OF_POINTS..=MAX_NUMBER_OF_POINTS).contains(&number_of_points) {
            return Err(FuturesError::invalid_parameter(
                "number_of_points",
                format!("{number_of_points} is outside {MIN_NUMBER_OF_POINTS}..={MAX_NUMBER_OF_POINTS}"),
            ));
        }
        Ok(Self {
            number_of_points,
            ..Self::default()
        })
    }

    /// Sets the solver used to locate CTD switches.
    #[must_use]
    pub fn with_solver_config(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Number of grid points.
    #[must_use]
    pub fn number_of_points(&self) -> usize {
        self.number_of_points
    }

    /// Solver used to locate CTD switches.
    #[must_use]
    pub fn solver_config(&self) -> &SolverConfig {
        &self.solver
    }

    /// Discount curve name and per-bond adjusted cash flows.
    fn adjusted_basket(
        &self,
        futures: &BondFuturesSecurity,
        provider: &HullWhiteProvider,
    ) -> FuturesResult<(String, f64, Vec<AdjustedBond>)> {
        let params = provider.parameters();
        let notice = futures.notice_last_time();
        let delivery = futures.delivery_last_time();
        let discount = provider.multicurve().discount_curve(futures.currency())?;
        let df_delivery = discount.discount_factor(delivery)?;

        let mut basket = Vec::with_capacity(futures.delivery_basket().len());
        for (bond, cf) in futures.delivery_basket().iter().zip(futures.conversion_factors()) {
            let issuer_curve = provider.curves().issuer_curve(bond.issuer())?;
            let scale = 1.0 / (bond.notional() * cf);
            let mut flows = Vec::with_capacity(bond.coupons().len() + 1);
            for (time, amount) in bond.cash_flows() {
                let alpha = self.model.alpha(params, 0.0, notice, delivery, time);
                let beta = self.model.futures_convexity_factor(params, notice, time, delivery);
                flows.push(AdjustedFlow {
                    time,
                    amount: issuer_curve.discount_factor(time)? / df_delivery * beta * amount * scale,
                    alpha,
                });
            }
            basket.push(AdjustedBond {
                flows,
                accrued: bond.accrued_interest() * scale,
            });
        }
        Ok((discount.name().to_string(), df_delivery, basket))
    }

    fn grid(&self) -> Vec<f64> {
        let n = self.number_of_points;
        let wing = n / 20;
        let center = n - 2 * wing;
        let x_max = -normal_inverse_cdf(1.0 / (10.0 * center as f64));
        let mut x = Vec::with_capacity(n);
        for k in 0..wing {
            x.push(-x_max * (1.0 + (wing - k) as f64 / wing as f64));
        }
        for i in 0..center {
            x.push(-x_max + 2.0 * x_max * i as f64 / (center - 1) as f64);
        }
        for k in 1..=wing {
            x.push(x_max * (1.0 + k as f64 / wing as f64));
        }
        x
    }

    fn regions(&self, futures: &BondFuturesSecurity, basket: &[AdjustedBond]) -> FuturesResult<Vec<Region>> {
        let grid = self.grid();
        let ctd_at = |x: f64| {
            let values: Vec<f64> = basket.iter().map(|b| b.value(x)).collect();
            argmin(&values)
        };

        let mut regions = Vec::new();
        let mut current = ctd_at(grid[0]);
        let mut lower = f64::NEG_INFINITY;
        for pair in grid.windows(2) {
            let next = ctd_at(pair[1]);
            if next == current {
                continue;
            }
            let (left, right) = (&basket[current], &basket[next]);
            let switch = brent(|x| left.value(x) - right.value(x), pair[0], pair[1], &self.solver)?;
            regions.push(Region {
                bond: current,
                lower,
                upper: switch.root,
            });
            lower = switch.root;
            current = next;
        }
        regions.push(Region {
            bond: current,
            lower,
            upper: f64::INFINITY,
        });
        for r in &regions {
            log::trace!("{}: bond {} cheapest on ({}, {})", futures.name(), r.bond, r.lower, r.upper);
        }
        Ok(regions)
    }

    /// Futures price including the delivery option.
    pub fn price_from_curves(&self, futures: &BondFuturesSecurity, provider: &HullWhiteProvider) -> FuturesResult<f64> {
        let (_, _, basket) = self.adjusted_basket(futures, provider)?;
        let regions = self.regions(futures, &basket)?;
        let mut price = 0.0;
        for region in &regions {
            let bond = &basket[region.bond];
            for flow in &bond.flows {
                price += flow.amount * (normal_cdf(region.upper + flow.alpha) - normal_cdf(region.lower + flow.alpha));
            }
            price -= bond.accrued * (normal_cdf(region.upper) - normal_cdf(region.lower));
        }
        Ok(price)
    }

    /// Point sensitivities of the futures price, with region boundaries held fixed.
    pub fn price_curve_sensitivity(
        &self,
        futures: &BondFuturesSecurity,
        provider: &HullWhiteProvider,
    ) -> FuturesResult<MultipleCurrencyCurveSensitivity> {
        let (discount_name, _, basket) = self.adjusted_basket(futures, provider)?;
        let regions = self.regions(futures, &basket)?;
        let delivery = futures.delivery_last_time();

        let mut sensitivity = CurveSensitivity::new();
        let mut delivery_weight = 0.0;
        for region in &regions {
            let bond = &basket[region.bond];
            let issuer_name = provider
                .curves()
                .issuer_curve(futures.delivery_basket()[region.bond].issuer())?
                .name()
                .to_string();
            for flow in &bond.flows {
                let weight =
                    flow.amount * (normal_cdf(region.upper + flow.alpha) - normal_cdf(region.lower + flow.alpha));
                sensitivity.add_point(&issuer_name, flow.time, -flow.time * weight);
                delivery_weight += weight;
            }
        }
        sensitivity.add_point(&discount_name, delivery, delivery * delivery_weight);
        Ok(MultipleCurrencyCurveSensitivity::of(futures.currency(), sensitivity.cleaned()))
    }

    /// Margin value at the Hull-White price.
    pub fn present_value(&self, transaction: &BondFuturesTransaction, provider: &HullWhiteProvider) -> FuturesResult<f64> {
        let price = self.price_from_curves(transaction.underlying(), provider)?;
        Ok(transaction.present_value_from_price(price))
    }

    /// Point sensitivities of the margin value.
    pub fn present_value_curve_sensitivity(
        &self,
        transaction: &BondFuturesTransaction,
        provider: &HullWhiteProvider,
    ) -> FuturesResult<MultipleCurrencyCurveSensitivity> {
        Ok(self
            .price_curve_sensitivity(transaction.underlying(), provider)?
            .multiplied_by(transaction.price_scale()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_of_points_range() {
        assert!(BondFuturesHullWhiteMethod::new(40).is_err());
        assert!(BondFuturesHullWhiteMethod::new(502).is_err());
        assert_eq!(BondFuturesHullWhiteMethod::new(41).unwrap().number_of_points(), 41);
        assert_eq!(BondFuturesHullWhiteMethod::default().number_of_points(), DEFAULT_NUMBER_OF_POINTS);
    }

    #[test]
    fn test_grid_is_increasing_and_symmetric() {
        for n in [41, 81, 101, 501] {
            let grid = BondFuturesHullWhiteMethod::new(n).unwrap().grid();
            assert_eq!(grid.len(), n);
            assert!(grid.windows(2).all(|w| w[1] > w[0]));
            assert!((grid[0] + grid[n - 1]).abs() < 1e-12);
        }
    }
}
