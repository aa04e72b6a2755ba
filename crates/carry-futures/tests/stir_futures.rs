//! STIR futures under discounting and Hull-White convexity.

use std::sync::Arc;

use approx::assert_relative_eq;
use carry_core::types::{Currency, Date};
use carry_curves::prelude::*;
use carry_futures::prelude::*;

const INDEX: &str = "EUR EURIBOR 3M";

fn multicurve() -> MulticurveProvider {
    let times = vec![0.25, 0.5, 1.0, 2.0, 3.0, 5.0];
    let dsc: Arc<dyn YieldCurve> =
        Arc::new(InterpolatedCurve::new("EUR-DSC", times.clone(), vec![0.01, 0.011, 0.012, 0.014, 0.016, 0.02]).unwrap());
    let fwd: Arc<dyn YieldCurve> =
        Arc::new(InterpolatedCurve::new("EUR-FWD3", times, vec![0.012, 0.0135, 0.015, 0.017, 0.019, 0.023]).unwrap());
    MulticurveProvider::new()
        .with_discount_curve(Currency::EUR, dsc)
        .with_forward_curve(INDEX, fwd)
}

fn params() -> HullWhiteParameters {
    HullWhiteParameters::new(0.01, vec![0.01, 0.011, 0.012, 0.013, 0.014], vec![0.5, 1.0, 2.0, 5.0]).unwrap()
}

fn transaction() -> InterestRateFutureTransaction {
    let definition = InterestRateFutureSecurityDefinition::new(
        "ERM2",
        Currency::EUR,
        INDEX,
        Date::from_ymd(2012, 6, 18).unwrap(),
        3,
        1_000_000.0,
        0.25,
    )
    .unwrap();
    let trade_date = Date::from_ymd(2011, 5, 12).unwrap();
    InterestRateFutureTransactionDefinition::new(definition, 5.0, trade_date, 0.98)
        .to_transaction(trade_date, 0.975)
        .unwrap()
}

#[test]
fn test_trade_date_margins_against_trade_price() {
    let tx = transaction();
    assert_eq!(tx.reference_price(), ReferencePrice::Trade(0.98));
    let mc = multicurve();
    let method = InterestRateFutureDiscountingMethod;
    let price = method.price_from_curves(tx.underlying(), &mc).unwrap();
    assert_relative_eq!(
        method.present_value(&tx, &mc).unwrap(),
        (price - 0.98) * 1_000_000.0 * 0.25 * 5.0,
        epsilon = 1e-8
    );
}

#[test]
fn test_discounting_sensitivity_matches_node_bumps() {
    let tx = transaction();
    let mc = multicurve();
    let method = InterestRateFutureDiscountingMethod;
    let analytic = parameter_sensitivity(&method.present_value_curve_sensitivity(&tx, &mc).unwrap(), &mc).unwrap();
    let nodes = analytic.get("EUR-FWD3", Currency::EUR).unwrap();
    let h = 1e-6;
    for i in 0..nodes.len() {
        let up = method.present_value(&tx, &mc.with_bumped_curve("EUR-FWD3", i, h).unwrap()).unwrap();
        let down = method.present_value(&tx, &mc.with_bumped_curve("EUR-FWD3", i, -h).unwrap()).unwrap();
        assert!((nodes[i] - (up - down) / (2.0 * h)).abs() < 1e-2, "node {i}");
    }
    assert!(analytic.get("EUR-DSC", Currency::EUR).is_none());
}

#[test]
fn test_hull_white_sensitivity_matches_node_bumps() {
    let tx = transaction();
    let provider = HullWhiteProvider::from_multicurve(multicurve(), params());
    let method = InterestRateFutureHullWhiteMethod::new();
    let analytic =
        parameter_sensitivity(&method.present_value_curve_sensitivity(&tx, &provider).unwrap(), &provider).unwrap();
    let nodes = analytic.get("EUR-FWD3", Currency::EUR).unwrap();
    let h = 1e-6;
    for i in 0..nodes.len() {
        let bumped = |s: f64| {
            HullWhiteProvider::from_multicurve(multicurve().with_bumped_curve("EUR-FWD3", i, s).unwrap(), params())
        };
        let fd = (method.present_value(&tx, &bumped(h)).unwrap() - method.present_value(&tx, &bumped(-h)).unwrap())
            / (2.0 * h);
        assert!((nodes[i] - fd).abs() < 1e-2, "node {i}");
    }
}

#[test]
fn test_hull_white_volatility_sensitivity_matches_bumps() {
    let tx = transaction();
    let method = InterestRateFutureHullWhiteMethod::new();
    let base = params();
    let analytic = method
        .present_value_hull_white_sensitivity(&tx, &HullWhiteProvider::from_multicurve(multicurve(), base.clone()))
        .unwrap();
    let h = 1e-6;
    for (k, a) in analytic.iter().enumerate() {
        let pv = |s: f64| {
            let p = HullWhiteProvider::from_multicurve(multicurve(), base.with_volatility_shift(k, s).unwrap());
            method.present_value(&tx, &p).unwrap()
        };
        assert!((a - (pv(h) - pv(-h)) / (2.0 * h)).abs() < 1e-2, "volatility {k}");
    }
}

#[test]
fn test_convexity_adjustment_grows_with_volatility() {
    let tx = transaction();
    let method = InterestRateFutureHullWhiteMethod::new();
    let low = HullWhiteProvider::from_multicurve(multicurve(), HullWhiteParameters::constant(0.01, 0.005).unwrap());
    let high = HullWhiteProvider::from_multicurve(multicurve(), HullWhiteParameters::constant(0.01, 0.015).unwrap());
    let adj_low = method.convexity_adjustment(tx.underlying(), &low).unwrap();
    let adj_high = method.convexity_adjustment(tx.underlying(), &high).unwrap();
    assert!(adj_low < 0.0);
    assert!(adj_high < adj_low);
}
