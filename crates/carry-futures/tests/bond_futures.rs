//! 5-Year US Treasury note future (FVU1) with a 7-bond delivery basket.

use std::sync::Arc;

use approx::assert_relative_eq;
use carry_bonds::prelude::*;
use carry_core::types::{Currency, Date, Frequency};
use carry_curves::prelude::*;
use carry_futures::prelude::*;

const CONVERSION_FACTORS: [f64; 7] = [0.8317, 0.8565, 0.8493, 0.8516, 0.8540, 0.8417, 0.8292];

fn curves() -> IssuerProvider {
    let times = vec![0.25, 0.5, 1.0, 2.0, 3.0, 5.0, 7.0, 10.0];
    let dsc: Arc<dyn YieldCurve> = Arc::new(
        InterpolatedCurve::new("USD-DSC", times.clone(), vec![0.002, 0.0025, 0.003, 0.005, 0.008, 0.014, 0.02, 0.026])
            .unwrap(),
    );
    let govt: Arc<dyn YieldCurve> = Arc::new(
        InterpolatedCurve::new("USD-GOVT", times, vec![0.001, 0.0015, 0.0022, 0.0045, 0.0078, 0.0145, 0.0205, 0.027])
            .unwrap(),
    );
    IssuerProvider::new(MulticurveProvider::new().with_discount_curve(Currency::USD, dsc))
        .with_issuer_curve(IssuerKey::new("US GOVT", Currency::USD), govt)
}

fn note(coupon: f64, maturity: Date) -> BondFixedDefinition {
    BondFixedDefinition::new(
        format!("T {} {maturity}", coupon * 100.0),
        Currency::USD,
        "US GOVT",
        maturity.add_years(-5).unwrap(),
        maturity,
        coupon,
        Frequency::SemiAnnual,
    )
    .unwrap()
    .with_settlement_days(1)
}

fn definition() -> BondFuturesSecurityDefinition {
    let d = |y, m, day| Date::from_ymd(y, m, day).unwrap();
    let basket = vec![
        note(0.02, d(2016, 1, 31)),
        note(0.02625, d(2016, 2, 29)),
        note(0.025, d(2016, 3, 31)),
        note(0.02625, d(2016, 4, 30)),
        note(0.0275, d(2016, 5, 31)),
        note(0.025, d(2016, 6, 30)),
        note(0.02125, d(2016, 7, 31)),
    ];
    let dates = DeliveryDates {
        trading_last: d(2011, 9, 30),
        notice_first: d(2011, 8, 31),
        notice_last: d(2011, 10, 4),
        delivery_first: d(2011, 9, 1),
        delivery_last: d(2011, 10, 5),
    };
    BondFuturesSecurityDefinition::new("FVU1", dates, 100_000.0, basket, CONVERSION_FACTORS.to_vec()).unwrap()
}

fn valuation() -> Date {
    Date::from_ymd(2011, 6, 20).unwrap()
}

fn futures() -> BondFuturesSecurity {
    definition().to_security(valuation()).unwrap()
}

#[test]
fn test_price_is_minimum_adjusted_forward_price() {
    let curves = curves();
    let futures = futures();
    let method = BondFuturesDiscountingMethod::default();
    let bond_method = BondDiscountingMethod::default();
    let adjusted: Vec<f64> = futures
        .delivery_basket()
        .iter()
        .zip(CONVERSION_FACTORS)
        .map(|(bond, cf)| bond_method.clean_price_from_curves(bond, &curves).unwrap() / cf)
        .collect();
    let expected = adjusted.iter().copied().fold(f64::INFINITY, f64::min);
    let price = method.price_from_curves(&futures, &curves).unwrap();
    assert_relative_eq!(price, expected, epsilon = 1e-8);

    let ctd = method.cheapest_to_deliver(&futures, &curves).unwrap();
    assert_eq!(adjusted[ctd], expected);
    assert!(adjusted.iter().all(|a| price <= *a));
}

#[test]
fn test_net_basis_identity() {
    let curves = curves();
    let futures = futures();
    let method = BondFuturesDiscountingMethod::default();
    let price = method.price_from_curves(&futures, &curves).unwrap();
    let dirty = method.forward_dirty_prices(&futures, &curves).unwrap();
    let basis = method.net_basis_all_bonds(&futures, &curves, price).unwrap();
    for (i, bond) in futures.delivery_basket().iter().enumerate() {
        let expected = dirty[i] - (price * CONVERSION_FACTORS[i] + bond.accrued_interest() / bond.notional());
        assert!((basis[i] - expected).abs() < 1e-10);
        assert!(basis[i] > -1e-10);
    }
    let ctd = method.cheapest_to_deliver(&futures, &curves).unwrap();
    assert!(basis[ctd].abs() < 1e-10);
    assert!((method.net_basis_cheapest(&futures, &curves, price).unwrap() - basis[ctd]).abs() < 1e-10);
}

#[test]
fn test_price_from_net_basis_round_trip() {
    let curves = curves();
    let futures = futures();
    let method = BondFuturesDiscountingMethod::default();
    let ctd = method.cheapest_to_deliver(&futures, &curves).unwrap();
    for net_basis in [-0.002, 0.0, 0.0015, 0.01] {
        let price = method.price_from_net_basis(&futures, &curves, net_basis).unwrap();
        let back = method.net_basis_all_bonds(&futures, &curves, price).unwrap()[ctd];
        assert!((back - net_basis).abs() < 1e-10);
    }
    let curve_price = method.price_from_curves(&futures, &curves).unwrap();
    assert_relative_eq!(method.price_from_net_basis(&futures, &curves, 0.0).unwrap(), curve_price, epsilon = 1e-12);
}

#[test]
fn test_gross_basis() {
    let curves = curves();
    let futures = futures();
    let method = BondFuturesDiscountingMethod::default();
    let clean = [1.01, 1.035, 1.025, 1.03, 1.04, 1.02, 1.005];
    let gross = method.gross_basis_all_bonds(&futures, &clean, 1.2).unwrap();
    for i in 0..7 {
        assert_relative_eq!(gross[i], clean[i] - 1.2 * CONVERSION_FACTORS[i], epsilon = 1e-15);
    }
    assert!(matches!(
        method.gross_basis_all_bonds(&futures, &clean[..3], 1.2),
        Err(FuturesError::LengthMismatch { expected: 7, actual: 3 })
    ));
    assert_eq!(method.gross_basis_from_curves(&futures, &curves, 1.2).unwrap().len(), 7);
}

#[test]
fn test_price_curve_sensitivity_matches_bumps() {
    let curves = curves();
    let futures = futures();
    let method = BondFuturesDiscountingMethod::default();
    let analytic = parameter_sensitivity(&method.price_curve_sensitivity(&futures, &curves).unwrap(), &curves).unwrap();
    let h = 1e-6;
    for name in ["USD-DSC", "USD-GOVT"] {
        let nodes = analytic.get(name, Currency::USD).unwrap();
        for i in 0..nodes.len() {
            let up = curves.with_bumped_curve(name, i, h).unwrap();
            let down = curves.with_bumped_curve(name, i, -h).unwrap();
            let fd = (method.price_from_curves(&futures, &up).unwrap() - method.price_from_curves(&futures, &down).unwrap())
                / (2.0 * h);
            assert!((nodes[i] - fd).abs() < 1e-6, "{name} node {i}: {} vs {fd}", nodes[i]);
        }
    }
}

#[test]
fn test_present_value_and_sensitivity() {
    let curves = curves();
    let method = BondFuturesDiscountingMethod::default();
    let trade_date = Date::from_ymd(2011, 6, 17).unwrap();
    let transaction = BondFuturesTransactionDefinition::new(definition(), -2.0, trade_date, 1.2)
        .to_transaction(valuation(), 1.21)
        .unwrap();
    assert_eq!(transaction.reference_price(), ReferencePrice::LastMargin(1.21));

    let price = method.price_from_curves(transaction.underlying(), &curves).unwrap();
    let pv = method.present_value(&transaction, &curves).unwrap();
    assert_relative_eq!(pv, (price - 1.21) * 100_000.0 * -2.0, epsilon = 1e-8);
    assert_relative_eq!(method.present_value_from_price(&transaction, 1.21), 0.0);

    let pv_nb = method.present_value_from_net_basis(&transaction, &curves, 0.0).unwrap();
    assert_relative_eq!(pv_nb, pv, epsilon = 1e-7);

    let price_sensi = method.price_curve_sensitivity(transaction.underlying(), &curves).unwrap();
    let pv_sensi = method.present_value_curve_sensitivity(&transaction, &curves).unwrap();
    let diff = pv_sensi
        .sensitivity(Currency::USD)
        .max_difference(&price_sensi.multiplied_by(-200_000.0).sensitivity(Currency::USD));
    assert!(diff < 1e-8);
}

#[test]
fn test_pricing_is_idempotent() {
    let curves = curves();
    let futures = futures();
    let method = BondFuturesDiscountingMethod::default();
    let first = method.price_from_curves(&futures, &curves).unwrap();
    let second = method.price_from_curves(&futures, &curves).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        method.price_curve_sensitivity(&futures, &curves).unwrap(),
        method.price_curve_sensitivity(&futures, &curves).unwrap()
    );
}

#[test]
fn test_hull_white_delivery_option() {
    let curves = curves();
    let futures = futures();
    let discounting = BondFuturesDiscountingMethod::default();
    let method = BondFuturesHullWhiteMethod::default();
    let plain = discounting.price_from_curves(&futures, &curves).unwrap();

    let no_vol = HullWhiteProvider::new(curves.clone(), HullWhiteParameters::constant(0.05, 0.0).unwrap());
    assert_relative_eq!(method.price_from_curves(&futures, &no_vol).unwrap(), plain, epsilon = 1e-10);

    let provider = HullWhiteProvider::new(curves.clone(), HullWhiteParameters::constant(0.05, 0.01).unwrap());
    let with_option = method.price_from_curves(&futures, &provider).unwrap();
    assert!(with_option < plain);

    let fine = BondFuturesHullWhiteMethod::new(501).unwrap().price_from_curves(&futures, &provider).unwrap();
    assert!((fine - with_option).abs() < 1e-8);
}

#[test]
fn test_hull_white_curve_sensitivity_matches_bumps() {
    let curves = curves();
    let futures = futures();
    let params = HullWhiteParameters::constant(0.05, 0.01).unwrap();
    let provider = HullWhiteProvider::new(curves.clone(), params.clone());
    let method = BondFuturesHullWhiteMethod::default();
    let analytic =
        parameter_sensitivity(&method.price_curve_sensitivity(&futures, &provider).unwrap(), &provider).unwrap();
    let h = 1e-6;
    for name in ["USD-DSC", "USD-GOVT"] {
        let nodes = analytic.get(name, Currency::USD).unwrap();
        for i in 0..nodes.len() {
            let up = HullWhiteProvider::new(curves.with_bumped_curve(name, i, h).unwrap(), params.clone());
            let down = HullWhiteProvider::new(curves.with_bumped_curve(name, i, -h).unwrap(), params.clone());
            let fd = (method.price_from_curves(&futures, &up).unwrap()
                - method.price_from_curves(&futures, &down).unwrap())
                / (2.0 * h);
            assert!((nodes[i] - fd).abs() < 1e-6, "{name} node {i}: {} vs {fd}", nodes[i]);
        }
    }
}

#[test]
fn test_futures_on_annually_compounded_issuer_spread() {
    let curves = curves();
    let bond_method = BondDiscountingMethod::default();
    let method = BondFuturesDiscountingMethod::default();
    let spot = note(0.02, Date::from_ymd(2016, 1, 31).unwrap()).to_security(valuation()).unwrap();
    let market_clean = 1.0;

    let spread = bond_method
        .z_spread_from_curves_and_clean_price(&spot, &curves, market_clean, SpreadCompounding::ANNUAL)
        .unwrap();
    assert!(spread > 0.0);
    let spread_curves = curves
        .with_issuer_spread(spot.issuer(), SpreadCompounding::ANNUAL.spread(spread))
        .unwrap();
    assert_relative_eq!(bond_method.clean_price_from_curves(&spot, &spread_curves).unwrap(), market_clean, epsilon = 1e-9);

    let plain = method.price_from_curves(&futures(), &curves).unwrap();
    let price = method.price_from_curves(&futures(), &spread_curves).unwrap();
    assert!(price < plain);

    let trade_date = Date::from_ymd(2011, 6, 17).unwrap();
    let transaction = BondFuturesTransactionDefinition::new(definition(), -2.0, trade_date, 1.2)
        .to_transaction(valuation(), 1.21)
        .unwrap();
    let pv = method.present_value(&transaction, &spread_curves).unwrap();
    assert_relative_eq!(pv, (price - 1.21) * 100_000.0 * -2.0, epsilon = 1e-8);

    // PV01: parallel move of every node of both curves under the fixed spread
    let bp = 1e-4;
    let sensitivity = method.present_value_curve_sensitivity(&transaction, &spread_curves).unwrap();
    let pv01 = parameter_sensitivity(&sensitivity, &spread_curves).unwrap().multiplied_by(bp).total_by_currency()
        [&Currency::USD];
    let h = 1e-6;
    let mut bumped = 0.0;
    for name in ["USD-DSC", "USD-GOVT"] {
        for i in 0..8 {
            let up = spread_curves.with_bumped_curve(name, i, h).unwrap();
            let down = spread_curves.with_bumped_curve(name, i, -h).unwrap();
            bumped += (method.present_value(&transaction, &up).unwrap()
                - method.present_value(&transaction, &down).unwrap())
                / (2.0 * h)
                * bp;
        }
    }
    assert!(pv01 > 0.0);
    assert_relative_eq!(pv01, bumped, max_relative = 1e-5);
}
