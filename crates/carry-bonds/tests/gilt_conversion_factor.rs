//! Long Gilt conversion factors for the December 2011 and March 2012 contracts.
//!
//! Exchange-published factors at a 3% notional coupon. In March 2012 the
//! 2.25% 2014 and 5% 2014 gilts are inside their ex-coupon period at first
//! delivery.

use carry_bonds::prelude::*;
use carry_core::types::{Currency, Date, Frequency};

fn gilt(coupon: f64, maturity: Date) -> BondFixedDefinition {
    BondFixedDefinition::new(
        format!("UKT {coupon}"),
        Currency::GBP,
        "UK GOVT",
        maturity.add_years(-10).unwrap(),
        maturity,
        coupon,
        Frequency::SemiAnnual,
    )
    .unwrap()
    .with_ex_coupon_days(7)
    .with_yield_convention(YieldConvention::UkBumpDmo)
}

fn basket() -> Vec<BondFixedDefinition> {
    vec![
        gilt(0.0225, Date::from_ymd(2014, 3, 7).unwrap()),
        gilt(0.05, Date::from_ymd(2014, 9, 7).unwrap()),
        gilt(0.0275, Date::from_ymd(2015, 1, 22).unwrap()),
    ]
}

fn check(delivery: Date, expected: [f64; 3]) {
    for (bond, cf) in basket().iter().zip(expected) {
        let computed = conversion_factor(bond, delivery, 0.03, ConversionFactorConvention::Liffe).unwrap();
        println!("{} {delivery}: {computed:.7}", bond.id());
        assert!(
            (computed - cf).abs() < 1e-10,
            "{}: expected {cf}, got {computed}",
            bond.id()
        );
    }
}

#[test]
fn test_december_2011_factors() {
    check(Date::from_ymd(2011, 12, 1).unwrap(), [0.9836635, 1.0526713, 0.9925377]);
}

#[test]
fn test_march_2012_factors_with_ex_coupon() {
    check(Date::from_ymd(2012, 3, 1).unwrap(), [0.9854333, 1.0481364, 0.9931048]);
}

#[test]
fn test_euronext_matches_unrounded_liffe_outside_ex_coupon() {
    let delivery = Date::from_ymd(2011, 12, 1).unwrap();
    for bond in basket() {
        let liffe = conversion_factor(&bond, delivery, 0.03, ConversionFactorConvention::Liffe).unwrap();
        let euronext = conversion_factor(&bond, delivery, 0.03, ConversionFactorConvention::Euronext).unwrap();
        assert!((liffe - euronext).abs() < 5e-8);
    }
}

#[test]
fn test_bond_maturing_before_delivery() {
    let bond = gilt(0.04, Date::from_ymd(2011, 9, 7).unwrap());
    let result = conversion_factor(&bond, Date::from_ymd(2011, 12, 1).unwrap(), 0.03, ConversionFactorConvention::Liffe);
    assert!(matches!(result, Err(BondError::MaturityBeforeDelivery { .. })));
}
