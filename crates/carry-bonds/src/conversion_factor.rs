//! Exchange conversion factors for deliverable bonds.
//!
//! A conversion factor is the clean price per unit face at which a bond
//! yields the contract's notional coupon at the first delivery day.

use serde::{Deserialize, Serialize};

use carry_core::calendars::{Calendar, WeekendCalendar};
use carry_core::types::Date;

use crate::definition::BondFixedDefinition;
use crate::error::{BondError, BondResult};

/// Exchange convention for conversion factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConversionFactorConvention {
    /// ICE Futures Europe (Gilt): semi-annual yield, rounded to 7 decimals,
    /// 7 business day ex-coupon period.
    Liffe,
    /// Eurex/Euronext style: yield at the bond's own frequency, unrounded.
    Euronext,
    /// CME Treasury futures: month-rounded formula, rounded to 4 decimals.
    Cbot,
}

const LIFFE_EX_COUPON_DAYS: i32 = 7;

/// Conversion factor of `bond` for a contract with first delivery `delivery`.
///
/// `notional_coupon` is the contract's notional yield, e.g. 0.03 for the
/// 2011-2012 Long Gilt contracts or 0.06 for Treasury bond futures.
pub fn conversion_factor(
    bond: &BondFixedDefinition,
    delivery: Date,
    notional_coupon: f64,
    convention: ConversionFactorConvention,
) -> BondResult<f64> {
    if bond.maturity() < delivery {
        return Err(BondError::MaturityBeforeDelivery {
            maturity: bond.maturity().to_string(),
            delivery: delivery.to_string(),
        });
    }
    let factor = match convention {
        ConversionFactorConvention::Liffe => round_to(yield_price_factor(bond, delivery, notional_coupon, 2, true)?, 7),
        ConversionFactorConvention::Euronext => {
            let m = bond.frequency().periods_per_year();
            yield_price_factor(bond, delivery, notional_coupon, m, false)?
        }
        ConversionFactorConvention::Cbot => round_to(cbot_factor(bond, delivery, notional_coupon), 4),
    };
    Ok(factor)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Clean price at yield `y` compounded `m` times a year on a schedule rolled
/// back from maturity.
fn yield_price_factor(
    bond: &BondFixedDefinition,
    delivery: Date,
    y: f64,
    m: u32,
    ex_coupon_rule: bool,
) -> BondResult<f64> {
    let months = 12 / m as i32;
    let mut dates = vec![bond.maturity()];
    let mut k = 1;
    let previous = loop {
        let date = bond.maturity().add_months(-k * months)?;
        if date <= delivery {
            break date;
        }
        dates.push(date);
        k += 1;
    };
    dates.reverse();
    let next = dates[0];

    let mf = f64::from(m);
    let c = bond.coupon_rate() / mf;
    let v = 1.0 / (1.0 + y / mf);
    let period_days = previous.days_between(&next) as f64;
    let f = delivery.days_between(&next) as f64 / period_days;

    let ex_coupon = ex_coupon_rule
        && delivery >= WeekendCalendar.add_business_days(next, -LIFFE_EX_COUPON_DAYS);

    let n = dates.len();
    let mut pv = 0.0;
    for i in 0..n {
        if i == 0 && ex_coupon {
            continue;
        }
        pv += c * v.powi(i as i32);
    }
    pv += v.powi(n as i32 - 1);
    let dirty = pv * v.powf(f);

    let accrued = if ex_coupon {
        -c * delivery.days_between(&next) as f64 / period_days
    } else {
        c * previous.days_between(&delivery) as f64 / period_days
    };
    Ok(dirty - accrued)
}

fn cbot_factor(bond: &BondFixedDefinition, delivery: Date, notional_coupon: f64) -> f64 {
    let months = delivery.whole_months_until(&bond.maturity()).max(0);
    let n = months / 12;
    let z = {
        let remainder = months % 12;
        remainder - remainder % 3
    };
    let v = if z < 7 { z } else { z - 6 };
    let growth = 1.0 + notional_coupon / 2.0;
    let coupon = bond.coupon_rate();

    let a = 1.0 / growth.powf(f64::from(v) / 6.0);
    let b = coupon / 2.0 * f64::from(6 - v) / 6.0;
    let periods = if z < 7 { 2 * n } else { 2 * n + 1 };
    let big_c = 1.0 / growth.powi(periods);
    let d = coupon / notional_coupon * (1.0 - big_c);
    a * (coupon / 2.0 + big_c + d) - b
}

#[cfg(test)]
mod tests {
    use super::*;
    use carry_core::types::{Currency, Frequency};

    fn treasury(coupon: f64, maturity: Date) -> BondFixedDefinition {
        BondFixedDefinition::new(
            "UST",
            Currency::USD,
            "US GOVT",
            maturity.add_years(-30).unwrap(),
            maturity,
            coupon,
            Frequency::SemiAnnual,
        )
        .unwrap()
    }

    #[test]
    fn test_cbot_par_coupon_is_one() {
        let delivery = Date::from_ymd(2011, 9, 1).unwrap();
        let bond = treasury(0.06, Date::from_ymd(2031, 9, 1).unwrap());
        let cf = conversion_factor(&bond, delivery, 0.06, ConversionFactorConvention::Cbot).unwrap();
        assert!((cf - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cbot_factor_increases_with_coupon() {
        let delivery = Date::from_ymd(2011, 9, 1).unwrap();
        let maturity = Date::from_ymd(2016, 8, 31).unwrap();
        let low = conversion_factor(&treasury(0.015, maturity), delivery, 0.06, ConversionFactorConvention::Cbot).unwrap();
        let high = conversion_factor(&treasury(0.02, maturity), delivery, 0.06, ConversionFactorConvention::Cbot).unwrap();
        assert!(low < high && high < 1.0);
        assert_eq!(low, (low * 1e4).round() / 1e4);
    }

    #[test]
    fn test_euronext_par_bond_on_coupon_date() {
        let bond = BondFixedDefinition::new(
            "BUND",
            Currency::EUR,
            "DE GOVT",
            Date::from_ymd(2010, 7, 4).unwrap(),
            Date::from_ymd(2020, 7, 4).unwrap(),
            0.06,
            Frequency::Annual,
        )
        .unwrap();
        let delivery = Date::from_ymd(2012, 7, 4).unwrap();
        let cf = conversion_factor(&bond, delivery, 0.06, ConversionFactorConvention::Euronext).unwrap();
        assert!((cf - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_maturity_before_delivery() {
        let bond = treasury(0.04, Date::from_ymd(2011, 6, 30).unwrap());
        let result = conversion_factor(&bond, Date::from_ymd(2011, 9, 1).unwrap(), 0.06, ConversionFactorConvention::Cbot);
        assert!(matches!(result, Err(BondError::MaturityBeforeDelivery { .. })));
    }
}
