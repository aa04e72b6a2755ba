//! Benchmarks for bond futures pricing with and without the delivery option.
//!
//! Run with: cargo bench -p carry-futures

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use carry_bonds::definition::BondFixedDefinition;
use carry_core::types::{Currency, Date, Frequency};
use carry_curves::prelude::*;
use carry_futures::prelude::*;

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

fn futures() -> BondFuturesSecurity {
    let coupons = [0.02, 0.02625, 0.025, 0.02625, 0.0275, 0.025, 0.02125];
    let factors = vec![0.8317, 0.8565, 0.8493, 0.8516, 0.8540, 0.8417, 0.8292];
    let basket = coupons
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let maturity = Date::from_ymd(2016, 1, 31).unwrap().add_months(i as i32).unwrap();
            BondFixedDefinition::new(
                format!("T{i}"),
                Currency::USD,
                "US GOVT",
                maturity.add_years(-5).unwrap(),
                maturity,
                c,
                Frequency::SemiAnnual,
            )
            .unwrap()
        })
        .collect();
    let d = |y, m, day| Date::from_ymd(y, m, day).unwrap();
    let dates = DeliveryDates {
        trading_last: d(2011, 9, 30),
        notice_first: d(2011, 8, 31),
        notice_last: d(2011, 10, 4),
        delivery_first: d(2011, 9, 1),
        delivery_last: d(2011, 10, 5),
    };
    BondFuturesSecurityDefinition::new("FVU1", dates, 100_000.0, basket, factors)
        .unwrap()
        .to_security(d(2011, 6, 20))
        .unwrap()
}

fn bench_bond_futures(c: &mut Criterion) {
    let curves = curves();
    let futures = futures();
    let provider = HullWhiteProvider::new(curves.clone(), HullWhiteParameters::constant(0.05, 0.01).unwrap());

    let mut group = c.benchmark_group("bond_futures");
    group.bench_function("discounting_price", |b| {
        let method = BondFuturesDiscountingMethod::default();
        b.iter(|| method.price_from_curves(black_box(&futures), black_box(&curves)));
    });
    for points in [41, 81, 201, 501] {
        let method = BondFuturesHullWhiteMethod::new(points).unwrap();
        group.bench_with_input(BenchmarkId::new("hull_white_price", points), &points, |b, _| {
            b.iter(|| method.price_from_curves(black_box(&futures), black_box(&provider)));
        });
    }
    group.bench_function("hull_white_curve_sensitivity", |b| {
        let method = BondFuturesHullWhiteMethod::default();
        b.iter(|| method.price_curve_sensitivity(black_box(&futures), black_box(&provider)));
    });
    group.finish();
}

criterion_group!(benches, bench_bond_futures);
criterion_main!(benches);
