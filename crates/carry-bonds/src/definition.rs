//! Fixed coupon bond definitions: the contractual terms in dates.

use serde::{Deserialize, Serialize};

use carry_core::calendars::{BusinessDayConvention, Calendar, WeekendCalendar};
use carry_core::daycounts::DayCountConvention;
use carry_core::time::time_between;
use carry_core::types::{Currency, Date, Frequency};
use carry_curves::provider::IssuerKey;

use crate::error::{BondError, BondResult};
use crate::security::{BondFixedSecurity, FixedCoupon, FixedPayment};

/// Yield-to-price convention of a bond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum YieldConvention {
    /// Compounded at the coupon frequency; the last period is discounted simply.
    #[default]
    UsStreet,
    /// UK DMO method: compounded at the coupon frequency throughout.
    UkBumpDmo,
}

/// One accrual period of the coupon schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CouponPeriod {
    /// Accrual start (unadjusted).
    pub accrual_start: Date,
    /// Accrual end (unadjusted).
    pub accrual_end: Date,
    /// Regular period start used as the ACT/ACT reference.
    pub reference_start: Date,
    /// Payment date (accrual end adjusted).
    pub payment_date: Date,
    /// Accrual factor of the period.
    pub accrual_factor: f64,
    /// Coupon amount (rate × notional × accrual factor).
    pub amount: f64,
}

/// Terms of a fixed coupon bond.
///
/// The coupon schedule is generated backward from maturity, so an irregular
/// period can only appear first.
///
/// # Example
///
/// ```rust
/// use carry_bonds::definition::BondFixedDefinition;
/// use carry_core::types::{Currency, Date, Frequency};
///
/// let gilt = BondFixedDefinition::new(
///     "UKT 5 09/07/14",
///     Currency::GBP,
///     "UK GOVT",
///     Date::from_ymd(2004, 3, 7).unwrap(),
///     Date::from_ymd(2014, 9, 7).unwrap(),
///     0.05,
///     Frequency::SemiAnnual,
/// )
/// .unwrap()
/// .with_ex_coupon_days(7);
/// assert_eq!(gilt.coupons().len(), 21);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondFixedDefinition {
    id: String,
    currency: Currency,
    issuer: String,
    first_accrual: Date,
    maturity: Date,
    coupon_rate: f64,
    frequency: Frequency,
    day_count: DayCountConvention,
    business_day: BusinessDayConvention,
    ex_coupon_days: u32,
    settlement_days: u32,
    notional: f64,
    yield_convention: YieldConvention,
    coupons: Vec<CouponPeriod>,
}

impl BondFixedDefinition {
    /// Creates a bond with ACT/ACT ICMA accrual, unit notional and no ex-coupon period.
    pub fn new(
        id: impl Into<String>,
        currency: Currency,
        issuer: impl Into<String>,
        first_accrual: Date,
        maturity: Date,
        coupon_rate: f64,
        frequency: Frequency,
    ) -> BondResult<Self> {
        if maturity <= first_accrual {
            return Err(BondError::invalid_definition(format!(
                "maturity {maturity} must be after first accrual {first_accrual}"
            )));
        }
        if !coupon_rate.is_finite() {
            return Err(BondError::invalid_definition("coupon rate must be finite"));
        }
        let mut bond = Self {
            id: id.into(),
            currency,
            issuer: issuer.into(),
            first_accrual,
            maturity,
            coupon_rate,
            frequency,
            day_count: DayCountConvention::ActActIcma,
            business_day: BusinessDayConvention::Unadjusted,
            ex_coupon_days: 0,
            settlement_days: 0,
            notional: 1.0,
            yield_convention: YieldConvention::UsStreet,
            coupons: Vec::new(),
        };
        bond.coupons = bond.build_schedule()?;
        Ok(bond)
    }

    /// Sets the accrual day count.
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> BondResult<Self> {
        self.day_count = day_count;
        self.coupons = self.build_schedule()?;
        Ok(self)
    }

    /// Sets the payment date adjustment.
    pub fn with_business_day_convention(mut self, convention: BusinessDayConvention) -> BondResult<Self> {
        self.business_day = convention;
        self.coupons = self.build_schedule()?;
        Ok(self)
    }

    /// Sets the notional.
    pub fn with_notional(mut self, notional: f64) -> BondResult<Self> {
        if !(notional.is_finite() && notional > 0.0) {
            return Err(BondError::invalid_definition("notional must be positive"));
        }
        self.notional = notional;
        self.coupons = self.build_schedule()?;
        Ok(self)
    }

    /// Sets the number of business days before a payment when the coupon detaches.
    #[must_use]
    pub fn with_ex_coupon_days(mut self, days: u32) -> Self {
        self.ex_coupon_days = days;
        self
    }

    /// Sets the spot settlement lag in business days.
    #[must_use]
    pub fn with_settlement_days(mut self, days: u32) -> Self {
        self.settlement_days = days;
        self
    }

    /// Sets the yield convention.
    #[must_use]
    pub fn with_yield_convention(mut self, convention: YieldConvention) -> Self {
        self.yield_convention = convention;
        self
    }

    fn build_schedule(&self) -> BondResult<Vec<CouponPeriod>> {
        let months = self.frequency.months_per_period() as i32;
        let mut ends = vec![self.maturity];
        let mut k = 1;
        loop {
            let date = self.maturity.add_months(-k * months)?;
            if date <= self.first_accrual {
                break;
            }
            ends.push(date);
            k += 1;
        }
        ends.reverse();

        let calendar = WeekendCalendar;
        let mut periods = Vec::with_capacity(ends.len());
        let mut start = self.first_accrual;
        for end in ends {
            let reference_start = end.add_months(-months)?;
            let accrual_factor =
                self.day_count
                    .accrual_factor(start, end, reference_start, end, self.frequency);
            periods.push(CouponPeriod {
                accrual_start: start,
                accrual_end: end,
                reference_start,
                payment_date: calendar.adjust(end, self.business_day),
                accrual_factor,
                amount: self.coupon_rate * self.notional * accrual_factor,
            });
            start = end;
        }
        Ok(periods)
    }

    /// Bond identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Issuer name.
    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Issuer curve key.
    #[must_use]
    pub fn issuer_key(&self) -> IssuerKey {
        IssuerKey::new(self.issuer.clone(), self.currency)
    }

    /// First accrual date.
    #[must_use]
    pub fn first_accrual(&self) -> Date {
        self.first_accrual
    }

    /// Maturity date.
    #[must_use]
    pub fn maturity(&self) -> Date {
        self.maturity
    }

    /// Annual coupon rate.
    #[must_use]
    pub fn coupon_rate(&self) -> f64 {
        self.coupon_rate
    }

    /// Coupon frequency.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Ex-coupon business days.
    #[must_use]
    pub fn ex_coupon_days(&self) -> u32 {
        self.ex_coupon_days
    }

    /// Notional.
    #[must_use]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Yield convention.
    #[must_use]
    pub fn yield_convention(&self) -> YieldConvention {
        self.yield_convention
    }

    /// Coupon schedule.
    #[must_use]
    pub fn coupons(&self) -> &[CouponPeriod] {
        &self.coupons
    }

    /// Spot settlement date for a trade on `trade_date`.
    #[must_use]
    pub fn settlement_date(&self, trade_date: Date) -> Date {
        WeekendCalendar.add_business_days(trade_date, self.settlement_days as i32)
    }

    /// Last date on which the coupon paid on `payment_date` still goes to the buyer.
    #[must_use]
    pub fn ex_coupon_date(&self, payment_date: Date) -> Date {
        WeekendCalendar.add_business_days(payment_date, -(self.ex_coupon_days as i32))
    }

    fn is_ex_coupon(&self, period: &CouponPeriod, date: Date) -> bool {
        self.ex_coupon_days != 0 && date > self.ex_coupon_date(period.payment_date)
    }

    /// Accrued interest at `date`, scaled by the notional.
    ///
    /// Inside the ex-coupon period the buyer does not receive the next coupon
    /// and the accrued interest is negative.
    #[must_use]
    pub fn accrued_interest(&self, date: Date) -> f64 {
        let Some(period) = self.coupons.iter().find(|c| c.accrual_end > date) else {
            return 0.0;
        };
        if date <= period.accrual_start {
            return 0.0;
        }
        let factor = self.day_count.accrual_factor(
            period.accrual_start,
            date,
            period.reference_start,
            period.accrual_end,
            self.frequency,
        );
        let accrued = factor * self.coupon_rate * self.notional;
        if self.is_ex_coupon(period, date) {
            accrued - period.amount
        } else {
            accrued
        }
    }

    /// Security at spot settlement of `valuation`.
    pub fn to_security(&self, valuation: Date) -> BondResult<BondFixedSecurity> {
        self.to_security_with_settlement(valuation, self.settlement_date(valuation))
    }

    /// Security seen from `valuation` and settled on `settlement`.
    ///
    /// Coupons paid on or before settlement are dropped. A settlement before
    /// the valuation date or before the first accrual is treated as immediate
    /// with no accrued interest.
    pub fn to_security_with_settlement(
        &self,
        valuation: Date,
        settlement: Date,
    ) -> BondResult<BondFixedSecurity> {
        let remaining: Vec<&CouponPeriod> = self
            .coupons
            .iter()
            .filter(|c| c.payment_date > settlement)
            .collect();
        let Some(first) = remaining.first() else {
            return Err(BondError::NoCashFlows {
                instrument: self.id.clone(),
                settlement: settlement.to_string(),
            });
        };

        let (settlement_time, accrued_interest) =
            if settlement < valuation || self.first_accrual > settlement {
                (0.0, 0.0)
            } else {
                (time_between(valuation, settlement), self.accrued_interest(settlement))
            };

        let ex_coupon = self.is_ex_coupon(first, settlement);
        let coupons = remaining
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let detached = i == 0 && ex_coupon;
                FixedCoupon {
                    payment_time: time_between(valuation, c.payment_date),
                    accrual_factor: c.accrual_factor,
                    rate: if detached { 0.0 } else { self.coupon_rate },
                    notional: self.notional,
                    amount: if detached { 0.0 } else { c.amount },
                }
            })
            .collect();

        let factor_to_next_coupon = if first.accrual_start > settlement {
            0.0
        } else {
            let spot = self.day_count.accrual_factor(
                first.accrual_start,
                settlement,
                first.reference_start,
                first.accrual_end,
                self.frequency,
            );
            let period = first.accrual_factor;
            (period - spot) / period
        };

        let maturity_payment = WeekendCalendar.adjust(self.maturity, self.business_day);
        BondFixedSecurity::new(
            self.id.clone(),
            self.issuer_key(),
            coupons,
            FixedPayment {
                time: time_between(valuation, maturity_payment),
                amount: self.notional,
            },
            settlement_time,
            accrued_interest,
            factor_to_next_coupon,
            self.frequency.periods_per_year(),
            self.yield_convention,
        )
    }
}
