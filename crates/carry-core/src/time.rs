//! Conversion of dates into model times.
//!
//! Every pricing model works in year fractions measured from the valuation
//! date on an ACT/365 Fixed basis.

use crate::daycounts::{Act365Fixed, DayCount};
use crate::types::Date;

/// Time in years from `valuation` to `date` (negative in the past).
#[must_use]
pub fn time_between(valuation: Date, date: Date) -> f64 {
    Act365Fixed.year_fraction(valuation, date)
}

/// Times for a sequence of dates.
#[must_use]
pub fn times_between(valuation: Date, dates: &[Date]) -> Vec<f64> {
    dates.iter().map(|d| time_between(valuation, *d)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_between() {
        let v = Date::from_ymd(2011, 6, 20).unwrap();
        let d = Date::from_ymd(2012, 6, 19).unwrap();
        assert!((time_between(v, d) - 365.0 / 365.0).abs() < 1e-15);
        assert!(time_between(d, v) < 0.0);
    }
}
