//! 30/360 day count conventions.

use super::DayCount;
use crate::types::Date;

fn is_last_day_of_february(date: Date) -> bool {
    date.month() == 2 && date.day() == date.days_in_month()
}

/// 30/360 US (bond basis) with the February end-of-month rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct Thirty360US;

impl DayCount for Thirty360US {
    fn name(&self) -> &'static str {
        "30/360 US"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.day_count(start, end) as f64 / 360.0
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let mut d1 = i64::from(start.day());
        let mut d2 = i64::from(end.day());
        let d1_was_feb_eom = is_last_day_of_february(start);

        if d1_was_feb_eom || d1 == 31 {
            d1 = 30;
        }
        if (is_last_day_of_february(end) && d1_was_feb_eom) || (d2 == 31 && d1 >= 30) {
            d2 = 30;
        }

        360 * i64::from(end.year() - start.year())
            + 30 * (i64::from(end.month()) - i64::from(start.month()))
            + (d2 - d1)
    }
}

/// 30E/360 (Eurobond basis).
#[derive(Debug, Clone, Copy, Default)]
pub struct Thirty360E;

impl DayCount for Thirty360E {
    fn name(&self) -> &'static str {
        "30E/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.day_count(start, end) as f64 / 360.0
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let d1 = i64::from(start.day().min(30));
        let d2 = i64::from(end.day().min(30));
        360 * i64::from(end.year() - start.year())
            + 30 * (i64::from(end.month()) - i64::from(start.month()))
            + (d2 - d1)
    }
}
