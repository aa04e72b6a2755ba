//! Business day calendars and conventions.
//!
//! Holiday generation is left to the caller: [`WeekendCalendar`] treats every
//! weekday as a business day and [`HolidayCalendar`] layers an explicit
//! holiday list on top of it.

mod conventions;

pub use conventions::BusinessDayConvention;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::Date;

/// Business day calendar.
pub trait Calendar: Send + Sync {
    /// Name of the calendar.
    fn name(&self) -> &'static str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Adjusts a date according to the given business day convention.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Date {
        conventions::adjust(date, convention, self)
    }

    /// Advances a date by a signed number of business days.
    fn add_business_days(&self, date: Date, days: i32) -> Date {
        let mut result = date;
        let mut remaining = days.abs();
        let direction: i64 = if days >= 0 { 1 } else { -1 };

        while remaining > 0 {
            result = result.add_days(direction);
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }

        result
    }
}

/// Saturday/Sunday weekend, no holidays.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &'static str {
        "Weekends only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }
}

/// Weekend calendar with an explicit set of holidays.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HolidayCalendar {
    holidays: BTreeSet<Date>,
}

impl HolidayCalendar {
    /// Creates a calendar from a list of holidays.
    #[must_use]
    pub fn new(holidays: impl IntoIterator<Item = Date>) -> Self {
        Self {
            holidays: holidays.into_iter().collect(),
        }
    }
}

impl Calendar for HolidayCalendar {
    fn name(&self) -> &'static str {
        "Weekends and holidays"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !self.holidays.contains(&date)
    }
}
