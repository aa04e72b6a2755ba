//! Business day adjustment conventions.

use serde::{Deserialize, Serialize};

use super::Calendar;
use crate::types::Date;

/// Rule for moving a date that falls on a non-business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BusinessDayConvention {
    /// No adjustment.
    Unadjusted,
    /// Next business day.
    #[default]
    Following,
    /// Next business day unless it crosses a month end.
    ModifiedFollowing,
    /// Previous business day.
    Preceding,
}

impl std::fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BusinessDayConvention::Unadjusted => "Unadjusted",
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
        };
        write!(f, "{name}")
    }
}

pub(super) fn adjust<C: Calendar + ?Sized>(
    date: Date,
    convention: BusinessDayConvention,
    calendar: &C,
) -> Date {
    if calendar.is_business_day(date) {
        return date;
    }

    match convention {
        BusinessDayConvention::Unadjusted => date,
        BusinessDayConvention::Following => following(date, calendar),
        BusinessDayConvention::ModifiedFollowing => {
            let adjusted = following(date, calendar);
            if adjusted.month() != date.month() {
                preceding(date, calendar)
            } else {
                adjusted
            }
        }
        BusinessDayConvention::Preceding => preceding(date, calendar),
    }
}

fn following<C: Calendar + ?Sized>(date: Date, calendar: &C) -> Date {
    let mut result = date;
    while !calendar.is_business_day(result) {
        result = result.add_days(1);
    }
    result
}

fn preceding<C: Calendar + ?Sized>(date: Date, calendar: &C) -> Date {
    let mut result = date;
    while !calendar.is_business_day(result) {
        result = result.add_days(-1);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::WeekendCalendar;

    #[test]
    fn test_modified_following_month_end() {
        // Saturday 31 March 2012
        let date = Date::from_ymd(2012, 3, 31).unwrap();
        let cal = WeekendCalendar;
        assert_eq!(
            cal.adjust(date, BusinessDayConvention::Following),
            Date::from_ymd(2012, 4, 2).unwrap()
        );
        assert_eq!(
            cal.adjust(date, BusinessDayConvention::ModifiedFollowing),
            Date::from_ymd(2012, 3, 30).unwrap()
        );
        assert_eq!(cal.adjust(date, BusinessDayConvention::Unadjusted), date);
    }
}
