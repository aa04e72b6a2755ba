//! Coupon frequency.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coupon payment frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Frequency {
    /// Once a year
    Annual,
    /// Twice a year
    #[default]
    SemiAnnual,
    /// Four times a year
    Quarterly,
    /// Every month
    Monthly,
}

impl Frequency {
    /// Number of coupon periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::Quarterly => 4,
            Frequency::Monthly => 12,
        }
    }

    /// Number of months in each coupon period.
    #[must_use]
    pub fn months_per_period(&self) -> u32 {
        12 / self.periods_per_year()
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Annual => "Annual",
            Frequency::SemiAnnual => "Semi-Annual",
            Frequency::Quarterly => "Quarterly",
            Frequency::Monthly => "Monthly",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_months_per_period() {
        assert_eq!(Frequency::Annual.months_per_period(), 12);
        assert_eq!(Frequency::SemiAnnual.months_per_period(), 6);
        assert_eq!(Frequency::Quarterly.months_per_period(), 3);
    }
}
