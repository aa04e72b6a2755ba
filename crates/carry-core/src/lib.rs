//! # Carry Core
//!
//! Core types and conventions for the Carry fixed income derivatives library.
//!
//! - **Types**: `Date`, `Currency`, `Frequency`
//! - **Day Count Conventions**: ACT/360, ACT/365F, ACT/ACT ICMA, 30/360
//! - **Calendars**: weekend and holiday calendars, business day adjustment
//! - **Time**: valuation-date relative model times
//!
//! ## Example
//!
//! ```rust
//! use carry_core::prelude::*;
//!
//! let valuation = Date::from_ymd(2011, 6, 20).unwrap();
//! let delivery = Date::from_ymd(2011, 12, 1).unwrap();
//! let t = time_between(valuation, delivery);
//! assert!((t - 164.0 / 365.0).abs() < 1e-15);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_lossless)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod time;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{BusinessDayConvention, Calendar, HolidayCalendar, WeekendCalendar};
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::time::{time_between, times_between};
    pub use crate::types::{Currency, Date, Frequency};
}

pub use error::{CoreError, CoreResult};
pub use types::{Currency, Date, Frequency};
