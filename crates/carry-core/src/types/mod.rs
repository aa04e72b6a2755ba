//! Domain types.

mod currency;
mod date;
mod frequency;

pub use currency::Currency;
pub use date::Date;
pub use frequency::Frequency;
