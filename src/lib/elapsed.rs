//! Time elapsed between two dates, with calendar-month granularity
//!
//! Only the year and month of each date matter: `2024-Mar-31` to
//! `2024-Apr-01` is a full month, `2024-Mar-01` to `2024-Mar-31` is none.

use crate::lib::date::Date;

/// Number of calendar months from `from` to `to`, negative if `to` is earlier
pub fn months_between(from: Date, to: Date) -> i32 {
    let years = to.year() as i32 - from.year() as i32;
    let months = to.month() as i32 - from.month() as i32;
    years * 12 + months
}

/// `months_between` as a fraction of years
pub fn years_between(from: Date, to: Date) -> f64 {
    months_between(from, to) as f64 / 12.0
}
