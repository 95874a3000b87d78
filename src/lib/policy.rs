//! How valuation treats the edges of the calendar
//!
//! Both policies default to what the possession table has always displayed:
//! an end date is informative only, and a recurring flow set on the 31st
//! still lands once in every month.

use serde::Deserialize;

use crate::lib::date::Date;

/// What happens to an item queried after its end date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndDatePolicy {
    /// the end date has no effect on the value
    #[default]
    Ignore,
    /// the value stays what it was on the end date
    Freeze,
    /// the item is worth nothing after the end date
    Drop,
}

/// What happens to a monthly occurrence whose day does not exist in a month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOverflow {
    /// the occurrence falls on the last day of the month instead
    #[default]
    Clip,
    /// there is no occurrence that month
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Policy {
    pub end_date: EndDatePolicy,
    pub day_overflow: DayOverflow,
}

impl EndDatePolicy {
    /// Date at which an item ending on `end` must be valued when queried at `date`
    ///
    /// `None` means the item is worth nothing at `date`.
    pub fn horizon(self, end: Option<Date>, date: Date) -> Option<Date> {
        match (self, end) {
            (EndDatePolicy::Ignore, _) | (_, None) => Some(date),
            (EndDatePolicy::Freeze, Some(end)) => Some(date.min(end)),
            (EndDatePolicy::Drop, Some(end)) => (date <= end).then(|| date),
        }
    }
}
