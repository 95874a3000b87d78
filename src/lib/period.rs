//! An inclusive range of dates, and regular sampling within it

use std::fmt;

use crate::lib::date::Date;

/// `Period(a, b)` is the range of dates from `a` to `b` inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period(pub Date, pub Date);

/// Spacing between two samples of a period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Day,
    Week,
    Month,
    Year,
}

impl Step {
    /// `count` steps after `origin`
    ///
    /// Months and years are always counted from `origin`, so that a period
    /// starting on the 31st comes back to the 31st whenever possible
    /// instead of drifting to the 28th after February.
    pub fn from_origin(self, origin: Date, count: usize) -> Date {
        match self {
            Step::Day => origin.jump_day(count),
            Step::Week => origin.jump_day(count * 7),
            Step::Month => origin.jump_month(count as isize),
            Step::Year => origin.jump_year(count as isize),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Period {
    pub fn is_empty(self) -> bool {
        self.0 > self.1
    }

    pub fn contains(self, date: Date) -> bool {
        self.0 <= date && date <= self.1
    }

    /// Increasing dates `start`, `start + step`, ... that remain inside the period
    pub fn sample(self, step: Step) -> impl Iterator<Item = Date> {
        (0..)
            .map(move |k| step.from_origin(self.0, k))
            .take_while(move |d| self.contains(*d))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0 == self.1 {
            write!(f, "{}", self.0)
        } else {
            write!(f, "{}..{}", self.0, self.1)
        }
    }
}
