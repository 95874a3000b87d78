//! Day-precise calendar dates
//!
//! Dates are `YYYY-Mmm-DD`, not a number of seconds: valuation only ever
//! looks at the year, the month and the day, and month arithmetic must
//! follow the calendar rather than a count of days.
//!
//! Nothing in here parses text, see `load::parse` for that.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use std::fmt;
use std::str::FromStr;

/// A date with day-precision
///
/// Supports years in the range 1000..=9999.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    year: u16,
    month: Month,
    day: u8,
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{:02}", self.year, self.month, self.day)
    }
}

/// Twelve months in the year, identified by their 3-letter abbreviations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitive)]
pub enum Month {
    Jan = 0,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    /// From the usual 1-based numbering (`1` is `Jan`)
    pub fn from_number(n: u32) -> Option<Self> {
        n.checked_sub(1).and_then(Self::from_u32)
    }

    /// Month directly succeeding the current one with wrapping
    pub fn next(self) -> Self {
        Self::from_isize((self as isize + 1) % 12).unwrap_or(Month::Jan)
    }

    /// Number of days in this month of the given year
    pub fn count(self, year: u16) -> u8 {
        use Month::*;
        match self {
            Jan | Mar | May | Jul | Aug | Oct | Dec => 31,
            Apr | Jun | Sep | Nov => 30,
            Feb => if is_leap(year) { 29 } else { 28 },
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl FromStr for Month {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        use Month::*;
        Ok(match s {
            "Jan" => Jan,
            "Feb" => Feb,
            "Mar" => Mar,
            "Apr" => Apr,
            "May" => May,
            "Jun" => Jun,
            "Jul" => Jul,
            "Aug" => Aug,
            "Sep" => Sep,
            "Oct" => Oct,
            "Nov" => Nov,
            "Dec" => Dec,
            _ => return Err(()),
        })
    }
}

/// Ways in which a date taken from user input can be wrong
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateError {
    /// year is outside of 1000..=9999
    UnsupportedYear(i64),
    /// Feb 29 of a non-leap year
    NotBissextile(usize),
    /// Feb 30 or Feb 31 or 31st day of a 30-day month
    MonthTooShort(Month, usize),
    /// day outside of 1..=31
    InvalidDay(usize),
}

impl Date {
    /// Validate year-month-day into date
    pub fn from(year: i64, month: Month, day: usize) -> Result<Self, DateError> {
        if !(1000..=9999).contains(&year) {
            Err(DateError::UnsupportedYear(year))
        } else if day == 0 || day > 31 {
            Err(DateError::InvalidDay(day))
        } else if day <= month.count(year as u16) as usize {
            Ok(Self { year: year as u16, month, day: day as u8 })
        } else if day >= 30 {
            Err(DateError::MonthTooShort(month, day))
        } else {
            Err(DateError::NotBissextile(year as usize))
        }
    }

    /// `self.day` accessor
    pub fn day(&self) -> u8 {
        self.day
    }

    /// `self.month` accessor
    pub fn month(&self) -> Month {
        self.month
    }

    /// `self.year` accessor
    pub fn year(&self) -> u16 {
        self.year
    }

    /// Biject the dates with integers
    ///
    /// For any date `d`, `d.index() + 1 == d.next().index()`.
    pub fn index(self) -> usize {
        let years = if self.month <= Month::Feb {
            self.year as usize - 1
        } else {
            self.year as usize
        };
        // leap days of every leap year up to the current one
        let leaps = (years / 4) - (years / 100) + (years / 400);
        const ELAPSED: [usize; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];
        self.year as usize * 365 + ELAPSED[self.month as usize] + self.day as usize + leaps
    }

    /// The following day
    pub fn next(self) -> Self {
        if self.day < self.month.count(self.year) {
            Self { day: self.day + 1, ..self }
        } else if self.month == Month::Dec {
            Self { year: self.year + 1, month: Month::Jan, day: 1 }
        } else {
            Self { month: self.month.next(), day: 1, ..self }
        }
    }

    /// `count` days after current date (`count >= 0`)
    ///
    /// Years then months bring the date within a few weeks of the target,
    /// the rest is walked one day at a time.
    pub fn jump_day(self, count: usize) -> Self {
        let target = self.index() + count;
        // neither jump can overshoot: a year is at most 366 days, a month 31,
        // and truncating the day only moves backwards
        let d = self.jump_year((count / 366) as isize);
        let d = d.jump_month(((target - d.index()) / 31) as isize);
        (d.index()..target).fold(d, |d, _| d.next())
    }

    /// `count` months before/after current date
    ///
    /// Day will be truncated to fit in the new month:
    /// adding one month to `2000-Jan-31` makes it `2000-Feb-29`
    pub fn jump_month(self, count: isize) -> Self {
        let absolute = self.year as isize * 12 + self.month as isize + count;
        let year = absolute.div_euclid(12) as u16;
        let month = Month::from_isize(absolute.rem_euclid(12)).unwrap_or(Month::Jan);
        Self {
            year,
            month,
            day: self.day.min(month.count(year)),
        }
    }

    /// `count` years before/after current date
    ///
    /// Day will be truncated in the rare case it is needed:
    /// adding one year to `2000-Feb-29` makes it `2001-Feb-28`
    pub fn jump_year(self, count: isize) -> Self {
        self.jump_month(count * 12)
    }

    /// Get date of the first day of the current month
    pub fn start_of_month(self) -> Self {
        Self { day: 1, ..self }
    }

    /// Get date of the last day of the current month
    pub fn end_of_month(self) -> Self {
        Self { day: self.month.count(self.year), ..self }
    }
}

fn is_leap(year: u16) -> bool {
    if year % 400 == 0 {
        true
    } else if year % 100 == 0 {
        false
    } else {
        year % 4 == 0
    }
}

impl fmt::Display for DateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use DateError::*;
        match self {
            UnsupportedYear(y) => write!(f, "{} is outside of the supported range for years", y),
            NotBissextile(y) => write!(f, "{} is not bissextile, Feb 29 does not exist", y),
            MonthTooShort(m, d) => write!(f, "{} is a short month, it does not have a {}th day", m, d),
            InvalidDay(d) => write!(f, "{} is not a valid day", d),
        }
    }
}

impl DateError {
    /// What message to show to help fix the date error
    pub fn fix_hint(self) -> String {
        use DateError::*;
        match self {
            UnsupportedYear(_) => "year should be between 1000 and 9999 inclusive".to_string(),
            NotBissextile(y) => format!("did you mean {y}-Feb-28 or {y}-Mar-01 ?", y = y),
            MonthTooShort(m, d) => format!("{} is only {} days long", m,
                if m == Month::Feb { 28.max(d - 1) } else { 30 }
            ),
            InvalidDay(d) => format!("{} is not in the range 1 ..= 31", d),
        }
    }
}
