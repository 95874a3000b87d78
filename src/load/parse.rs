//! Turn text into dates
//!
//! Dates typed on the command line go through a small grammar so that
//! mistakes can be pointed at, dates found in records are whatever
//! `chrono` understands.

use chrono::{DateTime, Datelike, NaiveDate};
use pest::Parser;
use pest_derive::*;
use thiserror::Error as ThisError;

use crate::lib::{
    date::{Date, DateError, Month},
    period::Period,
};
use crate::load::error::{Error, Loc};

type Pair<'i> = pest::iterators::Pair<'i, Rule>;

#[derive(Parser)]
#[grammar = "load/arguments.pest"]
struct ArgumentParser;

/// A complete date such as `2024-Mar-03` or `2024-03-03`
///
/// `name` is how the argument is referred to in the error report.
pub fn date(name: &str, arg: &str) -> Result<Date, Error> {
    let mut pairs = ArgumentParser::parse(Rule::date, arg).map_err(|e| {
        Error::new("Invalid date")
            .with_error(e.with_path(name))
            .with_hint("dates are written YYYY-Mmm-DD or YYYY-MM-DD")
    })?;
    let full = pairs.next().ok_or_else(|| Error::new("Invalid date"))?;
    let loc = (name, full.as_span());
    let trunc = truncated(name, full)?;
    trunc.make(&loc, true)
}

/// A range of dates `START..END`, or a single year, month or day
///
/// Components omitted in `START` (resp. `END`) are the first (resp. last)
/// possible: `2024..Jun` is `2024-Jan-01..2024-Jun-30`.
pub fn period(name: &str, arg: &str) -> Result<Period, Error> {
    let mut pairs = ArgumentParser::parse(Rule::period, arg).map_err(|e| {
        Error::new("Invalid period")
            .with_error(e.with_path(name))
            .with_hint("periods are written START..END, as in 2024-Jan..2025-Jun-15")
    })?;
    let inner = pairs
        .next()
        .and_then(|p| p.into_inner().next())
        .ok_or_else(|| Error::new("Invalid period"))?;
    let loc = (name, inner.as_span());
    let period = match inner.as_rule() {
        Rule::range => {
            let mut bounds = inner.into_inner();
            let (fst, snd) = match (bounds.next(), bounds.next()) {
                (Some(fst), Some(snd)) => (fst, snd),
                _ => return Err(Error::new("Invalid period")),
            };
            let fst_loc = (name, fst.as_span());
            let snd_loc = (name, snd.as_span());
            let start = truncated(name, fst)?.make(&fst_loc, true)?;
            let end = partial(name, start, snd)?.make(&snd_loc, false)?;
            Period(start, end)
        }
        _ => {
            let trunc = truncated(name, inner)?;
            Period(trunc.make(&loc, true)?, trunc.make(&loc, false)?)
        }
    };
    if period.is_empty() {
        return Err(Error::new("Period is empty")
            .with_span(&loc, "provided here")
            .with_text(format!("{} is after {}", period.0, period.1))
            .with_hint("write the earliest date first"));
    }
    Ok(period)
}

/// Year with optional month and day, from the children of `p`
fn truncated(name: &str, p: Pair) -> Result<TruncDate, Error> {
    let mut inner = p.into_inner();
    let year = match inner.next() {
        Some(year) => year.as_str().parse::<u16>().map_err(|_| Error::new("Invalid year"))?,
        None => return Err(Error::new("Invalid date")),
    };
    let mut trunc = TruncDate { year, ..Default::default() };
    if let Some(month) = inner.next().filter(|m| m.as_rule() != Rule::EOI) {
        trunc.month = Some(month_of(name, month)?);
        if let Some(day) = inner.next().filter(|d| d.as_rule() == Rule::day) {
            trunc.day = day.as_str().parse::<u8>().ok();
        }
    }
    Ok(trunc)
}

/// End of a range, completed by its start
fn partial(name: &str, start: Date, p: Pair) -> Result<TruncDate, Error> {
    match p.as_rule() {
        Rule::full_date => truncated(name, p),
        Rule::month_date => {
            let mut inner = p.into_inner();
            let month = match inner.next() {
                Some(month) => month_of(name, month)?,
                None => return Err(Error::new("Invalid date")),
            };
            let day = inner.next().and_then(|d| d.as_str().parse::<u8>().ok());
            Ok(TruncDate { year: start.year(), month: Some(month), day })
        }
        _ => Ok(TruncDate {
            year: start.year(),
            month: Some(start.month()),
            day: p.as_str().parse::<u8>().ok(),
        }),
    }
}

fn month_of(name: &str, p: Pair) -> Result<Month, Error> {
    let loc = (name, p.as_span());
    let month = match p.as_rule() {
        Rule::month_name => p.as_str().parse::<Month>().ok(),
        _ => p.as_str().parse::<u32>().ok().and_then(Month::from_number),
    };
    month.ok_or_else(|| {
        Error::new("Invalid month")
            .with_span(&loc, "provided here")
            .with_text(format!("'{}' is not a valid month", p.as_str()))
            .with_hint("months are 'Jan', 'Feb', ..., 'Dec' or 1 to 12")
    })
}

#[derive(Default, Debug)]
struct TruncDate {
    year: u16,
    month: Option<Month>,
    day: Option<u8>,
}

impl TruncDate {
    /// Fill the missing components with the earliest (`starting`) or latest possible
    fn make(&self, loc: &Loc, starting: bool) -> Result<Date, Error> {
        let year = self.year;
        let month = self.month.unwrap_or(if starting { Month::Jan } else { Month::Dec });
        let day = self.day.unwrap_or(if starting { 1 } else { month.count(year) });
        Date::from(year as i64, month, day as usize).map_err(|e| {
            Error::new("Invalid date")
                .with_span(loc, "provided here")
                .with_text(format!("{}", e))
                .with_hint("choose a date that exists")
                .with_hint(e.fix_hint())
        })
    }
}

/// Why a date found in a record was rejected
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum RecordDateError {
    #[error("is neither YYYY-MM-DD nor a timestamp ({0})")]
    Format(#[from] chrono::ParseError),
    #[error("is out of range: {0}")]
    Date(DateError),
}

impl RecordDateError {
    pub fn fix_hint(&self) -> String {
        match self {
            RecordDateError::Format(_) => "write dates as 2024-03-03 or 2024-03-03T00:00:00.000Z".to_string(),
            RecordDateError::Date(e) => e.fix_hint(),
        }
    }
}

/// A record date, either `YYYY-MM-DD` or an RFC 3339 timestamp
///
/// Timestamps keep the calendar date of their own offset:
/// `2024-03-03T23:30:00-02:00` is `2024-Mar-03`.
pub fn record_date(text: &str) -> Result<Date, RecordDateError> {
    let naive = match DateTime::parse_from_rfc3339(text) {
        Ok(stamp) => stamp.date_naive(),
        Err(_) => NaiveDate::parse_from_str(text, "%Y-%m-%d")?,
    };
    from_naive(naive).map_err(RecordDateError::Date)
}

/// Convert from `chrono`
pub fn from_naive(naive: NaiveDate) -> Result<Date, DateError> {
    let month = Month::from_number(naive.month()).ok_or(DateError::InvalidDay(naive.day() as usize))?;
    Date::from(naive.year() as i64, month, naive.day() as usize)
}
