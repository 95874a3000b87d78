//! Recurring monthly flows: salaries, rents, subscriptions

use crate::lib::{
    date::Date,
    personne::Personne,
    policy::{DayOverflow, Policy},
    possession::Possession,
    Valuation,
};

/// A signed amount received or spent on the same day of every month
///
/// The value of a flow at some date is the sum of all the occurrences
/// that happened strictly after its start and no later than that date.
/// The start date itself never triggers an occurrence.
///
/// The depreciation rate of the underlying possession is kept for display
/// but plays no part in the value.
#[derive(Debug, Clone, PartialEq)]
pub struct Flux {
    base: Possession,
    day: u8,
}

impl Flux {
    /// `day` must be in `1..=31`, see `Item::build` for a checked construction
    pub fn new<S>(
        owner: Personne,
        label: S,
        amount: f64,
        start: Date,
        end: Option<Date>,
        rate: f64,
        day: u8,
    ) -> Self
    where S: ToString {
        Self {
            base: Possession::new(owner, label, amount, start, end, rate),
            day,
        }
    }

    /// Replace the default valuation policy
    pub fn with_policy(self, policy: Policy) -> Self {
        Self { base: self.base.with_policy(policy), ..self }
    }

    /// Fields shared with plain possessions
    pub fn base(&self) -> &Possession {
        &self.base
    }

    /// Amount of a single occurrence
    pub fn amount(&self) -> f64 {
        self.base.initial_value()
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    /// Day on which the occurrence of the month of `date` falls, if any
    fn occurrence_in(&self, date: Date) -> Option<Date> {
        let last = date.end_of_month();
        if self.day <= last.day() {
            Date::from(date.year() as i64, date.month(), self.day as usize).ok()
        } else {
            match self.base.policy().day_overflow {
                DayOverflow::Clip => Some(last),
                DayOverflow::Skip => None,
            }
        }
    }

    /// Number of occurrences in `(start, date]`
    pub fn occurrences(&self, date: Date) -> usize {
        let start = self.base.start();
        let last = date.start_of_month();
        let mut month = start.start_of_month();
        let mut count = 0;
        while month <= last {
            if let Some(occurrence) = self.occurrence_in(month) {
                if start < occurrence && occurrence <= date {
                    count += 1;
                }
            }
            month = month.jump_month(1);
        }
        count
    }
}

impl Valuation for Flux {
    fn label(&self) -> &str {
        self.base.label()
    }

    fn valeur(&self, date: Date) -> f64 {
        let policy = self.base.policy();
        match policy.end_date.horizon(self.base.end(), date) {
            Some(date) => self.amount() * self.occurrences(date) as f64,
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lib::{
        date::Month::*,
        policy::EndDatePolicy,
    };

    macro_rules! dt {
        ( $y:tt - $m:tt - $d:tt ) => {
            Date::from($y, $m, $d).unwrap()
        }
    }

    macro_rules! flux {
        ( $amount:expr, day $day:expr ) => {
            Flux::new(Personne::new("Ilo"), "salary", $amount, dt!(2024-Mar-3), None, 0.0, $day)
        };
    }

    #[test]
    fn salary() {
        assert_eq!(flux!(1000.0, day 3).valeur(dt!(2024-Mar-3)), 0.0);
        assert_eq!(flux!(2500.0, day 4).valeur(dt!(2024-May-3)), 5000.0);
        assert_eq!(flux!(600_000.0, day 15).valeur(dt!(2024-Jun-14)), 1_800_000.0);
    }

    #[test]
    fn spending() {
        assert_eq!(flux!(-100_000.0, day 1).valeur(dt!(2024-Mar-3)), 0.0);
        assert_eq!(flux!(-120_000.0, day 2).valeur(dt!(2024-Apr-6)), -120_000.0);
    }

    #[test]
    fn nothing_on_start_date() {
        for day in 1..=31 {
            assert_eq!(flux!(1000.0, day day).valeur(dt!(2024-Mar-3)), 0.0);
        }
    }

    #[test]
    fn occurrence_day_is_inclusive() {
        let f = flux!(100.0, day 10);
        assert_eq!(f.occurrences(dt!(2024-Mar-9)), 0);
        assert_eq!(f.occurrences(dt!(2024-Mar-10)), 1);
        assert_eq!(f.occurrences(dt!(2025-Mar-10)), 13);
    }

    #[test]
    fn before_start() {
        assert_eq!(flux!(100.0, day 10).valeur(dt!(2023-Jun-10)), 0.0);
    }

    #[test]
    fn rate_is_not_used() {
        let f = Flux::new(Personne::new("Ilo"), "rent", -500.0, dt!(2024-Mar-3), None, 25.0, 5);
        assert_eq!(f.valeur(dt!(2024-Jun-5)), -2000.0);
    }

    fn end_of_month(day_overflow: DayOverflow) -> Flux {
        Flux::new(Personne::new("Ilo"), "bonus", 10.0, dt!(2024-Jan-15), None, 0.0, 31)
            .with_policy(Policy { day_overflow, ..Policy::default() })
    }

    #[test]
    fn overflow_clips_to_end_of_month() {
        let f = end_of_month(DayOverflow::Clip);
        // Jan-31, Feb-29, Mar-31, Apr-30
        assert_eq!(f.occurrences(dt!(2024-Apr-30)), 4);
        assert_eq!(f.occurrences(dt!(2024-Feb-28)), 1);
        assert_eq!(f.occurrences(dt!(2024-Feb-29)), 2);
        assert_eq!(f.valeur(dt!(2024-Dec-31)), 120.0);
    }

    #[test]
    fn overflow_skips_short_months() {
        let f = end_of_month(DayOverflow::Skip);
        // Jan-31, Mar-31
        assert_eq!(f.occurrences(dt!(2024-Apr-30)), 2);
        assert_eq!(f.occurrences(dt!(2024-Feb-29)), 1);
        // Jan, Mar, May, Jul, Aug, Oct, Dec
        assert_eq!(f.valeur(dt!(2024-Dec-31)), 70.0);
    }

    fn contract(end_date: EndDatePolicy) -> Flux {
        Flux::new(Personne::new("Ilo"), "contract", 1000.0, dt!(2024-Mar-3), Some(dt!(2024-Jun-30)), 0.0, 10)
            .with_policy(Policy { end_date, ..Policy::default() })
    }

    #[test]
    fn end_date_policies() {
        let late = dt!(2024-Dec-31);
        assert_eq!(contract(EndDatePolicy::Ignore).valeur(late), 10_000.0);
        assert_eq!(contract(EndDatePolicy::Freeze).valeur(late), 4000.0);
        assert_eq!(contract(EndDatePolicy::Drop).valeur(late), 0.0);
        assert_eq!(contract(EndDatePolicy::Drop).valeur(dt!(2024-Jun-30)), 4000.0);
    }
}
