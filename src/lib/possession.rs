//! Items whose value changes linearly with time

use crate::lib::{
    date::Date,
    elapsed,
    personne::Personne,
    policy::Policy,
    Valuation,
};

/// An owned item with a yearly depreciation rate
///
/// A positive `rate` is a loss of `rate` percent of the initial value per
/// year, a negative one a gain. Nothing prevents the value from going below
/// zero if the item is kept long enough.
#[derive(Debug, Clone, PartialEq)]
pub struct Possession {
    owner: Personne,
    label: String,
    value: f64,
    start: Date,
    end: Option<Date>,
    rate: f64,
    policy: Policy,
}

impl Possession {
    pub fn new<S>(
        owner: Personne,
        label: S,
        value: f64,
        start: Date,
        end: Option<Date>,
        rate: f64,
    ) -> Self
    where S: ToString {
        Self {
            owner,
            label: label.to_string(),
            value,
            start,
            end,
            rate,
            policy: Policy::default(),
        }
    }

    /// Replace the default valuation policy
    pub fn with_policy(self, policy: Policy) -> Self {
        Self { policy, ..self }
    }

    pub fn owner(&self) -> &Personne {
        &self.owner
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Value on the start date
    pub fn initial_value(&self) -> f64 {
        self.value
    }

    pub fn start(&self) -> Date {
        self.start
    }

    pub fn end(&self) -> Option<Date> {
        self.end
    }

    /// Yearly depreciation, in percent
    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Value at `date` without taking the end date into account
    ///
    /// `value * (1 - rate / 100 * years)`, computed as the initial value
    /// minus the amount lost so that whole percentages of round amounts
    /// stay exact.
    fn linear(&self, date: Date) -> f64 {
        let years = elapsed::years_between(self.start, date);
        self.value - self.value * (self.rate * years / 100.0)
    }
}

impl Valuation for Possession {
    fn label(&self) -> &str {
        &self.label
    }

    fn valeur(&self, date: Date) -> f64 {
        match self.policy.end_date.horizon(self.end, date) {
            Some(date) => self.linear(date),
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

    fn computer(rate: f64) -> Possession {
        Possession::new(Personne::new("me"), "computer", 100_000.0, dt!(2024-Mar-3), None, rate)
    }

    #[test]
    fn depreciation() {
        assert_eq!(computer(10.0).valeur(dt!(2025-Mar-3)), 90_000.0);
        assert_eq!(computer(10.0).valeur(dt!(2024-Sep-3)), 95_000.0);
    }

    #[test]
    fn value_at_start() {
        for rate in [0.0, 10.0, -10.0, 37.5] {
            assert_eq!(computer(rate).valeur(dt!(2024-Mar-3)), 100_000.0);
        }
    }

    #[test]
    fn constant_without_rate() {
        let p = computer(0.0);
        for date in [dt!(1999-Jan-1), dt!(2024-Mar-3), dt!(2024-Apr-30), dt!(2090-Dec-31)] {
            assert_eq!(p.valeur(date), 100_000.0);
        }
    }

    #[test]
    fn day_of_month_is_ignored() {
        let p = computer(10.0);
        assert_eq!(p.valeur(dt!(2024-Sep-1)), p.valeur(dt!(2024-Sep-30)));
    }

    #[test]
    fn opposite_rates() {
        let date = dt!(2026-Sep-3);
        let sum = computer(20.0).valeur(date) + computer(-20.0).valeur(date);
        assert!((sum - 200_000.0).abs() < 1e-6);
    }

    #[test]
    fn before_start() {
        assert_eq!(computer(10.0).valeur(dt!(2023-Mar-3)), 110_000.0);
    }

    #[test]
    fn no_clamping() {
        let p = computer(50.0);
        assert_eq!(p.valeur(dt!(2026-Mar-3)), 0.0);
        assert_eq!(p.valeur(dt!(2027-Mar-3)), -50_000.0);
    }

    fn car(end_date: EndDatePolicy) -> Possession {
        Possession::new(Personne::new("me"), "car", 100_000.0, dt!(2024-Mar-3), Some(dt!(2025-Mar-3)), 10.0)
            .with_policy(Policy { end_date, ..Policy::default() })
    }

    #[test]
    fn end_date_ignored() {
        assert_eq!(car(EndDatePolicy::Ignore).valeur(dt!(2026-Mar-3)), 80_000.0);
    }

    #[test]
    fn end_date_freezes() {
        let p = car(EndDatePolicy::Freeze);
        assert_eq!(p.valeur(dt!(2024-Sep-3)), 95_000.0);
        assert_eq!(p.valeur(dt!(2026-Mar-3)), 90_000.0);
        assert_eq!(p.valeur(dt!(2030-Mar-3)), 90_000.0);
    }

    #[test]
    fn end_date_drops() {
        let p = car(EndDatePolicy::Drop);
        assert_eq!(p.valeur(dt!(2025-Mar-3)), 90_000.0);
        assert_eq!(p.valeur(dt!(2025-Mar-4)), 0.0);
    }
}
