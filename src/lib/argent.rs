//! Money held in an account or in cash

use serde::Deserialize;
use std::fmt;

use crate::lib::{
    date::Date,
    personne::Personne,
    policy::Policy,
    possession::Possession,
    Valuation,
};

/// Where the money is kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum AccountType {
    /// current account
    Courant,
    /// savings account
    Epargne,
    /// cash
    Espece,
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A possession that is money
///
/// Valued exactly like any other possession: a savings account earning
/// 5% a year is a possession with a rate of `-5`.
#[derive(Debug, Clone, PartialEq)]
pub struct Argent {
    base: Possession,
    account: AccountType,
}

impl Argent {
    pub fn new<S>(
        owner: Personne,
        label: S,
        value: f64,
        start: Date,
        end: Option<Date>,
        rate: f64,
        account: AccountType,
    ) -> Self
    where S: ToString {
        Self {
            base: Possession::new(owner, label, value, start, end, rate),
            account,
        }
    }

    /// Replace the default valuation policy
    pub fn with_policy(self, policy: Policy) -> Self {
        Self { base: self.base.with_policy(policy), ..self }
    }

    pub fn base(&self) -> &Possession {
        &self.base
    }

    pub fn account(&self) -> AccountType {
        self.account
    }
}

impl Valuation for Argent {
    fn label(&self) -> &str {
        self.base.label()
    }

    fn valeur(&self, date: Date) -> f64 {
        self.base.valeur(date)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lib::date::Month::*;

    macro_rules! dt {
        ( $y:tt - $m:tt - $d:tt ) => {
            Date::from($y, $m, $d).unwrap()
        }
    }

    #[test]
    fn savings_account() {
        let savings = Argent::new(
            Personne::new("me"), "savings", 200_000.0, dt!(2024-Mar-3), None, -10.0, AccountType::Epargne,
        );
        assert_eq!(savings.valeur(dt!(2025-Mar-3)), 220_000.0);
        assert_eq!(savings.account(), AccountType::Epargne);
    }

    #[test]
    fn same_as_possession() {
        let start = dt!(2022-Jul-14);
        for account in [AccountType::Courant, AccountType::Epargne, AccountType::Espece] {
            let money = Argent::new(Personne::new("me"), "money", 1234.5, start, None, 3.0, account);
            let plain = Possession::new(Personne::new("me"), "money", 1234.5, start, None, 3.0);
            for date in [dt!(2020-Jan-1), start, dt!(2031-Feb-28)] {
                assert_eq!(money.valeur(date), plain.valeur(date));
            }
        }
    }
}
