//! Net worth of a person: the sum of the values of everything they own

use thiserror::Error;

use crate::lib::{
    date::Date,
    item::Item,
    period::{Period, Step},
    personne::Personne,
    Valuation,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValuationError {
    #[error("value of '{label}' on {date} is not a finite number")]
    NonFinite { label: String, date: Date },
}

/// A set of items valued together
///
/// Items are borrowed, the same items can be displayed one by one
/// while they are summed here.
#[derive(Debug, Clone)]
pub struct Patrimoine<'i, V = Item> {
    owner: Personne,
    items: Vec<&'i V>,
}

impl<'i, V> Patrimoine<'i, V>
where V: Valuation {
    pub fn new<I>(owner: Personne, items: I) -> Self
    where I: IntoIterator<Item = &'i V> {
        Self {
            owner,
            items: items.into_iter().collect(),
        }
    }

    pub fn owner(&self) -> &Personne {
        &self.owner
    }

    /// Total value at `date`
    ///
    /// Fails as a whole if a single item cannot be valued.
    pub fn valeur(&self, date: Date) -> Result<f64, ValuationError> {
        self.items.iter().try_fold(0.0, |total, item| {
            let value = item.valeur(date);
            if value.is_finite() {
                Ok(total + value)
            } else {
                Err(ValuationError::NonFinite { label: item.label().to_string(), date })
            }
        })
    }

    /// Total value sampled every `step` over `period`
    pub fn evolution(&self, period: Period, step: Step) -> Result<Vec<(Date, f64)>, ValuationError> {
        period
            .sample(step)
            .map(|date| self.valeur(date).map(|value| (date, value)))
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lib::{
        argent::{AccountType, Argent},
        date::Month::*,
        flux::Flux,
        possession::Possession,
    };

    macro_rules! dt {
        ( $y:tt - $m:tt - $d:tt ) => {
            Date::from($y, $m, $d).unwrap()
        }
    }

    fn items() -> Vec<Item> {
        let ilo = Personne::new("Ilo");
        vec![
            Item::Possession(Possession::new(ilo.clone(), "computer", 100_000.0, dt!(2024-Mar-3), None, 10.0)),
            Item::Flux(Flux::new(ilo.clone(), "salary", 600_000.0, dt!(2024-Mar-3), None, 0.0, 15)),
            Item::Flux(Flux::new(ilo.clone(), "rent", -120_000.0, dt!(2024-Mar-3), None, 0.0, 2)),
            Item::Argent(Argent::new(ilo, "savings", 200_000.0, dt!(2024-Mar-3), None, -10.0, AccountType::Epargne)),
        ]
    }

    #[test]
    fn sum_of_items() {
        let items = items();
        let patrimoine = Patrimoine::new(Personne::new("Ilo"), &items);
        // 95_000 + 6 * 600_000 - 6 * 120_000 + 210_000
        assert_eq!(patrimoine.valeur(dt!(2024-Sep-3)), Ok(3_185_000.0));
        // 100_000 + 200_000
        assert_eq!(patrimoine.valeur(dt!(2024-Mar-3)), Ok(300_000.0));
    }

    #[test]
    fn empty() {
        let patrimoine = Patrimoine::<Item>::new(Personne::new("nobody"), []);
        assert_eq!(patrimoine.valeur(dt!(2024-Mar-3)), Ok(0.0));
    }

    #[test]
    fn additivity() {
        let items = items();
        let (a, b) = items.split_at(2);
        let whole = Patrimoine::new(Personne::new("Ilo"), &items);
        let left = Patrimoine::new(Personne::new("Ilo"), a);
        let right = Patrimoine::new(Personne::new("Ilo"), b);
        for date in [dt!(2023-Jan-1), dt!(2024-Mar-3), dt!(2024-Jun-14), dt!(2026-Dec-31)] {
            let sum = left.valeur(date).unwrap() + right.valeur(date).unwrap();
            assert!((whole.valeur(date).unwrap() - sum).abs() < 1e-6);
        }
    }

    #[test]
    fn order_is_irrelevant() {
        let items = items();
        let forward = Patrimoine::new(Personne::new("Ilo"), &items);
        let backward = Patrimoine::new(Personne::new("Ilo"), items.iter().rev());
        let date = dt!(2025-Feb-20);
        assert!((forward.valeur(date).unwrap() - backward.valeur(date).unwrap()).abs() < 1e-6);
    }

    #[test]
    fn one_bad_item_fails_the_total() {
        let mut items = items();
        items.push(Item::Possession(Possession::new(Personne::new("Ilo"), "huge", f64::MAX, dt!(2024-Mar-3), None, -100.0)));
        let patrimoine = Patrimoine::new(Personne::new("Ilo"), &items);
        assert_eq!(
            patrimoine.valeur(dt!(2030-Mar-3)),
            Err(ValuationError::NonFinite { label: "huge".to_string(), date: dt!(2030-Mar-3) }),
        );
    }

    #[test]
    fn evolution() {
        let items = items();
        let patrimoine = Patrimoine::new(Personne::new("Ilo"), &items[1..2]);
        let values = patrimoine.evolution(Period(dt!(2024-Mar-3), dt!(2024-Jun-3)), Step::Month).unwrap();
        assert_eq!(values, vec![
            (dt!(2024-Mar-3), 0.0),
            (dt!(2024-Apr-3), 600_000.0),
            (dt!(2024-May-3), 1_200_000.0),
            (dt!(2024-Jun-3), 1_800_000.0),
        ]);
    }
}
