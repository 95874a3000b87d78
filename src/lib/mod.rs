//! Valuation engine
//!
//! Dates, the items that make up a patrimoine and how each of them is
//! valued at a given date. Nothing in here reads files or parses text.

pub mod argent;
pub mod date;
pub mod elapsed;
pub mod flux;
pub mod item;
pub mod patrimoine;
pub mod period;
pub mod personne;
pub mod policy;
pub mod possession;

use date::Date;

/// Anything that has a value at any date
///
/// Valuation never modifies the item, and may be queried for dates
/// before its start: the result is then whatever the formula gives.
pub trait Valuation {
    /// Name to refer to the item in messages
    fn label(&self) -> &str;

    fn valeur(&self, date: Date) -> f64;
}
