//! Any valued item, and how to build one from the fields of a record

use std::fmt;
use thiserror::Error;

use crate::lib::{
    argent::{AccountType, Argent},
    date::Date,
    flux::Flux,
    personne::Personne,
    policy::Policy,
    possession::Possession,
    Valuation,
};

/// One line of the possession table
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Possession(Possession),
    Flux(Flux),
    Argent(Argent),
}

/// Which kind of item to build from a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Possession,
    Flux,
    Argent(AccountType),
}

/// Contents of a record, dates already parsed
///
/// Which fields are required depends on the `Kind` being built.
#[derive(Debug, Clone, PartialEq)]
pub struct Fields {
    pub owner: Personne,
    pub label: String,
    /// initial value of a possession or an account
    pub value: Option<f64>,
    /// amount of each occurrence of a flow
    pub constant: Option<f64>,
    pub start: Option<Date>,
    pub end: Option<Date>,
    /// yearly depreciation in percent, absent means none
    pub rate: Option<f64>,
    /// day of the month of each occurrence of a flow
    pub day: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing field '{0}'")]
    MissingField(&'static str),
    #[error("{0} is not a day of the month")]
    InvalidDay(u32),
}

impl Item {
    /// Build exactly one item of the given kind
    pub fn build(kind: Kind, fields: Fields, policy: Policy) -> Result<Self, ValidationError> {
        let start = fields.start.ok_or(ValidationError::MissingField("dateDebut"))?;
        let rate = fields.rate.unwrap_or(0.0);
        Ok(match kind {
            Kind::Possession => {
                let value = fields.value.ok_or(ValidationError::MissingField("valeur"))?;
                Item::Possession(
                    Possession::new(fields.owner, fields.label, value, start, fields.end, rate)
                        .with_policy(policy),
                )
            }
            Kind::Argent(account) => {
                let value = fields.value.ok_or(ValidationError::MissingField("valeur"))?;
                Item::Argent(
                    Argent::new(fields.owner, fields.label, value, start, fields.end, rate, account)
                        .with_policy(policy),
                )
            }
            Kind::Flux => {
                let amount = fields.constant.ok_or(ValidationError::MissingField("valeurConstante"))?;
                let day = fields.day.ok_or(ValidationError::MissingField("jour"))?;
                if !(1..=31).contains(&day) {
                    return Err(ValidationError::InvalidDay(day));
                }
                Item::Flux(
                    Flux::new(fields.owner, fields.label, amount, start, fields.end, rate, day as u8)
                        .with_policy(policy),
                )
            }
        })
    }

    /// Fields common to all kinds of items
    pub fn base(&self) -> &Possession {
        match self {
            Item::Possession(p) => p,
            Item::Flux(f) => f.base(),
            Item::Argent(a) => a.base(),
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            Item::Possession(_) => Kind::Possession,
            Item::Flux(_) => Kind::Flux,
            Item::Argent(a) => Kind::Argent(a.account()),
        }
    }

    pub fn owner(&self) -> &Personne {
        self.base().owner()
    }

    /// Initial value, or amount of each occurrence for a flow
    pub fn initial_value(&self) -> f64 {
        self.base().initial_value()
    }

    pub fn start(&self) -> Date {
        self.base().start()
    }

    pub fn end(&self) -> Option<Date> {
        self.base().end()
    }

    pub fn rate(&self) -> f64 {
        self.base().rate()
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Possession => write!(f, "Possession"),
            Kind::Flux => write!(f, "Flux"),
            Kind::Argent(account) => write!(f, "Argent ({})", account),
        }
    }
}

impl Valuation for Item {
    fn label(&self) -> &str {
        self.base().label()
    }

    fn valeur(&self, date: Date) -> f64 {
        match self {
            Item::Possession(p) => p.valeur(date),
            Item::Flux(f) => f.valeur(date),
            Item::Argent(a) => a.valeur(date),
        }
    }
}
