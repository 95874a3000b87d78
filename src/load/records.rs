//! Possession lists in the JSON format served to the web interface
//!
//! ```json
//! { "possessions": [
//!     { "possesseur": { "nom": "John Doe" }, "libelle": "Ordinateur", "valeur": 2000000,
//!       "dateDebut": "2023-12-25T00:00:00.000Z", "dateFin": null, "tauxAmortissement": 10 },
//!     { "possesseur": "John Doe", "libelle": "Salaire", "valeurConstante": 400000,
//!       "dateDebut": "2023-01-01", "jour": 1 }
//! ] }
//! ```

use log::{debug, info};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::lib::{
    argent::AccountType,
    date::Date,
    item::{Fields, Item, Kind, ValidationError},
    personne::Personne,
    policy::Policy,
    Valuation,
};
use crate::load::{
    error::{Error, Record},
    parse,
};

/// Either the whole response of the server or just its list
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Document {
    Wrapped { possessions: Vec<Value> },
    Bare(Vec<Value>),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawOwner {
    Nom(String),
    Personne { nom: String },
}

/// A record exactly as written in the file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    pub possesseur: Option<RawOwner>,
    pub libelle: Option<String>,
    pub valeur: Option<f64>,
    pub valeur_constante: Option<f64>,
    pub date_debut: Option<String>,
    pub date_fin: Option<String>,
    pub taux_amortissement: Option<f64>,
    pub jour: Option<u32>,
    #[serde(rename = "type")]
    pub account: Option<AccountType>,
    /// anything else, reported and ignored
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Which kind of item a record describes
///
/// A day of the month or a constant amount makes it a flow,
/// an account type makes it money, anything else is a plain possession.
pub fn kind_of(raw: &RawRecord) -> Kind {
    if raw.jour.is_some() || raw.valeur_constante.is_some() {
        Kind::Flux
    } else if let Some(account) = raw.account {
        Kind::Argent(account)
    } else {
        Kind::Possession
    }
}

/// Read and build all items of file `path`
///
/// All records are checked before giving up, so that `errs` lists every
/// problem in the file. A single fatal error means no item is returned.
pub fn read_items(path: &Path, owner: &Personne, policy: Policy, errs: &mut Record) -> Option<Vec<Item>> {
    let source = path.display().to_string();
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            Error::new("Records not found")
                .with_text(format!("could not read '{}': {}", source, e))
                .with_hint("set 'records' in the configuration file or use --records")
                .register(errs);
            return None;
        }
    };
    let items = extract(&source, &contents, owner, policy, errs);
    if errs.is_fatal() {
        None
    } else {
        info!("Loaded {} items from {}", items.len(), source);
        Some(items)
    }
}

/// Build the items described in `contents`
///
/// The return value may be non-empty even if some errors occured,
/// callers should check `errs`.
pub fn extract(source: &str, contents: &str, owner: &Personne, policy: Policy, errs: &mut Record) -> Vec<Item> {
    let records = match serde_json::from_str::<Document>(contents) {
        Ok(Document::Wrapped { possessions }) | Ok(Document::Bare(possessions)) => possessions,
        Err(e) => {
            Error::new("Invalid records file")
                .with_text(format!("{}: {}", source, e))
                .with_hint("expected {\"possessions\": [...]} or a list of records")
                .register(errs);
            return Vec::new();
        }
    };
    debug!("{} records in {}", records.len(), source);
    records
        .into_iter()
        .enumerate()
        .filter_map(|(idx, value)| {
            let name = format!("record #{} of {}", idx + 1, source);
            build(&name, value, owner, policy, errs)
        })
        .collect()
}

fn build(name: &str, value: Value, owner: &Personne, policy: Policy, errs: &mut Record) -> Option<Item> {
    let raw = match serde_json::from_value::<RawRecord>(value) {
        Ok(raw) => raw,
        Err(e) => {
            Error::new("Malformed record")
                .with_text(format!("{}: {}", name, e))
                .with_hint("amounts and rates are numbers, dates and labels are strings")
                .register(errs);
            return None;
        }
    };
    for field in raw.extra.keys() {
        Error::new("Unknown field")
            .nonfatal()
            .with_text(format!("{}: '{}' is ignored", name, field))
            .register(errs);
    }
    let kind = kind_of(&raw);
    let fields = fields_of(name, &raw, owner, errs)?;
    match Item::build(kind, fields, policy) {
        Ok(item) => {
            debug!("{}: {:?} '{}'", name, kind, item.label());
            Some(item)
        }
        Err(e) => {
            let hint = match e {
                ValidationError::MissingField(field) => format!("add the field '{}'", field),
                ValidationError::InvalidDay(_) => "'jour' is between 1 and 31".to_string(),
            };
            Error::new("Invalid record")
                .with_text(format!("{}: {}", name, e))
                .with_hint(hint)
                .register(errs);
            None
        }
    }
}

/// Typed contents of `raw`, or `None` if one of its dates is wrong
fn fields_of(name: &str, raw: &RawRecord, owner: &Personne, errs: &mut Record) -> Option<Fields> {
    let mut valid = true;
    let mut date = |field: &str, text: &Option<String>| -> Option<Date> {
        let text = text.as_deref()?;
        match parse::record_date(text) {
            Ok(date) => Some(date),
            Err(e) => {
                Error::new("Invalid date")
                    .with_text(format!("{}: '{}' in '{}' {}", name, text, field, e))
                    .with_hint(e.fix_hint())
                    .register(errs);
                valid = false;
                None
            }
        }
    };
    let start = date("dateDebut", &raw.date_debut);
    let end = date("dateFin", &raw.date_fin);
    if !valid {
        return None;
    }
    let owner = match &raw.possesseur {
        Some(RawOwner::Nom(nom)) | Some(RawOwner::Personne { nom }) => Personne::new(nom),
        None => owner.clone(),
    };
    Some(Fields {
        owner,
        label: raw.libelle.clone().unwrap_or_default(),
        value: raw.valeur,
        constant: raw.valeur_constante,
        start,
        end,
        rate: raw.taux_amortissement,
        day: raw.jour,
    })
}
