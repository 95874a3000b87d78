use std::fmt;

/// Holder of possessions
///
/// Only ever displayed, valuation does not look at it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Personne {
    nom: String,
}

impl Personne {
    pub fn new<S>(nom: S) -> Self
    where S: ToString {
        Self { nom: nom.to_string() }
    }
}

impl fmt::Display for Personne {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.nom)
    }
}
