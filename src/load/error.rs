//! Pretty-printing facility for error messages
//!
//! Errors made while reading arguments carry the offending span,
//! errors made while reading records carry the record they come from.
//! Both are aggregated in a `Record` so that every problem is reported
//! at once rather than stopping at the first one.
//!
//! # Example
//!
//! ```rust
//! Error::new("Invalid record")
//!     .with_text("record #3 of possessions.json: missing field 'dateDebut'")
//!     .with_hint("add the field 'dateDebut'")
//!     .register(errs);
//! ```
//!
//! ```txt
//! --> Error: Invalid record
//!  |  record #3 of possessions.json: missing field 'dateDebut'
//!  |      ? hint: add the field 'dateDebut'
//! ```

use log::debug;
use std::fmt;

use crate::load::parse::Rule;

/// Location of an error
///
/// Contains the name of the argument in which the error
/// occured and the precise span within that argument
pub type Loc<'i> = (&'i str, pest::Span<'i>);

/// Report for a single error
///
/// All messages (`label` passed with `new`, arguments of `with_hint`
/// and `with_text`) should fit in a single line.
#[must_use]
#[derive(Debug)]
pub struct Error {
    /// determines the error label (warning/error) and the color (yellow/red)
    fatal: bool,
    /// name of the error
    label: String,
    /// contents of the error
    items: Vec<Item>,
}

/// Kinds of items that can be added to an error report
#[derive(Debug)]
enum Item {
    /// excerpt of the argument
    Block(Box<pest::error::Error<Rule>>),
    /// important message
    Text(String),
    /// recommendations for fixes
    Hint(String),
}

/// A collection of errors
#[must_use]
#[derive(Debug, Default)]
pub struct Record {
    /// how many are errors, the rest are warnings
    fatal: usize,
    contents: Vec<Error>,
}

impl Error {
    /// Create a new error
    pub fn new<S>(msg: S) -> Self
    where S: ToString {
        Self {
            fatal: true,
            label: msg.to_string(),
            items: Vec::new(),
        }
    }

    /// Mark as a warning rather that a fatal error
    pub fn nonfatal(mut self) -> Self {
        self.fatal = false;
        self
    }

    /// Add a pre-existing error (e.g. to build from a parsing error)
    pub fn with_error(mut self, err: pest::error::Error<Rule>) -> Self {
        self.items.push(Item::Block(Box::new(err.renamed_rules(rule_rename))));
        self
    }

    /// Add an excerpt of the argument and its associated message
    pub fn with_span<S>(mut self, loc: &Loc, msg: S) -> Self
    where S: ToString {
        self.items.push(Item::Block(Box::new(pest::error::Error::new_from_span(
            pest::error::ErrorVariant::CustomError {
                message: msg.to_string(),
            },
            loc.1.clone(),
        ).with_path(loc.0))));
        self
    }

    /// Add an important note
    pub fn with_text<S>(mut self, msg: S) -> Self
    where S: ToString {
        self.items.push(Item::Text(msg.to_string()));
        self
    }

    /// Add a hint on how to fix
    pub fn with_hint<S>(mut self, msg: S) -> Self
    where S: ToString {
        self.items.push(Item::Hint(msg.to_string()));
        self
    }

    /// Consume the error and add it to the pool of recorded errors
    pub fn register(self, record: &mut Record) {
        record.register(self);
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if any of the recorded errors are fatal
    pub fn is_fatal(&self) -> bool {
        self.fatal > 0
    }

    /// Number of fatal errors
    pub fn count_errors(&self) -> usize {
        self.fatal
    }

    /// Number of nonfatal errors
    pub fn count_warnings(&self) -> usize {
        self.contents.len() - self.fatal
    }

    /// Everything recorded so far, in order
    pub fn iter(&self) -> impl Iterator<Item = &Error> {
        self.contents.iter()
    }

    fn register(&mut self, err: Error) {
        debug!("{}: {}", if err.fatal { "error" } else { "warning" }, err.label());
        if err.fatal {
            self.fatal += 1;
        }
        self.contents.push(err);
    }
}

const RED: &str = "\x1b[0;91;1m";
const YELLOW: &str = "\x1b[0;93;1m";
const BLUE: &str = "\x1b[0;96;1m";
const WHITE: &str = "\x1b[0;1m";
const NONE: &str = "\x1b[0m";

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (color, header) = if self.fatal {
            (RED, "--> Error")
        } else {
            (YELLOW, "--> Warning")
        };
        writeln!(f, "{}{}:{} {}{}", color, header, WHITE, self.label, NONE)?;
        for item in &self.items {
            match item {
                Item::Block(err) => {
                    for line in format!("{}", err).lines() {
                        writeln!(f, " {}|  {}{}{}", color, BLUE, line, NONE)?;
                    }
                }
                Item::Text(txt) => {
                    writeln!(f, " {}|  {}{}{}", color, WHITE, txt, NONE)?;
                }
                Item::Hint(txt) => {
                    writeln!(f, " {}|      {}? hint: {}{}", color, BLUE, NONE, txt)?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.contents.is_empty() {
            return Ok(());
        }
        let fatal = self.is_fatal();
        let count = if fatal { self.count_errors() } else { self.count_warnings() };
        let color = if fatal { RED } else { YELLOW };
        let trunc = 10;
        // only print errors with the maximum fatality
        for err in self.iter().filter(|err| err.fatal == fatal).take(trunc) {
            writeln!(f, "{}", err)?;
        }
        if count > trunc {
            writeln!(f, "{} And {} more.", color, count - trunc)?;
        }
        let plural = if count > 1 { "s" } else { "" };
        if fatal {
            writeln!(f, "{}Fatal: {}{} error{} emitted{}", color, WHITE, count, plural, NONE)?;
        } else {
            writeln!(f, "{}Nonfatal: {}{} warning{} emitted{}", color, WHITE, count, plural, NONE)?;
        }
        Ok(())
    }
}

/// Convert rule names to user-friendly information about their purpose
#[allow(unreachable_patterns)]
fn rule_rename(rule: &Rule) -> String {
    use Rule::*;
    String::from(match rule {
        EOI => "the end of the argument",
        year => "a year ('YYYY')",
        month_name => "a month ('Jan' ... 'Dec')",
        month_number => "a month number (1..12)",
        day => "a day (1..31)",
        full_date => "a date ('YYYY-Mmm-DD' or 'YYYY-MM-DD')",
        month_date => "a month and an optional day ('Mmm-DD')",
        range => "a range ('START..END')",
        date => "a complete date",
        period => "a date or a range of dates",
        _ => "a date component",
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn counts() {
        let mut errs = Record::new();
        assert!(!errs.is_fatal());
        Error::new("Unknown field").nonfatal().with_text("ignored").register(&mut errs);
        assert!(!errs.is_fatal());
        Error::new("Invalid record").with_hint("fix it").register(&mut errs);
        Error::new("Invalid date").register(&mut errs);
        assert!(errs.is_fatal());
        assert_eq!(errs.count_errors(), 2);
        assert_eq!(errs.count_warnings(), 1);
        let labels = errs.iter().map(Error::label).collect::<Vec<_>>();
        assert_eq!(labels, vec!["Unknown field", "Invalid record", "Invalid date"]);
    }

    #[test]
    fn only_worst_are_printed() {
        let mut errs = Record::new();
        Error::new("Unknown field").nonfatal().register(&mut errs);
        Error::new("Invalid record").with_text("record #2").with_hint("add it").register(&mut errs);
        let text = format!("{}", errs);
        assert!(text.contains("Invalid record"));
        assert!(text.contains("record #2"));
        assert!(text.contains("? hint: "));
        assert!(!text.contains("Unknown field"));
        assert!(text.contains("1 error emitted"));
    }

    #[test]
    fn nothing_to_report() {
        assert_eq!(format!("{}", Record::new()), "");
    }
}
