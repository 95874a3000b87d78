use std::fmt;

use crate::lib::{date::Date, item::Item, Valuation};

/// The possession table, valued at a given date
pub struct Table<'d> {
    items: &'d [Item],
    date: Date,
    title: Option<String>,
}

struct BoxFmt {
    width: usize,
    text: String,
}

struct ColFmt {
    width: usize,
    right: bool,
    label: BoxFmt,
    boxes: Vec<BoxFmt>,
}

struct GridFmt {
    labels: ColFmt,
    columns: Vec<ColFmt>,
}

const HEADERS: &[(&str, bool)] = &[
    ("Libelle", false),
    ("Type", false),
    ("Valeur initiale (Ariary)", true),
    ("Date de début", false),
    ("Date de fin", false),
    ("Amortissement", true),
];

impl<'d> Table<'d> {
    pub fn from(items: &'d [Item], date: Date) -> Self {
        Self { items, date, title: None }
    }

    pub fn with_title<S>(self, title: S) -> Self
    where S: ToString {
        Self { title: Some(title.to_string()), ..self }
    }

    fn to_formatter(&self) -> GridFmt {
        let cols = HEADERS
            .iter()
            .map(|(label, right)| ColFmt::with_label(BoxFmt::from(label.to_string()), *right))
            .chain(std::iter::once(ColFmt::with_label(
                BoxFmt::from(format!("Valeur au {}", self.date)),
                true,
            )))
            .collect::<Vec<_>>();
        let mut grid = GridFmt::with_columns(cols);
        for (idx, item) in self.items.iter().enumerate() {
            grid.push_line(
                BoxFmt::from(format!("{}", idx + 1)),
                vec![
                    BoxFmt::from(item.label().to_string()),
                    BoxFmt::kind(item),
                    BoxFmt::amount(item.initial_value()),
                    BoxFmt::from(format!("{}", item.start())),
                    BoxFmt::optional(item.end()),
                    BoxFmt::rate(item.rate()),
                    BoxFmt::amount(item.valeur(self.date)),
                ],
            );
        }
        grid
    }
}

impl BoxFmt {
    fn from(text: String) -> Self {
        let width = text.chars().count();
        Self { text, width }
    }

    fn amount(a: f64) -> Self {
        Self::from(format!("{:.2}", a))
    }

    /// Kind of the item, with the day of the month for a flow
    fn kind(item: &Item) -> Self {
        match item {
            Item::Flux(flux) => Self::from(format!("{}, jour {}", item.kind(), flux.day())),
            _ => Self::from(item.kind().to_string()),
        }
    }

    fn rate(r: f64) -> Self {
        if r == 0.0 {
            Self::from(String::from("-"))
        } else {
            Self::from(format!("{}%", r))
        }
    }

    fn optional(d: Option<Date>) -> Self {
        match d {
            Some(d) => Self::from(format!("{}", d)),
            None => Self::from(String::from("-")),
        }
    }
}

impl ColFmt {
    fn with_label(label: BoxFmt, right: bool) -> Self {
        Self {
            width: label.width,
            right,
            label,
            boxes: Vec::new(),
        }
    }

    fn push(&mut self, b: BoxFmt) {
        self.width = self.width.max(b.width);
        self.boxes.push(b);
    }
}

impl GridFmt {
    fn with_columns(columns: Vec<ColFmt>) -> Self {
        Self {
            labels: ColFmt::with_label(BoxFmt::from(String::from("#")), true),
            columns,
        }
    }

    fn push_line(&mut self, label: BoxFmt, boxes: Vec<BoxFmt>) {
        self.labels.push(label);
        for (i, b) in boxes.into_iter().enumerate() {
            self.columns[i].push(b);
        }
    }

    /// One horizontal border, with `left`, `mid` and `right` as joints
    fn border(&self, f: &mut fmt::Formatter, left: &str, mid: &str, right: &str) -> fmt::Result {
        write!(f, "{}", left)?;
        self.labels.hline(f)?;
        for c in &self.columns {
            write!(f, "{}", mid)?;
            c.hline(f)?;
        }
        writeln!(f, "{}", right)
    }
}

impl fmt::Display for Table<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(title) = &self.title {
            writeln!(f, "{}", title)?;
        }
        write!(f, "{}", self.to_formatter())
    }
}

impl fmt::Display for GridFmt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.border(f, ULCORNER, LOJOIN, URCORNER)?;
        // title line
        write!(f, "{}", VLINE)?;
        self.labels.write_label(f)?;
        for c in &self.columns {
            write!(f, "{}", VLINE)?;
            c.write_label(f)?;
        }
        writeln!(f, "{}", VLINE)?;
        self.border(f, RTJOIN, CROSS, LTJOIN)?;
        // main block
        for idx in 0..self.labels.len() {
            write!(f, "{}", VLINE)?;
            self.labels.write_item(f, idx)?;
            for c in &self.columns {
                write!(f, "{}", VLINE)?;
                c.write_item(f, idx)?;
            }
            writeln!(f, "{}", VLINE)?;
        }
        self.border(f, DLCORNER, HIJOIN, DRCORNER)
    }
}

impl ColFmt {
    fn write_label(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.label.write(f, self.width, false)
    }

    fn write_item(&self, f: &mut fmt::Formatter, idx: usize) -> fmt::Result {
        self.boxes[idx].write(f, self.width, self.right)
    }

    fn len(&self) -> usize {
        self.boxes.len()
    }

    fn hline(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", HLINE.repeat(self.width + 2))
    }
}

const HLINE: &str = "─";
const VLINE: &str = "│";
const ULCORNER: &str = "┌";
const URCORNER: &str = "┐";
const DLCORNER: &str = "└";
const DRCORNER: &str = "┘";
const LTJOIN: &str = "┤";
const RTJOIN: &str = "├";
const HIJOIN: &str = "┴";
const LOJOIN: &str = "┬";
const CROSS: &str = "┼";

impl BoxFmt {
    fn write(&self, f: &mut fmt::Formatter, width: usize, right: bool) -> fmt::Result {
        let padding = " ".repeat(width.saturating_sub(self.width));
        if right {
            write!(f, " {}{} ", padding, self.text)
        } else {
            write!(f, " {}{} ", self.text, padding)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lib::{
        argent::{AccountType, Argent},
        date::Month::*,
        flux::Flux,
        personne::Personne,
        possession::Possession,
    };

    macro_rules! dt {
        ( $y:tt - $m:tt - $d:tt ) => {
            Date::from($y, $m, $d).unwrap()
        }
    }

    fn items() -> Vec<Item> {
        vec![
            Item::Possession(Possession::new(
                Personne::new("Ilo"), "Ordinateur", 100_000.0, dt!(2024-Mar-3), Some(dt!(2027-Mar-3)), 10.0,
            )),
            Item::Flux(Flux::new(Personne::new("Ilo"), "Salaire", 2500.0, dt!(2024-Mar-3), None, 0.0, 4)),
            Item::Argent(Argent::new(
                Personne::new("Ilo"), "Livret", 200_000.0, dt!(2024-Mar-3), None, -10.0, AccountType::Epargne,
            )),
        ]
    }

    #[test]
    fn layout() {
        let items = items();
        let text = format!("{}", Table::from(&items, dt!(2024-Sep-3)));
        let lines = text.lines().collect::<Vec<_>>();
        // borders, header, separator, one line per item
        assert_eq!(lines.len(), 7);
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|l| l.chars().count() == width), "{}", text);
        assert!(lines[0].starts_with(ULCORNER));
        assert!(lines[6].ends_with(DRCORNER));
        assert!(lines[1].contains("Libelle"));
        assert!(lines[1].contains("Type"));
        assert!(lines[1].contains("Valeur au 2024-Sep-03"));
    }

    #[test]
    fn contents() {
        let items = items();
        let text = format!("{}", Table::from(&items, dt!(2024-Sep-3)).with_title("Patrimoine de Ilo"));
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "Patrimoine de Ilo");
        let computer = lines[4];
        assert!(computer.contains("Ordinateur"));
        assert!(computer.contains(" Possession "));
        assert!(computer.contains("100000.00"));
        assert!(computer.contains("2027-Mar-03"));
        assert!(computer.contains("10%"));
        assert!(computer.contains("95000.00"));
        let salary = lines[5];
        assert!(salary.contains("Salaire"));
        assert!(salary.contains(" Flux, jour 4 "));
        assert!(salary.contains("2500.00"));
        assert!(salary.contains("15000.00"));
        // no end date, no rate
        assert_eq!(salary.matches(" - ").count(), 2);
        let savings = lines[6];
        assert!(savings.contains(" Argent (Epargne) "));
        assert!(savings.contains("-10%"));
        assert!(savings.contains("210000.00"));
    }

    #[test]
    fn empty() {
        let text = format!("{}", Table::from(&[], dt!(2024-Sep-3)));
        assert_eq!(text.lines().count(), 4);
    }
}
