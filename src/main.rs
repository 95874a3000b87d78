mod cli;
mod lib;
mod load;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use log::{debug, info};
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use cli::{plot::Plotter, table::Table};
use lib::{
    date::Date,
    item::Item,
    patrimoine::{Patrimoine, ValuationError},
    period::Step,
    personne::Personne,
};
use load::{
    config::{self, Config},
    error::{Error, Record},
    parse,
    records,
};

const DEFAULT_CONFIG: &str = "patrimoine.yaml";

fn app() -> App<'static, 'static> {
    App::new("patrimoine")
        .version(env!("CARGO_PKG_VERSION"))
        .about("\nValue of everything a person owns, at any date")
        .arg(Arg::with_name("config")
            .short("c")
            .long("config")
            .value_name("PATH")
            .help("Configuration file path [default: patrimoine.yaml if it exists]")
            .takes_value(true))
        .arg(Arg::with_name("records")
            .short("r")
            .long("records")
            .value_name("PATH")
            .help("Possession list, overrides the configuration")
            .takes_value(true))
        .arg(Arg::with_name("verbose")
            .short("v")
            .long("verbose")
            .multiple(true)
            .help("Sets the level of verbosity"))
        .subcommand(SubCommand::with_name("table")
            .about("Show the possession table")
            .arg(Arg::with_name("DATE")
                .help("Date at which possessions are valued [default: today]")
                .index(1)))
        .subcommand(SubCommand::with_name("value")
            .about("Show the value of the patrimoine")
            .arg(Arg::with_name("DATE")
                .help("Date at which the patrimoine is valued, as 2024-Mar-03 or 2024-03-03")
                .required(true)
                .index(1)))
        .subcommand(SubCommand::with_name("plot")
            .about("Draw the evolution of the patrimoine")
            .arg(Arg::with_name("PERIOD")
                .help("Dates to draw, as 2024-Jan..2025-Jun-15")
                .required(true)
                .index(1))
            .arg(Arg::with_name("step")
                .short("s")
                .long("step")
                .value_name("STEP")
                .help("Time between two points")
                .takes_value(true)
                .possible_values(&["day", "week", "month", "year"])
                .default_value("month"))
            .arg(Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("FILE")
                .help("Where to save the chart")
                .takes_value(true)
                .default_value("patrimoine.svg")))
        .global_setting(AppSettings::DeriveDisplayOrder)
        .setting(AppSettings::SubcommandRequiredElseHelp)
}

fn main() -> ExitCode {
    let matches = app().get_matches();

    let log_level = match matches.occurrences_of("verbose") {
        0 => log::Level::Info,
        1 => log::Level::Debug,
        _ => log::Level::Trace,
    };
    if let Err(err) = easy_logging::init(module_path!(), log_level) {
        let _ = writeln!(io::stderr(), "Failed to initialize the logging: {}.", err);
        return ExitCode::FAILURE;
    }

    let mut errs = Record::new();
    let done = run(&matches, &mut errs);
    eprint!("{}", errs);
    if done.is_some() && !errs.is_fatal() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn run(matches: &ArgMatches, errs: &mut Record) -> Option<()> {
    let (owner, items) = load(matches, errs)?;
    match matches.subcommand() {
        ("table", Some(sub)) => show_table(sub, owner, &items, errs),
        ("value", Some(sub)) => show_value(sub, owner, &items, errs).map(|_| ()),
        ("plot", Some(sub)) => plot(sub, owner, &items, errs),
        _ => {
            Error::new("No command")
                .with_hint("use one of table, value, plot")
                .register(errs);
            None
        }
    }
}

/// Owner of the patrimoine and everything listed in the records
fn load(matches: &ArgMatches, errs: &mut Record) -> Option<(Personne, Vec<Item>)> {
    let config = configuration(matches, errs)?;
    let owner = Personne::new(&config.owner);
    let items = records::read_items(&config.records, &owner, config.policy, errs)?;
    let others = items.iter().filter(|item| item.owner() != &owner).count();
    if others > 0 {
        info!("{} items are held by someone other than {}, they are counted too", others, owner);
    }
    Some((owner, items))
}

fn configuration(matches: &ArgMatches, errs: &mut Record) -> Option<Config> {
    let path = matches.value_of("config").or_else(|| {
        Some(DEFAULT_CONFIG).filter(|path| Path::new(path).exists())
    });
    let mut config = match path {
        Some(path) => match config::load_config(Path::new(path)) {
            Ok(config) => config,
            Err(e) => {
                Error::new("Invalid configuration")
                    .with_text(e)
                    .with_hint("see the documentation of `Config` for the accepted keys")
                    .register(errs);
                return None;
            }
        },
        None => {
            debug!("No {} found, using the default configuration", DEFAULT_CONFIG);
            Config::default()
        }
    };
    if let Some(records) = matches.value_of("records") {
        config.records = config::resolve(None, Path::new(records));
    }
    debug!("{:?}", config);
    Some(config)
}

fn report<T>(result: Result<T, Error>, errs: &mut Record) -> Option<T> {
    result.map_err(|e| e.register(errs)).ok()
}

fn report_valuation<T>(result: Result<T, ValuationError>, errs: &mut Record) -> Option<T> {
    result.map_err(|e| {
        Error::new("Valuation failed")
            .with_text(e)
            .with_hint("check the amounts and rates of the records")
            .register(errs)
    }).ok()
}

fn today(errs: &mut Record) -> Option<Date> {
    let today = chrono::Local::now().date_naive();
    match parse::from_naive(today) {
        Ok(date) => Some(date),
        Err(e) => {
            Error::new("Unsupported date")
                .with_text(format!("today ({}) {}", today, e))
                .with_hint("pass the date explicitly")
                .register(errs);
            None
        }
    }
}

fn show_table(matches: &ArgMatches, owner: Personne, items: &[Item], errs: &mut Record) -> Option<()> {
    let date = match matches.value_of("DATE") {
        Some(arg) => report(parse::date("DATE", arg), errs)?,
        None => today(errs)?,
    };
    let title = format!("Patrimoine de {}", owner);
    let total = report_valuation(Patrimoine::new(owner, items).valeur(date), errs)?;
    print!("{}", Table::from(items, date).with_title(title));
    println!("Total au {} : {:.2} Ariary", date, total);
    Some(())
}

fn show_value(matches: &ArgMatches, owner: Personne, items: &[Item], errs: &mut Record) -> Option<f64> {
    let date = report(parse::date("DATE", matches.value_of("DATE")?), errs)?;
    let patrimoine = Patrimoine::new(owner, items);
    let total = report_valuation(patrimoine.valeur(date), errs)?;
    println!("Patrimoine de {} au {} : {:.2} Ariary", patrimoine.owner(), date, total);
    Some(total)
}

fn step_of(name: &str) -> Step {
    match name {
        "day" => Step::Day,
        "week" => Step::Week,
        "year" => Step::Year,
        _ => Step::Month,
    }
}

fn plot(matches: &ArgMatches, owner: Personne, items: &[Item], errs: &mut Record) -> Option<()> {
    let period = report(parse::period("PERIOD", matches.value_of("PERIOD")?), errs)?;
    let step = step_of(matches.value_of("step").unwrap_or("month"));
    let output = Path::new(matches.value_of("output").unwrap_or("patrimoine.svg"));
    let values = report_valuation(Patrimoine::new(owner, items).evolution(period, step), errs)?;
    info!("{} values from {} every {}", values.len(), period, step);
    if let Err(e) = Plotter::from(&values).render(output) {
        Error::new("Chart not saved")
            .with_text(format!("could not write '{}': {}", output.display(), e))
            .register(errs);
        return None;
    }
    info!("Chart saved to {}", output.display());
    Some(())
}
