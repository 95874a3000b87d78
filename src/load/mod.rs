//! Everything the valuation engine needs to be fed:
//! configuration, possession records, dates typed by the user

pub mod config;
pub mod error;
pub mod parse;
pub mod records;
