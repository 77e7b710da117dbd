//! Scenario data: loading and offline conversion.
//!
//! - `scenario`: categories, scenario records, range books, data loading
//! - `convert`: line-oriented range text to scenario data

pub mod scenario;
pub mod convert;

pub use scenario::{Category, DataError, RangeBook, ScenarioRecord, TrainerData, DEFAULT_MODE};
pub use convert::{convert, to_json, to_script, RangeConverter};
