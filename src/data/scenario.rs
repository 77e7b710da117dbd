//! Scenario data model.
//!
//! The data file is either one range book or a map of mode name
//! ("cash", "tournament", ...) to range book. A range book lists
//! scenario records per category. Each record carries either a
//! per-hand frequency map (`ranges`) or a bucket summary
//! (`range_summary` / `strategy_summary`).
//!
//! The JS-embeddable form produced by the converter
//! (`const RANGE_DATA = {...};`) is accepted as well.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::grid::{Buckets, Grid, GridInput, HandFrequencies};

/// Mode name used when the data file holds a single range book.
pub const DEFAULT_MODE: &str = "cash";

/// Scenario category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Raise first in.
    #[serde(rename = "rfi")]
    Rfi,
    /// Big blind facing an open.
    #[serde(rename = "bb_defense")]
    BbDefense,
    /// Any seat facing an open.
    #[serde(rename = "vs_open")]
    VsOpen,
    /// Opener facing a 3bet.
    #[serde(rename = "vs_3bet")]
    Vs3Bet,
}

impl Category {
    /// All categories in menu order.
    pub fn all() -> &'static [Category] {
        &[Category::Rfi, Category::BbDefense, Category::VsOpen, Category::Vs3Bet]
    }

    /// Short identifier.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Rfi => "rfi",
            Category::BbDefense => "bb_defense",
            Category::VsOpen => "vs_open",
            Category::Vs3Bet => "vs_3bet",
        }
    }

    /// Parse a short identifier.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase();
        Self::all().iter().copied().find(|c| c.name() == s)
    }

    /// Key of this category's list in a range book.
    pub fn data_key(&self) -> &'static str {
        match self {
            Category::Rfi => "open_ranges_rfi",
            Category::BbDefense => "bb_defense_ranges",
            Category::VsOpen => "vs_open_ranges",
            Category::Vs3Bet => "vs_3bet_ranges",
        }
    }

    /// Raise-or-fold category: a scalar frequency is the raise share.
    pub fn single_action(&self) -> bool {
        matches!(self, Category::Rfi)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One scenario as supplied by the data source. Read-only to the core.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opponent_action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub villain_position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_open: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub villain_action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defense_frequency: Option<Value>,
    /// Hand name -> frequency (frequency mode).
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub ranges: Option<HandFrequencies>,
    /// Bucket summary for opening ranges (tag mode).
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub range_summary: Option<Buckets>,
    /// Bucket summary for defense / 3bet ranges (tag mode).
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub strategy_summary: Option<Buckets>,
}

/// Read an optional substructure, dropping it if it has the wrong shape.
///
/// A malformed field loses only its own scenario's grid (all fold), not
/// the whole data file.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            warn!(error = %e, "ignoring malformed scenario field");
            Ok(None)
        }
    }
}

impl ScenarioRecord {
    /// The bucket summary, whichever field carries it.
    pub fn summary(&self) -> Option<&Buckets> {
        self.range_summary.as_ref().or(self.strategy_summary.as_ref())
    }

    /// Pick the builder input: frequencies first, then buckets.
    pub fn grid_input(&self, category: Category) -> GridInput<'_> {
        if let Some(ranges) = &self.ranges {
            GridInput::Frequencies { ranges, single_action: category.single_action() }
        } else if let Some(buckets) = self.summary() {
            GridInput::Buckets(buckets)
        } else {
            GridInput::Missing
        }
    }

    /// Build this scenario's grid.
    pub fn build_grid(&self, category: Category) -> Grid {
        Grid::build(self.grid_input(category))
    }

    /// Menu label: "UTG RFI" or the scenario name.
    pub fn label(&self, category: Category) -> String {
        let position = self.position.as_deref().or(self.hero_position.as_deref());
        match category {
            Category::Rfi => format!("{} RFI", position.unwrap_or("?")),
            _ => self
                .scenario
                .as_deref()
                .or(position)
                .unwrap_or("?")
                .to_string(),
        }
    }

    /// Question shown above the hand.
    pub fn situation(&self, category: Category) -> String {
        let label = self.label(category);
        match category {
            Category::Rfi => format!(
                "Folded to you in {}. Your action with this hand?",
                self.position.as_deref().unwrap_or("?")
            ),
            Category::BbDefense => format!("{}. Your action in the BB?", label),
            Category::VsOpen => format!("{}. Facing an open raise. Your action?", label),
            Category::Vs3Bet => format!("{}. Your open was 3bet. Your action?", label),
        }
    }
}

/// All scenarios of one mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeBook {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poker_strategy: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub open_ranges_rfi: Vec<ScenarioRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bb_defense_ranges: Vec<ScenarioRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vs_open_ranges: Vec<ScenarioRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vs_3bet_ranges: Vec<ScenarioRecord>,
}

impl RangeBook {
    /// Scenario list for a category.
    pub fn scenarios(&self, category: Category) -> &[ScenarioRecord] {
        match category {
            Category::Rfi => &self.open_ranges_rfi,
            Category::BbDefense => &self.bb_defense_ranges,
            Category::VsOpen => &self.vs_open_ranges,
            Category::Vs3Bet => &self.vs_3bet_ranges,
        }
    }

    /// Categories that have at least one scenario.
    pub fn categories(&self) -> Vec<Category> {
        Category::all()
            .iter()
            .copied()
            .filter(|c| !self.scenarios(*c).is_empty())
            .collect()
    }

    /// `poker_strategy.game_format`, if present.
    pub fn game_format(&self) -> Option<&str> {
        self.poker_strategy.as_ref()?.get("game_format")?.as_str()
    }

    /// Total number of scenarios.
    pub fn len(&self) -> usize {
        Category::all().iter().map(|c| self.scenarios(*c).len()).sum()
    }

    /// True if no category has scenarios.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Errors loading scenario data.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid range data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("range data root must be a JSON object")]
    NotAnObject,
    #[error("range data contains no modes")]
    Empty,
}

/// Scenario data for every mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainerData {
    modes: BTreeMap<String, RangeBook>,
}

impl TrainerData {
    /// Data with a single mode.
    pub fn from_book(mode: &str, book: RangeBook) -> Self {
        let mut modes = BTreeMap::new();
        modes.insert(mode.to_string(), book);
        Self { modes }
    }

    /// Load from a JSON (or JS-embedded JSON) file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|source| DataError::Io {
            path: path.as_ref().display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Parse from a JSON string, or from a `const X = {...};` script.
    pub fn from_json_str(text: &str) -> Result<Self, DataError> {
        let value: Value = serde_json::from_str(strip_script_wrapper(text))?;
        Self::from_value(value)
    }

    /// Interpret a parsed JSON document.
    pub fn from_value(value: Value) -> Result<Self, DataError> {
        let Value::Object(map) = value else {
            return Err(DataError::NotAnObject);
        };

        let single_book = Category::all().iter().any(|c| map.contains_key(c.data_key()));
        let data = if single_book {
            debug!("range data holds a single book, loading as mode '{}'", DEFAULT_MODE);
            let book: RangeBook = serde_json::from_value(Value::Object(map))?;
            Self::from_book(DEFAULT_MODE, book)
        } else {
            let mut modes = BTreeMap::new();
            for (mode, book) in map {
                if !book.is_object() {
                    debug!(mode = %mode, "skipping non-object mode entry");
                    continue;
                }
                modes.insert(mode, serde_json::from_value::<RangeBook>(book)?);
            }
            Self { modes }
        };

        if data.modes.is_empty() {
            return Err(DataError::Empty);
        }
        Ok(data)
    }

    /// Range book for a mode.
    pub fn mode(&self, name: &str) -> Option<&RangeBook> {
        self.modes.get(name)
    }

    /// Mode names, sorted.
    pub fn mode_names(&self) -> impl Iterator<Item = &str> {
        self.modes.keys().map(String::as_str)
    }

    /// Scenarios for a mode and category; empty if either is missing.
    pub fn scenarios(&self, mode: &str, category: Category) -> &[ScenarioRecord] {
        self.mode(mode).map(|book| book.scenarios(category)).unwrap_or(&[])
    }
}

/// `const RANGE_DATA = {...};` -> `{...}`. Plain JSON passes through.
fn strip_script_wrapper(text: &str) -> &str {
    let trimmed = text.trim();
    if trimmed.starts_with('{') {
        return trimmed;
    }
    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Action, GridCell};
    use crate::range::Hand;

    const BUNDLED: &str = include_str!("../../data/range_data.json");

    #[test]
    fn test_load_bundled_data() {
        let data = TrainerData::from_json_str(BUNDLED).unwrap();
        let book = data.mode("cash").unwrap();
        assert_eq!(book.open_ranges_rfi.len(), 5);
        assert_eq!(book.bb_defense_ranges.len(), 6);
        assert_eq!(book.vs_3bet_ranges.len(), 4);
        assert_eq!(book.game_format(), Some("6-Max Cash"));
        assert_eq!(book.categories(), vec![Category::Rfi, Category::BbDefense, Category::Vs3Bet]);
        assert!(data.scenarios("tournament", Category::Rfi).is_empty());
    }

    #[test]
    fn test_bundled_utg_rfi_grid() {
        let data = TrainerData::from_json_str(BUNDLED).unwrap();
        let utg = &data.scenarios("cash", Category::Rfi)[0];
        assert_eq!(utg.label(Category::Rfi), "UTG RFI");

        let grid = utg.build_grid(Category::Rfi);
        let tag = |name: &str| *grid.cell_for(Hand::parse(name).unwrap());
        assert_eq!(tag("66"), GridCell::Tag(Some(Action::Raise)));
        assert_eq!(tag("55"), GridCell::Tag(Some(Action::Mixed)));
        assert_eq!(tag("44"), GridCell::Tag(None));
        assert_eq!(tag("A2s"), GridCell::Tag(Some(Action::Raise)));
    }

    #[test]
    fn test_bundled_notes_do_not_break_parsing() {
        let data = TrainerData::from_json_str(BUNDLED).unwrap();
        let limp = data
            .scenarios("cash", Category::BbDefense)
            .iter()
            .find(|s| s.scenario.as_deref() == Some("BB vs SB Limp"))
            .unwrap();
        let grid = limp.build_grid(Category::BbDefense);
        assert_eq!(*grid.cell_for(Hand::parse("TT").unwrap()), GridCell::Tag(Some(Action::Raise)));
        assert_eq!(*grid.cell_for(Hand::parse("55").unwrap()), GridCell::Tag(Some(Action::Check)));
    }

    #[test]
    fn test_single_book_loads_as_default_mode() {
        let json = r#"{"open_ranges_rfi": [{"position": "CO", "action": "Raise", "ranges": {"AA": 100}}]}"#;
        let data = TrainerData::from_json_str(json).unwrap();
        assert_eq!(data.mode_names().collect::<Vec<_>>(), vec![DEFAULT_MODE]);
        assert_eq!(data.scenarios(DEFAULT_MODE, Category::Rfi).len(), 1);
    }

    #[test]
    fn test_script_wrapper() {
        let script = "// header\nconst RANGE_DATA = {\"tournament\": {\"vs_open_ranges\": [{\"scenario\": \"CO vs UTG\"}]}};\n";
        let data = TrainerData::from_json_str(script).unwrap();
        let records = data.scenarios("tournament", Category::VsOpen);
        assert_eq!(records[0].label(Category::VsOpen), "CO vs UTG");
    }

    #[test]
    fn test_missing_substructure_builds_all_fold() {
        let record = ScenarioRecord { position: Some("BTN".to_string()), ..Default::default() };
        assert!(matches!(record.grid_input(Category::Rfi), GridInput::Missing));
        assert_eq!(record.build_grid(Category::Rfi), Grid::all_fold());
    }

    #[test]
    fn test_bad_documents() {
        assert!(matches!(TrainerData::from_json_str("[1, 2]"), Err(DataError::NotAnObject)));
        assert!(matches!(TrainerData::from_json_str("{}"), Err(DataError::Empty)));
        assert!(matches!(TrainerData::from_json_str("{oops"), Err(DataError::Parse(_))));
        assert!(matches!(
            TrainerData::from_json_file("/nonexistent/range_data.json"),
            Err(DataError::Io { .. })
        ));
    }

    #[test]
    fn test_malformed_record_fields_fall_back_to_fold() {
        let bad_records = [
            r#"{"position": "UTG", "ranges": "oops"}"#,
            r#"{"position": "UTG", "ranges": {"AA": "100"}}"#,
            r#"{"position": "UTG", "ranges": {"AA": null}}"#,
            r#"{"position": "UTG", "range_summary": "oops"}"#,
            r#"{"position": "UTG", "strategy_summary": 42}"#,
            r#"{"position": "UTG", "range_summary": null}"#,
        ];
        for record in bad_records {
            let json = format!(
                r#"{{"open_ranges_rfi": [{}, {{"position": "CO", "ranges": {{"AA": 100}}}}]}}"#,
                record
            );
            let data = TrainerData::from_json_str(&json)
                .unwrap_or_else(|e| panic!("{} failed to load: {}", record, e));
            let records = data.scenarios(DEFAULT_MODE, Category::Rfi);
            assert_eq!(records.len(), 2, "{}", record);
            assert_eq!(records[0].build_grid(Category::Rfi), Grid::all_fold(), "{}", record);

            let co = records[1].build_grid(Category::Rfi);
            assert_eq!(
                *co.cell_for(Hand::parse("AA").unwrap()),
                GridCell::Mix(crate::grid::ActionMix::from_raise(100.0))
            );
        }
    }

    #[test]
    fn test_malformed_ranges_field_is_missing() {
        let json = r#"{"open_ranges_rfi": [{"position": "UTG", "ranges": "oops"}]}"#;
        let data = TrainerData::from_json_str(json).unwrap();
        let record = &data.scenarios(DEFAULT_MODE, Category::Rfi)[0];
        assert!(record.ranges.is_none());
        assert!(matches!(record.grid_input(Category::Rfi), GridInput::Missing));
    }

    #[test]
    fn test_category_names() {
        for category in Category::all() {
            assert_eq!(Category::parse(category.name()), Some(*category));
        }
        assert_eq!(Category::parse("VS_3BET"), Some(Category::Vs3Bet));
        assert!(Category::Rfi.single_action());
        assert!(!Category::BbDefense.single_action());
    }
}
