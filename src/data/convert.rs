//! Offline converter from line-oriented range text to scenario data.
//!
//! Input layout:
//!
//! ```text
//! ### UTG Open
//! AhAd, AsAc, [50]KhKd, KsKc[/50]
//! ### BB Defence
//! #### vs CO
//! ##### Call
//! [40]Ah5h, As5s[/40], 9h9d
//! ##### Raise
//! AhAd, KhKd
//! ```
//!
//! `### <POS> Open` starts an opening-range section; every data line
//! below it becomes one RFI record. `### BB Defence` starts the defense
//! section; `#### vs <POS>` selects the opener and `##### <action>` the
//! action. Defense lines merge into one `BB vs <POS>` record per opener.

use rustc_hash::FxHashMap;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::scenario::{DataError, RangeBook, ScenarioRecord};
use crate::grid::{HandFrequencies, HandFrequency};
use crate::range::combo;

/// Which section the converter is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Rfi,
    BbDefense,
}

/// Streaming converter. Feed lines, then `finish`.
#[derive(Debug, Default)]
pub struct RangeConverter {
    section: Option<Section>,
    position: Option<String>,
    opponent: Option<String>,
    action: Option<String>,
    book: RangeBook,
    /// "BB vs CO" -> index into `book.bb_defense_ranges`
    defense_index: FxHashMap<String, usize>,
    data_lines: usize,
}

impl RangeConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one input line.
    pub fn feed_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }

        if let Some(title) = line.strip_prefix("### ") {
            let title = title.to_lowercase();
            if title.contains("open") {
                self.section = Some(Section::Rfi);
                self.position = title.split_whitespace().next().map(str::to_uppercase);
                debug!(position = ?self.position, "opening range section");
            } else if title.contains("bb defence") || title.contains("bb defense") {
                self.section = Some(Section::BbDefense);
                debug!("bb defense section");
            }
        } else if let Some(opponent) = line.strip_prefix("#### vs ") {
            self.opponent = Some(opponent.trim().to_uppercase());
        } else if let Some(action) = line.strip_prefix("##### ") {
            self.action = Some(action.trim().to_lowercase());
        } else {
            self.data_line(line);
        }
    }

    fn data_line(&mut self, line: &str) {
        let Some(section) = self.section else {
            debug!(line = %line, "data line outside any section");
            return;
        };
        self.data_lines += 1;
        let hands = combo::aggregate_line(line);

        match section {
            Section::Rfi => {
                let ranges: HandFrequencies = hands
                    .iter()
                    .map(|(hand, freq)| (hand.name().to_string(), HandFrequency::Single(*freq)))
                    .collect();
                self.book.open_ranges_rfi.push(ScenarioRecord {
                    position: self.position.clone(),
                    action: Some("Raise".to_string()),
                    ranges: Some(ranges),
                    ..Default::default()
                });
            }
            Section::BbDefense => {
                let opponent = self.opponent.clone().unwrap_or_default();
                let key = format!("BB vs {}", opponent);
                let is_call = match self.action.as_deref() {
                    Some(a) if a.contains("call") => true,
                    Some(a) if a.contains("raise") || a.contains("bet") => false,
                    other => {
                        warn!(action = ?other, scenario = %key, "skipping line with unknown action");
                        return;
                    }
                };

                let index = match self.defense_index.get(&key) {
                    Some(&i) => i,
                    None => {
                        self.book.bb_defense_ranges.push(ScenarioRecord {
                            scenario: Some(key.clone()),
                            opponent_action: Some(format!("{} Raise", opponent)),
                            ranges: Some(HandFrequencies::new()),
                            ..Default::default()
                        });
                        let i = self.book.bb_defense_ranges.len() - 1;
                        self.defense_index.insert(key, i);
                        i
                    }
                };

                let ranges = self.book.bb_defense_ranges[index]
                    .ranges
                    .get_or_insert_with(HandFrequencies::new);
                for (hand, freq) in hands {
                    let entry = ranges
                        .entry(hand.name().to_string())
                        .or_insert(HandFrequency::Split { raise: None, call: None });
                    if let HandFrequency::Split { raise, call } = entry {
                        if is_call {
                            *call = Some(freq);
                        } else {
                            *raise = Some(freq);
                        }
                    }
                }
            }
        }
    }

    /// Number of data lines consumed so far.
    pub fn data_lines(&self) -> usize {
        self.data_lines
    }

    /// The converted range book.
    pub fn finish(self) -> RangeBook {
        self.book
    }
}

/// Convert a whole document.
pub fn convert(text: &str) -> RangeBook {
    let mut converter = RangeConverter::new();
    for line in text.lines() {
        converter.feed_line(line);
    }
    converter.finish()
}

fn to_pretty<T: Serialize>(value: &T) -> Result<String, DataError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Pretty JSON for the converted book.
pub fn to_json(book: &RangeBook) -> Result<String, DataError> {
    to_pretty(book)
}

/// `const RANGE_DATA = {...};` for environments without file fetch.
pub fn to_script(book: &RangeBook) -> Result<String, DataError> {
    let mut value = serde_json::to_value(book)?;
    if let Value::Object(map) = &mut value {
        map.insert(
            "poker_strategy".to_string(),
            json!({ "game_format": "6-Max Cash", "stack_depth": "100bb" }),
        );
    }
    Ok(format!(
        "// GTO Range Data (Parsed from range text)\nconst RANGE_DATA = {};\n",
        to_pretty(&value)?
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::scenario::{Category, TrainerData};
    use crate::grid::{ActionMix, GridCell};
    use crate::range::Hand;

    const SAMPLE: &str = "\
### UTG Open
AhAd, AsAc, AhAs, AhAc, AdAs, AdAc, [50]KhKd, KsKc[/50]

### BB Defence
#### vs CO
##### Call
[40]Ah5h, As5s[/40], 9h9d
##### Raise
AhAd, [25]Ah5h[/25]
#### vs BTN
##### Call
QhJd
";

    #[test]
    fn test_rfi_records() {
        let book = convert(SAMPLE);
        assert_eq!(book.open_ranges_rfi.len(), 1);

        let utg = &book.open_ranges_rfi[0];
        assert_eq!(utg.position.as_deref(), Some("UTG"));
        assert_eq!(utg.action.as_deref(), Some("Raise"));
        let ranges = utg.ranges.as_ref().unwrap();
        assert_eq!(ranges["AA"], HandFrequency::Single(100.0));
        assert_eq!(ranges["KK"], HandFrequency::Single(100.0 / 6.0));
    }

    #[test]
    fn test_defense_records_merge() {
        let book = convert(SAMPLE);
        assert_eq!(book.bb_defense_ranges.len(), 2);

        let co = &book.bb_defense_ranges[0];
        assert_eq!(co.scenario.as_deref(), Some("BB vs CO"));
        assert_eq!(co.opponent_action.as_deref(), Some("CO Raise"));

        let ranges = co.ranges.as_ref().unwrap();
        assert_eq!(ranges["A5s"], HandFrequency::Split { raise: Some(25.0 / 4.0), call: Some(20.0) });
        assert_eq!(ranges["AA"], HandFrequency::Split { raise: Some(100.0 / 6.0), call: None });

        let btn = &book.bb_defense_ranges[1];
        assert_eq!(btn.scenario.as_deref(), Some("BB vs BTN"));
        assert_eq!(
            btn.ranges.as_ref().unwrap()["QJo"],
            HandFrequency::Split { raise: None, call: Some(100.0 / 12.0) }
        );
    }

    #[test]
    fn test_lines_outside_sections_ignored() {
        let mut converter = RangeConverter::new();
        converter.feed_line("AhAd");
        converter.feed_line("");
        assert_eq!(converter.data_lines(), 0);
        assert!(converter.finish().is_empty());
    }

    #[test]
    fn test_script_roundtrip() {
        let book = convert(SAMPLE);
        let script = to_script(&book).unwrap();
        assert!(script.starts_with("// GTO Range Data"));
        assert!(script.contains("const RANGE_DATA = {"));
        assert!(script.contains("\"game_format\": \"6-Max Cash\""));

        let data = TrainerData::from_json_str(&script).unwrap();
        let utg = &data.scenarios("cash", Category::Rfi)[0];
        let grid = utg.build_grid(Category::Rfi);
        assert_eq!(*grid.cell_for(Hand::parse("AA").unwrap()), GridCell::Mix(ActionMix::from_raise(100.0)));

        let json = to_json(&book).unwrap();
        let data = TrainerData::from_json_str(&json).unwrap();
        let co = &data.scenarios("cash", Category::BbDefense)[0];
        let cell = *co.build_grid(Category::BbDefense).cell_for(Hand::parse("A5s").unwrap());
        assert_eq!(cell, GridCell::Mix(ActionMix::from_split(6.25, 20.0)));
    }
}
