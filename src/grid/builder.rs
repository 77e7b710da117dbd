//! 13x13 strategy grid construction.
//!
//! Two input styles share one output type:
//!
//! - **Frequency mode**: hand name -> percentage (single-action
//!   categories) or `{raise, call}` split. Hands not listed fold.
//! - **Tag mode**: named buckets of notation tokens. Each token is
//!   expanded and every hand is tagged with the bucket's action; the
//!   higher-priority action wins conflicts. Unclaimed hands stay
//!   unassigned (fold).
//!
//! Missing input yields the all-fold grid. Construction is
//! deterministic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::cell::{Action, ActionMix, GridCell};
use crate::range::hand::{Hand, GRID_SIZE};
use crate::range::notation;

/// Frequency entry for one hand in the scenario data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HandFrequency {
    /// Raise percentage for single-action categories (RFI).
    Single(f64),
    /// Raise/call percentages; missing fields are 0.
    Split {
        /// Raise percentage.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        raise: Option<f64>,
        /// Call percentage.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        call: Option<f64>,
    },
    /// Any other value (a string, null). Treated as absent.
    Other(serde_json::Value),
}

impl HandFrequency {
    fn to_mix(&self, single_action: bool) -> ActionMix {
        match (self, single_action) {
            (HandFrequency::Single(v), true) => ActionMix::from_raise(*v),
            (HandFrequency::Split { raise, .. }, true) => ActionMix::from_raise(raise.unwrap_or(0.0)),
            // A bare number has no raise/call fields.
            (HandFrequency::Single(_), false) => ActionMix::FOLD,
            (HandFrequency::Split { raise, call }, false) => {
                ActionMix::from_split(raise.unwrap_or(0.0), call.unwrap_or(0.0))
            }
            (HandFrequency::Other(_), _) => ActionMix::FOLD,
        }
    }
}

/// One entry of a bucket summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BucketEntry {
    /// Notation tokens, e.g. `["66+", "A2s+"]`.
    Tokens(Vec<String>),
    /// Anything else (free-text notes). Never expanded.
    Other(serde_json::Value),
}

/// Bucket name -> entry. Ordered so iteration is reproducible.
pub type Buckets = BTreeMap<String, BucketEntry>;

/// Per-hand frequency map keyed by hand name.
pub type HandFrequencies = BTreeMap<String, HandFrequency>;

/// Grid builder input.
#[derive(Debug, Clone, Copy)]
pub enum GridInput<'a> {
    /// Percentage data. `single_action` sets raise from a scalar and
    /// forces call to 0.
    Frequencies {
        /// Hand name -> frequency.
        ranges: &'a HandFrequencies,
        /// Raise-or-fold category.
        single_action: bool,
    },
    /// Notation buckets.
    Buckets(&'a Buckets),
    /// No usable substructure.
    Missing,
}

/// A 13x13 strategy grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: [[GridCell; GRID_SIZE]; GRID_SIZE],
}

impl Default for Grid {
    fn default() -> Self {
        Self::all_fold()
    }
}

impl Grid {
    /// Every cell `{raise: 0, call: 0, fold: 100}`.
    pub fn all_fold() -> Self {
        Self { cells: [[GridCell::Mix(ActionMix::FOLD); GRID_SIZE]; GRID_SIZE] }
    }

    /// Every cell unassigned.
    pub fn unassigned() -> Self {
        Self { cells: [[GridCell::Tag(None); GRID_SIZE]; GRID_SIZE] }
    }

    /// Build a grid from either input style.
    pub fn build(input: GridInput<'_>) -> Self {
        match input {
            GridInput::Frequencies { ranges, single_action } => {
                Self::from_frequencies(ranges, single_action)
            }
            GridInput::Buckets(buckets) => Self::from_buckets(buckets),
            GridInput::Missing => Self::all_fold(),
        }
    }

    /// Frequency mode.
    pub fn from_frequencies(ranges: &HandFrequencies, single_action: bool) -> Self {
        let mut grid = Self::all_fold();
        for (name, freq) in ranges {
            let Some(hand) = Hand::parse(name) else {
                debug!(hand = %name, "skipping unknown hand in frequency map");
                continue;
            };
            if let HandFrequency::Other(value) = freq {
                debug!(hand = %name, value = %value, "skipping malformed frequency");
                continue;
            }
            let (row, col) = hand.grid_position();
            grid.cells[row][col] = GridCell::Mix(freq.to_mix(single_action));
        }
        grid
    }

    /// Tag mode.
    pub fn from_buckets(buckets: &Buckets) -> Self {
        let mut grid = Self::unassigned();
        for (bucket, entry) in buckets {
            let BucketEntry::Tokens(tokens) = entry else {
                continue;
            };
            let Some(action) = Action::from_bucket(bucket) else {
                debug!(bucket = %bucket, "ignoring bucket with no action");
                continue;
            };
            for token in tokens {
                let hands = notation::parse(token);
                if hands.is_empty() {
                    debug!(bucket = %bucket, token = %token, "token expanded to no hands");
                }
                for hand in hands {
                    let (row, col) = hand.grid_position();
                    grid.cells[row][col].claim(action);
                }
            }
        }
        grid
    }

    /// Cell at (row, col).
    pub fn cell(&self, row: usize, col: usize) -> &GridCell {
        &self.cells[row][col]
    }

    /// Cell for a hand.
    pub fn cell_for(&self, hand: Hand) -> &GridCell {
        let (row, col) = hand.grid_position();
        &self.cells[row][col]
    }

    /// Rows of cells, top (AA row) first.
    pub fn rows(&self) -> &[[GridCell; GRID_SIZE]; GRID_SIZE] {
        &self.cells
    }

    /// All cells with their hand, in grid order.
    pub fn iter(&self) -> impl Iterator<Item = (Hand, &GridCell)> + '_ {
        Hand::all().map(move |hand| (hand, self.cell_for(hand)))
    }

    /// True if the grid was built from notation buckets.
    pub fn is_tagged(&self) -> bool {
        matches!(self.cells[0][0], GridCell::Tag(_))
    }

    /// The up to 8 cells adjacent to (row, col).
    pub fn neighbors(&self, row: usize, col: usize) -> impl Iterator<Item = &GridCell> + '_ {
        let rows = row.saturating_sub(1)..=(row + 1).min(GRID_SIZE - 1);
        rows.flat_map(move |r| {
            let cols = col.saturating_sub(1)..=(col + 1).min(GRID_SIZE - 1);
            cols.map(move |c| (r, c))
        })
        .filter(move |&(r, c)| (r, c) != (row, col))
        .map(move |(r, c)| &self.cells[r][c])
    }

    /// A cell near a strategic boundary: mixed itself, or a pure fold
    /// with at least one played neighbor.
    pub fn is_borderline(&self, row: usize, col: usize) -> bool {
        let cell = &self.cells[row][col];
        if cell.is_mixed() {
            return true;
        }
        cell.is_pure_fold() && self.neighbors(row, col).any(GridCell::has_play)
    }

    /// Every borderline position, in grid order.
    pub fn borderline_cells(&self) -> Vec<(usize, usize)> {
        (0..GRID_SIZE)
            .flat_map(|row| (0..GRID_SIZE).map(move |col| (row, col)))
            .filter(|&(row, col)| self.is_borderline(row, col))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn freq_map(entries: &[(&str, HandFrequency)]) -> HandFrequencies {
        entries.iter().map(|(h, f)| (h.to_string(), f.clone())).collect()
    }

    fn split(raise: Option<f64>, call: Option<f64>) -> HandFrequency {
        HandFrequency::Split { raise, call }
    }

    fn buckets(entries: &[(&str, &[&str])]) -> Buckets {
        entries
            .iter()
            .map(|(name, tokens)| {
                (name.to_string(), BucketEntry::Tokens(tokens.iter().map(|t| t.to_string()).collect()))
            })
            .collect()
    }

    fn hand(name: &str) -> Hand {
        Hand::parse(name).unwrap()
    }

    #[test]
    fn test_missing_input_is_all_fold() {
        let grid = Grid::build(GridInput::Missing);
        for (_, cell) in grid.iter() {
            assert_eq!(*cell, GridCell::Mix(ActionMix::FOLD));
        }
        assert!(!grid.is_tagged());
    }

    #[test]
    fn test_single_action_frequencies() {
        let ranges = freq_map(&[("AA", HandFrequency::Single(100.0)), ("A5s", HandFrequency::Single(37.5))]);
        let grid = Grid::build(GridInput::Frequencies { ranges: &ranges, single_action: true });

        let a5s = grid.cell_for(hand("A5s")).mix().copied().unwrap();
        assert_eq!(a5s, ActionMix { raise: 37.5, call: 0.0, fold: 62.5 });
        assert_eq!(grid.cell_for(hand("72o")), &GridCell::Mix(ActionMix::FOLD));
    }

    #[test]
    fn test_split_frequencies() {
        let ranges = freq_map(&[
            ("AKo", split(Some(40.0), Some(60.0))),
            ("T9s", split(None, Some(75.0))),
            ("JJ", split(Some(10.0), None)),
            ("bogus", split(Some(100.0), None)),
        ]);
        let grid = Grid::from_frequencies(&ranges, false);

        assert_eq!(grid.cell_for(hand("AKo")).mix().unwrap().fold, 0.0);
        assert_eq!(grid.cell_for(hand("T9s")).mix().unwrap().fold, 25.0);
        assert_eq!(grid.cell_for(hand("JJ")).mix().unwrap().call, 0.0);
        assert_eq!(grid.cell_for(hand("JJ")).mix().unwrap().fold, 90.0);
    }

    #[test]
    fn test_frequency_cells_sum_to_hundred() {
        let ranges = freq_map(&[
            ("AA", split(Some(33.3), Some(33.3))),
            ("KK", split(Some(90.0), Some(30.0))),
            ("QQ", split(Some(0.1), Some(0.2))),
            ("JJ", HandFrequency::Single(12.345)),
        ]);
        for single_action in [true, false] {
            let grid = Grid::from_frequencies(&ranges, single_action);
            for (h, cell) in grid.iter() {
                let mix = cell.mix().unwrap();
                let total = mix.raise + mix.call + mix.fold;
                assert!((total - 100.0).abs() < 1e-9, "{} sums to {}", h, total);
                for v in [mix.raise, mix.call, mix.fold] {
                    assert!((0.0..=100.0).contains(&v));
                }
            }
        }
    }

    #[test]
    fn test_bucket_tagging() {
        let summary = buckets(&[
            ("pure_raise", &["66+", "A2s+"]),
            ("mixed_raise", &["55", "K8s-K6s"]),
        ]);
        let grid = Grid::build(GridInput::Buckets(&summary));

        assert!(grid.is_tagged());
        assert_eq!(grid.cell_for(hand("AA")), &GridCell::Tag(Some(Action::Raise)));
        assert_eq!(grid.cell_for(hand("A2s")), &GridCell::Tag(Some(Action::Raise)));
        assert_eq!(grid.cell_for(hand("55")), &GridCell::Tag(Some(Action::Mixed)));
        assert_eq!(grid.cell_for(hand("K7s")), &GridCell::Tag(Some(Action::Mixed)));
        assert_eq!(grid.cell_for(hand("K5s")), &GridCell::Tag(None));
        assert_eq!(grid.cell_for(hand("K5s")).resolved_action(), Action::Fold);
    }

    #[test]
    fn test_bucket_conflict_priority() {
        let summary = buckets(&[("check_range", &["AKo", "22"]), ("pure_raise", &["AKo"])]);
        let grid = Grid::from_buckets(&summary);
        assert_eq!(grid.cell_for(hand("AKo")), &GridCell::Tag(Some(Action::Raise)));
        assert_eq!(grid.cell_for(hand("22")), &GridCell::Tag(Some(Action::Check)));

        let summary = buckets(&[("call", &["JJ-TT"]), ("4bet_bluff", &["TT"]), ("fold", &["99-"])]);
        let grid = Grid::from_buckets(&summary);
        assert_eq!(grid.cell_for(hand("TT")), &GridCell::Tag(Some(Action::Mixed)));
        assert_eq!(grid.cell_for(hand("JJ")), &GridCell::Tag(Some(Action::Call)));
        assert_eq!(grid.cell_for(hand("99")), &GridCell::Tag(Some(Action::Fold)));
    }

    #[test]
    fn test_notes_and_malformed_tokens_ignored() {
        let mut summary = buckets(&[("pure_raise", &["AA", "garbage", "(mixed)"])]);
        summary.insert("notes".to_string(), BucketEntry::Other(serde_json::json!("free text")));
        let grid = Grid::from_buckets(&summary);

        let tagged = grid.iter().filter(|(_, c)| **c != GridCell::Tag(None)).count();
        assert_eq!(tagged, 1);
    }

    #[test]
    fn test_build_is_deterministic() {
        let summary = buckets(&[
            ("3bet_value", &["KK+", "AKo(mixed)"]),
            ("3bet_bluff", &["A5s-A4s"]),
            ("pure_call", &["22-QQ", "AQs-A2s"]),
        ]);
        assert_eq!(Grid::from_buckets(&summary), Grid::from_buckets(&summary));

        let ranges = freq_map(&[("AA", split(Some(70.0), Some(30.0)))]);
        assert_eq!(Grid::from_frequencies(&ranges, false), Grid::from_frequencies(&ranges, false));
    }

    #[test]
    fn test_borderline_detection() {
        // 99 is mixed; 88 (below-right diagonal neighbor) is a pure fold next to it.
        let ranges = freq_map(&[("99", HandFrequency::Single(60.0))]);
        let grid = Grid::from_frequencies(&ranges, true);

        let (r, c) = hand("99").grid_position();
        assert!(grid.is_borderline(r, c));

        let (r, c) = hand("88").grid_position();
        assert!(grid.is_borderline(r, c));

        let (r, c) = hand("22").grid_position();
        assert!(!grid.is_borderline(r, c));

        assert_eq!(grid.borderline_cells().len(), 9);
    }

    #[test]
    fn test_all_fold_has_no_borderline() {
        assert!(Grid::all_fold().borderline_cells().is_empty());
    }

    #[test]
    fn test_neighbors_at_corner() {
        let grid = Grid::all_fold();
        assert_eq!(grid.neighbors(0, 0).count(), 3);
        assert_eq!(grid.neighbors(0, 5).count(), 5);
        assert_eq!(grid.neighbors(6, 6).count(), 8);
        assert_eq!(grid.neighbors(12, 12).count(), 3);
    }

    #[test]
    fn test_hand_frequency_json() {
        let ranges: HandFrequencies =
            serde_json::from_str(r#"{"AA": 100, "AKs": {"raise": 25.0}, "T9s": {"call": 50}}"#).unwrap();
        assert_eq!(ranges["AA"], HandFrequency::Single(100.0));
        assert_eq!(ranges["AKs"], split(Some(25.0), None));
        assert_eq!(ranges["T9s"], split(None, Some(50.0)));
    }

    #[test]
    fn test_malformed_frequency_skipped() {
        let ranges: HandFrequencies =
            serde_json::from_str(r#"{"AA": "100", "KK": null, "QQ": 50}"#).unwrap();
        assert!(matches!(ranges["AA"], HandFrequency::Other(_)));
        assert!(matches!(ranges["KK"], HandFrequency::Other(_)));

        let grid = Grid::from_frequencies(&ranges, true);
        assert_eq!(grid.cell_for(hand("AA")), &GridCell::Mix(ActionMix::FOLD));
        assert_eq!(grid.cell_for(hand("KK")), &GridCell::Mix(ActionMix::FOLD));
        assert_eq!(grid.cell_for(hand("QQ")).mix().unwrap().raise, 50.0);
    }
}
