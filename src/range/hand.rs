//! Hand classes and the 13x13 grid mapping.
//!
//! There are 169 strategically distinct starting hands:
//! - 13 pairs (AA, KK, ..., 22)
//! - 78 suited hands (AKs, AQs, ..., 32s)
//! - 78 offsuit hands (AKo, AQo, ..., 32o)
//!
//! Grid convention (row, col by rank index, A=0):
//! - pairs on the diagonal
//! - suited above the diagonal: row = higher rank, col = lower rank
//! - offsuit below the diagonal: row = lower rank, col = higher rank

use std::fmt;

use super::card::Rank;

/// Side length of the hand grid.
pub const GRID_SIZE: usize = 13;

/// Hand names in standard notation (13x13 grid order)
pub const HAND_NAMES: [&str; 169] = [
    // Row 0: Ax hands (AA at top-left)
    "AA", "AKs", "AQs", "AJs", "ATs", "A9s", "A8s", "A7s", "A6s", "A5s", "A4s", "A3s", "A2s",
    // Row 1: Kx hands
    "AKo", "KK", "KQs", "KJs", "KTs", "K9s", "K8s", "K7s", "K6s", "K5s", "K4s", "K3s", "K2s",
    // Row 2: Qx hands
    "AQo", "KQo", "QQ", "QJs", "QTs", "Q9s", "Q8s", "Q7s", "Q6s", "Q5s", "Q4s", "Q3s", "Q2s",
    // Row 3: Jx hands
    "AJo", "KJo", "QJo", "JJ", "JTs", "J9s", "J8s", "J7s", "J6s", "J5s", "J4s", "J3s", "J2s",
    // Row 4: Tx hands
    "ATo", "KTo", "QTo", "JTo", "TT", "T9s", "T8s", "T7s", "T6s", "T5s", "T4s", "T3s", "T2s",
    // Row 5: 9x hands
    "A9o", "K9o", "Q9o", "J9o", "T9o", "99", "98s", "97s", "96s", "95s", "94s", "93s", "92s",
    // Row 6: 8x hands
    "A8o", "K8o", "Q8o", "J8o", "T8o", "98o", "88", "87s", "86s", "85s", "84s", "83s", "82s",
    // Row 7: 7x hands
    "A7o", "K7o", "Q7o", "J7o", "T7o", "97o", "87o", "77", "76s", "75s", "74s", "73s", "72s",
    // Row 8: 6x hands
    "A6o", "K6o", "Q6o", "J6o", "T6o", "96o", "86o", "76o", "66", "65s", "64s", "63s", "62s",
    // Row 9: 5x hands
    "A5o", "K5o", "Q5o", "J5o", "T5o", "95o", "85o", "75o", "65o", "55", "54s", "53s", "52s",
    // Row 10: 4x hands
    "A4o", "K4o", "Q4o", "J4o", "T4o", "94o", "84o", "74o", "64o", "54o", "44", "43s", "42s",
    // Row 11: 3x hands
    "A3o", "K3o", "Q3o", "J3o", "T3o", "93o", "83o", "73o", "63o", "53o", "43o", "33", "32s",
    // Row 12: 2x hands
    "A2o", "K2o", "Q2o", "J2o", "T2o", "92o", "82o", "72o", "62o", "52o", "42o", "32o", "22",
];

/// Suit relation of a hand class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HandKind {
    /// Both ranks equal.
    Pair,
    /// Two ranks, same suit.
    Suited,
    /// Two ranks, different suits.
    Offsuit,
}

impl HandKind {
    /// Number of card combinations for this kind.
    pub fn num_combos(&self) -> u8 {
        match self {
            HandKind::Pair => 6,     // C(4,2)
            HandKind::Suited => 4,
            HandKind::Offsuit => 12,
        }
    }
}

/// One of the 169 starting-hand classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hand {
    high: Rank,
    low: Rank,
    kind: HandKind,
}

impl Hand {
    /// A pocket pair.
    pub fn pair(rank: Rank) -> Self {
        Self { high: rank, low: rank, kind: HandKind::Pair }
    }

    /// A non-pair hand; rank order does not matter. `None` if the ranks are equal.
    pub fn unpaired(a: Rank, b: Rank, suited: bool) -> Option<Self> {
        if a == b {
            return None;
        }
        let kind = if suited { HandKind::Suited } else { HandKind::Offsuit };
        Some(Self { high: a.higher(b), low: a.lower(b), kind })
    }

    /// Parse a canonical hand name: "AA", "AKs", "AKo".
    ///
    /// Rank order is not enforced ("KAs" is AKs). A non-pair without a
    /// suitedness suffix is not a single hand and yields `None`.
    pub fn parse(name: &str) -> Option<Self> {
        let chars: Vec<char> = name.trim().chars().collect();
        match chars.as_slice() {
            [a, b] => {
                let (a, b) = (Rank::from_char(*a)?, Rank::from_char(*b)?);
                (a == b).then(|| Self::pair(a))
            }
            [a, b, suffix] => {
                let (a, b) = (Rank::from_char(*a)?, Rank::from_char(*b)?);
                match suffix.to_ascii_lowercase() {
                    's' => Self::unpaired(a, b, true),
                    'o' => Self::unpaired(a, b, false),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// The hand at a grid position. Panics if `row` or `col` is 13 or more.
    pub fn from_grid(row: usize, col: usize) -> Self {
        assert!(row < GRID_SIZE && col < GRID_SIZE, "grid position out of range: ({}, {})", row, col);
        let r = Rank::from_index(row).unwrap_or(Rank::DEUCE);
        let c = Rank::from_index(col).unwrap_or(Rank::DEUCE);
        if row == col {
            Self::pair(r)
        } else if row < col {
            Self { high: r, low: c, kind: HandKind::Suited }
        } else {
            Self { high: c, low: r, kind: HandKind::Offsuit }
        }
    }

    /// Grid position (row, col) of this hand.
    pub fn grid_position(&self) -> (usize, usize) {
        let (high, low) = (self.high.index(), self.low.index());
        match self.kind {
            HandKind::Pair => (high, high),
            HandKind::Suited => (high, low),
            HandKind::Offsuit => (low, high),
        }
    }

    /// Row-major grid index (0-168).
    pub fn grid_index(&self) -> usize {
        let (row, col) = self.grid_position();
        row * GRID_SIZE + col
    }

    /// The higher (or equal) rank.
    pub fn high(&self) -> Rank {
        self.high
    }

    /// The lower (or equal) rank.
    pub fn low(&self) -> Rank {
        self.low
    }

    /// Suit relation.
    pub fn kind(&self) -> HandKind {
        self.kind
    }

    /// Number of specific combos in this class (6, 4 or 12).
    pub fn num_combos(&self) -> u8 {
        self.kind.num_combos()
    }

    /// Canonical name, e.g. "AKs".
    pub fn name(&self) -> &'static str {
        HAND_NAMES[self.grid_index()]
    }

    /// All 169 hands in grid order.
    pub fn all() -> impl Iterator<Item = Hand> {
        (0..GRID_SIZE * GRID_SIZE).map(|i| Hand::from_grid(i / GRID_SIZE, i % GRID_SIZE))
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Grid position of a hand name, or `None` if the name is not a canonical hand.
pub fn hand_to_grid(name: &str) -> Option<(usize, usize)> {
    Hand::parse(name).map(|h| h.grid_position())
}

/// Hand name at a grid position. Panics if `row` or `col` is 13 or more.
pub fn grid_to_hand(row: usize, col: usize) -> &'static str {
    assert!(row < GRID_SIZE && col < GRID_SIZE, "grid position out of range: ({}, {})", row, col);
    HAND_NAMES[row * GRID_SIZE + col]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hand_names_count() {
        assert_eq!(HAND_NAMES.len(), 169);
        assert_eq!(Hand::all().count(), 169);
    }

    #[test]
    fn test_grid_positions() {
        assert_eq!(grid_to_hand(0, 0), "AA");
        assert_eq!(grid_to_hand(1, 1), "KK");
        assert_eq!(grid_to_hand(0, 1), "AKs");
        assert_eq!(grid_to_hand(1, 0), "AKo");
        assert_eq!(grid_to_hand(12, 12), "22");

        assert_eq!(hand_to_grid("AKs"), Some((0, 1)));
        assert_eq!(hand_to_grid("AKo"), Some((1, 0)));
        assert_eq!(hand_to_grid("72o"), Some((12, 7)));
        assert_eq!(hand_to_grid("AK"), None);
        assert_eq!(hand_to_grid("AKx"), None);
    }

    #[test]
    #[should_panic(expected = "grid position out of range")]
    fn test_grid_to_hand_rejects_wide_column() {
        grid_to_hand(0, 13);
    }

    #[test]
    #[should_panic(expected = "grid position out of range")]
    fn test_grid_to_hand_rejects_tall_row() {
        grid_to_hand(13, 0);
    }

    #[test]
    fn test_grid_bijection() {
        let mut seen = std::collections::HashSet::new();
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let name = grid_to_hand(row, col);
                assert_eq!(hand_to_grid(name), Some((row, col)), "roundtrip failed for {}", name);

                let hand = Hand::from_grid(row, col);
                assert_eq!(hand.name(), name);
                assert_eq!(Hand::parse(name), Some(hand));
                assert!(seen.insert(name));
            }
        }
        assert_eq!(seen.len(), 169);
    }

    #[test]
    fn test_kinds_and_combos() {
        let pairs = Hand::all().filter(|h| h.kind() == HandKind::Pair).count();
        let suited = Hand::all().filter(|h| h.kind() == HandKind::Suited).count();
        let offsuit = Hand::all().filter(|h| h.kind() == HandKind::Offsuit).count();
        assert_eq!((pairs, suited, offsuit), (13, 78, 78));

        let total: usize = Hand::all().map(|h| h.num_combos() as usize).sum();
        assert_eq!(total, 1326);
    }

    #[test]
    fn test_parse_any_rank_order() {
        assert_eq!(Hand::parse("KAs").unwrap().name(), "AKs");
        assert_eq!(Hand::parse("tjo").unwrap().name(), "JTo");
        assert!(Hand::parse("AAs").is_none());
        assert!(Hand::parse("").is_none());
    }
}
