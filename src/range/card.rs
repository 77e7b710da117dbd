//! Card primitives for range work.
//!
//! - `Rank`: one of the 13 ranks, indexed in grid order (A=0 ... 2=12)
//! - `Suit`: one of the four suits
//! - `Card`: a rank and a suit
//! - `Combo`: a fully specified two-card holding such as `AhAd`

use std::fmt;

use super::hand::Hand;

/// Rank characters in grid order (strongest first).
pub const RANK_CHARS: [char; 13] = ['A', 'K', 'Q', 'J', 'T', '9', '8', '7', '6', '5', '4', '3', '2'];

/// Suit characters for display.
const SUIT_CHARS: [char; 4] = ['c', 'd', 'h', 's'];

/// A card rank.
///
/// Ranks are stored by grid index: `A` is 0 and `2` is 12, so a lower
/// index is a stronger rank. The derived ordering follows the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rank(u8);

impl Rank {
    /// The ace, index 0.
    pub const ACE: Rank = Rank(0);
    /// The deuce, index 12.
    pub const DEUCE: Rank = Rank(12);

    /// Create a rank from its grid index (0-12).
    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        if index < 13 {
            Some(Rank(index as u8))
        } else {
            None
        }
    }

    /// Parse a rank character. Accepts lowercase `t`, `j`, `q`, `k`, `a`.
    pub fn from_char(c: char) -> Option<Self> {
        let upper = c.to_ascii_uppercase();
        RANK_CHARS
            .iter()
            .position(|&r| r == upper)
            .map(|i| Rank(i as u8))
    }

    /// Grid index (A=0 ... 2=12).
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// Display character.
    #[inline]
    pub fn to_char(&self) -> char {
        RANK_CHARS[self.index()]
    }

    /// True if this rank beats `other`.
    #[inline]
    pub fn is_higher_than(&self, other: Rank) -> bool {
        self.0 < other.0
    }

    /// The stronger of two ranks.
    #[inline]
    pub fn higher(self, other: Rank) -> Rank {
        if self.is_higher_than(other) { self } else { other }
    }

    /// The weaker of two ranks.
    #[inline]
    pub fn lower(self, other: Rank) -> Rank {
        if self.is_higher_than(other) { other } else { self }
    }

    /// All ranks, strongest first.
    pub fn all() -> impl Iterator<Item = Rank> {
        (0..13u8).map(Rank)
    }

    /// Ranks whose index lies in `from..=to` (grid order).
    pub fn span(from: usize, to: usize) -> impl Iterator<Item = Rank> {
        (from..=to.min(12)).map(|i| Rank(i as u8))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Suit(u8);

impl Suit {
    /// Parse a suit character (`c`, `d`, `h`, `s`, any case).
    pub fn from_char(c: char) -> Option<Self> {
        let lower = c.to_ascii_lowercase();
        SUIT_CHARS
            .iter()
            .position(|&s| s == lower)
            .map(|i| Suit(i as u8))
    }

    /// Display character.
    pub fn to_char(&self) -> char {
        SUIT_CHARS[self.0 as usize]
    }
}

/// A single playing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    /// Create a card from rank and suit.
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Parse a card from a string like "As", "Kh", "2c".
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let rank = Rank::from_char(chars.next()?)?;
        let suit = Suit::from_char(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Self { rank, suit })
    }

    /// The card's rank.
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// The card's suit.
    pub fn suit(&self) -> Suit {
        self.suit
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.to_char(), self.suit.to_char())
    }
}

/// A fully specified two-card holding.
///
/// Stored in canonical order: higher rank first, and for pairs the
/// higher suit (s > h > d > c) first, so `AdAh` and `AhAd` are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Combo {
    first: Card,
    second: Card,
}

impl Combo {
    /// Create a combo from two distinct cards.
    pub fn new(a: Card, b: Card) -> Option<Self> {
        if a == b {
            return None;
        }
        let a_first = if a.rank == b.rank {
            a.suit > b.suit
        } else {
            a.rank.is_higher_than(b.rank)
        };
        let (first, second) = if a_first { (a, b) } else { (b, a) };
        Some(Self { first, second })
    }

    /// Parse the 4-character form `rank suit rank suit`, e.g. "AhAd".
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.len() != 4 || !s.is_ascii() {
            return None;
        }
        let a = Card::parse(&s[0..2])?;
        let b = Card::parse(&s[2..4])?;
        Self::new(a, b)
    }

    /// The hand class this combo belongs to.
    pub fn hand(&self) -> Hand {
        if self.first.rank == self.second.rank {
            Hand::pair(self.first.rank)
        } else {
            let suited = self.first.suit == self.second.suit;
            Hand::unpaired(self.first.rank, self.second.rank, suited)
                .unwrap_or_else(|| Hand::pair(self.first.rank))
        }
    }

    /// The two cards, higher first.
    pub fn cards(&self) -> (Card, Card) {
        (self.first, self.second)
    }
}

impl fmt::Display for Combo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.first, self.second)
    }
}
