//! Hand classes, range notation and combo aggregation.
//!
//! ## Modules
//!
//! - `card`: ranks, suits, cards and fully specified combos
//! - `hand`: the 169 hand classes and the 13x13 grid mapping
//! - `notation`: shorthand range tokens ("66+", "K8s-K6s") to hands
//! - `combo`: per-combo frequencies to per-hand frequencies

pub mod card;
pub mod hand;
pub mod notation;
pub mod combo;

// Re-export commonly used types
pub use card::{Card, Combo, Rank, Suit};
pub use hand::{grid_to_hand, hand_to_grid, Hand, HandKind, GRID_SIZE, HAND_NAMES};
pub use notation::{parse, parse_list};
pub use combo::{aggregate, aggregate_line, extract_frequencies};
