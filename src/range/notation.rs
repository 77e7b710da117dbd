//! Range notation parsing.
//!
//! Expands a single shorthand token into the hand classes it denotes.
//! Grammars are tried in a fixed order and the first structural match
//! wins:
//!
//! | Form              | Example     | Meaning                               |
//! |-------------------|-------------|---------------------------------------|
//! | `RR+`             | `66+`       | the pair and every higher pair        |
//! | `RR-RR`           | `33-22`     | every pair between, inclusive         |
//! | `RR`              | `55`        | one pair                              |
//! | `XY[s\|o]+`       | `A2s+`      | anchor X with kickers Y up to X-1     |
//! | `XY[s\|o]-XZ[s\|o]` | `K8s-K6s` | anchor X with kickers Y..Z inclusive  |
//! | `XY[s\|o]`        | `AKo`, `AK` | one hand; no suffix means both        |
//! | `RR-`, `XY[s\|o]-` | `99-`, `A9s-` | the hand and everything below it  |
//!
//! Parenthesized annotations such as `AKo(mixed)` are stripped first.
//! Anything that matches no grammar expands to nothing.

use rustc_hash::FxHashSet;

use super::card::Rank;
use super::hand::Hand;

/// Suitedness requested by a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Suitedness {
    Suited,
    Offsuit,
    Both,
}

impl Suitedness {
    fn from_suffix(c: Option<&char>) -> Option<Self> {
        match c.map(|c| c.to_ascii_lowercase()) {
            None => Some(Suitedness::Both),
            Some('s') => Some(Suitedness::Suited),
            Some('o') => Some(Suitedness::Offsuit),
            Some(_) => None,
        }
    }
}

/// A non-pair hand shape: anchor rank, kicker rank, suitedness.
#[derive(Debug, Clone, Copy)]
struct Unpaired {
    anchor: Rank,
    kicker: Rank,
    suitedness: Suitedness,
}

/// Expand one notation token into hand classes.
///
/// Never fails: malformed tokens produce an empty list.
pub fn parse(token: &str) -> Vec<Hand> {
    let cleaned = strip_annotations(token);
    let chars: Vec<char> = cleaned.trim().chars().collect();
    if chars.is_empty() {
        return Vec::new();
    }

    parse_pair_plus(&chars)
        .or_else(|| parse_pair_range(&chars))
        .or_else(|| parse_single_pair(&chars))
        .or_else(|| parse_kicker_plus(&chars))
        .or_else(|| parse_kicker_range(&chars))
        .or_else(|| parse_single_hand(&chars))
        .or_else(|| parse_and_below(&chars))
        .unwrap_or_default()
}

/// Expand a comma-separated list of tokens, dropping duplicates.
///
/// Hands come out in first-seen order.
pub fn parse_list(notation: &str) -> Vec<Hand> {
    let mut seen = FxHashSet::default();
    notation
        .split(',')
        .flat_map(parse)
        .filter(|hand| seen.insert(*hand))
        .collect()
}

/// Remove every `( ... )` segment. An unclosed `(` drops the rest.
fn strip_annotations(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut depth = 0usize;
    for c in token.chars() {
        match c {
            '(' => depth += 1,
            ')' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

/// "66" -> Some(6). Requires exactly two equal ranks.
fn pair_rank(chars: &[char]) -> Option<Rank> {
    match chars {
        [a, b] => {
            let rank = Rank::from_char(*a)?;
            (Rank::from_char(*b)? == rank).then_some(rank)
        }
        _ => None,
    }
}

/// "AKs" / "AKo" / "AK" -> anchor, kicker, suitedness. Ranks must differ.
fn unpaired(chars: &[char]) -> Option<Unpaired> {
    if chars.len() < 2 || chars.len() > 3 {
        return None;
    }
    let r1 = Rank::from_char(chars[0])?;
    let r2 = Rank::from_char(chars[1])?;
    if r1 == r2 {
        return None;
    }
    let suitedness = Suitedness::from_suffix(chars.get(2))?;
    Some(Unpaired { anchor: r1.higher(r2), kicker: r1.lower(r2), suitedness })
}

/// Split on a single interior '-' into (left, right).
fn split_dash(chars: &[char]) -> Option<(&[char], &[char])> {
    let pos = chars.iter().position(|&c| c == '-')?;
    let (left, right) = (&chars[..pos], &chars[pos + 1..]);
    if left.is_empty() || right.contains(&'-') {
        return None;
    }
    Some((left, right))
}

fn pairs(from: usize, to: usize) -> Vec<Hand> {
    Rank::span(from, to).map(Hand::pair).collect()
}

/// Every `anchor + kicker` hand for kicker indices in `from..=to`.
fn kickers(anchor: Rank, from: usize, to: usize, suitedness: Suitedness) -> Vec<Hand> {
    let mut hands = Vec::new();
    for kicker in Rank::span(from, to) {
        if kicker == anchor {
            continue;
        }
        if suitedness != Suitedness::Offsuit {
            hands.extend(Hand::unpaired(anchor, kicker, true));
        }
        if suitedness != Suitedness::Suited {
            hands.extend(Hand::unpaired(anchor, kicker, false));
        }
    }
    hands
}

/// `RR+`: the pair and every higher pair. "TT+" means TT, JJ, QQ, KK, AA.
fn parse_pair_plus(chars: &[char]) -> Option<Vec<Hand>> {
    let (last, body) = chars.split_last()?;
    if *last != '+' {
        return None;
    }
    let rank = pair_rank(body)?;
    Some(pairs(Rank::ACE.index(), rank.index()))
}

/// `RR-RR`: pairs between both ends, in either order.
fn parse_pair_range(chars: &[char]) -> Option<Vec<Hand>> {
    let (left, right) = split_dash(chars)?;
    let a = pair_rank(left)?;
    let b = pair_rank(right)?;
    Some(pairs(a.index().min(b.index()), a.index().max(b.index())))
}

/// `RR`: exactly one pair.
fn parse_single_pair(chars: &[char]) -> Option<Vec<Hand>> {
    pair_rank(chars).map(|rank| vec![Hand::pair(rank)])
}

/// `XY[s|o]+`: anchor X with every kicker from Y up to just below X.
///
/// "AQs+" means AQs, AKs. Offsuit-and-wider ("A7o+") shares this path.
fn parse_kicker_plus(chars: &[char]) -> Option<Vec<Hand>> {
    let (last, body) = chars.split_last()?;
    if *last != '+' {
        return None;
    }
    let hand = unpaired(body)?;
    Some(kickers(hand.anchor, hand.anchor.index() + 1, hand.kicker.index(), hand.suitedness))
}

/// `XY[s|o]-XZ[s|o]`: same anchor and suitedness on both ends.
fn parse_kicker_range(chars: &[char]) -> Option<Vec<Hand>> {
    let (left, right) = split_dash(chars)?;
    let start = unpaired(left)?;
    let end = unpaired(right)?;
    if start.anchor != end.anchor || start.suitedness != end.suitedness {
        return None;
    }
    let (from, to) = (
        start.kicker.index().min(end.kicker.index()),
        start.kicker.index().max(end.kicker.index()),
    );
    Some(kickers(start.anchor, from, to, start.suitedness))
}

/// `XY[s|o]`: a single hand, or both variants without a suffix.
///
/// Equal ranks ("AAs") read as the pair.
fn parse_single_hand(chars: &[char]) -> Option<Vec<Hand>> {
    if let [a, b, suffix] = chars {
        let rank = Rank::from_char(*a)?;
        if Rank::from_char(*b)? == rank {
            Suitedness::from_suffix(Some(suffix))?;
            return Some(vec![Hand::pair(rank)]);
        }
    }
    let hand = unpaired(chars)?;
    let index = hand.kicker.index();
    Some(kickers(hand.anchor, index, index, hand.suitedness))
}

/// `RR-` / `XY[s|o]-`: the hand and everything weaker in its line.
///
/// "99-" is 99 down to 22; "A9s-" is A9s down to A2s.
fn parse_and_below(chars: &[char]) -> Option<Vec<Hand>> {
    let (last, body) = chars.split_last()?;
    if *last != '-' {
        return None;
    }
    if let Some(rank) = pair_rank(body) {
        return Some(pairs(rank.index(), Rank::DEUCE.index()));
    }
    let hand = unpaired(body)?;
    Some(kickers(hand.anchor, hand.kicker.index(), Rank::DEUCE.index(), hand.suitedness))
}
