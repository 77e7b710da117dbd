//! Per-combo frequency extraction and aggregation.
//!
//! Source lines list specific combos, optionally weighted:
//!
//! ```text
//! AhAd, AsAc, [50]KhKd, KsKc[/50], QhQd
//! ```
//!
//! Bracketed segments `[freq]a, b, c[/freq]` assign `freq` to each combo
//! they contain. Remaining comma-separated tokens default to 100%.
//!
//! Aggregation averages over the *maximum* combo count of each hand
//! class (6 pairs, 4 suited, 12 offsuit). Combos that are never listed
//! count as 0%.

use rustc_hash::FxHashMap;
use tracing::debug;

use super::card::Combo;
use super::hand::Hand;

/// Frequency assigned to bare (unbracketed) combos.
pub const DEFAULT_FREQUENCY: f64 = 100.0;

/// Extract combo -> frequency from one source line.
///
/// Parseable combos are keyed by their canonical spelling so that "AdAh"
/// and "AhAd" collapse to one entry. Within brackets a later segment
/// overrides an earlier one; bare tokens never override.
pub fn extract_frequencies(line: &str) -> FxHashMap<String, f64> {
    let mut combos = FxHashMap::default();
    let mut remaining = String::with_capacity(line.len());
    let mut rest = line;

    while let Some(open) = rest.find('[') {
        match bracket_segment(&rest[open..]) {
            Some((freq, body, consumed)) => {
                remaining.push_str(&rest[..open]);
                for token in body.split(',').map(str::trim).filter(|t| !t.is_empty()) {
                    combos.insert(combo_key(token), freq);
                }
                rest = &rest[open + consumed..];
            }
            None => {
                remaining.push_str(&rest[..=open]);
                rest = &rest[open + 1..];
            }
        }
    }
    remaining.push_str(rest);

    for token in remaining.split(',').map(str::trim) {
        if token.len() < 2 {
            continue;
        }
        combos.entry(combo_key(token)).or_insert(DEFAULT_FREQUENCY);
    }

    combos
}

/// Match `[freq]body[/freq]` at the start of `s`.
///
/// Returns the frequency, the body, and the number of bytes consumed.
fn bracket_segment(s: &str) -> Option<(f64, &str, usize)> {
    let close = s.find(']')?;
    let freq_text = &s[1..close];
    if freq_text.is_empty() || !freq_text.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    let freq: f64 = freq_text.parse().ok()?;

    let end_tag = format!("[/{}]", freq_text);
    let body_start = close + 1;
    let body_len = s[body_start..].find(&end_tag)?;
    let body = &s[body_start..body_start + body_len];
    Some((freq, body, body_start + body_len + end_tag.len()))
}

fn combo_key(token: &str) -> String {
    Combo::parse(token)
        .map(|c| c.to_string())
        .unwrap_or_else(|| token.to_string())
}

/// Aggregate combo frequencies into per-hand frequencies.
///
/// Each hand's value is the sum over its listed combos divided by the
/// hand's maximum combo count. Strings that are not combos are skipped.
pub fn aggregate<'a, I>(combos: I) -> FxHashMap<Hand, f64>
where
    I: IntoIterator<Item = (&'a String, &'a f64)>,
{
    let mut totals: FxHashMap<Hand, f64> = FxHashMap::default();

    for (combo, &freq) in combos {
        match Combo::parse(combo) {
            Some(c) => *totals.entry(c.hand()).or_insert(0.0) += freq,
            None => debug!(combo = %combo, "skipping unparseable combo"),
        }
    }

    for (hand, total) in totals.iter_mut() {
        *total /= hand.num_combos() as f64;
    }
    totals
}

/// Extract and aggregate a source line in one step.
pub fn aggregate_line(line: &str) -> FxHashMap<Hand, f64> {
    aggregate(&extract_frequencies(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(name: &str) -> Hand {
        Hand::parse(name).unwrap()
    }

    #[test]
    fn test_average_over_max_combos() {
        let mut combos = FxHashMap::default();
        combos.insert("AhAd".to_string(), 100.0);
        combos.insert("AsAc".to_string(), 50.0);

        let hands = aggregate(&combos);
        assert_eq!(hands.len(), 1);
        assert!((hands[&hand("AA")] - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_suited_and_offsuit_divisors() {
        let mut combos = FxHashMap::default();
        combos.insert("AhKh".to_string(), 100.0);
        combos.insert("AhKd".to_string(), 60.0);

        let hands = aggregate(&combos);
        assert!((hands[&hand("AKs")] - 25.0).abs() < 1e-9);
        assert!((hands[&hand("AKo")] - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_full_class_is_hundred() {
        let line = "AhAd, AhAs, AhAc, AdAs, AdAc, AsAc";
        let hands = aggregate_line(line);
        assert!((hands[&hand("AA")] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_extract_brackets_and_bare() {
        let combos = extract_frequencies("AhAd, [50]KhKd, KsKc[/50], QhQd");
        assert_eq!(combos.len(), 4);
        assert_eq!(combos["AhAd"], 100.0);
        assert_eq!(combos["KhKd"], 50.0);
        assert_eq!(combos["KsKc"], 50.0);
        assert_eq!(combos["QhQd"], 100.0);
    }

    #[test]
    fn test_extract_bare_does_not_override() {
        let combos = extract_frequencies("[25.5]AhAd[/25.5], AdAh");
        assert_eq!(combos.len(), 1);
        assert_eq!(combos["AhAd"], 25.5);
    }

    #[test]
    fn test_extract_multiple_brackets() {
        let combos = extract_frequencies("[30]AhKh[/30],[70]AsKs, AdKd[/70]");
        assert_eq!(combos["AhKh"], 30.0);
        assert_eq!(combos["AsKs"], 70.0);
        assert_eq!(combos["AdKd"], 70.0);
    }

    #[test]
    fn test_unclosed_bracket_is_plain_text() {
        let combos = extract_frequencies("[50]AhAd, KhKd");
        // No closing tag: both tokens are treated as bare text.
        assert_eq!(combos.get("KhKd"), Some(&100.0));
        assert!(!combos.contains_key("AhAd"));

        let hands = aggregate(&combos);
        assert_eq!(hands.len(), 1);
    }

    #[test]
    fn test_garbage_is_skipped() {
        let hands = aggregate_line("hello, AhAh, AhAd, x");
        assert_eq!(hands.len(), 1);
        assert!((hands[&hand("AA")] - 100.0 / 6.0).abs() < 1e-9);
    }
}
