//! Answer grading.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grid::{Action, ActionMix, GridCell};

/// Result of one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    /// A best response (possibly tied).
    Excellent,
    /// A nonzero-frequency minority action.
    Good,
    /// A 0% action, or the wrong tag.
    Wrong,
}

impl Grade {
    /// Score mark: ◎, ◯ or ✕.
    pub fn mark(&self) -> &'static str {
        match self {
            Grade::Excellent => "◎",
            Grade::Good => "◯",
            Grade::Wrong => "✕",
        }
    }

    /// Counts as a correct answer for accuracy.
    pub fn is_correct(&self) -> bool {
        !matches!(self, Grade::Wrong)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Grade::Excellent => "excellent",
            Grade::Good => "good",
            Grade::Wrong => "wrong",
        };
        f.write_str(name)
    }
}

/// Grade against percentages.
///
/// Matching the maximum (and above 0) is excellent; any other nonzero
/// share is good; 0% is wrong.
pub fn grade_mix(mix: &ActionMix, answer: Action) -> Grade {
    let chosen = mix.frequency(answer);
    if chosen == mix.max_frequency() && chosen > 0.0 {
        Grade::Excellent
    } else if chosen > 0.0 {
        Grade::Good
    } else {
        Grade::Wrong
    }
}

/// Grade any cell. Tag cells are right only on an exact match.
pub fn grade_cell(cell: &GridCell, answer: Action) -> Grade {
    match cell {
        GridCell::Mix(mix) => grade_mix(mix, answer),
        GridCell::Tag(_) if cell.resolved_action() == answer => Grade::Excellent,
        GridCell::Tag(_) => Grade::Wrong,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_mixed_cell() {
        let mix = ActionMix { raise: 70.0, call: 0.0, fold: 30.0 };
        assert_eq!(grade_mix(&mix, Action::Raise), Grade::Excellent);
        assert_eq!(grade_mix(&mix, Action::Fold), Grade::Good);
        assert_eq!(grade_mix(&mix, Action::Call), Grade::Wrong);
        assert_eq!(grade_mix(&mix, Action::Check), Grade::Wrong);
    }

    #[test]
    fn test_grade_pure_fold() {
        assert_eq!(grade_mix(&ActionMix::FOLD, Action::Raise), Grade::Wrong);
        assert_eq!(grade_mix(&ActionMix::FOLD, Action::Fold), Grade::Excellent);
    }

    #[test]
    fn test_tie_is_excellent_for_both() {
        let mix = ActionMix { raise: 50.0, call: 0.0, fold: 50.0 };
        assert_eq!(grade_mix(&mix, Action::Raise), Grade::Excellent);
        assert_eq!(grade_mix(&mix, Action::Fold), Grade::Excellent);
    }

    #[test]
    fn test_grade_tags() {
        let raise = GridCell::Tag(Some(Action::Raise));
        assert_eq!(grade_cell(&raise, Action::Raise), Grade::Excellent);
        assert_eq!(grade_cell(&raise, Action::Mixed), Grade::Wrong);

        let unassigned = GridCell::Tag(None);
        assert_eq!(grade_cell(&unassigned, Action::Fold), Grade::Excellent);
        assert_eq!(grade_cell(&unassigned, Action::Check), Grade::Wrong);
    }

    #[test]
    fn test_marks() {
        assert_eq!(Grade::Excellent.mark(), "◎");
        assert!(Grade::Good.is_correct());
        assert!(!Grade::Wrong.is_correct());
    }
}
