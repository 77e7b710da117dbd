//! Grid cell contents.
//!
//! A cell is either an exact `{raise, call, fold}` percentage triple or a
//! single discrete action tag. Both live in one `GridCell` enum so every
//! consumer handles both shapes.

use serde::{Deserialize, Serialize};

/// A discrete preflop action.
///
/// Used both as a tag-mode cell value and as a quiz answer. 3bets and
/// 4bets are raises; bluff re-raises are `Mixed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Raise (open, 3bet, 4bet, iso-raise for value).
    Raise,
    /// Mixed raise / bluff re-raise.
    Mixed,
    /// Call.
    Call,
    /// Check (BB option after a limp).
    Check,
    /// Fold.
    Fold,
}

impl Action {
    /// Conflict priority when a hand is claimed by several buckets.
    ///
    /// Raise (5) > Mixed (4) > Call (3) > Check (2) > Fold (1).
    /// Unassigned cells rank 0.
    pub fn priority(&self) -> u8 {
        match self {
            Action::Raise => 5,
            Action::Mixed => 4,
            Action::Call => 3,
            Action::Check => 2,
            Action::Fold => 1,
        }
    }

    /// Lowercase identifier.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Raise => "raise",
            Action::Mixed => "mixed",
            Action::Call => "call",
            Action::Check => "check",
            Action::Fold => "fold",
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Action::Raise => "Raise",
            Action::Mixed => "Mixed",
            Action::Call => "Call",
            Action::Check => "Check",
            Action::Fold => "Fold",
        }
    }

    /// Parse a name or its first letter ("raise", "R", "k" for check).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raise" | "r" => Some(Action::Raise),
            "mixed" | "m" => Some(Action::Mixed),
            "call" | "c" => Some(Action::Call),
            "check" | "k" => Some(Action::Check),
            "fold" | "f" => Some(Action::Fold),
            _ => None,
        }
    }

    /// Action a named strategy bucket asserts for its hands.
    ///
    /// Known bucket names map directly; anything else is classified by
    /// keyword. Returns `None` for non-strategy entries such as "notes".
    pub fn from_bucket(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        match name.as_str() {
            "pure_raise" | "raise" | "3bet_value" | "3bet_range" | "4bet_value" | "4bet"
            | "iso_raise_value" | "raise_range" => Some(Action::Raise),
            "mixed_raise" | "mixed" | "3bet_bluff" | "4bet_bluff" | "iso_raise_bluff" => {
                Some(Action::Mixed)
            }
            "pure_call" | "call_range" | "call" => Some(Action::Call),
            "check_range" | "check" => Some(Action::Check),
            "fold" | "fold_range" => Some(Action::Fold),
            other => {
                if other.contains("bluff") || other.contains("mixed") {
                    Some(Action::Mixed)
                } else if other.contains("call") {
                    Some(Action::Call)
                } else if other.contains("check") {
                    Some(Action::Check)
                } else if other.contains("fold") {
                    Some(Action::Fold)
                } else if other.contains("raise") || other.contains("bet") || other.contains("value") {
                    Some(Action::Raise)
                } else {
                    None
                }
            }
        }
    }
}

/// Percentages for raise, call and fold. Always sums to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionMix {
    /// Raise percentage.
    pub raise: f64,
    /// Call percentage.
    pub call: f64,
    /// Fold percentage.
    pub fold: f64,
}

impl Default for ActionMix {
    fn default() -> Self {
        Self::FOLD
    }
}

impl ActionMix {
    /// Pure fold.
    pub const FOLD: ActionMix = ActionMix { raise: 0.0, call: 0.0, fold: 100.0 };

    /// Raise/call split with fold as the complement.
    ///
    /// Raise is clamped to [0, 100] and call to what is left, so the
    /// triple always sums to 100 with every value in range.
    pub fn from_split(raise: f64, call: f64) -> Self {
        let raise = clamp_pct(raise);
        let call = clamp_pct(call).min(100.0 - raise);
        Self { raise, call, fold: (100.0 - raise - call).max(0.0) }
    }

    /// Single-action (raise-or-fold) cell.
    pub fn from_raise(raise: f64) -> Self {
        Self::from_split(raise, 0.0)
    }

    /// Percentage for an action. Mixed and Check have no percentage here.
    pub fn frequency(&self, action: Action) -> f64 {
        match action {
            Action::Raise => self.raise,
            Action::Call => self.call,
            Action::Fold => self.fold,
            Action::Mixed | Action::Check => 0.0,
        }
    }

    /// Largest of the three percentages.
    pub fn max_frequency(&self) -> f64 {
        self.raise.max(self.call).max(self.fold)
    }

    /// Action with the highest percentage.
    ///
    /// The running maximum starts at fold; raise and then call only take
    /// over when strictly greater. Fold wins three-way ties and raise
    /// wins a raise/call tie.
    pub fn best_action(&self) -> Action {
        let mut best = Action::Fold;
        let mut max = self.fold;
        if self.raise > max {
            max = self.raise;
            best = Action::Raise;
        }
        if self.call > max {
            best = Action::Call;
        }
        best
    }

    /// True if any action is strictly between 0 and 100.
    pub fn is_mixed(&self) -> bool {
        [self.raise, self.call, self.fold]
            .iter()
            .any(|&v| v > 0.0 && v < 100.0)
    }

    /// True for a 100% fold.
    pub fn is_pure_fold(&self) -> bool {
        self.fold >= 100.0
    }

    /// True if the hand is ever raised or called.
    pub fn has_play(&self) -> bool {
        self.raise > 0.0 || self.call > 0.0
    }
}

fn clamp_pct(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 100.0) }
}

/// Content of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridCell {
    /// Exact percentages.
    Mix(ActionMix),
    /// A discrete tag; `None` is unassigned and reads as fold.
    Tag(Option<Action>),
}

impl GridCell {
    /// Answer choices offered for this kind of cell.
    pub fn answer_options(&self) -> &'static [Action] {
        match self {
            GridCell::Mix(_) => &[Action::Raise, Action::Call, Action::Fold],
            GridCell::Tag(_) => &[Action::Raise, Action::Mixed, Action::Call, Action::Check, Action::Fold],
        }
    }

    /// The single correct action for this cell.
    pub fn resolved_action(&self) -> Action {
        match self {
            GridCell::Mix(mix) => mix.best_action(),
            GridCell::Tag(tag) => tag.unwrap_or(Action::Fold),
        }
    }

    /// Percentages, if this is a frequency cell.
    pub fn mix(&self) -> Option<&ActionMix> {
        match self {
            GridCell::Mix(mix) => Some(mix),
            GridCell::Tag(_) => None,
        }
    }

    /// Mixed strategy: a split percentage cell, or a `Mixed` tag.
    pub fn is_mixed(&self) -> bool {
        match self {
            GridCell::Mix(mix) => mix.is_mixed(),
            GridCell::Tag(tag) => *tag == Some(Action::Mixed),
        }
    }

    /// Always folded: 100% fold, or a tag that resolves to fold.
    pub fn is_pure_fold(&self) -> bool {
        match self {
            GridCell::Mix(mix) => mix.is_pure_fold(),
            GridCell::Tag(_) => self.resolved_action() == Action::Fold,
        }
    }

    /// Ever played: nonzero raise or call, or a non-fold tag.
    pub fn has_play(&self) -> bool {
        match self {
            GridCell::Mix(mix) => mix.has_play(),
            GridCell::Tag(_) => self.resolved_action() != Action::Fold,
        }
    }

    /// Tag-mode claim: keep whichever action has the higher priority.
    pub fn claim(&mut self, action: Action) {
        if let GridCell::Tag(tag) = self {
            let current = tag.map_or(0, |t| t.priority());
            if action.priority() > current {
                *tag = Some(action);
            }
        }
    }
}
