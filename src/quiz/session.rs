//! Quiz session state.
//!
//! A session draws one hand from one scenario grid per round, grades the
//! answer, and keeps a running score. Rounds are owned by the session;
//! a new round replaces the previous one.

use std::fmt;

use rand::prelude::*;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::config::TrainerConfig;
use crate::data::{Category, TrainerData};
use crate::grid::{breakdown, Action, Grid, GridCell};
use crate::range::{Hand, GRID_SIZE};

use super::grade::{grade_cell, Grade};

/// Which scenario a new round draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioPick {
    /// Uniformly from the current category.
    Random,
    /// A fixed index into the category's scenario list.
    Index(usize),
}

/// Whether the current round still accepts an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    /// Waiting for the player.
    AwaitingAnswer,
    /// Answered; further submissions are ignored.
    Graded(Grade),
}

/// One question: a hand in a scenario.
#[derive(Debug, Clone)]
pub struct Round {
    pub category: Category,
    pub scenario_index: usize,
    pub label: String,
    pub situation: String,
    pub grid: Grid,
    pub row: usize,
    pub col: usize,
    pub hand: Hand,
    pub cell: GridCell,
    pub correct_action: Action,
    pub state: RoundState,
}

impl Round {
    pub fn is_graded(&self) -> bool {
        matches!(self.state, RoundState::Graded(_))
    }

    /// Buttons to offer: three for percentage grids, five for tag grids.
    pub fn answer_options(&self) -> &'static [Action] {
        self.cell.answer_options()
    }
}

/// Feedback for one graded answer.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub grade: Grade,
    pub answer: Action,
    pub correct_action: Action,
    pub cell: GridCell,
}

impl Outcome {
    /// Player-facing feedback line.
    pub fn message(&self) -> String {
        match &self.cell {
            GridCell::Mix(mix) => {
                let detail = breakdown(mix);
                match self.grade {
                    Grade::Excellent => format!("◎ Correct! (best response) {}", detail),
                    Grade::Good => format!("◯ Minority action of a mixed strategy! {}", detail),
                    Grade::Wrong => {
                        format!("✕ Wrong. This action has 0% frequency. ({})", detail)
                    }
                }
            }
            GridCell::Tag(_) => match self.grade {
                Grade::Wrong => format!("✕ Wrong. Correct action: {}", self.correct_action.label()),
                _ => format!("◎ Correct! ({})", self.correct_action.label()),
            },
        }
    }
}

/// Running tally across rounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub excellent: u32,
    pub good: u32,
    pub wrong: u32,
    pub total: u32,
}

impl Score {
    pub fn record(&mut self, grade: Grade) {
        match grade {
            Grade::Excellent => self.excellent += 1,
            Grade::Good => self.good += 1,
            Grade::Wrong => self.wrong += 1,
        }
        self.total += 1;
    }

    /// Rounded percentage of excellent plus good answers. 0 before any round.
    pub fn accuracy(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        let correct = (self.excellent + self.good) as f64;
        (correct / self.total as f64 * 100.0).round() as u32
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "◎ {} / ◯ {} / ✕ {} ({}%, {} answered)",
            self.excellent,
            self.good,
            self.wrong,
            self.accuracy(),
            self.total
        )
    }
}

/// Interactive quiz state.
pub struct QuizSession {
    mode: String,
    category: Category,
    borderline: bool,
    rng: StdRng,
    score: Score,
    round: Option<Round>,
}

impl QuizSession {
    pub fn new(config: &TrainerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            mode: config.mode.clone(),
            category: config.category,
            borderline: config.borderline,
            rng,
            score: Score::default(),
            round: None,
        }
    }

    /// Draw a new round.
    ///
    /// Returns `None` and keeps the previous round when the category has
    /// no scenarios or the index is out of range.
    pub fn start_round(&mut self, data: &TrainerData, pick: ScenarioPick) -> Option<&Round> {
        let scenarios = data.scenarios(&self.mode, self.category);
        if scenarios.is_empty() {
            tracing::warn!(mode = %self.mode, category = %self.category, "no scenarios available");
            return None;
        }
        let index = match pick {
            ScenarioPick::Random => self.rng.gen_range(0..scenarios.len()),
            ScenarioPick::Index(i) if i < scenarios.len() => i,
            ScenarioPick::Index(i) => {
                tracing::warn!(index = i, available = scenarios.len(), "scenario index out of range");
                return None;
            }
        };

        let record = &scenarios[index];
        let grid = record.build_grid(self.category);
        let (row, col) = self.pick_cell(&grid);
        let cell = *grid.cell(row, col);
        let hand = Hand::from_grid(row, col);
        tracing::debug!(hand = hand.name(), scenario = index, "round started");

        self.round = Some(Round {
            category: self.category,
            scenario_index: index,
            label: record.label(self.category),
            situation: record.situation(self.category),
            correct_action: cell.resolved_action(),
            grid,
            row,
            col,
            hand,
            cell,
            state: RoundState::AwaitingAnswer,
        });
        self.round.as_ref()
    }

    fn pick_cell(&mut self, grid: &Grid) -> (usize, usize) {
        if self.borderline {
            let candidates = grid.borderline_cells();
            if let Some(&cell) = candidates.choose(&mut self.rng) {
                return cell;
            }
        }
        (self.rng.gen_range(0..GRID_SIZE), self.rng.gen_range(0..GRID_SIZE))
    }

    /// Grade an answer for the current round.
    ///
    /// Only the first answer of a round counts; later calls return `None`.
    pub fn submit(&mut self, answer: Action) -> Option<Outcome> {
        let round = self.round.as_mut()?;
        if round.is_graded() {
            return None;
        }
        let grade = grade_cell(&round.cell, answer);
        round.state = RoundState::Graded(grade);
        self.score.record(grade);
        Some(Outcome {
            grade,
            answer,
            correct_action: round.correct_action,
            cell: round.cell,
        })
    }

    pub fn reset_score(&mut self) {
        self.score = Score::default();
    }

    /// Switch data mode. Takes effect on the next round.
    pub fn set_mode(&mut self, mode: &str) {
        self.mode = mode.to_string();
    }

    /// Switch category. Takes effect on the next round.
    pub fn set_category(&mut self, category: Category) {
        self.category = category;
    }

    pub fn set_borderline(&mut self, enable: bool) {
        self.borderline = enable;
    }

    pub fn mode(&self) -> &str {
        &self.mode
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn borderline(&self) -> bool {
        self.borderline
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }
}
