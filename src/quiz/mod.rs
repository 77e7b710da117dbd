//! Quiz grading and session flow.

pub mod grade;
pub mod session;

pub use grade::{grade_cell, grade_mix, Grade};
pub use session::{Outcome, QuizSession, Round, RoundState, ScenarioPick, Score};
