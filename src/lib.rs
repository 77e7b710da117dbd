//! # GTO Range Trainer
//!
//! Preflop range drills for 6-max cash games. Scenario ranges are loaded
//! from JSON, expanded into 13x13 strategy grids, and quizzed one hand at
//! a time with graded feedback.
//!
//! ## Features
//!
//! - **Range Notation**: "66+", "K8s-K6s", "A2s+", "99-" and friends
//! - **Combo Aggregation**: per-combo frequencies averaged into hand classes
//! - **Two Grid Modes**: exact raise/call/fold percentages or action tags
//! - **Borderline Drills**: sample mixed cells and the edges of a range
//! - **Offline Converter**: range text dumps to loadable scenario data
//!
//! ## Quick Start
//!
//! ```ignore
//! use gto_range_trainer::{Action, QuizSession, ScenarioPick, TrainerConfig, TrainerData};
//!
//! let config = TrainerConfig::default().with_borderline(true);
//! let data = TrainerData::from_json_file(&config.data_path)?;
//! let mut quiz = QuizSession::new(&config);
//!
//! if let Some(round) = quiz.start_round(&data, ScenarioPick::Random) {
//!     println!("{} {}", round.situation, round.hand.name());
//! }
//! let outcome = quiz.submit(Action::Raise);
//! ```
//!
//! ## Modules
//!
//! - [`range`]: hands, grid mapping, notation parser, combo aggregation
//! - [`grid`]: grid cells, grid builder, text/JSON/HTML output
//! - [`data`]: scenario data model, loader, range text converter
//! - [`quiz`]: grading and quiz sessions
//! - [`config`]: trainer configuration
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   convert   ┌──────────────────────────────┐
//! │  range text  │ ──────────▶ │  TrainerData (mode → book)   │
//! └──────────────┘             └──────────────────────────────┘
//!                                             │ scenario record
//!                                             ▼
//!         ┌─────────────────────┬─────────────────────┐
//!         │ ranges              │ range_summary       │ nothing
//!         ▼                     ▼                     ▼
//!   ┌───────────┐        ┌─────────────┐        ┌──────────┐
//!   │ frequency │        │  tag grid   │        │ all fold │
//!   │   grid    │        │ (notation)  │        │   grid   │
//!   └───────────┘        └─────────────┘        └──────────┘
//!         └─────────────────────┼─────────────────────┘
//!                               ▼
//!                      ┌─────────────────┐
//!                      │   QuizSession   │  sample → grade → score
//!                      └─────────────────┘
//! ```

#![warn(missing_docs)]

/// Hand classes, range notation and combo aggregation.
pub mod range;

/// Strategy grids and their rendering.
pub mod grid;

/// Scenario data loading and conversion.
pub mod data;

/// Quiz grading and session state.
pub mod quiz;

/// Trainer configuration.
pub mod config;

// Re-export commonly used types at crate root for convenience
pub use config::{ConfigError, TrainerConfig};
pub use data::{Category, DataError, RangeBook, ScenarioRecord, TrainerData};
pub use grid::{Action, ActionMix, Grid, GridCell};
pub use quiz::{Grade, Outcome, QuizSession, ScenarioPick, Score};
pub use range::{grid_to_hand, hand_to_grid, Hand};
