//! Strategy grids.
//!
//! ## Modules
//!
//! - `cell`: action tags, percentage triples and the shared cell type
//! - `builder`: frequency-mode and tag-mode grid construction, borderline cells
//! - `output`: text grid, JSON export and HTML chart

pub mod cell;
pub mod builder;
pub mod output;

// Re-export commonly used types
pub use cell::{Action, ActionMix, GridCell};
pub use builder::{BucketEntry, Buckets, Grid, GridInput, HandFrequencies, HandFrequency};
pub use output::{breakdown, generate_html, render_text, GridExport, GridSummary, ReportOutput};
