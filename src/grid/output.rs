//! Output formatting for strategy grids.

use std::fs::File;
use std::io::Write;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::builder::Grid;
use super::cell::{Action, ActionMix, GridCell};
use crate::range::card::RANK_CHARS;
use crate::range::hand::GRID_SIZE;

/// Combo-weighted action shares of a grid, in percent.
///
/// Tag cells count Raise/Mixed as raise and Call/Check as call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GridSummary {
    pub raise: f64,
    pub call: f64,
    pub fold: f64,
}

impl GridSummary {
    pub fn of(grid: &Grid) -> Self {
        let mut summary = Self::default();
        let mut combos = 0.0;
        for (hand, cell) in grid.iter() {
            let weight = hand.num_combos() as f64;
            let mix = match cell {
                GridCell::Mix(mix) => *mix,
                GridCell::Tag(_) => match cell.resolved_action() {
                    Action::Raise | Action::Mixed => ActionMix::from_raise(100.0),
                    Action::Call | Action::Check => ActionMix::from_split(0.0, 100.0),
                    Action::Fold => ActionMix::FOLD,
                },
            };
            summary.raise += mix.raise * weight;
            summary.call += mix.call * weight;
            summary.fold += mix.fold * weight;
            combos += weight;
        }
        summary.raise /= combos;
        summary.call /= combos;
        summary.fold /= combos;
        summary
    }
}

/// "Raise: 70%, Call: 0%, Fold: 30%"
pub fn breakdown(mix: &ActionMix) -> String {
    format!(
        "Raise: {}%, Call: {}%, Fold: {}%",
        mix.raise.round(),
        mix.call.round(),
        mix.fold.round()
    )
}

/// Short text for a cell: a percentage for mixes, a letter for tags.
fn cell_text(cell: &GridCell) -> String {
    match cell {
        GridCell::Mix(mix) if mix.is_pure_fold() => "-".to_string(),
        GridCell::Mix(mix) if mix.call > mix.raise => format!("c{}", mix.call.round()),
        GridCell::Mix(mix) => format!("{}", mix.raise.round()),
        GridCell::Tag(None) => "-".to_string(),
        GridCell::Tag(Some(Action::Check)) => "K".to_string(),
        GridCell::Tag(Some(action)) => action.label()[..1].to_string(),
    }
}

fn cell_color(cell: &GridCell) -> &'static str {
    match cell.resolved_action() {
        Action::Raise if !cell.is_mixed() => "\x1b[42m", // Green
        Action::Raise | Action::Mixed => "\x1b[43m",     // Yellow
        Action::Call => "\x1b[44m",                     // Blue
        Action::Check => "\x1b[45m",                    // Magenta
        Action::Fold if cell.has_play() => "\x1b[41m",   // Red
        Action::Fold => "",
    }
}

/// Render a grid as text with ANSI colors, optionally bracketing one cell.
pub fn render_text(grid: &Grid, highlight: Option<(usize, usize)>) -> String {
    let mut out = String::from("     ");
    for rank in RANK_CHARS {
        out.push_str(&format!("{:>5}", rank));
    }
    out.push('\n');

    for (row, cells) in grid.rows().iter().enumerate() {
        out.push_str(&format!("{:>2}   ", RANK_CHARS[row]));
        for (col, cell) in cells.iter().enumerate() {
            let text = if highlight == Some((row, col)) {
                format!("[{}]", cell_text(cell))
            } else {
                cell_text(cell)
            };
            let color = cell_color(cell);
            if color.is_empty() {
                out.push_str(&format!("{:>4} ", text));
            } else {
                out.push_str(&format!("{}{:>4}\x1b[0m ", color, text));
            }
        }
        out.push('\n');
    }
    out
}

/// Serializable grid for one scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridExport {
    pub category: String,
    pub scenario: String,
    pub summary: GridSummary,
    /// Cells indexed by hand name (e.g., "AA", "AKs")
    pub hands: FxHashMap<String, GridCell>,
    /// 13x13 grid for easy visualization
    pub grid: Grid,
}

impl GridExport {
    pub fn new(category: &str, scenario: &str, grid: Grid) -> Self {
        let hands = grid
            .iter()
            .map(|(hand, cell)| (hand.name().to_string(), *cell))
            .collect();
        Self {
            category: category.to_string(),
            scenario: scenario.to_string(),
            summary: GridSummary::of(&grid),
            hands,
            grid,
        }
    }
}

/// Complete export for one mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOutput {
    pub metadata: ReportMetadata,
    pub scenarios: Vec<GridExport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub mode: String,
    pub game_format: String,
    pub timestamp: String,
}

impl ReportOutput {
    pub fn new(mode: &str, game_format: &str) -> Self {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            metadata: ReportMetadata {
                mode: mode.to_string(),
                game_format: game_format.to_string(),
                timestamp: timestamp.to_string(),
            },
            scenarios: Vec::new(),
        }
    }

    pub fn add_scenario(&mut self, export: GridExport) {
        self.scenarios.push(export);
    }

    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    pub fn print_summary(&self) {
        println!("\n========================================");
        println!("  Range Report - {} ({})", self.metadata.mode, self.metadata.game_format);
        println!("========================================\n");

        for export in &self.scenarios {
            println!("=== [{}] {} ===", export.category, export.scenario);
            println!(
                "Raise: {:.1}% | Call: {:.1}% | Fold: {:.1}%\n",
                export.summary.raise, export.summary.call, export.summary.fold
            );
            println!("{}", render_text(&export.grid, None));
        }
    }
}

fn html_cell(cell: &GridCell) -> (&'static str, String, String) {
    match cell {
        GridCell::Mix(mix) => {
            let raise_stop = mix.raise.round();
            let call_stop = (mix.raise + mix.call).round();
            let style = format!(
                "background: linear-gradient(to right, #2ecc71 0% {r}%, #3498db {r}% {c}%, #444 {c}% 100%);",
                r = raise_stop,
                c = call_stop
            );
            let class = if mix.is_mixed() { "mixed" } else { "pure" };
            (class, style, breakdown(mix))
        }
        GridCell::Tag(tag) => {
            let class = tag.map_or("fold", |a| a.name());
            (class, String::new(), tag.map_or("Fold", |a| a.label()).to_string())
        }
    }
}

/// Generate an HTML chart page for a report.
pub fn generate_html(output: &ReportOutput) -> String {
    let mut html = String::from(r#"<!DOCTYPE html>
<html>
<head>
    <title>Preflop Ranges</title>
    <style>
        body { font-family: 'Segoe UI', Arial, sans-serif; background: #1a1a2e; color: #eee; padding: 20px; }
        .container { max-width: 1200px; margin: 0 auto; }
        h1 { text-align: center; color: #fff; }
        .metadata { text-align: center; color: #888; margin-bottom: 20px; }
        .scenario { margin-bottom: 40px; background: #252540; padding: 20px; border-radius: 10px; }
        .scenario h2 { margin: 0 0 15px 0; color: #fff; }
        .grid { display: grid; grid-template-columns: repeat(13, 1fr); gap: 2px; }
        .cell { aspect-ratio: 1; display: flex; align-items: center; justify-content: center; border-radius: 4px; font-size: 12px; font-weight: bold; color: white; }
        .raise { background: #2ecc71; }
        .mixed { background: #f1c40f; }
        .call { background: #3498db; }
        .check { background: #8e44ad; }
        .fold { background: #444; color: #888; }
    </style>
</head>
<body>
<div class="container">
    <h1>Preflop Ranges</h1>
    <div class="metadata">
"#);

    html.push_str(&format!("{} | {}", output.metadata.mode, output.metadata.game_format));
    html.push_str("</div>\n");

    for export in &output.scenarios {
        html.push_str(&format!(
            "    <div class=\"scenario\">\n        <h2>[{}] {}</h2>\n        <div class=\"grid\">\n",
            export.category, export.scenario
        ));
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let hand = crate::range::hand::grid_to_hand(row, col);
                let (class, style, title) = html_cell(export.grid.cell(row, col));
                html.push_str(&format!(
                    "            <div class=\"cell {}\" style=\"{}\" title=\"{}: {}\">{}</div>\n",
                    class, style, hand, title, hand
                ));
            }
        }
        html.push_str("        </div>\n    </div>\n");
    }

    html.push_str("</div>\n</body>\n</html>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::builder::{BucketEntry, Buckets, HandFrequencies, HandFrequency};

    #[test]
    fn test_breakdown() {
        let mix = ActionMix::from_raise(70.0);
        assert_eq!(breakdown(&mix), "Raise: 70%, Call: 0%, Fold: 30%");
    }

    #[test]
    fn test_summary_all_fold() {
        let summary = GridSummary::of(&Grid::all_fold());
        assert_eq!(summary.raise, 0.0);
        assert_eq!(summary.fold, 100.0);
    }

    #[test]
    fn test_summary_combo_weighted() {
        let mut ranges = HandFrequencies::new();
        ranges.insert("AA".to_string(), HandFrequency::Single(100.0));
        let summary = GridSummary::of(&Grid::from_frequencies(&ranges, true));
        assert!((summary.raise - 600.0 / 1326.0).abs() < 1e-9);

        let mut buckets = Buckets::new();
        buckets.insert("call".to_string(), BucketEntry::Tokens(vec!["AKs".to_string()]));
        let summary = GridSummary::of(&Grid::from_buckets(&buckets));
        assert!((summary.call - 400.0 / 1326.0).abs() < 1e-9);
    }

    #[test]
    fn test_check_and_call_render_differently() {
        let call = GridCell::Tag(Some(Action::Call));
        let check = GridCell::Tag(Some(Action::Check));
        assert_eq!(cell_text(&call), "C");
        assert_eq!(cell_text(&check), "K");
        assert_eq!(Action::parse(&cell_text(&check)), Some(Action::Check));
        assert_ne!(cell_color(&call), cell_color(&check));
        assert_eq!(cell_text(&GridCell::Tag(Some(Action::Mixed))), "M");
    }

    #[test]
    fn test_render_text_shape() {
        let text = render_text(&Grid::all_fold(), Some((0, 0)));
        assert_eq!(text.lines().count(), 14);
        assert!(text.contains("[-]"));
    }

    #[test]
    fn test_export_has_every_hand() {
        let export = GridExport::new("rfi", "UTG RFI", Grid::all_fold());
        assert_eq!(export.hands.len(), 169);
        let json = serde_json::to_string(&export).unwrap();
        let back: GridExport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.grid, export.grid);
    }

    #[test]
    fn test_html_lists_scenarios() {
        let mut output = ReportOutput::new("cash", "6-Max Cash");
        output.add_scenario(GridExport::new("rfi", "UTG RFI", Grid::all_fold()));
        let html = generate_html(&output);
        assert!(html.contains("UTG RFI"));
        assert_eq!(html.matches("class=\"cell ").count(), 169);
    }
}
