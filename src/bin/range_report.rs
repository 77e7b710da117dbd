//! Range report.
//!
//! Builds every scenario grid of one data mode and exports them as JSON
//! and an HTML chart.
//!
//! Usage: range_report [--data FILE] [--mode NAME] [--output PREFIX] [--quiet]

use std::env;
use std::fs::File;
use std::io::{self, Write};
use std::process;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

use gto_range_trainer::config::DEFAULT_DATA_PATH;
use gto_range_trainer::data::{Category, TrainerData, DEFAULT_MODE};
use gto_range_trainer::grid::{generate_html, GridExport, ReportOutput};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    let mut data_path = DEFAULT_DATA_PATH.to_string();
    let mut mode = DEFAULT_MODE.to_string();
    let mut output_prefix = "range_report".to_string();
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--data" | "-d" => {
                i += 1;
                if i < args.len() {
                    data_path = args[i].clone();
                }
            }
            "--mode" | "-m" => {
                i += 1;
                if i < args.len() {
                    mode = args[i].clone();
                }
            }
            "--output" | "-o" => {
                i += 1;
                if i < args.len() {
                    output_prefix = args[i].clone();
                }
            }
            "--quiet" | "-q" => {
                quiet = true;
            }
            "--help" | "-h" => {
                print_help();
                return;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_help();
                process::exit(2);
            }
        }
        i += 1;
    }

    let data = match TrainerData::from_json_file(&data_path) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Error loading data: {}", e);
            process::exit(1);
        }
    };
    let Some(book) = data.mode(&mode) else {
        let modes: Vec<&str> = data.mode_names().collect();
        eprintln!("Unknown mode: {} (available: {})", mode, modes.join(", "));
        process::exit(1);
    };

    println!("=== Range Report ===\n");
    let start = Instant::now();

    let jobs: Vec<_> = Category::all()
        .iter()
        .flat_map(|category| book.scenarios(*category).iter().map(move |record| (*category, record)))
        .collect();
    println!("Building {} grids...", jobs.len());

    let pb = ProgressBar::new(jobs.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} grids")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    // par_iter preserves input order on collect
    let exports: Vec<GridExport> = jobs
        .par_iter()
        .map(|(category, record)| {
            let grid = record.build_grid(*category);
            pb.inc(1);
            GridExport::new(category.name(), &record.label(*category), grid)
        })
        .collect();
    pb.finish_and_clear();

    let mut output = ReportOutput::new(&mode, book.game_format().unwrap_or("unknown"));
    for export in exports {
        output.add_scenario(export);
    }

    println!("Built {} grids in {:.2}s", output.scenarios.len(), start.elapsed().as_secs_f64());

    let json_path = format!("{}.json", output_prefix);
    match output.save_json(&json_path) {
        Ok(_) => println!("Saved JSON: {}", json_path),
        Err(e) => eprintln!("Error saving JSON: {}", e),
    }

    let html_path = format!("{}.html", output_prefix);
    let html = generate_html(&output);
    match File::create(&html_path).and_then(|mut f| f.write_all(html.as_bytes())) {
        Ok(_) => println!("Saved HTML: {}", html_path),
        Err(e) => eprintln!("Error saving HTML: {}", e),
    }

    if !quiet {
        output.print_summary();
    }
}

fn print_help() {
    println!("Range Report");
    println!();
    println!("Usage: range_report [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -d, --data <FILE>        Range data file (default: data/range_data.json)");
    println!("  -m, --mode <NAME>        Data mode (default: cash)");
    println!("  -o, --output <PREFIX>    Output prefix for .json and .html (default: range_report)");
    println!("  -q, --quiet              Skip printing the grids");
    println!("  -h, --help               Show this help");
}
