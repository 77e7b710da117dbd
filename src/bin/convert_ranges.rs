//! Range text converter.
//!
//! Turns a line-oriented range dump into scenario data the trainer loads.
//!
//! Usage: convert_ranges --input ranges.txt [--json OUT] [--js OUT]

use std::env;
use std::fs;
use std::io;
use std::process;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use gto_range_trainer::data::{to_json, to_script, Category, DataError, RangeConverter};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    let mut input: Option<String> = None;
    let mut json_path = "range_data.json".to_string();
    let mut js_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--input" | "-i" => {
                i += 1;
                if i < args.len() {
                    input = Some(args[i].clone());
                }
            }
            "--json" | "-o" => {
                i += 1;
                if i < args.len() {
                    json_path = args[i].clone();
                }
            }
            "--js" => {
                i += 1;
                if i < args.len() {
                    js_path = Some(args[i].clone());
                }
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

    let Some(input) = input else {
        eprintln!("Missing --input");
        print_help();
        process::exit(2);
    };

    let text = match fs::read_to_string(&input) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error reading {}: {}", input, e);
            process::exit(1);
        }
    };

    println!("=== Range Converter ===\n");
    let start = Instant::now();

    let lines: Vec<&str> = text.lines().collect();
    let pb = ProgressBar::new(lines.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} lines")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut converter = RangeConverter::new();
    for line in lines {
        converter.feed_line(line);
        pb.inc(1);
    }
    pb.finish_and_clear();

    let data_lines = converter.data_lines();
    let book = converter.finish();

    println!("Data lines: {}", data_lines);
    for category in Category::all() {
        let count = book.scenarios(*category).len();
        if count > 0 {
            println!("  {:<12} {} scenarios", category.name(), count);
        }
    }

    match to_json(&book).and_then(|json| fs::write(&json_path, json).map_err(|e| io_error(&json_path, e))) {
        Ok(_) => println!("Saved JSON: {}", json_path),
        Err(e) => {
            eprintln!("Error saving JSON: {}", e);
            process::exit(1);
        }
    }

    if let Some(path) = js_path {
        match to_script(&book).and_then(|js| fs::write(&path, js).map_err(|e| io_error(&path, e))) {
            Ok(_) => println!("Saved JS: {}", path),
            Err(e) => {
                eprintln!("Error saving JS: {}", e);
                process::exit(1);
            }
        }
    }

    println!("\nDone in {:.2}s", start.elapsed().as_secs_f64());
}

fn io_error(path: &str, source: io::Error) -> DataError {
    DataError::Io { path: path.to_string(), source }
}

fn print_help() {
    println!("Range Converter");
    println!();
    println!("Usage: convert_ranges --input <FILE> [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -i, --input <FILE>       Range text file");
    println!("  -o, --json <FILE>        JSON output (default: range_data.json)");
    println!("  --js <FILE>              Also write a JS constant (const RANGE_DATA = ...)");
    println!("  -h, --help               Show this help");
}
