//! Interactive range quiz.
//!
//! Draws a hand from a scenario grid, asks for an action, and grades it.
//!
//! Usage: quiz [--config FILE] [--data FILE] [--mode NAME]
//!             [--category NAME] [--scenario N] [--borderline] [--seed N]

use std::env;
use std::io::{self, BufRead, Write};
use std::process;

use tracing_subscriber::EnvFilter;

use gto_range_trainer::config::TrainerConfig;
use gto_range_trainer::data::{Category, TrainerData};
use gto_range_trainer::grid::{render_text, Action};
use gto_range_trainer::quiz::{QuizSession, ScenarioPick};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    let mut config_file: Option<String> = None;
    let mut data_path: Option<String> = None;
    let mut mode: Option<String> = None;
    let mut category: Option<Category> = None;
    let mut scenario: Option<usize> = None;
    let mut borderline = false;
    let mut seed: Option<u64> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                i += 1;
                if i < args.len() {
                    config_file = Some(args[i].clone());
                }
            }
            "--data" | "-d" => {
                i += 1;
                if i < args.len() {
                    data_path = Some(args[i].clone());
                }
            }
            "--mode" | "-m" => {
                i += 1;
                if i < args.len() {
                    mode = Some(args[i].clone());
                }
            }
            "--category" => {
                i += 1;
                if i < args.len() {
                    category = Category::parse(&args[i]);
                    if category.is_none() {
                        eprintln!("Unknown category: {}", args[i]);
                        process::exit(2);
                    }
                }
            }
            "--scenario" => {
                i += 1;
                if i < args.len() {
                    scenario = args[i].parse().ok();
                }
            }
            "--borderline" | "-b" => {
                borderline = true;
            }
            "--seed" | "-s" => {
                i += 1;
                if i < args.len() {
                    seed = args[i].parse().ok();
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

    let mut config = match &config_file {
        Some(path) => match TrainerConfig::from_json_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                process::exit(1);
            }
        },
        None => TrainerConfig::default(),
    };
    if let Some(path) = data_path {
        config = config.with_data_path(&path);
    }
    if let Some(mode) = mode {
        config = config.with_mode(&mode);
    }
    if let Some(category) = category {
        config = config.with_category(category);
    }
    if borderline {
        config = config.with_borderline(true);
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    if let Err(e) = config.validate() {
        eprintln!("Error loading config: {}", e);
        process::exit(1);
    }

    let data = match TrainerData::from_json_file(&config.data_path) {
        Ok(data) => data,
        Err(e) => {
            println!("Data load error");
            tracing::error!(path = %config.data_path, error = %e, "failed to load range data");
            process::exit(1);
        }
    };

    println!("=================================================");
    println!("  GTO Range Trainer");
    println!("=================================================");
    println!("Mode: {} | Category: {} | Borderline: {}",
        config.mode, config.category, config.borderline);
    println!("Type 'help' for commands.\n");

    let pick = scenario.map_or(ScenarioPick::Random, ScenarioPick::Index);
    let mut session = QuizSession::new(&config);
    next_round(&mut session, &data, pick);

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let argument = words.next();

        if !run_command(&mut session, &data, pick, command, argument) {
            break;
        }
    }

    println!("\nFinal score: {}", session.score());
}

/// Handle one input command. Returns `false` to quit.
fn run_command(
    session: &mut QuizSession,
    data: &TrainerData,
    pick: ScenarioPick,
    command: &str,
    argument: Option<&str>,
) -> bool {
    match command {
        "q" | "quit" | "exit" => return false,
        "help" | "?" => print_commands(),
        "n" | "next" => next_round(session, data, pick),
        "score" => println!("{}", session.score()),
        "reset" => {
            session.reset_score();
            println!("Score reset.");
            next_round(session, data, pick);
        }
        "grid" => match session.round() {
            Some(round) if round.is_graded() => {
                println!("{}", render_text(&round.grid, Some((round.row, round.col))));
            }
            Some(_) => println!("Answer first."),
            None => println!("No active round."),
        },
        "mode" => match argument {
            Some(name) if data.mode(name).is_some() => {
                session.set_mode(name);
                next_round(session, data, ScenarioPick::Random);
            }
            _ => {
                let modes: Vec<&str> = data.mode_names().collect();
                println!("Modes: {}", modes.join(", "));
            }
        },
        "cat" | "category" => match argument.and_then(Category::parse) {
            Some(category) => {
                session.set_category(category);
                next_round(session, data, ScenarioPick::Random);
            }
            None => {
                let names: Vec<&str> = Category::all().iter().map(|c| c.name()).collect();
                println!("Categories: {}", names.join(", "));
            }
        },
        "scenario" => match argument.and_then(|a| a.parse::<usize>().ok()) {
            Some(index) => next_round(session, data, ScenarioPick::Index(index)),
            None => list_scenarios(session, data),
        },
        "border" => {
            let enable = !session.borderline();
            session.set_borderline(enable);
            println!("Borderline sampling: {}", if enable { "on" } else { "off" });
            next_round(session, data, pick);
        }
        other => match Action::parse(other) {
            Some(answer) => answer_round(session, answer),
            None => println!("Unknown command: {}", other),
        },
    }
    true
}

fn next_round(session: &mut QuizSession, data: &TrainerData, pick: ScenarioPick) {
    match session.start_round(data, pick) {
        Some(round) => {
            println!("\n[{}] {}", round.category, round.label);
            println!("{}", round.situation);
            println!("Hand: {}", round.hand.name());
            let options: Vec<&str> = round.answer_options().iter().map(|a| a.label()).collect();
            println!("Options: {}", options.join(" / "));
        }
        None => println!("No scenarios available for {} / {}.", session.mode(), session.category()),
    }
}

fn answer_round(session: &mut QuizSession, answer: Action) {
    let offered = session
        .round()
        .map(|round| round.answer_options().contains(&answer));
    match offered {
        None => println!("No active round."),
        Some(false) => println!("{} is not an option here.", answer.label()),
        Some(true) => match session.submit(answer) {
            Some(outcome) => {
                println!("{}", outcome.message());
                println!("{}", session.score());
            }
            None => println!("Already answered. Type 'n' for the next hand."),
        },
    }
}

fn list_scenarios(session: &QuizSession, data: &TrainerData) {
    let category = session.category();
    for (i, record) in data.scenarios(session.mode(), category).iter().enumerate() {
        println!("  {:>2}: {}", i, record.label(category));
    }
}

fn print_commands() {
    println!("Answers:  r(aise)  m(ixed)  c(all)  k/check  f(old)");
    println!("  n, next              Next hand");
    println!("  grid                 Show the grid for the answered hand");
    println!("  score                Show the score");
    println!("  reset                Reset the score");
    println!("  cat <NAME>           Switch category (rfi, bb_defense, vs_open, vs_3bet)");
    println!("  mode <NAME>          Switch data mode");
    println!("  scenario [N]         List scenarios or quiz scenario N");
    println!("  border               Toggle borderline sampling");
    println!("  q, quit              Exit");
}

fn print_help() {
    println!("GTO Range Trainer");
    println!();
    println!("Usage: quiz [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --config <FILE>      Configuration JSON file");
    println!("  -d, --data <FILE>        Range data file (default: data/range_data.json)");
    println!("  -m, --mode <NAME>        Data mode (default: cash)");
    println!("  --category <NAME>        rfi, bb_defense, vs_open or vs_3bet");
    println!("  --scenario <N>           Always quiz scenario N of the category");
    println!("  -b, --borderline         Bias sampling toward borderline hands");
    println!("  -s, --seed <N>           Random seed");
    println!("  -h, --help               Show this help");
    println!();
    println!("Set RUST_LOG=debug for diagnostics.");
}
