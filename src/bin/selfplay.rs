//! Self-play match generation CLI.
//!
//! Plays matches with random reinforcements and outputs one JSON record per
//! match.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --matches N     Number of matches to play (default: 10)
//!   --max-turns N   Turn limit per match (default: 200)
//!   --width N       Grid width (default: 5)
//!   --height N      Grid height including scoring rows (default: 8)
//!   --hp N          Starting player HP (default: 20)
//!   --spawn P       Spawn chance per player per turn, 0..1 (default: 0.6)
//!   --threads N     Number of parallel threads (default: 4)
//!   --seed N        Random seed, 0 for entropy (default: 0)
//!   --output FILE   Output file path (default: stdout)
//!   --quiet         Suppress summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::process;
use std::str::FromStr;
use std::time::Instant;

use rochess::selfplay::{self, SelfPlayConfig};

fn parse_arg<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).map(|s| s.parse::<T>()) {
        Some(Ok(v)) => v,
        _ => {
            eprintln!("invalid {} value", flag);
            print_usage();
            process::exit(1);
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let mut config = SelfPlayConfig::default();
    let mut output_path: Option<String> = None;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--matches" => {
                i += 1;
                config.num_matches = parse_arg(&args, i, "--matches");
            }
            "--max-turns" => {
                i += 1;
                config.max_turns = parse_arg(&args, i, "--max-turns");
            }
            "--width" => {
                i += 1;
                config.width = parse_arg(&args, i, "--width");
            }
            "--height" => {
                i += 1;
                config.height = parse_arg(&args, i, "--height");
            }
            "--hp" => {
                i += 1;
                config.player_hp = parse_arg(&args, i, "--hp");
            }
            "--spawn" => {
                i += 1;
                config.spawn_chance = parse_arg(&args, i, "--spawn");
                if !(0.0..=1.0).contains(&config.spawn_chance) {
                    eprintln!("--spawn must be between 0 and 1");
                    process::exit(1);
                }
            }
            "--threads" => {
                i += 1;
                config.threads = parse_arg(&args, i, "--threads");
            }
            "--seed" => {
                i += 1;
                config.seed = parse_arg(&args, i, "--seed");
            }
            "--output" => {
                i += 1;
                output_path = Some(parse_arg(&args, i, "--output"));
            }
            "--quiet" => {
                quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    if !quiet {
        eprintln!(
            "Self-play: {} matches, {}x{} grid, {} HP, spawn {:.2}, max {} turns, {} threads",
            config.num_matches,
            config.width,
            config.height,
            config.player_hp,
            config.spawn_chance,
            config.max_turns,
            config.threads
        );
    }

    let start = Instant::now();
    let records = match selfplay::run_self_play(&config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("self-play failed: {}", e);
            process::exit(1);
        }
    };
    let elapsed = start.elapsed();

    if !quiet {
        eprintln!(
            "Completed {} matches in {:.2}s",
            records.len(),
            elapsed.as_secs_f64()
        );
        selfplay::print_summary(&records);
    }

    let written = match &output_path {
        Some(path) => File::create(path)
            .and_then(|file| selfplay::write_jsonl(&records, &mut BufWriter::new(file))),
        None => {
            let stdout = io::stdout();
            selfplay::write_jsonl(&records, &mut BufWriter::new(stdout.lock()))
        }
    };
    if let Err(e) = written {
        eprintln!("failed to write output: {}", e);
        process::exit(1);
    }
    if let (Some(path), false) = (output_path, quiet) {
        eprintln!("Wrote {} matches to {}", records.len(), path);
    }
}

fn print_usage() {
    eprintln!("Usage: selfplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --matches N      Number of matches to play (default: 10)");
    eprintln!("  --max-turns N    Turn limit per match (default: 200)");
    eprintln!("  --width N        Grid width (default: 5)");
    eprintln!("  --height N       Grid height including scoring rows (default: 8)");
    eprintln!("  --hp N           Starting player HP (default: 20)");
    eprintln!("  --spawn P        Spawn chance per player per turn, 0..1 (default: 0.6)");
    eprintln!("  --threads N      Number of parallel threads (default: 4)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --quiet          Suppress summary output");
    eprintln!("  --help           Show this help");
}
