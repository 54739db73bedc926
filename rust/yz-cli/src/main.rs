//! yz: CLI binary for terminal Yatzy.
//!
//! Subcommands:
//! - play      interactive game in the terminal
//! - score     score one hand in every category
//! - sim       headless greedy self-play statistics
//! - config    print the effective configuration

use std::env;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use tracing::{info, warn};

use yz_core::{AdviceSource, Category, Config, SimConfig, StaticAdviceSource};
use yz_logging::LogTarget;

/// Tips served by `play --offline`.
const OFFLINE_TIPS: &[&str] = &[
    "Chase the upper bonus early; 63 is three of each face.",
    "Two pairs? Keep the higher pair and go for a full house.",
    "Four in a row with a roll left is a fine time to aim for the large straight.",
    "Chance is your safety net. Don't spend it too soon.",
    "A zero in Yatzy hurts less than a zero in Sixes late in the game.",
];

fn value_of<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    match args.get(i + 1) {
        Some(v) => v,
        None => {
            eprintln!("Missing value for {flag}");
            process::exit(1);
        }
    }
}

fn parse_or_exit<T: std::str::FromStr>(s: &str, flag: &str) -> T {
    s.parse().unwrap_or_else(|_| {
        eprintln!("Invalid {flag} value: {s}");
        process::exit(1);
    })
}

fn init_logging(level: &str, target: LogTarget) {
    if let Err(e) = yz_logging::init_tracing(level, target) {
        eprintln!("{e}");
        process::exit(1);
    }
}

fn load_config(path: Option<&str>) -> Config {
    let cfg = match path {
        Some(p) => Config::load(p).unwrap_or_else(|e| {
            eprintln!("Failed to load config {p}: {e}");
            process::exit(1);
        }),
        None => Config::default(),
    };
    if let Err(e) = cfg.validate() {
        eprintln!("Invalid config: {e}");
        process::exit(1);
    }
    cfg
}

fn cmd_play(args: &[String]) {
    let mut config_path: Option<String> = None;
    let mut game_log: Option<PathBuf> = Some(PathBuf::from("yz-games.ndjson"));
    let mut debug_log = PathBuf::from("yz.log");
    let mut offline = false;
    let mut seed: Option<u64> = None;
    let mut level = "info".to_string();

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"yz play

USAGE:
    yz play [--config PATH] [--game-log PATH | --no-game-log] [--log PATH]
            [--seed S] [--offline] [--log-level LEVEL]

OPTIONS:
    --config PATH     YAML config (default: built-in defaults)
    --game-log PATH   NDJSON game history (default: yz-games.ndjson)
    --no-game-log     Do not write game history
    --log PATH        Diagnostic log file (default: yz.log)
    --seed S          Dice RNG seed (overrides game.seed)
    --offline         Serve built-in tips instead of calling the advice API
    --log-level L     error|warn|info|debug|trace (default: info)
"#
                );
                return;
            }
            "--config" => {
                config_path = Some(value_of(args, i, "--config").to_string());
                i += 2;
            }
            "--game-log" => {
                game_log = Some(PathBuf::from(value_of(args, i, "--game-log")));
                i += 2;
            }
            "--no-game-log" => {
                game_log = None;
                i += 1;
            }
            "--log" => {
                debug_log = PathBuf::from(value_of(args, i, "--log"));
                i += 2;
            }
            "--seed" => {
                seed = Some(parse_or_exit(value_of(args, i, "--seed"), "--seed"));
                i += 2;
            }
            "--offline" => {
                offline = true;
                i += 1;
            }
            "--log-level" => {
                level = value_of(args, i, "--log-level").to_string();
                i += 2;
            }
            other => {
                eprintln!("Unknown option for `yz play`: {other}");
                eprintln!("Run `yz play --help` for usage.");
                process::exit(1);
            }
        }
    }

    init_logging(&level, LogTarget::File(debug_log));
    let mut cfg = load_config(config_path.as_deref());
    if seed.is_some() {
        cfg.game.seed = seed;
    }

    let source: Arc<dyn AdviceSource> = if offline {
        Arc::new(StaticAdviceSource::new(OFFLINE_TIPS.iter().copied()))
    } else {
        match yz_advice::HttpAdviceSource::from_config(&cfg.advice) {
            Ok(s) => Arc::new(s),
            Err(e) => {
                warn!(error = %e, "HTTP advice unavailable; using offline tips");
                Arc::new(StaticAdviceSource::new(OFFLINE_TIPS.iter().copied()))
            }
        }
    };
    info!(offline, url = %cfg.advice.url, "starting game");

    let opts = yz_tui::RunOptions {
        config: cfg,
        source,
        game_log,
    };
    if let Err(e) = yz_tui::run(opts) {
        eprintln!("Terminal error: {e}");
        process::exit(1);
    }
}

fn cmd_score(args: &[String]) {
    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!(
            r#"yz score

USAGE:
    yz score D1 D2 D3 D4 D5

Prints what the hand scores in every category (dice are 1..6).
"#
        );
        return;
    }
    if args.len() != 5 {
        eprintln!("Expected exactly 5 dice, got {}", args.len());
        process::exit(1);
    }
    let mut hand = [0u8; 5];
    for (slot, a) in hand.iter_mut().zip(args) {
        let d: u8 = parse_or_exit(a, "die");
        if !(1..=6).contains(&d) {
            eprintln!("Die out of range 1..6: {d}");
            process::exit(1);
        }
        *slot = d;
    }

    println!("Hand: {hand:?}");
    for cat in Category::ALL {
        println!("  {:<16}{:>4}", cat.name(), yz_core::mark_value(cat, hand));
    }
}

fn print_histogram(totals: &[u32]) {
    let bins = yz_core::histogram(totals, 10);
    let peak = bins.iter().map(|&(_, n)| n).max().unwrap_or(1).max(1);
    println!();
    println!("Histogram (bin width 10):");
    for (start, n) in bins {
        let bar = "#".repeat((n * 50).div_ceil(peak));
        println!("  {:>3}-{:<3} {:>6} {bar}", start, start + 9, n);
    }
}

fn cmd_sim(args: &[String]) {
    let mut sim = SimConfig::default();
    let mut no_hist = false;
    let mut out: Option<PathBuf> = None;
    let mut level = "warn".to_string();

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"yz sim

USAGE:
    yz sim [--games N] [--players P] [--seed S] [--no-hist] [--out PATH]

OPTIONS:
    --games N      Number of games to simulate (default: 100)
    --players P    1 or 2 (default: 1)
    --seed S       RNG seed (default: 0)
    --no-hist      Skip printing histogram
    --out PATH     Also write the full report as JSON
    --log-level L  error|warn|info|debug|trace (default: warn)
"#
                );
                return;
            }
            "--games" => {
                sim.games = parse_or_exit(value_of(args, i, "--games"), "--games");
                i += 2;
            }
            "--players" => {
                sim.players = parse_or_exit(value_of(args, i, "--players"), "--players");
                if !(1..=yz_core::MAX_PLAYERS).contains(&sim.players) {
                    eprintln!("--players must be 1 or 2");
                    process::exit(1);
                }
                i += 2;
            }
            "--seed" => {
                sim.seed = parse_or_exit(value_of(args, i, "--seed"), "--seed");
                i += 2;
            }
            "--no-hist" => {
                no_hist = true;
                i += 1;
            }
            "--out" => {
                out = Some(PathBuf::from(value_of(args, i, "--out")));
                i += 2;
            }
            "--log-level" => {
                level = value_of(args, i, "--log-level").to_string();
                i += 2;
            }
            other => {
                eprintln!("Unknown option for `yz sim`: {other}");
                eprintln!("Run `yz sim --help` for usage.");
                process::exit(1);
            }
        }
    }

    init_logging(&level, LogTarget::Stderr);
    println!("Running simulation...");
    let report = yz_core::simulate(sim);

    println!();
    println!("Evaluation:");
    println!("  - Games: {} ({} player(s))", report.games, report.players);
    println!(
        "  - Score: mean={:.2}, median={}, std={:.2}, min={}, max={}",
        report.mean, report.median, report.std, report.min, report.max
    );
    println!("  - Upper bonus rate: {:.1}%", report.bonus_rate * 100.0);
    println!("  - Yatzy rate: {:.1}%", report.yatzy_rate * 100.0);

    if !no_hist {
        print_histogram(&report.totals);
    }
    if let Some(path) = out {
        if let Err(e) = yz_logging::write_json_atomic(&path, &report) {
            eprintln!("Failed to write {}: {e}", path.display());
            process::exit(1);
        }
        println!("Report written to {}", path.display());
    }
}

fn cmd_config(args: &[String]) {
    let mut config_path: Option<String> = None;
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"yz config

USAGE:
    yz config [--config PATH]

Prints the effective configuration (defaults merged with PATH) as YAML.
"#
                );
                return;
            }
            "--config" => {
                config_path = Some(value_of(args, i, "--config").to_string());
                i += 2;
            }
            other => {
                eprintln!("Unknown option for `yz config`: {other}");
                process::exit(1);
            }
        }
    }
    let cfg = load_config(config_path.as_deref());
    match cfg.to_yaml() {
        Ok(s) => print!("{s}"),
        Err(e) => {
            eprintln!("Failed to render config: {e}");
            process::exit(1);
        }
    }
}

fn print_help() {
    eprintln!(
        r#"yz - terminal Yatzy

USAGE:
    yz <COMMAND> [OPTIONS]

COMMANDS:
    play                Play in the terminal (1 or 2 players)
    score D1..D5        Score one hand in every category
    sim                 Run greedy self-play statistics
    config              Print the effective configuration

OPTIONS:
    -h, --help          Print this help message
    -V, --version       Print version

Run `yz <COMMAND> --help` for command options.
"#
    );
}

fn print_version() {
    println!("yz {}", env!("CARGO_PKG_VERSION"));
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_help();
        process::exit(0);
    }

    match args[1].as_str() {
        "-h" | "--help" | "help" => {
            print_help();
        }
        "-V" | "--version" => {
            print_version();
        }
        "play" => cmd_play(&args[2..]),
        "score" => cmd_score(&args[2..]),
        "sim" => cmd_sim(&args[2..]),
        "config" => cmd_config(&args[2..]),
        cmd => {
            eprintln!("Unknown command: {cmd}");
            eprintln!("Run `yz --help` for usage.");
            process::exit(1);
        }
    }
}
