mod logic;
mod storage;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use logic::{
    GameplayStrategy, SimulationConfig, SimulationResult, generate_console_report,
    generate_json_report, generate_markdown_report, run_simulation,
};
use storage::{JsonFileStorage, NullStorage};

#[derive(Debug, Parser)]
#[command(name = "ratrace-tester", version = "0.1.0")]
#[command(about = "Automated seeded play-throughs of the Rat Race game engine")]
struct Args {
    /// Number of players at the table (1-6)
    #[arg(long, default_value_t = 2)]
    #[arg(value_parser = clap::value_parser!(u8).range(1..=6))]
    players: u8,

    /// Seeds to run (comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Decision policy used by every player
    #[arg(long, value_enum, default_value_t = GameplayStrategy::Balanced)]
    strategy: GameplayStrategy,

    /// Enable custom mode (more starting cash, cheaper living, boosted income)
    #[arg(long)]
    custom_mode: bool,

    /// Player-turn budget per game
    #[arg(long, default_value_t = 500)]
    max_turns: u32,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Save every snapshot as JSON under this directory
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Print every turn event to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.report == "console" || args.output.is_some() {
        announce_banner();
    }

    let start_time = Instant::now();
    let seeds = parse_seeds(&args.seeds)?;
    let mut results = Vec::with_capacity(seeds.len());
    for seed in seeds {
        let config = SimulationConfig::new(args.strategy, seed)
            .with_players(usize::from(args.players))
            .with_max_turns(args.max_turns)
            .with_custom_mode(args.custom_mode)
            .with_verbose(args.verbose);
        log::info!("running seed {seed} with {} strategy", args.strategy);
        let result = match &args.save_dir {
            Some(dir) => run_simulation(config, JsonFileStorage::new(dir)),
            None => run_simulation(config, NullStorage),
        }
        .with_context(|| format!("simulation failed for seed {seed}"))?;
        results.push(result);
    }

    write_report(&args, &results, start_time)
}

fn announce_banner() {
    println!("{}", "🎲 Rat Race Automated Tester".bright_cyan().bold());
    println!("{}", "================================".cyan());
}

fn split_csv(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn parse_seeds(input: &str) -> Result<Vec<u64>> {
    let seeds = split_csv(input)
        .iter()
        .map(|token| {
            token
                .parse::<u64>()
                .with_context(|| format!("invalid seed {token:?}"))
        })
        .collect::<Result<Vec<_>>>()?;
    if seeds.is_empty() {
        bail!("at least one seed is required");
    }
    Ok(seeds)
}

fn write_report(args: &Args, results: &[SimulationResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;
    match args.report.as_str() {
        "json" => generate_json_report(output_target.writer(), results)?,
        "markdown" => generate_markdown_report(output_target.writer(), results)?,
        _ => generate_console_report(output_target.writer(), results, start_time.elapsed())?,
    }
    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_parse_from_csv() {
        assert_eq!(parse_seeds("1, 2,,3").unwrap(), vec![1, 2, 3]);
        assert!(parse_seeds("").is_err());
        assert!(parse_seeds("seven").is_err());
    }

    #[test]
    fn args_reject_oversized_tables() {
        assert!(Args::try_parse_from(["ratrace-tester", "--players", "7"]).is_err());
        assert!(Args::try_parse_from(["ratrace-tester", "--players", "0"]).is_err());
        let args = Args::try_parse_from(["ratrace-tester", "--strategy", "aggressive"]).unwrap();
        assert_eq!(args.strategy, GameplayStrategy::Aggressive);
        assert_eq!(args.players, 2);
    }

    #[test]
    fn report_format_is_validated() {
        assert!(Args::try_parse_from(["ratrace-tester", "--report", "csv"]).is_err());
    }
}
