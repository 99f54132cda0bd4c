//! Balance simulator CLI.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate -- --action oak_forest --hours 8
//!   cargo run --bin simulate -- --plan data/plan.toml --seed 42
//!   RUST_LOG=idlecraft=debug cargo run --bin simulate -- --action oak_forest -n 1

use clap::Parser;
use idlecraft::build_info::version_line;
use idlecraft::simulator::{run_simulation, PlanStep, SimConfig};
use idlecraft::{DefinitionStore, EngineConfig};
use std::path::PathBuf;
use std::process::ExitCode;

/// Headless idle-game balance simulator
#[derive(Parser, Debug)]
#[command(name = "simulate")]
#[command(about = "Run seeded playthroughs of an action plan and report progression")]
struct Args {
    /// Simulation config in TOML (plan, runs, engine tunables)
    #[arg(long)]
    plan: Option<PathBuf>,

    /// Definition file to load (overrides the plan file)
    #[arg(long)]
    definitions: Option<PathBuf>,

    /// Engine config in TOML (overrides the plan file's [engine] table)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Queue this action unbounded (may be repeated)
    #[arg(long, short = 'a')]
    action: Vec<String>,

    /// Number of runs
    #[arg(long, short = 'n')]
    runs: Option<u32>,

    /// Simulated hours per run
    #[arg(long)]
    hours: Option<f64>,

    /// Random seed for reproducible runs
    #[arg(long, short = 's')]
    seed: Option<u64>,

    /// Resolve each run as a single catch-up jump
    #[arg(long)]
    single_jump: bool,

    /// Open earned chests immediately
    #[arg(long)]
    auto_open: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Print one line per run
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn build_config(args: &Args) -> idlecraft::Result<SimConfig> {
    let mut config = match &args.plan {
        Some(path) => SimConfig::from_file(path)?,
        None => SimConfig::default(),
    };
    if let Some(path) = &args.definitions {
        config.definitions = path.clone();
    }
    if let Some(path) = &args.config {
        config.engine = EngineConfig::from_file(path)?;
    }
    config
        .plan
        .extend(args.action.iter().map(|action| PlanStep::new(action.as_str(), None)));
    if let Some(runs) = args.runs {
        config.num_runs = runs;
    }
    if let Some(hours) = args.hours {
        config.hours = hours;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.single_jump |= args.single_jump;
    config.engine.auto_open_chests |= args.auto_open;
    if args.verbose {
        config.verbosity = 2;
    }
    Ok(config)
}

fn run(args: &Args) -> idlecraft::Result<()> {
    let config = build_config(args)?;
    let definitions = DefinitionStore::from_file(&config.definitions)?;

    if !args.json {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║              IDLECRAFT BALANCE SIMULATOR                      ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!("  Build:          {}", version_line());
        println!("  Definitions:    {}", config.definitions.display());
        println!("  Runs:           {}", config.num_runs);
        println!("  Hours:          {}", config.hours);
        println!(
            "  Mode:           {}",
            if config.single_jump { "single jump" } else { "ticked" }
        );
        if let Some(seed) = config.seed {
            println!("  Seed:           {}", seed);
        }
        for step in &config.plan {
            println!("  Plan:           {} x {}", step.action, step.amount());
        }
        println!();
    }

    if config.plan.is_empty() {
        tracing::warn!("plan is empty, every run will idle");
    }

    let report = run_simulation(&config, &definitions)?;
    if args.json {
        println!("{}", report.to_json());
    } else {
        println!("{}", report.to_text());
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "simulation failed");
            ExitCode::FAILURE
        }
    }
}
