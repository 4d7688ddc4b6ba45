use std::path::PathBuf;

use anyhow::Context;
use battleship_cpu::{
    init_logging_with_default,
    sim::{experiment_vs_boards, head_to_head, Strategy},
    FleetConfig,
};
use clap::Parser;
use log::LevelFilter;
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

/// Run strategy efficiency experiments and print a JSON summary.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, default_value_t = 1000, help = "Boards cleared by the trained strategy")]
    trained_trials: usize,
    #[arg(long, default_value_t = 1000, help = "Boards cleared by the random strategy")]
    random_trials: usize,
    #[arg(long, default_value_t = 100, help = "Head-to-head games")]
    games: usize,
    #[arg(long, help = "Fix RNG seed for reproducible runs (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, help = "JSON fleet file, e.g. {\"Carrier\": 5, \"PatrolBoat\": 2}")]
    fleet: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_logging_with_default(LevelFilter::Warn);
    let args = Args::parse();

    let fleet = match &args.fleet {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading fleet file {}", path.display()))?;
            serde_json::from_str::<FleetConfig>(&text)
                .with_context(|| format!("parsing fleet file {}", path.display()))?
        }
        None => FleetConfig::standard(),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Using RNG seed: {}", seed);
    let mut rng = SmallRng::seed_from_u64(seed);

    let trained = experiment_vs_boards(Strategy::Trained, &fleet, args.trained_trials, &mut rng)?;
    let random = experiment_vs_boards(Strategy::Random, &fleet, args.random_trials, &mut rng)?;
    let h2h = head_to_head(&fleet, args.games, &mut rng)?;

    let result = json!({
        "seed": seed,
        "fleet": fleet,
        "trained": trained,
        "random": random,
        "head_to_head": h2h,
    });
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
