//! Strategy evaluation: how many attacks each strategy needs to clear a
//! random fleet, and how the trained strategy fares against the random one.

use std::time::Instant;

use log::info;
use rand::{rngs::SmallRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{
    common::GameError,
    config::{FleetConfig, BOARD_SIZE},
    game::{clear_board, play_match, Ocean, Side},
    player::Player,
    player_ai::{AiPlayer, RandomPlayer},
};

/// Computer strategies available to the harness and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Hunt/target search.
    Trained,
    /// Uniformly random unknown cell.
    Random,
}

/// Build a fresh player for `strategy`, drawing any randomness it needs
/// from `rng`.
pub fn build_player(strategy: Strategy, fleet: &FleetConfig, rng: &mut SmallRng) -> Box<dyn Player> {
    match strategy {
        Strategy::Trained => Box::new(AiPlayer::new(fleet)),
        Strategy::Random => Box::new(RandomPlayer::new(fleet, SmallRng::from_rng(rng))),
    }
}

/// Random ocean holding the whole fleet.
pub fn random_ocean(fleet: &FleetConfig, rng: &mut SmallRng) -> Result<Ocean, GameError> {
    let mut ocean = Ocean::new(fleet.clone());
    ocean.place_fleet_randomly(rng)?;
    Ok(ocean)
}

fn progress(i: usize, total: usize, label: &str) {
    let step = (total / 10).max(1);
    if (i + 1) % step == 0 {
        info!("[{}] Completed {}/{}", label, i + 1, total);
    }
}

/// Moves needed by one strategy over many random boards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentSummary {
    pub strategy: Strategy,
    pub trials: usize,
    pub average_moves: f64,
    pub min_moves: usize,
    pub max_moves: usize,
    pub elapsed_ms: u64,
}

/// Let `strategy` clear `trials` independent random boards.
pub fn experiment_vs_boards(
    strategy: Strategy,
    fleet: &FleetConfig,
    trials: usize,
    rng: &mut SmallRng,
) -> Result<ExperimentSummary, GameError> {
    let start = Instant::now();
    let mut total = 0usize;
    let mut min_moves = usize::MAX;
    let mut max_moves = 0usize;
    let label = format!("{:?}", strategy);
    for i in 0..trials {
        let mut ocean = random_ocean(fleet, rng)?;
        let mut player = build_player(strategy, fleet, rng);
        let moves = clear_board(&mut *player, &mut ocean)?;
        total += moves;
        min_moves = min_moves.min(moves);
        max_moves = max_moves.max(moves);
        progress(i, trials, &label);
    }
    Ok(ExperimentSummary {
        strategy,
        trials,
        average_moves: if trials == 0 { 0.0 } else { total as f64 / trials as f64 },
        min_moves: if trials == 0 { 0 } else { min_moves },
        max_moves,
        elapsed_ms: start.elapsed().as_millis() as u64,
    })
}

/// Tally of trained-versus-random matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadToHead {
    pub games: usize,
    pub trained_wins: usize,
    pub random_wins: usize,
    pub ties: usize,
    pub trained_win_rate: f64,
    pub elapsed_ms: u64,
}

/// Round limit for a head-to-head match.
pub const MAX_ROUNDS: usize = BOARD_SIZE * BOARD_SIZE * 4;

/// Play `games` matches between the trained and the random strategy. The
/// trained side moves first in even-numbered games.
pub fn head_to_head(fleet: &FleetConfig, games: usize, rng: &mut SmallRng) -> Result<HeadToHead, GameError> {
    let start = Instant::now();
    let (mut trained_wins, mut random_wins, mut ties) = (0, 0, 0);
    for i in 0..games {
        let trained_fleet = random_ocean(fleet, rng)?;
        let random_fleet = random_ocean(fleet, rng)?;
        let mut trained = build_player(Strategy::Trained, fleet, rng);
        let mut random = build_player(Strategy::Random, fleet, rng);

        let trained_first = i % 2 == 0;
        let mut sides = if trained_first {
            [
                Side::new(&mut *trained, trained_fleet),
                Side::new(&mut *random, random_fleet),
            ]
        } else {
            [
                Side::new(&mut *random, random_fleet),
                Side::new(&mut *trained, trained_fleet),
            ]
        };
        let result = play_match(&mut sides, MAX_ROUNDS)?;
        match result.winner {
            Some(w) if (w == 0) == trained_first => trained_wins += 1,
            Some(_) => random_wins += 1,
            None => ties += 1,
        }
        progress(i, games, "H2H");
    }
    Ok(HeadToHead {
        games,
        trained_wins,
        random_wins,
        ties,
        trained_win_rate: if games == 0 { 0.0 } else { trained_wins as f64 / games as f64 },
        elapsed_ms: start.elapsed().as_millis() as u64,
    })
}
