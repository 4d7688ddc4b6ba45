//! Commonly used types and utilities for ease of import.

pub use crate::{
    clear_board, play_match, status_of, AiPlayer, FleetConfig, GameStatus, Ocean, Outcome, Player,
    RandomPlayer, ShipKind, Side, TargetingEngine, TargetingError,
};

pub use crate::sim::{build_player, random_ocean, Strategy, MAX_ROUNDS};
pub use crate::CliPlayer;
