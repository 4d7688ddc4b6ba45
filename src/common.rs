//! Common types for Battleship: attack outcomes and errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ShipKind;

/// A `(row, col)` position on the board.
pub type Coord = (usize, usize);

/// Result of an attack as reported back to the attacker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// No ship at the attacked cell.
    Miss,
    /// A ship of the given kind occupies the attacked cell.
    Hit(ShipKind),
}

/// Classification of an attack made by the ocean that received it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotReport {
    pub outcome: Outcome,
    /// `true` when this hit removed the last segment of the ship.
    pub sunk: bool,
}

impl ShotReport {
    pub fn miss() -> Self {
        Self {
            outcome: Outcome::Miss,
            sunk: false,
        }
    }
}

/// Why an attack or reported result was refused.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    #[error("coordinate is outside the board")]
    OutOfBounds,
    #[error("cell was already attacked")]
    AlreadyResolved,
    #[error("ship kind is not part of the fleet")]
    UnknownShip,
    #[error("ship kind was already sunk")]
    ShipAlreadySunk,
}

/// Errors raised by attackers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TargetingError {
    /// The caller broke the move/result contract.
    #[error("invalid move at ({row}, {col}): {reason}")]
    InvalidMove {
        row: usize,
        col: usize,
        reason: MoveRejection,
    },
    /// No unknown cell remains to attack.
    #[error("search exhausted: no unknown cell remains")]
    ExhaustedSearch,
    /// Interactive input could not be read.
    #[error("input unavailable: {0}")]
    Input(String),
}

impl TargetingError {
    pub fn invalid(coord: Coord, reason: MoveRejection) -> Self {
        TargetingError::InvalidMove {
            row: coord.0,
            col: coord.1,
            reason,
        }
    }
}

/// Errors returned by ocean (ground-truth board) operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("coordinate ({row}, {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },
    #[error("cell ({row}, {col}) was already attacked")]
    AlreadyAttacked { row: usize, col: usize },
    #[error("{0} would extend past the board edge")]
    ShipOutOfBounds(ShipKind),
    #[error("{0} overlaps another ship")]
    ShipOverlaps(ShipKind),
    #[error("{0} is already placed")]
    ShipAlreadyPlaced(ShipKind),
    #[error("{0} is not part of this fleet")]
    ShipNotInFleet(ShipKind),
    #[error("unable to find a free position for {0}")]
    UnableToPlaceShip(ShipKind),
    #[error("not every ship of the fleet is placed")]
    FleetIncomplete,
}

/// Errors in a fleet configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FleetError {
    #[error("fleet has no ships")]
    Empty,
    #[error("{kind} has invalid length {length}")]
    InvalidLength { kind: ShipKind, length: usize },
    #[error("{0} listed more than once")]
    DuplicateKind(ShipKind),
    #[error("unknown ship kind {0:?}")]
    UnknownKind(String),
}

/// Errors that end a match or a simulation run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Targeting(#[from] TargetingError),
    #[error("no result after {0} attacks")]
    TurnLimit(usize),
}
