use std::collections::BTreeMap;

use rand::rngs::SmallRng;

use crate::{
    board::Grid,
    common::{BoardError, Coord, MoveRejection, Outcome, ShotReport, TargetingError},
    config::{FleetConfig, ShipKind},
    game::Ocean,
};

/// Interface implemented by different player types.
///
/// A player hides its own fleet and attacks one opponent, learning only the
/// outcomes of its own attacks.
pub trait Player {
    /// Place all ships onto the provided ocean.
    fn place_ships(&mut self, rng: &mut SmallRng, ocean: &mut Ocean) -> Result<(), BoardError> {
        ocean.place_fleet_randomly(rng)
    }

    /// Choose the next cell to attack on the opponent's board.
    fn next_move(&mut self) -> Result<Coord, TargetingError>;

    /// Inform the player of the outcome of its attack on `coord`.
    fn process_result(&mut self, coord: Coord, outcome: Outcome) -> Result<(), TargetingError>;

    /// Inform the player of an opponent attack against its own ocean.
    /// `own` is the ocean's grid after the attack.
    fn handle_opponent_attack(&mut self, _coord: Coord, _report: ShotReport, _own: &Grid) {}
}

impl<P: Player + ?Sized> Player for Box<P> {
    fn place_ships(&mut self, rng: &mut SmallRng, ocean: &mut Ocean) -> Result<(), BoardError> {
        (**self).place_ships(rng, ocean)
    }

    fn next_move(&mut self) -> Result<Coord, TargetingError> {
        (**self).next_move()
    }

    fn process_result(&mut self, coord: Coord, outcome: Outcome) -> Result<(), TargetingError> {
        (**self).process_result(coord, outcome)
    }

    fn handle_opponent_attack(&mut self, coord: Coord, report: ShotReport, own: &Grid) {
        (**self).handle_opponent_attack(coord, report, own)
    }
}

/// Unsunk segments of each opponent ship, counted from attack outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipTally {
    remaining: BTreeMap<ShipKind, usize>,
}

impl ShipTally {
    pub fn new(fleet: &FleetConfig) -> Self {
        Self {
            remaining: fleet.ships().collect(),
        }
    }

    pub fn remaining(&self, kind: ShipKind) -> Option<usize> {
        self.remaining.get(&kind).copied()
    }

    /// Reject a hit on a kind outside the fleet or already sunk.
    pub fn check(&self, coord: Coord, outcome: Outcome) -> Result<(), TargetingError> {
        match outcome {
            Outcome::Miss => Ok(()),
            Outcome::Hit(kind) => match self.remaining(kind) {
                None => Err(TargetingError::invalid(coord, MoveRejection::UnknownShip)),
                Some(0) => Err(TargetingError::invalid(coord, MoveRejection::ShipAlreadySunk)),
                Some(_) => Ok(()),
            },
        }
    }

    /// Count an accepted outcome. Returns `true` when it sinks a ship.
    pub fn count(&mut self, outcome: Outcome) -> bool {
        let Outcome::Hit(kind) = outcome else {
            return false;
        };
        match self.remaining.get_mut(&kind) {
            Some(left) if *left > 0 => {
                *left -= 1;
                *left == 0
            }
            _ => false,
        }
    }
}
