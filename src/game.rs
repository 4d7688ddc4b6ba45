use std::collections::BTreeMap;

use log::{debug, info};
use rand::Rng;

use crate::{
    board::{Cell, Grid},
    common::{BoardError, Coord, GameError, Outcome, ShotReport},
    config::{FleetConfig, ShipKind, BOARD_SIZE},
    player::Player,
    ship::{Orientation, Placement},
};

/// Attempts per ship before random placement gives up.
const MAX_PLACEMENT_ATTEMPTS: usize = 100;
/// Whole-fleet restarts before random placement gives up.
const MAX_FLEET_ATTEMPTS: usize = 10;

/// A player's own board: ship layout, attacks received and the health of
/// every placed ship.
#[derive(Debug, Clone)]
pub struct Ocean {
    fleet: FleetConfig,
    grid: Grid,
    placements: BTreeMap<ShipKind, Placement>,
    health: BTreeMap<ShipKind, usize>,
}

impl Ocean {
    /// Create an empty ocean (no ships placed).
    pub fn new(fleet: FleetConfig) -> Self {
        Self {
            fleet,
            grid: Grid::new(),
            placements: BTreeMap::new(),
            health: BTreeMap::new(),
        }
    }

    pub fn fleet(&self) -> &FleetConfig {
        &self.fleet
    }

    /// Ground-truth grid, ships included.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn placement(&self, kind: ShipKind) -> Option<&Placement> {
        self.placements.get(&kind)
    }

    /// Remaining segments of a placed ship.
    pub fn health(&self, kind: ShipKind) -> Option<usize> {
        self.health.get(&kind).copied()
    }

    /// `true` once every ship of the fleet has been placed.
    pub fn is_complete(&self) -> bool {
        self.fleet.kinds().all(|k| self.placements.contains_key(&k))
    }

    pub fn all_sunk(&self) -> bool {
        self.grid.all_ships_sunk()
    }

    /// Place the ship of `kind` with its top-left cell at (row, col).
    pub fn place(
        &mut self,
        kind: ShipKind,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<(), BoardError> {
        let length = self.fleet.length(kind).ok_or(BoardError::ShipNotInFleet(kind))?;
        if self.placements.contains_key(&kind) {
            return Err(BoardError::ShipAlreadyPlaced(kind));
        }
        let placement = Placement::new(kind, length, row, col, orientation)?;
        if placement
            .cells()
            .any(|(r, c)| self.grid.get(r, c) != Some(Cell::Unknown))
        {
            return Err(BoardError::ShipOverlaps(kind));
        }
        for (r, c) in placement.cells() {
            self.grid.set(r, c, Cell::Ship(kind));
        }
        self.placements.insert(kind, placement);
        self.health.insert(kind, length);
        Ok(())
    }

    /// Returns a random non-overlapping (row, col, orientation) for `kind`.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        kind: ShipKind,
    ) -> Result<(usize, usize, Orientation), BoardError> {
        let length = self.fleet.length(kind).ok_or(BoardError::ShipNotInFleet(kind))?;
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let orient = if rng.random_bool(0.5) {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (max_r, max_c) = match orient {
                Orientation::Horizontal => (BOARD_SIZE - 1, BOARD_SIZE - length),
                Orientation::Vertical => (BOARD_SIZE - length, BOARD_SIZE - 1),
            };
            let r = rng.random_range(0..=max_r);
            let c = rng.random_range(0..=max_c);
            let placement = Placement::new(kind, length, r, c, orient)?;
            if placement.cells().all(|(r, c)| self.grid.is_unknown(r, c)) {
                return Ok((r, c, orient));
            }
        }
        Err(BoardError::UnableToPlaceShip(kind))
    }

    /// Place every unplaced ship at random, restarting from the ships
    /// already fixed when a ship finds no room.
    pub fn place_fleet_randomly<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), BoardError> {
        let fixed = self.clone();
        let mut last_err = BoardError::FleetIncomplete;
        for attempt in 0..MAX_FLEET_ATTEMPTS {
            match self.try_place_remaining(rng) {
                Ok(()) => return Ok(()),
                Err(e) => {
                    debug!("fleet placement attempt {} failed: {}", attempt + 1, e);
                    last_err = e;
                    *self = fixed.clone();
                }
            }
        }
        Err(last_err)
    }

    fn try_place_remaining<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), BoardError> {
        let unplaced: Vec<ShipKind> = self
            .fleet
            .kinds()
            .filter(|k| !self.placements.contains_key(k))
            .collect();
        for kind in unplaced {
            let (r, c, o) = self.random_placement(rng, kind)?;
            self.place(kind, r, c, o)?;
        }
        Ok(())
    }

    /// Resolve an opponent attack at (row, col) against the true layout.
    pub fn receive_attack(&mut self, row: usize, col: usize) -> Result<ShotReport, BoardError> {
        let cell = self
            .grid
            .get(row, col)
            .ok_or(BoardError::OutOfBounds { row, col })?;
        if cell.is_resolved() {
            return Err(BoardError::AlreadyAttacked { row, col });
        }
        let Cell::Ship(kind) = cell else {
            self.grid.set(row, col, Cell::Miss);
            return Ok(ShotReport::miss());
        };
        self.grid.set(row, col, Cell::Hit(kind));
        let health = self.health.entry(kind).or_insert(0);
        *health = health.saturating_sub(1);
        Ok(ShotReport {
            outcome: Outcome::Hit(kind),
            sunk: *health == 0,
        })
    }
}

/// Current status of a game, from one side's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

/// One side of a match: an attacker and the ocean it defends.
pub struct Side<'a> {
    pub player: &'a mut dyn Player,
    pub ocean: Ocean,
}

impl<'a> Side<'a> {
    pub fn new(player: &'a mut dyn Player, ocean: Ocean) -> Self {
        Self { player, ocean }
    }
}

/// How a match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    /// Index of the winning side, `None` when the turn limit was reached.
    pub winner: Option<usize>,
    /// Full rounds started (one attack per side each).
    pub rounds: usize,
    /// Attacks made by each side.
    pub attacks: [usize; 2],
}

/// Let `attacker` fire once at `defender`, feeding the outcome back.
///
/// Returns the cell and its classification.
pub fn resolve_attack(
    attacker: &mut dyn Player,
    defender: &mut Ocean,
) -> Result<(Coord, ShotReport), GameError> {
    let (r, c) = attacker.next_move()?;
    let report = defender.receive_attack(r, c)?;
    attacker.process_result((r, c), report.outcome)?;
    if report.sunk {
        if let Outcome::Hit(kind) = report.outcome {
            debug!("{} sunk at {:?}", kind, (r, c));
        }
    }
    Ok(((r, c), report))
}

/// Number of attacks `attacker` needs to sink every ship of `ocean`.
///
/// Every cell can be attacked at most once, so more than `BOARD_SIZE²`
/// attacks is an error.
pub fn clear_board(attacker: &mut dyn Player, ocean: &mut Ocean) -> Result<usize, GameError> {
    if !ocean.is_complete() {
        return Err(BoardError::FleetIncomplete.into());
    }
    let limit = BOARD_SIZE * BOARD_SIZE;
    let mut moves = 0;
    while !ocean.all_sunk() {
        if moves == limit {
            return Err(GameError::TurnLimit(limit));
        }
        resolve_attack(attacker, ocean)?;
        moves += 1;
    }
    Ok(moves)
}

/// Alternate attacks, side 0 first, until one ocean is fully sunk or
/// `max_rounds` full rounds have been played.
pub fn play_match(sides: &mut [Side<'_>; 2], max_rounds: usize) -> Result<MatchResult, GameError> {
    if sides.iter().any(|s| !s.ocean.is_complete()) {
        return Err(BoardError::FleetIncomplete.into());
    }
    let mut attacks = [0usize; 2];
    for round in 1..=max_rounds {
        for attacker in 0..2 {
            let (a, d) = if attacker == 0 {
                let (a, d) = sides.split_at_mut(1);
                (&mut a[0], &mut d[0])
            } else {
                let (d, a) = sides.split_at_mut(1);
                (&mut a[0], &mut d[0])
            };
            let (coord, report) = resolve_attack(&mut *a.player, &mut d.ocean)?;
            attacks[attacker] += 1;
            d.player.handle_opponent_attack(coord, report, d.ocean.grid());
            if d.ocean.all_sunk() {
                info!(
                    "side {} wins after {} attacks (round {})",
                    attacker, attacks[attacker], round
                );
                return Ok(MatchResult {
                    winner: Some(attacker),
                    rounds: round,
                    attacks,
                });
            }
        }
    }
    info!("no winner after {} rounds", max_rounds);
    Ok(MatchResult {
        winner: None,
        rounds: max_rounds,
        attacks,
    })
}

/// Status of side `index` once a match has ended.
pub fn status_of(result: &MatchResult, index: usize) -> GameStatus {
    match result.winner {
        Some(w) if w == index => GameStatus::Won,
        Some(_) => GameStatus::Lost,
        None => GameStatus::InProgress,
    }
}
