//! Hunt/target search over a knowledge grid.
//!
//! The engine only ever sees its own knowledge grid and the outcomes it is
//! told about. Partially hit ships are chased through per-kind target
//! queues; otherwise an inward spiral restricted to one checkerboard colour
//! hunts for new ships.

use std::collections::{BTreeMap, VecDeque};

use log::{debug, trace};

use crate::board::{in_bounds, neighbours, Grid};
use crate::common::{Coord, MoveRejection, Outcome, TargetingError};
use crate::config::{FleetConfig, ShipKind, BOARD_SIZE};
use crate::ship::Orientation;

/// Inward clockwise spiral over the whole board, starting at the top-left
/// corner and walking each ring right, down, left, up.
pub fn spiral_sequence() -> Vec<Coord> {
    let mut order = Vec::with_capacity(BOARD_SIZE * BOARD_SIZE);
    let (mut top, mut left) = (0usize, 0usize);
    let (mut bottom, mut right) = (BOARD_SIZE, BOARD_SIZE);
    while top < bottom && left < right {
        order.extend((left..right).map(|c| (top, c)));
        order.extend((top + 1..bottom).map(|r| (r, right - 1)));
        if bottom - top > 1 {
            order.extend((left..right - 1).rev().map(|c| (bottom - 1, c)));
        }
        if right - left > 1 {
            order.extend((top + 1..bottom - 1).rev().map(|r| (r, left)));
        }
        top += 1;
        left += 1;
        bottom -= 1;
        right -= 1;
    }
    order
}

/// Hunt-mode parity: every ship of length two or more covers a cell with
/// an even coordinate sum.
fn on_parity((row, col): Coord) -> bool {
    (row + col) % 2 == 0
}

/// What the engine believes about one opponent ship.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ShipTrack {
    length: usize,
    health: usize,
    queue: VecDeque<Coord>,
    hits: Vec<Coord>,
    orientation: Option<Orientation>,
}

impl ShipTrack {
    fn new(length: usize) -> Self {
        Self {
            length,
            health: length,
            queue: VecDeque::new(),
            hits: Vec::new(),
            orientation: None,
        }
    }

    fn enqueue_back(&mut self, coord: Coord) {
        if !self.queue.contains(&coord) {
            self.queue.push_back(coord);
        }
    }

    fn enqueue_front(&mut self, coord: Coord) {
        if let Some(pos) = self.queue.iter().position(|&c| c == coord) {
            self.queue.remove(pos);
        }
        self.queue.push_front(coord);
    }
}

/// Stateful hunt/target attacker for one opponent.
#[derive(Debug, Clone)]
pub struct TargetingEngine {
    knowledge: Grid,
    ships: BTreeMap<ShipKind, ShipTrack>,
    search: Vec<Coord>,
    cursor: usize,
}

impl TargetingEngine {
    pub fn new(fleet: &FleetConfig) -> Self {
        Self {
            knowledge: Grid::new(),
            ships: fleet.ships().map(|(k, l)| (k, ShipTrack::new(l))).collect(),
            search: spiral_sequence(),
            cursor: 0,
        }
    }

    /// Everything learned so far about the opponent's board.
    pub fn knowledge(&self) -> &Grid {
        &self.knowledge
    }

    /// Unhit segments left on the opponent's ship of `kind`.
    pub fn health(&self, kind: ShipKind) -> Option<usize> {
        self.ships.get(&kind).map(|t| t.health)
    }

    /// Pending candidate cells for `kind`, front first.
    pub fn target_queue(&self, kind: ShipKind) -> Vec<Coord> {
        self.ships
            .get(&kind)
            .map(|t| t.queue.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Confirmed hits on the still-afloat ship of `kind`.
    pub fn hit_history(&self, kind: ShipKind) -> &[Coord] {
        match self.ships.get(&kind) {
            Some(t) => &t.hits,
            None => &[],
        }
    }

    pub fn orientation(&self, kind: ShipKind) -> Option<Orientation> {
        self.ships.get(&kind).and_then(|t| t.orientation)
    }

    /// `true` while some target queue holds work.
    pub fn is_targeting(&self) -> bool {
        self.ships.values().any(|t| !t.queue.is_empty())
    }

    /// Choose the next cell to attack.
    pub fn next_move(&mut self) -> Result<Coord, TargetingError> {
        let knowledge = &self.knowledge;
        for (kind, track) in self.ships.iter_mut() {
            while let Some((r, c)) = track.queue.pop_front() {
                if knowledge.is_unknown(r, c) {
                    trace!("target {:?} for {}", (r, c), kind);
                    return Ok((r, c));
                }
            }
        }

        while let Some(&(r, c)) = self.search.get(self.cursor) {
            self.cursor += 1;
            if on_parity((r, c)) && self.knowledge.is_unknown(r, c) {
                trace!("hunt {:?}", (r, c));
                return Ok((r, c));
            }
        }

        match self.knowledge.unknown_cells().next() {
            Some(coord) => {
                debug!("parity search exhausted, scanning {:?}", coord);
                Ok(coord)
            }
            None => Err(TargetingError::ExhaustedSearch),
        }
    }

    /// Learn the outcome of an attack on `coord`.
    ///
    /// Fails without touching any state when the cell is off the board or
    /// already resolved, or when the hit names a ship that is not afloat.
    pub fn process_result(&mut self, coord: Coord, outcome: Outcome) -> Result<(), TargetingError> {
        if !in_bounds(coord.0, coord.1) {
            return Err(TargetingError::invalid(coord, MoveRejection::OutOfBounds));
        }
        if !self.knowledge.is_unknown(coord.0, coord.1) {
            return Err(TargetingError::invalid(coord, MoveRejection::AlreadyResolved));
        }
        let kind = match outcome {
            Outcome::Miss => return self.knowledge.record(coord, outcome),
            Outcome::Hit(kind) => kind,
        };
        match self.ships.get(&kind) {
            None => return Err(TargetingError::invalid(coord, MoveRejection::UnknownShip)),
            Some(t) if t.health == 0 => {
                return Err(TargetingError::invalid(coord, MoveRejection::ShipAlreadySunk))
            }
            Some(_) => {}
        }
        self.knowledge.record(coord, outcome)?;

        let knowledge = &self.knowledge;
        let Some(track) = self.ships.get_mut(&kind) else {
            return Err(TargetingError::invalid(coord, MoveRejection::UnknownShip));
        };
        track.hits.push(coord);
        track.health -= 1;
        debug!("hit {} at {:?}, {} left", kind, coord, track.health);

        if track.health == 0 {
            debug!("{} sunk", kind);
            track.queue.clear();
            track.hits.clear();
            track.orientation = None;
            return Ok(());
        }

        if track.orientation.is_none() && track.hits.len() >= 2 {
            track.orientation = Orientation::between(track.hits[0], track.hits[1]);
            if let Some(o) = track.orientation {
                debug!("{} lies {:?}", kind, o);
            }
        }

        match track.orientation {
            Some(orientation) => extend_line(track, orientation, knowledge),
            None => {
                for (r, c) in neighbours(coord) {
                    if knowledge.is_unknown(r, c) {
                        track.enqueue_back((r, c));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Queue the cells that can still complete a ship known to lie along
/// `orientation`: unknown gaps between the hits first, then the frontier
/// next to the latest hit, then the other frontier.
fn extend_line(track: &mut ShipTrack, orientation: Orientation, knowledge: &Grid) {
    let Some(&first) = track.hits.first() else {
        return;
    };
    let Some(&latest) = track.hits.last() else {
        return;
    };
    let across = orientation.across(first);
    track.queue.retain(|&c| orientation.across(c) == across);

    let along = track.hits.iter().map(|&c| orientation.along(c));
    let min = along.clone().min().unwrap_or(0);
    let max = along.max().unwrap_or(0);

    let mut frontier = Vec::with_capacity(2);
    if max - min + 1 < track.length {
        let low = min.checked_sub(1).map(|a| orientation.cell(across, a));
        let high = Some(orientation.cell(across, max + 1));
        // the end nearest the latest hit goes in front
        if orientation.along(latest) == min {
            frontier.extend([high, low]);
        } else {
            frontier.extend([low, high]);
        }
    }
    for (r, c) in frontier.into_iter().flatten() {
        if knowledge.is_unknown(r, c) {
            track.enqueue_front((r, c));
        }
    }

    for a in (min + 1..max).rev() {
        let (r, c) = orientation.cell(across, a);
        if knowledge.is_unknown(r, c) {
            track.enqueue_front((r, c));
        }
    }
}
