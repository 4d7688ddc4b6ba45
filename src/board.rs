//! Grid of cell states, used both for a fleet's ground truth and for an
//! attacker's knowledge of an opponent.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::common::{Coord, MoveRejection, Outcome, TargetingError};
use crate::config::{ShipKind, BOARD_SIZE};

/// State of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Never attacked. On a ground-truth grid this is open water.
    #[default]
    Unknown,
    /// Unattacked ship segment. Only appears on ground-truth grids.
    Ship(ShipKind),
    /// Attacked, no ship.
    Miss,
    /// Attacked, ship of the given kind present.
    Hit(ShipKind),
}

impl Cell {
    /// `true` once the cell has been attacked.
    pub fn is_resolved(self) -> bool {
        matches!(self, Cell::Miss | Cell::Hit(_))
    }
}

impl From<Outcome> for Cell {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Miss => Cell::Miss,
            Outcome::Hit(kind) => Cell::Hit(kind),
        }
    }
}

/// Returns `true` when both coordinates lie in `[0, BOARD_SIZE)`.
pub fn in_bounds(row: usize, col: usize) -> bool {
    row < BOARD_SIZE && col < BOARD_SIZE
}

/// Every coordinate of the board in row-major order.
pub fn all_coords() -> impl Iterator<Item = Coord> {
    (0..BOARD_SIZE).flat_map(|r| (0..BOARD_SIZE).map(move |c| (r, c)))
}

/// In-bounds up/down/left/right neighbours of a cell, in that order.
pub fn neighbours((row, col): Coord) -> impl Iterator<Item = Coord> {
    [
        row.checked_sub(1).map(|r| (r, col)),
        Some((row + 1, col)),
        col.checked_sub(1).map(|c| (row, c)),
        Some((row, col + 1)),
    ]
    .into_iter()
    .flatten()
    .filter(|&(r, c)| in_bounds(r, c))
}

/// Fixed `BOARD_SIZE`×`BOARD_SIZE` grid of [`Cell`]s.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Grid {
    /// Create a grid with every cell unknown.
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Unknown; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Cell at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Overwrite a cell. Returns `false` and leaves the grid untouched when
    /// out of bounds.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> bool {
        match self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    pub fn is_unknown(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == Some(Cell::Unknown)
    }

    /// `true` iff no live ship segment remains.
    pub fn all_ships_sunk(&self) -> bool {
        !self
            .cells
            .iter()
            .flatten()
            .any(|cell| matches!(cell, Cell::Ship(_)))
    }

    /// Coordinates of the cells that have not been attacked, row-major.
    pub fn unknown_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        all_coords().filter(move |&(r, c)| self.is_unknown(r, c))
    }

    pub fn count(&self, pred: impl Fn(Cell) -> bool) -> usize {
        self.cells.iter().flatten().filter(|&&c| pred(c)).count()
    }

    /// Record an attack outcome on a knowledge grid.
    ///
    /// The cell must be in bounds and still unknown; the grid is unchanged
    /// on error.
    pub fn record(&mut self, coord: Coord, outcome: Outcome) -> Result<(), TargetingError> {
        let (row, col) = coord;
        match self.get(row, col) {
            None => Err(TargetingError::invalid(coord, MoveRejection::OutOfBounds)),
            Some(cell) if cell.is_resolved() => {
                Err(TargetingError::invalid(coord, MoveRejection::AlreadyResolved))
            }
            Some(_) => {
                self.set(row, col, outcome.into());
                Ok(())
            }
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.iter() {
            for cell in row.iter() {
                let ch = match cell {
                    Cell::Unknown => '.',
                    Cell::Ship(k) => k.symbol(),
                    Cell::Miss => 'o',
                    Cell::Hit(_) => 'X',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
