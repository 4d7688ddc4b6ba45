//! Ship orientation and placement geometry.

use serde::{Deserialize, Serialize};

use crate::board::in_bounds;
use crate::common::{BoardError, Coord};
use crate::config::ShipKind;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Orientation of the line through two distinct cells, if they share a
    /// row or a column.
    pub fn between(a: Coord, b: Coord) -> Option<Self> {
        if a == b {
            None
        } else if a.0 == b.0 {
            Some(Orientation::Horizontal)
        } else if a.1 == b.1 {
            Some(Orientation::Vertical)
        } else {
            None
        }
    }

    /// Position of `coord` along this axis.
    pub fn along(self, coord: Coord) -> usize {
        match self {
            Orientation::Horizontal => coord.1,
            Orientation::Vertical => coord.0,
        }
    }

    /// Position of `coord` across this axis.
    pub fn across(self, coord: Coord) -> usize {
        match self {
            Orientation::Horizontal => coord.0,
            Orientation::Vertical => coord.1,
        }
    }

    /// Cell at `along` on the line whose cross coordinate is `across`.
    pub fn cell(self, across: usize, along: usize) -> Coord {
        match self {
            Orientation::Horizontal => (across, along),
            Orientation::Vertical => (along, across),
        }
    }
}

/// A ship of `length` cells anchored at its top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub kind: ShipKind,
    pub length: usize,
    pub row: usize,
    pub col: usize,
    pub orientation: Orientation,
}

impl Placement {
    /// Build a placement, checking that every cell lies on the board.
    pub fn new(
        kind: ShipKind,
        length: usize,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<Self, BoardError> {
        let placement = Placement {
            kind,
            length,
            row,
            col,
            orientation,
        };
        if placement.cells().all(|(r, c)| in_bounds(r, c)) {
            Ok(placement)
        } else {
            Err(BoardError::ShipOutOfBounds(kind))
        }
    }

    /// Cells covered by the ship, from the anchor outwards.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.length).map(move |i| match self.orientation {
            Orientation::Horizontal => (self.row, self.col + i),
            Orientation::Vertical => (self.row + i, self.col),
        })
    }
}
