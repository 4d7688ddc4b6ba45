//! Board dimensions, ship kinds and fleet configuration.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::FleetError;

pub const BOARD_SIZE: usize = 9;

/// Shortest ship a fleet may contain. Parity search relies on it.
pub const MIN_SHIP_LENGTH: usize = 2;

/// The four kinds of ship. Declaration order is targeting priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ShipKind {
    Carrier,
    Battleship,
    Submarine,
    PatrolBoat,
}

impl ShipKind {
    pub const ALL: [ShipKind; 4] = [
        ShipKind::Carrier,
        ShipKind::Battleship,
        ShipKind::Submarine,
        ShipKind::PatrolBoat,
    ];

    /// Length of the kind in the standard fleet.
    pub const fn standard_length(self) -> usize {
        match self {
            ShipKind::Carrier => 5,
            ShipKind::Battleship => 4,
            ShipKind::Submarine => 3,
            ShipKind::PatrolBoat => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShipKind::Carrier => "Carrier",
            ShipKind::Battleship => "Battleship",
            ShipKind::Submarine => "Submarine",
            ShipKind::PatrolBoat => "Patrol Boat",
        }
    }

    /// Single-letter marker used when rendering boards.
    pub fn symbol(self) -> char {
        match self {
            ShipKind::Carrier => 'C',
            ShipKind::Battleship => 'B',
            ShipKind::Submarine => 'S',
            ShipKind::PatrolBoat => 'P',
        }
    }
}

impl fmt::Display for ShipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShipKind {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        ShipKind::ALL
            .into_iter()
            .find(|k| {
                let name: String = k.name().chars().filter(|c| !c.is_whitespace()).collect();
                name.eq_ignore_ascii_case(&wanted) || wanted.eq_ignore_ascii_case(&k.symbol().to_string())
            })
            .ok_or_else(|| FleetError::UnknownKind(s.to_string()))
    }
}

/// Immutable mapping from ship kind to length, shared by the ocean and
/// every attacker of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<ShipKind, usize>", into = "BTreeMap<ShipKind, usize>")]
pub struct FleetConfig {
    lengths: BTreeMap<ShipKind, usize>,
}

impl FleetConfig {
    /// Carrier(5), Battleship(4), Submarine(3), Patrol Boat(2).
    pub fn standard() -> Self {
        Self {
            lengths: ShipKind::ALL
                .into_iter()
                .map(|k| (k, k.standard_length()))
                .collect(),
        }
    }

    /// Build a fleet from explicit lengths. Every length must fit on the
    /// board and be at least [`MIN_SHIP_LENGTH`].
    pub fn new<I>(ships: I) -> Result<Self, FleetError>
    where
        I: IntoIterator<Item = (ShipKind, usize)>,
    {
        let mut lengths = BTreeMap::new();
        for (kind, length) in ships {
            if !(MIN_SHIP_LENGTH..=BOARD_SIZE).contains(&length) {
                return Err(FleetError::InvalidLength { kind, length });
            }
            if lengths.insert(kind, length).is_some() {
                return Err(FleetError::DuplicateKind(kind));
            }
        }
        if lengths.is_empty() {
            return Err(FleetError::Empty);
        }
        Ok(Self { lengths })
    }

    pub fn length(&self, kind: ShipKind) -> Option<usize> {
        self.lengths.get(&kind).copied()
    }

    /// Kinds in priority order.
    pub fn kinds(&self) -> impl Iterator<Item = ShipKind> + '_ {
        self.lengths.keys().copied()
    }

    pub fn ships(&self) -> impl Iterator<Item = (ShipKind, usize)> + '_ {
        self.lengths.iter().map(|(&k, &l)| (k, l))
    }

    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    /// Total number of ship segments in the fleet.
    pub fn total_cells(&self) -> usize {
        self.lengths.values().sum()
    }
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<BTreeMap<ShipKind, usize>> for FleetConfig {
    type Error = FleetError;

    fn try_from(map: BTreeMap<ShipKind, usize>) -> Result<Self, Self::Error> {
        FleetConfig::new(map)
    }
}

impl From<FleetConfig> for BTreeMap<ShipKind, usize> {
    fn from(fleet: FleetConfig) -> Self {
        fleet.lengths
    }
}
