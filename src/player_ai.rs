use rand::{rngs::SmallRng, seq::IndexedRandom};

use crate::{
    ai::TargetingEngine,
    board::Grid,
    common::{Coord, Outcome, TargetingError},
    config::FleetConfig,
    player::{Player, ShipTally},
};

/// Computer player driven by the hunt/target [`TargetingEngine`].
#[derive(Debug, Clone)]
pub struct AiPlayer {
    engine: TargetingEngine,
}

impl AiPlayer {
    pub fn new(fleet: &FleetConfig) -> Self {
        Self {
            engine: TargetingEngine::new(fleet),
        }
    }

    pub fn engine(&self) -> &TargetingEngine {
        &self.engine
    }
}

impl Player for AiPlayer {
    fn next_move(&mut self) -> Result<Coord, TargetingError> {
        self.engine.next_move()
    }

    fn process_result(&mut self, coord: Coord, outcome: Outcome) -> Result<(), TargetingError> {
        self.engine.process_result(coord, outcome)
    }
}

/// Baseline player that fires at a uniformly random unknown cell.
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    knowledge: Grid,
    tally: ShipTally,
    rng: SmallRng,
}

impl RandomPlayer {
    pub fn new(fleet: &FleetConfig, rng: SmallRng) -> Self {
        Self {
            knowledge: Grid::new(),
            tally: ShipTally::new(fleet),
            rng,
        }
    }

    pub fn knowledge(&self) -> &Grid {
        &self.knowledge
    }
}

impl Player for RandomPlayer {
    fn next_move(&mut self) -> Result<Coord, TargetingError> {
        let open: Vec<Coord> = self.knowledge.unknown_cells().collect();
        open.choose(&mut self.rng)
            .copied()
            .ok_or(TargetingError::ExhaustedSearch)
    }

    fn process_result(&mut self, coord: Coord, outcome: Outcome) -> Result<(), TargetingError> {
        self.tally.check(coord, outcome)?;
        self.knowledge.record(coord, outcome)?;
        self.tally.count(outcome);
        Ok(())
    }
}
