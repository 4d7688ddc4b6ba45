use std::cell::RefCell;
use std::io::{self, BufRead, Read, Write};
use std::rc::Rc;

use rand::rngs::SmallRng;

use crate::{
    board::Grid,
    common::{BoardError, Coord, Outcome, ShotReport, TargetingError},
    config::{FleetConfig, ShipKind},
    game::Ocean,
    player::{Player, ShipTally},
    ship::Orientation,
    ui::{describe_shot, parse_coord, render_grid},
};

/// Clonable handle onto one line-oriented reader, so several players can
/// share a terminal. Each handle pulls at most one line at a time.
#[derive(Debug)]
pub struct SharedInput<R> {
    inner: Rc<RefCell<R>>,
    line: Vec<u8>,
    pos: usize,
}

impl<R: BufRead> SharedInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            inner: Rc::new(RefCell::new(reader)),
            line: Vec::new(),
            pos: 0,
        }
    }
}

impl<R> Clone for SharedInput<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            line: Vec::new(),
            pos: 0,
        }
    }
}

impl<R: BufRead> Read for SharedInput<R> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let available = self.fill_buf()?;
        let n = available.len().min(out.len());
        out[..n].copy_from_slice(&available[..n]);
        self.consume(n);
        Ok(n)
    }
}

impl<R: BufRead> BufRead for SharedInput<R> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.pos >= self.line.len() {
            self.line.clear();
            self.pos = 0;
            self.inner.borrow_mut().read_until(b'\n', &mut self.line)?;
        }
        Ok(&self.line[self.pos..])
    }

    fn consume(&mut self, amt: usize) {
        self.pos = (self.pos + amt).min(self.line.len());
    }
}

/// Names used when two humans take turns at one terminal.
#[derive(Debug, Clone)]
struct Seat {
    name: String,
    opponent: String,
}

/// Human player reading commands from `input` and writing prompts to
/// `output`.
pub struct CliPlayer<R, W> {
    input: R,
    output: W,
    knowledge: Grid,
    tally: ShipTally,
    own: Option<Grid>,
    seat: Option<Seat>,
}

impl CliPlayer<io::StdinLock<'static>, io::Stdout> {
    /// Player on the process's stdin/stdout.
    pub fn stdio(fleet: &FleetConfig) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), fleet)
    }
}

impl<R: BufRead, W: Write> CliPlayer<R, W> {
    pub fn new(input: R, output: W, fleet: &FleetConfig) -> Self {
        Self {
            input,
            output,
            knowledge: Grid::new(),
            tally: ShipTally::new(fleet),
            own: None,
            seat: None,
        }
    }

    /// Player sharing the terminal with another human: ship setup and every
    /// turn are bracketed by hand-over prompts.
    pub fn hotseat(input: R, output: W, fleet: &FleetConfig, name: &str, opponent: &str) -> Self {
        let mut player = Self::new(input, output, fleet);
        player.seat = Some(Seat {
            name: name.to_string(),
            opponent: opponent.to_string(),
        });
        player
    }

    pub fn knowledge(&self) -> &Grid {
        &self.knowledge
    }

    /// Show `grid` as the player's own board from now on.
    pub fn set_own_board(&mut self, grid: &Grid) {
        self.own = Some(*grid);
    }

    /// Recover the writer, e.g. to inspect a transcript.
    pub fn into_output(self) -> W {
        self.output
    }

    fn prompt(&mut self, text: &str) -> Result<String, TargetingError> {
        write!(self.output, "{}", text)
            .and_then(|()| self.output.flush())
            .map_err(|e| TargetingError::Input(e.to_string()))?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| TargetingError::Input(e.to_string()))?;
        if read == 0 {
            return Err(TargetingError::Input("end of input".to_string()));
        }
        Ok(line.trim().to_string())
    }

    /// Wait for enter; end of input just moves on.
    fn pause(&mut self, text: &str) {
        let _ = self.prompt(text);
    }

    fn say(&mut self, text: &str) {
        let _ = writeln!(self.output, "{}", text);
    }
}

/// Parse `A5 H` / `b2 v` into a ship anchor and orientation.
fn parse_placement(line: &str) -> Result<(Coord, Orientation), String> {
    let mut parts = line.split_whitespace();
    let coord = parse_coord(parts.next().unwrap_or(""))?;
    let orientation = match parts.next().map(|p| p.to_ascii_uppercase()) {
        Some(o) if o == "H" => Orientation::Horizontal,
        Some(o) if o == "V" => Orientation::Vertical,
        _ => return Err("Orientation must be H or V".to_string()),
    };
    Ok((coord, orientation))
}

impl<R: BufRead, W: Write> Player for CliPlayer<R, W> {
    fn place_ships(&mut self, rng: &mut SmallRng, ocean: &mut Ocean) -> Result<(), BoardError> {
        if let Some(seat) = &self.seat {
            let text = format!(
                "{}, please set up your board. Turn the computer so your opponent cannot see.",
                seat.name
            );
            self.say(&text);
        }
        self.say("Place your ships (e.g. A5 H). Press enter for random placement.");
        let ships: Vec<(ShipKind, usize)> = ocean.fleet().ships().collect();
        for (kind, length) in ships {
            loop {
                let board = render_grid(ocean.grid(), true);
                self.say(&board);
                let text = format!("Place your {} (size {}): ", kind, length);
                let Ok(line) = self.prompt(&text) else {
                    // no more input: finish the layout at random
                    ocean.place_fleet_randomly(rng)?;
                    self.set_own_board(ocean.grid());
                    return Ok(());
                };
                if line.is_empty() {
                    let (r, c, o) = ocean.random_placement(rng, kind)?;
                    ocean.place(kind, r, c, o)?;
                    break;
                }
                match parse_placement(&line) {
                    Ok(((r, c), o)) => match ocean.place(kind, r, c, o) {
                        Ok(()) => {
                            self.say(&format!("{} placed.", kind));
                            break;
                        }
                        Err(e) => self.say(&format!("Invalid placement: {}. Try again.", e)),
                    },
                    Err(e) => self.say(&format!("{}. Try again.", e)),
                }
            }
        }
        self.set_own_board(ocean.grid());
        if let Some(seat) = self.seat.clone() {
            self.say(&format!("Thank you for setting up, {}.", seat.name));
            self.pause("Press Enter to continue:");
        }
        Ok(())
    }

    fn next_move(&mut self) -> Result<Coord, TargetingError> {
        if self.knowledge.unknown_cells().next().is_none() {
            return Err(TargetingError::ExhaustedSearch);
        }
        if let Some(seat) = self.seat.clone() {
            self.pause(&format!(
                "{}, please turn the computer so that {} cannot see. Press Enter when you have done so:",
                seat.name, seat.opponent
            ));
            self.say(&format!("{}'s Turn", seat.name));
        }
        let board = render_grid(&self.knowledge, false);
        self.say("Target grid:");
        self.say(&board);
        if let Some(own) = self.own {
            let board = render_grid(&own, true);
            self.say("Your board:");
            self.say(&board);
        }
        loop {
            let line = self.prompt("Enter coordinates to attack (A1, B2, etc.): ")?;
            match parse_coord(&line) {
                Ok((r, c)) if self.knowledge.is_unknown(r, c) => return Ok((r, c)),
                Ok(_) => self.say("You have already attacked here. Try again."),
                Err(e) => self.say(&format!("Invalid coordinate: {}. Try again.", e)),
            }
        }
    }

    fn process_result(&mut self, coord: Coord, outcome: Outcome) -> Result<(), TargetingError> {
        self.tally.check(coord, outcome)?;
        self.knowledge.record(coord, outcome)?;
        let sunk = self.tally.count(outcome);
        let text = format!("You fired at {}", describe_shot(coord, ShotReport { outcome, sunk }));
        self.say(&text);
        if self.seat.is_some() {
            self.pause("Press Enter to end your turn:");
        }
        Ok(())
    }

    fn handle_opponent_attack(&mut self, coord: Coord, report: ShotReport, own: &Grid) {
        self.set_own_board(own);
        let text = format!("Opponent fired at {}", describe_shot(coord, report));
        self.say(&text);
    }
}
