use std::io::{self, BufRead, Write};

use anyhow::Context;
use battleship_cpu::prelude::*;
use battleship_cpu::{init_logging, ui::render_grid, SharedInput};

use clap::{Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about = "Battleship against a hunt/target computer opponent", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the computer on this terminal.
    Play {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, value_enum, default_value_t = Strategy::Trained)]
        opponent: Strategy,
        #[arg(long, help = "Place your ships by hand instead of at random")]
        manual: bool,
    },
    /// Two humans taking turns at one terminal.
    Hotseat {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Watch two computer players on the local machine.
    Local {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, value_enum, default_value_t = Strategy::Trained)]
        first: Strategy,
        #[arg(long, value_enum, default_value_t = Strategy::Random)]
        second: Strategy,
    },
}

fn seeded_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => {
            println!("Using fixed seed: {} (game will be reproducible)", s);
            SmallRng::seed_from_u64(s)
        }
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

fn ask<R: BufRead>(input: &mut R, text: &str) -> anyhow::Result<String> {
    print!("{}", text);
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        anyhow::bail!("input closed");
    }
    Ok(line.trim().to_string())
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let fleet = FleetConfig::standard();

    match cli.command {
        Commands::Play {
            seed,
            opponent,
            manual,
        } => {
            println!("Welcome to Battleship!");
            let mut rng = seeded_rng(seed);

            let mut human = CliPlayer::stdio(&fleet);
            let mut human_ocean = Ocean::new(fleet.clone());
            if manual {
                human.place_ships(&mut rng, &mut human_ocean)?;
            } else {
                human_ocean.place_fleet_randomly(&mut rng)?;
                human.set_own_board(human_ocean.grid());
            }
            println!("Your board:\n{}", render_grid(human_ocean.grid(), true));

            let mut computer = build_player(opponent, &fleet, &mut rng);
            let mut computer_ocean = Ocean::new(fleet.clone());
            computer.place_ships(&mut rng, &mut computer_ocean)?;

            let mut sides = [
                Side::new(&mut human, human_ocean),
                Side::new(&mut *computer, computer_ocean),
            ];
            let result = play_match(&mut sides, MAX_ROUNDS)?;

            println!("\nGame Over!");
            println!("Your board:\n{}", render_grid(sides[0].ocean.grid(), true));
            println!("Computer board:\n{}", render_grid(sides[1].ocean.grid(), true));
            match status_of(&result, 0) {
                GameStatus::Won => println!("You win! All enemy ships sunk!"),
                GameStatus::Lost => println!("The computer wins after {} attacks.", result.attacks[1]),
                GameStatus::InProgress => println!("No winner after {} rounds.", result.rounds),
            }
        }
        Commands::Hotseat { seed } => {
            println!("Welcome to Battleship!");
            let mut rng = seeded_rng(seed);
            let mut input = SharedInput::new(io::stdin().lock());
            ask(&mut input, "Press Enter to begin setup:")?;
            let names = [
                ask(&mut input, "Player 1, please enter your name:")?,
                ask(&mut input, "Player 2, please enter your name:")?,
            ];

            let mut players = [
                CliPlayer::hotseat(input.clone(), io::stdout(), &fleet, &names[0], &names[1]),
                CliPlayer::hotseat(input.clone(), io::stdout(), &fleet, &names[1], &names[0]),
            ];
            let mut oceans = [Ocean::new(fleet.clone()), Ocean::new(fleet.clone())];
            for (player, ocean) in players.iter_mut().zip(oceans.iter_mut()) {
                player
                    .place_ships(&mut rng, ocean)
                    .context("setting up the board")?;
            }

            let [p1, p2] = &mut players;
            let [o1, o2] = oceans;
            let mut sides = [Side::new(p1, o1), Side::new(p2, o2)];
            let result = play_match(&mut sides, MAX_ROUNDS)?;
            match result.winner {
                Some(w) => println!("{} wins! All enemy ships sunk!", names[w]),
                None => println!("No winner after {} rounds.", result.rounds),
            }
            println!("Game Over!");
        }
        Commands::Local { seed, first, second } => {
            println!("Starting local {:?} vs {:?} game...", first, second);
            let mut rng = seeded_rng(seed);

            let ocean1 = random_ocean(&fleet, &mut rng)?;
            let ocean2 = random_ocean(&fleet, &mut rng)?;
            let mut p1 = build_player(first, &fleet, &mut rng);
            let mut p2 = build_player(second, &fleet, &mut rng);

            let mut sides = [Side::new(&mut *p1, ocean1), Side::new(&mut *p2, ocean2)];
            let result = play_match(&mut sides, MAX_ROUNDS)?;

            for (i, side) in sides.iter().enumerate() {
                println!("Player {} board:\n{}", i + 1, render_grid(side.ocean.grid(), true));
            }
            match result.winner {
                Some(w) => println!(
                    "Player {} wins after {} attacks ({} rounds).",
                    w + 1,
                    result.attacks[w],
                    result.rounds
                ),
                None => println!("No winner after {} rounds.", result.rounds),
            }
        }
    }
    Ok(())
}
