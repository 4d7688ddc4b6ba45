mod ai;
mod board;
mod common;
mod config;
mod game;
mod logging;
mod player;
mod player_ai;
mod player_cli;
pub mod prelude;
mod ship;
pub mod sim;
pub mod ui;

pub use ai::*;
pub use board::*;
pub use common::*;
pub use config::*;
pub use game::*;
pub use logging::{init_logging, init_logging_with_default};
pub use player::*;
pub use player_ai::*;
pub use player_cli::*;
pub use ship::*;
