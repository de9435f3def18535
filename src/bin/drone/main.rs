//! drone - performance drone with a terminal control surface
//!
//! Run with: cargo run --bin drone -- [piece]
//!
//! Pieces: second_hand (default), listening

mod app;
mod ui;

use app::Drone;
use drone_chance::synth::{PieceConfig, PIECE_NAMES};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let name = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "second_hand".to_owned());
    let piece = PieceConfig::by_name(&name).map_err(|err| {
        color_eyre::eyre::eyre!("{err}; expected one of {PIECE_NAMES:?}")
    })?;

    Drone::new(piece).run()
}
