//! events - print a play/rest walk of a prebuilt network
//!
//! Run with: cargo run --bin events -- [network] [beats] [seed]
//!
//! Prints one character per beat: `1` to play, `0` to rest.

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use rand::{rngs::StdRng, SeedableRng};

use drone_chance::chance::prebuilt::{events_network_by_name, PREBUILT_NAMES};

const DEFAULT_BEATS: usize = 64;

fn main() -> EyreResult<()> {
    color_eyre::install()?;

    let mut args = std::env::args().skip(1);
    let name = args.next().unwrap_or_else(|| "piano".to_owned());
    let beats = match args.next() {
        Some(beats) => beats
            .parse::<usize>()
            .wrap_err_with(|| format!("beat count '{beats}' is not a number"))?,
        None => DEFAULT_BEATS,
    };
    let mut rng = match args.next() {
        Some(seed) => StdRng::seed_from_u64(
            seed.parse::<u64>()
                .wrap_err_with(|| format!("seed '{seed}' is not a number"))?,
        ),
        None => StdRng::from_entropy(),
    };

    let mut network = events_network_by_name(&name)
        .ok_or_else(|| eyre!("unknown network '{name}', expected one of {PREBUILT_NAMES:?}"))??;
    network.validate()?;

    let values = network.walk(&mut rng, beats)?;
    let line: String = values
        .iter()
        .map(|&value| if value == 0 { '0' } else { '1' })
        .collect();
    println!("{line}");

    let played = values.iter().filter(|&&value| value != 0).count();
    eprintln!("{name}: {played}/{beats} beats played");
    Ok(())
}
