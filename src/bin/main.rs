extern crate seabed;

use std::io::{self, Write};

use seabed::{input::InputReader, strategy::Strategy, world::World};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // stdout is reserved for commands
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let stdin = io::stdin();
    let mut input = InputReader::new(stdin.lock());

    let creatures = input.read_catalog()?;
    tracing::info!(creatures = creatures.len(), "catalog loaded");

    let mut world = World::new(creatures);
    let strategy = Strategy::new();
    let mut out = io::stdout().lock();

    // game loop
    while let Some(turn) = input.read_turn()? {
        world.advance(turn);

        for cmd in strategy.play(&world) {
            writeln!(out, "{cmd}")?;
        }
        out.flush()?;
    }

    tracing::info!(turns = world.iter, "input closed");
    Ok(())
}
