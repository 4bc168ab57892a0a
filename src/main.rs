use std::io;
use std::path::PathBuf;

use clap::Parser;
use env_logger::Env;
use log::info;

use boxtop_puzzle::data::{load_default_game_config, load_game_config};
use boxtop_puzzle::ui::ConsolePresenter;
use boxtop_puzzle::Game;

/// Box Top Side Matching Puzzle on an 8x8 grid of lettered cubes.
#[derive(Debug, Parser)]
#[command(name = "boxtop", version)]
struct Args {
    /// Game configuration file [default: ./assets/data/game_config.json]
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for grid generation; overrides the configured seed.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let loaded = match &args.config {
        Some(path) => load_game_config(path),
        None => load_default_game_config(),
    };
    let mut config = match loaded {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load game config: {}", err);
            std::process::exit(1);
        }
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let game = Game::new(config);
    info!("seed {} (rerun with --seed {} to replay)", game.seed(), game.seed());

    let stdin = io::stdin();
    let mut presenter = ConsolePresenter::new(stdin.lock(), io::stdout());
    let summary = game.run(&mut presenter);
    info!(
        "finished after {} turns ({:?}) with score {}",
        summary.turns_played, summary.end, summary.score
    );
}
