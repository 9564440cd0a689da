use std::{io, process};

use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{run::run, session::Session, terminal::TerminalUi};
use common::{config::Settings, store::MazeStore};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // Stderr keeps log lines out of the drawn maze.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

fn main() {
    init_tracing();

    let settings = Settings::from_env();
    info!(
        save_dir = %settings.save_dir.display(),
        default_size = settings.default_size,
        seed = ?settings.seed,
        "starting"
    );

    let store = MazeStore::new(settings.save_dir.clone());
    let mut session = Session::new(settings.seed);
    let mut ui = TerminalUi::new();

    if let Err(e) = run(&mut ui, &mut session, &store, settings.default_size) {
        eprintln!("Error: {}.", e);
        process::exit(1);
    }
}
