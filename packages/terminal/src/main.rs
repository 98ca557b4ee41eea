use std::io;
use std::process::ExitCode;

use word_wizard_core::ListStore;
use word_wizard_terminal::config::Config;
use word_wizard_terminal::logging;
use word_wizard_terminal::{App, AppResult, SqliteStorage};

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let config = Config::from_env();

    let _log_guard = logging::init_tracing(&config);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "word wizard stopped");
            eprintln!("word-wizard: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> AppResult<()> {
    let storage = SqliteStorage::open(&config.db_path)?;
    tracing::info!(db_path = %storage.db_path(), seeded = config.seed.is_some(), "word wizard starting");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut app = App::new(ListStore::new(storage), stdin.lock(), stdout.lock()).configured(config);
    app.run()
}
