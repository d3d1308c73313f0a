mod config;
mod logging;
mod models;
mod quote;
mod report;
mod run;
mod store;
mod summary;
mod ui;

use anyhow::Result;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::load()?;
    config.ensure_data_dir()?;
    logging::setup_logging(&config.log_path())?;
    tracing::debug!(?config, "configuration loaded");

    let store = store::Store::open(&config.db_path())?;

    match args.len() {
        1 => run::as_tui(&store, &config),
        2.. => run::as_cli(&args, &store, &config),
        _ => {
            eprintln!("Usage: expensetui [command]");
            Ok(())
        }
    }
}
