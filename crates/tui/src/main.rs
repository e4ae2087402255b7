mod app;

use anyhow::Result;
use std::fs::{self, OpenOptions};

use movielink_core::{
    config::{self, AppConfig},
    GameController, MovieDatabase,
};
use tracing::{error, info};
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    config::ensure_default_config()?;
    let config = AppConfig::load()?;

    let database = MovieDatabase::new(&config)?;
    println!("Loading movie catalog…");
    match database.preload_popular().await {
        Ok(count) => info!(count, "catalog ready"),
        Err(err) => error!("catalog preload failed: {err:#}"),
    }

    let autocomplete = database.build_autocomplete(config.suggestion_limit)?;
    let controller = GameController::new(database, autocomplete);

    let mut app = app::MovieLinkApp::new(controller, config.turn_time_limit());
    app.run().await
}

fn init_logging() -> Result<()> {
    let log_dir = std::env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("movielink.log");

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // The terminal belongs to the UI, so logs only go to the file.
    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .compact()
        .with_ansi(false)
        .with_writer(move || {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
                .expect("failed to open log file")
        });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
