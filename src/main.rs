mod config;
mod services;

use std::process::ExitCode;

use canvas::engine::EngineCore;
use canvas::store;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::{Config, ConfigError};

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not encode draw plan: {0}")]
    Encode(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let config = Config::parse();
    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "squareboard failed");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; stdout carries draw plans.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

async fn run(config: Config) -> Result<(), HostError> {
    let options = config.board_options()?;
    let mut file_store = config.store()?;
    let mut core = EngineCore::load(&mut file_store, options);
    info!(
        path = %file_store.path().display(),
        squares = core.board.square_count(),
        arrows = core.board.arrow_count(),
        "board ready"
    );
    core.subscribe(store::save_on_publish(file_store));
    core.request_redraw();

    let events = services::input::open(config.events.as_deref()).await?;
    let mut stdout = tokio::io::stdout();
    let stats =
        services::frame::run(&mut core, events, &mut stdout, config.frame_interval(), config.emit_plan).await?;
    info!(events = stats.events, frames = stats.frames, "input finished");
    Ok(())
}
