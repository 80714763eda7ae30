//! Host configuration: command-line flags with `SQUAREBOARD_*` environment
//! fallbacks, plus the optional board options file.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;
use std::time::Duration;

use canvas::options::BoardOptions;
use clap::Parser;

use crate::services::persistence::FileStore;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read options file {path}: {source}")]
    ReadOptions { path: PathBuf, source: std::io::Error },
    #[error("options file {path} is not valid: {source}")]
    ParseOptions { path: PathBuf, source: serde_json::Error },
    #[error("invalid board options: {0}")]
    InvalidOptions(&'static str),
    #[error("storage key {0:?} must be non-empty and contain no path separators")]
    InvalidStorageKey(String),
}

#[derive(Parser, Debug, Clone)]
#[command(name = "squareboard", about = "Square-and-arrow diagram board host")]
pub struct Config {
    /// Directory holding saved boards.
    #[arg(long, env = "SQUAREBOARD_STORAGE_DIR", default_value = ".squareboard")]
    pub storage_dir: PathBuf,

    /// Key the board is saved under.
    #[arg(long, env = "SQUAREBOARD_STORAGE_KEY", default_value = "CANVAS_SQUARES")]
    pub storage_key: String,

    /// JSON file overriding board dimensions, limits and colours.
    #[arg(long, env = "SQUAREBOARD_OPTIONS")]
    pub options: Option<PathBuf>,

    /// Frame clock period in milliseconds.
    #[arg(
        long,
        env = "SQUAREBOARD_FRAME_INTERVAL_MS",
        default_value_t = 16,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub frame_interval_ms: u64,

    /// JSON-lines input events; stdin when omitted.
    #[arg(long, env = "SQUAREBOARD_EVENTS")]
    pub events: Option<PathBuf>,

    /// Write each frame's draw plan to stdout as one JSON line.
    #[arg(long, env = "SQUAREBOARD_EMIT_PLAN")]
    pub emit_plan: bool,
}

impl Config {
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Board options from the options file, or the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or the
    /// options describe an unusable board.
    pub fn board_options(&self) -> Result<BoardOptions, ConfigError> {
        let Some(path) = &self.options else {
            return Ok(BoardOptions::default());
        };
        let raw = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::ReadOptions { path: path.clone(), source })?;
        let options: BoardOptions = serde_json::from_str(&raw)
            .map_err(|source| ConfigError::ParseOptions { path: path.clone(), source })?;
        validate_options(&options)?;
        Ok(options)
    }

    /// The file-backed store for the configured key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStorageKey`] for keys that would escape
    /// the storage directory.
    pub fn store(&self) -> Result<FileStore, ConfigError> {
        let key = self.storage_key.as_str();
        if key.is_empty() || key.contains(['/', '\\']) || key == "." || key == ".." {
            return Err(ConfigError::InvalidStorageKey(self.storage_key.clone()));
        }
        Ok(FileStore::new(&self.storage_dir, key))
    }
}

fn validate_options(options: &BoardOptions) -> Result<(), ConfigError> {
    if !(options.min_square_size > 0.0 && options.min_square_size < options.max_square_size) {
        return Err(ConfigError::InvalidOptions("min_square_size must be positive and below max_square_size"));
    }
    if !options.size_in_bounds(options.default_square_size) {
        return Err(ConfigError::InvalidOptions("default_square_size must lie strictly between the size limits"));
    }
    let fits = options.max_square_size + 2.0 * options.edge_margin();
    if options.canvas_width < fits || options.canvas_height < fits {
        return Err(ConfigError::InvalidOptions("canvas is too small for the largest square"));
    }
    if options.socket_radius <= 0.0 || options.resize_step <= 0.0 {
        return Err(ConfigError::InvalidOptions("socket_radius and resize_step must be positive"));
    }
    Ok(())
}
