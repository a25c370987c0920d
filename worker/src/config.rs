//! Locating and loading the worker's TOML configuration.

use std::path::{Path, PathBuf};

use lolstats_types::WorkerConfig;
use thiserror::Error;

const CONFIG_DIR: &str = "lolstats";
const CONFIG_FILE: &str = "worker.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// `<config_dir>/lolstats/worker.toml`, if the platform has a config dir.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load from `explicit` if given, else from [`default_path`] if that file exists,
/// else defaults.
///
/// An explicit path that can't be read is an error; a missing default file is not.
pub fn load(explicit: Option<&Path>) -> Result<WorkerConfig, ConfigError> {
    match explicit {
        Some(path) => load_from(path),
        None => match default_path() {
            Some(path) if path.is_file() => load_from(&path),
            _ => Ok(WorkerConfig::default()),
        },
    }
}

pub fn load_from(path: &Path) -> Result<WorkerConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
