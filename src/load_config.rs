//! `load_config`: reads the local JSON config, creating it with default hosts on first use.
//!
//! The file is never rewritten once it exists; host changes happen only through
//! manual edits.

use crate::config::Config;
use crate::error::{MeltError, Result};
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// `$HOME/.melt`, or `.melt` in the working directory when `HOME` is unset.
pub fn default_config_path() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".melt"),
        None => PathBuf::from(".melt"),
    }
}

/// Loads the config at `path`, or writes and returns the defaults if there is no file yet.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let content = match fs::read_to_string(path_ref) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(config_path = ?path_ref, "No config file found, writing defaults");
            let config = Config::with_default_hosts();
            write_config(path_ref, &config)?;
            config.trace_loaded();
            return Ok(config);
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(MeltError::ConfigIo {
                path: path_ref.to_path_buf(),
                source: e,
            });
        }
    };

    let config: Config = match serde_json::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config JSON");
            return Err(MeltError::ConfigParse {
                path: path_ref.to_path_buf(),
                source: e,
            });
        }
    };

    config.trace_loaded();
    Ok(config)
}

fn write_config(path: &Path, config: &Config) -> Result<()> {
    let io_err = |source| MeltError::ConfigIo {
        path: path.to_path_buf(),
        source,
    };

    let mut encoded = serde_json::to_vec(config).map_err(|source| MeltError::ConfigWrite {
        path: path.to_path_buf(),
        source,
    })?;
    encoded.push(b'\n');

    let mut file = File::create(path).map_err(|e| {
        error!(error = ?e, config_path = ?path, "Failed to create config file");
        io_err(e)
    })?;
    file.write_all(&encoded).map_err(io_err)?;

    info!(config_path = ?path, "Default config written");
    Ok(())
}
