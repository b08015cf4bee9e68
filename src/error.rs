//! Error type shared by every melt component.
//!
//! Library code returns [`MeltError`]; the binary converts it to `anyhow::Error`
//! at the top level, logs it and exits non-zero.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum MeltError {
    #[error("failed to access config file {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write default config to {path:?}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read input: {0}")]
    Input(#[from] std::io::Error),

    #[error("invalid url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response (status {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// The document service answered with `ok: false`.
    #[error("document rejected: {0}")]
    Rejected(String),

    #[error("HipChat: No room specified")]
    MissingRoom,
}

pub type Result<T> = std::result::Result<T, MeltError>;
