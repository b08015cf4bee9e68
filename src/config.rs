// melt/src/config.rs

use serde::{Deserialize, Serialize};
use tracing::info;

/// Document service used when no config file exists yet.
pub const DEFAULT_MELT_HOST: &str = "https://melt.grindvoll.org";
/// Chat service used when no config file exists yet.
pub const DEFAULT_HIPCHAT_HOST: &str = "https://api.hipchat.com/v2";

/// On-disk configuration, stored as a JSON object with PascalCase keys.
///
/// Missing keys deserialize to empty strings, so a hand-edited file that only
/// sets `HipChatToken` still loads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(rename = "MeltHost")]
    pub melt_host: String,
    #[serde(rename = "HipChatHost")]
    pub hipchat_host: String,
    #[serde(rename = "HipChatToken")]
    pub hipchat_token: String,
}

impl Config {
    /// The record written on first run: default hosts, no token.
    pub fn with_default_hosts() -> Self {
        Config {
            melt_host: DEFAULT_MELT_HOST.to_string(),
            hipchat_host: DEFAULT_HIPCHAT_HOST.to_string(),
            hipchat_token: String::new(),
        }
    }

    pub fn trace_loaded(&self) {
        info!(
            melt_host = %self.melt_host,
            hipchat_host = %self.hipchat_host,
            hipchat_token_set = !self.hipchat_token.is_empty(),
            "Loaded Config"
        );
    }
}
