#![doc = "Document publishing against a melt host: builds the upload URL, posts the text and turns the JSON answer into a public link."]
//
//! # Publishing (melt document service)
//!
//! - `POST {host}/documents` lets the server pick the key.
//! - `POST {host}/documents/custom/{key}` requests a specific key. The key is
//!   inserted verbatim; callers must supply a URL-safe token.
//!
//! The service signals failure inside the JSON body (`ok: false` plus a
//! `message`), so the HTTP status is only reported, never branched on.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Deserialize;

use crate::config::Config;
use crate::contract::Publisher;
use crate::error::{MeltError, Result};

/// Answer from the document service. Every field may be absent.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PublishResponse {
    pub key: String,
    pub data: String,
    pub ok: bool,
    pub message: String,
}

/// Upload URL for `key`, or the server-assigned-key endpoint when `key` is empty.
pub fn document_url(host: &str, key: &str) -> String {
    if key.is_empty() {
        format!("{host}/documents")
    } else {
        format!("{host}/documents/custom/{key}")
    }
}

/// HTTP client for one melt host.
pub struct MeltClient {
    client: Client,
    host: String,
}

impl MeltClient {
    pub fn new(host: impl Into<String>) -> Self {
        MeltClient {
            client: Client::new(),
            host: host.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.melt_host.clone())
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

#[async_trait]
impl Publisher for MeltClient {
    async fn publish(&self, key: &str, body: Vec<u8>) -> Result<String> {
        let url = document_url(&self.host, key);
        tracing::info!(url = %url, bytes = body.len(), "Publishing document");

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "text/plain")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, url = %url, "Document upload failed");
                MeltError::Transport(e)
            })?;

        let status = response.status();
        let text = response.text().await?;
        tracing::debug!(status = status.as_u16(), body = %text, "Document service responded");

        let parsed: PublishResponse = serde_json::from_str(&text).map_err(|source| {
            tracing::error!(status = status.as_u16(), error = %source, "Undecodable document service response");
            MeltError::Decode {
                status: status.as_u16(),
                source,
            }
        })?;

        if !parsed.ok {
            tracing::error!(message = %parsed.message, "Document service rejected the upload");
            return Err(MeltError::Rejected(parsed.message));
        }

        let link = format!("{}/{}", self.host, parsed.key);
        tracing::info!(key = %parsed.key, link = %link, "Document published");
        Ok(link)
    }
}
