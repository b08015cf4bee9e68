//! Chat room notifications (HipChat v2 compatible).
//!
//! A notification carries either a link to a freshly published document or the
//! raw input, optionally preceded by a header line. Whatever JSON object the
//! chat service answers with is handed back untouched.

use std::fmt;
use std::io::Read;

use reqwest::Client;
use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;

use crate::config::Config;
use crate::contract::Publisher;
use crate::error::{MeltError, Result};
use crate::input::assemble;

/// Body of `POST /room/{room}/notification`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatPayload {
    pub message_format: &'static str,
    pub color: &'static str,
    pub notify: bool,
    pub message: String,
}

impl ChatPayload {
    /// Plain-text, yellow, silent.
    pub fn text(message: String) -> Self {
        ChatPayload {
            message_format: "text",
            color: "yellow",
            notify: false,
            message,
        }
    }
}

/// Open-ended answer from the chat service; no schema is assumed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatResponse(pub Map<String, Value>);

impl ChatResponse {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Decodes a response body. Anything that is not a JSON object yields an empty response.
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<Map<String, Value>>(body) {
            Ok(map) => ChatResponse(map),
            Err(e) => {
                if !body.trim().is_empty() {
                    tracing::warn!(error = %e, body = %body, "Chat response is not a JSON object, ignoring");
                }
                ChatResponse::default()
            }
        }
    }
}

impl fmt::Display for ChatResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = serde_json::to_string(&self.0).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

/// What to send and where, as chosen on the command line.
#[derive(Debug, Clone, Copy)]
pub struct NotifyRequest<'a> {
    pub room: &'a str,
    /// Document key, only used with `melt_link`.
    pub key: &'a str,
    pub head: &'a str,
    /// Publish the input and send its link instead of the input itself.
    pub melt_link: bool,
}

/// Builds the chat message text.
///
/// With `melt_link` the input is published (carrying the same header) and only
/// the resulting URL is appended; otherwise the raw input is appended.
pub async fn compose_message(
    request: &NotifyRequest<'_>,
    input: &[u8],
    publisher: &dyn Publisher,
) -> Result<String> {
    let mut message = String::new();
    if !request.head.is_empty() {
        message.push_str(request.head);
        message.push('\n');
    }

    if request.melt_link {
        let mut document = Vec::with_capacity(request.head.len() + 1 + input.len());
        assemble(request.head, input).read_to_end(&mut document)?;
        let link = publisher.publish(request.key, document).await?;
        message.push_str(&link);
    } else {
        message.push_str(&String::from_utf8_lossy(input));
    }

    Ok(message)
}

/// HTTP client for one chat host and token.
pub struct HipChatClient {
    client: Client,
    host: String,
    token: String,
}

impl HipChatClient {
    pub fn new(host: impl Into<String>, token: impl Into<String>) -> Self {
        HipChatClient {
            client: Client::new(),
            host: host.into(),
            token: token.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.hipchat_host.clone(), config.hipchat_token.clone())
    }

    /// `{host}/room/{room}/notification?auth_token={token}`. The room is not escaped.
    pub fn notification_url(&self, room: &str) -> Result<Url> {
        let raw = format!("{}/room/{}/notification", self.host, room);
        let mut url = Url::parse(&raw).map_err(|source| {
            tracing::error!(error = %source, room = %room, "Invalid notification url");
            MeltError::InvalidUrl { url: raw, source }
        })?;
        url.query_pairs_mut().append_pair("auth_token", &self.token);
        Ok(url)
    }

    /// Posts `message` to `room` and returns the decoded response.
    pub async fn send(&self, room: &str, message: String) -> Result<ChatResponse> {
        let url = self.notification_url(room)?;
        let payload = ChatPayload::text(message);
        tracing::info!(
            room = %room,
            bytes = payload.message.len(),
            token_set = !self.token.is_empty(),
            "Sending chat notification"
        );

        let response = self
            .client
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                // reqwest errors carry the url; drop it so the token stays out of logs
                let e = e.without_url();
                tracing::error!(error = %e, room = %room, "Chat notification failed");
                MeltError::Transport(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| MeltError::Transport(e.without_url()))?;
        tracing::info!(status = status.as_u16(), room = %room, "Chat service responded");

        Ok(ChatResponse::from_body(&body))
    }

    /// Composes the message for `request` and sends it.
    pub async fn notify(
        &self,
        request: &NotifyRequest<'_>,
        input: &[u8],
        publisher: &dyn Publisher,
    ) -> Result<ChatResponse> {
        let message = compose_message(request, input, publisher).await?;
        self.send(request.room, message).await
    }
}
