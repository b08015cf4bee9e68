//! This module implements the command-line surface of melt: flag parsing and the
//! dispatch between "publish a document" and "notify a chat room".
//!
//! All request building and response checking lives in [`crate::publish`] and
//! [`crate::notify`]. This module only wires the parsed [`Cli`] into them and
//! decides what ends up on stdout.
//!
//! ## How To Use
//! - From a shell: `echo hello | melt --head "build log"`.
//! - Programmatically: call [`dispatch`] with a constructed [`Cli`] and any reader
//!   standing in for stdin; it returns an [`Outcome`] instead of printing.

use crate::contract::Publisher;
use crate::error::MeltError;
use crate::input::{assemble, read_all};
use crate::load_config::{default_config_path, load_config};
use crate::notify::{ChatResponse, HipChatClient, NotifyRequest};
use crate::publish::MeltClient;
use anyhow::Result;
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;

/// Publish stdin to melt, or relay it to a HipChat room.
#[derive(Parser, Debug, Clone, Default)]
#[clap(
    name = "melt",
    version,
    about = "Publish standard input to a melt host, optionally relaying it to a HipChat room"
)]
pub struct Cli {
    /// Path to the config (defaults to $HOME/.melt)
    #[clap(long, short = 'c', env = "MELT_CONF")]
    pub conf: Option<PathBuf>,

    /// Key of the melt link; the server picks one when empty
    #[clap(long, short = 'k', default_value = "")]
    pub key: String,

    /// Header placed on top of the input
    #[clap(long, short = 'H', default_value = "")]
    pub head: String,

    /// Send to HipChat instead of printing a melt link
    #[clap(long)]
    pub hip: bool,

    /// HipChat: name of the room to send the input to
    #[clap(long, short = 'r')]
    pub room: Option<String>,

    /// HipChat: melt the content and send a link to it
    #[clap(long)]
    pub melt: bool,
}

/// Result of one invocation, printed by [`run`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Public URL of the published document.
    Published(String),
    /// Whatever the chat service answered.
    Notified(ChatResponse),
}

/// Runs the flow selected by `cli` over `input`. Nothing is printed here.
pub async fn dispatch<R: Read>(cli: Cli, input: R) -> Result<Outcome, MeltError> {
    let conf_path = cli.conf.clone().unwrap_or_else(default_config_path);
    let config = load_config(&conf_path)?;
    let publisher = MeltClient::from_config(&config);

    if !cli.hip {
        tracing::info!(command = "publish", key = %cli.key, "Publishing input");
        let body = read_all(assemble(&cli.head, input))?;
        let link = publisher.publish(&cli.key, body).await?;
        return Ok(Outcome::Published(link));
    }

    let room = match cli.room.as_deref() {
        Some(room) if !room.is_empty() => room,
        _ => {
            tracing::error!(command = "notify", "No HipChat room given");
            return Err(MeltError::MissingRoom);
        }
    };

    // stdin is read exactly once; both message variants work from this buffer
    let body = read_all(input)?;
    let request = NotifyRequest {
        room,
        key: &cli.key,
        head: &cli.head,
        melt_link: cli.melt,
    };
    tracing::info!(command = "notify", room = %room, melt_link = cli.melt, "Notifying chat room");
    let response = HipChatClient::from_config(&config)
        .notify(&request, &body, &publisher)
        .await?;
    Ok(Outcome::Notified(response))
}

/// Entrypoint for `main()`: dispatches over stdin and prints the outcome.
pub async fn run(cli: Cli) -> Result<()> {
    tracing::info!(hip = cli.hip, "melt starting");

    match dispatch(cli, std::io::stdin()).await? {
        Outcome::Published(link) => println!("{link}"),
        Outcome::Notified(response) => {
            if !response.is_empty() {
                println!("{response}");
            }
        }
    }

    Ok(())
}
