#![doc = "melt: publish standard input to a melt document store and relay it to HipChat."]

//! The binary is a thin wrapper over [`cli::run`]. Each remote interaction has
//! its own module so request building and response checking can be tested
//! against a local HTTP server.

pub mod cli;
pub mod config;
pub mod contract;
pub mod error;
pub mod input;
pub mod load_config;
pub mod notify;
pub mod publish;

pub use cli::{dispatch, run, Cli, Outcome};
pub use error::MeltError;
