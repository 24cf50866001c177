//! Terminal client for the adventure runtime.
//!
//! The binary is the composition root: it reads the environment and the
//! command line, loads the scenario and rules, builds a
//! [`SessionHandle`](runtime::SessionHandle) and then either reads commands
//! from stdin or replays a self-play script.
//!
//! - [`cli`] defines the `new` and `resume` subcommands
//! - [`config`] reads `ADVENTURE_*` environment variables
//! - [`logging`] writes traces to a per-session log file
//! - [`narrator`] is the keyword-based narrative stand-in
//! - [`app`] assembles the session and runs the play loops
pub mod app;
pub mod cli;
pub mod config;
pub mod logging;
pub mod narrator;

pub use cli::{Cli, Command};
pub use config::ClientConfig;
pub use narrator::KeywordNarrator;
