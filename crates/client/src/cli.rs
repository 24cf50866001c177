//! Command-line surface.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "adventure", version, about = "Turn-based text adventure")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start a new session from a scenario file.
    New {
        /// Scenario file (.ron or .json).
        #[arg(long)]
        scenario: PathBuf,

        /// Seed for every dice roll; defaults to the scenario's seed, then the clock.
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Resume a session from a save artifact.
    Resume {
        /// Scenario file the save was created from.
        #[arg(long)]
        scenario: PathBuf,

        /// Save artifact (JSON or binary).
        #[arg(long)]
        save: PathBuf,

        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Debug, Args)]
pub struct CommonArgs {
    /// Rules file (TOML); built-in defaults when omitted.
    #[arg(long)]
    pub rules: Option<PathBuf>,

    /// Run non-interactively from a script: one command per line, or a JSON
    /// array of intents.
    #[arg(long = "self-play", value_name = "SCRIPT")]
    pub self_play: Option<PathBuf>,

    /// Upper bound on intents submitted during self-play.
    #[arg(long, default_value_t = runtime::SelfPlayConfig::DEFAULT_MAX_INTENTS)]
    pub max_intents: usize,
}

impl Command {
    pub fn common(&self) -> &CommonArgs {
        match self {
            Command::New { common, .. } | Command::Resume { common, .. } => common,
        }
    }
}
